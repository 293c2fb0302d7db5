//! The tool catalog sent to the model on every turn.
//!
//! Six FHIR search tools plus `end_chat`. The schemas are what the model
//! sees; field names here must match what [`crate::url::build_url`] reads.

use carebridge_core::ToolDefinition;
use serde_json::json;

/// All tool definitions, in the order they are advertised to the model.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "search_fhir_patient".into(),
            description: "Search for patients in the FHIR system by name, email, phone, birthdate, or patient ID.".into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "GIVEN":      { "type": "string", "description": "Patient first/given name" },
                    "FAMILY":     { "type": "string", "description": "Patient last/family name" },
                    "EMAIL":      { "type": "string", "description": "Patient email address" },
                    "PHONE":      { "type": "string", "description": "Patient phone number" },
                    "BIRTHDATE":  { "type": "string", "description": "Patient date of birth (YYYY-MM-DD)" },
                    "PATIENT_ID": { "type": "string", "description": "Patient numeric ID" }
                }
            }),
        },
        ToolDefinition {
            name: "search_patient_condition".into(),
            description: "Search patient conditions/diagnoses from FHIR. Can search by subject (patient ID) and/or ICD-9 code.".into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "SUBJECT":   { "type": "string", "description": "Patient numeric ID (no 'Patient/' prefix)" },
                    "CODE":      { "type": "string", "description": "ICD-9 diagnosis code" },
                    "ENCOUNTER": { "type": "string", "description": "Encounter numeric ID" }
                }
            }),
        },
        ToolDefinition {
            name: "search_patient_procedure".into(),
            description: "Search patient procedures/surgeries from FHIR.".into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "SUBJECT":   { "type": "string", "description": "Patient numeric ID" },
                    "CODE":      { "type": "string", "description": "CPT procedure code" },
                    "ENCOUNTER": { "type": "string", "description": "Encounter numeric ID" }
                }
            }),
        },
        ToolDefinition {
            name: "search_patient_medications".into(),
            description: "Search patient medication requests/prescriptions from FHIR.".into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "SUBJECT":        { "type": "string", "description": "Patient numeric ID" },
                    "CODE":           { "type": "string", "description": "Drug code (e.g. INSULIN, ACET325)" },
                    "PRESCRIPTIONID": { "type": "string", "description": "Prescription ID number" }
                }
            }),
        },
        ToolDefinition {
            name: "search_patient_encounter".into(),
            description: "Search patient encounters (admissions, discharges, insurance info) from FHIR.".into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "SUBJECT": { "type": "string", "description": "Patient numeric ID" },
                    "DATE":    { "type": "string", "description": "Start date filter e.g. 'gt2000-01-13'" },
                    "DATE2":   { "type": "string", "description": "End date filter e.g. 'lt2024-09-13'" }
                }
            }),
        },
        ToolDefinition {
            name: "search_patient_observations".into(),
            description: "Search patient lab results, vitals, and clinical observations from FHIR.".into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "SUBJECT":        { "type": "string", "description": "Patient numeric ID" },
                    "CODE":           { "type": "string", "description": "LOINC observation code" },
                    "value_quantity": { "type": "string", "description": "Filter by value e.g. 'gt10|mEq/L'" },
                    "page":           { "type": "number", "description": "Page number starting at 0" }
                }
            }),
        },
        ToolDefinition {
            name: "end_chat".into(),
            description: "End the conversation when the user explicitly indicates they are done.".into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "farewell_message": { "type": "string", "description": "Short professional closing message." }
                },
                "required": ["farewell_message"]
            }),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_all_tools() {
        let names: Vec<String> = tool_definitions().into_iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![
                "search_fhir_patient",
                "search_patient_condition",
                "search_patient_procedure",
                "search_patient_medications",
                "search_patient_encounter",
                "search_patient_observations",
                "end_chat",
            ]
        );
    }

    #[test]
    fn end_chat_requires_farewell_message() {
        let defs = tool_definitions();
        let end_chat = defs.iter().find(|t| t.name == "end_chat").unwrap();
        assert_eq!(
            end_chat.parameters["required"],
            serde_json::json!(["farewell_message"])
        );
    }

    #[test]
    fn schema_fields_match_url_builder_inputs() {
        let defs = tool_definitions();
        let patient = defs.iter().find(|t| t.name == "search_fhir_patient").unwrap();
        let props = patient.parameters["properties"].as_object().unwrap();
        for field in ["GIVEN", "FAMILY", "EMAIL", "PHONE", "BIRTHDATE", "PATIENT_ID"] {
            assert!(props.contains_key(field), "missing {field}");
        }
    }
}
