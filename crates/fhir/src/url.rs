//! Tool-name to FHIR search URL mapping.
//!
//! Argument keys follow the tool schemas the model sees (upper-case field
//! names); query parameter names follow the FHIR R4 search spec. Empty or
//! missing argument values never produce a query parameter.

use serde_json::Value;

/// Build the FHIR search URL for a tool call, or `None` for a tool name
/// that has no FHIR endpoint.
pub fn build_url(base: &str, tool_name: &str, args: &Value) -> Option<String> {
    let base = base.trim_end_matches('/');
    match tool_name {
        "search_fhir_patient" => Some(with_params(
            format!("{base}/baseR4/Patient"),
            &[
                ("family", str_arg(args, "FAMILY")),
                ("given", str_arg(args, "GIVEN")),
                ("email", str_arg(args, "EMAIL")),
                ("phone", str_arg(args, "PHONE")),
                ("birthdate", str_arg(args, "BIRTHDATE")),
                ("_id", str_arg(args, "PATIENT_ID")),
            ],
        )),

        "search_patient_condition" => Some(with_params(
            format!("{base}/baseR4/Condition"),
            &[
                ("subject", str_arg(args, "SUBJECT")),
                ("code", str_arg(args, "CODE")),
                ("encounter", str_arg(args, "ENCOUNTER")),
            ],
        )),

        "search_patient_procedure" => Some(with_params(
            format!("{base}/baseR4/Procedure"),
            &[
                ("subject", str_arg(args, "SUBJECT")),
                ("code", str_arg(args, "CODE")),
                ("encounter", str_arg(args, "ENCOUNTER")),
            ],
        )),

        "search_patient_medications" => Some(with_params(
            format!("{base}/baseR4/MedicationRequest"),
            &[
                ("subject", str_arg(args, "SUBJECT")),
                ("code", str_arg(args, "CODE")),
                ("prescriptionId", str_arg(args, "PRESCRIPTIONID")),
            ],
        )),

        // "date" may appear twice (start and end of a range)
        "search_patient_encounter" => Some(with_params(
            format!("{base}/baseR4/Encounter"),
            &[
                ("subject", str_arg(args, "SUBJECT")),
                ("date", str_arg(args, "DATE")),
                ("date", str_arg(args, "DATE2")),
            ],
        )),

        "search_patient_observations" => {
            // Endpoint is /Observations (plural); the singular form 500s.
            let page = args.get("page").and_then(Value::as_u64).unwrap_or(0);
            let url = with_params(
                format!("{base}/baseR4/Observations"),
                &[
                    ("subject", str_arg(args, "SUBJECT")),
                    ("code", str_arg(args, "CODE")),
                    ("value_quantity", str_arg(args, "value_quantity")),
                ],
            );
            // The server requires page even for the first one
            let sep = if url.contains('?') { '&' } else { '?' };
            Some(format!("{url}{sep}page={page}"))
        }

        _ => None,
    }
}

fn str_arg(args: &Value, field: &str) -> String {
    match args.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn with_params(base: String, params: &[(&str, String)]) -> String {
    let mut url = base;
    let mut first = true;
    for (key, value) in params {
        if value.is_empty() {
            continue;
        }
        url.push(if first { '?' } else { '&' });
        url.push_str(key);
        url.push('=');
        url.push_str(value);
        first = false;
    }
    url
}
