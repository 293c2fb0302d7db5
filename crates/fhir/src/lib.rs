//! FHIR R4 tool execution for CareBridge.
//!
//! Maps the model's tool calls onto FHIR search URLs, executes them over
//! HTTP with the clinician's bearer token, and caches successful responses
//! for a short TTL so repeated lookups within a session don't hit the
//! FHIR server again.

pub mod cache;
pub mod catalog;
pub mod executor;
pub mod url;

pub use cache::ResponseCache;
pub use catalog::tool_definitions;
pub use executor::FhirExecutor;
