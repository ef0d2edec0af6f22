use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const SCHEMA_NAME: &str = "translation_feedback";

/// Structured answer returned by the provider. Immutable once decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranslationResult {
    pub japanese_translation: String,
    pub feedback: String,
    pub confidence_score: f64,
    pub detected_nuance: String,
}

/// JSON schema attached to the request so the provider emits exactly the four fields above.
pub fn response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "japanese_translation": {
                "type": "string",
                "description": "The natural Japanese translation."
            },
            "feedback": {
                "type": "string",
                "description": "Constructive feedback on grammar/nuance in English."
            },
            "confidence_score": {
                "type": "number",
                "description": "Evaluation score from 0 to 100."
            },
            "detected_nuance": {
                "type": "string",
                "description": "Tone detection (e.g., 'Casual', 'Formal')."
            }
        },
        "required": ["japanese_translation", "feedback", "confidence_score", "detected_nuance"],
        "additionalProperties": false
    })
}
