//! Response schemas for structured-output requests.
//!
//! Shapes follow the Gemini response-schema subset of OpenAPI types.

use serde_json::{json, Value};

/// Schema for the scene-breakdown response: an array of scene records.
pub fn scene_breakdown_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "sceneNumber": {
                    "type": "INTEGER",
                    "description": "Sequential scene number, starting from 1."
                },
                "location": {
                    "type": "STRING",
                    "description": "Scene location in screenplay format, e.g. 'EXT. ALIEN PLANET - DAY'."
                },
                "characters": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "Characters present in the scene."
                },
                "summary": {
                    "type": "STRING",
                    "description": "One or two sentence summary of the scene."
                }
            },
            "required": ["sceneNumber", "location", "characters", "summary"]
        }
    })
}

/// Schema for the mood-board prompt response: exactly four prompt strings.
pub fn mood_board_prompts_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "STRING",
            "description": "An evocative image-generation prompt for one facet of the story."
        },
        "minItems": 4,
        "maxItems": 4
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_schema_requires_all_fields() {
        let schema = scene_breakdown_schema();
        let required = schema["items"]["required"].as_array().unwrap();
        assert_eq!(required.len(), 4);
        assert!(required.iter().any(|v| v == "sceneNumber"));
    }

    #[test]
    fn mood_board_schema_pins_cardinality() {
        let schema = mood_board_prompts_schema();
        assert_eq!(schema["minItems"], 4);
        assert_eq!(schema["maxItems"], 4);
    }
}
