//! Imagen `predict` data transfer objects.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One prompt instance in a `predict` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagenInstance {
    /// Text prompt to render
    pub prompt: String,
}

/// Generation parameters for a `predict` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagenParameters {
    /// Number of images to generate
    pub sample_count: u32,
    /// Aspect ratio, e.g. "16:9"
    pub aspect_ratio: String,
}

/// An Imagen `predict` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ImagenRequest {
    /// Prompt instances; one per requested subject
    instances: Vec<ImagenInstance>,
    /// Shared generation parameters
    parameters: ImagenParameters,
}

impl ImagenRequest {
    /// Creates a single-image request.
    pub fn single(prompt: impl Into<String>, aspect_ratio: impl Into<String>) -> Self {
        Self {
            instances: vec![ImagenInstance {
                prompt: prompt.into(),
            }],
            parameters: ImagenParameters {
                sample_count: 1,
                aspect_ratio: aspect_ratio.into(),
            },
        }
    }
}

/// One generated image in a `predict` response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct ImagenPrediction {
    /// Base64-encoded image bytes
    bytes_base64_encoded: String,
    /// Image MIME type; the API omits it on some model versions
    #[serde(default)]
    mime_type: Option<String>,
}

/// An Imagen `predict` response body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Getters)]
pub struct ImagenResponse {
    /// Generated images, one per instance times `sample_count`
    #[serde(default)]
    predictions: Vec<ImagenPrediction>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_to_wire_shape() {
        let request = ImagenRequest::single("A rain-slicked neon alley", "16:9");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["instances"][0]["prompt"], "A rain-slicked neon alley");
        assert_eq!(value["parameters"]["sampleCount"], 1);
        assert_eq!(value["parameters"]["aspectRatio"], "16:9");
    }

    #[test]
    fn response_parses_predictions() {
        let raw = json!({
            "predictions": [{
                "bytesBase64Encoded": "aGVsbG8=",
                "mimeType": "image/png"
            }]
        });
        let response: ImagenResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.predictions().len(), 1);
        assert_eq!(
            response.predictions()[0].bytes_base64_encoded(),
            "aGVsbG8="
        );
    }

    #[test]
    fn empty_response_parses() {
        let response: ImagenResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.predictions().is_empty());
    }
}
