//! Shared types for driver capabilities.

use serde::{Deserialize, Serialize};

/// Aspect ratio for image generation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum AspectRatio {
    /// 16:9, cinematic frames
    #[display("16:9")]
    Widescreen,
    /// 3:4, character portraits
    #[display("3:4")]
    Portrait,
    /// 1:1, mood-board tiles
    #[display("1:1")]
    Square,
}

/// A generated image payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// MIME type, e.g. "image/png"
    pub mime: String,
    /// Binary image data
    pub data: Vec<u8>,
}

impl ImageData {
    /// Render as a self-contained `data:` URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use cinestudio_interface::ImageData;
    ///
    /// let image = ImageData {
    ///     mime: "image/png".to_string(),
    ///     data: vec![1, 2, 3],
    /// };
    /// assert!(image.to_data_url().starts_with("data:image/png;base64,"));
    /// ```
    pub fn to_data_url(&self) -> String {
        use base64::Engine as _;
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.data);
        format!("data:{};base64,{}", self.mime, encoded)
    }
}
