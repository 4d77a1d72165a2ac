use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bytes::Bytes;
use uuid::Uuid;

/// A single user-selected cover photo staged for upload.
///
/// Exactly one asset is staged at a time; staging again replaces the prior
/// one. The `id` distinguishes staging generations so a best-effort preview
/// derived for a replaced asset can be discarded instead of landing on its
/// successor.
#[derive(Debug, Clone)]
pub struct StagedAsset {
    pub id: Uuid,
    pub original_filename: String,
    pub content_type: String,
    pub data: Bytes,
    /// Non-authoritative local preview; derived asynchronously and never a
    /// submission prerequisite.
    pub preview_data_uri: Option<String>,
}

impl StagedAsset {
    pub fn new(original_filename: String, content_type: String, data: Bytes) -> Self {
        StagedAsset {
            id: Uuid::new_v4(),
            original_filename,
            content_type,
            data,
            preview_data_uri: None,
        }
    }

    /// Encode the raw bytes as a `data:` URI for display purposes.
    pub fn derive_preview_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            BASE64.encode(&self.data)
        )
    }
}
