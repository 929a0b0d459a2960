use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

/// A locally selected thumbnail, held as a base64 data URL so the same
/// payload serves preview and transmission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedThumbnail {
    pub file_name: String,
    pub mime_type: String,
    pub data_url: String,
}

impl UploadedThumbnail {
    /// Reads a local file into a thumbnail. Files whose media type does not
    /// begin with `image/` are silently ignored (`Ok(None)`), matching the
    /// drop-zone behavior; only read failures are errors.
    pub fn from_file(path: &Path) -> Result<Option<Self>> {
        let Some(mime_type) = mime_for_path(path) else {
            return Ok(None);
        };
        let bytes =
            fs::read(path).with_context(|| format!("failed reading {}", path.display()))?;
        let file_name = path
            .file_name()
            .and_then(|value| value.to_str())
            .unwrap_or("thumbnail")
            .to_string();
        Ok(Some(Self {
            file_name,
            mime_type: mime_type.to_string(),
            data_url: format!("data:{mime_type};base64,{}", BASE64.encode(bytes)),
        }))
    }

    /// The raw base64 payload with the data-URL prefix stripped, as the
    /// wire format expects.
    pub fn inline_payload(&self) -> &str {
        self.data_url
            .split_once(',')
            .map(|(_, tail)| tail)
            .unwrap_or(&self.data_url)
    }
}

fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(|value| value.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}
