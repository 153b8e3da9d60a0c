//! Base64 image payloads.
//!
//! Clients post a PNG either as bare base64 or as a `data:image/png;base64,`
//! URI. Only that exact prefix is stripped; anything else is handed to the
//! decoder untouched and will usually fail to decode.

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::Deserialize;

use crate::error::IngestError;

/// Data URI prefix removed from incoming payloads.
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// First eight bytes of every PNG file.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Standard alphabet, padding optional.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Raw body of an image submission.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ImageRequest {
    #[serde(rename = "imageData")]
    pub image_data: Option<String>,
}

impl ImageRequest {
    /// Decode the payload into image bytes.
    ///
    /// With `require_png` set, the decoded bytes must start with
    /// [`PNG_SIGNATURE`].
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::InvalidInput`] if `imageData` is missing or
    /// empty, is not base64, decodes to nothing, or fails the PNG check.
    pub fn decode(&self, require_png: bool) -> Result<Vec<u8>, IngestError> {
        let data = match self.image_data.as_deref() {
            Some(d) if !d.is_empty() => d,
            _ => return Err(IngestError::invalid("missing required field 'imageData'")),
        };
        decode_image_data(data, require_png)
    }
}

/// Remove the PNG data URI prefix if, and only if, it matches exactly.
#[must_use]
pub fn strip_data_uri_prefix(data: &str) -> &str {
    data.strip_prefix(PNG_DATA_URI_PREFIX).unwrap_or(data)
}

/// Strip the prefix, drop ASCII whitespace and decode.
///
/// # Errors
///
/// See [`ImageRequest::decode`].
pub fn decode_image_data(data: &str, require_png: bool) -> Result<Vec<u8>, IngestError> {
    let encoded: String = strip_data_uri_prefix(data)
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let bytes = LENIENT
        .decode(encoded.as_bytes())
        .map_err(|e| IngestError::invalid(format!("imageData is not valid base64: {e}")))?;

    if bytes.is_empty() {
        return Err(IngestError::invalid("imageData decodes to an empty image"));
    }
    if require_png && !bytes.starts_with(&PNG_SIGNATURE) {
        return Err(IngestError::invalid("imageData is not a PNG image"));
    }
    Ok(bytes)
}
