use crate::error::ExtractError;

/// Decode a plain-text upload. Invalid UTF-8 is an error, not replaced.
pub fn extract_text(bytes: Vec<u8>) -> Result<String, ExtractError> {
    Ok(String::from_utf8(bytes)?)
}
