//! Artifact template assembly
//!
//! Assembly is plain text substitution; it knows nothing about HTML. That is
//! safe because the substituted values are restricted to the hex and base64
//! alphabets, which can't form a placeholder token or close a script element.

use serde::Deserialize;

use crate::error::{SeedsaverError, SeedsaverResult};

/// Replaced by the envelope text
pub const ENVELOPE_PLACEHOLDER: &str = "ENCRYPTED_DATA_PLACEHOLDER";

/// Replaced by the hex salt
pub const SALT_PLACEHOLDER: &str = "SALT_PLACEHOLDER";

/// Opening tag of the JSON data island holding salt and envelope
pub const DATA_ISLAND_OPEN: &str = r#"<script id="seedsaver-archive" type="application/json">"#;

const DATA_ISLAND_CLOSE: &str = "</script>";

/// The viewer template shipped with the binary
pub const DEFAULT_TEMPLATE: &str = include_str!("../../assets/template.html");

/// Salt and envelope recovered from an assembled artifact
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArchiveContents {
    /// Hex salt
    pub salt: String,
    /// Envelope text
    #[serde(rename = "data")]
    pub envelope: String,
}

/// Check that `template` contains each placeholder exactly once
pub fn validate(template: &str) -> SeedsaverResult<()> {
    for placeholder in [ENVELOPE_PLACEHOLDER, SALT_PLACEHOLDER] {
        match template.matches(placeholder).count() {
            1 => {}
            0 => {
                return Err(SeedsaverError::template(format!(
                    "placeholder {} is missing",
                    placeholder
                )))
            }
            n => {
                return Err(SeedsaverError::template(format!(
                    "placeholder {} appears {} times",
                    placeholder, n
                )))
            }
        }
    }
    Ok(())
}

/// Substitute salt and envelope into `template`
///
/// Pure: the same inputs always produce byte-identical documents.
pub fn assemble(template: &str, salt_hex: &str, envelope_text: &str) -> SeedsaverResult<String> {
    validate(template)?;

    if salt_hex.is_empty() || !salt_hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(SeedsaverError::template("salt must be non-empty hex"));
    }
    if envelope_text.is_empty() || !envelope_text.bytes().all(is_base64_byte) {
        return Err(SeedsaverError::template("envelope must be non-empty base64"));
    }

    Ok(template
        .replacen(ENVELOPE_PLACEHOLDER, envelope_text, 1)
        .replacen(SALT_PLACEHOLDER, salt_hex, 1))
}

/// Pull the salt and envelope back out of an assembled artifact
///
/// Works with any template that keeps the `seedsaver-archive` data island.
pub fn extract(document: &str) -> SeedsaverResult<ArchiveContents> {
    let start = document
        .find(DATA_ISLAND_OPEN)
        .ok_or_else(|| SeedsaverError::malformed("archive data block not found"))?
        + DATA_ISLAND_OPEN.len();
    let len = document[start..]
        .find(DATA_ISLAND_CLOSE)
        .ok_or_else(|| SeedsaverError::malformed("archive data block is not terminated"))?;

    let contents: ArchiveContents = serde_json::from_str(document[start..start + len].trim())
        .map_err(|e| SeedsaverError::malformed(format!("archive data block is not valid JSON: {}", e)))?;

    if contents.salt == SALT_PLACEHOLDER || contents.envelope == ENVELOPE_PLACEHOLDER {
        return Err(SeedsaverError::malformed("document is an unfilled template"));
    }
    Ok(contents)
}

fn is_base64_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'+' || b == b'/' || b == b'='
}
