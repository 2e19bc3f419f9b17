//! Inline photo evidence encoded as a base64 data URL.

use super::TaskDomainError;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::fmt;

const DATA_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// Photo evidence attached to a task completion.
///
/// Stored as a self-describing `data:<mime>;base64,<payload>` string
/// directly alongside the task and history records; there is no separate
/// blob store.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoEvidence(String);

impl PhotoEvidence {
    /// Encodes raw image bytes into evidence.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidEvidenceMime`] when the MIME type
    /// is not an `image/*` type.
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Result<Self, TaskDomainError> {
        let mime = mime.trim();
        if !is_image_mime(mime) {
            return Err(TaskDomainError::InvalidEvidenceMime(mime.to_owned()));
        }
        let payload = STANDARD.encode(bytes);
        Ok(Self(format!("{DATA_PREFIX}{mime}{BASE64_MARKER}{payload}")))
    }

    /// Accepts an already-encoded data URL, verifying its shape.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidEvidenceMime`] for non-image MIME
    /// types and [`TaskDomainError::InvalidEvidencePayload`] when the value
    /// is not a decodable base64 data URL.
    pub fn from_data_url(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let url = value.into();
        let (mime, payload) = split_data_url(&url)?;
        if !is_image_mime(mime) {
            return Err(TaskDomainError::InvalidEvidenceMime(mime.to_owned()));
        }
        STANDARD
            .decode(payload)
            .map_err(|_| TaskDomainError::InvalidEvidencePayload)?;
        Ok(Self(url))
    }

    /// Returns the full data URL.
    #[must_use]
    pub fn as_data_url(&self) -> &str {
        &self.0
    }

    /// Returns the MIME type embedded in the data URL.
    #[must_use]
    pub fn mime(&self) -> &str {
        split_data_url(&self.0).map_or("", |(mime, _)| mime)
    }

    /// Decodes the payload back into raw image bytes.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidEvidencePayload`] when the stored
    /// payload does not decode; this only happens for values deserialized
    /// from a corrupted store.
    pub fn decode(&self) -> Result<Vec<u8>, TaskDomainError> {
        let (_, payload) = split_data_url(&self.0)?;
        STANDARD
            .decode(payload)
            .map_err(|_| TaskDomainError::InvalidEvidencePayload)
    }
}

impl fmt::Debug for PhotoEvidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The payload can be megabytes of base64; show only the MIME type.
        write!(f, "PhotoEvidence({})", self.mime())
    }
}

fn is_image_mime(mime: &str) -> bool {
    mime.strip_prefix("image/")
        .is_some_and(|subtype| !subtype.is_empty() && !subtype.contains(char::is_whitespace))
}

fn split_data_url(url: &str) -> Result<(&str, &str), TaskDomainError> {
    url.strip_prefix(DATA_PREFIX)
        .and_then(|rest| rest.split_once(BASE64_MARKER))
        .ok_or(TaskDomainError::InvalidEvidencePayload)
}
