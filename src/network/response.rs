//! Upstream response body

use super::UpstreamError;
use serde_json::Value;

/// A successful upstream payload.
///
/// `raw` is what gets forwarded to the client; `json` is the parsed form, only
/// read for diagnostics.
#[derive(Debug, Clone)]
pub struct UpstreamBody {
    raw: Vec<u8>,
    json: Value,
}

impl UpstreamBody {
    /// Parse a body, rejecting anything that is not a JSON object
    pub fn parse(raw: Vec<u8>) -> Result<Self, UpstreamError> {
        let json: Value = serde_json::from_slice(&raw)
            .map_err(|e| UpstreamError::InvalidResponse(format!("JSON parse error: {e}")))?;

        if !json.is_object() {
            return Err(UpstreamError::InvalidResponse(
                "expected a JSON object".to_string(),
            ));
        }

        Ok(Self { raw, json })
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn json(&self) -> &Value {
        &self.json
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.raw
    }
}
