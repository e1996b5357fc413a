//! ufdata JSON reading and writing

use super::{UfData, UFDATA_FORMAT_VERSION};
use crate::{ConvertError, Result};

/// Read a ufdata document, checking its schema version before decoding
pub fn read_ufdata(data: &[u8]) -> Result<UfData> {
    let value: serde_json::Value = serde_json::from_slice(data)?;

    let version = value
        .get("formatVersion")
        .and_then(serde_json::Value::as_u64)
        .ok_or_else(|| {
            ConvertError::UnsupportedFileFormat("ufdata document without formatVersion".into())
        })?;

    if version != u64::from(UFDATA_FORMAT_VERSION) {
        return Err(ConvertError::UnsupportedFileFormat(format!(
            "ufdata formatVersion {} (supported: {})",
            version, UFDATA_FORMAT_VERSION
        )));
    }

    Ok(serde_json::from_value(value)?)
}

/// Serialize a ufdata document to JSON bytes
pub fn write_ufdata(data: &UfData) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(data)?)
}
