//! Payload file parsing.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::payload::StaticPayload;
use crate::validate::{validate_payload, ValidationResult};

/// On-disk payload encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFormat {
    Json,
    Toml,
}

impl PayloadFormat {
    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Some(PayloadFormat::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Some(PayloadFormat::Toml),
            _ => None,
        }
    }
}

/// Errors that can occur while loading a payload file.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported payload format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("invalid payload: {0}")]
    Invalid(ValidationResult),
}

impl From<PayloadError> for mr_common::Error {
    fn from(err: PayloadError) -> Self {
        match err {
            PayloadError::Io(e) => mr_common::Error::Io(e),
            PayloadError::Json(e) => mr_common::Error::Json(e),
            PayloadError::Toml(e) => mr_common::Error::Config(e.to_string()),
            PayloadError::UnsupportedFormat(p) => {
                mr_common::Error::Config(format!("unsupported payload format: {}", p.display()))
            }
            PayloadError::Invalid(result) => mr_common::Error::InvalidPayload(result.to_string()),
        }
    }
}

/// Parse and validate payload text.
pub fn parse_payload(content: &str, format: PayloadFormat) -> Result<StaticPayload, PayloadError> {
    let payload: StaticPayload = match format {
        PayloadFormat::Json => serde_json::from_str(content)?,
        PayloadFormat::Toml => toml::from_str(content)?,
    };

    let validation = validate_payload(&payload);
    if !validation.is_ok() {
        return Err(PayloadError::Invalid(validation));
    }

    Ok(payload)
}

/// Load and validate a payload file. The format follows the extension.
pub fn load_payload(path: &Path) -> Result<StaticPayload, PayloadError> {
    let format = PayloadFormat::from_path(path)
        .ok_or_else(|| PayloadError::UnsupportedFormat(path.to_path_buf()))?;
    let content = std::fs::read_to_string(path)?;
    let payload = parse_payload(&content, format)?;
    debug!(path = %path.display(), ?format, "payload loaded");
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::PchMode;

    const JSON_PAYLOAD: &str = r#"{
        "schema_version": "1.0.0",
        "public_dependencies": ["Core"],
        "private_dependencies": ["Slate", "SlateCore"],
        "pch_mode": "use_shared_pchs",
        "gated_dependencies": [{"name": "EditorFramework", "min_major": 5}]
    }"#;

    const TOML_PAYLOAD: &str = r#"
schema_version = "1.0.0"
public_dependencies = ["Core"]
private_dependencies = ["Slate", "SlateCore"]
pch_mode = "use_shared_pchs"

[[gated_dependencies]]
name = "EditorFramework"
min_major = 5
"#;

    #[test]
    fn json_and_toml_agree() {
        let from_json = parse_payload(JSON_PAYLOAD, PayloadFormat::Json).unwrap();
        let from_toml = parse_payload(TOML_PAYLOAD, PayloadFormat::Toml).unwrap();
        assert_eq!(from_json, from_toml);
        assert_eq!(from_json.pch_mode, PchMode::UseSharedPchs);
        assert_eq!(from_json.private_dependencies, vec!["Slate", "SlateCore"]);
    }

    #[test]
    fn invalid_payload_rejected() {
        let json = r#"{"private_dependencies": ["Slate", "Slate"]}"#;
        let err = parse_payload(json, PayloadFormat::Json).unwrap_err();
        assert!(matches!(err, PayloadError::Invalid(_)));
        assert_eq!(
            err.to_string(),
            "invalid payload: duplicate private dependency: Slate"
        );
    }

    #[test]
    fn malformed_json_rejected() {
        let err = parse_payload("{not json", PayloadFormat::Json).unwrap_err();
        assert!(matches!(err, PayloadError::Json(_)));
    }

    #[test]
    fn unknown_pch_mode_rejected() {
        let err = parse_payload(r#"{"pch_mode": "sometimes"}"#, PayloadFormat::Json).unwrap_err();
        assert!(matches!(err, PayloadError::Json(_)));
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            PayloadFormat::from_path(Path::new("payload.json")),
            Some(PayloadFormat::Json)
        );
        assert_eq!(
            PayloadFormat::from_path(Path::new("payload.TOML")),
            Some(PayloadFormat::Toml)
        );
        assert_eq!(PayloadFormat::from_path(Path::new("payload.yaml")), None);
        assert_eq!(PayloadFormat::from_path(Path::new("payload")), None);
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let err = load_payload(Path::new("/nonexistent/payload.yaml")).unwrap_err();
        assert!(matches!(err, PayloadError::UnsupportedFormat(_)));
    }

    #[test]
    fn converts_into_common_error() {
        let err = parse_payload(r#"{"private_dependencies": ["A", "A"]}"#, PayloadFormat::Json)
            .unwrap_err();
        let common: mr_common::Error = err.into();
        assert_eq!(common.code(), 21);
    }
}
