//! Payload resolution.
//!
//! Lookup order:
//! 1. Explicit path passed by the caller
//! 2. `MODRULES_PAYLOAD` environment variable
//! 3. `<config_dir>/modrules/payload.json`, then `payload.toml`
//! 4. Embedded default payload
//!
//! A path the user named (1 or 2) that fails to load is an error. Files found
//! by discovery (3) that fail to load are logged and skipped.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::load::{load_payload, PayloadError};
use crate::payload::{default_payload, StaticPayload};

/// Environment variable naming a payload file.
pub const PAYLOAD_ENV_VAR: &str = "MODRULES_PAYLOAD";

/// Directory name under the platform config dir.
const CONFIG_DIR_NAME: &str = "modrules";

/// File names probed inside the config directory, in order.
const DISCOVERY_FILE_NAMES: &[&str] = &["payload.json", "payload.toml"];

/// Candidate locations for a payload file.
#[derive(Debug, Clone, Default)]
pub struct PayloadPaths {
    pub explicit: Option<PathBuf>,
    pub env: Option<PathBuf>,
    pub config_dir: Option<PathBuf>,
}

impl PayloadPaths {
    /// Gather locations from the process environment.
    pub fn discover(explicit: Option<&Path>) -> Self {
        let env = std::env::var_os(PAYLOAD_ENV_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let config_dir = dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME));

        Self {
            explicit: explicit.map(Path::to_path_buf),
            env,
            config_dir,
        }
    }

    /// Only the embedded default; ignores the environment entirely.
    pub fn embedded_only() -> Self {
        Self::default()
    }
}

/// Where a resolved payload came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum PayloadSource {
    Explicit(PathBuf),
    Environment(PathBuf),
    ConfigDir(PathBuf),
    Embedded,
}

impl std::fmt::Display for PayloadSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayloadSource::Explicit(p) => write!(f, "explicit:{}", p.display()),
            PayloadSource::Environment(p) => write!(f, "env:{}", p.display()),
            PayloadSource::ConfigDir(p) => write!(f, "config:{}", p.display()),
            PayloadSource::Embedded => write!(f, "embedded"),
        }
    }
}

/// A payload together with its provenance.
#[derive(Debug, Clone)]
pub struct ResolvedPayload {
    pub payload: StaticPayload,
    pub source: PayloadSource,
}

/// Resolve the payload to use for this configuration pass.
pub fn resolve_payload(paths: &PayloadPaths) -> Result<ResolvedPayload, PayloadError> {
    if let Some(path) = &paths.explicit {
        let payload = load_payload(path)?;
        info!(path = %path.display(), "using explicit payload");
        return Ok(ResolvedPayload {
            payload,
            source: PayloadSource::Explicit(path.clone()),
        });
    }

    if let Some(path) = &paths.env {
        let payload = load_payload(path)?;
        info!(path = %path.display(), var = PAYLOAD_ENV_VAR, "using payload from environment");
        return Ok(ResolvedPayload {
            payload,
            source: PayloadSource::Environment(path.clone()),
        });
    }

    if let Some(dir) = &paths.config_dir {
        for name in DISCOVERY_FILE_NAMES {
            let path = dir.join(name);
            if !path.exists() {
                continue;
            }
            match load_payload(&path) {
                Ok(payload) => {
                    info!(path = %path.display(), "using discovered payload");
                    return Ok(ResolvedPayload {
                        payload,
                        source: PayloadSource::ConfigDir(path),
                    });
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable payload");
                }
            }
        }
    }

    debug!("no payload file found, using embedded default");
    Ok(ResolvedPayload {
        payload: default_payload(),
        source: PayloadSource::Embedded,
    })
}
