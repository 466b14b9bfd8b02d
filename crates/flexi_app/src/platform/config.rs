use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use flexi_engine::{Capability, ClientSettings, EndpointError, EngineSettings, Endpoints};
use flexi_logging::{flexi_debug, flexi_info};
use serde::Deserialize;

const DEFAULT_CONFIG_FILENAME: &str = "flexiconnect.ron";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error(transparent)]
    Endpoint(#[from] EndpointError),
}

/// Endpoint URLs given on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct EndpointOverrides {
    pub spam: Option<String>,
    pub toxicity: Option<String>,
    pub image_detection: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct FileConfig {
    endpoints: Endpoints,
    request_timeout_secs: Option<u64>,
    connect_timeout_secs: Option<u64>,
    max_response_bytes: u64,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            request_timeout_secs: None,
            connect_timeout_secs: None,
            max_response_bytes: ClientSettings::default().max_response_bytes,
        }
    }
}

/// Builds engine settings from an optional RON file plus overrides.
///
/// An explicit `path` must exist. Without one, `./flexiconnect.ron` is used
/// if present and built-in defaults otherwise.
pub fn load(
    path: Option<&Path>,
    overrides: &EndpointOverrides,
) -> Result<EngineSettings, ConfigError> {
    let file_config = match path {
        Some(path) => read_config(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILENAME);
            if default_path.exists() {
                read_config(default_path)?
            } else {
                flexi_debug!("no {} found; using defaults", DEFAULT_CONFIG_FILENAME);
                FileConfig::default()
            }
        }
    };

    let mut endpoints = file_config.endpoints;
    endpoints.validate()?;
    let pairs = [
        (Capability::Spam, &overrides.spam),
        (Capability::Toxicity, &overrides.toxicity),
        (Capability::ImageDetection, &overrides.image_detection),
    ];
    for (capability, raw) in pairs {
        if let Some(raw) = raw {
            endpoints.set(capability, raw)?;
            flexi_info!("{} endpoint overridden: {}", capability, raw);
        }
    }

    Ok(EngineSettings {
        endpoints,
        client: ClientSettings {
            connect_timeout: file_config.connect_timeout_secs.map(Duration::from_secs),
            request_timeout: file_config.request_timeout_secs.map(Duration::from_secs),
            max_response_bytes: file_config.max_response_bytes,
        },
    })
}

fn read_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    flexi_info!("Loaded config from {:?}", path);
    Ok(config)
}
