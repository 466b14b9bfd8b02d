use serde::Deserialize;
use url::Url;

use crate::Capability;

const DEFAULT_SPAM_URL: &str = "https://spam-azure.vercel.app/api/spam";
const DEFAULT_TOXICITY_URL: &str = "https://toxicity-chi.vercel.app/api/toxicity";
const DEFAULT_IMAGE_URL: &str = "https://detect-bice.vercel.app/api/detect";

#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    #[error("invalid endpoint url for {capability}: {source}")]
    InvalidUrl {
        capability: Capability,
        #[source]
        source: url::ParseError,
    },
    #[error("endpoint for {capability} must use http or https, got {scheme}")]
    UnsupportedScheme {
        capability: Capability,
        scheme: String,
    },
}

/// Capability → endpoint mapping. Fields missing from a config file keep
/// their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    spam: Url,
    toxicity: Url,
    image_detection: Url,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            spam: Url::parse(DEFAULT_SPAM_URL).expect("default spam endpoint"),
            toxicity: Url::parse(DEFAULT_TOXICITY_URL).expect("default toxicity endpoint"),
            image_detection: Url::parse(DEFAULT_IMAGE_URL).expect("default image endpoint"),
        }
    }
}

impl Endpoints {
    pub fn url(&self, capability: Capability) -> &Url {
        match capability {
            Capability::Spam => &self.spam,
            Capability::Toxicity => &self.toxicity,
            Capability::ImageDetection => &self.image_detection,
        }
    }

    /// Replaces one endpoint after validating it.
    pub fn set(&mut self, capability: Capability, raw: &str) -> Result<(), EndpointError> {
        let url = Url::parse(raw.trim())
            .map_err(|source| EndpointError::InvalidUrl { capability, source })?;
        check_scheme(capability, &url)?;
        *self.slot(capability) = url;
        Ok(())
    }

    /// Rejects schemes reqwest cannot POST to.
    pub fn validate(&self) -> Result<(), EndpointError> {
        [
            Capability::Spam,
            Capability::Toxicity,
            Capability::ImageDetection,
        ]
        .into_iter()
        .try_for_each(|capability| check_scheme(capability, self.url(capability)))
    }

    fn slot(&mut self, capability: Capability) -> &mut Url {
        match capability {
            Capability::Spam => &mut self.spam,
            Capability::Toxicity => &mut self.toxicity,
            Capability::ImageDetection => &mut self.image_detection,
        }
    }
}

fn check_scheme(capability: Capability, url: &Url) -> Result<(), EndpointError> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(EndpointError::UnsupportedScheme {
            capability,
            scheme: other.to_string(),
        }),
    }
}
