//! Endpoints externos, configurables por variables de entorno.

use std::env;

use anyhow::{Context, Result};
use reqwest::Client;

pub const DEFAULT_STORAGE_BASE_URL: &str =
    "https://storage.googleapis.com/storage/v1/b/test-platform-results/o";
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_PROW_BASE_URL: &str = "https://prow.ci.openshift.org/view/gs/test-platform-results";

/// GitHub rechaza requests sin User-Agent.
pub const USER_AGENT: &str = concat!("ci-matrix-collector/", env!("CARGO_PKG_VERSION"));

fn env_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Endpoint de listado del bucket (`.../b/{bucket}/o`).
    pub storage_base_url: String,
    pub github_api_url: String,
    /// Base de las URLs "humanas" de los builds.
    pub prow_base_url: String,
    pub github_token: Option<String>,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            storage_base_url: DEFAULT_STORAGE_BASE_URL.to_string(),
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            prow_base_url: DEFAULT_PROW_BASE_URL.to_string(),
            github_token: None,
        }
    }
}

impl Endpoints {
    /// - STORAGE_BASE_URL, GITHUB_API_URL, PROW_BASE_URL: si no están, los de producción.
    /// - GITHUB_TOKEN: opcional, solo para subir el rate limit.
    pub fn from_env() -> Self {
        Self {
            storage_base_url: env_or("STORAGE_BASE_URL", DEFAULT_STORAGE_BASE_URL),
            github_api_url: env_or("GITHUB_API_URL", DEFAULT_GITHUB_API_URL),
            prow_base_url: env_or("PROW_BASE_URL", DEFAULT_PROW_BASE_URL),
            github_token: env::var("GITHUB_TOKEN").ok().filter(|t| !t.trim().is_empty()),
        }
    }
}

/// Cliente HTTP compartido por todos los requests de la corrida.
pub fn http_client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("no se pudo construir el cliente HTTP")
}
