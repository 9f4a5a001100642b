//! Errores de la recolección de resultados.

use thiserror::Error;

/// Todo lo que puede fallar al armar la matriz de resultados.
///
/// No hay reintentos: cualquiera de estos errores corta la corrida completa.
#[derive(Debug, Error)]
pub enum CollectError {
    /// Respuesta no-2xx o fallo de red.
    #[error("request to {url} failed: {reason}")]
    Fetch { url: String, reason: String },

    /// La respuesta llegó pero no tiene la forma esperada.
    #[error("malformed response from {context}: {reason}")]
    MalformedResponse { context: String, reason: String },

    /// El job no tiene ningún build listado bajo su prefijo.
    #[error("no builds found under {prefix}")]
    NoBuilds { prefix: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// El patrón de paths de jobs no compila (org/repo imposibles).
    #[error("invalid job path pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl CollectError {
    pub fn fetch(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Fetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub fn malformed(context: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedResponse {
            context: context.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CollectError>;
