use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Resultado de un build según su `finished.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildResult {
    Success,
    Failure,
    Unknown,
    /// Cualquier otro valor crudo (ej: "ABORTED", "ERROR").
    Other(String),
}

impl BuildResult {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "SUCCESS" => BuildResult::Success,
            "FAILURE" => BuildResult::Failure,
            "UNKNOWN" => BuildResult::Unknown,
            other => BuildResult::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BuildResult::Success => "SUCCESS",
            BuildResult::Failure => "FAILURE",
            BuildResult::Unknown => "UNKNOWN",
            BuildResult::Other(raw) => raw,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, BuildResult::Success)
    }
}

/// Contenido relevante de `finished.json`.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildStatus {
    pub result: BuildResult,
    /// Opaco: se guarda tal cual venga (Prow escribe un epoch entero).
    pub timestamp: Option<Value>,
}

/// Forma cruda de `finished.json`; el resto de los campos se ignora.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FinishedFile {
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub timestamp: Option<Value>,
}

impl From<FinishedFile> for BuildStatus {
    fn from(file: FinishedFile) -> Self {
        BuildStatus {
            result: file
                .result
                .as_deref()
                .map(BuildResult::parse)
                .unwrap_or(BuildResult::Unknown),
            // un `null` explícito es lo mismo que no tenerlo
            timestamp: file.timestamp.filter(|t| !t.is_null()),
        }
    }
}

/// Entrada persistida en `ocp_data.json` (lo que lee el dashboard).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Versión exacta de OCP si el build pasó, si no la minor del path.
    #[serde(rename = "ocp")]
    pub ocp_version: String,
    /// Sufijo crudo si el build pasó, si no la versión "display".
    #[serde(rename = "gpu")]
    pub gpu_version: String,
    pub status: String,
    pub link: String,
    #[serde(default)]
    pub timestamp: Option<Value>,
}

impl From<ResultRecord> for Value {
    fn from(r: ResultRecord) -> Self {
        json!({
            "ocp": r.ocp_version,
            "gpu": r.gpu_version,
            "status": r.status,
            "link": r.link,
            "timestamp": r.timestamp,
        })
    }
}

/// Resumen de un job resuelto. Se loguea y se devuelve, no se persiste.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResult {
    pub prefix: String,
    /// Minor de OCP sacada del path del job.
    pub ocp_version: String,
    pub status: String,
    pub timestamp: Option<Value>,
    pub url: String,
    pub gpu_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact_ocp_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact_gpu_version: Option<String>,
}
