//! Convención de nombres de los jobs de CI y rutas dentro del bucket.
//!
//! Un job de PR vive en
//! `pr-logs/pull/{org}_{repo}/{pr}/pull-ci-{org}-{repo}-main-{ocp}-stable-nvidia-gpu-operator-e2e-{gpu}/`
//! y cada build es una carpeta debajo de ese prefijo.

use serde::{Deserialize, Serialize};

pub const DEFAULT_ORG: &str = "rh-ecosystem-edge";
pub const DEFAULT_REPO: &str = "nvidia-ci";

/// Rama base de los PRs que nos interesan.
pub const BASE_BRANCH: &str = "main";

/// Parte fija del nombre del job entre la versión de OCP y el sufijo de GPU.
pub const JOB_INFIX: &str = "-stable-nvidia-gpu-operator-e2e-";

pub const FINISHED_FILE: &str = "finished.json";
pub const OCP_VERSION_FILE: &str = "ocp.version";
pub const OPERATOR_VERSION_FILE: &str = "operator.version";

/// Organización y repo cuyos PRs se recorren.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobNaming {
    pub org: String,
    pub repo: String,
}

impl Default for JobNaming {
    fn default() -> Self {
        Self::new(DEFAULT_ORG, DEFAULT_REPO)
    }
}

impl JobNaming {
    pub fn new(org: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            org: org.into(),
            repo: repo.into(),
        }
    }

    /// `pr-logs/pull/{org}_{repo}/`
    pub fn pr_logs_root(&self) -> String {
        format!("pr-logs/pull/{}_{}/", self.org, self.repo)
    }

    /// Prefijo bajo el cual se listan los jobs de un PR.
    pub fn pr_prefix(&self, pr: u64) -> String {
        format!("{}{}/", self.pr_logs_root(), pr)
    }

    /// `pull-ci-{org}-{repo}-main-`
    pub fn job_name_prefix(&self) -> String {
        format!("pull-ci-{}-{}-{}-", self.org, self.repo, BASE_BRANCH)
    }

    pub fn job_name(&self, ocp_minor: &str, gpu_suffix: &str) -> String {
        format!("{}{}{}{}", self.job_name_prefix(), ocp_minor, JOB_INFIX, gpu_suffix)
    }

    /// URL "humana" del build en Prow.
    pub fn job_url(
        &self,
        prow_base: &str,
        pr: u64,
        ocp_minor: &str,
        gpu_suffix: &str,
        build_id: &str,
    ) -> String {
        format!(
            "{}/{}{}/{}/{}",
            prow_base.trim_end_matches('/'),
            self.pr_logs_root(),
            pr,
            self.job_name(ocp_minor, gpu_suffix),
            build_id
        )
    }
}

/// `{job_prefix}{build}/finished.json`
pub fn finished_path(job_prefix: &str, build_id: &str) -> String {
    format!("{}{}/{}", job_prefix, build_id, FINISHED_FILE)
}

/// Ruta de un archivo de versión que deja el e2e dentro del build.
pub fn artifact_path(job_prefix: &str, build_id: &str, gpu_suffix: &str, file: &str) -> String {
    format!(
        "{}{}/artifacts/nvidia-gpu-operator-e2e-{}/gpu-operator-e2e/artifacts/{}",
        job_prefix, build_id, gpu_suffix, file
    )
}
