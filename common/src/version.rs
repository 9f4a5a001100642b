//! Versiones embebidas en los nombres de los jobs.

use regex::Regex;

use crate::error::Result;
use crate::naming::{JobNaming, JOB_INFIX};

/// Sufijo de GPU que apunta a la rama principal del operador.
pub const GPU_MASTER: &str = "master";

/// Lo que se extrae del path de un job que cumple la convención de nombres.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPathMatch {
    /// Ej: "4.15"
    pub ocp_minor: String,
    /// "master" o algo como "24-9-x"
    pub gpu_suffix: String,
}

/// Patrón de los paths de jobs e2e para un org/repo.
#[derive(Debug, Clone)]
pub struct JobPattern {
    regex: Regex,
}

impl JobPattern {
    pub fn new(naming: &JobNaming) -> Result<Self> {
        let pattern = format!(
            r"^{root}\d+/{job}(?P<ocp_version>\d+\.\d+){infix}(?P<gpu_version>\d+-\d+-x|{master})/",
            root = regex::escape(&naming.pr_logs_root()),
            job = regex::escape(&naming.job_name_prefix()),
            infix = regex::escape(JOB_INFIX),
            master = GPU_MASTER,
        );
        Ok(Self {
            regex: Regex::new(&pattern)?,
        })
    }

    /// Aplica el patrón al path de un job.
    ///
    /// Devuelve `None` si el path no cumple la convención; el llamador lo
    /// saltea sin tratarlo como error. Lo que venga después de la `/` final
    /// del nombre del job se ignora.
    pub fn parse_job_path(&self, path: &str) -> Option<JobPathMatch> {
        let caps = self.regex.captures(path)?;
        Some(JobPathMatch {
            ocp_minor: caps["ocp_version"].to_string(),
            gpu_suffix: caps["gpu_version"].to_string(),
        })
    }
}

/// "24-9-x" -> "24.9", "master" -> "master".
///
/// Solo tiene sentido con sufijos ya validados por `parse_job_path`.
pub fn gpu_suffix_to_display_version(suffix: &str) -> String {
    if suffix == GPU_MASTER {
        return suffix.to_string();
    }
    // sacamos el calificador final ("-x")
    let mut chars = suffix.chars();
    chars.next_back();
    chars.next_back();
    chars.as_str().replace('-', ".")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job_path(pr: &str, ocp: &str, gpu: &str) -> String {
        format!(
            "pr-logs/pull/rh-ecosystem-edge_nvidia-ci/{pr}/pull-ci-rh-ecosystem-edge-nvidia-ci-main-{ocp}-stable-nvidia-gpu-operator-e2e-{gpu}/"
        )
    }

    fn pattern() -> JobPattern {
        JobPattern::new(&JobNaming::default()).unwrap()
    }

    #[test]
    fn parse_job_path_extrae_ocp_y_gpu() {
        let pattern = pattern();

        let m = pattern.parse_job_path(&job_path("123", "4.15", "24-9-x")).unwrap();
        assert_eq!(m.ocp_minor, "4.15");
        assert_eq!(m.gpu_suffix, "24-9-x");

        let m = pattern.parse_job_path(&job_path("9", "4.12", "master")).unwrap();
        assert_eq!(m.ocp_minor, "4.12");
        assert_eq!(m.gpu_suffix, "master");
    }

    #[test]
    fn parse_job_path_acepta_cola_despues_del_job() {
        let pattern = pattern();
        let path = format!("{}1790000000000000000/finished.json", job_path("5", "4.16", "25-3-x"));

        let m = pattern.parse_job_path(&path).unwrap();
        assert_eq!(m.ocp_minor, "4.16");
        assert_eq!(m.gpu_suffix, "25-3-x");
    }

    #[test]
    fn parse_job_path_rechaza_paths_que_no_cumplen() {
        let pattern = pattern();

        let casos = [
            // otro job del mismo PR
            "pr-logs/pull/rh-ecosystem-edge_nvidia-ci/123/pull-ci-rh-ecosystem-edge-nvidia-ci-main-images/".to_string(),
            // PR no numérico
            job_path("abc", "4.15", "24-9-x"),
            // versión de OCP sin minor
            job_path("1", "4", "24-9-x"),
            job_path("1", "4.x", "24-9-x"),
            // sufijo de GPU raro
            job_path("1", "4.15", "24-9-y"),
            job_path("1", "4.15", "24-x"),
            job_path("1", "4.15", "main"),
            // falta la barra final
            job_path("1", "4.15", "24-9-x").trim_end_matches('/').to_string(),
            // otro repo
            "pr-logs/pull/other_repo/1/pull-ci-other-repo-main-4.15-stable-nvidia-gpu-operator-e2e-master/".to_string(),
            // sufijo de GPU sin anclar al final del segmento
            job_path("1", "4.15", "master-old"),
            String::new(),
        ];

        for path in casos {
            assert_eq!(pattern.parse_job_path(&path), None, "debería rechazar {path:?}");
        }
    }

    #[test]
    fn parse_job_path_respeta_org_y_repo_configurados() {
        let acme = JobPattern::new(&JobNaming::new("acme", "gpu-ci")).unwrap();
        let path = "pr-logs/pull/acme_gpu-ci/77/pull-ci-acme-gpu-ci-main-4.14-stable-nvidia-gpu-operator-e2e-23-9-x/";

        let m = acme.parse_job_path(path).unwrap();
        assert_eq!(m.ocp_minor, "4.14");
        assert_eq!(m.gpu_suffix, "23-9-x");

        assert_eq!(pattern().parse_job_path(path), None);
    }

    #[test]
    fn org_y_repo_se_toman_literales() {
        // el "." del repo no puede matchear cualquier caracter
        let dots = JobPattern::new(&JobNaming::new("my.org", "ci.repo")).unwrap();
        let ok = "pr-logs/pull/my.org_ci.repo/3/pull-ci-my.org-ci.repo-main-4.16-stable-nvidia-gpu-operator-e2e-master/";
        let otro = "pr-logs/pull/myXorg_ciXrepo/3/pull-ci-myXorg-ciXrepo-main-4.16-stable-nvidia-gpu-operator-e2e-master/";

        assert_eq!(dots.parse_job_path(ok).unwrap().ocp_minor, "4.16");
        assert_eq!(dots.parse_job_path(otro), None);
    }

    #[test]
    fn gpu_suffix_a_version_display() {
        assert_eq!(gpu_suffix_to_display_version("master"), "master");
        assert_eq!(gpu_suffix_to_display_version("24-9-x"), "24.9");
        assert_eq!(gpu_suffix_to_display_version("23-6-x"), "23.6");
        // no entra en pánico con entradas cortas
        assert_eq!(gpu_suffix_to_display_version("x"), "");
    }
}
