//! Resolución de los jobs de un PR: último build, estado y versiones exactas.

use common::{
    gpu_suffix_to_display_version,
    naming::{artifact_path, finished_path, OCP_VERSION_FILE, OPERATOR_VERSION_FILE},
    BuildStatus, CollectError, FinishedFile, JobNaming, JobPattern, JobResult, PrNumber, Result,
    ResultRecord, ResultStore,
};
use tracing::{debug, error, info};

use crate::storage::ObjectStore;

pub struct JobResolver<S> {
    storage: S,
    naming: JobNaming,
    pattern: JobPattern,
    prow_base_url: String,
}

impl<S: ObjectStore> JobResolver<S> {
    pub fn new(storage: S, naming: JobNaming, prow_base_url: impl Into<String>) -> Result<Self> {
        let pattern = JobPattern::new(&naming)?;
        Ok(Self {
            storage,
            naming,
            pattern,
            prow_base_url: prow_base_url.into(),
        })
    }

    /// Resuelve todos los jobs de un PR que cumplen la convención de nombres,
    /// en el orden del listado. Un PR sin prefijos devuelve una lista vacía.
    pub async fn resolve_pr_jobs(
        &self,
        pr: PrNumber,
        results: &mut ResultStore,
    ) -> Result<Vec<JobResult>> {
        info!("obteniendo los tests del PR #{}", pr);
        let prefixes = self
            .storage
            .list_prefixes(&self.naming.pr_prefix(pr))
            .await
            .inspect_err(|e| error!("error listando los jobs del PR #{}: {}", pr, e))?;

        let mut jobs = Vec::new();
        for prefix in prefixes {
            let Some(m) = self.pattern.parse_job_path(&prefix) else {
                debug!("salteando {} (no es un job de GPU)", prefix);
                continue;
            };
            let result = self
                .resolve_job(pr, &prefix, &m.ocp_minor, &m.gpu_suffix, results)
                .await?;
            info!("resultado de {}: {:?}", prefix, result);
            jobs.push(result);
        }
        Ok(jobs)
    }

    /// Resuelve un job y agrega su resultado a `results` bajo `ocp_minor`.
    ///
    /// Si el build pasó, el resultado guardado lleva la versión exacta de OCP y
    /// el sufijo de GPU crudo; si no, la minor del path y la versión "display".
    pub async fn resolve_job(
        &self,
        pr: PrNumber,
        job_prefix: &str,
        ocp_minor: &str,
        gpu_suffix: &str,
        results: &mut ResultStore,
    ) -> Result<JobResult> {
        self.try_resolve_job(pr, job_prefix, ocp_minor, gpu_suffix, results)
            .await
            .inspect_err(|e| error!("error resolviendo el job {}: {}", job_prefix, e))
    }

    async fn try_resolve_job(
        &self,
        pr: PrNumber,
        job_prefix: &str,
        ocp_minor: &str,
        gpu_suffix: &str,
        results: &mut ResultStore,
    ) -> Result<JobResult> {
        info!("obteniendo resultados del job {}", job_prefix);

        let build_id = self.latest_build(job_prefix).await?;
        info!("job {}: último build {}", job_prefix, build_id);

        let status = self.build_status(job_prefix, &build_id).await?;
        let url = self
            .naming
            .job_url(&self.prow_base_url, pr, ocp_minor, gpu_suffix, &build_id);

        let mut result = JobResult {
            prefix: job_prefix.to_string(),
            ocp_version: ocp_minor.to_string(),
            status: status.result.as_str().to_string(),
            timestamp: status.timestamp.clone(),
            url: url.clone(),
            gpu_version: String::new(),
            exact_ocp_version: None,
            exact_gpu_version: None,
        };

        let record = if status.result.is_success() {
            let (exact_ocp, exact_gpu) = self.exact_versions(job_prefix, &build_id, gpu_suffix).await?;
            result.gpu_version = gpu_suffix.to_string();
            result.exact_ocp_version = Some(exact_ocp.clone());
            result.exact_gpu_version = Some(exact_gpu);
            ResultRecord {
                ocp_version: exact_ocp,
                gpu_version: gpu_suffix.to_string(),
                status: result.status.clone(),
                link: url,
                timestamp: status.timestamp,
            }
        } else {
            let display = gpu_suffix_to_display_version(gpu_suffix);
            result.gpu_version = display.clone();
            ResultRecord {
                ocp_version: ocp_minor.to_string(),
                gpu_version: display,
                status: result.status.clone(),
                link: url,
                timestamp: status.timestamp,
            }
        };

        info!(
            "ocp_data[{}] <- ocp={} gpu={} status={}",
            ocp_minor, record.ocp_version, record.gpu_version, record.status
        );
        results.append(ocp_minor, record);

        Ok(result)
    }

    /// El primer objeto bajo el prefijo del job apunta al último build
    /// (`latest-build.txt`); su contenido es el id del build.
    ///
    /// Se toma el primero tal cual lo ordena el servicio, sin ordenar.
    pub async fn latest_build(&self, job_prefix: &str) -> Result<String> {
        let objects = self.storage.list_objects(job_prefix).await?;
        let pointer = objects.first().ok_or_else(|| CollectError::NoBuilds {
            prefix: job_prefix.to_string(),
        })?;

        let content = self.storage.fetch_text_file(&pointer.name).await?;
        let build_id = content.trim();
        if build_id.is_empty() {
            return Err(CollectError::malformed(&pointer.name, "empty build id"));
        }
        Ok(build_id.to_string())
    }

    /// Lee `finished.json` del build. Sin `result` el estado es UNKNOWN.
    pub async fn build_status(&self, job_prefix: &str, build_id: &str) -> Result<BuildStatus> {
        info!("obteniendo estado del build {}", build_id);
        let file: FinishedFile = self
            .storage
            .fetch_json_file(&finished_path(job_prefix, build_id))
            .await?;
        Ok(file.into())
    }

    /// (versión exacta de OCP, versión exacta del operador), tal cual vienen
    /// en los artifacts.
    pub async fn exact_versions(
        &self,
        job_prefix: &str,
        build_id: &str,
        gpu_suffix: &str,
    ) -> Result<(String, String)> {
        info!("obteniendo versiones del build {}", build_id);
        let ocp = self
            .storage
            .fetch_text_file(&artifact_path(job_prefix, build_id, gpu_suffix, OCP_VERSION_FILE))
            .await?;
        let gpu = self
            .storage
            .fetch_text_file(&artifact_path(job_prefix, build_id, gpu_suffix, OPERATOR_VERSION_FILE))
            .await?;
        Ok((ocp, gpu))
    }
}
