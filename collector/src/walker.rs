//! Recorre los PRs cerrados y resuelve los jobs de cada uno.

use common::{PrNumber, Result, ResultStore, JobResult};
use tracing::{error, info};

use crate::github::PullRequestSource;
use crate::resolver::JobResolver;
use crate::storage::ObjectStore;

pub struct HistoryWalker<P, S> {
    source: P,
    resolver: JobResolver<S>,
}

impl<P: PullRequestSource, S: ObjectStore> HistoryWalker<P, S> {
    pub fn new(source: P, resolver: JobResolver<S>) -> Self {
        Self { source, resolver }
    }

    pub fn resolver(&self) -> &JobResolver<S> {
        &self.resolver
    }

    pub async fn list_closed_prs(&self) -> Result<Vec<PrNumber>> {
        self.source
            .list_closed_prs()
            .await
            .inspect_err(|e| error!("error listando los PRs cerrados: {}", e))
    }

    /// Todos los resultados de los PRs cerrados, en el orden de la lista de PRs.
    pub async fn walk_all_closed_prs(&self, results: &mut ResultStore) -> Result<Vec<JobResult>> {
        self.walk_all_closed_prs_with(results, |_, _| Ok(())).await
    }

    /// Igual que `walk_all_closed_prs`, llamando a `after_pr` cuando termina
    /// cada PR (ej: para ir guardando).
    pub async fn walk_all_closed_prs_with<F>(
        &self,
        results: &mut ResultStore,
        mut after_pr: F,
    ) -> Result<Vec<JobResult>>
    where
        F: FnMut(PrNumber, &ResultStore) -> Result<()>,
    {
        info!("generando historia...");
        let prs = self.list_closed_prs().await?;

        let mut all = Vec::new();
        for pr in prs {
            info!("procesando PR #{}", pr);
            let jobs = self.resolver.resolve_pr_jobs(pr, results).await?;
            info!("PR #{}: {} jobs", pr, jobs.len());
            all.extend(jobs);
            after_pr(pr, results)?;
        }
        Ok(all)
    }
}
