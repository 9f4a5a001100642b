//! Una corrida completa: cargar datos previos, resolver PRs, mergear y guardar.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{Context, Result};
use clap::ValueEnum;
use common::{JobResult, PrNumber, ResultStore, DATA_FILE};
use tracing::info;

use crate::github::PullRequestSource;
use crate::storage::ObjectStore;
use crate::walker::HistoryWalker;

/// Qué PRs procesar: `all` o un número.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrSelector {
    All,
    Single(PrNumber),
}

impl FromStr for PrSelector {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(PrSelector::All);
        }
        s.parse::<PrNumber>()
            .map(PrSelector::Single)
            .map_err(|_| format!("PR inválido: {s:?} (se espera 'all' o un número)"))
    }
}

/// Cómo se combinan los resultados nuevos con el snapshot previo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MergeMode {
    /// Cada minor de OCP que aparece en la corrida reemplaza entera a la anterior.
    #[default]
    Replace,
    /// Los resultados nuevos se agregan detrás de la historia guardada.
    Append,
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub selector: PrSelector,
    pub output_dir: PathBuf,
    pub old_data_file: PathBuf,
    pub merge_mode: MergeMode,
    /// Guardar después de cada PR.
    pub checkpoint: bool,
}

impl RunOptions {
    pub fn output_file(&self) -> PathBuf {
        self.output_dir.join(DATA_FILE)
    }
}

#[derive(Debug)]
pub struct RunSummary {
    pub prs: usize,
    pub jobs: Vec<JobResult>,
    pub data: ResultStore,
    pub output_file: PathBuf,
}

/// Snapshot previo con los resultados de la corrida mergeados encima.
fn merged(snapshot: &ResultStore, fresh: &ResultStore) -> ResultStore {
    let mut out = snapshot.clone();
    out.merge(fresh.clone());
    out
}

fn save(snapshot: &ResultStore, fresh: &ResultStore, path: &Path) -> common::Result<ResultStore> {
    let data = merged(snapshot, fresh);
    data.persist(path)?;
    Ok(data)
}

pub async fn run<P, S>(walker: &HistoryWalker<P, S>, opts: &RunOptions) -> Result<RunSummary>
where
    P: PullRequestSource,
    S: ObjectStore,
{
    info!(
        "argumentos: pr={:?} output_dir={} old_data_file={} merge={:?}",
        opts.selector,
        opts.output_dir.display(),
        opts.old_data_file.display(),
        opts.merge_mode
    );

    let snapshot = ResultStore::load(&opts.old_data_file).with_context(|| {
        format!("no se pudieron leer los datos previos de {}", opts.old_data_file.display())
    })?;
    let mut fresh = match opts.merge_mode {
        MergeMode::Replace => ResultStore::new(),
        MergeMode::Append => snapshot.clone(),
    };
    let output_file = opts.output_file();

    let (prs, jobs) = match opts.selector {
        PrSelector::All => {
            let mut prs = 0;
            let jobs = walker
                .walk_all_closed_prs_with(&mut fresh, |pr, fresh| {
                    prs += 1;
                    if opts.checkpoint {
                        info!("checkpoint después del PR #{}", pr);
                        save(&snapshot, fresh, &output_file)?;
                    }
                    Ok(())
                })
                .await
                .context("falló la generación de la historia")?;
            (prs, jobs)
        }
        PrSelector::Single(pr) => {
            let jobs = walker
                .resolver()
                .resolve_pr_jobs(pr, &mut fresh)
                .await
                .with_context(|| format!("falló la resolución del PR #{pr}"))?;
            info!("tests del PR #{}: {:?}", pr, jobs);
            (1, jobs)
        }
    };

    let data = save(&snapshot, &fresh, &output_file)
        .with_context(|| format!("no se pudo guardar {}", output_file.display()))?;

    Ok(RunSummary {
        prs,
        jobs,
        data,
        output_file,
    })
}
