use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use common::{naming, JobNaming};
use tracing::info;

use crate::config::{http_client, Endpoints};
use crate::github::GitHubClient;
use crate::pipeline::{self, MergeMode, PrSelector, RunOptions};
use crate::resolver::JobResolver;
use crate::storage::GcsClient;
use crate::walker::HistoryWalker;

/// Los endpoints se configuran por entorno:
/// - STORAGE_BASE_URL, GITHUB_API_URL, PROW_BASE_URL
/// - GITHUB_TOKEN (opcional)
#[derive(Parser, Debug)]
#[command(name = "collector")]
#[command(about = "Genera los datos de la matriz de tests (ocp_data.json) a partir de los PRs cerrados")]
pub struct Cli {
    /// PR a procesar; 'all' recorre toda la historia
    #[arg(long, value_name = "PR", default_value = "all")]
    pub pr: PrSelector,

    /// Directorio donde se escribe ocp_data.json
    #[arg(long, value_name = "DIR")]
    pub output_dir: PathBuf,

    /// ocp_data.json existente (ej: traído de otra rama); puede no existir
    #[arg(long, value_name = "FILE")]
    pub old_data_file: PathBuf,

    #[arg(long, default_value = naming::DEFAULT_ORG)]
    pub org: String,

    #[arg(long, default_value = naming::DEFAULT_REPO)]
    pub repo: String,

    /// Cómo combinar con los datos previos
    #[arg(long, value_enum, default_value_t = MergeMode::Replace)]
    pub merge_mode: MergeMode,

    /// Guardar después de cada PR
    #[arg(long)]
    pub checkpoint: bool,
}

impl Cli {
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            selector: self.pr,
            output_dir: self.output_dir.clone(),
            old_data_file: self.old_data_file.clone(),
            merge_mode: self.merge_mode,
            checkpoint: self.checkpoint,
        }
    }
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let endpoints = Endpoints::from_env();
    let client = http_client()?;
    let naming = JobNaming::new(&cli.org, &cli.repo);

    info!(
        "storage={} github={} prow={}",
        endpoints.storage_base_url, endpoints.github_api_url, endpoints.prow_base_url
    );

    let storage = GcsClient::new(client.clone(), &endpoints.storage_base_url);
    let github = GitHubClient::new(client, &endpoints.github_api_url, naming.clone())
        .with_token(endpoints.github_token.clone());
    let resolver = JobResolver::new(storage, naming, &endpoints.prow_base_url)?;
    let walker = HistoryWalker::new(github, resolver);

    let summary = pipeline::run(&walker, &cli.run_options()).await?;

    println!("Matriz generada:");
    println!("  PRs procesados : {}", summary.prs);
    println!("  jobs resueltos : {}", summary.jobs.len());
    println!(
        "  versiones OCP  : {} ({} resultados)",
        summary.data.len(),
        summary.data.record_count()
    );
    println!("  archivo        : {}", summary.output_file.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_es_valida() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_de_la_cli() {
        let cli = Cli::try_parse_from([
            "collector",
            "--output-dir",
            "out",
            "--old-data-file",
            "old/ocp_data.json",
        ])
        .unwrap();

        assert_eq!(cli.pr, PrSelector::All);
        assert_eq!(cli.org, "rh-ecosystem-edge");
        assert_eq!(cli.repo, "nvidia-ci");
        assert_eq!(cli.merge_mode, MergeMode::Replace);
        assert!(!cli.checkpoint);
        assert_eq!(cli.run_options().output_file(), PathBuf::from("out/ocp_data.json"));
    }

    #[test]
    fn pr_puntual_y_append() {
        let cli = Cli::try_parse_from([
            "collector",
            "--pr",
            "321",
            "--output-dir",
            "out",
            "--old-data-file",
            "old.json",
            "--merge-mode",
            "append",
            "--checkpoint",
        ])
        .unwrap();

        assert_eq!(cli.pr, PrSelector::Single(321));
        assert_eq!(cli.merge_mode, MergeMode::Append);
        assert!(cli.checkpoint);
    }

    #[test]
    fn pr_invalido_falla() {
        let r = Cli::try_parse_from([
            "collector",
            "--pr",
            "ultimo",
            "--output-dir",
            "out",
            "--old-data-file",
            "old.json",
        ]);
        assert!(r.is_err());
    }
}
