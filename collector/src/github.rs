//! PRs cerrados desde la API de GitHub.

use common::{naming::BASE_BRANCH, CollectError, JobNaming, PrNumber, Result};
use reqwest::{header::ACCEPT, Client};
use serde::Deserialize;
use tracing::{debug, info};

use crate::http::check_status;

/// Solo nos importa el número.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: PrNumber,
}

/// Fuente de PRs a recorrer.
#[allow(async_fn_in_trait)]
pub trait PullRequestSource {
    /// PRs cerrados contra la rama base, en el orden que devuelva la API.
    async fn list_closed_prs(&self) -> Result<Vec<PrNumber>>;
}

#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    api_url: String,
    naming: JobNaming,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(client: Client, api_url: impl Into<String>, naming: JobNaming) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            naming,
            token: None,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    fn pulls_url(&self) -> String {
        format!("{}/repos/{}/{}/pulls", self.api_url, self.naming.org, self.naming.repo)
    }
}

impl PullRequestSource for GitHubClient {
    /// Una sola página de 100: la historia queda acotada a los últimos 100 PRs.
    async fn list_closed_prs(&self) -> Result<Vec<PrNumber>> {
        let url = self.pulls_url();
        debug!("pidiendo PRs cerrados a {}", url);

        let mut req = self
            .client
            .get(&url)
            .query(&[
                ("state", "closed"),
                ("base", BASE_BRANCH),
                ("per_page", "100"),
                ("page", "1"),
            ])
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");
        if let Some(ref token) = self.token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await.map_err(|e| CollectError::fetch(&url, e))?;
        let resp = check_status(&url, resp)?;

        let prs: Vec<PullRequest> = resp
            .json()
            .await
            .map_err(|e| CollectError::malformed(&url, e))?;
        info!("{} PRs cerrados en {}/{}", prs.len(), self.naming.org, self.naming.repo);

        Ok(prs.into_iter().map(|pr| pr.number).collect())
    }
}
