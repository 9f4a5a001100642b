//! Dobles en memoria para los tests del resolver y del walker.

use std::collections::{BTreeMap, BTreeSet};

use common::{
    naming::{artifact_path, finished_path, OCP_VERSION_FILE, OPERATOR_VERSION_FILE},
    CollectError, JobNaming, JobPattern, PrNumber, Result,
};
use serde_json::Value;

use crate::github::PullRequestSource;
use crate::storage::{ObjectMeta, ObjectStore};

pub const PROW: &str = "https://prow.example/view/gs/test-platform-results";

pub fn job_prefix(pr: PrNumber, ocp: &str, gpu: &str) -> String {
    let naming = JobNaming::default();
    format!("{}{}/", naming.pr_prefix(pr), naming.job_name(ocp, gpu))
}

/// Bucket en memoria. Lista en orden lexicográfico, como GCS.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(mut self, path: &str, content: &str) -> Self {
        self.objects.insert(path.to_string(), content.to_string());
        self
    }

    /// Agrega un build completo: puntero al último build, `finished.json` y,
    /// si se pasan, los archivos de versión.
    pub fn with_build(
        self,
        prefix: &str,
        build_id: &str,
        finished: Value,
        versions: Option<(&str, &str)>,
    ) -> Self {
        let mut store = self
            .with_object(&format!("{prefix}latest-build.txt"), build_id)
            .with_object(&finished_path(prefix, build_id), &finished.to_string());

        if let Some((ocp, gpu)) = versions {
            let suffix = JobPattern::new(&JobNaming::default())
                .unwrap()
                .parse_job_path(prefix)
                .expect("prefijo de job válido")
                .gpu_suffix;
            store = store
                .with_object(&artifact_path(prefix, build_id, &suffix, OCP_VERSION_FILE), ocp)
                .with_object(&artifact_path(prefix, build_id, &suffix, OPERATOR_VERSION_FILE), gpu);
        }
        store
    }

    fn children<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.objects
            .keys()
            .filter_map(move |key| key.strip_prefix(prefix).map(|rest| (key.as_str(), rest)))
    }
}

impl ObjectStore for MemoryStore {
    async fn list_prefixes(&self, prefix: &str) -> Result<Vec<String>> {
        let set: BTreeSet<String> = self
            .children(prefix)
            .filter_map(|(_, rest)| rest.find('/').map(|i| format!("{}{}", prefix, &rest[..=i])))
            .collect();
        Ok(set.into_iter().collect())
    }

    async fn list_objects(&self, prefix: &str) -> Result<Vec<ObjectMeta>> {
        Ok(self
            .children(prefix)
            .filter(|(_, rest)| !rest.contains('/'))
            .map(|(key, _)| ObjectMeta { name: key.to_string() })
            .collect())
    }

    async fn fetch_text_file(&self, path: &str) -> Result<String> {
        self.objects
            .get(path)
            .cloned()
            .ok_or_else(|| CollectError::fetch(path, "HTTP 404 Not Found"))
    }
}

/// Lista fija de PRs.
pub struct StaticPrs(pub Vec<PrNumber>);

impl PullRequestSource for StaticPrs {
    async fn list_closed_prs(&self) -> Result<Vec<PrNumber>> {
        Ok(self.0.clone())
    }
}
