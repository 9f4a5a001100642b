//! Acceso al bucket de resultados vía la API JSON de GCS.

use common::{CollectError, Result};
use reqwest::{header::ACCEPT, Client, Url};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, info};

use crate::http::check_status;

/// Un objeto listado bajo un prefijo.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ObjectMeta {
    pub name: String,
}

/// Respuesta del endpoint de listado. Ambos campos faltan cuando no hay nada.
#[derive(Debug, Default, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub prefixes: Vec<String>,
    #[serde(default)]
    pub items: Vec<ObjectMeta>,
}

/// Lo mínimo que necesitamos de un blob store.
#[allow(async_fn_in_trait)]
pub trait ObjectStore {
    /// Sub-prefijos inmediatos (delimitador `/`), en el orden del servicio.
    async fn list_prefixes(&self, prefix: &str) -> Result<Vec<String>>;

    /// Objetos directamente bajo `prefix`, en el orden del servicio (sin ordenar).
    async fn list_objects(&self, prefix: &str) -> Result<Vec<ObjectMeta>>;

    /// Contenido crudo de un objeto, decodificado como UTF-8.
    async fn fetch_text_file(&self, path: &str) -> Result<String>;

    async fn fetch_json_file<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let text = self.fetch_text_file(path).await?;
        serde_json::from_str(&text).map_err(|e| CollectError::malformed(path, e))
    }
}

/// Cliente del endpoint `.../storage/v1/b/{bucket}/o`.
#[derive(Debug, Clone)]
pub struct GcsClient {
    client: Client,
    base_url: String,
}

impl GcsClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn list(&self, prefix: &str) -> Result<ListResponse> {
        debug!("listando {} (prefix={})", self.base_url, prefix);
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("prefix", prefix),
                ("alt", "json"),
                ("delimiter", "/"),
                ("includeFoldersAsPrefixes", "True"),
                ("maxResults", "1000"),
                ("projection", "noAcl"),
            ])
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| CollectError::fetch(&self.base_url, e))?;

        let resp = check_status(&self.base_url, resp)?;
        resp.json::<ListResponse>()
            .await
            .map_err(|e| CollectError::malformed(format!("listing of {prefix}"), e))
    }

    /// `{base}/{path codificado como un solo segmento}`
    fn object_url(&self, path: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| CollectError::fetch(&self.base_url, e))?;
        url.path_segments_mut()
            .map_err(|_| CollectError::fetch(&self.base_url, "base URL cannot hold path segments"))?
            .pop_if_empty()
            .push(path);
        Ok(url)
    }
}

impl ObjectStore for GcsClient {
    async fn list_prefixes(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self.list(prefix).await?.prefixes)
    }

    async fn list_objects(&self, prefix: &str) -> Result<Vec<ObjectMeta>> {
        Ok(self.list(prefix).await?.items)
    }

    async fn fetch_text_file(&self, path: &str) -> Result<String> {
        info!("obteniendo contenido de {}", path);
        let url = self.object_url(path)?;
        let url_str = url.to_string();

        let resp = self
            .client
            .get(url)
            .query(&[("alt", "media")])
            .send()
            .await
            .map_err(|e| CollectError::fetch(&url_str, e))?;
        let resp = check_status(&url_str, resp)?;

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| CollectError::fetch(&url_str, e))?;
        String::from_utf8(bytes.to_vec()).map_err(|e| CollectError::malformed(path, e))
    }
}
