//! Helpers comunes a los clientes HTTP.

use common::{CollectError, Result};
use reqwest::Response;

/// Deja pasar solo respuestas 2xx; el resto es `CollectError::Fetch`.
pub fn check_status(url: &str, resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(CollectError::fetch(url, format!("HTTP {status}")))
    }
}
