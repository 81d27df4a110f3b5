//! Request helpers for [`HttpApiClient`].

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, Result};
use crate::http_client::HttpUtils;

use super::HttpApiClient;

impl HttpApiClient {
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET with retries; `Ok(None)` when the server sent no data.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        resource: &str,
    ) -> Result<Option<T>> {
        let request = self.client.get(self.url(path));
        let (status, body) =
            HttpUtils::execute_request_with_retry(request, "GET", path, self.max_retries).await?;
        HttpUtils::check_status(status, &body, resource)?;
        HttpUtils::parse_data(&body)
    }

    /// Sends a JSON body once (no retry) and parses the response.
    pub(crate) async fn send_json<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        resource: &str,
        body: &B,
    ) -> Result<Option<T>> {
        let payload = serde_json::to_vec(body).map_err(|e| ApiError::SerializationError {
            detail: e.to_string(),
        })?;
        let request = self
            .client
            .request(method.clone(), self.url(path))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(payload);

        let (status, response) =
            HttpUtils::execute_request(request, method.as_str(), path).await?;
        HttpUtils::check_status(status, &response, resource)?;
        HttpUtils::parse_data(&response)
    }

    /// DELETE once; any success body is ignored.
    pub(crate) async fn delete(&self, path: &str, resource: &str) -> Result<()> {
        let request = self.client.delete(self.url(path));
        let (status, body) = HttpUtils::execute_request(request, "DELETE", path).await?;
        HttpUtils::check_status(status, &body, resource)
    }
}

/// A success response that should have carried data but did not.
pub(crate) fn missing_data(resource: &str) -> ApiError {
    ApiError::ParseError {
        detail: format!("response for {resource} carried no data"),
    }
}
