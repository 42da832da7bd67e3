use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use dkc_auth::{ApiConfig, HeaderView};

use crate::error::Result;
use crate::response::{ApiResponse, decode};

/// HTTP plumbing shared by the resource clients.
///
/// Headers are read from the session's [`HeaderView`] at send time, so a
/// token refresh applies to the next request without rebuilding anything.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: Client,
    config: ApiConfig,
    headers: HeaderView,
}

impl RestClient {
    pub fn new(http: Client, config: ApiConfig, headers: HeaderView) -> Self {
        Self {
            http,
            config,
            headers,
        }
    }

    pub fn headers(&self) -> &HeaderView {
        &self.headers
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<ApiResponse<T>> {
        let url = self.config.endpoint(segments)?;
        let request = self.http.get(url).query(query);
        self.execute(segments.join("/"), request).await
    }

    pub(crate) async fn post_form<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        form: &B,
    ) -> Result<ApiResponse<T>> {
        let url = self.config.endpoint(segments)?;
        let request = self.http.post(url).form(form);
        self.execute(segments.join("/"), request).await
    }

    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<ApiResponse<T>> {
        let url = self.config.endpoint(segments)?;
        let request = self.http.post(url).json(body);
        self.execute(segments.join("/"), request).await
    }

    #[instrument(skip(self, request), level = "debug")]
    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: String,
        request: RequestBuilder,
    ) -> Result<ApiResponse<T>> {
        let request = request.headers(self.headers.snapshot()).build()?;
        if self.config.debug {
            debug!(
                method = %request.method(),
                url = %request.url(),
                headers = ?self.headers.names(),
                "Sending request"
            );
        }

        let response = self.http.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(status = %status, bytes = body.len(), "Response received");

        decode(&endpoint, status, &body)
    }
}
