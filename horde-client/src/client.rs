//! Asynchronous transport on reqwest.

use std::time::Duration;

use horde_core::{
    GenerationId, HordeClient, HttpMethod, HttpRequest, HttpResponse,
    ImageGenerateAsyncRequest, ImageGenerateAsyncResponse, ImageGenerateCheckResponse,
    ImageGenerateStatusResponse, ImageGenerationJobSubmitRequest,
    ImageGenerationJobSubmitResponse, WorkerDetails, WorkerType,
};
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::ClientConfig;

/// Async client for the AI Horde API.
///
/// One typed method per API operation; each delegates request building and
/// response interpretation to `horde_core::HordeClient`.
pub struct HordeApiClient {
    core: HordeClient,
    http: reqwest::Client,
}

impl HordeApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("horde-sdk/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            core: HordeClient::new(&config.base_url),
            http,
        })
    }

    /// Queue an image generation job.
    pub async fn generate_async(
        &self,
        apikey: &str,
        request: &ImageGenerateAsyncRequest,
    ) -> Result<ImageGenerateAsyncResponse, ClientError> {
        let req = self.core.build_generate_async(apikey, request)?;
        let response = self.execute(req).await?;
        Ok(self.core.parse_generate_async(response)?)
    }

    /// Poll a job's queue position without retrieving results.
    pub async fn generate_check(
        &self,
        id: GenerationId,
    ) -> Result<ImageGenerateCheckResponse, ClientError> {
        let req = self.core.build_generate_check(id);
        let response = self.execute(req).await?;
        Ok(self.core.parse_generate_check(response)?)
    }

    /// Retrieve a job's full status, results included.
    pub async fn generate_status(
        &self,
        id: GenerationId,
    ) -> Result<ImageGenerateStatusResponse, ClientError> {
        let req = self.core.build_generate_status(id);
        let response = self.execute(req).await?;
        Ok(self.core.parse_generate_status(response)?)
    }

    /// Cancel a queued or running job.
    pub async fn cancel_generation(
        &self,
        apikey: &str,
        id: GenerationId,
    ) -> Result<ImageGenerateStatusResponse, ClientError> {
        let req = self.core.build_cancel_generation(apikey, id);
        let response = self.execute(req).await?;
        Ok(self.core.parse_cancel_generation(response)?)
    }

    /// Worker-side submission of a finished generation.
    pub async fn submit_generation(
        &self,
        apikey: &str,
        request: &ImageGenerationJobSubmitRequest,
    ) -> Result<ImageGenerationJobSubmitResponse, ClientError> {
        let req = self.core.build_submit_generation(apikey, request)?;
        let response = self.execute(req).await?;
        Ok(self.core.parse_submit_generation(response)?)
    }

    /// Details of all workers, optionally filtered by worker type.
    pub async fn workers_all(
        &self,
        worker_type: Option<WorkerType>,
    ) -> Result<Vec<WorkerDetails>, ClientError> {
        let req = self.core.build_workers_all(worker_type);
        let response = self.execute(req).await?;
        Ok(self.core.parse_workers_all(response)?)
    }

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        debug!(path = %request.path, "sending request");
        let mut builder = match request.method {
            HttpMethod::Get => self.http.get(&request.path),
            HttpMethod::Post => self.http.post(&request.path),
            HttpMethod::Delete => self.http.delete(&request.path),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        if status >= 400 {
            warn!(status, "horde request failed");
        }

        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}
