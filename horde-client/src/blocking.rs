//! Blocking transport on ureq, plus the cancel-on-drop job guard.

use horde_core::{
    GenerationId, HordeClient, HttpMethod, HttpRequest, HttpResponse,
    ImageGenerateAsyncRequest, ImageGenerateAsyncResponse, ImageGenerateCheckResponse,
    ImageGenerateStatusResponse, ImageGenerationJobSubmitRequest,
    ImageGenerationJobSubmitResponse, WorkerDetails, WorkerType,
};
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::ClientConfig;

/// Blocking client for the AI Horde API.
///
/// Same surface as the async [`crate::HordeApiClient`], executed on the
/// caller's thread. ureq's status-as-error behavior is disabled so 4xx/5xx
/// responses come back as data and the core interprets the status code.
pub struct HordeApiClient {
    core: HordeClient,
    agent: ureq::Agent,
}

impl HordeApiClient {
    pub fn new(config: ClientConfig) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(config.timeout))
            .build()
            .new_agent();
        Self {
            core: HordeClient::new(&config.base_url),
            agent,
        }
    }

    /// Queue an image generation job.
    pub fn generate_async(
        &self,
        apikey: &str,
        request: &ImageGenerateAsyncRequest,
    ) -> Result<ImageGenerateAsyncResponse, ClientError> {
        let req = self.core.build_generate_async(apikey, request)?;
        let response = self.execute(req)?;
        Ok(self.core.parse_generate_async(response)?)
    }

    /// Queue a job and return a guard that cancels it on drop.
    ///
    /// If the guard goes out of scope before [`PendingGeneration::finish`] is
    /// called — an early return, a panic unwinding through the caller — the
    /// job is cancelled so the horde stops spending worker time on it.
    pub fn begin_generation(
        &self,
        apikey: &str,
        request: &ImageGenerateAsyncRequest,
    ) -> Result<PendingGeneration<'_>, ClientError> {
        let response = self.generate_async(apikey, request)?;
        Ok(PendingGeneration {
            client: self,
            apikey: apikey.to_string(),
            id: response.id,
            kudos: response.kudos,
            finished: false,
        })
    }

    /// Poll a job's queue position without retrieving results.
    pub fn generate_check(
        &self,
        id: GenerationId,
    ) -> Result<ImageGenerateCheckResponse, ClientError> {
        let req = self.core.build_generate_check(id);
        let response = self.execute(req)?;
        Ok(self.core.parse_generate_check(response)?)
    }

    /// Retrieve a job's full status, results included.
    pub fn generate_status(
        &self,
        id: GenerationId,
    ) -> Result<ImageGenerateStatusResponse, ClientError> {
        let req = self.core.build_generate_status(id);
        let response = self.execute(req)?;
        Ok(self.core.parse_generate_status(response)?)
    }

    /// Cancel a queued or running job.
    pub fn cancel_generation(
        &self,
        apikey: &str,
        id: GenerationId,
    ) -> Result<ImageGenerateStatusResponse, ClientError> {
        let req = self.core.build_cancel_generation(apikey, id);
        let response = self.execute(req)?;
        Ok(self.core.parse_cancel_generation(response)?)
    }

    /// Worker-side submission of a finished generation.
    pub fn submit_generation(
        &self,
        apikey: &str,
        request: &ImageGenerationJobSubmitRequest,
    ) -> Result<ImageGenerationJobSubmitResponse, ClientError> {
        let req = self.core.build_submit_generation(apikey, request)?;
        let response = self.execute(req)?;
        Ok(self.core.parse_submit_generation(response)?)
    }

    /// Details of all workers, optionally filtered by worker type.
    pub fn workers_all(
        &self,
        worker_type: Option<WorkerType>,
    ) -> Result<Vec<WorkerDetails>, ClientError> {
        let req = self.core.build_workers_all(worker_type);
        let response = self.execute(req)?;
        Ok(self.core.parse_workers_all(response)?)
    }

    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        debug!(path = %request.path, "sending request");
        let mut response = match (request.method, request.body) {
            (HttpMethod::Get, _) => {
                let mut req = self.agent.get(&request.path);
                for (name, value) in &request.headers {
                    req = req.header(name.as_str(), value.as_str());
                }
                req.call()?
            }
            (HttpMethod::Delete, _) => {
                let mut req = self.agent.delete(&request.path);
                for (name, value) in &request.headers {
                    req = req.header(name.as_str(), value.as_str());
                }
                req.call()?
            }
            (HttpMethod::Post, Some(body)) => {
                let mut req = self.agent.post(&request.path);
                for (name, value) in &request.headers {
                    req = req.header(name.as_str(), value.as_str());
                }
                req.send(body.as_bytes())?
            }
            (HttpMethod::Post, None) => {
                let mut req = self.agent.post(&request.path);
                for (name, value) in &request.headers {
                    req = req.header(name.as_str(), value.as_str());
                }
                req.send_empty()?
            }
        };

        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().unwrap_or_default();
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

/// A queued generation job that cancels itself when dropped.
///
/// Obtained from [`HordeApiClient::begin_generation`]. Call [`finish`] once
/// the results have been consumed; dropping the guard without finishing
/// issues the cancel request and logs (rather than panics) on failure.
///
/// [`finish`]: PendingGeneration::finish
pub struct PendingGeneration<'a> {
    client: &'a HordeApiClient,
    apikey: String,
    id: GenerationId,
    kudos: f64,
    finished: bool,
}

impl PendingGeneration<'_> {
    pub fn id(&self) -> GenerationId {
        self.id
    }

    /// Kudos deducted when the job was queued.
    pub fn kudos(&self) -> f64 {
        self.kudos
    }

    pub fn check(&self) -> Result<ImageGenerateCheckResponse, ClientError> {
        self.client.generate_check(self.id)
    }

    pub fn status(&self) -> Result<ImageGenerateStatusResponse, ClientError> {
        self.client.generate_status(self.id)
    }

    /// Keep the job and disarm the guard.
    pub fn finish(mut self) -> GenerationId {
        self.finished = true;
        self.id
    }
}

impl Drop for PendingGeneration<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Err(error) = self.client.cancel_generation(&self.apikey, self.id) {
            warn!(id = %self.id, %error, "failed to cancel abandoned generation");
        }
    }
}
