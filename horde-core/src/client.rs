//! Stateless HTTP request builder and response parser for the horde API.
//!
//! # Design
//! `HordeClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`. The
//! caller executes the actual HTTP round-trip, keeping the core deterministic
//! and free of I/O dependencies.
//!
//! Field routing follows the horde conventions: the API key travels in the
//! `apikey` header and never in the body, job ids travel in the path, the
//! worker type filter travels in the query string, and everything else is the
//! JSON body. Request bodies are validated before serialization.

use crate::consts::WorkerType;
use crate::endpoints;
use crate::error::ApiError;
use crate::fields::GenerationId;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    ApiModel, ImageGenerateAsyncRequest, ImageGenerateAsyncResponse, ImageGenerateCheckResponse,
    ImageGenerateStatusResponse, ImageGenerationJobSubmitRequest, ImageGenerationJobSubmitResponse,
    RequestError, WorkerDetails,
};

/// Stateless client for the AI Horde v2 API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The caller is responsible for executing the HTTP
/// round-trip between `build_*` and `parse_*`.
#[derive(Debug, Clone)]
pub struct HordeClient {
    base_url: String,
}

impl HordeClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Queue an image generation job. Succeeds with 202.
    pub fn build_generate_async(
        &self,
        apikey: &str,
        request: &ImageGenerateAsyncRequest,
    ) -> Result<HttpRequest, ApiError> {
        request.validate()?;
        let body = serde_json::to_string(request)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}{}", self.base_url, endpoints::V2_GENERATE_ASYNC),
            headers: vec![apikey_header(apikey), json_content_type()],
            body: Some(body),
        })
    }

    pub fn parse_generate_async(
        &self,
        response: HttpResponse,
    ) -> Result<ImageGenerateAsyncResponse, ApiError> {
        check_status(&response, 202)?;
        parse_body(&response.body)
    }

    pub fn build_generate_check(&self, id: GenerationId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}{}/{id}", self.base_url, endpoints::V2_GENERATE_CHECK),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_generate_check(
        &self,
        response: HttpResponse,
    ) -> Result<ImageGenerateCheckResponse, ApiError> {
        check_status(&response, 200)?;
        parse_body(&response.body)
    }

    pub fn build_generate_status(&self, id: GenerationId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}{}/{id}", self.base_url, endpoints::V2_GENERATE_STATUS),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_generate_status(
        &self,
        response: HttpResponse,
    ) -> Result<ImageGenerateStatusResponse, ApiError> {
        check_status(&response, 200)?;
        parse_body(&response.body)
    }

    /// Cancel a queued or running job. The response carries whatever the job
    /// had produced at cancellation time.
    pub fn build_cancel_generation(&self, apikey: &str, id: GenerationId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}{}/{id}", self.base_url, endpoints::V2_GENERATE_STATUS),
            headers: vec![apikey_header(apikey)],
            body: None,
        }
    }

    pub fn parse_cancel_generation(
        &self,
        response: HttpResponse,
    ) -> Result<ImageGenerateStatusResponse, ApiError> {
        check_status(&response, 200)?;
        parse_body(&response.body)
    }

    /// Worker-side submission of a finished generation.
    pub fn build_submit_generation(
        &self,
        apikey: &str,
        request: &ImageGenerationJobSubmitRequest,
    ) -> Result<HttpRequest, ApiError> {
        request.validate()?;
        let body = serde_json::to_string(request)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}{}", self.base_url, endpoints::V2_GENERATE_SUBMIT),
            headers: vec![apikey_header(apikey), json_content_type()],
            body: Some(body),
        })
    }

    pub fn parse_submit_generation(
        &self,
        response: HttpResponse,
    ) -> Result<ImageGenerationJobSubmitResponse, ApiError> {
        check_status(&response, 200)?;
        parse_body(&response.body)
    }

    /// Details of all workers, optionally filtered by worker type.
    pub fn build_workers_all(&self, worker_type: Option<WorkerType>) -> HttpRequest {
        let mut path = format!("{}{}", self.base_url, endpoints::V2_WORKERS);
        if let Some(worker_type) = worker_type {
            // Worker types are fixed lowercase tokens, safe to splice directly.
            path.push_str("?type=");
            path.push_str(worker_type.as_str());
        }
        HttpRequest {
            method: HttpMethod::Get,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_workers_all(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<WorkerDetails>, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }
}

fn apikey_header(apikey: &str) -> (String, String) {
    ("apikey".to_string(), apikey.to_string())
}

fn json_content_type() -> (String, String) {
    ("content-type".to_string(), "application/json".to_string())
}

/// Deserialize a response body into a model, running its validation.
fn parse_body<T: ApiModel>(body: &str) -> Result<T, ApiError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))?;
    T::from_value(value)
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    if response.status >= 400 {
        if let Ok(error) = serde_json::from_str::<RequestError>(&response.body) {
            return Err(ApiError::Api {
                status: response.status,
                message: error.message,
            });
        }
        return Err(ApiError::HttpError {
            status: response.status,
            body: response.body.clone(),
        });
    }
    Err(ApiError::UnexpectedStatus {
        status: response.status,
        expected,
    })
}
