//! API models for the AI Horde v2 endpoints covered by this SDK.
//!
//! # Design
//! These types mirror the horde's swagger schemas but are defined
//! independently from the mock-horde crate. Models are immutable once
//! constructed: no mutating methods are exposed, and "changing" a field
//! means building a new value with struct-update syntax. Deserialization
//! through [`ApiModel::from_value`] runs [`ApiModel::validate`], so every
//! instance obtained that way satisfies its cross-field constraints.
//! Integration tests catch schema drift between the crates.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::consts::{GenerationState, SourceProcessing, WorkerType};
use crate::error::ApiError;
use crate::fields::{GenerationId, ImageId, WorkerId};

/// Conversions between an API model and a plain JSON mapping.
///
/// `to_value` produces a mapping safe to hand to SDK consumers; `from_value`
/// is its inverse and fails with [`ApiError::Validation`] or
/// [`ApiError::DeserializationError`] rather than silently coercing bad
/// input. Round-tripping a valid instance is value-preserving.
pub trait ApiModel: Serialize + DeserializeOwned {
    /// The name of this shape in the horde's v2 swagger document, if it has one.
    fn api_model_name() -> Option<&'static str> {
        None
    }

    /// Constraint checks beyond what the type system already encodes.
    fn validate(&self) -> Result<(), ApiError> {
        Ok(())
    }

    /// Convert this model into a plain JSON mapping.
    fn to_value(&self) -> Result<serde_json::Value, ApiError> {
        serde_json::to_value(self).map_err(|e| ApiError::SerializationError(e.to_string()))
    }

    /// Build a model from a JSON mapping, rejecting values that do not
    /// satisfy the declared shape or its cross-field constraints.
    fn from_value(value: serde_json::Value) -> Result<Self, ApiError> {
        let model: Self = serde_json::from_value(value)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))?;
        model.validate()?;
        Ok(model)
    }
}

fn default_true() -> bool {
    true
}

fn default_n() -> u32 {
    1
}

/// Tunable parameters for an image generation job.
///
/// v2 API model: `ModelGenerationInputStable`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageGenerationParams {
    /// Number of images to generate. Must be at least 1.
    #[serde(default = "default_n")]
    pub n: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampler_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cfg_scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<u32>,
}

impl Default for ImageGenerationParams {
    fn default() -> Self {
        Self {
            n: 1,
            sampler_name: None,
            cfg_scale: None,
            seed: None,
            width: None,
            height: None,
            steps: None,
        }
    }
}

impl ApiModel for ImageGenerationParams {
    fn api_model_name() -> Option<&'static str> {
        Some("ModelGenerationInputStable")
    }

    fn validate(&self) -> Result<(), ApiError> {
        if self.n == 0 {
            return Err(ApiError::Validation("n must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Payload for queueing an image generation job.
///
/// v2 API model: `GenerationInputStable`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageGenerateAsyncRequest {
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<ImageGenerationParams>,
    #[serde(default = "default_true")]
    pub nsfw: bool,
    /// Only valid when `nsfw` is false.
    #[serde(default)]
    pub censor_nsfw: bool,
    /// When true, results are uploaded to R2 and `img` holds a URL.
    #[serde(default = "default_true")]
    pub r2: bool,
    #[serde(default)]
    pub shared: bool,
    #[serde(default = "default_true")]
    pub replacement_filter: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub models: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_image: Option<String>,
    #[serde(default)]
    pub source_processing: SourceProcessing,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_mask: Option<String>,
}

impl ImageGenerateAsyncRequest {
    /// A request for `prompt` with every other field at its default.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            params: None,
            nsfw: true,
            censor_nsfw: false,
            r2: true,
            shared: false,
            replacement_filter: true,
            models: Vec::new(),
            source_image: None,
            source_processing: SourceProcessing::Txt2Img,
            source_mask: None,
        }
    }
}

impl ApiModel for ImageGenerateAsyncRequest {
    fn api_model_name() -> Option<&'static str> {
        Some("GenerationInputStable")
    }

    fn validate(&self) -> Result<(), ApiError> {
        if self.censor_nsfw && self.nsfw {
            return Err(ApiError::Validation(
                "censor_nsfw is only valid when nsfw is false".to_string(),
            ));
        }
        if let Some(params) = &self.params {
            params.validate()?;
        }
        Ok(())
    }
}

/// Acknowledgement that a generation job has been queued.
///
/// v2 API model: `RequestAsync`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageGenerateAsyncResponse {
    pub id: GenerationId,
    /// Kudos deducted from the requesting account for this job.
    pub kudos: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiModel for ImageGenerateAsyncResponse {
    fn api_model_name() -> Option<&'static str> {
        Some("RequestAsync")
    }
}

/// Queue progress of a job, without the generated results.
///
/// v2 API model: `RequestStatusCheck`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageGenerateCheckResponse {
    pub finished: u32,
    pub processing: u32,
    pub restarted: u32,
    pub waiting: u32,
    pub done: bool,
    pub faulted: bool,
    pub wait_time: u32,
    pub queue_position: u32,
    pub kudos: f64,
    /// False when no active worker can satisfy the request.
    pub is_possible: bool,
}

impl ApiModel for ImageGenerateCheckResponse {
    fn api_model_name() -> Option<&'static str> {
        Some("RequestStatusCheck")
    }
}

/// A single generated image within a finished or running job.
///
/// v2 API model: `GenerationStable`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageGeneration {
    pub id: ImageId,
    pub worker_id: WorkerId,
    pub worker_name: String,
    pub model: String,
    pub state: GenerationState,
    /// Base64-encoded webp, or an R2 URL when the job was queued with `r2`.
    pub img: String,
    pub seed: String,
    /// True when the worker's safety filter replaced this image.
    pub censored: bool,
}

impl ApiModel for ImageGeneration {
    fn api_model_name() -> Option<&'static str> {
        Some("GenerationStable")
    }
}

/// Full status of a job, results included.
///
/// v2 API model: `RequestStatusStable`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageGenerateStatusResponse {
    #[serde(flatten)]
    pub check: ImageGenerateCheckResponse,
    #[serde(default)]
    pub generations: Vec<ImageGeneration>,
    /// True when these images have been shared with LAION.
    #[serde(default)]
    pub shared: bool,
}

impl ApiModel for ImageGenerateStatusResponse {
    fn api_model_name() -> Option<&'static str> {
        Some("RequestStatusStable")
    }
}

/// Worker-side payload submitting a finished generation.
///
/// v2 API model: `SubmitInputStable`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageGenerationJobSubmitRequest {
    pub id: GenerationId,
    /// R2 URL the result was uploaded to, or the raw result string.
    pub generation: String,
    pub state: GenerationState,
    pub seed: String,
    #[serde(default)]
    pub censored: bool,
}

impl ApiModel for ImageGenerationJobSubmitRequest {
    fn api_model_name() -> Option<&'static str> {
        Some("SubmitInputStable")
    }
}

/// Kudos awarded for a submitted generation.
///
/// v2 API model: `GenerationSubmitted`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageGenerationJobSubmitResponse {
    pub reward: f64,
}

impl ApiModel for ImageGenerationJobSubmitResponse {
    fn api_model_name() -> Option<&'static str> {
        Some("GenerationSubmitted")
    }
}

/// Public details of a single worker.
///
/// v2 API model: `WorkerDetailItem`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerDetails {
    pub id: WorkerId,
    pub name: String,
    #[serde(rename = "type")]
    pub worker_type: WorkerType,
    pub online: bool,
    pub requests_fulfilled: u64,
    pub kudos_rewards: f64,
    pub performance: String,
    pub threads: u32,
    pub uptime: u64,
    pub maintenance_mode: bool,
    pub nsfw: bool,
    pub trusted: bool,
    #[serde(default)]
    pub models: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pixels: Option<u64>,
}

impl ApiModel for WorkerDetails {
    fn api_model_name() -> Option<&'static str> {
        Some("WorkerDetailItem")
    }
}

/// The uniform error body every horde endpoint returns for 4xx statuses.
///
/// v2 API model: `RequestError`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestError {
    pub message: String,
}

impl ApiModel for RequestError {
    fn api_model_name() -> Option<&'static str> {
        Some("RequestError")
    }
}
