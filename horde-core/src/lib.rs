//! Request-building and response-parsing core for the AI Horde API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The blocking and async
//! transports in `horde-client` execute the actual HTTP round-trip, keeping
//! this crate fully deterministic and testable.
//!
//! # Design
//! - `HordeClient` is stateless — it holds only `base_url`.
//! - Each API operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - API models are immutable serde DTOs; the `ApiModel` trait provides the
//!   validated JSON-mapping round-trip.
//! - DTOs are defined independently from the mock-horde crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod consts;
pub mod endpoints;
pub mod error;
pub mod fields;
pub mod http;
pub mod types;

pub use client::HordeClient;
pub use consts::{GenerationState, SourceProcessing, WorkerType};
pub use error::ApiError;
pub use fields::{GenerationId, ImageId, TeamId, WorkerId};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{
    ApiModel, ImageGenerateAsyncRequest, ImageGenerateAsyncResponse, ImageGenerateCheckResponse,
    ImageGenerateStatusResponse, ImageGeneration, ImageGenerationJobSubmitRequest,
    ImageGenerationJobSubmitResponse, ImageGenerationParams, RequestError, WorkerDetails,
};
