//! Path literals for the AI Horde v2 API.

/// Queue a new asynchronous image generation job.
pub const V2_GENERATE_ASYNC: &str = "/v2/generate/async";

/// Poll a job's queue position without retrieving results.
pub const V2_GENERATE_CHECK: &str = "/v2/generate/check";

/// Retrieve (GET) or cancel (DELETE) a job, results included.
pub const V2_GENERATE_STATUS: &str = "/v2/generate/status";

/// Worker-side submission of a finished generation.
pub const V2_GENERATE_SUBMIT: &str = "/v2/generate/submit";

/// Details of all workers currently known to the horde.
pub const V2_WORKERS: &str = "/v2/workers";
