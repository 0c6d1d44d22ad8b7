//! Closed string sets used on the wire.

use serde::{Deserialize, Serialize};

/// Outcome of a single generation as reported by a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationState {
    Ok,
    Censored,
    Faulted,
}

/// How the horde should treat the source image, if one is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceProcessing {
    #[default]
    Txt2Img,
    Img2Img,
    Inpainting,
    Outpainting,
}

/// The kind of work a worker advertises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkerType {
    Image,
    Text,
    Interrogation,
}

impl WorkerType {
    /// The wire form, used when building query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerType::Image => "image",
            WorkerType::Text => "text",
            WorkerType::Interrogation => "interrogation",
        }
    }
}
