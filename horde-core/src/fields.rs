//! Strongly typed identifiers for horde resources.
//!
//! The horde hands out UUIDs for jobs, images, workers and teams. Wrapping
//! each in its own newtype keeps the ids from being mixed up at call sites
//! while serializing as a bare UUID string on the wire.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! uuid_identifier {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new(id: Uuid) -> Self {
                Self(id)
            }

            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }
    };
}

uuid_identifier!(
    /// The id of a generation job.
    GenerationId
);

uuid_identifier!(
    /// The id of a single generated image within a job.
    ImageId
);

uuid_identifier!(
    /// The id of a worker machine.
    WorkerId
);

uuid_identifier!(
    /// The id of a worker team.
    TeamId
);
