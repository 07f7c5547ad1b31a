//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `PaymentId` where an
//! `EnrollmentId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(StudentId, "Unique identifier for a student.");
typed_id!(ClassId, "Unique identifier for a school class.");
typed_id!(AcademicYearId, "Unique identifier for an academic year.");
typed_id!(
    EnrollmentId,
    "Unique identifier for a student's fee enrollment."
);
typed_id!(
    ObligationId,
    "Unique identifier for a monthly fee obligation."
);
typed_id!(PaymentId, "Unique identifier for a received payment.");
typed_id!(
    AllocationId,
    "Unique identifier for a payment allocation row."
);
typed_id!(UserId, "Unique identifier for a staff user.");
