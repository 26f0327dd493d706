//! Strongly-typed identifiers for snapshot records
//!
//! Surrogate keys of the stored records are UUID newtypes so a claim key can
//! never be passed where a policy key is expected. Business keys (the claim
//! number reserve transactions join on) stay plain strings on the records.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! record_id {
    ($(#[$doc:meta])* $name:ident => $tag:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a fresh key; v7 so keys created in sequence sort in sequence
            pub fn generate() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($tag, ":{}"), self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }
    };
}

record_id!(
    /// Key of a row in the claims table
    ClaimRecordId => "claim"
);
record_id!(
    /// Key of a row in the reserves table
    ReserveTransactionId => "reserve"
);
record_id!(
    /// Key of a row in the underwriting periods table
    UnderwritingPeriodId => "uw-period"
);
record_id!(
    /// Key of a row in the policies table
    PolicyId => "policy"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_tagged() {
        let uuid = Uuid::nil();
        assert_eq!(
            ClaimRecordId::from(uuid).to_string(),
            "claim:00000000-0000-0000-0000-000000000000"
        );
        assert!(UnderwritingPeriodId::from(uuid).to_string().starts_with("uw-period:"));
    }

    #[test]
    fn test_generated_keys_sort_in_creation_order() {
        let first = ReserveTransactionId::generate();
        let second = ReserveTransactionId::generate();

        assert!(first < second);
        assert_ne!(first.as_uuid(), second.as_uuid());
    }

    #[test]
    fn test_serializes_as_bare_uuid() {
        let id = PolicyId::from(Uuid::nil());
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            "\"00000000-0000-0000-0000-000000000000\""
        );
    }
}
