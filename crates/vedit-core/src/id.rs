//! Track and clip identifiers.
//!
//! Ids are random UUIDs, so ids minted in rapid succession never collide.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Mint a fresh id.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// The underlying UUID.
            pub fn as_uuid(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "-{}"), self.0.simple())
            }
        }
    };
}

entity_id!(
    /// Identifier of a track lane.
    TrackId,
    "track"
);

entity_id!(
    /// Identifier of a clip placement.
    ClipId,
    "clip"
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rapid_ids_are_unique() {
        let ids: HashSet<ClipId> = (0..10_000).map(|_| ClipId::new()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_display_prefix() {
        let id = TrackId::new();
        assert!(id.to_string().starts_with("track-"));
        assert!(ClipId::new().to_string().starts_with("clip-"));
    }
}
