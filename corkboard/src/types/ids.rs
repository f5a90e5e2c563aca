//! Newtype identifiers for all board entities
//!
//! IDs are ULID strings: opaque to callers, lexicographically time-ordered,
//! and stable across serialization.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh ID
            pub fn new() -> Self {
                Self(ulid::Ulid::new().to_string())
            }

            /// Wrap an existing ID string
            pub fn from_string(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// View as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

id_type! {
    /// Identifies a board
    BoardId
}

id_type! {
    /// Identifies a list (column) within a board
    ListId
}

id_type! {
    /// Identifies a task within a list
    TaskId
}

id_type! {
    /// Identifies a user (issued by the external identity provider)
    UserId
}

id_type! {
    /// Identifies an activity log entry
    ActivityId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = TaskId::new();
        let b = TaskId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_id_roundtrip() {
        let id = ListId::from_string("01J9ZX3Q4R5S6T7V8W9X0Y1Z2A");
        assert_eq!(id.as_str(), "01J9ZX3Q4R5S6T7V8W9X0Y1Z2A");
        assert_eq!(id.to_string(), "01J9ZX3Q4R5S6T7V8W9X0Y1Z2A");
    }

    #[test]
    fn test_id_serializes_transparent() {
        let id = BoardId::from_string("abc");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc\"");
    }
}
