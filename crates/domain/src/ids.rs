use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            pub fn to_uuid(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

// Locally generated identity of an unconfirmed turn
define_id!(PlaceholderId);

/// Prefix used when rendering placeholder ids.
pub const PLACEHOLDER_PREFIX: &str = "temp-";

/// Identity of a turn in the timeline.
///
/// Server-confirmed turns carry the server's integer id. A turn the client
/// has shown optimistically carries a `Placeholder` id until the authoritative
/// copy arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnId {
    Confirmed(i64),
    Placeholder(PlaceholderId),
}

impl TurnId {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }

    /// Server id, if this turn has been confirmed.
    pub fn confirmed(&self) -> Option<i64> {
        match self {
            Self::Confirmed(id) => Some(*id),
            Self::Placeholder(_) => None,
        }
    }

    pub fn placeholder(&self) -> Option<PlaceholderId> {
        match self {
            Self::Placeholder(id) => Some(*id),
            Self::Confirmed(_) => None,
        }
    }
}

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Confirmed(id) => write!(f, "{}", id),
            Self::Placeholder(id) => write!(f, "{}{}", PLACEHOLDER_PREFIX, id),
        }
    }
}

impl From<i64> for TurnId {
    fn from(value: i64) -> Self {
        Self::Confirmed(value)
    }
}

/// Opaque key scoping every gateway call to one session.
///
/// The client never interprets the value beyond using it in request paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionRef(String);

impl SessionRef {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for SessionRef {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for SessionRef {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SessionRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_ids_render_with_reserved_prefix() {
        let id = TurnId::Placeholder(PlaceholderId::new());
        assert!(id.to_string().starts_with(PLACEHOLDER_PREFIX));
        assert!(id.is_placeholder());
        assert_eq!(id.confirmed(), None);
    }

    #[test]
    fn confirmed_ids_render_as_integers() {
        let id = TurnId::from(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(id.confirmed(), Some(42));
    }

    #[test]
    fn placeholder_ids_are_locally_unique() {
        assert_ne!(PlaceholderId::new(), PlaceholderId::new());
    }

    #[test]
    fn session_ref_is_opaque_path_segment() {
        assert_eq!(SessionRef::from(7).to_string(), "7");
        assert_eq!(SessionRef::from("abc").as_str(), "abc");
    }
}
