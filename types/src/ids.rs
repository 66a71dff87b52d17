//! String identifiers for the six entity collections.
//!
//! Each collection gets its own newtype so a `CommentId` can never be looked up
//! in the proposal index by accident. Identifiers are opaque: the engine never
//! parses them, it only compares and orders them.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Return the raw identifier string.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether the identifier is the empty string (missing in the source record).
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_id!(
    /// Identifier of a platform user.
    UserId
);
string_id!(
    /// Identifier of a mission (campaign).
    MissionId
);
string_id!(
    /// Identifier of a proposal submitted to a mission.
    ProposalId
);
string_id!(
    /// Identifier of a rating given to a proposal.
    RatingId
);
string_id!(
    /// Identifier of a comment on a proposal.
    CommentId
);
string_id!(
    /// Identifier of a reaction on a comment.
    ReactionId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_order_lexicographically() {
        let a = UserId::new("alice");
        let b = UserId::new("bob");
        assert!(a < b);
        assert_eq!(a.to_string(), "alice");
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = ProposalId::new("p-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"p-1\"");
        let back: ProposalId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn default_id_is_empty() {
        assert!(CommentId::default().is_empty());
        assert!(!CommentId::from("c").is_empty());
    }
}
