//! The six normalized entity records of a platform snapshot.
//!
//! Records are immutable once loaded. Every field other than the identifiers,
//! foreign keys and creation timestamp is optional in the upstream export and
//! defaults to an empty string, zero or `false`.

use crate::ids::{CommentId, MissionId, ProposalId, RatingId, ReactionId, UserId};
use crate::reaction::ReactionType;
use crate::time::Timestamp;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Optional fields may arrive as JSON `null`; treat that like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A platform user.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub user_id: UserId,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email_address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ethereum_address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cardano_address: String,
    #[serde(deserialize_with = "null_as_default")]
    pub handle: String,
    #[serde(deserialize_with = "null_as_default")]
    pub creation_timestamp: Timestamp,
}

/// A time-boxed campaign within which proposals are submitted and rated.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Mission {
    pub mission_id: MissionId,
    /// Owning user (not required to exist in the user collection).
    pub user_id: UserId,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub creation_timestamp: Timestamp,
    #[serde(deserialize_with = "null_as_default")]
    pub start_timestamp: Timestamp,
    #[serde(deserialize_with = "null_as_default")]
    pub end_timestamp: Timestamp,
    #[serde(deserialize_with = "null_as_default")]
    pub num_total_unique_views: u64,
}

/// A proposal submitted to a mission.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Proposal {
    pub proposal_id: ProposalId,
    pub mission_id: MissionId,
    pub user_id: UserId,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_anonymous: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_rejected: bool,
    /// Rating aggregate as reported by the platform (not recomputed).
    #[serde(deserialize_with = "null_as_default")]
    pub average_rating: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub creation_timestamp: Timestamp,
    #[serde(deserialize_with = "null_as_default")]
    pub publishing_timestamp: Timestamp,
    #[serde(deserialize_with = "null_as_default")]
    pub num_files: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub num_total_unique_views: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub num_total_engagements: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub num_total_contributions: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub num_unique_contributions: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub num_total_ratings: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub num_total_comments: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub num_total_suggestions: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub num_volunteers: u64,
}

/// A rating a user gave to a proposal.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rating {
    pub rating_id: RatingId,
    pub proposal_id: ProposalId,
    pub user_id: UserId,
    #[serde(deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub is_anonymous: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub enable: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub creation_timestamp: Timestamp,
}

/// A comment on a proposal, optionally replying to another comment.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    pub comment_id: CommentId,
    pub proposal_id: ProposalId,
    pub user_id: UserId,
    /// Parent comment; the export writes an empty string for top-level comments.
    pub parent_comment_id: Option<CommentId>,
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub emotion: String,
    #[serde(deserialize_with = "null_as_default")]
    pub level: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub is_anonymous: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_flagged: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub creation_timestamp: Timestamp,
    #[serde(deserialize_with = "null_as_default")]
    pub num_total_replies: u64,
    /// Reaction counters as reported by the platform, keyed by raw tag.
    #[serde(deserialize_with = "null_as_default")]
    pub reaction_counts: BTreeMap<String, u64>,
}

impl Comment {
    /// The parent comment, treating an empty identifier as "no parent".
    pub fn parent(&self) -> Option<&CommentId> {
        self.parent_comment_id.as_ref().filter(|id| !id.is_empty())
    }

    /// Platform-reported count for one reaction type, summed over every tag
    /// spelling of it. Tags outside the enumeration are kept but never counted.
    pub fn reaction_count(&self, kind: ReactionType) -> u64 {
        self.reaction_counts
            .iter()
            .filter(|(tag, _)| ReactionType::from_tag(tag) == Some(kind))
            .fold(0u64, |sum, (_, n)| sum.saturating_add(*n))
    }
}

/// A reaction (emoji, upvote or downvote) on a comment.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reaction {
    pub reaction_id: ReactionId,
    pub comment_id: CommentId,
    pub user_id: UserId,
    /// Raw platform tag; see [`Reaction::kind`].
    #[serde(deserialize_with = "null_as_default")]
    pub reaction_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub creation_timestamp: Timestamp,
}

impl Reaction {
    /// The counted reaction type, or `None` for a tag outside the enumeration.
    pub fn kind(&self) -> Option<ReactionType> {
        ReactionType::from_tag(&self.reaction_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let rating: Rating =
            serde_json::from_str(r#"{"rating_id":"r1","proposal_id":"p1","user_id":"u1"}"#)
                .unwrap();
        assert_eq!(rating.rating, 0.0);
        assert!(!rating.enable);
        assert_eq!(rating.creation_timestamp, Timestamp::EPOCH);
    }

    #[test]
    fn empty_parent_is_top_level() {
        let mut comment = Comment {
            parent_comment_id: Some(CommentId::new("")),
            ..Default::default()
        };
        assert!(comment.parent().is_none());
        comment.parent_comment_id = Some(CommentId::new("c0"));
        assert_eq!(comment.parent().map(|c| c.as_str()), Some("c0"));
    }

    #[test]
    fn reaction_counts_key_by_tag() {
        let comment: Comment = serde_json::from_str(
            r#"{"comment_id":"c1","reaction_counts":{"clap":3,"Clap":1,"endorse_up":2}}"#,
        )
        .unwrap();
        assert_eq!(comment.reaction_count(ReactionType::Clap), 4);
        assert_eq!(comment.reaction_count(ReactionType::Love), 0);
        assert_eq!(comment.reaction_counts.get("endorse_up"), Some(&2));
    }

    #[test]
    fn null_optional_fields_take_defaults() {
        let user: User = serde_json::from_str(
            r#"{"user_id":"u1","name":null,"handle":null,"creation_timestamp":null}"#,
        )
        .unwrap();
        assert_eq!(user.name, "");
        assert_eq!(user.creation_timestamp, Timestamp::EPOCH);

        let comment: Comment = serde_json::from_str(
            r#"{"comment_id":"c1","parent_comment_id":null,"level":null,"reaction_counts":null}"#,
        )
        .unwrap();
        assert!(comment.parent().is_none());
        assert_eq!(comment.level, 0);
        assert!(comment.reaction_counts.is_empty());
    }

    #[test]
    fn unknown_reaction_tag_has_no_kind() {
        let reaction = Reaction {
            reaction_type: "shrug".into(),
            ..Default::default()
        };
        assert_eq!(reaction.kind(), None);
    }
}
