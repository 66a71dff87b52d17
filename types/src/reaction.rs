//! Reaction types merged from the platform's emoji reactions, upvotes and downvotes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed enumeration of reaction tags the engine counts.
///
/// Tags outside this set are tolerated in the data but never counted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionType {
    Upvote,
    Downvote,
    Anger,
    Celebrate,
    Clap,
    Curious,
    Genius,
    Happy,
    Hot,
    Laugh,
    Love,
    Sad,
}

impl ReactionType {
    /// Every reaction type, in counting order.
    pub const ALL: [ReactionType; 12] = [
        Self::Upvote,
        Self::Downvote,
        Self::Anger,
        Self::Celebrate,
        Self::Clap,
        Self::Curious,
        Self::Genius,
        Self::Happy,
        Self::Hot,
        Self::Laugh,
        Self::Love,
        Self::Sad,
    ];

    /// The tag used by the platform export and in weight names.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Upvote => "upvote",
            Self::Downvote => "downvote",
            Self::Anger => "anger",
            Self::Celebrate => "celebrate",
            Self::Clap => "clap",
            Self::Curious => "curious",
            Self::Genius => "genius",
            Self::Happy => "happy",
            Self::Hot => "hot",
            Self::Laugh => "laugh",
            Self::Love => "love",
            Self::Sad => "sad",
        }
    }

    /// Parse a platform tag (case-insensitive, surrounding whitespace ignored).
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(tag))
    }

    /// Position of this type in [`ReactionType::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Whether this is one of the emoji reactions (as opposed to up/down votes).
    pub fn is_emoji(&self) -> bool {
        !matches!(self, Self::Upvote | Self::Downvote)
    }

    /// Whether the emoji conveys a negative sentiment.
    pub fn is_negative_emoji(&self) -> bool {
        matches!(self, Self::Anger | Self::Sad)
    }
}

impl fmt::Display for ReactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
