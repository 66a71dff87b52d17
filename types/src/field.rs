//! Counted activity fields: the dimensions of a user's count vector.

use crate::reaction::ReactionType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One counted activity dimension.
///
/// `*Created` fields count events the user performed; `*Received` fields count
/// events targeting content the user authored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum CountField {
    ProposalsCreated,
    RatingsCreated,
    RatingsReceived,
    CommentsCreated,
    CommentsReceived,
    /// Replies to comments the user wrote (one thread level only).
    RepliesReceived,
    ReactionsCreated(ReactionType),
    ReactionsReceived(ReactionType),
}

const PLAIN_FIELDS: [CountField; 6] = [
    CountField::ProposalsCreated,
    CountField::RatingsCreated,
    CountField::RatingsReceived,
    CountField::CommentsCreated,
    CountField::CommentsReceived,
    CountField::RepliesReceived,
];

impl CountField {
    /// Total number of fields in a count vector.
    pub const COUNT: usize = PLAIN_FIELDS.len() + 2 * ReactionType::ALL.len();

    /// Every field in index order.
    pub fn all() -> impl Iterator<Item = CountField> {
        PLAIN_FIELDS.into_iter().chain(ReactionType::ALL.into_iter().flat_map(|t| {
            [
                CountField::ReactionsCreated(t),
                CountField::ReactionsReceived(t),
            ]
        }))
    }

    /// Dense position of this field, `0..COUNT`.
    pub fn index(&self) -> usize {
        match self {
            Self::ProposalsCreated => 0,
            Self::RatingsCreated => 1,
            Self::RatingsReceived => 2,
            Self::CommentsCreated => 3,
            Self::CommentsReceived => 4,
            Self::RepliesReceived => 5,
            Self::ReactionsCreated(t) => PLAIN_FIELDS.len() + 2 * t.index(),
            Self::ReactionsReceived(t) => PLAIN_FIELDS.len() + 2 * t.index() + 1,
        }
    }

    /// Weight/column name, e.g. `comments_received` or `clap_reactions_created`.
    pub fn name(&self) -> String {
        match self {
            Self::ProposalsCreated => "proposals_created".into(),
            Self::RatingsCreated => "ratings_created".into(),
            Self::RatingsReceived => "ratings_received".into(),
            Self::CommentsCreated => "comments_created".into(),
            Self::CommentsReceived => "comments_received".into(),
            Self::RepliesReceived => "replies_received".into(),
            Self::ReactionsCreated(t) => format!("{}_reactions_created", t.name()),
            Self::ReactionsReceived(t) => format!("{}_reactions_received", t.name()),
        }
    }

    /// Parse a field name produced by [`CountField::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        if let Some(field) = PLAIN_FIELDS.iter().find(|f| f.name() == name) {
            return Some(*field);
        }
        if let Some(tag) = name.strip_suffix("_reactions_created") {
            return ReactionType::from_tag(tag).map(Self::ReactionsCreated);
        }
        if let Some(tag) = name.strip_suffix("_reactions_received") {
            return ReactionType::from_tag(tag).map(Self::ReactionsReceived);
        }
        None
    }
}

impl fmt::Display for CountField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl From<CountField> for String {
    fn from(field: CountField) -> Self {
        field.name()
    }
}

impl TryFrom<String> for CountField {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        CountField::from_name(&s).ok_or_else(|| format!("unknown count field: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn indices_are_dense_and_unique() {
        let indices: Vec<usize> = CountField::all().map(|f| f.index()).collect();
        assert_eq!(indices.len(), CountField::COUNT);
        assert_eq!(indices, (0..CountField::COUNT).collect::<Vec<_>>());
    }

    #[test]
    fn names_parse_back() {
        let names: HashSet<String> = CountField::all().map(|f| f.name()).collect();
        assert_eq!(names.len(), CountField::COUNT);
        for field in CountField::all() {
            assert_eq!(CountField::from_name(&field.name()), Some(field));
        }
    }

    #[test]
    fn reaction_field_names() {
        assert_eq!(
            CountField::ReactionsReceived(ReactionType::Downvote).name(),
            "downvote_reactions_received"
        );
        assert_eq!(
            CountField::from_name("genius_reactions_created"),
            Some(CountField::ReactionsCreated(ReactionType::Genius))
        );
        assert_eq!(CountField::from_name("shrug_reactions_created"), None);
        assert_eq!(CountField::from_name("views_received"), None);
    }
}
