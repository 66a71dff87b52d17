//! Count vectors and the scoped-counts artifact.

use ces_types::{CountField, ProposalId, UserId};
use serde::ser::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Non-negative counts for every [`CountField`] of one user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountVector {
    counts: [u64; CountField::COUNT],
}

impl CountVector {
    pub fn zero() -> Self {
        Self {
            counts: [0; CountField::COUNT],
        }
    }

    pub fn get(&self, field: CountField) -> u64 {
        self.counts[field.index()]
    }

    pub fn set(&mut self, field: CountField, value: u64) {
        self.counts[field.index()] = value;
    }

    pub fn increment(&mut self, field: CountField) {
        let slot = &mut self.counts[field.index()];
        *slot = slot.saturating_add(1);
    }

    /// `(field, count)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (CountField, u64)> + '_ {
        CountField::all().map(move |f| (f, self.get(f)))
    }

    /// Sum over all fields.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn is_zero(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }
}

impl Default for CountVector {
    fn default() -> Self {
        Self::zero()
    }
}

impl Serialize for CountVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|(f, c)| (f.name(), c)))
    }
}

/// Rating aggregate of one in-scope proposal.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ProposalRating {
    pub author: UserId,
    /// Mean of the in-scope rating values; 0 when unrated.
    pub mean_rating: f64,
    pub num_ratings: u64,
}

/// Per-proposal rating means for the rating-quality bonus.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct ProposalRatings {
    pub proposals: BTreeMap<ProposalId, ProposalRating>,
    /// Mean of `mean_rating` over all in-scope proposals, unrated ones included.
    pub cohort_mean: f64,
}

impl ProposalRatings {
    /// Sum of the mean ratings of a user's in-scope proposals.
    pub fn rating_mass(&self, user: &UserId) -> f64 {
        self.proposals
            .values()
            .filter(|p| &p.author == user)
            .map(|p| p.mean_rating)
            .sum()
    }

    /// Rating mass of every author at once.
    pub fn rating_mass_by_author(&self) -> BTreeMap<UserId, f64> {
        let mut mass: BTreeMap<UserId, f64> = BTreeMap::new();
        for p in self.proposals.values() {
            *mass.entry(p.author.clone()).or_default() += p.mean_rating;
        }
        mass
    }
}

/// Per-user counts restricted to one scope.
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct ScopedCounts {
    pub counts: BTreeMap<UserId, CountVector>,
    pub proposal_ratings: ProposalRatings,
    /// In-scope reactions whose tag is outside the counted enumeration.
    pub unknown_reaction_types: u64,
}

impl ScopedCounts {
    pub fn get(&self, user: &UserId) -> Option<&CountVector> {
        self.counts.get(user)
    }

    /// Users with at least one non-zero counter.
    pub fn active_users(&self) -> impl Iterator<Item = &UserId> {
        self.counts
            .iter()
            .filter(|(_, v)| !v.is_zero())
            .map(|(u, _)| u)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ces_types::ReactionType;

    #[test]
    fn increment_and_total() {
        let mut v = CountVector::zero();
        assert!(v.is_zero());
        v.increment(CountField::CommentsCreated);
        v.increment(CountField::CommentsCreated);
        v.increment(CountField::ReactionsReceived(ReactionType::Clap));
        assert_eq!(v.get(CountField::CommentsCreated), 2);
        assert_eq!(v.total(), 3);
        assert!(!v.is_zero());
    }

    #[test]
    fn serializes_as_named_map() {
        let mut v = CountVector::zero();
        v.set(CountField::RatingsReceived, 4);
        let json = serde_json::to_value(v).unwrap();
        assert_eq!(json["ratings_received"], 4);
        assert_eq!(json["sad_reactions_created"], 0);
        assert_eq!(json.as_object().unwrap().len(), CountField::COUNT);
    }

    #[test]
    fn rating_mass_sums_author_means() {
        let mut ratings = ProposalRatings::default();
        for (id, author, mean) in [("p1", "a", 4.0), ("p2", "a", 2.0), ("p3", "b", 3.0)] {
            ratings.proposals.insert(
                ProposalId::new(id),
                ProposalRating {
                    author: UserId::new(author),
                    mean_rating: mean,
                    num_ratings: 1,
                },
            );
        }
        assert_eq!(ratings.rating_mass(&UserId::new("a")), 6.0);
        let by_author = ratings.rating_mass_by_author();
        assert_eq!(by_author[&UserId::new("b")], 3.0);
        assert_eq!(ratings.rating_mass(&UserId::new("z")), 0.0);
    }
}
