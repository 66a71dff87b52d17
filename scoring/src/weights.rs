//! The per-field weight vector.

use ces_types::params::{default_weight, HIGHLY_RATED_FRACTION_NAME, MAX_WEIGHT_MAGNITUDE};
use ces_types::{CountField, ParamError};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

/// Signed weight per count field plus the rating-quality bonus fraction.
///
/// Stored densely so that two vectors with the same effective weights compare
/// and serialize identically, whether a zero weight was given or omitted.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightVector {
    weights: [f64; CountField::COUNT],
    highly_rated_fraction: f64,
}

impl WeightVector {
    /// Every weight zero, bonus off.
    pub fn zero() -> Self {
        Self {
            weights: [0.0; CountField::COUNT],
            highly_rated_fraction: 0.0,
        }
    }

    /// Build from a name → value map. Fields that are not named weigh zero.
    pub fn from_named(named: &BTreeMap<String, f64>) -> Result<Self, ParamError> {
        let mut weights = Self::zero();
        weights.apply_named(named)?;
        Ok(weights)
    }

    /// Overwrite the named entries, leaving the rest untouched.
    ///
    /// Validation happens before any entry is written, so a rejected map leaves
    /// the vector unchanged.
    pub fn apply_named(&mut self, named: &BTreeMap<String, f64>) -> Result<(), ParamError> {
        let mut updated = self.clone();
        for (name, &value) in named {
            if !value.is_finite() {
                return Err(ParamError::NonFiniteWeight {
                    field: name.clone(),
                    value,
                });
            }
            if name == HIGHLY_RATED_FRACTION_NAME {
                updated.set_highly_rated_fraction(value)?;
                continue;
            }
            let field = CountField::from_name(name)
                .ok_or_else(|| ParamError::UnknownWeight(name.clone()))?;
            updated.set(field, value)?;
        }
        *self = updated;
        Ok(())
    }

    pub fn get(&self, field: CountField) -> f64 {
        self.weights[field.index()]
    }

    pub fn set(&mut self, field: CountField, value: f64) -> Result<(), ParamError> {
        if !value.is_finite() {
            return Err(ParamError::NonFiniteWeight {
                field: field.name(),
                value,
            });
        }
        if value.abs() > MAX_WEIGHT_MAGNITUDE {
            return Err(ParamError::WeightOutOfRange {
                field: field.name(),
                value,
                max: MAX_WEIGHT_MAGNITUDE,
            });
        }
        // -0.0 and 0.0 must encode alike
        self.weights[field.index()] = if value == 0.0 { 0.0 } else { value };
        Ok(())
    }

    pub fn highly_rated_fraction(&self) -> f64 {
        self.highly_rated_fraction
    }

    pub fn set_highly_rated_fraction(&mut self, fraction: f64) -> Result<(), ParamError> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(ParamError::InvalidFraction(fraction));
        }
        self.highly_rated_fraction = if fraction == 0.0 { 0.0 } else { fraction };
        Ok(())
    }

    /// Whether every weight is non-negative.
    pub fn is_non_negative(&self) -> bool {
        self.weights.iter().all(|&w| w >= 0.0)
    }

    /// `(field, weight)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (CountField, f64)> + '_ {
        CountField::all().map(move |f| (f, self.get(f)))
    }

    /// Every weight by name, the bonus fraction included.
    pub fn to_named(&self) -> BTreeMap<String, f64> {
        let mut named: BTreeMap<String, f64> = self.iter().map(|(f, w)| (f.name(), w)).collect();
        named.insert(
            HIGHLY_RATED_FRACTION_NAME.to_string(),
            self.highly_rated_fraction,
        );
        named
    }
}

impl Default for WeightVector {
    /// The platform's suggested weights: comments and received reactions count,
    /// downvotes and negative emoji penalise.
    fn default() -> Self {
        let mut weights = Self::zero();
        for field in CountField::all() {
            weights.weights[field.index()] = default_weight(field);
        }
        weights
    }
}

impl Serialize for WeightVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(CountField::COUNT + 1))?;
        for (field, weight) in self.iter() {
            map.serialize_entry(&field.name(), &weight)?;
        }
        map.serialize_entry(HIGHLY_RATED_FRACTION_NAME, &self.highly_rated_fraction)?;
        map.end()
    }
}
