//! Multi-criteria recipe filter requests
//!
//! A [`RecipeCriteria`] is what a caller sends; [`NormalizedCriteria`] is the
//! single canonical form that both the cache key and the store query are
//! derived from, so two requests that normalize alike share one cache entry.

use crate::error::{CucinaError, Result};
use crate::schema::types::{Cuisine, Restriction};
use crate::scoring::{ingredient_tokens, parse_exclusions};
use std::collections::BTreeSet;

/// Raw multi-criteria filter request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeCriteria {
    /// Restriction tags to exclude; each entry may be comma-separated
    pub excluded_restrictions: Vec<String>,
    /// Comma-separated pantry ingredient names
    pub ingredients: String,
    /// Integer category code, empty for any
    pub type_of: String,
    /// Cuisine name, empty for any
    pub cuisine: String,
    /// Whether the caller is entitled to premium recipes
    pub premium: bool,
}

impl RecipeCriteria {
    /// Create criteria for an ingredient query
    pub fn new(ingredients: impl Into<String>) -> Self {
        Self {
            ingredients: ingredients.into(),
            ..Default::default()
        }
    }

    pub fn exclude(mut self, restriction: impl Into<String>) -> Self {
        self.excluded_restrictions.push(restriction.into());
        self
    }

    pub fn type_of(mut self, type_of: impl Into<String>) -> Self {
        self.type_of = type_of.into();
        self
    }

    pub fn cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = cuisine.into();
        self
    }

    pub fn premium(mut self, premium: bool) -> Self {
        self.premium = premium;
        self
    }

    /// Reduce the request to its canonical form
    ///
    /// # Errors
    /// * `Validation` when `type_of` is not an integer or `cuisine` is not one
    ///   of the known cuisines
    pub fn normalize(&self) -> Result<NormalizedCriteria> {
        let type_of = match self.type_of.trim() {
            "" => None,
            raw => Some(raw.parse::<i64>().map_err(|_| {
                CucinaError::Validation(format!("type_of '{}' is not an integer", raw))
            })?),
        };

        let cuisine = match self.cuisine.trim() {
            "" => None,
            raw => Some(Cuisine::from_str(raw).ok_or_else(|| {
                CucinaError::Validation(format!("cuisine '{}' is not valid", raw))
            })?),
        };

        Ok(NormalizedCriteria {
            excluded: parse_exclusions(&self.excluded_restrictions),
            ingredients: ingredient_tokens(&self.ingredients),
            type_of,
            cuisine,
            premium: self.premium,
        })
    }
}

/// Canonical multi-criteria request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedCriteria {
    pub excluded: BTreeSet<Restriction>,
    /// Distinct, trimmed, lower-cased ingredient tokens in query order
    pub ingredients: Vec<String>,
    pub type_of: Option<i64>,
    pub cuisine: Option<Cuisine>,
    pub premium: bool,
}

impl NormalizedCriteria {
    /// Ingredient tokens in sorted order, independent of how they were typed
    pub fn sorted_ingredients(&self) -> Vec<String> {
        let mut sorted = self.ingredients.clone();
        sorted.sort();
        sorted
    }

    /// True when the request carries no ingredient query
    pub fn has_no_ingredients(&self) -> bool {
        self.ingredients.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_full_request() {
        let criteria = RecipeCriteria::new(" Ovo, leite ")
            .exclude("vegano,gluten")
            .type_of(" 2 ")
            .cuisine("Brasileira")
            .premium(true);

        let normalized = criteria.normalize().unwrap();
        assert_eq!(normalized.ingredients, vec!["ovo", "leite"]);
        assert_eq!(normalized.sorted_ingredients(), vec!["leite", "ovo"]);
        assert_eq!(normalized.type_of, Some(2));
        assert_eq!(normalized.cuisine, Some(Cuisine::Brazilian));
        assert!(normalized.excluded.contains(&Restriction::Vegan));
        assert!(normalized.excluded.contains(&Restriction::Gluten));
        assert!(normalized.premium);
    }

    #[test]
    fn test_normalize_empty_fields_mean_any() {
        let normalized = RecipeCriteria::default().normalize().unwrap();
        assert!(normalized.has_no_ingredients());
        assert_eq!(normalized.type_of, None);
        assert_eq!(normalized.cuisine, None);
        assert!(normalized.excluded.is_empty());
    }

    #[test]
    fn test_normalize_rejects_bad_type_and_cuisine() {
        let err = RecipeCriteria::new("ovo").type_of("sobremesa").normalize().unwrap_err();
        assert!(matches!(err, CucinaError::Validation(_)));

        let err = RecipeCriteria::new("ovo").cuisine("mexicana").normalize().unwrap_err();
        assert!(matches!(err, CucinaError::Validation(_)));
    }

    #[test]
    fn test_unknown_exclusions_are_ignored() {
        let normalized = RecipeCriteria::new("ovo").exclude("kosher").normalize().unwrap();
        assert!(normalized.excluded.is_empty());
    }
}
