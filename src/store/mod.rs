//! Primary store adapters
//!
//! The store is the source of truth. Adapters are thin: they read and write
//! records and report "not found" as `None`/`false`, never as an error.
//! Business rules (uniqueness, referential checks, pantry deduplication) live
//! in the service so every adapter behaves the same.

pub mod memory;
pub mod neo4j;

use crate::error::Result;
use crate::schema::{Cuisine, Ingredient, NormalizedCriteria, Recipe, RecipeDraft, Restriction, User};
use async_trait::async_trait;
use std::collections::BTreeSet;

pub use memory::InMemoryStore;
pub use neo4j::Neo4jStore;

/// Filter for recipe lookups
///
/// Every populated field must match. `any_ingredient` matches when some recipe
/// ingredient contains some token as a case-insensitive substring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeQuery {
    pub cuisine: Option<Cuisine>,
    pub type_of: Option<i64>,
    /// Lower-cased ingredient fragments; empty matches every recipe
    pub any_ingredient: Vec<String>,
    /// Recipes carrying any of these tags are left out
    pub excluded: BTreeSet<Restriction>,
}

impl RecipeQuery {
    pub fn by_cuisine(cuisine: Cuisine) -> Self {
        Self {
            cuisine: Some(cuisine),
            ..Default::default()
        }
    }

    pub fn by_type(type_of: i64) -> Self {
        Self {
            type_of: Some(type_of),
            ..Default::default()
        }
    }

    pub fn by_ingredient(fragment: &str) -> Self {
        Self {
            any_ingredient: vec![fragment.trim().to_lowercase()],
            ..Default::default()
        }
    }

    pub fn from_criteria(criteria: &NormalizedCriteria) -> Self {
        Self {
            cuisine: criteria.cuisine,
            type_of: criteria.type_of,
            any_ingredient: criteria.ingredients.clone(),
            excluded: criteria.excluded.clone(),
        }
    }

    /// Evaluate the filter against one recipe
    pub fn matches(&self, recipe: &Recipe) -> bool {
        if let Some(cuisine) = self.cuisine {
            if recipe.cuisine != cuisine {
                return false;
            }
        }
        if let Some(type_of) = self.type_of {
            if recipe.type_of != type_of {
                return false;
            }
        }
        if recipe.restriction.iter().any(|r| self.excluded.contains(r)) {
            return false;
        }
        if self.any_ingredient.is_empty() {
            return true;
        }
        recipe.ingredients.iter().any(|ingredient| {
            let ingredient = ingredient.to_lowercase();
            self.any_ingredient
                .iter()
                .any(|fragment| ingredient.contains(fragment.as_str()))
        })
    }
}

/// Source-of-truth storage for ingredients, recipes and users
///
/// List results come back in insertion order.
#[async_trait]
pub trait PrimaryStore: Send + Sync {
    /// Short backend name for logs and health reports
    fn backend(&self) -> &'static str;

    /// Check connectivity
    async fn ping(&self) -> Result<()>;

    async fn list_ingredients(&self) -> Result<Vec<Ingredient>>;
    async fn get_ingredient(&self, id: &str) -> Result<Option<Ingredient>>;
    /// Exact, case-sensitive name match
    async fn find_ingredient_by_name(&self, name: &str) -> Result<Option<Ingredient>>;
    /// Insert a new ingredient and return it with its assigned id
    async fn insert_ingredient(&self, name: &str) -> Result<Ingredient>;
    /// Returns `false` when no ingredient has this id
    async fn rename_ingredient(&self, id: &str, name: &str) -> Result<bool>;
    async fn delete_ingredient(&self, id: &str) -> Result<bool>;

    async fn list_recipes(&self) -> Result<Vec<Recipe>>;
    async fn get_recipe(&self, id: &str) -> Result<Option<Recipe>>;
    async fn find_recipe_by_name(&self, name: &str) -> Result<Option<Recipe>>;
    async fn find_recipes(&self, query: &RecipeQuery) -> Result<Vec<Recipe>>;
    /// Insert a new recipe and return it with its assigned id
    async fn insert_recipe(&self, draft: &RecipeDraft) -> Result<Recipe>;
    /// Replace every field except the id and the premium flag; `false` when
    /// the id is unknown
    async fn update_recipe(&self, id: &str, draft: &RecipeDraft) -> Result<bool>;
    async fn delete_recipe(&self, id: &str) -> Result<bool>;

    async fn list_users(&self) -> Result<Vec<User>>;
    async fn get_user(&self, email: &str) -> Result<Option<User>>;
    async fn insert_user(&self, user: &User) -> Result<()>;
    async fn delete_user(&self, email: &str) -> Result<bool>;
    async fn set_user_ingredients(&self, email: &str, ingredients: &[String]) -> Result<bool>;
    async fn set_liked_recipes(&self, email: &str, recipe_ids: &[String]) -> Result<bool>;
    async fn set_premium(&self, email: &str, premium: bool) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe() -> Recipe {
        Recipe::from_draft(
            "1",
            RecipeDraft::new("Bolo de Fubá", Cuisine::Brazilian)
                .with_ingredients(["Leite", "Ovo", "Fubá"])
                .with_restrictions(vec![Restriction::Vegetarian])
                .with_type_of(3),
        )
    }

    #[test]
    fn test_empty_query_matches_everything() {
        assert!(RecipeQuery::default().matches(&recipe()));
    }

    #[test]
    fn test_field_filters() {
        assert!(RecipeQuery::by_cuisine(Cuisine::Brazilian).matches(&recipe()));
        assert!(!RecipeQuery::by_cuisine(Cuisine::French).matches(&recipe()));
        assert!(RecipeQuery::by_type(3).matches(&recipe()));
        assert!(!RecipeQuery::by_type(1).matches(&recipe()));
    }

    #[test]
    fn test_ingredient_fragment_is_case_insensitive_substring() {
        assert!(RecipeQuery::by_ingredient("LEI").matches(&recipe()));
        assert!(!RecipeQuery::by_ingredient("farinha").matches(&recipe()));
    }

    #[test]
    fn test_excluded_restriction() {
        let mut query = RecipeQuery::default();
        query.excluded.insert(Restriction::Vegetarian);
        assert!(!query.matches(&recipe()));
    }
}
