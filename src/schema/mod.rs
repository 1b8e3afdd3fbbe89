//! Recipe domain schema
//!
//! This module defines the records served by the query layer (recipes,
//! ingredients, users), their closed enums, and the multi-criteria filter
//! request together with its canonical form.

pub mod criteria;
pub mod types;

pub use criteria::{NormalizedCriteria, RecipeCriteria};
pub use types::{Cuisine, Ingredient, Recipe, RecipeDraft, Restriction, User};
