//! Mutation-driven cache invalidation
//!
//! Every write maps to a fixed set of literal keys to delete. Aggregate
//! lookups (by cuisine, type, ingredient, multi-criteria) are not enumerated
//! here: they stay cached until capacity eviction or a cache flush removes
//! them.

use crate::cache::keys;
use crate::cache::types::CacheKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A write against the primary store that affects cached reads
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mutation {
    IngredientCreated,
    IngredientUpdated { id: String },
    IngredientDeleted { id: String },
    RecipeCreated,
    RecipeUpdated { id: String },
    RecipeDeleted { id: String },
    UserRegistered,
    UserDeleted { email: String },
    PantryChanged { email: String },
    LikeChanged { email: String },
    PremiumUpgraded { email: String },
}

impl Mutation {
    /// Keys whose cached payloads this mutation makes stale
    pub fn keys(&self) -> Vec<CacheKey> {
        match self {
            Mutation::IngredientCreated => vec![keys::INGREDIENTS.to_string()],
            Mutation::IngredientUpdated { id } | Mutation::IngredientDeleted { id } => {
                vec![keys::ingredient(id), keys::INGREDIENTS.to_string()]
            }
            Mutation::RecipeCreated => vec![keys::RECIPES.to_string()],
            Mutation::RecipeUpdated { id } => {
                vec![keys::recipe(id), keys::RECIPES.to_string()]
            }
            Mutation::RecipeDeleted { id } => {
                vec![keys::RECIPES.to_string(), keys::recipe(id)]
            }
            Mutation::UserRegistered => vec![keys::USERS.to_string()],
            Mutation::UserDeleted { email } => {
                vec![keys::USERS.to_string(), keys::user(email)]
            }
            Mutation::PantryChanged { email }
            | Mutation::LikeChanged { email }
            | Mutation::PremiumUpgraded { email } => vec![keys::user(email)],
        }
    }
}

impl std::fmt::Display for Mutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mutation::IngredientCreated => write!(f, "ingredient created"),
            Mutation::IngredientUpdated { id } => write!(f, "ingredient updated: {}", id),
            Mutation::IngredientDeleted { id } => write!(f, "ingredient deleted: {}", id),
            Mutation::RecipeCreated => write!(f, "recipe created"),
            Mutation::RecipeUpdated { id } => write!(f, "recipe updated: {}", id),
            Mutation::RecipeDeleted { id } => write!(f, "recipe deleted: {}", id),
            Mutation::UserRegistered => write!(f, "user registered"),
            Mutation::UserDeleted { email } => write!(f, "user deleted: {}", email),
            Mutation::PantryChanged { email } => write!(f, "pantry changed: {}", email),
            Mutation::LikeChanged { email } => write!(f, "likes changed: {}", email),
            Mutation::PremiumUpgraded { email } => write!(f, "premium upgrade: {}", email),
        }
    }
}

/// Record of one invalidation pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvalidationEvent {
    pub mutation: Mutation,

    /// When the keys were deleted
    pub timestamp: DateTime<Utc>,

    /// Keys that were deleted
    pub keys: Vec<CacheKey>,

    /// Keys whose delete failed
    pub failed: Vec<CacheKey>,
}

impl InvalidationEvent {
    pub fn new(mutation: Mutation) -> Self {
        Self {
            mutation,
            timestamp: Utc::now(),
            keys: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// True when every key was deleted
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
