//! Cache key construction
//!
//! Literal keys name an entity kind plus the raw parameter value
//! (`recipe:<id>`, `recipes:cuisine:<c>`). Multi-criteria keys are built from
//! the normalized request with every dimension always present, in a fixed
//! order, with reserved characters escaped, so the mapping is injective.

use crate::cache::types::CacheKey;
use crate::schema::NormalizedCriteria;

pub const INGREDIENTS: &str = "ingredients";
pub const RECIPES: &str = "recipes";
pub const USERS: &str = "users";

/// Kind of payload a key addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    Ingredient,
    Recipe,
    RecipesByCuisine,
    RecipesByType,
    RecipesByIngredient,
    RecipesByCriteria,
    User,
}

impl std::fmt::Display for KeyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyKind::Ingredient => write!(f, "ingredient"),
            KeyKind::Recipe => write!(f, "recipe"),
            KeyKind::RecipesByCuisine => write!(f, "recipes:cuisine"),
            KeyKind::RecipesByType => write!(f, "recipes:type"),
            KeyKind::RecipesByIngredient => write!(f, "recipes:ingredient"),
            KeyKind::RecipesByCriteria => write!(f, "recipes:criteria"),
            KeyKind::User => write!(f, "user"),
        }
    }
}

/// Builder for parameterised cache keys
#[derive(Debug, Clone)]
pub struct CacheKeyBuilder {
    kind: KeyKind,
    identifier: String,
    params: Vec<(String, String)>,
}

impl CacheKeyBuilder {
    pub fn new(kind: KeyKind) -> Self {
        Self {
            kind,
            identifier: String::new(),
            params: Vec::new(),
        }
    }

    /// Set the primary identifier
    pub fn identifier(mut self, id: impl Into<String>) -> Self {
        self.identifier = id.into();
        self
    }

    /// Add a parameter; the value is escaped when the key is built
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Build the cache key
    ///
    /// Parameters are emitted sorted by name so the key does not depend on the
    /// order in which they were added.
    pub fn build(self) -> CacheKey {
        let mut key = if self.identifier.is_empty() {
            self.kind.to_string()
        } else {
            format!("{}:{}", self.kind, self.identifier)
        };

        if !self.params.is_empty() {
            let mut params = self.params;
            params.sort_by(|a, b| a.0.cmp(&b.0));
            let params_str: Vec<String> = params
                .iter()
                .map(|(k, v)| format!("{}={}", k, escape(v)))
                .collect();
            key.push('?');
            key.push_str(&params_str.join("&"));
        }

        key
    }
}

/// Percent-escape the characters that delimit key parts
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '%' => out.push_str("%25"),
            '&' => out.push_str("%26"),
            ',' => out.push_str("%2C"),
            '=' => out.push_str("%3D"),
            '?' => out.push_str("%3F"),
            _ => out.push(c),
        }
    }
    out
}

fn join_escaped<I, S>(values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| escape(v.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

pub fn ingredient(id: &str) -> CacheKey {
    CacheKeyBuilder::new(KeyKind::Ingredient).identifier(id).build()
}

pub fn recipe(id: &str) -> CacheKey {
    CacheKeyBuilder::new(KeyKind::Recipe).identifier(id).build()
}

pub fn recipes_by_cuisine(cuisine: &str) -> CacheKey {
    CacheKeyBuilder::new(KeyKind::RecipesByCuisine)
        .identifier(cuisine)
        .build()
}

pub fn recipes_by_type(type_of: &str) -> CacheKey {
    CacheKeyBuilder::new(KeyKind::RecipesByType)
        .identifier(type_of)
        .build()
}

pub fn recipes_by_ingredient(ingredient: &str) -> CacheKey {
    CacheKeyBuilder::new(KeyKind::RecipesByIngredient)
        .identifier(ingredient)
        .build()
}

pub fn user(email: &str) -> CacheKey {
    CacheKeyBuilder::new(KeyKind::User).identifier(email).build()
}

/// Key for a multi-criteria request
///
/// Every dimension is always emitted (empty meaning "any"), ingredient tokens
/// and exclusions are sorted, and separators inside values are escaped before
/// joining.
pub fn criteria(criteria: &NormalizedCriteria) -> CacheKey {
    let excluded = join_escaped(criteria.excluded.iter().map(|r| r.as_str()));
    let ingredients = {
        let mut sorted = criteria.sorted_ingredients();
        sorted.dedup();
        join_escaped(sorted)
    };

    CacheKeyBuilder::new(KeyKind::RecipesByCriteria)
        .param(
            "cuisine",
            criteria.cuisine.map(|c| c.as_str()).unwrap_or_default(),
        )
        .param("excluded", excluded)
        .param("ingredients", ingredients)
        .param("premium", criteria.premium.to_string())
        .param(
            "type",
            criteria.type_of.map(|t| t.to_string()).unwrap_or_default(),
        )
        .build()
}
