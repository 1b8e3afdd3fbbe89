//! Read path: cached lookups

use super::{Payload, RecipeService};
use crate::cache::{keys, Origin};
use crate::entitlement;
use crate::error::{CucinaError, Result};
use crate::schema::{Cuisine, Ingredient, Recipe, RecipeCriteria, User};
use crate::scoring;
use crate::store::RecipeQuery;
use tracing::{debug, warn};
use uuid::Uuid;

/// Reject ids the store could never have assigned
pub(crate) fn parse_id(id: &str) -> Result<String> {
    let trimmed = id.trim();
    Uuid::parse_str(trimmed)
        .map_err(|_| CucinaError::Validation(format!("invalid id '{}'", id)))?;
    Ok(trimmed.to_string())
}

pub(crate) fn parse_email(email: &str) -> Result<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(CucinaError::Validation("email is required".to_string()));
    }
    Ok(trimmed.to_string())
}

/// Empty filtered results are NotFound so they are never cached
fn non_empty(recipes: Vec<Recipe>, what: &str) -> Result<Vec<Recipe>> {
    if recipes.is_empty() {
        return Err(CucinaError::NotFound(format!("no recipes found {}", what)));
    }
    Ok(recipes)
}

impl RecipeService {
    pub async fn list_ingredients(&self) -> Result<Payload<Vec<Ingredient>>> {
        self.cached(keys::INGREDIENTS, || self.store.list_ingredients())
            .await
    }

    pub async fn get_ingredient(&self, id: &str) -> Result<Payload<Ingredient>> {
        let id = parse_id(id)?;
        self.cached(&keys::ingredient(&id), || async {
            self.store
                .get_ingredient(&id)
                .await?
                .ok_or_else(|| CucinaError::NotFound(format!("ingredient {}", id)))
        })
        .await
    }

    pub async fn list_recipes(&self) -> Result<Payload<Vec<Recipe>>> {
        self.cached(keys::RECIPES, || self.store.list_recipes()).await
    }

    pub async fn get_recipe(&self, id: &str) -> Result<Payload<Recipe>> {
        let id = parse_id(id)?;
        self.cached(&keys::recipe(&id), || async {
            self.store
                .get_recipe(&id)
                .await?
                .ok_or_else(|| CucinaError::NotFound(format!("recipe {}", id)))
        })
        .await
    }

    /// Recipes of one cuisine
    ///
    /// The cache key is built from the canonical cuisine name, not the raw
    /// argument: `"Italiana "` and `"italiana"` share `recipes:cuisine:italiana`.
    pub async fn recipes_by_cuisine(&self, cuisine: &str) -> Result<Payload<Vec<Recipe>>> {
        let parsed = Cuisine::from_str(cuisine)
            .ok_or_else(|| CucinaError::Validation(format!("cuisine '{}' is not valid", cuisine)))?;

        self.cached(&keys::recipes_by_cuisine(parsed.as_str()), || async {
            let recipes = self.store.find_recipes(&RecipeQuery::by_cuisine(parsed)).await?;
            non_empty(recipes, &format!("for cuisine {}", parsed))
        })
        .await
    }

    /// Recipes of one type
    ///
    /// The cache key is built from the parsed integer, so `" 02"` and `"2"`
    /// share `recipes:type:2`.
    pub async fn recipes_by_type(&self, type_of: &str) -> Result<Payload<Vec<Recipe>>> {
        let parsed: i64 = type_of.trim().parse().map_err(|_| {
            CucinaError::Validation(format!("type_of '{}' is not an integer", type_of))
        })?;

        self.cached(&keys::recipes_by_type(&parsed.to_string()), || async {
            let recipes = self.store.find_recipes(&RecipeQuery::by_type(parsed)).await?;
            non_empty(recipes, &format!("for type {}", parsed))
        })
        .await
    }

    /// Recipes with an ingredient containing `ingredient`, ignoring case
    ///
    /// The cache key is built from the trimmed, lower-cased fragment, so
    /// `"OVO"` and `"ovo"` share `recipes:ingredient:ovo`.
    pub async fn recipes_by_ingredient(&self, ingredient: &str) -> Result<Payload<Vec<Recipe>>> {
        let fragment = ingredient.trim().to_lowercase();
        if fragment.is_empty() {
            return Err(CucinaError::Validation("ingredient is required".to_string()));
        }

        self.cached(&keys::recipes_by_ingredient(&fragment), || async {
            let recipes = self
                .store
                .find_recipes(&RecipeQuery::by_ingredient(&fragment))
                .await?;
            non_empty(recipes, &format!("with ingredient {}", fragment))
        })
        .await
    }

    /// Multi-criteria match with scoring and the premium gate
    ///
    /// A request with no ingredient query returns an empty list without
    /// touching the store or the cache.
    pub async fn recipes_by_criteria(&self, criteria: &RecipeCriteria) -> Result<Payload<Vec<Recipe>>> {
        let normalized = criteria.normalize()?;

        if normalized.has_no_ingredients() {
            debug!("criteria query without ingredients, returning empty result");
            return Ok(Payload::new("[]".to_string(), Origin::Store));
        }

        let key = keys::criteria(&normalized);
        self.cached(&key, || async {
            let candidates = self
                .store
                .find_recipes(&RecipeQuery::from_criteria(&normalized))
                .await?;
            let candidates = non_empty(candidates, "matching the criteria")?;

            let allowed = scoring::exclude_restricted(candidates, &normalized.excluded);
            let allowed = non_empty(allowed, "matching the criteria")?;

            let scored = scoring::score(allowed, &normalized.ingredients);
            Ok(entitlement::filter(scored, normalized.premium))
        })
        .await
    }

    pub async fn list_users(&self) -> Result<Payload<Vec<User>>> {
        self.cached(keys::USERS, || self.store.list_users()).await
    }

    pub async fn get_user(&self, email: &str) -> Result<Payload<User>> {
        let email = parse_email(email)?;
        self.cached(&keys::user(&email), || async {
            self.store
                .get_user(&email)
                .await?
                .ok_or_else(|| CucinaError::NotFound(format!("user {}", email)))
        })
        .await
    }

    /// Full records of a user's liked recipes, in like order
    ///
    /// Each recipe goes through the cached by-id path. Ids that no longer
    /// resolve, or that are not valid ids at all, are skipped.
    pub async fn liked_recipes(&self, email: &str) -> Result<Vec<Recipe>> {
        let user = self.get_user(email).await?.decode()?;

        let mut recipes = Vec::with_capacity(user.liked_recipes.len());
        for id in &user.liked_recipes {
            match self.get_recipe(id).await {
                Ok(payload) => recipes.push(payload.decode()?),
                Err(e) if e.is_not_found() || matches!(e, CucinaError::Validation(_)) => {
                    warn!(recipe = %id, error = %e, "skipping unresolvable liked recipe")
                }
                Err(e) => return Err(e),
            }
        }
        Ok(recipes)
    }
}
