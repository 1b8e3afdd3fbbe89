//! Write path: store mutation followed by invalidation
//!
//! The store write always happens first. If it succeeds and invalidation then
//! fails, the write stays applied and the caller gets a `Cache` error.

use super::read::{parse_email, parse_id};
use super::RecipeService;
use crate::cache::Mutation;
use crate::error::{CucinaError, Result};
use crate::schema::{Ingredient, Recipe, RecipeDraft, User};
use tracing::info;

fn required(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CucinaError::Validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Trim the name and split comma-joined ingredient entries
fn normalize_draft(draft: &RecipeDraft) -> Result<RecipeDraft> {
    let mut normalized = draft.clone();
    normalized.name = required(&draft.name, "recipe name")?;
    normalized.ingredients = draft.ingredient_names();
    Ok(normalized)
}

impl RecipeService {
    /// Create an ingredient, or return the existing one with the same name
    pub async fn create_ingredient(&self, name: &str) -> Result<Ingredient> {
        let name = required(name, "ingredient name")?;

        let ingredient = match self.store.find_ingredient_by_name(&name).await? {
            Some(existing) => existing,
            None => self.store.insert_ingredient(&name).await?,
        };

        self.invalidate(Mutation::IngredientCreated).await?;
        Ok(ingredient)
    }

    pub async fn update_ingredient(&self, id: &str, name: &str) -> Result<Ingredient> {
        let id = parse_id(id)?;
        let name = required(name, "ingredient name")?;

        if let Some(other) = self.store.find_ingredient_by_name(&name).await? {
            if other.id != id {
                return Err(CucinaError::Conflict(format!(
                    "ingredient '{}' already exists",
                    name
                )));
            }
        }

        if !self.store.rename_ingredient(&id, &name).await? {
            return Err(CucinaError::NotFound(format!("ingredient {}", id)));
        }

        self.invalidate(Mutation::IngredientUpdated { id: id.clone() })
            .await?;
        Ok(Ingredient::new(id, name))
    }

    pub async fn delete_ingredient(&self, id: &str) -> Result<()> {
        let id = parse_id(id)?;

        if !self.store.delete_ingredient(&id).await? {
            return Err(CucinaError::NotFound(format!("ingredient {}", id)));
        }

        self.invalidate(Mutation::IngredientDeleted { id }).await?;
        Ok(())
    }

    /// Create a recipe
    ///
    /// # Errors
    /// * `Conflict` when a recipe with the same name exists
    /// * `Validation` when an ingredient is not a known ingredient
    pub async fn create_recipe(&self, draft: &RecipeDraft) -> Result<Recipe> {
        let draft = normalize_draft(draft)?;

        if self.store.find_recipe_by_name(&draft.name).await?.is_some() {
            return Err(CucinaError::Conflict(format!(
                "recipe '{}' already exists",
                draft.name
            )));
        }

        for name in &draft.ingredients {
            if self.store.find_ingredient_by_name(name).await?.is_none() {
                return Err(CucinaError::Validation(format!(
                    "ingredient '{}' does not exist",
                    name
                )));
            }
        }

        let recipe = self.store.insert_recipe(&draft).await?;
        info!("Created recipe {} ({})", recipe.id, recipe.name);

        self.invalidate(Mutation::RecipeCreated).await?;
        Ok(recipe)
    }

    /// Replace a recipe's fields
    ///
    /// The premium flag is not part of an update: `draft.premium` is ignored
    /// and the stored entitlement is kept. Returns the record as stored.
    ///
    /// # Errors
    /// * `Conflict` when another recipe already has the new name
    /// * `NotFound` when no recipe has `id`
    pub async fn update_recipe(&self, id: &str, draft: &RecipeDraft) -> Result<Recipe> {
        let id = parse_id(id)?;
        let draft = normalize_draft(draft)?;

        if let Some(other) = self.store.find_recipe_by_name(&draft.name).await? {
            if other.id != id {
                return Err(CucinaError::Conflict(format!(
                    "recipe '{}' already exists",
                    draft.name
                )));
            }
        }

        if !self.store.update_recipe(&id, &draft).await? {
            return Err(CucinaError::NotFound(format!("recipe {}", id)));
        }

        self.invalidate(Mutation::RecipeUpdated { id: id.clone() })
            .await?;

        self.store
            .get_recipe(&id)
            .await?
            .ok_or_else(|| CucinaError::NotFound(format!("recipe {}", id)))
    }

    pub async fn delete_recipe(&self, id: &str) -> Result<()> {
        let id = parse_id(id)?;

        if !self.store.delete_recipe(&id).await? {
            return Err(CucinaError::NotFound(format!("recipe {}", id)));
        }

        self.invalidate(Mutation::RecipeDeleted { id }).await?;
        Ok(())
    }

    /// Store a new user; `user.password` must already be hashed
    pub async fn register_user(&self, user: User) -> Result<User> {
        let mut user = user;
        user.email = parse_email(&user.email)?;
        user.name = required(&user.name, "name")?;

        if self.store.get_user(&user.email).await?.is_some() {
            return Err(CucinaError::Conflict(format!(
                "user {} already exists",
                user.email
            )));
        }

        self.store.insert_user(&user).await?;
        info!("Registered user {}", user.email);

        self.invalidate(Mutation::UserRegistered).await?;
        Ok(user)
    }

    pub async fn delete_user(&self, email: &str) -> Result<()> {
        let email = parse_email(email)?;

        if !self.store.delete_user(&email).await? {
            return Err(CucinaError::NotFound(format!("user {}", email)));
        }

        self.invalidate(Mutation::UserDeleted { email }).await?;
        Ok(())
    }

    /// Read a user straight from the store for a read-modify-write
    async fn load_user(&self, email: &str) -> Result<User> {
        self.store
            .get_user(email)
            .await?
            .ok_or_else(|| CucinaError::NotFound(format!("user {}", email)))
    }

    /// Add an ingredient to the user's pantry
    ///
    /// Duplicates are detected ignoring case.
    pub async fn add_pantry_ingredient(&self, email: &str, ingredient: &str) -> Result<User> {
        let email = parse_email(email)?;
        let ingredient = required(ingredient, "ingredient")?;
        let mut user = self.load_user(&email).await?;

        if user.has_pantry_ingredient(&ingredient) {
            return Err(CucinaError::Conflict(format!(
                "ingredient '{}' is already in the pantry",
                ingredient
            )));
        }

        user.ingredients.push(ingredient);
        self.write_pantry(&email, &user.ingredients).await?;
        Ok(user)
    }

    /// Remove an ingredient from the pantry by exact name
    pub async fn remove_pantry_ingredient(&self, email: &str, ingredient: &str) -> Result<User> {
        let email = parse_email(email)?;
        let mut user = self.load_user(&email).await?;

        user.ingredients.retain(|owned| owned != ingredient);
        self.write_pantry(&email, &user.ingredients).await?;
        Ok(user)
    }

    pub async fn clear_pantry(&self, email: &str) -> Result<User> {
        let email = parse_email(email)?;
        let mut user = self.load_user(&email).await?;

        user.ingredients.clear();
        self.write_pantry(&email, &user.ingredients).await?;
        Ok(user)
    }

    async fn write_pantry(&self, email: &str, ingredients: &[String]) -> Result<()> {
        if !self.store.set_user_ingredients(email, ingredients).await? {
            return Err(CucinaError::NotFound(format!("user {}", email)));
        }
        self.invalidate(Mutation::PantryChanged {
            email: email.to_string(),
        })
        .await?;
        Ok(())
    }

    pub async fn like_recipe(&self, email: &str, recipe_id: &str) -> Result<User> {
        let email = parse_email(email)?;
        let recipe_id = parse_id(recipe_id)?;
        let mut user = self.load_user(&email).await?;

        if user.liked_recipes.contains(&recipe_id) {
            return Err(CucinaError::Conflict(format!(
                "recipe {} is already liked",
                recipe_id
            )));
        }

        user.liked_recipes.push(recipe_id);
        self.write_likes(&email, &user.liked_recipes).await?;
        Ok(user)
    }

    /// Remove a like; unliking a recipe that was not liked is a no-op write
    pub async fn unlike_recipe(&self, email: &str, recipe_id: &str) -> Result<User> {
        let email = parse_email(email)?;
        let recipe_id = parse_id(recipe_id)?;
        let mut user = self.load_user(&email).await?;

        user.liked_recipes.retain(|liked| liked != &recipe_id);
        self.write_likes(&email, &user.liked_recipes).await?;
        Ok(user)
    }

    async fn write_likes(&self, email: &str, liked: &[String]) -> Result<()> {
        if !self.store.set_liked_recipes(email, liked).await? {
            return Err(CucinaError::NotFound(format!("user {}", email)));
        }
        self.invalidate(Mutation::LikeChanged {
            email: email.to_string(),
        })
        .await?;
        Ok(())
    }

    pub async fn upgrade_to_premium(&self, email: &str) -> Result<User> {
        let email = parse_email(email)?;

        if !self.store.set_premium(&email, true).await? {
            return Err(CucinaError::NotFound(format!("user {}", email)));
        }

        self.invalidate(Mutation::PremiumUpgraded {
            email: email.clone(),
        })
        .await?;
        self.load_user(&email).await
    }
}
