//! In-process primary store for tests and local runs

use crate::error::Result;
use crate::schema::{Ingredient, Recipe, RecipeDraft, User};
use crate::store::{PrimaryStore, RecipeQuery};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    ingredients: Vec<Ingredient>,
    recipes: Vec<Recipe>,
    users: Vec<User>,
}

/// Insertion-ordered store held behind a single lock
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recipes currently stored
    pub async fn recipe_count(&self) -> usize {
        self.tables.read().await.recipes.len()
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[async_trait]
impl PrimaryStore for InMemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn list_ingredients(&self) -> Result<Vec<Ingredient>> {
        Ok(self.tables.read().await.ingredients.clone())
    }

    async fn get_ingredient(&self, id: &str) -> Result<Option<Ingredient>> {
        let tables = self.tables.read().await;
        Ok(tables.ingredients.iter().find(|i| i.id == id).cloned())
    }

    async fn find_ingredient_by_name(&self, name: &str) -> Result<Option<Ingredient>> {
        let tables = self.tables.read().await;
        Ok(tables.ingredients.iter().find(|i| i.name == name).cloned())
    }

    async fn insert_ingredient(&self, name: &str) -> Result<Ingredient> {
        let ingredient = Ingredient::new(new_id(), name);
        self.tables.write().await.ingredients.push(ingredient.clone());
        debug!("Inserted ingredient {}", ingredient.id);
        Ok(ingredient)
    }

    async fn rename_ingredient(&self, id: &str, name: &str) -> Result<bool> {
        let mut tables = self.tables.write().await;
        match tables.ingredients.iter_mut().find(|i| i.id == id) {
            Some(ingredient) => {
                ingredient.name = name.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_ingredient(&self, id: &str) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.ingredients.len();
        tables.ingredients.retain(|i| i.id != id);
        Ok(tables.ingredients.len() != before)
    }

    async fn list_recipes(&self) -> Result<Vec<Recipe>> {
        Ok(self.tables.read().await.recipes.clone())
    }

    async fn get_recipe(&self, id: &str) -> Result<Option<Recipe>> {
        let tables = self.tables.read().await;
        Ok(tables.recipes.iter().find(|r| r.id == id).cloned())
    }

    async fn find_recipe_by_name(&self, name: &str) -> Result<Option<Recipe>> {
        let tables = self.tables.read().await;
        Ok(tables.recipes.iter().find(|r| r.name == name).cloned())
    }

    async fn find_recipes(&self, query: &RecipeQuery) -> Result<Vec<Recipe>> {
        let tables = self.tables.read().await;
        Ok(tables
            .recipes
            .iter()
            .filter(|recipe| query.matches(recipe))
            .cloned()
            .collect())
    }

    async fn insert_recipe(&self, draft: &RecipeDraft) -> Result<Recipe> {
        let recipe = Recipe::from_draft(new_id(), draft.clone());
        self.tables.write().await.recipes.push(recipe.clone());
        debug!("Inserted recipe {}", recipe.id);
        Ok(recipe)
    }

    async fn update_recipe(&self, id: &str, draft: &RecipeDraft) -> Result<bool> {
        let mut tables = self.tables.write().await;
        match tables.recipes.iter_mut().find(|r| r.id == id) {
            Some(recipe) => {
                let premium = recipe.premium;
                *recipe = Recipe::from_draft(id, draft.clone());
                recipe.premium = premium;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_recipe(&self, id: &str) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.recipes.len();
        tables.recipes.retain(|r| r.id != id);
        Ok(tables.recipes.len() != before)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.tables.read().await.users.clone())
    }

    async fn get_user(&self, email: &str) -> Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, user: &User) -> Result<()> {
        self.tables.write().await.users.push(user.clone());
        Ok(())
    }

    async fn delete_user(&self, email: &str) -> Result<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.users.len();
        tables.users.retain(|u| u.email != email);
        Ok(tables.users.len() != before)
    }

    async fn set_user_ingredients(&self, email: &str, ingredients: &[String]) -> Result<bool> {
        let mut tables = self.tables.write().await;
        match tables.users.iter_mut().find(|u| u.email == email) {
            Some(user) => {
                user.ingredients = ingredients.to_vec();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_liked_recipes(&self, email: &str, recipe_ids: &[String]) -> Result<bool> {
        let mut tables = self.tables.write().await;
        match tables.users.iter_mut().find(|u| u.email == email) {
            Some(user) => {
                user.liked_recipes = recipe_ids.to_vec();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_premium(&self, email: &str, premium: bool) -> Result<bool> {
        let mut tables = self.tables.write().await;
        match tables.users.iter_mut().find(|u| u.email == email) {
            Some(user) => {
                user.premium = premium;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
