//! Neo4j-backed primary store
//!
//! Ingredients, recipes and users are labelled nodes. List-valued fields are
//! list properties. Each node carries a `seq` drawn from a per-label counter
//! node so lists come back in insertion order.

pub mod ingredient;
pub mod recipe;
pub mod user;

use crate::connection::Neo4jClient;
use crate::error::{CucinaError, Result};
use crate::schema::{Ingredient, Recipe, RecipeDraft, User};
use crate::store::{PrimaryStore, RecipeQuery};
use async_trait::async_trait;
use neo4rs::{query, Graph, Row};
use serde::de::DeserializeOwned;
use tracing::info;

const CONSTRAINTS: [&str; 6] = [
    "CREATE CONSTRAINT ingredient_id IF NOT EXISTS FOR (i:Ingredient) REQUIRE i.id IS UNIQUE",
    "CREATE CONSTRAINT ingredient_name IF NOT EXISTS FOR (i:Ingredient) REQUIRE i.name IS UNIQUE",
    "CREATE CONSTRAINT recipe_id IF NOT EXISTS FOR (r:Recipe) REQUIRE r.id IS UNIQUE",
    "CREATE CONSTRAINT recipe_name IF NOT EXISTS FOR (r:Recipe) REQUIRE r.name IS UNIQUE",
    "CREATE CONSTRAINT user_email IF NOT EXISTS FOR (u:User) REQUIRE u.email IS UNIQUE",
    "CREATE CONSTRAINT counter_name IF NOT EXISTS FOR (c:Counter) REQUIRE c.name IS UNIQUE",
];

/// Primary store over a pooled Neo4j connection
#[derive(Clone)]
pub struct Neo4jStore {
    client: Neo4jClient,
}

impl Neo4jStore {
    pub fn new(client: Neo4jClient) -> Self {
        Self { client }
    }

    /// Create uniqueness constraints; safe to run on every start
    pub async fn ensure_constraints(&self) -> Result<()> {
        for statement in CONSTRAINTS {
            self.graph().run(query(statement)).await.map_err(|e| {
                CucinaError::Store(format!("Failed to create constraint: {}", e))
            })?;
        }
        info!("Neo4j constraints in place");
        Ok(())
    }

    fn graph(&self) -> &Graph {
        self.client.graph()
    }
}

/// Extract a projected column, naming it in the error
pub(crate) fn column<T: DeserializeOwned>(row: &Row, name: &str) -> Result<T> {
    let value: T = row
        .get(name)
        .map_err(|e| CucinaError::Store(format!("Failed to extract {}: {}", name, e)))?;
    Ok(value)
}

/// Collect every row of a query through `decode`
pub(crate) async fn fetch_all<T, F>(graph: &Graph, cypher: neo4rs::Query, what: &str, decode: F) -> Result<Vec<T>>
where
    F: Fn(&Row) -> Result<T>,
{
    let mut result = graph
        .execute(cypher)
        .await
        .map_err(|e| CucinaError::Store(format!("Failed to query {}: {}", what, e)))?;

    let mut items = Vec::new();
    while let Some(row) = result
        .next()
        .await
        .map_err(|e| CucinaError::Store(format!("Failed to read {} row: {}", what, e)))?
    {
        items.push(decode(&row)?);
    }
    Ok(items)
}

/// First row of a query through `decode`, if any
pub(crate) async fn fetch_one<T, F>(graph: &Graph, cypher: neo4rs::Query, what: &str, decode: F) -> Result<Option<T>>
where
    F: Fn(&Row) -> Result<T>,
{
    let mut result = graph
        .execute(cypher)
        .await
        .map_err(|e| CucinaError::Store(format!("Failed to query {}: {}", what, e)))?;

    match result
        .next()
        .await
        .map_err(|e| CucinaError::Store(format!("Failed to read {} row: {}", what, e)))?
    {
        Some(row) => Ok(Some(decode(&row)?)),
        None => Ok(None),
    }
}

/// Run a statement that returns `count(*) AS affected` and report whether
/// anything matched
pub(crate) async fn affected(graph: &Graph, cypher: neo4rs::Query, what: &str) -> Result<bool> {
    let count = fetch_one(graph, cypher, what, |row| column::<i64>(row, "affected")).await?;
    Ok(count.unwrap_or(0) > 0)
}

#[async_trait]
impl PrimaryStore for Neo4jStore {
    fn backend(&self) -> &'static str {
        "neo4j"
    }

    async fn ping(&self) -> Result<()> {
        self.client.ping().await.map(|_| ())
    }

    async fn list_ingredients(&self) -> Result<Vec<Ingredient>> {
        ingredient::list(self.graph()).await
    }

    async fn get_ingredient(&self, id: &str) -> Result<Option<Ingredient>> {
        ingredient::get(self.graph(), id).await
    }

    async fn find_ingredient_by_name(&self, name: &str) -> Result<Option<Ingredient>> {
        ingredient::find_by_name(self.graph(), name).await
    }

    async fn insert_ingredient(&self, name: &str) -> Result<Ingredient> {
        ingredient::create(self.graph(), name).await
    }

    async fn rename_ingredient(&self, id: &str, name: &str) -> Result<bool> {
        ingredient::rename(self.graph(), id, name).await
    }

    async fn delete_ingredient(&self, id: &str) -> Result<bool> {
        ingredient::delete(self.graph(), id).await
    }

    async fn list_recipes(&self) -> Result<Vec<Recipe>> {
        recipe::find(self.graph(), &RecipeQuery::default()).await
    }

    async fn get_recipe(&self, id: &str) -> Result<Option<Recipe>> {
        recipe::get(self.graph(), id).await
    }

    async fn find_recipe_by_name(&self, name: &str) -> Result<Option<Recipe>> {
        recipe::find_by_name(self.graph(), name).await
    }

    async fn find_recipes(&self, query: &RecipeQuery) -> Result<Vec<Recipe>> {
        recipe::find(self.graph(), query).await
    }

    async fn insert_recipe(&self, draft: &RecipeDraft) -> Result<Recipe> {
        recipe::create(self.graph(), draft).await
    }

    async fn update_recipe(&self, id: &str, draft: &RecipeDraft) -> Result<bool> {
        recipe::update(self.graph(), id, draft).await
    }

    async fn delete_recipe(&self, id: &str) -> Result<bool> {
        recipe::delete(self.graph(), id).await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        user::list(self.graph()).await
    }

    async fn get_user(&self, email: &str) -> Result<Option<User>> {
        user::get(self.graph(), email).await
    }

    async fn insert_user(&self, user: &User) -> Result<()> {
        user::create(self.graph(), user).await
    }

    async fn delete_user(&self, email: &str) -> Result<bool> {
        user::delete(self.graph(), email).await
    }

    async fn set_user_ingredients(&self, email: &str, ingredients: &[String]) -> Result<bool> {
        user::set_list(self.graph(), email, user::ListField::Pantry, ingredients).await
    }

    async fn set_liked_recipes(&self, email: &str, recipe_ids: &[String]) -> Result<bool> {
        user::set_list(self.graph(), email, user::ListField::LikedRecipes, recipe_ids).await
    }

    async fn set_premium(&self, email: &str, premium: bool) -> Result<bool> {
        user::set_premium(self.graph(), email, premium).await
    }
}
