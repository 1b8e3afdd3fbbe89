//! User node operations

use super::{affected, column, fetch_all, fetch_one};
use crate::error::{CucinaError, Result};
use crate::schema::{Restriction, User};
use neo4rs::{query, Graph, Row};

const PROJECTION: &str = "RETURN u.name AS name, u.email AS email, u.password AS password,
        u.ingredients AS ingredients, u.restriction AS restriction,
        u.liked_recipes AS liked_recipes, u.premium AS premium";

/// List-valued user property that can be replaced wholesale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListField {
    Pantry,
    LikedRecipes,
}

impl ListField {
    fn property(&self) -> &'static str {
        match self {
            ListField::Pantry => "ingredients",
            ListField::LikedRecipes => "liked_recipes",
        }
    }
}

fn decode(row: &Row) -> Result<User> {
    let restriction_strs: Vec<String> = column(row, "restriction")?;
    // Unknown tags on a user are dropped rather than failing the read
    let restriction = restriction_strs
        .iter()
        .filter_map(|tag| Restriction::from_str(tag))
        .collect();

    Ok(User {
        name: column(row, "name")?,
        email: column(row, "email")?,
        password: column(row, "password")?,
        ingredients: column(row, "ingredients")?,
        restriction,
        liked_recipes: column(row, "liked_recipes")?,
        premium: column(row, "premium")?,
    })
}

pub async fn list(graph: &Graph) -> Result<Vec<User>> {
    let cypher = query(&format!("MATCH (u:User) {} ORDER BY u.seq", PROJECTION));
    fetch_all(graph, cypher, "users", decode).await
}

pub async fn get(graph: &Graph, email: &str) -> Result<Option<User>> {
    let cypher = query(&format!("MATCH (u:User {{email: $email}}) {}", PROJECTION))
        .param("email", email.to_string());
    fetch_one(graph, cypher, "user", decode).await
}

pub async fn create(graph: &Graph, user: &User) -> Result<()> {
    let cypher = query(
        "MERGE (c:Counter {name: 'user'})
         ON CREATE SET c.value = 0
         SET c.value = c.value + 1
         CREATE (u:User {
            seq: c.value,
            name: $name,
            email: $email,
            password: $password,
            ingredients: $ingredients,
            restriction: $restriction,
            liked_recipes: $liked_recipes,
            premium: $premium
         })",
    )
    .param("name", user.name.clone())
    .param("email", user.email.clone())
    .param("password", user.password.clone())
    .param("ingredients", user.ingredients.clone())
    .param(
        "restriction",
        user.restriction
            .iter()
            .map(|r| r.as_str().to_string())
            .collect::<Vec<String>>(),
    )
    .param("liked_recipes", user.liked_recipes.clone())
    .param("premium", user.premium);

    graph
        .run(cypher)
        .await
        .map_err(|e| CucinaError::Store(format!("Failed to create user: {}", e)))?;

    Ok(())
}

pub async fn delete(graph: &Graph, email: &str) -> Result<bool> {
    let cypher = query(
        "MATCH (u:User {email: $email})
         WITH u, u.email AS email
         DETACH DELETE u
         RETURN count(email) AS affected",
    )
    .param("email", email.to_string());
    affected(graph, cypher, "user delete").await
}

pub async fn set_list(graph: &Graph, email: &str, field: ListField, values: &[String]) -> Result<bool> {
    let cypher = query(&format!(
        "MATCH (u:User {{email: $email}})
         SET u.{} = $values
         RETURN count(u) AS affected",
        field.property()
    ))
    .param("email", email.to_string())
    .param("values", values.to_vec());
    affected(graph, cypher, "user update").await
}

pub async fn set_premium(graph: &Graph, email: &str, premium: bool) -> Result<bool> {
    let cypher = query(
        "MATCH (u:User {email: $email})
         SET u.premium = $premium
         RETURN count(u) AS affected",
    )
    .param("email", email.to_string())
    .param("premium", premium);
    affected(graph, cypher, "user update").await
}
