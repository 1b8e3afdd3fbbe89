//! Ingredient node operations

use super::{affected, column, fetch_all, fetch_one};
use crate::error::{CucinaError, Result};
use crate::schema::Ingredient;
use neo4rs::{query, Graph, Row};
use uuid::Uuid;

fn decode(row: &Row) -> Result<Ingredient> {
    Ok(Ingredient {
        id: column(row, "id")?,
        name: column(row, "name")?,
    })
}

/// Every ingredient in insertion order
pub async fn list(graph: &Graph) -> Result<Vec<Ingredient>> {
    let cypher = query(
        "MATCH (i:Ingredient)
         RETURN i.id AS id, i.name AS name
         ORDER BY i.seq",
    );
    fetch_all(graph, cypher, "ingredients", decode).await
}

pub async fn get(graph: &Graph, id: &str) -> Result<Option<Ingredient>> {
    let cypher = query("MATCH (i:Ingredient {id: $id}) RETURN i.id AS id, i.name AS name")
        .param("id", id.to_string());
    fetch_one(graph, cypher, "ingredient", decode).await
}

pub async fn find_by_name(graph: &Graph, name: &str) -> Result<Option<Ingredient>> {
    let cypher = query(
        "MATCH (i:Ingredient {name: $name})
         RETURN i.id AS id, i.name AS name
         ORDER BY i.seq
         LIMIT 1",
    )
    .param("name", name.to_string());
    fetch_one(graph, cypher, "ingredient", decode).await
}

/// Create an ingredient node with a fresh id
pub async fn create(graph: &Graph, name: &str) -> Result<Ingredient> {
    let ingredient = Ingredient::new(Uuid::new_v4().to_string(), name);

    let cypher = query(
        "MERGE (c:Counter {name: 'ingredient'})
         ON CREATE SET c.value = 0
         SET c.value = c.value + 1
         CREATE (i:Ingredient {id: $id, name: $name, seq: c.value})",
    )
    .param("id", ingredient.id.clone())
    .param("name", ingredient.name.clone());

    graph
        .run(cypher)
        .await
        .map_err(|e| CucinaError::Store(format!("Failed to create ingredient: {}", e)))?;

    Ok(ingredient)
}

pub async fn rename(graph: &Graph, id: &str, name: &str) -> Result<bool> {
    let cypher = query(
        "MATCH (i:Ingredient {id: $id})
         SET i.name = $name
         RETURN count(i) AS affected",
    )
    .param("id", id.to_string())
    .param("name", name.to_string());
    affected(graph, cypher, "ingredient update").await
}

pub async fn delete(graph: &Graph, id: &str) -> Result<bool> {
    let cypher = query(
        "MATCH (i:Ingredient {id: $id})
         WITH i, i.id AS id
         DETACH DELETE i
         RETURN count(id) AS affected",
    )
    .param("id", id.to_string());
    affected(graph, cypher, "ingredient delete").await
}
