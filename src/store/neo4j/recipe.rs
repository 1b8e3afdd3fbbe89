//! Recipe node operations

use super::{affected, column, fetch_all, fetch_one};
use crate::error::{CucinaError, Result};
use crate::schema::{Cuisine, Recipe, RecipeDraft, Restriction};
use crate::store::RecipeQuery;
use neo4rs::{query, Graph, Query, Row};
use uuid::Uuid;

const PROJECTION: &str = "RETURN r.id AS id, r.name AS name, r.description AS description,
        r.cuisine AS cuisine, r.type_of AS type_of, r.image AS image,
        r.ingredients AS ingredients, r.difficulty AS difficulty,
        r.restriction AS restriction, r.premium AS premium";

fn decode(row: &Row) -> Result<Recipe> {
    let cuisine_str: String = column(row, "cuisine")?;
    let cuisine = Cuisine::from_str(&cuisine_str)
        .ok_or_else(|| CucinaError::Store(format!("Invalid stored cuisine: {}", cuisine_str)))?;

    let restriction_strs: Vec<String> = column(row, "restriction")?;
    let restriction = restriction_strs
        .iter()
        .map(|tag| {
            Restriction::from_str(tag)
                .ok_or_else(|| CucinaError::Store(format!("Invalid stored restriction: {}", tag)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Recipe {
        id: column(row, "id")?,
        name: column(row, "name")?,
        description: column(row, "description")?,
        cuisine,
        type_of: column(row, "type_of")?,
        image: column(row, "image")?,
        ingredients: column(row, "ingredients")?,
        difficulty: column(row, "difficulty")?,
        restriction,
        premium: column(row, "premium")?,
        percentage: 0.0,
    })
}

fn restriction_tags(restrictions: &[Restriction]) -> Vec<String> {
    restrictions.iter().map(|r| r.as_str().to_string()).collect()
}

/// Bind every draft field onto a query using the property names as params
fn with_draft(cypher: Query, draft: &RecipeDraft) -> Query {
    cypher
        .param("name", draft.name.clone())
        .param("description", draft.description.clone())
        .param("cuisine", draft.cuisine.as_str())
        .param("type_of", draft.type_of)
        .param("image", draft.image.clone())
        .param("ingredients", draft.ingredients.clone())
        .param("difficulty", draft.difficulty.clone())
        .param("restriction", restriction_tags(&draft.restriction))
        .param("premium", draft.premium)
}

/// Recipes matching `filter`, in insertion order
///
/// Absent filter fields are sent as sentinels (`''`, `false`, `[]`) that the
/// Cypher treats as "any".
pub async fn find(graph: &Graph, filter: &RecipeQuery) -> Result<Vec<Recipe>> {
    let cypher = query(&format!(
        "MATCH (r:Recipe)
         WHERE ($cuisine = '' OR r.cuisine = $cuisine)
           AND ($filter_type = false OR r.type_of = $type_of)
           AND NONE(tag IN r.restriction WHERE tag IN $excluded)
           AND (size($fragments) = 0 OR ANY(ing IN r.ingredients
                WHERE ANY(fragment IN $fragments WHERE toLower(ing) CONTAINS fragment)))
         {}
         ORDER BY r.seq",
        PROJECTION
    ))
    .param("cuisine", filter.cuisine.map(|c| c.as_str()).unwrap_or(""))
    .param("filter_type", filter.type_of.is_some())
    .param("type_of", filter.type_of.unwrap_or_default())
    .param(
        "excluded",
        filter
            .excluded
            .iter()
            .map(|r| r.as_str().to_string())
            .collect::<Vec<String>>(),
    )
    .param("fragments", filter.any_ingredient.clone());

    fetch_all(graph, cypher, "recipes", decode).await
}

pub async fn get(graph: &Graph, id: &str) -> Result<Option<Recipe>> {
    let cypher = query(&format!("MATCH (r:Recipe {{id: $id}}) {}", PROJECTION))
        .param("id", id.to_string());
    fetch_one(graph, cypher, "recipe", decode).await
}

pub async fn find_by_name(graph: &Graph, name: &str) -> Result<Option<Recipe>> {
    let cypher = query(&format!(
        "MATCH (r:Recipe {{name: $name}}) {} ORDER BY r.seq LIMIT 1",
        PROJECTION
    ))
    .param("name", name.to_string());
    fetch_one(graph, cypher, "recipe", decode).await
}

/// Create a recipe node with a fresh id
pub async fn create(graph: &Graph, draft: &RecipeDraft) -> Result<Recipe> {
    let recipe = Recipe::from_draft(Uuid::new_v4().to_string(), draft.clone());

    let cypher = query(
        "MERGE (c:Counter {name: 'recipe'})
         ON CREATE SET c.value = 0
         SET c.value = c.value + 1
         CREATE (r:Recipe {
            id: $id,
            seq: c.value,
            name: $name,
            description: $description,
            cuisine: $cuisine,
            type_of: $type_of,
            image: $image,
            ingredients: $ingredients,
            difficulty: $difficulty,
            restriction: $restriction,
            premium: $premium
         })",
    )
    .param("id", recipe.id.clone());

    graph
        .run(with_draft(cypher, draft))
        .await
        .map_err(|e| CucinaError::Store(format!("Failed to create recipe: {}", e)))?;

    Ok(recipe)
}

pub async fn update(graph: &Graph, id: &str, draft: &RecipeDraft) -> Result<bool> {
    let cypher = query(
        "MATCH (r:Recipe {id: $id})
         SET r.name = $name,
             r.description = $description,
             r.cuisine = $cuisine,
             r.type_of = $type_of,
             r.image = $image,
             r.ingredients = $ingredients,
             r.difficulty = $difficulty,
             r.restriction = $restriction
         RETURN count(r) AS affected",
    )
    .param("id", id.to_string());

    affected(graph, with_draft(cypher, draft), "recipe update").await
}

pub async fn delete(graph: &Graph, id: &str) -> Result<bool> {
    let cypher = query(
        "MATCH (r:Recipe {id: $id})
         WITH r, r.id AS id
         DETACH DELETE r
         RETURN count(id) AS affected",
    )
    .param("id", id.to_string());
    affected(graph, cypher, "recipe delete").await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restriction_tags_use_stored_names() {
        let tags = restriction_tags(&[Restriction::Vegan, Restriction::Dairy]);
        assert_eq!(tags, vec!["vegano", "laticinio"]);
    }
}
