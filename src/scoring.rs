//! Pantry scoring for multi-criteria recipe queries
//!
//! Scoring annotates each candidate with the share of its ingredients that
//! appear in the queried pantry. It never reorders: results keep the order the
//! store returned them in.

use crate::schema::{Recipe, Restriction};
use std::collections::BTreeSet;

/// Split a comma-separated ingredient query into distinct match tokens
///
/// Tokens are trimmed and lower-cased; empty tokens are dropped and repeats
/// keep their first position.
pub fn ingredient_tokens(query: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for raw in query.split(',') {
        let token = raw.trim().to_lowercase();
        if !token.is_empty() && !tokens.contains(&token) {
            tokens.push(token);
        }
    }
    tokens
}

/// Parse excluded-restriction inputs into the closed restriction set
///
/// Each input may itself be comma-separated. Unrecognized tokens are ignored.
pub fn parse_exclusions<I, S>(inputs: I) -> BTreeSet<Restriction>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    inputs
        .into_iter()
        .flat_map(|input| {
            input
                .as_ref()
                .split(',')
                .filter_map(Restriction::from_str)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Percentage (0-100) of a recipe's ingredients matched by the query tokens
///
/// A recipe without ingredients scores 0.
pub fn match_percentage(recipe_ingredients: &[String], tokens: &[String]) -> f64 {
    if recipe_ingredients.is_empty() {
        return 0.0;
    }

    let owned: Vec<String> = recipe_ingredients
        .iter()
        .map(|ingredient| ingredient.trim().to_lowercase())
        .collect();

    let matched = tokens
        .iter()
        .filter(|token| owned.iter().any(|ingredient| ingredient == *token))
        .count();

    (matched as f64 / recipe_ingredients.len() as f64) * 100.0
}

/// Annotate every recipe with its match percentage, preserving order
pub fn score(mut recipes: Vec<Recipe>, tokens: &[String]) -> Vec<Recipe> {
    for recipe in &mut recipes {
        recipe.percentage = match_percentage(&recipe.ingredients, tokens);
    }
    recipes
}

/// Drop every recipe tagged with an excluded restriction
pub fn exclude_restricted(recipes: Vec<Recipe>, excluded: &BTreeSet<Restriction>) -> Vec<Recipe> {
    if excluded.is_empty() {
        return recipes;
    }
    recipes
        .into_iter()
        .filter(|recipe| !recipe.restriction.iter().any(|tag| excluded.contains(tag)))
        .collect()
}
