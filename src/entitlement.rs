//! Premium entitlement filter

use crate::schema::Recipe;

/// Keep a recipe iff the caller is premium or the recipe is not premium
///
/// Runs after scoring and before caching, so cached payloads already reflect
/// the caller's entitlement tier.
pub fn filter(recipes: Vec<Recipe>, is_premium_caller: bool) -> Vec<Recipe> {
    if is_premium_caller {
        return recipes;
    }
    recipes.into_iter().filter(|recipe| !recipe.premium).collect()
}
