//! Type definitions for recipes, ingredients and users
//!
//! Field names are part of the wire format: cached payloads and freshly
//! computed responses are compared byte-for-byte, so renaming a field here is
//! a breaking change for every cached entry.

use serde::{Deserialize, Serialize};

/// Cuisine of a recipe (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Cuisine {
    /// Italian cuisine
    #[serde(rename = "italiana")]
    Italian,
    /// French cuisine
    #[serde(rename = "francesa")]
    French,
    /// Brazilian cuisine
    #[serde(rename = "brasileira")]
    Brazilian,
}

impl Cuisine {
    /// Every accepted cuisine
    pub const ALL: [Cuisine; 3] = [Cuisine::Italian, Cuisine::French, Cuisine::Brazilian];

    /// Convert to the stored/wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            Cuisine::Italian => "italiana",
            Cuisine::French => "francesa",
            Cuisine::Brazilian => "brasileira",
        }
    }

    /// Parse from string (stored names, with English aliases)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "italiana" | "italian" => Some(Cuisine::Italian),
            "francesa" | "french" => Some(Cuisine::French),
            "brasileira" | "brazilian" => Some(Cuisine::Brazilian),
            _ => None,
        }
    }
}

impl std::fmt::Display for Cuisine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Dietary restriction tag (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Restriction {
    /// `vegano` tag
    #[serde(rename = "vegano")]
    Vegan,
    /// `vegetariano` tag
    #[serde(rename = "vegetariano")]
    Vegetarian,
    /// `laticinio` tag
    #[serde(rename = "laticinio")]
    Dairy,
    /// `gluten` tag
    #[serde(rename = "gluten")]
    Gluten,
}

impl Restriction {
    /// Every accepted restriction tag
    pub const ALL: [Restriction; 4] = [
        Restriction::Vegan,
        Restriction::Vegetarian,
        Restriction::Dairy,
        Restriction::Gluten,
    ];

    /// Convert to the stored/wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            Restriction::Vegan => "vegano",
            Restriction::Vegetarian => "vegetariano",
            Restriction::Dairy => "laticinio",
            Restriction::Gluten => "gluten",
        }
    }

    /// Parse from string (stored names, with English aliases)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "vegano" | "vegan" => Some(Restriction::Vegan),
            "vegetariano" | "vegetarian" => Some(Restriction::Vegetarian),
            "laticinio" | "laticínio" | "dairy" => Some(Restriction::Dairy),
            "gluten" => Some(Restriction::Gluten),
            _ => None,
        }
    }
}

impl std::fmt::Display for Restriction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ingredient record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Store-assigned identifier
    pub id: String,
    /// Unique ingredient name
    pub name: String,
}

impl Ingredient {
    /// Create an ingredient with an explicit id
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Recipe fields supplied by a caller on create/update
///
/// The id is assigned by the store and the match percentage is computed per
/// query, so neither is part of the draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub cuisine: Cuisine,
    #[serde(default)]
    pub type_of: i64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub restriction: Vec<Restriction>,
    #[serde(default)]
    pub premium: bool,
}

impl RecipeDraft {
    /// Create a draft with the required fields; everything else defaults
    pub fn new(name: impl Into<String>, cuisine: Cuisine) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            cuisine,
            type_of: 0,
            image: String::new(),
            ingredients: Vec::new(),
            difficulty: String::new(),
            restriction: Vec::new(),
            premium: false,
        }
    }

    pub fn with_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_restrictions(mut self, restrictions: Vec<Restriction>) -> Self {
        self.restriction = restrictions;
        self
    }

    pub fn with_type_of(mut self, type_of: i64) -> Self {
        self.type_of = type_of;
        self
    }

    pub fn premium(mut self, premium: bool) -> Self {
        self.premium = premium;
        self
    }

    /// Ingredient names as the store must resolve them
    ///
    /// Entries may themselves be comma-separated lists; each piece is trimmed
    /// and empty pieces are dropped.
    pub fn ingredient_names(&self) -> Vec<String> {
        self.ingredients
            .iter()
            .flat_map(|entry| entry.split(','))
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect()
    }
}

/// Recipe record as stored and as served
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cuisine: Cuisine,
    pub type_of: i64,
    pub image: String,
    pub ingredients: Vec<String>,
    pub difficulty: String,
    pub restriction: Vec<Restriction>,
    pub premium: bool,
    /// Share of this recipe's ingredients present in the queried pantry (0-100)
    ///
    /// Derived per query and never persisted; plain reads report 0.
    #[serde(default)]
    pub percentage: f64,
}

impl Recipe {
    /// Materialize a stored recipe from a draft and its assigned id
    pub fn from_draft(id: impl Into<String>, draft: RecipeDraft) -> Self {
        Self {
            id: id.into(),
            name: draft.name,
            description: draft.description,
            cuisine: draft.cuisine,
            type_of: draft.type_of,
            image: draft.image,
            ingredients: draft.ingredients,
            difficulty: draft.difficulty,
            restriction: draft.restriction,
            premium: draft.premium,
            percentage: 0.0,
        }
    }

    /// Check whether the recipe carries a restriction tag
    pub fn has_restriction(&self, restriction: Restriction) -> bool {
        self.restriction.contains(&restriction)
    }
}

/// User record
///
/// The email is the identifier. The password field holds a hash produced by
/// the authentication collaborator and is never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    /// Pantry: ingredient names the user has at hand
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub restriction: Vec<Restriction>,
    #[serde(default)]
    pub liked_recipes: Vec<String>,
    #[serde(default)]
    pub premium: bool,
}

impl User {
    /// Create a non-premium user with an empty pantry
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password_hash.into(),
            ingredients: Vec::new(),
            restriction: Vec::new(),
            liked_recipes: Vec::new(),
            premium: false,
        }
    }

    /// Check the pantry for an ingredient, ignoring case
    pub fn has_pantry_ingredient(&self, ingredient: &str) -> bool {
        let wanted = ingredient.to_lowercase();
        self.ingredients
            .iter()
            .any(|owned| owned.to_lowercase() == wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuisine_conversion() {
        assert_eq!(Cuisine::Italian.as_str(), "italiana");
        assert_eq!(Cuisine::French.as_str(), "francesa");
        assert_eq!(Cuisine::Brazilian.as_str(), "brasileira");
    }

    #[test]
    fn test_cuisine_parsing() {
        assert_eq!(Cuisine::from_str("brasileira"), Some(Cuisine::Brazilian));
        assert_eq!(Cuisine::from_str(" Italiana "), Some(Cuisine::Italian));
        assert_eq!(Cuisine::from_str("french"), Some(Cuisine::French));
        assert_eq!(Cuisine::from_str("mexicana"), None);
    }

    #[test]
    fn test_restriction_parsing() {
        assert_eq!(Restriction::from_str("vegano"), Some(Restriction::Vegan));
        assert_eq!(Restriction::from_str("LATICINIO"), Some(Restriction::Dairy));
        assert_eq!(Restriction::from_str("gluten"), Some(Restriction::Gluten));
        assert_eq!(Restriction::from_str("kosher"), None);
    }

    #[test]
    fn test_recipe_wire_format() {
        let recipe = Recipe::from_draft(
            "r-1",
            RecipeDraft::new("Bolo", Cuisine::Brazilian)
                .with_ingredients(["leite", "ovo"])
                .with_restrictions(vec![Restriction::Dairy]),
        );

        let json = serde_json::to_value(&recipe).unwrap();
        assert_eq!(json["cuisine"], "brasileira");
        assert_eq!(json["restriction"][0], "laticinio");
        assert_eq!(json["type_of"], 0);
        assert_eq!(json["percentage"], 0.0);
    }

    #[test]
    fn test_draft_ingredient_names_split_and_trim() {
        let draft = RecipeDraft::new("Pão", Cuisine::French)
            .with_ingredients(["farinha, água", " sal ", ""]);

        assert_eq!(draft.ingredient_names(), vec!["farinha", "água", "sal"]);
    }

    #[test]
    fn test_user_password_never_serialized() {
        let user = User::new("Ana", "ana@example.com", "$2b$10$hash");
        let json = serde_json::to_string(&user).unwrap();

        assert!(!json.contains("password"));
        assert!(!json.contains("hash"));

        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(back.password, "");
        assert_eq!(back.email, "ana@example.com");
    }

    #[test]
    fn test_pantry_lookup_ignores_case() {
        let mut user = User::new("Ana", "ana@example.com", "");
        user.ingredients.push("Leite".to_string());

        assert!(user.has_pantry_ingredient("leite"));
        assert!(user.has_pantry_ingredient("LEITE"));
        assert!(!user.has_pantry_ingredient("ovo"));
    }
}
