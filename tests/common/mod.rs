//! Shared fixtures for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use cucinia_cache::cache::{CacheStore, CacheValue, MemoryCache};
use cucinia_cache::schema::{Ingredient, Recipe, RecipeDraft, User};
use cucinia_cache::store::{InMemoryStore, PrimaryStore, RecipeQuery};
use cucinia_cache::{CucinaError, Cuisine, RecipeService, Restriction, Result};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Memory cache whose operations can be switched to fail
#[derive(Default)]
pub struct FlakyCache {
    pub inner: MemoryCache,
    pub fail_get: AtomicBool,
    pub fail_set: AtomicBool,
    pub fail_delete: AtomicBool,
}

impl FlakyCache {
    pub fn fail_all(&self, fail: bool) {
        self.fail_get.store(fail, Ordering::SeqCst);
        self.fail_set.store(fail, Ordering::SeqCst);
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    fn check(flag: &AtomicBool, op: &str) -> Result<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(CucinaError::Cache(format!("{} refused", op)));
        }
        Ok(())
    }
}

#[async_trait]
impl CacheStore for FlakyCache {
    async fn get(&self, key: &str) -> Result<Option<CacheValue>> {
        Self::check(&self.fail_get, "GET")?;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: CacheValue) -> Result<()> {
        Self::check(&self.fail_set, "SET")?;
        self.inner.set(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        Self::check(&self.fail_delete, "DEL")?;
        self.inner.delete(key).await
    }

    async fn ping(&self) -> Result<()> {
        Self::check(&self.fail_get, "PING")
    }

    fn backend(&self) -> &'static str {
        "flaky"
    }
}

/// In-memory store that counts recipe queries and can be switched off
#[derive(Default)]
pub struct CountingStore {
    pub inner: InMemoryStore,
    pub recipe_queries: AtomicUsize,
    pub down: AtomicBool,
}

impl CountingStore {
    pub fn queries(&self) -> usize {
        self.recipe_queries.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<()> {
        if self.down.load(Ordering::SeqCst) {
            return Err(CucinaError::Store("connection refused".to_string()));
        }
        Ok(())
    }

    fn count(&self) -> Result<()> {
        self.check()?;
        self.recipe_queries.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl PrimaryStore for CountingStore {
    fn backend(&self) -> &'static str {
        "counting"
    }

    async fn ping(&self) -> Result<()> {
        self.check()
    }

    async fn list_ingredients(&self) -> Result<Vec<Ingredient>> {
        self.check()?;
        self.inner.list_ingredients().await
    }

    async fn get_ingredient(&self, id: &str) -> Result<Option<Ingredient>> {
        self.check()?;
        self.inner.get_ingredient(id).await
    }

    async fn find_ingredient_by_name(&self, name: &str) -> Result<Option<Ingredient>> {
        self.check()?;
        self.inner.find_ingredient_by_name(name).await
    }

    async fn insert_ingredient(&self, name: &str) -> Result<Ingredient> {
        self.check()?;
        self.inner.insert_ingredient(name).await
    }

    async fn rename_ingredient(&self, id: &str, name: &str) -> Result<bool> {
        self.check()?;
        self.inner.rename_ingredient(id, name).await
    }

    async fn delete_ingredient(&self, id: &str) -> Result<bool> {
        self.check()?;
        self.inner.delete_ingredient(id).await
    }

    async fn list_recipes(&self) -> Result<Vec<Recipe>> {
        self.count()?;
        self.inner.list_recipes().await
    }

    async fn get_recipe(&self, id: &str) -> Result<Option<Recipe>> {
        self.count()?;
        self.inner.get_recipe(id).await
    }

    async fn find_recipe_by_name(&self, name: &str) -> Result<Option<Recipe>> {
        self.check()?;
        self.inner.find_recipe_by_name(name).await
    }

    async fn find_recipes(&self, query: &RecipeQuery) -> Result<Vec<Recipe>> {
        self.count()?;
        self.inner.find_recipes(query).await
    }

    async fn insert_recipe(&self, draft: &RecipeDraft) -> Result<Recipe> {
        self.check()?;
        self.inner.insert_recipe(draft).await
    }

    async fn update_recipe(&self, id: &str, draft: &RecipeDraft) -> Result<bool> {
        self.check()?;
        self.inner.update_recipe(id, draft).await
    }

    async fn delete_recipe(&self, id: &str) -> Result<bool> {
        self.check()?;
        self.inner.delete_recipe(id).await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.check()?;
        self.inner.list_users().await
    }

    async fn get_user(&self, email: &str) -> Result<Option<User>> {
        self.check()?;
        self.inner.get_user(email).await
    }

    async fn insert_user(&self, user: &User) -> Result<()> {
        self.check()?;
        self.inner.insert_user(user).await
    }

    async fn delete_user(&self, email: &str) -> Result<bool> {
        self.check()?;
        self.inner.delete_user(email).await
    }

    async fn set_user_ingredients(&self, email: &str, ingredients: &[String]) -> Result<bool> {
        self.check()?;
        self.inner.set_user_ingredients(email, ingredients).await
    }

    async fn set_liked_recipes(&self, email: &str, recipe_ids: &[String]) -> Result<bool> {
        self.check()?;
        self.inner.set_liked_recipes(email, recipe_ids).await
    }

    async fn set_premium(&self, email: &str, premium: bool) -> Result<bool> {
        self.check()?;
        self.inner.set_premium(email, premium).await
    }
}

pub struct Harness {
    pub service: RecipeService,
    pub store: Arc<CountingStore>,
    pub cache: Arc<FlakyCache>,
}

pub fn harness() -> Harness {
    let store = Arc::new(CountingStore::default());
    let cache = Arc::new(FlakyCache::default());
    let service = RecipeService::new(store.clone(), cache.clone());
    Harness {
        service,
        store,
        cache,
    }
}

/// Ids of the seeded recipes, in insertion order
pub struct Seeded {
    pub bolo: String,
    pub omelete: String,
    pub moqueca: String,
    pub salada: String,
    pub lasanha: String,
}

/// Seed ingredients and five recipes through the service
pub async fn seed(service: &RecipeService) -> Seeded {
    for name in [
        "leite", "ovo", "farinha", "peixe", "coco", "alface", "tomate", "queijo",
    ] {
        service.create_ingredient(name).await.unwrap();
    }

    let bolo = service
        .create_recipe(
            &RecipeDraft::new("Bolo Simples", Cuisine::Brazilian)
                .with_ingredients(["leite", "ovo", "farinha"])
                .with_restrictions(vec![Restriction::Vegetarian])
                .with_type_of(3),
        )
        .await
        .unwrap();
    let omelete = service
        .create_recipe(
            &RecipeDraft::new("Omelete", Cuisine::French)
                .with_ingredients(["ovo", "leite"])
                .with_type_of(1),
        )
        .await
        .unwrap();
    let moqueca = service
        .create_recipe(
            &RecipeDraft::new("Moqueca", Cuisine::Brazilian)
                .with_ingredients(["peixe", "coco", "tomate"])
                .with_type_of(2)
                .premium(true),
        )
        .await
        .unwrap();
    let salada = service
        .create_recipe(
            &RecipeDraft::new("Salada", Cuisine::Brazilian)
                .with_ingredients(["alface", "tomate"])
                .with_restrictions(vec![Restriction::Vegan])
                .with_type_of(1),
        )
        .await
        .unwrap();
    let lasanha = service
        .create_recipe(
            &RecipeDraft::new("Lasanha", Cuisine::Italian)
                .with_ingredients(["farinha", "ovo", "queijo", "tomate"])
                .with_restrictions(vec![Restriction::Dairy, Restriction::Gluten])
                .with_type_of(2),
        )
        .await
        .unwrap();

    Seeded {
        bolo: bolo.id,
        omelete: omelete.id,
        moqueca: moqueca.id,
        salada: salada.id,
        lasanha: lasanha.id,
    }
}

pub fn user(email: &str) -> User {
    User::new("Ana", email, "$2b$10$hash")
}
