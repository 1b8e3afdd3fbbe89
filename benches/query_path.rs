use criterion::{criterion_group, criterion_main, Criterion};
use cucinia_cache::cache::keys;
use cucinia_cache::schema::Recipe;
use cucinia_cache::{
    scoring, Cuisine, InMemoryStore, MemoryCache, RecipeCriteria, RecipeDraft, RecipeService,
    Restriction,
};
use std::hint::black_box;
use std::sync::Arc;

fn catalogue(size: usize) -> Vec<Recipe> {
    let pantry = ["ovo", "leite", "farinha", "tomate", "queijo", "alho", "cebola"];
    (0..size)
        .map(|i| {
            let ingredients: Vec<&str> = pantry.iter().cycle().skip(i).take(1 + i % 5).copied().collect();
            let draft = RecipeDraft::new(format!("Receita {}", i), Cuisine::Brazilian)
                .with_ingredients(ingredients)
                .with_restrictions(if i % 3 == 0 { vec![Restriction::Vegan] } else { vec![] });
            Recipe::from_draft(i.to_string(), draft)
        })
        .collect()
}

fn bench_criteria_key(c: &mut Criterion) {
    let criteria = RecipeCriteria::new("tomate, Ovo, leite, ovo")
        .cuisine("brasileira")
        .type_of("2")
        .exclude("vegano, gluten")
        .premium(true);

    c.bench_function("keys/criteria", |b| {
        b.iter(|| {
            let normalized = black_box(&criteria).normalize().expect("valid criteria");
            black_box(keys::criteria(&normalized));
        });
    });
}

fn bench_scoring(c: &mut Criterion) {
    let recipes = catalogue(500);
    let tokens = scoring::ingredient_tokens("ovo,leite,tomate");
    let excluded = scoring::parse_exclusions(["vegano"]);

    c.bench_function("scoring/exclude_and_score_500", |b| {
        b.iter(|| {
            let kept = scoring::exclude_restricted(black_box(recipes.clone()), &excluded);
            black_box(scoring::score(kept, &tokens));
        });
    });
}

fn bench_cache_hit(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().expect("runtime");
    let service = rt.block_on(async {
        let service = RecipeService::new(Arc::new(InMemoryStore::new()), Arc::new(MemoryCache::default()));
        for name in ["ovo", "leite", "tomate"] {
            service.create_ingredient(name).await.expect("ingredient");
        }
        service
            .create_recipe(&RecipeDraft::new("Omelete", Cuisine::French).with_ingredients(["ovo", "leite"]))
            .await
            .expect("recipe");
        service
    });
    let criteria = RecipeCriteria::new("ovo,leite").premium(true);
    let (service, criteria) = (&service, &criteria);

    c.bench_function("service/criteria_cache_hit", |b| {
        b.to_async(&rt).iter(|| async move {
            let payload = service.recipes_by_criteria(&criteria).await.expect("criteria");
            black_box(payload.is_cache_hit());
        });
    });
}

criterion_group!(benches, bench_criteria_key, bench_scoring, bench_cache_hit);
criterion_main!(benches);
