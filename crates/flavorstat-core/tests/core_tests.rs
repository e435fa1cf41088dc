use std::sync::Arc;

use flavorstat_core::config::{resolve_with_base, Config, Settings};
use flavorstat_core::traits::IngredientMatcher;
use flavorstat_core::types::{mean_rating, IngredientId, MatchMode, RatedRecipe, Recipe, RecipeId};

fn recipe(raw: &str, ids: &[u32]) -> Recipe {
    Recipe::new(RecipeId(1), raw, ids.iter().copied().map(IngredientId).collect())
}

#[test]
fn substring_mode_matches_inside_longer_ids() {
    let r = recipe("[123, 7655]", &[123, 7655]);
    assert!(MatchMode::Substring.matches(&r, IngredientId(12)), "legacy matching sees 12 inside 123");
    assert!(MatchMode::Substring.matches(&r, IngredientId(7655)));
    assert!(!MatchMode::Substring.matches(&r, IngredientId(99)));
}

#[test]
fn exact_mode_requires_membership() {
    let r = recipe("[123, 7655]", &[123, 7655]);
    assert!(!MatchMode::Exact.matches(&r, IngredientId(12)));
    assert!(MatchMode::Exact.matches(&r, IngredientId(123)));
}

#[test]
fn closures_act_as_matchers() {
    let r = recipe("[5]", &[5]);
    let never = |_: &Recipe, _: IngredientId| false;
    assert!(!never.matches(&r, IngredientId(5)));
}

#[test]
fn mean_rating_of_group() {
    let r = Arc::new(recipe("[1]", &[1]));
    let group: Vec<RatedRecipe> = [1u8, 1, 2, 3, 5, 5, 5].iter().map(|&x| RatedRecipe::new(Arc::clone(&r), x)).collect();
    let mean = mean_rating(&group).expect("non-empty");
    assert!((mean - 22.0 / 7.0).abs() < 1e-12);
    assert_eq!(mean_rating(&[]), None);
}

#[test]
fn defaults_follow_food_com_layout() {
    figment::Jail::expect_with(|_jail| {
        let settings = Config::load_for_env("dev").expect("load").settings().expect("settings");
        assert_eq!(settings.dataset.data_dir, "datasets-raw");
        assert_eq!(settings.dataset.recipe_id_column, "i");
        assert_eq!(settings.dataset.match_mode, MatchMode::Substring);
        assert_eq!(settings.plot.output, "plot.png");
        Ok(())
    });
}

#[test]
fn toml_env_file_and_env_vars_layer_in_order() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[dataset]\ndata_dir = \"base\"\nmatch_mode = \"exact\"\n")?;
        jail.create_file("config.prod.toml", "[dataset]\ndata_dir = \"prod-data\"\n")?;
        jail.set_env("APP_PLOT__OUTPUT", "chart.svg");

        let settings = Config::load_for_env("prod").expect("load").settings().expect("settings");
        assert_eq!(settings.dataset.data_dir, "prod-data");
        assert_eq!(settings.dataset.match_mode, MatchMode::Exact);
        assert_eq!(settings.plot.output, "chart.svg");
        Ok(())
    });
}

#[test]
fn zero_plot_size_is_rejected() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[plot]\nwidth = 0\n")?;
        assert!(Config::load_for_env("dev").is_err());
        Ok(())
    });
}

#[test]
fn typed_key_lookup() {
    let figment = figment::Figment::from(figment::providers::Serialized::defaults(Settings::default()));
    let config = Config::from_figment(figment).expect("config");
    let prefix: String = config.get("dataset.interactions_prefix").expect("key");
    assert_eq!(prefix, "RAW_interactions");
    assert!(config.get::<String>("dataset.nope").is_err());
}

#[test]
fn relative_paths_resolve_against_base() {
    let tmp = tempfile::TempDir::new().unwrap();
    let base = tmp.path();
    assert_eq!(resolve_with_base(base, "ingr_map.csv"), base.join("ingr_map.csv"));
    let abs = base.join("elsewhere.json");
    assert_eq!(resolve_with_base(base, abs.to_string_lossy()), abs);
}
