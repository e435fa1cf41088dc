use crate::types::{IngredientId, MatchMode, Recipe};

pub trait IngredientMatcher {
    fn matches(&self, recipe: &Recipe, ingredient: IngredientId) -> bool;
}

impl IngredientMatcher for MatchMode {
    fn matches(&self, recipe: &Recipe, ingredient: IngredientId) -> bool {
        match self {
            MatchMode::Substring => recipe.raw_ingredients.contains(&ingredient.to_string()),
            MatchMode::Exact => recipe.ingredients.contains(&ingredient),
        }
    }
}

impl<F> IngredientMatcher for F
where
    F: Fn(&Recipe, IngredientId) -> bool,
{
    fn matches(&self, recipe: &Recipe, ingredient: IngredientId) -> bool { self(recipe, ingredient) }
}
