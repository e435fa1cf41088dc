//! Domain types shared by the loader, the tester and the visualizer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Food.com ingredient identifier (`id` column of the ingredient map).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IngredientId(pub u32);

impl fmt::Display for IngredientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecipeId(pub i64);

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// How "recipe contains ingredient" is decided.
///
/// - `Substring`: the decimal form of the id appears anywhere in the raw
///   ingredient-list field. `12` matches a list holding `123`.
/// - `Exact`: the id is a member of the parsed ingredient list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    #[default]
    Substring,
    Exact,
}

/// A recipe row from the recipe tables.
///
/// `raw_ingredients` keeps the field exactly as read (e.g. `"[389, 7655]"`);
/// `ingredients` is the parsed, ordered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: RecipeId,
    pub raw_ingredients: String,
    pub ingredients: Vec<IngredientId>,
}

impl Recipe {
    pub fn new(id: RecipeId, raw_ingredients: impl Into<String>, ingredients: Vec<IngredientId>) -> Self {
        Self { id, raw_ingredients: raw_ingredients.into(), ingredients }
    }
}

/// One row of the recipe/interaction inner join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatedRecipe {
    pub recipe: Arc<Recipe>,
    pub rating: u8,
}

impl RatedRecipe {
    pub fn new(recipe: Arc<Recipe>, rating: u8) -> Self { Self { recipe, rating } }

    pub fn recipe_id(&self) -> RecipeId { self.recipe.id }
}

/// Complement split of the joined rows around one ingredient.
#[derive(Debug, Clone, Default)]
pub struct PartitionedGroups {
    /// Rows whose recipe contains the ingredient.
    pub good: Vec<RatedRecipe>,
    /// Every other joined row.
    pub bad: Vec<RatedRecipe>,
}

impl PartitionedGroups {
    pub fn total(&self) -> usize { self.good.len() + self.bad.len() }
}

/// Arithmetic mean of the rating field; `None` for an empty group.
#[allow(clippy::cast_precision_loss)]
pub fn mean_rating(group: &[RatedRecipe]) -> Option<f64> {
    if group.is_empty() { return None; }
    let sum: u64 = group.iter().map(|r| u64::from(r.rating)).sum();
    Some(sum as f64 / group.len() as f64)
}
