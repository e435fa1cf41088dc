//! Recipe/rating inner join and the good/bad partition around one ingredient.
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use flavorstat_core::config::DatasetSettings;
use flavorstat_core::error::Result;
use flavorstat_core::traits::IngredientMatcher;
use flavorstat_core::types::{IngredientId, PartitionedGroups, RatedRecipe, Recipe, RecipeId};

use crate::catalog::IngredientCatalog;
use crate::sources::{read_interactions, read_recipes, Interaction, SourceSet};

/// Every (recipe, rating) pair present on both sides of the join, ordered by
/// recipe id and then by interaction order.
#[derive(Debug, Clone, Default)]
pub struct JoinedDataset {
    rows: Vec<RatedRecipe>,
}

impl JoinedDataset {
    pub fn join(recipes: Vec<Recipe>, interactions: &[Interaction]) -> Self {
        let mut by_id: HashMap<RecipeId, Arc<Recipe>> = HashMap::with_capacity(recipes.len());
        for recipe in recipes {
            match by_id.entry(recipe.id) {
                Entry::Occupied(_) => warn!(recipe_id = %recipe.id, "duplicate recipe row ignored"),
                Entry::Vacant(slot) => { slot.insert(Arc::new(recipe)); }
            }
        }
        let mut rows: Vec<RatedRecipe> = interactions
            .iter()
            .filter_map(|i| by_id.get(&i.recipe_id).map(|r| RatedRecipe::new(Arc::clone(r), i.rating)))
            .collect();
        rows.sort_by_key(RatedRecipe::recipe_id);
        debug!(recipes = by_id.len(), interactions = interactions.len(), joined = rows.len(), "joined recipes with interactions");
        Self { rows }
    }

    pub fn rows(&self) -> &[RatedRecipe] { &self.rows }

    pub fn len(&self) -> usize { self.rows.len() }

    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    pub fn partition<M: IngredientMatcher + ?Sized>(&self, ingredient: IngredientId, matcher: &M) -> PartitionedGroups {
        let (good, bad): (Vec<_>, Vec<_>) = self.rows.iter().cloned().partition(|row| matcher.matches(&row.recipe, ingredient));
        PartitionedGroups { good, bad }
    }
}

pub struct DatasetBuilder {
    settings: DatasetSettings,
}

impl DatasetBuilder {
    pub fn new(settings: DatasetSettings) -> Self { Self { settings } }

    /// Locate the source tables without reading them.
    pub fn sources(&self) -> Result<SourceSet> { SourceSet::discover(&self.settings) }

    /// Discover, read, concatenate and join the source tables.
    pub fn load(&self) -> Result<JoinedDataset> {
        let sources = self.sources()?;
        let recipes = read_recipes(&sources.recipes, &self.settings)?;
        let mut interactions = read_interactions(&sources.interactions, &self.settings)?;
        if self.settings.skip_unrated { interactions.retain(|i| i.rating != 0); }
        Ok(JoinedDataset::join(recipes, &interactions))
    }

    /// Resolve `ingredient` through the catalog and split the joined rows.
    pub fn build(&self, catalog: &IngredientCatalog, ingredient: &str) -> Result<PartitionedGroups> {
        let id = catalog.resolve(ingredient)?;
        let joined = self.load()?;
        let groups = joined.partition(id, &self.settings.match_mode);
        debug!(%ingredient, ingredient_id = %id, good = groups.good.len(), bad = groups.bad.len(), "partitioned dataset");
        Ok(groups)
    }
}
