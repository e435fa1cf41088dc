//! flavorstat-data
//!
//! Loads the ingredient catalog and the Food.com recipe/interaction dumps,
//! joins them on recipe id and partitions the result around an ingredient.

pub mod catalog;
pub mod dataset;
pub mod sources;

pub use catalog::IngredientCatalog;
pub use dataset::{DatasetBuilder, JoinedDataset};
pub use sources::{Interaction, SourceSet};
