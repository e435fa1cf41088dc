//! Raw source tables: discovery of the (possibly split) CSV dumps and row readers.
use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::debug;

use flavorstat_core::config::{resolve_with_base, DatasetSettings};
use flavorstat_core::error::{Error, Result};
use flavorstat_core::types::{IngredientId, Recipe, RecipeId};

use crate::catalog::column_index;

/// One row of the interaction tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interaction {
    pub recipe_id: RecipeId,
    pub rating: u8,
}

/// The concrete files making up the recipe and interaction tables.
#[derive(Debug, Clone, Default)]
pub struct SourceSet {
    pub recipes: Vec<PathBuf>,
    pub interactions: Vec<PathBuf>,
}

impl SourceSet {
    /// Resolve the table files for `settings`: explicit lists when given,
    /// otherwise every `<prefix>*.csv` directly under the data directory.
    pub fn discover(settings: &DatasetSettings) -> Result<Self> {
        let data_dir = settings.data_dir();
        if !data_dir.is_dir() { return Err(Error::unavailable("dataset directory", data_dir)); }
        let recipes = table_files(&data_dir, &settings.recipe_files, &settings.recipes_prefix, "recipe table")?;
        let interactions = table_files(&data_dir, &settings.interaction_files, &settings.interactions_prefix, "interaction table")?;
        debug!(recipes = recipes.len(), interactions = interactions.len(), "discovered source files");
        Ok(Self { recipes, interactions })
    }
}

fn table_files(data_dir: &Path, explicit: &[String], prefix: &str, resource: &'static str) -> Result<Vec<PathBuf>> {
    if !explicit.is_empty() {
        let files: Vec<PathBuf> = explicit.iter().map(|f| resolve_with_base(data_dir, f)).collect();
        if let Some(missing) = files.iter().find(|p| !p.is_file()) { return Err(Error::unavailable(resource, missing)); }
        return Ok(files);
    }
    let files = list_csv_files(data_dir, prefix);
    if files.is_empty() { return Err(Error::unavailable(resource, data_dir.join(format!("{prefix}*.csv")))); }
    Ok(files)
}

/// List `<prefix>*.csv` files directly inside `root`, sorted by name.
pub fn list_csv_files(root: &Path, prefix: &str) -> Vec<PathBuf> {
    let mut csv_files = Vec::new();
    for entry in walkdir::WalkDir::new(root).min_depth(1).max_depth(1).into_iter().filter_map(|e| e.ok()).filter(|e| e.file_type().is_file()) {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy();
        if name.starts_with(prefix) && path.extension().and_then(|s| s.to_str()) == Some("csv") { csv_files.push(path.to_path_buf()); }
    }
    csv_files.sort(); csv_files
}

/// Read and concatenate the recipe tables.
pub fn read_recipes(paths: &[PathBuf], settings: &DatasetSettings) -> Result<Vec<Recipe>> {
    let mut recipes = Vec::new();
    for path in paths {
        let mut reader = open_table(path, "recipe table")?;
        let headers = read_headers(&mut reader, path)?;
        let id_idx = column_index(&headers, &settings.recipe_id_column, path)?;
        let ingredients_idx = column_index(&headers, &settings.ingredients_column, path)?;
        let before = recipes.len();
        for record in reader.records() {
            let record = record.map_err(|e| Error::invalid_data(path.display().to_string(), e.to_string()))?;
            let location = record_location(path, &record);
            let id = parse_field::<i64>(&record, id_idx, "recipe id", &location)?;
            let raw = record.get(ingredients_idx).unwrap_or_default();
            let ingredients = parse_ingredient_list(raw).map_err(|m| Error::invalid_data(&location, m))?;
            recipes.push(Recipe::new(RecipeId(id), raw, ingredients));
        }
        debug!(path = %path.display(), rows = recipes.len() - before, "read recipe table");
    }
    Ok(recipes)
}

/// Read and concatenate the interaction tables.
pub fn read_interactions(paths: &[PathBuf], settings: &DatasetSettings) -> Result<Vec<Interaction>> {
    let mut interactions = Vec::new();
    for path in paths {
        let mut reader = open_table(path, "interaction table")?;
        let headers = read_headers(&mut reader, path)?;
        let id_idx = column_index(&headers, &settings.interaction_id_column, path)?;
        let rating_idx = column_index(&headers, &settings.rating_column, path)?;
        let before = interactions.len();
        for record in reader.records() {
            let record = record.map_err(|e| Error::invalid_data(path.display().to_string(), e.to_string()))?;
            let location = record_location(path, &record);
            let recipe_id = RecipeId(parse_field::<i64>(&record, id_idx, "recipe id", &location)?);
            let rating = parse_field::<u8>(&record, rating_idx, "rating", &location)?;
            interactions.push(Interaction { recipe_id, rating });
        }
        debug!(path = %path.display(), rows = interactions.len() - before, "read interaction table");
    }
    Ok(interactions)
}

/// Parse a serialized ingredient list such as `[389, 7655, 6270]`.
pub fn parse_ingredient_list(raw: &str) -> std::result::Result<Vec<IngredientId>, String> {
    let ids: Vec<u32> = serde_json::from_str(raw.trim()).map_err(|e| format!("malformed ingredient list '{raw}': {e}"))?;
    Ok(ids.into_iter().map(IngredientId).collect())
}

fn open_table(path: &Path, resource: &'static str) -> Result<csv::Reader<File>> {
    let file = File::open(path).map_err(|e| Error::unreadable(resource, path, e))?;
    Ok(csv::Reader::from_reader(file))
}

fn read_headers(reader: &mut csv::Reader<File>, path: &Path) -> Result<csv::StringRecord> {
    reader.headers().cloned().map_err(|e| Error::invalid_data(path.display().to_string(), e.to_string()))
}

fn record_location(path: &Path, record: &csv::StringRecord) -> String {
    format!("{}:{}", path.display(), record.position().map_or(0, csv::Position::line))
}

fn parse_field<T: std::str::FromStr>(record: &csv::StringRecord, idx: usize, what: &str, location: &str) -> Result<T> {
    let raw = record.get(idx).unwrap_or_default().trim();
    raw.parse::<T>().map_err(|_| Error::invalid_data(location, format!("{what} '{raw}' is not a valid integer")))
}
