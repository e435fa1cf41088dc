//! Ingredient catalog: canonical ingredient name -> Food.com ingredient id.
//!
//! The artifact is either the `ingr_map` table exported as CSV or a JSON
//! document. Names are lowercased; the first id seen for a name wins.
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use flavorstat_core::error::{Error, Result};
use flavorstat_core::types::IngredientId;

const RESOURCE: &str = "ingredient catalog";

#[derive(Debug, Clone, Default)]
pub struct IngredientCatalog {
    by_name: BTreeMap<String, IngredientId>,
}

impl IngredientCatalog {
    /// Load with the Food.com `ingr_map` column names (`replaced`, `id`).
    pub fn load(path: &Path) -> Result<Self> { Self::load_with_columns(path, "replaced", "id") }

    pub fn load_with_columns(path: &Path, name_column: &str, id_column: &str) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::unreadable(RESOURCE, path, e))?;
        let entries = match path.extension().and_then(|s| s.to_str()) {
            Some("csv") => read_csv(file, path, name_column, id_column)?,
            Some("json") => read_json(file, path, name_column, id_column)?,
            _ => return Err(Error::invalid_data(path.display().to_string(), "catalog must be a .csv or .json file")),
        };
        let catalog = Self::from_entries(entries);
        debug!(path = %path.display(), names = catalog.len(), "loaded ingredient catalog");
        Ok(catalog)
    }

    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, IngredientId)>,
        S: AsRef<str>,
    {
        let mut by_name = BTreeMap::new();
        for (name, id) in entries {
            let name = normalize(name.as_ref());
            if name.is_empty() { continue; }
            match by_name.get(&name) {
                Some(existing) if *existing != id => warn!(%name, kept = %existing, dropped = %id, "conflicting catalog entry"),
                Some(_) => {}
                None => { by_name.insert(name, id); }
            }
        }
        Self { by_name }
    }

    pub fn lookup(&self, name: &str) -> Option<IngredientId> { self.by_name.get(&normalize(name)).copied() }

    pub fn contains(&self, name: &str) -> bool { self.lookup(name).is_some() }

    pub fn resolve(&self, name: &str) -> Result<IngredientId> {
        self.lookup(name).ok_or_else(|| Error::IngredientNotFound(normalize(name)))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> { self.by_name.keys().map(String::as_str) }

    pub fn len(&self) -> usize { self.by_name.len() }

    pub fn is_empty(&self) -> bool { self.by_name.is_empty() }
}

fn normalize(name: &str) -> String { name.trim().to_lowercase() }

fn read_csv(file: File, path: &Path, name_column: &str, id_column: &str) -> Result<Vec<(String, IngredientId)>> {
    let mut reader = csv::Reader::from_reader(file);
    let headers = reader.headers().map_err(|e| Error::invalid_data(path.display().to_string(), e.to_string()))?.clone();
    let name_idx = column_index(&headers, name_column, path)?;
    let id_idx = column_index(&headers, id_column, path)?;

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| Error::invalid_data(path.display().to_string(), e.to_string()))?;
        let location = || format!("{}:{}", path.display(), record.position().map_or(0, csv::Position::line));
        let name = record.get(name_idx).unwrap_or_default();
        let raw_id = record.get(id_idx).unwrap_or_default().trim();
        let id = raw_id.parse::<u32>().map_err(|_| Error::invalid_data(location(), format!("ingredient id '{raw_id}' is not an integer")))?;
        entries.push((name.to_string(), IngredientId(id)));
    }
    Ok(entries)
}

fn read_json(file: File, path: &Path, name_column: &str, id_column: &str) -> Result<Vec<(String, IngredientId)>> {
    let location = path.display().to_string();
    let value: Value = serde_json::from_reader(std::io::BufReader::new(file)).map_err(|e| Error::invalid_data(&location, e.to_string()))?;
    match value {
        Value::Object(map) => map
            .into_iter()
            .map(|(name, id)| -> Result<(String, IngredientId)> { Ok((name, json_id(&id, &location)?)) })
            .collect(),
        Value::Array(records) => records
            .iter()
            .map(|record| -> Result<(String, IngredientId)> {
                let name = record.get(name_column).and_then(Value::as_str)
                    .ok_or_else(|| Error::invalid_data(&location, format!("record without string field '{name_column}'")))?;
                let id = record.get(id_column).ok_or_else(|| Error::invalid_data(&location, format!("record without field '{id_column}'")))?;
                Ok((name.to_string(), json_id(id, &location)?))
            })
            .collect(),
        _ => Err(Error::invalid_data(location, "expected an object or an array of records")),
    }
}

fn json_id(value: &Value, location: &str) -> Result<IngredientId> {
    value
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .map(IngredientId)
        .ok_or_else(|| Error::invalid_data(location, format!("ingredient id {value} is not a non-negative integer")))
}

pub(crate) fn column_index(headers: &csv::StringRecord, column: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| Error::invalid_data(path.display().to_string(), format!("missing column '{column}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_and_whitespace_insensitive() {
        let catalog = IngredientCatalog::from_entries([("Bread Crumb", IngredientId(7))]);
        assert_eq!(catalog.lookup("  bread CRUMB "), Some(IngredientId(7)));
        assert!(catalog.contains("bread crumb"));
    }

    #[test]
    fn first_id_wins_for_duplicate_names() {
        let catalog = IngredientCatalog::from_entries([("kale", IngredientId(3)), ("Kale", IngredientId(9)), ("kale", IngredientId(3))]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.lookup("kale"), Some(IngredientId(3)));
    }

    #[test]
    fn names_come_out_sorted() {
        let catalog = IngredientCatalog::from_entries([("tofu", IngredientId(1)), ("lamb", IngredientId(2)), ("", IngredientId(4))]);
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["lamb", "tofu"]);
    }
}
