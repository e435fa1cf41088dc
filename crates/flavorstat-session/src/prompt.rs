//! Ingredient prompt as a three-state machine.
//!
//! `Prompting` asks again, `Validated` carries the canonical (lowercased)
//! name, `Cancelled` ends the session without touching the dataset.
use flavorstat_data::IngredientCatalog;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptState {
    Prompting,
    Validated(String),
    Cancelled,
}

pub struct IngredientPrompt<'a> {
    catalog: &'a IngredientCatalog,
}

impl<'a> IngredientPrompt<'a> {
    pub fn new(catalog: &'a IngredientCatalog) -> Self { Self { catalog } }

    /// `None` is end of input and cancels like an empty line.
    pub fn step(&self, input: Option<&str>) -> PromptState {
        let Some(line) = input.map(str::trim) else { return PromptState::Cancelled };
        if line.is_empty() { return PromptState::Cancelled; }
        let name = line.to_lowercase();
        if self.catalog.contains(&name) { PromptState::Validated(name) } else { PromptState::Prompting }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flavorstat_core::types::IngredientId;

    fn catalog() -> IngredientCatalog { IngredientCatalog::from_entries([("kale", IngredientId(12)), ("bread crumb", IngredientId(4))]) }

    #[test]
    fn empty_and_eof_cancel() {
        let catalog = catalog();
        let prompt = IngredientPrompt::new(&catalog);
        assert_eq!(prompt.step(Some("")), PromptState::Cancelled);
        assert_eq!(prompt.step(Some("   \n")), PromptState::Cancelled);
        assert_eq!(prompt.step(None), PromptState::Cancelled);
    }

    #[test]
    fn unknown_names_keep_prompting() {
        let catalog = catalog();
        assert_eq!(IngredientPrompt::new(&catalog).step(Some("unobtainium")), PromptState::Prompting);
    }

    #[test]
    fn known_names_validate_in_lowercase() {
        let catalog = catalog();
        assert_eq!(IngredientPrompt::new(&catalog).step(Some(" Bread Crumb\n")), PromptState::Validated("bread crumb".into()));
    }
}
