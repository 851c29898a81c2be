use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// A recipe field that may be written either as a list of strings or as a
/// single string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    One(String),
    Many(Vec<String>),
}

impl StringOrList {
    fn join(&self, sep: &str) -> String {
        match self {
            StringOrList::One(s) => s.clone(),
            StringOrList::Many(items) => items.join(sep),
        }
    }
}

/// One recipe as stored in the corpus. Authors write `title` or `name`,
/// `ingredients` or `ingredient`, `steps` or `instructions`; the accessors
/// below apply the fallback so callers never branch on which spelling a
/// file used. Absent fields are treated the same as empty ones. Fields not
/// consumed by indexing (description, image, author, ...) ride along in
/// `extra` so a resolved record round-trips intact.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<StringOrList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredient: Option<StringOrList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<StringOrList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<StringOrList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<StringOrList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

const FIELD_SEP: &str = " \n ";

impl RecipeRecord {
    /// `title`, falling back to `name`.
    pub fn title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("")
    }

    fn ingredients_field(&self) -> Option<&StringOrList> {
        self.ingredients.as_ref().or(self.ingredient.as_ref())
    }

    fn steps_field(&self) -> Option<&StringOrList> {
        self.steps.as_ref().or(self.instructions.as_ref())
    }

    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or("")
    }

    /// All indexed text fields concatenated: title, ingredients, steps,
    /// tags, category.
    pub fn searchable_text(&self) -> String {
        let mut parts: Vec<String> = vec![self.title().to_string()];
        for field in [self.ingredients_field(), self.steps_field(), self.tags.as_ref()] {
            if let Some(value) = field {
                parts.push(value.join(FIELD_SEP));
            }
        }
        parts.push(self.category().to_string());
        parts.join(FIELD_SEP)
    }

    /// The ingredients field alone, for the ingredient-frequency counter.
    pub fn ingredient_text(&self) -> String {
        self.ingredients_field()
            .map(|v| v.join(FIELD_SEP))
            .unwrap_or_default()
    }
}

/// Consumer-facing form of a document id: the source filename with the
/// `.json` extension stripped. The index itself stores the filename
/// verbatim.
pub fn display_id(id: &str) -> &str {
    id.strip_suffix(".json").unwrap_or(id)
}

/// Resolves a scored document id back to its full record. The index can go
/// stale relative to the document source, so resolution is allowed to fail
/// per id.
pub trait RecordResolver {
    fn resolve(&self, id: &str) -> Option<RecipeRecord>;
}

/// Resolver over the corpus directory the index was built from: one JSON
/// file per recipe, filename is the document id.
pub struct FsRecordResolver {
    recipes_dir: PathBuf,
}

impl FsRecordResolver {
    pub fn new<P: AsRef<Path>>(recipes_dir: P) -> Self {
        Self { recipes_dir: recipes_dir.as_ref().to_path_buf() }
    }
}

impl RecordResolver for FsRecordResolver {
    fn resolve(&self, id: &str) -> Option<RecipeRecord> {
        let filename = if id.ends_with(".json") {
            id.to_string()
        } else {
            format!("{id}.json")
        };
        let path = self.recipes_dir.join(filename);
        let raw = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(id, %err, "candidate record no longer parses");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_fallbacks() {
        let record: RecipeRecord =
            serde_json::from_str(r#"{"title": "Harira", "instructions": "Simmer."}"#).unwrap();
        assert_eq!(record.title(), "Harira");
        assert!(record.searchable_text().contains("Simmer."));

        let record: RecipeRecord = serde_json::from_str(r#"{"name": "Seffa"}"#).unwrap();
        assert_eq!(record.title(), "Seffa");
    }

    #[test]
    fn ingredients_accept_string_or_list() {
        let a: RecipeRecord =
            serde_json::from_str(r#"{"name": "x", "ingredients": "chicken, onion"}"#).unwrap();
        let b: RecipeRecord =
            serde_json::from_str(r#"{"name": "x", "ingredients": ["chicken", "onion"]}"#).unwrap();
        assert_eq!(a.ingredient_text(), "chicken, onion");
        assert!(b.ingredient_text().contains("chicken"));
        assert!(b.ingredient_text().contains("onion"));
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let record: RecipeRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record.title(), "");
        assert_eq!(record.ingredient_text(), "");
    }

    #[test]
    fn extra_fields_survive_a_round_trip() {
        let raw = r#"{"name": "Zaalouk", "description": "Aubergine salad"}"#;
        let record: RecipeRecord = serde_json::from_str(raw).unwrap();
        let out = serde_json::to_value(&record).unwrap();
        assert_eq!(out["description"], "Aubergine salad");
    }

    #[test]
    fn display_id_strips_extension() {
        assert_eq!(display_id("tagine_01.json"), "tagine_01");
        assert_eq!(display_id("tagine_01"), "tagine_01");
    }
}
