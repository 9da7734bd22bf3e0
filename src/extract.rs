//! Ordered field extraction
//!
//! Vendor payloads put the same fact in different places depending on
//! instance configuration (Jira custom-field IDs, GitLab vs GitHub shapes).
//! A [`FieldExtractor`] tries a list of lookups in order and keeps the first
//! non-empty hit.

use serde_json::Value;

type ExtractFn = Box<dyn Fn(&Value) -> Option<Value> + Send + Sync>;

struct Step {
    name: String,
    extract: ExtractFn,
}

/// Ordered list of named lookups over a JSON value.
#[derive(Default)]
pub struct FieldExtractor {
    steps: Vec<Step>,
}

impl FieldExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a lookup by JSON pointer, e.g. `/fields/customfield_10014`.
    pub fn pointer(self, path: &str) -> Self {
        let owned = path.to_string();
        self.with(path, move |value| value.pointer(&owned).cloned())
    }

    /// Appends an arbitrary lookup.
    pub fn with<F>(mut self, name: &str, extract: F) -> Self
    where
        F: Fn(&Value) -> Option<Value> + Send + Sync + 'static,
    {
        self.steps.push(Step {
            name: name.to_string(),
            extract: Box::new(extract),
        });
        self
    }

    /// Returns the first non-empty result.
    pub fn extract(&self, value: &Value) -> Option<Value> {
        self.extract_named(value).map(|(_, found)| found)
    }

    /// Like [`extract`](Self::extract), also naming the lookup that matched.
    pub fn extract_named(&self, value: &Value) -> Option<(&str, Value)> {
        self.steps.iter().find_map(|step| {
            (step.extract)(value)
                .filter(|found| !is_empty(found))
                .map(|found| (step.name.as_str(), found))
        })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// `null`, blank strings, and empty arrays or objects carry no data.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
