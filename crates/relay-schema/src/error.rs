/// Error code for a payload that is not a JSON object.
pub const NOT_OBJECT: &str = "not_object";

/// Ordered list of schema violations, one entry per failing field.
///
/// Entries are dotted field paths (`token.amount`), `extra:<path>.<key>` for
/// keys outside the schema, or [`NOT_OBJECT`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("validation failed: {}", .errors.join(", "))]
pub struct ValidationErrors {
    errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new(errors: Vec<String>) -> Self {
        Self { errors }
    }

    pub fn not_object() -> Self {
        Self::new(vec![NOT_OBJECT.to_string()])
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_inner(self) -> Vec<String> {
        self.errors
    }

    pub fn contains(&self, error: &str) -> bool {
        self.errors.iter().any(|e| e == error)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}
