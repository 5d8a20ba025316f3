use serde_json::{Map, Value};

use crate::error::ValidationErrors;
use crate::rule::Rule;

/// Path name of the top-level object, used only in `extra:` errors.
pub const ROOT: &str = "root";

/// One allowed key of an object.
#[derive(Debug)]
pub struct FieldSpec {
    pub key: &'static str,
    pub required: bool,
    pub rule: Rule,
}

impl FieldSpec {
    pub const fn required(key: &'static str, rule: Rule) -> Self {
        Self { key, required: true, rule }
    }

    pub const fn optional(key: &'static str, rule: Rule) -> Self {
        Self { key, required: false, rule }
    }
}

/// Closed schema for one JSON object: any key not listed in `fields` is a
/// violation.
#[derive(Debug)]
pub struct ObjectSchema {
    /// Dotted path of this object from the payload root, or [`ROOT`].
    pub path: &'static str,
    pub fields: &'static [FieldSpec],
}

impl ObjectSchema {
    pub fn allows(&self, key: &str) -> bool {
        self.fields.iter().any(|f| f.key == key)
    }

    fn field_path(&self, key: &str) -> String {
        if self.path == ROOT {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    fn check(&self, object: &Map<String, Value>, errors: &mut Vec<String>) {
        for key in object.keys() {
            if !self.allows(key) {
                errors.push(format!("extra:{}.{}", self.path, key));
            }
        }

        for field in self.fields {
            let Some(value) = object.get(field.key) else {
                if field.required {
                    errors.push(self.field_path(field.key));
                }
                continue;
            };

            match (field.rule, value.as_object()) {
                (Rule::Object(nested), Some(inner)) => nested.check(inner, errors),
                (rule, _) if rule.accepts(value) => {}
                _ => errors.push(self.field_path(field.key)),
            }
        }
    }
}

/// Check `payload` against `schema`, collecting every violation.
pub fn validate(schema: &ObjectSchema, payload: &Value) -> Result<(), ValidationErrors> {
    let Some(object) = payload.as_object() else {
        return Err(ValidationErrors::not_object());
    };

    let mut errors = Vec::new();
    schema.check(object, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors::new(errors))
    }
}
