//! Form fields and the draft record edited in the modal.

use crate::case::field_label;
use crate::format::stringify;
use crate::row::Row;
use crate::service::lenient_number_value;
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FieldKind {
    #[default]
    Text,
    Number,
    Password,
    Date,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub placeholder: Option<String>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            placeholder: None,
        }
    }

    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn number(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Number)
    }

    pub fn password(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Password).with_placeholder("Leave blank to keep")
    }

    pub fn date(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Date)
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Text a fresh create form starts with.
    pub fn default_text(&self) -> String {
        match self.kind {
            FieldKind::Number => "0".into(),
            _ => String::new(),
        }
    }
}

/// How an edit form is filled for a fixed schema.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditSource {
    /// Straight from the clicked row.
    #[default]
    Row,
    /// From a fresh GET of the record (for fields the list omits).
    Refetch,
}

/// Which fields a page edits.
#[derive(Clone, Debug, PartialEq)]
pub enum FormSchema {
    Fixed { fields: Vec<FieldSpec>, edit_source: EditSource },
    /// Every scalar field of the fetched record.
    Introspected,
}

impl FormSchema {
    pub fn fixed(fields: Vec<FieldSpec>) -> Self {
        FormSchema::Fixed {
            fields,
            edit_source: EditSource::Row,
        }
    }

    pub fn fixed_refetch(fields: Vec<FieldSpec>) -> Self {
        FormSchema::Fixed {
            fields,
            edit_source: EditSource::Refetch,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DraftField {
    pub spec: FieldSpec,
    pub value: String,
}

/// Not-yet-submitted form data, as typed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Draft {
    fields: Vec<DraftField>,
}

impl Draft {
    /// Create-mode draft: every field at its default.
    pub fn defaults(specs: &[FieldSpec]) -> Self {
        Self {
            fields: specs
                .iter()
                .map(|spec| DraftField {
                    value: spec.default_text(),
                    spec: spec.clone(),
                })
                .collect(),
        }
    }

    /// Edit-mode draft from a row's known fields. Nulls fall back to defaults; passwords start
    /// blank.
    pub fn from_row(specs: &[FieldSpec], row: &Row) -> Self {
        Self {
            fields: specs
                .iter()
                .map(|spec| {
                    let raw = row.get(&spec.name);
                    let value = match spec.kind {
                        FieldKind::Password => String::new(),
                        _ if raw.is_null() => spec.default_text(),
                        _ => stringify(raw),
                    };
                    DraftField {
                        spec: spec.clone(),
                        value,
                    }
                })
                .collect(),
        }
    }

    /// Edit-mode draft for an unknown schema: every field of the record except the id and
    /// anything null, array or object. Numeric fields are remembered as numbers.
    pub fn introspect(row: &Row) -> Self {
        Self {
            fields: row
                .editable_fields()
                .filter(|(_, v)| !matches!(v, Value::Null | Value::Array(_) | Value::Object(_)))
                .map(|(name, v)| {
                    let kind = if v.is_number() { FieldKind::Number } else { FieldKind::Text };
                    DraftField {
                        spec: FieldSpec::new(name, field_label(name), kind),
                        value: stringify(v),
                    }
                })
                .collect(),
        }
    }

    pub fn fields(&self) -> &[DraftField] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.iter().find(|f| f.spec.name == name).map(|f| f.value.as_str())
    }

    /// Update a field as typed. Returns `false` for names the form does not have.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.fields.iter_mut().find(|f| f.spec.name == name) {
            Some(field) => {
                field.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Request body: every field, numbers coerced leniently (non-numeric text becomes 0).
    pub fn to_body(&self) -> Value {
        let mut map = Map::with_capacity(self.fields.len());
        for field in &self.fields {
            let value = match field.spec.kind {
                FieldKind::Number => lenient_number_value(&field.value),
                _ => Value::String(field.value.clone()),
            };
            map.insert(field.spec.name.clone(), value);
        }
        Value::Object(map)
    }
}
