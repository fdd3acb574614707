//! Open row record: a typed numeric id plus whatever scalar fields the server returned.

use crate::error::AppError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Wire name of the identifier field.
pub const ID_FIELD: &str = "ID";
/// Accepted when a backend uses lowercase ids.
const ID_FIELD_FALLBACK: &str = "id";

static NULL: Value = Value::Null;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(pub i64);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RowId {
    fn from(v: i64) -> Self {
        RowId(v)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    id: RowId,
    /// All fields, the id included under `ID`.
    fields: Map<String, Value>,
}

impl Row {
    pub fn new(id: impl Into<RowId>, fields: Map<String, Value>) -> Self {
        let id = id.into();
        let mut fields = fields;
        fields.insert(ID_FIELD.into(), Value::from(id.0));
        Self { id, fields }
    }

    /// Parse a JSON object that carries an `ID` (or `id`) number. Field order is kept.
    pub fn from_value(value: Value) -> Result<Self, AppError> {
        let Value::Object(mut map) = value else {
            return Err(AppError::Decode("row must be a JSON object".into()));
        };
        let (key, raw) = match map.get(ID_FIELD) {
            Some(raw) => (ID_FIELD, raw),
            None => map
                .get(ID_FIELD_FALLBACK)
                .map(|raw| (ID_FIELD_FALLBACK, raw))
                .ok_or_else(|| AppError::Decode(format!("row is missing '{ID_FIELD}'")))?,
        };
        let id = id_from_value(raw).ok_or_else(|| AppError::Decode(format!("row id is not an integer: {raw}")))?;
        if key == ID_FIELD_FALLBACK {
            map.shift_remove(ID_FIELD_FALLBACK);
        }
        Ok(Self::new(id, map))
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    /// Field value, `Null` when absent. The id is reachable under its wire name.
    pub fn get(&self, key: &str) -> &Value {
        self.fields.get(key).unwrap_or(&NULL)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).as_str()
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).as_f64()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        if key != ID_FIELD {
            self.fields.insert(key, value);
        }
    }

    /// Scalar fields other than the id, in map order.
    pub fn editable_fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields
            .iter()
            .filter(|(k, _)| k.as_str() != ID_FIELD)
            .map(|(k, v)| (k.as_str(), v))
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

fn id_from_value(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Row {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let v = Value::deserialize(deserializer)?;
        Row::from_value(v).map_err(D::Error::custom)
    }
}
