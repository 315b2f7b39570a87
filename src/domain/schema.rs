//! Record schema model
//!
//! A [`Schema`] maps field names to [`FieldDefinition`]s and keeps the
//! order in which fields were added. [`SchemaStore`] wraps the schema the
//! user is editing and hands out immutable snapshots for generation
//! requests.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Number;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Prefix for names synthesized by [`Schema::add_field`].
pub const FIELD_NAME_PREFIX: &str = "field_";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Field names must not be empty")]
    EmptyFieldName,
}

/// Type tag of a field.
///
/// The four variants offered in the editor are named; any other tag the
/// generation service understands is carried through as [`FieldType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    #[default]
    String,
    Number,
    Name,
    Email,
    Other(String),
}

/// Types offered when editing a field, in display order.
static OFFERED_TYPES: [FieldType; 4] = [
    FieldType::String,
    FieldType::Number,
    FieldType::Name,
    FieldType::Email,
];

impl FieldType {
    pub fn offered() -> &'static [FieldType] {
        &OFFERED_TYPES
    }

    /// Wire tag, e.g. `"number"`.
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Name => "name",
            FieldType::Email => "email",
            FieldType::Other(tag) => tag,
        }
    }

    /// Human-readable label for option lists.
    pub fn label(&self) -> &str {
        match self {
            FieldType::String => "String",
            FieldType::Number => "Number",
            FieldType::Name => "Name",
            FieldType::Email => "Email",
            FieldType::Other(tag) => tag,
        }
    }
}

impl From<&str> for FieldType {
    fn from(tag: &str) -> Self {
        match tag {
            "string" => FieldType::String,
            "number" => FieldType::Number,
            "name" => FieldType::Name,
            "email" => FieldType::Email,
            other => FieldType::Other(other.to_string()),
        }
    }
}

impl From<String> for FieldType {
    fn from(tag: String) -> Self {
        FieldType::from(tag.as_str())
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field's type and optional constraints.
///
/// `min`/`max` only mean something for numeric types and `choices` only for
/// choice-style types. Nothing here enforces that: constraints survive a
/// type change and the generation service decides what to do with them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldDefinition {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
}

impl FieldDefinition {
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            ..Default::default()
        }
    }

    /// Bounds are kept exactly as given, so `18` is sent back as `18`.
    pub fn with_range(mut self, min: Option<Number>, max: Option<Number>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_choices(mut self, choices: Vec<String>) -> Self {
        self.choices = Some(choices);
        self
    }

    /// Copy of this definition with a different type; constraints are kept.
    pub fn with_type(&self, field_type: FieldType) -> Self {
        Self {
            field_type,
            ..self.clone()
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.min.is_none() && self.max.is_none() && self.choices.is_none()
    }
}

/// Insertion-ordered mapping of field name to definition.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(try_from = "IndexMap<String, FieldDefinition>")]
pub struct Schema {
    fields: IndexMap<String, FieldDefinition>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDefinition)> {
        self.fields.iter().map(|(name, def)| (name.as_str(), def))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Insert or replace a field. A replaced field keeps its position.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        definition: FieldDefinition,
    ) -> Result<Option<FieldDefinition>, SchemaError> {
        let name = name.into();
        if name.is_empty() {
            return Err(SchemaError::EmptyFieldName);
        }
        Ok(self.fields.insert(name, definition))
    }

    /// Next free `field_{n}` name, probing upwards from `len() + 1`.
    pub fn next_field_name(&self) -> String {
        let mut index = self.len() + 1;
        loop {
            let name = format!("{}{}", FIELD_NAME_PREFIX, index);
            if !self.contains(&name) {
                return name;
            }
            index += 1;
        }
    }

    /// Append an unconstrained `string` field under a synthesized name.
    pub fn add_field(&mut self) -> String {
        let name = self.next_field_name();
        self.fields
            .insert(name.clone(), FieldDefinition::new(FieldType::String));
        name
    }

    /// Replace the definition of an existing field. Returns `false` and
    /// leaves the schema untouched when `name` is unknown.
    pub fn update_field(&mut self, name: &str, definition: FieldDefinition) -> bool {
        match self.fields.get_mut(name) {
            Some(current) => {
                *current = definition;
                true
            }
            None => false,
        }
    }

    /// Remove a field; the remaining fields keep their relative order.
    pub fn remove_field(&mut self, name: &str) -> Option<FieldDefinition> {
        self.fields.shift_remove(name)
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl TryFrom<IndexMap<String, FieldDefinition>> for Schema {
    type Error = SchemaError;

    fn try_from(fields: IndexMap<String, FieldDefinition>) -> Result<Self, Self::Error> {
        if fields.contains_key("") {
            return Err(SchemaError::EmptyFieldName);
        }
        Ok(Self { fields })
    }
}

/// The schema being edited in a session.
///
/// Mutations are copy-on-write: a snapshot taken with [`SchemaStore::snapshot`]
/// never changes, no matter what is edited afterwards.
#[derive(Debug, Clone, Default)]
pub struct SchemaStore {
    current: Arc<Schema>,
}

impl SchemaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_schema(schema: Schema) -> Self {
        Self {
            current: Arc::new(schema),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.current
    }

    pub fn snapshot(&self) -> Arc<Schema> {
        Arc::clone(&self.current)
    }

    pub fn add_field(&mut self) -> String {
        Arc::make_mut(&mut self.current).add_field()
    }

    pub fn update_field(&mut self, name: &str, definition: FieldDefinition) -> bool {
        if !self.current.contains(name) {
            return false;
        }
        Arc::make_mut(&mut self.current).update_field(name, definition)
    }

    pub fn remove_field(&mut self, name: &str) -> Option<FieldDefinition> {
        if !self.current.contains(name) {
            return None;
        }
        Arc::make_mut(&mut self.current).remove_field(name)
    }
}
