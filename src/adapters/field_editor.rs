//! Per-field editing bindings
//!
//! A [`FieldEditor`] only remembers which field it is bound to. Every read
//! goes to the [`SchemaStore`] and every edit becomes a store mutation.

use crate::domain::{FieldDefinition, FieldType, SchemaStore};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEditor {
    name: String,
}

impl FieldEditor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// One editor per field, in schema order.
    pub fn bind_all(store: &SchemaStore) -> Vec<FieldEditor> {
        store.schema().names().map(FieldEditor::new).collect()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field names cannot be edited once created.
    pub fn is_name_editable(&self) -> bool {
        false
    }

    pub fn type_options(&self) -> &'static [FieldType] {
        FieldType::offered()
    }

    pub fn definition<'s>(&self, store: &'s SchemaStore) -> Option<&'s FieldDefinition> {
        store.schema().get(&self.name)
    }

    /// Switch the field's type. `min`, `max` and `choices` are carried over
    /// as they are, even when they do not apply to the new type.
    pub fn change_type(&self, store: &mut SchemaStore, field_type: FieldType) -> bool {
        let Some(current) = store.schema().get(&self.name) else {
            return false;
        };
        let updated = current.with_type(field_type);
        debug!(field = %self.name, field_type = %updated.field_type, "Changing field type");
        store.update_field(&self.name, updated)
    }

    /// Same as [`FieldEditor::change_type`] but from a raw option value.
    pub fn select_type(&self, store: &mut SchemaStore, tag: &str) -> bool {
        self.change_type(store, FieldType::from(tag))
    }

    pub fn remove(&self, store: &mut SchemaStore) -> bool {
        debug!(field = %self.name, "Removing field");
        store.remove_field(&self.name).is_some()
    }
}
