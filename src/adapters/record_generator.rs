use crate::domain::{FieldDefinition, Record, Schema};
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Word;
use fake::faker::name::en::Name;
use fake::Fake;
use rand::Rng;
use serde_json::{json, Map, Number, Value};
use thiserror::Error;

/// Bounds used for `number` fields without `min`/`max`.
pub const DEFAULT_NUMBER_RANGE: (i64, i64) = (0, 100);

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Unsupported type '{field_type}' for field '{field}'")]
    UnsupportedType { field: String, field_type: String },

    #[error("Invalid range for field '{field}': min {min} is greater than max {max}")]
    InvalidRange { field: String, min: i64, max: i64 },

    #[error("Field '{field}' needs a non-empty 'choices' list")]
    MissingChoices { field: String },
}

/// Integer view of a bound; fractional bounds are truncated.
fn bound(value: Option<&Number>) -> Option<i64> {
    let value = value?;
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|v| v as i64))
}

/// Synthesizes records for a schema using fake data.
///
/// Besides the four editor types it understands `choice`, `boolean` and
/// `uuid`. Constraints that do not apply to a field's type are ignored.
#[derive(Debug, Default)]
pub struct RecordGenerator;

impl RecordGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, schema: &Schema, count: usize) -> Result<Vec<Record>, GeneratorError> {
        (0..count).map(|_| self.generate_record(schema)).collect()
    }

    /// One record with a value for every field, in schema order.
    pub fn generate_record(&self, schema: &Schema) -> Result<Record, GeneratorError> {
        let mut record = Map::new();
        for (name, definition) in schema.iter() {
            let value = self.generate_value(name, definition)?;
            record.insert(name.to_string(), value);
        }
        Ok(Value::Object(record))
    }

    fn generate_value(&self, field: &str, definition: &FieldDefinition) -> Result<Value, GeneratorError> {
        let mut rng = rand::thread_rng();

        match definition.field_type.as_str() {
            "string" => Ok(json!(Word().fake::<String>())),
            "name" => Ok(json!(Name().fake::<String>())),
            "email" => Ok(json!(SafeEmail().fake::<String>())),
            "number" => {
                let min = bound(definition.min.as_ref()).unwrap_or(DEFAULT_NUMBER_RANGE.0);
                let max = bound(definition.max.as_ref()).unwrap_or(DEFAULT_NUMBER_RANGE.1);
                if min > max {
                    return Err(GeneratorError::InvalidRange {
                        field: field.to_string(),
                        min,
                        max,
                    });
                }
                Ok(json!(rng.gen_range(min..=max)))
            }
            "choice" => match definition.choices.as_deref() {
                Some(choices) if !choices.is_empty() => {
                    let idx = rng.gen_range(0..choices.len());
                    Ok(json!(choices[idx].clone()))
                }
                _ => Err(GeneratorError::MissingChoices {
                    field: field.to_string(),
                }),
            },
            "boolean" => Ok(json!(rng.gen_bool(0.5))),
            "uuid" => Ok(json!(uuid::Uuid::new_v4().to_string())),
            other => Err(GeneratorError::UnsupportedType {
                field: field.to_string(),
                field_type: other.to_string(),
            }),
        }
    }
}
