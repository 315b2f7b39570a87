pub mod generation;
pub mod schema;

pub use generation::{
    GenerationError, GenerationPort, GenerationRequest, GenerationState, Record, SubmitRejected,
    DEFAULT_RECORD_COUNT, FALLBACK_ERROR_MESSAGE, GENERIC_FAILURE_MESSAGE,
};
pub use schema::{FieldDefinition, FieldType, Schema, SchemaError, SchemaStore};
