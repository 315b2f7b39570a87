//! Top-level controller for one editing session
//!
//! Owns the schema being edited, the requested record count, the
//! orchestrator and the viewer. The generation service is injected so each
//! session is independent; nothing here is global.

use crate::adapters::field_editor::FieldEditor;
use crate::adapters::orchestrator::GenerationOrchestrator;
use crate::adapters::output_viewer::OutputViewer;
use crate::domain::{
    FieldType, GenerationPort, GenerationState, Record, Schema, SchemaStore, SubmitRejected,
    DEFAULT_RECORD_COUNT,
};
use std::sync::Arc;

pub struct ForgeSession {
    store: SchemaStore,
    record_count: i64,
    orchestrator: GenerationOrchestrator,
    viewer: OutputViewer,
}

impl ForgeSession {
    /// A session with an empty schema and the default record count.
    pub fn new(client: Arc<dyn GenerationPort>) -> Self {
        Self::with_schema(client, Schema::new())
    }

    pub fn with_schema(client: Arc<dyn GenerationPort>, schema: Schema) -> Self {
        Self {
            store: SchemaStore::from_schema(schema),
            record_count: DEFAULT_RECORD_COUNT,
            orchestrator: GenerationOrchestrator::new(client),
            viewer: OutputViewer::default(),
        }
    }

    pub fn with_viewer(mut self, viewer: OutputViewer) -> Self {
        self.viewer = viewer;
        self
    }

    pub fn schema(&self) -> &Schema {
        self.store.schema()
    }

    pub fn snapshot(&self) -> Arc<Schema> {
        self.store.snapshot()
    }

    pub fn add_field(&mut self) -> String {
        self.store.add_field()
    }

    pub fn field_editors(&self) -> Vec<FieldEditor> {
        FieldEditor::bind_all(&self.store)
    }

    pub fn change_field_type(&mut self, name: &str, field_type: FieldType) -> bool {
        FieldEditor::new(name).change_type(&mut self.store, field_type)
    }

    pub fn remove_field(&mut self, name: &str) -> bool {
        FieldEditor::new(name).remove(&mut self.store)
    }

    /// Mutable access for editors bound via [`ForgeSession::field_editors`].
    pub fn store_mut(&mut self) -> &mut SchemaStore {
        &mut self.store
    }

    pub fn record_count(&self) -> i64 {
        self.record_count
    }

    /// Any value is accepted; the generation service rejects bad counts.
    pub fn set_record_count(&mut self, count: i64) {
        self.record_count = count;
    }

    /// Whether the generate action should be enabled.
    pub fn can_generate(&self) -> bool {
        self.orchestrator.can_submit(self.store.schema())
    }

    pub async fn generate(&mut self) -> Result<&GenerationState, SubmitRejected> {
        let snapshot = self.store.snapshot();
        self.orchestrator.submit(snapshot, self.record_count).await
    }

    pub fn state(&self) -> &GenerationState {
        self.orchestrator.state()
    }

    pub fn result(&self) -> Option<&[Record]> {
        self.orchestrator.result()
    }

    pub fn render_output(&self) -> Option<String> {
        self.viewer.render(self.orchestrator.result())
    }

    /// Dismiss the outcome notification.
    pub fn dismiss(&mut self) {
        self.orchestrator.acknowledge();
    }
}
