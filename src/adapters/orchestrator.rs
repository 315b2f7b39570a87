//! Generation request orchestration
//!
//! Drives a single generation request through
//! `Idle -> Submitting -> (Succeeded | Failed)` and keeps the latest
//! successful result. Failures never clear a previously shown result.

use crate::domain::{
    GenerationError, GenerationPort, GenerationRequest, GenerationState, Record, Schema,
    SubmitRejected,
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub struct GenerationOrchestrator {
    client: Arc<dyn GenerationPort>,
    state: GenerationState,
    result: Option<Vec<Record>>,
}

impl GenerationOrchestrator {
    pub fn new(client: Arc<dyn GenerationPort>) -> Self {
        Self {
            client,
            state: GenerationState::Idle,
            result: None,
        }
    }

    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    /// Records from the most recent successful request, if any.
    pub fn result(&self) -> Option<&[Record]> {
        self.result.as_deref()
    }

    pub fn can_submit(&self, schema: &Schema) -> bool {
        !schema.is_empty() && !self.state.is_submitting()
    }

    /// Enter `Submitting` and build the request to send.
    ///
    /// Refused while another request is outstanding or when the schema has
    /// no fields; in both cases the state is left as it was.
    pub fn begin(
        &mut self,
        schema: Arc<Schema>,
        count: i64,
    ) -> Result<GenerationRequest, SubmitRejected> {
        if self.state.is_submitting() {
            warn!("Generation request already in flight, ignoring submission");
            return Err(SubmitRejected::InFlight);
        }
        if schema.is_empty() {
            warn!("Refusing to submit an empty schema");
            return Err(SubmitRejected::EmptySchema);
        }

        debug!(fields = schema.len(), count, "Submitting generation request");
        self.state = GenerationState::Submitting;
        Ok(GenerationRequest::new(schema, count))
    }

    /// Apply the outcome of a request. There is no staleness check: the
    /// last outcome to arrive wins.
    pub fn resolve(
        &mut self,
        outcome: Result<Vec<Record>, GenerationError>,
    ) -> &GenerationState {
        match outcome {
            Ok(records) => {
                info!(records = records.len(), "Generation succeeded");
                self.result = Some(records);
                self.state = GenerationState::Succeeded;
            }
            Err(err) => {
                error!(error = %err, "Generation failed");
                self.state = GenerationState::Failed {
                    message: err.user_message(),
                };
            }
        }
        &self.state
    }

    /// Submit `schema` and wait for the service to answer.
    ///
    /// Dropping the returned future before it completes puts the
    /// orchestrator back in `Idle` with the previous result intact.
    pub async fn submit(
        &mut self,
        schema: Arc<Schema>,
        count: i64,
    ) -> Result<&GenerationState, SubmitRejected> {
        let request = self.begin(schema, count)?;
        let client = Arc::clone(&self.client);
        {
            let pending = PendingSubmission { orchestrator: &mut *self };
            let outcome = client.generate(&request).await;
            pending.orchestrator.resolve(outcome);
        }
        Ok(&self.state)
    }

    /// Dismiss a finished request's notification and return to `Idle`.
    pub fn acknowledge(&mut self) {
        if self.state.is_terminal() {
            self.state = GenerationState::Idle;
        }
    }
}

/// Held across the service call in [`GenerationOrchestrator::submit`].
struct PendingSubmission<'a> {
    orchestrator: &'a mut GenerationOrchestrator,
}

impl Drop for PendingSubmission<'_> {
    fn drop(&mut self) {
        if self.orchestrator.state.is_submitting() {
            warn!("Generation request abandoned before the service answered");
            self.orchestrator.state = GenerationState::Idle;
        }
    }
}
