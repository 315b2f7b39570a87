pub mod field_editor;
pub mod generate_handler;
pub mod generation_client;
pub mod health_handler;
pub mod orchestrator;
pub mod output_viewer;
pub mod record_generator;
pub mod session;
