//! Narrow-interface file-body producers for the DMMF-to-TypeScript
//! generator.
//!
//! Every function here is a pure `(model slice, analysis slice) -> String`
//! transform: no path registration, no error escalation, no ordering
//! decisions. `codegen-pipeline` phases call into these and hand the
//! result to `codegen-engine::GenerationContext::add_file`.

pub mod checklist;
pub mod controller;
pub mod dto;
pub mod dto_validator;
pub mod openapi;
pub mod plugins;
pub mod registry;
pub mod route;
pub mod sdk;
pub mod service;
pub mod ts_types;
pub mod validator;

pub use checklist::{render_checklist_document, render_checklist_entry};
pub use controller::render_controller_file;
pub use dto::render_dto_file;
pub use openapi::render_openapi_document;
pub use plugins::{render_plugin_index, render_plugin_registration};
pub use registry::{render_model_registration, render_registry_module};
pub use route::render_route_file;
pub use sdk::{render_client_index, render_http_client, render_model_hook, render_model_queries, render_version_constant};
pub use service::{needs_enhanced_service, render_service_file};
pub use validator::render_validator_file;
