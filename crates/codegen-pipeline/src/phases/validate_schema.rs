//! Phase 0.75: run detailed parser validation against the already-parsed
//! schema before any analysis or generation phase touches it.

use codegen_engine::{Diagnostic, GenerationContext, Severity};
use dmmf_core::validate_detailed;

use crate::error::PhaseError;
use crate::phase::Phase;

pub struct ValidateSchemaPhase;

impl Phase for ValidateSchemaPhase {
    fn name(&self) -> &'static str {
        "validate-schema"
    }

    fn order(&self) -> f64 {
        0.75
    }

    fn execute(&self, context: &mut GenerationContext) -> Result<(), PhaseError> {
        if let Err(failure) = validate_detailed(context.schema()) {
            let mut should_abort = false;
            for error in &failure.errors {
                if context.report(Diagnostic::new(Severity::Validation, self.name(), error.to_string())) {
                    should_abort = true;
                }
            }
            if should_abort {
                return Err(PhaseError::Message(failure.to_string()));
            }
        }
        Ok(())
    }
}
