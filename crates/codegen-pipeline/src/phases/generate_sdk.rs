//! Phase 8: generate the typed client SDK. Per-model query rendering is
//! CPU-bound but independent across models, so it runs as a set of
//! `tokio` tasks fanned out across a dedicated multi-thread runtime and
//! merged back under the context's single-threaded file builder — the
//! only shared resource touched by the parallel region.
//!
//! Tasks complete in whatever order the runtime schedules them; the merge
//! step sorts by model name before registering any file, so the emitted
//! path list (and `sdk/index.ts`'s re-export order) is identical across
//! runs regardless of completion order.

use codegen_engine::{ArtifactFamily, GenerationContext};
use codegen_producers::{render_client_index, render_http_client, render_model_queries, render_version_constant};
use dmmf_core::types::ParsedModel;

use crate::error::PhaseError;
use crate::phase::Phase;
use crate::phases::registry_mode::model_output_path;

pub struct GenerateSdkPhase {
    sdk_version: String,
}

impl GenerateSdkPhase {
    #[must_use]
    pub fn new(sdk_version: impl Into<String>) -> Self {
        Self {
            sdk_version: sdk_version.into(),
        }
    }
}

struct SdkTaskResult {
    model_name: String,
    path: String,
    body: String,
}

async fn render_one_model(model: ParsedModel) -> SdkTaskResult {
    SdkTaskResult {
        model_name: model.name().to_string(),
        path: model_output_path("sdk", model.name_lower(), "queries"),
        body: render_model_queries(&model),
    }
}

impl Phase for GenerateSdkPhase {
    fn name(&self) -> &'static str {
        "generate-sdk"
    }

    fn order(&self) -> f64 {
        8.0
    }

    fn execute(&self, context: &mut GenerationContext) -> Result<(), PhaseError> {
        let models: Vec<ParsedModel> = context.schema().models().to_vec();
        let worker_count = models.len().clamp(1, 8);

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(worker_count)
            .enable_all()
            .build()
            .map_err(|err| PhaseError::Message(format!("failed to start sdk task runtime: {err}")))?;

        let joined = runtime.block_on(async {
            let tasks: Vec<_> = models.into_iter().map(|model| tokio::spawn(render_one_model(model))).collect();
            futures::future::join_all(tasks).await
        });

        let mut results = Vec::with_capacity(joined.len());
        for outcome in joined {
            let result = outcome.map_err(|err| PhaseError::Message(format!("sdk generation task panicked: {err}")))?;
            results.push(result);
        }

        // Deterministic merge: sort by model name so file order never
        // depends on which task happened to finish first.
        results.sort_by(|a, b| a.model_name.cmp(&b.model_name));

        let mut model_names = Vec::with_capacity(results.len());
        for result in results {
            context.add_file(ArtifactFamily::Sdk, &result.path, result.body, self.name(), Some(&result.model_name))?;
            model_names.push(result.model_name);
        }

        context.add_file(ArtifactFamily::Sdk, "sdk/core/http.ts", render_http_client(), self.name(), None)?;
        context.add_file(ArtifactFamily::Sdk, "sdk/version.ts", render_version_constant(&self.sdk_version), self.name(), None)?;
        context.add_file(ArtifactFamily::Sdk, "sdk/index.ts", render_client_index(&model_names), self.name(), None)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codegen_analyzer::AnalysisCache;
    use codegen_engine::ErrorEscalationPolicy;
    use dmmf_core::testing;
    use std::sync::Arc;

    #[test]
    fn emits_per_model_queries_plus_the_three_schema_wide_files() {
        let schema = testing::blog_schema();
        let model_count = schema.models().len();
        let analysis = Arc::new(AnalysisCache::new());
        let mut context = GenerationContext::new(Arc::new(schema), analysis, ErrorEscalationPolicy::default_policy());
        GenerateSdkPhase::new("1.2.3").execute(&mut context).unwrap();

        assert_eq!(context.files().len(), model_count + 3);
        assert!(context.files().get(ArtifactFamily::Sdk, "sdk/version.ts").unwrap().contains("1.2.3"));
        assert!(context.files().get(ArtifactFamily::Sdk, "sdk/user/user.queries.ts").is_some());
    }

    #[test]
    fn index_lists_models_sorted_regardless_of_task_completion_order() {
        let schema = testing::blog_schema();
        let analysis = Arc::new(AnalysisCache::new());
        let mut context = GenerationContext::new(Arc::new(schema), analysis, ErrorEscalationPolicy::default_policy());
        GenerateSdkPhase::new("1.0.0").execute(&mut context).unwrap();
        let index = context.files().get(ArtifactFamily::Sdk, "sdk/index.ts").unwrap();
        let post_pos = index.find("post").unwrap();
        let user_pos = index.find("user").unwrap();
        assert!(post_pos < user_pos);
    }
}
