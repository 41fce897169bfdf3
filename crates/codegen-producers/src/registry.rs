//! "Registry mode" producer: when enabled, replaces the DTO/validator/
//! service phase trio (orders 3-5) with one consolidated module plus a
//! per-model registration entry, instead of three separate file families.

use dmmf_core::types::ParsedModel;

use crate::dto_validator::create_field_specs;

/// `registry/registry.ts` — the shared module every per-model registration
/// imports from.
#[must_use]
pub fn render_registry_module() -> String {
    "export interface ModelRegistration {\n  name: string;\n  dto: unknown;\n  validator: unknown;\n  service: unknown;\n}\n\nexport const registry = new Map<string, ModelRegistration>();\n\nexport function register(entry: ModelRegistration): void {\n  registry.set(entry.name, entry);\n}\n".to_string()
}

/// `registry/<model>.registration.ts` — one model's DTO/validator/service
/// trio, folded into a single registration call instead of three files.
#[must_use]
pub fn render_model_registration(model: &ParsedModel) -> String {
    let name = model.name();
    let fields: Vec<String> = create_field_specs(model)
        .into_iter()
        .map(|spec| format!("    {}: {{}},", spec.name))
        .collect();
    format!(
        "import { register } from './registry';\n\nregister({{\n  name: '{name}',\n  dto: {{\n{fields}\n  }},\n  validator: {{}},\n  service: {{}},\n}});\n",
        name = name,
        fields = fields.join("\n"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmmf_core::testing;

    #[test]
    fn registration_calls_register_with_model_name() {
        let schema = testing::blog_schema();
        let user = schema.model("User").unwrap();
        let body = render_model_registration(user);
        assert!(body.contains("name: 'User'"));
        assert!(body.contains("register({"));
    }
}
