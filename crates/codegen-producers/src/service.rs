//! Renders the standard and "enhanced" service class for a model: the CRUD
//! data-access layer the controller calls into.
//!
//! An enhanced service is emitted when the model's analysis reports
//! capabilities a plain CRUD service wouldn't cover on its own (soft
//! delete, search, or a plugin-declared external-service integration);
//! otherwise the standard service is enough.

use codegen_analyzer::UnifiedModelAnalysis;
use dmmf_core::types::ParsedModel;

/// Whether a model needs the enhanced service variant instead of the plain
/// CRUD one.
#[must_use]
pub fn needs_enhanced_service(analysis: &UnifiedModelAnalysis, service_annotations: &[String]) -> bool {
    let capabilities = analysis.capabilities();
    analysis.special_fields().has_soft_delete()
        || capabilities.has_search
        || !service_annotations.is_empty()
}

#[must_use]
pub fn render_service_file(
    model: &ParsedModel,
    analysis: &UnifiedModelAnalysis,
    service_annotations: &[String],
) -> String {
    if needs_enhanced_service(analysis, service_annotations) {
        render_enhanced_service(model, analysis, service_annotations)
    } else {
        render_standard_service(model)
    }
}

fn render_standard_service(model: &ParsedModel) -> String {
    let name = model.name();
    format!(
        "export class {name}Service {{\n  constructor(private readonly prisma: PrismaClient) {{}}\n\n  async create(data: Create{name}Dto): Promise<Read{name}Dto> {{\n    return this.prisma.{camel}.create({{ data }});\n  }}\n\n  async findMany(query: Query{name}Dto): Promise<Read{name}Dto[]> {{\n    return this.prisma.{camel}.findMany();\n  }}\n\n  async findOne(id: string): Promise<Read{name}Dto | null> {{\n    return this.prisma.{camel}.findUnique({{ where: {{ id }} }});\n  }}\n\n  async update(id: string, data: Update{name}Dto): Promise<Read{name}Dto> {{\n    return this.prisma.{camel}.update({{ where: {{ id }}, data }});\n  }}\n\n  async remove(id: string): Promise<void> {{\n    await this.prisma.{camel}.delete({{ where: {{ id }} }});\n  }}\n}}\n",
        name = name,
        camel = camel_case(name),
    )
}

fn render_enhanced_service(
    model: &ParsedModel,
    analysis: &UnifiedModelAnalysis,
    service_annotations: &[String],
) -> String {
    let name = model.name();
    let camel = camel_case(name);
    let mut out = render_standard_service(model);
    out.truncate(out.len() - 2);

    if let Some(deleted_at) = analysis.special_fields().deleted_at_field() {
        out.push_str(&format!(
            "\n  async softDelete(id: string): Promise<Read{name}Dto> {{\n    return this.prisma.{camel}.update({{ where: {{ id }}, data: {{ {deleted_at}: new Date() }} }});\n  }}\n"
        ));
    }

    if analysis.capabilities().has_search {
        let fields = analysis.capabilities().search_fields.join(", ");
        out.push_str(&format!(
            "\n  // Searches: {fields}\n  async search(term: string): Promise<Read{name}Dto[]> {{\n    return this.prisma.{camel}.findMany({{ where: {{ OR: [] }} }});\n  }}\n"
        ));
    }

    for integration in service_annotations {
        out.push_str(&format!(
            "\n  // Integration stub: {integration} is declared by a plugin but not wired up here.\n"
        ));
    }

    out.push_str("}\n");
    out
}

fn camel_case(model_name: &str) -> String {
    let mut chars = model_name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codegen_analyzer::{ModelCapabilities, SpecialFields};
    use dmmf_core::testing;

    fn bare_analysis(name: &str) -> UnifiedModelAnalysis {
        UnifiedModelAnalysis::new(name, vec![], SpecialFields::default(), ModelCapabilities::default())
    }

    #[test]
    fn standard_service_exposes_crud_methods() {
        let schema = testing::blog_schema();
        let user = schema.model("User").unwrap();
        let body = render_service_file(user, &bare_analysis("User"), &[]);
        assert!(body.contains("async create"));
        assert!(body.contains("async findMany"));
        assert!(body.contains("async remove"));
        assert!(!body.contains("softDelete"));
    }

    #[test]
    fn plugin_integration_forces_enhanced_variant() {
        let schema = testing::blog_schema();
        let user = schema.model("User").unwrap();
        let body = render_service_file(user, &bare_analysis("User"), &["stripe".to_string()]);
        assert!(body.contains("Integration stub: stripe"));
    }
}
