//! Renders the route wiring for a model's controller.
//!
//! Routes are a thin layer over the controller; when a model's controller
//! phase emitted nothing (e.g. a plugin opted the model out of HTTP
//! exposure), the route file is skipped entirely rather than wiring up
//! handlers that don't exist.

use dmmf_core::constants::HttpFramework;
use dmmf_core::types::ParsedModel;

/// Render the route file for a model, or `None` if no controller was
/// generated for it.
#[must_use]
pub fn render_route_file(
    model: &ParsedModel,
    framework: HttpFramework,
    controller_emitted: bool,
) -> Option<String> {
    if !controller_emitted {
        return None;
    }
    let name = model.name();
    let name_lower = model.name_lower();
    let body = match framework {
        HttpFramework::Express => format!(
            "import {{ Router }} from 'express';\nimport {{ {name}Controller }} from './{name_lower}.controller';\n\nexport function build{name}Router(controller: {name}Controller): Router {{\n  const router = Router();\n  router.post('/', controller.create);\n  router.get('/', controller.findMany);\n  router.get('/:id', controller.findOne);\n  router.patch('/:id', controller.update);\n  router.delete('/:id', controller.remove);\n  return router;\n}}\n",
        ),
        HttpFramework::Fastify => format!(
            "import type {{ FastifyInstance }} from 'fastify';\nimport {{ {name}Controller }} from './{name_lower}.controller';\n\nexport async function register{name}Routes(app: FastifyInstance, controller: {name}Controller): Promise<void> {{\n  app.post('/', controller.create.bind(controller));\n  app.get('/', controller.findMany.bind(controller));\n  app.get('/:id', controller.findOne.bind(controller));\n  app.patch('/:id', controller.update.bind(controller));\n  app.delete('/:id', controller.remove.bind(controller));\n}}\n",
        ),
    };
    Some(body)
}
