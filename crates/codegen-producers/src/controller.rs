//! Renders the CRUD controller for a model, framework-aware
//! (Express/Fastify). The controller is the only producer that branches on
//! [`HttpFramework`] — everything downstream (routes) just asks whether the
//! controller emitted anything.

use dmmf_core::constants::HttpFramework;
use dmmf_core::types::ParsedModel;

#[must_use]
pub fn render_controller_file(model: &ParsedModel, framework: HttpFramework) -> String {
    match framework {
        HttpFramework::Express => render_express_controller(model),
        HttpFramework::Fastify => render_fastify_controller(model),
    }
}

fn render_express_controller(model: &ParsedModel) -> String {
    let name = model.name();
    format!(
        "import { Request, Response } from 'express';\nimport {{ {name}Service }} from './{name_lower}.service';\n\nexport class {name}Controller {{\n  constructor(private readonly service: {name}Service) {{}}\n\n  create = async (req: Request, res: Response): Promise<void> => {{\n    res.status(201).json(await this.service.create(req.body));\n  }};\n\n  findMany = async (req: Request, res: Response): Promise<void> => {{\n    res.json(await this.service.findMany(req.query as Query{name}Dto));\n  }};\n\n  findOne = async (req: Request, res: Response): Promise<void> => {{\n    const found = await this.service.findOne(req.params.id);\n    if (!found) {{\n      res.status(404).end();\n      return;\n    }}\n    res.json(found);\n  }};\n\n  update = async (req: Request, res: Response): Promise<void> => {{\n    res.json(await this.service.update(req.params.id, req.body));\n  }};\n\n  remove = async (req: Request, res: Response): Promise<void> => {{\n    await this.service.remove(req.params.id);\n    res.status(204).end();\n  }};\n}}\n",
        name = name,
        name_lower = model.name_lower(),
    )
}

fn render_fastify_controller(model: &ParsedModel) -> String {
    let name = model.name();
    format!(
        "import type {{ FastifyRequest, FastifyReply }} from 'fastify';\nimport {{ {name}Service }} from './{name_lower}.service';\n\nexport class {name}Controller {{\n  constructor(private readonly service: {name}Service) {{}}\n\n  async create(request: FastifyRequest, reply: FastifyReply): Promise<void> {{\n    reply.status(201).send(await this.service.create(request.body as Create{name}Dto));\n  }}\n\n  async findMany(request: FastifyRequest, reply: FastifyReply): Promise<void> {{\n    reply.send(await this.service.findMany(request.query as Query{name}Dto));\n  }}\n\n  async findOne(request: FastifyRequest<{{ Params: {{ id: string }} }}>, reply: FastifyReply): Promise<void> {{\n    const found = await this.service.findOne(request.params.id);\n    if (!found) {{\n      reply.status(404).send();\n      return;\n    }}\n    reply.send(found);\n  }}\n\n  async update(request: FastifyRequest<{{ Params: {{ id: string }} }}>, reply: FastifyReply): Promise<void> {{\n    reply.send(await this.service.update(request.params.id, request.body as Update{name}Dto));\n  }}\n\n  async remove(request: FastifyRequest<{{ Params: {{ id: string }} }}>, reply: FastifyReply): Promise<void> {{\n    await this.service.remove(request.params.id);\n    reply.status(204).send();\n  }}\n}}\n",
        name = name,
        name_lower = model.name_lower(),
    )
}
