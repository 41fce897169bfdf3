//! Renders the per-model slice of the generated client SDK: typed query
//! functions plus the client method bundle. The version constant and the
//! top-level client aggregator are schema-wide and rendered once by
//! [`render_version_constant`]/[`render_client_index`], not per model —
//! the pipeline's SDK phase fans the per-model half out across parallel
//! tasks and merges the two halves together.

use dmmf_core::types::ParsedModel;

/// `sdk/core/http.ts` — the single low-level `request` helper every
/// per-model queries module imports from. Schema-wide and rendered once,
/// same as [`render_version_constant`]/[`render_client_index`].
#[must_use]
pub fn render_http_client() -> String {
    "export async function request<T>(\n  method: string,\n  path: string,\n  body?: unknown,\n  query?: Record<string, unknown>,\n): Promise<T> {\n  const url = new URL(path, typeof window === 'undefined' ? 'http://localhost' : window.location.origin);\n  if (query) {\n    for (const [key, value] of Object.entries(query)) {\n      if (value !== undefined) {\n        url.searchParams.set(key, String(value));\n      }\n    }\n  }\n  const response = await fetch(url.toString(), {\n    method,\n    headers: { 'Content-Type': 'application/json' },\n    body: body === undefined ? undefined : JSON.stringify(body),\n  });\n  if (!response.ok) {\n    throw new Error(`request failed: ${method} ${path} -> ${response.status}`);\n  }\n  if (response.status === 204) {\n    return undefined as T;\n  }\n  return (await response.json()) as T;\n}\n".to_string()
}

/// `sdk/<model>/<model>.queries.ts` — the typed fetch/mutate functions for
/// one model.
#[must_use]
pub fn render_model_queries(model: &ParsedModel) -> String {
    let name = model.name();
    let name_lower = model.name_lower();
    format!(
        "import type {{ Create{name}Dto, Update{name}Dto, Read{name}Dto, Query{name}Dto }} from '../../contracts/{name_lower}/{name_lower}.dto';\nimport {{ request }} from '../core/http';\n\nexport async function create{name}(data: Create{name}Dto): Promise<Read{name}Dto> {{\n  return request('POST', '/{name_lower}', data);\n}}\n\nexport async function list{name}(query?: Query{name}Dto): Promise<Read{name}Dto[]> {{\n  return request('GET', '/{name_lower}', undefined, query);\n}}\n\nexport async function get{name}(id: string): Promise<Read{name}Dto> {{\n  return request('GET', `/{name_lower}/${{id}}`);\n}}\n\nexport async function update{name}(id: string, data: Update{name}Dto): Promise<Read{name}Dto> {{\n  return request('PATCH', `/{name_lower}/${{id}}`, data);\n}}\n\nexport async function delete{name}(id: string): Promise<void> {{\n  await request('DELETE', `/{name_lower}/${{id}}`);\n}}\n",
        name = name,
        name_lower = name_lower,
    )
}

/// `sdk/<model>/<model>.hooks.ts`, gated per framework — only called for a
/// framework present in the validated `hooksFrameworks` config set.
#[must_use]
pub fn render_model_hook(model: &ParsedModel, framework: dmmf_core::constants::HookFramework) -> String {
    use dmmf_core::constants::HookFramework;
    let name = model.name();
    let name_lower = model.name_lower();
    match framework {
        HookFramework::React => format!(
            "import {{ useQuery }} from '@tanstack/react-query';\nimport {{ list{name} }} from './{name_lower}.queries';\n\nexport function use{name}List() {{\n  return useQuery({{ queryKey: ['{name_lower}'], queryFn: () => list{name}() }});\n}}\n",
        ),
        HookFramework::Vue => format!(
            "import {{ useQuery }} from '@tanstack/vue-query';\nimport {{ list{name} }} from './{name_lower}.queries';\n\nexport function use{name}List() {{\n  return useQuery({{ queryKey: ['{name_lower}'], queryFn: () => list{name}() }});\n}}\n",
        ),
        HookFramework::Svelte => format!(
            "import {{ createQuery }} from '@tanstack/svelte-query';\nimport {{ list{name} }} from './{name_lower}.queries';\n\nexport function use{name}List() {{\n  return createQuery({{ queryKey: ['{name_lower}'], queryFn: () => list{name}() }});\n}}\n",
        ),
        HookFramework::Solid => format!(
            "import {{ createQuery }} from '@tanstack/solid-query';\nimport {{ list{name} }} from './{name_lower}.queries';\n\nexport function use{name}List() {{\n  return createQuery(() => ({{ queryKey: ['{name_lower}'], queryFn: () => list{name}() }}));\n}}\n",
        ),
    }
}

/// `sdk/version.ts`. Rejects placeholder versions upstream, in the
/// validate-config phase — by the time this runs, `version` is a real
/// semver string.
#[must_use]
pub fn render_version_constant(version: &str) -> String {
    format!("export const SDK_VERSION = '{version}';\n")
}

/// `sdk/index.ts` — re-exports every model's query module, sorted by model
/// name to match the deterministic merge order the pipeline guarantees.
#[must_use]
pub fn render_client_index(model_names: &[String]) -> String {
    let mut sorted = model_names.to_vec();
    sorted.sort();
    let mut out = String::new();
    for name in &sorted {
        let name_lower = name.to_lowercase();
        out.push_str(&format!("export * from './{name_lower}/{name_lower}.queries';\n"));
    }
    out.push_str("export * from './version';\n");
    out
}
