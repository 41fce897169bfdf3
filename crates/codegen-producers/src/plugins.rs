//! Plugin registration scaffolding. The plugin's actual feature body
//! (payment, email, AI integration code) is supplied by the plugin author,
//! not generated here — this only renders the manifest entry that wires a
//! declared plugin into the generated app.

/// `plugins/<plugin>.plugin.ts` — a thin registration stub naming the
/// plugin and the environment variable its credentials come from.
#[must_use]
pub fn render_plugin_registration(name: &str, enabled: bool, env_name: Option<&str>) -> String {
    let env_line = env_name
        .map(|env| format!("export const {name}EnvName = '{env}';\n"))
        .unwrap_or_default();
    format!("export const {name}Enabled = {enabled};\n{env_line}")
}

/// `plugins/index.ts` — re-exports every enabled plugin's registration
/// module, sorted by name to match the pipeline's deterministic order.
#[must_use]
pub fn render_plugin_index(plugin_names: &[String]) -> String {
    let mut sorted = plugin_names.to_vec();
    sorted.sort();
    let mut out = String::new();
    for name in &sorted {
        out.push_str(&format!("export * from './{name}.plugin';\n"));
    }
    out
}
