//! Icon Resolver - Companion SVG Lookup
//!
//! Icons live next to the description file and are named after the
//! component: `{slug}.svg` for components without configurations, or
//! `{slug}--{configuration-slug}.svg` otherwise. Candidates are probed in
//! order and the first existing file wins.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::description::Description;
use crate::paths::clean_path;

/// Metadata key the resolved icon path is published under.
pub const ICON_METADATA_KEY: &str = "org.circuit-diagram.icon-svg";

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("static pattern"));

/// Lower-case `input`, collapse every run outside `[a-z0-9]` to `_` and
/// drop one trailing `_`.
pub fn sanitize_name(input: &str) -> String {
    // simple per-character mapping, so 'İ' lowers to a single 'i'
    let lowered: String = input
        .chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect();
    let mut result = NON_ALPHANUMERIC.replace_all(&lowered, "_").into_owned();
    if result.ends_with('_') {
        result.pop();
    }
    result
}

/// File names to probe, in priority order.
pub fn icon_candidates(description: &Description) -> Vec<String> {
    let component = sanitize_name(&description.component_name);

    if description.configurations.is_empty() {
        return vec![format!("{}.svg", component)];
    }

    description
        .configurations
        .iter()
        .map(|c| format!("{}--{}.svg", component, sanitize_name(&c.name)))
        .collect()
}

/// Locate the SVG icon for `description` inside `directory`.
///
/// Returns the normalized path of the first candidate that exists as a
/// regular file. An empty `directory` means the working directory and
/// yields a bare file name.
pub fn find_svg_icon(directory: &Path, description: &Description) -> Option<String> {
    let directory = clean_path(&directory.to_string_lossy());
    let search_root = if directory.is_empty() { "." } else { directory.as_str() };

    icon_candidates(description)
        .into_iter()
        .find(|icon| Path::new(search_root).join(icon).is_file())
        .map(|icon| join_display(&directory, &icon))
}

fn join_display(directory: &str, file_name: &str) -> String {
    if directory.is_empty() {
        file_name.to_string()
    } else if directory.ends_with('/') {
        format!("{}{}", directory, file_name)
    } else {
        format!("{}/{}", directory, file_name)
    }
}
