use serde::Deserialize;
use std::fmt::Write;

use super::OutputDocument;

fn default_interface_name() -> String {
    "RealCountyShape".to_string()
}
fn default_array_name() -> String {
    "realCaliforniaCountyShapes".to_string()
}
fn default_regions_name() -> String {
    "countyRegions".to_string()
}

/// Identifiers used in the generated TypeScript module
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TypescriptNames {
    #[serde(default = "default_interface_name")]
    pub interface_name: String,
    #[serde(default = "default_array_name")]
    pub array_name: String,
    #[serde(default = "default_regions_name")]
    pub regions_name: String,
}

impl Default for TypescriptNames {
    fn default() -> Self {
        Self {
            interface_name: default_interface_name(),
            array_name: default_array_name(),
            regions_name: default_regions_name(),
        }
    }
}

/// Render a TypeScript module with the interface, the region map and the
/// shape array
pub fn render_typescript(doc: &OutputDocument<'_>, names: &TypescriptNames) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "// Region boundaries generated by regionpaths from {}", doc.source);
    let _ = writeln!(out, "// Paths simplified with Douglas-Peucker. Do not edit by hand.");
    out.push('\n');

    let _ = writeln!(out, "export interface {} {{", names.interface_name);
    out.push_str("  id: string;\n");
    out.push_str("  name: string;\n");
    out.push_str("  abbrev: string;\n");
    out.push_str("  path: string;\n");
    out.push_str("  pathDetailed?: string;\n");
    out.push_str("  center: [number, number];\n");
    out.push_str("  region?: string;\n");
    out.push_str("}\n\n");

    let _ = writeln!(
        out,
        "export const {}: Record<string, string> = {{",
        names.regions_name
    );
    for (name, region) in doc.regions.iter() {
        let _ = writeln!(out, "  {}: {},", quote(name, '"'), quote(region, '"'));
    }
    out.push_str("};\n\n");

    let _ = writeln!(
        out,
        "export const {}: {}[] = [",
        names.array_name, names.interface_name
    );
    for shape in doc.shapes {
        out.push_str("  {\n");
        let _ = writeln!(out, "    id: {},", quote(&shape.id, '\''));
        let _ = writeln!(out, "    name: {},", quote(&shape.name, '\''));
        let _ = writeln!(out, "    abbrev: {},", quote(&shape.abbrev, '\''));
        let _ = writeln!(out, "    path: `{}`,", shape.path);
        if let Some(detailed) = &shape.path_detailed {
            let _ = writeln!(out, "    pathDetailed: `{}`,", detailed);
        }
        let _ = writeln!(
            out,
            "    center: [{:.1}, {:.1}],",
            shape.center[0], shape.center[1]
        );
        if let Some(region) = &shape.region {
            let _ = writeln!(out, "    region: {},", quote(region, '\''));
        }
        out.push_str("  },\n");
    }
    out.push_str("];\n");

    out
}

/// String literal delimited by `delim` with backslash escapes
fn quote(s: &str, delim: char) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push(delim);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c if c == delim => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(delim);
    out
}
