//! SVG preview of a component.
//!
//! Draws the component as a labelled body on an optional grid. The layout
//! follows the preview options only; the drawing data of the description is
//! not interpreted here.

use std::fmt::Write as _;
use std::io::{Read, Write};

use super::{GeneratorError, InputStream, OutputGenerator};
use crate::description::Description;
use crate::preview::PreviewOptions;
use crate::resources::ResourceProvider;

/// Optional stylesheet embedded into every preview when available.
pub const PREVIEW_STYLESHEET: &str = "preview.css";

const GRID_SPACING: u32 = 10;

#[derive(Debug, Clone, Copy, Default)]
pub struct SvgPreviewGenerator;

impl OutputGenerator for SvgPreviewGenerator {
    fn file_extension(&self) -> &str {
        ".svg"
    }

    fn generate(
        &self,
        description: &Description,
        resources: &dyn ResourceProvider,
        options: &PreviewOptions,
        _input: &mut dyn InputStream,
        output: &mut dyn Write,
    ) -> Result<(), GeneratorError> {
        if let Some(name) = &options.configuration {
            if description.configuration(name).is_none() {
                return Err(GeneratorError::Render(format!(
                    "Configuration '{}' is not declared by {}",
                    name, description.component_name
                )));
            }
        }

        let style = if resources.has_resource(PREVIEW_STYLESHEET) {
            let mut css = String::new();
            resources.open_resource(PREVIEW_STYLESHEET)?.read_to_string(&mut css)?;
            Some(css)
        } else {
            None
        };

        let svg = render(description, options, style.as_deref());
        output.write_all(svg.as_bytes())?;
        Ok(())
    }
}

fn render(description: &Description, options: &PreviewOptions, style: Option<&str>) -> String {
    let [canvas_w, canvas_h] = options.canvas_size();
    let [body_w, body_h] = if options.horizontal {
        [options.size, options.size / 2]
    } else {
        [options.size / 2, options.size]
    };
    let [width, height] = if options.crop {
        [body_w, body_h]
    } else {
        [canvas_w, canvas_h]
    };
    let (x, y) = if options.center && !options.crop {
        (
            width.saturating_sub(body_w) / 2,
            height.saturating_sub(body_h) / 2,
        )
    } else {
        (0, 0)
    };

    let mut title = description.component_name.clone();
    if let Some(configuration) = &options.configuration {
        title.push_str(" (");
        title.push_str(configuration);
        title.push(')');
    }

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = width,
        h = height
    );
    let _ = writeln!(svg, "  <title>{}</title>", escape_xml(&title));
    if let Some(css) = style {
        let _ = writeln!(svg, "  <style>{}</style>", escape_xml(css));
    }
    if options.grid {
        let _ = writeln!(
            svg,
            r##"  <defs><pattern id="grid" width="{s}" height="{s}" patternUnits="userSpaceOnUse"><path d="M {s} 0 L 0 0 0 {s}" fill="none" stroke="#ddd" stroke-width="0.5"/></pattern></defs>"##,
            s = GRID_SPACING
        );
        let _ = writeln!(svg, r#"  <rect width="100%" height="100%" fill="url(#grid)"/>"#);
    }
    let _ = writeln!(
        svg,
        r##"  <rect class="component" x="{}" y="{}" width="{}" height="{}" fill="none" stroke="#000" stroke-width="2"/>"##,
        x, y, body_w, body_h
    );
    if options.debug_layout {
        let _ = writeln!(
            svg,
            r##"  <rect class="debug-bounds" x="0" y="0" width="{}" height="{}" fill="none" stroke="#f00" stroke-dasharray="4"/>"##,
            width, height
        );
    }
    for (name, value) in options.properties.iter() {
        let _ = writeln!(
            svg,
            r#"  <metadata data-property="{}">{}</metadata>"#,
            escape_xml(name),
            escape_xml(value)
        );
    }
    svg.push_str("</svg>\n");
    svg
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::Configuration;
    use crate::resources::{DirectoryResourceProvider, NoResources};
    use std::io::Cursor;
    use tempfile::TempDir;
    use uuid::Uuid;

    fn render_to_string(
        description: &Description,
        resources: &dyn ResourceProvider,
        options: &PreviewOptions,
    ) -> Result<String, GeneratorError> {
        let mut input = Cursor::new(Vec::new());
        let mut output = Vec::new();
        SvgPreviewGenerator.generate(description, resources, options, &mut input, &mut output)?;
        Ok(String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_renders_sized_canvas_with_title() {
        let description = Description::new("R & C", Uuid::nil());
        let svg = render_to_string(&description, &NoResources, &PreviewOptions::default()).unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="640" height="480""#));
        assert!(svg.contains("<title>R &amp; C</title>"));
        assert!(!svg.contains("pattern"));
    }

    #[test]
    fn test_grid_and_crop() {
        let description = Description::new("Lamp", Uuid::nil());
        let options = PreviewOptions {
            grid: true,
            crop: true,
            ..PreviewOptions::default()
        };
        let svg = render_to_string(&description, &NoResources, &options).unwrap();

        assert!(svg.contains(r#"<pattern id="grid""#));
        assert!(svg.contains(r#"width="60" height="30""#));
    }

    #[test]
    fn test_unknown_configuration_fails() {
        let mut description = Description::new("Switch", Uuid::nil());
        description.configurations.push(Configuration::new("Push"));
        let options = PreviewOptions {
            configuration: Some("Toggle".to_string()),
            ..PreviewOptions::default()
        };

        let err = render_to_string(&description, &NoResources, &options).unwrap_err();
        assert!(matches!(err, GeneratorError::Render(_)));

        let options = PreviewOptions {
            configuration: Some("Push".to_string()),
            ..PreviewOptions::default()
        };
        let svg = render_to_string(&description, &NoResources, &options).unwrap();
        assert!(svg.contains("<title>Switch (Push)</title>"));
    }

    #[test]
    fn test_embeds_stylesheet_resource() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(PREVIEW_STYLESHEET), ".component { stroke: blue; }").unwrap();
        let resources = DirectoryResourceProvider::new(dir.path());

        let description = Description::new("Cell", Uuid::nil());
        let svg = render_to_string(&description, &resources, &PreviewOptions::default()).unwrap();
        assert!(svg.contains("<style>.component { stroke: blue; }</style>"));
    }
}
