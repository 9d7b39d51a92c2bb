//! Output Generators - Pluggable Renderers
//!
//! A generator turns one parsed description into one output file. It is
//! handed the original input rewound to offset zero and an output stream it
//! does not own; the caller opens, flushes and closes files.

use std::io::{Read, Seek, Write};

use thiserror::Error;

use crate::description::Description;
use crate::preview::PreviewOptions;
use crate::resources::ResourceProvider;

pub mod json;
pub mod svg;

pub use json::JsonDescriptionGenerator;
pub use svg::SvgPreviewGenerator;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Render error: {0}")]
    Render(String),
}

/// Seekable input handed to generators.
pub trait InputStream: Read + Seek {}

impl<T: Read + Seek> InputStream for T {}

pub trait OutputGenerator {
    /// Extension of produced files, including the leading `.`.
    fn file_extension(&self) -> &str;

    fn generate(
        &self,
        description: &Description,
        resources: &dyn ResourceProvider,
        options: &PreviewOptions,
        input: &mut dyn InputStream,
        output: &mut dyn Write,
    ) -> Result<(), GeneratorError>;
}

/// Every generator shipped with the crate, in CLI listing order.
pub fn builtin_generators() -> Vec<Box<dyn OutputGenerator>> {
    vec![
        Box::new(SvgPreviewGenerator),
        Box::new(JsonDescriptionGenerator),
    ]
}

/// Format label for an extension: `.svg` becomes `svg`.
pub fn format_label(extension: &str) -> &str {
    let mut chars = extension.chars();
    match chars.next() {
        Some(_) => chars.as_str(),
        None => extension,
    }
}
