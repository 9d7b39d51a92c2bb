//! Compile Pipeline - Single Entry Point
//!
//! `compile_one` loads a description, fans it out to the requested
//! generators, resolves the companion icon and returns one result record.
//! Nothing is recovered here: every error goes back to the caller, which
//! decides whether the rest of a batch still runs.

use std::fs::File;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::description::MetadataMap;
use crate::fanout::{generate_all, OutputRequest};
use crate::generators::GeneratorError;
use crate::icon::{find_svg_icon, ICON_METADATA_KEY};
use crate::loader::{DescriptionSource, LoadError, XmlLoader};
use crate::paths::{base_name, clean_path, parent_dir};
use crate::preview::PreviewOptions;
use crate::resources::{NoResources, ResourceProvider};

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to load {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: LoadError,
    },

    #[error("Failed to rewind input: {0}")]
    Rewind(#[source] std::io::Error),

    #[error("Format {format} produced both {first} and {second}")]
    DuplicateFormat {
        format: String,
        first: String,
        second: String,
    },

    #[error("{format} generation failed: {source}")]
    Generator {
        format: String,
        #[source]
        source: GeneratorError,
    },
}

/// Summary of one compiled description.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileResult {
    pub author: Option<String>,
    pub component_name: String,
    pub guid: Uuid,
    pub success: bool,
    pub additional_information: String,
    pub input: String,
    pub metadata: MetadataMap,
    /// Format label to produced file path, in request order
    pub outputs: MetadataMap,
}

/// Results of a batch, as written by the CLI.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest<'a> {
    pub compiler_version: &'a str,
    pub components: &'a [CompileResult],
}

impl<'a> Manifest<'a> {
    pub fn new(components: &'a [CompileResult]) -> Self {
        Self {
            compiler_version: crate::COMPILER_VERSION,
            components,
        }
    }
}

pub struct CompileRunner {
    source: Box<dyn DescriptionSource>,
    resources: Box<dyn ResourceProvider>,
}

impl CompileRunner {
    pub fn new(resources: Box<dyn ResourceProvider>) -> Self {
        Self {
            source: Box::new(XmlLoader),
            resources,
        }
    }

    /// Replace the XML loader with another description source.
    pub fn with_source(mut self, source: Box<dyn DescriptionSource>) -> Self {
        self.source = source;
        self
    }

    /// Compile one input file into every requested format.
    pub fn compile_one(
        &self,
        input_file: &Path,
        options: &PreviewOptions,
        formats: &[OutputRequest<'_>],
    ) -> Result<CompileResult, CompileError> {
        let input_display = input_file.display().to_string();
        info!("{}", input_display);

        let mut input = File::open(input_file).map_err(|source| CompileError::Io {
            path: input_display.clone(),
            source,
        })?;

        let description = self.source.load(&mut input).map_err(|source| CompileError::Load {
            path: input_display.clone(),
            source,
        })?;

        let generated = generate_all(
            &mut input,
            &description,
            &base_name(input_file),
            formats,
            self.resources.as_ref(),
            options,
        )?;
        let mut outputs = MetadataMap::new();
        for output in generated {
            if let Some(first) = outputs.get(&output.format) {
                if first != output.path {
                    return Err(CompileError::DuplicateFormat {
                        first: first.to_string(),
                        second: output.path,
                        format: output.format,
                    });
                }
            }
            outputs.insert(output.format, output.path);
        }

        let mut metadata = description.metadata.clone();
        if let Some(icon) = find_svg_icon(parent_dir(input_file), &description) {
            metadata.insert(ICON_METADATA_KEY, icon);
        }

        Ok(CompileResult {
            author: description.author,
            component_name: description.component_name,
            guid: description.guid,
            success: true,
            additional_information: description.additional_information,
            input: clean_path(&input_display),
            metadata,
            outputs,
        })
    }
}

impl Default for CompileRunner {
    fn default() -> Self {
        Self::new(Box::new(NoResources))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with(metadata: &[(&str, &str)], outputs: &[(&str, &str)]) -> CompileResult {
        CompileResult {
            author: None,
            component_name: "Widget".to_string(),
            guid: Uuid::nil(),
            success: true,
            additional_information: String::new(),
            input: "widget.xml".to_string(),
            metadata: metadata.iter().copied().collect(),
            outputs: outputs.iter().copied().collect(),
        }
    }

    #[test]
    fn test_manifest_keeps_insertion_order() {
        let results = vec![result_with(
            &[("zeta", "1"), ("alpha", "2")],
            &[("svg", "widget.svg"), ("json", "widget.json")],
        )];
        let text = serde_json::to_string_pretty(&Manifest::new(&results)).unwrap();

        assert!(text.contains(r#""compilerVersion""#));
        assert!(text.find(r#""zeta""#).unwrap() < text.find(r#""alpha""#).unwrap());
        assert!(text.find(r#""svg""#).unwrap() < text.find(r#""json""#).unwrap());
    }
}
