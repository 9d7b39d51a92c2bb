//! Output Fan-Out - One Input, Many Generators
//!
//! Runs each requested generator against the same input. The input is
//! rewound before every generator, and each output file lives only for the
//! duration of its own generator call.
//!
//! [`FanOut`] is lazy: nothing is written until the caller pulls the next
//! item. Use [`generate_all`] to run every request in order.

use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::slice;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::description::Description;
use crate::generators::{format_label, InputStream, OutputGenerator};
use crate::pipeline::CompileError;
use crate::preview::PreviewOptions;
use crate::resources::ResourceProvider;

/// A generator paired with where its output should go.
///
/// `destination` may name an existing directory, a file path, or be absent
/// to write into the working directory.
pub struct OutputRequest<'g> {
    pub generator: &'g dyn OutputGenerator,
    pub destination: Option<PathBuf>,
}

impl<'g> OutputRequest<'g> {
    pub fn new(generator: &'g dyn OutputGenerator, destination: Option<PathBuf>) -> Self {
        Self { generator, destination }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedOutput {
    /// Extension without the leading separator, e.g. `svg`
    pub format: String,
    pub path: String,
}

/// Where `{base_name}{extension}` is written for a given destination.
pub fn resolve_output_path(destination: Option<&Path>, base_name: &str, extension: &str) -> PathBuf {
    let file_name = format!("{}{}", base_name, extension);
    match destination {
        Some(dir) if dir.is_dir() => dir.join(file_name),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(file_name),
    }
}

pub struct FanOut<'a> {
    input: &'a mut dyn InputStream,
    description: &'a Description,
    base_name: &'a str,
    requests: slice::Iter<'a, OutputRequest<'a>>,
    resources: &'a dyn ResourceProvider,
    options: &'a PreviewOptions,
    failed: bool,
}

impl<'a> FanOut<'a> {
    pub fn new(
        input: &'a mut dyn InputStream,
        description: &'a Description,
        base_name: &'a str,
        requests: &'a [OutputRequest<'a>],
        resources: &'a dyn ResourceProvider,
        options: &'a PreviewOptions,
    ) -> Self {
        Self {
            input,
            description,
            base_name,
            requests: requests.iter(),
            resources,
            options,
            failed: false,
        }
    }

    fn run(&mut self, request: &OutputRequest<'_>) -> Result<GeneratedOutput, CompileError> {
        let extension = request.generator.file_extension();
        let format = format_label(extension).to_string();
        let path = resolve_output_path(request.destination.as_deref(), self.base_name, extension);
        let display = path.to_string_lossy().into_owned();

        let file = File::create(&path).map_err(|source| CompileError::Io {
            path: display.clone(),
            source,
        })?;
        let mut output = BufWriter::new(file);

        debug!("Starting {} generation.", format);
        self.input
            .seek(SeekFrom::Start(0))
            .map_err(CompileError::Rewind)?;

        request
            .generator
            .generate(self.description, self.resources, self.options, &mut *self.input, &mut output)
            .map_err(|source| CompileError::Generator {
                format: format.clone(),
                source,
            })?;

        output.flush().map_err(|source| CompileError::Io {
            path: display.clone(),
            source,
        })?;
        info!("  {:<4} -> {}", format, display);

        Ok(GeneratedOutput { format, path: display })
    }
}

impl Iterator for FanOut<'_> {
    type Item = Result<GeneratedOutput, CompileError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let request = self.requests.next()?;
        let result = self.run(request);
        self.failed = result.is_err();
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            (0, Some(0))
        } else {
            (0, Some(self.requests.len()))
        }
    }
}

/// Run every request in order, stopping at the first failure.
///
/// Files written before the failure are left on disk.
pub fn generate_all(
    input: &mut dyn InputStream,
    description: &Description,
    base_name: &str,
    requests: &[OutputRequest<'_>],
    resources: &dyn ResourceProvider,
    options: &PreviewOptions,
) -> Result<Vec<GeneratedOutput>, CompileError> {
    FanOut::new(input, description, base_name, requests, resources, options).collect()
}
