//! JSON dump of the parsed description.

use std::io::{Read, Write};

use serde::Serialize;

use super::{GeneratorError, InputStream, OutputGenerator};
use crate::description::Description;
use crate::preview::PreviewOptions;
use crate::resources::ResourceProvider;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDescriptionGenerator;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DescriptionDump<'a> {
    description: &'a Description,
    configuration: Option<&'a str>,
    source_bytes: usize,
}

impl OutputGenerator for JsonDescriptionGenerator {
    fn file_extension(&self) -> &str {
        ".json"
    }

    fn generate(
        &self,
        description: &Description,
        _resources: &dyn ResourceProvider,
        options: &PreviewOptions,
        input: &mut dyn InputStream,
        output: &mut dyn Write,
    ) -> Result<(), GeneratorError> {
        let mut source = Vec::new();
        input.read_to_end(&mut source)?;

        let document = DescriptionDump {
            description,
            configuration: options.configuration.as_deref(),
            source_bytes: source.len(),
        };
        serde_json::to_writer_pretty(&mut *output, &document)?;
        output.write_all(b"\n")?;
        Ok(())
    }
}
