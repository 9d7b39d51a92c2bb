//! Preview Options
//!
//! Rendering hints handed unchanged to every generator. Loaded from a JSON
//! file and/or command line flags; the pipeline itself never reads them.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::description::MetadataMap;

#[derive(Debug, Error)]
pub enum PreviewConfigError {
    #[error("Failed to read preview options {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid preview options {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PreviewOptions {
    /// Center the component within the canvas
    pub center: bool,
    /// Shrink the canvas to the rendered bounds
    pub crop: bool,
    pub width: u32,
    pub height: u32,
    pub horizontal: bool,
    /// Component length along its main axis
    pub size: u32,
    pub configuration: Option<String>,
    pub properties: MetadataMap,
    pub debug_layout: bool,
    pub grid: bool,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            center: true,
            crop: false,
            width: 640,
            height: 480,
            horizontal: true,
            size: 60,
            configuration: None,
            properties: MetadataMap::new(),
            debug_layout: false,
            grid: false,
        }
    }
}

impl PreviewOptions {
    pub fn load(path: &Path) -> Result<Self, PreviewConfigError> {
        let display = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| PreviewConfigError::Io {
            path: display.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| PreviewConfigError::Parse {
            path: display,
            source,
        })
    }

    /// Canvas size after applying orientation.
    pub fn canvas_size(&self) -> [u32; 2] {
        if self.horizontal {
            [self.width, self.height]
        } else {
            [self.height, self.width]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_fields_use_defaults() {
        let options: PreviewOptions = serde_json::from_str(r#"{"width": 100, "grid": true}"#).unwrap();
        assert_eq!(options.width, 100);
        assert_eq!(options.height, 480);
        assert!(options.grid);
        assert!(options.center);
    }

    #[test]
    fn test_properties_keep_order() {
        let options: PreviewOptions =
            serde_json::from_str(r#"{"properties": {"resistance": "4k7", "style": "IEC"}}"#).unwrap();
        assert_eq!(options.properties.keys().collect::<Vec<_>>(), vec!["resistance", "style"]);
    }

    #[test]
    fn test_load_reports_path_on_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preview.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = PreviewOptions::load(&path).unwrap_err();
        assert!(matches!(err, PreviewConfigError::Parse { .. }));
        assert!(err.to_string().contains("preview.json"));
    }

    #[test]
    fn test_vertical_swaps_canvas() {
        let options = PreviewOptions {
            horizontal: false,
            ..PreviewOptions::default()
        };
        assert_eq!(options.canvas_size(), [480, 640]);
    }
}
