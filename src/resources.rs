//! Resource lookup for generators (fonts, images referenced by a component).
//!
//! Opaque to the pipeline: the same provider is passed to every generator.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};

pub trait ResourceProvider {
    fn has_resource(&self, name: &str) -> bool;
    fn open_resource(&self, name: &str) -> io::Result<Box<dyn Read>>;
}

/// Provides nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResources;

impl ResourceProvider for NoResources {
    fn has_resource(&self, _name: &str) -> bool {
        false
    }

    fn open_resource(&self, name: &str) -> io::Result<Box<dyn Read>> {
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("resource not found: {}", name),
        ))
    }
}

/// Resolves resource names as relative paths under a root directory.
#[derive(Debug, Clone)]
pub struct DirectoryResourceProvider {
    root: PathBuf,
}

impl DirectoryResourceProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Names may not escape the root.
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        let relative = Path::new(name);
        let confined = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        confined.then(|| self.root.join(relative))
    }
}

impl ResourceProvider for DirectoryResourceProvider {
    fn has_resource(&self, name: &str) -> bool {
        self.resolve(name).is_some_and(|p| p.is_file())
    }

    fn open_resource(&self, name: &str) -> io::Result<Box<dyn Read>> {
        let path = self.resolve(name).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("resource name escapes root: {}", name),
            )
        })?;
        Ok(Box::new(File::open(path)?))
    }
}
