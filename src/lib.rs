//! Component Compiler - Description to Artifacts
//!
//! Compiles one component description file into every requested output
//! format and reports what was produced.
//!
//! # Pipeline
//! 1. Load the description (`loader`)
//! 2. Fan out to the generators, each reading the input from the start (`fanout`)
//! 3. Attach the companion SVG icon, if one exists (`icon`)
//! 4. Return a `CompileResult` (`pipeline`)

pub mod description;
pub mod loader;
pub mod generators;
pub mod resources;
pub mod preview;
pub mod icon;
pub mod paths;
pub mod fanout;
pub mod pipeline;

pub use description::{Configuration, Description, MetadataMap};
pub use loader::{DescriptionSource, LoadError, XmlLoader};
pub use generators::{builtin_generators, GeneratorError, InputStream, OutputGenerator};
pub use resources::{DirectoryResourceProvider, NoResources, ResourceProvider};
pub use preview::PreviewOptions;
pub use icon::{find_svg_icon, sanitize_name, ICON_METADATA_KEY};
pub use paths::clean_path;
pub use fanout::{FanOut, GeneratedOutput, OutputRequest};
pub use pipeline::{CompileError, CompileResult, CompileRunner, Manifest};

pub const COMPILER_VERSION: &str = env!("CARGO_PKG_VERSION");
