//! Description Loading - XML Component Documents
//!
//! Only the `<declaration>` block is read: identity `<meta>` entries, any
//! other `<meta>` entries, and `<configurations>`. Elements are matched by
//! local name so every schema namespace revision loads the same way.

use std::io::Read;

use log::{debug, warn};
use roxmltree::{Document, Node};
use thiserror::Error;
use uuid::Uuid;

use crate::description::{Configuration, Description, MetadataMap};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read description: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Unexpected root element <{0}>, expected <component>")]
    UnexpectedRoot(String),

    #[error("Missing <declaration> element")]
    MissingDeclaration,

    #[error("Missing component name")]
    MissingName,

    #[error("Invalid GUID: {0}")]
    InvalidGuid(String),

    #[error("<{element}> is missing the '{attribute}' attribute")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
}

/// Decodes a byte stream into a [`Description`].
pub trait DescriptionSource {
    fn load(&self, input: &mut dyn Read) -> Result<Description, LoadError>;
}

const META_NAME: &str = "name";
const META_AUTHOR: &str = "author";
const META_GUID: &str = "guid";
const META_ADDITIONAL_INFORMATION: &str = "additionalinformation";

#[derive(Debug, Clone, Copy, Default)]
pub struct XmlLoader;

impl DescriptionSource for XmlLoader {
    fn load(&self, input: &mut dyn Read) -> Result<Description, LoadError> {
        let mut source = String::new();
        input.read_to_string(&mut source)?;
        parse_description(&source)
    }
}

/// Parse a component document held in memory.
pub fn parse_description(source: &str) -> Result<Description, LoadError> {
    let doc = Document::parse(source)?;
    let root = doc.root_element();
    if root.tag_name().name() != "component" {
        return Err(LoadError::UnexpectedRoot(root.tag_name().name().to_string()));
    }

    let declaration = child_element(root, "declaration").ok_or(LoadError::MissingDeclaration)?;

    let mut name = None;
    let mut author = None;
    let mut guid = None;
    let mut additional_information = String::new();
    let mut metadata = MetadataMap::new();

    for meta in declaration.children().filter(|n| is_element(n, "meta")) {
        let key = meta.attribute("name").ok_or(LoadError::MissingAttribute {
            element: "meta",
            attribute: "name",
        })?;
        let value = meta_value(meta);

        match key {
            META_NAME => name = Some(value),
            META_AUTHOR => author = Some(value),
            META_GUID => guid = Some(value),
            META_ADDITIONAL_INFORMATION => additional_information = value,
            _ => {
                if metadata.insert(key, value).is_some() {
                    warn!("Duplicate metadata entry '{}', keeping the last value", key);
                }
            }
        }
    }

    let component_name = name
        .filter(|n| !n.trim().is_empty())
        .ok_or(LoadError::MissingName)?;

    let guid = match guid {
        Some(text) => Uuid::parse_str(text.trim()).map_err(|_| LoadError::InvalidGuid(text))?,
        None => {
            let generated = Uuid::new_v4();
            warn!("{} declares no GUID, using {}", component_name, generated);
            generated
        }
    };

    let configurations = match child_element(declaration, "configurations") {
        Some(node) => parse_configurations(node)?,
        None => Vec::new(),
    };

    debug!(
        "Loaded {} with {} metadata entries and {} configurations",
        component_name,
        metadata.len(),
        configurations.len()
    );

    Ok(Description {
        component_name,
        author,
        guid,
        additional_information,
        metadata,
        configurations,
    })
}

fn parse_configurations(node: Node) -> Result<Vec<Configuration>, LoadError> {
    node.children()
        .filter(|n| is_element(n, "configuration"))
        .map(|n| {
            n.attribute("name")
                .map(Configuration::new)
                .ok_or(LoadError::MissingAttribute {
                    element: "configuration",
                    attribute: "name",
                })
        })
        .collect()
}

/// `value` attribute, falling back to text content.
fn meta_value(node: Node) -> String {
    node.attribute("value")
        .or_else(|| node.text())
        .unwrap_or_default()
        .to_string()
}

fn is_element(node: &Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| is_element(n, name))
}
