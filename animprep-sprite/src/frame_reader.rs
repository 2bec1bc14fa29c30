//! Frame discovery and parsing

use crate::{Error, Result, FRAME_EXTENSION, FRAME_PREFIX};
use animprep_core::{Element, Node, SVG_NAMESPACE};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// A single parsed animation frame
#[derive(Debug, Clone)]
pub struct Frame {
    /// Group id, the file stem (`frame_001` for `frames/frame_001.svg`)
    pub id: String,
    /// Ordinal position in the sorted frame list
    pub index: usize,
    /// Source file, used in error messages
    pub path: PathBuf,
    /// `viewBox` of the root element, if present
    pub view_box: Option<String>,
    /// Prefixed namespace declarations in scope on the root element
    pub namespaces: Vec<(String, String)>,
    /// Direct children of the root element, in document order
    pub content: Vec<Node>,
}

/// Lists the frame documents in `dir`, sorted by file name.
///
/// A missing directory is treated the same as an empty one.
pub fn find_frames(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Error::NoInput {
                dir: dir.to_path_buf(),
            })
        }
        Err(e) => return Err(e.into()),
    };

    let mut frames = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && is_frame_file(&path) {
            frames.push(path);
        }
    }

    if frames.is_empty() {
        return Err(Error::NoInput {
            dir: dir.to_path_buf(),
        });
    }

    frames.sort();
    tracing::debug!(count = frames.len(), dir = %dir.display(), "found frames");
    Ok(frames)
}

fn is_frame_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.starts_with(FRAME_PREFIX)
        && name
            .strip_suffix(FRAME_EXTENSION)
            .is_some_and(|rest| rest.ends_with('.') && rest.len() > FRAME_PREFIX.len())
}

/// Reads and parses one frame document from disk
pub fn read_frame(path: &Path, index: usize) -> Result<Frame> {
    let text = fs::read_to_string(path)?;
    let id = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    parse_frame(&text, id, index, path)
}

/// Parses frame document text into an owned [`Frame`]
pub fn parse_frame(text: &str, id: String, index: usize, path: &Path) -> Result<Frame> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let doc = roxmltree::Document::parse_with_options(text, options).map_err(|source| {
        Error::Xml {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let root = doc.root_element();

    let namespaces = root
        .namespaces()
        .filter_map(|ns| {
            let prefix = ns.name()?;
            (prefix != "xml").then(|| (prefix.to_string(), ns.uri().to_string()))
        })
        .collect();

    // Whitespace between the root's children is layout only. The content lands
    // in a group whose default namespace is SVG.
    let content = root
        .children()
        .filter_map(|child| convert_node(child, SVG_NAMESPACE))
        .filter(|node| !node.is_blank_text())
        .collect();

    Ok(Frame {
        id,
        index,
        path: path.to_path_buf(),
        view_box: root.attribute("viewBox").map(str::to_string),
        namespaces,
        content,
    })
}

fn convert_node(node: roxmltree::Node, default_ns: &str) -> Option<Node> {
    match node.node_type() {
        roxmltree::NodeType::Element => Some(Node::Element(convert_element(node, default_ns))),
        roxmltree::NodeType::Text => node.text().map(|t| Node::Text(t.to_string())),
        roxmltree::NodeType::Comment => node.text().map(|t| Node::Comment(t.to_string())),
        _ => None,
    }
}

/// Converts an element whose output parent has `default_ns` as its default
/// namespace.
///
/// Elements without a namespace are treated as SVG, so frames that omit
/// `xmlns` still land in the SVG namespace of the sprite.
fn convert_element(node: roxmltree::Node, default_ns: &str) -> Element {
    let tag = node.tag_name();
    let uri = tag.namespace().unwrap_or(SVG_NAMESPACE);

    let prefix = if uri == SVG_NAMESPACE {
        None
    } else {
        node.lookup_prefix(uri)
    };
    let mut element = match prefix {
        Some(prefix) => Element::new(format!("{}:{}", prefix, tag.name())),
        None => Element::new(tag.name()),
    };

    // Unprefixed names resolve against the default namespace in scope
    let child_default = match prefix {
        Some(_) => default_ns,
        None => {
            if uri != default_ns {
                element.set_attribute("xmlns", uri);
            }
            uri
        }
    };

    // Root declarations are hoisted onto the sprite; anything deeper is
    // re-declared where it first appears
    if let Some(parent) = node.parent_element() {
        for ns in node.namespaces() {
            let Some(prefix) = ns.name() else { continue };
            let inherited = parent
                .namespaces()
                .any(|p| p.name() == Some(prefix) && p.uri() == ns.uri());
            if prefix != "xml" && !inherited {
                element.set_attribute(format!("xmlns:{}", prefix), ns.uri());
            }
        }
    }

    for attr in node.attributes() {
        element.set_attribute(attribute_name(node, attr.namespace(), attr.name()), attr.value());
    }

    element.children = node
        .children()
        .filter_map(|child| convert_node(child, child_default))
        .collect();
    element
}

fn attribute_name(node: roxmltree::Node, namespace: Option<&str>, local: &str) -> String {
    match namespace {
        None => local.to_string(),
        Some(XML_NAMESPACE) => format!("xml:{}", local),
        Some(uri) => match node.lookup_prefix(uri) {
            Some(prefix) => format!("{}:{}", prefix, local),
            None => local.to_string(),
        },
    }
}
