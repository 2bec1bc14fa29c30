//! Sprite document: one visibility-toggled group per animation frame

use crate::svg::{Element, Node, SVG_NAMESPACE, XML_DECLARATION};
use crate::Result;
use std::io::Write;

/// `display` value of the group shown when the sprite is first rendered
pub const DISPLAY_VISIBLE: &str = "inline";

/// `display` value of every other group
pub const DISPLAY_HIDDEN: &str = "none";

/// Combined sprite document
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// Coordinate frame shared by every frame, copied from the first input
    pub view_box: String,
    /// Extra `xmlns:prefix` declarations needed by the moved content
    pub namespaces: Vec<(String, String)>,
    /// Frame groups in input order
    pub groups: Vec<Element>,
}

impl Sprite {
    /// Creates an empty sprite with the given coordinate frame
    pub fn new(view_box: impl Into<String>) -> Self {
        Self {
            view_box: view_box.into(),
            namespaces: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Declares a namespace prefix on the root.
    ///
    /// The first declaration of a prefix wins; returns `false` if the prefix
    /// was already declared.
    pub fn add_namespace(&mut self, prefix: impl Into<String>, uri: impl Into<String>) -> bool {
        let prefix = prefix.into();
        if self.namespace_uri(&prefix).is_some() {
            return false;
        }
        self.namespaces.push((prefix, uri.into()));
        true
    }

    /// URI bound to `prefix` on the root, if any
    pub fn namespace_uri(&self, prefix: &str) -> Option<&str> {
        self.namespaces
            .iter()
            .find(|(p, _)| p == prefix)
            .map(|(_, uri)| uri.as_str())
    }

    /// Appends a frame as a new group, moving `content` into it.
    ///
    /// `namespaces` are the prefix declarations the content relies on. New
    /// prefixes are hoisted onto the root; a prefix the root already binds to
    /// a different URI is re-declared on the group. Only the first group is
    /// visible.
    pub fn push_frame(
        &mut self,
        id: impl Into<String>,
        namespaces: &[(String, String)],
        content: Vec<Node>,
    ) {
        let display = if self.groups.is_empty() {
            DISPLAY_VISIBLE
        } else {
            DISPLAY_HIDDEN
        };

        let mut group = Element::new("g")
            .with_attribute("id", id)
            .with_attribute("display", display);

        for (prefix, uri) in namespaces {
            if self.add_namespace(prefix.as_str(), uri.as_str()) {
                continue;
            }
            if self.namespace_uri(prefix) != Some(uri.as_str()) {
                group.set_attribute(format!("xmlns:{}", prefix), uri.as_str());
            }
        }

        group.children = content;
        self.groups.push(group);
    }

    /// Number of frames in the sprite
    pub fn frame_count(&self) -> usize {
        self.groups.len()
    }

    /// Frame ids in group order
    pub fn frame_ids(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().filter_map(|g| g.attribute("id"))
    }

    /// Gets a frame group by id
    pub fn get_frame(&self, id: &str) -> Option<&Element> {
        self.groups.iter().find(|g| g.attribute("id") == Some(id))
    }

    /// Root `svg` element without any children
    fn root_tag(&self) -> Element {
        let mut root = Element::new("svg").with_attribute("xmlns", SVG_NAMESPACE);
        for (prefix, uri) in &self.namespaces {
            root.set_attribute(format!("xmlns:{}", prefix), uri.as_str());
        }
        root.set_attribute("viewBox", self.view_box.as_str());
        root
    }

    /// Converts the sprite into its root `svg` element
    pub fn into_element(self) -> Element {
        let mut root = self.root_tag();
        for group in self.groups {
            root.append(group);
        }
        root
    }

    /// Writes the sprite as a standalone SVG document
    pub fn write<W: Write>(&self, mut writer: W) -> Result<()> {
        let root = self.root_tag();
        writer.write_all(XML_DECLARATION.as_bytes())?;
        if self.groups.is_empty() {
            root.write_to(&mut writer)?;
        } else {
            root.write_open(&mut writer)?;
            for group in &self.groups {
                group.write_to(&mut writer)?;
            }
            root.write_close(&mut writer)?;
        }
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}
