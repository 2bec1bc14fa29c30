//! Sprite assembly from parsed frames

use crate::frame_reader::{find_frames, read_frame, Frame};
use crate::{Error, Result};
use animprep_core::Sprite;
use std::fs;
use std::path::Path;

/// Accumulates frames, in order, into a single sprite
#[derive(Debug, Default)]
pub struct SpriteBuilder {
    sprite: Option<Sprite>,
}

impl SpriteBuilder {
    /// Creates an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves a frame's content into a new group.
    ///
    /// The first frame fixes the coordinate frame of the sprite and must carry
    /// a `viewBox`; later frames are not checked against it.
    pub fn push_frame(&mut self, frame: Frame) -> Result<()> {
        let mut sprite = match self.sprite.take() {
            Some(sprite) => sprite,
            None => {
                let view_box = frame.view_box.clone().ok_or_else(|| Error::MissingAttribute {
                    path: frame.path.clone(),
                    attribute: "viewBox",
                })?;
                Sprite::new(view_box)
            }
        };

        for (prefix, uri) in &frame.namespaces {
            if sprite.namespace_uri(prefix).is_some_and(|bound| bound != uri) {
                tracing::debug!(%prefix, %uri, frame = %frame.id, "prefix rebound on frame group");
            }
        }

        tracing::debug!(
            id = %frame.id,
            index = frame.index,
            nodes = frame.content.len(),
            "adding frame"
        );
        sprite.push_frame(frame.id, &frame.namespaces, frame.content);
        self.sprite = Some(sprite);
        Ok(())
    }

    /// Number of frames added so far
    pub fn frame_count(&self) -> usize {
        self.sprite.as_ref().map_or(0, Sprite::frame_count)
    }

    /// Returns the sprite, or `None` if no frame was added
    pub fn finish(self) -> Option<Sprite> {
        self.sprite
    }
}

/// Builds a sprite from every frame document in `dir`, in file name order.
///
/// Any unreadable or malformed frame aborts the whole build.
pub fn build_sprite(dir: &Path) -> Result<Sprite> {
    let paths = find_frames(dir)?;

    let mut builder = SpriteBuilder::new();
    for (index, path) in paths.iter().enumerate() {
        builder.push_frame(read_frame(path, index)?)?;
    }

    builder.finish().ok_or_else(|| Error::NoInput {
        dir: dir.to_path_buf(),
    })
}

/// Writes the sprite to `path`, replacing any existing file.
///
/// The document is rendered in memory first so a serialization error never
/// leaves a truncated file behind.
pub fn write_sprite(sprite: &Sprite, path: &Path) -> Result<()> {
    let mut buffer = Vec::new();
    sprite.write(&mut buffer)?;
    fs::write(path, buffer)?;
    Ok(())
}
