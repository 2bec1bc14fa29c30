//! animprep Sprite Builder
//!
//! Merges a directory of single-frame SVG documents (`frame_*.svg`) into one
//! sprite document with one visibility-toggled group per frame.

pub mod frame_reader;
pub mod sprite_builder;

pub use frame_reader::{find_frames, read_frame, Frame};
pub use sprite_builder::{build_sprite, write_sprite, SpriteBuilder};

use std::path::PathBuf;

/// Directory the frames are read from
pub const FRAMES_DIR: &str = "frames";

/// File name prefix of frame documents
pub const FRAME_PREFIX: &str = "frame_";

/// File extension of frame documents
pub const FRAME_EXTENSION: &str = "svg";

/// Path of the combined sprite document
pub const SPRITE_FILE: &str = "sprite.svg";

/// Result type for animprep-sprite operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for animprep-sprite operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("animprep core error: {0}")]
    Core(#[from] animprep_core::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No frame_*.svg files found in {}", dir.display())]
    NoInput { dir: PathBuf },

    #[error("{} has no {attribute} attribute", path.display())]
    MissingAttribute {
        path: PathBuf,
        attribute: &'static str,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Xml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },
}

/// Sprite builder configuration
#[derive(Debug, Clone)]
pub struct SpriteConfig {
    /// Directory containing the frame documents
    pub input_dir: PathBuf,
    /// Output sprite path, overwritten if it exists
    pub output_file: PathBuf,
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(FRAMES_DIR),
            output_file: PathBuf::from(SPRITE_FILE),
        }
    }
}

/// Outcome of a successful sprite run
#[derive(Debug, Clone)]
pub struct SpriteSummary {
    /// Number of frame groups written
    pub frame_count: usize,
    /// Coordinate frame applied to the sprite
    pub view_box: String,
    /// Path the sprite was written to
    pub output: PathBuf,
}

/// Builds the sprite from `config.input_dir` and writes it to `config.output_file`.
///
/// Nothing is written unless every frame parses.
#[tracing::instrument(skip_all, fields(input = %config.input_dir.display()))]
pub fn run(config: &SpriteConfig) -> Result<SpriteSummary> {
    let sprite = build_sprite(&config.input_dir)?;
    write_sprite(&sprite, &config.output_file)?;

    tracing::info!(
        frames = sprite.frame_count(),
        output = %config.output_file.display(),
        "sprite written"
    );

    Ok(SpriteSummary {
        frame_count: sprite.frame_count(),
        view_box: sprite.view_box,
        output: config.output_file.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = SpriteConfig::default();
        assert_eq!(config.input_dir, PathBuf::from("frames"));
        assert_eq!(config.output_file, PathBuf::from("sprite.svg"));
    }

    #[test]
    fn test_run_end_to_end() {
        let dir = tempdir().unwrap();
        let frames = dir.path().join("frames");
        fs::create_dir(&frames).unwrap();
        fs::write(
            frames.join("frame_a.svg"),
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"><rect width="1" height="1"/></svg>"#,
        )
        .unwrap();
        fs::write(
            frames.join("frame_b.svg"),
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"><circle r="2"/></svg>"#,
        )
        .unwrap();

        let config = SpriteConfig {
            input_dir: frames,
            output_file: dir.path().join("sprite.svg"),
        };
        let summary = run(&config).unwrap();

        assert_eq!(summary.frame_count, 2);
        assert_eq!(summary.view_box, "0 0 10 10");

        let written = fs::read_to_string(&config.output_file).unwrap();
        let doc = roxmltree::Document::parse(&written).unwrap();
        let root = doc.root_element();
        assert_eq!(root.attribute("viewBox"), Some("0 0 10 10"));

        let groups: Vec<_> = root.children().filter(|n| n.is_element()).collect();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].attribute("id"), Some("frame_a"));
        assert_eq!(groups[0].attribute("display"), Some("inline"));
        assert_eq!(groups[1].attribute("id"), Some("frame_b"));
        assert_eq!(groups[1].attribute("display"), Some("none"));
    }

    #[test]
    fn test_run_is_idempotent() {
        let dir = tempdir().unwrap();
        let frames = dir.path().join("frames");
        fs::create_dir(&frames).unwrap();
        fs::write(
            frames.join("frame_001.svg"),
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 4 4"><path d="M0 0H4"/></svg>"#,
        )
        .unwrap();

        let config = SpriteConfig {
            input_dir: frames,
            output_file: dir.path().join("sprite.svg"),
        };
        run(&config).unwrap();
        let first = fs::read(&config.output_file).unwrap();
        run(&config).unwrap();
        let second = fs::read(&config.output_file).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_run_empty_directory() {
        let dir = tempdir().unwrap();
        let config = SpriteConfig {
            input_dir: dir.path().to_path_buf(),
            output_file: dir.path().join("sprite.svg"),
        };

        let err = run(&config).unwrap_err();
        assert!(matches!(err, Error::NoInput { .. }));
        assert!(!config.output_file.exists());
    }
}
