//! Template records and file-name metadata parsing

use std::path::{Path, PathBuf};

use image::GrayImage;

use super::error::CatalogError;

/// Which mouse button a matched template should be clicked with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    Left,
    Right,
}

/// A reference image plus the click metadata carried by its file name.
///
/// Offsets are resolved once at load time: a missing or malformed `.OX<int>.`
/// / `.OY<int>.` marker falls back to half the template width/height, so a
/// bare file name clicks the center of the match.
#[derive(Debug, Clone)]
pub struct Template {
    pub path: PathBuf,
    pub file_name: String,
    pub gray: GrayImage,
    pub width: u32,
    pub height: u32,
    pub offset_x: u32,
    pub offset_y: u32,
    pub click_kind: ClickKind,
}

impl Template {
    /// Load a template image from disk and resolve its metadata.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let image = image::open(path).map_err(|source| CatalogError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_gray(path, image.to_luma8()))
    }

    /// Build a template from an already decoded grayscale buffer.
    ///
    /// Metadata is parsed from the full path string, so markers work both in
    /// the file name and in renamed copies kept under marker-bearing names.
    pub fn from_gray(path: impl Into<PathBuf>, gray: GrayImage) -> Self {
        let path = path.into();
        let (width, height) = gray.dimensions();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let meta = TemplateMeta::parse(&path.to_string_lossy());
        Self {
            path,
            file_name,
            gray,
            width,
            height,
            offset_x: meta.offset_x.unwrap_or(width / 2),
            offset_y: meta.offset_y.unwrap_or(height / 2),
            click_kind: meta.click_kind,
        }
    }
}

/// Raw metadata extracted from a template identifier, before defaults apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TemplateMeta {
    pub offset_x: Option<u32>,
    pub offset_y: Option<u32>,
    pub click_kind: ClickKind,
}

impl TemplateMeta {
    /// Parse the `.OX<int>.` / `.OY<int>.` / `RightClick` markers.
    ///
    /// Case-insensitive and order-independent. Parsing is total: anything
    /// malformed (missing terminator, non-digits, a negative value) just
    /// leaves that field unset.
    pub fn parse(id: &str) -> Self {
        let lower = id.to_lowercase();
        Self {
            offset_x: delimited_int(&lower, ".ox"),
            offset_y: delimited_int(&lower, ".oy"),
            click_kind: if lower.contains("rightclick") {
                ClickKind::Right
            } else {
                ClickKind::Left
            },
        }
    }
}

/// Extract the integer between `prefix` and the next `.` after it.
fn delimited_int(text: &str, prefix: &str) -> Option<u32> {
    let start = text.find(prefix)? + prefix.len();
    let end = text[start..].find('.')? + start;
    text[start..end].parse::<u32>().ok()
}
