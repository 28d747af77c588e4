//! Label fonts: a scalable TrueType font when one can be loaded, otherwise a
//! small bitmap font compiled into the binary.

use crate::core::canvas::Canvas;
use crate::domain::model::Color;
use crate::utils::error::{Result, TableError};
use ab_glyph::{point, Font, FontVec, Glyph, GlyphId, PxScale, ScaleFont};
use std::path::{Path, PathBuf};

/// Font file looked up in the working directory, then in the platform font
/// directories.
pub const PREFERRED_FONT_FILE: &str = "arial.ttf";
/// Subdirectory levels searched below each font directory.
const MAX_FONT_DIR_DEPTH: usize = 8;
/// Label size in pixels per em.
pub const LABEL_PX_PER_EM: f32 = 12.0;

/// Ink bounding box of a string drawn at origin `(0, 0)`, where the origin is
/// the top-left corner of the line box. `right`/`bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextBounds {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl TextBounds {
    pub fn width(&self) -> i64 {
        self.right - self.left
    }

    pub fn height(&self) -> i64 {
        self.bottom - self.top
    }
}

pub enum LabelFont {
    Scalable(ScalableFont),
    Builtin(BitmapFont),
}

impl LabelFont {
    /// Loads `path` as a scalable font and falls back to the built-in bitmap
    /// font on any failure. Never errors.
    pub fn load_or_builtin<P: AsRef<Path>>(path: P, px_per_em: f32) -> Self {
        match ScalableFont::from_file(path.as_ref(), px_per_em) {
            Ok(font) => {
                tracing::debug!("Using scalable font {}", path.as_ref().display());
                LabelFont::Scalable(font)
            }
            Err(e) => {
                tracing::debug!(
                    "Font {} unavailable ({}), using built-in font",
                    path.as_ref().display(),
                    e
                );
                LabelFont::Builtin(BitmapFont)
            }
        }
    }

    /// Tries `name` relative to the working directory, then the first file
    /// with that name (ignoring case) under `font_dirs`, then the built-in
    /// font.
    pub fn resolve_or_builtin(name: &str, px_per_em: f32, font_dirs: &[PathBuf]) -> Self {
        if let Ok(font) = ScalableFont::from_file(Path::new(name), px_per_em) {
            tracing::debug!("Using scalable font {}", name);
            return LabelFont::Scalable(font);
        }
        match find_font_file(name, font_dirs) {
            Some(path) => Self::load_or_builtin(path, px_per_em),
            None => {
                tracing::debug!("Font {} not found, using built-in font", name);
                LabelFont::Builtin(BitmapFont)
            }
        }
    }

    pub fn preferred() -> Self {
        Self::resolve_or_builtin(PREFERRED_FONT_FILE, LABEL_PX_PER_EM, &system_font_dirs())
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, LabelFont::Builtin(_))
    }

    pub fn measure(&self, text: &str) -> TextBounds {
        match self {
            LabelFont::Scalable(font) => font.measure(text),
            LabelFont::Builtin(font) => font.measure(text),
        }
    }

    pub fn draw(&self, canvas: &mut Canvas, x: i64, y: i64, text: &str, color: Color) {
        match self {
            LabelFont::Scalable(font) => font.draw(canvas, x, y, text, color),
            LabelFont::Builtin(font) => font.draw(canvas, x, y, text, color),
        }
    }
}

/// Platform font directories, in search order.
pub fn system_font_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from);

    if cfg!(windows) {
        if let Some(windir) = std::env::var_os("WINDIR") {
            dirs.push(PathBuf::from(windir).join("Fonts"));
        }
        if let Some(local) = std::env::var_os("LOCALAPPDATA") {
            dirs.push(PathBuf::from(local).join("Microsoft").join("Windows").join("Fonts"));
        }
    } else if cfg!(target_os = "macos") {
        dirs.push(PathBuf::from("/Library/Fonts"));
        dirs.push(PathBuf::from("/System/Library/Fonts"));
        if let Some(home) = &home {
            dirs.push(home.join("Library").join("Fonts"));
        }
    } else {
        let data_home = std::env::var_os("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|| home.as_ref().map(|h| h.join(".local").join("share")));
        if let Some(data_home) = data_home {
            dirs.push(data_home.join("fonts"));
        }
        let data_dirs = std::env::var("XDG_DATA_DIRS")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "/usr/local/share:/usr/share".to_string());
        for dir in data_dirs.split(':').filter(|d| !d.is_empty()) {
            dirs.push(PathBuf::from(dir).join("fonts"));
        }
        if let Some(home) = &home {
            dirs.push(home.join(".fonts"));
        }
    }
    dirs
}

/// Walks each directory in order and returns the first file named `name`,
/// compared case-insensitively. Entries are visited in sorted order.
pub fn find_font_file(name: &str, font_dirs: &[PathBuf]) -> Option<PathBuf> {
    let wanted = name.to_lowercase();
    font_dirs
        .iter()
        .find_map(|dir| search_dir(dir, &wanted, MAX_FONT_DIR_DEPTH))
}

fn search_dir(dir: &Path, wanted: &str, depth: usize) -> Option<PathBuf> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    entries.sort();

    let mut subdirs = Vec::new();
    for path in entries {
        if path.is_dir() {
            subdirs.push(path);
        } else if path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.to_lowercase() == wanted)
        {
            return Some(path);
        }
    }
    if depth == 0 {
        return None;
    }
    subdirs
        .iter()
        .find_map(|sub| search_dir(sub, wanted, depth - 1))
}

pub struct ScalableFont {
    font: FontVec,
    scale: PxScale,
}

impl ScalableFont {
    pub fn from_file(path: &Path, px_per_em: f32) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(data, px_per_em)
    }

    pub fn from_bytes(data: Vec<u8>, px_per_em: f32) -> Result<Self> {
        let font = FontVec::try_from_vec(data).map_err(|e| TableError::RenderError {
            message: format!("invalid font data: {}", e),
        })?;
        let units_per_em = font.units_per_em().ok_or_else(|| TableError::RenderError {
            message: "font has no units-per-em".to_string(),
        })?;
        // PxScale is the ascent-to-descent height, not the em size
        let scale = PxScale::from(px_per_em * font.height_unscaled() / units_per_em);
        Ok(Self { font, scale })
    }

    /// Positions glyphs left to right with the baseline at the ascent.
    fn layout(&self, text: &str) -> Vec<Glyph> {
        let scaled = self.font.as_scaled(self.scale);
        let mut caret = 0.0f32;
        let mut previous: Option<GlyphId> = None;
        let mut glyphs = Vec::with_capacity(text.len());

        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            glyphs.push(id.with_scale_and_position(self.scale, point(caret, scaled.ascent())));
            caret += scaled.h_advance(id);
            previous = Some(id);
        }
        glyphs
    }

    pub fn measure(&self, text: &str) -> TextBounds {
        let mut bounds: Option<TextBounds> = None;
        for glyph in self.layout(text) {
            let Some(outline) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let px = outline.px_bounds();
            let glyph_bounds = TextBounds {
                left: px.min.x.floor() as i64,
                top: px.min.y.floor() as i64,
                right: px.max.x.ceil() as i64,
                bottom: px.max.y.ceil() as i64,
            };
            bounds = Some(match bounds {
                None => glyph_bounds,
                Some(b) => TextBounds {
                    left: b.left.min(glyph_bounds.left),
                    top: b.top.min(glyph_bounds.top),
                    right: b.right.max(glyph_bounds.right),
                    bottom: b.bottom.max(glyph_bounds.bottom),
                },
            });
        }
        bounds.unwrap_or_default()
    }

    pub fn draw(&self, canvas: &mut Canvas, x: i64, y: i64, text: &str, color: Color) {
        for glyph in self.layout(text) {
            let Some(outline) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let px = outline.px_bounds();
            let origin_x = x + px.min.x.floor() as i64;
            let origin_y = y + px.min.y.floor() as i64;
            outline.draw(|gx, gy, coverage| {
                canvas.blend_pixel(origin_x + gx as i64, origin_y + gy as i64, color, coverage);
            });
        }
    }
}

const GLYPH_W: i64 = 5;
const GLYPH_H: i64 = 7;
/// Horizontal advance: glyph width plus one column of spacing.
const CHAR_ADVANCE: i64 = 6;

/// Minimal 5x7 bitmap font covering digits and the legend text. Other
/// characters are drawn as a hollow box.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitmapFont;

impl BitmapFont {
    /// Rows top to bottom, lower 5 bits per row, MSB is the left column.
    #[rustfmt::skip]
    fn glyph(ch: char) -> Option<[u8; 7]> {
        let rows = match ch {
            ' ' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
            '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
            '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
            '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
            '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
            '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
            '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
            '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
            '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
            '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
            '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
            '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
            'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
            'e' => [0x00, 0x00, 0x0E, 0x11, 0x1F, 0x10, 0x0E],
            'i' => [0x04, 0x00, 0x0C, 0x04, 0x04, 0x04, 0x0E],
            'm' => [0x00, 0x00, 0x1A, 0x15, 0x15, 0x11, 0x11],
            'r' => [0x00, 0x00, 0x16, 0x19, 0x10, 0x10, 0x10],
            _ => return None,
        };
        Some(rows)
    }

    const MISSING: [u8; 7] = [0x1F, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1F];

    pub fn measure(&self, text: &str) -> TextBounds {
        let count = text.chars().count() as i64;
        if count == 0 {
            return TextBounds::default();
        }
        TextBounds {
            left: 0,
            top: 0,
            right: count * CHAR_ADVANCE - (CHAR_ADVANCE - GLYPH_W),
            bottom: GLYPH_H,
        }
    }

    pub fn draw(&self, canvas: &mut Canvas, x: i64, y: i64, text: &str, color: Color) {
        for (i, ch) in text.chars().enumerate() {
            let rows = Self::glyph(ch).unwrap_or(Self::MISSING);
            let left = x + i as i64 * CHAR_ADVANCE;
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_W {
                    if bits & (0x10 >> col) != 0 {
                        canvas.put_pixel(left + col, y + row as i64, color);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_font_falls_back_to_builtin() {
        let font = LabelFont::load_or_builtin("definitely-not-here.ttf", LABEL_PX_PER_EM);
        assert!(font.is_builtin());
    }

    #[test]
    fn test_corrupt_font_falls_back_to_builtin() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"not a font at all").unwrap();
        let font = LabelFont::load_or_builtin(file.path(), LABEL_PX_PER_EM);
        assert!(font.is_builtin());
    }

    #[test]
    fn test_bitmap_measure() {
        let font = BitmapFont;
        assert_eq!(font.measure(""), TextBounds::default());
        let one = font.measure("7");
        assert_eq!((one.width(), one.height()), (5, 7));
        let three = font.measure("100");
        assert_eq!((three.width(), three.height()), (17, 7));
    }

    #[test]
    fn test_bitmap_draw_sets_expected_pixels() {
        let mut canvas = Canvas::new(10, 10, Color::WHITE);
        BitmapFont.draw(&mut canvas, 2, 1, "1", Color::BLACK);
        // top row of '1' is a single pixel in the middle column
        assert_eq!(canvas.pixel(4, 1), Some(Color::BLACK));
        assert_eq!(canvas.pixel(2, 1), Some(Color::WHITE));
        // bottom row spans three columns
        assert_eq!(canvas.pixel(3, 7), Some(Color::BLACK));
        assert_eq!(canvas.pixel(5, 7), Some(Color::BLACK));
    }

    #[test]
    fn test_bitmap_unknown_char_draws_box() {
        let mut canvas = Canvas::new(8, 8, Color::WHITE);
        BitmapFont.draw(&mut canvas, 0, 0, "#", Color::BLACK);
        assert_eq!(canvas.pixel(0, 0), Some(Color::BLACK));
        assert_eq!(canvas.pixel(4, 6), Some(Color::BLACK));
        assert_eq!(canvas.pixel(2, 3), Some(Color::WHITE));
    }

    #[test]
    fn test_find_font_file_ignores_case_and_descends() {
        let first = tempfile::TempDir::new().unwrap();
        let second = tempfile::TempDir::new().unwrap();
        let nested = second.path().join("truetype").join("msttcorefonts");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("Arial.TTF"), b"font bytes").unwrap();
        std::fs::write(second.path().join("other.ttf"), b"font bytes").unwrap();

        let dirs = vec![
            first.path().to_path_buf(),
            PathBuf::from("/definitely/not/a/dir"),
            second.path().to_path_buf(),
        ];
        assert_eq!(
            find_font_file("arial.ttf", &dirs),
            Some(nested.join("Arial.TTF"))
        );
        assert_eq!(find_font_file("missing.ttf", &dirs), None);
    }

    #[test]
    fn test_find_font_file_prefers_earlier_dirs() {
        let first = tempfile::TempDir::new().unwrap();
        let second = tempfile::TempDir::new().unwrap();
        std::fs::write(first.path().join("arial.ttf"), b"a").unwrap();
        std::fs::write(second.path().join("arial.ttf"), b"b").unwrap();

        let dirs = vec![second.path().to_path_buf(), first.path().to_path_buf()];
        assert_eq!(
            find_font_file("ARIAL.ttf", &dirs),
            Some(second.path().join("arial.ttf"))
        );
    }

    #[test]
    fn test_resolve_with_unreadable_match_falls_back() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("factor-table-test-font.ttf"), b"garbage").unwrap();
        let font = LabelFont::resolve_or_builtin(
            "factor-table-test-font.ttf",
            LABEL_PX_PER_EM,
            &[dir.path().to_path_buf()],
        );
        assert!(font.is_builtin());

        let font = LabelFont::resolve_or_builtin("factor-table-test-font.ttf", LABEL_PX_PER_EM, &[]);
        assert!(font.is_builtin());
    }

    #[test]
    fn test_system_font_dirs_not_empty() {
        // every platform branch yields at least one fixed or env-derived dir
        if cfg!(unix) {
            assert!(!system_font_dirs().is_empty());
        }
    }

    #[test]
    fn test_scalable_font_when_available() {
        let candidates = [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        ];
        let Some(path) = candidates.iter().find(|p| Path::new(p).exists()) else {
            return;
        };
        let font = LabelFont::load_or_builtin(path, LABEL_PX_PER_EM);
        assert!(!font.is_builtin());

        // resolved by name from an explicit directory, whatever the case
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::copy(path, dir.path().join("Factor-Table-Label.TTF")).unwrap();
        let resolved = LabelFont::resolve_or_builtin(
            "factor-table-label.ttf",
            LABEL_PX_PER_EM,
            &[dir.path().to_path_buf()],
        );
        assert!(!resolved.is_builtin());

        let bounds = font.measure("42");
        assert!(bounds.width() > 0);
        assert!(bounds.height() > 0);
        assert!(font.measure("4242").width() > bounds.width());

        let mut canvas = Canvas::new(40, 20, Color::WHITE);
        font.draw(&mut canvas, 2, 2, "42", Color::BLACK);
        let inked = (0..40i64)
            .flat_map(|x| (0..20i64).map(move |y| (x, y)))
            .filter(|&(x, y)| canvas.pixel(x, y) != Some(Color::WHITE))
            .count();
        assert!(inked > 0);
    }
}
