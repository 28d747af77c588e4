use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Prime factorization of a positive integer as `prime -> exponent`.
///
/// Iterates in ascending prime order. The factorization of 1 is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Factorization {
    factors: BTreeMap<u64, u32>,
}

impl Factorization {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_factor(&mut self, prime: u64) {
        *self.factors.entry(prime).or_insert(0) += 1;
    }

    pub fn exponent(&self, prime: u64) -> u32 {
        self.factors.get(&prime).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Number of distinct primes.
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    /// Sum of all exponents, counting primes outside any palette.
    pub fn total_exponent(&self) -> u32 {
        self.factors.values().sum()
    }

    /// Multiplies the factors back together, or `None` if the result does
    /// not fit in a `u64`.
    pub fn product(&self) -> Option<u64> {
        self.factors
            .iter()
            .try_fold(1u64, |acc, (&prime, &exp)| {
                prime.checked_pow(exp).and_then(|power| acc.checked_mul(power))
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, u32)> + '_ {
        self.factors.iter().map(|(&p, &e)| (p, e))
    }
}

impl FromIterator<(u64, u32)> for Factorization {
    fn from_iter<I: IntoIterator<Item = (u64, u32)>>(iter: I) -> Self {
        let mut factors = BTreeMap::new();
        for (prime, exp) in iter {
            if exp > 0 {
                *factors.entry(prime).or_insert(0) += exp;
            }
        }
        Self { factors }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0);
    /// Neutral border color for cells and legend swatches.
    pub const GRAY: Color = Color::new(128, 128, 128);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn channel_sum(&self) -> u32 {
        self.r as u32 + self.g as u32 + self.b as u32
    }

    /// Black on bright backgrounds, white otherwise. The cut-off is half of
    /// the maximum channel sum (765 / 2, rounded down).
    pub fn text_contrast(&self) -> Color {
        if self.channel_sum() > 382 {
            Color::BLACK
        } else {
            Color::WHITE
        }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color::new(r, g, b)
    }
}

/// Fixed prime-to-color palette, kept in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeColorTable {
    entries: Vec<(u64, Color)>,
}

impl PrimeColorTable {
    pub fn new(entries: Vec<(u64, Color)>) -> Self {
        Self { entries }
    }

    /// 2 red, 3 blue, 5 magenta, 7 yellow.
    pub fn standard() -> Self {
        Self::new(vec![
            (2, Color::new(255, 0, 0)),
            (3, Color::new(0, 0, 255)),
            (5, Color::new(255, 0, 255)),
            (7, Color::new(255, 255, 0)),
        ])
    }

    pub fn get(&self, prime: u64) -> Option<Color> {
        self.entries
            .iter()
            .find(|(p, _)| *p == prime)
            .map(|(_, c)| *c)
    }

    pub fn entries(&self) -> &[(u64, Color)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PrimeColorTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// One entry of the multiplication table. Rows and columns are 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
    pub product: u64,
    pub factors: Factorization,
    pub color: Color,
    pub text_color: Color,
}

impl Cell {
    pub fn label(&self) -> String {
        self.product.to_string()
    }
}

/// Pixel rectangle with inclusive corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

/// Geometry of the rendered table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    pub size: u32,
    pub cell_size: u32,
}

impl TableLayout {
    /// Left and top space for the axis labels.
    pub const PADDING: u32 = 50;
    /// Extra space to the right of the grid.
    pub const RIGHT_MARGIN: u32 = 50;
    /// Band below the grid holding the legend.
    pub const TITLE_BAND: u32 = 50;
    /// Distance of the legend row from the bottom edge.
    pub const LEGEND_OFFSET: u32 = 30;
    pub const LEGEND_SWATCH: i64 = 15;
    pub const LEGEND_TEXT_GAP: i64 = 20;
    pub const LEGEND_ADVANCE: i64 = 80;

    pub fn new(size: u32, cell_size: u32) -> Self {
        Self { size, cell_size }
    }

    fn grid_extent(&self) -> u32 {
        self.cell_size * self.size
    }

    pub fn width(&self) -> u32 {
        self.grid_extent() + Self::PADDING + Self::RIGHT_MARGIN
    }

    pub fn height(&self) -> u32 {
        self.grid_extent() + Self::PADDING + Self::TITLE_BAND
    }

    pub fn cell_rect(&self, row: u32, col: u32) -> Rect {
        let c = self.cell_size as i64;
        let pad = Self::PADDING as i64;
        let x1 = (col as i64 - 1) * c + pad;
        let y1 = (row as i64 - 1) * c + pad;
        Rect {
            x1,
            y1,
            x2: x1 + c,
            y2: y1 + c,
        }
    }

    pub fn legend_origin(&self) -> (i64, i64) {
        (
            Self::PADDING as i64,
            self.height() as i64 - Self::LEGEND_OFFSET as i64,
        )
    }

    pub fn cell_count(&self) -> usize {
        self.size as usize * self.size as usize
    }
}
