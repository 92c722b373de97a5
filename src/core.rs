use crate::error::{PatchgridError, PatchgridResult};

pub use kurbo::{Point, Rect, Size};

/// Fixed grid shape of one chart version (rows x cols must equal the
/// version's patch count).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GridShape {
    pub rows: u32,
    pub cols: u32,
}

impl GridShape {
    pub fn new(rows: u32, cols: u32) -> PatchgridResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(PatchgridError::data_load(
                "grid shape must have rows > 0 and cols > 0",
            ));
        }
        Ok(Self { rows, cols })
    }

    /// Widened so that even a hostile deserialized shape cannot overflow.
    pub fn patch_count(self) -> u64 {
        u64::from(self.rows) * u64::from(self.cols)
    }

    /// Row-major cell of a 1-based patch index: left-to-right, top-to-bottom,
    /// matching the physical chart's reading order. `None` when the index is
    /// 0 or past the last cell.
    pub fn cell_of(self, patch_index: u32) -> Option<(u32, u32)> {
        let i = u64::from(patch_index).checked_sub(1)?;
        if i >= self.patch_count() {
            return None;
        }
        let cols = u64::from(self.cols);
        Some(((i / cols) as u32, (i % cols) as u32))
    }

    /// The canonical shape for a known patch count, if there is one.
    pub fn for_patch_count(count: u32) -> Option<Self> {
        match count {
            24 => Some(Self { rows: 4, cols: 6 }),
            140 => Some(Self { rows: 10, cols: 14 }),
            _ => None,
        }
    }
}

/// Displayable 8-bit RGB fill, exact (no alpha).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
    };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS `rgb(r,g,b)` form, as emitted into SVG fills.
    pub fn css(self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}
