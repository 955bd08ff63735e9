//! Output page geometry
//!
//! Margins are horizontal only: the page grows in width and keeps its
//! height, and the original content is shifted right when blank space is
//! inserted before it.

use crate::types::{MarginConfig, MarginSide};

/// Size of an output page and where the source content sits on it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    /// Horizontal offset of the source content from the left edge
    pub offset_x: f32,
}

impl PageGeometry {
    /// Compute output geometry for a `width` × `height` source page.
    ///
    /// When `apply_margin` is false the page is passed through unchanged,
    /// regardless of margin size and side.
    pub fn compute(
        width: f32,
        height: f32,
        margin_size: f32,
        side: MarginSide,
        apply_margin: bool,
    ) -> Self {
        let (width, offset_x) = if !apply_margin {
            (width, 0.0)
        } else {
            match side {
                MarginSide::Left => (width + margin_size, margin_size),
                MarginSide::Right => (width + margin_size, 0.0),
                MarginSide::Both => (width + 2.0 * margin_size, margin_size),
            }
        };

        Self {
            width,
            height,
            offset_x,
        }
    }

    /// Same as [`PageGeometry::compute`] with the size and side taken from a config
    pub fn for_margin(width: f32, height: f32, margin: &MarginConfig, apply_margin: bool) -> Self {
        Self::compute(width, height, margin.size as f32, margin.side, apply_margin)
    }

    /// Blank space to the right of the source content
    pub fn right_gap(&self, source_width: f32) -> f32 {
        self.width - self.offset_x - source_width
    }
}
