//! Planar pile arrangement.
//!
//! Rows of five, each row narrower and slightly rotated the opposite way,
//! stacked upward from the fire base. Placement uses the creation-stable
//! jitter baked into each unit, so repeated arrangement is a fixed point.

use crate::core_types::unit::{FuelUnit, LayoutSlot};
use crate::core_types::vec::Vec2;

/// Units per layout row.
pub const MAX_PER_ROW: usize = 5;

const SPACING_X: f32 = 74.0;
const ROW_RISE: f32 = 16.0;
const BASE_WIDTH: f32 = 120.0;
const BASE_HEIGHT: f32 = 34.0;

/// Assign every unit a layout slot around the fire centerline at
/// `(center_x, base_y)` (canvas-space, y down).
pub(crate) fn arrange(units: &mut [FuelUnit], center_x: f32, base_y: f32) {
    let count = units.len();
    for (i, unit) in units.iter_mut().enumerate() {
        let row = i / MAX_PER_ROW;
        let col = i % MAX_PER_ROW;
        let in_row = MAX_PER_ROW.min(count - row * MAX_PER_ROW);
        let row_center = (in_row - 1) as f32 / 2.0;

        let x = center_x + (col as f32 - row_center) * SPACING_X + unit.jitter.x;
        let y = base_y + 8.0 - row as f32 * ROW_RISE + unit.jitter.y;

        // Alternate lean per row so the stack reads as criss-crossed.
        let lean_deg = if row % 2 == 0 {
            -12.0 + col as f32 * 6.0
        } else {
            12.0 - col as f32 * 6.0
        };
        let rotation = lean_deg.to_radians() + unit.jitter.rot;

        let scale = unit.kind.visual_scale();
        let width = (BASE_WIDTH - row as f32 * 8.0) * scale;
        let height = (BASE_HEIGHT - row as f32 * 2.0) * (scale * 0.8);

        unit.slot = LayoutSlot {
            position: Vec2::new(x, y),
            rotation,
            width,
            height,
            row,
        };
    }
}
