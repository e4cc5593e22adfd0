//! Ground reference grid
//!
//! A `width × height` lattice of unit cells on the XZ plane. Each cell emits
//! its four edges as separate segments (8 vertices), and the whole grid is
//! shifted by half its size so it is centered on the world origin.

use crate::foundation::math::{Mat4, Vec3};
use crate::render::api::{LineBatch, LineVertex};
use crate::render::identifiers::ShaderId;

/// Grid line color
const GRID_COLOR: [f32; 3] = [0.5, 0.5, 0.5];

/// Build the grid line batch
///
/// `width` and `height` count lattice points, so a 100 × 100 grid has
/// 99 × 99 cells.
#[allow(clippy::cast_precision_loss)]
pub fn build_grid(width: u32, height: u32) -> LineBatch {
    let cells_x = width.saturating_sub(1);
    let cells_z = height.saturating_sub(1);
    let mut vertices = Vec::with_capacity(vertex_count(width, height));

    for j in 0..cells_z {
        for i in 0..cells_x {
            let (x0, x1) = (i as f32, (i + 1) as f32);
            let (z0, z1) = (j as f32, (j + 1) as f32);
            let upper_left = Vec3::new(x0, 0.0, z1);
            let upper_right = Vec3::new(x1, 0.0, z1);
            let bottom_right = Vec3::new(x1, 0.0, z0);
            let bottom_left = Vec3::new(x0, 0.0, z0);

            for (a, b) in [
                (upper_left, upper_right),
                (upper_right, bottom_right),
                (bottom_right, bottom_left),
                (bottom_left, upper_left),
            ] {
                vertices.push(LineVertex { position: [a.x, a.y, a.z], color: GRID_COLOR });
                vertices.push(LineVertex { position: [b.x, b.y, b.z], color: GRID_COLOR });
            }
        }
    }

    let offset = Vec3::new(-(width as f32) * 0.5, 0.0, -(height as f32) * 0.5);
    LineBatch {
        shader: ShaderId::Grid,
        model_matrix: Mat4::new_translation(&offset),
        vertices,
    }
}

/// Vertices emitted for a `width × height` grid
fn vertex_count(width: u32, height: u32) -> usize {
    let cells_x = width.saturating_sub(1) as usize;
    let cells_z = height.saturating_sub(1) as usize;
    cells_x.saturating_mul(cells_z).saturating_mul(8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Mat4Ext;

    #[test]
    fn test_grid_vertex_count_and_offset() {
        let grid = build_grid(100, 100);
        assert_eq!(grid.vertices.len(), 99 * 99 * 8);
        assert_eq!(grid.segment_count(), 99 * 99 * 4);
        assert_eq!(grid.model_matrix.translation_part(), Vec3::new(-50.0, 0.0, -50.0));
    }

    #[test]
    fn test_vertex_count_for_large_grids() {
        assert_eq!(vertex_count(100, 100), 99 * 99 * 8);
        assert_eq!(vertex_count(30_000, 30_000), 29_999 * 29_999 * 8);
        assert_eq!(vertex_count(0, 50_000), 0);
    }

    #[test]
    fn test_degenerate_grid_is_empty() {
        assert!(build_grid(1, 10).vertices.is_empty());
    }
}
