//! Straight-line grid traversal.
//!
//! [`traverse`] enumerates every unit tile a segment passes through, in
//! order, using the Amanatides–Woo voxel walk.  [`clip_segment`] trims a
//! segment to an axis-aligned box (Liang–Barsky) so that long rays only walk
//! the part that overlaps a structure.

use rad_core::Tile;

/// Tiles crossed by the segment `from → to`, both given in tile units.
///
/// The first element is the tile containing `from` and the last is the tile
/// containing `to`.  The walk takes exactly `manhattan(start, end)` steps, so
/// it always terminates.  A segment passing exactly through a tile corner
/// steps along y first.
pub fn traverse(from: [f32; 2], to: [f32; 2]) -> Vec<Tile> {
    let mut tile = Tile::new(from[0].floor() as i32, from[1].floor() as i32);
    let end = Tile::new(to[0].floor() as i32, to[1].floor() as i32);
    let steps = tile.manhattan(end) as usize;

    let (step_x, mut t_max_x, t_delta_x) = axis_setup(from[0], to[0], tile.x);
    let (step_y, mut t_max_y, t_delta_y) = axis_setup(from[1], to[1], tile.y);

    let mut out = Vec::with_capacity(steps + 1);
    out.push(tile);
    for _ in 0..steps {
        if t_max_x < t_max_y {
            tile.x += step_x;
            t_max_x += t_delta_x;
        } else {
            tile.y += step_y;
            t_max_y += t_delta_y;
        }
        out.push(tile);
    }
    out
}

/// Per-axis DDA state: `(step, t of first boundary crossing, t per tile)`.
fn axis_setup(from: f32, to: f32, cell: i32) -> (i32, f32, f32) {
    let d = to - from;
    if d > 0.0 {
        (1, ((cell + 1) as f32 - from) / d, 1.0 / d)
    } else if d < 0.0 {
        (-1, (cell as f32 - from) / d, -1.0 / d)
    } else {
        (0, f32::INFINITY, f32::INFINITY)
    }
}

/// Clip `from → to` to the box `[lower, upper]`.
///
/// Returns the clipped endpoints, or `None` if the segment misses the box.
pub fn clip_segment(
    from:  [f32; 2],
    to:    [f32; 2],
    lower: [f32; 2],
    upper: [f32; 2],
) -> Option<([f32; 2], [f32; 2])> {
    let d = [to[0] - from[0], to[1] - from[1]];
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;

    for axis in 0..2 {
        if d[axis] == 0.0 {
            if from[axis] < lower[axis] || from[axis] > upper[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d[axis];
        let mut near = (lower[axis] - from[axis]) * inv;
        let mut far = (upper[axis] - from[axis]) * inv;
        if near > far {
            std::mem::swap(&mut near, &mut far);
        }
        t0 = t0.max(near);
        t1 = t1.min(far);
        if t0 > t1 {
            return None;
        }
    }

    let at = |t: f32| [from[0] + d[0] * t, from[1] + d[1] * t];
    Some((at(t0), at(t1)))
}
