//! Straight-line propagation through open space and across structures.

use rad_core::{from_milli, to_milli};

use crate::{Emitter, OpenSpaceRay, PropagationContext, Target};

/// Cast one ray from `emitter` to `target`.
///
/// The ray costs its Euclidean length plus the resistance of every structure
/// tile it crosses, excluding the tile the source itself stands on.  Returns
/// `None` when the target is farther than `ray_max_distance`; otherwise the
/// ray is returned even if nothing is left on arrival (`rads == 0`).
pub fn cast_ray(
    ctx:     &PropagationContext<'_>,
    emitter: &Emitter,
    target:  &Target,
) -> Option<OpenSpaceRay> {
    let distance = emitter.pos.distance(target.pos);
    if !distance.is_finite() || distance > ctx.config.ray_max_distance {
        return None;
    }

    let reach = emitter.reach_milli();
    let mut cost = to_milli(distance);
    let mut blockers = Vec::new();

    if cost < reach {
        for at in ctx.layout.tiles_crossed(emitter.pos, target.pos) {
            if Some(at) == emitter.at {
                continue;
            }
            let resistance = ctx.resistance.resistance_milli(at);
            if resistance == 0 {
                continue;
            }
            blockers.push((at, from_milli(resistance)));
            cost = cost.saturating_add(resistance);
            if cost >= reach {
                break;
            }
        }
    }

    let left = reach.saturating_sub(cost);
    let rads = if left >= ctx.floor_milli() { from_milli(left) } else { 0.0 };

    Some(OpenSpaceRay {
        source:      emitter.id,
        target:      target.id,
        from:        emitter.pos,
        to:          target.pos,
        destination: target.at,
        rads,
        blockers,
    })
}
