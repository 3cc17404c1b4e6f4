//! Fixed-order feature vector fed into the agent policy.

use crate::direction::{Direction, RelativeDirection};
use crate::search::DirectionScan;
use crate::{INPUT_SIZE, OUTPUT_SIZE};

/// Encode mobility and pellet proximity into the policy's input lanes.
///
/// Lane order is contractual: four mobility flags (1.0/0.0) for
/// Forward/Left/Right/Behind relative to `heading`, then four proximity
/// scores for the same lanes. Proximity is `1 - distance / max_distance`
/// where `max_distance` is the largest recorded distance in `scan`; a lane
/// with no recorded result scores 0. When no direction has a result at all,
/// every proximity lane is 0 — defined, not an error.
#[must_use]
pub fn encode_features(
    heading: Direction,
    can_move: &dyn Fn(Direction) -> bool,
    scan: &DirectionScan,
) -> [f32; INPUT_SIZE] {
    let mut features = [0.0; INPUT_SIZE];
    let max_distance = scan.max_distance();
    for (lane, relative) in RelativeDirection::ALL.into_iter().enumerate() {
        let absolute = relative.resolve(heading);
        features[lane] = if can_move(absolute) { 1.0 } else { 0.0 };
        features[lane + OUTPUT_SIZE] = match (scan.get(absolute), max_distance) {
            (Some(hit), Some(max)) if max > 0 => 1.0 - hit.distance as f32 / max as f32,
            _ => 0.0,
        };
    }
    features
}
