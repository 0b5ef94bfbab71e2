//! Expiry system: removes targets and decoys whose time-to-live ran out.

use log::debug;

use arniegeddon_core::types::EntityHandle;

use crate::scene::Scene;
use crate::tracking::TrackingService;

pub fn run<T: TrackingService>(scene: &mut Scene<T>, now: f64) -> Vec<EntityHandle> {
    let expired = scene.expire(now);
    for handle in &expired {
        debug!("expired {handle:?}");
    }
    expired
}
