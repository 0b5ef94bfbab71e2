//! Snapshot system: builds the `GameStateSnapshot` published after each frame.
//!
//! Read-only; never modifies the scene.

use std::collections::HashMap;

use arniegeddon_core::enums::{GamePhase, TutorialState};
use arniegeddon_core::events::{AudioEvent, UiEvent};
use arniegeddon_core::state::{score_text, EntityView, GameStateSnapshot};
use arniegeddon_core::types::SimTime;

use crate::scene::Scene;
use crate::tracking::TrackingService;

/// HUD-level state carried into the snapshot.
#[derive(Debug, Clone, Copy)]
pub struct HudState {
    pub phase: GamePhase,
    pub score: i64,
    pub level: u32,
    pub ammo: u8,
    pub paused: bool,
    pub tutorial: TutorialState,
    pub special_sight: bool,
    pub light_blend: Option<f32>,
}

pub fn build_snapshot<T: TrackingService>(
    scene: &Scene<T>,
    time: &SimTime,
    hud: HudState,
    audio_events: Vec<AudioEvent>,
    ui_events: Vec<UiEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase: hud.phase,
        score: hud.score,
        level: hud.level,
        ammo: hud.ammo,
        paused: hud.paused,
        tutorial: hud.tutorial,
        tutorial_step: hud.tutorial.step_index(),
        special_sight: hud.special_sight,
        light_blend: hud.light_blend,
        score_text: score_text(hud.level, hud.score),
        entities: build_entities(scene, time.elapsed_secs),
        audio_events,
        ui_events,
    }
}

/// One view per registered entity, oldest first.
fn build_entities<T: TrackingService>(scene: &Scene<T>, now: f64) -> Vec<EntityView> {
    let positions: HashMap<_, _> = scene
        .tracking()
        .all_live_anchors()
        .into_iter()
        .map(|a| (a.handle, a.position()))
        .collect();

    scene
        .registry()
        .records()
        .into_iter()
        .map(|(handle, kind, _spawned_at, deadline)| EntityView {
            handle,
            kind,
            position: positions.get(&handle).copied(),
            expires_in_secs: deadline.map(|d| (d - now).max(0.0)),
        })
        .collect()
}
