//! Game engine: the controller for one play session.
//!
//! `GameEngine` owns the scene, the session RNG, the task queue, and every
//! piece of game state. It processes player commands, drains due tasks,
//! runs the frame systems, and produces `GameStateSnapshot`s. Everything
//! happens on the caller's thread, one frame at a time.

use std::collections::VecDeque;

use log::{debug, info, trace};

use arniegeddon_core::commands::PlayerCommand;
use arniegeddon_core::config::GameConfig;
use arniegeddon_core::constants::*;
use arniegeddon_core::enums::{EntityKind, GamePhase, LevelUpResume, Sound, TutorialState};
use arniegeddon_core::error::GameError;
use arniegeddon_core::events::{AudioEvent, UiEvent};
use arniegeddon_core::state::{score_text, GameStateSnapshot};
use arniegeddon_core::types::{EntityHandle, SimTime};

use crate::rng::SessionRng;
use crate::scene::Scene;
use crate::systems;
use crate::systems::ammo::AmmoStore;
use crate::systems::scoring::ScoreBoard;
use crate::systems::snapshot::HudState;
use crate::systems::spawn_scheduler::SpawnScheduler;
use crate::systems::tutorial::{Tutorial, TutorialTap};
use crate::tasks::{Task, TaskId, TaskQueue};
use crate::tracking::TrackingService;
use crate::world_setup;

/// The game engine. Owns the scene and all session state.
pub struct GameEngine<T: TrackingService> {
    config: GameConfig,
    scene: Scene<T>,
    time: SimTime,
    rng: SessionRng,
    tasks: TaskQueue,
    scheduler: SpawnScheduler,
    ammo: AmmoStore,
    tutorial: Tutorial,
    score: ScoreBoard,
    paused: bool,
    world_ready: bool,
    torn_down: bool,
    special_sight: bool,
    light_blend: Option<f32>,
    banner_visible: bool,
    banner_task: Option<TaskId>,
    message_task: Option<TaskId>,
    command_queue: VecDeque<PlayerCommand>,
    audio_events: Vec<AudioEvent>,
    ui_events: Vec<UiEvent>,
}

impl<T: TrackingService> GameEngine<T> {
    /// Create a new session on top of `tracking`.
    pub fn new(config: GameConfig, tracking: T) -> Self {
        let rng = SessionRng::for_session(config.seed);
        debug!("session seed {}", rng.seed());
        Self {
            scheduler: SpawnScheduler::new(config.cadence),
            tutorial: Tutorial::new(config.tutorial_steps),
            scene: Scene::new(tracking),
            time: SimTime::default(),
            rng,
            tasks: TaskQueue::new(),
            ammo: AmmoStore::full(),
            score: ScoreBoard::new(),
            paused: true,
            world_ready: false,
            torn_down: false,
            special_sight: false,
            light_blend: None,
            banner_visible: false,
            banner_task: None,
            message_task: None,
            command_queue: VecDeque::new(),
            audio_events: Vec::new(),
            ui_events: Vec::new(),
            config,
        }
    }

    /// Queue a player command for processing at the next frame boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance one frame and return the resulting snapshot.
    ///
    /// Order: queued commands, clock advance, due tasks, then the frame
    /// systems (world setup, expiry, pickup proximity, lighting).
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if !self.torn_down {
            self.time.advance();
            self.run_due_tasks();
            self.run_frame();
        }

        self.snapshot()
    }

    pub fn phase(&self) -> GamePhase {
        if self.torn_down {
            GamePhase::TornDown
        } else if !self.world_ready {
            GamePhase::AwaitingTracking
        } else if self.tutorial.is_active() {
            GamePhase::Tutorial
        } else if self.paused {
            GamePhase::Paused
        } else {
            GamePhase::Running
        }
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn score(&self) -> i64 {
        self.score.score()
    }

    pub fn level(&self) -> u32 {
        self.score.level()
    }

    pub fn ammo(&self) -> u8 {
        self.ammo.rounds()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_world_ready(&self) -> bool {
        self.world_ready
    }

    pub fn tutorial(&self) -> TutorialState {
        self.tutorial.state()
    }

    pub fn special_sight(&self) -> bool {
        self.special_sight
    }

    pub fn scheduler(&self) -> &SpawnScheduler {
        &self.scheduler
    }

    pub fn tasks(&self) -> &TaskQueue {
        &self.tasks
    }

    pub fn scene(&self) -> &Scene<T> {
        &self.scene
    }

    pub fn tracking(&self) -> &T {
        self.scene.tracking()
    }

    pub fn tracking_mut(&mut self) -> &mut T {
        self.scene.tracking_mut()
    }

    /// Fire one round at whatever lies under the reticle.
    ///
    /// Returns the handle of the entity hit, `None` on a miss. Without a
    /// camera frame nothing happens. With an empty magazine the player is
    /// told to find a weapon and a pickup is spawned if none is live.
    pub fn fire(&mut self) -> Result<Option<EntityHandle>, GameError> {
        self.scene.camera()?;

        if let Err(err) = self.ammo.fire() {
            self.on_out_of_ammo();
            return Err(err);
        }
        self.ui_events.push(UiEvent::AmmoIndicator {
            rounds: self.ammo.rounds(),
        });

        let now = self.time.elapsed_secs;
        let hit = systems::hit_resolver::resolve_target(
            self.scene.tracking(),
            self.scene.registry(),
            self.config.reticle,
        );
        match hit {
            Some((target, kind)) => {
                debug!("hit {kind:?} {target:?}");
                self.tasks
                    .schedule(now, HIT_EFFECT_DELAY_SECS, Task::HitEffects { target, kind });
                self.apply_score(kind);
            }
            None => self.play(Sound::Bang),
        }

        self.set_special_sight(false);
        Ok(hit.map(|(target, _)| target))
    }

    /// Cancel every pending task, release every anchor, and stop accepting commands.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.scheduler.stop(&mut self.tasks);
        let cancelled = self.tasks.cancel_all();
        let released = self.scene.clear();
        self.banner_task = None;
        self.message_task = None;
        self.command_queue.clear();
        self.torn_down = true;
        info!("session torn down: cancelled {cancelled} tasks, released {released} anchors");
    }

    /// Spawn an entity at a fixed camera-relative offset (for tests).
    #[cfg(test)]
    pub fn spawn_test_entity(&mut self, kind: EntityKind, offset: glam::Vec3) -> EntityHandle {
        let camera = self
            .scene
            .camera()
            .expect("test entity needs a camera frame");
        let transform = systems::placement::world_transform(camera, offset);
        self.scene.spawn(transform, kind, self.time.elapsed_secs)
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if self.torn_down {
                self.command_queue.clear();
                return;
            }
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Tap => self.handle_tap(),
            PlayerCommand::ArmSpecialSight => self.set_special_sight(true),
            PlayerCommand::Teardown => self.teardown(),
        }
    }

    /// Tutorial first, then unpause, then fire.
    fn handle_tap(&mut self) {
        if self.tutorial.is_active() {
            match self.tutorial.tap() {
                TutorialTap::Advanced(step) => {
                    self.ui_events
                        .push(UiEvent::TutorialCard { step: Some(step) });
                }
                TutorialTap::Completed => {
                    self.ui_events.push(UiEvent::TutorialCard { step: None });
                    info!("tutorial complete");
                    self.resume_play();
                }
                TutorialTap::NotActive => {}
            }
            return;
        }

        if !self.world_ready {
            return;
        }

        if self.paused {
            self.hide_banner();
            self.resume_play();
            return;
        }

        match self.fire() {
            Ok(_) => {}
            Err(GameError::TrackingUnavailable) => trace!("tap ignored: tracking unavailable"),
            Err(GameError::OutOfAmmo) => debug!("tap with empty magazine"),
        }
    }

    fn run_due_tasks(&mut self) {
        let horizon = self.tasks.horizon();
        let now = self.time.elapsed_secs;
        while let Some((id, task)) = self.tasks.pop_due(now, horizon) {
            self.run_task(id, task);
        }
    }

    fn run_task(&mut self, id: TaskId, task: Task) {
        match task {
            Task::SpawnTick => {
                if self.scheduler.owns(id) {
                    self.spawn_tick();
                }
            }
            Task::HitEffects { target, kind } => self.hit_effects(target, kind),
            Task::HitCleanup { target, impact } => {
                self.scene.remove(target);
                if let Some(impact) = impact {
                    self.scene.remove(impact);
                }
            }
            Task::LevelUpCelebration => self.celebrate_level_up(),
            Task::HideLevelUpBanner => {
                if self.banner_task == Some(id) {
                    self.banner_task = None;
                    self.hide_banner();
                }
            }
            Task::ClearMessage => {
                if self.message_task == Some(id) {
                    self.message_task = None;
                    self.ui_events.push(UiEvent::ClearMessage);
                }
            }
        }
    }

    /// Spawn timer fired: drop a target or decoy, then rearm.
    fn spawn_tick(&mut self) {
        let now = self.time.elapsed_secs;
        if let Err(err) = world_setup::spawn_target(&mut self.scene, &self.config, &mut self.rng, now)
        {
            trace!("spawn skipped: {err}");
        }
        self.scheduler
            .rearm(&mut self.tasks, &mut self.rng, self.score.level(), now);
    }

    fn hit_effects(&mut self, target: EntityHandle, kind: EntityKind) {
        // The target expired between the shot and the effects.
        if !self.scene.registry().contains(target) {
            trace!("hit effects dropped: {target:?} already removed");
            return;
        }
        for sound in systems::hit_resolver::impact_sounds(kind, &self.config) {
            self.play(sound);
        }
        let now = self.time.elapsed_secs;
        let impact = match world_setup::spawn_impact_marker(
            &mut self.scene,
            &self.config,
            &mut self.rng,
            now,
        ) {
            Ok(handle) => Some(handle),
            Err(err) => {
                trace!("impact marker skipped: {err}");
                None
            }
        };
        self.tasks.schedule(
            now,
            HIT_REMOVAL_DELAY_SECS,
            Task::HitCleanup { target, impact },
        );
    }

    fn apply_score(&mut self, kind: EntityKind) {
        let outcome = self.score.apply_hit(kind);
        self.ui_events.push(UiEvent::ScoreText {
            text: score_text(self.score.level(), self.score.score()),
        });
        if outcome.leveled_up {
            debug!("level up: now level {}", self.score.level());
            self.pause_play();
            self.tasks.schedule(
                self.time.elapsed_secs,
                LEVEL_UP_DELAY_SECS,
                Task::LevelUpCelebration,
            );
        }
    }

    fn celebrate_level_up(&mut self) {
        self.play(Sound::Win);
        self.banner_visible = true;
        self.ui_events.push(UiEvent::LevelUpBanner { visible: true });

        match (self.paused, self.config.level_up_resume) {
            (true, LevelUpResume::OnTap) => {}
            (true, LevelUpResume::AfterCelebration) => {
                self.resume_play();
                self.schedule_banner_hide();
            }
            (false, _) => self.schedule_banner_hide(),
        }
    }

    fn schedule_banner_hide(&mut self) {
        if let Some(previous) = self.banner_task.take() {
            self.tasks.cancel(previous);
        }
        self.banner_task = Some(self.tasks.schedule(
            self.time.elapsed_secs,
            LEVEL_UP_BANNER_SECS,
            Task::HideLevelUpBanner,
        ));
    }

    fn hide_banner(&mut self) {
        if let Some(task) = self.banner_task.take() {
            self.tasks.cancel(task);
        }
        if self.banner_visible {
            self.banner_visible = false;
            self.ui_events.push(UiEvent::LevelUpBanner { visible: false });
        }
    }

    fn pause_play(&mut self) {
        self.paused = true;
        self.scheduler.pause(&mut self.tasks);
    }

    fn resume_play(&mut self) {
        self.paused = false;
        self.scheduler.resume(
            &mut self.tasks,
            &mut self.rng,
            self.score.level(),
            self.time.elapsed_secs,
        );
    }

    fn on_out_of_ammo(&mut self) {
        self.play(Sound::GunClick);
        self.show_message(OUT_OF_AMMO_MESSAGE);
        let now = self.time.elapsed_secs;
        match world_setup::ensure_pickup(&mut self.scene, &self.config, &mut self.rng, now) {
            Ok(Some(handle)) => debug!("spawned replacement pickup {handle:?}"),
            Ok(None) => {}
            Err(err) => trace!("pickup respawn skipped: {err}"),
        }
    }

    fn show_message(&mut self, text: &str) {
        if let Some(previous) = self.message_task.take() {
            self.tasks.cancel(previous);
        }
        self.ui_events.push(UiEvent::ShowMessage {
            text: text.to_string(),
            duration_secs: MESSAGE_DURATION_SECS,
        });
        self.message_task = Some(self.tasks.schedule(
            self.time.elapsed_secs,
            MESSAGE_DURATION_SECS,
            Task::ClearMessage,
        ));
    }

    fn set_special_sight(&mut self, special: bool) {
        if self.special_sight != special {
            self.special_sight = special;
            self.ui_events.push(UiEvent::Sight { special });
        }
    }

    fn play(&mut self, sound: Sound) {
        self.audio_events.push(AudioEvent::play(sound));
    }

    /// Per-frame systems in fixed order.
    fn run_frame(&mut self) {
        if !self.world_ready {
            self.setup_world();
        }
        // 1. Expiry
        systems::cleanup::run(&mut self.scene, self.time.elapsed_secs);
        // 2. Pickup proximity
        self.collect_pickups();
        // 3. Ambient light tint
        self.light_blend = self
            .scene
            .tracking()
            .current_ambient_light_intensity()
            .map(systems::lighting::blend_factor);
    }

    /// One-time setup once the first camera frame arrives.
    fn setup_world(&mut self) {
        let now = self.time.elapsed_secs;
        if let Err(err) = world_setup::spawn_pickup(&mut self.scene, &self.config, &mut self.rng, now)
        {
            trace!("world setup deferred: {err}");
            return;
        }

        self.ui_events.push(UiEvent::AmmoIndicator {
            rounds: self.ammo.rounds(),
        });
        self.ui_events.push(UiEvent::LevelUpBanner { visible: false });
        self.ui_events.push(UiEvent::ScoreText {
            text: score_text(self.score.level(), self.score.score()),
        });
        if let Some(step) = self.tutorial.begin() {
            self.ui_events.push(UiEvent::TutorialCard { step: Some(step) });
        }
        self.world_ready = true;
        info!("world set up at t={now:.2}s");
    }

    /// Collect a weapon pickup the camera has walked into and put a new one elsewhere.
    fn collect_pickups(&mut self) {
        let Ok(camera) = self.scene.camera() else {
            return;
        };
        let anchors: Vec<_> = self
            .scene
            .tracking()
            .all_live_anchors()
            .into_iter()
            .filter(|a| self.scene.registry().contains(a.handle))
            .collect();
        let Some(handle) =
            systems::pickup::collected_pickup(&anchors, camera.w_axis.truncate())
        else {
            return;
        };

        self.scene.remove(handle);
        debug!("removed weapon pickup {handle:?}");
        let rounds = self.ammo.refill();
        self.ui_events.push(UiEvent::AmmoIndicator { rounds });

        let now = self.time.elapsed_secs;
        if let Err(err) = world_setup::spawn_pickup(&mut self.scene, &self.config, &mut self.rng, now)
        {
            trace!("replacement pickup skipped: {err}");
        }
    }

    fn snapshot(&mut self) -> GameStateSnapshot {
        let hud = HudState {
            phase: self.phase(),
            score: self.score.score(),
            level: self.score.level(),
            ammo: self.ammo.rounds(),
            paused: self.paused,
            tutorial: self.tutorial.state(),
            special_sight: self.special_sight,
            light_blend: self.light_blend,
        };
        systems::snapshot::build_snapshot(
            &self.scene,
            &self.time,
            hud,
            std::mem::take(&mut self.audio_events),
            std::mem::take(&mut self.ui_events),
        )
    }
}
