use std::time::Duration;

use photosynthesis_core::{Command, Event, RunStatus, SimulationInputs};
use photosynthesis_rendering::{CountdownPresentation, Scene};
use photosynthesis_system_drift::Drift;
use photosynthesis_system_emission::Emission;
use photosynthesis_world::{self as world, query, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Owns the world and the systems driving it, one frame at a time.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    emission: Emission<ChaCha8Rng>,
    drift: Drift<ChaCha8Rng>,
    completion_reported: bool,
}

impl Session {
    /// Configures a run and seeds the systems from `rng`.
    pub(crate) fn start<R>(inputs: SimulationInputs, target: u32, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut session = Self {
            world: World::new(),
            emission: Emission::new(ChaCha8Rng::seed_from_u64(rng.gen())),
            drift: Drift::new(ChaCha8Rng::seed_from_u64(rng.gen())),
            completion_reported: false,
        };

        let mut events = Vec::new();
        world::apply(
            &mut session.world,
            Command::ConfigureRun { inputs, target },
            &mut events,
        );
        session.dispatch(events);
        session
    }

    /// Advances the run by `dt`, letting every system react once.
    pub(crate) fn advance(&mut self, dt: Duration) {
        let mut events = Vec::new();
        world::apply(&mut self.world, Command::Tick { dt }, &mut events);
        self.dispatch(events);

        if !self.completion_reported && self.is_settled() {
            self.completion_reported = true;
            let status = self.status();
            log::info!(
                "run complete: {} of {} bubbles reached the surface after {:.1}s",
                status.visible,
                status.target,
                status.elapsed.as_secs_f32(),
            );
        }
    }

    /// Progress of the configured run.
    pub(crate) fn status(&self) -> RunStatus {
        query::run_status(&self.world)
    }

    /// Emission has closed and every created bubble has surfaced.
    pub(crate) fn is_settled(&self) -> bool {
        let status = self.status();
        !status.running && status.visible == status.created
    }

    /// Copies the current run progress into `scene`.
    pub(crate) fn populate_scene(&self, scene: &mut Scene) {
        let status = self.status();
        scene.readout.visible_bubbles = status.visible;
        scene.countdown = CountdownPresentation::new(status.countdown);
        scene.set_bubbles(&query::bubble_view(&self.world));
    }

    fn dispatch(&mut self, events: Vec<Event>) {
        for event in &events {
            log_event(event);
        }

        let mut commands = Vec::new();
        self.emission.handle(&events, &self.status(), &mut commands);
        self.drift
            .handle(&events, &query::bubble_view(&self.world), &mut commands);

        let mut generated = Vec::new();
        for command in commands {
            world::apply(&mut self.world, command, &mut generated);
        }
        for event in &generated {
            log_event(event);
        }
    }
}

fn log_event(event: &Event) {
    match event {
        Event::RunConfigured {
            inputs,
            target,
            duration,
        } => log::info!(
            "run configured: {} light {} co2 {} -> {target} bubbles over {}s",
            inputs.filter,
            inputs.light,
            inputs.co2,
            duration.as_secs(),
        ),
        Event::CountdownChanged { seconds } => log::trace!("{seconds} seconds remaining"),
        Event::EmissionClosed { outstanding } => {
            log::info!("emission closed, releasing {outstanding} outstanding bubbles");
        }
        Event::BubbleSpawned { bubble, x, y } => {
            log::trace!("bubble {} spawned at ({x}, {y})", bubble.get());
        }
        Event::BubbleSurfaced { bubble, visible } => {
            log::debug!("bubble {} surfaced, {visible} visible", bubble.get());
        }
        Event::SpawnRejected { reason } => log::warn!("spawn rejected: {reason}"),
        Event::TimeAdvanced { .. } => {}
    }
}
