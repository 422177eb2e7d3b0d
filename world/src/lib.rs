#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative run state for the photosynthesis simulation.

mod bubbles;

use std::time::Duration;

use photosynthesis_core::{countdown_seconds, Command, Event, SpawnError, RUN_DURATION};

use self::bubbles::BubbleField;

/// Represents the authoritative simulation session.
#[derive(Debug)]
pub struct World {
    run_duration: Duration,
    run: Option<Run>,
}

#[derive(Debug)]
struct Run {
    target: u32,
    visible: u32,
    elapsed: Duration,
    countdown: u32,
    running: bool,
    closing_frame: bool,
    bubbles: BubbleField,
}

impl Run {
    fn new(target: u32, duration: Duration) -> Self {
        let countdown = u32::try_from(countdown_seconds(duration, Duration::ZERO).max(0))
            .unwrap_or(u32::MAX);
        Self {
            target,
            visible: 0,
            elapsed: Duration::ZERO,
            countdown,
            running: true,
            closing_frame: false,
            bubbles: BubbleField::default(),
        }
    }

    fn created(&self) -> u32 {
        u32::try_from(self.bubbles.len()).unwrap_or(u32::MAX)
    }

    fn accepts_spawns(&self) -> bool {
        self.running || self.closing_frame
    }
}

impl World {
    /// Creates an idle world whose runs last [`RUN_DURATION`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_run_duration(RUN_DURATION)
    }

    /// Creates an idle world whose runs last the provided duration.
    #[must_use]
    pub fn with_run_duration(run_duration: Duration) -> Self {
        Self {
            run_duration,
            run: None,
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureRun { inputs, target } => {
            let run = Run::new(target, world.run_duration);
            out_events.push(Event::RunConfigured {
                inputs,
                target,
                duration: world.run_duration,
            });
            out_events.push(Event::CountdownChanged {
                seconds: run.countdown,
            });
            world.run = Some(run);
        }
        Command::Tick { dt } => {
            let duration = world.run_duration;
            let Some(run) = world.run.as_mut() else {
                return;
            };

            run.closing_frame = false;
            run.elapsed = run.elapsed.saturating_add(dt);
            out_events.push(Event::TimeAdvanced {
                dt,
                elapsed: run.elapsed,
            });

            if !run.running {
                return;
            }

            let remaining = countdown_seconds(duration, run.elapsed);
            if remaining >= 0 {
                let seconds = u32::try_from(remaining).unwrap_or(u32::MAX);
                if seconds != run.countdown {
                    run.countdown = seconds;
                    out_events.push(Event::CountdownChanged { seconds });
                }
            } else {
                run.running = false;
                run.closing_frame = true;
                out_events.push(Event::EmissionClosed {
                    outstanding: run.target.saturating_sub(run.created()),
                });
            }
        }
        Command::SpawnBubble { x, y } => {
            let rejection = match world.run.as_mut() {
                None => Some(SpawnError::NoActiveRun),
                Some(run) if !run.accepts_spawns() => Some(SpawnError::EmissionClosed),
                Some(run) if run.created() >= run.target => Some(SpawnError::TargetReached),
                Some(run) => {
                    let bubble = run.bubbles.spawn(x, y);
                    out_events.push(Event::BubbleSpawned { bubble, x, y });
                    None
                }
            };

            if let Some(reason) = rejection {
                out_events.push(Event::SpawnRejected { reason });
            }
        }
        Command::RiseBubble { bubble, distance } => {
            let Some(run) = world.run.as_mut() else {
                return;
            };
            let Some(entry) = run.bubbles.get_mut(bubble) else {
                return;
            };

            if entry.rise(distance) {
                run.visible = run.visible.saturating_add(1);
                out_events.push(Event::BubbleSurfaced {
                    bubble,
                    visible: run.visible,
                });
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::World;
    use photosynthesis_core::{BubbleView, RunStatus};

    /// Captures the progress of the active run, or an idle status when none is configured.
    #[must_use]
    pub fn run_status(world: &World) -> RunStatus {
        world
            .run
            .as_ref()
            .map(|run| RunStatus {
                target: run.target,
                created: run.created(),
                visible: run.visible,
                elapsed: run.elapsed,
                countdown: run.countdown,
                running: run.running,
            })
            .unwrap_or_default()
    }

    /// Captures a read-only view of the bubbles created by the active run.
    #[must_use]
    pub fn bubble_view(world: &World) -> BubbleView {
        let snapshots = world
            .run
            .as_ref()
            .map(|run| run.bubbles.iter().map(|bubble| bubble.snapshot()).collect())
            .unwrap_or_default();
        BubbleView::from_snapshots(snapshots)
    }

    /// Length of the emission window applied to every run.
    #[must_use]
    pub fn run_duration(world: &World) -> Duration {
        world.run_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use photosynthesis_core::{BubbleId, FilterColor, Level, SimulationInputs, SURFACE_LINE};

    fn inputs() -> SimulationInputs {
        SimulationInputs::new(
            FilterColor::Red,
            Level::new(5).expect("in range"),
            Level::new(2).expect("in range"),
        )
    }

    fn configured(target: u32) -> World {
        let mut world = World::with_run_duration(Duration::from_secs(3));
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::ConfigureRun {
                inputs: inputs(),
                target,
            },
            &mut events,
        );
        world
    }

    #[test]
    fn configure_run_announces_target_and_initial_countdown() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::ConfigureRun {
                inputs: inputs(),
                target: 8,
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![
                Event::RunConfigured {
                    inputs: inputs(),
                    target: 8,
                    duration: RUN_DURATION,
                },
                Event::CountdownChanged { seconds: 30 },
            ]
        );
        let status = query::run_status(&world);
        assert!(status.running);
        assert_eq!(status.countdown, 30);
    }

    #[test]
    fn tick_without_run_is_ignored() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(16),
            },
            &mut events,
        );

        assert!(events.is_empty());
        assert_eq!(query::run_status(&world), Default::default());
    }

    #[test]
    fn countdown_closes_emission_once_it_would_turn_negative() {
        let mut world = configured(2);
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(3_000),
            },
            &mut events,
        );
        assert!(query::run_status(&world).running);
        assert_eq!(query::run_status(&world).countdown, 0);

        events.clear();
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(1),
            },
            &mut events,
        );
        assert!(!query::run_status(&world).running);
        assert!(events.contains(&Event::EmissionClosed { outstanding: 2 }));
        assert_eq!(query::run_status(&world).countdown, 0);
    }

    #[test]
    fn partial_millisecond_past_expiry_closes_emission() {
        let mut world = configured(1);
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_micros(1_500_300),
            },
            &mut events,
        );
        assert_eq!(query::run_status(&world).countdown, 1);

        events.clear();
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_micros(1_500_100),
            },
            &mut events,
        );
        assert!(!query::run_status(&world).running);
        assert!(events.contains(&Event::EmissionClosed { outstanding: 1 }));
    }

    #[test]
    fn spawns_are_accepted_only_during_the_closing_frame_after_expiry() {
        let mut world = configured(3);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(3_500),
            },
            &mut events,
        );
        apply(&mut world, Command::SpawnBubble { x: 10.0, y: 430.0 }, &mut events);
        assert_eq!(query::run_status(&world).created, 1);

        events.clear();
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(16),
            },
            &mut events,
        );
        apply(&mut world, Command::SpawnBubble { x: 10.0, y: 430.0 }, &mut events);
        assert!(events.contains(&Event::SpawnRejected {
            reason: SpawnError::EmissionClosed
        }));
        assert_eq!(query::run_status(&world).created, 1);
    }

    #[test]
    fn spawns_beyond_target_are_rejected() {
        let mut world = configured(1);
        let mut events = Vec::new();
        apply(&mut world, Command::SpawnBubble { x: 50.0, y: 450.0 }, &mut events);
        apply(&mut world, Command::SpawnBubble { x: 60.0, y: 460.0 }, &mut events);

        assert_eq!(
            events,
            vec![
                Event::BubbleSpawned {
                    bubble: BubbleId::new(0),
                    x: 50.0,
                    y: 450.0,
                },
                Event::SpawnRejected {
                    reason: SpawnError::TargetReached,
                },
            ]
        );
    }

    #[test]
    fn spawn_without_run_is_rejected() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(&mut world, Command::SpawnBubble { x: 50.0, y: 450.0 }, &mut events);

        assert_eq!(
            events,
            vec![Event::SpawnRejected {
                reason: SpawnError::NoActiveRun
            }]
        );
    }

    #[test]
    fn rising_bubble_is_counted_visible_exactly_once() {
        let mut world = configured(1);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SpawnBubble {
                x: 50.0,
                y: SURFACE_LINE + 1.0,
            },
            &mut events,
        );
        let bubble = BubbleId::new(0);

        events.clear();
        for _ in 0..4 {
            apply(
                &mut world,
                Command::RiseBubble {
                    bubble,
                    distance: 0.75,
                },
                &mut events,
            );
        }

        assert_eq!(events, vec![Event::BubbleSurfaced { bubble, visible: 1 }]);
        assert_eq!(query::run_status(&world).visible, 1);
        let snapshot = *query::bubble_view(&world).iter().next().expect("bubble");
        assert!(snapshot.visible);
        assert!((snapshot.y - (SURFACE_LINE - 2.0)).abs() < 1e-4);
    }

    #[test]
    fn reconfiguring_discards_previous_bubbles() {
        let mut world = configured(2);
        let mut events = Vec::new();
        apply(&mut world, Command::SpawnBubble { x: 50.0, y: 450.0 }, &mut events);
        assert_eq!(query::bubble_view(&world).len(), 1);

        apply(
            &mut world,
            Command::ConfigureRun {
                inputs: inputs(),
                target: 0,
            },
            &mut events,
        );
        assert!(query::bubble_view(&world).is_empty());
        assert_eq!(query::run_status(&world).target, 0);
    }
}
