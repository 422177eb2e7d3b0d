#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Emission pacing system responsible for issuing bubble spawn commands.
//!
//! The target count is spread across the run: once per interval a small
//! random batch is created, so the emission rate is roughly even without
//! being perfectly regular. When the countdown expires, whatever is still
//! outstanding is flushed in one go so every run ends with its full target.

use std::{ops::Range, time::Duration};

use photosynthesis_core::{Command, Event, RunStatus, CONTAINER_SIZE, SPAWN_DEPTH, SPAWN_MARGIN};
use rand::Rng;

const BATCH_DRAW: Range<f32> = 0.1..1.1;

/// Pure system that paces bubble creation over the run.
#[derive(Debug)]
pub struct Emission<R> {
    rng: R,
    interval: Option<Duration>,
    elapsed: Duration,
    last_emission: Duration,
}

impl<R> Emission<R>
where
    R: Rng,
{
    /// Creates a new emission system drawing batch sizes and positions from `rng`.
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            interval: None,
            elapsed: Duration::ZERO,
            last_emission: Duration::ZERO,
        }
    }

    /// Time between batches for the current run, if any bubbles are expected.
    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Run time at which the most recent batch was emitted.
    #[must_use]
    pub fn last_emission(&self) -> Duration {
        self.last_emission
    }

    /// Consumes events and the current run snapshot to emit spawn commands.
    pub fn handle(&mut self, events: &[Event], run: &RunStatus, out: &mut Vec<Command>) {
        let mut advanced = false;
        let mut flush = 0_u32;

        for event in events {
            match event {
                Event::RunConfigured {
                    target, duration, ..
                } => {
                    self.interval = interval_for(*duration, *target);
                    self.elapsed = Duration::ZERO;
                    self.last_emission = Duration::ZERO;
                }
                Event::TimeAdvanced { elapsed, .. } => {
                    self.elapsed = *elapsed;
                    advanced = true;
                }
                Event::EmissionClosed { outstanding } => {
                    flush = flush.max(*outstanding);
                }
                _ => {}
            }
        }

        let pending = run.outstanding();
        if flush > 0 {
            for _ in 0..flush.min(pending) {
                self.push_spawn(out);
            }
            return;
        }

        if !advanced || !run.running || pending == 0 {
            return;
        }

        let Some(interval) = self.interval else {
            return;
        };

        if self.elapsed.saturating_sub(self.last_emission) <= interval {
            return;
        }

        self.last_emission = self.elapsed;
        let batch = self.draw_batch_size().min(pending);
        for _ in 0..batch {
            self.push_spawn(out);
        }
    }

    /// Counts the whole steps that fit below a draw from `BATCH_DRAW`.
    fn draw_batch_size(&mut self) -> u32 {
        let draw = self.rng.gen_range(BATCH_DRAW);
        let mut batch = 0;
        let mut step = 0.0_f32;
        while step < draw {
            batch += 1;
            step += 1.0;
        }
        batch
    }

    fn push_spawn(&mut self, out: &mut Vec<Command>) {
        let x = self
            .rng
            .gen_range(SPAWN_MARGIN..CONTAINER_SIZE - SPAWN_MARGIN)
            .floor();
        let y = self.rng.gen_range(0.0..SPAWN_DEPTH).floor() + CONTAINER_SIZE;
        out.push(Command::SpawnBubble { x, y });
    }
}

fn interval_for(duration: Duration, target: u32) -> Option<Duration> {
    if target == 0 {
        None
    } else {
        Some(duration / target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn emission() -> Emission<ChaCha8Rng> {
        Emission::new(ChaCha8Rng::seed_from_u64(0x00c0_ffee))
    }

    #[test]
    fn batch_sizes_are_one_or_two() {
        let mut emission = emission();
        for _ in 0..500 {
            let batch = emission.draw_batch_size();
            assert!((1..=2).contains(&batch), "batch {batch}");
        }
    }

    #[test]
    fn interval_divides_duration_by_target() {
        assert_eq!(
            interval_for(Duration::from_secs(30), 8),
            Some(Duration::from_millis(3_750))
        );
        assert_eq!(interval_for(Duration::from_secs(30), 0), None);
    }

    #[test]
    fn spawn_positions_stay_inside_the_spawn_band() {
        let mut emission = emission();
        let mut out = Vec::new();
        for _ in 0..200 {
            emission.push_spawn(&mut out);
        }

        for command in out {
            let Command::SpawnBubble { x, y } = command else {
                panic!("unexpected command {command:?}");
            };
            assert!((SPAWN_MARGIN..CONTAINER_SIZE - SPAWN_MARGIN).contains(&x));
            assert!((CONTAINER_SIZE..CONTAINER_SIZE + SPAWN_DEPTH).contains(&y));
            assert_eq!(x, x.floor());
            assert_eq!(y, y.floor());
        }
    }
}
