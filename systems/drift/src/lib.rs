#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Drift system that proposes how far each bubble rises per frame.

use std::ops::Range;

use photosynthesis_core::{BubbleView, Command, Event};
use rand::Rng;

/// Distance range a bubble may rise in one frame, in canvas units.
pub const RISE_PER_FRAME: Range<f32> = 0.2..2.0;

/// Pure system that reacts to time advancing by emitting rise commands.
#[derive(Debug)]
pub struct Drift<R> {
    rng: R,
}

impl<R> Drift<R>
where
    R: Rng,
{
    /// Creates a drift system drawing per-frame distances from `rng`.
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Emits one rise command per bubble for every frame that advanced time.
    pub fn handle(&mut self, events: &[Event], bubbles: &BubbleView, out: &mut Vec<Command>) {
        let frames = events
            .iter()
            .filter(|event| matches!(event, Event::TimeAdvanced { .. }))
            .count();

        for _ in 0..frames {
            for bubble in bubbles.iter() {
                out.push(Command::RiseBubble {
                    bubble: bubble.id,
                    distance: self.rng.gen_range(RISE_PER_FRAME),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use photosynthesis_core::{BubbleId, BubbleSnapshot};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::time::Duration;

    fn view(count: u32) -> BubbleView {
        BubbleView::from_snapshots(
            (0..count)
                .map(|index| BubbleSnapshot {
                    id: BubbleId::new(index),
                    x: 100.0,
                    y: 500.0,
                    visible: false,
                })
                .collect(),
        )
    }

    #[test]
    fn no_commands_without_time_advancing() {
        let mut drift = Drift::new(ChaCha8Rng::seed_from_u64(9));
        let mut commands = Vec::new();
        drift.handle(
            &[Event::CountdownChanged { seconds: 12 }],
            &view(3),
            &mut commands,
        );
        assert!(commands.is_empty());
    }

    #[test]
    fn every_bubble_rises_within_the_frame_range() {
        let mut drift = Drift::new(ChaCha8Rng::seed_from_u64(9));
        let mut commands = Vec::new();
        let tick = Event::TimeAdvanced {
            dt: Duration::from_millis(16),
            elapsed: Duration::from_millis(16),
        };
        for _ in 0..100 {
            drift.handle(std::slice::from_ref(&tick), &view(4), &mut commands);
        }

        assert_eq!(commands.len(), 400);
        for command in commands {
            let Command::RiseBubble { distance, .. } = command else {
                panic!("unexpected command {command:?}");
            };
            assert!(RISE_PER_FRAME.contains(&distance), "{distance}");
        }
    }
}
