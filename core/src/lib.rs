#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the photosynthesis simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to. Systems consume event streams, query immutable snapshots, and
//! respond exclusively with new command batches.

use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wall-clock length of a single simulation run.
pub const RUN_DURATION: Duration = Duration::from_millis(30_000);

/// Side length of the square plant container measured in canvas units.
pub const CONTAINER_SIZE: f32 = 420.0;

/// Vertical coordinate a bubble must rise to before it counts as visible.
pub const SURFACE_LINE: f32 = 415.0;

/// Horizontal margin kept free on both sides of the container when spawning.
pub const SPAWN_MARGIN: f32 = 6.0;

/// Depth of the band below the container in which bubbles are created.
pub const SPAWN_DEPTH: f32 = 150.0;

/// Colour of the light that reaches the plant.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum FilterColor {
    /// Unfiltered natural light.
    Colorless,
    /// Light passed through a red filter.
    Red,
    /// Light passed through a blue filter.
    Blue,
    /// Light passed through a green filter.
    Green,
}

impl FilterColor {
    /// Every filter in presentation order.
    pub const ALL: [FilterColor; 4] = [Self::Colorless, Self::Red, Self::Blue, Self::Green];

    /// Lower-case name used in labels and configuration files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Colorless => "colorless",
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Green => "green",
        }
    }
}

impl fmt::Display for FilterColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raised when a filter name does not match any known colour.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown filter color `{0}` (expected colorless, red, blue or green)")]
pub struct UnknownFilterColor(pub String);

impl FromStr for FilterColor {
    type Err = UnknownFilterColor;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|color| color.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownFilterColor(trimmed.to_owned()))
    }
}

impl TryFrom<String> for FilterColor {
    type Error = UnknownFilterColor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FilterColor> for String {
    fn from(color: FilterColor) -> Self {
        color.name().to_owned()
    }
}

/// Input intensity constrained to the inclusive range `0..=10`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    /// Lowest representable level.
    pub const MIN: Level = Level(0);
    /// Highest representable level.
    pub const MAX: Level = Level(10);

    /// Creates a level when the value already lies within range.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value <= Self::MAX.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Clamps an arbitrary integer into range, reporting which bound was applied.
    #[must_use]
    pub fn clamp_from(raw: i32) -> (Self, Option<ClampBound>) {
        if raw < i32::from(Self::MIN.0) {
            (Self::MIN, Some(ClampBound::Minimum))
        } else if raw > i32::from(Self::MAX.0) {
            (Self::MAX, Some(ClampBound::Maximum))
        } else {
            // In range, so the narrowing cannot fail.
            (Self(u8::try_from(raw).unwrap_or(Self::MAX.0)), None)
        }
    }

    /// Numeric value of the level.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Reports whether the level is zero, which stops photosynthesis entirely.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raised when deserialising a level outside `0..=10`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("level {0} is outside the supported range 0..=10")]
pub struct LevelOutOfRange(pub u8);

impl TryFrom<u8> for Level {
    type Error = LevelOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(LevelOutOfRange(value))
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.0
    }
}

/// Bound applied when a raw input had to be corrected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClampBound {
    /// The value was below zero and was raised to the minimum.
    Minimum,
    /// The value was above ten and was lowered to the maximum.
    Maximum,
}

/// Adjustable simulation input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Knob {
    /// Light intensity.
    Light,
    /// Carbon-dioxide concentration.
    Co2,
}

impl Knob {
    /// Label used in diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Co2 => "co2",
        }
    }
}

/// Diagnostic emitted when an out-of-range input was silently corrected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClampNotice {
    /// Input that was corrected.
    pub knob: Knob,
    /// Value supplied by the caller.
    pub requested: i32,
    /// Value that will be used instead.
    pub applied: Level,
    /// Bound that was applied.
    pub bound: ClampBound,
}

impl ClampNotice {
    /// Short remark shown to the person who supplied the value.
    #[must_use]
    pub const fn remark(&self) -> &'static str {
        match (self.knob, self.bound) {
            (Knob::Co2, ClampBound::Minimum) => "Sneaky of you.",
            (Knob::Co2, ClampBound::Maximum) => "Nice try.",
            (Knob::Light, ClampBound::Minimum) => "Wow.",
            (Knob::Light, ClampBound::Maximum) => "Too bright!",
        }
    }
}

impl fmt::Display for ClampNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} clamped to {}",
            self.remark(),
            self.knob.label(),
            self.requested,
            self.applied
        )
    }
}

/// Inputs that drive a single run after clamping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimulationInputs {
    /// Colour of the light filter.
    pub filter: FilterColor,
    /// Light intensity.
    pub light: Level,
    /// Carbon-dioxide concentration.
    pub co2: Level,
}

impl SimulationInputs {
    /// Creates inputs from values that are already in range.
    #[must_use]
    pub const fn new(filter: FilterColor, light: Level, co2: Level) -> Self {
        Self { filter, light, co2 }
    }

    /// Clamps raw integers into range and records a notice for every correction.
    #[must_use]
    pub fn from_raw(filter: FilterColor, light: i32, co2: i32) -> ClampedInputs {
        let mut notices = Vec::new();

        let (co2_level, co2_bound) = Level::clamp_from(co2);
        if let Some(bound) = co2_bound {
            notices.push(ClampNotice {
                knob: Knob::Co2,
                requested: co2,
                applied: co2_level,
                bound,
            });
        }

        let (light_level, light_bound) = Level::clamp_from(light);
        if let Some(bound) = light_bound {
            notices.push(ClampNotice {
                knob: Knob::Light,
                requested: light,
                applied: light_level,
                bound,
            });
        }

        ClampedInputs {
            inputs: Self::new(filter, light_level, co2_level),
            notices,
        }
    }
}

/// Result of clamping raw inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClampedInputs {
    /// Inputs guaranteed to lie within range.
    pub inputs: SimulationInputs,
    /// Corrections applied while clamping, co2 first.
    pub notices: Vec<ClampNotice>,
}

/// Unique identifier assigned to a bubble.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BubbleId(u32);

impl BubbleId {
    /// Creates a new bubble identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Starts a fresh run, discarding any bubbles from a previous one.
    ConfigureRun {
        /// Clamped inputs the run was resolved from.
        inputs: SimulationInputs,
        /// Number of bubbles that should appear over the whole run.
        target: u32,
    },
    /// Advances the run clock by the provided delta time.
    Tick {
        /// Wall-clock time that elapsed since the previous frame.
        dt: Duration,
    },
    /// Requests creation of a bubble below the container.
    SpawnBubble {
        /// Horizontal position, fixed for the bubble's lifetime.
        x: f32,
        /// Initial vertical position.
        y: f32,
    },
    /// Moves a bubble upwards by the provided distance.
    RiseBubble {
        /// Identifier of the bubble to move.
        bubble: BubbleId,
        /// Distance travelled towards the surface, in canvas units.
        distance: f32,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Announces that a new run was configured.
    RunConfigured {
        /// Inputs the run was resolved from.
        inputs: SimulationInputs,
        /// Number of bubbles expected over the run.
        target: u32,
        /// Length of the emission window.
        duration: Duration,
    },
    /// Indicates that the run clock advanced.
    TimeAdvanced {
        /// Duration that elapsed during the tick.
        dt: Duration,
        /// Total time elapsed since the run was configured.
        elapsed: Duration,
    },
    /// Reports a new non-negative countdown value.
    CountdownChanged {
        /// Whole seconds remaining.
        seconds: u32,
    },
    /// Reports that the emission window closed because the countdown expired.
    EmissionClosed {
        /// Bubbles that still have to be created to reach the target.
        outstanding: u32,
    },
    /// Confirms that a bubble was created.
    BubbleSpawned {
        /// Identifier assigned to the new bubble.
        bubble: BubbleId,
        /// Horizontal position of the bubble.
        x: f32,
        /// Initial vertical position of the bubble.
        y: f32,
    },
    /// Confirms that a bubble crossed the surface line for the first time.
    BubbleSurfaced {
        /// Identifier of the bubble that became visible.
        bubble: BubbleId,
        /// Visible bubble count after this transition.
        visible: u32,
    },
    /// Reports that a spawn request was rejected.
    SpawnRejected {
        /// Reason the spawn failed.
        reason: SpawnError,
    },
}

/// Reasons a spawn request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum SpawnError {
    /// No run has been configured yet.
    #[error("no run is configured")]
    NoActiveRun,
    /// The countdown expired and emission stopped for this run.
    #[error("emission window is closed")]
    EmissionClosed,
    /// The run already created every bubble it was resolved for.
    #[error("bubble target already reached")]
    TargetReached,
}

/// Snapshot of run progress used by systems and adapters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct RunStatus {
    /// Number of bubbles the run should create.
    pub target: u32,
    /// Number of bubbles created so far.
    pub created: u32,
    /// Number of bubbles that crossed the surface line.
    pub visible: u32,
    /// Time elapsed since the run was configured.
    pub elapsed: Duration,
    /// Last non-negative countdown value in whole seconds.
    pub countdown: u32,
    /// Whether the emission window is still open.
    pub running: bool,
}

impl RunStatus {
    /// Bubbles that still have to be created to reach the target.
    #[must_use]
    pub const fn outstanding(&self) -> u32 {
        self.target.saturating_sub(self.created)
    }
}

/// Computes `floor((duration - elapsed) / 1s)` at full precision.
///
/// The value turns negative as soon as `elapsed` exceeds `duration`, which is
/// the moment emission closes.
#[must_use]
pub fn countdown_seconds(duration: Duration, elapsed: Duration) -> i64 {
    const NANOS_PER_SECOND: i128 = 1_000_000_000;

    let remaining = i128::try_from(duration.as_nanos()).unwrap_or(i128::MAX)
        - i128::try_from(elapsed.as_nanos()).unwrap_or(i128::MAX);
    let seconds = remaining.div_euclid(NANOS_PER_SECOND);
    i64::try_from(seconds).unwrap_or(if seconds < 0 { i64::MIN } else { i64::MAX })
}

/// Immutable representation of a single bubble used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BubbleSnapshot {
    /// Unique identifier assigned to the bubble.
    pub id: BubbleId,
    /// Horizontal position.
    pub x: f32,
    /// Current vertical position.
    pub y: f32,
    /// Whether the bubble has crossed the surface line.
    pub visible: bool,
}

/// Read-only snapshot describing all bubbles of the current run.
#[derive(Clone, Debug, Default)]
pub struct BubbleView {
    snapshots: Vec<BubbleSnapshot>,
}

impl BubbleView {
    /// Creates a new bubble view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<BubbleSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &BubbleSnapshot> {
        self.snapshots.iter()
    }

    /// Number of bubbles captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no bubbles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamping_raises_and_lowers_out_of_range_values() {
        let clamped = SimulationInputs::from_raw(FilterColor::Blue, 11, -3);

        assert_eq!(clamped.inputs.light, Level::MAX);
        assert_eq!(clamped.inputs.co2, Level::MIN);
        assert_eq!(clamped.notices.len(), 2);
        assert_eq!(clamped.notices[0].remark(), "Sneaky of you.");
        assert_eq!(clamped.notices[1].remark(), "Too bright!");
    }

    #[test]
    fn in_range_values_produce_no_notices() {
        let clamped = SimulationInputs::from_raw(FilterColor::Red, 5, 2);

        assert!(clamped.notices.is_empty());
        assert_eq!(clamped.inputs.light.get(), 5);
        assert_eq!(clamped.inputs.co2.get(), 2);
    }

    #[test]
    fn notices_name_the_corrected_knob() {
        let clamped = SimulationInputs::from_raw(FilterColor::Green, -5, 40);
        let remarks: Vec<_> = clamped.notices.iter().map(ClampNotice::remark).collect();

        assert_eq!(remarks, ["Nice try.", "Wow."]);
        assert_eq!(
            clamped.notices[1].to_string(),
            "Wow. light -5 clamped to 0"
        );
    }

    #[test]
    fn filter_color_parses_case_insensitively() {
        assert_eq!("RED".parse::<FilterColor>(), Ok(FilterColor::Red));
        assert_eq!(" colorless ".parse::<FilterColor>(), Ok(FilterColor::Colorless));
        assert_eq!(
            "purple".parse::<FilterColor>(),
            Err(UnknownFilterColor("purple".to_owned()))
        );
    }

    #[test]
    fn countdown_uses_floor_division() {
        assert_eq!(countdown_seconds(RUN_DURATION, Duration::ZERO), 30);
        assert_eq!(countdown_seconds(RUN_DURATION, Duration::from_millis(29_001)), 0);
        assert_eq!(countdown_seconds(RUN_DURATION, Duration::from_millis(30_000)), 0);
        assert_eq!(countdown_seconds(RUN_DURATION, Duration::from_millis(30_001)), -1);
    }

    #[test]
    fn countdown_keeps_sub_millisecond_precision() {
        assert_eq!(countdown_seconds(RUN_DURATION, Duration::from_micros(15_000_300)), 14);
        assert_eq!(countdown_seconds(RUN_DURATION, Duration::from_micros(29_999_999)), 0);
        assert_eq!(countdown_seconds(RUN_DURATION, Duration::from_micros(30_000_600)), -1);
        assert_eq!(countdown_seconds(RUN_DURATION, Duration::from_nanos(30_000_000_001)), -1);
    }

    #[test]
    fn inputs_round_trip_through_bincode_and_reject_out_of_range_levels() {
        let inputs = SimulationInputs::new(
            FilterColor::Green,
            Level::new(7).expect("in range"),
            Level::new(3).expect("in range"),
        );
        let bytes = bincode::serialize(&inputs).expect("serialize");
        let restored: SimulationInputs = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, inputs);

        let mut tampered = bytes;
        let last = tampered.len() - 1;
        tampered[last] = 11;
        assert!(bincode::deserialize::<SimulationInputs>(&tampered).is_err());
    }

    #[test]
    fn filter_names_deserialize_like_they_parse() {
        let bytes = bincode::serialize(&" GREEN").expect("serialize");
        let color: FilterColor = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(color, FilterColor::Green);

        let bytes = bincode::serialize(&FilterColor::Red).expect("serialize");
        let name: String = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(name, "red");

        let bytes = bincode::serialize(&"purple").expect("serialize");
        assert!(bincode::deserialize::<FilterColor>(&bytes).is_err());
    }

    #[test]
    fn run_status_reports_outstanding_bubbles() {
        let status = RunStatus {
            target: 8,
            created: 5,
            ..RunStatus::default()
        };
        assert_eq!(status.outstanding(), 3);
    }
}
