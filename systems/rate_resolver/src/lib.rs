#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Bubble-rate resolver that turns filter, light and co2 into a target bubble count.
//!
//! Inputs are clamped, looked up in an authored [`RateTable`] and perturbed by
//! a small jitter drawn from a caller-supplied random source, so replays with
//! the same seed resolve to the same count.

mod table;

use std::collections::BTreeMap;

use photosynthesis_core::{ClampNotice, FilterColor, Level, SimulationInputs};
use rand::Rng;
use thiserror::Error;

/// Continuous range the jitter offset is drawn from before truncation toward zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Jitter {
    low: f64,
    high: f64,
}

impl Jitter {
    /// Jitter applied to almost every band: offsets drawn from `[-2, 2)`.
    pub const STANDARD: Jitter = Jitter::new(-2.0, 2.0);
    /// Wider jitter drawn from `[-2, 3)`.
    pub const WIDE: Jitter = Jitter::new(-2.0, 3.0);
    /// No jitter at all; the base value is returned unchanged.
    pub const NONE: Jitter = Jitter::new(0.0, 0.0);

    /// Creates a jitter range. An empty range always yields `low` truncated.
    #[must_use]
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Draws a truncated offset from the range.
    pub fn sample<R>(self, rng: &mut R) -> i32
    where
        R: Rng + ?Sized,
    {
        let value = if self.low < self.high {
            rng.gen_range(self.low..self.high)
        } else {
            self.low
        };
        value.trunc() as i32
    }
}

/// Authored base rate that applies to an inclusive range of co2 levels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Co2Band {
    min: u8,
    max: u8,
    base: u32,
    jitter: Jitter,
}

impl Co2Band {
    /// Creates a band covering `min..=max` with the standard jitter.
    #[must_use]
    pub const fn new(min: u8, max: u8, base: u32) -> Self {
        Self {
            min,
            max,
            base,
            jitter: Jitter::STANDARD,
        }
    }

    /// Replaces the jitter applied to the band.
    #[must_use]
    pub const fn with_jitter(mut self, jitter: Jitter) -> Self {
        self.jitter = jitter;
        self
    }

    /// Reports whether the band covers the provided co2 level.
    #[must_use]
    pub const fn contains(&self, co2: Level) -> bool {
        self.min <= co2.get() && co2.get() <= self.max
    }

    /// Base bubble count before jitter.
    #[must_use]
    pub const fn base(&self) -> u32 {
        self.base
    }

    /// Jitter applied on top of the base count.
    #[must_use]
    pub const fn jitter(&self) -> Jitter {
        self.jitter
    }

    /// Draws a bubble count: base plus truncated jitter, never below zero.
    pub fn sample<R>(&self, rng: &mut R) -> u32
    where
        R: Rng + ?Sized,
    {
        let count = i64::from(self.base) + i64::from(self.jitter.sample(rng));
        u32::try_from(count.max(0)).unwrap_or(u32::MAX)
    }
}

/// Lookup table keyed by filter and light level, holding co2 bands per row.
#[derive(Clone, Debug, PartialEq)]
pub struct RateTable {
    rows: BTreeMap<(FilterColor, u8), Vec<Co2Band>>,
}

impl RateTable {
    /// Table shipped with the simulation.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_rows(table::builtin_rows())
    }

    /// Builds a table from `(filter, light, bands)` rows. Later rows replace earlier ones.
    #[must_use]
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (FilterColor, u8, Vec<Co2Band>)>,
    {
        let rows = rows
            .into_iter()
            .map(|(filter, light, bands)| ((filter, light), bands))
            .collect();
        Self { rows }
    }

    /// Finds the band for the provided inputs.
    ///
    /// Returns `Ok(None)` when light or co2 is zero, since nothing is produced
    /// without either.
    pub fn band(&self, inputs: &SimulationInputs) -> Result<Option<&Co2Band>, ResolveError> {
        if inputs.light.is_zero() || inputs.co2.is_zero() {
            return Ok(None);
        }

        self.rows
            .get(&(inputs.filter, inputs.light.get()))
            .and_then(|bands| bands.iter().find(|band| band.contains(inputs.co2)))
            .map(Some)
            .ok_or(ResolveError::NoBandDefined {
                filter: inputs.filter,
                light: inputs.light,
                co2: inputs.co2,
            })
    }

    /// Lists every non-zero `(filter, light, co2)` combination with no band.
    #[must_use]
    pub fn coverage_gaps(&self) -> Vec<SimulationInputs> {
        let levels = || (1..=Level::MAX.get()).filter_map(Level::new);
        FilterColor::ALL
            .into_iter()
            .flat_map(|filter| {
                levels().flat_map(move |light| {
                    levels().map(move |co2| SimulationInputs::new(filter, light, co2))
                })
            })
            .filter(|inputs| self.band(inputs).is_err())
            .collect()
    }
}

/// Errors raised when no bubble rate can be derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The table has no band for this combination.
    #[error("no bubble rate defined for {filter} light at level {light} with co2 {co2}")]
    NoBandDefined {
        /// Requested filter.
        filter: FilterColor,
        /// Clamped light level.
        light: Level,
        /// Clamped co2 level.
        co2: Level,
    },
}

/// Outcome of resolving raw inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// Inputs after clamping.
    pub inputs: SimulationInputs,
    /// Corrections applied while clamping.
    pub notices: Vec<ClampNotice>,
    /// Number of bubbles the run should produce.
    pub target: u32,
}

/// Resolves target bubble counts from a [`RateTable`].
#[derive(Clone, Debug)]
pub struct RateResolver {
    table: RateTable,
}

impl Default for RateResolver {
    fn default() -> Self {
        Self::new(RateTable::builtin())
    }
}

impl RateResolver {
    /// Creates a resolver backed by the provided table.
    #[must_use]
    pub fn new(table: RateTable) -> Self {
        Self { table }
    }

    /// Table consulted by the resolver.
    #[must_use]
    pub fn table(&self) -> &RateTable {
        &self.table
    }

    /// Clamps raw inputs and resolves the target bubble count.
    pub fn resolve<R>(
        &self,
        filter: FilterColor,
        light: i32,
        co2: i32,
        rng: &mut R,
    ) -> Result<Resolution, ResolveError>
    where
        R: Rng + ?Sized,
    {
        let clamped = SimulationInputs::from_raw(filter, light, co2);
        let target = self.resolve_inputs(&clamped.inputs, rng)?;
        Ok(Resolution {
            inputs: clamped.inputs,
            notices: clamped.notices,
            target,
        })
    }

    /// Resolves the target bubble count for inputs that are already clamped.
    pub fn resolve_inputs<R>(
        &self,
        inputs: &SimulationInputs,
        rng: &mut R,
    ) -> Result<u32, ResolveError>
    where
        R: Rng + ?Sized,
    {
        Ok(self
            .table
            .band(inputs)?
            .map_or(0, |band| band.sample(rng)))
    }
}
