//! Authored bubble rates, one row of co2 bands per light level and filter.
//!
//! The numbers were tuned by hand for classroom use and are not derived from
//! any model, so they live here as plain data.

use photosynthesis_core::FilterColor;

use crate::{Co2Band, Jitter};

const fn band(min: u8, max: u8, base: u32) -> Co2Band {
    Co2Band::new(min, max, base)
}

static COLORLESS: [&[Co2Band]; 10] = [
    &[band(1, 2, 3), band(3, 10, 4)],
    &[band(1, 10, 7).with_jitter(Jitter::WIDE)],
    &[band(1, 1, 6), band(2, 5, 9), band(6, 10, 11)],
    &[band(1, 1, 7), band(2, 5, 12), band(6, 10, 14)],
    &[band(1, 1, 8), band(2, 4, 15), band(5, 10, 17)],
    &[band(1, 1, 9), band(2, 4, 18), band(5, 10, 20)],
    &[
        band(1, 1, 9),
        band(2, 2, 15),
        band(3, 3, 17),
        band(4, 8, 21),
        band(9, 10, 28),
    ],
    &[
        band(1, 1, 9),
        band(2, 2, 15),
        band(3, 4, 21),
        band(5, 8, 24),
        band(9, 10, 27),
    ],
    &[
        band(1, 1, 9),
        band(2, 2, 16),
        band(3, 3, 21),
        band(4, 6, 25),
        band(7, 10, 30),
    ],
    &[
        band(1, 1, 9),
        band(2, 2, 16),
        band(3, 3, 22),
        band(4, 4, 26),
        band(5, 10, 32),
    ],
];

static RED: [&[Co2Band]; 10] = [
    &[band(1, 10, 2)],
    &[band(1, 3, 4), band(4, 10, 5)],
    &[band(1, 3, 5), band(4, 10, 7)],
    &[band(1, 3, 6), band(4, 10, 8)],
    &[band(1, 3, 8), band(4, 6, 9), band(7, 10, 10)],
    &[band(1, 1, 7), band(2, 4, 11), band(5, 10, 13)],
    &[band(1, 1, 8), band(2, 5, 12), band(6, 10, 15)],
    &[band(1, 4, 14), band(5, 10, 18)],
    &[band(1, 1, 9), band(2, 2, 12), band(3, 4, 15), band(5, 10, 18)],
    &[band(1, 1, 7), band(2, 2, 14), band(3, 5, 18), band(6, 10, 22)],
];

static BLUE: [&[Co2Band]; 10] = [
    &[band(1, 10, 3)],
    &[band(1, 3, 5), band(4, 10, 6)],
    &[band(1, 1, 7), band(2, 10, 9)],
    &[band(1, 1, 7), band(2, 10, 12)],
    &[band(1, 1, 7), band(2, 2, 11), band(3, 6, 13), band(7, 10, 14)],
    &[band(1, 1, 8), band(2, 4, 13), band(5, 7, 15), band(8, 10, 18)],
    &[
        band(1, 1, 8),
        band(2, 2, 12),
        band(3, 3, 15),
        band(4, 4, 18),
        band(5, 10, 20),
    ],
    &[
        band(1, 1, 9),
        band(2, 2, 14),
        band(3, 5, 16),
        band(6, 7, 20),
        band(8, 10, 22),
    ],
    &[band(1, 1, 9), band(2, 2, 14), band(3, 6, 19), band(7, 10, 24)],
    &[
        band(1, 1, 8),
        band(2, 2, 16),
        band(3, 3, 19),
        band(4, 6, 22),
        band(7, 10, 27),
    ],
];

static GREEN: [&[Co2Band]; 10] = [
    &[band(1, 10, 1)],
    &[band(1, 4, 1), band(5, 10, 2)],
    &[band(1, 10, 2)],
    &[band(1, 10, 3)],
    &[band(1, 4, 3), band(5, 10, 4)],
    &[band(1, 4, 4), band(5, 10, 5)],
    &[band(1, 2, 4), band(3, 7, 5), band(8, 10, 6)],
    &[band(1, 10, 6)],
    &[band(1, 10, 7)],
    &[band(1, 10, 8)],
];

fn rows_for(filter: FilterColor) -> &'static [&'static [Co2Band]; 10] {
    match filter {
        FilterColor::Colorless => &COLORLESS,
        FilterColor::Red => &RED,
        FilterColor::Blue => &BLUE,
        FilterColor::Green => &GREEN,
    }
}

/// Yields `(filter, light, bands)` for every authored row.
pub(crate) fn builtin_rows() -> impl Iterator<Item = (FilterColor, u8, Vec<Co2Band>)> {
    FilterColor::ALL.into_iter().flat_map(|filter| {
        (1_u8..)
            .zip(rows_for(filter).iter())
            .map(move |(light, bands)| (filter, light, bands.to_vec()))
    })
}
