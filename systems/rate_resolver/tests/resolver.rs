use photosynthesis_core::{FilterColor, Level, SimulationInputs};
use photosynthesis_system_rate_resolver::{RateResolver, RateTable};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const SEEDS: [u64; 4] = [0, 1, 0x5eed_cafe, 0xdead_beef_0042];

#[test]
fn out_of_range_inputs_match_their_clamped_counterparts() {
    let resolver = RateResolver::default();
    let raw_cases = [(-5, 4), (14, 7), (3, -2), (6, 25), (-1, -1), (99, 99)];

    for filter in FilterColor::ALL {
        for (light, co2) in raw_cases {
            let clamped_light = light.clamp(0, 10);
            let clamped_co2 = co2.clamp(0, 10);
            for seed in SEEDS {
                let raw = resolver
                    .resolve(filter, light, co2, &mut ChaCha8Rng::seed_from_u64(seed))
                    .expect("builtin table is complete");
                let clamped = resolver
                    .resolve(
                        filter,
                        clamped_light,
                        clamped_co2,
                        &mut ChaCha8Rng::seed_from_u64(seed),
                    )
                    .expect("builtin table is complete");

                assert_eq!(raw.target, clamped.target, "{filter} {light} {co2}");
                assert_eq!(raw.inputs, clamped.inputs);
                assert!(clamped.notices.is_empty());
                assert!(!raw.notices.is_empty());
            }
        }
    }
}

#[test]
fn no_light_or_no_co2_produces_no_bubbles() {
    let resolver = RateResolver::default();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for filter in FilterColor::ALL {
        for value in -3..=13 {
            let dark = resolver
                .resolve(filter, 0, value, &mut rng)
                .expect("zero light");
            let starved = resolver
                .resolve(filter, value, 0, &mut rng)
                .expect("zero co2");
            assert_eq!(dark.target, 0, "{filter} light 0 co2 {value}");
            assert_eq!(starved.target, 0, "{filter} light {value} co2 0");
        }
    }
}

#[test]
fn repeated_resolution_stays_within_the_jitter_band() {
    let resolver = RateResolver::default();
    let table = RateTable::builtin();
    let mut rng = ChaCha8Rng::seed_from_u64(0x0b0b);

    for filter in FilterColor::ALL {
        for light in 1..=10 {
            for co2 in 1..=10 {
                let inputs = SimulationInputs::new(
                    filter,
                    Level::new(light).expect("in range"),
                    Level::new(co2).expect("in range"),
                );
                let base = table
                    .band(&inputs)
                    .expect("complete table")
                    .expect("non-zero inputs")
                    .base();

                for _ in 0..25 {
                    let count = resolver
                        .resolve_inputs(&inputs, &mut rng)
                        .expect("complete table");
                    assert!(
                        count + 2 >= base && count <= base + 2,
                        "{filter} light {light} co2 {co2}: {count} outside {base}±2"
                    );
                }
            }
        }
    }
}

#[test]
fn red_light_five_low_co2_resolves_near_eight() {
    let resolver = RateResolver::default();
    for seed in 0..64 {
        let resolution = resolver
            .resolve(FilterColor::Red, 5, 2, &mut ChaCha8Rng::seed_from_u64(seed))
            .expect("defined");
        assert!((6..=10).contains(&resolution.target), "{}", resolution.target);
        assert!(resolution.notices.is_empty());
    }
}

#[test]
fn documented_zero_examples_hold() {
    let resolver = RateResolver::default();
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    let green = resolver
        .resolve(FilterColor::Green, 0, 7, &mut rng)
        .expect("zero light");
    assert_eq!(green.target, 0);

    let blue = resolver
        .resolve(FilterColor::Blue, 11, -3, &mut rng)
        .expect("zero co2");
    assert_eq!(blue.target, 0);
    assert_eq!(blue.inputs.light, Level::MAX);
    assert_eq!(blue.inputs.co2, Level::MIN);
}

#[test]
fn identical_seeds_resolve_identically() {
    let resolver = RateResolver::default();
    let first: Vec<u32> = (1..=10)
        .map(|light| {
            resolver
                .resolve(
                    FilterColor::Colorless,
                    light,
                    5,
                    &mut ChaCha8Rng::seed_from_u64(2024),
                )
                .expect("defined")
                .target
        })
        .collect();
    let second: Vec<u32> = (1..=10)
        .map(|light| {
            resolver
                .resolve(
                    FilterColor::Colorless,
                    light,
                    5,
                    &mut ChaCha8Rng::seed_from_u64(2024),
                )
                .expect("defined")
                .target
        })
        .collect();

    assert_eq!(first, second);
}
