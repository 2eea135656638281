//! Canonical battle scenarios with known outcomes.
//!
//! These are the standard worked combat examples. Each carries the
//! expected baseline score (rounds x total remaining health at default
//! power) and, where established, the calibrated score and the minimal
//! elf power that achieves a flawless victory.

/// The primary worked example: 47 rounds, 590 total health remaining.
pub const WORKED_EXAMPLE: &str = "\
#######
#.G...#
#...EG#
#.#.#G#
#..G#E#
#.....#
#######";

/// A scenario with a known scored outcome.
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    /// Short label used in assertion messages.
    pub name: &'static str,
    /// The battlefield text.
    pub map: &'static str,
    /// rounds x total remaining health at default power.
    pub baseline_score: u64,
    /// The same product at the minimal flawless-victory elf power.
    pub calibrated_score: Option<u64>,
    /// The minimal elf power yielding zero elf losses.
    pub minimum_power: Option<i32>,
}

/// All canonical scenarios.
#[must_use]
pub fn canonical_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "worked_example",
            map: WORKED_EXAMPLE,
            baseline_score: 27730,
            calibrated_score: Some(4988),
            minimum_power: Some(15),
        },
        Scenario {
            name: "corner_elves",
            map: "\
#######
#G..#E#
#E#E.E#
#G.##.#
#...#E#
#...E.#
#######",
            baseline_score: 36334,
            calibrated_score: None,
            minimum_power: None,
        },
        Scenario {
            name: "elf_majority",
            map: "\
#######
#E..EG#
#.#G.E#
#E.##E#
#G..#.#
#..E#.#
#######",
            baseline_score: 39514,
            calibrated_score: Some(31284),
            minimum_power: Some(4),
        },
        Scenario {
            name: "surrounded_elf",
            map: "\
#######
#E.G#.#
#.#G..#
#G.#.G#
#G..#.#
#...E.#
#######",
            baseline_score: 27755,
            calibrated_score: Some(3478),
            minimum_power: Some(15),
        },
        Scenario {
            name: "split_corridors",
            map: "\
#######
#.E...#
#.#..G#
#.###.#
#E#G#G#
#...#G#
#######",
            baseline_score: 28944,
            calibrated_score: Some(6474),
            minimum_power: Some(12),
        },
        Scenario {
            name: "wide_cavern",
            map: "\
#########
#G......#
#.E.#...#
#..##..G#
#...##..#
#...#...#
#.G...G.#
#.....G.#
#########",
            baseline_score: 18740,
            calibrated_score: Some(1140),
            minimum_power: Some(34),
        },
    ]
}
