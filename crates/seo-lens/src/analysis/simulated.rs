//! Simulated metrics and fallback values.
//!
//! Page speed, readability and mobile-friendliness are not measured yet;
//! neither are the placeholders used when a real analyzer fails. All of
//! them come from a [`Simulator`] so a real implementation can replace
//! any one without touching the aggregator.

use crate::report::Readability;
use rand::seq::SliceRandom;
use rand::Rng;
use std::ops::RangeInclusive;

pub const PAGE_SPEED_MS: RangeInclusive<u32> = 500..=3000;
pub const META_TAGS_FALLBACK: RangeInclusive<u8> = 8..=12;
pub const SECURITY_FALLBACK: RangeInclusive<u8> = 80..=95;
pub const IMAGES_FALLBACK: RangeInclusive<u8> = 70..=90;

/// Source of simulated metrics and fallback values.
pub trait Simulator: Send + Sync {
    /// Page load time in milliseconds.
    fn page_speed_ms(&self) -> u32;
    fn readability(&self) -> Readability;
    fn mobile_friendly(&self) -> bool;

    /// Meta-tag count used when the meta-tag analyzer fails.
    fn meta_tags_fallback(&self) -> u8;
    /// Security score used when the security analyzer fails.
    fn security_fallback(&self) -> u8;
    /// Image percentage used when the image analyzer fails.
    fn images_fallback(&self) -> u8;
}

/// Uniformly random simulator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSimulator;

impl Simulator for RandomSimulator {
    fn page_speed_ms(&self) -> u32 {
        rand::thread_rng().gen_range(PAGE_SPEED_MS)
    }

    fn readability(&self) -> Readability {
        Readability::ALL
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(Readability::Average)
    }

    fn mobile_friendly(&self) -> bool {
        rand::thread_rng().gen_bool(0.5)
    }

    fn meta_tags_fallback(&self) -> u8 {
        rand::thread_rng().gen_range(META_TAGS_FALLBACK)
    }

    fn security_fallback(&self) -> u8 {
        rand::thread_rng().gen_range(SECURITY_FALLBACK)
    }

    fn images_fallback(&self) -> u8 {
        rand::thread_rng().gen_range(IMAGES_FALLBACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_values_within_ranges() {
        let sim = RandomSimulator;
        for _ in 0..500 {
            assert!(PAGE_SPEED_MS.contains(&sim.page_speed_ms()));
            assert!(META_TAGS_FALLBACK.contains(&sim.meta_tags_fallback()));
            assert!(SECURITY_FALLBACK.contains(&sim.security_fallback()));
            assert!(IMAGES_FALLBACK.contains(&sim.images_fallback()));
        }
    }

    #[test]
    fn test_readability_covers_all_labels() {
        let sim = RandomSimulator;
        let seen: HashSet<Readability> = (0..1000).map(|_| sim.readability()).collect();
        assert_eq!(seen.len(), Readability::ALL.len());
    }

    #[test]
    fn test_mobile_friendly_takes_both_values() {
        let sim = RandomSimulator;
        let seen: HashSet<bool> = (0..1000).map(|_| sim.mobile_friendly()).collect();
        assert_eq!(seen.len(), 2);
    }
}
