use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::create_volunteers;
use crate::models::{Id, Volunteer};

/// Source of the randomized "flavor" fields in demo mode.
///
/// Seeded so a given seed always yields the same sequence.
#[derive(Debug, Clone)]
pub struct MockDataset {
    rng: StdRng,
}

impl MockDataset {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Volunteers of `organization_id` with randomized hour totals.
    ///
    /// Totals are multiples of half an hour and keep
    /// `total_hours >= verified_hours >= 0`.
    pub fn volunteers(&mut self, organization_id: Id) -> Vec<Volunteer> {
        create_volunteers(organization_id)
            .into_iter()
            .map(|mut volunteer| {
                let total = self.half_hours(0..=240);
                let verified = self.half_hours(0..=(total * 2.0) as u32);
                volunteer.total_hours = total;
                volunteer.verified_hours = verified;
                volunteer
            })
            .collect()
    }

    fn half_hours(&mut self, range: std::ops::RangeInclusive<u32>) -> f64 {
        f64::from(self.rng.gen_range(range)) / 2.0
    }
}
