//! Common test utilities for integration tests.

pub mod fixtures;

use rand::rngs::StdRng;
use rand::SeedableRng;
use vocab_core::QuestionSetBuilder;

/// Builder with a fixed seed so failures reproduce.
pub fn seeded_builder(seed: u64) -> QuestionSetBuilder<StdRng> {
    QuestionSetBuilder::new(StdRng::seed_from_u64(seed))
}
