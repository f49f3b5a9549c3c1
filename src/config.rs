//! Configuration for partitioning, plus `FamilyContext`, which bundles a configuration with a
//! random source for callers that just want to initialize once and go.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::error::FamilyError;
use crate::family::Family;
use crate::family_list::{partition, FamilyList};
use crate::DEFAULT_FAMILY_INCREMENT;

/// Settings shared by every family built in a partitioning pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyConfig {
    /// Both the number of member slots a new family starts with and the number added each time
    /// it fills up.
    increment: usize,
}

impl FamilyConfig {
    pub fn new(increment: usize) -> Result<FamilyConfig, FamilyError> {
        if increment == 0 {
            return Err(FamilyError::InvalidIncrement(increment));
        }
        Ok(FamilyConfig { increment })
    }

    #[must_use]
    pub fn increment(&self) -> usize {
        self.increment
    }
}

impl Default for FamilyConfig {
    fn default() -> Self {
        FamilyConfig {
            increment: DEFAULT_FAMILY_INCREMENT,
        }
    }
}

/// A configuration together with the RNG used to pick random family members.
#[derive(Debug, Clone)]
pub struct FamilyContext {
    pub config: FamilyConfig,
    pub rng: SmallRng,
}

impl FamilyContext {
    /// Build a context whose RNG is seeded from the OS.
    pub fn new(increment: usize) -> Result<FamilyContext, FamilyError> {
        Ok(FamilyContext {
            config: FamilyConfig::new(increment)?,
            rng: SmallRng::from_entropy(),
        })
    }

    /// Build a context with a fixed seed, so that random choices are reproducible.
    pub fn with_seed(increment: usize, seed: u64) -> Result<FamilyContext, FamilyError> {
        Ok(FamilyContext {
            config: FamilyConfig::new(increment)?,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    /// Partition `words` by `letter` using this context's configuration.
    pub fn partition<'w>(
        &self,
        words: &[&'w str],
        letter: char,
    ) -> Result<FamilyList<'w>, FamilyError> {
        partition(words, letter, &self.config)
    }

    /// Pick a random member of `family` using this context's RNG.
    pub fn random_member<'w>(&mut self, family: &Family<'w>) -> Result<&'w str, FamilyError> {
        family.random_member(&mut self.rng)
    }
}

/// Set up a context with the given family increment and an OS-seeded RNG. This should be called
/// once, on startup.
pub fn init_families(size: usize) -> Result<FamilyContext, FamilyError> {
    FamilyContext::new(size)
}
