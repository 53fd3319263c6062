use rand_chacha::ChaChaRng;
use randomness::distributions::{Alphanumeric, SampleRange};

pub use randomness::{Rng, SeedableRng};

const SEED_ENV_VAR: &str = "FRIGATE_DEPLOY_TEST_SEED";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed(pub u64);

impl Seed {
    #[must_use]
    pub fn from_entropy() -> Self {
        Seed(randomness::make_true_rng().random())
    }

    /// Reads the seed from the environment so a failing run can be reproduced
    #[must_use]
    pub fn from_env_or_entropy() -> Self {
        std::env::var(SEED_ENV_VAR)
            .ok()
            .and_then(|s| s.parse().ok())
            .map_or_else(Self::from_entropy, Seed)
    }
}

#[rstest::fixture]
pub fn random_seed() -> Seed {
    let seed = Seed::from_env_or_entropy();
    println!("Using random seed: {} (set {SEED_ENV_VAR} to reproduce)", seed.0);
    seed
}

#[must_use]
pub fn make_seedable_rng(seed: Seed) -> ChaChaRng {
    ChaChaRng::seed_from_u64(seed.0)
}

pub fn gen_random_string(rng: &mut impl Rng, len_range: impl SampleRange<usize>) -> String {
    let len = rng.random_range(len_range);
    rng.sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

pub fn gen_random_bytes(rng: &mut impl Rng, len_range: impl SampleRange<usize>) -> Vec<u8> {
    let len = rng.random_range(len_range);
    (0..len).map(|_| rng.random()).collect()
}
