pub use rand::{CryptoRng, Rng, RngCore, SeedableRng, seq};

pub mod distributions {
    pub use rand::distr::{Alphanumeric, Distribution, Uniform, uniform::SampleRange};
}

#[must_use]
pub fn make_true_rng() -> rand::rngs::ThreadRng {
    rand::rng()
}
