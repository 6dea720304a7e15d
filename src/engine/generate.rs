use rand::Rng;

/// Smallest value `generate` produces.
pub const VALUE_MIN: u32 = 5;
/// Largest value `generate` produces (inclusive).
pub const VALUE_MAX: u32 = 104;

/// Produce `size` independent, uniformly random values in `VALUE_MIN..=VALUE_MAX`.
pub fn generate<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Vec<u32> {
    (0..size)
        .map(|_| rng.gen_range(VALUE_MIN..=VALUE_MAX))
        .collect()
}
