use fastrand::Rng;

/// Source of the two random draws a Metropolis step needs. Injected into the
/// engine so a fixed seed reproduces a run exactly.
pub trait RandomSource {
    /// Uniform index in `0..n`. `n` is always at least 1.
    fn index(&mut self, n: usize) -> usize;

    /// Uniform value in `[0, 1)`.
    fn unit(&mut self) -> f64;
}

impl RandomSource for Rng {
    #[inline(always)]
    fn index(&mut self, n: usize) -> usize {
        self.usize(0..n)
    }

    #[inline(always)]
    fn unit(&mut self) -> f64 {
        self.f64()
    }
}

pub fn seeded(seed: Option<u64>) -> Rng {
    if let Some(s) = seed {
        Rng::with_seed(s)
    } else {
        Rng::new()
    }
}
