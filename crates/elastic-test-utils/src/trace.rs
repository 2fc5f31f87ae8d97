//! Deterministic synthetic bandwidth traces.

/// SplitMix64 generator, reproducible from a seed.
#[derive(Clone, Debug)]
pub struct SplitMix64(u64);

impl SplitMix64 {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Piecewise-constant bandwidth with multiplicative jitter.
///
/// Each phase holds a mean for a number of samples; every sample is the mean
/// scaled by a factor drawn uniformly from `[1 - jitter, 1 + jitter]`.
#[derive(Clone, Debug)]
pub struct BandwidthTrace {
    rng: SplitMix64,
    phases: Vec<(f64, usize)>,
    jitter: f64,
}

impl BandwidthTrace {
    pub fn new(seed: u64, jitter: f64) -> Self {
        Self {
            rng: SplitMix64::new(seed),
            phases: Vec::new(),
            jitter: jitter.clamp(0.0, 1.0),
        }
    }

    /// Appends a phase of `samples` readings around `mean_bps`.
    #[must_use]
    pub fn phase(mut self, mean_bps: f64, samples: usize) -> Self {
        self.phases.push((mean_bps, samples));
        self
    }

    /// Materializes every phase in order.
    pub fn samples(mut self) -> Vec<f64> {
        let phases = std::mem::take(&mut self.phases);
        let mut out = Vec::with_capacity(phases.iter().map(|(_, n)| n).sum());
        for (mean, count) in phases {
            for _ in 0..count {
                let factor = 1.0 + self.jitter * (2.0 * self.rng.unit() - 1.0);
                out.push(mean * factor);
            }
        }
        out
    }
}
