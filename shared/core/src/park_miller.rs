// Park-Miller "minimal standard" multiplicative congruential generator
// https://en.wikipedia.org/wiki/Lehmer_random_number_generator

use crate::Seed;

const PM_A: u64 = 16807;
const PM_M: u64 = 2147483647;

#[derive(Debug, Clone)]
pub struct ParkMiller {
    state: u64,
}

impl ParkMiller {
    pub fn new(seed: Seed) -> Self {
        // a state of 0 mod M would stick at 0 forever
        let state = match u64::from(u32::from(seed)) % PM_M {
            0 => 1,
            s => s,
        };
        ParkMiller { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state * PM_A % PM_M;
        self.state as u32
    }

    /// Next float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        let s = self.next_u32();
        f64::from(s - 1) / (PM_M - 1) as f64
    }

    /// Uniform index in `0..max`, as `floor(next_f64() * max)`.
    pub fn next_range(&mut self, max: usize) -> usize {
        (self.next_f64() * max as f64) as usize
    }
}

impl Iterator for ParkMiller {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_f64())
    }
}
