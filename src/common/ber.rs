// src/common/ber.rs

/// Running bit-error-rate statistics against a known reference message.
///
/// Totals accumulate across calls until [`BerAccumulator::reset`];
/// invariant: `bit_errors <= bits_compared`.
#[derive(Debug, Default, Copy, Clone)]
pub struct BerAccumulator {
    bits_compared: u64,
    bit_errors: u64,
}

impl BerAccumulator {
    pub const fn new() -> Self {
        BerAccumulator {
            bits_compared: 0,
            bit_errors: 0,
        }
    }

    /// Compares `received` against `expected` bit by bit and folds the
    /// result into the running totals.
    ///
    /// Comparison covers positions up to the shorter of the two messages,
    /// all 8 bits per position. Characters beyond the shorter length are
    /// not counted, so a length mismatch under-reports the true error rate;
    /// this truncation is deliberate and matches the reference tooling.
    ///
    /// Returns `(bits_compared, bit_errors)` for this call alone.
    pub fn compare(&mut self, expected: &[u8], received: &[u8]) -> (u64, u64) {
        let len = expected.len().min(received.len());
        let mut errors = 0u64;
        for (a, b) in expected[..len].iter().zip(&received[..len]) {
            errors += u64::from((a ^ b).count_ones());
        }
        let bits = (len as u64) * 8;
        self.bits_compared += bits;
        self.bit_errors += errors;
        (bits, errors)
    }

    /// Total bits compared since construction or the last reset.
    pub fn bits_compared(&self) -> u64 {
        self.bits_compared
    }

    /// Total mismatched bits since construction or the last reset.
    pub fn bit_errors(&self) -> u64 {
        self.bit_errors
    }

    /// Running bit error rate, or `None` if no bits have been compared yet.
    pub fn ber(&self) -> Option<f32> {
        if self.bits_compared == 0 {
            None
        } else {
            Some(self.bit_errors as f32 / self.bits_compared as f32)
        }
    }

    /// Clears the running totals.
    pub fn reset(&mut self) {
        self.bits_compared = 0;
        self.bit_errors = 0;
    }
}
