// src/common/brightness.rs

/// Moving average over the last `N` raw intensity samples, for a human
/// brightness readout alongside the link (not part of the bit protocol).
///
/// Diagnostic use: watching the averaged level while aiming the emitter is
/// how a sensible threshold gets picked in the first place.
#[derive(Debug)]
pub struct BrightnessMeter<const N: usize> {
    samples: [u16; N],
    sum: u32,
    count: usize,
    next: usize,
}

impl<const N: usize> BrightnessMeter<N> {
    pub const fn new() -> Self {
        BrightnessMeter {
            samples: [0; N],
            sum: 0,
            count: 0,
            next: 0,
        }
    }

    /// Folds one raw sample into the window, evicting the oldest once the
    /// window is full.
    pub fn push(&mut self, raw: u16) {
        self.sum -= u32::from(self.samples[self.next]);
        self.samples[self.next] = raw;
        self.sum += u32::from(raw);
        self.next = (self.next + 1) % N;
        if self.count < N {
            self.count += 1;
        }
    }

    /// Average over the samples seen so far (at most `N`), or `None` before
    /// the first sample.
    pub fn average(&self) -> Option<f32> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum as f32 / self.count as f32)
        }
    }

    /// Averaged darkness as a percentage of `full_scale` (0 = bright,
    /// 100 = dark on an LDR divider where more light pulls the reading
    /// down).
    pub fn percent_dark(&self, full_scale: u16) -> Option<f32> {
        self.average().map(|avg| avg / f32::from(full_scale) * 100.0)
    }

    /// Averaged brightness as a percentage of `full_scale` (inverse of
    /// [`BrightnessMeter::percent_dark`]).
    pub fn percent_bright(&self, full_scale: u16) -> Option<f32> {
        self.percent_dark(full_scale).map(|dark| 100.0 - dark)
    }
}

impl<const N: usize> Default for BrightnessMeter<N> {
    fn default() -> Self {
        Self::new()
    }
}
