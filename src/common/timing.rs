// src/common/timing.rs

use core::time::Duration;

// The bit period is the protocol's only shared clock: transmitter and
// receiver must agree on it exactly. A mismatch is not detectable at
// runtime and shows up as silently corrupted bytes.

/// Default duration of one transmitted bit (matches the reference hardware
/// deployment at 20 bit/s).
pub const DEFAULT_BIT_PERIOD: Duration = Duration::from_millis(50);

/// Default analog threshold separating "light on" from "light off" on a
/// 10-bit ADC scale.
pub const DEFAULT_THRESHOLD: u16 = 100;

/// Default idle time after the last decoded character before an unterminated
/// message is considered complete (two frame durations at the default bit
/// period).
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_millis(1000);

/// Default settle time after a relay transmission before the edge detector
/// is re-armed, so residual light from the node's own emitter cannot
/// retrigger reception.
pub const DEFAULT_TX_GUARD: Duration = Duration::from_millis(100);

/// How long a single intensity read may stay pending before the sampler
/// reports a timeout. An ADC conversion normally completes in microseconds.
pub const SAMPLE_READ_TIMEOUT: Duration = Duration::from_millis(2);

/// Half of a bit period; the false-trigger guard re-samples at this offset
/// from the detected edge, inside the suspected start bit.
pub fn half_period(bit_period: Duration) -> Duration {
    bit_period / 2
}

/// Offset from the start-bit edge to the center of data bit 0.
///
/// One full period finishes the start bit, plus half a period to land in
/// the middle of the first data cell. Decoder invariant: edge to first data
/// sample is always 1.5 bit periods, whether or not the guard re-sample
/// consumed the first half period.
pub fn first_sample_offset(bit_period: Duration) -> Duration {
    bit_period + bit_period / 2
}

/// Time one full character frame occupies on the channel.
pub fn frame_duration(bit_period: Duration) -> Duration {
    bit_period * super::frame::FRAME_BITS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_offsets() {
        let period = Duration::from_millis(50);
        assert_eq!(half_period(period), Duration::from_millis(25));
        assert_eq!(first_sample_offset(period), Duration::from_millis(75));
        assert_eq!(frame_duration(period), Duration::from_millis(500));
    }

    #[test]
    fn test_guard_plus_remainder_equals_alignment() {
        // The guard path delays half a period, samples, then delays one full
        // period; together that must equal the no-guard alignment delay.
        let period = Duration::from_millis(15);
        assert_eq!(half_period(period) + period, first_sample_offset(period));
    }
}
