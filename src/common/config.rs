// src/common/config.rs

use super::timing;
use core::time::Duration;

/// How the message assembler decides a message is complete.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CompletionPolicy {
    /// Message ends when this symbol is appended (e.g. `b'\n'`). Simple and
    /// immediate, but a terminator lost to channel noise leaves the buffer
    /// growing until it overflows.
    Terminator(u8),
    /// Message ends when the buffer is non-empty and no character has been
    /// appended for at least this long. Tolerates a lost terminator at the
    /// cost of completion latency equal to the idle threshold.
    IdleTimeout(Duration),
}

/// Static configuration of one optical link endpoint.
///
/// `bit_period` and `threshold` must match between communicating nodes;
/// neither is negotiated or validated at runtime.
#[derive(Debug, Copy, Clone)]
pub struct LinkConfig {
    /// Duration of each transmitted bit. The protocol's only shared clock.
    pub bit_period: Duration,
    /// Raw intensity above which the channel reads as logic high.
    pub threshold: u16,
    /// Re-sample half a bit period after a falling edge and abort if the
    /// level is already back high. Rejects single-sample noise dips at the
    /// cost of one extra read per frame.
    pub guard_resample: bool,
    /// Sample the stop bit after the data bits and reject the frame if it
    /// is not high. Off by default: the reference receiver never checks the
    /// stop bit, it simply awaits the next start edge.
    pub check_stop_bit: bool,
    /// Message completion policy.
    pub completion: CompletionPolicy,
    /// Settle time after a relay transmission before reception re-arms.
    pub tx_guard: Duration,
}

impl Default for LinkConfig {
    fn default() -> Self {
        LinkConfig {
            bit_period: timing::DEFAULT_BIT_PERIOD,
            threshold: timing::DEFAULT_THRESHOLD,
            guard_resample: true,
            check_stop_bit: false,
            completion: CompletionPolicy::Terminator(b'\n'),
            tx_guard: timing::DEFAULT_TX_GUARD,
        }
    }
}

impl LinkConfig {
    /// Default configuration with the idle-timeout completion policy, the
    /// more robust choice on noisy channels.
    pub fn with_idle_timeout(idle: Duration) -> Self {
        LinkConfig {
            completion: CompletionPolicy::IdleTimeout(idle),
            ..LinkConfig::default()
        }
    }
}
