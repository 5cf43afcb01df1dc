// src/common/types.rs

/// Binary logic level of the optical channel.
///
/// Derived fresh from every raw intensity sample; there is no persistent
/// analog state. `High` means "light on" (intensity above the configured
/// threshold), which is also the idle level of the channel between frames
/// since every frame ends on a high stop bit.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LogicLevel {
    Low,
    High,
}

impl LogicLevel {
    /// Converts a raw intensity sample into a logic level.
    ///
    /// The threshold must match the ambient/emitted light contrast at the
    /// deployment site. A mismatch between transmitter brightness and
    /// receiver threshold silently corrupts data; it is not detectable at
    /// runtime.
    pub fn from_intensity(raw: u16, threshold: u16) -> Self {
        if raw > threshold {
            LogicLevel::High
        } else {
            LogicLevel::Low
        }
    }

    pub fn is_high(self) -> bool {
        self == LogicLevel::High
    }
}

impl From<bool> for LogicLevel {
    fn from(high: bool) -> Self {
        if high {
            LogicLevel::High
        } else {
            LogicLevel::Low
        }
    }
}

/// Falling-edge detector used for start-bit acquisition.
///
/// Holds the previous poll's logic level. A high-to-low transition between
/// two consecutive polls is the only synchronization mechanism in the
/// protocol; there is no preamble or clock recovery.
#[derive(Debug, Copy, Clone)]
pub struct EdgeDetector {
    previous: LogicLevel,
}

impl EdgeDetector {
    /// Creates a detector with the previous level initialized low.
    ///
    /// Starting low means a quiet-dark channel cannot fire a spurious start
    /// event on the very first poll; the line must be observed high before
    /// a falling edge can be reported.
    pub const fn new() -> Self {
        EdgeDetector {
            previous: LogicLevel::Low,
        }
    }

    /// Feeds one polled level; returns `true` if this poll completed a
    /// falling edge (start-bit event).
    ///
    /// The stored level is updated on every call, whether or not an event
    /// fired.
    pub fn poll(&mut self, current: LogicLevel) -> bool {
        let falling = self.previous == LogicLevel::High && current == LogicLevel::Low;
        self.previous = current;
        falling
    }

    /// Forgets the stored level, re-arming as if freshly constructed.
    ///
    /// Used after a transmission burst so the node's own trailing output is
    /// not mistaken for an inbound edge.
    pub fn reset(&mut self) {
        self.previous = LogicLevel::Low;
    }
}

impl Default for EdgeDetector {
    fn default() -> Self {
        Self::new()
    }
}
