// src/common/hal_traits.rs

use super::types::LogicLevel;
use core::fmt::Debug;
use core::ops::{Add, Sub};
use core::time::Duration;

/// Monotonic timestamp usable for protocol bookkeeping.
///
/// Any copyable, ordered instant that supports `instant + Duration` and
/// `instant - instant -> Duration` qualifies; implemented automatically.
/// Tests substitute a virtual microsecond counter so timing logic runs
/// without real waits.
pub trait VlcInstant:
    Copy + Debug + PartialOrd + Add<Duration, Output = Self> + Sub<Self, Output = Duration>
{
}

impl<T> VlcInstant for T where
    T: Copy + Debug + PartialOrd + Add<Duration, Output = Self> + Sub<Self, Output = Duration>
{
}

/// Abstraction for the timer/delay operations the link needs.
///
/// Every suspension in the protocol (bit-period holds, the 1.5-period
/// alignment delay, idle-timeout checks) goes through this trait, so a mock
/// implementation that advances a counter instead of sleeping makes the
/// whole codec testable.
pub trait VlcTimer {
    /// Timestamp type returned by [`VlcTimer::now`].
    type Instant: VlcInstant;

    /// Delay for at least the specified number of microseconds.
    fn delay_us(&mut self, us: u32);

    /// Delay for at least the specified number of milliseconds.
    fn delay_ms(&mut self, ms: u32);

    /// Returns the current instant.
    fn now(&self) -> Self::Instant;
}

/// Abstraction for the physical light-intensity input (e.g. an LDR on an
/// ADC pin).
pub trait LightSensor {
    /// Associated error type for sensor errors.
    type Error: Debug;

    /// Attempts to read one raw intensity sample.
    ///
    /// Returns `Ok(raw)` when a sample is available, or
    /// `Err(nb::Error::WouldBlock)` while a conversion is still pending.
    /// Other errors are returned as `Err(nb::Error::Other(Self::Error))`.
    fn read_intensity(&mut self) -> nb::Result<u16, Self::Error>;
}

/// Abstraction for the physical light output (e.g. an LED on a digital pin).
pub trait LightEmitter {
    /// Associated error type for emitter errors.
    type Error: Debug;

    /// Drives the channel to the given logic level and holds it there until
    /// the next call.
    fn set_level(&mut self, level: LogicLevel) -> Result<(), Self::Error>;
}

/// Abstraction for asynchronous intensity input (requires 'async' feature).
#[cfg(feature = "async")]
pub trait LightSensorAsync {
    /// Associated error type for sensor errors.
    type Error: Debug;

    /// Asynchronously reads one raw intensity sample.
    async fn read_intensity(&mut self) -> Result<u16, Self::Error>;
}

/// Abstraction for asynchronous light output (requires 'async' feature).
#[cfg(feature = "async")]
pub trait LightEmitterAsync {
    /// Associated error type for emitter errors.
    type Error: Debug;

    /// Asynchronously drives the channel to the given logic level.
    async fn set_level(&mut self, level: LogicLevel) -> Result<(), Self::Error>;
}

/// Adapter making any `embedded-hal` output pin usable as a [`LightEmitter`].
///
/// Requires `embedded-hal` v1.0 traits (feature `impl-hal`).
#[cfg(feature = "impl-hal")]
pub struct PinEmitter<P>(pub P);

#[cfg(feature = "impl-hal")]
impl<P> LightEmitter for PinEmitter<P>
where
    P: embedded_hal::digital::OutputPin,
{
    type Error = P::Error;

    fn set_level(&mut self, level: LogicLevel) -> Result<(), Self::Error> {
        match level {
            LogicLevel::High => self.0.set_high(),
            LogicLevel::Low => self.0.set_low(),
        }
    }
}
