// src/transmitter/mod.rs

use crate::common::{
    config::LinkConfig,
    error::VlcError,
    frame,
    hal_traits::{LightEmitter, VlcTimer},
};
use core::time::Duration;

/// Drives one character frame onto the channel: start bit low, 8 data bits
/// LSB first, stop bit high, each held for exactly one bit period.
///
/// Blocking by design; the call occupies the thread for ten bit periods and
/// leaves the channel high (idle). In a node that also receives, the caller
/// must fence this window with its half-duplex flag so the decode path
/// cannot react to the node's own output.
pub(crate) fn write_frame<IF>(
    interface: &mut IF,
    bit_period: Duration,
    byte: u8,
) -> Result<(), VlcError<IF::Error>>
where
    IF: LightEmitter + VlcTimer,
{
    let hold_us = bit_period.as_micros() as u32;

    interface.set_level(frame::START_LEVEL).map_err(VlcError::Io)?;
    interface.delay_us(hold_us);

    for index in 0..frame::DATA_BITS {
        interface
            .set_level(frame::data_bit(byte, index))
            .map_err(VlcError::Io)?;
        interface.delay_us(hold_us);
    }

    interface.set_level(frame::STOP_LEVEL).map_err(VlcError::Io)?;
    interface.delay_us(hold_us);

    Ok(())
}

/// A transmit-only node: an emitter plus timer behind a [`LinkConfig`].
#[derive(Debug)]
pub struct Transmitter<IF>
where
    IF: LightEmitter + VlcTimer,
{
    interface: IF,
    config: LinkConfig,
}

impl<IF> Transmitter<IF>
where
    IF: LightEmitter + VlcTimer,
{
    pub fn new(interface: IF, config: LinkConfig) -> Self {
        Transmitter { interface, config }
    }

    /// Sends one byte as a complete character frame.
    pub fn send_byte(&mut self, byte: u8) -> Result<(), VlcError<IF::Error>> {
        write_frame(&mut self.interface, self.config.bit_period, byte)
    }

    /// Sends every byte of `message` back to back, with no inter-character
    /// gap beyond the stop bit itself.
    pub fn send_message(&mut self, message: &[u8]) -> Result<(), VlcError<IF::Error>> {
        for &byte in message {
            self.send_byte(byte)?;
        }
        Ok(())
    }

    /// Consumes the transmitter, returning the interface.
    pub fn release(self) -> IF {
        self.interface
    }
}
