// src/repeater/mod.rs

use crate::common::{
    config::LinkConfig,
    error::VlcError,
    hal_traits::{LightEmitter, LightSensor, VlcTimer},
    types::EdgeDetector,
};
use crate::receiver::{decode, Message, MessageAssembler};
use crate::transmitter::write_frame;

/// A relay node: decodes inbound messages and re-encodes them onto the same
/// (or an adjacent) optical path.
///
/// Transmit and receive share one polling loop and, physically, one light
/// path, so the node would detect its own emitted transitions as inbound
/// start bits without arbitration. Two mechanisms prevent that:
///
/// - `transmitting` is set for the whole relay burst, and the decode path
///   is skipped entirely while it is set;
/// - after the burst, reception stays disarmed for the configured
///   `tx_guard` settle time, and the edge detector is reset when it
///   re-arms, discarding the stale pre-transmission level.
#[derive(Debug)]
pub struct Repeater<IF, const N: usize>
where
    IF: LightSensor + VlcTimer,
{
    interface: IF,
    config: LinkConfig,
    edge: EdgeDetector,
    assembler: MessageAssembler<IF::Instant, N>,
    transmitting: bool,
    rearm_at: Option<IF::Instant>,
}

impl<IF, const N: usize> Repeater<IF, N>
where
    IF: LightSensor + VlcTimer + LightEmitter<Error = <IF as LightSensor>::Error>,
{
    pub fn new(interface: IF, config: LinkConfig) -> Self {
        let assembler = MessageAssembler::new(config.completion);
        Repeater {
            interface,
            config,
            edge: EdgeDetector::new(),
            assembler,
            transmitting: false,
            rearm_at: None,
        }
    }

    /// Whether a relay transmission is in flight. While true, reception is
    /// suppressed (half-duplex exclusivity).
    pub fn is_transmitting(&self) -> bool {
        self.transmitting
    }

    /// One iteration of the repeat loop: receive-side polling exactly like
    /// [`crate::Receiver::poll`], and when a message completes, relay it
    /// byte by byte before returning it.
    ///
    /// Returns `Ok(Some(message))` for each message relayed this iteration.
    pub fn poll(&mut self) -> Result<Option<Message<N>>, VlcError<<IF as LightSensor>::Error>> {
        if self.transmitting {
            // Half-duplex: never decode while our own frame is in flight.
            return Ok(None);
        }
        if let Some(rearm_at) = self.rearm_at {
            if self.interface.now() < rearm_at {
                // Still inside the post-relay settle window.
                return Ok(None);
            }
            self.rearm_at = None;
            self.edge.reset();
        }

        let level = decode::sample_level(&mut self.interface, self.config.threshold)?;

        if self.edge.poll(level) {
            if let Some(byte) = decode::read_frame(&mut self.interface, &self.config)? {
                let now = self.interface.now();
                if let Some(message) = self.append(byte, now)? {
                    self.relay(&message)?;
                    return Ok(Some(message));
                }
            }
        }

        let now = self.interface.now();
        match self.assembler.poll_idle(now) {
            Some(message) => {
                self.relay(&message)?;
                Ok(Some(message))
            }
            None => Ok(None),
        }
    }

    /// The in-progress message, for host status output.
    pub fn pending(&self) -> &[u8] {
        self.assembler.pending()
    }

    /// Consumes the repeater, returning the interface.
    pub fn release(self) -> IF {
        self.interface
    }

    fn append(
        &mut self,
        byte: u8,
        now: IF::Instant,
    ) -> Result<Option<Message<N>>, VlcError<<IF as LightSensor>::Error>> {
        self.assembler.push(byte, now).map_err(|_| VlcError::BufferOverflow {
            needed: self.assembler.len() + 1,
            got: N,
        })
    }

    fn relay(&mut self, message: &[u8]) -> Result<(), VlcError<<IF as LightSensor>::Error>> {
        self.transmitting = true;
        let result = self.send_all(message);
        self.transmitting = false;
        // Even on a failed send the channel was disturbed; hold reception
        // off for the settle window either way.
        self.rearm_at = Some(self.interface.now() + self.config.tx_guard);
        self.edge.reset();
        result
    }

    fn send_all(&mut self, message: &[u8]) -> Result<(), VlcError<<IF as LightSensor>::Error>> {
        for &byte in message {
            write_frame(&mut self.interface, self.config.bit_period, byte)?;
        }
        Ok(())
    }
}
