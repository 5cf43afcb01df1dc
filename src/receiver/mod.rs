// src/receiver/mod.rs

pub mod assembler;
pub(crate) mod decode;

pub use assembler::{Message, MessageAssembler};

use crate::common::{
    config::LinkConfig,
    error::VlcError,
    hal_traits::{LightSensor, VlcTimer},
    types::EdgeDetector,
};

/// A receive-only node: sensor plus timer behind a [`LinkConfig`], with the
/// edge detector and message assembler it feeds.
///
/// `N` bounds the message buffer; a message longer than `N` characters
/// (terminator included) fails with [`VlcError::BufferOverflow`].
#[derive(Debug)]
pub struct Receiver<IF, const N: usize>
where
    IF: LightSensor + VlcTimer,
{
    interface: IF,
    config: LinkConfig,
    edge: EdgeDetector,
    assembler: MessageAssembler<IF::Instant, N>,
}

impl<IF, const N: usize> Receiver<IF, N>
where
    IF: LightSensor + VlcTimer,
{
    pub fn new(interface: IF, config: LinkConfig) -> Self {
        let assembler = MessageAssembler::new(config.completion);
        Receiver {
            interface,
            config,
            edge: EdgeDetector::new(),
            assembler,
        }
    }

    /// One iteration of the receive loop: sample the channel, feed the edge
    /// detector, decode a frame if a start bit fired, and evaluate the
    /// completion policy.
    ///
    /// Call this continuously; the poll rate bounds start-bit detection
    /// latency, so it should be much faster than the bit period. When a
    /// start event fires the call blocks for the rest of the frame (about
    /// 9.5 bit periods); the ordering guarantee that frame N finishes
    /// before frame N+1 is detected falls out of that blocking.
    ///
    /// Returns `Ok(Some(message))` when a message completed this iteration.
    pub fn poll(&mut self) -> Result<Option<Message<N>>, VlcError<IF::Error>> {
        let level = decode::sample_level(&mut self.interface, self.config.threshold)?;

        if self.edge.poll(level) {
            if let Some(byte) = decode::read_frame(&mut self.interface, &self.config)? {
                let now = self.interface.now();
                if let Some(message) = self.append(byte, now)? {
                    return Ok(Some(message));
                }
            }
            // Guard rejection: ignore the event and keep polling.
        }

        let now = self.interface.now();
        Ok(self.assembler.poll_idle(now))
    }

    /// The in-progress message, for per-character echo by the host console.
    pub fn pending(&self) -> &[u8] {
        self.assembler.pending()
    }

    /// Consumes the receiver, returning the interface.
    pub fn release(self) -> IF {
        self.interface
    }

    fn append(
        &mut self,
        byte: u8,
        now: IF::Instant,
    ) -> Result<Option<Message<N>>, VlcError<IF::Error>> {
        self.assembler.push(byte, now).map_err(|_| VlcError::BufferOverflow {
            needed: self.assembler.len() + 1,
            got: N,
        })
    }
}
