// src/receiver/assembler.rs

use crate::common::{config::CompletionPolicy, hal_traits::VlcInstant};
use arrayvec::{ArrayVec, CapacityError};
use core::mem;

/// A completed message: the decoded characters in arrival order, including
/// the terminator when the terminator policy is in use.
pub type Message<const N: usize> = ArrayVec<u8, N>;

/// Accumulates decoded characters into messages.
///
/// Owns the in-progress buffer exclusively; completion hands the buffer to
/// the caller and leaves the assembler empty. Two completion policies are
/// supported (see [`CompletionPolicy`]): an explicit terminator symbol, or
/// channel idleness after the last append.
#[derive(Debug)]
pub struct MessageAssembler<I, const N: usize> {
    buf: ArrayVec<u8, N>,
    last_append: Option<I>,
    policy: CompletionPolicy,
}

impl<I: VlcInstant, const N: usize> MessageAssembler<I, N> {
    pub fn new(policy: CompletionPolicy) -> Self {
        MessageAssembler {
            buf: ArrayVec::new(),
            last_append: None,
            policy,
        }
    }

    /// Appends one decoded character at time `now`.
    ///
    /// Returns `Ok(Some(message))` when the append completed a message
    /// under the terminator policy. Idle-timeout completion is never
    /// triggered by an append; it is observed by [`MessageAssembler::poll_idle`].
    pub fn push(&mut self, byte: u8, now: I) -> Result<Option<Message<N>>, CapacityError<u8>> {
        self.buf.try_push(byte)?;
        self.last_append = Some(now);

        if let CompletionPolicy::Terminator(terminator) = self.policy {
            if byte == terminator {
                return Ok(Some(self.take()));
            }
        }
        Ok(None)
    }

    /// Checks the idle-timeout completion condition at time `now`.
    ///
    /// Completes the message when the buffer is non-empty and at least the
    /// configured idle duration has passed since the last append. Under the
    /// terminator policy this never completes anything. An empty buffer
    /// never completes, so a quiet channel produces no empty messages.
    pub fn poll_idle(&mut self, now: I) -> Option<Message<N>> {
        let CompletionPolicy::IdleTimeout(limit) = self.policy else {
            return None;
        };
        if self.buf.is_empty() {
            return None;
        }
        let last = self.last_append?;
        if now - last >= limit {
            Some(self.take())
        } else {
            None
        }
    }

    /// The in-progress (incomplete) message contents.
    pub fn pending(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    fn take(&mut self) -> Message<N> {
        self.last_append = None;
        mem::take(&mut self.buf)
    }
}
