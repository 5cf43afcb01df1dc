// src/common/error.rs

#[derive(Debug, thiserror::Error)]
pub enum VlcError<E = ()>
where
    E: core::fmt::Debug, // Need Debug for the generic Io error
{
    /// Underlying I/O error from the HAL implementation.
    #[error("I/O error: {0:?}")] // Format string requires Debug on E
    Io(E),

    /// An intensity read stayed pending past the sampling deadline.
    #[error("Intensity read timed out")]
    Timeout,

    /// Stop bit sampled low after the data bits (only with the stop-bit
    /// check enabled).
    #[error("Frame missing stop bit")]
    Framing,

    /// Message buffer was full when another character arrived.
    #[error("Buffer overflow: needed {needed}, got {got}")]
    BufferOverflow { needed: usize, got: usize },
}

// Allow mapping from underlying HAL error if From is implemented
impl<E: core::fmt::Debug> From<E> for VlcError<E> {
    fn from(e: E) -> Self {
        VlcError::Io(e)
    }
}

// Note: false-trigger rejection and "message not yet complete" are ordinary
// protocol outcomes, represented as `Option`, not error variants. The only
// runtime failures are I/O-shaped.
