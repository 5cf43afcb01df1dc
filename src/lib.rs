// src/lib.rs

#![no_std] // Specify no_std at the crate root

pub mod common;
pub mod receiver;
pub mod repeater;
pub mod transmitter;

// Re-export key types for convenience
pub use common::{BerAccumulator, CompletionPolicy, LinkConfig, LogicLevel, VlcError};
pub use receiver::{Message, MessageAssembler, Receiver};
pub use repeater::Repeater;
pub use transmitter::Transmitter;
