// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod ber;
pub mod brightness;
pub mod config;
pub mod error;
pub mod frame;
pub mod hal_traits;
pub mod timing;
pub mod types;

// --- Re-export key types/traits/functions for easier access ---

// From ber.rs
pub use ber::BerAccumulator;

// From brightness.rs
pub use brightness::BrightnessMeter;

// From config.rs
pub use config::{CompletionPolicy, LinkConfig};

// From error.rs
pub use error::VlcError;

// From hal_traits.rs
pub use hal_traits::{LightEmitter, LightSensor, VlcInstant, VlcTimer}; // Core sync traits

// From types.rs
pub use types::{EdgeDetector, LogicLevel};

// From timing.rs (constants - users can access via common::timing::*)
// No re-exports by default.

// --- Feature-gated re-exports ---

// Async traits (from hal_traits.rs)
#[cfg(feature = "async")]
pub use hal_traits::{LightEmitterAsync, LightSensorAsync};

// embedded-hal adapter (from hal_traits.rs)
#[cfg(feature = "impl-hal")]
pub use hal_traits::PinEmitter;
