//! pinchtwist - hand-tracking gesture engine.
//!
//! Pinch-and-twist recognition over per-frame hand samples, microgesture
//! navigation, and the UI drivers that consume them.

pub mod config;
pub mod error;
pub mod gesture;
pub mod hand;
pub mod replay;
pub mod sexp;
pub mod ui;
pub mod voice;

pub use config::AppConfig;
pub use error::{AgentError, ConfigError};
pub use gesture::{PinchTwistConfig, PinchTwistEvent, PinchTwistRecognizer, PinchTwistSource};
