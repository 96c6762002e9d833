//! Gesture subsystem: recognizers and event fan-out.
//!
//! Provides:
//! - `pinch_twist`: pinch-and-twist recognizer and `PinchTwistSource`
//! - `keyboard`: keyboard emulation of the twist event stream
//! - `microgesture`: thumb swipes/taps → navigation commands
//! - `observer`: listener list with per-listener failure isolation

pub mod keyboard;
pub mod microgesture;
pub mod observer;
pub mod pinch_twist;

pub use keyboard::{KeyState, KeyboardTwist, KeyboardTwistConfig};
pub use microgesture::{Microgesture, MoveInputMapper, NavCommand};
pub use observer::{GestureListener, ListenerId, Listeners, Shared};
pub use pinch_twist::{
    PinchTwistConfig, PinchTwistEvent, PinchTwistRecognizer, PinchTwistSource, TwistPhase,
};
