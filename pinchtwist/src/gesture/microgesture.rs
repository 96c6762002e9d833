//! Thumb microgestures and their navigation mappings.

use tracing::debug;

use crate::hand::math::Vec2;

/// Thumb-on-index microgesture reported by the tracking runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Microgesture {
    NoGesture,
    SwipeLeft,
    SwipeRight,
    SwipeForward,
    SwipeBackward,
    ThumbTap,
    Invalid,
}

impl Microgesture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoGesture => "no-gesture",
            Self::SwipeLeft => "swipe-left",
            Self::SwipeRight => "swipe-right",
            Self::SwipeForward => "swipe-forward",
            Self::SwipeBackward => "swipe-backward",
            Self::ThumbTap => "thumb-tap",
            Self::Invalid => "invalid",
        }
    }

    pub fn parse(s: &str) -> Option<Microgesture> {
        match s {
            "no-gesture" => Some(Self::NoGesture),
            "swipe-left" => Some(Self::SwipeLeft),
            "swipe-right" => Some(Self::SwipeRight),
            "swipe-forward" => Some(Self::SwipeForward),
            "swipe-backward" => Some(Self::SwipeBackward),
            "thumb-tap" => Some(Self::ThumbTap),
            "invalid" => Some(Self::Invalid),
            _ => None,
        }
    }
}

/// UI navigation command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavCommand {
    Up,
    Down,
    Left,
    Right,
    Submit,
}

impl NavCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::Submit => "submit",
        }
    }

    /// Forward/backward swipes map to up/down.
    pub fn from_microgesture(gesture: Microgesture) -> Option<NavCommand> {
        match gesture {
            Microgesture::SwipeForward => Some(Self::Up),
            Microgesture::SwipeBackward => Some(Self::Down),
            Microgesture::SwipeLeft => Some(Self::Left),
            Microgesture::SwipeRight => Some(Self::Right),
            Microgesture::ThumbTap => Some(Self::Submit),
            Microgesture::NoGesture | Microgesture::Invalid => None,
        }
    }

    /// Debug keyboard mapping (vi-ish: u/h/j/k, space submits).
    pub fn from_debug_key(key: char) -> Option<NavCommand> {
        match key {
            'u' => Some(Self::Up),
            'h' => Some(Self::Left),
            'j' => Some(Self::Down),
            'k' => Some(Self::Right),
            ' ' => Some(Self::Submit),
            _ => None,
        }
    }
}

/// Turns microgestures into a sticky 2-D move vector.
#[derive(Debug, Clone, Default)]
pub struct MoveInputMapper {
    current: Vec2,
}

impl MoveInputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Vec2 {
        self.current
    }

    /// Apply one recognized gesture and return the resulting move vector.
    pub fn apply(&mut self, gesture: Microgesture) -> Vec2 {
        let next = match gesture {
            Microgesture::SwipeLeft => Some(Vec2::LEFT),
            Microgesture::SwipeRight => Some(Vec2::RIGHT),
            Microgesture::SwipeForward => Some(Vec2::UP),
            Microgesture::SwipeBackward => Some(Vec2::DOWN),
            Microgesture::ThumbTap => Some(Vec2::ZERO),
            Microgesture::NoGesture | Microgesture::Invalid => None,
        };
        if let Some(v) = next {
            debug!(gesture = gesture.as_str(), x = v.x, y = v.y, "Move input");
            self.current = v;
        }
        self.current
    }
}
