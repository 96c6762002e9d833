//! Visual feedback: pinch colour blend and confidence material swap.

use tracing::debug;

use crate::hand::math::lerp;
use crate::hand::source::TrackingConfidence;

/// Linear RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Per-channel blend; `t` is clamped to [0, 1].
    pub fn lerp(self, to: Color, t: f32) -> Color {
        Color {
            r: lerp(self.r, to.r, t),
            g: lerp(self.g, to.g, t),
            b: lerp(self.b, to.b, t),
            a: lerp(self.a, to.a, t),
        }
    }
}

/// Colour for the current index pinch strength.
pub fn pinch_color(default: Color, pinched: Color, strength: f32) -> Color {
    default.lerp(pinched, strength)
}

/// Swaps between two materials as tracking confidence changes.
#[derive(Debug, Clone)]
pub struct ConfidenceIndicator<M> {
    high: M,
    low: M,
    current: Option<TrackingConfidence>,
}

impl<M> ConfidenceIndicator<M> {
    pub fn new(high: M, low: M) -> Self {
        Self {
            high,
            low,
            current: None,
        }
    }

    pub fn material_for(&self, confidence: TrackingConfidence) -> &M {
        match confidence {
            TrackingConfidence::High => &self.high,
            TrackingConfidence::Low => &self.low,
        }
    }

    /// Returns the material to apply when the confidence level changed.
    pub fn update(&mut self, confidence: TrackingConfidence) -> Option<&M> {
        if self.current == Some(confidence) {
            return None;
        }
        debug!(confidence = confidence.as_str(), "Tracking confidence changed");
        self.current = Some(confidence);
        Some(self.material_for(confidence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    const RED: Color = Color::rgba(1.0, 0.0, 0.0, 1.0);

    #[test]
    fn test_pinch_color() {
        assert_eq!(pinch_color(WHITE, RED, 0.0), WHITE);
        assert_eq!(pinch_color(WHITE, RED, 1.0), RED);
        let half = pinch_color(WHITE, RED, 0.5);
        assert!((half.g - 0.5).abs() < 1e-6);
        // Clamped outside the unit range.
        assert_eq!(pinch_color(WHITE, RED, 1.7), RED);
        assert_eq!(pinch_color(WHITE, RED, -0.3), WHITE);
    }

    #[test]
    fn test_confidence_swap_only_on_change() {
        let mut indicator = ConfidenceIndicator::new("solid", "ghost");
        assert_eq!(indicator.update(TrackingConfidence::High), Some(&"solid"));
        assert_eq!(indicator.update(TrackingConfidence::High), None);
        assert_eq!(indicator.update(TrackingConfidence::Low), Some(&"ghost"));
        assert_eq!(indicator.update(TrackingConfidence::Low), None);
        assert_eq!(*indicator.material_for(TrackingConfidence::High), "solid");
    }
}
