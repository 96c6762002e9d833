//! UI consumers of gesture events.

pub mod feedback;
pub mod menu;
pub mod navigator;
pub mod slider;

pub use feedback::{pinch_color, Color, ConfidenceIndicator};
pub use menu::{MenuConfig, MenuDisplay, MenuView};
pub use navigator::{NavDirection, NavigationSurface, UiNavigator, WidgetId};
pub use slider::{SliderConfig, SliderDriver};
