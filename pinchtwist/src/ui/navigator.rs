//! Directional focus navigation over a host widget tree.

use tracing::debug;

use crate::gesture::microgesture::NavCommand;
use crate::hand::math::Vec2;

/// Move vectors shorter than this (squared) are ignored.
const MIN_MOVE_SQR: f32 = 0.001;

/// Opaque reference to a selectable widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavDirection {
    Up,
    Down,
    Left,
    Right,
}

impl NavDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Dominant-axis direction of a move vector. Ties go vertical.
    pub fn from_vector(v: Vec2) -> Option<NavDirection> {
        if v.length_squared() < MIN_MOVE_SQR {
            return None;
        }
        let dir = if v.x.abs() > v.y.abs() {
            if v.x > 0.0 {
                Self::Right
            } else {
                Self::Left
            }
        } else if v.y > 0.0 {
            Self::Up
        } else {
            Self::Down
        };
        Some(dir)
    }
}

/// Host UI the navigator drives.
pub trait NavigationSurface {
    fn selected(&self) -> Option<WidgetId>;

    fn select(&mut self, widget: WidgetId);

    /// Preferred initial selection, if configured.
    fn default_selectable(&self) -> Option<WidgetId>;

    fn first_selectable(&self) -> Option<WidgetId>;

    /// Let the host's own navigation handle a move from the selection.
    fn route_move(&mut self, from: WidgetId, dir: NavDirection);

    /// Neighbour explicitly wired on `from` for `dir`.
    fn explicit_neighbour(&self, from: WidgetId, dir: NavDirection) -> Option<WidgetId>;

    /// Neighbour found by layout geometry.
    fn geometric_neighbour(&self, from: WidgetId, dir: NavDirection) -> Option<WidgetId>;

    /// Interactable and visible.
    fn is_available(&self, widget: WidgetId) -> bool;

    /// Returns true if the widget handled the submit.
    fn submit(&mut self, widget: WidgetId) -> bool;

    fn click(&mut self, widget: WidgetId);
}

/// Keeps a selection alive and moves it on command.
#[derive(Debug, Default)]
pub struct UiNavigator;

impl UiNavigator {
    pub fn new() -> Self {
        Self
    }

    /// Select the default (or first) widget if nothing is selected.
    pub fn start<S: NavigationSurface + ?Sized>(&self, surface: &mut S) {
        self.ensure_selection(surface);
    }

    /// Select-on-enable: make `widget` the current selection.
    pub fn focus<S: NavigationSurface + ?Sized>(&self, surface: &mut S, widget: WidgetId) {
        surface.select(widget);
    }

    pub fn move_vector<S: NavigationSurface + ?Sized>(&self, surface: &mut S, v: Vec2) {
        if let Some(dir) = NavDirection::from_vector(v) {
            self.move_to(surface, dir);
        }
    }

    pub fn move_to<S: NavigationSurface + ?Sized>(&self, surface: &mut S, dir: NavDirection) {
        let Some(from) = self.ensure_selection(surface) else {
            return;
        };

        surface.route_move(from, dir);
        if surface.selected() != Some(from) {
            return;
        }

        let target = surface
            .explicit_neighbour(from, dir)
            .or_else(|| surface.geometric_neighbour(from, dir));
        match target {
            Some(target) if surface.is_available(target) => {
                debug!(dir = dir.as_str(), ?from, ?target, "Navigator fallback move");
                surface.select(target);
            }
            _ => {}
        }
    }

    /// Submit the selection; click it if submit went unhandled.
    pub fn click_selected<S: NavigationSurface + ?Sized>(&self, surface: &mut S) {
        let Some(selected) = self.ensure_selection(surface) else {
            return;
        };
        if !surface.submit(selected) {
            surface.click(selected);
        }
    }

    pub fn apply<S: NavigationSurface + ?Sized>(&self, surface: &mut S, command: NavCommand) {
        match command {
            NavCommand::Up => self.move_to(surface, NavDirection::Up),
            NavCommand::Down => self.move_to(surface, NavDirection::Down),
            NavCommand::Left => self.move_to(surface, NavDirection::Left),
            NavCommand::Right => self.move_to(surface, NavDirection::Right),
            NavCommand::Submit => self.click_selected(surface),
        }
    }

    fn ensure_selection<S: NavigationSurface + ?Sized>(&self, surface: &mut S) -> Option<WidgetId> {
        if let Some(selected) = surface.selected() {
            return Some(selected);
        }
        let first = surface
            .default_selectable()
            .or_else(|| surface.first_selectable())?;
        surface.select(first);
        Some(first)
    }
}
