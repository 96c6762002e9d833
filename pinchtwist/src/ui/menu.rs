//! Main menu and page display with fade transitions.
//!
//! A transition fades the canvas out, swaps what is visible at the
//! midpoint, then fades back in. Starting a new transition cancels the
//! one in flight. Driven by `tick(dt)`.

use tracing::{debug, warn};

/// What the display shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuView {
    /// Main menu hidden, no page shown.
    Hidden,
    MainMenu,
    Page(usize),
}

impl MenuView {
    pub fn to_sexp(&self) -> String {
        match self {
            Self::Hidden => ":hidden".to_string(),
            Self::MainMenu => ":main-menu".to_string(),
            Self::Page(i) => format!("(:page {})", i),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuConfig {
    pub show_main_menu_on_start: bool,
    /// Seconds per half of a transition.
    pub fade_duration: f32,
    /// Whether a fadeable canvas exists.
    pub has_canvas: bool,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            show_main_menu_on_start: true,
            fade_duration: 0.25,
            has_canvas: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Fade {
    Out { elapsed: f32, target: MenuView },
    In { elapsed: f32 },
}

/// Menu state plus canvas alpha.
#[derive(Debug, Clone)]
pub struct MenuDisplay {
    config: MenuConfig,
    pages: Vec<String>,
    view: MenuView,
    alpha: Option<f32>,
    fade: Option<Fade>,
}

impl MenuDisplay {
    /// Create the display, shown or hidden instantly.
    pub fn new(config: MenuConfig, pages: Vec<String>) -> Self {
        let (view, alpha) = if config.show_main_menu_on_start {
            (MenuView::MainMenu, 1.0)
        } else {
            (MenuView::Hidden, 0.0)
        };
        let alpha = config.has_canvas.then_some(alpha);
        Self {
            config,
            pages,
            view,
            alpha,
            fade: None,
        }
    }

    pub fn view(&self) -> MenuView {
        self.view
    }

    /// Canvas alpha, `None` without a canvas.
    pub fn alpha(&self) -> Option<f32> {
        self.alpha
    }

    pub fn is_transitioning(&self) -> bool {
        self.fade.is_some()
    }

    pub fn page_name(&self, index: usize) -> Option<&str> {
        self.pages.get(index).map(String::as_str)
    }

    /// Transition to page `index`. Returns false if out of range.
    pub fn show_page(&mut self, index: usize) -> bool {
        if index >= self.pages.len() {
            warn!(index, pages = self.pages.len(), "Menu: page index out of range");
            return false;
        }
        self.transition(MenuView::Page(index));
        true
    }

    pub fn show_main_menu(&mut self) {
        self.transition(MenuView::MainMenu);
    }

    pub fn hide_main_menu(&mut self) {
        self.transition(MenuView::Hidden);
    }

    /// Show the main menu only when neither it nor a page is visible.
    pub fn show_main_menu_if_hidden(&mut self) {
        if self.view == MenuView::Hidden {
            self.show_main_menu();
        }
    }

    fn transition(&mut self, target: MenuView) {
        if self.alpha.is_none() {
            self.view = target;
            return;
        }
        if self.fade.is_some() {
            debug!("Menu: cancelling in-flight transition");
        }
        self.alpha = Some(1.0);
        self.fade = Some(Fade::Out {
            elapsed: 0.0,
            target,
        });
    }

    /// Advance the running transition by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        let Some(fade) = self.fade else {
            return;
        };
        let duration = self.config.fade_duration;

        match fade {
            Fade::Out { elapsed, target } => {
                let elapsed = elapsed + dt;
                if elapsed >= duration {
                    self.alpha = Some(0.0);
                    self.view = target;
                    debug!(view = %target.to_sexp(), "Menu: view changed");
                    self.fade = Some(Fade::In { elapsed: 0.0 });
                } else {
                    self.alpha = Some(1.0 - elapsed / duration);
                    self.fade = Some(Fade::Out { elapsed, target });
                }
            }
            Fade::In { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed >= duration {
                    self.alpha = Some(1.0);
                    self.fade = None;
                } else {
                    self.alpha = Some(elapsed / duration);
                    self.fade = Some(Fade::In { elapsed });
                }
            }
        }
    }

    pub fn status_sexp(&self) -> String {
        format!(
            "(:view {} :alpha {} :transitioning {})",
            self.view.to_sexp(),
            self.alpha
                .map(|a| format!("{:.2}", a))
                .unwrap_or_else(|| "nil".to_string()),
            if self.fade.is_some() { "t" } else { "nil" },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages() -> Vec<String> {
        vec!["settings".to_string(), "about".to_string()]
    }

    fn run(menu: &mut MenuDisplay, seconds: f32) {
        let mut t = 0.0;
        while t < seconds {
            menu.tick(0.05);
            t += 0.05;
        }
    }

    #[test]
    fn test_initial_state() {
        let menu = MenuDisplay::new(MenuConfig::default(), pages());
        assert_eq!(menu.view(), MenuView::MainMenu);
        assert_eq!(menu.alpha(), Some(1.0));

        let hidden = MenuDisplay::new(
            MenuConfig {
                show_main_menu_on_start: false,
                ..Default::default()
            },
            pages(),
        );
        assert_eq!(hidden.view(), MenuView::Hidden);
        assert_eq!(hidden.alpha(), Some(0.0));
    }

    #[test]
    fn test_page_fade() {
        let mut menu = MenuDisplay::new(MenuConfig::default(), pages());
        assert!(menu.show_page(1));
        assert!(menu.is_transitioning());

        menu.tick(0.1);
        let alpha = menu.alpha().unwrap();
        assert!((alpha - 0.6).abs() < 1e-4, "got {}", alpha);
        assert_eq!(menu.view(), MenuView::MainMenu);

        menu.tick(0.2);
        assert_eq!(menu.view(), MenuView::Page(1));
        assert_eq!(menu.alpha(), Some(0.0));

        menu.tick(0.3);
        assert_eq!(menu.alpha(), Some(1.0));
        assert!(!menu.is_transitioning());
    }

    #[test]
    fn test_out_of_range_page() {
        let mut menu = MenuDisplay::new(MenuConfig::default(), pages());
        assert!(!menu.show_page(2));
        assert!(!menu.is_transitioning());
        assert_eq!(menu.view(), MenuView::MainMenu);
    }

    #[test]
    fn test_new_transition_cancels() {
        let mut menu = MenuDisplay::new(MenuConfig::default(), pages());
        menu.show_page(0);
        menu.tick(0.2);
        menu.hide_main_menu();
        run(&mut menu, 1.0);
        assert_eq!(menu.view(), MenuView::Hidden);
        assert_eq!(menu.alpha(), Some(1.0));
    }

    #[test]
    fn test_without_canvas_immediate() {
        let config = MenuConfig {
            has_canvas: false,
            ..Default::default()
        };
        let mut menu = MenuDisplay::new(config, pages());
        menu.show_page(0);
        assert_eq!(menu.view(), MenuView::Page(0));
        assert!(!menu.is_transitioning());
        assert_eq!(menu.alpha(), None);
    }

    #[test]
    fn test_show_if_hidden() {
        let config = MenuConfig {
            has_canvas: false,
            show_main_menu_on_start: false,
            ..Default::default()
        };
        let mut menu = MenuDisplay::new(config, pages());
        menu.show_main_menu_if_hidden();
        assert_eq!(menu.view(), MenuView::MainMenu);

        menu.show_page(1);
        menu.show_main_menu_if_hidden();
        assert_eq!(menu.view(), MenuView::Page(1));
    }

    #[test]
    fn test_status_sexp() {
        let menu = MenuDisplay::new(MenuConfig::default(), pages());
        assert_eq!(
            menu.status_sexp(),
            "(:view :main-menu :alpha 1.00 :transitioning nil)"
        );
    }
}
