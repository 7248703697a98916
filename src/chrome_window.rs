/*
 * Host window wrapper for a borderless window with the custom title bar.
 * It mirrors the title bar's settings at window level so applications can
 * configure the chrome in one place, and adds a margin around the content.
 */

use std::rc::Rc;

use crate::host::{ChromeButton, HostWindow, PointerState};
use crate::title_bar::{TitleBar, TitleBarConfig};
use crate::types::Thickness;

/// Default margin between the window edge and its content.
pub const DEFAULT_CONTENT_MARGIN: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct WindowChromeConfig {
    pub title_bar: TitleBarConfig,
    pub content_margin: Thickness,
}

impl Default for WindowChromeConfig {
    fn default() -> Self {
        Self {
            title_bar: TitleBarConfig::default(),
            content_margin: Thickness::uniform(DEFAULT_CONTENT_MARGIN),
        }
    }
}

#[derive(Debug)]
pub struct ChromeWindow {
    title_bar: TitleBar,
    content_margin: Thickness,
}

impl ChromeWindow {
    pub fn new(config: WindowChromeConfig) -> Self {
        Self::with_title_bar(TitleBar::new(config.title_bar), config.content_margin)
    }

    pub fn with_title_bar(title_bar: TitleBar, content_margin: Thickness) -> Self {
        Self {
            title_bar,
            content_margin,
        }
    }

    pub fn title_bar(&self) -> &TitleBar {
        &self.title_bar
    }

    pub fn title_bar_mut(&mut self) -> &mut TitleBar {
        &mut self.title_bar
    }

    pub fn content_margin(&self) -> Thickness {
        self.content_margin
    }

    pub fn set_content_margin(&mut self, margin: Thickness) {
        self.content_margin = margin;
    }

    /// Hooks the chrome up to the displayed native window.
    pub fn attach(
        &mut self,
        window: &Rc<dyn HostWindow>,
        maximize_button: &Rc<dyn ChromeButton>,
        pointer: &Rc<dyn PointerState>,
    ) {
        self.title_bar.attach(window, maximize_button, pointer);
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title_bar.set_title(Some(title.into()));
    }

    pub fn set_title_bar_left_content(&mut self, content: Option<String>) {
        self.title_bar.set_left_content(content);
    }

    pub fn set_close_button_exits_app(&mut self, value: bool) {
        self.title_bar.set_close_button_exits_app(value);
    }

    pub fn set_close_button_hides_window(&mut self, value: bool) {
        self.title_bar.set_close_button_hides_window(value);
    }

    pub fn set_show_close_button(&mut self, value: bool) {
        self.title_bar.set_show_close_button(value);
    }

    pub fn set_show_maximize_button(&mut self, value: bool) {
        self.title_bar.set_show_maximize_button(value);
    }

    pub fn set_show_minimize_button(&mut self, value: bool) {
        self.title_bar.set_show_minimize_button(value);
    }

    /// Action run by the close button when it is set to exit the application.
    pub fn set_on_exit(&mut self, action: impl Fn() + 'static) {
        self.title_bar.set_exit_action(Some(Box::new(action)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::DesktopType;
    use crate::test_support::{FakeButton, FakePointer, FakeWindow};
    use std::cell::Cell;

    #[test]
    fn default_margin_is_uniform_ten() {
        let config = WindowChromeConfig::default();
        assert_eq!(config.content_margin, Thickness::uniform(10.0));
        assert!(config.title_bar.show_maximize_button);
    }

    #[test]
    fn window_settings_reach_the_title_bar() {
        let mut window = ChromeWindow::with_title_bar(
            TitleBar::for_desktop(TitleBarConfig::default(), DesktopType::Windows),
            Thickness::default(),
        );
        window.set_title("Editor");
        window.set_title_bar_left_content(Some("beta".to_string()));
        window.set_show_minimize_button(false);
        window.set_content_margin(Thickness::uniform(4.0));

        assert_eq!(window.title_bar().title(), Some("Editor"));
        assert_eq!(window.title_bar().left_content(), Some("beta"));
        assert!(!window.title_bar().show_minimize_button());
        assert!(window.title_bar().show_close_button());
        assert_eq!(window.content_margin(), Thickness::uniform(4.0));
    }

    #[test]
    fn on_exit_runs_from_the_close_button() {
        let fake = FakeWindow::new(3);
        let host: Rc<dyn HostWindow> = fake.clone();
        let button: Rc<dyn ChromeButton> = FakeButton::new();
        let pointer: Rc<dyn PointerState> = FakePointer::new();
        let mut window = ChromeWindow::with_title_bar(
            TitleBar::for_desktop(TitleBarConfig::default(), DesktopType::Windows),
            Thickness::default(),
        );
        let exited = Rc::new(Cell::new(false));
        let flag = Rc::clone(&exited);
        window.set_on_exit(move || flag.set(true));
        window.set_close_button_exits_app(true);
        window.attach(&host, &button, &pointer);

        window.title_bar_mut().close_clicked();

        assert!(exited.get());
        assert_eq!(fake.close_count.get(), 0);
        assert!(window.title_bar().is_snap_layout_active());
    }
}
