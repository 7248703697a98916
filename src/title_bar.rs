/*
 * The custom title bar control. It owns no native window; it reacts to
 * clicks and presses forwarded by the host and turns them into window
 * operations (minimize, maximize/restore, hide, close, move-drag). On
 * attachment it also installs the Snap Layout interceptor for its maximize
 * button and keeps the release handle for its explicit close path.
 */

use std::fmt;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

use crate::disposal::DisposalList;
use crate::error::ChromeError;
use crate::host::{ChromeButton, HostWindow, PointerState};
use crate::platform::{DesktopType, detect_platform};
use crate::snap_layout::{SnapLayoutRegistration, enable_snap_layout};
use crate::theme::{ButtonVisualState, CaptionButton, Color, TitleBarTheme};
use crate::types::{PointerKind, WindowState};

/// Two presses on the drag area closer than this toggle maximize.
pub const DOUBLE_CLICK_INTERVAL_MS: u64 = 300;

#[derive(Debug, Clone, PartialEq)]
pub struct TitleBarConfig {
    pub title: Option<String>,
    /// Content shown left of the title, e.g. an application name or badge.
    pub left_content: Option<String>,
    /// Close runs the exit action instead of touching the window.
    pub close_button_exits_app: bool,
    /// Close hides the window instead of closing it.
    pub close_button_hides_window: bool,
    pub show_close_button: bool,
    pub show_maximize_button: bool,
    pub show_minimize_button: bool,
    pub theme: TitleBarTheme,
}

impl Default for TitleBarConfig {
    fn default() -> Self {
        Self {
            title: None,
            left_content: None,
            close_button_exits_app: false,
            close_button_hides_window: false,
            show_close_button: true,
            show_maximize_button: true,
            show_minimize_button: true,
            theme: TitleBarTheme::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DoubleClickTracker {
    interval: Duration,
    last_press: Option<Instant>,
}

impl Default for DoubleClickTracker {
    fn default() -> Self {
        Self::new(Duration::from_millis(DOUBLE_CLICK_INTERVAL_MS))
    }
}

impl DoubleClickTracker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_press: None,
        }
    }

    /// Records a press. Returns true when it completes a double click, in
    /// which case the tracker starts over.
    pub fn register_press(&mut self, now: Instant) -> bool {
        match self.last_press {
            Some(last) if now.saturating_duration_since(last) < self.interval => {
                self.last_press = None;
                true
            }
            _ => {
                self.last_press = Some(now);
                false
            }
        }
    }

    pub fn reset(&mut self) {
        self.last_press = None;
    }
}

pub struct TitleBar {
    config: TitleBarConfig,
    desktop: DesktopType,
    exit_action: Option<Box<dyn Fn()>>,
    window: Option<Weak<dyn HostWindow>>,
    handlers_attached: bool,
    double_click: DoubleClickTracker,
    snap_layout: Option<SnapLayoutRegistration>,
    disposals: DisposalList,
}

impl fmt::Debug for TitleBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TitleBar")
            .field("config", &self.config)
            .field("desktop", &self.desktop)
            .field("has_exit_action", &self.exit_action.is_some())
            .field("handlers_attached", &self.handlers_attached)
            .field("snap_layout", &self.snap_layout)
            .field("disposals", &self.disposals)
            .finish()
    }
}

impl TitleBar {
    pub fn new(config: TitleBarConfig) -> Self {
        Self::for_desktop(config, detect_platform())
    }

    /// Creates a title bar that behaves as on `desktop`, regardless of the
    /// platform the process runs on.
    pub fn for_desktop(config: TitleBarConfig, desktop: DesktopType) -> Self {
        Self {
            config,
            desktop,
            exit_action: None,
            window: None,
            handlers_attached: false,
            double_click: DoubleClickTracker::default(),
            snap_layout: None,
            disposals: DisposalList::new(),
        }
    }

    pub fn config(&self) -> &TitleBarConfig {
        &self.config
    }

    pub fn title(&self) -> Option<&str> {
        self.config.title.as_deref()
    }

    pub fn set_title(&mut self, title: Option<String>) {
        self.config.title = title;
    }

    pub fn left_content(&self) -> Option<&str> {
        self.config.left_content.as_deref()
    }

    pub fn set_left_content(&mut self, content: Option<String>) {
        self.config.left_content = content;
    }

    pub fn set_close_button_exits_app(&mut self, value: bool) {
        self.config.close_button_exits_app = value;
    }

    pub fn set_close_button_hides_window(&mut self, value: bool) {
        self.config.close_button_hides_window = value;
    }

    pub fn show_close_button(&self) -> bool {
        self.config.show_close_button
    }

    pub fn set_show_close_button(&mut self, value: bool) {
        self.config.show_close_button = value;
    }

    pub fn show_maximize_button(&self) -> bool {
        self.config.show_maximize_button
    }

    pub fn set_show_maximize_button(&mut self, value: bool) {
        self.config.show_maximize_button = value;
    }

    pub fn show_minimize_button(&self) -> bool {
        self.config.show_minimize_button
    }

    pub fn set_show_minimize_button(&mut self, value: bool) {
        self.config.show_minimize_button = value;
    }

    pub fn set_theme(&mut self, theme: TitleBarTheme) {
        self.config.theme = theme;
    }

    pub fn set_exit_action(&mut self, action: Option<Box<dyn Fn()>>) {
        self.exit_action = action;
    }

    pub fn caption_button_background(&self, button: CaptionButton, state: ButtonVisualState) -> Color {
        self.config.theme.button_background(button, state)
    }

    pub fn is_snap_layout_active(&self) -> bool {
        self.snap_layout
            .as_ref()
            .is_some_and(SnapLayoutRegistration::is_active)
    }

    pub fn pending_disposals(&self) -> usize {
        self.disposals.len()
    }

    /*
     * Called when the title bar becomes part of a displayed window. Wires the
     * click handlers to `window` and installs the Snap Layout interceptor.
     * Attaching twice with the same window and maximize button keeps the
     * existing hook; a different window or button gets a fresh hook. Interceptor failures are
     * logged and leave the rest of the title bar working.
     */
    pub fn attach(
        &mut self,
        window: &Rc<dyn HostWindow>,
        maximize_button: &Rc<dyn ChromeButton>,
        pointer: &Rc<dyn PointerState>,
    ) {
        log::debug!("TitleBar: attached to window {:?}", window.id());
        self.window = Some(Rc::downgrade(window));
        self.handlers_attached = true;
        self.double_click.reset();

        if let Some(existing) = &self.snap_layout
            && existing.is_active()
        {
            if existing.serves(window.id(), maximize_button) {
                log::debug!(
                    "TitleBar: Snap Layout hook already active on window {:?}",
                    window.id()
                );
                return;
            }
            if let Err(err) = existing.release_handle().release() {
                log::warn!("TitleBar: failed to release Snap Layout hook on re-attach: {err}");
            }
        }
        self.snap_layout = None;
        self.disposals.prune_released();

        match enable_snap_layout(self.desktop, &Rc::downgrade(window), maximize_button, pointer) {
            Ok(registration) => {
                self.disposals.push(registration.release_handle());
                self.snap_layout = Some(registration);
            }
            Err(ChromeError::PlatformUnsupported) => {
                log::debug!("TitleBar: Snap Layout not available on {:?}", self.desktop);
            }
            Err(err) => {
                log::warn!("TitleBar: failed to enable Snap Layout: {err}");
            }
        }
    }

    fn owning_window(&self) -> Option<Rc<dyn HostWindow>> {
        if !self.handlers_attached {
            return None;
        }
        let window = self.window.as_ref().and_then(Weak::upgrade);
        if window.is_none() {
            log::debug!("TitleBar: owning window is gone");
        }
        window
    }

    pub fn minimize_clicked(&self) {
        if let Some(window) = self.owning_window() {
            window.set_window_state(WindowState::Minimized);
        }
    }

    pub fn maximize_clicked(&self) {
        if let Some(window) = self.owning_window() {
            toggle_maximize(window.as_ref());
        }
    }

    /*
     * Close button semantics, in priority order: run the exit action, hide
     * the window, or tear down and close. Only the last path releases the
     * native resources recorded in the disposal list.
     */
    pub fn close_clicked(&mut self) {
        if !self.handlers_attached {
            return;
        }
        if self.config.close_button_exits_app {
            match &self.exit_action {
                Some(action) => action(),
                None => log::warn!("TitleBar: close is set to exit the app but no exit action is set"),
            }
            return;
        }
        let Some(window) = self.owning_window() else {
            return;
        };
        if self.config.close_button_hides_window {
            window.hide();
            return;
        }

        self.handlers_attached = false;
        let failures = self.disposals.dispose_all();
        if failures > 0 {
            log::warn!("TitleBar: {failures} release action(s) failed during close");
        }
        self.snap_layout = None;
        window.close();
    }

    /*
     * Pointer pressed on the drag area. Mouse presses start an interactive
     * move; a second press within the double-click interval toggles
     * maximize when the maximize button is shown. Returns whether the press
     * was handled.
     */
    pub fn drag_area_pressed(&mut self, kind: PointerKind, now: Instant) -> bool {
        if kind != PointerKind::Mouse {
            return false;
        }
        let Some(window) = self.owning_window() else {
            return false;
        };
        window.begin_move_drag();

        if self.config.show_maximize_button {
            if self.double_click.register_press(now) {
                toggle_maximize(window.as_ref());
            }
        } else {
            self.double_click.reset();
            self.double_click.register_press(now);
        }
        true
    }
}

fn toggle_maximize(window: &dyn HostWindow) {
    let next = window.window_state().toggled_maximize();
    log::debug!("TitleBar: window {:?} -> {next:?}", window.id());
    window.set_window_state(next);
}
