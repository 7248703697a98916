/*
 * Public entry point for snapchrome, a window-chrome layer for borderless
 * windows: a custom title bar with minimize/maximize/close buttons, a drag
 * region and left-side content, a host window wrapper, and Windows Snap
 * Layout support for the custom-drawn maximize button.
 *
 * The behavioural core (hit testing, hover tracking, disposal, title bar
 * event wiring) is platform-agnostic and talks to the windowing system
 * through the traits in `host`, so non-Windows builds can still compile and
 * test it. The Win32 implementation of those traits is compiled only on
 * Windows.
 */
pub mod chrome_window;
pub mod disposal;
pub mod error;
pub mod host;
pub mod platform;
pub mod snap_layout;
#[cfg(test)]
pub(crate) mod test_support;
pub mod theme;
pub mod title_bar;
pub mod types;
#[cfg(target_os = "windows")]
pub mod win32;

pub use chrome_window::{ChromeWindow, WindowChromeConfig};
pub use disposal::{DisposalList, ReleaseHandle};
pub use error::{ChromeError, Result as ChromeResult};
pub use host::{ChromeButton, ForcedHover, HostWindow, MessageHook, NoPointerState, PointerState};
pub use platform::{DesktopType, detect_platform, supports_snap_layout};
pub use snap_layout::{SnapLayoutInterceptor, SnapLayoutRegistration, enable_snap_layout};
pub use theme::{ButtonVisualState, CaptionButton, Color, TitleBarTheme};
pub use title_bar::{DOUBLE_CLICK_INTERVAL_MS, DoubleClickTracker, TitleBar, TitleBarConfig};
pub use types::{
    HitTestCode, HookId, NativeMessage, PixelPoint, Point, PointerKind, Rect, Size, Thickness,
    WindowId, WindowState,
};
#[cfg(target_os = "windows")]
pub use win32::{AsyncKeyPointerState, Win32CaptionButton, Win32Window};
