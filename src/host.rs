/*
 * Seams to the host windowing system. The chrome layer never creates,
 * lays out or paints windows itself; it drives whatever implements these
 * traits. The Win32 backend lives in `win32`, tests use in-memory fakes.
 *
 * All methods run on the UI thread, so implementations use interior
 * mutability (`Cell`/`RefCell`) rather than locks.
 */

use crate::error::Result as ChromeResult;
use crate::types::{HookId, NativeMessage, PixelPoint, Size, WindowId, WindowState};

/// Callback inserted into a window's native message processing.
/// Returns `Some(result)` when it handled the message, `None` to fall
/// through to default processing.
pub type MessageHook = Box<dyn FnMut(&NativeMessage) -> Option<isize>>;

pub trait HostWindow {
    fn id(&self) -> WindowId;

    /// Device pixels per logical unit.
    fn render_scaling(&self) -> f64;

    fn add_message_hook(&self, hook: MessageHook) -> ChromeResult<HookId>;
    fn remove_message_hook(&self, hook_id: HookId) -> ChromeResult<()>;

    fn window_state(&self) -> WindowState;
    fn set_window_state(&self, state: WindowState);
    fn hide(&self);
    fn close(&self);
    fn begin_move_drag(&self);
}

/// Lets the chrome force a control's pointer-over visual state when the OS
/// withholds enter/leave notifications for non-client areas.
pub trait ForcedHover {
    fn set_forced_hover_state(&self, hovered: bool);
}

/// The custom-drawn caption button the Snap Layout flyout is attached to.
pub trait ChromeButton {
    fn is_visible(&self) -> bool;

    /// Rendered size in logical units.
    fn rendered_size(&self) -> Size;

    /// Screen position of the button's top-left corner in device pixels, or
    /// `None` while the button is not part of a displayed window.
    fn screen_origin(&self) -> Option<PixelPoint>;

    fn forced_hover(&self) -> Option<&dyn ForcedHover>;
}

/// Point-in-time poll of the physical pointer buttons, independent of the
/// event stream.
pub trait PointerState {
    fn is_primary_button_down(&self) -> bool;
}

/// Pointer state for platforms where nothing can be polled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPointerState;

impl PointerState for NoPointerState {
    fn is_primary_button_down(&self) -> bool {
        false
    }
}
