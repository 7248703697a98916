/*
 * Win32 implementation of the host traits. Message hooks are installed as
 * comctl32 window subclasses, one subclass id per hook, so several hooks
 * can share a window and each can be removed on its own. The hooks
 * themselves live in a thread-local registry because window procedures
 * only ever run on the thread that owns the window.
 */

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use windows::Win32::{
    Foundation::{COLORREF, GetLastError, HWND, LPARAM, LRESULT, POINT, RECT, WPARAM},
    Graphics::Gdi::{ClientToScreen, InvalidateRect},
    UI::{
        HiDpi::GetDpiForWindow,
        Input::KeyboardAndMouse::{GetAsyncKeyState, ReleaseCapture, VK_LBUTTON},
        Shell::{DefSubclassProc, RemoveWindowSubclass, SetWindowSubclass},
        WindowsAndMessaging::{
            GetClientRect, HTCAPTION, IsIconic, IsWindowVisible, IsZoomed, PostMessageW, SW_HIDE,
            SW_MAXIMIZE, SW_MINIMIZE, SW_RESTORE, SendMessageW, ShowWindow, WM_CLOSE,
            WM_NCDESTROY, WM_NCLBUTTONDOWN,
        },
    },
};

use crate::error::{ChromeError, Result as ChromeResult};
use crate::host::{ChromeButton, ForcedHover, HostWindow, MessageHook, PointerState};
use crate::theme::{ButtonVisualState, CaptionButton, Color, TitleBarTheme};
use crate::types::{HookId, NativeMessage, PixelPoint, Size, WindowId, WindowState};

const USER_DEFAULT_SCREEN_DPI: f64 = 96.0;

type HookKey = (isize, usize);

thread_local! {
    // A slot is `None` while its hook is running.
    static MESSAGE_HOOKS: RefCell<HashMap<HookKey, Option<MessageHook>>> =
        RefCell::new(HashMap::new());
    // Shared by every wrapper so two wrappers of one HWND never reuse an id.
    static NEXT_SUBCLASS_ID: Cell<usize> = const { Cell::new(1) };
}

fn next_subclass_id() -> usize {
    NEXT_SUBCLASS_ID.with(|next| {
        let id = next.get();
        next.set(id + 1);
        id
    })
}

fn hook_key(hwnd: HWND, subclass_id: usize) -> HookKey {
    (hwnd.0 as isize, subclass_id)
}

unsafe extern "system" fn chrome_subclass_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
    subclass_id: usize,
    _ref_data: usize,
) -> LRESULT {
    let key = hook_key(hwnd, subclass_id);

    if msg == WM_NCDESTROY {
        MESSAGE_HOOKS.with(|hooks| hooks.borrow_mut().remove(&key));
        unsafe {
            let _ = RemoveWindowSubclass(hwnd, Some(chrome_subclass_proc), subclass_id);
            return DefSubclassProc(hwnd, msg, wparam, lparam);
        }
    }

    let taken = MESSAGE_HOOKS.with(|hooks| hooks.borrow_mut().get_mut(&key).and_then(Option::take));
    if let Some(mut hook) = taken {
        let result = hook(&NativeMessage::new(msg, wparam.0, lparam.0));
        MESSAGE_HOOKS.with(|hooks| {
            // The hook may have been removed while it ran; only refill live slots.
            if let Some(slot) = hooks.borrow_mut().get_mut(&key) {
                *slot = Some(hook);
            }
        });
        if let Some(code) = result {
            return LRESULT(code);
        }
    }

    unsafe { DefSubclassProc(hwnd, msg, wparam, lparam) }
}

fn scaling_for(hwnd: HWND) -> f64 {
    let dpi = unsafe { GetDpiForWindow(hwnd) };
    if dpi == 0 {
        1.0
    } else {
        f64::from(dpi) / USER_DEFAULT_SCREEN_DPI
    }
}

/// A top-level window drawn without system chrome.
#[derive(Debug)]
pub struct Win32Window {
    hwnd: HWND,
}

impl Win32Window {
    pub fn new(hwnd: HWND) -> Self {
        Self { hwnd }
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }
}

impl HostWindow for Win32Window {
    fn id(&self) -> WindowId {
        WindowId(self.hwnd.0 as usize)
    }

    fn render_scaling(&self) -> f64 {
        scaling_for(self.hwnd)
    }

    fn add_message_hook(&self, hook: MessageHook) -> ChromeResult<HookId> {
        if self.hwnd.is_invalid() {
            return Err(ChromeError::WindowUnresolved);
        }
        let subclass_id = next_subclass_id();

        let key = hook_key(self.hwnd, subclass_id);
        MESSAGE_HOOKS.with(|hooks| hooks.borrow_mut().insert(key, Some(hook)));

        let installed =
            unsafe { SetWindowSubclass(self.hwnd, Some(chrome_subclass_proc), subclass_id, 0) };
        if !installed.as_bool() {
            MESSAGE_HOOKS.with(|hooks| hooks.borrow_mut().remove(&key));
            let error = unsafe { GetLastError() };
            log::error!("Win32Window: SetWindowSubclass failed for {:?}: {error:?}", self.hwnd);
            return Err(ChromeError::RegistrationFailed(format!(
                "SetWindowSubclass failed: {error:?}"
            )));
        }
        log::debug!(
            "Win32Window: subclass {subclass_id} installed on HWND {:?}",
            self.hwnd
        );
        Ok(HookId(subclass_id))
    }

    fn remove_message_hook(&self, hook_id: HookId) -> ChromeResult<()> {
        MESSAGE_HOOKS.with(|hooks| hooks.borrow_mut().remove(&hook_key(self.hwnd, hook_id.0)));
        let removed =
            unsafe { RemoveWindowSubclass(self.hwnd, Some(chrome_subclass_proc), hook_id.0) };
        if removed.as_bool() {
            Ok(())
        } else {
            Err(ChromeError::DisposalFailed(format!(
                "RemoveWindowSubclass failed for subclass {} on HWND {:?}",
                hook_id.0, self.hwnd
            )))
        }
    }

    fn window_state(&self) -> WindowState {
        unsafe {
            if IsIconic(self.hwnd).as_bool() {
                WindowState::Minimized
            } else if IsZoomed(self.hwnd).as_bool() {
                WindowState::Maximized
            } else {
                WindowState::Normal
            }
        }
    }

    fn set_window_state(&self, state: WindowState) {
        let cmd = match state {
            WindowState::Normal => SW_RESTORE,
            WindowState::Maximized => SW_MAXIMIZE,
            WindowState::Minimized => SW_MINIMIZE,
        };
        unsafe {
            let _ = ShowWindow(self.hwnd, cmd);
        }
    }

    fn hide(&self) {
        unsafe {
            let _ = ShowWindow(self.hwnd, SW_HIDE);
        }
    }

    fn close(&self) {
        unsafe {
            if let Err(err) = PostMessageW(Some(self.hwnd), WM_CLOSE, WPARAM(0), LPARAM(0)) {
                log::error!("Win32Window: posting WM_CLOSE to {:?} failed: {err:?}", self.hwnd);
            }
        }
    }

    /*
     * Hands the drag over to the system move loop, as if the press had
     * landed on a native caption.
     */
    fn begin_move_drag(&self) {
        unsafe {
            let _ = ReleaseCapture();
            SendMessageW(
                self.hwnd,
                WM_NCLBUTTONDOWN,
                Some(WPARAM(HTCAPTION as usize)),
                Some(LPARAM(0)),
            );
        }
    }
}

/// A child window acting as one of the custom caption buttons.
#[derive(Debug)]
pub struct Win32CaptionButton {
    hwnd: HWND,
    kind: CaptionButton,
    forced_hover: Cell<bool>,
}

impl Win32CaptionButton {
    pub fn new(hwnd: HWND, kind: CaptionButton) -> Self {
        Self {
            hwnd,
            kind,
            forced_hover: Cell::new(false),
        }
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    pub fn kind(&self) -> CaptionButton {
        self.kind
    }

    pub fn visual_state(&self, pressed: bool) -> ButtonVisualState {
        if pressed {
            ButtonVisualState::Pressed
        } else if self.forced_hover.get() {
            ButtonVisualState::Hovered
        } else {
            ButtonVisualState::Normal
        }
    }

    /// Fill for the owner-draw pass.
    pub fn fill_colorref(&self, theme: &TitleBarTheme, pressed: bool) -> COLORREF {
        color_to_colorref(&theme.button_background(self.kind, self.visual_state(pressed)))
    }
}

impl ForcedHover for Win32CaptionButton {
    fn set_forced_hover_state(&self, hovered: bool) {
        if self.forced_hover.replace(hovered) != hovered {
            unsafe {
                let _ = InvalidateRect(Some(self.hwnd), None, false);
            }
        }
    }
}

impl ChromeButton for Win32CaptionButton {
    fn is_visible(&self) -> bool {
        unsafe { IsWindowVisible(self.hwnd).as_bool() }
    }

    fn rendered_size(&self) -> Size {
        let mut rect = RECT::default();
        if unsafe { GetClientRect(self.hwnd, &mut rect) }.is_err() {
            log::warn!("Win32CaptionButton: GetClientRect failed for {:?}", self.hwnd);
            return Size::default();
        }
        let scaling = scaling_for(self.hwnd);
        Size::new(
            f64::from(rect.right - rect.left) / scaling,
            f64::from(rect.bottom - rect.top) / scaling,
        )
    }

    fn screen_origin(&self) -> Option<PixelPoint> {
        let mut pt = POINT { x: 0, y: 0 };
        unsafe { ClientToScreen(self.hwnd, &mut pt) }
            .as_bool()
            .then_some(PixelPoint::new(pt.x, pt.y))
    }

    fn forced_hover(&self) -> Option<&dyn ForcedHover> {
        Some(self)
    }
}

/// Polls the physical state of the left mouse button.
#[derive(Debug, Default, Clone, Copy)]
pub struct AsyncKeyPointerState;

impl PointerState for AsyncKeyPointerState {
    fn is_primary_button_down(&self) -> bool {
        let state = unsafe { GetAsyncKeyState(VK_LBUTTON.0 as i32) };
        (state as u16 & 0x8000) != 0
    }
}

/*
 * Creates a Win32 COLORREF from the platform-agnostic `Color` struct.
 * Win32 expects colors in BGR format.
 */
pub(crate) fn color_to_colorref(color: &Color) -> COLORREF {
    COLORREF((color.r as u32) | ((color.g as u32) << 8) | ((color.b as u32) << 16))
}

#[cfg(test)]
mod tests {
    use super::*;
    use windows::Win32::UI::WindowsAndMessaging::{HTCLIENT, HTMAXBUTTON, WM_NCHITTEST};

    #[test]
    fn portable_constants_match_win32() {
        assert_eq!(crate::types::WM_NCHITTEST, WM_NCHITTEST);
        assert_eq!(crate::types::HTCLIENT, HTCLIENT as isize);
        assert_eq!(crate::types::HTMAXBUTTON, HTMAXBUTTON as isize);
    }

    #[test]
    fn subclass_ids_are_unique_across_wrappers() {
        let hwnd = HWND(0x1234 as _);
        let first = Win32Window::new(hwnd);
        let second = Win32Window::new(hwnd);
        assert_eq!(first.id(), second.id());

        let a = next_subclass_id();
        let b = next_subclass_id();
        assert_ne!(hook_key(hwnd, a), hook_key(hwnd, b));
        assert!(b > a);
    }

    #[test]
    fn colorref_is_bgr() {
        let cr = color_to_colorref(&Color::rgb(0xE8, 0x11, 0x23));
        assert_eq!(cr.0, 0x0023_11E8);
    }

    #[test]
    fn forced_hover_drives_visual_state() {
        let button = Win32CaptionButton::new(HWND::default(), CaptionButton::Maximize);
        assert_eq!(button.visual_state(false), ButtonVisualState::Normal);
        button.forced_hover.set(true);
        assert_eq!(button.visual_state(false), ButtonVisualState::Hovered);
        assert_eq!(button.visual_state(true), ButtonVisualState::Pressed);
    }
}
