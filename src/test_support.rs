/*
 * In-memory stand-ins for the host window system, used by unit tests on
 * every platform.
 */

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::{ChromeError, Result as ChromeResult};
use crate::host::{ChromeButton, ForcedHover, HostWindow, MessageHook, PointerState};
use crate::types::{HookId, NativeMessage, PixelPoint, Size, WindowId, WindowState};

pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub(crate) struct FakeWindow {
    id: WindowId,
    pub scaling: Cell<f64>,
    hooks: RefCell<Vec<(HookId, Option<MessageHook>)>>,
    next_hook_id: Cell<usize>,
    pub state: Cell<WindowState>,
    pub hidden: Cell<bool>,
    pub close_count: Cell<u32>,
    pub move_drag_count: Cell<u32>,
    pub fail_add_hook: Cell<bool>,
    pub fail_remove_hook: Cell<bool>,
}

impl FakeWindow {
    pub(crate) fn new(id: usize) -> Rc<Self> {
        Rc::new(Self {
            id: WindowId(id),
            scaling: Cell::new(1.0),
            hooks: RefCell::new(Vec::new()),
            next_hook_id: Cell::new(1),
            state: Cell::new(WindowState::Normal),
            hidden: Cell::new(false),
            close_count: Cell::new(0),
            move_drag_count: Cell::new(0),
            fail_add_hook: Cell::new(false),
            fail_remove_hook: Cell::new(false),
        })
    }

    pub(crate) fn hook_count(&self) -> usize {
        self.hooks.borrow().len()
    }

    /// Runs the message through every hook in registration order until one
    /// handles it. Hooks are taken out while they run.
    pub(crate) fn deliver(&self, msg: &NativeMessage) -> Option<isize> {
        let ids: Vec<HookId> = self.hooks.borrow().iter().map(|(id, _)| *id).collect();
        for id in ids {
            let taken = self
                .hooks
                .borrow_mut()
                .iter_mut()
                .find(|(hook_id, _)| *hook_id == id)
                .and_then(|(_, slot)| slot.take());
            let Some(mut hook) = taken else {
                continue;
            };
            let result = hook(msg);
            if let Some((_, slot)) = self
                .hooks
                .borrow_mut()
                .iter_mut()
                .find(|(hook_id, _)| *hook_id == id)
            {
                *slot = Some(hook);
            }
            if result.is_some() {
                return result;
            }
        }
        None
    }
}

impl HostWindow for FakeWindow {
    fn id(&self) -> WindowId {
        self.id
    }

    fn render_scaling(&self) -> f64 {
        self.scaling.get()
    }

    fn add_message_hook(&self, hook: MessageHook) -> ChromeResult<HookId> {
        if self.fail_add_hook.get() {
            return Err(ChromeError::RegistrationFailed(
                "fake window refuses hooks".to_string(),
            ));
        }
        let id = HookId(self.next_hook_id.get());
        self.next_hook_id.set(id.0 + 1);
        self.hooks.borrow_mut().push((id, Some(hook)));
        Ok(id)
    }

    fn remove_message_hook(&self, hook_id: HookId) -> ChromeResult<()> {
        if self.fail_remove_hook.get() {
            return Err(ChromeError::DisposalFailed(format!(
                "fake window refuses to remove {hook_id:?}"
            )));
        }
        self.hooks.borrow_mut().retain(|(id, _)| *id != hook_id);
        Ok(())
    }

    fn window_state(&self) -> WindowState {
        self.state.get()
    }

    fn set_window_state(&self, state: WindowState) {
        self.state.set(state);
    }

    fn hide(&self) {
        self.hidden.set(true);
    }

    fn close(&self) {
        self.close_count.set(self.close_count.get() + 1);
    }

    fn begin_move_drag(&self) {
        self.move_drag_count.set(self.move_drag_count.get() + 1);
    }
}

#[derive(Default)]
pub(crate) struct HoverRecorder {
    pub state: Cell<bool>,
    pub transitions: RefCell<Vec<bool>>,
}

impl ForcedHover for HoverRecorder {
    fn set_forced_hover_state(&self, hovered: bool) {
        self.state.set(hovered);
        self.transitions.borrow_mut().push(hovered);
    }
}

pub(crate) struct FakeButton {
    pub visible: Cell<bool>,
    pub size: Cell<Size>,
    pub origin: Cell<Option<PixelPoint>>,
    hover: Option<HoverRecorder>,
}

impl FakeButton {
    /// A visible 40x30 button at screen position (100, 50).
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self {
            visible: Cell::new(true),
            size: Cell::new(Size::new(40.0, 30.0)),
            origin: Cell::new(Some(PixelPoint::new(100, 50))),
            hover: Some(HoverRecorder::default()),
        })
    }

    pub(crate) fn without_hover_capability() -> Rc<Self> {
        Rc::new(Self {
            visible: Cell::new(true),
            size: Cell::new(Size::new(40.0, 30.0)),
            origin: Cell::new(Some(PixelPoint::new(100, 50))),
            hover: None,
        })
    }

    pub(crate) fn hovered(&self) -> bool {
        self.hover.as_ref().is_some_and(|h| h.state.get())
    }

    pub(crate) fn hover_transitions(&self) -> Vec<bool> {
        self.hover
            .as_ref()
            .map(|h| h.transitions.borrow().clone())
            .unwrap_or_default()
    }
}

impl ChromeButton for FakeButton {
    fn is_visible(&self) -> bool {
        self.visible.get()
    }

    fn rendered_size(&self) -> Size {
        self.size.get()
    }

    fn screen_origin(&self) -> Option<PixelPoint> {
        self.origin.get()
    }

    fn forced_hover(&self) -> Option<&dyn ForcedHover> {
        self.hover.as_ref().map(|h| h as &dyn ForcedHover)
    }
}

#[derive(Default)]
pub(crate) struct FakePointer {
    pub primary_down: Cell<bool>,
}

impl FakePointer {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }
}

impl PointerState for FakePointer {
    fn is_primary_button_down(&self) -> bool {
        self.primary_down.get()
    }
}
