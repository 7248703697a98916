/*
 * Windows Snap Layout support for a custom-drawn maximize button.
 *
 * The window manager only shows the Snap Layout flyout when non-client hit
 * testing reports HTMAXBUTTON. The interceptor below is hooked into the
 * window's message processing and answers WM_NCHITTEST for the button's
 * rectangle. While the OS owns hit testing there, the toolkit never sees
 * pointer enter/leave for the button, so the interceptor also forces the
 * button's hover state in lock-step with its own decision.
 */

use std::fmt;
use std::rc::{Rc, Weak};

use crate::disposal::ReleaseHandle;
use crate::error::{ChromeError, Result as ChromeResult};
use crate::hit_test::{ButtonGeometry, screen_point_from_lparam};
use crate::host::{ChromeButton, HostWindow, PointerState};
use crate::platform::DesktopType;
use crate::types::{HitTestCode, HookId, NativeMessage, WM_NCHITTEST, WindowId};

pub struct SnapLayoutInterceptor {
    button: Rc<dyn ChromeButton>,
    window: Weak<dyn HostWindow>,
    pointer: Rc<dyn PointerState>,
    pointer_on_button: bool,
}

impl SnapLayoutInterceptor {
    pub fn new(
        button: Rc<dyn ChromeButton>,
        window: Weak<dyn HostWindow>,
        pointer: Rc<dyn PointerState>,
    ) -> Self {
        Self {
            button,
            window,
            pointer,
            pointer_on_button: false,
        }
    }

    /// Whether the last hit test landed on the button.
    pub fn pointer_on_button(&self) -> bool {
        self.pointer_on_button
    }

    /*
     * Handles one message from the window procedure. Returns the hit-test
     * code when the message is claimed, `None` to let default processing run.
     * Runs inside the OS's synchronous window procedure, so it must neither
     * block nor fail.
     */
    pub fn handle_message(&mut self, message: &NativeMessage) -> Option<isize> {
        if message.msg != WM_NCHITTEST {
            return None;
        }
        if !self.button.is_visible() {
            return None;
        }

        let point = screen_point_from_lparam(message.lparam);
        // Without a geometry the point cannot be on the button.
        let Some((geometry, scaling)) = self.resolve_geometry() else {
            self.leave_button();
            return None;
        };

        if geometry.contains_screen_point(point, scaling) {
            if !self.pointer_on_button {
                self.set_pointer_on_button(true);
                log::debug!("SnapLayout: pointer entered maximize button");
            }
            // A press that is already underway must stay a plain client
            // press, otherwise the OS turns it into a snap gesture.
            let code = if self.pointer.is_primary_button_down() {
                HitTestCode::Client
            } else {
                HitTestCode::MaxButton
            };
            log::trace!("SnapLayout: answering hit test at {point:?} with {code:?}");
            Some(code.raw())
        } else {
            self.leave_button();
            None
        }
    }

    fn resolve_geometry(&self) -> Option<(ButtonGeometry, f64)> {
        let origin = self.button.screen_origin()?;
        let window = self.window.upgrade()?;
        let scaling = window.render_scaling();
        if scaling.is_nan() || scaling <= 0.0 {
            log::warn!("SnapLayout: ignoring hit test, window reports scaling {scaling}");
            return None;
        }
        Some((ButtonGeometry::new(self.button.rendered_size(), origin), scaling))
    }

    fn leave_button(&mut self) {
        if self.pointer_on_button {
            self.set_pointer_on_button(false);
            log::debug!("SnapLayout: pointer left maximize button");
        }
    }

    fn set_pointer_on_button(&mut self, on_button: bool) {
        self.pointer_on_button = on_button;
        if let Some(hover) = self.button.forced_hover() {
            hover.set_forced_hover_state(on_button);
        }
    }
}

impl fmt::Debug for SnapLayoutInterceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapLayoutInterceptor")
            .field("pointer_on_button", &self.pointer_on_button)
            .finish_non_exhaustive()
    }
}

/// An active interceptor hook for one button on one window.
#[derive(Clone)]
pub struct SnapLayoutRegistration {
    window_id: WindowId,
    hook_id: HookId,
    button: Rc<dyn ChromeButton>,
    release: Rc<ReleaseHandle>,
}

impl fmt::Debug for SnapLayoutRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapLayoutRegistration")
            .field("window_id", &self.window_id)
            .field("hook_id", &self.hook_id)
            .field("release", &self.release)
            .finish_non_exhaustive()
    }
}

impl SnapLayoutRegistration {
    /// Whether this hook serves `button` on the window `window_id`.
    pub fn serves(&self, window_id: WindowId, button: &Rc<dyn ChromeButton>) -> bool {
        self.window_id == window_id && Rc::ptr_eq(&self.button, button)
    }

    pub fn window_id(&self) -> WindowId {
        self.window_id
    }

    pub fn hook_id(&self) -> HookId {
        self.hook_id
    }

    pub fn is_active(&self) -> bool {
        !self.release.is_released()
    }

    /// The handle that unregisters the hook; shared with the owner's disposal list.
    pub fn release_handle(&self) -> Rc<ReleaseHandle> {
        Rc::clone(&self.release)
    }
}

/*
 * Registers a Snap Layout interceptor for `button` on `window`.
 * Fails closed: the caller gets an error to log, and nothing stays
 * registered on failure.
 */
pub fn enable_snap_layout(
    desktop: DesktopType,
    window: &Weak<dyn HostWindow>,
    button: &Rc<dyn ChromeButton>,
    pointer: &Rc<dyn PointerState>,
) -> ChromeResult<SnapLayoutRegistration> {
    if !desktop.supports_snap_layout() {
        return Err(ChromeError::PlatformUnsupported);
    }
    if button.forced_hover().is_none() {
        log::warn!("SnapLayout: maximize button exposes no forced hover state");
        return Err(ChromeError::CapabilityMissing);
    }
    let host = window.upgrade().ok_or_else(|| {
        log::warn!("SnapLayout: owning window not found");
        ChromeError::WindowUnresolved
    })?;

    log::debug!("SnapLayout: enabling Snap Layout for window {:?}", host.id());

    let mut interceptor =
        SnapLayoutInterceptor::new(Rc::clone(button), Weak::clone(window), Rc::clone(pointer));
    let hook_id = host
        .add_message_hook(Box::new(move |message| interceptor.handle_message(message)))
        .map_err(|err| {
            log::error!(
                "SnapLayout: hook registration failed for window {:?}: {err:?}",
                host.id()
            );
            match err {
                ChromeError::RegistrationFailed(_) => err,
                other => ChromeError::RegistrationFailed(other.to_string()),
            }
        })?;

    let window_id = host.id();
    log::debug!("SnapLayout: hook {hook_id:?} registered on window {window_id:?}");

    let release_target = Rc::downgrade(&host);
    let release = ReleaseHandle::new(
        format!("snap layout hook {} on window {}", hook_id.0, window_id.0),
        move || {
            let host = release_target
                .upgrade()
                .ok_or(ChromeError::WindowUnresolved)?;
            host.remove_message_hook(hook_id)?;
            log::debug!("SnapLayout: hook {hook_id:?} removed from window {window_id:?}");
            Ok(())
        },
    );

    Ok(SnapLayoutRegistration {
        window_id,
        hook_id,
        button: Rc::clone(button),
        release: Rc::new(release),
    })
}
