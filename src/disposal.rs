/*
 * Deterministic teardown for native resources acquired by a control.
 *
 * Every acquisition hands back a `ReleaseHandle`. The owning control keeps
 * them in a `DisposalList` and runs them on its explicit close path. A
 * handle releases at most once no matter how many owners hold it, and
 * dropping a handle or the list does not release anything.
 */

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::Result as ChromeResult;

type ReleaseAction = Box<dyn FnOnce() -> ChromeResult<()>>;

pub struct ReleaseHandle {
    label: String,
    action: RefCell<Option<ReleaseAction>>,
}

impl ReleaseHandle {
    pub fn new(label: impl Into<String>, action: impl FnOnce() -> ChromeResult<()> + 'static) -> Self {
        Self {
            label: label.into(),
            action: RefCell::new(Some(Box::new(action))),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_released(&self) -> bool {
        self.action.borrow().is_none()
    }

    /// Runs the release action if it has not run yet.
    pub fn release(&self) -> ChromeResult<()> {
        // Take before calling so a re-entrant release sees the handle as spent.
        let action = self.action.borrow_mut().take();
        match action {
            Some(action) => action(),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for ReleaseHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReleaseHandle")
            .field("label", &self.label)
            .field("released", &self.is_released())
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct DisposalList {
    pending: Vec<Rc<ReleaseHandle>>,
}

impl DisposalList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, handle: Rc<ReleaseHandle>) {
        self.pending.push(handle);
    }

    /// Drops handles that were already released through another owner.
    pub fn prune_released(&mut self) {
        self.pending.retain(|handle| !handle.is_released());
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /*
     * Releases every pending handle in insertion order. A failing handle is
     * logged and skipped so the remaining ones still run. The list is empty
     * afterwards. Returns how many releases failed.
     */
    pub fn dispose_all(&mut self) -> usize {
        let mut failures = 0;
        for handle in self.pending.drain(..) {
            match handle.release() {
                Ok(()) => log::debug!("Disposal: released '{}'", handle.label()),
                Err(err) => {
                    failures += 1;
                    log::warn!("Disposal: releasing '{}' failed: {err}", handle.label());
                }
            }
        }
        failures
    }
}
