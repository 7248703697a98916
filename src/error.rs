/*
 * Error taxonomy for the chrome layer. None of these errors cross the
 * control boundary: the title bar logs them and degrades to "no Snap Layout
 * affordance" while minimize/maximize/close/drag keep working.
 */

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChromeError {
    /// The running OS never delivers `WM_NCHITTEST`; the interceptor stays inactive.
    #[error("Snap Layout interception is not supported on this platform")]
    PlatformUnsupported,
    #[error("control does not expose a forced hover state")]
    CapabilityMissing,
    #[error("owning window could not be resolved")]
    WindowUnresolved,
    #[error("native message hook registration failed: {0}")]
    RegistrationFailed(String),
    #[error("release action failed: {0}")]
    DisposalFailed(String),
    #[cfg(target_os = "windows")]
    #[error("Win32 call failed: {0}")]
    Win32(#[from] windows::core::Error),
}

pub type Result<T> = std::result::Result<T, ChromeError>;
