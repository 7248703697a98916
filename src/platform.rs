/*
 * Desktop platform detection. The answer is computed once per process and
 * never changes afterwards, so any thread may read it freely.
 */

use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DesktopType {
    Windows,
    Linux,
    MacOs,
    FreeBsd,
    Unknown,
}

impl DesktopType {
    /// True when the window manager delivers non-client hit-test messages
    /// that drive the Snap Layout flyout.
    pub fn supports_snap_layout(self) -> bool {
        self == DesktopType::Windows
    }
}

static DETECTED_PLATFORM: OnceLock<DesktopType> = OnceLock::new();

fn probe_platform() -> DesktopType {
    if cfg!(target_os = "windows") {
        DesktopType::Windows
    } else if cfg!(target_os = "linux") {
        DesktopType::Linux
    } else if cfg!(target_os = "macos") {
        DesktopType::MacOs
    } else if cfg!(target_os = "freebsd") {
        DesktopType::FreeBsd
    } else {
        DesktopType::Unknown
    }
}

/// Returns the desktop platform this process runs on.
pub fn detect_platform() -> DesktopType {
    *DETECTED_PLATFORM.get_or_init(|| {
        let detected = probe_platform();
        log::debug!("Platform: detected desktop type {detected:?}");
        detected
    })
}

pub fn supports_snap_layout() -> bool {
    detect_platform().supports_snap_layout()
}
