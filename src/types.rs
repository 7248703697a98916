/*
 * Platform-agnostic types shared by the interceptor, the title bar and the
 * Win32 backend. Values mirror the Win32 window message protocol so the
 * hit-test logic can be exercised on every platform.
 */

/// Non-client hit-test request.
pub const WM_NCHITTEST: u32 = 0x0084;
/// Hit-test result: ordinary client area.
pub const HTCLIENT: isize = 1;
/// Hit-test result: the system maximize button.
pub const HTMAXBUTTON: isize = 9;

/// Identifies a host window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub usize);

/// Identifies one message hook registered on a host window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HookId(pub usize);

/// A raw window message as seen by a message hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeMessage {
    pub msg: u32,
    pub wparam: usize,
    pub lparam: isize,
}

impl NativeMessage {
    pub fn new(msg: u32, wparam: usize, lparam: isize) -> Self {
        Self {
            msg,
            wparam,
            lparam,
        }
    }

    /// Builds a `WM_NCHITTEST` carrying the given screen coordinate.
    pub fn hit_test(point: PixelPoint) -> Self {
        Self::new(WM_NCHITTEST, 0, point.to_lparam())
    }
}

/// Answer returned to the window manager for a handled hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTestCode {
    Client,
    MaxButton,
}

impl HitTestCode {
    pub fn raw(self) -> isize {
        match self {
            HitTestCode::Client => HTCLIENT,
            HitTestCode::MaxButton => HTMAXBUTTON,
        }
    }
}

/// A screen coordinate in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Packs the point the way the window manager does: X in the low word,
    /// Y in the high word, each truncated to 16 bits.
    pub fn to_lparam(self) -> isize {
        let low = self.x as i16 as u16 as u32;
        let high = self.y as i16 as u16 as u32;
        (low | (high << 16)) as i32 as isize
    }
}

/// A point in logical (DPI independent) units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle. Containment includes the origin edges and
/// excludes the far edges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn from_size(size: Size) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: size.width,
            height: size.height,
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }
}

/// Margin around window content, in logical units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Thickness {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Thickness {
    pub fn uniform(value: f64) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowState {
    #[default]
    Normal,
    Maximized,
    Minimized,
}

impl WindowState {
    /// State reached by the maximize/restore toggle.
    pub fn toggled_maximize(self) -> Self {
        if self == WindowState::Maximized {
            WindowState::Normal
        } else {
            WindowState::Maximized
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
    Pen,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_excludes_far_edges() {
        let rect = Rect::from_size(Size::new(40.0, 30.0));
        assert!(rect.contains(Point::new(0.0, 0.0)));
        assert!(rect.contains(Point::new(39.9, 29.9)));
        assert!(!rect.contains(Point::new(40.0, 10.0)));
        assert!(!rect.contains(Point::new(10.0, 30.0)));
        assert!(!rect.contains(Point::new(-0.1, 10.0)));
    }

    #[test]
    fn maximize_toggle_restores_only_from_maximized() {
        assert_eq!(
            WindowState::Normal.toggled_maximize(),
            WindowState::Maximized
        );
        assert_eq!(
            WindowState::Maximized.toggled_maximize(),
            WindowState::Normal
        );
        assert_eq!(
            WindowState::Minimized.toggled_maximize(),
            WindowState::Maximized
        );
    }

    #[test]
    fn hit_test_codes_match_win32_values() {
        assert_eq!(HitTestCode::Client.raw(), 1);
        assert_eq!(HitTestCode::MaxButton.raw(), 9);
    }

    #[test]
    fn negative_coordinates_pack_into_sixteen_bit_words() {
        let lparam = PixelPoint::new(-1, 2).to_lparam();
        assert_eq!(lparam & 0xFFFF, 0xFFFF);
        assert_eq!((lparam >> 16) & 0xFFFF, 2);
    }
}
