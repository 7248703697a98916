/*
 * Colour palette for the title bar. The chrome does not paint; backends
 * and hosts ask the theme which fill a caption button should have for its
 * current visual state.
 */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptionButton {
    Minimize,
    Maximize,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVisualState {
    #[default]
    Normal,
    Hovered,
    Pressed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleBarTheme {
    pub background: Color,
    pub foreground: Color,
    pub button_hover_background: Color,
    pub button_pressed_background: Color,
    pub close_hover_background: Color,
    pub close_pressed_background: Color,
}

impl Default for TitleBarTheme {
    fn default() -> Self {
        Self {
            background: Color::rgb(0x20, 0x20, 0x20),
            foreground: Color::rgb(0xFF, 0xFF, 0xFF),
            button_hover_background: Color::rgb(0x3A, 0x3A, 0x3A),
            button_pressed_background: Color::rgb(0x4A, 0x4A, 0x4A),
            close_hover_background: Color::rgb(0xE8, 0x11, 0x23),
            close_pressed_background: Color::rgb(0xF1, 0x70, 0x7A),
        }
    }
}

impl TitleBarTheme {
    pub fn button_background(&self, button: CaptionButton, state: ButtonVisualState) -> Color {
        match (button, state) {
            (_, ButtonVisualState::Normal) => self.background,
            (CaptionButton::Close, ButtonVisualState::Hovered) => self.close_hover_background,
            (CaptionButton::Close, ButtonVisualState::Pressed) => self.close_pressed_background,
            (_, ButtonVisualState::Hovered) => self.button_hover_background,
            (_, ButtonVisualState::Pressed) => self.button_pressed_background,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_button_uses_its_own_hover_colour() {
        let theme = TitleBarTheme::default();
        assert_eq!(
            theme.button_background(CaptionButton::Close, ButtonVisualState::Hovered),
            Color::rgb(0xE8, 0x11, 0x23)
        );
        assert_eq!(
            theme.button_background(CaptionButton::Maximize, ButtonVisualState::Hovered),
            theme.button_hover_background
        );
        assert_eq!(
            theme.button_background(CaptionButton::Minimize, ButtonVisualState::Normal),
            theme.background
        );
    }
}
