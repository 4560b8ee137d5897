use serde::{Deserialize, Serialize};

/// Size of the selection dialog, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: u16,
    pub height: u16,
}

impl WindowSize {
    #[must_use]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Region of the screen the dialog may occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenArea {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl ScreenArea {
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Where the dialog ends up on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: u16,
    pub y: u16,
    pub size: WindowSize,
}

/// Clamp `size` to the screen and center it.
pub fn place(size: WindowSize, screen: ScreenArea) -> Placement {
    let size = WindowSize::new(size.width.min(screen.width), size.height.min(screen.height));
    Placement {
        x: screen.x + (screen.width - size.width) / 2,
        y: screen.y + (screen.height - size.height) / 2,
        size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centers_within_screen() {
        let placement = place(WindowSize::new(40, 10), ScreenArea::new(0, 0, 100, 30));
        assert_eq!(placement.x, 30);
        assert_eq!(placement.y, 10);
        assert_eq!(placement.size, WindowSize::new(40, 10));
    }

    #[test]
    fn clamps_oversized_windows() {
        let placement = place(WindowSize::new(200, 80), ScreenArea::new(5, 2, 120, 40));
        assert_eq!(placement.size, WindowSize::new(120, 40));
        assert_eq!((placement.x, placement.y), (5, 2));
    }
}
