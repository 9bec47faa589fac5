//! Padding around text and button content

/// Padding around an element, in pixels
///
/// # Examples
///
/// ```ignore
/// let p = Padding::symmetric(8, 16);
/// assert_eq!(p.horizontal(), 32);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Padding {
    /// Same padding above and below, and the same left and right.
    pub fn symmetric(vertical: u32, horizontal: u32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    pub fn horizontal(&self) -> u32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> u32 {
        self.top + self.bottom
    }
}
