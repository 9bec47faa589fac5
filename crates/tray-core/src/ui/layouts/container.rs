// src/ui/layouts/container.rs
//! Vertical slot container

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::Vec;
use thiserror_no_std::Error;

/// Errors raised while arranging children
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// The container reached its compile-time capacity
    #[error("Container full (capacity: {capacity})")]
    ContainerFull {
        /// Maximum number of children
        capacity: usize,
    },

    /// No child exists at the given index
    #[error("Invalid child index: {index}")]
    InvalidChildIndex {
        /// The invalid index
        index: usize,
    },
}

struct Slot {
    height: u32,
    bounds: Rectangle,
}

/// Stacks fixed-height slots top to bottom, each stretched to the
/// container's width. A zero-height slot takes no space.
///
/// The container computes bounds only; whoever owns the actual widgets
/// reads them back with [`Container::child_bounds`].
///
/// # Examples
/// ```ignore
/// let mut column = Container::<4>::new(Rectangle::new(Point::new(0, 120), Size::new(320, 0)));
/// let title = column.add_child(20)?;
/// let body = column.add_child(60)?;
/// column.set_height(title, 0)?; // body moves up
/// ```
pub struct Container<const N: usize> {
    bounds: Rectangle,
    children: Vec<Slot, N>,
    dirty: bool,
}

impl<const N: usize> Container<N> {
    pub fn new(bounds: Rectangle) -> Self {
        Self {
            bounds,
            children: Vec::new(),
            dirty: true,
        }
    }

    /// Append a slot and return its index.
    pub fn add_child(&mut self, height: u32) -> Result<usize, LayoutError> {
        self.children
            .push(Slot {
                height,
                bounds: Rectangle::zero(),
            })
            .map_err(|_| LayoutError::ContainerFull { capacity: N })?;
        self.layout();
        Ok(self.children.len() - 1)
    }

    /// Resize a slot; the slots below it follow.
    pub fn set_height(&mut self, index: usize, height: u32) -> Result<(), LayoutError> {
        let slot = self
            .children
            .get_mut(index)
            .ok_or(LayoutError::InvalidChildIndex { index })?;
        if slot.height != height {
            slot.height = height;
            self.layout();
        }
        Ok(())
    }

    pub fn child_bounds(&self, index: usize) -> Option<Rectangle> {
        self.children.get(index).map(|slot| slot.bounds)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Total height of all slots.
    pub fn content_extent(&self) -> u32 {
        self.children.iter().map(|slot| slot.height).sum()
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rectangle) {
        if self.bounds != bounds {
            self.bounds = bounds;
            self.layout();
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn layout(&mut self) {
        let width = self.bounds.size.width;
        let mut y = self.bounds.top_left.y;
        for slot in &mut self.children {
            let bounds = Rectangle::new(
                Point::new(self.bounds.top_left.x, y),
                Size::new(width, slot.height),
            );
            if slot.bounds != bounds {
                slot.bounds = bounds;
                self.dirty = true;
            }
            y += slot.height as i32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column() -> Container<3> {
        Container::new(Rectangle::new(Point::new(0, 100), Size::new(320, 140)))
    }

    #[test]
    fn test_children_stack_top_down() {
        let mut c = column();
        c.add_child(16).unwrap();
        c.add_child(40).unwrap();

        assert_eq!(
            c.child_bounds(0),
            Some(Rectangle::new(Point::new(0, 100), Size::new(320, 16)))
        );
        assert_eq!(
            c.child_bounds(1),
            Some(Rectangle::new(Point::new(0, 116), Size::new(320, 40)))
        );
        assert_eq!(c.content_extent(), 56);
    }

    #[test]
    fn test_collapsing_a_child_moves_followers_up() {
        let mut c = column();
        c.add_child(20).unwrap();
        c.add_child(30).unwrap();
        c.mark_clean();

        c.set_height(0, 0).unwrap();
        assert_eq!(c.child_bounds(1).map(|b| b.top_left.y), Some(100));
        assert_eq!(c.content_extent(), 30);
        assert!(c.is_dirty());
    }

    #[test]
    fn test_moving_the_container_moves_children() {
        let mut c = column();
        c.add_child(10).unwrap();
        c.set_bounds(Rectangle::new(Point::new(0, 50), Size::new(200, 10)));

        assert_eq!(
            c.child_bounds(0),
            Some(Rectangle::new(Point::new(0, 50), Size::new(200, 10)))
        );
    }

    #[test]
    fn test_capacity_is_enforced() {
        let mut c = column();
        for _ in 0..3 {
            c.add_child(1).unwrap();
        }
        assert_eq!(c.add_child(1), Err(LayoutError::ContainerFull { capacity: 3 }));
        assert_eq!(c.set_height(7, 4), Err(LayoutError::InvalidChildIndex { index: 7 }));
    }
}
