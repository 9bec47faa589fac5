// src/ui/layouts/mod.rs
//! Slot layout for the tray

pub mod container;

pub use container::{Container, LayoutError};
