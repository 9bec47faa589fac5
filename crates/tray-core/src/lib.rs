//! Hardware-independent core library for tray-rs
//!
//! This crate contains the platform-agnostic pieces of the tray design
//! system: the touch/draw UI primitives, the styling system, and the modal
//! bottom tray (background composition, drag handle, content slots, sheet
//! behavior and the presenting orchestrator).
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod framebuffer;
pub mod tray;
pub mod ui;
