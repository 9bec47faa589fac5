// src/ui/components/mod.rs
//! UI components library

pub mod button;
pub mod footer;
pub mod text;

pub use button::Button;
pub use footer::{FOOTER_HEIGHT_PX, Footer, FooterButton, FooterListener, FooterType};
pub use text::{MultiLineText, TextComponent, TextSize};
