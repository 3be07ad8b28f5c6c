//! UI module for the board TUI

pub mod layout;
pub mod render;
pub mod theme;
