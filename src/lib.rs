//! hexpanel - Library for composing opcode icon panels
//!
//! This library provides functionality to:
//! - Parse instruction strings of two-digit hex codes
//! - Crop the matching cells from a 16x16 sprite sheet
//! - Paste the cells side by side into a single panel image

pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod output;
pub mod panel;
pub mod sheet;
pub mod token;

pub use error::PanelError;
pub use panel::{compose, ComposeOptions, Overflow};
pub use sheet::SpriteSheet;
pub use token::{parse_instructions, Token};
