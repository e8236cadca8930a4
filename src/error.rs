//! Error types for loading sprite sheets and composing panels

use std::path::PathBuf;

use thiserror::Error;

use crate::sheet::CellRect;
use crate::token::{Token, TokenError};

/// Error raised while loading a sheet, cropping a cell, or composing a panel.
#[derive(Debug, Error)]
pub enum PanelError {
    /// Sprite sheet file is missing or cannot be decoded
    #[error("Failed to load sprite sheet '{}': {source}", path.display())]
    SheetLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// Sheet is too small to hold a grid of non-empty frames
    #[error("Sprite sheet ({width}x{height}) is too small for a {grid}x{grid} grid")]
    SheetTooSmall { width: u32, height: u32, grid: u32 },
    /// Grid size must be at least one cell per axis
    #[error("Grid size must be at least 1")]
    EmptyGrid,
    /// Extended panel would exceed the allocation limit
    #[error("{cells} cells of {frame_width}px exceed the maximum panel width of {max}px")]
    PanelTooWide { cells: usize, frame_width: u32, max: u32 },
    /// Malformed instruction token
    #[error(transparent)]
    Token(#[from] TokenError),
    /// Cell bounds computed for a token fall outside the sheet
    #[error("Cell for token {token} at ({}, {})-({}, {}) exceeds sheet bounds {sheet_w}x{sheet_h}", rect.x, rect.y, rect.right(), rect.bottom(), sheet_w = sheet_size.0, sheet_h = sheet_size.1)]
    CellOutOfBounds { token: Token, rect: CellRect, sheet_size: (u32, u32) },
}
