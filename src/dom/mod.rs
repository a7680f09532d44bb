//! Document model for snapshot capture
//!
//! This module provides the in-process document tree the snapshot pipeline
//! operates on. It includes:
//! - DomNode / ElementNode: the tree itself, plus the live state (computed
//!   style, form values, pixel surfaces, nested frames, scroll offsets) the
//!   clone pipeline reads at capture time
//! - StyleMap / ComputedStyle: ordered inline declarations and captured
//!   computed style
//! - Matrix2d: 2D transform math for scroll compensation
//! - Document: the explicit lookup context for symbol definitions
//! - serialize: HTML output for finished snapshots

pub mod document;
pub mod element;
pub mod matrix;
pub mod serialize;
pub mod style;

pub use document::Document;
pub use element::{DomNode, ElementKind, ElementNode, FrameContent, PixelSurface};
pub use matrix::{Decomposed, Matrix2d};
pub use serialize::serialize_node;
pub use style::{ComputedStyle, StyleEntry, StyleMap};
