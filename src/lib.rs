//! # dom-snapshot
//!
//! A Rust library for capturing self-contained, static snapshots of live DOM
//! subtrees: every node is cloned with its visual state, and every external
//! resource the subtree references is inlined as embedded data, so the
//! result renders or serializes without further network access.
//!
//! ## Features
//!
//! - **Structural cloning**: element-kind-aware strategies reproduce canvas
//!   content, video frames and posters, and accessible iframe documents as
//!   part of a disconnected copy
//! - **Decoration**: computed style, live form values, select state,
//!   pseudo-element delegation, and optional scroll-position compensation
//! - **Resource embedding**: image sources and CSS background/mask
//!   references rewritten to `data:` URLs, concurrently per subtree
//! - **Symbol resolution**: SVG `<use>` references pull their missing
//!   definitions into a hidden, deduplicated `<defs>` container
//! - **Pluggable collaborators**: fetching, CSS URL rewriting, mime
//!   classification, and pseudo-element reproduction are traits the caller
//!   implements
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dom_snapshot::{Document, DomNode, ElementNode, SnapshotOptions, Snapshotter};
//! use dom_snapshot::{CssUrlRewriter, InlineResource, ResourceResolver};
//! use async_trait::async_trait;
//! use std::sync::Arc;
//! use url::Url;
//!
//! struct Fetcher;
//!
//! #[async_trait]
//! impl ResourceResolver for Fetcher {
//!     async fn resolve(&self, url: &str, mime_hint: &str) -> dom_snapshot::Result<InlineResource> {
//!         // fetch `url` however the application likes
//!         Ok(InlineResource::from_bytes(mime_hint, &[]))
//!     }
//! }
//!
//! struct Rewriter;
//!
//! #[async_trait]
//! impl CssUrlRewriter for Rewriter {
//!     async fn rewrite(&self, css_value: &str, _base_url: Option<&Url>) -> dom_snapshot::Result<String> {
//!         Ok(css_value.to_string())
//!     }
//! }
//!
//! # async fn run() -> dom_snapshot::Result<()> {
//! let document = Document::new(DomNode::element(
//!     ElementNode::new("div").with_text("hello"),
//! ));
//!
//! let snapshotter = Snapshotter::new(Arc::new(Fetcher), Arc::new(Rewriter));
//! let snapshot = snapshotter.capture(&document, &SnapshotOptions::new()).await?;
//! println!("{}", dom_snapshot::serialize_node(&snapshot));
//! # Ok(())
//! # }
//! ```
//!
//! ## Pipeline
//!
//! Capture runs the two engines in sequence: the structural pipeline clones
//! children strictly in order (output shape must be deterministic), then the
//! embedding walk fans out over the clone concurrently (resource order is
//! irrelevant, only completion is). Iframe access failures degrade to
//! placeholders; resource and image-load failures propagate to the caller.
//!
//! ## Module Overview
//!
//! - [`dom`]: document model — nodes, styles, transforms, serialization
//! - [`resolve`]: collaborator contracts and the inline-resource type
//! - [`snapshot`]: the `Snapshotter` facade and capture options
//! - [`error`]: error types and result alias

pub mod dom;
pub mod error;
pub mod resolve;
pub mod snapshot;

pub(crate) mod cloner;
pub(crate) mod embed;

pub use dom::{
    ComputedStyle, Document, DomNode, ElementKind, ElementNode, FrameContent, Matrix2d,
    PixelSurface, StyleMap,
};
pub use dom::serialize::serialize_node;
pub use error::{Result, SnapshotError};
pub use resolve::{
    is_data_url, parse_data_url, CssUrlRewriter, InlineResource, MimeSniffer, NoopPseudoCloner,
    OctetStreamSniffer, PseudoElementCloner, ResourceResolver,
};
pub use snapshot::{NodeFilter, SnapshotOptions, Snapshotter};
