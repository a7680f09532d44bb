//! Structural clone-and-decorate pipeline
//!
//! Reproduces a live node's visual state into a disconnected copy:
//! - structural: element-kind-specific cloning strategies (canvas, video,
//!   iframe, default)
//! - children: child-source resolution and strictly ordered child cloning
//! - decorate: computed style, form state, pseudo elements, scroll
//!   compensation
//! - symbols: SVG symbol definitions referenced by `<use>`
//!
//! The orchestrator composes the stages into one recursive clone operation.
//! Resource embedding is a separate pass (see [`crate::embed`]).

pub(crate) mod children;
pub(crate) mod decorate;
pub(crate) mod structural;
pub(crate) mod symbols;

use crate::dom::document::Document;
use crate::dom::element::{DomNode, ElementNode};
use crate::error::Result;
use crate::resolve::{CssUrlRewriter, MimeSniffer, PseudoElementCloner, ResourceResolver};
use crate::snapshot::config::SnapshotOptions;
use futures::future::BoxFuture;

/// Everything a clone operation needs, passed explicitly so the pipeline
/// never touches ambient state and synthetic documents work in tests
pub(crate) struct CloneCtx<'a> {
    pub(crate) document: &'a Document,
    pub(crate) resolver: &'a dyn ResourceResolver,
    pub(crate) rewriter: &'a dyn CssUrlRewriter,
    pub(crate) sniffer: &'a dyn MimeSniffer,
    pub(crate) pseudo: &'a dyn PseudoElementCloner,
    pub(crate) options: &'a SnapshotOptions,
}

/// Clone a node, returning `None` when the caller's filter excludes it.
///
/// The filter is never consulted for the root of a clone operation.
pub(crate) fn clone_node<'a>(
    ctx: &'a CloneCtx<'a>,
    node: &'a DomNode,
    is_root: bool,
) -> BoxFuture<'a, Result<Option<DomNode>>> {
    Box::pin(async move {
        if !is_root && !ctx.options.accepts(node) {
            return Ok(None);
        }
        match node {
            DomNode::Text(text) => Ok(Some(DomNode::Text(text.clone()))),
            DomNode::Comment(comment) => Ok(Some(DomNode::Comment(comment.clone()))),
            DomNode::Element(element) => {
                let cloned = clone_element(ctx, element, is_root).await?;
                Ok(Some(DomNode::Element(cloned)))
            }
        }
    })
}

/// Run the full clone pipeline over a single element subtree.
///
/// Sibling order is preserved by the child stage; the symbol pass runs only
/// at clone roots, after the whole subtree exists.
pub(crate) fn clone_element<'a>(
    ctx: &'a CloneCtx<'a>,
    element: &'a ElementNode,
    is_root: bool,
) -> BoxFuture<'a, Result<ElementNode>> {
    Box::pin(async move {
        let mut cloned = structural::clone_single_element(ctx, element).await;
        children::clone_children(ctx, element, &mut cloned).await?;
        decorate::decorate(ctx, element, &mut cloned).await?;
        if is_root {
            symbols::ensure_svg_symbols(ctx, &mut cloned).await?;
        }
        Ok(cloned)
    })
}
