//! Resource-embedding pipeline
//!
//! Walks a cloned subtree and rewrites every external URL it can reach —
//! image sources and CSS background/mask references — into inline data URLs,
//! so the snapshot renders without network access.
//!
//! Unlike the structural pipeline, the walk is fully parallel per subtree:
//! sibling subtrees have no dependency on each other, so they embed
//! concurrently and the parent joins all of them before reporting itself
//! complete. A failed embedding rejects through that join; nothing is
//! swallowed here.

pub(crate) mod image;
pub(crate) mod style;

use crate::dom::element::DomNode;
use crate::error::Result;
use crate::resolve::{CssUrlRewriter, MimeSniffer, ResourceResolver};
use futures::future::{try_join_all, BoxFuture};
use url::Url;

/// Collaborators and settings for one embedding walk
pub(crate) struct EmbedCtx<'a> {
    pub(crate) resolver: &'a dyn ResourceResolver,
    pub(crate) rewriter: &'a dyn CssUrlRewriter,
    pub(crate) sniffer: &'a dyn MimeSniffer,
    pub(crate) base_url: Option<&'a Url>,
}

/// Embed every external resource reachable from `node`, recursively.
///
/// Non-element nodes are untouched. For an element: CSS background/mask
/// values first, then the element's own image source, then all children
/// concurrently (fan-out), awaited together before returning (fan-in).
pub(crate) fn embed_node<'a>(ctx: &'a EmbedCtx<'a>, node: &'a mut DomNode) -> BoxFuture<'a, Result<()>> {
    Box::pin(async move {
        let DomNode::Element(element) = node else {
            return Ok(());
        };
        style::embed_background(ctx, element).await?;
        image::embed_image_node(ctx, element).await?;
        try_join_all(element.children.iter_mut().map(|child| embed_node(ctx, child))).await?;
        Ok(())
    })
}
