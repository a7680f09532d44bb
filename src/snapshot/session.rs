use crate::cloner::{self, CloneCtx};
use crate::dom::document::Document;
use crate::dom::element::DomNode;
use crate::embed::{self, EmbedCtx};
use crate::error::Result;
use crate::resolve::{
    CssUrlRewriter, MimeSniffer, NoopPseudoCloner, OctetStreamSniffer, PseudoElementCloner,
    ResourceResolver,
};
use crate::snapshot::config::SnapshotOptions;
use std::sync::Arc;

/// Snapshot facade owning the collaborator set.
///
/// Composes the two traversal engines: [`Snapshotter::clone_subtree`] runs
/// the structural clone-and-decorate pipeline, [`Snapshotter::embed_resources`]
/// runs the resource-embedding walk over a clone, and
/// [`Snapshotter::capture`] chains the two into a fully self-contained
/// snapshot.
pub struct Snapshotter {
    resolver: Arc<dyn ResourceResolver>,
    rewriter: Arc<dyn CssUrlRewriter>,
    sniffer: Arc<dyn MimeSniffer>,
    pseudo: Arc<dyn PseudoElementCloner>,
}

impl Snapshotter {
    /// Create a snapshotter from the two mandatory collaborators.
    ///
    /// The mime sniffer defaults to octet-stream classification and the
    /// pseudo-element cloner to a no-op; both can be swapped with the
    /// builder methods.
    pub fn new(resolver: Arc<dyn ResourceResolver>, rewriter: Arc<dyn CssUrlRewriter>) -> Self {
        Self {
            resolver,
            rewriter,
            sniffer: Arc::new(OctetStreamSniffer),
            pseudo: Arc::new(NoopPseudoCloner),
        }
    }

    /// Builder method: use a custom mime sniffer
    pub fn with_mime_sniffer(mut self, sniffer: Arc<dyn MimeSniffer>) -> Self {
        self.sniffer = sniffer;
        self
    }

    /// Builder method: use a custom pseudo-element cloner
    pub fn with_pseudo_cloner(mut self, pseudo: Arc<dyn PseudoElementCloner>) -> Self {
        self.pseudo = pseudo;
        self
    }

    /// Clone a subtree of `document` into a disconnected, decorated copy.
    ///
    /// `node` is the clone root (usually `document.root`, but any node of
    /// the document works — the document itself stays available as the
    /// lookup context for symbol definitions living outside the subtree).
    /// Child order is preserved exactly; the caller's filter is applied to
    /// every node except the root. The result still references external
    /// resources — run [`Snapshotter::embed_resources`] to inline them.
    pub async fn clone_subtree(
        &self,
        document: &Document,
        node: &DomNode,
        options: &SnapshotOptions,
    ) -> Result<DomNode> {
        let ctx = CloneCtx {
            document,
            resolver: self.resolver.as_ref(),
            rewriter: self.rewriter.as_ref(),
            sniffer: self.sniffer.as_ref(),
            pseudo: self.pseudo.as_ref(),
            options,
        };
        let cloned = match node {
            DomNode::Element(element) => {
                DomNode::Element(cloner::clone_element(&ctx, element, true).await?)
            }
            other => other.clone(),
        };
        log::debug!("cloned subtree of {} node(s)", cloned.count_nodes());
        Ok(cloned)
    }

    /// Inline every external resource reachable from `node`.
    ///
    /// Descendant subtrees embed concurrently; the call returns once all of
    /// them finish. The first failure rejects the walk — whether to swallow
    /// individual failures is the caller's decision, not this crate's.
    pub async fn embed_resources(&self, node: &mut DomNode, base_url: Option<&url::Url>) -> Result<()> {
        let ctx = EmbedCtx {
            resolver: self.resolver.as_ref(),
            rewriter: self.rewriter.as_ref(),
            sniffer: self.sniffer.as_ref(),
            base_url,
        };
        embed::embed_node(&ctx, node).await
    }

    /// Capture a fully self-contained snapshot of the whole document root:
    /// clone, then embed.
    pub async fn capture(&self, document: &Document, options: &SnapshotOptions) -> Result<DomNode> {
        self.capture_node(document, &document.root, options).await
    }

    /// Capture a fully self-contained snapshot of one subtree of `document`
    pub async fn capture_node(
        &self,
        document: &Document,
        node: &DomNode,
        options: &SnapshotOptions,
    ) -> Result<DomNode> {
        let mut snapshot = self.clone_subtree(document, node, options).await?;
        self.embed_resources(&mut snapshot, document.base_url.as_ref()).await?;
        log::debug!("captured self-contained snapshot of {} node(s)", snapshot.count_nodes());
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::element::ElementNode;
    use crate::error::SnapshotError;
    use crate::resolve::InlineResource;
    use async_trait::async_trait;
    use url::Url;

    struct StaticResolver;

    #[async_trait]
    impl ResourceResolver for StaticResolver {
        async fn resolve(&self, _url: &str, mime_hint: &str) -> Result<InlineResource> {
            Ok(InlineResource::from_bytes(mime_hint, b"payload"))
        }
    }

    struct PassthroughRewriter;

    #[async_trait]
    impl CssUrlRewriter for PassthroughRewriter {
        async fn rewrite(&self, css_value: &str, _base_url: Option<&Url>) -> Result<String> {
            Ok(css_value.to_string())
        }
    }

    fn snapshotter() -> Snapshotter {
        Snapshotter::new(Arc::new(StaticResolver), Arc::new(PassthroughRewriter))
    }

    #[tokio::test]
    async fn test_clone_subtree_preserves_structure() {
        let document = Document::new(DomNode::element(ElementNode::new("div").with_children(vec![
            DomNode::element(ElementNode::new("span").with_text("a")),
            DomNode::text("b"),
        ])));

        let clone = snapshotter()
            .clone_subtree(&document, &document.root, &SnapshotOptions::new())
            .await
            .expect("clone");

        let root = clone.as_element().expect("element root");
        assert_eq!(root.tag_name, "div");
        assert_eq!(root.children.len(), 2);
    }

    #[tokio::test]
    async fn test_clone_subtree_of_text_root() {
        let document = Document::new(DomNode::text("just text"));
        let clone = snapshotter()
            .clone_subtree(&document, &document.root, &SnapshotOptions::new())
            .await
            .expect("clone");
        assert_eq!(clone, DomNode::text("just text"));
    }

    #[tokio::test]
    async fn test_capture_embeds_image_sources() {
        let document = Document::new(DomNode::element(
            ElementNode::new("img").with_attribute("src", "https://example.com/a.bin"),
        ));

        let snapshot = snapshotter()
            .capture(&document, &SnapshotOptions::new())
            .await
            .expect("capture");

        let image = snapshot.as_element().expect("element root");
        let src = image.get_attribute("src").expect("src");
        assert!(src.starts_with("data:application/octet-stream;base64,"));
    }

    #[tokio::test]
    async fn test_capture_propagates_resolver_failure() {
        struct FailingResolver;

        #[async_trait]
        impl ResourceResolver for FailingResolver {
            async fn resolve(&self, url: &str, _mime_hint: &str) -> Result<InlineResource> {
                Err(SnapshotError::ResourceFetchFailed {
                    url: url.to_string(),
                    reason: "offline".to_string(),
                })
            }
        }

        let snapshotter =
            Snapshotter::new(Arc::new(FailingResolver), Arc::new(PassthroughRewriter));
        let document = Document::new(DomNode::element(
            ElementNode::new("img").with_attribute("src", "https://example.com/a.png"),
        ));

        let result = snapshotter.capture(&document, &SnapshotOptions::new()).await;
        assert!(matches!(result, Err(SnapshotError::ResourceFetchFailed { .. })));
    }
}
