use crate::dom::element::DomNode;
use std::fmt;
use std::sync::Arc;

/// Caller-supplied predicate deciding whether a node (and its whole subtree)
/// is included in the snapshot. Never consulted for the root node.
pub type NodeFilter = Arc<dyn Fn(&DomNode) -> bool + Send + Sync>;

/// Options consumed by the snapshot pipeline
///
/// Resource-layer options (quality, size limits, cache policy) belong to the
/// resolver collaborator, not here.
#[derive(Clone, Default)]
pub struct SnapshotOptions {
    /// Subtree exclusion predicate; `false` drops the node and everything
    /// under it
    pub filter: Option<NodeFilter>,

    /// Compensate scrolled containers by translating their children to the
    /// positions they were rendered at
    pub patch_scroll: bool,
}

impl SnapshotOptions {
    /// Create options with defaults (no filter, no scroll compensation)
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the exclusion filter
    pub fn with_filter(mut self, filter: impl Fn(&DomNode) -> bool + Send + Sync + 'static) -> Self {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Builder method: enable or disable scroll compensation
    pub fn patch_scroll(mut self, enabled: bool) -> Self {
        self.patch_scroll = enabled;
        self
    }

    /// Whether the filter accepts `node` (absent filter accepts everything)
    pub fn accepts(&self, node: &DomNode) -> bool {
        self.filter.as_ref().is_none_or(|filter| filter(node))
    }
}

impl fmt::Debug for SnapshotOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotOptions")
            .field("filter", &self.filter.as_ref().map(|_| "<predicate>"))
            .field("patch_scroll", &self.patch_scroll)
            .finish()
    }
}
