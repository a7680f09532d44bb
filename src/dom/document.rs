use crate::dom::element::{DomNode, ElementNode};
use crate::error::{Result, SnapshotError};
use serde::{Deserialize, Serialize};
use url::Url;

/// The live document a snapshot is taken from.
///
/// Passed to the pipeline as an explicit context object so definition lookup
/// (SVG symbols) never reaches for ambient global state, and so synthetic
/// trees can stand in for a real page in tests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Root of the document tree (typically the `<body>` element)
    pub root: DomNode,

    /// Base URL relative resource references resolve against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<Url>,
}

impl Document {
    /// Create a document from its root node
    pub fn new(root: DomNode) -> Self {
        Self { root, base_url: None }
    }

    /// Builder method: set the base URL
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Borrow the root element, if the root is an element node
    pub fn root_element(&self) -> Option<&ElementNode> {
        self.root.as_element()
    }

    /// Look up a definition element anywhere in the document by id.
    ///
    /// Used by the symbol resolver to pull `<symbol>`/`<defs>` templates a
    /// `<use>` reference points at but the cloned subtree does not contain.
    pub fn find_definition(&self, id: &str) -> Option<&ElementNode> {
        self.root_element()?.find_element_by_id(id)
    }

    /// Export the document as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }
}
