//! Collaborator contracts consumed by the snapshot pipeline
//!
//! Fetching, caching, CSS URL-token rewriting, mime classification, and
//! pseudo-element reproduction all live outside the core; this module defines
//! the traits the pipeline calls them through, the inline-resource
//! representation they produce, and the trivial defaults used when a caller
//! has nothing to plug in.

use crate::dom::element::ElementNode;
use crate::error::Result;
use crate::snapshot::config::SnapshotOptions;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use url::Url;

/// A fetched resource ready for inline embedding
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InlineResource {
    /// Resource content type (e.g. "image/png")
    pub mime_type: String,

    /// Base64-encoded payload
    pub data: String,
}

impl InlineResource {
    /// Create a resource from an already-encoded payload
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self { mime_type: mime_type.into(), data: data.into() }
    }

    /// Create a resource by encoding raw bytes
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self { mime_type: mime_type.into(), data: STANDARD.encode(bytes) }
    }

    /// Render as a `data:` URL
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// Whether a URL is already an inline `data:` URL.
///
/// Inline references are invariant: the pipeline never re-resolves them.
pub fn is_data_url(url: &str) -> bool {
    url.trim_start().starts_with("data:")
}

/// Split a base64 `data:` URL into mime type and decoded payload.
///
/// Returns `None` for anything that is not a well-formed base64 data URL.
pub fn parse_data_url(url: &str) -> Option<(String, Vec<u8>)> {
    let rest = url.trim_start().strip_prefix("data:")?;
    let comma = rest.find(',')?;
    let header = &rest[..comma];
    let payload = &rest[comma + 1..];
    let mime_type = header.strip_suffix(";base64")?;
    let bytes = STANDARD.decode(payload.trim()).ok()?;
    Some((mime_type.to_string(), bytes))
}

/// Fetches an external resource and returns it in inline form.
///
/// The pipeline treats this as at-least-once-attempted, best-effort: a
/// failure rejects the enclosing embedding operation, and the caller of the
/// top-level walk decides whether to swallow or abort.
#[async_trait]
pub trait ResourceResolver: Send + Sync {
    /// Resolve `url` into an inline resource, using `mime_hint` when the
    /// transport does not declare a content type
    async fn resolve(&self, url: &str, mime_hint: &str) -> Result<InlineResource>;
}

/// Rewrites every external URL token inside a CSS property value to an
/// inline representation.
///
/// Finding URL tokens in arbitrary CSS is the collaborator's job; the
/// pipeline only routes property values through it and writes results back.
#[async_trait]
pub trait CssUrlRewriter: Send + Sync {
    /// Rewrite `css_value`, resolving relative references against `base_url`
    async fn rewrite(&self, css_value: &str, base_url: Option<&Url>) -> Result<String>;
}

/// Pure, synchronous content-type classification from a URL
pub trait MimeSniffer: Send + Sync {
    fn classify(&self, url: &str) -> String;
}

/// Reproduces `::before`/`::after` generated content on a cloned element
#[async_trait]
pub trait PseudoElementCloner: Send + Sync {
    /// Copy pseudo-element style/content from `original` onto `clone`
    async fn apply(
        &self,
        original: &ElementNode,
        clone: &mut ElementNode,
        options: &SnapshotOptions,
    ) -> Result<()>;
}

/// Default pseudo-element collaborator: does nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPseudoCloner;

#[async_trait]
impl PseudoElementCloner for NoopPseudoCloner {
    async fn apply(
        &self,
        _original: &ElementNode,
        _clone: &mut ElementNode,
        _options: &SnapshotOptions,
    ) -> Result<()> {
        Ok(())
    }
}

/// Default sniffer: classifies everything as an opaque byte stream
#[derive(Debug, Default, Clone, Copy)]
pub struct OctetStreamSniffer;

impl MimeSniffer for OctetStreamSniffer {
    fn classify(&self, _url: &str) -> String {
        "application/octet-stream".to_string()
    }
}
