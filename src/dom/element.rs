use crate::dom::style::{ComputedStyle, StyleMap};
use crate::error::{Result, SnapshotError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A node in the document tree.
///
/// Only elements carry structure and live state; text and comment nodes are
/// opaque and are cloned verbatim by the snapshot pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum DomNode {
    /// An element with tag, attributes, style, and children
    Element(ElementNode),

    /// A text node
    Text(String),

    /// A comment node
    Comment(String),
}

impl DomNode {
    /// Shorthand for wrapping an element
    pub fn element(element: ElementNode) -> Self {
        Self::Element(element)
    }

    /// Shorthand for a text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Borrow the inner element, if this is an element node
    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Mutably borrow the inner element, if this is an element node
    pub fn as_element_mut(&mut self) -> Option<&mut ElementNode> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Count this node and every descendant
    pub fn count_nodes(&self) -> usize {
        match self {
            Self::Element(element) => {
                1 + element.children.iter().map(DomNode::count_nodes).sum::<usize>()
            }
            _ => 1,
        }
    }

    /// Export this subtree as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Import a subtree previously exported with [`DomNode::to_json`]
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }
}

/// Element kinds that get dedicated handling in the snapshot pipeline.
///
/// Derived from the tag name at dispatch time; each kind is an independent
/// cloning strategy, not a class hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Canvas,
    Video,
    IFrame,
    /// Raster `<img>`
    Image,
    /// SVG `<image>`
    SvgImage,
    /// SVG `<use>`
    SvgUse,
    TextArea,
    Input,
    Select,
    Slot,
    Generic,
}

impl ElementKind {
    /// Classify a tag name (ASCII case-insensitive)
    pub fn from_tag(tag_name: &str) -> Self {
        match tag_name.to_ascii_lowercase().as_str() {
            "canvas" => Self::Canvas,
            "video" => Self::Video,
            "iframe" => Self::IFrame,
            "img" => Self::Image,
            "image" => Self::SvgImage,
            "use" => Self::SvgUse,
            "textarea" => Self::TextArea,
            "input" => Self::Input,
            "select" => Self::Select,
            "slot" => Self::Slot,
            _ => Self::Generic,
        }
    }
}

/// The RGBA raster a canvas or playing video exposes at snapshot time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PixelSurface {
    pub width: u32,
    pub height: u32,

    /// Row-major RGBA8 pixel data, `width * height * 4` bytes
    pub pixels: Vec<u8>,
}

impl PixelSurface {
    /// Create a surface from raw RGBA8 pixel data
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self { width, height, pixels }
    }

    /// Create a fully transparent (blank) surface
    pub fn blank(width: u32, height: u32) -> Self {
        Self::new(width, height, vec![0; (width as usize) * (height as usize) * 4])
    }

    /// Whether the surface holds no drawn content.
    ///
    /// A freshly created canvas rasterizes to all-zero bytes, so any non-zero
    /// byte means something was drawn.
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|&byte| byte == 0)
    }
}

/// Content of a nested iframe document as seen from the embedding page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum FrameContent {
    /// Same-origin document whose body is readable in-process
    Accessible(Box<ElementNode>),

    /// Cross-origin or detached document; any access attempt fails
    Denied,
}

/// An element in the live document tree, together with the live state the
/// snapshot pipeline reads at clone time.
///
/// All live-state fields default to absent so synthetic trees only set what
/// a test cares about.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ElementNode {
    /// HTML/SVG tag name (e.g. "div", "img", "use")
    pub tag_name: String,

    /// Element attributes in document order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,

    /// Inline style declarations
    #[serde(default, skip_serializing_if = "StyleMap::is_empty")]
    pub style: StyleMap,

    /// Computed style captured from the style engine
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computed_style: Option<ComputedStyle>,

    /// Child nodes in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DomNode>,

    /// Children of an attached shadow root, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_children: Option<Vec<DomNode>>,

    /// Nodes assigned to this slot, if the element is a `<slot>`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assigned_nodes: Vec<DomNode>,

    /// Nested document content, if the element is an `<iframe>`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame: Option<FrameContent>,

    /// Rendered pixel content: a canvas raster or a video's current frame
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface: Option<PixelSurface>,

    /// Live form control value (input/textarea text, select's chosen value),
    /// which is not otherwise observable from markup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Horizontal scroll offset in pixels
    #[serde(default, skip_serializing_if = "is_zero")]
    pub scroll_left: f64,

    /// Vertical scroll offset in pixels
    #[serde(default, skip_serializing_if = "is_zero")]
    pub scroll_top: f64,
}

fn is_zero(value: &f64) -> bool {
    *value == 0.0
}

impl ElementNode {
    /// Create a new element with the given tag
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self { tag_name: tag_name.into(), ..Self::default() }
    }

    /// Builder method: add an attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Builder method: set children
    pub fn with_children(mut self, children: Vec<DomNode>) -> Self {
        self.children = children;
        self
    }

    /// Builder method: append a single text child
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(DomNode::text(text));
        self
    }

    /// Builder method: set the inline style
    pub fn with_style(mut self, style: StyleMap) -> Self {
        self.style = style;
        self
    }

    /// Builder method: set the captured computed style
    pub fn with_computed_style(mut self, computed: ComputedStyle) -> Self {
        self.computed_style = Some(computed);
        self
    }

    /// Builder method: set the rendered pixel surface
    pub fn with_surface(mut self, surface: PixelSurface) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Builder method: set nested iframe content
    pub fn with_frame(mut self, frame: FrameContent) -> Self {
        self.frame = Some(frame);
        self
    }

    /// Builder method: set the live form value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Builder method: set scroll offsets
    pub fn with_scroll(mut self, scroll_left: f64, scroll_top: f64) -> Self {
        self.scroll_left = scroll_left;
        self.scroll_top = scroll_top;
        self
    }

    /// Builder method: attach a shadow root with the given children
    pub fn with_shadow_children(mut self, children: Vec<DomNode>) -> Self {
        self.shadow_children = Some(children);
        self
    }

    /// Builder method: set slot-assigned nodes
    pub fn with_assigned_nodes(mut self, nodes: Vec<DomNode>) -> Self {
        self.assigned_nodes = nodes;
        self
    }

    /// The element's dispatch kind
    pub fn kind(&self) -> ElementKind {
        ElementKind::from_tag(&self.tag_name)
    }

    /// Check if the element has a specific tag (ASCII case-insensitive)
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag)
    }

    /// Get an attribute value by name
    pub fn get_attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Set an attribute value
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Remove an attribute, returning its previous value
    pub fn remove_attribute(&mut self, key: &str) -> Option<String> {
        self.attributes.shift_remove(key)
    }

    /// Get the element's `id` attribute
    pub fn id(&self) -> Option<&str> {
        self.get_attribute("id")
    }

    /// Append a child node
    pub fn append_child(&mut self, child: DomNode) {
        self.children.push(child);
    }

    /// Replace all children with a single text node
    pub fn set_text_content(&mut self, text: impl Into<String>) {
        self.children = vec![DomNode::text(text)];
    }

    /// Produce a structural copy: tag, attributes, and inline style only.
    ///
    /// No children and no live state; children are attached separately and
    /// live state is reproduced by decoration.
    pub fn shallow_clone(&self) -> Self {
        Self {
            tag_name: self.tag_name.clone(),
            attributes: self.attributes.clone(),
            style: self.style.clone(),
            ..Self::default()
        }
    }

    /// Depth-first search for a descendant element (or self) with the given id
    pub fn find_element_by_id(&self, id: &str) -> Option<&ElementNode> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.children
            .iter()
            .filter_map(DomNode::as_element)
            .find_map(|child| child.find_element_by_id(id))
    }
}
