use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single inline style declaration value with its priority
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StyleEntry {
    /// Property value as written (e.g. `url(data:image/png;base64,...)`)
    pub value: String,

    /// Whether the declaration carries `!important`
    #[serde(default)]
    pub important: bool,
}

/// Ordered set of inline style declarations.
///
/// Uses IndexMap so declarations serialize back in the order they were set,
/// and so a wholesale copy of a serialized style text survives a round trip
/// unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StyleMap {
    declarations: IndexMap<String, StyleEntry>,
}

impl StyleMap {
    /// Create an empty style map
    pub fn new() -> Self {
        Self { declarations: IndexMap::new() }
    }

    /// Parse a serialized style text (`prop: value; prop2: value2 !important`).
    ///
    /// Declarations are split on `;` only outside parentheses, so values such
    /// as `url(data:image/png;base64,...)` stay intact.
    pub fn parse(css_text: &str) -> Self {
        let mut map = Self::new();
        for declaration in split_outside_parens(css_text, ';') {
            let Some(colon) = find_outside_parens(&declaration, ':') else {
                continue;
            };
            let name = declaration[..colon].trim();
            let mut value = declaration[colon + 1..].trim();
            if name.is_empty() || value.is_empty() {
                continue;
            }
            let mut important = false;
            if let Some(stripped) = value.strip_suffix("!important") {
                value = stripped.trim_end();
                important = true;
            }
            map.set_property(name, value, important);
        }
        map
    }

    /// Get a property value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.declarations.get(name).map(|entry| entry.value.as_str())
    }

    /// Get a property's priority (`true` for `!important`)
    pub fn priority(&self, name: &str) -> bool {
        self.declarations.get(name).is_some_and(|entry| entry.important)
    }

    /// Set a property, preserving declaration order for existing entries
    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<String>, important: bool) {
        self.declarations.insert(name.into(), StyleEntry { value: value.into(), important });
    }

    /// Remove a property, returning its previous entry
    pub fn remove_property(&mut self, name: &str) -> Option<StyleEntry> {
        self.declarations.shift_remove(name)
    }

    /// Whether any declarations are present
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Number of declarations
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Iterate over declarations in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleEntry)> {
        self.declarations.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Serialize back to style text
    pub fn css_text(&self) -> String {
        let mut out = String::new();
        for (name, entry) in &self.declarations {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(name);
            out.push_str(": ");
            out.push_str(&entry.value);
            if entry.important {
                out.push_str(" !important");
            }
            out.push(';');
        }
        out
    }
}

/// Computed style of a live element, captured at clone time.
///
/// The serialized `css_text` form is preferred when present; the property map
/// is the fallback copy source and also carries `transform-origin` for the
/// wholesale path.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComputedStyle {
    /// Full serialized style text, if the style engine exposes one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_text: Option<String>,

    /// Individual computed property values
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, String>,
}

impl ComputedStyle {
    /// Create an empty computed style
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the serialized style text
    pub fn with_css_text(mut self, css_text: impl Into<String>) -> Self {
        self.css_text = Some(css_text.into());
        self
    }

    /// Builder method: add a computed property
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Get a computed property value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }
}

/// Split `input` on `separator`, ignoring separators nested inside parentheses
fn split_outside_parens(input: &str, separator: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for ch in input.chars() {
        match ch {
            '(' => {
                depth += 1;
                current.push(ch);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            c if c == separator && depth == 0 => {
                parts.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    if !current.trim().is_empty() {
        parts.push(current);
    }
    parts
}

/// Byte offset of the first `needle` outside parentheses, if any
fn find_outside_parens(input: &str, needle: char) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, ch) in input.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c == needle && depth == 0 => return Some(idx),
            _ => {}
        }
    }
    None
}
