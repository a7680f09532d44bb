use crate::cloner::CloneCtx;
use crate::dom::element::{DomNode, ElementKind, ElementNode};
use crate::dom::matrix::Matrix2d;
use crate::dom::style::StyleMap;
use crate::error::Result;

/// Copy the visual and interactive state the structural clone cannot carry:
/// computed style, form control values, pseudo elements, and (when enabled)
/// scroll-position compensation.
pub(crate) async fn decorate(
    ctx: &CloneCtx<'_>,
    original: &ElementNode,
    cloned: &mut ElementNode,
) -> Result<()> {
    clone_css_style(original, cloned);
    ctx.pseudo.apply(original, cloned, ctx.options).await?;
    clone_input_value(original, cloned);
    clone_select_value(original, cloned);
    if ctx.options.patch_scroll {
        patch_scroll(original, cloned);
    }
    Ok(())
}

/// Copy the captured computed style onto the clone's inline style.
///
/// The serialized style text is copied wholesale (plus an explicit
/// `transform-origin`) when the style engine exposes one. Otherwise each
/// captured property is copied individually with three corrections:
/// font-size pulled just under the integer pixel, iframe `inline` display
/// replaced by `block`, and a `d` property rewritten from the `d` attribute.
fn clone_css_style(original: &ElementNode, cloned: &mut ElementNode) {
    let Some(computed) = &original.computed_style else {
        return;
    };

    if let Some(css_text) = &computed.css_text {
        cloned.style = StyleMap::parse(css_text);
        if let Some(origin) = computed.get("transform-origin") {
            cloned.style.set_property("transform-origin", origin, false);
        }
        return;
    }

    for (name, captured) in &computed.properties {
        let mut value = captured.clone();
        if name == "font-size" {
            if let Some(reduced) = reduce_font_size(&value) {
                value = reduced;
            }
        }
        if name == "display" && value == "inline" && original.kind() == ElementKind::IFrame {
            // An iframe's default inline layout clashes with snapshot
            // rendering of the substituted content.
            value = "block".to_string();
        }
        if name == "d" {
            if let Some(path) = cloned.get_attribute("d") {
                value = format!("path({path})");
            }
        }
        cloned.style.set_property(name, value, false);
    }
}

/// Floor a pixel font-size and pull it 0.1px under the integer to absorb
/// sub-pixel rounding differences between measurement and render
fn reduce_font_size(value: &str) -> Option<String> {
    let pixels: f64 = value.strip_suffix("px")?.trim().parse().ok()?;
    Some(format!("{}px", pixels.floor() - 0.1))
}

/// Reflect live, possibly-unsaved form state that markup alone cannot show
fn clone_input_value(original: &ElementNode, cloned: &mut ElementNode) {
    let Some(value) = &original.value else {
        return;
    };
    match original.kind() {
        ElementKind::TextArea => cloned.set_text_content(value),
        ElementKind::Input => cloned.set_attribute("value", value),
        _ => {}
    }
}

/// Mark the cloned option matching the select's current value as selected,
/// clearing any stale `selected` attribute copied from markup
fn clone_select_value(original: &ElementNode, cloned: &mut ElementNode) {
    if original.kind() != ElementKind::Select {
        return;
    }
    let Some(value) = original.value.as_deref() else {
        return;
    };
    for option in cloned
        .children
        .iter_mut()
        .filter_map(DomNode::as_element_mut)
        .filter(|child| child.is_tag("option"))
    {
        if option.get_attribute("value") == Some(value) {
            option.set_attribute("selected", "");
        } else {
            option.remove_attribute("selected");
        }
    }
}

/// Translate each direct child so its apparent position matches what was
/// rendered at the scrolled viewport.
///
/// The child's 2D transform is decomposed, the rotation/skew components are
/// set aside, the translation is offset by the negative scroll, and the
/// rotation/skew are reapplied unchanged. Children without children of their
/// own carry no independent transform and are skipped.
fn patch_scroll(original: &ElementNode, cloned: &mut ElementNode) {
    if original.scroll_left == 0.0 && original.scroll_top == 0.0 {
        return;
    }

    for child in cloned.children.iter_mut().filter_map(DomNode::as_element_mut) {
        if child.children.is_empty() {
            continue;
        }
        let transform = child.style.get("transform").unwrap_or("none").to_string();
        let Some(matrix) = Matrix2d::parse(&transform) else {
            log::debug!("skipping scroll compensation for unparseable transform '{transform}'");
            continue;
        };
        let mut parts = matrix.decompose();
        parts.translate_x -= original.scroll_left;
        parts.translate_y -= original.scroll_top;
        let priority = child.style.priority("transform");
        child.style.set_property("transform", parts.recompose().to_css(), priority);
    }
}
