use crate::cloner::{clone_element, CloneCtx};
use crate::dom::element::{DomNode, ElementKind, ElementNode};
use crate::error::Result;
use indexmap::IndexMap;

/// Copy in the SVG symbol definitions the clone references but does not
/// contain.
///
/// Every `<use>` in the clone pointing at a local id is checked against the
/// clone itself; missing definitions are cloned from the original document,
/// deduplicated by id, and appended inside one hidden zero-size
/// `<svg><defs>` container. The definition table is built by a strictly
/// sequential loop so deduplication stays correct.
pub(crate) async fn ensure_svg_symbols(ctx: &CloneCtx<'_>, clone: &mut ElementNode) -> Result<()> {
    let mut references = Vec::new();
    collect_use_references(clone, &mut references);
    if references.is_empty() {
        return Ok(());
    }

    let mut definitions: IndexMap<String, DomNode> = IndexMap::new();
    for id in references {
        if definitions.contains_key(&id) || clone.find_element_by_id(&id).is_some() {
            continue;
        }
        let Some(definition) = ctx.document.find_definition(&id) else {
            log::debug!("no definition found for symbol reference '#{id}'");
            continue;
        };
        let cloned_definition = clone_element(ctx, definition, true).await?;
        definitions.insert(id, DomNode::Element(cloned_definition));
    }
    if definitions.is_empty() {
        return Ok(());
    }

    log::debug!("embedding {} svg symbol definition(s)", definitions.len());
    let mut defs = ElementNode::new("defs");
    for (_, definition) in definitions {
        defs.append_child(definition);
    }
    clone.append_child(DomNode::Element(hidden_container(defs)));
    Ok(())
}

/// Ids referenced by `<use>` elements anywhere in the subtree, in document
/// order (duplicates included; the caller deduplicates)
fn collect_use_references(element: &ElementNode, out: &mut Vec<String>) {
    if element.kind() == ElementKind::SvgUse {
        let href = element
            .get_attribute("href")
            .or_else(|| element.get_attribute("xlink:href"));
        if let Some(id) = href.and_then(|href| href.strip_prefix('#')) {
            if !id.is_empty() {
                out.push(id.to_string());
            }
        }
    }
    for child in element.children.iter().filter_map(DomNode::as_element) {
        collect_use_references(child, out);
    }
}

/// A zero-size, absolutely positioned, hidden `<svg>` wrapper for collected
/// definitions
fn hidden_container(defs: ElementNode) -> ElementNode {
    let mut container = ElementNode::new("svg").with_attribute("xmlns", "http://www.w3.org/2000/svg");
    container.style.set_property("position", "absolute", false);
    container.style.set_property("width", "0", false);
    container.style.set_property("height", "0", false);
    container.style.set_property("overflow", "hidden", false);
    container.style.set_property("display", "none", false);
    container.append_child(DomNode::Element(defs));
    container
}
