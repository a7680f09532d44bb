use crate::cloner::{clone_node, CloneCtx};
use crate::dom::element::{DomNode, ElementKind, ElementNode, FrameContent};
use crate::error::Result;

/// Attach clones of `original`'s children to `cloned`, in original order.
///
/// Children are cloned through a strictly sequential async fold: each child's
/// clone completes before the next one starts, so sibling order in the output
/// never depends on individual clone latency. Resource embedding is the
/// opposite (fully parallel) because it does not change tree shape.
pub(crate) async fn clone_children(
    ctx: &CloneCtx<'_>,
    original: &ElementNode,
    cloned: &mut ElementNode,
) -> Result<()> {
    // Media elements already embed their visual state during the structural
    // step: a video became an image, and an accessible iframe was substituted
    // by its nested body clone, which attached the nested children itself.
    match original.kind() {
        ElementKind::Video => return Ok(()),
        ElementKind::IFrame if matches!(original.frame, Some(FrameContent::Accessible(_))) => {
            return Ok(());
        }
        _ => {}
    }

    let children = resolve_child_source(original);
    if children.is_empty() {
        return Ok(());
    }

    for child in children {
        if let Some(cloned_child) = clone_node(ctx, child, false).await? {
            cloned.append_child(cloned_child);
        }
    }
    Ok(())
}

/// Pick the child list the clone should reflect:
/// slot-assigned nodes, then shadow-root children, then the element's own
/// children. (An accessible iframe's nested children are handled by the
/// structural substitution; see `clone_children`.)
fn resolve_child_source(original: &ElementNode) -> &[DomNode] {
    if original.kind() == ElementKind::Slot && !original.assigned_nodes.is_empty() {
        return &original.assigned_nodes;
    }
    if let Some(shadow_children) = &original.shadow_children {
        return shadow_children;
    }
    &original.children
}
