use crate::dom::element::ElementNode;
use crate::embed::EmbedCtx;
use crate::error::Result;

/// Rewrite background and mask style values that reference external
/// resources.
///
/// The combined shorthand is tried first and its longhand only when the
/// shorthand is absent; the two are mutually exclusive write targets so a
/// value is never processed twice.
pub(crate) async fn embed_background(ctx: &EmbedCtx<'_>, element: &mut ElementNode) -> Result<()> {
    if !embed_property(ctx, element, "background").await? {
        embed_property(ctx, element, "background-image").await?;
    }
    if !embed_property(ctx, element, "mask").await? {
        embed_property(ctx, element, "mask-image").await?;
    }
    Ok(())
}

/// Route one style value through the URL rewriter, writing the result back
/// with the original priority. Returns whether a value was present.
async fn embed_property(ctx: &EmbedCtx<'_>, element: &mut ElementNode, property: &str) -> Result<bool> {
    let Some(value) = element.style.get(property).map(str::to_string) else {
        return Ok(false);
    };
    let rewritten = ctx.rewriter.rewrite(&value, ctx.base_url).await?;
    let priority = element.style.priority(property);
    element.style.set_property(property, rewritten, priority);
    Ok(true)
}
