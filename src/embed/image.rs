use crate::dom::element::{ElementKind, ElementNode};
use crate::embed::EmbedCtx;
use crate::error::{Result, SnapshotError};
use crate::resolve::{is_data_url, parse_data_url};

/// Replace an image-bearing element's external source with inline data.
///
/// Applies to an HTML `<img>` whose `src` is external and to an SVG
/// `<image>` whose href is external; already-inline sources are a no-op, so
/// running the embedder twice never re-resolves anything. After the swap the
/// new source is loaded/decoded before the node counts as embedded.
pub(crate) async fn embed_image_node(ctx: &EmbedCtx<'_>, element: &mut ElementNode) -> Result<()> {
    let Some(source_attr) = source_attribute(element) else {
        return Ok(());
    };
    let Some(url) = element.get_attribute(source_attr).map(str::to_string) else {
        return Ok(());
    };
    if url.is_empty() || is_data_url(&url) {
        return Ok(());
    }

    let mime_hint = ctx.sniffer.classify(&url);
    let resource = ctx.resolver.resolve(&url, &mime_hint).await?;
    let data_url = resource.to_data_url();

    // Promote deferred loading so the swapped source actually loads, and
    // drop the candidate set that would otherwise override it.
    if element.get_attribute("loading") == Some("lazy") {
        element.set_attribute("loading", "eager");
    }
    if element.kind() == ElementKind::Image {
        element.remove_attribute("srcset");
    }
    element.set_attribute(source_attr, data_url.clone());

    await_image_load(&data_url)
}

/// The attribute carrying the element's image source, if this element kind
/// has one
fn source_attribute(element: &ElementNode) -> Option<&'static str> {
    match element.kind() {
        ElementKind::Image => Some("src"),
        ElementKind::SvgImage => {
            if element.get_attribute("href").is_some() {
                Some("href")
            } else if element.get_attribute("xlink:href").is_some() {
                Some("xlink:href")
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Wait for the swapped-in source to finish loading.
///
/// In-process, load completion means the data URL payload decodes: the
/// base64 layer must be well formed, and raster payloads must decode as
/// images. Failure maps to the same error class a native load/error event
/// pair would surface.
fn await_image_load(data_url: &str) -> Result<()> {
    let Some((mime_type, bytes)) = parse_data_url(data_url) else {
        return Err(SnapshotError::ImageLoadFailed(
            "embedded source is not a well-formed data URL".to_string(),
        ));
    };
    if is_raster_mime(&mime_type) {
        image::load_from_memory(&bytes)
            .map_err(|e| SnapshotError::ImageLoadFailed(e.to_string()))?;
    }
    Ok(())
}

fn is_raster_mime(mime_type: &str) -> bool {
    matches!(
        mime_type,
        "image/png" | "image/jpeg" | "image/gif" | "image/webp" | "image/bmp" | "image/tiff"
    )
}
