use crate::cloner::{clone_element, CloneCtx};
use crate::dom::element::{ElementKind, ElementNode, FrameContent, PixelSurface};
use crate::error::{Result, SnapshotError};
use crate::resolve::{is_data_url, InlineResource};
use image::{DynamicImage, ImageOutputFormat, RgbaImage};
use std::io::Cursor;

/// Produce a disconnected single-element copy of `element`.
///
/// Element kinds with rendered state that markup alone cannot reproduce get
/// dedicated strategies; everything else is a shallow structural clone with
/// children attached later by the child stage.
///
/// This step never fails the snapshot: every strategy degrades to a shallow
/// clone on error.
pub(crate) async fn clone_single_element(ctx: &CloneCtx<'_>, element: &ElementNode) -> ElementNode {
    match element.kind() {
        ElementKind::Canvas => clone_canvas(element),
        ElementKind::Video => clone_video(ctx, element).await,
        ElementKind::IFrame => clone_iframe(ctx, element).await,
        _ => element.shallow_clone(),
    }
}

/// Canvas: drawn content becomes an `<img>` with the raster inlined; a blank
/// canvas stays a canvas (shallow clone, attributes only)
fn clone_canvas(element: &ElementNode) -> ElementNode {
    let Some(surface) = element.surface.as_ref().filter(|surface| !surface.is_blank()) else {
        return element.shallow_clone();
    };
    match encode_surface(surface) {
        Ok(data_url) => image_replacement(data_url),
        Err(e) => {
            log::warn!("canvas rasterization could not be encoded, keeping placeholder: {e}");
            element.shallow_clone()
        }
    }
}

/// Video: an actively loaded video contributes its current frame; otherwise
/// the poster is fetched and inlined. Either way the clone is an `<img>`.
async fn clone_video(ctx: &CloneCtx<'_>, element: &ElementNode) -> ElementNode {
    if let Some(surface) = &element.surface {
        match encode_surface(surface) {
            Ok(data_url) => return image_replacement(data_url),
            Err(e) => {
                log::warn!("video frame could not be encoded, keeping placeholder: {e}");
                return element.shallow_clone();
            }
        }
    }

    let Some(poster) = element.get_attribute("poster").filter(|poster| !poster.is_empty()) else {
        return element.shallow_clone();
    };
    if is_data_url(poster) {
        return image_replacement(poster.to_string());
    }
    let mime_hint = ctx.sniffer.classify(poster);
    match ctx.resolver.resolve(poster, &mime_hint).await {
        Ok(resource) => image_replacement(resource.to_data_url()),
        Err(e) => {
            log::warn!("video poster could not be inlined, keeping placeholder: {e}");
            element.shallow_clone()
        }
    }
}

/// IFrame: an accessible nested document is cloned from its body as a new
/// subtree root and substituted for the iframe; any access failure degrades
/// to a childless shallow clone of the iframe itself
async fn clone_iframe(ctx: &CloneCtx<'_>, element: &ElementNode) -> ElementNode {
    match clone_frame_body(ctx, element).await {
        Ok(cloned_body) => cloned_body,
        Err(e) => {
            log::debug!("iframe content not accessible, cloning placeholder: {e}");
            element.shallow_clone()
        }
    }
}

async fn clone_frame_body(ctx: &CloneCtx<'_>, element: &ElementNode) -> Result<ElementNode> {
    let body = match &element.frame {
        Some(FrameContent::Accessible(body)) => body,
        Some(FrameContent::Denied) | None => return Err(SnapshotError::FrameAccessDenied),
    };
    clone_element(ctx, body, true).await
}

fn image_replacement(data_url: String) -> ElementNode {
    ElementNode::new("img").with_attribute("src", data_url)
}

/// Encode an RGBA surface as a PNG data URL
pub(crate) fn encode_surface(surface: &PixelSurface) -> Result<String> {
    let raster = RgbaImage::from_raw(surface.width, surface.height, surface.pixels.clone())
        .ok_or_else(|| SnapshotError::SurfaceEncodeFailed {
            reason: format!(
                "pixel buffer of {} bytes does not match {}x{}",
                surface.pixels.len(),
                surface.width,
                surface.height
            ),
        })?;
    let mut encoded = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(raster)
        .write_to(&mut encoded, ImageOutputFormat::Png)
        .map_err(|e| SnapshotError::SurfaceEncodeFailed { reason: e.to_string() })?;
    Ok(InlineResource::from_bytes("image/png", encoded.get_ref()).to_data_url())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::parse_data_url;

    #[test]
    fn test_encode_surface_produces_png_data_url() {
        let mut surface = PixelSurface::blank(2, 2);
        surface.pixels[0] = 255;
        surface.pixels[3] = 255;

        let data_url = encode_surface(&surface).expect("encode");
        let (mime_type, bytes) = parse_data_url(&data_url).expect("well-formed data url");
        assert_eq!(mime_type, "image/png");
        let decoded = image::load_from_memory(&bytes).expect("decodes as an image");
        assert_eq!(decoded.width(), 2);
        assert_eq!(decoded.height(), 2);
    }

    #[test]
    fn test_encode_surface_rejects_short_buffer() {
        let surface = PixelSurface::new(4, 4, vec![0; 7]);
        let result = encode_surface(&surface);
        assert!(matches!(result, Err(SnapshotError::SurfaceEncodeFailed { .. })));
    }
}
