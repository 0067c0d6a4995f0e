//! Rasterises an assembled diagram into an RGBA canvas.

pub mod image_cache;

use std::path::Path;

use anyhow::{Context, Result};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut,
};
use imageproc::rect::Rect;
use log::{debug, info};

use crate::components::Component;
use crate::diagram::Diagram;
use crate::diagram::layout::Layout;
use crate::geometry::{Coordinate, Rotation};
use crate::routing::wire::WireSegment;
use crate::theme::Theme;

use image_cache::ImageCache;

/// Swatch edge as a fraction of the legend band height.
const SWATCH_RATIO: f64 = 0.25;
const MIN_SWATCH: u32 = 4;

/// Draw `diagram` on a fresh canvas of its own size.
///
/// Layers, bottom to top: background, component bodies, pin pads, wires in
/// routing order, legend.
pub fn render_diagram(diagram: &Diagram, theme: &Theme, images: &ImageCache) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(diagram.width, diagram.height, theme.background);

    let components = std::iter::once(&diagram.controller)
        .chain(diagram.components.iter().map(|p| &p.component));
    for component in components {
        draw_component(&mut canvas, component, theme, images);
    }

    for routed in &diagram.wires {
        let color = theme.wire_color(routed.wire.color.rgb);
        for segment in &routed.wire {
            draw_segment(&mut canvas, segment, color);
        }
    }

    let legend: Vec<Rgba<u8>> = diagram
        .legend()
        .iter()
        .map(|entry| theme.wire_color(entry.color.rgb))
        .collect();
    draw_legend(&mut canvas, &Layout::new(diagram.width, diagram.height), &legend, theme);

    debug!(
        "Rendered '{}' with {} wires on {}x{}",
        diagram.title,
        diagram.wires.len(),
        diagram.width,
        diagram.height
    );
    canvas
}

/// Write `image` as a PNG, creating parent directories as needed.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    image
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}

fn draw_component(canvas: &mut RgbaImage, component: &Component, theme: &Theme, images: &ImageCache) {
    let (w, h) = component.size;
    let (x, y) = component.origin.to_pixel();

    match component.image.as_deref().and_then(|p| images.get(p)) {
        Some(artwork) => {
            let turned = match component.rotation {
                Rotation::None => artwork.clone(),
                Rotation::Quarter => imageops::rotate90(artwork),
                Rotation::Half => imageops::rotate180(artwork),
                Rotation::ThreeQuarter => imageops::rotate270(artwork),
            };
            let sized = imageops::resize(&turned, w.max(1), h.max(1), FilterType::Triangle);
            imageops::overlay(canvas, &sized, x, y);
        }
        None => {
            let body = Rect::at(x as i32, y as i32).of_size(w.max(1), h.max(1));
            draw_filled_rect_mut(canvas, body, theme.component_fill);
            draw_hollow_rect_mut(canvas, body, theme.component_outline);
        }
    }

    for pin in component.pins.values() {
        if let Some(pad) = span_rect(&pin.lm, &pin.rm, 0) {
            draw_hollow_rect_mut(canvas, pad, theme.pad);
        }
    }
}

/// Stroke one segment at its wire width, with a round joint at its end.
fn draw_segment(canvas: &mut RgbaImage, segment: &WireSegment, color: Rgba<u8>) {
    let half = (segment.width / 2) as i32;
    let is_orthogonal = segment.axis().is_some() || segment.start == segment.end;

    if is_orthogonal {
        if let Some(rect) = span_rect(&segment.start, &segment.end, half) {
            draw_filled_rect_mut(canvas, rect, color);
        }
    } else {
        draw_line_segment_mut(
            canvas,
            (segment.start.x as f32, segment.start.y as f32),
            (segment.end.x as f32, segment.end.y as f32),
            color,
        );
    }

    if half > 0 {
        let (ex, ey) = segment.end.to_pixel();
        draw_filled_circle_mut(canvas, (ex as i32, ey as i32), half, color);
    }
}

/// Pixel rectangle covering `a..=b`, grown by `grow` on every side.
fn span_rect(a: &Coordinate, b: &Coordinate, grow: i32) -> Option<Rect> {
    let (ax, ay) = a.to_pixel();
    let (bx, by) = b.to_pixel();
    let left = ax.min(bx) as i32 - grow;
    let top = ay.min(by) as i32 - grow;
    let width = (ax - bx).unsigned_abs() as i64 + 1 + 2 * grow as i64;
    let height = (ay - by).unsigned_abs() as i64 + 1 + 2 * grow as i64;
    if width <= 0 || height <= 0 {
        return None;
    }
    Some(Rect::at(left, top).of_size(width as u32, height as u32))
}

/// One outlined swatch per wire, left to right, wrapping inside the band.
fn draw_legend(canvas: &mut RgbaImage, layout: &Layout, colors: &[Rgba<u8>], theme: &Theme) {
    if colors.is_empty() {
        return;
    }
    let band = layout.legend();
    let band_rect = Rect::at(band.x as i32, band.y as i32)
        .of_size((band.width as u32).max(1), (band.height as u32).max(1));
    draw_filled_rect_mut(canvas, band_rect, theme.legend_background);

    let swatch = ((band.height * SWATCH_RATIO) as u32).max(MIN_SWATCH);
    let gap = swatch / 2;
    let step = swatch + gap;
    let columns = ((band.width as u32).saturating_sub(gap) / step).max(1);

    for (i, color) in colors.iter().enumerate() {
        let i = i as u32;
        let x = band.x as i32 + (gap + (i % columns) * step) as i32;
        let y = band.y as i32 + (gap + (i / columns) * step) as i32;
        let rect = Rect::at(x, y).of_size(swatch, swatch);
        draw_filled_rect_mut(canvas, rect, *color);
        draw_hollow_rect_mut(canvas, rect, theme.foreground);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::catalog;
    use crate::diagram::{DiagramBuilder, DiagramOptions};
    use crate::routing::types::Axis;

    fn doorbell() -> Diagram {
        DiagramBuilder::new(
            "Doorbell",
            catalog::pi_header("Pi"),
            DiagramOptions::new(960, 540),
        )
        .input(catalog::button("Button", 11))
        .output(catalog::led("LED", 12))
        .build()
        .unwrap()
    }

    fn midpoint_pixel(segment: &WireSegment) -> (u32, u32) {
        let (x, y) = segment.start.midpoint(&segment.end).to_pixel();
        (x as u32, y as u32)
    }

    #[test]
    fn canvas_matches_diagram_size() {
        let diagram = doorbell();
        let canvas = render_diagram(&diagram, &Theme::light(), &ImageCache::empty());
        assert_eq!(canvas.dimensions(), (960, 540));
        assert_eq!(*canvas.get_pixel(0, 0), Theme::light().background);
    }

    #[test]
    fn last_wire_is_drawn_on_top() {
        let diagram = doorbell();
        let theme = Theme::light();
        let canvas = render_diagram(&diagram, &theme, &ImageCache::empty());

        let last = diagram.wires.last().unwrap();
        let expected = theme.wire_color(last.wire.color.rgb);
        let segment = last
            .wire
            .iter()
            .find(|s| s.axis() == Some(Axis::Vertical) && s.length() > 4.0)
            .unwrap();
        let (x, y) = midpoint_pixel(segment);
        assert_eq!(*canvas.get_pixel(x, y), expected);
        // Wires are stroked at their width.
        assert_eq!(*canvas.get_pixel(x + 1, y), expected);
    }

    #[test]
    fn legend_has_a_swatch_per_wire() {
        let diagram = doorbell();
        let theme = Theme::dark();
        let canvas = render_diagram(&diagram, &theme, &ImageCache::empty());

        let band = Layout::new(960, 540).legend();
        let swatch = ((band.height * SWATCH_RATIO) as u32).max(MIN_SWATCH);
        let gap = swatch / 2;
        let first = diagram.legend()[0].color.rgb;
        let centre = (band.x as u32 + gap + swatch / 2, band.y as u32 + gap + swatch / 2);
        assert_eq!(*canvas.get_pixel(centre.0, centre.1), theme.wire_color(first));
    }

    #[test]
    fn component_artwork_replaces_the_outline() {
        let dir = tempfile::tempdir().unwrap();
        let art = dir.path().join("pi.png");
        let green = Rgba([0, 200, 0, 255]);
        RgbaImage::from_pixel(12, 81, green).save(&art).unwrap();

        let controller = catalog::pi_header("Pi").with_image(Some(art.clone()));
        let diagram = DiagramBuilder::new("Art", controller, DiagramOptions::new(960, 540))
            .build()
            .unwrap();
        let images = ImageCache::preload(vec![art]);
        let canvas = render_diagram(&diagram, &Theme::light(), &images);

        let centre = diagram.controller.center().to_pixel();
        assert_eq!(*canvas.get_pixel(centre.0 as u32, centre.1 as u32), green);
    }

    #[test]
    fn span_rect_covers_both_ends() {
        let rect = span_rect(&Coordinate::at(10.0, 5.0), &Coordinate::at(4.0, 5.0), 1).unwrap();
        assert_eq!((rect.left(), rect.top()), (3, 4));
        assert_eq!((rect.width(), rect.height()), (9, 3));
    }

    #[test]
    fn save_png_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("diagram.png");
        let canvas = render_diagram(&doorbell(), &Theme::light(), &ImageCache::empty());
        save_png(&canvas, &path).unwrap();

        let loaded = image::open(&path).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (960, 540));
    }
}
