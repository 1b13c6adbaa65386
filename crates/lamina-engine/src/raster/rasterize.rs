use crate::canvas::{Clip, DisplayList, DrawCmd, Path, ShadowParams};
use crate::coords::{Rect, Size, Vec2};
use crate::paint::Color;

use super::blend::{src_over, src_over_u8};
use super::Pixmap;

/// Rasterizes a display list into a new transparent pixmap of `size`.
///
/// Sampling is one point per pixel, at the pixel centre. Anti-aliasing comes
/// from the rounded-rect signed distance, so edges get a one-pixel ramp.
/// A pixel is only ever written when its centre is inside the item's scissor
/// and every clip shape.
pub fn rasterize(list: &DisplayList, size: Size) -> Pixmap {
    let mut layers: Vec<(Pixmap, Rect)> = vec![(Pixmap::new(size), size.to_rect())];

    for item in list.items() {
        match &item.cmd {
            DrawCmd::Clear(color) => {
                if let Some((target, _)) = layers.last_mut() {
                    clear(target, &item.clip, *color);
                }
            }
            DrawCmd::FillPath { path, color } => {
                if let Some((target, _)) = layers.last_mut() {
                    fill_path(target, &item.clip, path, *color);
                }
            }
            DrawCmd::Shadow { path, params } => {
                if let Some((target, _)) = layers.last_mut() {
                    draw_shadow(target, &item.clip, path, params);
                }
            }
            DrawCmd::BeginLayer { bounds } => {
                layers.push((Pixmap::new(size), *bounds));
            }
            DrawCmd::EndLayer => {
                if layers.len() > 1 {
                    composite_top(&mut layers);
                } else {
                    log::warn!("rasterize: EndLayer without BeginLayer; ignored");
                }
            }
        }
    }

    while layers.len() > 1 {
        log::warn!("rasterize: unterminated layer; compositing");
        composite_top(&mut layers);
    }

    match layers.pop() {
        Some((pixmap, _)) => pixmap,
        None => Pixmap::new(size),
    }
}

fn composite_top(layers: &mut Vec<(Pixmap, Rect)>) {
    let Some((layer, bounds)) = layers.pop() else { return; };
    let Some((parent, _)) = layers.last_mut() else { return; };
    let Some((x0, y0, x1, y1)) = layer.pixel_span(bounds) else { return; };
    for y in y0..y1 {
        for x in x0..x1 {
            if let (Some(src), Some(dst)) = (layer.pixel(x, y), parent.get_mut(x, y)) {
                src_over_u8(dst, src);
            }
        }
    }
}

// Visits every pixel whose centre can be inside `region ∩ clip` and blends
// `color` with the returned coverage.
fn cover<F>(target: &mut Pixmap, clip: &Clip, region: Rect, color: Color, coverage: F)
where
    F: Fn(Vec2) -> f32,
{
    let region = region.intersect_or_empty(clip.scissor);
    let Some((x0, y0, x1, y1)) = target.pixel_span(region) else { return; };
    for y in y0..y1 {
        for x in x0..x1 {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let c = clip.coverage(p);
            if c <= 0.0 {
                continue;
            }
            let g = coverage(p);
            if g <= 0.0 {
                continue;
            }
            if let Some(dst) = target.get_mut(x, y) {
                src_over(dst, color.premul(c * g));
            }
        }
    }
}

fn clear(target: &mut Pixmap, clip: &Clip, color: Color) {
    let Some((x0, y0, x1, y1)) = target.pixel_span(clip.scissor) else { return; };
    for y in y0..y1 {
        for x in x0..x1 {
            let c = clip.coverage(Vec2::new(x as f32 + 0.5, y as f32 + 0.5));
            if c <= 0.0 {
                continue;
            }
            if let Some(dst) = target.get_mut(x, y) {
                // Replace, weighted by clip coverage.
                let src = color.premul(1.0);
                for i in 0..4 {
                    let d = dst[i] as f32 / 255.0;
                    dst[i] = crate::paint::color::to_u8(src[i] * c + d * (1.0 - c));
                }
            }
        }
    }
}

fn fill_path(target: &mut Pixmap, clip: &Clip, path: &Path, color: Color) {
    cover(target, clip, path.bounds(), color, |p| (0.5 - path.signed_distance(p)).clamp(0.0, 1.0));
}

fn draw_shadow(target: &mut Pixmap, clip: &Clip, path: &Path, params: &ShadowParams) {
    let occluder = path.bounds();
    if occluder.is_empty() {
        return;
    }
    let ambient_blur = params.ambient_blur();
    let spot = params.spot_geometry(occluder);
    let light = Vec2::new(params.light_pos.x, params.light_pos.y);
    let ambient_alpha = params.ambient_alpha.clamp(0.0, 1.0);
    let spot_alpha = params.spot_alpha.clamp(0.0, 1.0);

    cover(target, clip, params.bounds(occluder), params.color, |p| {
        let ambient = falloff(path.signed_distance(p), ambient_blur);
        let q = light + (p - light) / spot.scale;
        let spot_cov = falloff(path.signed_distance(q) * spot.scale, spot.blur);
        (ambient_alpha * ambient + spot_alpha * spot_cov).min(1.0)
    });
}

// 1 well inside, 0 well outside, smooth ramp of width `blur` centred on the edge.
fn falloff(sd: f32, blur: f32) -> f32 {
    if blur <= 1.0 {
        return (0.5 - sd).clamp(0.0, 1.0);
    }
    let t = ((blur * 0.5 - sd) / blur).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Canvas, LightPos};
    use crate::coords::{CornerRadii, RRect};

    const SIZE: Size = Size::new(64, 64);

    fn shadow(z: f32) -> ShadowParams {
        ShadowParams {
            z_height: z,
            light_pos: LightPos::new(0.0, -700.0, 2800.0),
            light_radius: 2800.0,
            ambient_alpha: 0.25,
            spot_alpha: 0.25,
            color: Color::BLACK,
        }
    }

    // ── fills ─────────────────────────────────────────────────────────────

    #[test]
    fn fills_rect_exactly() {
        let mut c = Canvas::new(SIZE);
        c.draw_path(&Path::from_rect(Rect::new(8.0, 8.0, 16.0, 16.0)), Color::RED);
        let px = rasterize(c.display_list(), SIZE);
        assert_eq!(px.pixel(8, 8), Some([255, 0, 0, 255]));
        assert_eq!(px.pixel(23, 23), Some([255, 0, 0, 255]));
        assert_eq!(px.pixel(7, 8), Some([0, 0, 0, 0]));
        assert_eq!(px.pixel(24, 24), Some([0, 0, 0, 0]));
    }

    #[test]
    fn clear_replaces_within_clip() {
        let mut c = Canvas::new(SIZE);
        c.clear(Color::WHITE);
        c.save();
        c.clip_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        c.clear(Color::RED);
        c.restore();
        let px = rasterize(c.display_list(), SIZE);
        assert_eq!(px.pixel(5, 5), Some([255, 0, 0, 255]));
        assert_eq!(px.pixel(20, 20), Some([255, 255, 255, 255]));
    }

    // ── clipping ──────────────────────────────────────────────────────────

    #[test]
    fn nothing_lands_outside_a_rounded_clip() {
        let clip = RRect::new(Rect::new(8.0, 8.0, 40.0, 40.0), CornerRadii::all(12.0));
        let mut c = Canvas::new(SIZE);
        c.save_layer(clip.bounds());
        c.clip_rrect(clip, true);
        c.draw_path(&Path::from_rect(SIZE.to_rect()), Color::RED);
        c.restore();

        let px = rasterize(c.display_list(), SIZE);
        for y in 0..SIZE.height {
            for x in 0..SIZE.width {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if clip.signed_distance(p) >= 0.5 {
                    assert_eq!(px.pixel(x, y), Some([0, 0, 0, 0]), "pixel ({x},{y}) outside clip");
                }
            }
        }
        // Corner pixel is cut off, centre is solid.
        assert_eq!(px.pixel(8, 8), Some([0, 0, 0, 0]));
        assert_eq!(px.pixel(28, 28), Some([255, 0, 0, 255]));
    }

    // ── layers ────────────────────────────────────────────────────────────

    #[test]
    fn layer_composites_over_parent() {
        let mut c = Canvas::new(SIZE);
        c.clear(Color::WHITE);
        c.save_layer(Rect::new(0.0, 0.0, 32.0, 32.0));
        c.draw_path(&Path::from_rect(Rect::new(0.0, 0.0, 16.0, 16.0)), Color::rgba(0.0, 0.0, 0.0, 0.5));
        c.restore();
        let px = rasterize(c.display_list(), SIZE);
        let mixed = px.pixel(4, 4).unwrap();
        assert!(mixed[..3].iter().all(|&v| (126..=129).contains(&v)), "got {mixed:?}");
        assert_eq!(mixed[3], 255);
        assert_eq!(px.pixel(40, 40), Some([255, 255, 255, 255]));
    }

    // ── shadows ───────────────────────────────────────────────────────────

    #[test]
    fn shadow_darkens_below_occluder() {
        let size = Size::new(200, 200);
        let mut c = Canvas::new(size);
        c.clear(Color::WHITE);
        c.draw_shadow(&Path::from_rect(Rect::new(50.0, 50.0, 100.0, 100.0)), shadow(40.0));
        let px = rasterize(c.display_list(), size);
        let below = px.pixel(100, 155).unwrap();
        let far = px.pixel(100, 199).unwrap();
        assert!(below[0] < 255, "shadow should darken just below the occluder");
        assert!(below[0] < far[0], "shadow should fade with distance");
    }

    #[test]
    fn falloff_is_monotonic() {
        assert_eq!(falloff(-100.0, 10.0), 1.0);
        assert_eq!(falloff(100.0, 10.0), 0.0);
        assert!(falloff(-1.0, 10.0) > falloff(1.0, 10.0));
    }
}
