use crate::error::MinimapError;
use crate::minimap::Minimap;
use crate::raster::MacroquadBackend;
use crate::viewport::SpatialIndex;
use macroquad::prelude::*;

/// Draws the minimap window around `camera` into `dest`, then one marker
/// per visible entity.
///
/// Markers are one window cell in size and centered on their entity.
pub fn draw_minimap<I>(
    minimap: &Minimap<MacroquadBackend>,
    camera: Vec2,
    index: &I,
    dest: Rect,
) -> Result<(), MinimapError>
where
    I: SpatialIndex + ?Sized,
{
    let tex = minimap.texture()?;
    let window = minimap.window(camera)?;
    let (w, h) = (tex.width(), tex.height());
    let source = window
        .to_normalized_region(w as u32, h as u32)
        .to_source_rect(w, h);

    draw_texture_ex(
        tex,
        dest.x,
        dest.y,
        WHITE,
        DrawTextureParams {
            dest_size: Some(vec2(dest.w, dest.h)),
            source: Some(source),
            ..Default::default()
        },
    );

    let origin = vec2(dest.x, dest.y);
    let size = vec2(dest.w, dest.h);
    let cell = window.cell_size_on(size);
    for marker in minimap.markers(camera, index)? {
        let r = marker_rect(marker.screen_position(origin, size), cell, dest);
        draw_rectangle(r.x, r.y, r.w, r.h, marker.color.into());
    }
    Ok(())
}

/// A `cell`-sized square centered on `at`, shifted back inside `dest`.
fn marker_rect(at: Vec2, cell: Vec2, dest: Rect) -> Rect {
    let max = vec2(dest.x + dest.w - cell.x, dest.y + dest.h - cell.y).max(vec2(dest.x, dest.y));
    let p = (at - cell / 2.0).clamp(vec2(dest.x, dest.y), max);
    Rect::new(p.x, p.y, cell.x, cell.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEST: Rect = Rect { x: 100.0, y: 20.0, w: 256.0, h: 256.0 };

    #[test]
    fn marker_is_centered_away_from_edges() {
        let r = marker_rect(vec2(228.0, 148.0), vec2(4.0, 4.0), DEST);
        assert_eq!(r, Rect::new(226.0, 146.0, 4.0, 4.0));
    }

    #[test]
    fn markers_on_the_edges_stay_inside_dest() {
        let cell = vec2(4.0, 4.0);
        let south_west = marker_rect(vec2(100.0, 276.0), cell, DEST);
        assert_eq!(south_west, Rect::new(100.0, 272.0, 4.0, 4.0));
        let north_east = marker_rect(vec2(356.0, 20.0), cell, DEST);
        assert_eq!(north_east, Rect::new(352.0, 20.0, 4.0, 4.0));
    }
}
