use crate::color::PackedColor;
use crate::viewport::Window;
use macroquad::prelude::*;

/// A movable entity as reported by the spatial index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    /// Caller-defined identifier.
    pub id: u32,
    /// Position in world-distance units.
    pub position: Vec2,
    /// Faction color of the entity.
    pub color: PackedColor,
}

/// An entity projected into the minimap window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityMarker {
    /// Identifier of the source entity.
    pub id: u32,
    /// Position in world-distance units.
    pub position: Vec2,
    /// Position inside the window, image orientation: `x` grows east in
    /// `[0, 1)`, `y` grows south in `(0, 1]` (the southern edge maps to 1).
    pub normalized: Vec2,
    /// Fill color.
    pub color: PackedColor,
}

impl EntityMarker {
    /// Screen position of the marker on an overlay at `origin` of `size` pixels.
    #[inline]
    pub fn screen_position(&self, origin: Vec2, size: Vec2) -> Vec2 {
        origin + self.normalized * size
    }
}

/// Broad-phase entity lookup. May return entities outside `area`.
pub trait SpatialIndex {
    /// Entities that might lie in `area` (world units).
    fn nearby<'a>(&'a self, area: Rect) -> impl Iterator<Item = &'a Entity> + 'a;
}

/// A plain list reports every entity.
impl SpatialIndex for [Entity] {
    fn nearby<'a>(&'a self, _area: Rect) -> impl Iterator<Item = &'a Entity> + 'a {
        self.iter()
    }
}

#[inline]
fn contains(area: &Rect, p: Vec2) -> bool {
    p.x >= area.x && p.x < area.x + area.w && p.y >= area.y && p.y < area.y + area.h
}

/// Entities inside `window`, projected for the overlay.
///
/// The index's answer is re-checked against the exact (half-open) world
/// rectangle of the window.
pub fn entities_in_window<'a, I>(window: Window, index: &'a I) -> impl Iterator<Item = EntityMarker> + 'a
where
    I: SpatialIndex + ?Sized,
{
    let area = window.world_rect();
    index
        .nearby(area)
        .filter(move |e| contains(&area, e.position))
        .map(move |e| EntityMarker {
            id: e.id,
            position: e.position,
            normalized: vec2(
                (e.position.x - area.x) / area.w,
                1.0 - (e.position.y - area.y) / area.h,
            ),
            color: e.color,
        })
}
