use crate::viewport::{Entity, SpatialIndex};
use macroquad::prelude::*;
use std::collections::HashMap;

/// Side of one bucket, in world units.
pub const CHUNK_SIZE: i32 = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
}

#[inline]
pub fn world_to_chunk(p: Vec2) -> ChunkCoord {
    ChunkCoord {
        x: (p.x as i32).div_euclid(CHUNK_SIZE),
        y: (p.y as i32).div_euclid(CHUNK_SIZE),
    }
}

/// Entities bucketed by chunk.
///
/// Queries return whole buckets, so results include neighbours of the
/// requested area; callers filter exact containment themselves.
#[derive(Debug, Default, Clone)]
pub struct EntityIndex {
    buckets: HashMap<ChunkCoord, Vec<Entity>>,
    len: usize,
}

impl EntityIndex {
    /// An empty index.
    pub fn new() -> Self {
        EntityIndex {
            buckets: HashMap::new(),
            len: 0,
        }
    }

    /// Adds `entity` to the bucket under its position.
    pub fn insert(&mut self, entity: Entity) {
        self.buckets
            .entry(world_to_chunk(entity.position))
            .or_insert_with(Vec::new)
            .push(entity);
        self.len += 1;
    }

    /// Removes every entity and every bucket.
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.len = 0;
    }

    /// Number of entities.
    #[inline] pub fn len(&self) -> usize { self.len }
    /// True when no entity is indexed.
    #[inline] pub fn is_empty(&self) -> bool { self.len == 0 }
}

impl FromIterator<Entity> for EntityIndex {
    fn from_iter<T: IntoIterator<Item = Entity>>(iter: T) -> Self {
        let mut index = EntityIndex::new();
        for e in iter {
            index.insert(e);
        }
        index
    }
}

impl SpatialIndex for EntityIndex {
    fn nearby<'a>(&'a self, area: Rect) -> impl Iterator<Item = &'a Entity> + 'a {
        let mut lo = world_to_chunk(vec2(area.x, area.y));
        let mut hi = world_to_chunk(vec2(area.x + area.w, area.y + area.h));
        if lo.x > hi.x {
            std::mem::swap(&mut lo.x, &mut hi.x);
        }
        if lo.y > hi.y {
            std::mem::swap(&mut lo.y, &mut hi.y);
        }

        (lo.y..=hi.y)
            .flat_map(move |cy| (lo.x..=hi.x).map(move |cx| ChunkCoord { x: cx, y: cy }))
            .filter_map(move |cc| self.buckets.get(&cc))
            .flat_map(|bucket| bucket.iter())
    }
}
