// tests/minimap_tests.rs

use approx::assert_relative_eq;
use macroquad::prelude::vec2;
use test_case::test_case;
use tile_minimap::{
    classify, entities_in_window, BlockId, Cell, Entity, EntityIndex, FloorId, GridMap, MemoryBackend, Minimap,
    MinimapConfig, MinimapError, MinimapEvent, PackedColor, Palette, PixelRegion, RasterStore, TeamId, TileGrid,
    ViewportController,
};

const GRASS: FloorId = FloorId(1);
const STONE: FloorId = FloorId(2);
const WALL: BlockId = BlockId(1);
const PIPE: BlockId = BlockId(2);
const DRILL: BlockId = BlockId(3);
const SHARDED: TeamId = TeamId(1);

fn palette() -> Palette {
    Palette::new()
        .with_floor(GRASS, PackedColor::opaque(40, 160, 40))
        .with_floor(STONE, PackedColor::opaque(120, 120, 120))
        .with_block(WALL, PackedColor::opaque(30, 30, 30))
        .with_block(PIPE, PackedColor::TRANSPARENT)
        .with_team(SHARDED, PackedColor::opaque(255, 210, 120))
}

fn checker(width: u32, height: u32) -> GridMap {
    GridMap::from_fn(width, height, |x, y| match (x + 2 * y) % 5 {
        0 => Cell::with_block(GRASS, WALL),
        1 => Cell::with_building(STONE, DRILL, SHARDED),
        2 => Cell::with_block(STONE, PIPE),
        3 => Cell::floor(STONE),
        _ => Cell::floor(GRASS),
    })
}

#[test]
fn rebuild_and_update_share_the_row_flip() {
    let mut grid = checker(13, 7);
    let p = palette();
    let mut store = RasterStore::new(MemoryBackend::default());
    store.rebuild_all(&grid, &p).unwrap();

    let buf = store.buffer().unwrap();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            assert_eq!(buf.pixel(x, 6 - y), classify(&grid.cell(x, y), &p));
        }
    }

    grid.set(12, 0, Cell::with_block(GRASS, WALL));
    store.update_one(&grid, &p, 12, 0).unwrap();
    assert_eq!(store.buffer().unwrap().pixel(12, 6), PackedColor::opaque(30, 30, 30));
    assert_eq!(store.current_texture().unwrap().region_uploads, vec![PixelRegion::pixel(12, 6)]);
}

#[test]
fn update_changes_exactly_one_pixel() {
    let mut grid = checker(16, 16);
    let p = palette();
    let mut store = RasterStore::new(MemoryBackend::default());
    store.rebuild_all(&grid, &p).unwrap();
    let before = store.current_texture().unwrap().bytes.clone();

    grid.set(7, 9, Cell::with_building(GRASS, DRILL, SHARDED));
    store.update_one(&grid, &p, 7, 9).unwrap();
    let after = &store.current_texture().unwrap().bytes;

    let changed: Vec<usize> = before
        .chunks(4)
        .zip(after.chunks(4))
        .enumerate()
        .filter(|(_, (a, b))| a != b)
        .map(|(i, _)| i)
        .collect();
    let row = 16 - 1 - 9;
    assert_eq!(changed, vec![row * 16 + 7]);
}

#[test]
fn zoom_converges_on_256_world() {
    let mut vp = ViewportController::new(MinimapConfig::default());
    for _ in 0..5 {
        vp.zoom_by(1000, 256, 256);
    }
    assert_eq!(vp.zoom(), 8);
    for _ in 0..5 {
        vp.zoom_by(-1000, 256, 256);
    }
    assert_eq!(vp.zoom(), 1);
}

#[test_case(256, 256 ; "square")]
#[test_case(400, 96 ; "wide")]
#[test_case(64, 500 ; "tall")]
fn windows_stay_inside_for_any_camera(width: u32, height: u32) {
    let vp = ViewportController::new(MinimapConfig::default());
    let max_zoom = vp.max_zoom(width, height);
    let cameras = [-1.0e7, -100.0, 0.0, 3.5, 517.0, 2048.0, 4000.0, 1.0e7];
    for zoom in 1..=max_zoom {
        for &cx in &cameras {
            for &cy in &cameras {
                let w = vp.compute_window(vec2(cx, cy), width, height, zoom);
                assert_eq!(w.half_size, 16 * zoom);
                assert!(w.min().x >= 0.0 && w.min().y >= 0.0);
                assert!(w.max().x <= width as f32 && w.max().y <= height as f32);
            }
        }
    }
}

#[test]
fn minimap_region_and_markers_agree_on_the_window() {
    let config = MinimapConfig::with_world_units_per_cell(10.0);
    let mut minimap = Minimap::new(MemoryBackend::default(), palette(), config).unwrap();
    let grid = checker(256, 256);
    minimap.handle(MinimapEvent::WorldLoaded, &grid).unwrap();
    assert_eq!(minimap.zoom_by(-2).unwrap(), 2);

    // camera at 500,500 world units = cell 50,50; half-size 32
    let region = minimap.region(vec2(500.0, 500.0)).unwrap();
    assert_relative_eq!(region.u0, 18.0 / 256.0);
    assert_relative_eq!(region.u1, 82.0 / 256.0);
    assert_relative_eq!(region.v0, 174.0 / 256.0);
    assert_relative_eq!(region.v1, 238.0 / 256.0);

    let index: EntityIndex = [
        Entity { id: 1, position: vec2(10.0, 10.0), color: PackedColor::opaque(255, 0, 0) },
        Entity { id: 2, position: vec2(700.0, 700.0), color: PackedColor::opaque(0, 0, 255) },
    ]
    .into_iter()
    .collect();

    let markers: Vec<_> = minimap.markers(vec2(0.0, 0.0), &index).unwrap().collect();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].id, 1);
    assert_eq!(markers[0].color, PackedColor::opaque(255, 0, 0));
    assert_relative_eq!(markers[0].normalized.x, 10.0 / 640.0);
    assert_relative_eq!(markers[0].normalized.y, 1.0 - 10.0 / 640.0);
}

#[test]
fn plain_entity_list_is_filtered_too() {
    let vp = ViewportController::new(MinimapConfig::with_world_units_per_cell(10.0));
    let window = vp.compute_window(vec2(-300.0, 90.0), 128, 128, 2);
    assert_eq!(window.world_rect().x, 0.0);
    let all = vec![
        Entity { id: 1, position: vec2(639.0, 0.0), color: PackedColor::BLACK },
        Entity { id: 2, position: vec2(-1.0, 10.0), color: PackedColor::BLACK },
    ];
    let ids: Vec<_> = entities_in_window(window, all.as_slice()).map(|m| m.id).collect();
    assert_eq!(ids, vec![1]);
}

#[test]
fn transparent_structure_shows_floor() {
    let c = classify(&Cell::with_block(GRASS, PIPE), &palette());
    assert_eq!(c, PackedColor::opaque(40, 160, 40));
    assert_ne!(c, PackedColor::TRANSPARENT);
}

#[test]
fn disposed_minimap_needs_a_new_world() {
    let mut minimap = Minimap::new(MemoryBackend::default(), palette(), MinimapConfig::default()).unwrap();
    let grid = checker(64, 64);
    minimap.handle(MinimapEvent::WorldLoaded, &grid).unwrap();
    minimap.dispose().unwrap();

    let err = minimap.handle(MinimapEvent::TileChanged { x: 1, y: 1 }, &grid).unwrap_err();
    assert!(matches!(err, MinimapError::NotInitialized));
    assert!(matches!(minimap.dispose(), Err(MinimapError::AlreadyDisposed)));

    minimap.handle(MinimapEvent::WorldLoaded, &grid).unwrap();
    assert!(minimap.texture().is_ok());
}
