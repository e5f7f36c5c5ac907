use anyhow::Context;
use macroquad::prelude::*;
use tile_minimap::{
    draw_minimap, BlockId, Cell, Entity, EntityIndex, FloorId, GridMap, MacroquadBackend, Minimap, MinimapConfig,
    MinimapEvent, PackedColor, Palette, TeamId,
};

const WORLD_W: u32 = 320;
const WORLD_H: u32 = 240;
const CELL: f32 = 8.0;

fn window_conf() -> Conf {
    Conf {
        window_title: "Minimap".into(),
        window_width: 1280,
        window_height: 720,
        ..Default::default()
    }
}

fn palette() -> Palette {
    Palette::new()
        .with_floor(FloorId(0), PackedColor::opaque(52, 110, 60))
        .with_floor(FloorId(1), PackedColor::opaque(194, 178, 128))
        .with_block(BlockId(1), PackedColor::opaque(70, 70, 80))
        .with_block(BlockId(2), PackedColor::TRANSPARENT)
        .with_team(TeamId(1), PackedColor::opaque(255, 211, 127))
        .with_team(TeamId(2), PackedColor::opaque(242, 85, 85))
}

fn generate_world() -> GridMap {
    GridMap::from_fn(WORLD_W, WORLD_H, |x, y| {
        let floor = if (x / 24 + y / 18) % 3 == 0 { FloorId(1) } else { FloorId(0) };
        if (x * 7 + y * 13) % 97 == 0 {
            Cell::with_block(floor, BlockId(1))
        } else {
            Cell::floor(floor)
        }
    })
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();
    if let Err(e) = run().await {
        log::error!("{e:#}");
    }
}

async fn run() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => MinimapConfig::load(&path).with_context(|| format!("Loading minimap config {path}"))?,
        None => MinimapConfig::with_world_units_per_cell(CELL),
    };
    let mut minimap = Minimap::new(MacroquadBackend, palette(), config).context("Creating minimap")?;
    let mut world = generate_world();
    minimap
        .handle(MinimapEvent::WorldLoaded, &world)
        .context("Building minimap raster")?;

    let mut camera = vec2(WORLD_W as f32 * CELL / 2.0, WORLD_H as f32 * CELL / 2.0);
    let mut units = EntityIndex::new();
    let mut t = 0.0f32;

    loop {
        clear_background(BLACK);
        t += get_frame_time();

        let speed = 400.0 * get_frame_time();
        if is_key_down(KeyCode::A) { camera.x -= speed; }
        if is_key_down(KeyCode::D) { camera.x += speed; }
        if is_key_down(KeyCode::W) { camera.y += speed; }
        if is_key_down(KeyCode::S) { camera.y -= speed; }

        let (_, wheel) = mouse_wheel();
        if wheel != 0.0 {
            minimap.zoom_by(-wheel.signum() as i32)?;
        }

        // a building appears under the camera whenever space is pressed
        if is_key_pressed(KeyCode::Space) {
            let x = (camera.x / CELL).clamp(0.0, (WORLD_W - 1) as f32) as u32;
            let y = (camera.y / CELL).clamp(0.0, (WORLD_H - 1) as f32) as u32;
            world.set(x, y, Cell::with_building(FloorId(0), BlockId(3), TeamId(1)));
            minimap.handle(MinimapEvent::TileChanged { x, y }, &world)?;
        }

        units.clear();
        for i in 0..64u32 {
            let a = t * 0.2 + i as f32 * 0.37;
            let r = 200.0 + (i % 8) as f32 * 90.0;
            units.insert(Entity {
                id: i,
                position: camera + vec2(a.cos(), a.sin()) * r,
                color: if i % 2 == 0 { PackedColor::opaque(255, 211, 127) } else { PackedColor::opaque(242, 85, 85) },
            });
        }

        let dest = Rect::new(screen_width() - 276.0, 20.0, 256.0, 256.0);
        draw_minimap(&minimap, camera, &units, dest)?;
        draw_rectangle_lines(dest.x, dest.y, dest.w, dest.h, 2.0, WHITE);

        draw_text(
            &format!("zoom {}  camera ({:.0}, {:.0})", minimap.zoom(), camera.x, camera.y),
            20.0,
            40.0,
            30.0,
            WHITE,
        );

        next_frame().await;
    }
}
