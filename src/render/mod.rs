mod draw;

pub use draw::draw_minimap;
