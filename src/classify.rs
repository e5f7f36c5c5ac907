use crate::color::PackedColor;
use crate::grid::Cell;
use crate::palette::Palette;

/// Minimap color of a single cell.
///
/// Owned buildings show their team color, other structures their block
/// color. A transparent structure color (or no structure at all) shows the
/// floor instead. The floor color is returned as-is, even when black.
pub fn classify(cell: &Cell, palette: &Palette) -> PackedColor {
    let structure_color = match cell.structure {
        Some(s) => match s.owner {
            Some(team) => palette.team_color(team),
            None => palette.block_color(s.block),
        },
        None => PackedColor::TRANSPARENT,
    };

    if structure_color.is_transparent() {
        palette.floor_color(cell.floor)
    } else {
        structure_color
    }
}
