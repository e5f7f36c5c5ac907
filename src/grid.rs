/// Floor type of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FloorId(pub u16);

/// Structure (block) type occupying a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId(pub u16);

/// Owning faction of a destructible structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TeamId(pub u8);

/// A structure standing on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Structure {
    /// Structure type.
    pub block: BlockId,
    /// Set for destructible buildings; `None` for static terrain blocks.
    ///
    /// A `Some` owner means the building is currently standing on the cell.
    /// Removed buildings are reported as a cell without a structure.
    pub owner: Option<TeamId>,
}

/// One world cell as seen by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    /// Underlying floor.
    pub floor: FloorId,
    /// Occupying structure, if any.
    pub structure: Option<Structure>,
}

impl Cell {
    /// A bare floor cell.
    pub fn floor(floor: FloorId) -> Self {
        Cell { floor, structure: None }
    }

    /// A cell holding a static (indestructible) block.
    pub fn with_block(floor: FloorId, block: BlockId) -> Self {
        Cell {
            floor,
            structure: Some(Structure { block, owner: None }),
        }
    }

    /// A cell holding a destructible building owned by `team`.
    pub fn with_building(floor: FloorId, block: BlockId, team: TeamId) -> Self {
        Cell {
            floor,
            structure: Some(Structure {
                block,
                owner: Some(team),
            }),
        }
    }
}

/// Read-only access to the active world grid.
///
/// Row 0 is the southern edge of the world.
pub trait TileGrid {
    /// Width in cells.
    fn width(&self) -> u32;
    /// Height in cells.
    fn height(&self) -> u32;
    /// The cell at `(x, y)`. Callers guarantee `x < width()` and `y < height()`.
    fn cell(&self, x: u32, y: u32) -> Cell;

    /// True when `(x, y)` addresses a cell of this grid.
    #[inline]
    fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width() && y < self.height()
    }
}

/// Dense in-memory grid, row-major with row 0 at the south.
#[derive(Debug, Clone)]
pub struct GridMap {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl GridMap {
    /// A `width x height` grid filled with `floor`.
    pub fn new(width: u32, height: u32, floor: FloorId) -> Self {
        GridMap {
            width,
            height,
            cells: vec![Cell::floor(floor); width as usize * height as usize],
        }
    }

    /// Builds a grid by evaluating `f(x, y)` for every cell.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Cell) -> Self {
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }
        GridMap { width, height, cells }
    }

    pub(crate) fn from_cells(width: u32, height: u32, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), width as usize * height as usize);
        GridMap { width, height, cells }
    }

    #[inline]
    fn idx(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Replaces the cell at `(x, y)`, returning `false` when out of bounds.
    pub fn set(&mut self, x: u32, y: u32, cell: Cell) -> bool {
        if !self.contains(x, y) {
            return false;
        }
        let i = self.idx(x, y);
        self.cells[i] = cell;
        true
    }
}

impl TileGrid for GridMap {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn cell(&self, x: u32, y: u32) -> Cell {
        self.cells[self.idx(x, y)]
    }
}
