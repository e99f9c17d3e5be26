use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use thiserror::Error;

new_key_type! {
    pub struct EnemyId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub fn step(self, direction: Direction) -> Pos {
        let (dx, dy) = direction.delta();
        Pos { x: self.x + dx, y: self.y + dy }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fixed enumeration order; search and candidate loops rely on it for
    /// deterministic tie-breaks.
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Named gate group. The canonical layout uses five groups (glyphs
/// `$ % & @ ?`), but nothing in the engine assumes that count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GateGroup(pub u8);

impl GateGroup {
    pub const GLYPHS: [char; 5] = ['$', '%', '&', '@', '?'];

    pub fn from_glyph(glyph: char) -> Option<GateGroup> {
        Self::GLYPHS.iter().position(|&g| g == glyph).map(|i| GateGroup(i as u8))
    }

    /// Display glyph for the group. Out-of-range groups render as `!`,
    /// which no real group uses.
    pub fn glyph(self) -> char {
        Self::GLYPHS.get(self.0 as usize).copied().unwrap_or('!')
    }
}

/// One cell of the parsed grid. Only gate cells carry a group id; their
/// effective walkability is resolved against the gate registry at query
/// time and never written back into the cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    Wall,
    Floor,
    Start,
    Exit,
    Gate(GateGroup),
}

impl CellKind {
    /// Walkability ignoring gate state. False for walls and for every gate
    /// cell; a gate only becomes walkable through the registry.
    pub fn statically_walkable(self) -> bool {
        !matches!(self, CellKind::Wall | CellKind::Gate(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Wanderer,
    Chaser,
}

/// Rule knobs the engine leaves to the caller. Defaults are the strict
/// variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rules {
    /// Whether `toggle_gate` still applies after the game is won.
    pub gate_toggles_after_win: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self { gate_toggles_after_win: false }
    }
}

/// Structural problems in a layout text. Parsing fails fast instead of
/// padding or truncating ragged input, since every downstream component
/// assumes a well-formed grid.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout text is empty")]
    Empty,
    #[error("line {line} is {found} characters wide, expected {expected}")]
    RaggedRows { line: usize, expected: usize, found: usize },
    #[error("unknown glyph {glyph:?} at ({x}, {y})")]
    UnknownGlyph { glyph: char, x: i32, y: i32 },
    #[error("layout has no start cell")]
    MissingStart,
    #[error("layout has no exit cell")]
    MissingExit,
    #[error("layout has more than one start cell, second at ({x}, {y})")]
    DuplicateStart { x: i32, y: i32 },
    #[error("layout has more than one exit cell, second at ({x}, {y})")]
    DuplicateExit { x: i32, y: i32 },
}
