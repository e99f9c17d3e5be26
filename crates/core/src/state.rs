use std::sync::Arc;

use slotmap::SlotMap;

use crate::layout::ParsedLayout;
use crate::types::*;

/// Row-major cell grid, fixed for the lifetime of a game session. Carries
/// its own dimensions; there is no process-wide size constant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<CellKind>,
}

impl Grid {
    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) < self.width
            && (pos.y as usize) < self.height
    }

    pub fn cell_at(&self, pos: Pos) -> Option<CellKind> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(self.cells[(pos.y as usize) * self.width + (pos.x as usize)])
    }
}

/// Exclusive gate state: at most one group is open at any time, so the
/// whole registry is the identity of the open group, if any.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GateRegistry {
    open: Option<GateGroup>,
}

impl GateRegistry {
    pub fn is_open(&self, group: GateGroup) -> bool {
        self.open == Some(group)
    }

    pub fn open_group(&self) -> Option<GateGroup> {
        self.open
    }

    /// Toggling an open group closes everything; toggling a closed group
    /// opens it and closes every other group in the same operation.
    pub fn toggle(&mut self, group: GateGroup) {
        self.open = if self.open == Some(group) { None } else { Some(group) };
    }
}

/// Kind-specific behavior state. A wanderer never carries a pursuit flag
/// and a chaser never carries wander history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyBehavior {
    Wanderer { last_move: Option<Direction> },
    Chaser { active: bool },
}

impl EnemyBehavior {
    /// Sub-steps executed per end-turn call.
    pub fn moves_per_turn(self) -> u32 {
        match self {
            EnemyBehavior::Wanderer { .. } => 6,
            EnemyBehavior::Chaser { active: true } => 3,
            EnemyBehavior::Chaser { active: false } => 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Enemy {
    pub id: EnemyId,
    pub pos: Pos,
    pub behavior: EnemyBehavior,
}

impl Enemy {
    pub fn kind(&self) -> EnemyKind {
        match self.behavior {
            EnemyBehavior::Wanderer { .. } => EnemyKind::Wanderer,
            EnemyBehavior::Chaser { .. } => EnemyKind::Chaser,
        }
    }

    pub fn moves_per_turn(&self) -> u32 {
        self.behavior.moves_per_turn()
    }
}

/// The aggregate session state. Operations replace it wholesale with a new
/// snapshot; no partial mutation is observable from outside an operation.
#[derive(Clone, Debug)]
pub struct GameState {
    pub grid: Arc<Grid>,
    pub player: Pos,
    pub enemies: SlotMap<EnemyId, Enemy>,
    pub gates: GateRegistry,
    pub start: Pos,
    pub exit: Pos,
    pub turn_count: u32,
    pub in_turn_moves: u32,
    pub game_over: bool,
    pub game_won: bool,
    pub rules: Rules,
}

impl GameState {
    pub fn from_layout(parsed: &ParsedLayout, rules: Rules) -> GameState {
        let mut enemies: SlotMap<EnemyId, Enemy> = SlotMap::with_key();
        for spawn in &parsed.spawns {
            let behavior = match spawn.kind {
                EnemyKind::Wanderer => EnemyBehavior::Wanderer { last_move: None },
                EnemyKind::Chaser => EnemyBehavior::Chaser { active: false },
            };
            let id = enemies.insert(Enemy { id: EnemyId::default(), pos: spawn.pos, behavior });
            enemies[id].id = id;
        }

        GameState {
            grid: Arc::new(parsed.grid.clone()),
            player: parsed.start,
            enemies,
            gates: GateRegistry::default(),
            start: parsed.start,
            exit: parsed.exit,
            turn_count: 0,
            in_turn_moves: 0,
            game_over: false,
            game_won: false,
            rules,
        }
    }

    /// Effective walkability under the current gate state. Out of bounds
    /// and walls are never walkable; gate cells only while their group is
    /// open.
    pub fn is_walkable(&self, pos: Pos) -> bool {
        match self.grid.cell_at(pos) {
            None | Some(CellKind::Wall) => false,
            Some(CellKind::Gate(group)) => self.gates.is_open(group),
            Some(_) => true,
        }
    }
}
