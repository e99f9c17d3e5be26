//! ASCII layout parsing into a typed grid plus initial entity placements.
//! Parsing is deterministic, idempotent, and the only place the engine can
//! fail; everything downstream assumes a well-formed grid.

use crate::state::Grid;
use crate::types::{CellKind, EnemyKind, GateGroup, LayoutError, Pos};

/// Canonical 29x29 layout: the hash maze enriched with five gate groups and
/// four enemy spawns. Gate `$` sits directly below the start, so a fresh
/// game opens with a gate toggle.
pub const DEFAULT_LAYOUT: &str = "\
##############S##############
#   #         $             #
### # ########### ######### #
# # # #         #     #  W  #
# # ### ####### ##### # ### #
#   #   #     # #   # # #   #
# ### ### ### # # # # # ### #
#     # #C#   # # # # #   # #
####### # # ### # # ##### # #
# #   #   #   #  %# #     # #
# # # # ##### ##### # ##### #
# # #   #   # #   #   #   # #
# # ##### ### # # ##### # # #
# #W  #     #   #   #   # # #
# ### ### # ####### # ### # #
#   #&  # #       # # #   # #
### ### ##### ### # # # ### #
#     #       # # #   #   # #
# ############# # ####### # #
#     #     #   #   #@    # #
# ### # # # # # # ### ### # #
#   # # # #   # # #C  #   # #
# ### # # ### ### # ####### #
# #   # #   # #   # #       #
# # ### ### ### ### # #######
# # #   # #     # # #   #   #
# # # ### ####### # ### ### #
# #           ?   #         #
##############E##############";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemySpawn {
    pub kind: EnemyKind,
    pub pos: Pos,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParsedLayout {
    pub grid: Grid,
    pub start: Pos,
    pub exit: Pos,
    pub spawns: Vec<EnemySpawn>,
}

pub fn parse_layout(text: &str) -> Result<ParsedLayout, LayoutError> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.is_empty() || lines[0].is_empty() {
        return Err(LayoutError::Empty);
    }

    let width = lines[0].chars().count();
    let height = lines.len();
    for (line, row) in lines.iter().enumerate() {
        let found = row.chars().count();
        if found != width {
            return Err(LayoutError::RaggedRows { line, expected: width, found });
        }
    }

    let mut cells = Vec::with_capacity(width * height);
    let mut start = None;
    let mut exit = None;
    let mut spawns = Vec::new();

    for (y, row) in lines.iter().enumerate() {
        for (x, glyph) in row.chars().enumerate() {
            let pos = Pos { x: x as i32, y: y as i32 };
            let cell = match glyph {
                '#' => CellKind::Wall,
                ' ' | '.' => CellKind::Floor,
                'S' => {
                    if start.replace(pos).is_some() {
                        return Err(LayoutError::DuplicateStart { x: pos.x, y: pos.y });
                    }
                    CellKind::Start
                }
                'E' => {
                    if exit.replace(pos).is_some() {
                        return Err(LayoutError::DuplicateExit { x: pos.x, y: pos.y });
                    }
                    CellKind::Exit
                }
                'W' => {
                    spawns.push(EnemySpawn { kind: EnemyKind::Wanderer, pos });
                    CellKind::Floor
                }
                'C' => {
                    spawns.push(EnemySpawn { kind: EnemyKind::Chaser, pos });
                    CellKind::Floor
                }
                glyph => match GateGroup::from_glyph(glyph) {
                    Some(group) => CellKind::Gate(group),
                    None => {
                        return Err(LayoutError::UnknownGlyph { glyph, x: pos.x, y: pos.y });
                    }
                },
            };
            cells.push(cell);
        }
    }

    let start = start.ok_or(LayoutError::MissingStart)?;
    let exit = exit.ok_or(LayoutError::MissingExit)?;
    Ok(ParsedLayout { grid: Grid { width, height, cells }, start, exit, spawns })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_parses() {
        let parsed = parse_layout(DEFAULT_LAYOUT).expect("canonical layout");
        assert_eq!(parsed.grid.width, 29);
        assert_eq!(parsed.grid.height, 29);
        assert_eq!(parsed.start, Pos { x: 14, y: 0 });
        assert_eq!(parsed.exit, Pos { x: 14, y: 28 });
        assert_eq!(parsed.spawns.len(), 4);
        let wanderers =
            parsed.spawns.iter().filter(|s| s.kind == EnemyKind::Wanderer).count();
        assert_eq!(wanderers, 2);
    }

    #[test]
    fn default_layout_has_all_five_gate_groups() {
        let parsed = parse_layout(DEFAULT_LAYOUT).expect("canonical layout");
        for id in 0..5 {
            let group = GateGroup(id);
            assert!(
                parsed.grid.cells.iter().any(|&c| c == CellKind::Gate(group)),
                "group {group:?} missing from the canonical layout"
            );
        }
    }

    #[test]
    fn spawn_cells_parse_as_floor() {
        let parsed = parse_layout("#S#\n#W#\n#E#").expect("layout");
        assert_eq!(parsed.grid.cell_at(Pos { x: 1, y: 1 }), Some(CellKind::Floor));
        assert_eq!(
            parsed.spawns,
            vec![EnemySpawn { kind: EnemyKind::Wanderer, pos: Pos { x: 1, y: 1 } }]
        );
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = parse_layout("#S#\n##\n#E#").unwrap_err();
        assert_eq!(err, LayoutError::RaggedRows { line: 1, expected: 3, found: 2 });
    }

    #[test]
    fn unknown_glyph_is_rejected_with_position() {
        let err = parse_layout("#S#\n#x#\n#E#").unwrap_err();
        assert_eq!(err, LayoutError::UnknownGlyph { glyph: 'x', x: 1, y: 1 });
    }

    #[test]
    fn missing_or_duplicate_endpoints_are_rejected() {
        assert_eq!(parse_layout("###\n# #\n#E#").unwrap_err(), LayoutError::MissingStart);
        assert_eq!(parse_layout("#S#\n# #\n###").unwrap_err(), LayoutError::MissingExit);
        assert_eq!(
            parse_layout("#S#\n#S#\n#E#").unwrap_err(),
            LayoutError::DuplicateStart { x: 1, y: 1 }
        );
        assert_eq!(
            parse_layout("#S#\n#E#\n#E#").unwrap_err(),
            LayoutError::DuplicateExit { x: 1, y: 2 }
        );
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(parse_layout(""), Err(LayoutError::Empty));
    }
}
