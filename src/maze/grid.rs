//! Maze text validation and parsing.
//!
//! Maze text is one row per line using the symbols `S` (start), `E` (exit),
//! `O` (open floor) and `X` (wall). Line endings are normalised to `\n` and
//! blank lines are ignored before any rule is checked. Rules are checked in a
//! fixed order and the first violation found is reported:
//!
//! 1. non-empty after trimming whitespace, and at most [`MAX_MAZE_BYTES`]
//! 2. row count within `[MIN_DIMENSION, MAX_DIMENSION]`
//! 3. width of the first row within `[MIN_DIMENSION, MAX_DIMENSION]`
//! 4. row-major scan: ragged rows, illegal symbols, duplicate start/exit
//! 5. missing start, then missing exit

use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

use super::cell::{Cell, Position};

/// Smallest accepted row count and row width.
pub const MIN_DIMENSION: usize = 2;

/// Largest accepted row count and row width.
pub const MAX_DIMENSION: usize = 1000;

/// Largest accepted maze text, in bytes.
pub const MAX_MAZE_BYTES: usize = 1024 * 1024;

/// Why a maze upload was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidMazeReason {
    #[error("maze content cannot be empty")]
    Empty,

    #[error(
        "size out of bounds: maze text is at least {size} bytes; maximum is {max} bytes",
        max = MAX_MAZE_BYTES
    )]
    TooLarge { size: usize },

    #[error(
        "size out of bounds: maze has {rows} rows; must be between {min} and {max}",
        min = MIN_DIMENSION,
        max = MAX_DIMENSION
    )]
    RowCount { rows: usize },

    #[error(
        "size out of bounds: maze width is {width} columns; must be between {min} and {max}",
        min = MIN_DIMENSION,
        max = MAX_DIMENSION
    )]
    Width { width: usize },

    #[error("ragged rows: row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("illegal character {symbol:?} at {position}")]
    IllegalCharacter { symbol: char, position: Position },

    #[error("missing start (S) position")]
    MissingStart,

    #[error("duplicate start (S) position at {0}")]
    DuplicateStart(Position),

    #[error("missing exit (E) position")]
    MissingExit,

    #[error("duplicate exit (E) position at {0}")]
    DuplicateExit(Position),
}

/// A rectangular grid of cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The cell at `position`, or `None` when it lies outside the grid.
    pub fn get(&self, position: Position) -> Option<Cell> {
        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y * self.width + x).copied()
    }

    /// Whether a player may stand at `position`.
    ///
    /// Out-of-bounds positions are never passable.
    pub fn is_passable(&self, position: Position) -> bool {
        self.get(position).is_some_and(|cell| cell.is_passable())
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}

/// Grids travel over the wire as maze text, rows joined by `\n`.
impl Serialize for Grid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Result of a successful parse.
#[derive(Debug, Clone)]
pub struct ParsedMaze {
    pub grid: Grid,
    pub start: Position,
    pub exit: Position,
}

/// Normalise `\r\n` and lone `\r` to `\n`.
pub fn normalize_line_endings(raw: &str) -> String {
    raw.replace("\r\n", "\n").replace('\r', "\n")
}

/// Validate and parse raw maze text.
pub fn parse_grid(raw: &str) -> Result<ParsedMaze, InvalidMazeReason> {
    if raw.len() > MAX_MAZE_BYTES {
        return Err(InvalidMazeReason::TooLarge { size: raw.len() });
    }

    let content = normalize_line_endings(raw);
    if content.trim().is_empty() {
        return Err(InvalidMazeReason::Empty);
    }

    let lines: Vec<&str> = content.split('\n').filter(|l| !l.is_empty()).collect();
    let height = lines.len();
    if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&height) {
        return Err(InvalidMazeReason::RowCount { rows: height });
    }

    let width = lines[0].chars().count();
    if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&width) {
        return Err(InvalidMazeReason::Width { width });
    }

    let mut cells = Vec::with_capacity(width * height);
    let mut start = None;
    let mut exit = None;

    for (y, line) in lines.iter().enumerate() {
        let found = line.chars().count();
        if found != width {
            return Err(InvalidMazeReason::RaggedRow {
                row: y,
                expected: width,
                found,
            });
        }

        for (x, symbol) in line.chars().enumerate() {
            // Both bounded by MAX_DIMENSION.
            let position = Position::new(x as i32, y as i32);
            let cell = Cell::from_symbol(symbol)
                .ok_or(InvalidMazeReason::IllegalCharacter { symbol, position })?;

            match cell {
                Cell::Start if start.is_some() => {
                    return Err(InvalidMazeReason::DuplicateStart(position));
                }
                Cell::Start => start = Some(position),
                Cell::Exit if exit.is_some() => {
                    return Err(InvalidMazeReason::DuplicateExit(position));
                }
                Cell::Exit => exit = Some(position),
                Cell::Open | Cell::Wall => {}
            }

            cells.push(cell);
        }
    }

    let start = start.ok_or(InvalidMazeReason::MissingStart)?;
    let exit = exit.ok_or(InvalidMazeReason::MissingExit)?;

    Ok(ParsedMaze {
        grid: Grid {
            width,
            height,
            cells,
        },
        start,
        exit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORRIDOR: &str = "XXXXX\nXSOEX\nXXXXX";

    #[test]
    fn test_parse_corridor() {
        let parsed = parse_grid(CORRIDOR).unwrap();
        assert_eq!(parsed.grid.width(), 5);
        assert_eq!(parsed.grid.height(), 3);
        assert_eq!(parsed.start, Position::new(1, 1));
        assert_eq!(parsed.exit, Position::new(3, 1));
        assert_eq!(parsed.grid.get(Position::new(2, 1)), Some(Cell::Open));
        assert_eq!(parsed.grid.get(Position::new(0, 0)), Some(Cell::Wall));
    }

    #[test]
    fn test_display_roundtrips_text() {
        let parsed = parse_grid(CORRIDOR).unwrap();
        assert_eq!(parsed.grid.to_string(), CORRIDOR);
        assert_eq!(
            serde_json::to_string(&parsed.grid).unwrap(),
            "\"XXXXX\\nXSOEX\\nXXXXX\""
        );
    }

    #[test]
    fn test_line_endings_and_blank_lines() {
        let parsed = parse_grid("SO\r\nOE\r\n").unwrap();
        assert_eq!(parsed.grid.height(), 2);

        let parsed = parse_grid("SO\rOE").unwrap();
        assert_eq!(parsed.exit, Position::new(1, 1));

        let parsed = parse_grid("SO\n\nOE\n\n").unwrap();
        assert_eq!(parsed.grid.height(), 2);
    }

    #[test]
    fn test_out_of_bounds_lookup() {
        let parsed = parse_grid(CORRIDOR).unwrap();
        assert_eq!(parsed.grid.get(Position::new(-1, 0)), None);
        assert_eq!(parsed.grid.get(Position::new(0, -1)), None);
        assert_eq!(parsed.grid.get(Position::new(5, 0)), None);
        assert_eq!(parsed.grid.get(Position::new(0, 3)), None);
        assert!(!parsed.grid.is_passable(Position::new(5, 1)));
    }

    #[test]
    fn test_empty() {
        assert_eq!(parse_grid("").unwrap_err(), InvalidMazeReason::Empty);
        assert_eq!(parse_grid(" \n\t\r\n").unwrap_err(), InvalidMazeReason::Empty);
    }

    #[test]
    fn test_too_large() {
        let raw = "O".repeat(MAX_MAZE_BYTES + 1);
        let err = parse_grid(&raw).unwrap_err();
        assert_eq!(err, InvalidMazeReason::TooLarge { size: MAX_MAZE_BYTES + 1 });
        assert!(err.to_string().starts_with("size out of bounds"));
    }

    #[test]
    fn test_row_count_bounds() {
        assert_eq!(
            parse_grid("SOE").unwrap_err(),
            InvalidMazeReason::RowCount { rows: 1 }
        );

        let mut rows = vec!["SE".to_string()];
        rows.extend(std::iter::repeat("OO".to_string()).take(MAX_DIMENSION));
        assert_eq!(
            parse_grid(&rows.join("\n")).unwrap_err(),
            InvalidMazeReason::RowCount {
                rows: MAX_DIMENSION + 1
            }
        );
    }

    #[test]
    fn test_width_bounds() {
        assert_eq!(
            parse_grid("S\nE").unwrap_err(),
            InvalidMazeReason::Width { width: 1 }
        );

        let wide = format!("S{}\n{}E", "O".repeat(MAX_DIMENSION), "O".repeat(MAX_DIMENSION));
        assert_eq!(
            parse_grid(&wide).unwrap_err(),
            InvalidMazeReason::Width {
                width: MAX_DIMENSION + 1
            }
        );
    }

    #[test]
    fn test_max_dimensions_accepted() {
        let mut rows = vec![format!("S{}", "O".repeat(MAX_DIMENSION - 1))];
        rows.extend(std::iter::repeat("X".repeat(MAX_DIMENSION)).take(MAX_DIMENSION - 2));
        rows.push(format!("{}E", "O".repeat(MAX_DIMENSION - 1)));
        let parsed = parse_grid(&rows.join("\n")).unwrap();
        assert_eq!(parsed.grid.width(), MAX_DIMENSION);
        assert_eq!(parsed.grid.height(), MAX_DIMENSION);
    }

    #[test]
    fn test_ragged_rows() {
        assert_eq!(
            parse_grid("XXXX\nXSEX\nXXX").unwrap_err(),
            InvalidMazeReason::RaggedRow {
                row: 2,
                expected: 4,
                found: 3
            }
        );
    }

    #[test]
    fn test_illegal_character() {
        let err = parse_grid("XXXX\nXS#E\nXXXX").unwrap_err();
        assert_eq!(
            err,
            InvalidMazeReason::IllegalCharacter {
                symbol: '#',
                position: Position::new(2, 1)
            }
        );
        assert!(err.to_string().contains("illegal character"));

        // Trailing whitespace is not silently stripped.
        assert!(matches!(
            parse_grid("SO \nOE "),
            Err(InvalidMazeReason::IllegalCharacter { symbol: ' ', .. })
        ));
    }

    #[test]
    fn test_missing_start() {
        let err = parse_grid("XXXX\nXOEX\nXXXX").unwrap_err();
        assert_eq!(err, InvalidMazeReason::MissingStart);
        assert!(err.to_string().contains("missing start"));
    }

    #[test]
    fn test_missing_exit() {
        let err = parse_grid("XXXX\nXSOX\nXXXX").unwrap_err();
        assert_eq!(err, InvalidMazeReason::MissingExit);
        assert!(err.to_string().contains("missing exit"));
    }

    #[test]
    fn test_duplicate_start() {
        let err = parse_grid("XXXXX\nXSSEX\nXXXXX").unwrap_err();
        assert_eq!(err, InvalidMazeReason::DuplicateStart(Position::new(2, 1)));
        assert!(err.to_string().contains("duplicate start"));
    }

    #[test]
    fn test_duplicate_exit() {
        let err = parse_grid("XXXXX\nXSEEX\nXXXXX").unwrap_err();
        assert_eq!(err, InvalidMazeReason::DuplicateExit(Position::new(3, 1)));
        assert!(err.to_string().contains("duplicate exit"));
    }

    #[test]
    fn test_first_violation_in_scan_order_wins() {
        // The duplicate exit on row 0 is met before the duplicate start on row 1.
        let err = parse_grid("EEO\nSSO").unwrap_err();
        assert_eq!(err, InvalidMazeReason::DuplicateExit(Position::new(1, 0)));

        // Missing start is reported before missing exit.
        assert_eq!(
            parse_grid("OO\nOO").unwrap_err(),
            InvalidMazeReason::MissingStart
        );
    }
}
