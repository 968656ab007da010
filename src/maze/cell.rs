//! Grid cells, coordinates and movement directions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Wall,
    Open,
    Start,
    Exit,
}

impl Cell {
    /// Map a maze text symbol to a cell.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'X' => Some(Cell::Wall),
            'O' => Some(Cell::Open),
            'S' => Some(Cell::Start),
            'E' => Some(Cell::Exit),
            _ => None,
        }
    }

    /// The maze text symbol for this cell.
    pub fn symbol(&self) -> char {
        match self {
            Cell::Wall => 'X',
            Cell::Open => 'O',
            Cell::Start => 'S',
            Cell::Exit => 'E',
        }
    }

    /// Whether a player may stand on this cell.
    pub fn is_passable(&self) -> bool {
        !matches!(self, Cell::Wall)
    }
}

/// Grid coordinate. `x` is the column, `y` the row, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring coordinate one step in `direction`.
    ///
    /// The result may lie outside any grid; bounds are the grid's concern.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A movement direction.
///
/// The discriminants are the wire ordinals and must not be reordered;
/// clients may send a direction as its ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DirectionRepr")]
pub enum Direction {
    Up = 0,
    Down = 1,
    Right = 2,
    Left = 3,
}

impl Direction {
    /// All directions in ordinal order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Right,
        Direction::Left,
    ];

    /// Unit `(dx, dy)` offset; `y` grows downward.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Right => (1, 0),
            Direction::Left => (-1, 0),
        }
    }

    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    pub fn name(&self) -> &'static str {
        match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Right => "Right",
            Direction::Left => "Left",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a direction name or ordinal is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction: {0}")]
pub struct UnknownDirection(pub String);

impl TryFrom<u8> for Direction {
    type Error = UnknownDirection;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Direction::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| UnknownDirection(value.to_string()))
    }
}

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownDirection(s.to_string()))
    }
}

/// Accepted wire forms: `"Right"` or `2`.
#[derive(Deserialize)]
#[serde(untagged)]
enum DirectionRepr {
    Ordinal(u8),
    Name(String),
}

impl TryFrom<DirectionRepr> for Direction {
    type Error = UnknownDirection;

    fn try_from(repr: DirectionRepr) -> Result<Self, Self::Error> {
        match repr {
            DirectionRepr::Ordinal(n) => Direction::try_from(n),
            DirectionRepr::Name(name) => name.parse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_mapping() {
        for symbol in ['X', 'O', 'S', 'E'] {
            let cell = Cell::from_symbol(symbol).unwrap();
            assert_eq!(cell.symbol(), symbol);
        }
        assert_eq!(Cell::from_symbol('x'), None);
        assert_eq!(Cell::from_symbol(' '), None);
    }

    #[test]
    fn test_passable() {
        assert!(!Cell::Wall.is_passable());
        assert!(Cell::Open.is_passable());
        assert!(Cell::Start.is_passable());
        assert!(Cell::Exit.is_passable());
    }

    #[test]
    fn test_step() {
        let p = Position::new(2, 2);
        assert_eq!(p.step(Direction::Up), Position::new(2, 1));
        assert_eq!(p.step(Direction::Down), Position::new(2, 3));
        assert_eq!(p.step(Direction::Right), Position::new(3, 2));
        assert_eq!(p.step(Direction::Left), Position::new(1, 2));
    }

    #[test]
    fn test_ordinals_are_stable() {
        assert_eq!(Direction::Up.ordinal(), 0);
        assert_eq!(Direction::Down.ordinal(), 1);
        assert_eq!(Direction::Right.ordinal(), 2);
        assert_eq!(Direction::Left.ordinal(), 3);
        assert!(Direction::try_from(4).is_err());
    }

    #[test]
    fn test_parse_name() {
        assert_eq!("Right".parse::<Direction>().unwrap(), Direction::Right);
        assert_eq!("left".parse::<Direction>().unwrap(), Direction::Left);
        assert!("north".parse::<Direction>().is_err());
    }

    #[test]
    fn test_direction_serde() {
        assert_eq!(serde_json::to_string(&Direction::Down).unwrap(), "\"Down\"");

        let by_name: Direction = serde_json::from_str("\"Up\"").unwrap();
        assert_eq!(by_name, Direction::Up);

        let by_ordinal: Direction = serde_json::from_str("2").unwrap();
        assert_eq!(by_ordinal, Direction::Right);

        assert!(serde_json::from_str::<Direction>("9").is_err());
        assert!(serde_json::from_str::<Direction>("\"Sideways\"").is_err());
    }

    #[test]
    fn test_position_serde() {
        let json = serde_json::to_string(&Position::new(1, 3)).unwrap();
        assert_eq!(json, r#"{"x":1,"y":3}"#);
    }
}
