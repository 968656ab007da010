//! Per-session game state and the move engine.
//!
//! A session is either active or complete. Legal moves step onto in-bounds,
//! non-wall cells. Reaching the exit completes the session, which is terminal:
//! `available_moves` is empty from then on and every further move is refused.
//! A refused move never changes the state.

use serde::Serialize;

use super::SessionId;
use crate::error::MazeError;
use crate::maze::{Cell, Direction, Grid, MazeDefinition, MazeId, Position};
use crate::Result;

/// One player's progress through one maze.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub session_id: SessionId,
    pub maze_id: MazeId,
    pub current_position: Position,
    pub is_complete: bool,
    /// Legal directions from `current_position`, in ordinal order.
    pub available_moves: Vec<Direction>,
}

/// Directions whose neighbouring cell is passable, in ordinal order.
pub fn available_moves(grid: &Grid, position: Position) -> Vec<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|&d| grid.is_passable(position.step(d)))
        .collect()
}

impl GameState {
    /// A fresh session standing on the maze's start cell.
    pub fn new(session_id: SessionId, maze: &MazeDefinition) -> Self {
        Self {
            session_id,
            maze_id: maze.id.clone(),
            current_position: maze.start,
            is_complete: false,
            available_moves: available_moves(&maze.grid, maze.start),
        }
    }

    /// Move one step in `direction` on `maze`.
    ///
    /// On error the state is left exactly as it was.
    pub fn apply_move(&mut self, maze: &MazeDefinition, direction: Direction) -> Result<()> {
        if self.is_complete {
            return Err(MazeError::GameComplete);
        }
        if maze.id != self.maze_id {
            return Err(MazeError::Internal(format!(
                "session {} belongs to maze {}, not {}",
                self.session_id, self.maze_id, maze.id
            )));
        }

        let candidate = self.current_position.step(direction);
        let cell = match maze.grid.get(candidate) {
            Some(cell) if cell.is_passable() => cell,
            _ => return Err(MazeError::InvalidMove(direction)),
        };

        self.current_position = candidate;
        self.is_complete = cell == Cell::Exit;
        self.available_moves = if self.is_complete {
            Vec::new()
        } else {
            available_moves(&maze.grid, candidate)
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::parse_grid;

    fn maze(text: &str) -> MazeDefinition {
        let parsed = parse_grid(text).unwrap();
        MazeDefinition {
            id: MazeId::from("test"),
            name: "test".into(),
            grid: parsed.grid,
            start: parsed.start,
            exit: parsed.exit,
        }
    }

    #[test]
    fn test_new_session_at_start() {
        let maze = maze("XXXXX\nXSOEX\nXXXXX");
        let state = GameState::new(SessionId::new(), &maze);
        assert_eq!(state.current_position, Position::new(1, 1));
        assert!(!state.is_complete);
        assert_eq!(state.available_moves, vec![Direction::Right]);
    }

    #[test]
    fn test_walk_to_exit() {
        let maze = maze("XXXXX\nXSOEX\nXXXXX");
        let mut state = GameState::new(SessionId::new(), &maze);

        state.apply_move(&maze, Direction::Right).unwrap();
        assert_eq!(state.current_position, Position::new(2, 1));
        assert!(!state.is_complete);
        assert_eq!(state.available_moves, vec![Direction::Right, Direction::Left]);

        state.apply_move(&maze, Direction::Right).unwrap();
        assert_eq!(state.current_position, Position::new(3, 1));
        assert!(state.is_complete);
        assert!(state.available_moves.is_empty());
    }

    #[test]
    fn test_complete_is_terminal() {
        let maze = maze("SE\nXX");
        let mut state = GameState::new(SessionId::new(), &maze);
        state.apply_move(&maze, Direction::Right).unwrap();

        let before = state.clone();
        for direction in Direction::ALL {
            assert!(matches!(
                state.apply_move(&maze, direction),
                Err(MazeError::GameComplete)
            ));
        }
        assert_eq!(state, before);
    }

    #[test]
    fn test_wall_is_illegal() {
        let maze = maze("XXXXX\nXSOEX\nXXXXX");
        let mut state = GameState::new(SessionId::new(), &maze);
        let before = state.clone();

        let err = state.apply_move(&maze, Direction::Up).unwrap_err();
        assert!(matches!(err, MazeError::InvalidMove(Direction::Up)));
        assert_eq!(err.to_string(), "invalid move: Up");
        assert_eq!(state, before);
    }

    #[test]
    fn test_out_of_bounds_is_illegal() {
        // Start in the top-left corner with open cells on two sides.
        let maze = maze("SO\nOE");
        let mut state = GameState::new(SessionId::new(), &maze);
        assert_eq!(state.available_moves, vec![Direction::Down, Direction::Right]);

        assert!(matches!(
            state.apply_move(&maze, Direction::Up),
            Err(MazeError::InvalidMove(Direction::Up))
        ));
        assert!(matches!(
            state.apply_move(&maze, Direction::Left),
            Err(MazeError::InvalidMove(Direction::Left))
        ));
        assert_eq!(state.current_position, Position::new(0, 0));
    }

    #[test]
    fn test_start_cell_is_passable() {
        let maze = maze("XXXX\nXSOX\nXXEX");
        let mut state = GameState::new(SessionId::new(), &maze);
        state.apply_move(&maze, Direction::Right).unwrap();
        assert!(state.available_moves.contains(&Direction::Left));
        state.apply_move(&maze, Direction::Left).unwrap();
        assert_eq!(state.current_position, maze.start);
    }

    #[test]
    fn test_available_moves_all_directions() {
        let maze = maze("XOX\nOSO\nXEX");
        let state = GameState::new(SessionId::new(), &maze);
        assert_eq!(state.available_moves, Direction::ALL.to_vec());
    }

    #[test]
    fn test_serialization_field_names() {
        let maze = maze("XXXXX\nXSOEX\nXXXXX");
        let state = GameState::new(SessionId::new(), &maze);
        let json = serde_json::to_value(&state).unwrap();

        assert_eq!(json["sessionId"], state.session_id.to_string());
        assert_eq!(json["mazeId"], "test");
        assert_eq!(json["currentPosition"]["x"], 1);
        assert_eq!(json["currentPosition"]["y"], 1);
        assert_eq!(json["isComplete"], false);
        assert_eq!(json["availableMoves"], serde_json::json!(["Right"]));
    }
}
