//! Grid maze sub-game
//!
//! A fixed-topology maze entered through a portal pickup. The player walks
//! cell to cell eating pellets while a single chaser pursues with a greedy
//! Manhattan step - deliberately not a pathfinder, so it can be shaken off
//! around pillars.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Maze width in cells
pub const MAZE_WIDTH: usize = 13;
/// Maze height in cells
pub const MAZE_HEIGHT: usize = 11;

/// Fixed wall layout. `#` wall, `.` pellet, `o` power pellet, `P` player
/// start, `C` chaser start, `E` exit.
const LAYOUT: [&str; MAZE_HEIGHT] = [
    "#############",
    "#o.........o#",
    "#.#.#.#.#.#.#",
    "#...........#",
    "#.#.#.#.#.#.#",
    "#.....C.....#",
    "#.#.#.#.#.#.#",
    "#...........#",
    "#.#.#.#.#.#.#",
    "#P....#....E#",
    "#############",
];

/// A maze cell position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellCoord {
    pub x: i8,
    pub y: i8,
}

impl CellCoord {
    pub fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }
}

/// Per-cell flags
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Cell {
    pub walkable: bool,
    pub pellet: bool,
    pub power: bool,
}

/// What the player picked up by entering a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PelletKind {
    Plain,
    Power,
}

/// Result of a player move attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    /// Destination is a wall or out of bounds; nothing changed
    Blocked,
    /// Player moved, possibly collecting a pellet
    Moved(Option<PelletKind>),
}

/// State of one maze visit. Created fresh on every portal pickup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MazeState {
    cells: [[Cell; MAZE_WIDTH]; MAZE_HEIGHT],
    pub player: CellCoord,
    pub chaser: CellCoord,
    pub exit: CellCoord,
    /// Simulation-clock deadline for the forced return to the runner
    pub deadline_ms: f64,
    /// Simulation-clock timestamp of the chaser's next step
    pub next_chaser_step_ms: f64,
    /// Chaser steps still skipped after a power pellet
    pub chaser_frozen_steps: u8,
    pub pellets_remaining: u16,
}

impl MazeState {
    /// Build the fixed maze, anchored to the current simulation clock
    pub fn new(clock_ms: f64) -> Self {
        let mut cells = [[Cell::default(); MAZE_WIDTH]; MAZE_HEIGHT];
        let mut player = CellCoord::new(0, 0);
        let mut chaser = CellCoord::new(0, 0);
        let mut exit = CellCoord::new(0, 0);
        let mut pellets_remaining = 0u16;

        for (y, row) in LAYOUT.iter().enumerate() {
            for (x, ch) in row.bytes().enumerate() {
                let cell = &mut cells[y][x];
                match ch {
                    b'#' => {}
                    b'.' => {
                        cell.walkable = true;
                        cell.pellet = true;
                        pellets_remaining += 1;
                    }
                    b'o' => {
                        cell.walkable = true;
                        cell.pellet = true;
                        cell.power = true;
                        pellets_remaining += 1;
                    }
                    b'P' => {
                        cell.walkable = true;
                        player = CellCoord::new(x as i8, y as i8);
                    }
                    b'C' => {
                        cell.walkable = true;
                        cell.pellet = true;
                        pellets_remaining += 1;
                        chaser = CellCoord::new(x as i8, y as i8);
                    }
                    b'E' => {
                        cell.walkable = true;
                        exit = CellCoord::new(x as i8, y as i8);
                    }
                    _ => {}
                }
            }
        }

        Self {
            cells,
            player,
            chaser,
            exit,
            deadline_ms: clock_ms + MAZE_TIME_LIMIT_MS,
            next_chaser_step_ms: clock_ms + MAZE_CHASER_STEP_MS,
            chaser_frozen_steps: 0,
            pellets_remaining,
        }
    }

    /// Whether a cell is inside the grid and not a wall
    pub fn is_walkable(&self, x: i8, y: i8) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        x < MAZE_WIDTH && y < MAZE_HEIGHT && self.cells[y][x].walkable
    }

    /// Pellet flags at a cell (testing/presentation)
    pub fn cell(&self, x: i8, y: i8) -> Option<&Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.cells
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
    }

    /// Attempt to move the player one cell. Wall moves are rejected without
    /// touching any state; accepted moves collect the destination pellet.
    pub fn move_player(&mut self, dx: i8, dy: i8) -> MoveResult {
        let nx = self.player.x + dx;
        let ny = self.player.y + dy;
        if !self.is_walkable(nx, ny) {
            return MoveResult::Blocked;
        }
        self.player = CellCoord::new(nx, ny);

        let cell = &mut self.cells[ny as usize][nx as usize];
        if cell.pellet {
            cell.pellet = false;
            self.pellets_remaining = self.pellets_remaining.saturating_sub(1);
            let kind = if cell.power {
                cell.power = false;
                PelletKind::Power
            } else {
                PelletKind::Plain
            };
            MoveResult::Moved(Some(kind))
        } else {
            MoveResult::Moved(None)
        }
    }

    /// Freeze the chaser for a number of its steps (power pellet effect)
    pub fn freeze_chaser(&mut self, steps: u8) {
        self.chaser_frozen_steps = steps;
    }

    /// Advance the chaser one greedy step: reduce Manhattan distance along
    /// the larger-magnitude axis, falling back to the other axis if blocked,
    /// staying put if both are.
    pub fn advance_chaser(&mut self) {
        if self.chaser_frozen_steps > 0 {
            self.chaser_frozen_steps -= 1;
            return;
        }
        let dx = self.player.x - self.chaser.x;
        let dy = self.player.y - self.chaser.y;
        if dx == 0 && dy == 0 {
            return;
        }

        let step_x = (dx.signum(), 0);
        let step_y = (0, dy.signum());
        let attempts = if dx.abs() >= dy.abs() {
            [step_x, step_y]
        } else {
            [step_y, step_x]
        };

        for (sx, sy) in attempts {
            if sx == 0 && sy == 0 {
                continue;
            }
            let nx = self.chaser.x + sx;
            let ny = self.chaser.y + sy;
            if self.is_walkable(nx, ny) {
                self.chaser = CellCoord::new(nx, ny);
                return;
            }
        }
    }

    /// Player reached the exit cell
    pub fn player_exited(&self) -> bool {
        self.player == self.exit
    }

    /// Chaser occupies the player's cell
    pub fn chaser_caught(&self) -> bool {
        self.chaser == self.player
    }
}
