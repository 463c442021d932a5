use crate::board::{Board, Player};
use crate::error::IllegalMoveError;
use std::collections::VecDeque;
use std::fmt;

const NEIGHBOURS: [(isize, isize); 6] = [(0, -1), (0, 1), (-1, 0), (1, 0), (-1, 1), (1, -1)];

/// A cell coordinate on a [`HexBoard`].
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// An implementation of the `Board` trait for the game of Hex.
///
/// The board is an `n x n` rhombus stored row by row. `Player::One` connects the left and right
/// columns, `Player::Two` connects the top and bottom rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexBoard {
    size: usize,
    cells: Vec<Option<Player>>,
}

impl HexBoard {
    /// Creates an empty board with the given side length.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Parses a diagram with one string per row, using `.`, `1` and `2`. Whitespace is ignored.
    ///
    /// Returns `None` if the rows do not form a square or contain other characters.
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            let mut width = 0;
            for ch in row.chars().filter(|c| !c.is_whitespace()) {
                cells.push(match ch {
                    '.' => None,
                    '1' => Some(Player::One),
                    '2' => Some(Player::Two),
                    _ => return None,
                });
                width += 1;
            }
            if width != size {
                return None;
            }
        }
        Some(Self { size, cells })
    }

    /// Returns the stone at `cell`, if any.
    pub fn get(&self, cell: Cell) -> Option<Player> {
        self.index(cell).and_then(|i| self.cells[i])
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        (cell.row < self.size && cell.col < self.size).then(|| cell.row * self.size + cell.col)
    }

    fn neighbours(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        NEIGHBOURS.into_iter().filter_map(move |(dr, dc)| {
            let row = cell.row.checked_add_signed(dr)?;
            let col = cell.col.checked_add_signed(dc)?;
            (row < self.size && col < self.size).then_some(Cell::new(row, col))
        })
    }
}

impl Board for HexBoard {
    type Move = Cell;

    fn legal_moves(&self) -> Vec<Self::Move> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, x)| x.is_none())
            .map(|(i, _)| Cell::new(i / self.size, i % self.size))
            .collect()
    }

    fn place(&mut self, b_move: Self::Move, player: Player) -> Result<(), IllegalMoveError> {
        let index = self
            .index(b_move)
            .ok_or_else(|| IllegalMoveError::new(b_move, "cell is off the board"))?;
        if self.cells[index].is_some() {
            return Err(IllegalMoveError::new(b_move, "cell is occupied"));
        }
        self.cells[index] = Some(player);
        Ok(())
    }

    fn has_connection(&self, player: Player) -> bool {
        let starts: Vec<Cell> = (0..self.size)
            .map(|i| match player {
                Player::One => Cell::new(i, 0),
                Player::Two => Cell::new(0, i),
            })
            .filter(|&cell| self.get(cell) == Some(player))
            .collect();

        let mut seen = vec![false; self.cells.len()];
        let mut queue = VecDeque::new();
        for cell in starts {
            seen[cell.row * self.size + cell.col] = true;
            queue.push_back(cell);
        }

        while let Some(cell) = queue.pop_front() {
            let reached_far_edge = match player {
                Player::One => cell.col + 1 == self.size,
                Player::Two => cell.row + 1 == self.size,
            };
            if reached_far_edge {
                return true;
            }
            for next in self.neighbours(cell) {
                let i = next.row * self.size + next.col;
                if !seen[i] && self.cells[i] == Some(player) {
                    seen[i] = true;
                    queue.push_back(next);
                }
            }
        }
        false
    }

    fn size(&self) -> usize {
        self.size
    }
}

impl fmt::Display for HexBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            write!(f, "{}", " ".repeat(row))?;
            for col in 0..self.size {
                let symbol = match self.cells[row * self.size + col] {
                    None => '.',
                    Some(Player::One) => '1',
                    Some(Player::Two) => '2',
                };
                write!(f, "{symbol} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
