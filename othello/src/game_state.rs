use std::fmt::{self, Display, Formatter};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use super::Action;

pub const MOVER: i8 = 1;
pub const OPPONENT: i8 = -1;
pub const EMPTY: i8 = 0;

const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// An Othello board seen by the player to move: `MOVER` pieces belong to them, `OPPONENT` pieces
/// to the other player.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    size: usize,
    cells: Vec<i8>,
}

impl GameState {
    /// The standard opening: four pieces in the centre, the first mover on the anti-diagonal.
    pub fn initial(size: usize) -> Self {
        let mut cells = vec![EMPTY; size * size];
        let m = size / 2;

        cells[(m - 1) * size + m] = MOVER;
        cells[m * size + (m - 1)] = MOVER;
        cells[(m - 1) * size + (m - 1)] = OPPONENT;
        cells[m * size + m] = OPPONENT;

        Self { size, cells }
    }

    /// A board from row major cells, each one of `MOVER`, `OPPONENT` or `EMPTY`.
    pub fn from_cells(size: usize, cells: Vec<i8>) -> Result<Self> {
        if cells.len() != size * size {
            return Err(anyhow!(
                "A board of size {} has {} cells, got {}",
                size,
                size * size,
                cells.len()
            ));
        }

        if let Some(cell) = cells
            .iter()
            .find(|c| !matches!(**c, MOVER | OPPONENT | EMPTY))
        {
            return Err(anyhow!("Invalid cell value {}", cell));
        }

        Ok(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[i8] {
        &self.cells
    }

    pub fn cell(&self, row: usize, col: usize) -> i8 {
        self.cells[row * self.size + col]
    }

    pub fn piece_count(&self, player: i8) -> usize {
        self.cells.iter().filter(|c| **c == player).count()
    }

    /// Squares whose pieces would flip if `player` placed a piece at `action`.
    /// Empty when the placement is not legal.
    pub fn flips(&self, action: &Action, player: i8) -> Vec<usize> {
        let size = self.size as isize;
        let mut flips = Vec::new();

        if action.row >= self.size
            || action.col >= self.size
            || self.cell(action.row, action.col) != EMPTY
        {
            return flips;
        }

        for (d_row, d_col) in DIRECTIONS {
            let mut row = action.row as isize + d_row;
            let mut col = action.col as isize + d_col;
            let mut line = Vec::new();

            while row >= 0 && row < size && col >= 0 && col < size {
                let index = (row * size + col) as usize;
                match self.cells[index] {
                    c if c == -player => line.push(index),
                    c if c == player => {
                        flips.append(&mut line);
                        break;
                    }
                    _ => break,
                }
                row += d_row;
                col += d_col;
            }
        }

        flips
    }

    pub fn valid_actions(&self, player: i8) -> Vec<Action> {
        (0..self.cells.len())
            .map(|index| Action::from_index(index, self.size))
            .filter(|action| !self.flips(action, player).is_empty())
            .collect()
    }

    pub fn has_actions(&self, player: i8) -> bool {
        (0..self.cells.len())
            .any(|index| !self.flips(&Action::from_index(index, self.size), player).is_empty())
    }

    /// Neither player can place a piece.
    pub fn is_finished(&self) -> bool {
        !self.has_actions(MOVER) && !self.has_actions(OPPONENT)
    }

    /// Places a mover piece and flips the captured lines. Returns `None` for an illegal placement.
    pub fn place(&self, action: &Action) -> Option<Self> {
        let flips = self.flips(action, MOVER);
        if flips.is_empty() {
            return None;
        }

        let mut cells = self.cells.clone();
        cells[action.index(self.size)] = MOVER;
        for index in flips {
            cells[index] = MOVER;
        }

        Some(Self {
            size: self.size,
            cells,
        })
    }

    /// The same board seen by the other player.
    pub fn inverted(&self) -> Self {
        Self {
            size: self.size,
            cells: self.cells.iter().map(|c| -c).collect(),
        }
    }

    /// Mover plane followed by opponent plane.
    pub fn to_input(&self) -> Vec<f32> {
        let mover = self.cells.iter().map(|c| (*c == MOVER) as u8 as f32);
        let opponent = self.cells.iter().map(|c| (*c == OPPONENT) as u8 as f32);

        mover.chain(opponent).collect()
    }
}

impl Display for GameState {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for row in 0..self.size {
            let line: String = (0..self.size)
                .map(|col| match self.cell(row, col) {
                    MOVER => 'X',
                    OPPONENT => 'O',
                    _ => '.',
                })
                .collect();
            writeln!(f, "{}", line)?;
        }

        Ok(())
    }
}
