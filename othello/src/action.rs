use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Placing a piece on a square.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub row: usize,
    pub col: usize,
}

impl Action {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn from_index(index: usize, size: usize) -> Self {
        Self::new(index / size, index % size)
    }

    pub fn index(&self, size: usize) -> usize {
        self.row * size + self.col
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let column = (b'a' + self.col as u8) as char;
        write!(f, "{}{}", column, self.row + 1)
    }
}
