use crate::cnf::{SolutionAssignment, VarId};
use std::fmt::{Display, Formatter};

/// A cell position and value, all 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub value: usize,
}

/// Sudoku metadata carried in CNF comment lines.
///
/// The encoder leaves pre-assigned cells out of the CNF entirely, so the
/// decoder needs both the variable-to-cell map (`c MAP`) and the list of
/// givens (`c FIXED`) to reconstruct the full grid.
#[derive(Debug, Clone, Default)]
pub struct PuzzleMeta {
    size: usize,
    cells: Vec<Option<Cell>>,
    fixed: Vec<Cell>,
}

/// A variable assigned true claimed a cell that already holds a different
/// value. The decoder keeps the later value and reports the collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeConflict {
    pub row: usize,
    pub col: usize,
    pub existing: usize,
    pub new: usize,
    pub var: VarId,
}

impl Display for DecodeConflict {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DECODE CONFLICT cell({},{}): existing={} new={} var={}",
            self.row, self.col, self.existing, self.new, self.var
        )
    }
}

impl PuzzleMeta {
    pub fn set_size(&mut self, size: usize) {
        self.size = size;
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Present iff the CNF carried a `c SIZE` line.
    pub fn is_present(&self) -> bool {
        self.size > 0
    }

    pub fn map_variable(&mut self, var: VarId, cell: Cell) {
        if var >= self.cells.len() {
            self.cells.resize(var + 1, None);
        }
        self.cells[var] = Some(cell);
    }

    pub fn add_fixed(&mut self, cell: Cell) {
        self.fixed.push(cell);
    }

    /// Reconstructs the grid from a satisfying assignment: givens first,
    /// then every variable assigned true via its `c MAP` entry.
    pub fn decode(&self, assignment: &SolutionAssignment) -> (Grid, Vec<DecodeConflict>) {
        let mut grid = Grid::empty(self.size);
        let mut conflicts = Vec::new();

        for cell in &self.fixed {
            if cell.row >= 1 && cell.row <= self.size && cell.col >= 1 && cell.col <= self.size {
                grid.set(cell.row, cell.col, cell.value);
            }
        }

        for (var, cell) in self.cells.iter().enumerate() {
            if assignment.get(&var) != Some(&true) {
                continue;
            }
            let Some(cell) = cell else { continue };
            if cell.row < 1
                || cell.row > self.size
                || cell.col < 1
                || cell.col > self.size
                || cell.value < 1
            {
                continue;
            }

            let existing = grid.get(cell.row, cell.col);
            if existing != 0 && existing != cell.value {
                conflicts.push(DecodeConflict {
                    row: cell.row,
                    col: cell.col,
                    existing,
                    new: cell.value,
                    var,
                });
            }
            grid.set(cell.row, cell.col, cell.value);
        }

        (grid, conflicts)
    }
}

/// An N×N grid of values, 0 meaning empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    values: Vec<usize>,
}

impl Grid {
    pub fn empty(size: usize) -> Self {
        Grid {
            size,
            values: vec![0; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Value of the cell at (row, col), both 1-indexed.
    pub fn get(&self, row: usize, col: usize) -> usize {
        self.values[(row - 1) * self.size + (col - 1)]
    }

    pub fn set(&mut self, row: usize, col: usize, value: usize) {
        self.values[(row - 1) * self.size + (col - 1)] = value;
    }

    /// Smallest box width whose square covers the grid.
    fn box_width(&self) -> usize {
        let mut base = 1;
        while base * base < self.size {
            base += 1;
        }
        base
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let base = self.box_width();
        for row in 1..=self.size {
            if row > 1 && (row - 1) % base == 0 {
                let dashes = self.size * 2 + (self.size / base - 1) * 2;
                writeln!(f, "{}", "-".repeat(dashes))?;
            }
            for col in 1..=self.size {
                if col > 1 && (col - 1) % base == 0 {
                    write!(f, "| ")?;
                }
                match self.get(row, col) {
                    0 => write!(f, ". ")?,
                    value @ 1..=9 => write!(f, "{} ", value)?,
                    value => write!(f, "{} ", (b'A' + (value - 10) as u8) as char)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnf::SolutionAssignment;

    fn meta_2x2() -> PuzzleMeta {
        // 2x2 toy board: variables 1 and 2 stand for (1,2)=2 and (2,1)=1
        let mut meta = PuzzleMeta::default();
        meta.set_size(2);
        meta.map_variable(
            1,
            Cell {
                row: 1,
                col: 2,
                value: 2,
            },
        );
        meta.map_variable(
            2,
            Cell {
                row: 2,
                col: 1,
                value: 1,
            },
        );
        meta.add_fixed(Cell {
            row: 1,
            col: 1,
            value: 1,
        });
        meta
    }

    #[test]
    fn test_decode_stamps_fixed_and_true_vars() {
        let meta = meta_2x2();
        let mut assignment = SolutionAssignment::default();
        assignment.insert(1, true);
        assignment.insert(2, false);

        let (grid, conflicts) = meta.decode(&assignment);
        assert!(conflicts.is_empty());
        assert_eq!(grid.get(1, 1), 1);
        assert_eq!(grid.get(1, 2), 2);
        assert_eq!(grid.get(2, 1), 0);
    }

    #[test]
    fn test_decode_reports_conflicts() {
        let mut meta = meta_2x2();
        // second variable claiming (1,1) with a different value
        meta.map_variable(
            3,
            Cell {
                row: 1,
                col: 1,
                value: 2,
            },
        );
        let mut assignment = SolutionAssignment::default();
        assignment.insert(3, true);

        let (grid, conflicts) = meta.decode(&assignment);
        assert_eq!(
            conflicts,
            vec![DecodeConflict {
                row: 1,
                col: 1,
                existing: 1,
                new: 2,
                var: 3,
            }]
        );
        // last stamp wins
        assert_eq!(grid.get(1, 1), 2);
    }

    #[test]
    fn test_grid_display() {
        let mut grid = Grid::empty(4);
        let rows = [[1, 2, 3, 4], [3, 4, 1, 2], [2, 1, 4, 3], [4, 3, 2, 1]];
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                grid.set(r + 1, c + 1, *value);
            }
        }
        let expected = "1 2 | 3 4 \n\
                        3 4 | 1 2 \n\
                        ----------\n\
                        2 1 | 4 3 \n\
                        4 3 | 2 1 \n";
        assert_eq!(grid.to_string(), expected);
    }

    #[test]
    fn test_grid_display_letters_and_empty() {
        let mut grid = Grid::empty(2);
        grid.set(1, 1, 10);
        grid.set(2, 2, 11);
        assert_eq!(grid.to_string(), "A . \n. B \n");
    }
}
