use flate2::read::GzDecoder;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

use crate::cnf::{Clause, Literal, Solution};
use crate::sudoku::{Cell, PuzzleMeta};
use itertools::Itertools;

#[derive(Debug, Error)]
pub enum DimacsError {
    #[error("file {0} not found")]
    FileNotFound(String),
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("file contained no 'p cnf' header")]
    MissingHeader,
    #[error("invalid DIMACS header '{0}'")]
    InvalidHeader(String),
    #[error("could not parse literal '{0}'")]
    InvalidLiteral(String),
    #[error("literal {0} out of range for {1} variables")]
    LiteralOutOfRange(i32, usize),
    #[error("last clause is not terminated by 0")]
    UnterminatedClause,
}

pub struct DimacsFile {
    pub num_vars: usize,
    pub clauses: Vec<Clause>,
    pub puzzle: PuzzleMeta,
}

pub fn clauses_from_dimacs_file(path: &str) -> Result<DimacsFile, DimacsError> {
    if !Path::new(path).exists() {
        return Err(DimacsError::FileNotFound(path.to_string()));
    }

    let read_error = |source| DimacsError::Io {
        path: path.to_string(),
        source,
    };

    clauses_from_dimacs(&if path.ends_with(".gz") {
        let file = std::fs::File::open(path).map_err(read_error)?;
        let mut decoder = GzDecoder::new(file);
        let mut result_string = String::new();
        decoder
            .read_to_string(&mut result_string)
            .map_err(read_error)?;
        result_string
    } else {
        std::fs::read_to_string(path).map_err(read_error)?
    })
}

pub fn clauses_from_dimacs(input: &str) -> Result<DimacsFile, DimacsError> {
    let mut puzzle = PuzzleMeta::default();
    let mut body: Vec<&str> = Vec::new();

    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        // '%' ends the formula in SATLIB benchmark files
        if line.starts_with('%') {
            break;
        }
        if line.starts_with('c') {
            parse_puzzle_comment(line, &mut puzzle);
            continue;
        }
        body.push(line);
    }

    // parse header
    let header_line = *body.first().ok_or(DimacsError::MissingHeader)?;
    let header = header_line.split_whitespace().collect::<Vec<&str>>();
    if header.len() != 4 || header[0] != "p" || header[1] != "cnf" {
        return Err(DimacsError::InvalidHeader(header_line.to_string()));
    }
    let num_vars = header[2]
        .parse::<usize>()
        .map_err(|_| DimacsError::InvalidHeader(header_line.to_string()))?;
    // the declared clause count is advisory, only its format is checked
    let _declared_clauses = header[3]
        .parse::<usize>()
        .map_err(|_| DimacsError::InvalidHeader(header_line.to_string()))?;

    let literals = body[1..]
        .iter()
        .join(" ")
        .split_whitespace()
        .map(|token| {
            token
                .parse::<Literal>()
                .map_err(|_| DimacsError::InvalidLiteral(token.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    for lit in &literals {
        if lit.id() > num_vars {
            return Err(DimacsError::LiteralOutOfRange(lit.value(), num_vars));
        }
    }

    let mut clauses = literals
        .split(|lit| lit.id() == 0)
        .map(|clause| clause.to_vec())
        .collect_vec();

    if !clauses.is_empty() && !clauses.last().unwrap().is_empty() {
        return Err(DimacsError::UnterminatedClause);
    }
    clauses.pop();

    // normalize: sort clauses and remove duplicate literals
    for clause in clauses.iter_mut() {
        clause.sort();
        clause.dedup();
    }

    let clauses = clauses.into_iter().map(Clause::from).collect_vec();

    Ok(DimacsFile {
        num_vars,
        clauses,
        puzzle,
    })
}

/// Recognizes the three comment forms the Sudoku decoder relies on.
/// Anything else starting with 'c' is an ordinary comment.
fn parse_puzzle_comment(line: &str, puzzle: &mut PuzzleMeta) {
    let tokens = line.split_whitespace().collect_vec();
    match tokens.as_slice() {
        ["c", "SIZE", n] => {
            if let Ok(n) = n.parse() {
                puzzle.set_size(n);
            }
        }
        ["c", "MAP", var, row, col, value] => {
            if let (Ok(var), Ok(row), Ok(col), Ok(value)) =
                (var.parse(), row.parse(), col.parse(), value.parse())
            {
                puzzle.map_variable(var, Cell { row, col, value });
            }
        }
        ["c", "FIXED", row, col, value] => {
            if let (Ok(row), Ok(col), Ok(value)) = (row.parse(), col.parse(), value.parse()) {
                puzzle.add_fixed(Cell { row, col, value });
            }
        }
        _ => {}
    }
}

/// Formats the result the way the solver reports it on stdout:
/// `SAT` plus a `v` line with one entry per variable, or `UNSAT`.
/// Variables missing from the assignment default to positive.
pub fn solution_to_dimacs(solution: &Solution, num_vars: usize) -> String {
    let Some(assignment) = solution else {
        return String::from("UNSAT");
    };

    let mut dimacs = String::from("SAT\nv");
    for var in 1..=num_vars {
        let positive = assignment.get(&var).copied().unwrap_or(true);
        dimacs.push_str(&format!(" {}", Literal::from_value(var, positive)));
    }
    dimacs.push_str(" 0");
    dimacs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnf::SolutionAssignment;

    #[test]
    fn test_parse_simple_cnf() {
        let file = clauses_from_dimacs("p cnf 3 3\n1 2 0\n-1 3 0\n-2 -3 0\n").unwrap();
        assert_eq!(file.num_vars, 3);
        assert_eq!(file.clauses.len(), 3);
        assert_eq!(file.clauses[0], Clause::from("1 2"));
        assert_eq!(file.clauses[2], Clause::from("-3 -2"));
        assert!(!file.puzzle.is_present());
    }

    #[test]
    fn test_parse_normalizes_clauses() {
        let file = clauses_from_dimacs("p cnf 2 1\n2 1 2 0\n").unwrap();
        assert_eq!(file.clauses[0], Clause::from("1 2"));
    }

    #[test]
    fn test_declared_clause_count_is_advisory() {
        let file = clauses_from_dimacs("p cnf 2 17\n1 0\n2 0\n").unwrap();
        assert_eq!(file.clauses.len(), 2);
    }

    #[test]
    fn test_parse_empty_clause() {
        let file = clauses_from_dimacs("p cnf 1 1\n0\n").unwrap();
        assert_eq!(file.clauses.len(), 1);
        assert!(file.clauses[0].literals.is_empty());
    }

    #[test]
    fn test_parse_no_clauses() {
        let file = clauses_from_dimacs("p cnf 4 0\n").unwrap();
        assert!(file.clauses.is_empty());
    }

    #[test]
    fn test_satlib_trailer_is_ignored() {
        let file = clauses_from_dimacs("p cnf 2 2\n1 2 0\n-1 2 0\n%\n0\n").unwrap();
        assert_eq!(file.clauses.len(), 2);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            clauses_from_dimacs(""),
            Err(DimacsError::MissingHeader)
        ));
        assert!(matches!(
            clauses_from_dimacs("p dnf 2 1\n1 0\n"),
            Err(DimacsError::InvalidHeader(_))
        ));
        assert!(matches!(
            clauses_from_dimacs("p cnf 2 1\n1 x 0\n"),
            Err(DimacsError::InvalidLiteral(_))
        ));
        assert!(matches!(
            clauses_from_dimacs("p cnf 2 1\n1 -3 0\n"),
            Err(DimacsError::LiteralOutOfRange(-3, 2))
        ));
        assert!(matches!(
            clauses_from_dimacs("p cnf 2 1\n1 2\n"),
            Err(DimacsError::UnterminatedClause)
        ));
    }

    #[test]
    fn test_parse_puzzle_metadata() {
        let input = "c SIZE 4\n\
                     c MAP 7 1 2 3\n\
                     c FIXED 2 2 1\n\
                     c some other comment\n\
                     p cnf 7 1\n7 0\n";
        let file = clauses_from_dimacs(input).unwrap();
        assert!(file.puzzle.is_present());
        assert_eq!(file.puzzle.size(), 4);

        let mut assignment = SolutionAssignment::default();
        assignment.insert(7, true);
        let (grid, conflicts) = file.puzzle.decode(&assignment);
        assert!(conflicts.is_empty());
        assert_eq!(grid.get(1, 2), 3);
        assert_eq!(grid.get(2, 2), 1);
    }

    #[test]
    fn test_solution_to_dimacs() {
        assert_eq!(solution_to_dimacs(&None, 3), "UNSAT");

        let mut assignment = SolutionAssignment::default();
        assignment.insert(1, true);
        assignment.insert(2, false);
        let solution = Some(assignment);
        // variable 3 is unassigned and defaults to positive
        assert_eq!(solution_to_dimacs(&solution, 3), "SAT\nv 1 -2 3 0");
    }

    #[test]
    fn test_file_not_found() {
        assert!(matches!(
            clauses_from_dimacs_file("/no/such/file.cnf"),
            Err(DimacsError::FileNotFound(_))
        ));
    }
}
