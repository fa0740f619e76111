use fnv::FnvHashMap;
use std::fmt::{Debug, Display, Formatter};
use std::ops::Neg;
use std::str::FromStr;

pub type VarId = usize;
pub type ClauseId = usize;

/// Checks a total or partial assignment against a clause set.
/// Unassigned variables never satisfy a literal.
pub fn check_assignment(clauses: &[Clause], assignment: &SolutionAssignment) -> bool {
    clauses.iter().all(|clause| {
        clause
            .literals
            .iter()
            .any(|lit| assignment.get(&lit.id()) == Some(&lit.positive()))
    })
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal {
    value: i32,
}

impl Literal {
    pub fn new(value: i32) -> Self {
        Literal { value }
    }

    pub fn from_value(id: VarId, positive: bool) -> Self {
        Literal {
            value: if positive { id as i32 } else { -(id as i32) },
        }
    }

    pub fn id(&self) -> VarId {
        self.value.unsigned_abs() as VarId
    }

    pub fn positive(&self) -> bool {
        self.value > 0
    }

    pub fn negative(&self) -> bool {
        self.value < 0
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    /// Three-valued evaluation under a partial assignment.
    pub fn value_in(&self, vars: &[Option<bool>]) -> Option<bool> {
        vars[self.id()].map(|value| value == self.positive())
    }
}

impl FromStr for Literal {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.parse().map_err(|_| ())?;
        Ok(Literal::new(value))
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::new(value)
    }
}

impl Neg for Literal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Literal::new(-self.value)
    }
}

impl Debug for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub literals: Vec<Literal>,
}

impl Clause {
    pub fn is_satisfied(&self, vars: &[Option<bool>]) -> bool {
        self.literals
            .iter()
            .any(|lit| lit.value_in(vars) == Some(true))
    }

    pub fn is_falsified(&self, vars: &[Option<bool>]) -> bool {
        self.literals
            .iter()
            .all(|lit| lit.value_in(vars) == Some(false))
    }
}

impl From<Vec<Literal>> for Clause {
    fn from(literals: Vec<Literal>) -> Self {
        Clause { literals }
    }
}

impl From<&str> for Clause {
    fn from(s: &str) -> Self {
        let literals: Vec<Literal> = s
            .split_whitespace()
            .map(|lit| lit.parse().unwrap())
            .collect();
        Clause::from(literals)
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.literals)
    }
}

pub type SolutionAssignment = FnvHashMap<VarId, bool>;
pub type Solution = Option<SolutionAssignment>;
