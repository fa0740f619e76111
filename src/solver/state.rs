use crate::cnf::{Clause, ClauseId, Literal, SolutionAssignment, VarId};
use crate::solver::clause_database::ClauseDatabase;
use crate::solver::statistics::StateStatistics;

#[derive(Debug, Clone)]
pub struct State {
    pub conflict_clause_id: Option<ClauseId>,
    pub vars: Vec<Option<bool>>,
    pub clause_database: ClauseDatabase,
    pub num_vars: usize,
    pub stats: StateStatistics,
}

impl State {
    pub fn init(clauses: Vec<Clause>, num_vars: usize) -> Self {
        State {
            conflict_clause_id: None,
            vars: vec![None; num_vars + 1],
            stats: StateStatistics::new(clauses.len(), num_vars),
            clause_database: ClauseDatabase::init(clauses),
            num_vars,
        }
    }

    pub fn assign(&mut self, lit: Literal) {
        self.stats.num_assignments += 1;

        let (var_id, value) = (lit.id(), lit.positive());
        if self.vars[var_id].is_some() {
            panic!("Variable {} is already assigned!", var_id);
        }
        self.vars[var_id] = Some(value);
    }

    pub fn unassign(&mut self, lit: Literal) {
        self.vars[lit.id()] = None;
    }

    pub fn is_satisfied(&self) -> bool {
        self.clause_database
            .iter()
            .all(|clause_id| self.clause_database[clause_id].is_satisfied(&self.vars))
    }

    pub fn get_assignment(&self) -> SolutionAssignment {
        let mut result = SolutionAssignment::default();
        for (id, val) in self.vars.iter().enumerate().skip(1) {
            if let Some(val) = val {
                result.insert(id as VarId, *val);
            }
        }
        result
    }
}
