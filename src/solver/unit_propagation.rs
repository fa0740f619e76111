use crate::cnf::Literal;
use crate::solver::state::State;
use crate::solver::trail::{AssignmentReason, Trail};

/// Boolean constraint propagation by repeated full scans over the clause
/// store, in insertion order, until a conflict or a fixed point.
#[derive(Debug, Default)]
pub struct UnitPropagator {}

enum ClauseStatus {
    Satisfied,
    Conflict,
    Unit(Literal),
    Open,
}

impl UnitPropagator {
    /// Extends the trail with every forced literal. On return either
    /// `state.conflict_clause_id` names the first falsified clause, or
    /// every clause is satisfied or has at least two unassigned literals.
    pub fn propagate(&mut self, state: &mut State, trail: &mut Trail) {
        loop {
            let mut progress = false;

            for clause_id in state.clause_database.iter() {
                match Self::clause_status(state, clause_id) {
                    ClauseStatus::Satisfied | ClauseStatus::Open => {}
                    ClauseStatus::Conflict => {
                        state.conflict_clause_id = Some(clause_id);
                        state.stats.num_conflicts += 1;
                        return;
                    }
                    ClauseStatus::Unit(lit) => {
                        trail.assign(state, lit, AssignmentReason::Forced(clause_id));
                        state.stats.num_propagations += 1;
                        progress = true;
                    }
                }
            }

            if !progress {
                return;
            }
        }
    }

    fn clause_status(state: &State, clause_id: usize) -> ClauseStatus {
        let mut unassigned = 0;
        let mut last_unassigned = None;

        for lit in &state.clause_database[clause_id].literals {
            match lit.value_in(&state.vars) {
                Some(true) => return ClauseStatus::Satisfied,
                Some(false) => {}
                None => {
                    unassigned += 1;
                    last_unassigned = Some(*lit);
                }
            }
        }

        match last_unassigned {
            None => ClauseStatus::Conflict,
            Some(lit) if unassigned == 1 => ClauseStatus::Unit(lit),
            Some(_) => ClauseStatus::Open,
        }
    }
}
