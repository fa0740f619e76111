pub mod clause_database;
mod clause_learning;
pub mod config;
pub mod heuristic;
mod progress;
pub mod state;
pub mod statistics;
pub mod trail;
pub mod unit_propagation;

use crate::cnf::{Clause, Solution};
use crate::solver::clause_database::ClauseDatabase;
use crate::solver::clause_learning::ClauseLearner;
use crate::solver::config::Config;
use crate::solver::heuristic::{Heuristic, HeuristicTrue};
use crate::solver::progress::Progress;
use crate::solver::state::State;
use crate::solver::statistics::StateStatistics;
use crate::solver::trail::{AssignmentReason, Trail};
use crate::solver::unit_propagation::UnitPropagator;

pub struct Solver {
    config: Config,
    state: State,
    clause_learner: ClauseLearner,
}

impl Solver {
    pub fn new(clauses: &[Clause], num_vars: usize, config: Config) -> Self {
        Solver {
            state: State::init(clauses.to_vec(), num_vars),
            clause_learner: ClauseLearner::default(),
            config,
        }
    }

    /// Runs the CDCL loop to completion: propagate, then either learn from
    /// a conflict and backjump, or decide the next variable. A conflict at
    /// level 0 means the empty clause is derivable.
    pub fn solve(&mut self) -> Solution {
        self.state.stats.start_timing();

        let mut heuristic = HeuristicTrue::init(&self.state);
        let mut unit_propagator = UnitPropagator::default();
        let mut trail = Trail::new(self.state.num_vars);
        let mut progress = self.config.progress.then(Progress::new);

        let solution = loop {
            unit_propagator.propagate(&mut self.state, &mut trail);

            if let Some(progress) = progress.as_mut() {
                progress
                    .print_progress_if_necessary(&self.state.stats, trail.assignment_stack.len());
            }

            if let Some(conflict_clause_id) = self.state.conflict_clause_id {
                if trail.decision_level == 0 {
                    break None;
                }
                let (learned_clause, assertion_level) = self.clause_learner.analyse_conflict(
                    &trail,
                    &self.state.clause_database,
                    conflict_clause_id,
                );
                self.state.clause_database.add_clause(learned_clause);
                self.state.stats.num_learned_clauses += 1;

                // the next propagation pass finds the learned clause unit
                // and forces the UIP's negation at the assertion level
                trail.backtrack(&mut self.state, assertion_level);
            } else if let Some(decision) = heuristic.next(&self.state.vars) {
                self.state.stats.num_decisions += 1;
                trail.assign(&mut self.state, decision, AssignmentReason::Decision);
            } else {
                debug_assert!(self.state.is_satisfied());
                break Some(self.state.get_assignment());
            }
        };

        self.state.stats.stop_timing();
        if let Some(progress) = progress.as_ref() {
            progress.close_table();
        }
        solution
    }

    pub fn stats(&self) -> &StateStatistics {
        &self.state.stats
    }

    pub fn clause_database(&self) -> &ClauseDatabase {
        &self.state.clause_database
    }
}
