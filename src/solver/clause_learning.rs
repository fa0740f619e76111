use crate::cnf::{Clause, ClauseId, Literal, VarId};
use crate::solver::clause_database::ClauseDatabase;
use crate::solver::trail::{AssignmentReason, Trail};
use itertools::Itertools;

/// First-UIP conflict analysis.
///
/// The marked set is kept across calls and cleared in O(1) with a
/// generation counter: a variable counts as touched only if its token
/// matches the current generation.
#[derive(Debug, Default, Clone)]
pub struct ClauseLearner {
    touched_generation: Vec<u64>,
    marked: Vec<bool>,
    generation: u64,
}

impl ClauseLearner {
    /// Assumes that the current state is in conflict at a level above the
    /// root. Returns the learned clause and the level to backjump to.
    /// Every literal of the learned clause is false under the current
    /// assignment, exactly one of them at the conflict level (the UIP).
    pub fn analyse_conflict(
        &mut self,
        trail: &Trail,
        clause_database: &ClauseDatabase,
        conflict_clause_id: ClauseId,
    ) -> (Clause, usize) {
        assert!(
            trail.decision_level > 0,
            "Conflict analysis called at decision level 0"
        );

        self.generation += 1;

        let conflict_level = trail.decision_level;
        // false literals of every touched variable, in touch order
        let mut touched_literals: Vec<Literal> = Vec::new();
        let mut current_level_count = 0;

        for lit in &clause_database[conflict_clause_id].literals {
            self.mark(
                *lit,
                trail,
                conflict_level,
                &mut touched_literals,
                &mut current_level_count,
            );
        }
        assert!(
            current_level_count > 0,
            "Conflict clause {} has no literal at the current decision level",
            conflict_clause_id
        );

        // resolve against reason clauses, most recently assigned first,
        // until a single variable of the conflict level remains
        let mut trail_position = trail.assignment_stack.len();
        while current_level_count > 1 {
            let assignment = loop {
                trail_position -= 1;
                let assignment = &trail.assignment_stack[trail_position];
                if self.is_marked(assignment.literal.id()) {
                    break assignment;
                }
            };

            self.marked[assignment.literal.id()] = false;
            current_level_count -= 1;

            let reason_clause_id = match assignment.reason {
                AssignmentReason::Forced(clause_id) => clause_id,
                AssignmentReason::Decision => panic!(
                    "Resolved into the decision of level {}",
                    assignment.decision_level
                ),
            };
            for lit in &clause_database[reason_clause_id].literals {
                self.mark(
                    *lit,
                    trail,
                    conflict_level,
                    &mut touched_literals,
                    &mut current_level_count,
                );
            }
        }

        // the still-marked literals are the learned clause; each is the
        // negation of its variable's current assignment
        let learned_clause = touched_literals
            .into_iter()
            .filter(|lit| self.marked[lit.id()])
            .collect_vec();

        debug_assert_eq!(
            learned_clause
                .iter()
                .filter(|lit| trail.decision_level_of(lit.id()) == conflict_level)
                .count(),
            1
        );

        // backjump to the highest level strictly below the conflict level
        let assertion_level = learned_clause
            .iter()
            .map(|lit| trail.decision_level_of(lit.id()))
            .sorted()
            .rev()
            .nth(1)
            .unwrap_or(0);
        assert!(assertion_level < trail.decision_level);

        (Clause::from(learned_clause), assertion_level)
    }

    fn mark(
        &mut self,
        lit: Literal,
        trail: &Trail,
        conflict_level: usize,
        touched_literals: &mut Vec<Literal>,
        current_level_count: &mut usize,
    ) {
        let var = lit.id();
        if var >= self.touched_generation.len() {
            self.touched_generation.resize(var + 1, 0);
            self.marked.resize(var + 1, false);
        }
        if self.touched_generation[var] == self.generation {
            return;
        }
        self.touched_generation[var] = self.generation;
        self.marked[var] = true;
        touched_literals.push(lit);
        if trail.decision_level_of(var) == conflict_level {
            *current_level_count += 1;
        }
    }

    fn is_marked(&self, var: VarId) -> bool {
        self.touched_generation.get(var) == Some(&self.generation) && self.marked[var]
    }
}
