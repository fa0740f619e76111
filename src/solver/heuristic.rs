use crate::cnf::{Literal, VarId};
use crate::solver::state::State;

/// Decision policy seam. The search loop only ever asks for the next
/// unassigned variable; `None` means the assignment is total.
pub trait Heuristic {
    fn init(state: &State) -> Self
    where
        Self: Sized;
    fn next(&mut self, vars: &[Option<bool>]) -> Option<Literal>;
}

/// First unassigned variable, positive polarity. Deterministic, which the
/// end-to-end tests rely on.
pub struct HeuristicTrue {
    order: Vec<(VarId, bool)>,
}

impl Heuristic for HeuristicTrue {
    fn init(state: &State) -> Self {
        let order = (1..=state.num_vars).map(|id| (id, true)).collect();
        HeuristicTrue { order }
    }

    fn next(&mut self, vars: &[Option<bool>]) -> Option<Literal> {
        self.order
            .iter()
            .find(|(id, _)| vars[*id].is_none())
            .map(|(id, value)| Literal::from_value(*id, *value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnf::Clause;

    #[test]
    fn test_first_unassigned_positive() {
        let state = State::init(vec![Clause::from("1 2 3")], 3);
        let mut heuristic = HeuristicTrue::init(&state);

        let mut vars = vec![None; 4];
        assert_eq!(heuristic.next(&vars), Some(Literal::from(1)));

        vars[1] = Some(false);
        vars[2] = Some(true);
        assert_eq!(heuristic.next(&vars), Some(Literal::from(3)));

        vars[3] = Some(true);
        assert_eq!(heuristic.next(&vars), None);
    }
}
