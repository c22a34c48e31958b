use common::mean_or_zero;

/// Statistics of a (state, action) pair.
#[derive(Clone, Debug)]
pub struct MCTSEdge<A> {
    action: A,
    visits: usize,
    value_total: f32,
    policy_score: f32,
}

impl<A> MCTSEdge<A> {
    pub fn new(action: A, policy_score: f32) -> Self {
        Self {
            action,
            visits: 0,
            value_total: 0.0,
            policy_score,
        }
    }

    pub fn action(&self) -> &A {
        &self.action
    }

    pub fn visits(&self) -> usize {
        self.visits
    }

    /// Accumulated value, from the perspective of the player choosing the action.
    pub fn value_total(&self) -> f32 {
        self.value_total
    }

    pub fn policy_score(&self) -> f32 {
        self.policy_score
    }

    /// Mean value of the edge, 0 while unvisited.
    pub fn avg_value(&self) -> f32 {
        mean_or_zero(self.value_total, self.visits)
    }

    pub fn record_visit(&mut self, value: f32) {
        self.visits += 1;
        self.value_total += value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_new_edge_is_unvisited() {
        let edge = MCTSEdge::new('a', 0.25);

        assert_eq!(edge.visits(), 0);
        assert_eq!(edge.value_total(), 0.0);
        assert_eq!(edge.avg_value(), 0.0);
        assert_eq!(edge.policy_score(), 0.25);
    }

    #[test]
    fn test_record_visit_accumulates() {
        let mut edge = MCTSEdge::new('a', 0.25);
        edge.record_visit(1.0);
        edge.record_visit(-0.5);

        assert_eq!(edge.visits(), 2);
        assert_approx_eq!(edge.value_total(), 0.5);
        assert_approx_eq!(edge.avg_value(), 0.25);
    }
}
