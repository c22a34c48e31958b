use super::edge::MCTSEdge;
use super::node_details::PUCT;

/// An expanded state. Edges are kept in legal-action order, which is also the tie-break order.
#[derive(Debug)]
pub struct MCTSNode<A> {
    edges: Vec<MCTSEdge<A>>,
}

impl<A> MCTSNode<A> {
    pub fn new(edges: Vec<MCTSEdge<A>>) -> Self {
        Self { edges }
    }

    /// Visits of the node. The expansion itself counts as the first visit.
    pub fn visits(&self) -> usize {
        self.edges.iter().map(|e| e.visits()).sum::<usize>() + 1
    }

    pub fn edges(&self) -> &[MCTSEdge<A>] {
        &self.edges
    }

    pub fn edge(&self, index: usize) -> &MCTSEdge<A> {
        &self.edges[index]
    }

    pub fn edge_mut(&mut self, index: usize) -> &mut MCTSEdge<A> {
        &mut self.edges[index]
    }

    /// Index of the edge with the highest PUCT score. The first edge wins ties.
    pub fn select_path(&self, cpuct: f32) -> Option<usize> {
        let mut best_child_index = None;
        let mut best_puct = f32::MIN;

        for (i, puct) in self.get_PUCT_for_edges(cpuct).iter().enumerate() {
            if best_child_index.is_none() || puct.PUCT > best_puct {
                best_puct = puct.PUCT;
                best_child_index = Some(i);
            }
        }

        best_child_index
    }

    #[allow(non_snake_case)]
    pub fn get_PUCT_for_edges(&self, cpuct: f32) -> Vec<PUCT> {
        let Nsb = self.visits();
        let root_Nsb = (Nsb as f32).sqrt();

        self.edges
            .iter()
            .map(|edge| {
                let Nsa = edge.visits();
                let Psa = edge.policy_score();
                let Qsa = edge.avg_value();
                let Usa = cpuct * Psa * root_Nsb / (1 + Nsa) as f32;

                PUCT {
                    Nsa,
                    Qsa,
                    Psa,
                    Usa,
                    cpuct,
                    PUCT: Qsa + Usa,
                }
            })
            .collect()
    }
}

impl<A: Eq> MCTSNode<A> {
    pub fn get_child_of_action(&self, action: &A) -> Option<&MCTSEdge<A>> {
        self.edges.iter().find(|e| e.action() == action)
    }
}
