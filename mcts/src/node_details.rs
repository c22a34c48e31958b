use std::fmt::{self, Debug, Display, Formatter};

/// Snapshot of an expanded state for diagnostics.
pub struct NodeDetails<A> {
    pub visits: usize,
    pub children: Vec<(A, PUCT)>,
}

impl<A: Display> Display for NodeDetails<A> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let actions = format!(
            "[{}]",
            self.children
                .iter()
                .fold(String::new(), |acc, (a, puct)| acc
                    + &format!("\n\t(A: {}, {}),", a, puct))
        );

        write!(
            f,
            "V: {visits}, Actions: {actions}",
            visits = self.visits,
            actions = actions
        )
    }
}

impl<A: Display> Debug for NodeDetails<A> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Display::fmt(self, f)
    }
}

#[derive(Clone, PartialEq)]
#[allow(non_snake_case)]
pub struct PUCT {
    pub Nsa: usize,
    pub Qsa: f32,
    pub Psa: f32,
    pub Usa: f32,
    pub cpuct: f32,
    pub PUCT: f32,
}

impl Display for PUCT {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "Nsa: {Nsa}, Qsa: {Qsa:.3}, Psa: {Psa:.3}, Usa: {Usa:.2}, cpuct: {cpuct:.2}, PUCT: {PUCT:.3}",
            Nsa = self.Nsa,
            Qsa = self.Qsa,
            Psa = self.Psa,
            Usa = self.Usa,
            cpuct = self.cpuct,
            PUCT = self.PUCT,
        )
    }
}

impl Debug for PUCT {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
