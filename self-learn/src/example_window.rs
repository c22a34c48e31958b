use std::collections::VecDeque;

use model::PositionMetrics;

/// Training examples of the most recent iterations.
pub struct ExampleWindow<S> {
    examples: Vec<PositionMetrics<S>>,
    iteration_lens: VecDeque<usize>,
    /// Number of iterations kept. 0 keeps every iteration.
    size: usize,
}

impl<S> ExampleWindow<S> {
    pub fn new(size: usize) -> Self {
        Self {
            examples: Vec::new(),
            iteration_lens: VecDeque::new(),
            size,
        }
    }

    /// Adds the examples of one iteration, dropping the oldest iteration once the window is full.
    pub fn push(&mut self, iteration_examples: Vec<PositionMetrics<S>>) {
        self.iteration_lens.push_back(iteration_examples.len());
        self.examples.extend(iteration_examples);

        if self.size > 0 {
            while self.iteration_lens.len() > self.size {
                if let Some(expired) = self.iteration_lens.pop_front() {
                    self.examples.drain(..expired);
                }
            }
        }
    }

    pub fn examples(&self) -> &[PositionMetrics<S>] {
        &self.examples
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}
