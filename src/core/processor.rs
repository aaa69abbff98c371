//! Message processors applied before rendering

use super::render::{render, LogArg};
use parking_lot::RwLock;
use std::sync::Arc;

/// A transformation over the `(format, args)` pair of a log call
pub type Processor = Arc<dyn Fn(String, Vec<LogArg>) -> (String, Vec<LogArg>) + Send + Sync>;

/// Ordered, append-only list of processors.
///
/// Appending replaces the shared list with a new one, so a render in
/// progress keeps iterating its own snapshot and never sees a half-built
/// chain. Renders only take the read lock long enough to clone an `Arc`.
pub struct ProcessorChain {
    processors: RwLock<Arc<Vec<Processor>>>,
}

impl ProcessorChain {
    pub fn new() -> Self {
        Self {
            processors: RwLock::new(Arc::new(Vec::new())),
        }
    }

    pub fn add(&self, processor: Processor) {
        let mut guard = self.processors.write();
        let mut next = Vec::with_capacity(guard.len() + 1);
        next.extend(guard.iter().cloned());
        next.push(processor);
        *guard = Arc::new(next);
    }

    pub fn len(&self) -> usize {
        self.processors.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn snapshot(&self) -> Arc<Vec<Processor>> {
        Arc::clone(&self.processors.read())
    }

    /// Run every processor in registration order and render the result
    pub fn render(&self, format: String, args: Vec<LogArg>) -> String {
        let processors = self.snapshot();
        let (format, args) = processors
            .iter()
            .fold((format, args), |(format, args), process| process(format, args));
        render(&format, &args)
    }
}

impl Default for ProcessorChain {
    fn default() -> Self {
        Self::new()
    }
}
