use std::cell::RefCell;
use std::collections::BTreeMap;

use serde::Serialize;

/// Per-tool call and error counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ToolCounters {
    pub calls: u64,
    pub errors: u64,
}

/// Call counters for every tool invoked since startup.
#[derive(Debug, Default)]
pub struct ToolMetrics {
    counters: RefCell<BTreeMap<String, ToolCounters>>,
}

impl ToolMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, tool: &str, is_error: bool) {
        let mut counters = self.counters.borrow_mut();
        let entry = counters.entry(tool.to_string()).or_default();
        entry.calls += 1;
        if is_error {
            entry.errors += 1;
        }
    }

    pub fn get(&self, tool: &str) -> ToolCounters {
        self.counters.borrow().get(tool).copied().unwrap_or_default()
    }

    /// Counters keyed by tool name, sorted for stable output.
    pub fn snapshot(&self) -> BTreeMap<String, ToolCounters> {
        self.counters.borrow().clone()
    }
}
