use serde::{Deserialize, Serialize};

/// A unit of work needing development effort and then testing effort, both
/// measured in 8-hour days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub dev_effort: f64,
    #[serde(default)]
    pub tester_effort: f64,
    /// Lower is more important. Informational only: items are scheduled in
    /// input order.
    #[serde(default)]
    pub priority: i32,
}

impl WorkItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        dev_effort: f64,
        tester_effort: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            dev_effort,
            tester_effort,
            priority: 0,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}
