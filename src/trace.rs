use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceStep {
    pub name: String,
    pub value: f64,
}

/// Ordered record of the intermediate values of one prediction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Trace {
    pub steps: Vec<TraceStep>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: f64) {
        self.steps.push(TraceStep {
            name: name.into(),
            value,
        });
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.steps.iter().find(|s| s.name == name).map(|s| s.value)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
