//! Soft-assertion ledger
//!
//! Each probe step records exactly one outcome here instead of returning early.
//! The ledger is evaluated once, after the whole sequence has run, and reports
//! every failure rather than only the first.

use crate::error::{Error, Result};

/// Which step of the sequence produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Create,
    Read,
    Update,
    Delete,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Create => "create",
            Step::Read => "read",
            Step::Update => "update",
            Step::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub step: Step,
    pub description: String,
    pub passed: bool,
}

#[derive(Debug, Default)]
pub struct AssertionLedger {
    outcomes: Vec<Outcome>,
}

impl AssertionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pass(&mut self, step: Step, description: impl Into<String>) {
        self.outcomes.push(Outcome {
            step,
            description: description.into(),
            passed: true,
        });
    }

    pub fn fail(&mut self, step: Step, description: impl Into<String>) {
        self.outcomes.push(Outcome {
            step,
            description: description.into(),
            passed: false,
        });
    }

    /// All recorded outcomes in recording order.
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn failures(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|o| !o.passed)
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }

    /// Evaluate the ledger, surfacing every failure message together.
    pub fn assert_all(&self) -> Result<()> {
        let messages: Vec<String> = self.failures().map(|o| o.description.clone()).collect();
        if messages.is_empty() {
            Ok(())
        } else {
            Err(Error::Assertions(messages))
        }
    }
}
