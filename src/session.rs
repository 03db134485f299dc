use derive_more::{Display, From, Into};
use thiserror::Error;

use crate::{
    ast::Expression,
    latex::{steps_to_latex, MathWork},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into)]
#[display("step-{_0}")]
pub struct StepId(u64);

/// One committed line of work. Never mutated after it is added.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub id: StepId,
    pub content: Expression,
    pub explanation: Option<String>,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("math content is empty")]
    EmptyStep,
    #[error("add at least one step before submitting")]
    NoSteps,
}

/// Ordered list of committed steps.
#[derive(Debug, Clone, Default)]
pub struct Session {
    steps: Vec<Step>,
    next_id: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step. Blank explanations are dropped.
    pub fn add_step(
        &mut self,
        content: Expression,
        explanation: Option<String>,
    ) -> Result<&Step, SessionError> {
        if content.is_empty() {
            log::warn!("Rejected empty step");
            return Err(SessionError::EmptyStep);
        }

        self.next_id += 1;
        let id = StepId(self.next_id);
        let explanation = explanation.filter(|e| !e.trim().is_empty());
        log::info!(
            "Added {id} ({} parts, explained: {})",
            content.parts.len(),
            explanation.is_some()
        );
        self.steps.push(Step {
            id,
            content,
            explanation,
        });
        Ok(&self.steps[self.steps.len() - 1])
    }

    pub fn remove_step(&mut self, id: StepId) -> Option<Step> {
        let Some(index) = self.steps.iter().position(|step| step.id == id) else {
            log::debug!("No {id} to remove");
            return None;
        };
        log::info!("Removed {id}");
        Some(self.steps.remove(index))
    }

    pub fn submit(&self) -> Result<&[Step], SessionError> {
        if self.steps.is_empty() {
            log::warn!("Rejected submit of an empty session");
            return Err(SessionError::NoSteps);
        }
        log::info!("Submitting {} steps", self.steps.len());
        Ok(&self.steps)
    }

    /// Hands the ordered steps to `on_submit`. The session is left as is.
    pub fn submit_with<F>(&self, on_submit: F) -> Result<(), SessionError>
    where
        F: FnOnce(&[Step]),
    {
        on_submit(self.submit()?);
        Ok(())
    }

    pub fn get(&self, id: StepId) -> Option<&Step> {
        self.steps.iter().find(|step| step.id == id)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn to_latex(&self) -> String {
        steps_to_latex(&self.steps)
    }

    pub fn summary(&self) -> MathWork {
        MathWork::from_steps(&self.steps)
    }
}
