use crate::{
    ast::Expression,
    render::{render, RenderTree},
    session::{Session, SessionError, Step, StepId},
};

/// Input line plus the session it commits into. Every edit re-parses the
/// whole buffer, so the current expression always reflects the latest text.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    session: Session,
    input: String,
    current: Expression,
    explanation: String,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
        self.current = Expression::parse(&self.input);
        log::debug!(
            "Parsed {:?} into {} parts ({})",
            self.input,
            self.current.parts.len(),
            self.current.kind
        );
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn current(&self) -> &Expression {
        &self.current
    }

    pub fn preview(&self) -> RenderTree {
        render(&self.current.parts)
    }

    pub fn set_explanation(&mut self, explanation: impl Into<String>) {
        self.explanation = explanation.into();
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Adds the current expression as a step and clears the input and
    /// explanation. On rejection nothing is cleared.
    pub fn commit(&mut self) -> Result<&Step, SessionError> {
        if self.current.is_empty() {
            log::warn!("Nothing to commit");
            return Err(SessionError::EmptyStep);
        }
        let content = std::mem::take(&mut self.current);
        let explanation = std::mem::take(&mut self.explanation);
        self.input.clear();
        self.session.add_step(content, Some(explanation))
    }

    pub fn remove_step(&mut self, id: StepId) -> Option<Step> {
        self.session.remove_step(id)
    }

    pub fn submit_with<F>(&self, on_submit: F) -> Result<(), SessionError>
    where
        F: FnOnce(&[Step]),
    {
        self.session.submit_with(on_submit)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ExpressionKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn last_write_wins() {
        let mut editor = Editor::new();
        editor.set_input("x +");
        editor.set_input("x + 1 = 2");
        assert_eq!(editor.input(), "x + 1 = 2");
        assert_eq!(editor.current(), &Expression::parse("x + 1 = 2"));
        assert_eq!(editor.current().kind, ExpressionKind::Equation);
        assert_eq!(editor.preview().to_string(), "x + 1 = 2");
    }

    #[test]
    fn fresh_editor_matches_empty_input() {
        let mut editor = Editor::new();
        let fresh = editor.current().clone();
        editor.set_input("");
        assert_eq!(editor.current(), &fresh);
        assert_eq!(fresh.kind, ExpressionKind::Expression);
    }

    #[test]
    fn commit_clears() {
        let mut editor = Editor::new();
        editor.set_input("2x = 4");
        editor.set_explanation("subtract 3");
        let id = editor.commit().unwrap().id;
        assert_eq!(id, StepId::from(1));
        assert_eq!(editor.input(), "");
        assert_eq!(editor.explanation(), "");
        assert_eq!(editor.current(), &Expression::parse(""));
        assert_eq!(editor.preview().to_string(), "");

        let step = &editor.session().steps()[0];
        assert_eq!(step.content, Expression::parse("2x = 4"));
        assert_eq!(step.explanation.as_deref(), Some("subtract 3"));
    }

    #[test]
    fn rejected_commit_keeps_buffer() {
        let mut editor = Editor::new();
        editor.set_input("   ");
        editor.set_explanation("why");
        assert_eq!(editor.commit().map(|s| s.id), Err(SessionError::EmptyStep));
        assert_eq!(editor.input(), "   ");
        assert_eq!(editor.explanation(), "why");
        assert!(editor.session().is_empty());
    }

    #[test]
    fn remove_and_submit() {
        let mut editor = Editor::new();
        assert_eq!(editor.submit_with(|_| {}), Err(SessionError::NoSteps));
        for line in ["x + 1 = 3", "x = 2"] {
            editor.set_input(line);
            editor.commit().unwrap();
        }
        assert!(editor.remove_step(StepId::from(1)).is_some());
        let mut ids = vec![];
        editor
            .submit_with(|steps| ids.extend(steps.iter().map(|s| s.id.to_string())))
            .unwrap();
        assert_eq!(ids, ["step-2"]);
    }
}
