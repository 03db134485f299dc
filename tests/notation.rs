use mathpad::{
    ast::{Expression, ExpressionKind, Node, Operator},
    editor::Editor,
    latex::to_latex,
    layout::layout,
    parser::parse,
    render::render,
    session::{Session, SessionError, StepId},
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn assert_renders(source: &str, display: &str, latex: &str) {
    let nodes = parse(source);
    assert_eq!(render(&nodes).to_string(), display, "display of {source:?}");
    assert_eq!(to_latex(&nodes), latex, "latex of {source:?}");
}

#[rstest]
#[case("2x + 3 = 7", "2x + 3 = 7", "2 x + 3 = 7")]
#[case("sqrt(16)", "√16", r"\sqrt{16}")]
#[case("sinh(x)", "sinh(x)", r"\sinh\left(x\right)")]
#[case("a/b", "a/b", r"\frac{a}{b}")]
#[case("a/+", "a ÷ +", r"a \div +")]
#[case("x^(2+3)", "x^(2 + 3)", "x^{2+3}")]
#[case("(1+(2*3))", "(1 + (2 × 3))", r"\left(1+\left(2\times3\right)\right)")]
#[case("a*b/c", "a × b/c", r"a \times \frac{b}{c}")]
#[case("x_1 ~= 0.5", "x_1 ≈ 0.5", r"x_{1} \approx 0.5")]
#[case("√(a/b)", "√(a/b)", r"\sqrt{\frac{a}{b}}")]
#[case("y >= mean(x)", "y ≥ mean(x)", r"y \geq \text{mean}\left(x\right)")]
fn end_to_end(#[case] source: &str, #[case] display: &str, #[case] latex: &str) {
    assert_renders(source, display, latex);
}

#[rstest]
#[case("")]
#[case("(((")]
#[case(")))")]
#[case("^_/√")]
#[case("x^(")]
#[case("1/")]
#[case("αβγ ∑ ∫")]
#[case("sin(cos(tan(")]
#[case("..1..2")]
#[case("a_(b_(c_(d)))")]
#[case("!@#$%^&*()_+{}|:\"<>?")]
fn total(#[case] source: &str) {
    let nodes = parse(source);
    let tree = render(&nodes);
    let _ = layout(&tree);
    let _ = to_latex(&nodes);
    let _ = tree.to_string();
}

#[rstest]
#[case("2x + 3 = 7")]
#[case("a/b^2 <= sqrt(x_1)")]
#[case("((x)")]
#[case("sinh x ~= 1")]
fn idempotent(#[case] source: &str) {
    assert_eq!(parse(source), parse(source));
    assert_eq!(render(&parse(source)), render(&parse(source)));
}

#[rstest]
#[case("x + 1 = 2", ExpressionKind::Equation)]
#[case("a != b", ExpressionKind::Equation)]
#[case("3 * (x + 1)", ExpressionKind::Expression)]
#[case("!?", ExpressionKind::Text)]
fn kinds(#[case] source: &str, #[case] kind: ExpressionKind) {
    assert_eq!(Expression::parse(source).kind, kind);
}

#[test]
fn sqrt_stays_two_nodes() {
    assert_eq!(
        parse("sqrt(16)"),
        [
            Node::Function("sqrt"),
            Node::Parentheses(vec![Node::Number("16".into())]),
        ]
    );
    assert_eq!(
        parse("a/+"),
        [
            Node::Variable('a'),
            Node::Operator(Operator::Divide),
            Node::Operator(Operator::Plus),
        ]
    );
}

#[test]
fn session_lifecycle() {
    let mut session = Session::new();
    assert_eq!(session.submit(), Err(SessionError::NoSteps));

    let first = session
        .add_step(Expression::parse("2x + 3 = 7"), None)
        .map(|step| step.id);
    assert_eq!(first, Ok(StepId::from(1)));
    session
        .add_step(Expression::parse("2x = 4"), Some("subtract 3".into()))
        .map(|_| ())
        .unwrap_or_else(|e| panic!("{e}"));
    session
        .add_step(Expression::parse("x = 2"), None)
        .map(|_| ())
        .unwrap_or_else(|e| panic!("{e}"));

    assert_eq!(session.remove_step(StepId::from(2)).map(|s| s.id), Some(StepId::from(2)));
    assert_eq!(session.remove_step(StepId::from(2)), None);

    let mut submitted = vec![];
    session
        .submit_with(|steps| submitted.extend(steps.iter().map(|s| s.id.to_string())))
        .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(submitted, ["step-1", "step-3"]);
    assert_eq!(
        session.to_latex(),
        "\\text{Step 1:} \\quad 2 x + 3 = 7 \\\\\n\\text{Step 2:} \\quad x = 2"
    );
}

#[test]
fn editor_round() {
    let mut editor = Editor::new();
    editor.set_input("x^2 = 9");
    editor.set_explanation("square both sides");
    assert_eq!(editor.preview().to_string(), "x^2 = 9");
    assert!(editor.commit().is_ok());
    assert_eq!(editor.commit().map(|s| s.id), Err(SessionError::EmptyStep));

    let summary = editor.session().summary();
    assert_eq!(summary.step_count, 1);
    assert!(summary.has_explanations);
    assert_eq!(
        summary.latex,
        r"\text{Step 1:} \quad x^{2} = 9 \quad \text{(square both sides)}"
    );
}
