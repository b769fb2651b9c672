//! Error reporting tests for the calc demo

use calc_demo::{Calc, CalcError, Position};
use frontkit::{Buffer, Location, ParseConfig};
use test_case::test_case;

fn error(src: &str) -> String {
    let mut calc = Calc::new();
    calc.evaluate(src).unwrap_err().to_string()
}

#[test_case("", "1:1: expected expression"; "empty input")]
#[test_case("1 +", "1:3: expected term"; "missing right operand")]
#[test_case("2 * ", "1:3: expected factor"; "missing factor")]
#[test_case("-", "1:2: expected operand"; "prefix without operand")]
#[test_case("(1 + 2", "1:7: expected )"; "unclosed paren")]
#[test_case("()", "1:2: expected expression"; "empty parens")]
#[test_case("[1, ]", "1:5: expected list element"; "trailing comma")]
#[test_case("let = 2 in 3", "1:5: expected identifier"; "let without name")]
#[test_case("let x = 2 x", "1:11: expected 'in'"; "let without in")]
#[test_case("1 2", "1:3: expected end of input"; "trailing input")]
fn test_syntax_errors(src: &str, expected: &str) {
    assert_eq!(error(src), expected);
}

#[test_case("1 $ 2", "1:3: unexpected character \"$\""; "invalid character")]
#[test_case("99999999999999999999", "1:1: number 99999999999999999999 does not fit in 64 bits"; "number too large")]
fn test_lex_errors(src: &str, expected: &str) {
    assert_eq!(error(src), expected);
}

#[test_case("y", "1:1: unbound name 'y'"; "unbound")]
#[test_case("1 / 0", "1:3: division by zero"; "division by zero")]
#[test_case("[1] * 2", "1:5: expected integer, found list"; "type mismatch")]
#[test_case("9223372036854775807 + 1", "1:21: arithmetic overflow"; "overflow")]
#[test_case("-(0 - 9223372036854775807 - 1)", "1:1: arithmetic overflow"; "negation overflow")]
fn test_eval_errors(src: &str, expected: &str) {
    assert_eq!(error(src), expected);
}

#[test]
fn test_positions_span_lines() {
    insta::assert_snapshot!(error("let x = 1 in\n  x +\n"), @"2:5: expected term");
    insta::assert_snapshot!(error("{\n  1\n  2 / (3 - 3)\n}"), @"3:5: division by zero");
    insta::assert_snapshot!(error("[1,\n 2,\n 3\n"), @"4:1: expected ]");
}

#[test]
fn test_diagnostics_are_collected_per_input() {
    let mut calc = Calc::new();
    assert!(calc.evaluate("(1 +").is_err());
    assert_eq!(calc.diagnostics().len(), 1);
    assert!(matches!(calc.diagnostics()[0], CalcError::Expected { .. }));

    assert!(calc.evaluate("1 + 1").is_ok());
    assert!(calc.diagnostics().is_empty());
}

#[test]
fn test_nesting_limit() {
    let config = ParseConfig::new().with_max_recursion_depth(2);
    let mut calc = Calc::with_config(config);

    assert_eq!(calc.evaluate("((1))").unwrap().to_string(), "1");
    let err = calc.evaluate("(((1)))").unwrap_err();
    assert!(matches!(err, CalcError::Limit(frontkit::Error::RecursionLimitExceeded { .. })));
    insta::assert_snapshot!(err, @"recursion limit exceeded: depth 3 > limit 2");

    // the guard is reset between inputs
    assert_eq!(calc.evaluate("[[2]]").unwrap().to_string(), "[[2]]");
}

#[test]
fn test_token_budget() {
    let config = ParseConfig::new().with_max_tokens(3);
    let mut calc = Calc::with_config(config);

    assert_eq!(calc.evaluate("1 + 2").unwrap().to_string(), "3");
    let err = calc.evaluate("1 + 2 + 3").unwrap_err();
    insta::assert_snapshot!(err, @"token limit exceeded: stopped after 3 of at most 3 tokens");
}

#[test]
fn test_token_budget_cuts_inside_a_construct() {
    let config = ParseConfig::new().with_max_tokens(4);
    let mut calc = Calc::with_config(config);

    let err = calc.evaluate("(1 + 2)").unwrap_err();
    insta::assert_snapshot!(err, @"token limit exceeded: stopped after 4 of at most 4 tokens");
    assert!(calc.diagnostics().is_empty());

    // errors ahead of the cut are still reported as they are
    assert_eq!(calc.evaluate("(1 + ) 2 3").unwrap_err().to_string(), "1:4: expected term");
    assert_eq!(calc.diagnostics().len(), 1);
}

fn limit_exceeded(err: CalcError) -> (usize, usize) {
    match err {
        CalcError::Limit(frontkit::Error::RecursionLimitExceeded { depth, limit }) => (depth, limit),
        other => panic!("expected a recursion limit error, got {}", other),
    }
}

#[test]
fn test_long_operator_chains_are_bounded() {
    let mut calc = Calc::new();

    let sum = "1".to_string() + &"+1".repeat(128);
    assert_eq!(calc.evaluate(&sum).unwrap().to_string(), "129");

    let sum = "1".to_string() + &"+1".repeat(20_000);
    assert_eq!(limit_exceeded(calc.evaluate(&sum).unwrap_err()), (129, 128));

    let negations = "-".repeat(1_000_000) + "1";
    assert_eq!(limit_exceeded(calc.evaluate(&negations).unwrap_err()), (129, 128));

    let lets = "let a = 1 in ".repeat(10_000) + "a";
    assert_eq!(limit_exceeded(calc.evaluate(&lets).unwrap_err()), (129, 128));
    assert!(calc.symbols().iter().all(|sym| sym.depth() == 0));
}

#[test]
fn test_tree_height_counts_every_level() {
    let config = ParseConfig::new().with_max_recursion_depth(3);
    let mut calc = Calc::with_config(config);

    assert_eq!(calc.evaluate("1 + 2 + 3 + 4").unwrap().to_string(), "10");
    assert_eq!(calc.evaluate("--!1").unwrap().to_string(), "0");
    assert_eq!(calc.evaluate("[-1 * 2]").unwrap().to_string(), "[-2]");
    assert_eq!(calc.evaluate("let a = 1 in let b = 2 in a + b").unwrap().to_string(), "3");

    insta::assert_snapshot!(
        calc.evaluate("1 + 2 + 3 + 4 + 5").unwrap_err(),
        @"recursion limit exceeded: depth 4 > limit 3"
    );
    insta::assert_snapshot!(
        calc.evaluate("[[1 + 2 * 3]]").unwrap_err(),
        @"recursion limit exceeded: depth 4 > limit 3"
    );
}

#[test]
fn test_position_outside_any_line() {
    let buffer = Buffer::new("ab\ncd");
    assert_eq!(Position::in_buffer(&buffer, Location::new(4)).to_string(), "2:2");
    assert_eq!(Position::in_buffer(&buffer, Location::NONE).to_string(), "?:?");
    assert_eq!(Position::in_buffer(&Buffer::unindexed("x"), Location::new(0)).to_string(), "?:?");
}

#[test]
fn test_named_input() {
    let mut calc = Calc::new();
    let err = calc.evaluate_named("answer.calc", "6 *\n").unwrap_err();
    assert_eq!(err.to_string(), "1:3: expected factor");
}
