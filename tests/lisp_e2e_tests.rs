/// End-to-end integration tests
/// Demonstrates: Lexer → Parser → Evaluator working together
use cidlang::lexer::SExprScanner;
use cidlang::parser::SExprParser;
use cidlang::runtime::LispEvaluator;
use cidlang::{Error, Expression};

fn run(source: &str) -> Result<Expression, Error> {
    let mut scanner = SExprScanner::new(source);
    let tokens = scanner.scan_tokens()?;
    let mut parser = SExprParser::new(tokens);
    let program = parser.parse()?;
    let mut evaluator = LispEvaluator::new();
    evaluator.execute(&program)
}

fn num(n: f64) -> Expression {
    Expression::Number(n)
}

#[test]
fn test_lisp_e2e_simple_arithmetic() {
    let source = "(+ 10 15)";

    // Lex
    let mut scanner = SExprScanner::new(source);
    let tokens = scanner.scan_tokens().unwrap();

    // Parse
    let mut parser = SExprParser::new(tokens);
    let program = parser.parse().unwrap();

    // Evaluate
    let mut evaluator = LispEvaluator::new();
    let result = evaluator.execute(&program).unwrap();

    assert_eq!(result, num(25.0));
}

#[test]
fn test_lisp_e2e_nested_arithmetic() {
    assert_eq!(run("(* (+ 1 2) (- 10 4))").unwrap(), num(18.0));
    assert_eq!(run("(/ 10 4)").unwrap(), num(2.5));
    assert_eq!(run("(- 5)").unwrap_err().to_string(),
        "Function '-' expects 2 arguments but received 1: 5");
}

#[test]
fn test_lisp_e2e_division_by_zero() {
    let err = run("(/ 10 0)").unwrap_err();
    assert_eq!(err, Error::DivisionByZero);
    assert_eq!(err.to_string(), "Dividing by zero");
}

#[test]
fn test_lisp_e2e_variables() {
    let source = r#"
        (define x 10)
        (define y 20)
        (+ x y)
    "#;

    assert_eq!(run(source).unwrap(), num(30.0));
}

#[test]
fn test_lisp_e2e_mutation() {
    assert_eq!(run("(define x 5)(set! x 10)x").unwrap(), num(10.0));
}

#[test]
fn test_lisp_e2e_set_undefined() {
    let err = run("(set! y 5)").unwrap_err();
    assert_eq!(err.to_string(), "Unable to set! on undefined symbol: y");
}

#[test]
fn test_lisp_e2e_undefined_symbol() {
    let err = run("(+ missing 1)").unwrap_err();
    assert_eq!(err.to_string(), "Undefined symbol: missing");
}

#[test]
fn test_lisp_e2e_if_expression() {
    let source = r#"
        (define x 10)
        (if (> x 5)
            "large"
            "small")
    "#;

    assert_eq!(run(source).unwrap(), Expression::string("large"));
}

#[test]
fn test_lisp_e2e_quote_is_not_evaluated() {
    let result = run("(quote (+ 1 2))").unwrap();
    let items = result.to_vec();

    assert_eq!(items.len(), 3);
    assert_eq!(items[0], Expression::symbol("+").unwrap());
    assert_eq!(items[1], num(1.0));
    assert_eq!(items[2], num(2.0));
}

#[test]
fn test_lisp_e2e_quote_shorthand() {
    assert_eq!(run("'(1 2 3)").unwrap().to_string(), "(1 2 3)");
    assert_eq!(run("(car '(a b))").unwrap().to_string(), "a");
    assert_eq!(run("''a").unwrap().to_string(), "(quote a)");
}

#[test]
fn test_lisp_e2e_list_primitives() {
    assert_eq!(run("(car (list 1 2 3))").unwrap(), num(1.0));
    assert_eq!(run("(cdr (list 1 2 3))").unwrap().to_string(), "(2 3)");
    assert_eq!(run("(cons 1 (list 2 3))").unwrap().to_string(), "(1 2 3)");
    assert_eq!(run("(cons 1 2)").unwrap().to_string(), "(1 . 2)");
    assert_eq!(run("(cdr (cons 1 2))").unwrap(), num(2.0));
    assert_eq!(run("(car (1 2 3))").unwrap(), num(1.0));
}

#[test]
fn test_lisp_e2e_empty_list_results() {
    assert!(run("()").unwrap().is_empty_list());
    assert!(run("(cdr (list 1))").unwrap().is_empty_list());
    assert!(run("(list)").unwrap().is_empty_list());
    assert_eq!(run("(eq? (cdr (list 1)) '())").unwrap(), Expression::Boolean(true));
}

#[test]
fn test_lisp_e2e_data_lists() {
    assert_eq!(run("(1 2 3)").unwrap().to_string(), "(1 2 3)");
    assert_eq!(run("(define a 1)(a 2 3)").unwrap().to_string(), "(1 2 3)");
    assert_eq!(run("(define a +)(a 2 3)").unwrap(), num(5.0));
    assert_eq!(run("(\"a\" (+ 1 1))").unwrap().to_string(), "(\"a\" 2)");
}

#[test]
fn test_lisp_e2e_equality() {
    assert_eq!(run("(equal? '(1 2 3) '(1 2 3))").unwrap(), Expression::Boolean(true));
    assert_eq!(run("(equal? '(1 2 3) '(1 2))").unwrap(), Expression::Boolean(false));
    assert_eq!(run("(eq? 'a 'a)").unwrap(), Expression::Boolean(true));
    assert_eq!(run("(eq? '(1) '(1))").unwrap(), Expression::Boolean(false));
    assert_eq!(run("(define l '(1))(eq? l l)").unwrap(), Expression::Boolean(true));
    assert_eq!(run("(eqv? 2 2)").unwrap(), Expression::Boolean(true));
}

#[test]
fn test_lisp_e2e_equal_on_improper_lists() {
    assert_eq!(run("(equal? (cons 1 2) (list 1 2))").unwrap(), Expression::Boolean(true));
    assert_eq!(run("(equal? (cons 1 (cons 2 3)) '(1 2 3))").unwrap(), Expression::Boolean(true));
    assert_eq!(run("(equal? (cons 1 2) (list 1 2 3))").unwrap(), Expression::Boolean(false));
}

#[test]
fn test_lisp_e2e_eq_rejects_non_expressions() {
    let err = run("(eq? (define a 1) (define b 2))").unwrap_err();
    assert_eq!(err.to_string(), "Runtime error: All arguments must be an expression: , ");

    assert!(run("(eqv? car car)").is_err());
}

#[test]
fn test_lisp_e2e_type_predicates() {
    assert_eq!(run("(number? 1)").unwrap(), Expression::Boolean(true));
    assert_eq!(run("(string? \"s\")").unwrap(), Expression::Boolean(true));
    assert_eq!(run("(symbol? 'a)").unwrap(), Expression::Boolean(true));
    assert_eq!(run("(boolean? #f)").unwrap(), Expression::Boolean(true));
    assert_eq!(run("(pair? '())").unwrap(), Expression::Boolean(false));
    assert_eq!(run("(list? '())").unwrap(), Expression::Boolean(true));
    assert_eq!(run("(list? (lambda (x) x))").unwrap(), Expression::Boolean(true));
}

#[test]
fn test_lisp_e2e_strings() {
    assert_eq!(
        run("(string-append \"Hello\" \", \" \"World\")").unwrap(),
        Expression::string("Hello, World")
    );
    assert_eq!(
        run("(string-join '(\"a\" \"b\" \"c\") \"-\")").unwrap(),
        Expression::string("a-b-c")
    );
}

#[test]
fn test_lisp_e2e_let_and_begin() {
    let source = r#"
        (define x 1)
        (let ((x 10) (y x))
          (set! x (+ x y))
          x)
    "#;
    assert_eq!(run(source).unwrap(), num(11.0));

    assert_eq!(run("(define x 1)(let ((x 10)) x) x").unwrap(), num(1.0));
    assert_eq!(run("(begin 1 2 3)").unwrap(), num(3.0));
}

#[test]
fn test_lisp_e2e_keyword_reference() {
    let err = run("(list if)").unwrap_err();
    assert_eq!(err.to_string(), "Illegal reference to keyword: if");

    let err = run("(define let 1)").unwrap_err();
    assert_eq!(err, Error::KeywordReference { name: "let".to_string() });
}

#[test]
fn test_lisp_e2e_syntax_error_position() {
    let err = run("(define x 1)\n(+ x @)").unwrap_err();
    assert_eq!(err, Error::syntax(1, 5, "Invalid character: @"));
}

#[test]
fn test_lisp_e2e_last_value_wins() {
    assert_eq!(run("1 2 \"three\"").unwrap(), Expression::string("three"));
    assert_eq!(run("(define x 1)").unwrap(), Expression::Unspecified);
}
