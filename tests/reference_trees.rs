// Reference Tree Tests
//
// Each expression is checked against the node-tag shape and fragment that the
// canonical OGNL grammar produces for it. Shapes are written compactly as
// `TAG(child,child)`.

use ognl_parser::{parse_expression, parse_top_level, Expr};

fn shape(expr: &Expr) -> String {
    let children = expr.children();
    if children.is_empty() {
        return expr.tag().to_string();
    }
    let inner: Vec<String> = children.into_iter().map(shape).collect();
    format!("{}({})", expr.tag(), inner.join(","))
}

fn tree(input: &str) -> Expr {
    match parse_expression(input) {
        Ok(expr) => expr,
        Err(errors) => panic!("Failed to parse {}: {}", input, errors),
    }
}

fn assert_shape(input: &str, expected: &str) {
    assert_eq!(shape(&tree(input)), expected, "Shape mismatch for {}", input);
}

fn assert_fragment(input: &str, expected: &str) {
    assert_eq!(tree(input).to_string(), expected, "Fragment mismatch for {}", input);
}

// ============================================================================
// Section: Operators
// ============================================================================

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    assert_shape("1 + 2 * 3", "ASTAdd(ASTConst,ASTMultiply(ASTConst,ASTConst))");
    assert_fragment("1 + 2 * 3", "1 + (2 * 3)");
}

#[test]
fn test_keyword_logical_operators() {
    assert_shape(
        "a and b or c",
        "ASTOr(ASTAnd(ASTProperty(ASTConst),ASTProperty(ASTConst)),ASTProperty(ASTConst))",
    );
    assert_fragment("a and b or c", "(a && b) || c");
}

#[test]
fn test_membership() {
    assert_shape(
        "#name in {\"A\",\"B\",\"C\"}",
        "ASTIn(ASTVarRef,ASTList(ASTConst,ASTConst,ASTConst))",
    );
    assert_fragment("#name in {\"A\",\"B\",\"C\"}", "#name in { \"A\", \"B\", \"C\" }");
}

#[test]
fn test_negated_membership() {
    let expected = "ASTNotIn(ASTProperty(ASTConst),ASTProperty(ASTConst))";
    assert_shape("x not in y", expected);
    assert_shape("not x in y", expected);
    assert_fragment("not x in y", "x not in y");
    assert_shape(
        "!x in y",
        "ASTIn(ASTNot(ASTProperty(ASTConst)),ASTProperty(ASTConst))",
    );
}

#[test]
fn test_keyword_not_inside_arithmetic() {
    assert_shape(
        "a * not b in c",
        "ASTIn(ASTMultiply(ASTProperty(ASTConst),ASTNot(ASTProperty(ASTConst))),ASTProperty(ASTConst))",
    );
    assert_shape(
        "1 + not a in b",
        "ASTIn(ASTAdd(ASTConst,ASTNot(ASTProperty(ASTConst))),ASTProperty(ASTConst))",
    );
    assert_shape(
        "not a + 1 in b",
        "ASTNotIn(ASTAdd(ASTProperty(ASTConst),ASTConst),ASTProperty(ASTConst))",
    );
    assert_shape(
        "not a + 1",
        "ASTAdd(ASTNot(ASTProperty(ASTConst)),ASTConst)",
    );
}

#[test]
fn test_every_binary_tag() {
    let test_cases = vec![
        ("a || b", "ASTOr"),
        ("a && b", "ASTAnd"),
        ("a | b", "ASTBitOr"),
        ("a ^ b", "ASTXor"),
        ("a & b", "ASTBitAnd"),
        ("a == b", "ASTEq"),
        ("a != b", "ASTNotEq"),
        ("a < b", "ASTLess"),
        ("a > b", "ASTGreater"),
        ("a <= b", "ASTLessEq"),
        ("a >= b", "ASTGreaterEq"),
        ("a in b", "ASTIn"),
        ("a not in b", "ASTNotIn"),
        ("a << b", "ASTShiftLeft"),
        ("a >> b", "ASTShiftRight"),
        ("a >>> b", "ASTUnsignedShiftRight"),
        ("a + b", "ASTAdd"),
        ("a - b", "ASTSubtract"),
        ("a * b", "ASTMultiply"),
        ("a / b", "ASTDivide"),
        ("a % b", "ASTRemainder"),
    ];

    for (input, tag) in test_cases {
        assert_eq!(tree(input).tag(), tag, "Failed for input: {}", input);
    }
}

#[test]
fn test_unary_tags() {
    assert_shape("-a", "ASTNegate(ASTProperty(ASTConst))");
    assert_shape("!a", "ASTNot(ASTProperty(ASTConst))");
    assert_shape("~a", "ASTBitNegate(ASTProperty(ASTConst))");
    assert_fragment("~(a + b)", "~(a + b)");
}

#[test]
fn test_conditional_and_assignment() {
    assert_shape(
        "a ? b : c",
        "ASTTest(ASTProperty(ASTConst),ASTProperty(ASTConst),ASTProperty(ASTConst))",
    );
    assert_fragment("a ? b : c", "a ? b : c");
    assert_fragment("x = y = 1", "x = y = 1");
}

// ============================================================================
// Section: Constructors and Static References
// ============================================================================

#[test]
fn test_array_initialiser() {
    assert_shape("new int[] { 10, 20 }", "ASTCtor(ASTList(ASTConst,ASTConst))");
    assert_fragment("new int[] { 10, 20 }", "new int[]{ 10, 20 }");
    assert_fragment("new int[5]", "new int[5]");
    assert_fragment("new java.util.ArrayList(3)", "new java.util.ArrayList(3)");
}

#[test]
fn test_static_method_shorthand() {
    assert_shape("@@max(3,4)", "ASTStaticMethod(ASTConst,ASTConst)");
    assert_fragment("@@max(3,4)", "@java.lang.Math@max(3, 4)");
}

#[test]
fn test_static_field_and_call_chain() {
    assert_shape("@java.lang.Math@PI", "ASTStaticField");
    assert_fragment("@java.lang.Math@PI", "@java.lang.Math@PI");
    assert_shape(
        "@java.util.Collections@emptyList().size()",
        "ASTChain(ASTStaticMethod,ASTMethod)",
    );
    assert_fragment(
        "@java.util.Collections@emptyList().size()",
        "@java.util.Collections@emptyList().size()",
    );
}

#[test]
fn test_instanceof() {
    assert_shape("a instanceof java.lang.String", "ASTInstanceof(ASTProperty(ASTConst))");
    assert_fragment("a instanceof java.lang.String", "a instanceof java.lang.String");
}

// ============================================================================
// Section: Lambdas and Eval
// ============================================================================

#[test]
fn test_recursive_factorial() {
    let input = "#fact=:[#this<=1?1:#fact(#this-1)*#this], #fact(30)";
    assert_shape(
        input,
        "ASTSequence(\
         ASTAssign(ASTVarRef,ASTConst(ASTTest(ASTLessEq(ASTThisVarRef,ASTConst),ASTConst,\
         ASTMultiply(ASTEval(ASTVarRef,ASTSubtract(ASTThisVarRef,ASTConst)),ASTThisVarRef)))),\
         ASTEval(ASTVarRef,ASTConst))",
    );
    assert_fragment(
        input,
        "#fact = :[(#this <= 1) ? 1 : (#fact)(#this - 1) * #this], (#fact)(30)",
    );
}

#[test]
fn test_lambda_applied_directly() {
    assert_shape(
        ":[#this + 1](41)",
        "ASTEval(ASTConst(ASTAdd(ASTThisVarRef,ASTConst)),ASTConst)",
    );
    assert_fragment(":[#this + 1](41)", "(:[#this + 1])(41)");
}

// ============================================================================
// Section: Chains, Projection and Selection
// ============================================================================

#[test]
fn test_chains() {
    assert_shape(
        "list[0].name",
        "ASTChain(ASTProperty(ASTConst),ASTProperty(ASTConst),ASTProperty(ASTConst))",
    );
    assert_fragment("list[0].name", "list[0].name");
    assert_fragment("a[^]", "a[^]");
    assert_fragment("a.(b + 1)", "a.(b + 1)");
    assert_fragment("#a.b(1, 2)", "#a.b(1, 2)");
}

#[test]
fn test_projection_and_selection_tags() {
    assert_shape(
        "users.{name}",
        "ASTChain(ASTProperty(ASTConst),ASTProject(ASTProperty(ASTConst)))",
    );
    assert_shape(
        "name.{? foo }",
        "ASTChain(ASTProperty(ASTConst),ASTSelect(ASTProperty(ASTConst)))",
    );
    assert_eq!(shape(&tree("a.{^ b}")), "ASTChain(ASTProperty(ASTConst),ASTSelectFirst(ASTProperty(ASTConst)))");
    assert_eq!(shape(&tree("a.{$ b}")), "ASTChain(ASTProperty(ASTConst),ASTSelectLast(ASTProperty(ASTConst)))");
    assert_fragment("list.{? #this > 1}", "list.{? (#this > 1)}");
    assert_fragment("users.{name}", "users.{name}");
}

#[test]
fn test_very_long_chain() {
    let mut input = String::from("x");
    for _ in 0..5000 {
        input.push_str(".p");
    }

    let output = parse_top_level(&input);
    assert!(output.errors.is_empty());
    match output.expr {
        Some(Expr::Chain(steps)) => assert_eq!(steps.len(), 5001),
        other => panic!("Expected chain, got {:?}", other.map(|e| e.tag())),
    }
}

#[test]
fn test_runaway_chain_is_stopped() {
    let mut input = String::from("x");
    for _ in 0..20_001 {
        input.push_str(".p");
    }

    let output = parse_top_level(&input);
    assert!(!output.errors.is_empty());
    assert!(output.errors[0].to_string().contains("iteration limit"));
}

// ============================================================================
// Section: Collections
// ============================================================================

#[test]
fn test_maps() {
    assert_shape(
        "#{ \"a\" : 1, \"b\" }",
        "ASTMap(ASTKeyValue(ASTConst,ASTConst),ASTKeyValue(ASTConst))",
    );
    assert_fragment("#{ \"a\" : 1, \"b\" }", "#{ \"a\" : 1, \"b\" : null }");
    assert_fragment(
        "#@java.util.TreeMap@{ \"k\" : \"v\" }",
        "#@java.util.TreeMap@{ \"k\" : \"v\" }",
    );
}

#[test]
fn test_list_of_constants() {
    assert_fragment("{ false, true, null, 0, 1. }", "{ false, true, null, 0, 1.0 }");
    assert_fragment("{}", "{  }");
    assert_fragment("new String[] { }", "new String[]{  }");
}

// ============================================================================
// Section: Constants
// ============================================================================

#[test]
fn test_numeric_constant_fragments() {
    let test_cases = vec![
        ("0x100", "256"),
        ("01000", "512"),
        ("1234L", "1234L"),
        ("1234l", "1234L"),
        ("10h", "10H"),
        (".1234", "0.1234"),
        ("12.", "12.0"),
        ("12e+1d", "120.0"),
        ("1.5", "1.5"),
        ("2.b", "2B"),
        ("1.25B", "1.25B"),
    ];

    for (input, expected) in test_cases {
        assert_fragment(input, expected);
    }
}

#[test]
fn test_text_constant_fragments() {
    assert_fragment("'\\u048c'", "'\u{48c}'");
    assert_fragment("'abc'", "\"abc\"");
    assert_fragment("\"a\"", "\"a\"");
    assert_fragment("$", "$");
}

#[test]
fn test_escaped_text_fragments() {
    assert_fragment(r#""a\tb\nc\"d""#, r#""a\tb\nc\"d""#);
    assert_fragment(r"'\''", r"'\''");
    assert_fragment(r#""it's""#, r#""it's""#);
    assert_fragment(r"'\\'", r"'\\'");
}
