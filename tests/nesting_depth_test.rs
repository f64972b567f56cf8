use indoc::indoc;
use pretty_assertions::assert_eq;
use pyqual::analyzers::python::parse_module;
use pyqual::analyzers::{analyze_file, DepthAnalyzer, NestingAnalyzer};
use std::path::Path;

const MESSAGE_AT_3: &str =
    "Refactor this code to not nest more than 3 \"if\", \"for\", \"while\", \"try\" and \"with\" statements.";

fn violation_lines(source: &str, max_depth: usize) -> Vec<usize> {
    let ast = parse_module(source, Path::new("test.py")).unwrap();
    DepthAnalyzer::new(max_depth)
        .analyze(&ast.root)
        .into_iter()
        .map(|v| v.line)
        .collect()
}

#[test]
fn test_fixture_reports_single_violation() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/python/nested_control_flow_depth.py");
    let source = std::fs::read_to_string(&path).unwrap();

    let result = analyze_file(&source, &path, &NestingAnalyzer::new(3)).unwrap();

    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].line, 9);
    assert_eq!(result.violations[0].message, MESSAGE_AT_3);
    assert!(!result.has_parse_errors);
}

#[test]
fn test_if_for_while_try_reports_try_line() {
    let source = indoc! {"
        if a:
            for b in c:
                while d:
                    try:
                        pass
                    except Exception:
                        pass
    "};

    assert_eq!(violation_lines(source, 3), vec![4]);
}

#[test]
fn test_two_sibling_chains_report_twice() {
    let source = indoc! {"
        def first():
            if a:
                for b in c:
                    while d:
                        with e:
                            pass

        def second():
            if a:
                for b in c:
                    while d:
                        with e:
                            pass
    "};

    assert_eq!(violation_lines(source, 3), vec![5, 12]);
}

#[test]
fn test_deeper_descendants_of_violation_are_not_reported() {
    let source = indoc! {"
        if a:
            if b:
                if c:
                    if d:
                        if e:
                            if f:
                                pass
    "};

    assert_eq!(violation_lines(source, 3), vec![4]);
}

#[test]
fn test_elif_chain_does_not_add_depth() {
    let source = indoc! {"
        for x in xs:
            while y:
                if a:
                    pass
                elif b:
                    pass
                elif c:
                    pass
                else:
                    pass
    "};

    assert!(violation_lines(source, 3).is_empty());
}

#[test]
fn test_nesting_inside_elif_counts_from_the_if() {
    let source = indoc! {"
        for x in xs:
            while y:
                if a:
                    pass
                elif b:
                    with c:
                        pass
    "};

    assert_eq!(violation_lines(source, 3), vec![6]);
}

#[test]
fn test_async_constructs_and_exception_handlers() {
    let source = indoc! {"
        async def main():
            async with session:
                async for item in stream:
                    try:
                        pass
                    except ValueError:
                        if retry:
                            pass
    "};

    assert_eq!(violation_lines(source, 3), vec![7]);
}

#[test]
fn test_function_and_class_bodies_do_not_reset_depth() {
    let source = indoc! {"
        if a:
            class Inner:
                def method(self):
                    for x in xs:
                        while y:
                            with z:
                                pass
    "};

    assert_eq!(violation_lines(source, 3), vec![6]);
}

#[test]
fn test_custom_threshold() {
    let source = indoc! {"
        if a:
            if b:
                pass
    "};

    assert_eq!(violation_lines(source, 1), vec![2]);
    assert!(violation_lines(source, 2).is_empty());
}

#[test]
fn test_file_with_syntax_errors_is_not_fatal() {
    let source = "def broken(:\n    if a:\n        pass\n";

    let result = analyze_file(source, Path::new("broken.py"), &NestingAnalyzer::new(3)).unwrap();
    assert!(result.has_parse_errors);
    assert!(result.violations.is_empty());
}
