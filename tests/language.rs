use std::{fs, rc::Rc};

use basic::{
    error::Error,
    interpreter::{
        environment::Context,
        host::BufferHost,
        value::core::{Data, Value},
    },
    run,
};
use walkdir::WalkDir;

#[test]
fn script_corpus_matches_expected_output() {
    let mut count = 0;

    for entry in WalkDir::new("tests/scripts").into_iter()
                                              .filter_map(Result::ok)
                                              .filter(|e| e.path().extension().is_some_and(|ext| ext == "bas"))
    {
        let path = entry.path();
        let script =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected_path = path.with_extension("out");
        let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
                                                             panic!("Failed to read {expected_path:?}: {e}")
                                                         });

        let host = Rc::new(BufferHost::new());
        let (result, _) = run(&path.display().to_string(), &script, Some(Context::global(host.clone())));
        if let Err(e) = result {
            panic!("Script {path:?} failed:\n{e}");
        }

        let expected: Vec<&str> = expected.lines().collect();
        assert_eq!(host.output(), expected, "output of {path:?}");
        count += 1;
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

fn run_captured(src: &str, host: BufferHost) -> (Result<Value, Error>, Rc<BufferHost>) {
    let host = Rc::new(host);
    let (result, _) = run("<test>", src, Some(Context::global(host.clone())));
    (result, host)
}

fn eval(src: &str) -> Value {
    run_captured(src, BufferHost::new()).0
                                        .unwrap_or_else(|e| panic!("Script failed:\n{e}"))
}

/// Display of the last top-level statement's value.
fn last(src: &str) -> String {
    let Data::List(values) = eval(src).data else {
        panic!("program value is not a statement list");
    };
    let values = values.borrow();
    values.last().expect("program has no statements").to_string()
}

fn output(src: &str) -> Vec<String> {
    let (result, host) = run_captured(src, BufferHost::new());
    if let Err(e) = result {
        panic!("Script failed:\n{e}");
    }
    host.output()
}

fn failure(src: &str) -> Error {
    match run_captured(src, BufferHost::new()).0 {
        Ok(value) => panic!("Script succeeded with {value} but was expected to fail"),
        Err(e) => e,
    }
}

fn assert_failure(src: &str, message: &str) {
    let error = failure(src).to_string();
    assert!(error.contains(message), "expected {message:?} in:\n{error}");
}

#[test]
fn number_literals_print_without_trailing_zero() {
    assert_eq!(last("42"), "42");
    assert_eq!(last("1.0"), "1");
    assert_eq!(last("2."), "2");
    assert_eq!(last("3.25"), "3.25");
}

#[test]
fn assignment_is_an_expression() {
    assert_eq!(last("var a = 6\na"), "6");
    assert_eq!(last("var b = var c = var d = 1"), "1");
    assert_eq!(last("var b = var c = var d = 1\n[b, c, d]"), "[1, 1, 1]");
    assert_eq!(last("5 + (var x = 8)"), "13");
    assert_eq!(last("5 + (var x = 8)\nx"), "8");
}

#[test]
fn arithmetic_and_precedence() {
    assert_eq!(last("1 + 2 * 3"), "7");
    assert_eq!(last("(1 + 2) * 3"), "9");
    assert_eq!(last("7 - 10 / 4"), "4.5");
    assert_eq!(last("2 ^ 3 ^ 2"), "512");
    assert_eq!(last("-2 ^ 2"), "-4");
    assert_eq!(last("--3"), "3");
    assert_eq!(last("+4"), "4");
    assert_eq!(last("var a = 1; a + 1"), "2");
}

#[test]
fn comparisons_and_logic_yield_numbers() {
    assert_eq!(last("[1 < 2, 2 < 1, 1 == 1, 1 != 1, 2 >= 2, 1 <= 0, 3 > 2]"),
               "[1, 0, 1, 0, 1, 0, 1]");
    assert_eq!(last("[1 and 0, 1 and 2, 0 or 0, 0 or 3, not 0, not 5]"), "[0, 1, 0, 1, 1, 0]");
    assert_eq!(last("math_pi > 3.14 and math_pi < 3.15"), "1");
    assert_eq!(last("[true, false, null]"), "[1, 0, 0]");
}

#[test]
fn list_operators_copy_instead_of_mutating() {
    assert_eq!(last("[1,2,3] + 4"), "[1, 2, 3, 4]");
    assert_eq!(last("[1,2,3] * [4,5]"), "[1, 2, 3, 4, 5]");
    assert_eq!(last("[1,2,3] - 0"), "[2, 3]");
    assert_eq!(last("[1,2,3] - -1"), "[1, 2]");
    assert_eq!(last("[1,2,3] / 0"), "1");
    assert_eq!(last("[1,2,3] / -1"), "3");
    assert_eq!(last("[] + []"), "[[]]");

    let src = "var l = [1, 2, 3]\nvar a = l + 4\nvar b = l * [5]\nvar c = l - 0\nl";
    assert_eq!(last(src), "[1, 2, 3]");
}

#[test]
fn list_index_out_of_bounds_is_error() {
    assert_failure("[1, 2] / 2",
                   "Element at this index could not be retrieved because index is out of bounds");
    assert_failure("[1, 2] - -3",
                   "Element at this index could not be removed because index is out of bounds");
}

#[test]
fn string_operators() {
    assert_eq!(last("\"ab\" + \"cd\""), "\"abcd\"");
    assert_eq!(last("\"ab\" * 3"), "\"ababab\"");
    assert_eq!(last("\"ab\" * 2.9"), "\"abab\"");
    assert_eq!(last("\"ab\" * -1"), "\"\"");
}

#[test]
fn oversized_string_repetition_is_error() {
    assert_failure("\"ab\" * (10 ^ 300)", "Resulting string is too long");
    assert_failure("\"ab\" * 1000000000", "Resulting string is too long");
    assert_eq!(last("\"\" * (10 ^ 300)"), "\"\"");
}

#[test]
fn strings_display_raw_text_in_quotes() {
    assert_eq!(last("[\"a\\nb\"]"), "[\"a\nb\"]");
    assert_eq!(last("\"tab\\there\""), "\"tab\there\"");
}

#[test]
fn division_by_zero_is_error() {
    assert_failure("1 / 0", "Runtime Error: Division by zero");
    assert_failure("var z = 0\n10 / z", "Division by zero");
}

#[test]
fn operators_report_kinds() {
    assert_failure("1 + \"a\"", "Incompatible type from String to Number");
    assert_failure("[1] * 2", "Incompatible type from Number to List");
    assert_failure("\"a\" - 1", "'-' operator is not defined for String");
    assert_failure("\"a\" < \"b\"", "'<' operator is not defined for String");
    assert_failure("\"a\" and 1", "'and' keyword is not defined for String");
    assert_failure("not \"a\"", "'not' keyword is not defined for String");
    assert_failure("print + 1", "'+' operator is not defined for BuiltInFunction");
}

#[test]
fn if_yields_value_of_single_line_arm() {
    assert_eq!(last("if 0 then 1 elif 1 then 2 else 3"), "2");
    assert_eq!(last("if 1 then 1 elif 1 then 2 else 3"), "1");
    assert_eq!(last("if 0 then 1 elif 0 then 2 else 3"), "3");
    assert_eq!(last("if 0 then 1"), "0");
    assert_eq!(last("if \"text\" then 1 else 2"), "1");
    assert_eq!(last("if \"\" then 1 else 2"), "2");
}

#[test]
fn multi_line_if_runs_body_and_yields_null() {
    let src = "var x = 2\nif x == 1 then\n    print(\"one\")\nelif x == 2 then\n    \
               print(\"two\")\n    print(\"still two\")\nelse\n    print(\"other\")\nend";
    assert_eq!(output(src), vec!["two", "still two"]);
    assert_eq!(last(src), "0");
}

#[test]
fn condition_without_truth_value_is_error() {
    assert_failure("if [1] then 1", "List cannot be used as a condition");
    assert_failure("while print then 1", "BuiltInFunction cannot be used as a condition");
}

#[test]
fn for_loop_collects_single_line_values() {
    assert_eq!(last("for i = 0 to 5 then i"), "[0, 1, 2, 3, 4]");
    assert_eq!(last("for i = 5 to 0 step -2 then i"), "[5, 3, 1]");
    assert_eq!(last("for i = 0 to 1 step 0.25 then i"), "[0, 0.25, 0.5, 0.75]");
    assert_eq!(last("for i = 3 to 3 then i"), "[]");
    assert_eq!(last("for i = 0 to 5 then\n    i\nend"), "0");
}

#[test]
fn loop_variable_lives_in_current_scope() {
    assert_eq!(last("for i = 0 to 3 then i\ni"), "2");
}

#[test]
fn for_loop_bounds_must_be_numbers() {
    assert_failure("for i = \"a\" to 3 then i", "Runtime Error: Incompatible type");
    assert_failure("for i = 0 to 3 step [] then i", "Incompatible type");
}

#[test]
fn continue_skips_and_break_stops() {
    assert_eq!(last("for i = 0 to 6 then if i == 2 then continue else i"), "[0, 1, 3, 4, 5]");
    assert_eq!(last("for i = 0 to 10 then if i == 3 then break else i"), "[0, 1, 2]");

    let src = "var i = 0\nwhile 1 then\n    var i = i + 1\n    if i == 4 then break\nend\ni";
    assert_eq!(last(src), "4");
}

#[test]
fn while_loop_collects_single_line_values() {
    assert_eq!(last("var i = 0\nwhile i < 5 then var i = i + 1"), "[1, 2, 3, 4, 5]");
    assert_eq!(last("var i = 0\nwhile i < 5 then\n    var i = i + 1\nend"), "0");
}

#[test]
fn functions_return_values() {
    assert_eq!(last("function add(a, b) -> a + b\nadd(2, 5)"), "7");
    assert_eq!(last("function f(x)\n    return x * 2\nend\nf(21)"), "42");
    assert_eq!(last("function f()\n    return\nend\nf()"), "0");
    assert_eq!(last("function f()\n    var unused = 1\nend\nf()"), "0");
    assert_eq!(last("var sq = function(x) -> x * x\nsq(9)"), "81");
}

#[test]
fn function_values_print() {
    assert_eq!(last("function f() -> 1"), "<function f>");
    assert_eq!(last("function() -> 1"), "<function <anonymous>>");
    assert_eq!(last("print"), "<built-in function print>");
}

#[test]
fn argument_count_is_checked() {
    assert_failure("function f(a, b) -> a + b\nf(1)", "1 too few arguments passed into f");
    assert_failure("function f(a, b) -> a + b\nf(1, 2, 3, 4)",
                   "2 too many arguments passed into f");
    assert_failure("len()", "1 too few arguments passed into len");
    assert_failure("print(1, 2)", "1 too many arguments passed into print");
}

#[test]
fn calling_a_non_function_is_error() {
    assert_failure("5(1)", "Illegal operation");
}

#[test]
fn recursion_resolves_own_name() {
    let src = "function fib(n)\n    if n < 2 then return n\n    return fib(n - 1) + fib(n - \
               2)\nend\nfib(15)";
    assert_eq!(last(src), "610");
}

#[test]
fn closures_capture_definition_scope() {
    let src = "function make_adder(n) -> function(x) -> x + n\nvar add5 = \
               make_adder(5)\nadd5(10)";
    assert_eq!(last(src), "15");

    let src = "var x = 1\nfunction show() -> x\nfunction shadow()\n    var x = 2\n    return \
               show()\nend\nshadow()";
    assert_eq!(last(src), "1");
}

#[test]
fn functions_defined_in_calls_keep_working() {
    let src = "function make(n)\n    function get() -> n\n    return get\nend\nvar g = \
               make(4)\ng()";
    assert_eq!(last(src), "4");

    let src = "function outer(x)\n    function helper(n) -> n * 2\n    return \
               helper(x)\nend\nouter(1) + outer(2)";
    assert_eq!(last(src), "6");
}

#[test]
fn assignment_never_writes_outer_scope() {
    let src = "var x = 1\nfunction set()\n    var x = 5\nend\nset()\nx";
    assert_eq!(last(src), "1");
}

#[test]
fn local_null_binding_shadows_outer() {
    let src = "var x = 7\nfunction f()\n    var x = null\n    return x\nend\nf()";
    assert_eq!(last(src), "0");
}

#[test]
fn undefined_variable_names_identifier_and_position() {
    let error = failure("var a = 1\n1 + foo");
    assert!(error.to_string().contains("foo is not defined"));
    assert_eq!(error.span().start.line, 1);
    assert_eq!(error.span().start.col, 4);
    assert_eq!(error.span().end.col, 7);
}

#[test]
fn environment_persists_between_runs() {
    let host = Rc::new(BufferHost::new());
    let (result, env) = run("<stdin>",
                            "var a = 1\nfunction f() -> a * 10",
                            Some(Context::global(host)));
    assert!(result.is_ok());

    let (result, env) = run("<stdin>", "var a = a + 1", Some(env));
    assert!(result.is_ok());

    let (result, _) = run("<stdin>", "f()", Some(env));
    assert_eq!(result.unwrap(), Value::list(vec![Value::number(20.0)]));
}

#[test]
fn errors_abort_after_earlier_side_effects() {
    let (result, host) = run_captured("print(1)\n1 / 0\nprint(2)", BufferHost::new());
    assert!(result.is_err());
    assert_eq!(host.output(), vec!["1"]);
}

#[test]
fn errors_stop_remaining_list_elements() {
    let (result, host) = run_captured("[print(1), 1 / 0, print(2)]", BufferHost::new());
    assert!(result.is_err());
    assert_eq!(host.output(), vec!["1"]);
}

#[test]
fn errors_stop_remaining_arguments() {
    let (result, host) =
        run_captured("function f(a, b, c) -> a\nf(print(1), 1 / 0, print(2))", BufferHost::new());
    assert!(result.is_err());
    assert_eq!(host.output(), vec!["1"]);
}

#[test]
fn errors_stop_right_operand() {
    let (result, host) = run_captured("print(1) + 1 / 0 + print(2)", BufferHost::new());
    assert!(result.is_err());
    assert_eq!(host.output(), vec!["1"]);
}

#[test]
fn signals_stop_remaining_arguments() {
    let src = "function f(a, b, c) -> a\nfunction g()\n    f(print(1), if 1 then return 7, \
               print(2))\n    print(3)\nend\ng()";
    assert_eq!(output(src), vec!["1"]);
    assert_eq!(last(src), "7");

    let src = "function f(a, b, c) -> a\nfor i = 0 to 3 then f(print(i), if i == 1 then break, \
               print(9))";
    assert_eq!(output(src), vec!["0", "9", "1"]);
    assert_eq!(last(src), "[0]");
}

#[test]
fn top_level_return_ends_program() {
    assert_eq!(eval("print(1)\nreturn 5\nprint(2)"), Value::number(5.0));
    assert_eq!(eval("break"), Value::null());
}

#[test]
fn print_writes_text() {
    assert_eq!(output("print(\"hi\")\nprint([1, \"a\"])\nprint(1.5)\nprint(\"a\\tb\")"),
               vec!["hi", "[1, \"a\"]", "1.5", "a\tb"]);
    assert_eq!(last("print(\"x\")"), "0");
}

#[test]
fn print_ret_returns_text() {
    assert_eq!(last("print_ret(5) + \"!\""), "\"5!\"");
    assert_eq!(last("print_ret(\"s\")"), "\"s\"");
}

#[test]
fn input_reads_lines() {
    let (result, _) = run_captured("input()", BufferHost::with_input(["abc"]));
    assert_eq!(result.unwrap(), Value::list(vec![Value::string("abc")]));

    let (result, host) = run_captured("input_int() + 1", BufferHost::with_input(["x", "1.5", "12"]));
    assert_eq!(result.unwrap(), Value::list(vec![Value::number(13.0)]));
    assert_eq!(host.output(),
               vec!["x must be an integer. Try again!", "1.5 must be an integer. Try again!"]);

    assert_failure("input()", "Input stream closed");
    assert_failure("input_int()", "Input stream closed");
}

#[test]
fn clear_goes_through_host() {
    let (result, host) = run_captured("clear()\nclear()", BufferHost::new());
    assert!(result.is_ok());
    assert_eq!(host.clear_count(), 2);
}

#[test]
fn type_predicates() {
    assert_eq!(last("[is_number(1), is_string(\"a\"), is_list([]), is_function(print), \
                     is_function(function() -> 1), is_number(\"a\"), is_list(1)]"),
               "[1, 1, 1, 1, 1, 0, 0]");
}

#[test]
fn list_builtins_mutate_in_place() {
    assert_eq!(last("var l = [1]\nappend(l, 2)\nl"), "[1, 2]");
    assert_eq!(last("var l = [1, 2, 3]\nvar x = pop(l, -1)\n[x, l]"), "[3, [1, 2]]");
    assert_eq!(last("var l = [1, 2, 3]\npop(l, 0)"), "1");
    assert_eq!(last("var a = [1]\nextend(a, [2, 3])\na"), "[1, 2, 3]");
    assert_eq!(last("var a = [1, 2]\nextend(a, a)\na"), "[1, 2, 1, 2]");
    assert_eq!(last("len([1, 2, 3])"), "3");
    assert_eq!(last("len([])"), "0");
}

#[test]
fn lists_never_contain_themselves() {
    assert_eq!(last("var a = [1]\nappend(a, a)\na"), "[1, [1]]");
    assert_eq!(last("var a = [1]\nappend(a, a)\nappend(a, 2)\na"), "[1, [1], 2]");
    assert_eq!(last("var a = [1]\nvar b = [a]\nappend(a, b)\na"), "[1, [[1]]]");
    assert_eq!(last("var a = [1]\nextend(a, [a])\na"), "[1, [1]]");
    assert_eq!(output("var a = [1]\nappend(a, a)\nprint(a)"), vec!["[1, [1]]"]);

    let value = eval("var a = [1]\nappend(a, a)\na");
    assert_eq!(value, value.clone());
    assert_eq!(value.to_string(), "[[1], 0, [1, [1]]]");
}

#[test]
fn list_builtins_check_arguments() {
    assert_failure("append(1, 2)", "First argument must be list");
    assert_failure("pop([1], \"0\")", "Second argument must be number");
    assert_failure("pop([1], 5)", "could not be removed");
    assert_failure("extend([1], 2)", "Second argument must be list");
    assert_failure("len(\"abc\")", "Argument must be list");
}

#[test]
fn builtin_errors_show_builtin_frame() {
    let error = failure("append(1, 2)").to_string();
    assert!(error.contains("in append"), "{error}");
}

#[test]
fn run_executes_script_in_root_environment() {
    let host = BufferHost::new();
    host.add_source("lib.bas", "var shared = 42\nfunction twice(x) -> x * 2");

    let (result, _) = run_captured("run(\"lib.bas\")\ntwice(shared)", host);
    assert_eq!(result.unwrap(), Value::list(vec![Value::null(), Value::number(84.0)]));
}

#[test]
fn run_wraps_failures() {
    assert_failure("run(\"missing.bas\")", "Failed to load script \"missing.bas\"");
    assert_failure("run(1)", "First argument must be string");

    let host = BufferHost::new();
    host.add_source("bad.bas", "1 / 0");
    let (result, _) = run_captured("run(\"bad.bas\")", host);
    let error = result.unwrap_err().to_string();
    assert!(error.contains("Failed to finish executing script \"bad.bas\""), "{error}");
    assert!(error.contains("Division by zero"), "{error}");
}
