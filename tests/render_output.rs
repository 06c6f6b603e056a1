use rstest::rstest;
use serde_php::{decode, render, render_with_mode, RenderMode, RenderOptions};

fn var_export(input: &str) -> String {
    render_with_mode(&decode(input).unwrap(), RenderMode::VarExport)
}

fn json(input: &str) -> String {
    render(&decode(input).unwrap(), &RenderOptions::new().with_indent(0))
}

#[rstest]
#[case("i:42;", "42")]
#[case("d:0.1;", "0.1")]
#[case("d:3;", "3.0")]
#[case("d:-INF;", "-INF")]
#[case("b:1;", "true")]
#[case("N;", "NULL")]
#[case("s:3:\"a'b\";", r"'a\'b'")]
fn var_export_scalars(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(var_export(input), expected);
}

#[rstest]
#[case("i:42;", "42")]
#[case("d:0.5;", "0.5")]
#[case("d:NAN;", "null")]
#[case("b:0;", "false")]
#[case("N;", "null")]
#[case("s:5:\"h\"llo\";", r#""h\"llo""#)]
fn json_scalars(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(json(input), expected);
}

#[rstest]
fn var_export_map_quotes_string_keys() {
    let input = "a:2:{i:5;s:1:\"a\";s:3:\"foo\";a:1:{i:0;b:0;}}";
    assert_eq!(
        var_export(input),
        "array (\n  5 => 'a',\n  'foo' => \n  array (\n    0 => false,\n  ),\n)"
    );
}

#[rstest]
fn var_export_object_inside_array() {
    let input = "a:1:{i:0;O:4:\"User\":1:{s:4:\"name\";s:3:\"Ada\";}}";
    assert_eq!(
        var_export(input),
        "array (\n  0 => \n  \\User::__set_state(array(\n     'name' => 'Ada',\n  )),\n)"
    );
}

#[rstest]
fn var_export_custom_payload() {
    assert_eq!(
        var_export("C:3:\"Foo\":3:{abc}"),
        concat!(
            "\\__PHP_Incomplete_Class::__set_state(array(\n",
            "   '__PHP_Incomplete_Class_Name' => 'Foo',\n",
            "   'serialized' => 'abc',\n",
            "))"
        )
    );
}

#[rstest]
fn json_keeps_key_order_and_class_free_objects() {
    let input = "O:4:\"User\":2:{s:1:\"z\";i:1;s:1:\"a\";a:2:{i:0;N;i:1;d:1.5;}}";
    assert_eq!(json(input), r#"{"z":1,"a":[null,1.5]}"#);
}

#[rstest]
fn json_pretty_default_indent() {
    let value = decode("a:1:{s:1:\"k\";i:1;}").unwrap();
    assert_eq!(
        render(&value, &RenderOptions::default()),
        "{\n    \"k\": 1\n}"
    );
}

#[rstest]
fn cyclic_reference_renders_as_null() {
    let value = decode("O:8:\"stdClass\":1:{s:4:\"self\";r:1;}").unwrap();
    assert_eq!(
        render_with_mode(&value, RenderMode::VarExport),
        "(object) array(\n   'self' => NULL,\n)"
    );
    assert_eq!(render_with_mode(&value, RenderMode::Json).replace([' ', '\n'], ""), r#"{"self":null}"#);
}
