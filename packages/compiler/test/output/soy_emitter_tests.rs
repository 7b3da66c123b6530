/**
 * Soy Emitter Tests
 *
 * Serialization of the Soy output AST
 */

#[cfg(test)]
mod tests {
    use soy_compiler::output::soy_ast::*;
    use soy_compiler::output::{emit_commands, emit_file, EmitError};

    fn template(name: &str, body: Vec<Command>) -> Command {
        Command::Template(TemplateCmd {
            name: name.to_string(),
            body,
        })
    }

    fn param(name: &str, type_name: Option<&str>) -> Command {
        Command::Param(ParamDecl {
            name: name.to_string(),
            type_name: type_name.map(str::to_string),
        })
    }

    mod files {
        use super::*;

        #[test]
        fn should_emit_only_the_namespace_for_empty_files() {
            let source = emit_file(&[Command::Namespace("a.b".to_string())]).unwrap();
            assert_eq!(source, "{namespace a.b}\n");
        }

        #[test]
        fn should_emit_templates_with_params_and_body() {
            let source = emit_file(&[
                Command::Namespace("ns".to_string()),
                template(
                    "greeting",
                    vec![
                        param("name", Some("string")),
                        param("loose", None),
                        Command::RawText("<b>".to_string()),
                        Command::Print(variable("name")),
                        Command::RawText("</b>".to_string()),
                    ],
                ),
            ])
            .unwrap();
            assert_eq!(
                source,
                "{namespace ns}\n\n{template .greeting}\n  {@param name: string}\n  {@param loose}\n  <b>{$name}</b>\n{/template}\n"
            );
        }

        #[test]
        fn should_fail_on_error_markers_anywhere_in_the_tree() {
            let result = emit_file(&[
                Command::Namespace("ns".to_string()),
                template(
                    "t",
                    vec![Command::If(IfCmd {
                        condition: bool_literal(true),
                        then_commands: vec![Command::Print(error_expr("bad"))],
                        else_commands: None,
                    })],
                ),
            ]);
            assert_eq!(
                result,
                Err(EmitError::ErrorMarker {
                    message: "bad".to_string()
                })
            );
        }
    }

    mod commands {
        use super::*;

        #[test]
        fn should_escape_braces_in_raw_text() {
            let out = emit_commands(&[Command::RawText("a{b}c".to_string())]).unwrap();
            assert_eq!(out, "a{lb}b{rb}c");
        }

        #[test]
        fn should_emit_if_else() {
            let out = emit_commands(&[Command::If(IfCmd {
                condition: variable("c"),
                then_commands: vec![Command::RawText("yes".to_string())],
                else_commands: Some(vec![Command::RawText("no".to_string())]),
            })])
            .unwrap();
            assert_eq!(out, "{if $c}yes{else}no{/if}");
        }

        #[test]
        fn should_emit_for_and_let() {
            let out = emit_commands(&[
                Command::Let(LetCmd {
                    name: "n".to_string(),
                    value: number_literal(2.0),
                }),
                Command::For(ForCmd {
                    var_name: "item".to_string(),
                    list: variable("items"),
                    body: vec![Command::Print(variable("item"))],
                }),
            ])
            .unwrap();
            assert_eq!(out, "{let $n: 2 /}{for $item in $items}{$item}{/for}");
        }

        #[test]
        fn should_emit_calls_with_and_without_params() {
            let bare = emit_commands(&[Command::Call(CallCmd {
                template: "other".to_string(),
                params: Vec::new(),
            })])
            .unwrap();
            assert_eq!(bare, "{call .other /}");

            let qualified = emit_commands(&[Command::Call(CallCmd {
                template: "ui.button.Button".to_string(),
                params: Vec::new(),
            })])
            .unwrap();
            assert_eq!(qualified, "{call ui.button.Button /}");

            let with_params = emit_commands(&[Command::Call(CallCmd {
                template: "MyElement".to_string(),
                params: vec![
                    CallParam::Value {
                        name: "count".to_string(),
                        value: variable("count"),
                    },
                    CallParam::Block {
                        name: "children".to_string(),
                        kind: ContentKind::Html,
                        body: vec![Command::RawText("<p></p>".to_string())],
                    },
                ],
            })])
            .unwrap();
            assert_eq!(
                with_params,
                "{call .MyElement}{param count: $count /}{param children kind=\"html\"}<p></p>{/param}{/call}"
            );
        }
    }

    mod expressions {
        use super::*;

        #[test]
        fn should_emit_operators_with_soy_spelling() {
            let expr = binary(
                BinaryOperator::And,
                unary(UnaryOperator::Not, variable("a")),
                paren(binary(BinaryOperator::Equals, variable("b"), number_literal(1.5))),
            );
            assert_eq!(expr.to_soy().unwrap(), "not $a and ($b == 1.5)");
        }

        #[test]
        fn should_emit_literals() {
            assert_eq!(string_literal("it's").to_soy().unwrap(), "'it\\'s'");
            assert_eq!(number_literal(42.0).to_soy().unwrap(), "42");
            assert_eq!(null_literal().to_soy().unwrap(), "null");
            assert_eq!(
                unary(UnaryOperator::Minus, number_literal(3.0)).to_soy().unwrap(),
                "-3"
            );
        }

        #[test]
        fn should_parenthesize_compound_unary_operands() {
            let negated = unary(
                UnaryOperator::Minus,
                unary(UnaryOperator::Minus, variable("n")),
            );
            assert_eq!(negated.to_soy().unwrap(), "-(-$n)");
            let not_sum = unary(
                UnaryOperator::Not,
                binary(BinaryOperator::Plus, variable("a"), variable("b")),
            );
            assert_eq!(not_sum.to_soy().unwrap(), "not ($a + $b)");
            let not_paren = unary(UnaryOperator::Not, paren(variable("a")));
            assert_eq!(not_paren.to_soy().unwrap(), "not ($a)");
        }

        #[test]
        fn should_emit_calls_access_and_records() {
            let expr = ternary(
                function_call("strContains", vec![variable("s"), string_literal("x")]),
                property_access(variable("user"), "name"),
                Expression::Record(vec![
                    ("a".to_string(), number_literal(1.0)),
                    ("b".to_string(), bool_literal(false)),
                ]),
            );
            assert_eq!(
                expr.to_soy().unwrap(),
                "strContains($s, 'x') ? $user.name : record(a: 1, b: false)"
            );
        }

        #[test]
        fn should_report_nested_errors() {
            let expr = binary(BinaryOperator::Plus, variable("a"), error_expr("nope"));
            assert!(expr.has_error());
            assert!(expr.to_soy().is_err());
        }
    }
}
