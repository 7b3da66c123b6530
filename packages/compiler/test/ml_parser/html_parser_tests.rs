/**
 * HTML Parser Tests
 *
 * Tree shape, spans and error recovery of the fragment parser
 */

#[cfg(test)]
mod tests {
    use soy_compiler::ml_parser::ast::{Node, Visitor};
    use soy_compiler::ml_parser::{ParseTreeResult, Parser};
    use soy_compiler::parse_util::ParseError;

    fn parse(html: &str) -> ParseTreeResult {
        Parser::new().parse(html, "TestComp")
    }

    /// Flattens the tree into `[kind, value, depth]` rows.
    fn humanize_dom(result: &ParseTreeResult) -> Vec<(String, String, usize)> {
        struct Humanizer {
            rows: Vec<(String, String, usize)>,
            depth: usize,
        }

        impl Visitor for Humanizer {
            fn visit_element(&mut self, element: &soy_compiler::ml_parser::ast::Element) {
                self.rows
                    .push(("Element".to_string(), element.name.clone(), self.depth));
                for attr in &element.attrs {
                    self.rows.push((
                        "Attribute".to_string(),
                        format!("{}={}", attr.name, attr.value),
                        self.depth + 1,
                    ));
                }
                self.depth += 1;
                soy_compiler::ml_parser::ast::visit_all(self, &element.children);
                self.depth -= 1;
            }

            fn visit_text(&mut self, text: &soy_compiler::ml_parser::ast::Text) {
                self.rows
                    .push(("Text".to_string(), text.value.clone(), self.depth));
            }

            fn visit_comment(&mut self, comment: &soy_compiler::ml_parser::ast::Comment) {
                self.rows
                    .push(("Comment".to_string(), comment.value.clone(), self.depth));
            }
        }

        let mut humanizer = Humanizer {
            rows: Vec::new(),
            depth: 0,
        };
        soy_compiler::ml_parser::ast::visit_all(&mut humanizer, &result.root_nodes);
        humanizer.rows
    }

    fn humanize_errors(errors: &[ParseError]) -> Vec<(String, String)> {
        errors
            .iter()
            .map(|e| (e.msg.clone(), e.span.start.to_string()))
            .collect()
    }

    fn row(kind: &str, value: &str, depth: usize) -> (String, String, usize) {
        (kind.to_string(), value.to_string(), depth)
    }

    mod parse {
        use super::*;

        #[test]
        fn should_parse_text_nodes() {
            let result = parse("a");
            assert_eq!(humanize_dom(&result), vec![row("Text", "a", 0)]);
        }

        #[test]
        fn should_keep_entities_undecoded() {
            let result = parse("&amp;&lt;");
            assert_eq!(humanize_dom(&result), vec![row("Text", "&amp;&lt;", 0)]);
        }

        #[test]
        fn should_parse_elements_and_attributes() {
            let result = parse("<div class=\"a\" hidden><span id=b>x</span></div>");
            assert!(result.errors.is_empty());
            assert_eq!(
                humanize_dom(&result),
                vec![
                    row("Element", "div", 0),
                    row("Attribute", "class=a", 1),
                    row("Attribute", "hidden=", 1),
                    row("Element", "span", 1),
                    row("Attribute", "id=b", 2),
                    row("Text", "x", 2),
                ]
            );
        }

        #[test]
        fn should_parse_comments() {
            let result = parse("<!-- note -->b");
            assert_eq!(
                humanize_dom(&result),
                vec![row("Comment", " note ", 0), row("Text", "b", 0)]
            );
        }

        #[test]
        fn should_treat_script_content_as_raw_text() {
            let result = parse("<script>if (a < b) {}</script>");
            assert_eq!(
                humanize_dom(&result),
                vec![row("Element", "script", 0), row("Text", "if (a < b) {}", 1)]
            );
        }

        #[test]
        fn should_support_self_closing_custom_elements() {
            let result = parse("<my-el/><p></p>");
            let Node::Element(el) = &result.root_nodes[0] else {
                panic!("expected element");
            };
            assert!(el.is_self_closing);
            assert_eq!(result.root_nodes.len(), 2);
        }
    }

    mod spans {
        use super::*;

        #[test]
        fn should_report_end_spans_only_for_explicit_end_tags() {
            let source = "<ul><li>a<li>b</ul>";
            let result = parse(source);
            let Node::Element(ul) = &result.root_nodes[0] else {
                panic!("expected element");
            };
            assert_eq!(ul.end_source_span.map(|s| s.text(source)), Some("</ul>"));
            assert_eq!(ul.start_source_span.text(source), "<ul>");
            let Node::Element(first) = &ul.children[0] else {
                panic!("expected element");
            };
            assert_eq!(first.end_source_span, None);
        }

        #[test]
        fn should_track_lines_and_columns() {
            let source = "<div>\n  <b>x</b>\n</div>";
            let result = parse(source);
            let Node::Element(div) = &result.root_nodes[0] else {
                panic!("expected element");
            };
            let bold = div
                .children
                .iter()
                .find_map(|child| match child {
                    Node::Element(el) => Some(el),
                    _ => None,
                })
                .unwrap();
            assert_eq!(bold.source_span.start.line, 1);
            assert_eq!(bold.source_span.start.col, 2);
            assert_eq!(bold.source_span.text(source), "<b>x</b>");
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn should_report_stray_closing_tags() {
            let result = parse("<div></span></div>");
            assert_eq!(
                humanize_errors(&result.errors),
                vec![("Unexpected closing tag \"span\"".to_string(), "1:6".to_string())]
            );
        }

        #[test]
        fn should_report_end_tags_of_void_elements() {
            let result = parse("<br></br>");
            assert_eq!(result.errors.len(), 1);
            assert!(result.errors[0].msg.starts_with("Void elements do not have end tags"));
        }

        #[test]
        fn should_close_unclosed_elements_at_end_of_input() {
            let result = parse("<div><p>text");
            assert!(result.errors.is_empty());
            assert_eq!(
                humanize_dom(&result),
                vec![
                    row("Element", "div", 0),
                    row("Element", "p", 1),
                    row("Text", "text", 2),
                ]
            );
        }
    }
}
