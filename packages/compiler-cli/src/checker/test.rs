#[cfg(test)]
mod tests {
    use crate::checker::*;
    use oxc_allocator::Allocator;
    use oxc_ast::ast;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    /// Lowers the annotation of `const value: <ty> = ...` after the given
    /// declarations.
    fn lower(declarations: &str, ty: &str) -> HostType {
        let allocator = Allocator::default();
        let source = format!("{}\ndeclare const value: {};", declarations, ty);
        let ret = Parser::new(&allocator, &source, SourceType::ts()).parse();
        assert!(ret.errors.is_empty(), "parse errors: {:?}", ret.errors);
        let program = ret.program;
        let checker = AnnotationChecker::new(&program);

        let annotation = program
            .body
            .iter()
            .rev()
            .find_map(|stmt| match stmt {
                ast::Statement::VariableDeclaration(decl) => {
                    decl.declarations[0].id.type_annotation.as_deref()
                }
                _ => None,
            })
            .expect("annotated declaration");
        checker.type_of_annotation(Some(annotation))
    }

    mod lowering {
        use super::*;

        #[test]
        fn should_lower_keywords() {
            assert_eq!(lower("", "string"), HostType::String);
            assert_eq!(lower("", "number"), HostType::Number);
            assert_eq!(lower("", "boolean"), HostType::Boolean);
            assert_eq!(lower("", "null"), HostType::Null);
            assert_eq!(lower("", "any"), HostType::Any);
        }

        #[test]
        fn should_lower_arrays() {
            assert_eq!(lower("", "string[]"), HostType::array_of(HostType::String));
            assert_eq!(lower("", "Array<number>"), HostType::array_of(HostType::Number));
            assert_eq!(lower("", "Array"), HostType::Array(None));
        }

        #[test]
        fn should_flatten_unions() {
            assert_eq!(
                lower("", "string | (null | string)"),
                HostType::Union(vec![HostType::String, HostType::Null])
            );
            assert_eq!(
                lower("", "'a' | 'b'"),
                HostType::Union(vec![
                    HostType::StringLiteral("a".to_string()),
                    HostType::StringLiteral("b".to_string()),
                ])
            );
        }

        #[test]
        fn should_follow_local_aliases() {
            assert_eq!(
                lower("type Name = string;\nexport type Names = Name[];", "Names"),
                HostType::array_of(HostType::String)
            );
        }

        #[test]
        fn should_stop_on_recursive_aliases() {
            assert_eq!(lower("type Loop = Loop;", "Loop"), HostType::Unknown);
        }

        #[test]
        fn should_keep_unresolved_references_named() {
            assert_eq!(lower("", "Foo"), HostType::Named("Foo".to_string()));
            assert_eq!(lower("interface Foo { a: string }", "Foo"), HostType::Object);
        }
    }

    mod assignability {
        use super::*;

        #[test]
        fn should_treat_any_as_assignable_to_everything() {
            assert!(is_assignable_to(&HostType::Any, &HostType::Boolean));
            assert!(is_assignable_to(&HostType::Any, &HostType::Array(None)));
            assert!(!is_assignable_to(&HostType::Unknown, &HostType::String));
        }

        #[test]
        fn should_widen_literals() {
            assert!(is_assignable_to(&HostType::BooleanLiteral(true), &HostType::Boolean));
            assert!(is_assignable_to(
                &HostType::StringLiteral("x".to_string()),
                &HostType::String
            ));
            assert!(!is_assignable_to(&HostType::NumberLiteral(1.0), &HostType::String));
        }

        #[test]
        fn should_require_every_union_member() {
            let nullable = HostType::Union(vec![HostType::String, HostType::Null]);
            assert!(!is_assignable_to(&nullable, &HostType::String));
            assert!(is_assignable_to(
                &HostType::Null,
                &HostType::Union(vec![HostType::Null, HostType::Undefined])
            ));
        }

        #[test]
        fn should_compare_array_elements() {
            let strings = HostType::array_of(HostType::String);
            assert!(is_assignable_to(&strings, &HostType::Array(None)));
            assert!(!is_assignable_to(&strings, &HostType::array_of(HostType::Number)));
            assert!(!is_assignable_to(&HostType::String, &HostType::Array(None)));
        }
    }

    #[test]
    fn should_display_types() {
        assert_eq!(
            HostType::array_of(HostType::Union(vec![HostType::String, HostType::Null])).to_string(),
            "(string | null)[]"
        );
    }
}
