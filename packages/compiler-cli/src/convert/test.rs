use crate::config::ConverterOptions;
use crate::convert::{namespace_for, ConversionResult, SoyConverter};
use crate::logging::NullLogger;
use std::path::Path;

const FILE_NAME: &str = "src/ui/widgets.ts";
const HEADER: &str = "{namespace src.ui.widgets}\n";

fn convert_with(options: &ConverterOptions, source: &str) -> ConversionResult {
    let logger = NullLogger::new();
    SoyConverter::new(options, &logger).convert_source(Path::new(FILE_NAME), source)
}

fn convert(source: &str) -> ConversionResult {
    convert_with(&ConverterOptions::default(), source)
}

fn messages(result: &ConversionResult) -> Vec<String> {
    result
        .diagnostics
        .iter()
        .map(|d| d.message.clone())
        .collect()
}

/// Converts a source that must convert cleanly and returns its Soy output.
fn soy(source: &str) -> String {
    let result = convert(source);
    assert!(
        result.diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        messages(&result)
    );
    result.to_soy().unwrap()
}

/// The body line of the single template in `soy`.
fn template_body(output: &str) -> String {
    output
        .lines()
        .filter(|line| line.starts_with("  ") && !line.trim_start().starts_with("{@param"))
        .map(str::trim_start)
        .collect::<Vec<_>>()
        .join("\n")
}

mod files {
    use super::*;

    #[test]
    fn should_emit_only_the_namespace_without_marked_declarations() {
        let result = convert(
            r#"import { html } from 'lit';
export function plain(name: string) {
  return html`<p>${name}</p>`;
}
const value = 3;"#,
        );
        assert!(result.diagnostics.is_empty());
        assert_eq!(result.to_soy().unwrap(), HEADER);
    }

    #[test]
    fn should_convert_an_empty_div() {
        let output = soy(
            r#"import { html } from 'lit';
/** @soyCompatible */
export function empty() {
  return html`<div></div>`;
}"#,
        );
        assert_eq!(
            output,
            "{namespace src.ui.widgets}\n\n{template .empty}\n  <div></div>\n{/template}\n"
        );
    }

    #[test]
    fn should_be_idempotent() {
        let source = r#"import { html } from 'lit';
/** @soyCompatible */
export const card = (title: string, count: number) =>
  html`<h2>${title}</h2><span>${count === 1}</span>`;"#;
        let first = convert(source);
        let second = convert(source);
        assert_eq!(first.output, second.output);
        assert_eq!(first.diagnostics, second.diagnostics);
        assert_eq!(first.to_soy(), second.to_soy());
    }

    #[test]
    fn should_report_syntax_errors_and_stop() {
        let result = convert("/** @soyCompatible */\nexport function (");
        assert!(!result.diagnostics.is_empty());
        assert_eq!(result.to_soy().unwrap(), HEADER);
    }

    #[test]
    fn should_derive_namespaces_from_relative_paths() {
        assert_eq!(
            namespace_for(Path::new("/work/app/src/ui/button.ts"), Path::new("/work/app")),
            "src.ui.button"
        );
        assert_eq!(
            namespace_for(Path::new("widgets.ts"), Path::new("/elsewhere")),
            "widgets"
        );
    }
}

mod template_functions {
    use super::*;

    #[test]
    fn should_declare_typed_params_and_print_them_in_order() {
        let output = soy(
            r#"import { html } from 'lit';
/** @soyCompatible */
export const row = (a: string, b: number, c: boolean) => html`${a}${b}${c}`;"#,
        );
        assert_eq!(
            output,
            "{namespace src.ui.widgets}\n\n{template .row}\n  {@param a: string}\n  {@param b: number}\n  {@param c: bool}\n  {$a}{$b}{$c}\n{/template}\n"
        );
    }

    #[test]
    fn should_report_untyped_parameters() {
        let result = convert(
            "import { html } from 'lit';\n/** @soyCompatible */\nexport function f(x) {\n  return html`<p>${x}</p>`;\n}",
        );
        assert_eq!(result.diagnostics.len(), 1);
        let diagnostic = &result.diagnostics[0];
        assert!(diagnostic.message.contains("declared type"));
        assert_eq!((diagnostic.line, diagnostic.column), (3, 19));
        let output = result.to_soy().unwrap();
        assert!(output.contains("  {@param x}\n"));
        assert!(output.contains("<p>{$x}</p>"));
    }

    #[test]
    fn should_report_unmappable_types() {
        let result = convert(
            "import { html } from 'lit';\n/** @soyCompatible */\nexport function f(d: Date) {\n  return html`<p></p>`;\n}",
        );
        assert_eq!(messages(&result), vec!["`d`: type `Date` has no Soy equivalent"]);
        assert!(result.to_soy().unwrap().contains("  {@param d}\n"));
    }

    #[test]
    fn should_map_list_params() {
        let output = soy(
            r#"import { html } from 'lit';
type Names = string[];
/** @soyCompatible */
export function f(names: Names, rows: Array<{ id: number }>) {
  return html`${names.length}`;
}"#,
        );
        assert!(output.contains("{@param names: list<string>}"));
        assert!(output.contains("{@param rows: list<?>}"));
        assert!(output.contains("{length($names)}"));
    }

    #[test]
    fn should_convert_const_bindings_to_lets() {
        let output = soy(
            r#"import { html } from 'lit';
/** @soyCompatible */
export function greet(name: string) {
  const label = 'Hi ' + name;
  return html`<p>${label}</p>`;
}"#,
        );
        assert_eq!(template_body(&output), "{let $label: 'Hi ' + $name /}<p>{$label}</p>");
    }

    #[test]
    fn should_report_unsupported_statements() {
        let result = convert(
            r#"import { html } from 'lit';
/** @soyCompatible */
export function f(x: number) {
  if (x > 1) {
    x = 1;
  }
  return html`<p>${x}</p>`;
}"#,
        );
        assert_eq!(messages(&result), vec!["unsupported statement"]);
    }

    #[test]
    fn should_report_statements_after_the_return() {
        let result = convert(
            r#"import { html } from 'lit';
/** @soyCompatible */
export function f(x: number) {
  return html`<p>${x}</p>`;
  const y = 1;
}"#,
        );
        assert_eq!(messages(&result), vec!["unsupported statement"]);
    }

    #[test]
    fn should_require_a_returned_template() {
        let result = convert(
            r#"import { html } from 'lit';
/** @soyCompatible */
export function f(x: number) {
  const y = x;
}
/** @soyCompatible */
export const g = (x: string) => x;"#,
        );
        let messages = messages(&result);
        assert_eq!(messages.len(), 2);
        assert!(messages
            .iter()
            .all(|message| message.contains("must return a TemplateResult")));
        assert!(result.to_soy().is_err());
    }

    #[test]
    fn should_call_templates_of_the_same_file() {
        let output = soy(
            r#"import { html } from 'lit';
/** @soyCompatible */
export function page(title: string) {
  return html`<main>${header(title, 2)}</main>`;
}
/** @soyCompatible */
export function header(text: string, level: number) {
  return html`<h1>${text}</h1>`;
}"#,
        );
        assert!(output.contains("<main>{call .header /}</main>"));
    }

    #[test]
    fn should_verify_the_html_tag() {
        let result = convert(
            r#"import { html } from './my-html';
/** @soyCompatible */
export function f() {
  return html`<p></p>`;
}"#,
        );
        assert_eq!(result.diagnostics.len(), 1);
        assert!(result.diagnostics[0].message.contains("is not lit's `html`"));
        assert!(result.to_soy().is_err());
    }
}

mod expressions {
    use super::*;

    fn body_of(params: &str, markup: &str) -> String {
        let source = format!(
            "import {{ html }} from 'lit-html';\n/** @soyCompatible */\nexport function f({}) {{\n  return html`{}`;\n}}",
            params, markup
        );
        template_body(&soy(&source))
    }

    #[test]
    fn should_convert_operators_and_literals() {
        assert_eq!(
            body_of("a: number, b: number", "${a + b * 2 >= 10 && !(a != b)}"),
            "{$a + $b * 2 >= 10 and not ($a != $b)}"
        );
        assert_eq!(
            body_of("flag: boolean", "${flag ? 'yes' : null}${undefined}"),
            "{$flag ? 'yes' : null}{null}"
        );
        assert_eq!(
            body_of("n: number", "${{ count: n, label: 'x' }}"),
            "{record(count: $n, label: 'x')}"
        );
    }

    #[test]
    fn should_rewrite_string_members() {
        assert_eq!(
            body_of("s: string", "${s.length}${s.includes('a')}"),
            "{strLen($s)}{strContains($s, 'a')}"
        );
    }

    #[test]
    fn should_parenthesize_nested_negation() {
        assert_eq!(body_of("n: number", "${- -n}"), "{-(-$n)}");
    }

    #[test]
    fn should_report_untagged_template_strings() {
        let result = convert(
            "import { html } from 'lit';\n/** @soyCompatible */\nexport function f(n: number) {\n  return html`${`n = ${n}`}`;\n}",
        );
        assert_eq!(result.diagnostics.len(), 1);
        assert!(result.diagnostics[0]
            .message
            .starts_with("unsupported expression"));
        assert!(result.to_soy().is_err());
    }

    #[test]
    fn should_disallow_strict_equality_once() {
        let result = convert(
            "import { html } from 'lit';\n/** @soyCompatible */\nexport function f(a: string, b: string) {\n  return html`${a === b}`;\n}",
        );
        assert_eq!(result.diagnostics.len(), 1);
        assert!(result.diagnostics[0].message.contains("disallowed"));
        assert!(result.to_soy().is_err());
    }

    #[test]
    fn should_report_unknown_identifiers() {
        let result = convert(
            "import { html } from 'lit';\nconst other = 1;\n/** @soyCompatible */\nexport function f() {\n  return html`${other}${missing}`;\n}",
        );
        assert_eq!(
            messages(&result),
            vec!["unknown identifier `other`", "unknown identifier `missing`"]
        );
    }

    #[test]
    fn should_report_unsupported_expressions() {
        let result = convert(
            "import { html } from 'lit';\n/** @soyCompatible */\nexport function f(xs: number[]) {\n  return html`${xs[0]}`;\n}",
        );
        assert_eq!(messages(&result), vec!["unsupported expression: `xs[0]`"]);
    }
}

mod markup {
    use super::*;

    fn body_of(params: &str, markup: &str) -> String {
        let source = format!(
            "import {{ html }} from 'lit';\n/** @soyCompatible */\nexport function f({}) {{\n  return html`{}`;\n}}",
            params, markup
        );
        template_body(&soy(&source))
    }

    #[test]
    fn should_render_reflected_properties_as_attributes() {
        assert_eq!(
            body_of("x: string", "<input .value=${x}>"),
            r#"<input value="{$x}">"#
        );
        assert_eq!(
            body_of("", "<input .checked=${true}>"),
            "<input{if true} checked{/if}>"
        );
        assert_eq!(
            body_of("c: string", "<div .className=${c}></div>"),
            r#"<div class="{$c}"></div>"#
        );
    }

    #[test]
    fn should_drop_unreflected_properties() {
        assert_eq!(
            body_of("x: string", "<div .textContent=${x}>a</div>"),
            "<div>a</div>"
        );
    }

    #[test]
    fn should_interpolate_attribute_values() {
        assert_eq!(
            body_of("id: string", r#"<a href="/items/${id}" title=hi>x</a>"#),
            r#"<a href="/items/{$id}" title="hi">x</a>"#
        );
    }

    #[test]
    fn should_escape_double_quotes_in_attribute_values() {
        assert_eq!(
            body_of("", r#"<a title='say "hi"' alt="it's">x</a>"#),
            r#"<a title="say &quot;hi&quot;" alt="it's">x</a>"#
        );
    }

    #[test]
    fn should_require_a_single_expression_for_boolean_properties() {
        for markup in ["<input .checked=\"on${c}\">", "<input .checked=\"${c}${c}\">"] {
            let result = convert(&format!(
                "import {{ html }} from 'lit';\n/** @soyCompatible */\nexport function f(c: boolean) {{\n  return html`{}`;\n}}",
                markup
            ));
            assert_eq!(result.diagnostics.len(), 1, "{}", markup);
            assert!(result.diagnostics[0]
                .message
                .contains("boolean property bindings must be a single expression"));
            assert!(result.to_soy().is_err());
        }
    }

    #[test]
    fn should_reject_event_bindings_outside_components() {
        let result = convert(
            "import { html } from 'lit';\n/** @soyCompatible */\nexport function f() {\n  return html`<button @click=${this.go}>Go</button>`;\n}",
        );
        assert_eq!(result.diagnostics.len(), 1);
        assert!(result.diagnostics[0]
            .message
            .contains("only supported inside the render method"));
        assert!(result.to_soy().is_err());
    }

    #[test]
    fn should_escape_braces_in_text() {
        assert_eq!(body_of("", "<p>{}</p>"), "<p>{lb}{rb}</p>");
    }

    #[test]
    fn should_convert_conditionals_and_nested_templates() {
        assert_eq!(
            body_of("open: boolean", "${open ? html`<b>on</b>` : 'off'}"),
            "{if $open}<b>on</b>{else}{'off'}{/if}"
        );
    }

    #[test]
    fn should_convert_map_to_for_loops() {
        assert_eq!(
            body_of(
                "items: string[]",
                "<ul>${items.map((item) => html`<li>${item}</li>`)}</ul>"
            ),
            "<ul>{for $item in $items}<li>{$item}</li>{/for}</ul>"
        );
    }

    #[test]
    fn should_resolve_loop_variables_before_outer_parameters() {
        // The outer `item` is a list, the loop's a string.
        assert_eq!(
            body_of(
                "item: number[], items: string[]",
                "${item.length}${items.map((item) => html`${item.length}`)}${item.length}"
            ),
            "{length($item)}{for $item in $items}{strLen($item)}{/for}{length($item)}"
        );
    }

    #[test]
    fn should_report_expressions_outside_text_and_values() {
        let result = convert(
            "import { html } from 'lit';\n/** @soyCompatible */\nexport function f(a: string, b: string) {\n  return html`<div ${a}></div><!-- ${b} -->`;\n}",
        );
        assert_eq!(
            messages(&result),
            vec![
                "expressions are not supported in attribute names",
                "expressions inside comments are not supported"
            ]
        );
        assert!(result.to_soy().is_err());
    }

    #[test]
    fn should_report_boolean_attribute_bindings() {
        let result = convert(
            "import { html } from 'lit';\n/** @soyCompatible */\nexport function f(d: boolean) {\n  return html`<button ?disabled=${d}></button>`;\n}",
        );
        assert_eq!(result.diagnostics.len(), 1);
        assert!(result.diagnostics[0].message.contains("`?disabled`"));
    }

    #[test]
    fn should_call_known_components() {
        let options =
            ConverterOptions::default().with_known_component("x-icon", "ui.icons.Icon");
        let result = convert_with(
            &options,
            "import { html } from 'lit';\n/** @soyCompatible */\nexport function f(n: number) {\n  return html`<x-icon name=\"star\" .size=${n} data-x-id=\"1\">*</x-icon>`;\n}",
        );
        assert!(result.diagnostics.is_empty());
        let output = result.to_soy().unwrap();
        assert_eq!(
            template_body(&output),
            r#"{call ui.icons.Icon}{param name: 'star' /}{param size: $n /}{param dataXId: '1' /}{param children kind="html"}*{/param}{/call}"#
        );
    }
}

mod components {
    use super::*;

    const GREETING: &str = r#"import { LitElement, html } from 'lit';
import { customElement, property } from 'lit/decorators.js';

/** @soyCompatible */
@customElement('my-greeting')
export class MyGreeting extends LitElement {
  @property() name: string = 'World';

  render() {
    return html`<p>Hello ${this.name}</p>`;
  }
}"#;

    #[test]
    fn should_emit_wrapper_and_shadow_templates() {
        assert_eq!(
            soy(GREETING),
            "{namespace src.ui.widgets}\n\
             \n\
             {template .MyGreeting}\n  \
             {@param children: string}\n  \
             {@param name: string}\n  \
             <my-greeting>{$children}{call .MyGreeting_shadow}{param name: $name /}{/call}</my-greeting>\n\
             {/template}\n\
             \n\
             {template .MyGreeting_shadow}\n  \
             {@param name: string}\n  \
             <p>Hello {$name}</p>\n\
             {/template}\n"
        );
    }

    #[test]
    fn should_require_reactive_properties() {
        let result = convert(
            r#"import { LitElement, html } from 'lit';
/** @soyCompatible */
@customElement('my-counter')
export class MyCounter extends LitElement {
  count = 0;
  render() {
    return html`<p>${this.count}</p>`;
  }
}"#,
        );
        assert_eq!(result.diagnostics.len(), 1);
        assert!(result.diagnostics[0].message.contains("annotated"));
        assert!(result.to_soy().is_err());
    }

    #[test]
    fn should_collect_properties_along_the_class_chain() {
        let output = soy(
            r#"import { LitElement, html } from 'lit';
class Base extends LitElement {
  @property() label: string;
  @property() size: number;
}
/** @soyCompatible */
@customElement('x-fancy')
export class Fancy extends Base {
  @property() size: string;
  @property() active: boolean;
  render() {
    return html`<span>${this.label}${this.size}${this.active}</span>`;
  }
}"#,
        );
        assert!(output.contains(
            "{template .Fancy_shadow}\n  {@param size: string}\n  {@param active: bool}\n  {@param label: string}\n"
        ));
    }

    #[test]
    fn should_bind_events_to_methods() {
        let output = soy(
            r#"import { LitElement, html } from 'lit';
/** @soyCompatible */
@customElement('x-button')
export class XButton extends LitElement {
  render() {
    return html`<button @click=${this.onClick} @keydown=${this.onKey}>Go</button>`;
  }
  onClick() {}
  onKey() {}
}"#,
        );
        assert!(output.contains(r#"<button jsaction="click:onClick;keydown:onKey">Go</button>"#));
    }

    #[test]
    fn should_reject_other_event_handlers() {
        let result = convert(
            r#"import { LitElement, html } from 'lit';
/** @soyCompatible */
@customElement('x-button')
export class XButton extends LitElement {
  render() {
    return html`<button @click=${() => 1}>Go</button>`;
  }
}"#,
        );
        assert_eq!(result.diagnostics.len(), 1);
        assert!(result.diagnostics[0]
            .message
            .contains("must be instance method references"));
    }

    #[test]
    fn should_call_components_declared_in_the_file() {
        let output = soy(
            r#"import { LitElement, html } from 'lit';
/** @soyCompatible */
@customElement('x-card')
export class Card extends LitElement {
  @property() heading: string;
  render() {
    return html`<h3>${this.heading}</h3><slot></slot>`;
  }
}
/** @soyCompatible */
export function deck(title: string) {
  return html`<x-card .heading=${title}>body</x-card>`;
}"#,
        );
        assert!(output.contains(
            r#"{call .Card}{param heading: $title /}{param children kind="html"}body{/param}{/call}"#
        ));
    }

    #[test]
    fn should_report_missing_render() {
        let result = convert(
            r#"import { LitElement } from 'lit';
/** @soyCompatible */
@customElement('x-empty')
export class Empty extends LitElement {}"#,
        );
        assert_eq!(messages(&result), vec!["`Empty`: no render method found"]);
        let output = result.to_soy().unwrap();
        assert!(output.contains("{template .Empty}"));
        assert!(!output.contains("Empty_shadow}\n"));
    }

    #[test]
    fn should_require_a_tag_name() {
        let result = convert(
            r#"import { LitElement, html } from 'lit';
/** @soyCompatible */
export class NoTag extends LitElement {
  render() {
    return html``;
  }
}"#,
        );
        assert_eq!(result.diagnostics.len(), 1);
        assert!(result.diagnostics[0].message.contains("@customElement"));
        assert_eq!(result.to_soy().unwrap(), HEADER);
    }
}
