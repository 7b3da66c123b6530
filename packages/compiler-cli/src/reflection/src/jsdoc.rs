//! JSDoc helpers

use oxc_span::Span;

/// Whether the comment at `span` is a `/** ... */` block. Works whether or
/// not the span includes the comment delimiters.
pub fn is_jsdoc_comment(source: &str, span: Span) -> bool {
    let start = span.start as usize;
    let end = (span.end as usize).min(source.len());
    if start >= end {
        return false;
    }
    let text = &source[start..end];
    text.starts_with("/**") || (text.starts_with('*') && source[..start].ends_with("/*"))
}

/// Whether `comment` contains the block tag `@tag` as a whole word.
pub fn jsdoc_has_tag(comment: &str, tag: &str) -> bool {
    let needle = format!("@{}", tag);
    comment.match_indices(&needle).any(|(index, _)| {
        comment[index + needle.len()..]
            .chars()
            .next()
            .map_or(true, |ch| !(ch.is_alphanumeric() || ch == '_' || ch == '$'))
    })
}
