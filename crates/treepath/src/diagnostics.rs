//! Rendering of compile errors as caret diagnostics.
//!
//! Compile errors carry spans into the query text; this module turns
//! them into annotated snippets for terminal display. Evaluation has no
//! errors to render.

use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};

use crate::Error;

/// Render a compile error against the query it was produced from.
///
/// Variants without a span (only [`Error::EmptyQuery`]) render as a bare
/// error line.
pub fn render_error(query: &str, error: &Error) -> String {
    let title = error.to_string();
    let Some(span) = error.span() else {
        return format!("error: {title}");
    };

    // The caret label skips the "malformed query at offset N" prefix the
    // title already shows.
    let label = match error {
        Error::MalformedQuery { message, .. } => message.as_str(),
        _ => title.as_str(),
    };

    let start: usize = span.start().into();
    let end: usize = span.end().into();
    // An end-of-input span is zero-width; anchor it on the last character
    // so the caret has something to sit under.
    let (start, end) = if start == end {
        let end = (start + 1).min(query.len());
        (end.saturating_sub(1), end)
    } else {
        (start, end)
    };

    let snippet = Snippet::source(query)
        .line_start(1)
        .annotation(AnnotationKind::Primary.span(start..end).label(label));

    let report = [Level::ERROR.primary_title(&title).element(snippet)];
    Renderer::plain().render(&report).to_string()
}
