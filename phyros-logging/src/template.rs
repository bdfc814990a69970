//! Message template rendering.
//!
//! Templates use brace-delimited placeholders that are bound to an entry's ordered arguments:
//!
//! - `{Name}` binds the next unused positional argument, in order of appearance.
//! - `{0}` binds the argument at that index.
//! - `{{` and `}}` render a literal brace.
//! - Anything after `:` or `,` inside a placeholder (format or alignment hints) is ignored.
//!
//! A placeholder without a matching argument is rendered verbatim, as is an unterminated `{`.
//! Rendering never fails: a malformed template degrades to its literal text.

use crate::Value;

/// Renders `template` with `arguments` bound to its placeholders.
///
/// # Examples
///
/// ```rust
/// use phyros_logging::{Value, template};
///
/// let rendered = template::render("User {Id} logged in from {Host}", &[
///     Value::from(42),
///     Value::from("gateway"),
/// ]);
/// assert_eq!(rendered, r#"User 42 logged in from "gateway""#);
/// ```
pub fn render(template: &str, arguments: &[Value]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut next_positional = 0;
    let mut rest = template;

    while let Some(index) = rest.find(['{', '}']) {
        output.push_str(&rest[..index]);
        let tail = &rest[index..];

        if let Some(after) = tail.strip_prefix("{{") {
            output.push('{');
            rest = after;
            continue;
        }
        if let Some(after) = tail.strip_prefix("}}").or_else(|| tail.strip_prefix('}')) {
            output.push('}');
            rest = after;
            continue;
        }

        let Some(end) = tail.find('}') else {
            rest = tail;
            break;
        };
        let token = &tail[..=end];
        let Some(name) = placeholder_name(&tail[1..end]) else {
            // Not a placeholder, emit the brace and keep scanning after it.
            output.push('{');
            rest = &tail[1..];
            continue;
        };

        let argument = match name.parse::<usize>() {
            Ok(position) => arguments.get(position),
            Err(_) => {
                let argument = arguments.get(next_positional);
                next_positional += 1;
                argument
            }
        };

        match argument {
            Some(value) => output.push_str(&value.to_string()),
            None => output.push_str(token),
        }
        rest = &tail[end + 1..];
    }

    output.push_str(rest);
    output
}

/// Extracts the placeholder name from the text between the braces, or `None` if it is not a valid
/// placeholder.
fn placeholder_name(contents: &str) -> Option<&str> {
    let name = contents.split([':', ',']).next().unwrap_or(contents);
    // `@` and `$` are capturing hints some backends understand.
    let name = name.trim_start_matches(['@', '$']);

    let valid = !name.is_empty()
        && name
            .chars()
            .all(|character| character.is_alphanumeric() || character == '_');

    valid.then_some(name)
}
