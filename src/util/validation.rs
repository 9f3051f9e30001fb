//! Human-readable rendering of `validator` errors.

use validator::ValidationErrors;

/// Join field errors into one message, preferring the custom messages.
pub fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{field} is invalid ({})", e.code),
            })
        })
        .collect();
    messages.sort();
    messages.dedup();
    messages.join("; ")
}
