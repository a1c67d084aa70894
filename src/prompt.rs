use crate::pin::PinnedContext;

/// Builds the outgoing prompt from the optional pinned context and the raw
/// user input.
///
/// With a pin the output is the quoted pinned text, a comma, a space, then
/// the raw input: `"<pinned>", <input>`. Without one, the input passes
/// through unchanged. The quoting and comma-space separator are a
/// compatibility contract with the downstream model's expected prompt shape.
pub fn build_prompt(pinned: Option<&PinnedContext>, input: &str) -> String {
    match pinned {
        Some(pinned) => format!("\"{}\", {}", pinned.text, input),
        None => input.to_string(),
    }
}
