//! Isolating the JSON payload from free-form model output.

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Picks the candidate JSON text out of a model reply.
///
/// A "```json" fence wins over a bare fence; in both cases only the first
/// fenced block is used and it is trimmed. Output without fences is
/// returned untouched.
pub fn extract_json_text(output: &str) -> &str {
    if let Some((_, rest)) = output.split_once(JSON_FENCE) {
        return first_segment(rest).trim();
    }

    if let Some((_, rest)) = output.split_once(FENCE) {
        return first_segment(rest).trim();
    }

    output
}

fn first_segment(text: &str) -> &str {
    text.split_once(FENCE).map_or(text, |(inner, _)| inner)
}
