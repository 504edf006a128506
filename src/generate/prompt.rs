const DESCRIPTION_PLACEHOLDER: &str = "{{DESCRIPTION}}";

/// Instruction template sent to the model; `{{DESCRIPTION}}` is replaced
/// with the user's text.
pub const JSON_GENERATION_PROMPT: &str = "
  You are a helpful assistant that generates JSON request bodies for API calls.
  Based on the user's description, create a valid JSON object with appropriate fields and sample data.
  Make sure the JSON is valid and properly formatted.
  Only respond with the JSON object, nothing else.

  User's description: {{DESCRIPTION}}

  Generate a JSON request body:
  ";

pub fn prepare_json_generation_prompt(description: &str) -> String {
    JSON_GENERATION_PROMPT.replacen(DESCRIPTION_PLACEHOLDER, description, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_is_interpolated_once() {
        let prompt = prepare_json_generation_prompt("a user with name and age");
        assert!(prompt.contains("User's description: a user with name and age\n"));
        assert!(!prompt.contains(DESCRIPTION_PLACEHOLDER));
    }

    #[test]
    fn test_placeholder_in_description_is_left_alone() {
        let prompt = prepare_json_generation_prompt("literal {{DESCRIPTION}}");
        assert!(prompt.contains("User's description: literal {{DESCRIPTION}}"));
    }
}
