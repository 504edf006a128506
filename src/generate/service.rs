use super::extract::extract_json_text;
use super::model::LanguageModel;
use super::prompt::prepare_json_generation_prompt;
use crate::error::AppError;

/// Asks the model for a JSON body matching `description`.
///
/// Returns the extracted JSON text, which is guaranteed to parse. When it
/// does not parse, the error carries the model's unprocessed output.
pub async fn generate_json(
    model: &dyn LanguageModel,
    description: Option<&str>,
) -> Result<String, AppError> {
    let description = match description {
        Some(d) if !d.is_empty() => d,
        _ => return Err(AppError::MissingDescription),
    };

    let prompt = prepare_json_generation_prompt(description);
    let output = model.complete(prompt).await?;

    let candidate = extract_json_text(&output);
    match serde_json::from_str::<serde_json::Value>(candidate) {
        Ok(_) => Ok(candidate.to_string()),
        Err(e) => {
            tracing::warn!("Model output is not valid JSON: {}", e);
            Err(AppError::InvalidGeneratedJson {
                raw_response: output,
            })
        }
    }
}
