use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to serialize value: {0}")]
    Json(#[from] serde_json::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Render a lookup result as JSON indented by two spaces.
///
/// Absence renders as `null`, the same text as a present null value.
pub fn render(value: Option<&Value>) -> RenderResult<String> {
    Ok(serde_json::to_string_pretty(value.unwrap_or(&Value::Null))?)
}

/// Single-line variant of [`render`]
pub fn render_compact(value: Option<&Value>) -> RenderResult<String> {
    Ok(serde_json::to_string(value.unwrap_or(&Value::Null))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_absence() {
        assert_eq!(render(None).unwrap(), "null");
        assert_eq!(render_compact(None).unwrap(), "null");
    }

    #[test]
    fn test_render_scalar() {
        assert_eq!(render(Some(&json!("t3.micro"))).unwrap(), "\"t3.micro\"");
    }

    #[test]
    fn test_render_indents_two_spaces() {
        let value = json!({"State": {"Code": 16}});
        assert_eq!(
            render(Some(&value)).unwrap(),
            "{\n  \"State\": {\n    \"Code\": 16\n  }\n}"
        );
        assert_eq!(
            render_compact(Some(&value)).unwrap(),
            "{\"State\":{\"Code\":16}}"
        );
    }
}
