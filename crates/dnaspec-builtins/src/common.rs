//! Helpers shared by the template handlers

use dnaspec_types::{Context, DnaspecError, Result};
use serde_json::Value;

/// Trimmed request, or an execution error when there is nothing to work on
pub(crate) fn require_request<'m>(skill: &str, message: &'m str) -> Result<&'m str> {
    let request = message.trim();
    if request.is_empty() {
        return Err(DnaspecError::execution(skill, "request is empty"));
    }
    Ok(request)
}

/// Non-blank string value of a context key
pub(crate) fn context_str<'c>(context: &'c Context, key: &str) -> Option<&'c str> {
    context
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// List value of a context key: a JSON array of strings or a comma-separated string
pub(crate) fn context_list(context: &Context, key: &str) -> Vec<String> {
    let items: Vec<String> = match context.get(key) {
        Some(Value::Array(values)) => values
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Some(Value::String(s)) => s.split([',', '，']).map(str::to_string).collect(),
        _ => Vec::new(),
    };

    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Whether the lowercased text contains any of the keywords
pub(crate) fn mentions_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

/// Markdown bullet list
pub(crate) fn bullets<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| format!("- {}\n", item.as_ref()))
        .collect()
}
