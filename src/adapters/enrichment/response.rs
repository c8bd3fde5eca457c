use crate::domain::enrichment::{Enrichment, ItemSummary};
use anyhow::{Context, Result, bail};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct WireItem {
    name: String,
    #[serde(alias = "description", default)]
    summary: String,
}

#[derive(Debug, Deserialize)]
struct WireEnrichment {
    #[serde(alias = "struct_description", alias = "description", default)]
    summary: String,
    #[serde(default)]
    fields: Vec<WireItem>,
    #[serde(default)]
    methods: Vec<WireItem>,
}

/// Extract the JSON object from a free-form reply.
///
/// Code fences are stripped and only the text between the first `{` and the last
/// `}` is parsed, so chatter around the object is tolerated.
pub fn parse_response(raw: &str) -> Result<Enrichment> {
    let trimmed = strip_fences(raw.trim());
    let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) else {
        bail!("response contains no JSON object");
    };
    if end < start {
        bail!("response contains no JSON object");
    }

    let wire: WireEnrichment =
        serde_json::from_str(&trimmed[start..=end]).context("Failed to parse enrichment JSON")?;
    if wire.summary.trim().is_empty() && wire.fields.is_empty() && wire.methods.is_empty() {
        bail!("enrichment response is empty");
    }

    let convert = |items: Vec<WireItem>| -> Vec<ItemSummary> {
        items
            .into_iter()
            .map(|item| ItemSummary {
                name: item.name,
                summary: item.summary,
            })
            .collect()
    };
    Ok(Enrichment {
        summary: wire.summary,
        fields: convert(wire.fields),
        methods: convert(wire.methods),
    })
}

fn strip_fences(text: &str) -> &str {
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    text.strip_suffix("```").unwrap_or(text).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_json() {
        let e = parse_response(
            r#"{"summary": "Caches users", "fields": [{"name": "client", "summary": "redis"}]}"#,
        )
        .unwrap();
        assert_eq!(e.summary, "Caches users");
        assert_eq!(e.fields[0].name, "client");
        assert!(e.methods.is_empty());
    }

    #[test]
    fn test_fenced_with_chatter_and_legacy_keys() {
        let raw = "Here you go:\n```json\n{\"struct_description\": \"Service\", \"methods\": [{\"name\": \"Run\", \"description\": \"runs\"}]}\n```\nThanks";
        let e = parse_response(raw).unwrap();
        assert_eq!(e.summary, "Service");
        assert_eq!(e.methods[0].summary, "runs");
    }

    #[test]
    fn test_rejects_non_json_and_empty() {
        assert!(parse_response("no idea").is_err());
        assert!(parse_response("} backwards {").is_err());
        assert!(parse_response("{}").is_err());
        assert!(parse_response("{\"summary\": 3}").is_err());
    }
}
