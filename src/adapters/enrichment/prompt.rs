use crate::domain::enrichment::EnrichmentRequest;

/// Prompt asking the backend for a JSON description of one struct.
pub fn build_prompt(request: &EnrichmentRequest) -> String {
    let methods = if request.methods_source.trim().is_empty() {
        "(no methods)"
    } else {
        request.methods_source.as_str()
    };

    format!(
        r#"Describe the Go struct below for a developer reading an architecture map.

Struct: {name}
Package: {package}

Declaration:
```go
{declaration}
```

Methods:
```go
{methods}
```

Reply with a single JSON object and nothing else:
{{"summary": "<one or two sentences on the struct's responsibility>",
  "fields": [{{"name": "<field>", "summary": "<purpose>"}}],
  "methods": [{{"name": "<method>", "summary": "<what it does>"}}]}}
"#,
        name = request.name,
        package = request.package,
        declaration = request.declaration.trim(),
        methods = methods.trim(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_carries_sources() {
        let request = EnrichmentRequest {
            name: "Cache".to_string(),
            package: "cache".to_string(),
            declaration: "type Cache struct { client *RedisClient }".to_string(),
            methods_source: String::new(),
        };
        let prompt = build_prompt(&request);
        assert!(prompt.contains("Struct: Cache"));
        assert!(prompt.contains("Package: cache"));
        assert!(prompt.contains("client *RedisClient"));
        assert!(prompt.contains("(no methods)"));
        assert!(prompt.contains("\"summary\""));
    }
}
