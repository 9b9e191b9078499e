//! Lightweight docblock parsing for component and method documentation.
//!
//! Handles the common JSDoc tag patterns without a full grammar: summary
//! text, `@param` (with optional `{type}` hints and `[name]` optionality
//! brackets), `@return`/`@returns`, and `@public`.

/// Structured representation of a parsed method docblock.
#[derive(Debug, Default, Clone)]
pub struct ParsedDocblock {
    /// Summary text before any tags.
    pub summary: Option<String>,
    /// Parameter information derived from `@param` tags.
    pub params: Vec<DocParam>,
    /// Return information from `@return` / `@returns`.
    pub returns: Option<DocReturn>,
    /// Whether the comment contained `@public`.
    pub is_public: bool,
}

/// One `@param` tag.
#[derive(Debug, Default, Clone)]
pub struct DocParam {
    /// Parameter name, with `[]` optionality brackets stripped.
    pub name: String,
    /// Type hint from a `{type}` prefix.
    pub type_hint: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Whether the name was bracketed (`[name]`), marking it optional.
    pub optional: bool,
}

/// A `@returns` tag.
#[derive(Debug, Default, Clone)]
pub struct DocReturn {
    /// Type hint from a `{type}` prefix.
    pub type_hint: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
}

/// Strips comment decoration (`*` gutters, surrounding whitespace) from a
/// docblock body and returns the normalized text, tags included.
pub fn normalize_docblock(raw: &str) -> String {
    normalize_lines(raw).join("\n").trim().to_string()
}

/// Returns only the summary portion of a docblock: normalized text up to
/// the first tag line.
pub fn docblock_summary(raw: &str) -> Option<String> {
    let lines = normalize_lines(raw);
    let summary: Vec<String> = lines
        .into_iter()
        .take_while(|line| !line.starts_with('@'))
        .collect();
    let summary = summary.join("\n").trim().to_string();
    if summary.is_empty() { None } else { Some(summary) }
}

/// Parse a docblock body (without comment delimiters) into structured data.
pub fn parse_docblock(raw: &str) -> ParsedDocblock {
    let mut params = Vec::new();
    let mut returns = None;
    let mut is_public = false;
    let mut summary_lines = Vec::new();

    for line in normalize_lines(raw) {
        if let Some(rest) = line.strip_prefix('@') {
            let (tag, payload) = split_tag_payload(rest);
            match tag {
                "param" | "arg" | "argument" => {
                    if let Some(param) = parse_param(payload) {
                        params.push(param);
                    }
                }
                "returns" | "return" => {
                    let (type_hint, description) = parse_type_and_rest(payload);
                    if type_hint.is_some() || description.is_some() {
                        returns = Some(DocReturn {
                            type_hint,
                            description,
                        });
                    }
                }
                "public" => {
                    is_public = true;
                }
                _ => {}
            }
        } else {
            summary_lines.push(line);
        }
    }

    let summary = summary_lines
        .into_iter()
        .skip_while(|line| line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string();

    ParsedDocblock {
        summary: if summary.is_empty() { None } else { Some(summary) },
        params,
        returns,
        is_public,
    }
}

fn normalize_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|line| {
            let line = line.trim();
            let line = line.strip_prefix('*').unwrap_or(line);
            line.trim().to_string()
        })
        .collect()
}

fn split_tag_payload(input: &str) -> (&str, &str) {
    let mut parts = input.splitn(2, char::is_whitespace);
    let tag = parts.next().unwrap_or("");
    let payload = parts.next().unwrap_or("").trim();
    (tag, payload)
}

fn parse_param(payload: &str) -> Option<DocParam> {
    let (type_hint, rest) = parse_type_and_rest(payload);
    let rest = rest.unwrap_or_default();
    let mut parts = rest.splitn(2, char::is_whitespace);
    let raw_name = parts.next()?.trim();
    if raw_name.is_empty() {
        return None;
    }

    let optional = raw_name.starts_with('[') && raw_name.ends_with(']');
    let name = raw_name.trim_matches(|c| c == '[' || c == ']');
    // `[name=default]` keeps only the name portion.
    let name = name.split('=').next().unwrap_or(name).trim();

    let description = parts
        .next()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(|d| {
            // A leading dash separator is decoration, not content.
            d.strip_prefix("- ").unwrap_or(d).to_string()
        });

    Some(DocParam {
        name: name.to_string(),
        type_hint,
        description,
        optional,
    })
}

fn parse_type_and_rest(payload: &str) -> (Option<String>, Option<String>) {
    let trimmed = payload.trim();
    if let Some(stripped) = trimmed.strip_prefix('{') {
        if let Some((ty, rest)) = stripped.split_once('}') {
            let ty = ty.trim();
            let rest = rest.trim();
            let ty = (!ty.is_empty()).then(|| ty.to_string());
            let rest = (!rest.is_empty()).then(|| rest.to_string());
            return (ty, rest);
        }
    }
    (None, (!trimmed.is_empty()).then(|| trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_summary_and_params() {
        let parsed = parse_docblock(
            "\n * Scrolls the list to a row.\n *\n * @param {number} index - target row\n * @param [smooth] whether to animate\n * @returns {boolean} true when the row exists\n",
        );
        assert_eq!(parsed.summary.as_deref(), Some("Scrolls the list to a row."));
        assert_eq!(parsed.params.len(), 2);
        assert_eq!(parsed.params[0].name, "index");
        assert_eq!(parsed.params[0].type_hint.as_deref(), Some("number"));
        assert_eq!(parsed.params[0].description.as_deref(), Some("target row"));
        assert!(parsed.params[1].optional);
        let returns = parsed.returns.expect("returns tag");
        assert_eq!(returns.type_hint.as_deref(), Some("boolean"));
        assert_eq!(returns.description.as_deref(), Some("true when the row exists"));
    }

    #[test]
    fn summary_stops_at_first_tag() {
        let summary = docblock_summary(" * A button.\n * @deprecated use Link\n");
        assert_eq!(summary.as_deref(), Some("A button."));
    }

    #[test]
    fn normalize_strips_gutters() {
        let text = normalize_docblock(" *\n * Line one.\n * Line two.\n ");
        assert_eq!(text, "Line one.\nLine two.");
    }
}
