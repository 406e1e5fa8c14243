//! String transformation utilities for TypeScript code generation

use once_cell::sync::Lazy;
use regex::Regex;

static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("valid identifier regex"));

static BLANK_LINES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[ \t]*(\n[ \t]*)+\n").expect("valid blank line regex"));

const RESERVED_WORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "enum", "export", "extends", "false", "finally", "for", "function", "if", "import",
    "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw", "true", "try",
    "typeof", "var", "void", "while", "with",
];

/// Type names the HTTP client section always declares
pub const RESERVED_TYPE_NAMES: &[&str] = &[
    "ApiConfig",
    "CancelToken",
    "ContentType",
    "FullRequestParams",
    "HttpClient",
    "HttpResponse",
    "QueryParamsType",
    "RequestParams",
    "ResponseFormat",
];

/// Convert a string to snake_case
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let mut prev_is_lowercase = false;

    for ch in s.chars() {
        if ch.is_uppercase() {
            if prev_is_lowercase {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
            prev_is_lowercase = false;
        } else if ch.is_alphanumeric() {
            result.push(ch);
            prev_is_lowercase = ch.is_lowercase() || ch.is_ascii_digit();
        } else if !result.is_empty() && !result.ends_with('_') {
            // any separator ('-', '.', '/', '{', ' ') starts a new word
            result.push('_');
            prev_is_lowercase = false;
        } else {
            prev_is_lowercase = false;
        }
    }

    result.trim_matches('_').to_string()
}

/// Convert a string to UpperCamelCase (PascalCase)
pub fn to_upper_camel_case(s: &str) -> String {
    to_snake_case(s)
        .split('_')
        .filter(|s| !s.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect()
}

/// Convert a string to lowerCamelCase
pub fn to_lower_camel_case(s: &str) -> String {
    let upper_camel = to_upper_camel_case(s);
    let mut chars = upper_camel.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

/// Turn a schema name into a TypeScript type name.
///
/// Unlike [`to_upper_camel_case`] this keeps the casing inside each chunk, so
/// `dash.AdminInfo` becomes `DashAdminInfo` rather than `DashAdmininfo`.
pub fn to_type_name(name: &str) -> String {
    let joined: String = name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| {
            let mut chars = chunk.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            }
        })
        .collect();

    match joined.chars().next() {
        None => "AnyType".to_string(),
        Some(first) if first.is_ascii_digit() => format!("Type{}", joined),
        Some(_) => joined,
    }
}

/// Whether `s` can be used as a bare TypeScript identifier
pub fn is_valid_identifier(s: &str) -> bool {
    IDENTIFIER_RE.is_match(s) && !RESERVED_WORDS.contains(&s)
}

/// Render a property key, quoting it when it is not a plain identifier
pub fn property_key(name: &str) -> String {
    if IDENTIFIER_RE.is_match(name) {
        name.to_string()
    } else {
        format!("\"{}\"", escape_ts_string(name))
    }
}

/// Escape a value for a double-quoted TypeScript string literal
pub fn escape_ts_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

/// Split free text into lines that are safe inside a `/** */` block
pub fn comment_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim_end().replace("*/", "*\\/"))
        .skip_while(|line| line.is_empty())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .skip_while(|line| line.is_empty())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect()
}

/// Collapse runs of blank lines into a single blank line
pub fn collapse_blank_lines(source: &str) -> String {
    let collapsed = BLANK_LINES_RE.replace_all(source, "\n\n");
    let mut result = collapsed.trim_start_matches('\n').trim_end().to_string();
    result.push('\n');
    result
}
