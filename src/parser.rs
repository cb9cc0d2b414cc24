use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::error::{Result, RouterError};
use crate::types::{Method, RouteRule};

/// Regex pattern for parsing route table lines
/// Format: METHOD PATTERN TARGET
static ROUTE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\*|[A-Za-z]+)\s+(\S+)\s+([\w.\-]+)$")
        .expect("ROUTE_PATTERN: hardcoded regex is invalid")
});

/// Maximum nesting depth for `file:` include directives.
const MAX_INCLUDE_DEPTH: usize = 10;

/// Parse a route table from text.
///
/// One route per line, `#` starts a comment. Supports
/// `file: /path/to/table.routes` to include routes from another file.
/// Relative include paths are taken from the current directory.
pub fn parse_routes(text: &str) -> Result<Vec<RouteRule>> {
    parse_table(text, None, 0)
}

/// Parse a route table from a file.
///
/// Relative `file:` includes inside it resolve against the directory of the
/// including file.
pub fn parse_routes_from_file(path: impl AsRef<Path>) -> Result<Vec<RouteRule>> {
    read_table(path.as_ref(), 0)
}

fn read_table(path: &Path, depth: usize) -> Result<Vec<RouteRule>> {
    if depth > MAX_INCLUDE_DEPTH {
        return Err(RouterError::ParseError(format!(
            "file include depth exceeds maximum ({MAX_INCLUDE_DEPTH}) at '{}', possible circular include",
            path.display()
        )));
    }

    let text = fs::read_to_string(path).map_err(|e| {
        RouterError::ParseError(format!(
            "Failed to read route table '{}': {}",
            path.display(),
            e
        ))
    })?;

    parse_table(&text, path.parent(), depth)
}

fn parse_table(text: &str, base: Option<&Path>, depth: usize) -> Result<Vec<RouteRule>> {
    let mut rules = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.split_once('#').map_or(raw, |(code, _)| code).trim();
        if line.is_empty() {
            continue;
        }

        if let Some(include) = line.strip_prefix("file:") {
            let include = Path::new(include.trim());
            let resolved: PathBuf = match base {
                Some(dir) if include.is_relative() => dir.join(include),
                _ => include.to_path_buf(),
            };
            trace!(path = %resolved.display(), depth = depth + 1, "including route table");
            rules.extend(read_table(&resolved, depth + 1)?);
            continue;
        }

        rules.push(parse_single_route(line, idx + 1)?);
    }

    Ok(rules)
}

/// Parse a single route line
fn parse_single_route(line: &str, line_num: usize) -> Result<RouteRule> {
    let captures = ROUTE_PATTERN
        .captures(line)
        .ok_or_else(|| RouterError::ParseErrorAtLine {
            line: line_num,
            message: format!("Invalid route format: {}", line),
        })?;

    let method: Method = captures[1]
        .parse()
        .map_err(|e: RouterError| RouterError::ParseErrorAtLine {
            line: line_num,
            message: e.to_string(),
        })?;

    Ok(RouteRule {
        method,
        pattern: captures[2].to_string(),
        target: captures[3].to_string(),
        line_num,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_pattern_regex_compiles() {
        assert!(ROUTE_PATTERN.is_match("GET / index"));
    }

    #[test]
    fn test_parse_simple_route() {
        let rules = parse_routes("GET /user/:id show_user").unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].method, Method::Get);
        assert_eq!(rules[0].pattern, "/user/:id");
        assert_eq!(rules[0].target, "show_user");
        assert_eq!(rules[0].line_num, 1);
    }

    #[test]
    fn test_parse_any_method() {
        let rules = parse_routes("*   /static/*path   assets\nANY /health health").unwrap();
        assert_eq!(rules[0].method, Method::Any);
        assert_eq!(rules[0].pattern, "/static/*path");
        assert_eq!(rules[1].method, Method::Any);
    }

    #[test]
    fn test_parse_multiple_routes() {
        let text = r#"
# Users
GET    /user            list_users
POST   /user            create_user
GET    /user/:id        show_user   # single user

# Files
get    /files/*rest     files
"#;
        let rules = parse_routes(text).unwrap();
        assert_eq!(rules.len(), 4);
        assert_eq!(rules[2].target, "show_user");
        assert_eq!(rules[2].line_num, 5);
        assert_eq!(rules[3].method, Method::Get);
    }

    #[test]
    fn test_parse_invalid_route() {
        assert!(parse_routes("GET /missing-target").is_err());
        assert!(parse_routes("just some words here").is_err());
    }

    #[test]
    fn test_parse_invalid_method_reports_line() {
        let err = parse_routes("GET / index\nFETCH /x x").unwrap_err();
        match err {
            RouterError::ParseErrorAtLine { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("FETCH"), "got: {}", message);
            }
            other => panic!("expected ParseErrorAtLine, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_hyphenated_and_dotted_targets() {
        let rules = parse_routes("GET /a my-handler\nGET /b users.show").unwrap();
        assert_eq!(rules[0].target, "my-handler");
        assert_eq!(rules[1].target, "users.show");
    }

    /// Fresh scratch directory under the system temp dir
    fn scratch(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_parse_file_directive() {
        let dir = scratch("path_tree_parser_include");
        let users = dir.join("users.routes");
        fs::write(&users, "GET /user/:id show_user\nPOST /user create_user\n").unwrap();

        let text = format!("GET / index\nfile: {}\nGET /about about", users.display());
        let patterns: Vec<String> = parse_routes(&text)
            .unwrap()
            .into_iter()
            .map(|rule| rule.pattern)
            .collect();
        assert_eq!(patterns, vec!["/", "/user/:id", "/user", "/about"]);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_relative_include_resolves_next_to_parent() {
        let dir = scratch("path_tree_parser_relative");
        fs::create_dir_all(dir.join("api")).unwrap();
        fs::write(dir.join("api/v1.routes"), "GET /v1/ping ping\n").unwrap();
        fs::write(dir.join("site.routes"), "GET / index\nfile: api/v1.routes\n").unwrap();

        let rules = parse_routes_from_file(dir.join("site.routes")).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[1].pattern, "/v1/ping");
        // line numbers are relative to the file a rule came from
        assert_eq!(rules[1].line_num, 1);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_parse_file_directive_not_found() {
        let err = parse_routes("file: /nonexistent/path/table.routes").unwrap_err();
        assert!(matches!(err, RouterError::ParseError(ref msg) if msg.contains("table.routes")));
    }

    #[test]
    fn test_parse_file_circular_include() {
        let dir = scratch("path_tree_parser_circular");
        fs::write(dir.join("a.routes"), "GET /a a\nfile: b.routes\n").unwrap();
        fs::write(dir.join("b.routes"), "GET /b b\nfile: a.routes\n").unwrap();

        let err = parse_routes_from_file(dir.join("a.routes")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("circular include"), "got: {}", msg);

        let _ = fs::remove_dir_all(&dir);
    }
}
