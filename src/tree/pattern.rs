//! Pattern tokenizer.
//!
//! Splits a route pattern into literal runs and parameter markers and
//! rejects malformed patterns before the tree is touched.

use crate::error::InsertError;

/// Marker that starts a named parameter.
pub(crate) const PARAM_MARKER: u8 = b':';
/// Marker that starts a catch-all parameter.
pub(crate) const CATCH_ALL_MARKER: u8 = b'*';

/// One token of a route pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'p> {
    /// Literal text, matched byte for byte
    Static(&'p str),
    /// `:name`, matches one path segment
    Param(&'p str),
    /// `*name`, matches the rest of the path
    CatchAll(&'p str),
}

impl<'p> Token<'p> {
    pub(crate) fn param_name(&self) -> Option<&'p str> {
        match *self {
            Token::Static(_) => None,
            Token::Param(name) | Token::CatchAll(name) => Some(name),
        }
    }
}

/// Tokenize and validate a pattern.
///
/// The first token is always a `Static` starting with `/`, and two `Static`
/// tokens are never adjacent.
pub(crate) fn tokenize(pattern: &str) -> Result<Vec<Token<'_>>, InsertError> {
    if !pattern.starts_with('/') {
        return Err(InsertError::EmptyPattern(pattern.to_string()));
    }

    let mut tokens = Vec::new();
    let mut rest = pattern;

    while !rest.is_empty() {
        let Some(marker) = rest.bytes().position(is_marker) else {
            tokens.push(Token::Static(rest));
            break;
        };

        if marker > 0 {
            tokens.push(Token::Static(&rest[..marker]));
        }

        let kind = rest.as_bytes()[marker];
        let after = &rest[marker + 1..];

        if kind == PARAM_MARKER {
            let end = after.find('/').unwrap_or(after.len());
            let name = &after[..end];
            check_name(pattern, name)?;
            tokens.push(Token::Param(name));
            rest = &after[end..];
        } else {
            if after.contains('/') {
                return Err(InsertError::CatchAllNotFinal(pattern.to_string()));
            }
            check_name(pattern, after)?;
            tokens.push(Token::CatchAll(after));
            rest = "";
        }
    }

    Ok(tokens)
}

/// Parameter names of a token list, in pattern order.
pub(crate) fn param_names<'t, 'p>(tokens: &'t [Token<'p>]) -> impl Iterator<Item = &'p str> + 't {
    tokens.iter().filter_map(Token::param_name)
}

#[inline]
const fn is_marker(b: u8) -> bool {
    (b == PARAM_MARKER) | (b == CATCH_ALL_MARKER)
}

fn check_name(pattern: &str, name: &str) -> Result<(), InsertError> {
    if name.is_empty() || name.bytes().any(is_marker) {
        return Err(InsertError::InvalidParameterName {
            pattern: pattern.to_string(),
            name: name.to_string(),
        });
    }
    Ok(())
}
