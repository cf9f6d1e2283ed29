//! A `nom`-based parser for dotted paths.
//!
//! Grammar: `segment ('.' segment)*` where a segment is one or more of
//! `[A-Za-z0-9_:-]`. A colon never splits a segment, so zone keys such as
//! `base-1:children` address a single map entry. Paths without a colon
//! tolerate stray dots (`content..0` reads as `content.0`); paths with one
//! must not contain empty segments.
use super::ast::{Path, PathSegment};
use crate::error::JPathError;
use std::borrow::Cow;
use nom::{
    IResult, Parser,
    bytes::complete::take_while1,
    character::complete::char,
    combinator::map,
    multi::separated_list1,
};

// --- Main Public Parser ---

pub fn parse_path(input: &str) -> Result<Path, JPathError> {
    let trimmed = input.trim();
    let source: Cow<'_, str> = if trimmed.contains(':') {
        Cow::Borrowed(trimmed)
    } else {
        Cow::Owned(
            trimmed
                .split('.')
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("."),
        )
    };

    match path(&source) {
        Ok(("", parsed)) => Ok(parsed),
        Ok((rem, _)) => Err(JPathError::JPathParse(
            input.to_string(),
            format!("Parser did not consume all input. Remainder: '{}'", rem),
        )),
        Err(e) => Err(JPathError::JPathParse(input.to_string(), e.to_string())),
    }
}

/// True for characters allowed inside a path segment.
pub fn is_segment_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == ':' || c == '-'
}

// --- Combinators ---

fn path(input: &str) -> IResult<&str, Path> {
    map(separated_list1(char('.'), segment), Path).parse(input)
}

fn segment(input: &str) -> IResult<&str, PathSegment> {
    map(take_while1(is_segment_char), to_segment).parse(input)
}

fn to_segment(raw: &str) -> PathSegment {
    let canonical_number = raw.bytes().all(|b| b.is_ascii_digit()) && (raw == "0" || !raw.starts_with('0'));
    if canonical_number && let Ok(index) = raw.parse::<usize>() {
        return PathSegment::Index(index);
    }
    PathSegment::Key(raw.to_string())
}
