//! Version parsing and ordering.
//!
//! A version string has the shape `[v]N(.N|letters)*(-R)?`, where `R` is an
//! optional trailing revision, itself optionally carrying an opaque `_HEX`
//! binary-hash suffix (`REL-N_HEX`). Parsing splits on `.` and `-`, then
//! further splits each resulting segment at digit/letter transitions.

use crate::error::{ResolveError, ResolveResult};
use std::cmp::Ordering;
use std::fmt;

/// Negative weight for recognized pre-release tags; `work` sorts lowest.
fn tag_weight(word: &str) -> i32 {
    match word.to_ascii_lowercase().as_str() {
        "work" => -5,
        "alpha" => -4,
        "beta" => -3,
        "pre" => -2,
        "rc" => -1,
        _ => 0,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Numeric(u64),
    Tagged(String, i32),
}

impl Token {
    fn cmp_token(&self, other: &Token) -> Ordering {
        match (self, other) {
            (Token::Numeric(a), Token::Numeric(b)) => a.cmp(b),
            (Token::Numeric(_), Token::Tagged(_, _)) => Ordering::Greater,
            (Token::Tagged(_, _), Token::Numeric(_)) => Ordering::Less,
            (Token::Tagged(_, wa), Token::Tagged(tb, wb)) => {
                wa.cmp(wb).then_with(|| {
                    if let Token::Tagged(ta, _) = self {
                        ta.cmp(tb)
                    } else {
                        Ordering::Equal
                    }
                })
            }
        }
    }

    /// Ordering of a missing (absent) component against `other`: an absent
    /// trailing component behaves as a release marker, equal to numeric
    /// zero and greater than any tag.
    fn cmp_missing(other: &Token) -> Ordering {
        match other {
            Token::Numeric(n) => 0u64.cmp(n),
            Token::Tagged(_, _) => Ordering::Greater,
        }
    }
}

/// A parsed, totally-ordered version.
#[derive(Debug, Clone, Eq)]
pub struct Version {
    raw: String,
    components: Vec<Token>,
    revision: i64,
    binary_hash: Option<String>,
}

impl Version {
    pub fn parse(input: &str) -> ResolveResult<Version> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ResolveError::Parse(
                input.to_string(),
                "empty version string".to_string(),
            ));
        }
        let stripped = match trimmed.strip_prefix(['v', 'V']) {
            Some(rest) if rest.starts_with(|c: char| c.is_ascii_digit()) => rest,
            _ => trimmed,
        };

        let segments = split_segments(stripped);
        if segments.is_empty() {
            return Err(ResolveError::Parse(
                input.to_string(),
                "no parseable components".to_string(),
            ));
        }

        let (main_segments, revision, binary_hash) = extract_revision(&segments);

        let mut components = Vec::new();
        for (_, text) in &main_segments {
            if text.is_empty() {
                return Err(ResolveError::Parse(
                    input.to_string(),
                    "empty version component".to_string(),
                ));
            }
            for tok in tokenize_segment(text) {
                components.push(tok);
            }
        }

        if components.is_empty() {
            return Err(ResolveError::Parse(
                input.to_string(),
                "no parseable components".to_string(),
            ));
        }

        Ok(Version {
            raw: input.to_string(),
            components,
            revision,
            binary_hash,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn revision(&self) -> i64 {
        self.revision
    }

    /// The opaque `_HEX` binary-hash suffix, if this version string encoded one.
    pub fn binary_hash(&self) -> Option<&str> {
        self.binary_hash.as_deref()
    }

    pub fn is_binary(&self) -> bool {
        self.binary_hash.is_some()
    }

    /// "compatible with" match per `~>`: every component of `self` (the
    /// bound), after dropping trailing numeric-zero components (per the
    /// `1.0 == 1.0.0` equality invariant in §3), must be present and equal
    /// in `candidate`, and `candidate` must be >= `self`.
    pub fn compatible_with(&self, candidate: &Version) -> bool {
        let mut bound_len = self.components.len();
        while bound_len > 1 && self.components[bound_len - 1] == Token::Numeric(0) {
            bound_len -= 1;
        }
        if candidate.components.len() < bound_len {
            return false;
        }
        for i in 0..bound_len {
            if self.components[i] != candidate.components[i] {
                return false;
            }
        }
        candidate.cmp_ignoring_hash(self) != Ordering::Less
    }

    fn cmp_ignoring_hash(&self, other: &Version) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for i in 0..len {
            let ord = match (self.components.get(i), other.components.get(i)) {
                (Some(a), Some(b)) => a.cmp_token(b),
                (Some(a), None) => Token::cmp_missing(a).reverse(),
                (None, Some(b)) => Token::cmp_missing(b),
                (None, None) => Ordering::Equal,
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        self.revision.cmp(&other.revision)
    }
}

fn split_segments(s: &str) -> Vec<(Option<char>, String)> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut sep_before: Option<char> = None;
    for c in s.chars() {
        if c == '.' || c == '-' {
            segments.push((sep_before, std::mem::take(&mut current)));
            sep_before = Some(c);
            continue;
        }
        current.push(c);
    }
    segments.push((sep_before, current));
    segments
}

/// If the last segment was dash-separated and purely numeric (optionally
/// with a `_HEX` suffix), pull it out as the revision/binary-hash and
/// return the remaining segments.
fn extract_revision(
    segments: &[(Option<char>, String)],
) -> (Vec<(Option<char>, String)>, i64, Option<String>) {
    if segments.len() < 2 {
        return (segments.to_vec(), 0, None);
    }
    let last = segments.last().unwrap();
    if last.0 != Some('-') {
        return (segments.to_vec(), 0, None);
    }
    let text = &last.1;
    let (num_part, hash_part) = match text.split_once('_') {
        Some((n, h)) => (n, Some(h.to_string())),
        None => (text.as_str(), None),
    };
    if !num_part.chars().all(|c| c.is_ascii_digit()) || num_part.is_empty() {
        return (segments.to_vec(), 0, None);
    }
    let revision: i64 = num_part.parse().unwrap_or(0);
    let remaining = segments[..segments.len() - 1].to_vec();
    (remaining, revision, hash_part)
}

fn tokenize_segment(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut current_is_digit: Option<bool> = None;
    for c in text.chars() {
        let is_digit = c.is_ascii_digit();
        match current_is_digit {
            Some(prev) if prev != is_digit => {
                tokens.push(finish_token(&current));
                current.clear();
            }
            _ => {}
        }
        current.push(c);
        current_is_digit = Some(is_digit);
    }
    if !current.is_empty() {
        tokens.push(finish_token(&current));
    }
    tokens
}

fn finish_token(text: &str) -> Token {
    if text.chars().all(|c| c.is_ascii_digit()) {
        Token::Numeric(text.parse().unwrap_or(0))
    } else {
        let weight = tag_weight(text);
        Token::Tagged(text.to_ascii_lowercase(), weight)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp_ignoring_hash(other) == Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_ignoring_hash(other)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        for tok in &self.components {
            match tok {
                Token::Numeric(n) => parts.push(n.to_string()),
                Token::Tagged(t, _) => parts.push(t.clone()),
            }
        }
        write!(f, "{}-{}", parts.join("."), self.revision)?;
        if let Some(hash) = &self.binary_hash {
            write!(f, "_{}", hash)?;
        }
        Ok(())
    }
}
