//! Dependency constraint parsing: `"name"`, `"name op version"`, `"name version"`.

use crate::error::{ResolveError, ResolveResult};
use crate::version::Version;
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Compatible,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Op::Eq => "==",
            Op::Ne => "~=",
            Op::Lt => "<",
            Op::Le => "<=",
            Op::Gt => ">",
            Op::Ge => ">=",
            Op::Compatible => "~>",
        };
        write!(f, "{s}")
    }
}

/// `(name, op, version)`. `op = None` matches any version of `name`.
#[derive(Debug, Clone)]
pub struct Constraint {
    pub name: String,
    pub op: Option<Op>,
    pub version: Option<Version>,
}

impl Constraint {
    pub fn any(name: impl Into<String>) -> Constraint {
        Constraint {
            name: name.into(),
            op: None,
            version: None,
        }
    }

    pub fn parse(input: &str) -> ResolveResult<Constraint> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ResolveError::Parse(
                input.to_string(),
                "empty constraint".to_string(),
            ));
        }

        // Scan for the first whitespace or operator-introducing character
        // after the package name; the operator itself is matched below.
        let mut split_at = None;
        for (i, c) in trimmed.char_indices() {
            if c.is_whitespace() || c == '=' || c == '~' || c == '<' || c == '>' {
                split_at = Some(i);
                break;
            }
        }

        let Some(idx) = split_at else {
            return Ok(Constraint::any(trimmed));
        };

        let name = trimmed[..idx].trim().to_string();
        if name.is_empty() {
            return Err(ResolveError::Parse(
                input.to_string(),
                "missing package name".to_string(),
            ));
        }
        let rest = trimmed[idx..].trim_start();
        if rest.is_empty() {
            return Ok(Constraint::any(name));
        }

        const OPERATORS: &[(&str, Op)] = &[
            ("==", Op::Eq),
            ("~=", Op::Ne),
            ("<=", Op::Le),
            (">=", Op::Ge),
            ("~>", Op::Compatible),
            ("<", Op::Lt),
            (">", Op::Gt),
            ("=", Op::Eq),
        ];

        let (op, ver_str) = if let Some((tok, op)) = OPERATORS.iter().find(|(tok, _)| rest.starts_with(*tok)) {
            (*op, rest[tok.len()..].trim())
        } else {
            // Bare "name ver" implies ==.
            (Op::Eq, rest)
        };

        if ver_str.is_empty() {
            return Err(ResolveError::Parse(
                input.to_string(),
                "missing version after operator".to_string(),
            ));
        }

        let version = Version::parse(ver_str)?;
        Ok(Constraint {
            name,
            op: Some(op),
            version: Some(version),
        })
    }

    pub fn matches(&self, candidate: &Version) -> bool {
        let (Some(op), Some(bound)) = (self.op, &self.version) else {
            return true;
        };
        match op {
            Op::Eq => candidate == bound,
            Op::Ne => candidate != bound,
            Op::Lt => candidate.cmp(bound) == Ordering::Less,
            Op::Le => candidate.cmp(bound) != Ordering::Greater,
            Op::Gt => candidate.cmp(bound) == Ordering::Greater,
            Op::Ge => candidate.cmp(bound) != Ordering::Less,
            Op::Compatible => bound.compatible_with(candidate),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.op, &self.version) {
            (Some(op), Some(ver)) => write!(f, "{} {} {}", self.name, op, ver),
            _ => write!(f, "{}", self.name),
        }
    }
}
