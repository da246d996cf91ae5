//! Human-facing formatting for resolver errors, mirroring the teacher's
//! `error_help::format_error_with_help`. Never touches the substrings the
//! core crate's errors are tested against.

use crucible_core::ResolveError;

pub fn format_error_with_help(err: &ResolveError) -> String {
    let help = match err {
        ResolveError::Circular(_) => {
            "help: break the cycle by relaxing one of the constraints in the chain above"
        }
        ResolveError::NoCandidate(_) => {
            "help: check that the manifest lists a candidate matching this constraint and platform"
        }
        ResolveError::InstalledMismatch { .. } => {
            "help: upgrade or remove the installed package, or relax the requested constraint"
        }
        ResolveError::Conflict { .. } => {
            "help: two requirements on the same package disagree; relax one of them"
        }
        ResolveError::Parse(_, _) => {
            "help: expected \"name\", \"name op version\", or \"name version\""
        }
    };
    format!("error: {err}\n{help}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_includes_error_and_help() {
        let err = ResolveError::NoCandidate("a".to_string());
        let formatted = format_error_with_help(&err);
        assert!(formatted.contains("No suitable candidate"));
        assert!(formatted.contains("help:"));
    }
}
