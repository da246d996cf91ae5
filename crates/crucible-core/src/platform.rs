//! Platform filtering (§4.4): test a candidate's platform spec against the
//! runtime platform tag set.

use std::collections::BTreeSet;

/// A package's declared platform support.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PlatformSpec {
    /// No restriction; matches any platform.
    #[default]
    Any,
    /// Mixed positive/negated tags. An empty `Tags` is equivalent to `Any`.
    Tags {
        positive: BTreeSet<String>,
        negated: BTreeSet<String>,
    },
}

impl PlatformSpec {
    pub fn from_tags<I, S>(tags: I) -> PlatformSpec
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut positive = BTreeSet::new();
        let mut negated = BTreeSet::new();
        for tag in tags {
            let tag = tag.as_ref();
            if let Some(rest) = tag.strip_prefix('!') {
                negated.insert(rest.to_string());
            } else {
                positive.insert(tag.to_string());
            }
        }
        if positive.is_empty() && negated.is_empty() {
            PlatformSpec::Any
        } else {
            PlatformSpec::Tags { positive, negated }
        }
    }

    /// §4.4: (1) any → accept; (2) a matching negated tag → reject; (3) any
    /// positive tag present → accept iff one is in `required_tags`, else
    /// (negated-only) accept.
    pub fn matches(&self, required_tags: &BTreeSet<String>) -> bool {
        match self {
            PlatformSpec::Any => true,
            PlatformSpec::Tags { positive, negated } => {
                if negated.iter().any(|tag| required_tags.contains(tag)) {
                    return false;
                }
                if positive.is_empty() {
                    true
                } else {
                    positive.iter().any(|tag| required_tags.contains(tag))
                }
            }
        }
    }
}

pub fn default_platform_tags() -> BTreeSet<String> {
    ["unix", "linux"].iter().map(|s| s.to_string()).collect()
}
