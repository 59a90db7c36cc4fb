use std::collections::HashSet;

/// Token that requests skipping every non-required check.
pub const SKIP_ALL: &str = "all";

/// User request to skip checks by name, e.g. from `SKIP_CHECKS`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipDirective {
    names: HashSet<String>,
}

impl SkipDirective {
    pub fn none() -> Self {
        Self::default()
    }

    /// Parse a list separated by commas, colons or whitespace.
    pub fn parse(raw: &str) -> Self {
        Self::from_values([raw])
    }

    /// Build from several raw values, each of which may itself be a list.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = values
            .into_iter()
            .flat_map(|v| {
                v.as_ref()
                    .split(|c: char| c == ',' || c == ':' || c.is_whitespace())
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();
        Self { names }
    }

    pub fn requests(&self, name: &str) -> bool {
        self.names.contains(SKIP_ALL) || self.names.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
