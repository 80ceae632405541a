//! filter::pattern
//!
//! Compiled gitignore-style rule sets.
//!
//! Rules follow `.gitignore` syntax: blank lines and `#` comments are
//! skipped, `!` negates, a trailing `/` only matches directories, and a rule
//! matching a parent directory matches everything below it.

use std::fmt;

use ignore::gitignore::{Gitignore, GitignoreBuilder};

use super::FilterError;

/// Which changes a pattern set governs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternScope {
    /// Additions and modifications
    General,
    /// Deletions
    Destructive,
}

impl fmt::Display for PatternScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternScope::General => write!(f, "general"),
            PatternScope::Destructive => write!(f, "destructive"),
        }
    }
}

/// An immutable, compiled list of rules.
#[derive(Debug, Clone)]
pub struct PatternSet {
    scope: PatternScope,
    rules: Vec<String>,
    matcher: Gitignore,
}

impl PatternSet {
    /// A set that matches nothing.
    pub fn empty(scope: PatternScope) -> Self {
        Self {
            scope,
            rules: Vec::new(),
            matcher: Gitignore::empty(),
        }
    }

    /// Compile `lines` into a set.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::Pattern` for a rule that is not a valid glob.
    pub fn from_lines<'a>(
        scope: PatternScope,
        lines: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, FilterError> {
        let rules: Vec<String> = lines
            .into_iter()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();

        let mut builder = GitignoreBuilder::new("");
        for rule in &rules {
            builder
                .add_line(None, rule)
                .map_err(|e| FilterError::Pattern {
                    rule: rule.clone(),
                    message: e.to_string(),
                })?;
        }
        let matcher = builder.build().map_err(|e| FilterError::Pattern {
            rule: rules.join("\n"),
            message: e.to_string(),
        })?;

        Ok(Self {
            scope,
            rules,
            matcher,
        })
    }

    /// This set with `extra` rules appended.
    pub fn with_rules<'a>(
        self,
        extra: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, FilterError> {
        let PatternSet {
            scope, mut rules, ..
        } = self;
        rules.extend(extra.into_iter().map(str::to_string));
        PatternSet::from_lines(scope, rules.iter().map(String::as_str))
    }

    pub fn scope(&self) -> PatternScope {
        self.scope
    }

    /// The rules in order, without blank lines and comments.
    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether the rules select `path` (or one of its parent directories).
    ///
    /// Parent directories are checked first, outermost to innermost. A file
    /// below a selected directory stays selected even when a `!` rule names
    /// the file itself.
    pub fn matches(&self, path: &str) -> bool {
        let path = path.trim_start_matches('/');
        if self.is_empty() || path.is_empty() {
            return false;
        }

        let selected_parent = path
            .match_indices('/')
            .map(|(idx, _)| &path[..idx])
            .filter(|dir| !dir.is_empty())
            .any(|dir| self.matcher.matched(dir, true).is_ignore());
        selected_parent || self.matcher.matched(path, false).is_ignore()
    }
}
