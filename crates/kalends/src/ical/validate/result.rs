//! Validation findings.

use serde::{Deserialize, Serialize};

/// How bad a finding is.
///
/// `Warning` is advisory, `Error` breaks RFC conformance, `Critical` means
/// consumers are likely to misinterpret the data (not merely reject it).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Severity {
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        })
    }
}

/// A single validation finding, located by component and property name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    /// Component the finding applies to, e.g. `VEVENT`.
    pub component: String,
    /// Property the finding applies to, when property-scoped.
    pub property: Option<String>,
    pub message: String,
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.component)?;
        if let Some(property) = &self.property {
            write!(f, ".{property}")?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Accumulated findings for a tree. Validation never mutates the tree; the
/// result is the only output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    issues: Vec<Issue>,
}

impl ValidationResult {
    /// An empty (passing) result.
    #[must_use]
    pub const fn ok() -> Self {
        Self { issues: Vec::new() }
    }

    pub fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
        self.issues.sort();
    }

    /// Merges two results. Issues are kept sorted, which makes `combine`
    /// associative and commutative under equality.
    #[must_use]
    pub fn combine(mut self, other: Self) -> Self {
        self.issues.extend(other.issues);
        self.issues.sort();
        self
    }

    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// True when nothing at `Error` severity or above was found.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.issues.iter().all(|i| i.severity < Severity::Error)
    }

    #[must_use]
    pub fn has_critical(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Critical)
    }

    /// The most severe finding, if any.
    #[must_use]
    pub fn worst(&self) -> Option<Severity> {
        self.issues.iter().map(|i| i.severity).max()
    }
}

impl FromIterator<Issue> for ValidationResult {
    fn from_iter<T: IntoIterator<Item = Issue>>(iter: T) -> Self {
        let mut issues: Vec<Issue> = iter.into_iter().collect();
        issues.sort();
        Self { issues }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(severity: Severity, message: &str) -> Issue {
        Issue {
            severity,
            component: "VEVENT".into(),
            property: None,
            message: message.into(),
        }
    }

    fn result(issues: &[Issue]) -> ValidationResult {
        issues.iter().cloned().collect()
    }

    #[test]
    fn combine_is_associative_and_commutative() {
        let a = result(&[issue(Severity::Warning, "a")]);
        let b = result(&[issue(Severity::Error, "b")]);
        let c = result(&[issue(Severity::Critical, "c")]);

        assert_eq!(
            a.clone().combine(b.clone()).combine(c.clone()),
            a.clone().combine(b.clone().combine(c.clone()))
        );
        assert_eq!(a.clone().combine(b.clone()), b.combine(a));
    }

    #[test]
    fn combine_with_empty_is_identity() {
        let a = result(&[issue(Severity::Error, "a")]);
        assert_eq!(a.clone().combine(ValidationResult::ok()), a);
        assert_eq!(ValidationResult::ok().combine(a.clone()), a);
    }

    #[test]
    fn severity_thresholds() {
        let warnings = result(&[issue(Severity::Warning, "w")]);
        assert!(warnings.is_valid());
        assert!(!warnings.has_critical());
        assert_eq!(warnings.worst(), Some(Severity::Warning));

        let broken = warnings.combine(result(&[issue(Severity::Critical, "c")]));
        assert!(!broken.is_valid());
        assert!(broken.has_critical());
        assert_eq!(broken.worst(), Some(Severity::Critical));
    }
}
