use std::fmt;

use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// What is wrong with a single field of a provider response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueKind {
    Missing,
    WrongType { expected: String },
    Empty,
    MalformedJson { message: String },
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::Missing => f.write_str("is missing"),
            IssueKind::WrongType { expected } => write!(f, "must be {expected}"),
            IssueKind::Empty => f.write_str("must not be empty"),
            IssueKind::MalformedJson { message } => write!(f, "is not valid JSON ({message})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldIssue {
    /// Dotted path into the payload, e.g. `tuesday.lunch.recipe`; `$` is the document root.
    pub path: String,
    #[serde(flatten)]
    pub kind: IssueKind,
}

impl FieldIssue {
    pub fn new(path: impl Into<String>, kind: IssueKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.path, self.kind)
    }
}

/// Every problem found while validating a provider response against the week plan shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema, Error)]
#[error("{} issue(s): {}", .issues.len(), describe(.issues))]
pub struct PlanValidationError {
    issues: Vec<FieldIssue>,
}

fn describe(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl PlanValidationError {
    pub fn new(issues: Vec<FieldIssue>) -> Self {
        Self { issues }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(vec![FieldIssue::new(
            "$",
            IssueKind::MalformedJson {
                message: message.into(),
            },
        )])
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<FieldIssue> {
        self.issues
    }

    pub fn mentions(&self, path: &str) -> bool {
        self.issues.iter().any(|issue| issue.path == path)
    }

    pub fn missing_paths(&self) -> impl Iterator<Item = &str> {
        self.issues
            .iter()
            .filter(|issue| issue.kind == IssueKind::Missing)
            .map(|issue| issue.path.as_str())
    }
}
