//! Attribute-order validation.
//!
//! Checks every attribute-mapping task in a Taskfile against the canonical
//! attribute order, plus the independent file-extension check. Problems are
//! collected as [`Finding`]s in document order; nothing here prints or
//! aborts.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{AttributeOrder, LintConfig};
use crate::taskfile::{TaskShape, Taskfile};

/// What is wrong with a Taskfile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindingKind {
    /// The file does not use the required extension.
    BadExtension {
        /// Required extension, without the leading dot.
        required: String,
    },
    /// A task's attributes are not in canonical order.
    MisorderedAttributes {
        /// Task name.
        task: String,
        /// Attributes sorted by canonical rank.
        expected: Vec<String>,
        /// Attributes as written.
        actual: Vec<String>,
    },
    /// A task uses attributes that are not in the canonical order.
    UnknownAttributes {
        /// Task name.
        task: String,
        /// Unlisted attribute names, in document order.
        names: Vec<String>,
    },
    /// A task is neither a command list nor an attribute mapping.
    UnrecognizedTask {
        /// Task name.
        task: String,
        /// YAML kind of the task's value.
        found: &'static str,
    },
    /// The `tasks` key is present but is not a mapping.
    MalformedTasks {
        /// YAML kind of the `tasks` value.
        found: &'static str,
    },
}

/// A single reportable problem in a Taskfile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// File the problem was found in.
    pub path: PathBuf,
    /// The problem itself.
    pub kind: FindingKind,
}

impl Finding {
    /// Returns `true` if this finding fails the run.
    ///
    /// Entries the linter cannot interpret are reported but left for the
    /// task runner to reject.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        !matches!(
            self.kind,
            FindingKind::UnrecognizedTask { .. } | FindingKind::MalformedTasks { .. }
        )
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.display();
        match &self.kind {
            FindingKind::BadExtension { required } => {
                write!(f, "{path}: Taskfile must use the '.{required}' extension.")
            }
            FindingKind::MisorderedAttributes { task, expected, actual } => {
                writeln!(f, "{path}: Task '{task}' has unsorted attributes.")?;
                writeln!(f, "    Expected order: {expected:?}")?;
                write!(f, "    Actual order  : {actual:?}")
            }
            FindingKind::UnknownAttributes { task, names } => {
                write!(f, "{path}: Task '{task}' has unknown attributes: {names:?}")
            }
            FindingKind::UnrecognizedTask { task, found } => {
                let shape = "neither a dictionary nor a list";
                write!(f, "{path}: Task '{task}' is {shape} (found {found}).")
            }
            FindingKind::MalformedTasks { found } => {
                write!(f, "{path}: 'tasks' is a {found}, not a mapping.")
            }
        }
    }
}

/// Outcome of checking one task's attribute names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOrder {
    /// Listed attributes in document order.
    pub actual: Vec<String>,
    /// Listed attributes stably sorted by canonical rank.
    pub expected: Vec<String>,
    /// Attributes absent from the canonical order, in document order.
    pub unknown: Vec<String>,
}

impl TaskOrder {
    /// Returns `true` if the listed attributes already follow canonical order.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.actual.iter().zip(&self.expected).all(|(a, e)| a == e)
    }
}

/// Compares `attributes` against `order`.
///
/// Unknown attributes are set aside and the remaining ones are compared
/// pairwise with their rank-sorted counterpart.
#[must_use]
pub fn check_task_order(order: &AttributeOrder, attributes: &[String]) -> TaskOrder {
    let (actual, unknown): (Vec<String>, Vec<String>) =
        attributes.iter().cloned().partition(|name| order.contains(name));

    let mut expected = actual.clone();
    expected.sort_by_key(|name| order.rank(name));

    TaskOrder { actual, expected, unknown }
}

/// Aggregated result of validating a Taskfile.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Everything reported, in document order.
    pub findings: Vec<Finding>,
    /// Number of attribute-mapping tasks that were checked.
    pub tasks_checked: usize,
}

impl ValidationReport {
    /// Returns `true` if no finding fails the run.
    #[must_use]
    pub fn passed(&self) -> bool {
        !self.findings.iter().any(Finding::is_failure)
    }

    /// Number of entries that could not be interpreted and were skipped.
    #[must_use]
    pub fn anomalies(&self) -> usize {
        self.findings.iter().filter(|f| !f.is_failure()).count()
    }
}

/// Validates the attribute order of every task in `taskfile`.
///
/// Shorthand tasks are skipped. Entries that are neither a list nor a
/// mapping are recorded as non-failing findings.
#[must_use]
pub fn validate_taskfile(config: &LintConfig, taskfile: &Taskfile) -> ValidationReport {
    let finding = |kind: FindingKind| Finding { path: taskfile.path().to_path_buf(), kind };
    let mut report = ValidationReport::default();

    let tasks = match taskfile.tasks() {
        Ok(tasks) => tasks,
        Err(found) => {
            report.findings.push(finding(FindingKind::MalformedTasks { found }));
            return report;
        }
    };

    for (task, shape) in tasks {
        match shape {
            TaskShape::Shorthand => debug!(task = %task, "skipping shorthand task"),
            TaskShape::Attributes(attributes) => {
                report.tasks_checked += 1;
                let order = check_task_order(&config.order, &attributes);
                debug!(task = %task, ordered = order.is_ordered(), "checked task");
                if !order.unknown.is_empty() {
                    report.findings.push(finding(FindingKind::UnknownAttributes {
                        task: task.clone(),
                        names: order.unknown.clone(),
                    }));
                }
                if !order.is_ordered() {
                    report.findings.push(finding(FindingKind::MisorderedAttributes {
                        task,
                        expected: order.expected,
                        actual: order.actual,
                    }));
                }
            }
            TaskShape::Other(found) => {
                report.findings.push(finding(FindingKind::UnrecognizedTask { task, found }));
            }
        }
    }

    report
}

/// Checks that `path` carries the configured extension.
#[must_use]
pub fn check_extension(config: &LintConfig, path: &Path) -> Option<Finding> {
    let matches = path.extension().is_some_and(|ext| ext == config.required_extension.as_str());
    (!matches).then(|| Finding {
        path: path.to_path_buf(),
        kind: FindingKind::BadExtension { required: config.required_extension.clone() },
    })
}
