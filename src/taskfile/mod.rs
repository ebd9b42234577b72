//! Taskfile loading and task enumeration.
//!
//! A Taskfile is YAML whose top-level `tasks` mapping holds one entry per
//! task. Each entry is either a shorthand list of commands or a mapping of
//! attributes. Mapping order is preserved, so attribute names come back in
//! the order they were written.

use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::error::LintError;
use crate::ports::FileSystem;

/// Top-level key that holds the task definitions.
pub const TASKS_KEY: &str = "tasks";

const MERGE_KEY: &str = "<<";

/// A parsed Taskfile.
#[derive(Debug, Clone)]
pub struct Taskfile {
    path: PathBuf,
    root: Mapping,
}

/// The shape of a single task entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskShape {
    /// A bare list of commands; carries no attribute order.
    Shorthand,
    /// A mapping of attributes; names in document order.
    Attributes(Vec<String>),
    /// Anything else, described by its YAML kind (e.g. `"string"`).
    Other(&'static str),
}

impl Taskfile {
    /// Reads and parses the Taskfile at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LintError::Read`] if the file cannot be read, otherwise
    /// whatever [`Taskfile::parse`] returns.
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self, LintError> {
        let contents = fs
            .read_to_string(path)
            .map_err(|source| LintError::Read { path: path.to_path_buf(), source })?;
        Self::parse(path, &contents)
    }

    /// Parses Taskfile `contents` that were read from `path`.
    ///
    /// Merge keys (`<<`) are expanded with the merged entries placed ahead of
    /// the mapping's own keys; an own key that is also merged keeps the merged
    /// position and the own value. An empty document is treated as a mapping
    /// with no keys.
    ///
    /// # Errors
    ///
    /// Returns [`LintError::Parse`] if the contents are not valid YAML,
    /// [`LintError::Merge`] if a merge key does not refer to mappings, and
    /// [`LintError::NotAMapping`] if the top level is not a mapping.
    pub fn parse(path: &Path, contents: &str) -> Result<Self, LintError> {
        let value: Value = serde_yaml::from_str(contents)
            .map_err(|source| LintError::Parse { path: path.to_path_buf(), source })?;
        let value = resolve_merges(value)
            .map_err(|reason| LintError::Merge { path: path.to_path_buf(), reason })?;

        let root = match value {
            Value::Mapping(root) => root,
            Value::Null => Mapping::new(),
            _ => return Err(LintError::NotAMapping { path: path.to_path_buf() }),
        };
        Ok(Self { path: path.to_path_buf(), root })
    }

    /// Path the Taskfile was loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Task names and shapes in document order.
    ///
    /// A missing or null `tasks` key yields no tasks.
    ///
    /// # Errors
    ///
    /// Returns the YAML kind of the `tasks` value when it is not a mapping.
    pub fn tasks(&self) -> Result<Vec<(String, TaskShape)>, &'static str> {
        match self.root.get(TASKS_KEY) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Mapping(tasks)) => {
                Ok(tasks.iter().map(|(name, value)| (key_text(name), shape_of(value))).collect())
            }
            Some(other) => Err(kind_of(other)),
        }
    }
}

fn resolve_merges(value: Value) -> Result<Value, String> {
    match value {
        Value::Mapping(mapping) => resolve_mapping(mapping).map(Value::Mapping),
        Value::Sequence(items) => {
            items.into_iter().map(resolve_merges).collect::<Result<_, _>>().map(Value::Sequence)
        }
        Value::Tagged(mut tagged) => {
            tagged.value = resolve_merges(tagged.value)?;
            Ok(Value::Tagged(tagged))
        }
        other => Ok(other),
    }
}

fn resolve_mapping(mapping: Mapping) -> Result<Mapping, String> {
    let mut merged = Mapping::new();
    let mut own = Vec::with_capacity(mapping.len());

    for (key, value) in mapping {
        let value = resolve_merges(value)?;
        if key.as_str() != Some(MERGE_KEY) {
            own.push((key, value));
            continue;
        }
        match value {
            Value::Mapping(source) => merged.extend(source),
            // Earlier sources win, so apply them last.
            Value::Sequence(sources) => {
                for source in sources.into_iter().rev() {
                    match source {
                        Value::Mapping(source) => merged.extend(source),
                        other => {
                            return Err(format!("expected a mapping, found {}", kind_of(&other)));
                        }
                    }
                }
            }
            other => {
                let kind = kind_of(&other);
                return Err(format!("expected a mapping or list of mappings, found {kind}"));
            }
        }
    }

    // Inserting an existing key replaces its value in place.
    merged.extend(own);
    Ok(merged)
}

fn shape_of(value: &Value) -> TaskShape {
    match value {
        Value::Sequence(_) => TaskShape::Shorthand,
        Value::Mapping(attributes) => {
            TaskShape::Attributes(attributes.iter().map(|(name, _)| key_text(name)).collect())
        }
        other => TaskShape::Other(kind_of(other)),
    }
}

/// Renders a mapping key as text. Non-string scalar keys use their YAML form.
fn key_text(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Tagged(tagged) => key_text(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => format!("<{} key>", kind_of(key)),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// In-memory filesystem for testing the loader without touching disk.
    struct MemFs {
        files: HashMap<PathBuf, String>,
    }

    impl MemFs {
        fn with(path: &str, contents: &str) -> Self {
            Self { files: HashMap::from([(PathBuf::from(path), contents.to_string())]) }
        }
    }

    impl FileSystem for MemFs {
        fn read_to_string(
            &self,
            path: &Path,
        ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| format!("File not found: {}", path.display()).into())
        }
    }

    fn parse(contents: &str) -> Taskfile {
        Taskfile::parse(Path::new("taskfile.yaml"), contents).unwrap()
    }

    fn attributes_of(contents: &str, task: &str) -> Vec<String> {
        let tasks = parse(contents).tasks().unwrap();
        match tasks.into_iter().find(|(name, _)| name == task) {
            Some((_, TaskShape::Attributes(names))) => names,
            other => panic!("expected attributes for {task}, got {other:?}"),
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn load_reads_through_the_filesystem_port() {
        let fs = MemFs::with("/repo/taskfile.yaml", "tasks:\n  lint: [\"echo hi\"]\n");
        let taskfile = Taskfile::load(&fs, Path::new("/repo/taskfile.yaml")).unwrap();
        assert_eq!(taskfile.path(), Path::new("/repo/taskfile.yaml"));
        assert_eq!(taskfile.tasks(), Ok(vec![("lint".to_string(), TaskShape::Shorthand)]));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let fs = MemFs::with("/repo/taskfile.yaml", "");
        let err = Taskfile::load(&fs, Path::new("/repo/other.yaml")).unwrap_err();
        assert!(matches!(err, LintError::Read { .. }));
        assert!(err.to_string().starts_with("/repo/other.yaml: failed to read taskfile"));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = Taskfile::parse(Path::new("taskfile.yaml"), "tasks: [unclosed").unwrap_err();
        assert!(matches!(err, LintError::Parse { .. }));
    }

    #[test]
    fn scalar_root_is_rejected() {
        let err = Taskfile::parse(Path::new("taskfile.yaml"), "just a string").unwrap_err();
        assert!(matches!(err, LintError::NotAMapping { .. }));
    }

    #[test]
    fn empty_document_has_no_tasks() {
        assert_eq!(parse("").tasks(), Ok(Vec::new()));
    }

    #[test]
    fn document_without_tasks_key_has_no_tasks() {
        assert_eq!(parse("version: \"3\"\nvars:\n  A: 1\n").tasks(), Ok(Vec::new()));
    }

    #[test]
    fn null_tasks_section_has_no_tasks() {
        assert_eq!(parse("tasks:\n").tasks(), Ok(Vec::new()));
    }

    #[test]
    fn non_mapping_tasks_section_reports_its_kind() {
        assert_eq!(parse("tasks: [a, b]\n").tasks(), Err("list"));
    }

    #[test]
    fn attribute_names_keep_document_order() {
        let attrs = attributes_of(
            "tasks:\n  build:\n    cmds: [make]\n    desc: Build it\n    deps: [gen]\n",
            "build",
        );
        assert_eq!(attrs, names(&["cmds", "desc", "deps"]));
    }

    #[test]
    fn classifies_each_task_shape() {
        let tasks = parse(
            "tasks:\n  a: [\"echo a\"]\n  b:\n    desc: B\n  c: echo c\n  d:\n  5: [x]\n",
        )
        .tasks()
        .unwrap();
        assert_eq!(
            tasks,
            vec![
                ("a".to_string(), TaskShape::Shorthand),
                ("b".to_string(), TaskShape::Attributes(names(&["desc"]))),
                ("c".to_string(), TaskShape::Other("string")),
                ("d".to_string(), TaskShape::Other("null")),
                ("5".to_string(), TaskShape::Shorthand),
            ]
        );
    }

    #[test]
    fn merged_keys_come_before_own_keys() {
        let contents = "\
common: &common
  silent: true
tasks:
  build:
    cmds: [make]
    <<: *common
";
        let attrs = attributes_of(contents, "build");
        assert_eq!(attrs, names(&["silent", "cmds"]));
    }

    #[test]
    fn overridden_merged_key_keeps_merged_position() {
        let contents = "\
base: &base
  desc: Base
  dir: src
tasks:
  build:
    <<: *base
    cmds: [make]
    desc: Build
";
        assert_eq!(attributes_of(contents, "build"), names(&["desc", "dir", "cmds"]));

        let taskfile = parse(contents);
        let build = taskfile.root.get(TASKS_KEY).and_then(|t| t.get("build")).unwrap();
        assert_eq!(build.get("desc"), Some(&Value::String("Build".to_string())));
    }

    #[test]
    fn merge_list_puts_later_sources_first_and_earlier_values_win() {
        let contents = "\
a: &a
  desc: A
  env: {}
b: &b
  desc: B
  vars: {}
tasks:
  t:
    <<: [*a, *b]
";
        assert_eq!(attributes_of(contents, "t"), names(&["desc", "vars", "env"]));

        let taskfile = parse(contents);
        let task = taskfile.root.get(TASKS_KEY).and_then(|t| t.get("t")).unwrap();
        assert_eq!(task.get("desc"), Some(&Value::String("A".to_string())));
    }

    #[test]
    fn merge_of_a_scalar_is_rejected() {
        let err = Taskfile::parse(Path::new("taskfile.yaml"), "tasks:\n  t:\n    <<: 3\n")
            .unwrap_err();
        assert!(matches!(err, LintError::Merge { .. }));
    }
}
