//! File-backed task list and completed-task log.
//!
//! `tasks.json` holds the active task records; `completed.json` holds tasks
//! the user marked done, with the time they were completed.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use weekplan_core::TaskRecord;

use crate::state::{completed_path, tasks_path};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedTask {
    pub id: String,
    pub name: String,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks_file: PathBuf,
    completed_file: PathBuf,
}

impl TaskStore {
    pub fn new(home: &Path) -> Self {
        Self {
            tasks_file: tasks_path(home),
            completed_file: completed_path(home),
        }
    }

    pub fn tasks_file(&self) -> &Path {
        &self.tasks_file
    }

    /// Active tasks; a missing file is an empty list.
    pub fn load_tasks(&self) -> Result<Vec<TaskRecord>> {
        read_json_list(&self.tasks_file)
    }

    pub fn save_tasks(&self, tasks: &[TaskRecord]) -> Result<()> {
        write_json(&self.tasks_file, tasks)
    }

    pub fn load_completed(&self) -> Result<Vec<CompletedTask>> {
        read_json_list(&self.completed_file)
    }

    /// Append `task` to the active list. Ids must stay unique.
    pub fn add(&self, task: TaskRecord) -> Result<Vec<TaskRecord>> {
        let mut tasks = self.load_tasks()?;
        if tasks.iter().any(|t| t.id() == task.id()) {
            bail!("a task with id {} already exists", task.id());
        }
        tasks.push(task);
        self.save_tasks(&tasks)?;
        Ok(tasks)
    }

    /// Remove a task without recording it as completed.
    pub fn remove(&self, id: &str) -> Result<TaskRecord> {
        let mut tasks = self.load_tasks()?;
        let idx = find_index(&tasks, id)?;
        let removed = tasks.remove(idx);
        self.save_tasks(&tasks)?;
        Ok(removed)
    }

    /// Move a task from the active list to the completed log.
    ///
    /// The active list is written first. If the log write then fails, the
    /// active list is restored, so the task is never both active and done.
    pub fn complete(&self, id: &str, now: DateTime<Utc>) -> Result<CompletedTask> {
        let original = self.load_tasks()?;
        let mut completed = self.load_completed()?;

        let mut tasks = original.clone();
        let idx = find_index(&tasks, id)?;
        let task = tasks.remove(idx);
        let done = CompletedTask {
            id: task.id().to_string(),
            name: task.name().to_string(),
            completed_at: now,
        };
        completed.push(done.clone());

        self.save_tasks(&tasks)?;
        if let Err(err) = write_json(&self.completed_file, &completed) {
            self.save_tasks(&original)
                .context("restore task list after failed completion")?;
            return Err(err);
        }
        Ok(done)
    }
}

/// Find a task by exact id, or by a unique id prefix (ids are UUIDs, so a
/// short prefix is usually enough to type).
fn find_index(tasks: &[TaskRecord], id: &str) -> Result<usize> {
    if let Some(i) = tasks.iter().position(|t| t.id() == id) {
        return Ok(i);
    }
    let matches: Vec<usize> = tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| !id.is_empty() && t.id().starts_with(id))
        .map(|(i, _)| i)
        .collect();
    match matches.as_slice() {
        [i] => Ok(*i),
        [] => bail!("no task with id {id}"),
        _ => bail!("id prefix {id} matches {} tasks; type more of it", matches.len()),
    }
}

fn read_json_list<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

/// Write through a sibling temp file and rename, so readers never see a
/// half-written file.
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize")?;
    let tmp = temp_path(path);
    fs::write(&tmp, json).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("replace {}", path.display()))?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("weekplan");
    path.with_file_name(format!(".{name}.tmp"))
}
