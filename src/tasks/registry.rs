use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::{
    notify::{Notice, Notifier},
    utils::{clock::Clock, ids::MonotonicIds},
};

use super::{
    entities::{NewTask, Status, Task},
    view::{view, SortKey, StatusFilter},
};

const DEFAULT_CATEGORY: &str = "General";
const DEFAULT_ESTIMATE: &str = "1h";
const INITIAL_ACTUAL_TIME: &str = "0h";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("Task title is required")]
    EmptyTitle,
}

/// Owns the task list. All mutation goes through the operations below, reads go through
/// [TaskRegistry::view] or the plain accessors.
pub struct TaskRegistry {
    tasks: Vec<Task>,
    ids: MonotonicIds,
    clock: Arc<dyn Clock>,
    notifier: Box<dyn Notifier>,
}

impl TaskRegistry {
    pub fn new(tasks: Vec<Task>, clock: Arc<dyn Clock>, notifier: Box<dyn Notifier>) -> Self {
        let last_id = tasks.iter().map(|t| t.id).max().unwrap_or(0);
        Self {
            tasks,
            ids: MonotonicIds::after(last_id),
            clock,
            notifier,
        }
    }

    /// Appends a pending task. Blank titles are rejected and leave the registry as it was.
    #[instrument(skip(self, new_task), fields(title = %new_task.title))]
    pub fn create_task(&mut self, new_task: NewTask) -> Result<&Task, TaskError> {
        if new_task.title.trim().is_empty() {
            debug!("Rejected task without a title");
            self.notifier
                .notify(Notice::destructive("Error", TaskError::EmptyTitle.to_string()));
            return Err(TaskError::EmptyTitle);
        }

        let now = self.clock.time();
        let task = Task {
            id: self.ids.next(now),
            title: new_task.title,
            description: new_task.description,
            priority: new_task.priority,
            status: Status::Pending,
            category: or_default(new_task.category, DEFAULT_CATEGORY),
            estimated_time: or_default(new_task.estimated_time, DEFAULT_ESTIMATE),
            actual_time: INITIAL_ACTUAL_TIME.into(),
            created_at: now,
        };
        info!("Created task {}", task.id);
        self.tasks.push(task);
        self.notifier
            .notify(Notice::new("Success", "Task created successfully"));

        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Replaces the status of task `id`. Any transition is allowed. Returns false and does nothing
    /// when the id is unknown.
    #[instrument(skip(self))]
    pub fn set_status(&mut self, id: u64, status: Status) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            debug!("No task with id {id}");
            return false;
        };
        task.status = status;
        self.notifier.notify(Notice::new(
            "Task Updated",
            format!("Task status changed to {status}"),
        ));
        true
    }

    /// Removes task `id`. Returns false when there was nothing to remove.
    #[instrument(skip(self))]
    pub fn delete_task(&mut self, id: u64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            debug!("No task with id {id}");
            return false;
        }
        self.notifier.notify(Notice::new(
            "Task Deleted",
            "Task has been removed successfully",
        ));
        true
    }

    pub fn view(&self, filter: StatusFilter, sort: SortKey) -> Vec<&Task> {
        view(&self.tasks, filter, sort)
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

fn or_default(value: String, default: &str) -> String {
    if value.trim().is_empty() {
        default.into()
    } else {
        value
    }
}
