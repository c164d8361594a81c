use crate::model::Task;
use crate::storage::{self, StorageKey, Store};

/// Number of open tasks shown at once.
pub const VISIBLE_TASKS: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct TaskRepo {
    tasks: Vec<Task>,
    revision: u64,
}

impl TaskRepo {
    pub fn load(store: &dyn Store) -> Self {
        let tasks: Vec<Task> = storage::load(store, StorageKey::Tasks, Vec::new());
        let tasks = tasks
            .into_iter()
            .map(|t| if t.is_consistent() { t } else { repair(t) })
            .collect();
        Self { tasks, revision: 0 }
    }

    /// Stored order: newest first.
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Open tasks, oldest first, capped to `limit`.
    pub fn visible(&self, limit: usize) -> Vec<&Task> {
        let mut open: Vec<&Task> = self.tasks.iter().filter(|t| !t.done).collect();
        open.sort_by_key(|t| t.created_at);
        open.truncate(limit);
        open
    }

    /// Insert a task at the front. Blank titles are ignored.
    pub fn add(&mut self, store: &dyn Store, title: &str, now: u64) -> Option<&Task> {
        let task = Task::new(title, now)?;
        tracing::debug!(id = %task.id, "task added");
        self.tasks.insert(0, task);
        self.commit(store);
        self.tasks.first()
    }

    /// Flip `done` on the task with `id`. Unknown ids are ignored.
    pub fn toggle(&mut self, store: &dyn Store, id: &str, now: u64) -> Option<&Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        self.tasks[index] = self.tasks[index].toggled(now);
        tracing::debug!(id, done = self.tasks[index].done, "task toggled");
        self.commit(store);
        self.tasks.get(index)
    }

    pub fn remove(&mut self, store: &dyn Store, id: &str) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        let removed = self.tasks.remove(index);
        tracing::debug!(id, "task removed");
        self.commit(store);
        Some(removed)
    }

    fn commit(&mut self, store: &dyn Store) {
        self.revision += 1;
        storage::save(store, StorageKey::Tasks, &self.tasks);
    }
}

/// Stored data that violates the done/completedAt pairing is normalized on
/// load: `done` wins, and a missing or early timestamp falls back to
/// `created_at`.
fn repair(task: Task) -> Task {
    tracing::warn!(id = %task.id, "repairing inconsistent task");
    let completed_at = task
        .done
        .then(|| task.completed_at.unwrap_or(task.created_at).max(task.created_at));
    Task {
        completed_at,
        ..task
    }
}
