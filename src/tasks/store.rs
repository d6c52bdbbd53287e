//! The task store: canonical collection, mutations, and persistence.
//!
//! Every committed mutation is written back to the key-value backend and
//! then announced to subscribers. Mutations addressed to an unknown id are
//! silent no-ops: they neither persist nor notify.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::core::{end_of_today, now};
use crate::error::FocuscoreError;
use crate::storage::KeyValueStore;

use super::codec;
use super::model::{NewTask, Status, Task, TaskPatch};
use super::seed::seed_tasks;
use super::view::{self, Dashboard, TaskStats, TaskView, ViewCounts};

/// Fixed key under which the collection is stored.
pub const STORAGE_KEY: &str = "focuscore_tasks_v1";

/// Identifies a registered subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&[Task])>;

/// Single authoritative task collection.
pub struct TaskStore {
    tasks: Vec<Task>,
    backend: Box<dyn KeyValueStore>,
    key: String,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl std::fmt::Debug for TaskStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskStore")
            .field("key", &self.key)
            .field("tasks", &self.tasks.len())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl TaskStore {
    /// Load the collection stored under [`STORAGE_KEY`].
    #[must_use]
    pub fn load(backend: Box<dyn KeyValueStore>) -> Self {
        Self::load_with_key(backend, STORAGE_KEY)
    }

    /// Load the collection stored under `key`.
    ///
    /// Never fails: missing or unreadable data is replaced by the seed set,
    /// which is then written back.
    #[must_use]
    pub fn load_with_key(backend: Box<dyn KeyValueStore>, key: &str) -> Self {
        let loaded_at = now();
        let tasks = match backend.get(key) {
            Ok(Some(raw)) => match codec::decode(&raw, loaded_at) {
                Ok(tasks) => {
                    log::debug!("loaded {} tasks from '{key}'", tasks.len());
                    tasks
                },
                Err(e) => {
                    log::warn!("stored tasks under '{key}' are unreadable, using seed data: {e}");
                    seed_tasks(loaded_at)
                },
            },
            Ok(None) => {
                log::debug!("no tasks stored under '{key}', using seed data");
                seed_tasks(loaded_at)
            },
            Err(e) => {
                log::warn!("failed to read '{key}', using seed data: {e}");
                seed_tasks(loaded_at)
            },
        };

        let store = Self {
            tasks,
            backend,
            key: key.to_string(),
            listeners: Vec::new(),
            next_subscription: 0,
        };
        store.persist();
        store
    }

    /// The raw collection, most recently created first.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Look up a task by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Create a task and prepend it to the collection.
    ///
    /// The task always starts pending, whatever the input.
    pub fn create(&mut self, input: NewTask) -> Task {
        let timestamp = now();
        let task = Task {
            id: self.fresh_id(),
            title: input.title,
            description: input.description.filter(|d| !d.is_empty()),
            deadline: input.deadline.unwrap_or_else(end_of_today),
            priority: input.priority,
            tags: input.tags,
            status: Status::Pending,
            created_at: timestamp,
            updated_at: timestamp,
        };

        log::debug!("created task {} '{}'", task.id, task.title);
        self.tasks.insert(0, task.clone());
        self.commit();
        task
    }

    /// Flip a task between pending and completed.
    ///
    /// Returns the updated task, or `None` if no task has this id.
    pub fn toggle_status(&mut self, id: &str) -> Option<&Task> {
        let index = self.position(id)?;
        let timestamp = self.touch_time(index);
        let task = &mut self.tasks[index];
        task.status = task.status.toggled();
        task.updated_at = timestamp;
        log::debug!("task {id} is now {}", task.status);

        self.commit();
        self.tasks.get(index)
    }

    /// Remove a task permanently.
    ///
    /// Returns the removed task, or `None` if no task has this id.
    pub fn delete(&mut self, id: &str) -> Option<Task> {
        let index = self.position(id)?;
        let removed = self.tasks.remove(index);
        log::debug!("deleted task {id}");

        self.commit();
        Some(removed)
    }

    /// Merge `patch` into a task and refresh its `updated_at`.
    ///
    /// Returns the updated task, or `None` if no task has this id.
    pub fn update(&mut self, id: &str, patch: TaskPatch) -> Option<&Task> {
        let index = self.position(id)?;
        let timestamp = self.touch_time(index);
        let task = &mut self.tasks[index];
        patch.apply(task);
        task.updated_at = timestamp;
        log::debug!("updated task {id}");

        self.commit();
        self.tasks.get(index)
    }

    /// Derive a view against the current instant.
    #[must_use]
    pub fn query_by_view(&self, view: TaskView) -> Vec<&Task> {
        self.query_by_view_at(view, Utc::now())
    }

    /// Derive a view against `now`.
    #[must_use]
    pub fn query_by_view_at(&self, view: TaskView, now: DateTime<Utc>) -> Vec<&Task> {
        view.apply(&self.tasks, now)
    }

    /// Overdue, today and later buckets of pending tasks.
    #[must_use]
    pub fn dashboard(&self) -> Dashboard<'_> {
        view::dashboard(&self.tasks, Utc::now())
    }

    /// Pending tasks that are not overdue, soonest first.
    #[must_use]
    pub fn upcoming(&self) -> Vec<&Task> {
        view::upcoming(&self.tasks, Utc::now())
    }

    /// Badge counts for each view.
    #[must_use]
    pub fn counts(&self) -> ViewCounts {
        view::counts(&self.tasks, Utc::now())
    }

    /// Completion statistics.
    #[must_use]
    pub fn stats(&self) -> TaskStats {
        view::stats(&self.tasks, Utc::now())
    }

    /// Register a callback that receives the collection after each commit.
    pub fn subscribe(&mut self, listener: impl FnMut(&[Task]) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a subscriber. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Write the collection to the backend.
    ///
    /// Failures are logged and swallowed.
    pub fn persist(&self) {
        if let Err(e) = self.try_persist() {
            log::warn!("failed to persist tasks under '{}': {e}", self.key);
        }
    }

    fn try_persist(&self) -> Result<(), FocuscoreError> {
        let raw = codec::encode(&self.tasks)?;
        self.backend.set(&self.key, &raw)
    }

    fn commit(&mut self) {
        self.persist();
        for (_, listener) in &mut self.listeners {
            listener(&self.tasks);
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Current time, never earlier than the task's creation.
    fn touch_time(&self, index: usize) -> DateTime<Utc> {
        now().max(self.tasks[index].created_at)
    }

    fn fresh_id(&self) -> String {
        loop {
            let candidate = Uuid::new_v4().simple().to_string()[..8].to_string();
            if self.get(&candidate).is_none() {
                return candidate;
            }
        }
    }
}
