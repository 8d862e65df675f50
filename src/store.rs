//! The in-memory task store: the single source of truth for every view.
//!
//! Ordered, single-threaded, no persistence. Ids are assigned from a
//! monotonically increasing counter that only a clear-all or bulk
//! replacement resets.

use crate::ingest::{BulkEntry, TaskFields};
use crate::task::Task;

/// Ordered collection of tasks plus the running id counter.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
}

impl TaskStore {
    /// Empty store; the first assigned id is "1".
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// Seed a store with pre-built tasks (e.g. the samples). The counter
    /// continues after them, as if they were bulk-loaded.
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks.len() as u64 + 1;
        Self { tasks, next_id }
    }

    /// Append a validated task, assigning the next sequential id.
    /// Returns the assigned id.
    pub fn add(&mut self, fields: TaskFields) -> String {
        let id = self.next_id.to_string();
        self.next_id += 1;
        self.tasks.push(Task {
            id: id.clone(),
            title: fields.title,
            due_date: fields.due_date,
            estimated_hours: fields.estimated_hours,
            importance: fields.importance,
            dependencies: fields.dependencies,
        });
        id
    }

    /// Remove every task whose id matches. Duplicate ids coexist in the
    /// store, so this removes all of them; returns how many were removed.
    pub fn remove(&mut self, id: &str) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        before - self.tasks.len()
    }

    /// Drop every task and reset the id counter, so the next added task
    /// receives id "1".
    pub fn clear(&mut self) {
        self.tasks.clear();
        self.next_id = 1;
    }

    /// Replace the whole store with a validated bulk document and reset
    /// the counter to `count + 1`. Entries without an explicit id default
    /// to the pre-load counter value plus their position.
    pub fn load_bulk(&mut self, entries: Vec<BulkEntry>) -> usize {
        let base = self.next_id;
        self.tasks = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| Task {
                id: entry
                    .id
                    .unwrap_or_else(|| (base + index as u64).to_string()),
                title: entry.fields.title,
                due_date: entry.fields.due_date,
                estimated_hours: entry.fields.estimated_hours,
                importance: entry.fields.importance,
                dependencies: entry.fields.dependencies,
            })
            .collect();
        self.next_id = self.tasks.len() as u64 + 1;
        self.tasks.len()
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
