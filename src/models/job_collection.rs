use std::sync::{Mutex, PoisonError};

use crate::models::job::Job;

/// Append-only job list shared between page tasks.
///
/// Writers only ever call [`JobCollection::append`]; there is no shared
/// read. The contents are taken out with [`JobCollection::into_jobs`] once
/// every writer has dropped its handle.
#[derive(Debug, Default)]
pub struct JobCollection {
    items: Mutex<Vec<Job>>,
}

impl JobCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, job: Job) {
        // A panicking writer cannot leave a half-pushed Vec behind.
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.push(job);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn into_jobs(self) -> Vec<Job> {
        self.items
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
