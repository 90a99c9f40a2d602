//! Home-buying task checklist.
//!
//! Tasks are generated in batch by the task service from the user's financial
//! situation. Generation replaces the whole list. Completing a task deletes it
//! server-side first and only then drops it locally, so a failed delete can
//! never make a task vanish and reappear on the next load.

use crate::{
    auth::AuthContext,
    errors::{Error, Result},
    models::{Task, TaskGenerationRequest},
    services::TaskService,
};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Used when the user leaves the refinancing field blank
pub const DEFAULT_REFINANCING_INFO: &str = "not refinancing";

/// Optional details about the house the checklist is for.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HouseContext {
    pub title: Option<String>,
    pub price: Option<f64>,
}

/// Composes the single free-text description the task service expects.
#[must_use]
pub fn describe_situation(refinancing_info: &str, house: Option<&HouseContext>) -> String {
    let base = match refinancing_info.trim() {
        "" => DEFAULT_REFINANCING_INFO,
        info => info,
    };

    let title = house
        .and_then(|h| h.title.as_deref())
        .map(str::trim)
        .filter(|t| !t.is_empty());
    let price = house
        .and_then(|h| h.price)
        .filter(|p| p.is_finite() && *p > 0.0);

    match (title, price) {
        (Some(title), Some(price)) => {
            format!("{base}. The house is titled '{title}' and priced at ${price}.")
        }
        (Some(title), None) => format!("{base}. The house is titled '{title}' and priced at $N/A."),
        (None, Some(price)) => format!("{base}. The house is priced at ${price}."),
        (None, None) => base.to_string(),
    }
}

fn parse_credit_score(raw: &str) -> Result<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::invalid("credit score", "is required"));
    }
    match raw.parse::<u32>() {
        Ok(score) if score > 0 => Ok(score),
        _ => Err(Error::invalid("credit score", "must be a positive whole number")),
    }
}

/// The current user's generated checklist and the operations that change it.
pub struct TaskLifecycleManager {
    service: Arc<dyn TaskService>,
    auth: AuthContext,
    tasks: Vec<Task>,
    last_error: Option<String>,
}

impl TaskLifecycleManager {
    #[must_use]
    pub fn new(service: Arc<dyn TaskService>, auth: AuthContext) -> Self {
        Self {
            service,
            auth,
            tasks: Vec::new(),
            last_error: None,
        }
    }

    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn find(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    fn fail<T>(&mut self, err: Error) -> Result<T> {
        self.last_error = Some(err.user_message());
        Err(err)
    }

    /// Loads the user's current tasks. Guests get an empty list without a request.
    pub async fn load_tasks(&mut self) -> Result<&[Task]> {
        let Some(user_id) = self.auth.user_id().map(str::to_string) else {
            self.tasks.clear();
            self.last_error = None;
            return Ok(&self.tasks);
        };

        match self.service.fetch_tasks(&user_id).await {
            Ok(tasks) => {
                self.tasks = tasks;
                self.last_error = None;
                Ok(&self.tasks)
            }
            Err(e) => {
                error!("Failed to fetch tasks for {user_id}: {e}");
                self.fail(e)
            }
        }
    }

    /// Regenerates the checklist; the response replaces the current list.
    pub async fn generate_tasks(
        &mut self,
        credit_score: &str,
        refinancing_info: &str,
        house: Option<&HouseContext>,
    ) -> Result<&[Task]> {
        let Some(user_id) = self.auth.user_id().map(str::to_string) else {
            warn!("Task generation attempted without a logged-in user");
            return self.fail(Error::AuthRequired {
                action: "generate tasks",
            });
        };
        let credit_score = match parse_credit_score(credit_score) {
            Ok(score) => score,
            Err(e) => return self.fail(e),
        };

        let request = TaskGenerationRequest {
            user_id,
            credit_score,
            refinancing_info: describe_situation(refinancing_info, house),
        };

        match self.service.generate_tasks(&request).await {
            Ok(tasks) => {
                info!("Generated {} tasks for {}", tasks.len(), request.user_id);
                self.tasks = tasks;
                self.last_error = None;
                Ok(&self.tasks)
            }
            Err(e) => {
                error!("Task generation failed: {e}");
                self.fail(e)
            }
        }
    }

    /// Deletes a task server-side, then removes it locally.
    ///
    /// Unknown ids are rejected with [`Error::NotFound`] without a request; any
    /// failure leaves the local list untouched.
    pub async fn complete_task(&mut self, task_id: &str) -> Result<()> {
        if self.find(task_id).is_none() {
            return self.fail(Error::NotFound {
                resource: "task",
                id: task_id.to_string(),
            });
        }

        if let Err(e) = self.service.delete_task(task_id).await {
            error!("Failed to complete task {task_id}: {e}");
            return self.fail(e);
        }

        self.tasks.retain(|t| t.id != task_id);
        self.last_error = None;
        info!("Completed task {task_id}");
        Ok(())
    }
}
