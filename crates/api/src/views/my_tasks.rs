//! Intern task list: the signed-in intern's tasks with comment threads and
//! a "Mark Complete" action on open tasks.

use internhub_core::session::SessionContext;
use internhub_core::types::EntityId;
use internhub_db::repositories::TaskRepo;
use internhub_db::workload::{load_intern_workload, InternWorkload};
use internhub_db::Store;
use serde::Serialize;

use super::banner::{BannerView, Banners};
use super::{task_cards, TaskCard};

#[derive(Debug, Default)]
pub struct MyTasksView {
    workload: InternWorkload,
    banners: Banners,
}

#[derive(Debug, Clone, Serialize)]
pub struct MyTasksPage {
    pub tasks: Vec<TaskCard>,
    /// "X of Y tasks completed"; absent when there are no tasks.
    pub summary: Option<String>,
    #[serde(flatten)]
    pub banners: BannerView,
}

impl MyTasksView {
    pub async fn refresh(&mut self, store: &Store, session: &SessionContext) {
        match load_intern_workload(store, session, session.user_id).await {
            Ok(workload) => self.workload = workload,
            Err(e) => {
                tracing::warn!(user_id = %session.user_id, error = %e, "Failed to load my tasks");
                self.banners.error(e.user_message());
            }
        }
    }

    /// Complete one of the intern's tasks and reload the list. Completing
    /// a task twice is harmless.
    pub async fn mark_complete(&mut self, store: &Store, session: &SessionContext, task_id: EntityId) {
        self.banners.clear();
        if let Err(e) = TaskRepo::mark_completed(store, session, task_id).await {
            tracing::warn!(task_id = %task_id, error = %e, "Failed to complete task");
            self.banners.error(e.user_message());
        }
        self.refresh(store, session).await;
    }

    pub fn page(&mut self) -> MyTasksPage {
        MyTasksPage {
            tasks: task_cards(&self.workload),
            summary: self.workload.completion().label(),
            banners: self.banners.view(),
        }
    }
}
