//! Intern project list: projects reachable through the intern's tasks.

use internhub_core::session::SessionContext;
use internhub_db::models::project::Project;
use internhub_db::workload::load_intern_projects;
use internhub_db::Store;
use serde::Serialize;

use super::banner::{BannerView, Banners};

#[derive(Debug, Default)]
pub struct MyProjectsView {
    projects: Vec<Project>,
    banners: Banners,
}

#[derive(Debug, Clone, Serialize)]
pub struct MyProjectsPage {
    pub projects: Vec<Project>,
    #[serde(flatten)]
    pub banners: BannerView,
}

impl MyProjectsView {
    pub async fn refresh(&mut self, store: &Store, session: &SessionContext) {
        match load_intern_projects(store, session, session.user_id).await {
            Ok(projects) => self.projects = projects,
            Err(e) => {
                tracing::warn!(user_id = %session.user_id, error = %e, "Failed to load my projects");
                self.banners.error(e.user_message());
            }
        }
    }

    pub fn page(&mut self) -> MyProjectsPage {
        MyProjectsPage {
            projects: self.projects.clone(),
            banners: self.banners.view(),
        }
    }
}
