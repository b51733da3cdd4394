//! Role dashboards: a welcome and links to the role's screens.

use axum::Json;
use internhub_core::navigation::{
    ADMIN_INTERNS, ADMIN_PROJECTS, ADMIN_TASKS, INTERN_PROJECTS, INTERN_TASKS, LOGOUT,
};
use serde::Serialize;

use crate::middleware::guard::{RequireAdmin, RequireIntern};
use crate::response::DataResponse;

#[derive(Debug, Serialize)]
pub struct DashboardLink {
    pub label: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DashboardPage {
    pub title: &'static str,
    pub welcome: &'static str,
    pub email: Option<String>,
    pub links: Vec<DashboardLink>,
    pub logout: &'static str,
}

/// GET /admin
pub async fn admin(RequireAdmin(session): RequireAdmin) -> Json<DataResponse<DashboardPage>> {
    Json(DataResponse {
        data: DashboardPage {
            title: "Admin Dashboard",
            welcome: "Manage your projects and assign tasks to interns from here.",
            email: session.email,
            links: vec![
                DashboardLink {
                    label: "Projects",
                    path: ADMIN_PROJECTS,
                    description: "View and manage all projects in the system",
                },
                DashboardLink {
                    label: "Tasks",
                    path: ADMIN_TASKS,
                    description: "View all tasks and assign them to interns",
                },
                DashboardLink {
                    label: "Interns",
                    path: ADMIN_INTERNS,
                    description: "Manage interns, their tasks, and add comments",
                },
            ],
            logout: LOGOUT,
        },
    })
}

/// GET /intern
pub async fn intern(RequireIntern(session): RequireIntern) -> Json<DataResponse<DashboardPage>> {
    Json(DataResponse {
        data: DashboardPage {
            title: "Intern Dashboard",
            welcome: "Welcome! Check your assigned tasks and the projects you are part of.",
            email: session.email,
            links: vec![
                DashboardLink {
                    label: "My Tasks",
                    path: INTERN_TASKS,
                    description: "See your tasks and mark them complete",
                },
                DashboardLink {
                    label: "My Projects",
                    path: INTERN_PROJECTS,
                    description: "Projects you have tasks in",
                },
            ],
            logout: LOGOUT,
        },
    })
}
