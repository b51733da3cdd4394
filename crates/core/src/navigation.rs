//! Navigable route paths.

use crate::roles::Role;

pub const LANDING: &str = "/";
pub const LOGIN: &str = "/login";
pub const SIGNUP: &str = "/signup";
pub const LOGOUT: &str = "/logout";

pub const ADMIN_DASHBOARD: &str = "/admin";
pub const ADMIN_PROJECTS: &str = "/admin/projects";
pub const ADMIN_TASKS: &str = "/admin/tasks";
pub const ADMIN_INTERNS: &str = "/admin/interns";

pub const INTERN_DASHBOARD: &str = "/intern";
pub const INTERN_TASKS: &str = "/intern/tasks";
pub const INTERN_PROJECTS: &str = "/intern/projects";

/// Dashboard a freshly signed-in principal lands on.
pub fn home_for(role: Role) -> &'static str {
    match role {
        Role::Admin => ADMIN_DASHBOARD,
        Role::Intern => INTERN_DASHBOARD,
    }
}

/// `/login?role=<role>`, the target after signup and of the landing cards.
pub fn login_for(role: Role) -> String {
    format!("{LOGIN}?role={role}")
}

/// `/signup?role=<role>`.
pub fn signup_for(role: Role) -> String {
    format!("{SIGNUP}?role={role}")
}
