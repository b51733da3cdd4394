//! HTTP host for InternHub: role-guarded pages for admins and interns,
//! their form actions, and the sign-in / sign-up / sign-out flows.
//!
//! Every page responds with the JSON view model of its screen controller
//! (see [`views`]); the controllers live per session in
//! [`views::ViewRegistry`].

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod views;
