//! Sign-in and sign-up forms.
//!
//! These controllers are not session-scoped: each request builds one from
//! the `role` query parameter, runs the submission and renders the result.

use internhub_core::navigation::{home_for, login_for, signup_for, LANDING};
use internhub_core::roles::Role;
use internhub_core::session::SessionContext;
use internhub_core::types::EntityId;
use internhub_core::validation::validate_signup;
use internhub_db::models::profile::CreateProfile;
use internhub_db::repositories::ProfileRepo;
use internhub_db::session::{session_for_user, SessionError};
use internhub_db::{Store, StoreError};
use serde::Serialize;
use serde_json::json;

pub const MSG_CONFIRM_EMAIL: &str = "Please check your email to confirm your account. \
Your profile will be created after confirmation.";
pub const MSG_PROFILE_SETUP_REQUIRED: &str = "Permission denied. Please set up the database \
trigger that creates a profile for every new user.";
pub const MSG_PROFILE_VERIFICATION_FAILED: &str =
    "Account created but profile verification failed. Please try logging in.";

async fn end_auth_session(store: &Store, access_token: &str) {
    if let Err(e) = store.sign_out(access_token).await {
        tracing::warn!(error = %e, "Failed to sign out temporary session");
    }
}

// ---------------------------------------------------------------------------
// Landing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct RoleCard {
    pub role: Role,
    pub title: &'static str,
    pub description: &'static str,
    pub login: String,
    pub signup: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LandingPage {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub roles: Vec<RoleCard>,
}

pub fn landing_page() -> LandingPage {
    let card = |role: Role, description| RoleCard {
        role,
        title: role.display_name(),
        description,
        login: login_for(role),
        signup: signup_for(role),
    };
    LandingPage {
        title: "Intern Management System",
        subtitle: "Select your role to continue",
        roles: vec![
            card(Role::Admin, "Manage projects and assign tasks"),
            card(Role::Intern, "View and complete assigned tasks"),
        ],
    }
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct LoginView {
    /// Role picked on the landing page, if any.
    role: Option<Role>,
    email: String,
    error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginPage {
    pub heading: String,
    pub role: Option<Role>,
    pub email: String,
    pub error: Option<String>,
    pub signup: String,
    pub back: &'static str,
}

impl LoginView {
    pub fn new(role: Option<Role>) -> Self {
        Self {
            role,
            email: String::new(),
            error: None,
        }
    }

    /// Sign in and resolve the profile role.
    ///
    /// On any failure after the credentials were accepted the fresh
    /// session is signed out again, so a rejected login leaves nothing
    /// behind.
    pub async fn submit(&mut self, store: &Store, email: &str, password: &str) -> Option<SessionContext> {
        self.email = email.trim().to_string();
        self.error = None;

        let auth = match store.sign_in_with_password(&self.email, password).await {
            Ok(auth) => auth,
            Err(e) => {
                tracing::info!(email = %self.email, error = %e, "Sign-in rejected");
                self.error = Some(e.to_string());
                return None;
            }
        };

        let session = match session_for_user(store, &auth.access_token, &auth.user).await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(user_id = %auth.user.id, error = %e, "Profile lookup failed at sign-in");
                self.error = Some(match &e {
                    SessionError::Store(inner) => format!("Failed to fetch user profile: {inner}"),
                    other => other.to_string(),
                });
                end_auth_session(store, &auth.access_token).await;
                return None;
            }
        };

        if let Some(selected) = self.role.filter(|r| *r != session.role) {
            self.error = Some(format!(
                "This account is registered as {}, not {}",
                session.role, selected
            ));
            end_auth_session(store, &auth.access_token).await;
            return None;
        }

        tracing::info!(user_id = %session.user_id, role = %session.role, "User signed in");
        Some(session)
    }

    pub fn page(&self) -> LoginPage {
        LoginPage {
            heading: match self.role {
                Some(role) => format!("Sign in as {}", role.display_name()),
                None => "Sign in to your account".to_string(),
            },
            role: self.role,
            email: self.email.clone(),
            error: self.error.clone(),
            signup: signup_for(self.role.unwrap_or_default()),
            back: LANDING,
        }
    }
}

/// Response body of a successful sign-in.
#[derive(Debug, Clone, Serialize)]
pub struct SignedIn {
    pub redirect_to: &'static str,
    pub access_token: String,
    pub user: SessionContext,
}

impl SignedIn {
    pub fn new(session: SessionContext) -> Self {
        Self {
            redirect_to: home_for(session.role),
            access_token: session.access_token.clone(),
            user: session,
        }
    }
}

// ---------------------------------------------------------------------------
// Signup
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SignupView {
    role: Role,
    email: String,
    error: Option<String>,
    success: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupPage {
    pub heading: String,
    pub role: Role,
    pub email: String,
    pub error: Option<String>,
    pub success: Option<String>,
    /// Set after a successful signup: where the client should go next.
    pub redirect_to: Option<String>,
    pub login: String,
    pub back: &'static str,
}

impl SignupView {
    pub fn new(role: Option<Role>) -> Self {
        Self {
            role: role.unwrap_or_default(),
            email: String::new(),
            error: None,
            success: None,
        }
    }

    /// Register an account for the chosen role and make sure it has a
    /// matching profile row.
    pub async fn submit(&mut self, store: &Store, email: &str, password: &str, confirm_password: &str) {
        self.email = email.trim().to_string();
        self.error = None;
        self.success = None;

        if let Err(e) = validate_signup(&self.email, password, confirm_password) {
            self.error = Some(e.user_message());
            return;
        }

        match self.register(store, password).await {
            Ok(()) => {
                tracing::info!(email = %self.email, role = %self.role, "Account created");
                self.success = Some(format!(
                    "Account created successfully! You can now sign in as {}.",
                    self.role.display_name()
                ));
            }
            Err(message) => self.error = Some(message),
        }
    }

    async fn register(&self, store: &Store, password: &str) -> Result<(), String> {
        let outcome = store
            .sign_up(&self.email, password, json!({ "role": self.role.as_str() }))
            .await
            .map_err(|e| e.to_string())?;

        let Some(auth) = outcome.session else {
            return Err(MSG_CONFIRM_EMAIL.to_string());
        };
        let user = outcome.user.unwrap_or_else(|| auth.user.clone());
        let token = auth.access_token.as_str();

        let result = self.ensure_profile(store, token, user.id).await;
        end_auth_session(store, token).await;
        result
    }

    async fn ensure_profile(
        &self,
        store: &Store,
        token: &str,
        user_id: EntityId,
    ) -> Result<(), String> {
        let input = CreateProfile {
            id: user_id,
            full_name: None,
            role: self.role,
            email: Some(self.email.clone()),
        };

        match ProfileRepo::create(store, token, &input).await {
            Ok(_) => {}
            Err(e) if e.is_unique_violation() => self.reconcile_role(store, token, input.id).await?,
            Err(e) if e.is_permission_denied() => {
                // A backend trigger may already have created the row.
                if !profile_exists(store, token, input.id).await {
                    tracing::error!(user_id = %input.id, error = %e, "Profile insert blocked by row policy");
                    return Err(MSG_PROFILE_SETUP_REQUIRED.to_string());
                }
            }
            Err(e) => {
                return Err(format!(
                    "Failed to create profile: {} (Code: {})",
                    e,
                    e.code().unwrap_or("unknown")
                ))
            }
        }

        if profile_exists(store, token, input.id).await {
            Ok(())
        } else {
            Err(MSG_PROFILE_VERIFICATION_FAILED.to_string())
        }
    }

    /// The profile already exists; make its role match the signup choice.
    async fn reconcile_role(
        &self,
        store: &Store,
        token: &str,
        user_id: EntityId,
    ) -> Result<(), String> {
        let existing = ProfileRepo::find_role(store, token, user_id)
            .await
            .map_err(|e| format!("Profile exists but couldn't verify: {e}"))?;
        match existing {
            Some(role) if role == self.role => Ok(()),
            Some(_) => ProfileRepo::update_role(store, token, user_id, self.role)
                .await
                .map(|_| ())
                .map_err(|e: StoreError| format!("Couldn't update profile role: {e}")),
            None => Err(MSG_PROFILE_VERIFICATION_FAILED.to_string()),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.success.is_some()
    }

    pub fn page(&self) -> SignupPage {
        SignupPage {
            heading: format!("Sign up as {}", self.role.display_name()),
            role: self.role,
            email: self.email.clone(),
            error: self.error.clone(),
            success: self.success.clone(),
            redirect_to: self.succeeded().then(|| login_for(self.role)),
            login: login_for(self.role),
            back: LANDING,
        }
    }
}

async fn profile_exists(store: &Store, token: &str, user_id: EntityId) -> bool {
    matches!(ProfileRepo::find_role(store, token, user_id).await, Ok(Some(_)))
}
