//! Route guard state machine.
//!
//! A guard starts [`GuardState::Pending`] while the identity lookup is in
//! flight and settles exactly once. A role mismatch is treated the same as
//! a missing session: both redirect to the login page with no message.

use crate::navigation::LOGIN;
use crate::roles::Role;
use crate::session::SessionContext;

#[derive(Debug, Clone)]
pub enum GuardState {
    /// Identity not resolved yet; render a placeholder only.
    Pending,
    /// Resolved role matches the required role.
    Allowed(SessionContext),
    /// Anything else. Holds the redirect target.
    Redirect(&'static str),
}

/// What the rendering surface should show for the current guard state.
#[derive(Debug, PartialEq, Eq)]
pub enum GuardView<'a> {
    Placeholder,
    Protected,
    RedirectTo(&'a str),
}

#[derive(Debug, Clone)]
pub struct RouteGuard {
    required: Role,
    state: GuardState,
}

impl RouteGuard {
    pub fn new(required: Role) -> Self {
        Self {
            required,
            state: GuardState::Pending,
        }
    }

    pub fn required(&self) -> Role {
        self.required
    }

    pub fn state(&self) -> &GuardState {
        &self.state
    }

    /// Settle the guard with the outcome of identity resolution.
    ///
    /// Later calls are ignored once the guard has settled.
    pub fn resolve<E>(&mut self, identity: Result<SessionContext, E>) -> &GuardState {
        if matches!(self.state, GuardState::Pending) {
            self.state = match identity {
                Ok(session) if session.role == self.required => GuardState::Allowed(session),
                _ => GuardState::Redirect(LOGIN),
            };
        }
        &self.state
    }

    pub fn view(&self) -> GuardView<'_> {
        match &self.state {
            GuardState::Pending => GuardView::Placeholder,
            GuardState::Allowed(_) => GuardView::Protected,
            GuardState::Redirect(target) => GuardView::RedirectTo(target),
        }
    }

    /// The session, only when access was granted.
    pub fn session(&self) -> Option<&SessionContext> {
        match &self.state {
            GuardState::Allowed(session) => Some(session),
            _ => None,
        }
    }
}
