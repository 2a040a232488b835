//! Capability check gating access to protected views.
//!
//! The guard is a pure predicate over hydrated [`SessionState`] - it never
//! reads raw storage and performs no navigation itself, which keeps it
//! independently testable. The view layer acts on the returned
//! [`Admission`].

use crate::session::SessionState;

/// Capability a view requires before it may render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Open to everyone.
    Public,
    /// Requires a logged-in user (e.g., the orders view).
    Customer,
    /// Requires the admin flag (product management views).
    Admin,
}

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Render the requested view.
    Granted,
    /// Redirect to the public landing view instead of rendering.
    RedirectToLanding,
}

/// True iff the session satisfies the required capability.
#[must_use]
pub const fn is_admitted(session: &SessionState, capability: Capability) -> bool {
    match capability {
        Capability::Public => true,
        Capability::Customer => session.logged_in(),
        Capability::Admin => session.is_admin(),
    }
}

/// Admission decision for the view layer.
#[must_use]
pub const fn admit(session: &SessionState, capability: Capability) -> Admission {
    if is_admitted(session, capability) {
        Admission::Granted
    } else {
        Admission::RedirectToLanding
    }
}
