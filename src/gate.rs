// SPDX-License-Identifier: MIT

//! Access gate for protected views.
//!
//! Pure mapping from session readiness to a render decision; no network or
//! storage I/O happens here. `Hold` while readiness is still unknown keeps
//! a restored session from flashing a redirect during startup.

use crate::services::Readiness;

/// Where unauthenticated users are sent.
pub const ENTRY_POINT: &str = "/login";

/// What the rendering layer should do with a protected view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Render nothing yet; readiness is not resolved.
    Hold,
    /// Render the protected view.
    Render,
    /// Redirect to the given entry point.
    Redirect(&'static str),
}

/// Decide whether a protected view may render.
pub fn decide(readiness: Readiness) -> GateDecision {
    match readiness {
        Readiness::Unknown => GateDecision::Hold,
        Readiness::Authenticated => GateDecision::Render,
        Readiness::Unauthenticated => GateDecision::Redirect(ENTRY_POINT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holds_while_unknown() {
        assert_eq!(decide(Readiness::Unknown), GateDecision::Hold);
    }

    #[test]
    fn test_renders_when_authenticated() {
        assert_eq!(decide(Readiness::Authenticated), GateDecision::Render);
    }

    #[test]
    fn test_redirects_when_unauthenticated() {
        assert_eq!(
            decide(Readiness::Unauthenticated),
            GateDecision::Redirect(ENTRY_POINT)
        );
    }
}
