//! Navigation and Auth State
//!
//! Small state containers behind the navigation sidebar and the login
//! dialog. No algorithmic content; they exist so every piece of UI state
//! has one owner.

use serde::{Deserialize, Serialize};

/// Navigation sidebar state
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SidebarState {
    collapsed: bool,
}

impl SidebarState {
    /// Create the default, collapsed sidebar
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the sidebar is collapsed
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Flip the collapsed state
    pub fn toggle(&mut self) {
        self.collapsed = !self.collapsed;
    }

    /// Set the collapsed state directly
    pub fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }
}

impl Default for SidebarState {
    fn default() -> Self {
        Self { collapsed: true }
    }
}

/// Login state behind the auth dialog
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct AuthState {
    authenticated: bool,
    show_login_dialog: bool,
}

impl AuthState {
    /// Create the signed-out default, with the login dialog showing
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the user is signed in
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Whether the login dialog is visible
    #[must_use]
    pub fn shows_login_dialog(&self) -> bool {
        self.show_login_dialog
    }

    /// Record a successful sign-in and dismiss the dialog
    pub fn login(&mut self) {
        self.authenticated = true;
        self.show_login_dialog = false;
    }

    /// Sign out and bring the dialog back
    pub fn logout(&mut self) {
        self.authenticated = false;
        self.show_login_dialog = true;
    }

    /// Show or hide the login dialog
    pub fn set_show_login_dialog(&mut self, show: bool) {
        self.show_login_dialog = show;
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            authenticated: false,
            show_login_dialog: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidebar_toggle() {
        let mut sidebar = SidebarState::new();
        assert!(sidebar.is_collapsed());
        sidebar.toggle();
        assert!(!sidebar.is_collapsed());
        sidebar.toggle();
        assert!(sidebar.is_collapsed());
    }

    #[test]
    fn test_auth_round_trip() {
        let mut auth = AuthState::new();
        assert!(!auth.is_authenticated());
        assert!(auth.shows_login_dialog());

        auth.login();
        assert!(auth.is_authenticated());
        assert!(!auth.shows_login_dialog());

        auth.logout();
        assert!(!auth.is_authenticated());
        assert!(auth.shows_login_dialog());
    }
}
