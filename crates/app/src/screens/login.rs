//! Login form state

use sweeperkeeper_core::Credentials;

/// Credential fields of the login screen.
///
/// The fields survive a failed submission; nothing here clears them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginScreen {
    pub username: String,
    pub password: String,
    password_visible: bool,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.clone(), self.password.clone())
    }

    pub fn password_visible(&self) -> bool {
        self.password_visible
    }

    pub fn toggle_password_visibility(&mut self) {
        self.password_visible = !self.password_visible;
    }

    /// Password as it should be rendered
    pub fn display_password(&self) -> String {
        if self.password_visible {
            self.password.clone()
        } else {
            "*".repeat(self.password.chars().count())
        }
    }
}
