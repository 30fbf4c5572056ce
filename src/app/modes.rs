//! Screen and login-form mode types.
//!
//! The client shows one of two screens: the login form while nobody is signed in,
//! the dashboard otherwise. The login form itself switches between signing in and
//! creating an account.
//!
//! # Example
//!
//! ```rust
//! use taskdeck::app::AuthMode;
//!
//! let mode = AuthMode::SignIn.toggled();
//! assert_eq!(mode.title(), "Create Account");
//! ```

/// Which screen is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Login or signup form.
    Login,

    /// Task list with controls, statistics and toasts.
    Dashboard,
}

/// What the login form submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// Username and password exchanged for a session.
    #[default]
    SignIn,

    /// Username, password and confirmation sent to create an account.
    SignUp,
}

impl AuthMode {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::SignIn => Self::SignUp,
            Self::SignUp => Self::SignIn,
        }
    }

    /// Heading of the login form.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::SignIn => "Welcome Back",
            Self::SignUp => "Create Account",
        }
    }

    /// Prompt offering the other mode.
    #[must_use]
    pub const fn toggle_hint(self) -> &'static str {
        match self {
            Self::SignIn => "Don't have an account? Sign up",
            Self::SignUp => "Already have an account? Sign in",
        }
    }
}
