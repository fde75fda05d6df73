//! Shared utilities and strongly-typed common values for workspace crates.
//!
//! ```rust
//! use rwcommon::SessionId;
//!
//! let session = SessionId::from("dashboard-1");
//! assert_eq!(session.as_str(), "dashboard-1");
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use rwcommon::BoxFuture;
    //!
    //! fn str_len<'a>(value: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { value.len() })
    //! }
    //!
    //! let _future = str_len("hello");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod context {
    //! Cross-crate identifier newtypes.
    //!
    //! ```rust
    //! use rwcommon::SessionId;
    //!
    //! let session = SessionId::new("dashboard-42");
    //! assert_eq!(session.to_string(), "dashboard-42");
    //! ```

    use std::fmt::{Display, Formatter};

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct SessionId(String);

    impl SessionId {
        pub fn new(value: impl Into<String>) -> Self {
            Self(value.into())
        }

        pub fn as_str(&self) -> &str {
            self.0.as_str()
        }
    }

    impl Display for SessionId {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl From<String> for SessionId {
        fn from(value: String) -> Self {
            Self(value)
        }
    }

    impl From<&str> for SessionId {
        fn from(value: &str) -> Self {
            Self(value.to_string())
        }
    }
}

pub use context::SessionId;
pub use future::BoxFuture;

#[cfg(test)]
mod tests {
    use super::SessionId;

    #[test]
    fn session_id_round_trips_strings() {
        let session = SessionId::new("dashboard-1");

        assert_eq!(session.as_str(), "dashboard-1");
        assert_eq!(session.to_string(), "dashboard-1");
        assert_eq!(SessionId::from("dashboard-1"), session);
    }
}
