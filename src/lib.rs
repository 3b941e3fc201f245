//! # dbresolver
//!
//! Statement-level routing between one write-capable primary and any number
//! of read-only replicas.
//!
//! ## Features
//!
//! - **Statement classification** - Locking-free `SELECT`s go to replicas, everything else to the primary
//! - **Load balancing** - Round-robin (default) or random replica selection, or a custom [`Balancer`]
//! - **Explicit modes** - Pin a call to [`ActionMode::Write`] or [`ActionMode::Read`] with [`Router::with_mode`]
//! - **Hooks** - Observe each selection decision through [`hooks::EventStore`]
//!
//! The router never opens, pools or closes connections. It only picks which
//! [`DataSource`] handle serves a call and forwards the call to it.
//!
//! ## Basic Usage
//!
//! ```rust
//! use dbresolver::{params, ActionMode, DataSource, Router, RouterConfig, Value};
//!
//! struct Conn(&'static str);
//!
//! impl DataSource for Conn {
//!     type Output = String;
//!     type Model = str;
//!
//!     fn execute(&self, sql: &str, _: &[Value]) -> String { format!("{} <- {}", self.0, sql) }
//!     fn query_raw(&self, sql: &str, _: &[Value]) -> String { format!("{} <- {}", self.0, sql) }
//!     fn filter(&self, _: &str, _: &[Value]) -> String { self.0.to_string() }
//!     fn find(&self, _: &str, _: &[Value]) -> String { self.0.to_string() }
//!     fn first(&self, _: &str, _: &[Value]) -> String { self.0.to_string() }
//!     fn last(&self, _: &str, _: &[Value]) -> String { self.0.to_string() }
//!     fn take(&self, _: &str, _: &[Value]) -> String { self.0.to_string() }
//!     fn count(&self, _: &str, _: &[Value]) -> String { self.0.to_string() }
//!     fn save(&self, _: &str) -> String { self.0.to_string() }
//! }
//!
//! # fn main() -> Result<(), dbresolver::ResolverError> {
//! let router = Router::register(
//!     RouterConfig::<Conn>::builder()
//!         .with_primary(Conn("primary"))
//!         .with_replica(Conn("replica-a"))
//!         .build(),
//! )?;
//!
//! assert_eq!(router.query_raw("SELECT * FROM users", &[]), "replica-a <- SELECT * FROM users");
//! assert_eq!(
//!     router.execute("DELETE FROM users WHERE id = ?", &params!["x"]),
//!     "primary <- DELETE FROM users WHERE id = ?"
//! );
//! assert_eq!(
//!     router.with_mode(ActionMode::Write).query_raw("SELECT 1 FROM users", &[]),
//!     "primary <- SELECT 1 FROM users"
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Registering a router without a primary is the only error the router itself
//! produces, and it is fatal:
//!
//! ```rust
//! # use dbresolver::{DataSource, Router, RouterConfig, ResolverError, Value};
//! # struct Conn;
//! # impl DataSource for Conn {
//! #     type Output = ();
//! #     type Model = ();
//! #     fn execute(&self, _: &str, _: &[Value]) {}
//! #     fn query_raw(&self, _: &str, _: &[Value]) {}
//! #     fn filter(&self, _: &str, _: &[Value]) {}
//! #     fn find(&self, _: &str, _: &[Value]) {}
//! #     fn first(&self, _: &str, _: &[Value]) {}
//! #     fn last(&self, _: &str, _: &[Value]) {}
//! #     fn take(&self, _: &str, _: &[Value]) {}
//! #     fn count(&self, _: &str, _: &[Value]) {}
//! #     fn save(&self, _: &()) {}
//! # }
//! let result = Router::register(RouterConfig::<Conn>::default());
//! assert!(matches!(result, Err(ResolverError::Configuration(_))));
//! ```
//!
//! ## Modules
//!
//! - [`resolver`] - Classifier, balancers, router and configuration
//! - [`hooks`] - Named single-subscriber event store
//!

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod hooks;
pub mod resolver;

// Re-exports for convenience
pub use resolver::{
    classify, is_mutating, StatementKind,
    ActionMode, ResolverSettings, RouterConfig, RouterConfigBuilder,
    ResolverError, ResolverResult,
    DataSource, Value,
};

pub use resolver::routing::{
    Balancer, RandomBalancer, RoundRobinBalancer, RoutingPolicy,
    ModeView, RouteEvent, RouteHooks, Router, RouterMetrics, SourceRole,
    EVENT_AFTER_SELECT, EVENT_BEFORE_QUERY_RUN, EVENT_BEFORE_SELECT,
};
