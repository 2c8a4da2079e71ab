//! Hierarchical-namespace path construction for the coordination service.
//!
//! The only externally visible artifact of the leader lock is its node path:
//! `<serviceRoot>/lock`, where the service root is a deterministic function of
//! the service name.

use crate::constants::{lock, paths};

/// Root path for a service's nodes in the coordination namespace.
pub fn service_root(service_name: &str) -> String {
    join(paths::NAMESPACE_ROOT, service_name)
}

/// Join two path segments, normalizing slashes at the boundary.
pub fn join(root: &str, child: &str) -> String {
    format!(
        "{}/{}",
        root.trim_end_matches('/'),
        child.trim_start_matches('/')
    )
}

/// Path of the leader-lock node for a service.
pub fn lock_path(service_name: &str) -> String {
    join(&service_root(service_name), lock::LOCK_PATH_NAME)
}
