//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the one subscriber the binary uses: structured `tracing`
//! output, filtered by `RUST_LOG`, in a compact format without module paths (the log
//! fields carry `resource`, `entity_type`, `kind` and `generation` instead).
//!
//! ```bash
//! # Page and backend milestones
//! RUST_LOG=info cargo run -p gym-buddy
//!
//! # Every reload, supersession and payload
//! RUST_LOG=debug cargo run -p gym-buddy
//!
//! # Only the synchronization core
//! RUST_LOG=resource_sync=debug cargo run -p gym-buddy
//! ```
//!
//! With `RUST_LOG=debug`, creating a user from the Users page reads like this:
//!
//! ```text
//! DEBUG Submitting create params=UserCreate { username: "alice", email: "alice@example.com" }
//! INFO Mutation issued kind=create resource="users"
//! DEBUG Create entity_type="User" params=UserCreate { .. }
//! INFO Created entity_type="User" id=1 size=1
//! INFO Mutation succeeded kind=create resource="users"
//! DEBUG Reload issued resource="users" generation=2
//! INFO Load succeeded resource="users" generation=2
//! ```

/// Initializes the global subscriber. Call once, at the top of `main`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
