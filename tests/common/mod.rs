//! Shared helpers for integration tests

/// Installs `env_logger` once; later calls are no-ops. Honours `RUST_LOG`.
pub fn init_logging() {
    drop(env_logger::builder().is_test(true).try_init());
}
