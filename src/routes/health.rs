//! Health check endpoint for container orchestration.

/// Liveness probe. Returns "ok" whenever the process can answer HTTP,
/// even if some data tables failed to load.
pub async fn health() -> &'static str {
    "ok"
}
