//! System-level utilities: metrics and health reporting

pub mod metrics;

/// Health checks
pub mod health {
    use serde::Serialize;

    /// Liveness report returned by `/health`
    #[derive(Debug, Clone, Serialize)]
    pub struct HealthStatus {
        /// Always `healthy` while the process is serving
        pub status: &'static str,
        /// Crate version
        pub version: &'static str,
        /// Business listings held in memory
        pub businesses: usize,
        /// Help requests held in memory
        pub help_requests: usize,
    }
}
