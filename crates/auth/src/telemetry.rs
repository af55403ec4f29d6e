//! Telemetry seam: the gate reports who authenticated, something else
//! decides what to do with it.

use eventcrm_core::EmployeeId;

/// Sink for identity-resolution events.
pub trait TelemetrySink {
    /// Called once per invocation after an identity resolves successfully.
    fn attach_identity(&self, id: EmployeeId, username: &str);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetry;

impl TelemetrySink for NoopTelemetry {
    fn attach_identity(&self, _id: EmployeeId, _username: &str) {}
}
