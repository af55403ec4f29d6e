//! Tracing-backed telemetry sink.

use eventcrm_auth::TelemetrySink;
use eventcrm_core::EmployeeId;

/// Records the resolved identity on the invocation's log stream.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTelemetry;

impl TelemetrySink for TracingTelemetry {
    fn attach_identity(&self, id: EmployeeId, username: &str) {
        tracing::info!(employee_id = %id, employee_username = username, "identity resolved");
    }
}
