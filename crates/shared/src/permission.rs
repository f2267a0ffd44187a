//! Permission tokens
//!
//! Permissions are opaque strings compared by exact match. The single
//! exception is [`FULL_SYSTEM_ACCESS`], which satisfies every check.

/// Sentinel permission that satisfies any permission check.
pub const FULL_SYSTEM_ACCESS: &str = "full_system_access";

/// Manage user accounts and role assignments.
pub const USER_MANAGEMENT: &str = "user_management";

/// Read and write clinical data (encounters, vitals, notes).
pub const CLINICAL_ACCESS: &str = "clinical_access";

/// Create and sign prescriptions.
pub const PRESCRIPTION_RIGHTS: &str = "prescription_rights";

/// Dispense medication and manage pharmacy stock.
pub const PHARMACY_ACCESS: &str = "pharmacy_access";

/// Order lab work and enter results.
pub const LAB_ACCESS: &str = "lab_access";

/// Invoicing, payments and insurance claims.
pub const FINANCIAL_ACCESS: &str = "financial_access";

/// Schedule and reschedule appointments.
pub const APPOINTMENT_ACCESS: &str = "appointment_access";

/// View patient demographics and history.
pub const PATIENT_RECORDS: &str = "patient_records";

/// Start and join telemedicine sessions.
pub const TELEMEDICINE_ACCESS: &str = "telemedicine_access";

/// Practice-level reporting.
pub const REPORTS_ACCESS: &str = "reports_access";

/// Patient portal self-service.
pub const PORTAL_ACCESS: &str = "portal_access";

/// Check whether a held permission set grants `requested`.
///
/// A set grants a permission when it contains the token itself or the
/// [`FULL_SYSTEM_ACCESS`] sentinel.
pub fn grants(held: &[String], requested: &str) -> bool {
    held.iter()
        .any(|p| p == requested || p == FULL_SYSTEM_ACCESS)
}
