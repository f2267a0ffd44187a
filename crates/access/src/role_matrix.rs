//! RoleMatrix - builtin clinical roles and the management hierarchy

use shared::permission::{
    APPOINTMENT_ACCESS, CLINICAL_ACCESS, FINANCIAL_ACCESS, FULL_SYSTEM_ACCESS, LAB_ACCESS,
    PATIENT_RECORDS, PHARMACY_ACCESS, PORTAL_ACCESS, PRESCRIPTION_RIGHTS, REPORTS_ACCESS,
    TELEMEDICINE_ACCESS, USER_MANAGEMENT,
};
use shared::RoleDefinition;
use std::collections::HashMap;

/// Fixed management order, most privileged first.
///
/// A role may administratively manage another only strictly downward in
/// this order. Custom roles registered from config never join it.
pub const ROLE_HIERARCHY: [&str; 9] = [
    "super_admin",
    "admin",
    "doctor",
    "pharmacist",
    "nurse",
    "lab_tech",
    "billing",
    "receptionist",
    "user",
];

/// The role table for a session.
///
/// Built once at composition time from the builtin clinical matrix plus
/// any extra roles from config; immutable afterwards.
#[derive(Debug, Clone)]
pub struct RoleMatrix {
    roles: HashMap<String, RoleDefinition>,
}

impl RoleMatrix {
    /// The builtin clinical role matrix
    pub fn builtin() -> Self {
        let defs = vec![
            RoleDefinition::new("super_admin", "SuperAdmin")
                .with_description("Unrestricted system access")
                .with_permissions(vec![FULL_SYSTEM_ACCESS.to_string()]),
            RoleDefinition::new("admin", "Admin")
                .with_description("Practice administration")
                .with_permissions(vec![
                    USER_MANAGEMENT.to_string(),
                    CLINICAL_ACCESS.to_string(),
                    FINANCIAL_ACCESS.to_string(),
                    APPOINTMENT_ACCESS.to_string(),
                    PATIENT_RECORDS.to_string(),
                    REPORTS_ACCESS.to_string(),
                ]),
            RoleDefinition::new("doctor", "Doctor")
                .with_description("Treating physician")
                .with_permissions(vec![
                    CLINICAL_ACCESS.to_string(),
                    PRESCRIPTION_RIGHTS.to_string(),
                    PATIENT_RECORDS.to_string(),
                    LAB_ACCESS.to_string(),
                    APPOINTMENT_ACCESS.to_string(),
                    TELEMEDICINE_ACCESS.to_string(),
                ]),
            RoleDefinition::new("pharmacist", "Pharmacist")
                .with_description("Dispensing and medication review")
                .with_permissions(vec![
                    PHARMACY_ACCESS.to_string(),
                    PRESCRIPTION_RIGHTS.to_string(),
                    PATIENT_RECORDS.to_string(),
                ]),
            RoleDefinition::new("nurse", "Nurse")
                .with_description("Nursing staff")
                .with_permissions(vec![
                    CLINICAL_ACCESS.to_string(),
                    PATIENT_RECORDS.to_string(),
                    APPOINTMENT_ACCESS.to_string(),
                    LAB_ACCESS.to_string(),
                ]),
            RoleDefinition::new("lab_tech", "LabTech")
                .with_description("Laboratory technician")
                .with_permissions(vec![LAB_ACCESS.to_string(), PATIENT_RECORDS.to_string()]),
            RoleDefinition::new("billing", "Billing")
                .with_description("Billing and claims")
                .with_permissions(vec![
                    FINANCIAL_ACCESS.to_string(),
                    REPORTS_ACCESS.to_string(),
                    PATIENT_RECORDS.to_string(),
                ]),
            RoleDefinition::new("receptionist", "Receptionist")
                .with_description("Front desk")
                .with_permissions(vec![
                    APPOINTMENT_ACCESS.to_string(),
                    PATIENT_RECORDS.to_string(),
                    PORTAL_ACCESS.to_string(),
                ]),
            RoleDefinition::new("user", "User")
                .with_description("Patient portal account")
                .with_permissions(vec![PORTAL_ACCESS.to_string()]),
        ];

        let mut roles = HashMap::new();
        for def in defs {
            roles.insert(def.name.clone(), def);
        }
        Self { roles }
    }

    /// Builtin matrix extended with extra role definitions.
    ///
    /// An extra role sharing a builtin name replaces it.
    pub fn with_extra_roles(mut self, extra: impl IntoIterator<Item = RoleDefinition>) -> Self {
        for def in extra {
            self.roles.insert(def.name.clone(), def);
        }
        self
    }

    /// Get a role by name
    pub fn get(&self, name: &str) -> Option<&RoleDefinition> {
        self.roles.get(name)
    }

    /// Check if a role exists
    pub fn has_role(&self, name: &str) -> bool {
        self.roles.contains_key(name)
    }

    /// All role names, hierarchy members first in order, then custom roles
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = ROLE_HIERARCHY
            .iter()
            .copied()
            .filter(|n| self.roles.contains_key(*n))
            .collect();

        let mut custom: Vec<&str> = self
            .roles
            .keys()
            .map(|s| s.as_str())
            .filter(|n| !ROLE_HIERARCHY.contains(n))
            .collect();
        custom.sort_unstable();
        names.extend(custom);
        names
    }

    /// Permission list for a role; empty for unknown names
    pub fn role_permissions(&self, name: &str) -> &[String] {
        self.roles
            .get(name)
            .map(|r| r.permissions.as_slice())
            .unwrap_or(&[])
    }

    /// Position of a role in the management hierarchy (0 = most privileged)
    pub fn hierarchy_position(name: &str) -> Option<usize> {
        ROLE_HIERARCHY.iter().position(|r| *r == name)
    }

    /// Whether `manager` may administratively manage `target`.
    ///
    /// True iff `manager` appears strictly before `target` in the fixed
    /// hierarchy. Equal, reversed or unknown names are all false.
    pub fn can_manage_role(manager: &str, target: &str) -> bool {
        match (
            Self::hierarchy_position(manager),
            Self::hierarchy_position(target),
        ) {
            (Some(m), Some(t)) => m < t,
            _ => false,
        }
    }
}

impl Default for RoleMatrix {
    fn default() -> Self {
        Self::builtin()
    }
}
