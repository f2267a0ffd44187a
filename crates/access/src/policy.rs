//! AccessPolicy - effective-permission evaluation and route gating

use serde::{Deserialize, Serialize};
use shared::{permission, Actor};
use std::collections::HashSet;

use crate::role_matrix::RoleMatrix;

/// Requirements attached to a route or action.
///
/// Both lists are optional. The permission list is any-match; the role
/// list is literal-match. When both are declared, both must pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRequirements {
    /// Permissions, at least one of which the actor must hold
    #[serde(default)]
    pub permissions: Vec<String>,

    /// Role names, one of which must be the actor's role
    #[serde(default)]
    pub roles: Vec<String>,
}

impl AccessRequirements {
    /// No requirements; every actor passes
    pub fn none() -> Self {
        Self::default()
    }

    /// Builder: require any of the given permissions
    pub fn require_permissions(mut self, permissions: Vec<String>) -> Self {
        self.permissions = permissions;
        self
    }

    /// Builder: require one of the given roles
    pub fn require_roles(mut self, roles: Vec<String>) -> Self {
        self.roles = roles;
        self
    }

    /// Whether nothing is declared
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty() && self.roles.is_empty()
    }
}

/// Outcome of an access check. Denial is a value, never an error; callers
/// render a fallback view or surface the reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessDecision {
    pub allowed: bool,
    pub reason: Option<String>,
}

impl AccessDecision {
    /// An allowing decision
    pub fn granted() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    /// A denying decision with a reason
    pub fn denied(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    pub fn is_denied(&self) -> bool {
        !self.allowed
    }
}

/// Permission evaluator over a role matrix.
///
/// All checks are pure functions of the actor and the matrix; state never
/// changes after construction.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    matrix: RoleMatrix,
}

impl AccessPolicy {
    /// Create a policy over the given matrix
    pub fn new(matrix: RoleMatrix) -> Self {
        Self { matrix }
    }

    /// The underlying role matrix
    pub fn matrix(&self) -> &RoleMatrix {
        &self.matrix
    }

    /// The actor's effective permission set: role permissions united with
    /// explicitly attached ones. Unknown roles contribute nothing.
    pub fn effective_permissions(&self, actor: &Actor) -> HashSet<String> {
        let mut set: HashSet<String> = self
            .matrix
            .role_permissions(&actor.role)
            .iter()
            .cloned()
            .collect();
        set.extend(actor.permissions.iter().cloned());
        set
    }

    /// Whether the actor's effective set grants `requested`, counting the
    /// `full_system_access` sentinel from either side of the union.
    pub fn has_permission(&self, actor: &Actor, requested: &str) -> bool {
        permission::grants(&actor.permissions, requested)
            || self
                .matrix
                .get(&actor.role)
                .map(|role| role.grants(requested))
                .unwrap_or(false)
    }

    /// Whether at least one requested permission is granted
    pub fn has_any_permission(&self, actor: &Actor, requested: &[String]) -> bool {
        requested.iter().any(|p| self.has_permission(actor, p))
    }

    /// Whether every requested permission is granted
    pub fn has_all_permissions(&self, actor: &Actor, requested: &[String]) -> bool {
        requested.iter().all(|p| self.has_permission(actor, p))
    }

    /// Evaluate declared requirements against an actor.
    ///
    /// Undeclared requirements allow. A declared permission list passes on
    /// any match; a declared role list passes on literal membership; when
    /// both are declared, both must pass.
    pub fn check_access(&self, actor: &Actor, requirements: &AccessRequirements) -> AccessDecision {
        if requirements.is_empty() {
            return AccessDecision::granted();
        }

        if !requirements.permissions.is_empty()
            && !self.has_any_permission(actor, &requirements.permissions)
        {
            return AccessDecision::denied(format!(
                "role '{}' holds none of the required permissions: {}",
                actor.role,
                requirements.permissions.join(", ")
            ));
        }

        if !requirements.roles.is_empty() && !requirements.roles.iter().any(|r| *r == actor.role) {
            return AccessDecision::denied(format!(
                "role '{}' is not one of the required roles: {}",
                actor.role,
                requirements.roles.join(", ")
            ));
        }

        AccessDecision::granted()
    }
}
