//! praxis check command

use access::AccessRequirements;
use clap::Args;
use console::style;
use session::SessionContext;
use shared::{Actor, RoleNotFoundError, SessionConfig};

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Actor role name
    #[arg(short, long)]
    pub role: String,

    /// Permissions gating the route (any-match by default)
    #[arg(required = true)]
    pub permissions: Vec<String>,

    /// Require every listed permission instead of any
    #[arg(long)]
    pub all: bool,

    /// Extra permission attached directly to the actor (repeatable)
    #[arg(long = "grant", value_name = "PERMISSION")]
    pub grants: Vec<String>,

    /// Role the gate additionally requires (repeatable)
    #[arg(long = "require-role", value_name = "ROLE")]
    pub required_roles: Vec<String>,
}

impl CheckCommand {
    pub fn run(&self, config: SessionConfig, json: bool) -> anyhow::Result<()> {
        let mut session = SessionContext::new(config);

        if !session.policy().matrix().has_role(&self.role) {
            return Err(RoleNotFoundError {
                role_name: self.role.clone(),
                available_roles: session
                    .policy()
                    .matrix()
                    .names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            }
            .into());
        }

        let actor = Actor::new("cli", &self.role).with_permissions(self.grants.clone());

        let decision = if self.all {
            let missing: Vec<&String> = self
                .permissions
                .iter()
                .filter(|p| !session.policy().has_permission(&actor, p))
                .collect();
            if missing.is_empty() {
                access::AccessDecision::granted()
            } else {
                access::AccessDecision::denied(format!(
                    "role '{}' is missing required permissions: {}",
                    actor.role,
                    missing
                        .iter()
                        .map(|s| s.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            }
        } else {
            let requirements = AccessRequirements::none()
                .require_permissions(self.permissions.clone())
                .require_roles(self.required_roles.clone());
            session.authorize(&actor, &requirements)
        };

        if json {
            println!("{}", serde_json::to_string_pretty(&decision)?);
            return Ok(());
        }

        if decision.is_allowed() {
            println!("{}", style("GRANTED").green().bold());
        } else {
            println!("{}", style("DENIED").red().bold());
            if let Some(reason) = &decision.reason {
                println!("  {}", reason);
            }
        }

        Ok(())
    }
}
