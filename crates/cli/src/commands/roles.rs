//! praxis roles command

use access::RoleMatrix;
use clap::Args;
use console::style;
use shared::SessionConfig;

#[derive(Debug, Args)]
pub struct RolesCommand {
    /// Show only this role
    #[arg(short, long)]
    pub role: Option<String>,
}

impl RolesCommand {
    pub fn run(&self, config: SessionConfig, json: bool) -> anyhow::Result<()> {
        let matrix = RoleMatrix::builtin().with_extra_roles(config.extra_roles);

        let names: Vec<&str> = match &self.role {
            Some(name) => {
                if !matrix.has_role(name) {
                    return Err(shared::RoleNotFoundError {
                        role_name: name.clone(),
                        available_roles: matrix.names().iter().map(|s| s.to_string()).collect(),
                    }
                    .into());
                }
                vec![name.as_str()]
            }
            None => matrix.names(),
        };

        if json {
            let roles: Vec<_> = names.iter().filter_map(|n| matrix.get(n)).collect();
            println!("{}", serde_json::to_string_pretty(&roles)?);
            return Ok(());
        }

        for name in names {
            let Some(role) = matrix.get(name) else {
                continue;
            };
            println!(
                "{} {}",
                style(&role.display_name).bold(),
                style(format!("({})", role.name)).dim()
            );
            if !role.description.is_empty() {
                println!("  {}", role.description);
            }
            if role.permissions.is_empty() {
                println!("  {}", style("no permissions").dim());
            } else {
                println!("  {}", role.permissions.join(", "));
            }
            println!();
        }

        Ok(())
    }
}
