//! praxis manage command

use access::{RoleMatrix, ROLE_HIERARCHY};
use clap::Args;
use console::style;

#[derive(Debug, Args)]
pub struct ManageCommand {
    /// Managing role
    pub manager: String,

    /// Role being managed
    pub target: String,
}

impl ManageCommand {
    pub fn run(&self, json: bool) -> anyhow::Result<()> {
        let allowed = RoleMatrix::can_manage_role(&self.manager, &self.target);

        if json {
            println!(
                "{}",
                serde_json::json!({
                    "manager": self.manager,
                    "target": self.target,
                    "allowed": allowed,
                })
            );
            return Ok(());
        }

        if allowed {
            println!(
                "{} '{}' may manage '{}'",
                style("YES").green().bold(),
                self.manager,
                self.target
            );
        } else {
            println!(
                "{} '{}' may not manage '{}'",
                style("NO").red().bold(),
                self.manager,
                self.target
            );
            if RoleMatrix::hierarchy_position(&self.manager).is_none() {
                println!(
                    "  '{}' is not in the management hierarchy ({})",
                    self.manager,
                    ROLE_HIERARCHY.join(" > ")
                );
            }
        }

        Ok(())
    }
}
