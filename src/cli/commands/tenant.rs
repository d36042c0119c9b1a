use tally_core::catalog::catalog;
use tally_domain::Tier;

use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;

use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "tenant-add",
            "Register a tenant with its own ledger",
            "tenant-add <tenant> <basic|gold|platinum> [password]",
            cmd_tenant_add,
        ),
        CommandDefinition::new("tenants", "List registered tenants", "tenants", cmd_tenants),
    ]
}

fn cmd_tenant_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (Some(id), Some(tier)) = (args.first(), args.get(1)) else {
        return Err(CommandError::InvalidArguments(
            "tenant-add <tenant> <basic|gold|platinum> [password]".into(),
        ));
    };
    let messages = catalog(context.locale);
    let tier = Tier::from_str(tier);
    if !tier.is_known() {
        output::warning(messages.unknown_tier(&tier));
    }
    let password = context.secret_arg(args, 2, messages.password_prompt)?;
    let tenant = context.dashboard.register_tenant(id, &password, tier)?;
    output::success(messages.tenant_registered(&tenant));
    Ok(())
}

fn cmd_tenants(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let ids = context.dashboard.tenant_ids()?;
    if ids.is_empty() {
        output::info(catalog(context.locale).no_tenants);
        return Ok(());
    }
    for id in ids {
        let tenant = context.dashboard.tenant(&id)?;
        let marker = if context.session.as_deref() == Some(id.as_str()) {
            "*"
        } else {
            " "
        };
        output::raw(format!("{marker} {:<20} {}", tenant.id, tenant.tier));
    }
    Ok(())
}
