use tally_core::catalog::catalog;
use tally_domain::Locale;

use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::errors::TallyError;

use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "login",
            "Open a tenant session",
            "login <tenant> [password]",
            cmd_login,
        ),
        CommandDefinition::new("logout", "Close the current session", "logout", cmd_logout),
        CommandDefinition::new(
            "passwd",
            "Change the session tenant's password",
            "passwd [old new]",
            cmd_passwd,
        ),
        CommandDefinition::new("lang", "Show or switch the language", "lang [ar|en]", cmd_lang),
    ]
}

fn cmd_login(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(id) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "login <tenant> [password]".into(),
        ));
    };
    let password = context.secret_arg(args, 1, catalog(context.locale).password_prompt)?;
    let tenant = context.dashboard.login(id, &password)?;
    let quota = context.dashboard.quota_status(&tenant.id)?;
    let messages = catalog(context.locale);

    output::success(format!("{}, {}", messages.logged_in, tenant.id));
    output::info(messages.plan_status(&tenant.tier, &quota));
    context.session = Some(tenant.id);
    Ok(())
}

fn cmd_logout(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.session.take().is_none() {
        return Err(CommandError::NotLoggedIn);
    }
    output::info(catalog(context.locale).logged_out);
    Ok(())
}

fn cmd_passwd(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let tenant = context.require_session()?;
    let messages = catalog(context.locale);
    let old_password = context.secret_arg(args, 0, messages.current_password_prompt)?;
    let new_password = context.secret_arg(args, 1, messages.new_password_prompt)?;

    match context
        .dashboard
        .change_password(&tenant, &old_password, &new_password)
    {
        Ok(()) => {
            output::success(messages.password_changed);
            Ok(())
        }
        Err(TallyError::InvalidCredentials) => {
            output::error(messages.wrong_old_password);
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn cmd_lang(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(code) = args.first() else {
        output::info(catalog(context.locale).language_set(context.locale));
        return Ok(());
    };
    let wanted = code.trim().to_ascii_lowercase();
    let Some(locale) = Locale::ALL.into_iter().find(|locale| locale.code() == wanted) else {
        let known: Vec<_> = Locale::ALL.iter().map(|locale| locale.code()).collect();
        return Err(CommandError::InvalidArguments(format!(
            "lang [{}]",
            known.join("|")
        )));
    };
    context.set_locale(locale)?;
    output::success(catalog(locale).language_set(locale));
    Ok(())
}
