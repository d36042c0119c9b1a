//! Shell state, dispatch and error reporting.

use std::io;

use dialoguer::{theme::ColorfulTheme, Password};
use strsim::levenshtein;
use tally_config::{default_base_dir, Config, ConfigManager};
use tally_core::catalog::catalog;
use tally_domain::Locale;

use crate::{
    dashboard::Dashboard,
    errors::{CliError, TallyError},
};

use super::commands::{self, CommandDefinition, CommandRegistry};
use super::output;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Not logged in. Use `login <tenant>` first.")]
    NotLoggedIn,
    /// Carries the usage line of the command that rejected its arguments.
    #[error("Invalid arguments. Usage: {0}")]
    InvalidArguments(String),
    #[error("A password is required in script mode")]
    SecretRequired,
    #[error(transparent)]
    Core(#[from] TallyError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

pub type CommandResult = Result<(), CommandError>;

impl CommandError {
    /// Message for the shell user in `locale`. I/O and encoding failures stay in English.
    pub fn localized(&self, locale: Locale) -> String {
        let messages = catalog(locale);
        match self {
            CommandError::NotLoggedIn => messages.not_logged_in.to_string(),
            CommandError::InvalidArguments(usage) => messages.invalid_arguments(usage),
            CommandError::SecretRequired => messages.secret_required.to_string(),
            CommandError::Core(err) => err.localized(locale),
            other => other.to_string(),
        }
    }
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub dashboard: Dashboard,
    pub config_manager: Option<ConfigManager>,
    pub config: Config,
    pub session: Option<String>,
    pub locale: Locale,
    pub running: bool,
}

impl ShellContext {
    /// Opens the installation under `TALLY_HOME` (or `~/.tally`).
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let manager = ConfigManager::with_base_dir(default_base_dir())?;
        let config = manager.load()?;
        let dashboard = Dashboard::open(&manager, &config)?;
        let mut context = Self::with_dashboard(mode, dashboard, config);
        context.config_manager = Some(manager);
        Ok(context)
    }

    /// Builds a shell around an already wired dashboard. Locale changes are not persisted.
    pub fn with_dashboard(mode: CliMode, dashboard: Dashboard, config: Config) -> Self {
        Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            theme: ColorfulTheme::default(),
            dashboard,
            locale: config.locale(),
            config,
            config_manager: None,
            session: None,
            running: true,
        }
    }

    pub fn prompt(&self) -> String {
        match &self.session {
            Some(tenant) => format!("tally[{tenant}]> "),
            None => "tally> ".to_string(),
        }
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.registry.get(name)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(definition) = self.registry.get(command) {
            let handler = definition.handler;
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        super::shell::handle_line(self, line)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        let messages = catalog(self.locale);
        output::warning(messages.unknown_command(input));

        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, input), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                output::info(messages.suggestion(best));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(_) => {
                output::error(err.localized(self.locale));
                output::info(catalog(self.locale).help_hint);
                Ok(())
            }
            CommandError::Core(ref core) => {
                tracing::debug!(error = %core, "command failed");
                output::error(err.localized(self.locale));
                Ok(())
            }
            other => {
                output::error(other.localized(self.locale));
                Ok(())
            }
        }
    }

    /// Tenant id of the active session.
    pub(crate) fn require_session(&self) -> Result<String, CommandError> {
        self.session.clone().ok_or(CommandError::NotLoggedIn)
    }

    /// Reads a secret from `args[index]`, prompting for it in interactive mode.
    pub(crate) fn secret_arg(
        &self,
        args: &[&str],
        index: usize,
        label: &str,
    ) -> Result<String, CommandError> {
        if let Some(value) = args.get(index) {
            return Ok((*value).to_string());
        }
        match self.mode {
            CliMode::Interactive => Password::with_theme(&self.theme)
                .with_prompt(label)
                .interact()
                .map_err(CommandError::from),
            CliMode::Script => Err(CommandError::SecretRequired),
        }
    }

    pub(crate) fn set_locale(&mut self, locale: Locale) -> CommandResult {
        self.locale = locale;
        self.config.locale = locale.code().to_string();
        if let Some(manager) = &self.config_manager {
            manager.save(&self.config).map_err(TallyError::from)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDateTime;
    use tally_core::{
        hash_password,
        storage::{LedgerStorage, MemoryLedgerStorage, MemoryTenantDirectory},
        FixedClock,
    };
    use tally_domain::{Tenant, Tier};

    use super::*;

    struct SharedLedgers(Arc<MemoryLedgerStorage>);

    impl LedgerStorage for SharedLedgers {
        fn ensure(&self, ledger: &str) -> Result<(), tally_core::CoreError> {
            self.0.ensure(ledger)
        }

        fn read_all(&self, ledger: &str) -> Result<Vec<tally_domain::Entry>, tally_core::CoreError> {
            self.0.read_all(ledger)
        }

        fn append(
            &self,
            ledger: &str,
            entry: &tally_domain::Entry,
        ) -> Result<(), tally_core::CoreError> {
            self.0.append(ledger, entry)
        }
    }

    fn shell() -> (ShellContext, Arc<MemoryLedgerStorage>) {
        let ledgers = Arc::new(MemoryLedgerStorage::new());
        let tenants = MemoryTenantDirectory::new([Tenant::new(
            "cafe3",
            hash_password("1234").unwrap(),
            Tier::Basic,
        )]);
        let now = NaiveDateTime::parse_from_str("2024-05-10 09:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let dashboard = Dashboard::new(
            Box::new(SharedLedgers(Arc::clone(&ledgers))),
            Box::new(tenants),
            Box::new(FixedClock(now)),
        );
        (
            ShellContext::with_dashboard(CliMode::Script, dashboard, Config::default()),
            ledgers,
        )
    }

    #[test]
    fn add_requires_a_session() {
        let (mut context, _) = shell();
        assert!(matches!(
            context.process_line("add 10"),
            Err(CommandError::NotLoggedIn)
        ));
    }

    #[test]
    fn login_add_and_quota_flow() {
        let (mut context, ledgers) = shell();
        context.process_line("login cafe3 1234").unwrap();
        assert_eq!(context.session.as_deref(), Some("cafe3"));
        assert_eq!(context.prompt(), "tally[cafe3]> ");

        context.process_line("add 25.5 \"morning rush\"").unwrap();
        let entries = ledgers.read_all("cafe3").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].note, "morning rush");
        assert_eq!(entries[0].time.as_deref(), Some("09:30"));

        assert!(matches!(
            context.process_line("add 3"),
            Err(CommandError::Core(TallyError::QuotaExceeded { .. }))
        ));
        assert_eq!(ledgers.read_all("cafe3").unwrap().len(), 1);
    }

    #[test]
    fn failed_login_keeps_session_closed() {
        let (mut context, _) = shell();
        let err = context.process_line("login cafe3 nope").unwrap_err();
        assert!(matches!(
            err,
            CommandError::Core(TallyError::InvalidCredentials)
        ));
        assert!(context.session.is_none());
    }

    #[test]
    fn lang_switches_locale_without_manager() {
        let (mut context, _) = shell();
        assert_eq!(context.locale, Locale::Ar);
        context.process_line("lang en").unwrap();
        assert_eq!(context.locale, Locale::En);
        assert_eq!(context.config.locale, "en");
    }

    #[test]
    fn exit_stops_the_loop() {
        let (mut context, _) = shell();
        assert_eq!(context.process_line("exit").unwrap(), LoopControl::Exit);
        assert!(!context.running);
    }

    #[test]
    fn command_errors_follow_the_shell_locale() {
        let (mut context, _) = shell();
        let err = context.process_line("add 10").unwrap_err();
        assert_eq!(err.localized(Locale::Ar), "سجّل الدخول أولاً (login <tenant>)");
        assert_eq!(
            err.localized(Locale::En),
            "Not logged in. Use `login <tenant>` first."
        );

        let err = context.process_line("login").unwrap_err();
        assert_eq!(
            err.localized(Locale::Ar),
            "مدخلات غير صحيحة. الاستخدام: login <tenant> [password]"
        );

        let err = context.process_line("login cafe3").unwrap_err();
        assert!(matches!(err, CommandError::SecretRequired));
        assert_eq!(err.localized(Locale::Ar), "كلمة المرور مطلوبة في وضع السكربت");
    }

    #[test]
    fn unknown_commands_are_not_errors() {
        let (mut context, _) = shell();
        assert_eq!(
            context.process_line("dashbord").unwrap(),
            LoopControl::Continue
        );
    }
}
