use std::{fs, path::Path, sync::mpsc, thread, time::Duration};

use anyhow::{bail, Context, Result};

use crate::{
    cli::{Cli, Command},
    domain::{
        self,
        dispatch::{BatchSnapshot, SendStatus},
    },
    gateway::{self, HttpGateway},
    infra::{self, contracts::CredentialStore, error::AppError, session::FileSessionStore},
    usecases::{
        self, bootstrap,
        dispatch_batch::{dispatch_batch, DispatchBatchCommand, DispatchError},
        load_messages::load_messages,
        login::{login, LoginCommand, LoginError},
        logout::logout,
        progress::{ProgressTracker, SendingFlag},
        refresh_balance::refresh_balances,
    },
};

pub fn run(cli: Cli) -> Result<()> {
    let context = bootstrap::bootstrap(cli.config.as_deref())?;
    tracing::debug!(
        domain = domain::module_name(),
        gateway = gateway::module_name(),
        usecases = usecases::module_name(),
        infra = infra::module_name(),
        "module boundaries loaded"
    );

    let timeout = Duration::from_millis(context.config.gateway.timeout_ms);
    let base_url = context.config.gateway.base_url.clone();

    match cli.command {
        Command::Login { username, password } => {
            let backend = HttpGateway::anonymous(&base_url, timeout)?;
            let mut store = FileSessionStore::open()?;

            let outcome = login(&backend, &mut store, LoginCommand { username, password })
                .map_err(describe_login_error)?;

            tracing::info!(username = %outcome.username, "login succeeded");
            println!(
                "Logged in as {}. {} sender identities available.",
                outcome.username, outcome.sender_count
            );
        }
        Command::Logout => {
            let mut store = FileSessionStore::open()?;
            let outcome = logout(&mut store)?;

            tracing::info!(
                session_removed = outcome.session_removed,
                "logout completed"
            );
            println!("Logged out. Session state is cleared.");
        }
        Command::Send {
            sender,
            country,
            message,
            recipients,
            recipients_file,
        } => {
            let mut store = FileSessionStore::open()?;
            let token = store.current_token().ok_or(AppError::NotLoggedIn)?;
            let gateway = HttpGateway::new(&base_url, timeout, Some(token))?;

            let raw_recipients = resolve_recipients(recipients, recipients_file.as_deref())?;

            let tracker = ProgressTracker::new();
            install_interrupt_guard(tracker.sending_flag());

            let progress = tracker.subscribe();
            let printer = thread::spawn(move || print_progress(progress));

            let result = dispatch_batch(
                &gateway,
                &gateway,
                &mut store,
                &tracker,
                DispatchBatchCommand {
                    sender_id: sender,
                    country_code: country,
                    message,
                    raw_recipients,
                },
            );

            drop(tracker);
            let _ = printer.join();

            let outcome = result.map_err(describe_dispatch_error)?;

            println!(
                "Batch complete: {} sent, {} failed out of {}.",
                outcome.sent_count(),
                outcome.failed_count(),
                outcome.recipients.len()
            );
            for (recipient, status) in outcome.recipients.iter().zip(&outcome.statuses) {
                if *status == SendStatus::Failed {
                    println!("  failed: {recipient}");
                }
            }
            match outcome.history {
                Some(history) => {
                    tracing::info!(messages = history.len(), "message history refreshed")
                }
                None => println!("Note: history refresh failed; the listing may be stale."),
            }
        }
        Command::Messages => {
            let store = FileSessionStore::open()?;
            let token = store.current_token().ok_or(AppError::NotLoggedIn)?;
            let gateway = HttpGateway::new(&base_url, timeout, Some(token))?;

            let output = match load_messages(&gateway) {
                Ok(output) => output,
                Err(error) => bail!("failed to load messages: {error:?}"),
            };

            if output.messages.is_empty() {
                println!("No messages yet.");
            }
            for record in &output.messages {
                println!(
                    "{}  sender {:>6}  {:<10}  {} | {}",
                    format_timestamp(&record.created_at),
                    record.sender_id,
                    record.status,
                    record.recipients,
                    record.message
                );
            }
        }
        Command::Balance => {
            let mut store = FileSessionStore::open()?;
            let token = store.current_token().ok_or(AppError::NotLoggedIn)?;
            let gateway = HttpGateway::new(&base_url, timeout, Some(token))?;

            let output = match refresh_balances(&gateway, &mut store) {
                Ok(output) => output,
                Err(error) => bail!("failed to refresh balances: {error:?}"),
            };

            if output.sender_ids.is_empty() {
                println!("No sender identities on this account.");
            }
            for identity in &output.sender_ids {
                let marker = if identity.is_active { "" } else { " (inactive)" };
                println!(
                    "{} (id {}): balance {}{marker}",
                    identity.name, identity.id, identity.balance
                );
            }
        }
    }

    Ok(())
}

fn resolve_recipients(inline: Option<String>, file: Option<&Path>) -> Result<String> {
    match (inline, file) {
        (Some(raw), None) => Ok(raw),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("failed to read recipients file {}", path.display())),
        (Some(_), Some(_)) => bail!("pass either --recipients or --recipients-file, not both"),
        (None, None) => bail!("recipients are required: pass --recipients or --recipients-file"),
    }
}

/// While a batch is in flight an interrupt only warns; completed sends
/// cannot be rolled back and the loop is left to finish.
fn install_interrupt_guard(flag: SendingFlag) {
    let result = ctrlc::set_handler(move || {
        if flag.is_sending() {
            eprintln!("interrupt ignored: a batch is in flight and will run to completion");
        } else {
            std::process::exit(130);
        }
    });

    if let Err(error) = result {
        tracing::warn!(error = %error, "could not install interrupt guard");
    }
}

fn print_progress(progress: mpsc::Receiver<BatchSnapshot>) {
    let mut last: Vec<SendStatus> = Vec::new();
    while let Ok(snapshot) = progress.recv() {
        for (index, status) in snapshot.statuses.iter().enumerate() {
            let previous = last.get(index).copied().unwrap_or(SendStatus::Pending);
            if *status != previous && *status != SendStatus::Pending {
                println!(
                    "[{}/{}] {} {}",
                    index + 1,
                    snapshot.statuses.len(),
                    snapshot.recipients[index],
                    transition_label(*status)
                );
            }
        }
        last = snapshot.statuses.clone();
    }
}

fn transition_label(status: SendStatus) -> &'static str {
    match status {
        SendStatus::Pending => "pending",
        SendStatus::Sending => "sending...",
        SendStatus::Sent => "sent",
        SendStatus::Failed => "FAILED",
    }
}

fn format_timestamp(raw: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(raw) {
        Ok(timestamp) => timestamp
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        Err(_) => raw.to_owned(),
    }
}

fn describe_login_error(error: LoginError) -> anyhow::Error {
    let message = match error {
        LoginError::EmptyUsername => "username must not be empty",
        LoginError::EmptyPassword => "password must not be empty",
        LoginError::InvalidCredentials => "login rejected: invalid username or password",
        LoginError::TemporarilyUnavailable => "gateway is unreachable, try again later",
        LoginError::DataContractViolation => "gateway returned an unexpected login payload",
        LoginError::SessionPersist => "login succeeded but the session could not be saved",
    };
    anyhow::anyhow!("{message}")
}

fn describe_dispatch_error(error: DispatchError) -> anyhow::Error {
    let message = match error {
        DispatchError::EmptyMessage => "message body is empty; nothing was sent",
        DispatchError::NoRecipients => "no recipients left after normalization; nothing was sent",
    };
    anyhow::anyhow!("{message}")
}
