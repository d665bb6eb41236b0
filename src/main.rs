//! Application entry point — terminal translation session.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Build the [`HttpGateway`] from config.
//! 4. Build the language catalog from the engine's enumeration.
//! 5. Create the [`TranslationSession`] and spawn the event printer.
//! 6. Read commands from stdin until `:quit` or end of input.
//!
//! # Commands
//!
//! | Input          | Effect                              |
//! |----------------|-------------------------------------|
//! | `:langs`       | list the language catalog           |
//! | `:from <code>` | select the source language          |
//! | `:to <code>`   | select the destination language     |
//! | `:swap`        | swap source and destination         |
//! | `:quit`        | exit                                |
//! | anything else  | translate the line                  |
//!
//! `:from` or `:to` without a code prints a usage line instead of being
//! translated.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, Notify};

use lingo_session::{
    app::TranslationSession,
    catalog::LanguageCatalog,
    config::AppConfig,
    engine::{HttpGateway, TranslationEngineGateway},
    orchestrator::{RequestOutcome, SessionEvent, SubmitStatus},
};

// ---------------------------------------------------------------------------
// Event printer
// ---------------------------------------------------------------------------

/// Render session events for the terminal until the channel closes.
///
/// `settled` is notified after every result.
async fn print_events(
    mut events: mpsc::UnboundedReceiver<SessionEvent>,
    settled: Arc<Notify>,
) {
    while let Some(event) = events.recv().await {
        match event {
            SessionEvent::Progress(stage) => println!("… {}", stage.message()),
            SessionEvent::Result(outcome) => {
                if outcome.is_success() {
                    println!("{}", outcome.notice());
                } else {
                    eprintln!("! {}", outcome.notice());
                }
                settled.notify_one();
            }
            SessionEvent::StateChanged(state) => log::trace!("state: {}", state.label()),
        }
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// One parsed line of terminal input.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Quit,
    Langs,
    From(&'a str),
    To(&'a str),
    Swap,
    /// A language command missing its code.
    Usage(&'a str),
    Translate(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    let mut words = line.split_whitespace();
    match (words.next(), words.next()) {
        (Some(":quit"), _) => Command::Quit,
        (Some(":langs"), _) => Command::Langs,
        (Some(":from"), Some(code)) => Command::From(code),
        (Some(":to"), Some(code)) => Command::To(code),
        (Some(cmd @ (":from" | ":to")), None) => Command::Usage(cmd),
        (Some(":swap"), _) => Command::Swap,
        _ => Command::Translate(line),
    }
}

fn print_status(session: &TranslationSession) {
    let st = session.state();
    println!(
        "{} → {}",
        st.source_language().display_name,
        st.destination_language().display_name
    );
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("lingo-session starting up");

    // 2. Configuration
    let first_run = AppConfig::is_first_run();
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });
    if first_run {
        if let Err(e) = config.save() {
            log::warn!("Failed to write default config: {e}");
        }
    }

    // 3. Engine gateway
    let gateway: Arc<dyn TranslationEngineGateway> =
        Arc::new(HttpGateway::from_config(&config.engine));
    log::info!("Translation engine at {}", config.engine.base_url);

    // 4. Language catalog
    let catalog = Arc::new(LanguageCatalog::from_engine(gateway.as_ref()).await);

    // 5. Session + event printer
    let (mut session, events) = TranslationSession::new(catalog, &config.session, gateway);
    let settled = Arc::new(Notify::new());
    let printer = tokio::spawn(print_events(events, Arc::clone(&settled)));

    print_status(&session);

    // 6. Command loop
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Command::Quit => break,
            Command::Langs => {
                for lang in session.catalog().list() {
                    println!("{:<8} {}", lang.code, lang.display_name);
                }
            }
            Command::From(code) => match session.on_select_source(code) {
                Ok(()) => print_status(&session),
                Err(e) => eprintln!("! {}", RequestOutcome::from(e).notice()),
            },
            Command::To(code) => match session.on_select_destination(code) {
                Ok(()) => print_status(&session),
                Err(e) => eprintln!("! {}", RequestOutcome::from(e).notice()),
            },
            Command::Usage(cmd) => eprintln!("usage: {cmd} <code>"),
            Command::Swap => {
                session.on_swap_languages();
                print_status(&session);
            }
            Command::Translate(text) => {
                session.on_input_text_changed(text);
                // Wait for the request to settle before reading more input.
                match session.on_submit_translate() {
                    SubmitStatus::Accepted | SubmitStatus::Invalid => settled.notified().await,
                    SubmitStatus::Rejected => log::debug!("translation in progress; input ignored"),
                }
            }
        }
    }

    // No request is in flight here, so dropping the session closes the
    // event channel.
    drop(session);
    let _ = printer.await;

    log::info!("lingo-session shutting down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_commands_take_a_code() {
        assert_eq!(parse_command(":from ta"), Command::From("ta"));
        assert_eq!(parse_command("  :to   fr "), Command::To("fr"));
    }

    #[test]
    fn language_command_without_code_is_not_translated() {
        assert_eq!(parse_command(":from"), Command::Usage(":from"));
        assert_eq!(parse_command(":to   "), Command::Usage(":to"));
    }

    #[test]
    fn other_lines_are_translated_verbatim() {
        assert_eq!(parse_command("  hello world "), Command::Translate("  hello world "));
        assert_eq!(parse_command(""), Command::Translate(""));
        assert_eq!(parse_command(":quit now"), Command::Quit);
        assert_eq!(parse_command(":swap"), Command::Swap);
    }
}
