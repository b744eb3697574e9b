// SPDX-FileCopyrightText: 2026 Chatdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `chatdesk shell` command implementation.
//!
//! Interactive REPL with a colored prompt and readline history. Readline
//! runs on its own thread so escalation and reload events from the message
//! store can be handled while the user is typing. Bot replies are rendered
//! from the store's watch channel after every action.

use std::sync::Arc;

use chatdesk_config::model::ChatdeskConfig;
use chatdesk_core::{BackendAdapter, ChatdeskError, Sender};
use chatdesk_session::{
    BootSequence, ConversationSession, EscalationOutcome, Language, MessageStore, SessionEvent,
    strip_sources,
};
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::{mpsc, watch};
use tracing::debug;

use crate::history::format_entry;

const CONTACT_NOTICE: &str = "A human colleague can take over from here. Your next line is read \
                              as your email address so we can get back to you (empty line or \
                              /cancel cancels).";

/// One parsed input line.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Empty,
    Quit,
    Help,
    Reset,
    Human,
    Lang(Option<Language>),
    Feedback,
    History,
    Unknown(&'a str),
    Chat(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Command::Chat(line);
    };

    let mut parts = rest.split_whitespace();
    match parts.next().unwrap_or_default() {
        "quit" | "exit" => Command::Quit,
        "help" => Command::Help,
        "reset" => Command::Reset,
        "human" => Command::Human,
        "lang" => Command::Lang(parts.next().and_then(|l| l.parse().ok())),
        "feedback" => Command::Feedback,
        "history" => Command::History,
        _ => Command::Unknown(line),
    }
}

/// Whether the REPL keeps running after a line.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Tracks which messages of the session have already been printed.
struct Transcript {
    shown: usize,
    strip: bool,
}

impl Transcript {
    fn new(strip: bool) -> Self {
        Self { shown: 0, strip }
    }

    /// Bot lines appended since the last call. User lines are already on screen.
    fn take_new(&mut self, session: &ConversationSession) -> Vec<String> {
        if session.len() < self.shown {
            self.shown = 0;
        }
        let lines = session.messages()[self.shown..]
            .iter()
            .filter(|m| m.from == Sender::Bot)
            .map(|m| {
                if self.strip {
                    strip_sources(&m.content).into_owned()
                } else {
                    m.content.clone()
                }
            })
            .collect();
        self.shown = session.len();
        lines
    }
}

struct Shell {
    store: Arc<MessageStore>,
    backend: Arc<dyn BackendAdapter>,
    boot: BootSequence,
    observer: watch::Receiver<ConversationSession>,
    transcript: Transcript,
    feedback_address: Option<String>,
    awaiting_contact: bool,
}

impl Shell {
    fn new(
        config: &ChatdeskConfig,
        backend: Arc<dyn BackendAdapter>,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (store, events) = MessageStore::new(Arc::clone(&backend), &config.session);
        let shell = Self {
            observer: store.subscribe(),
            store,
            boot: BootSequence::new(Arc::clone(&backend), &config.sync),
            backend,
            transcript: Transcript::new(config.shell.strip_sources),
            feedback_address: config.shell.feedback_address.clone(),
            awaiting_contact: false,
        };
        (shell, events)
    }

    fn prompt(&self) -> String {
        if self.awaiting_contact {
            format!("{}> ", "email".yellow())
        } else {
            format!("{}> ", "you".green())
        }
    }

    fn render(&mut self) {
        let lines = self.transcript.take_new(&self.observer.borrow_and_update());
        for line in lines {
            println!("{} {line}", "support:".cyan().bold());
        }
    }

    async fn handle_line(&mut self, line: &str) -> Flow {
        if self.awaiting_contact {
            self.awaiting_contact = false;
            let contact = line.trim();
            if !contact.starts_with('/') {
                self.complete_escalation(Some(contact)).await;
                return Flow::Continue;
            }
            // Commands at the contact prompt cancel the dialog, then run as usual.
            self.complete_escalation(None).await;
            if contact == "/cancel" {
                return Flow::Continue;
            }
        }

        match parse_command(line) {
            Command::Empty => {}
            Command::Quit => return Flow::Quit,
            Command::Help => print_help(),
            Command::Reset => {
                self.store.reset_messages();
                self.render();
                println!("{}", "conversation reset".dimmed());
            }
            Command::Human => self.store.open_escalation_dialog(),
            Command::Lang(Some(language)) => {
                debug!(%language, "changing reply language");
                self.store
                    .set_language_preference(language.instruction())
                    .await;
                self.render();
            }
            Command::Lang(None) => println!("usage: {}", "/lang english|german".yellow()),
            Command::Feedback => match &self.feedback_address {
                Some(address) => println!("Send us your feedback at {}", address.bold()),
                None => println!("{}", "no feedback address configured".dimmed()),
            },
            Command::History => self.print_server_history().await,
            Command::Unknown(command) => {
                println!("unknown command {}, try {}", command.red(), "/help".yellow());
            }
            Command::Chat(text) => {
                self.store.add_message(text).await;
                self.render();
            }
        }
        Flow::Continue
    }

    async fn complete_escalation(&mut self, contact: Option<&str>) {
        if self.store.escalate_to_human(contact).await == EscalationOutcome::Cancelled {
            println!("{}", "escalation cancelled".dimmed());
        }
        self.render();
    }

    async fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::OpenEscalationDialog => {
                if !self.awaiting_contact {
                    self.awaiting_contact = true;
                    println!("{}", CONTACT_NOTICE.yellow());
                }
            }
            SessionEvent::Reload => {
                self.awaiting_contact = false;
                let report = self.boot.reload(&self.store).await;
                self.render();
                println!("{}", "session restarted".dimmed());
                print_backend_state(report.healthy);
            }
        }
    }

    /// Stored transcript lines for the current conversation, `None` before
    /// the backend has assigned one.
    async fn server_history(&self) -> Result<Option<Vec<String>>, ChatdeskError> {
        let Some(conversation_id) = self.store.conversation_id() else {
            return Ok(None);
        };
        let entries = self.backend.conversation_history(&conversation_id).await?;
        Ok(Some(
            entries
                .iter()
                .map(|entry| format_entry(entry, self.transcript.strip))
                .collect(),
        ))
    }

    async fn print_server_history(&self) {
        match self.server_history().await {
            Ok(None) => println!("{}", "no conversation yet".dimmed()),
            Ok(Some(lines)) if lines.is_empty() => {
                println!("{}", "no messages stored yet".dimmed());
            }
            Ok(Some(lines)) => {
                for line in lines {
                    println!("{line}");
                }
            }
            Err(e) => eprintln!("{}: {e}", "error".red()),
        }
    }
}

fn print_help() {
    println!("  {}               leave the chat", "/quit".yellow());
    println!("  {}              start a new conversation", "/reset".yellow());
    println!("  {}              talk to a human colleague", "/human".yellow());
    println!("  {} change the reply language", "/lang english|german".yellow());
    println!("  {}            show where to send feedback", "/feedback".yellow());
    println!("  {}            show the stored transcript", "/history".yellow());
}

fn print_backend_state(healthy: bool) {
    if healthy {
        println!("{}", "backend online".green());
    } else {
        println!("{}", "backend unreachable, replies may fail".yellow());
    }
}

/// A line (or the end of input) from the readline thread.
enum Input {
    Line(String),
    End,
    Failed(String),
}

/// Spawns the readline thread. It reads one line per prompt it receives.
fn spawn_reader(
    mut editor: DefaultEditor,
) -> (std::sync::mpsc::Sender<String>, mpsc::UnboundedReceiver<Input>) {
    let (prompt_tx, prompt_rx) = std::sync::mpsc::channel::<String>();
    let (input_tx, input_rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        for prompt in prompt_rx {
            let input = match editor.readline(&prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = editor.add_history_entry(line.as_str());
                    }
                    Input::Line(line)
                }
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => Input::End,
                Err(e) => Input::Failed(e.to_string()),
            };
            let done = !matches!(input, Input::Line(_));
            if input_tx.send(input).is_err() || done {
                break;
            }
        }
    });

    (prompt_tx, input_rx)
}

/// Runs the `chatdesk shell` interactive REPL.
///
/// Boots the session (health probe, then background sync) and chats until
/// `/quit`, Ctrl+C, or end of input.
pub async fn run_shell(
    config: ChatdeskConfig,
    backend: Arc<dyn BackendAdapter>,
) -> Result<(), ChatdeskError> {
    let editor = DefaultEditor::new()
        .map_err(|e| ChatdeskError::Internal(format!("failed to initialize readline: {e}")))?;

    let (mut shell, mut events) = Shell::new(&config, backend);

    println!("{}", "chatdesk".bold().green());
    println!(
        "Type {} for commands, {} to exit.\n",
        "/help".yellow(),
        "/quit".yellow()
    );

    let report = shell.boot.run().await;
    print_backend_state(report.healthy);

    let (prompts, mut input) = spawn_reader(editor);
    let mut needs_prompt = true;

    loop {
        if needs_prompt {
            if prompts.send(shell.prompt()).is_err() {
                break;
            }
            needs_prompt = false;
        }

        tokio::select! {
            line = input.recv() => {
                let flow = match line {
                    Some(Input::Line(line)) => shell.handle_line(&line).await,
                    Some(Input::Failed(e)) => {
                        eprintln!("{}: {e}", "error".red());
                        Flow::Quit
                    }
                    Some(Input::End) | None => Flow::Quit,
                };
                if flow == Flow::Quit {
                    break;
                }
                while let Ok(event) = events.try_recv() {
                    shell.handle_event(event).await;
                }
                needs_prompt = true;
            }
            Some(event) = events.recv() => {
                // Readline is still showing its prompt.
                println!();
                shell.handle_event(event).await;
            }
        }
    }

    println!("{}", "goodbye".dimmed());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatdesk_core::{ConversationEntry, ConversationId};
    use chatdesk_test_utils::MockBackend;

    fn shell_with(
        backend: Arc<MockBackend>,
    ) -> (Shell, mpsc::UnboundedReceiver<SessionEvent>) {
        Shell::new(&ChatdeskConfig::default(), backend)
    }

    #[test]
    fn commands_are_parsed() {
        assert_eq!(parse_command("  "), Command::Empty);
        assert_eq!(parse_command("/exit"), Command::Quit);
        assert_eq!(parse_command("/lang German"), Command::Lang(Some(Language::German)));
        assert_eq!(parse_command("/lang"), Command::Lang(None));
        assert_eq!(parse_command("/lang klingon"), Command::Lang(None));
        assert_eq!(parse_command("/nope"), Command::Unknown("/nope"));
        assert_eq!(parse_command(" where is my order? "), Command::Chat("where is my order?"));
    }

    #[test]
    fn transcript_shows_only_new_bot_lines() {
        let mut transcript = Transcript::new(true);
        let backend = Arc::new(MockBackend::new());
        let (store, _events) =
            MessageStore::new(backend, &chatdesk_config::model::SessionConfig::default());

        store.add_user_message("hi");
        store.add_bot_message("hello【1:0†source】!");
        assert_eq!(transcript.take_new(&store.snapshot()), ["hello!"]);
        assert!(transcript.take_new(&store.snapshot()).is_empty());

        store.reset_messages();
        store.add_bot_message("fresh start");
        assert_eq!(transcript.take_new(&store.snapshot()), ["fresh start"]);
    }

    #[tokio::test]
    async fn chat_line_reaches_backend() {
        let backend = Arc::new(MockBackend::new());
        backend.push_text_reply("hello", Some("abc")).await;
        let (mut shell, _events) = shell_with(backend.clone());

        assert_eq!(shell.handle_line("hi").await, Flow::Continue);
        assert_eq!(shell.handle_line("/quit").await, Flow::Quit);

        assert_eq!(backend.chat_requests().await.len(), 1);
        assert_eq!(shell.store.conversation_id(), Some(ConversationId::from("abc")));
    }

    #[tokio::test]
    async fn menu_escalation_collects_contact() {
        let backend = Arc::new(MockBackend::new());
        let (mut shell, mut events) = shell_with(backend.clone());
        shell.handle_line("my parcel is lost").await;

        shell.handle_line("/human").await;
        let event = events.try_recv().unwrap();
        shell.handle_event(event).await;
        assert!(shell.awaiting_contact);
        assert!(shell.prompt().contains("email"));

        shell.handle_line("x@y.com").await;
        assert!(!shell.awaiting_contact);
        let sent = backend.escalation_requests().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].email, "x@y.com");
        assert_eq!(sent[0].message, "mock response");
    }

    #[tokio::test]
    async fn empty_contact_cancels() {
        let backend = Arc::new(MockBackend::new());
        let (mut shell, _events) = shell_with(backend.clone());

        shell.handle_event(SessionEvent::OpenEscalationDialog).await;
        shell.handle_line("").await;

        assert!(!shell.awaiting_contact);
        assert!(backend.escalation_requests().await.is_empty());
    }

    #[tokio::test]
    async fn quit_at_contact_prompt_cancels_without_escalating() {
        let backend = Arc::new(MockBackend::new());
        let (mut shell, _events) = shell_with(backend.clone());
        shell.handle_line("hi").await;

        shell.handle_event(SessionEvent::OpenEscalationDialog).await;
        assert_eq!(shell.handle_line("/quit").await, Flow::Quit);

        assert!(!shell.awaiting_contact);
        assert!(backend.escalation_requests().await.is_empty());
        assert_eq!(
            shell.store.snapshot().last_message().map(|m| m.content.clone()),
            Some("mock response".to_string())
        );
    }

    #[tokio::test]
    async fn command_at_contact_prompt_cancels_then_runs() {
        let backend = Arc::new(MockBackend::new());
        let (mut shell, _events) = shell_with(backend.clone());
        shell.handle_line("hi").await;

        shell.handle_event(SessionEvent::OpenEscalationDialog).await;
        assert_eq!(shell.handle_line("/reset").await, Flow::Continue);

        assert!(!shell.awaiting_contact);
        assert!(backend.escalation_requests().await.is_empty());
        assert!(shell.store.messages().is_empty());
    }

    #[tokio::test]
    async fn cancel_at_contact_prompt_sends_nothing() {
        let backend = Arc::new(MockBackend::new());
        let (mut shell, _events) = shell_with(backend.clone());

        shell.handle_event(SessionEvent::OpenEscalationDialog).await;
        assert_eq!(shell.handle_line("/cancel").await, Flow::Continue);

        assert!(!shell.awaiting_contact);
        assert!(backend.escalation_requests().await.is_empty());
    }

    #[test]
    fn contact_notice_says_next_line_is_the_contact() {
        assert!(CONTACT_NOTICE.contains("next line"));
    }

    #[tokio::test]
    async fn history_needs_a_conversation() {
        let backend = Arc::new(MockBackend::new());
        let (shell, _events) = shell_with(backend);

        assert_eq!(shell.server_history().await.unwrap(), None);
    }

    #[tokio::test]
    async fn history_lists_stored_entries() {
        let backend = Arc::new(MockBackend::new());
        backend.push_text_reply("hello", Some("abc")).await;
        backend
            .set_history(vec![
                ConversationEntry {
                    id: 1,
                    role: "user".into(),
                    content: "hi".into(),
                    timestamp: "2026-10-19T10:00:00".into(),
                },
                ConversationEntry {
                    id: 2,
                    role: "assistant".into(),
                    content: "hello【4:0†source】".into(),
                    timestamp: "2026-10-19T10:00:02".into(),
                },
            ])
            .await;
        let (mut shell, _events) = shell_with(backend);
        shell.handle_line("hi").await;

        assert_eq!(
            shell.server_history().await.unwrap(),
            Some(vec![
                "[2026-10-19T10:00:00] user: hi".to_string(),
                "[2026-10-19T10:00:02] assistant: hello".to_string(),
            ])
        );
        assert_eq!(shell.handle_line("/history").await, Flow::Continue);
    }

    #[tokio::test]
    async fn reload_resets_and_reboots() {
        let backend = Arc::new(MockBackend::new());
        let (mut shell, _events) = shell_with(backend.clone());
        shell.handle_line("hi").await;

        shell.handle_event(SessionEvent::Reload).await;

        assert!(shell.store.messages().is_empty());
        assert!(shell.store.conversation_id().is_none());
        assert_eq!(backend.health_calls(), 1);
    }
}
