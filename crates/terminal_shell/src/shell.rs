//! The command shell: dispatch, transcript, input affordances and persistence sync.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use leptos::logging;
use platform_host::{
    Clock, IdGenerator, NavigationService, NoopNavigationService, NoopNotificationService,
    NoopPrefsStore, NotificationService, PrefsStore, SystemClock, TimestampIdGenerator,
};
use terminal_shell_contract::{
    CommandDescriptor, CommandOutput, CycleDirection, HistoryDirection, HistoryEntry,
    SessionSnapshot, ShellTheme,
};

use crate::{
    builtins::builtin_commands,
    command::{Command, CommandContext},
    config::ShellConfig,
    history::CommandHistoryLog,
    input::InputState,
    parser::{parse_invocation, split_submission},
    persistence::{load_or_discard, save_best_effort, PersistedSession, StorageKeys},
    registry::CommandRegistry,
    render::{echo_line, prompt, render_scrollback, RenderedLine},
    scrollback::Scrollback,
    session::{reduce_session, SessionState, ShellAction, ShellEffect},
};

/// Host collaborators injected at construction.
#[derive(Clone)]
pub struct ShellPorts {
    /// Persisted state.
    pub store: Rc<dyn PrefsStore>,
    /// Page router.
    pub router: Rc<dyn NavigationService>,
    /// Transient notifications.
    pub notifier: Rc<dyn NotificationService>,
    /// Entry timestamps.
    pub clock: Rc<dyn Clock>,
    /// Entry identifiers.
    pub ids: Rc<dyn IdGenerator>,
}

impl Default for ShellPorts {
    fn default() -> Self {
        Self {
            store: Rc::new(NoopPrefsStore),
            router: Rc::new(NoopNavigationService),
            notifier: Rc::new(NoopNotificationService),
            clock: Rc::new(SystemClock),
            ids: Rc::new(TimestampIdGenerator::default()),
        }
    }
}

/// Result of [`CommandShell::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input; nothing changed.
    Ignored,
    /// Another submission was still running; this one was dropped.
    Busy,
    /// The submission ran and was recorded.
    Completed,
}

/// Snapshot of everything the terminal UI draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellView {
    /// Rendered scrollback.
    pub lines: Vec<RenderedLine>,
    /// Prompt prefix for the current path.
    pub prompt: String,
    /// Edit buffer.
    pub input: String,
    /// Current suggestions.
    pub suggestions: Vec<String>,
    /// Selected suggestion index.
    pub selected_suggestion: Option<usize>,
    /// Session state.
    pub session: SessionSnapshot,
    /// Whether a submission is running.
    pub busy: bool,
}

struct ShellState {
    scrollback: Scrollback,
    history: CommandHistoryLog,
    input: InputState,
    session: SessionState,
}

struct ShellInner {
    config: Rc<ShellConfig>,
    registry: CommandRegistry,
    descriptors: Rc<[CommandDescriptor]>,
    keys: StorageKeys,
    ports: ShellPorts,
    state: RefCell<ShellState>,
    busy: Cell<bool>,
}

/// Terminal engine handle. Clones share one shell.
#[derive(Clone)]
pub struct CommandShell {
    inner: Rc<ShellInner>,
}

enum LineOutcome {
    Output { text: String, is_error: bool },
    Clear,
}

struct BusyGuard<'a>(&'a Cell<bool>);

impl<'a> BusyGuard<'a> {
    fn engage(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl CommandShell {
    /// Creates a shell with fresh state, without reading storage.
    pub fn new(config: ShellConfig, ports: ShellPorts, extensions: Vec<Command>) -> Self {
        let config = config.normalized();
        let registry = CommandRegistry::build(builtin_commands(), extensions);
        let descriptors = registry.descriptors();
        let keys = StorageKeys::new(&config.storage_prefix);
        let session = SessionState {
            cwd: config
                .initial_cwd
                .clone()
                .unwrap_or_else(|| SessionState::default().cwd),
            ..SessionState::default()
        };
        let state = ShellState {
            scrollback: Scrollback::welcome(
                ports.ids.as_ref(),
                ports.clock.as_ref(),
                &config.welcome_message,
            ),
            history: CommandHistoryLog::new(config.history_capacity),
            input: InputState::default(),
            session,
        };

        Self {
            inner: Rc::new(ShellInner {
                config: Rc::new(config),
                registry,
                descriptors,
                keys,
                ports,
                state: RefCell::new(state),
                busy: Cell::new(false),
            }),
        }
    }

    /// Creates a shell and restores persisted scrollback, history, achievements and session.
    ///
    /// Missing or malformed values fall back to fresh state.
    pub async fn open(config: ShellConfig, ports: ShellPorts, extensions: Vec<Command>) -> Self {
        let shell = Self::new(config, ports, extensions);
        shell.hydrate().await;
        shell
    }

    async fn hydrate(&self) {
        let inner = &self.inner;
        let store = inner.ports.store.as_ref();
        let entries = load_or_discard::<Vec<HistoryEntry>>(store, &inner.keys.scrollback).await;
        let lines = load_or_discard::<Vec<String>>(store, &inner.keys.history).await;
        let achievements = load_or_discard::<Vec<String>>(store, &inner.keys.achievements).await;
        let persisted = load_or_discard::<PersistedSession>(store, &inner.keys.session).await;

        let mut state = inner.state.borrow_mut();
        if let Some(entries) = entries {
            state.scrollback = Scrollback::restore(
                entries,
                inner.ports.ids.as_ref(),
                inner.ports.clock.as_ref(),
                &inner.config.welcome_message,
            );
            if let Some(capacity) = inner.config.scrollback_capacity {
                state.scrollback.trim_to(capacity);
            }
        }
        if let Some(lines) = lines {
            state.history = CommandHistoryLog::restore(lines, inner.config.history_capacity);
        }
        for name in achievements.unwrap_or_default() {
            let name = name.trim();
            if !name.is_empty() && !state.session.has_achievement(name) {
                state.session.achievements.push(name.to_string());
            }
        }
        if let Some(persisted) = persisted {
            state.session.theme = persisted.theme;
            state.session.sound_enabled = persisted.sound_enabled;
            if inner.config.initial_cwd.is_none() && !persisted.cwd.trim().is_empty() {
                state.session.cwd = persisted.cwd;
            }
        }
    }

    /// Runs a submission and records it in the transcript.
    ///
    /// Sub-lines run in order and each failure is recorded without stopping the rest. Router
    /// requests made by handlers run after the submission has been persisted.
    pub async fn submit(&self, raw_line: &str) -> SubmitOutcome {
        let line = raw_line.trim();
        if line.is_empty() {
            return SubmitOutcome::Ignored;
        }
        if self.inner.busy.get() {
            logging::warn!("terminal submission `{line}` dropped: a command is still running");
            return SubmitOutcome::Busy;
        }
        let _busy = BusyGuard::engage(&self.inner.busy);

        let cwd = self.inner.state.borrow().session.cwd.clone();
        let mut outputs = Vec::new();
        let mut cleared = false;
        let mut routes = Vec::new();
        for sub_line in split_submission(line) {
            match self.run_line(sub_line, &mut routes).await {
                Some(LineOutcome::Output { text, is_error }) => outputs.push((text, is_error)),
                Some(LineOutcome::Clear) => {
                    outputs.clear();
                    cleared = true;
                }
                None => {}
            }
        }

        {
            let inner = &self.inner;
            let ids = inner.ports.ids.as_ref();
            let clock = inner.ports.clock.as_ref();
            let mut state = inner.state.borrow_mut();
            if cleared {
                state
                    .scrollback
                    .reset(ids, clock, &inner.config.welcome_message);
            } else {
                state
                    .scrollback
                    .append(ids, clock, echo_line(&cwd, raw_line), None, false);
            }
            for (text, is_error) in outputs {
                state
                    .scrollback
                    .append(ids, clock, String::new(), Some(text), is_error);
            }
            if let Some(capacity) = inner.config.scrollback_capacity {
                state.scrollback.trim_to(capacity);
            }
            state.history.push(raw_line);
            state.input.reset();
        }

        self.persist_transcript().await;
        self.run_routes(routes);
        SubmitOutcome::Completed
    }

    async fn run_line(&self, line: &str, routes: &mut Vec<ShellEffect>) -> Option<LineOutcome> {
        let invocation = parse_invocation(line)?;

        let Some(command) = self.inner.registry.lookup(&invocation.name) else {
            return Some(LineOutcome::Output {
                text: format!(
                    "Command not found: {}. Type 'help' for available commands.",
                    invocation.name
                ),
                is_error: true,
            });
        };
        let handler = Rc::clone(&command.handler);

        let actions = Rc::new(RefCell::new(Vec::new()));
        let context = {
            let state = self.inner.state.borrow();
            CommandContext::new(
                invocation.name.clone(),
                invocation.args,
                state.session.snapshot(),
                state.history.to_vec(),
                Rc::clone(&self.inner.descriptors),
                Rc::clone(&self.inner.config),
                Rc::clone(&actions),
            )
        };
        let result = handler(context).await;

        let queued = actions.take();
        routes.extend(self.apply_actions(queued).await);

        Some(match result {
            Ok(CommandOutput::Text(text)) => LineOutcome::Output {
                text,
                is_error: false,
            },
            Ok(CommandOutput::Nothing) => LineOutcome::Output {
                text: format!("Command {} executed.", invocation.name),
                is_error: false,
            },
            Ok(CommandOutput::Clear) => LineOutcome::Clear,
            Err(err) => LineOutcome::Output {
                text: format!("Error executing {}: {err}", invocation.name),
                is_error: true,
            },
        })
    }

    /// Reduces `actions` in order, runs notifications and persistence, and returns the router
    /// effects for the caller to run.
    async fn apply_actions(&self, actions: Vec<ShellAction>) -> Vec<ShellEffect> {
        let effects = {
            let mut state = self.inner.state.borrow_mut();
            actions
                .into_iter()
                .flat_map(|action| reduce_session(&mut state.session, action))
                .collect::<Vec<_>>()
        };

        let mut routes = Vec::new();
        let mut persist_session = false;
        let mut persist_achievements = false;
        for effect in effects {
            match effect {
                ShellEffect::Navigate(_) | ShellEffect::Reload => routes.push(effect),
                ShellEffect::Notify { title, body, style } => {
                    if let Err(err) = self
                        .inner
                        .ports
                        .notifier
                        .notify(&title, &body, style)
                        .await
                    {
                        logging::warn!("terminal notification `{title}` failed: {err}");
                    }
                }
                ShellEffect::PersistSession => persist_session = true,
                ShellEffect::PersistAchievements => persist_achievements = true,
            }
        }

        if persist_session {
            self.persist_session().await;
        }
        if persist_achievements {
            self.persist_achievements().await;
        }
        routes
    }

    fn run_routes(&self, routes: Vec<ShellEffect>) {
        let router = self.inner.ports.router.as_ref();
        for effect in routes {
            let result = match &effect {
                ShellEffect::Navigate(path) => router.navigate(path),
                ShellEffect::Reload => router.reload(),
                _ => Ok(()),
            };
            if let Err(err) = result {
                logging::warn!("terminal router request {effect:?} failed: {err}");
            }
        }
    }

    async fn apply_now(&self, actions: Vec<ShellAction>) {
        let routes = self.apply_actions(actions).await;
        self.run_routes(routes);
    }

    async fn persist_transcript(&self) {
        let (entries, lines) = {
            let state = self.inner.state.borrow();
            (state.scrollback.entries().to_vec(), state.history.to_vec())
        };
        let store = self.inner.ports.store.as_ref();
        save_best_effort(store, &self.inner.keys.scrollback, &entries).await;
        save_best_effort(store, &self.inner.keys.history, &lines).await;
    }

    async fn persist_session(&self) {
        let persisted = {
            let state = self.inner.state.borrow();
            PersistedSession {
                cwd: state.session.cwd.clone(),
                theme: state.session.theme,
                sound_enabled: state.session.sound_enabled,
            }
        };
        save_best_effort(
            self.inner.ports.store.as_ref(),
            &self.inner.keys.session,
            &persisted,
        )
        .await;
    }

    async fn persist_achievements(&self) {
        let achievements = self.inner.state.borrow().session.achievements.clone();
        save_best_effort(
            self.inner.ports.store.as_ref(),
            &self.inner.keys.achievements,
            &achievements,
        )
        .await;
    }

    /// Replaces the edit buffer as the user types.
    pub fn set_input(&self, text: &str) {
        self.inner.state.borrow_mut().input.set_buffer(text);
    }

    /// Recalls an older or newer submission into the edit buffer.
    pub fn navigate_history(&self, direction: HistoryDirection) -> bool {
        let mut state = self.inner.state.borrow_mut();
        let ShellState { history, input, .. } = &mut *state;
        input.navigate_history(history, direction)
    }

    /// Recomputes suggestions for `partial` and clears the selection.
    pub fn update_suggestions(&self, partial: &str) {
        let suggestions = self
            .inner
            .registry
            .suggest(partial, self.inner.config.suggestion_limit);
        self.inner
            .state
            .borrow_mut()
            .input
            .set_suggestions(suggestions);
    }

    /// Rotates the selected suggestion.
    pub fn cycle_suggestion(&self, direction: CycleDirection) -> bool {
        self.inner
            .state
            .borrow_mut()
            .input
            .cycle_suggestion(direction)
    }

    /// Moves the selected (or first) suggestion into the edit buffer.
    pub fn accept_suggestion(&self) -> bool {
        self.inner.state.borrow_mut().input.accept_suggestion()
    }

    /// Hides the suggestion list.
    pub fn dismiss_suggestions(&self) {
        self.inner.state.borrow_mut().input.clear_suggestions();
    }

    /// Resets scrollback to a fresh welcome entry, as the `clear` command does.
    pub async fn clear_scrollback(&self) {
        {
            let inner = &self.inner;
            inner.state.borrow_mut().scrollback.reset(
                inner.ports.ids.as_ref(),
                inner.ports.clock.as_ref(),
                &inner.config.welcome_message,
            );
        }
        self.persist_transcript().await;
    }

    /// Unlocks `name`. Returns `false` when it was already unlocked or blank.
    pub async fn unlock_achievement(&self, name: &str) -> bool {
        let before = self.inner.state.borrow().session.achievements.len();
        self.apply_now(vec![ShellAction::UnlockAchievement {
            name: name.to_string(),
        }])
        .await;
        self.inner.state.borrow().session.achievements.len() > before
    }

    /// Selects a theme.
    pub async fn set_theme(&self, theme: ShellTheme) {
        self.apply_now(vec![ShellAction::SetTheme { theme }]).await;
    }

    /// Enables or disables sound.
    pub async fn set_sound(&self, enabled: bool) {
        self.apply_now(vec![ShellAction::SetSound { enabled }]).await;
    }

    /// Scrollback entries in display order.
    pub fn scrollback(&self) -> Vec<HistoryEntry> {
        self.inner.state.borrow().scrollback.entries().to_vec()
    }

    /// Edit buffer text.
    pub fn input(&self) -> String {
        self.inner.state.borrow().input.buffer().to_string()
    }

    /// Current suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        self.inner.state.borrow().input.suggestions().to_vec()
    }

    /// Selected suggestion index.
    pub fn selected_suggestion(&self) -> Option<usize> {
        self.inner.state.borrow().input.selected_suggestion()
    }

    /// History cursor, `None` when not browsing.
    pub fn history_index(&self) -> Option<usize> {
        self.inner.state.borrow().input.history_index()
    }

    /// Submitted lines, newest first.
    pub fn command_history(&self) -> Vec<String> {
        self.inner.state.borrow().history.to_vec()
    }

    /// Session state.
    pub fn session(&self) -> SessionSnapshot {
        self.inner.state.borrow().session.snapshot()
    }

    /// Registered commands in registry order.
    pub fn commands(&self) -> Vec<CommandDescriptor> {
        self.inner.descriptors.to_vec()
    }

    /// Shell configuration after normalization.
    pub fn config(&self) -> &ShellConfig {
        &self.inner.config
    }

    /// Prompt prefix for the current path.
    pub fn prompt(&self) -> String {
        prompt(&self.inner.state.borrow().session.cwd)
    }

    /// Whether a submission is running.
    pub fn is_busy(&self) -> bool {
        self.inner.busy.get()
    }

    /// Everything the UI draws, in one snapshot.
    pub fn view(&self) -> ShellView {
        let state = self.inner.state.borrow();
        ShellView {
            lines: render_scrollback(state.scrollback.entries()),
            prompt: prompt(&state.session.cwd),
            input: state.input.buffer().to_string(),
            suggestions: state.input.suggestions().to_vec(),
            selected_suggestion: state.input.selected_suggestion(),
            session: state.session.snapshot(),
            busy: self.inner.busy.get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use futures::{
        channel::oneshot,
        executor::{block_on, LocalPool},
        task::LocalSpawnExt,
    };
    use platform_host::{
        FailingPrefsStore, ManualClock, MemoryPrefsStore, NavigationRequest,
        RecordingNavigationService, RecordingNotificationService, SequentialIdGenerator,
    };
    use pretty_assertions::assert_eq;
    use terminal_shell_contract::{NotifyStyle, ShellError};

    use super::*;
    use crate::builtins::{ACHIEVEMENT_CURIOUS, ACHIEVEMENT_EXPLORER};

    struct Harness {
        shell: CommandShell,
        store: MemoryPrefsStore,
        router: RecordingNavigationService,
        notifier: RecordingNotificationService,
        clock: ManualClock,
    }

    fn ports_for(
        store: Rc<dyn PrefsStore>,
        router: Rc<dyn NavigationService>,
        notifier: Rc<dyn NotificationService>,
        clock: &ManualClock,
    ) -> ShellPorts {
        ShellPorts {
            store,
            router,
            notifier,
            clock: Rc::new(clock.clone()),
            ids: Rc::new(SequentialIdGenerator::new("e")),
        }
    }

    fn open_with(store: MemoryPrefsStore, config: ShellConfig, extensions: Vec<Command>) -> Harness {
        let router = RecordingNavigationService::default();
        let notifier = RecordingNotificationService::default();
        let clock = ManualClock::starting_at(1_000);
        let ports = ports_for(
            Rc::new(store.clone()),
            Rc::new(router.clone()),
            Rc::new(notifier.clone()),
            &clock,
        );
        let shell = block_on(CommandShell::open(config, ports, extensions));
        Harness {
            shell,
            store,
            router,
            notifier,
            clock,
        }
    }

    fn harness() -> Harness {
        open_with(MemoryPrefsStore::default(), ShellConfig::default(), Vec::new())
    }

    fn harness_with(extensions: Vec<Command>) -> Harness {
        open_with(MemoryPrefsStore::default(), ShellConfig::default(), extensions)
    }

    fn submit(shell: &CommandShell, line: &str) -> SubmitOutcome {
        block_on(shell.submit(line))
    }

    fn tail(shell: &CommandShell, count: usize) -> Vec<HistoryEntry> {
        let entries = shell.scrollback();
        entries[entries.len() - count..].to_vec()
    }

    fn outputs(entries: &[HistoryEntry]) -> Vec<(String, bool)> {
        entries
            .iter()
            .filter(|entry| entry.is_output_only())
            .map(|entry| (entry.output_text.clone().unwrap_or_default(), entry.is_error))
            .collect()
    }

    fn keys() -> StorageKeys {
        StorageKeys::new(&ShellConfig::default().storage_prefix)
    }

    #[test]
    fn fresh_shell_shows_only_the_welcome_entry() {
        let h = harness();
        let entries = h.shell.scrollback();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].output_text.as_deref(),
            Some(ShellConfig::default().welcome_message.as_str())
        );
        assert_eq!(h.shell.prompt(), "/>");
    }

    #[test]
    fn blank_submission_is_a_no_op() {
        let h = harness();
        assert_eq!(submit(&h.shell, "  \n\t "), SubmitOutcome::Ignored);
        assert_eq!(h.shell.scrollback().len(), 1);
        assert!(h.shell.command_history().is_empty());
        assert!(h.store.keys().is_empty());
    }

    #[test]
    fn unknown_command_records_echo_and_error_hint() {
        let h = harness();
        assert_eq!(submit(&h.shell, "frobnicate"), SubmitOutcome::Completed);

        let entries = h.shell.scrollback();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].input_text, "/> frobnicate");
        assert!(entries[2].is_error);
        assert_eq!(
            entries[2].output_text.as_deref(),
            Some("Command not found: frobnicate. Type 'help' for available commands.")
        );
    }

    #[test]
    fn help_lists_every_command_once_in_registry_order() {
        let h = harness_with(vec![
            Command::text("skills", "List skills", "rust"),
            Command::text("contact", "Show contact details", "mail"),
        ]);
        submit(&h.shell, "help");

        let text = tail(&h.shell, 1)[0].output_text.clone().unwrap_or_default();
        let listed = text
            .lines()
            .filter_map(|line| line.split_whitespace().next())
            .collect::<Vec<_>>();
        let registered = h
            .shell
            .commands()
            .into_iter()
            .map(|descriptor| descriptor.name)
            .collect::<Vec<_>>();
        assert_eq!(listed, registered);
        assert_eq!(registered.last().map(String::as_str), Some("contact"));
        assert_eq!(registered.first().map(String::as_str), Some("help"));
    }

    #[test]
    fn clear_resets_scrollback_but_keeps_command_history() {
        let h = harness();
        submit(&h.shell, "echo a");
        submit(&h.shell, "frobnicate");
        let before = h.shell.command_history();

        submit(&h.shell, "clear");

        let entries = h.shell.scrollback();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_output_only());
        assert_eq!(
            entries[0].output_text.as_deref(),
            Some(ShellConfig::default().welcome_message.as_str())
        );
        let after = h.shell.command_history();
        assert_eq!(&after[1..], before.as_slice());
        assert_eq!(after[0], "clear");
    }

    #[test]
    fn multi_line_submission_keeps_sub_line_order() {
        let h = harness();
        submit(&h.shell, "echo a\necho b");

        let entries = tail(&h.shell, 3);
        assert_eq!(entries[0].input_text, "/> echo a\necho b");
        assert_eq!(
            outputs(&entries),
            vec![("a".to_string(), false), ("b".to_string(), false)]
        );
        assert_eq!(h.shell.command_history(), vec!["echo a\necho b".to_string()]);
    }

    #[test]
    fn clear_mid_submission_keeps_only_later_output() {
        let h = harness();
        submit(&h.shell, "echo before");
        submit(&h.shell, "echo a\nclear\necho b");

        let entries = h.shell.scrollback();
        assert_eq!(entries.len(), 2);
        assert_eq!(outputs(&entries[1..]), vec![("b".to_string(), false)]);
    }

    #[test]
    fn history_navigation_round_trip() {
        let h = harness();
        submit(&h.shell, "foo");
        submit(&h.shell, "bar");

        assert!(h.shell.navigate_history(HistoryDirection::Older));
        assert!(h.shell.navigate_history(HistoryDirection::Older));
        assert!(h.shell.navigate_history(HistoryDirection::Newer));
        assert_eq!(h.shell.input(), "bar");

        h.shell.navigate_history(HistoryDirection::Older);
        assert!(!h.shell.navigate_history(HistoryDirection::Older));
        assert_eq!(h.shell.input(), "foo");
        assert_eq!(h.shell.history_index(), Some(1));
        assert_eq!(h.shell.scrollback().len(), 5);
    }

    #[test]
    fn suggestions_match_substrings_and_cap_at_limit() {
        let h = harness_with(vec![Command::text("shell", "Extra", "x")]);

        h.shell.update_suggestions("H");
        assert_eq!(
            h.shell.suggestions(),
            vec!["help", "echo", "history", "theme", "achievements"]
        );
        h.shell.update_suggestions("   ");
        assert!(h.shell.suggestions().is_empty());
    }

    #[test]
    fn cycling_and_accepting_suggestions() {
        let h = harness();
        h.shell.set_input("hist");
        h.shell.update_suggestions("hist");
        assert_eq!(h.shell.suggestions(), vec!["history"]);
        assert!(h.shell.cycle_suggestion(CycleDirection::Next));
        assert_eq!(h.shell.selected_suggestion(), Some(0));
        assert!(h.shell.accept_suggestion());
        assert_eq!(h.shell.input(), "history");
        assert!(h.shell.suggestions().is_empty());
        assert!(!h.shell.accept_suggestion());
    }

    #[test]
    fn submit_resets_input_state() {
        let h = harness();
        h.shell.set_input("ec");
        h.shell.update_suggestions("ec");
        h.shell.cycle_suggestion(CycleDirection::Next);
        submit(&h.shell, "echo hi");

        let view = h.shell.view();
        assert_eq!(view.input, "");
        assert!(view.suggestions.is_empty());
        assert_eq!(view.selected_suggestion, None);
        assert_eq!(h.shell.history_index(), None);
    }

    #[test]
    fn failing_handler_is_isolated_to_its_sub_line() {
        let h = harness_with(vec![Command::sync("boom", "Always fails", |_| {
            Err(ShellError::internal("kaput"))
        })]);
        submit(&h.shell, "boom\necho after");

        assert_eq!(
            outputs(&tail(&h.shell, 3)),
            vec![
                ("Error executing boom: kaput".to_string(), true),
                ("after".to_string(), false),
            ]
        );
    }

    #[test]
    fn nothing_acknowledges_and_empty_text_stays_empty() {
        let h = harness_with(vec![
            Command::sync("noop", "Returns nothing", |_| Ok(CommandOutput::Nothing)),
            Command::text("blank", "Returns empty text", ""),
        ]);
        submit(&h.shell, "NOOP\nblank");

        assert_eq!(
            outputs(&tail(&h.shell, 3)),
            vec![
                ("Command noop executed.".to_string(), false),
                (String::new(), false),
            ]
        );
    }

    #[test]
    fn apostrophes_and_quotes_pass_through_as_text() {
        let h = harness();
        submit(&h.shell, "echo don't panic\necho \"open");
        assert_eq!(
            outputs(&tail(&h.shell, 2)),
            vec![
                ("don't panic".to_string(), false),
                ("\"open".to_string(), false),
            ]
        );
    }

    #[test]
    fn raw_line_is_echoed_and_remembered_verbatim() {
        let h = harness();
        submit(&h.shell, "  echo   x  ");

        let entries = tail(&h.shell, 2);
        assert_eq!(entries[0].input_text, "/>   echo   x  ");
        assert_eq!(outputs(&entries), vec![("x".to_string(), false)]);
        assert_eq!(h.shell.command_history(), vec!["  echo   x  ".to_string()]);
    }

    #[test]
    fn non_ascii_extension_names_resolve_ignoring_case() {
        let h = harness_with(vec![Command::text("Über", "Unicode name", "hallo")]);
        h.shell.update_suggestions("üb");
        assert!(h.shell.accept_suggestion());
        let accepted = h.shell.input();
        assert_eq!(accepted, "Über");

        submit(&h.shell, &accepted);
        submit(&h.shell, "über");
        assert_eq!(
            outputs(&tail(&h.shell, 4)),
            vec![("hallo".to_string(), false), ("hallo".to_string(), false)]
        );
    }

    #[test]
    fn scrollback_capacity_bounds_memory_and_storage() {
        let store = MemoryPrefsStore::default();
        let config = ShellConfig {
            scrollback_capacity: Some(3),
            ..ShellConfig::default()
        };
        let h = open_with(store.clone(), config.clone(), Vec::new());
        submit(&h.shell, "echo one");
        submit(&h.shell, "echo two");

        let entries = h.shell.scrollback();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].input_text, "/> echo two");
        assert_eq!(
            outputs(&entries),
            vec![("one".to_string(), false), ("two".to_string(), false)]
        );
        let raw = store.get_raw(&keys().scrollback).unwrap_or_default();
        let saved = serde_json::from_str::<Vec<HistoryEntry>>(&raw).expect("saved scrollback");
        assert_eq!(saved.len(), 3);

        let tighter = ShellConfig {
            scrollback_capacity: Some(2),
            ..config
        };
        let reopened = open_with(store, tighter, Vec::new());
        assert_eq!(reopened.shell.scrollback().len(), 2);
    }

    #[test]
    fn async_handlers_are_awaited() {
        let h = harness_with(vec![Command::new("greet", "Async greeting", |context| async move {
            Ok(CommandOutput::text(format!("hello {}", context.args.join(" "))))
        })]);
        submit(&h.shell, "greet big world");
        assert_eq!(
            outputs(&tail(&h.shell, 1)),
            vec![("hello big world".to_string(), false)]
        );
    }

    #[test]
    fn second_submission_while_running_is_rejected() {
        let (sender, receiver) = oneshot::channel::<String>();
        let pending = Rc::new(RefCell::new(Some(receiver)));
        let slot = Rc::clone(&pending);
        let h = harness_with(vec![Command::new("wait", "Waits for a signal", move |_| {
            let receiver = slot.borrow_mut().take();
            async move {
                match receiver {
                    Some(receiver) => receiver
                        .await
                        .map(CommandOutput::Text)
                        .map_err(|_| ShellError::internal("cancelled")),
                    None => Ok(CommandOutput::Nothing),
                }
            }
        })]);

        let mut pool = LocalPool::new();
        let outcome = Rc::new(Cell::new(None));
        let shell = h.shell.clone();
        let first = Rc::clone(&outcome);
        pool.spawner()
            .spawn_local(async move {
                first.set(Some(shell.submit("wait").await));
            })
            .expect("spawn submission");
        pool.run_until_stalled();

        assert!(h.shell.is_busy());
        assert!(h.shell.view().busy);
        assert_eq!(submit(&h.shell, "echo queued"), SubmitOutcome::Busy);

        sender.send("done".to_string()).expect("signal handler");
        pool.run();

        assert_eq!(outcome.get(), Some(SubmitOutcome::Completed));
        assert!(!h.shell.is_busy());
        assert_eq!(h.shell.command_history(), vec!["wait".to_string()]);
        assert_eq!(outputs(&tail(&h.shell, 1)), vec![("done".to_string(), false)]);
    }

    #[test]
    fn achievement_unlocks_once_and_notifies_once() {
        let h = harness();
        assert!(block_on(h.shell.unlock_achievement("night owl")));
        assert!(!block_on(h.shell.unlock_achievement("night owl")));

        assert_eq!(h.shell.session().achievements, vec!["night owl".to_string()]);
        let sent = h.notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].body, "night owl");
        assert_eq!(sent[0].style, NotifyStyle::Success);
        assert_eq!(
            h.store.get_raw(&keys().achievements).as_deref(),
            Some(r#"["night owl"]"#)
        );
    }

    #[test]
    fn repeated_help_unlocks_curious_once() {
        let h = harness();
        submit(&h.shell, "help");
        submit(&h.shell, "help");
        assert_eq!(
            h.shell.session().achievements,
            vec![ACHIEVEMENT_CURIOUS.to_string()]
        );
        assert_eq!(h.notifier.sent().len(), 1);
    }

    #[test]
    fn cd_updates_prompt_navigates_and_persists() {
        let h = harness();
        submit(&h.shell, "cd projects");

        assert_eq!(h.shell.prompt(), "/projects>");
        assert_eq!(tail(&h.shell, 2)[0].input_text, "/> cd projects");
        assert_eq!(
            h.router.requests(),
            vec![NavigationRequest::Navigate("/projects".to_string())]
        );
        assert!(h.shell.session().achievements.contains(&ACHIEVEMENT_EXPLORER.to_string()));
        let raw = h.store.get_raw(&keys().session).unwrap_or_default();
        assert!(raw.contains("/projects"));
    }

    struct CheckingRouter {
        store: MemoryPrefsStore,
        seen_history: RefCell<Option<String>>,
    }

    impl NavigationService for CheckingRouter {
        fn navigate(&self, _path: &str) -> Result<(), String> {
            *self.seen_history.borrow_mut() = self.store.get_raw(&keys().history);
            Ok(())
        }

        fn reload(&self) -> Result<(), String> {
            Err("reload unsupported".to_string())
        }
    }

    #[test]
    fn router_runs_after_the_submission_is_saved() {
        let store = MemoryPrefsStore::default();
        let router = Rc::new(CheckingRouter {
            store: store.clone(),
            seen_history: RefCell::new(None),
        });
        let clock = ManualClock::starting_at(0);
        let ports = ports_for(
            Rc::new(store),
            router.clone(),
            Rc::new(NoopNotificationService),
            &clock,
        );
        let shell = block_on(CommandShell::open(ShellConfig::default(), ports, Vec::new()));

        submit(&shell, "cd skills");
        assert_eq!(
            router.seen_history.borrow().as_deref(),
            Some(r#"["cd skills"]"#)
        );

        assert_eq!(submit(&shell, "refresh"), SubmitOutcome::Completed);
        assert_eq!(
            outputs(&tail(&shell, 1)),
            vec![("Refreshing data...".to_string(), false)]
        );
    }

    #[test]
    fn state_survives_reopening_the_same_store() {
        let h = harness();
        submit(&h.shell, "echo one");
        submit(&h.shell, "theme light");
        block_on(h.shell.set_sound(false));

        let reopened = open_with(h.store.clone(), ShellConfig::default(), Vec::new());
        assert_eq!(reopened.shell.scrollback(), h.shell.scrollback());
        assert_eq!(reopened.shell.command_history(), h.shell.command_history());
        assert_eq!(reopened.shell.session(), h.shell.session());
        assert_eq!(reopened.shell.session().theme, ShellTheme::Light);
        assert!(!reopened.shell.session().sound_enabled);
    }

    #[test]
    fn initial_cwd_overrides_the_persisted_path() {
        let store = MemoryPrefsStore::default();
        store.insert_raw(
            keys().session,
            r#"{"cwd":"/skills","theme":"dark","sound_enabled":true}"#,
        );

        let restored = open_with(store.clone(), ShellConfig::default(), Vec::new());
        assert_eq!(restored.shell.prompt(), "/skills>");

        let forced = open_with(store, ShellConfig::at("/projects"), Vec::new());
        assert_eq!(forced.shell.prompt(), "/projects>");
    }

    #[test]
    fn malformed_persisted_state_is_discarded() {
        let store = MemoryPrefsStore::default();
        let keys = keys();
        store.insert_raw(keys.scrollback.clone(), "{broken");
        store.insert_raw(keys.history.clone(), r#"{"not":"a list"}"#);
        store.insert_raw(keys.achievements.clone(), "42");

        let h = open_with(store, ShellConfig::default(), Vec::new());
        assert_eq!(h.shell.scrollback().len(), 1);
        assert!(h.shell.command_history().is_empty());
        assert!(h.shell.session().achievements.is_empty());
    }

    #[test]
    fn restored_history_is_capped_and_empty_scrollback_welcomes() {
        let store = MemoryPrefsStore::default();
        let keys = keys();
        store.insert_raw(keys.scrollback.clone(), "[]");
        store.insert_raw(keys.history.clone(), r#"["c","b","a"]"#);
        let config = ShellConfig {
            history_capacity: 2,
            ..ShellConfig::default()
        };

        let h = open_with(store, config, Vec::new());
        assert_eq!(h.shell.scrollback().len(), 1);
        assert_eq!(
            h.shell.command_history(),
            vec!["c".to_string(), "b".to_string()]
        );
        submit(&h.shell, "d");
        assert_eq!(
            h.shell.command_history(),
            vec!["d".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn unavailable_storage_never_breaks_the_shell() {
        let clock = ManualClock::starting_at(0);
        let ports = ports_for(
            Rc::new(FailingPrefsStore::new("storage disabled")),
            Rc::new(NoopNavigationService),
            Rc::new(NoopNotificationService),
            &clock,
        );
        let shell = block_on(CommandShell::open(ShellConfig::default(), ports, Vec::new()));

        assert_eq!(submit(&shell, "echo still here"), SubmitOutcome::Completed);
        assert!(block_on(shell.unlock_achievement("resilient")));
        assert_eq!(
            outputs(&tail(&shell, 1)),
            vec![("still here".to_string(), false)]
        );
    }

    #[test]
    fn timestamps_never_decrease() {
        let h = harness();
        submit(&h.shell, "echo a");
        h.clock.set(10);
        submit(&h.shell, "echo b");
        h.clock.set(5_000);
        submit(&h.shell, "echo c");

        let stamps = h
            .shell
            .scrollback()
            .iter()
            .map(|entry| entry.timestamp_ms)
            .collect::<Vec<_>>();
        assert!(stamps.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(stamps.last().copied(), Some(5_000));
    }

    #[test]
    fn ctrl_l_clear_matches_the_clear_command() {
        let h = harness();
        submit(&h.shell, "echo a");
        block_on(h.shell.clear_scrollback());
        assert_eq!(h.shell.scrollback().len(), 1);
        assert_eq!(h.shell.command_history(), vec!["echo a".to_string()]);
        let saved = h.store.get_raw(&keys().scrollback).unwrap_or_default();
        assert!(!saved.contains("echo a"));
    }

    #[test]
    fn set_theme_persists_and_skips_unchanged_writes() {
        let h = harness();
        block_on(h.shell.set_theme(ShellTheme::Dark));
        assert_eq!(h.store.get_raw(&keys().session), None);

        block_on(h.shell.set_theme(ShellTheme::Light));
        let raw = h.store.get_raw(&keys().session).unwrap_or_default();
        assert!(raw.contains("\"light\""));
        assert_eq!(h.shell.view().session.theme, ShellTheme::Light);
    }
}
