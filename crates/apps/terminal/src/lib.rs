//! Terminal widget for the portfolio pages, backed by the [`terminal_shell`] engine.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod toast;

use std::{
    rc::Rc,
    sync::atomic::{AtomicUsize, Ordering},
};

use leptos::ev::KeyboardEvent;
use leptos::*;
use platform_host::{NoopNotificationService, NotificationService, SystemClock, TimestampIdGenerator};
use platform_host_web::{WebLocationNavigation, WebPrefsStore};
use serde_json::Value;
use terminal_shell::{
    contract::{CycleDirection, HistoryDirection},
    Command, CommandShell, ShellConfig, ShellPorts, ShellView, SubmitOutcome,
};

pub use toast::{Toast, ToastNotifier, ToastStack};

static NEXT_TERMINAL_INSTANCE_ID: AtomicUsize = AtomicUsize::new(1);

/// What a key press asks the terminal to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Run the edit buffer.
    Submit,
    /// Move through command history.
    History(HistoryDirection),
    /// Move the suggestion selection.
    Cycle(CycleDirection),
    /// Take the selected suggestion.
    Accept,
    /// Hide suggestions.
    Dismiss,
    /// Reset scrollback.
    Clear,
}

/// Maps a key press to an action. Arrow keys move through suggestions while any are shown.
pub fn key_action(key: &str, ctrl: bool, suggestions_visible: bool) -> Option<KeyAction> {
    match key {
        "Enter" => Some(KeyAction::Submit),
        "ArrowUp" if suggestions_visible => Some(KeyAction::Cycle(CycleDirection::Previous)),
        "ArrowDown" if suggestions_visible => Some(KeyAction::Cycle(CycleDirection::Next)),
        "ArrowUp" => Some(KeyAction::History(HistoryDirection::Older)),
        "ArrowDown" => Some(KeyAction::History(HistoryDirection::Newer)),
        "Tab" => Some(KeyAction::Accept),
        "Escape" => Some(KeyAction::Dismiss),
        "l" | "L" if ctrl => Some(KeyAction::Clear),
        _ => None,
    }
}

/// Runs `line` and leaves `running` matching the shell's busy flag.
///
/// A rejected submission leaves the flag of the submission still in flight untouched.
pub async fn submit_tracked(
    shell: &CommandShell,
    line: &str,
    running: RwSignal<bool>,
) -> SubmitOutcome {
    if !shell.is_busy() {
        running.try_set(true);
    }
    let outcome = shell.submit(line).await;
    running.try_set(shell.is_busy());
    outcome
}

/// Builds the shell config for a page: launch params first, then the page path.
pub fn terminal_config(initial_path: Option<&str>, launch_params: Option<&Value>) -> ShellConfig {
    let mut config = launch_params
        .map(ShellConfig::from_launch_params)
        .unwrap_or_default();
    if let Some(path) = initial_path {
        config.initial_cwd = Some(path.to_string());
    }
    config.normalized()
}

/// Browser ports: localStorage, full-page navigation and the toast notifier in context.
pub fn browser_ports() -> ShellPorts {
    let notifier: Rc<dyn NotificationService> = match use_context::<ToastNotifier>() {
        Some(notifier) => Rc::new(notifier),
        None => Rc::new(NoopNotificationService),
    };
    ShellPorts {
        store: Rc::new(WebPrefsStore),
        router: Rc::new(WebLocationNavigation),
        notifier,
        clock: Rc::new(SystemClock),
        ids: Rc::new(TimestampIdGenerator::default()),
    }
}

#[component]
/// Interactive terminal.
///
/// Opens a [`CommandShell`] over persisted state, renders its scrollback, and routes typing and
/// key presses to it.
pub fn TerminalApp(
    /// Working path for this page; overrides the persisted one.
    #[prop(optional, into)]
    initial_path: Option<String>,
    /// Page-specific commands appended after the built-ins.
    #[prop(optional)]
    commands: Vec<Command>,
    /// JSON launch parameters overlaid on the default config.
    #[prop(optional)]
    launch_params: Option<Value>,
    /// Host collaborators; defaults to [`browser_ports`].
    #[prop(optional)]
    ports: Option<ShellPorts>,
) -> impl IntoView {
    let input_id = format!(
        "portfolio-terminal-input-{}",
        NEXT_TERMINAL_INSTANCE_ID.fetch_add(1, Ordering::Relaxed)
    );
    let shell_slot = store_value::<Option<CommandShell>>(None);
    let view_state = create_rw_signal::<Option<ShellView>>(None);
    let running = create_rw_signal(false);
    let screen_ref = create_node_ref::<html::Div>();
    let input_ref = create_node_ref::<html::Input>();

    let config = terminal_config(initial_path.as_deref(), launch_params.as_ref());
    let ports = ports.unwrap_or_else(browser_ports);
    spawn_local(async move {
        let shell = CommandShell::open(config, ports, commands).await;
        let view = shell.view();
        if shell_slot.try_update_value(|slot| *slot = Some(shell)).is_none() {
            return;
        }
        view_state.try_set(Some(view));
    });

    let refresh = move || {
        if let Some(Some(shell)) = shell_slot.try_get_value() {
            view_state.try_set(Some(shell.view()));
        }
    };

    let submit = move |line: String| {
        let Some(shell) = shell_slot.get_value() else {
            return;
        };
        if shell.is_busy() {
            return;
        }
        spawn_local(async move {
            submit_tracked(&shell, &line, running).await;
            view_state.try_set(Some(shell.view()));
        });
    };

    let clear = move || {
        let Some(shell) = shell_slot.get_value() else {
            return;
        };
        spawn_local(async move {
            shell.clear_scrollback().await;
            view_state.try_set(Some(shell.view()));
        });
    };

    let toggle_theme = move || {
        let Some(shell) = shell_slot.get_value() else {
            return;
        };
        spawn_local(async move {
            shell.set_theme(shell.session().theme.toggled()).await;
            view_state.try_set(Some(shell.view()));
        });
    };

    let toggle_sound = move || {
        let Some(shell) = shell_slot.get_value() else {
            return;
        };
        spawn_local(async move {
            shell.set_sound(!shell.session().sound_enabled).await;
            view_state.try_set(Some(shell.view()));
        });
    };

    let on_typed = move |value: String| {
        if let Some(shell) = shell_slot.get_value() {
            shell.set_input(&value);
            shell.update_suggestions(&value);
            refresh();
        }
    };

    let on_keydown = move |ev: KeyboardEvent| {
        let Some(shell) = shell_slot.get_value() else {
            return;
        };
        let suggestions_visible = !shell.suggestions().is_empty();
        let Some(action) = key_action(&ev.key(), ev.ctrl_key(), suggestions_visible) else {
            return;
        };
        match action {
            KeyAction::Submit => {
                ev.prevent_default();
                submit(shell.input());
                return;
            }
            KeyAction::History(direction) => {
                ev.prevent_default();
                shell.navigate_history(direction);
            }
            KeyAction::Cycle(direction) => {
                ev.prevent_default();
                shell.cycle_suggestion(direction);
            }
            KeyAction::Accept => {
                ev.prevent_default();
                if !suggestions_visible {
                    shell.update_suggestions(&shell.input());
                }
                shell.accept_suggestion();
            }
            KeyAction::Dismiss => shell.dismiss_suggestions(),
            KeyAction::Clear => {
                ev.prevent_default();
                clear();
                return;
            }
        }
        refresh();
    };

    let pick_suggestion = move |name: String| {
        if let Some(shell) = shell_slot.get_value() {
            shell.set_input(&name);
            shell.dismiss_suggestions();
            refresh();
        }
        if let Some(input) = input_ref.get_untracked() {
            let _ = input.focus();
        }
    };

    create_effect(move |_| {
        let count = view_state.with(|view| view.as_ref().map_or(0, |view| view.lines.len()));
        if let Some(screen) = screen_ref.get() {
            screen.set_scroll_top(screen.scroll_height());
        }
        count
    });

    let lines = move || {
        view_state.with(|view| view.as_ref().map(|view| view.lines.clone()).unwrap_or_default())
    };
    let suggestions = move || {
        view_state.with(|view| {
            view.as_ref()
                .map(|view| {
                    view.suggestions
                        .iter()
                        .cloned()
                        .enumerate()
                        .map(|(index, name)| (index, name, view.selected_suggestion == Some(index)))
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default()
        })
    };
    let theme_class = move || {
        let theme = view_state.with(|view| view.as_ref().map(|view| view.session.theme).unwrap_or_default());
        format!("app-shell app-terminal-shell terminal-theme-{}", theme.id())
    };
    let prompt = move || {
        view_state.with(|view| view.as_ref().map(|view| view.prompt.clone()).unwrap_or_default())
    };
    let buffer = move || {
        view_state.with(|view| view.as_ref().map(|view| view.input.clone()).unwrap_or_default())
    };
    let sound_label = move || {
        let enabled = view_state.with(|view| view.as_ref().map_or(true, |view| view.session.sound_enabled));
        if enabled {
            "Sound: on"
        } else {
            "Sound: off"
        }
    };
    let status = move || {
        view_state.with(|view| match view {
            None => "Loading terminal".to_string(),
            Some(_) if running.get() => "Running command".to_string(),
            Some(view) => format!("Ready, {} achievement(s)", view.session.achievements.len()),
        })
    };

    view! {
        <div class=theme_class>
            <div class="terminal-toolbar">
                <button type="button" class="app-action" on:click=move |_| submit("help".to_string())>"Help"</button>
                <button type="button" class="app-action" on:click=move |_| clear()>"Clear"</button>
                <button type="button" class="app-action" on:click=move |_| toggle_theme()>"Theme"</button>
                <button type="button" class="app-action" on:click=move |_| toggle_sound()>{sound_label}</button>
            </div>

            <div
                class="terminal-screen"
                role="log"
                aria-live="polite"
                node_ref=screen_ref
                on:click=move |_| {
                    if let Some(input) = input_ref.get_untracked() {
                        let _ = input.focus();
                    }
                }
            >
                <For each=lines key=|line| (line.entry_id.as_str().to_string(), line.line) let:line>
                    <div class=format!("terminal-line terminal-line-{}", line.kind.id())>{line.text}</div>
                </For>
            </div>

            <Show when=move || !suggestions().is_empty() fallback=|| ()>
                <div class="terminal-completions" role="listbox" aria-label="Suggestions">
                    <For each=suggestions key=|(index, name, selected)| (*index, name.clone(), *selected) let:item>
                        <button
                            type="button"
                            role="option"
                            aria-selected=item.2.to_string()
                            class={if item.2 { "terminal-completion selected" } else { "terminal-completion" }}
                            on:click={
                                let name = item.1.clone();
                                move |_| pick_suggestion(name.clone())
                            }
                        >
                            {item.1.clone()}
                        </button>
                    </For>
                </div>
            </Show>

            <div class="terminal-input-row">
                <label class="terminal-prompt" for=input_id.clone()>{prompt}</label>
                <input
                    id=input_id.clone()
                    node_ref=input_ref
                    class="terminal-input app-field"
                    type="text"
                    prop:value=buffer
                    prop:readOnly=move || running.get()
                    aria-busy=move || running.get().to_string()
                    on:input=move |ev| on_typed(event_target_value(&ev))
                    on:keydown=on_keydown
                    placeholder="Type 'help' to get started"
                    autocomplete="off"
                    spellcheck="false"
                />
                <button
                    type="button"
                    class="terminal-run app-action"
                    prop:disabled=move || running.get()
                    on:click=move |_| submit(buffer())
                >
                    "Run"
                </button>
            </div>

            <div class="app-statusbar">
                <span>{status}</span>
                <span>{move || format!("{} line(s)", lines().len())}</span>
            </div>
        </div>
    }
}
