//! Browser-native terminal shell engine for the portfolio site.
//!
//! [`CommandShell`] owns the command registry, the edit buffer, command history, suggestions,
//! scrollback and session state. It reaches its environment only through the ports in
//! [`ShellPorts`], so every behavior runs the same against browser adapters and test fakes.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod builtins;
mod command;
mod config;
mod history;
mod input;
mod parser;
mod persistence;
mod registry;
mod render;
mod scrollback;
mod session;
mod shell;

pub use builtins::{ACHIEVEMENT_CURIOUS, ACHIEVEMENT_EXPLORER, ACHIEVEMENT_STYLIST};
pub use command::{Command, CommandContext, CommandHandler};
pub use config::{SectionRoute, ShellConfig};
pub use history::CommandHistoryLog;
pub use input::InputState;
pub use persistence::{load_json, save_json, PersistenceError, StorageKeys};
pub use registry::CommandRegistry;
pub use render::{echo_line, prompt, render_entry, render_scrollback, LineKind, RenderedLine};
pub use scrollback::Scrollback;
pub use session::{reduce_session, SessionState, ShellAction, ShellEffect};
pub use shell::{CommandShell, ShellPorts, ShellView, SubmitOutcome};
pub use terminal_shell_contract as contract;
