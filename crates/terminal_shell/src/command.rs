//! Command records and the context handed to handlers.

use std::{cell::RefCell, future::Future, rc::Rc};

use futures::future::LocalBoxFuture;
use terminal_shell_contract::{CommandDescriptor, CommandOutput, SessionSnapshot, ShellError};

use crate::{config::ShellConfig, session::ShellAction};

/// Async command handler.
///
/// Synchronous handlers are wrapped in ready futures, so the dispatcher awaits every handler
/// the same way.
pub type CommandHandler =
    Rc<dyn Fn(CommandContext) -> LocalBoxFuture<'static, Result<CommandOutput, ShellError>>>;

/// A named, invocable unit.
#[derive(Clone)]
pub struct Command {
    /// Name and help text.
    pub descriptor: CommandDescriptor,
    /// Handler invoked with the parsed arguments.
    pub handler: CommandHandler,
}

impl Command {
    /// Creates a command from an async handler.
    pub fn new<F, Fut>(name: &str, description: &str, handler: F) -> Self
    where
        F: Fn(CommandContext) -> Fut + 'static,
        Fut: Future<Output = Result<CommandOutput, ShellError>> + 'static,
    {
        let handler: CommandHandler = Rc::new(
            move |context: CommandContext| -> LocalBoxFuture<'static, Result<CommandOutput, ShellError>> {
                Box::pin(handler(context))
            },
        );
        Self {
            descriptor: CommandDescriptor::new(name, description),
            handler,
        }
    }

    /// Creates a command from a synchronous handler.
    pub fn sync<F>(name: &str, description: &str, handler: F) -> Self
    where
        F: Fn(&CommandContext) -> Result<CommandOutput, ShellError> + 'static,
    {
        let handler: CommandHandler = Rc::new(
            move |context: CommandContext| -> LocalBoxFuture<'static, Result<CommandOutput, ShellError>> {
                let result = handler(&context);
                Box::pin(async move { result })
            },
        );
        Self {
            descriptor: CommandDescriptor::new(name, description),
            handler,
        }
    }

    /// Creates a command that always prints `text`.
    pub fn text(name: &str, description: &str, text: impl Into<String>) -> Self {
        let text = text.into();
        Self::sync(name, description, move |_| Ok(CommandOutput::Text(text.clone())))
    }

    /// Returns the command name.
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// Everything a handler may read, plus a queue for the side effects it requests.
#[derive(Clone)]
pub struct CommandContext {
    /// Lowercased command name as resolved.
    pub name: String,
    /// Positional arguments after the command name.
    pub args: Vec<String>,
    /// Working path when the handler started.
    pub cwd: String,
    /// Session state when the handler started.
    pub session: SessionSnapshot,
    /// Submitted lines, most recent first.
    pub history: Vec<String>,
    commands: Rc<[CommandDescriptor]>,
    config: Rc<ShellConfig>,
    actions: Rc<RefCell<Vec<ShellAction>>>,
}

impl CommandContext {
    pub(crate) fn new(
        name: String,
        args: Vec<String>,
        session: SessionSnapshot,
        history: Vec<String>,
        commands: Rc<[CommandDescriptor]>,
        config: Rc<ShellConfig>,
        actions: Rc<RefCell<Vec<ShellAction>>>,
    ) -> Self {
        Self {
            name,
            args,
            cwd: session.cwd.clone(),
            session,
            history,
            commands,
            config,
            actions,
        }
    }

    /// Returns the merged registry in iteration order.
    pub fn commands(&self) -> &[CommandDescriptor] {
        &self.commands
    }

    /// Returns the shell configuration.
    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Returns the positional argument at `index`.
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    /// Queues a session action. Actions are applied in order once the handler settles.
    pub fn dispatch(&self, action: ShellAction) {
        self.actions.borrow_mut().push(action);
    }
}
