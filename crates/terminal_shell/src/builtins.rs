//! Commands every shell registers before host extensions.

use terminal_shell_contract::{CommandOutput, ShellError, ShellErrorCode, ShellTheme};

use crate::{
    command::{Command, CommandContext},
    session::ShellAction,
};

/// Unlocked by running `help`.
pub const ACHIEVEMENT_CURIOUS: &str = "curious";
/// Unlocked by a successful `cd`.
pub const ACHIEVEMENT_EXPLORER: &str = "explorer";
/// Unlocked by changing the theme.
pub const ACHIEVEMENT_STYLIST: &str = "stylist";

const HELP_NAME_WIDTH: usize = 15;
const ROOT: &str = "/";

/// Returns the built-in commands in registry order.
pub(crate) fn builtin_commands() -> Vec<Command> {
    vec![
        Command::sync("help", "Show available commands", help),
        Command::sync("clear", "Clear the terminal", |_| Ok(CommandOutput::Clear)),
        Command::sync("ls", "List available sections", ls),
        Command::sync("cd", "Navigate to a section (e.g., cd projects)", cd),
        Command::sync("pwd", "Print the current path", |context| {
            Ok(CommandOutput::text(context.cwd.clone()))
        }),
        Command::sync("echo", "Print the arguments", |context| {
            Ok(CommandOutput::text(context.args.join(" ")))
        }),
        Command::sync("about", "Show information about this application", |context| {
            Ok(CommandOutput::text(context.config().about_text.clone()))
        }),
        Command::sync("history", "Show previously entered commands", history),
        Command::sync("theme", "Show or change the theme (dark, light, toggle)", theme),
        Command::sync("sound", "Show or change sound effects (on, off, toggle)", sound),
        Command::sync("achievements", "List unlocked achievements", achievements),
        Command::sync("refresh", "Refresh the current data", |context| {
            context.dispatch(ShellAction::Reload);
            Ok(CommandOutput::text("Refreshing data..."))
        }),
    ]
}

fn unlock(context: &CommandContext, name: &str) {
    context.dispatch(ShellAction::UnlockAchievement {
        name: name.to_string(),
    });
}

fn help(context: &CommandContext) -> Result<CommandOutput, ShellError> {
    unlock(context, ACHIEVEMENT_CURIOUS);
    Ok(CommandOutput::lines(context.commands().iter().map(|command| {
        format!(
            "{:<width$} - {}",
            command.name,
            command.description,
            width = HELP_NAME_WIDTH
        )
    })))
}

fn ls(context: &CommandContext) -> Result<CommandOutput, ShellError> {
    Ok(CommandOutput::lines(
        context.config().sections.iter().map(|section| &section.name),
    ))
}

fn cd(context: &CommandContext) -> Result<CommandOutput, ShellError> {
    let Some(target) = context.arg(0) else {
        return Err(ShellError::usage("Usage: cd <section>"));
    };

    let (cwd, route) = match target {
        ".." | ROOT | "~" => (ROOT.to_string(), ROOT.to_string()),
        name => {
            let name = name.trim_start_matches('/');
            let section = context.config().section(name).ok_or_else(|| {
                ShellError::new(
                    ShellErrorCode::NotFound,
                    format!("Directory not found: {target}"),
                )
            })?;
            (section.cwd.clone(), section.route.clone())
        }
    };

    context.dispatch(ShellAction::SetCwd { path: cwd.clone() });
    context.dispatch(ShellAction::Navigate { path: route });
    unlock(context, ACHIEVEMENT_EXPLORER);
    Ok(CommandOutput::text(format!("Changed directory to {cwd}")))
}

fn history(context: &CommandContext) -> Result<CommandOutput, ShellError> {
    if context.history.is_empty() {
        return Ok(CommandOutput::text("No commands in history."));
    }
    Ok(CommandOutput::lines(
        context
            .history
            .iter()
            .rev()
            .enumerate()
            .map(|(index, line)| format!("{:>4}  {line}", index + 1)),
    ))
}

fn theme(context: &CommandContext) -> Result<CommandOutput, ShellError> {
    let current = context.session.theme;
    let next = match context.arg(0) {
        None => {
            return Ok(CommandOutput::text(format!(
                "Current theme: {}",
                current.id()
            )))
        }
        Some(arg) if arg.eq_ignore_ascii_case("toggle") => current.toggled(),
        Some(arg) => ShellTheme::from_id(arg)
            .ok_or_else(|| ShellError::usage("Usage: theme [dark|light|toggle]"))?,
    };

    if next != current {
        context.dispatch(ShellAction::SetTheme { theme: next });
        unlock(context, ACHIEVEMENT_STYLIST);
    }
    Ok(CommandOutput::text(format!("Theme set to {}", next.id())))
}

fn sound(context: &CommandContext) -> Result<CommandOutput, ShellError> {
    let current = context.session.sound_enabled;
    let enabled = match context.arg(0).map(str::to_ascii_lowercase).as_deref() {
        None => {
            return Ok(CommandOutput::text(format!(
                "Sound is {}",
                on_off(current)
            )))
        }
        Some("on") => true,
        Some("off") => false,
        Some("toggle") => !current,
        Some(_) => return Err(ShellError::usage("Usage: sound [on|off|toggle]")),
    };

    context.dispatch(ShellAction::SetSound { enabled });
    Ok(CommandOutput::text(format!("Sound {}", on_off(enabled))))
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

fn achievements(context: &CommandContext) -> Result<CommandOutput, ShellError> {
    let unlocked = &context.session.achievements;
    if unlocked.is_empty() {
        return Ok(CommandOutput::text(
            "No achievements unlocked yet. Try 'help', 'cd' or 'theme'.",
        ));
    }
    Ok(CommandOutput::lines(
        unlocked.iter().map(|name| format!("* {name}")),
    ))
}
