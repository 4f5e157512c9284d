//! Session state, the actions handlers may request, and the reducer applying them.

use terminal_shell_contract::{NotifyStyle, SessionSnapshot, ShellTheme};

const ACHIEVEMENT_TITLE: &str = "Achievement unlocked";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Process-wide state for one shell instance.
pub struct SessionState {
    /// Current working path.
    pub cwd: String,
    /// Active theme.
    pub theme: ShellTheme,
    /// Whether sound effects are enabled.
    pub sound_enabled: bool,
    /// Unlocked achievements in unlock order, without duplicates.
    pub achievements: Vec<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            cwd: "/".to_string(),
            theme: ShellTheme::default(),
            sound_enabled: true,
            achievements: Vec::new(),
        }
    }
}

impl SessionState {
    /// Returns a read-only copy for handlers and the UI.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            cwd: self.cwd.clone(),
            theme: self.theme,
            sound_enabled: self.sound_enabled,
            achievements: self.achievements.clone(),
        }
    }

    /// Returns whether `name` is unlocked.
    pub fn has_achievement(&self, name: &str) -> bool {
        self.achievements.iter().any(|unlocked| unlocked == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Session mutations requested by handlers or the host.
pub enum ShellAction {
    /// Change the working path shown in the prompt.
    SetCwd {
        /// New working path.
        path: String,
    },
    /// Ask the router to show a page.
    Navigate {
        /// Router path.
        path: String,
    },
    /// Ask the router to reload the current page.
    Reload,
    /// Select a theme.
    SetTheme {
        /// Theme to select.
        theme: ShellTheme,
    },
    /// Switch to the other theme.
    ToggleTheme,
    /// Enable or disable sound.
    SetSound {
        /// Whether sound is enabled.
        enabled: bool,
    },
    /// Flip the sound toggle.
    ToggleSound,
    /// Unlock a named achievement. Unlocking twice is a no-op.
    UnlockAchievement {
        /// Achievement name.
        name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents produced by [`reduce_session`] for the shell to execute.
pub enum ShellEffect {
    /// Navigate the router.
    Navigate(String),
    /// Reload the current page.
    Reload,
    /// Show a transient notification.
    Notify {
        /// Message title.
        title: String,
        /// Message body.
        body: String,
        /// Style hint.
        style: NotifyStyle,
    },
    /// Persist cwd, theme and sound.
    PersistSession,
    /// Persist the achievement set.
    PersistAchievements,
}

/// Applies one action to `state` and returns the effects to run.
///
/// Actions that leave the state unchanged produce no persistence effect.
pub fn reduce_session(state: &mut SessionState, action: ShellAction) -> Vec<ShellEffect> {
    let mut effects = Vec::new();
    match action {
        ShellAction::SetCwd { path } => {
            if state.cwd != path {
                state.cwd = path;
                effects.push(ShellEffect::PersistSession);
            }
        }
        ShellAction::Navigate { path } => effects.push(ShellEffect::Navigate(path)),
        ShellAction::Reload => effects.push(ShellEffect::Reload),
        ShellAction::SetTheme { theme } => {
            if state.theme != theme {
                state.theme = theme;
                effects.push(ShellEffect::PersistSession);
            }
        }
        ShellAction::ToggleTheme => {
            state.theme = state.theme.toggled();
            effects.push(ShellEffect::PersistSession);
        }
        ShellAction::SetSound { enabled } => {
            if state.sound_enabled != enabled {
                state.sound_enabled = enabled;
                effects.push(ShellEffect::PersistSession);
            }
        }
        ShellAction::ToggleSound => {
            state.sound_enabled = !state.sound_enabled;
            effects.push(ShellEffect::PersistSession);
        }
        ShellAction::UnlockAchievement { name } => {
            let name = name.trim();
            if !name.is_empty() && !state.has_achievement(name) {
                state.achievements.push(name.to_string());
                effects.push(ShellEffect::PersistAchievements);
                effects.push(ShellEffect::Notify {
                    title: ACHIEVEMENT_TITLE.to_string(),
                    body: name.to_string(),
                    style: NotifyStyle::Success,
                });
            }
        }
    }
    effects
}
