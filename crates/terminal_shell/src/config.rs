//! Shell configuration and launch-parameter overlay.

use leptos::logging;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const DEFAULT_HISTORY_CAPACITY: usize = 50;
const DEFAULT_SUGGESTION_LIMIT: usize = 5;
const DEFAULT_STORAGE_PREFIX: &str = "portfolio.terminal";
const DEFAULT_WELCOME_MESSAGE: &str =
    "Welcome to CryptoTerminal v1.0.0\nType 'help' to see available commands.";
const DEFAULT_ABOUT_TEXT: &str = "CryptoTerminal v1.0.0\n\
A neo-brutalist CLI-inspired developer portfolio.\n\
Navigate with 'cd <section>', list sections with 'ls'.";

/// A named section reachable with `cd`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRoute {
    /// Name typed after `cd`.
    pub name: String,
    /// Working path shown in the prompt after entering the section.
    pub cwd: String,
    /// Router path navigated to.
    pub route: String,
}

impl SectionRoute {
    /// Creates a section whose prompt path and route are both `/<name>`.
    pub fn page(name: &str) -> Self {
        Self {
            name: name.to_string(),
            cwd: format!("/{name}"),
            route: format!("/{name}"),
        }
    }
}

/// Tunables for one shell instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Text of the welcome entry shown on start and after `clear`.
    pub welcome_message: String,
    /// Text printed by `about`.
    pub about_text: String,
    /// Working path forced at start. `None` restores the persisted path, or `/`.
    pub initial_cwd: Option<String>,
    /// Maximum number of remembered submissions.
    pub history_capacity: usize,
    /// Maximum number of suggestions offered at once.
    pub suggestion_limit: usize,
    /// Maximum number of scrollback entries kept and persisted. `None` keeps everything.
    pub scrollback_capacity: Option<usize>,
    /// Prefix for every persisted key.
    pub storage_prefix: String,
    /// Sections reachable with `cd`, listed by `ls`.
    pub sections: Vec<SectionRoute>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            welcome_message: DEFAULT_WELCOME_MESSAGE.to_string(),
            about_text: DEFAULT_ABOUT_TEXT.to_string(),
            initial_cwd: None,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            scrollback_capacity: None,
            storage_prefix: DEFAULT_STORAGE_PREFIX.to_string(),
            sections: ["about", "projects", "skills", "contact"]
                .into_iter()
                .map(SectionRoute::page)
                .collect(),
        }
    }
}

impl ShellConfig {
    /// Overlays JSON launch parameters on the defaults.
    ///
    /// Each known key is applied independently; a key whose value does not fit its field is
    /// skipped with a warning. `cwd` is accepted as a shorthand for `initial_cwd`.
    pub fn from_launch_params(params: &Value) -> Self {
        let mut config = Self::default();
        let Value::Object(overrides) = params else {
            return config;
        };

        for (key, value) in overrides {
            let field = if key == "cwd" { "initial_cwd" } else { key.as_str() };
            let Ok(Value::Object(mut current)) = serde_json::to_value(&config) else {
                return config;
            };
            if !current.contains_key(field) {
                continue;
            }
            current.insert(field.to_string(), value.clone());
            match serde_json::from_value::<Self>(Value::Object(current)) {
                Ok(next) => config = next,
                Err(err) => logging::warn!("terminal launch param `{key}` ignored: {err}"),
            }
        }

        config.normalized()
    }

    /// Clamps limits to usable values and drops blank paths.
    pub fn normalized(mut self) -> Self {
        self.history_capacity = self.history_capacity.max(1);
        self.suggestion_limit = self.suggestion_limit.max(1);
        self.scrollback_capacity = self.scrollback_capacity.map(|capacity| capacity.max(1));
        if self
            .initial_cwd
            .as_deref()
            .is_some_and(|cwd| cwd.trim().is_empty())
        {
            self.initial_cwd = None;
        }
        self
    }

    /// Builds a config that starts at `cwd`.
    pub fn at(cwd: impl Into<String>) -> Self {
        Self {
            initial_cwd: Some(cwd.into()),
            ..Self::default()
        }
        .normalized()
    }

    /// Finds a section by name, ignoring ASCII case.
    pub fn section(&self, name: &str) -> Option<&SectionRoute> {
        self.sections
            .iter()
            .find(|section| section.name.eq_ignore_ascii_case(name))
    }
}
