//! Classifies a button's action string and launches it.
//!
//! Order, first match wins:
//! 1. `http://`, `https://` or `www.` goes to the web browser.
//! 2. After environment expansion, an existing path is opened: directories in
//!    the file browser, files with their default application.
//! 3. Anything else is a command, launched directly when it can be split into
//!    a resolvable program and arguments, otherwise through the shell. The
//!    shell gets the line as written and does its own expansion.

mod launcher;
#[cfg(test)]
mod tests;

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

pub use self::launcher::{Launcher, SystemLauncher};
use crate::error::DockError;

const URL_PREFIXES: [&str; 3] = ["http://", "https://", "www."];
/// Characters that only make sense to a shell.
const SHELL_METACHARACTERS: &[char] = &['|', '&', ';', '<', '>', '(', ')', '`', '*', '?'];

/// What an action string turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionTarget {
    Url(String),
    Directory(PathBuf),
    File(PathBuf),
    /// A command line. `line` is what the user wrote and is what a shell
    /// receives; `expanded` has variables substituted for a direct launch.
    Command { line: String, expanded: String },
}

/// The launch path that finally succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaunchRoute {
    Browser,
    Directory,
    File,
    Direct,
    Shell,
}

impl fmt::Display for LaunchRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LaunchRoute::Browser => "browser",
            LaunchRoute::Directory => "directory",
            LaunchRoute::File => "file",
            LaunchRoute::Direct => "direct",
            LaunchRoute::Shell => "shell",
        })
    }
}

/// Classifies an action. Returns `None` for a blank action.
pub fn classify(action: &str) -> Option<ActionTarget> {
    let action = action.trim();
    if action.is_empty() {
        return None;
    }

    let lower = action.to_ascii_lowercase();
    if URL_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        let url = if lower.starts_with("www.") {
            format!("https://{action}")
        } else {
            action.to_string()
        };
        return Some(ActionTarget::Url(url));
    }

    let expanded = expand_env(action);
    let candidate = Path::new(unquote(&expanded));
    if candidate.is_dir() {
        return Some(ActionTarget::Directory(candidate.to_path_buf()));
    }
    if candidate.exists() {
        return Some(ActionTarget::File(candidate.to_path_buf()));
    }

    Some(ActionTarget::Command {
        line: action.to_string(),
        expanded,
    })
}

/// Fire-and-forget launcher for action strings.
#[derive(Debug, Clone, Default)]
pub struct ActionDispatcher<L = SystemLauncher> {
    launcher: L,
}

impl<L: Launcher> ActionDispatcher<L> {
    pub fn new(launcher: L) -> Self {
        Self { launcher }
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Starts the action and returns the route that worked. Never waits for
    /// the launched program.
    pub fn execute(&self, action: &str) -> Result<LaunchRoute, DockError> {
        let fail = |reason: String| DockError::ActionLaunch {
            action: action.to_string(),
            reason,
        };

        let target = classify(action).ok_or_else(|| fail("action is empty".into()))?;
        debug!(action, ?target, "dispatching action");

        let route = match target {
            ActionTarget::Url(url) => self
                .launcher
                .open_url(&url)
                .map(|()| LaunchRoute::Browser)
                .map_err(|e| fail(format!("browser: {e}")))?,
            ActionTarget::Directory(path) => self
                .launcher
                .open_directory(&path)
                .map(|()| LaunchRoute::Directory)
                .map_err(|e| fail(format!("file browser: {e}")))?,
            ActionTarget::File(path) => self
                .launcher
                .open_file(&path)
                .map(|()| LaunchRoute::File)
                .map_err(|e| fail(format!("default application: {e}")))?,
            ActionTarget::Command { line, expanded } => {
                self.run_command(&line, &expanded).map_err(fail)?
            }
        };

        info!(action, %route, "action launched");
        Ok(route)
    }

    /// Tries `expanded` directly, then hands the unexpanded `line` to the
    /// shell so variable values are not interpreted twice.
    fn run_command(&self, line: &str, expanded: &str) -> Result<LaunchRoute, String> {
        let direct_err = match direct_argv(expanded) {
            Some((program, args)) => match self.launcher.spawn_direct(&program, &args) {
                Ok(()) => return Ok(LaunchRoute::Direct),
                Err(err) => {
                    debug!(%program, error = %err, "direct launch failed, trying shell");
                    Some(err)
                }
            },
            None => None,
        };

        match self.launcher.spawn_shell(line) {
            Ok(()) => Ok(LaunchRoute::Shell),
            Err(shell_err) => {
                warn!(command = line, error = %shell_err, "shell launch failed");
                Err(match direct_err {
                    Some(direct_err) => format!("direct: {direct_err}; shell: {shell_err}"),
                    None => format!("shell: {shell_err}"),
                })
            }
        }
    }
}

/// Program and arguments for a direct launch, or `None` when the command
/// needs a shell to mean what it says.
fn direct_argv(command: &str) -> Option<(String, Vec<String>)> {
    if command.contains(SHELL_METACHARACTERS) {
        return None;
    }
    let mut words = split_command(command)?.into_iter();
    let program = words.next()?;
    Some((program, words.collect()))
}

/// Splits a command line into words, honouring single quotes, double quotes
/// and backslash escapes. Returns `None` on an unterminated quote.
pub fn split_command(input: &str) -> Option<Vec<String>> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                in_word = true;
                loop {
                    match chars.next()? {
                        '\'' => break,
                        other => word.push(other),
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next()? {
                        '"' => break,
                        '\\' => match chars.next()? {
                            escaped @ ('"' | '\\' | '$' | '`') => word.push(escaped),
                            other => {
                                word.push('\\');
                                word.push(other);
                            }
                        },
                        other => word.push(other),
                    }
                }
            }
            '\\' if !cfg!(windows) => {
                in_word = true;
                word.push(chars.next()?);
            }
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut word));
                    in_word = false;
                }
            }
            other => {
                in_word = true;
                word.push(other);
            }
        }
    }
    if in_word {
        words.push(word);
    }
    Some(words)
}

/// Expands a leading `~` and `$VAR`, `${VAR}` and `%VAR%` references.
/// Unknown variables are left as written.
pub fn expand_env(input: &str) -> String {
    expand_with(input, |name| std::env::var(name).ok(), dirs::home_dir())
}

fn expand_with(
    input: &str,
    lookup: impl Fn(&str) -> Option<String>,
    home: Option<PathBuf>,
) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    if let Some(home) = home
        && (rest == "~" || rest.starts_with("~/") || rest.starts_with("~\\"))
    {
        out.push_str(&home.to_string_lossy());
        rest = &rest[1..];
    }

    while let Some(pos) = rest.find(['$', '%']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        let (name, consumed) = if let Some(braced) = tail.strip_prefix("${") {
            match braced.find('}') {
                Some(end) => (&braced[..end], end + 3),
                None => ("", 0),
            }
        } else if let Some(dollar) = tail.strip_prefix('$') {
            let len = dollar
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(dollar.len());
            (&dollar[..len], len + 1)
        } else {
            let percent = &tail[1..];
            match percent.find('%') {
                Some(end) if end > 0 && !percent[..end].contains(char::is_whitespace) => {
                    (&percent[..end], end + 2)
                }
                _ => ("", 0),
            }
        };

        if consumed == 0 || name.is_empty() {
            out.push_str(&tail[..1]);
            rest = &tail[1..];
            continue;
        }
        match lookup(name) {
            Some(value) => out.push_str(&value),
            None => out.push_str(&tail[..consumed]),
        }
        rest = &tail[consumed..];
    }
    out.push_str(rest);
    out
}

/// Strips one pair of matching surrounding quotes.
fn unquote(s: &str) -> &str {
    let s = s.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = s
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    s
}
