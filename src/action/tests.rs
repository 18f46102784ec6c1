use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::Path;

use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Url(String),
    Directory(PathBuf),
    File(PathBuf),
    Direct(String, Vec<String>),
    Shell(String),
}

/// Records every launch. Direct launches fail unless the program is known.
#[derive(Debug, Default)]
struct RecordingLauncher {
    calls: RefCell<Vec<Call>>,
    known_programs: Vec<&'static str>,
    shell_fails: bool,
}

impl RecordingLauncher {
    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

impl Launcher for RecordingLauncher {
    fn open_url(&self, url: &str) -> io::Result<()> {
        self.calls.borrow_mut().push(Call::Url(url.into()));
        Ok(())
    }

    fn open_directory(&self, path: &Path) -> io::Result<()> {
        self.calls.borrow_mut().push(Call::Directory(path.into()));
        Ok(())
    }

    fn open_file(&self, path: &Path) -> io::Result<()> {
        self.calls.borrow_mut().push(Call::File(path.into()));
        Ok(())
    }

    fn spawn_direct(&self, program: &str, args: &[String]) -> io::Result<()> {
        self.calls
            .borrow_mut()
            .push(Call::Direct(program.into(), args.to_vec()));
        if self.known_programs.iter().any(|known| *known == program) {
            Ok(())
        } else {
            Err(io::Error::new(io::ErrorKind::NotFound, "not on PATH"))
        }
    }

    fn spawn_shell(&self, command: &str) -> io::Result<()> {
        self.calls.borrow_mut().push(Call::Shell(command.into()));
        if self.shell_fails {
            Err(io::Error::other("no shell"))
        } else {
            Ok(())
        }
    }
}

fn dispatcher() -> ActionDispatcher<RecordingLauncher> {
    ActionDispatcher::new(RecordingLauncher::default())
}

#[test]
fn urls_go_to_browser() {
    let d = dispatcher();
    assert_eq!(d.execute("https://example.com").unwrap(), LaunchRoute::Browser);
    assert_eq!(d.execute("www.example.com").unwrap(), LaunchRoute::Browser);
    assert_eq!(
        d.launcher().calls(),
        [
            Call::Url("https://example.com".into()),
            Call::Url("https://www.example.com".into()),
        ]
    );
}

#[test]
fn existing_directory_opens_in_file_browser() {
    let dir = tempfile::tempdir().unwrap();
    let d = dispatcher();
    let action = dir.path().to_string_lossy().into_owned();
    assert_eq!(d.execute(&action).unwrap(), LaunchRoute::Directory);
    assert_eq!(d.launcher().calls(), [Call::Directory(dir.path().into())]);
}

#[test]
fn existing_file_opens_with_default_application() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("notes.txt");
    std::fs::write(&file, "hi").unwrap();

    let d = dispatcher();
    let quoted = format!("\"{}\"", file.display());
    assert_eq!(d.execute(&quoted).unwrap(), LaunchRoute::File);
    assert_eq!(d.launcher().calls(), [Call::File(file)]);
}

#[test]
fn unresolvable_command_falls_back_to_shell() {
    let d = dispatcher();
    assert_eq!(d.execute("nonexistent-cmd --flag").unwrap(), LaunchRoute::Shell);
    assert_eq!(
        d.launcher().calls(),
        [
            Call::Direct("nonexistent-cmd".into(), vec!["--flag".into()]),
            Call::Shell("nonexistent-cmd --flag".into()),
        ]
    );
}

#[test]
fn shell_fallback_receives_unexpanded_line() {
    let d = dispatcher();
    assert_eq!(
        d.execute("nonexistent-cmd ${HOME} 'two words'").unwrap(),
        LaunchRoute::Shell
    );
    let expanded_home = expand_env("${HOME}");
    assert_eq!(
        d.launcher().calls(),
        [
            Call::Direct("nonexistent-cmd".into(), vec![expanded_home, "two words".into()]),
            Call::Shell("nonexistent-cmd ${HOME} 'two words'".into()),
        ]
    );
}

#[test]
fn resolvable_command_launches_directly() {
    let d = ActionDispatcher::new(RecordingLauncher {
        known_programs: vec!["editor"],
        ..RecordingLauncher::default()
    });
    assert_eq!(
        d.execute("editor 'my file.txt'").unwrap(),
        LaunchRoute::Direct
    );
    assert_eq!(
        d.launcher().calls(),
        [Call::Direct("editor".into(), vec!["my file.txt".into()])]
    );
}

#[test]
fn shell_syntax_skips_direct_launch() {
    let d = ActionDispatcher::new(RecordingLauncher {
        known_programs: vec!["ls"],
        ..RecordingLauncher::default()
    });
    assert_eq!(d.execute("ls | wc -l").unwrap(), LaunchRoute::Shell);
    assert_eq!(d.launcher().calls(), [Call::Shell("ls | wc -l".into())]);
}

#[test]
fn all_strategies_failing_is_reported() {
    let d = ActionDispatcher::new(RecordingLauncher {
        shell_fails: true,
        ..RecordingLauncher::default()
    });
    let err = d.execute("nonexistent-cmd").unwrap_err();
    match err {
        DockError::ActionLaunch { action, reason } => {
            assert_eq!(action, "nonexistent-cmd");
            assert!(reason.contains("direct") && reason.contains("shell"), "{reason}");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn blank_action_is_an_error() {
    let d = dispatcher();
    assert!(matches!(d.execute("   "), Err(DockError::ActionLaunch { .. })));
    assert!(d.launcher().calls().is_empty());
}

#[test]
fn split_command_handles_quotes_and_escapes() {
    assert_eq!(
        split_command(r#"prog "a b" 'c d' e\ f"#).unwrap(),
        ["prog", "a b", "c d", "e f"]
    );
    assert_eq!(split_command(r#"say "he said \"hi\"""#).unwrap(), ["say", "he said \"hi\""]);
    assert_eq!(split_command("  spaced   out  ").unwrap(), ["spaced", "out"]);
    assert!(split_command("broken 'quote").is_none());
}

#[test]
fn expansion_substitutes_known_variables() {
    let vars: HashMap<&str, &str> = [("HOME", "/home/u"), ("APP", "dock")].into();
    let lookup = |name: &str| vars.get(name).map(|v| v.to_string());

    assert_eq!(
        expand_with("$HOME/bin/${APP}-run %APP%", lookup, None),
        "/home/u/bin/dock-run dock"
    );
    assert_eq!(expand_with("$MISSING and 100%", lookup, None), "$MISSING and 100%");
    assert_eq!(
        expand_with("~/docs", lookup, Some(PathBuf::from("/home/u"))),
        "/home/u/docs"
    );
    assert_eq!(expand_with("a~b", lookup, Some(PathBuf::from("/h"))), "a~b");
}

#[test]
fn url_check_happens_before_path_lookup() {
    assert_eq!(
        classify("HTTP://Example.com"),
        Some(ActionTarget::Url("HTTP://Example.com".into()))
    );
    assert_eq!(classify(""), None);
}
