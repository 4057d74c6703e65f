//! User hand-off: browser launch and clipboard copy.
//!
//! Everything here is best-effort. A missing browser, a headless box, or a
//! hung `open` must never block or fail the flow, so the launch is raced
//! against a short ceiling and every error is swallowed.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::initiation::DeviceSession;

/// How long to wait on the browser launch before proceeding regardless.
pub const BROWSER_LAUNCH_CEILING: Duration = Duration::from_millis(200);

/// Presents the verification URL and code to the user.
#[async_trait]
pub trait Handoff: Send + Sync {
    async fn present(&self, session: &DeviceSession);
}

/// Production hand-off: prints instructions, opens the default browser, and
/// copies the URL to the clipboard.
pub struct DesktopHandoff;

#[async_trait]
impl Handoff for DesktopHandoff {
    async fn present(&self, session: &DeviceSession) {
        if let Some(url) = &session.verification_uri_complete {
            println!("Opening your browser to complete login...");
            println!("(If it does not open automatically, use this URL):");
            println!("{url}");
            open_browser(url).await;
            if copy_to_clipboard(url).await {
                println!("Login URL copied to clipboard.");
            }
        } else {
            println!("Please visit the following URL in your browser to authorize:");
            println!("{}", session.verification_uri);
            if let Some(code) = &session.user_code {
                println!("Then enter this code:");
                println!("{code}");
            }
            if copy_to_clipboard(&session.verification_uri).await {
                println!("URL copied to clipboard.");
            }
        }
    }
}

/// Launch the platform browser opener, waiting at most
/// [`BROWSER_LAUNCH_CEILING`]. The child is not killed on timeout — the
/// browser may still come up after we have moved on to polling.
async fn open_browser(url: &str) {
    let mut command = open_command(url);
    command.stdout(Stdio::null()).stderr(Stdio::null());

    let launch = async {
        if let Ok(mut child) = command.spawn() {
            let _ = child.wait().await;
        }
    };
    let _ = tokio::time::timeout(BROWSER_LAUNCH_CEILING, launch).await;
}

#[cfg(target_os = "macos")]
fn open_command(url: &str) -> Command {
    let mut command = Command::new("open");
    command.arg(url);
    command
}

#[cfg(target_os = "linux")]
fn open_command(url: &str) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(url);
    command
}

#[cfg(target_os = "windows")]
fn open_command(url: &str) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", url]);
    command
}

/// Pipe `text` into the platform clipboard command. Returns whether the copy
/// succeeded; callers only report the outcome, never act on it.
async fn copy_to_clipboard(text: &str) -> bool {
    let mut command = clipboard_command();
    command
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(_) => return false,
    };

    let Some(mut stdin) = child.stdin.take() else {
        return false;
    };
    if stdin.write_all(text.as_bytes()).await.is_err() {
        return false;
    }
    drop(stdin);

    matches!(child.wait().await, Ok(status) if status.success())
}

#[cfg(target_os = "macos")]
fn clipboard_command() -> Command {
    Command::new("pbcopy")
}

#[cfg(target_os = "linux")]
fn clipboard_command() -> Command {
    let mut command = Command::new("xclip");
    command.args(["-selection", "clipboard"]);
    command
}

#[cfg(target_os = "windows")]
fn clipboard_command() -> Command {
    Command::new("clip")
}
