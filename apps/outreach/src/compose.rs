//! Compose handoff: opens a pre-filled webmail compose window.
//!
//! Fire-and-forget: there is no channel back from the mail client, so the
//! caller records the send as soon as the link is handed off.

use std::io;
use std::process::{Command, ExitStatus, Stdio};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::{info, warn};

use crate::models::DraftEmail;

/// Characters left unescaped by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub const DEFAULT_ACCOUNT_SLOT: u8 = 2;

fn encode(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Builds the Gmail compose deep link for the browser account at `slot`.
/// `recipient` may be empty; the user then fills it in by hand.
pub fn build_compose_link(slot: u8, recipient: &str, subject: &str, body: &str) -> String {
    format!(
        "https://mail.google.com/mail/u/{slot}/?view=cm&fs=1&to={}&su={}&body={}",
        encode(recipient),
        encode(subject),
        encode(body)
    )
}

/// Opens URLs in the host environment.
pub trait BrowserLauncher: Send + Sync {
    fn open(&self, url: &str) -> io::Result<()>;
}

/// Spawns the platform's URL opener. The shell does not wait for it; a
/// background thread reaps the child once the opener exits.
pub struct SystemBrowser;

impl BrowserLauncher for SystemBrowser {
    fn open(&self, url: &str) -> io::Result<()> {
        let mut command = if cfg!(target_os = "macos") {
            Command::new("open")
        } else if cfg!(target_os = "windows") {
            let mut c = Command::new("rundll32");
            c.arg("url.dll,FileProtocolHandler");
            c
        } else {
            Command::new("xdg-open")
        };

        command.arg(url);
        spawn_reaped(command).map(|_| ())
    }
}

/// Spawns `command` detached from the terminal and waits for it on a
/// background thread so it does not linger as a zombie.
fn spawn_reaped(mut command: Command) -> io::Result<JoinHandle<io::Result<ExitStatus>>> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    Ok(thread::spawn(move || {
        let status = child.wait();
        if let Ok(status) = &status {
            if !status.success() {
                warn!("URL opener exited with {status}");
            }
        }
        status
    }))
}

/// Builds the compose link for a draft and opens it.
#[derive(Clone)]
pub struct ComposeHandoff {
    slot: u8,
    launcher: Arc<dyn BrowserLauncher>,
}

impl ComposeHandoff {
    pub fn new(slot: u8, launcher: Arc<dyn BrowserLauncher>) -> Self {
        Self { slot, launcher }
    }

    pub fn slot(&self) -> u8 {
        self.slot
    }

    /// Returns the link whether or not the browser could be launched, so the
    /// shell can print it for manual use.
    pub fn open(&self, recipient: &str, draft: &DraftEmail) -> String {
        let url = build_compose_link(self.slot, recipient, &draft.subject, &draft.body);
        match self.launcher.open(&url) {
            Ok(()) => info!("Opened compose window for account slot {}", self.slot),
            Err(err) => warn!("Could not open browser for compose link: {err}"),
        }
        url
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::io;
    use std::sync::Mutex;

    use super::BrowserLauncher;

    /// Launcher that records URLs instead of opening them.
    #[derive(Default)]
    pub struct RecordingLauncher {
        pub opened: Mutex<Vec<String>>,
        pub fail: bool,
    }

    impl BrowserLauncher for RecordingLauncher {
        fn open(&self, url: &str) -> io::Result<()> {
            self.opened.lock().unwrap().push(url.to_string());
            if self.fail {
                Err(io::Error::new(io::ErrorKind::NotFound, "no browser"))
            } else {
                Ok(())
            }
        }
    }
}
