//! Host mail-client capability.
//!
//! The runtime never assumes a host is present. When one is attached it can
//! receive fire-and-forget commands and answer environment lookups; when none is
//! attached, every feature that needs it is simply inert.

use std::collections::BTreeMap;

/// Lifecycle hooks fired by the host application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostHook {
    /// The host finished its own initialisation.
    Init,
    /// An asynchronous request is about to start.
    BeforeRequest,
    /// An asynchronous request completed and content may have been replaced.
    ResponseAfter,
}

impl HostHook {
    /// Parses the host's hook name (`"init"`, `"beforerequest"`, `"responseafter"`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "init" => Some(Self::Init),
            "beforerequest" => Some(Self::BeforeRequest),
            "responseafter" => Some(Self::ResponseAfter),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::BeforeRequest => "beforerequest",
            Self::ResponseAfter => "responseafter",
        }
    }
}

/// Commands and environment exposed by the host mail client.
pub trait HostApp {
    /// Runs a host command. No result is observed.
    fn command(&mut self, name: &str, args: &[String]);

    /// Looks up a host environment value such as `"task"`.
    fn env(&self, key: &str) -> Option<String>;
}

/// A command the host received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostCommand {
    pub name: String,
    pub args: Vec<String>,
}

/// Host that records commands instead of running them.
///
/// Used by the demo binary and the test-suite.
///
/// # Examples
///
/// ```
/// use mailskin::host::{HostApp, RecordingHost};
///
/// let mut host = RecordingHost::new().with_env("task", "mail");
/// host.command("compose", &[]);
/// assert_eq!(host.env("task").as_deref(), Some("mail"));
/// assert_eq!(host.command_names(), vec!["compose"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    env: BTreeMap<String, String>,
    commands: Vec<HostCommand>,
}

impl RecordingHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }

    #[must_use]
    pub fn commands(&self) -> &[HostCommand] {
        &self.commands
    }

    #[must_use]
    pub fn command_names(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl HostApp for RecordingHost {
    fn command(&mut self, name: &str, args: &[String]) {
        tracing::debug!(command = %name, ?args, "host command");
        self.commands.push(HostCommand {
            name: name.to_string(),
            args: args.to_vec(),
        });
    }

    fn env(&self, key: &str) -> Option<String> {
        self.env.get(key).cloned()
    }
}
