//! Core data model for the simulated IPC dashboard.
//!
//! Everything here is a closed vocabulary: the five IPC mechanisms, the
//! operations legal for each, and the realistic size/latency envelopes
//! used by the generators. Records (`Process`, `IpcEvent`, `Issue`) are
//! immutable once created, with one exception: `Issue::resolved` may be
//! flipped to `true` by the resolution sweep, never back.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The five simulated IPC primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IpcMechanism {
    Pipe,
    Socket,
    MessageQueue,
    SharedMemory,
    Signal,
}

impl IpcMechanism {
    /// All mechanisms, in the order the distribution panel lists them.
    pub const ALL: [IpcMechanism; 5] = [
        IpcMechanism::Pipe,
        IpcMechanism::Socket,
        IpcMechanism::MessageQueue,
        IpcMechanism::SharedMemory,
        IpcMechanism::Signal,
    ];

    /// Operations legal for this mechanism. Closed table; generators
    /// must only draw from here.
    pub fn operations(self) -> &'static [&'static str] {
        match self {
            IpcMechanism::Pipe => &["read", "write"],
            IpcMechanism::Socket => &["send", "recv", "connect", "accept"],
            IpcMechanism::MessageQueue => &["msgsnd", "msgrcv"],
            IpcMechanism::SharedMemory => &["shmat", "shmdt", "read", "write"],
            IpcMechanism::Signal => &["kill", "sigaction", "sigwait"],
        }
    }

    /// Inclusive message size bounds in bytes. Signals carry no payload.
    pub fn size_range_bytes(self) -> (u64, u64) {
        match self {
            IpcMechanism::Signal => (0, 0),
            IpcMechanism::SharedMemory => (1024, 1_048_576),
            IpcMechanism::Socket => (64, 65_536),
            IpcMechanism::Pipe | IpcMechanism::MessageQueue => (8, 8192),
        }
    }

    /// Half-open latency bounds in milliseconds.
    pub fn latency_range_ms(self) -> (f64, f64) {
        match self {
            IpcMechanism::SharedMemory => (0.0, 0.5),
            IpcMechanism::Signal => (0.0, 2.0),
            IpcMechanism::Pipe => (0.5, 10.5),
            IpcMechanism::Socket | IpcMechanism::MessageQueue => (2.0, 52.0),
        }
    }

    /// Wire name, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            IpcMechanism::Pipe => "pipe",
            IpcMechanism::Socket => "socket",
            IpcMechanism::MessageQueue => "message_queue",
            IpcMechanism::SharedMemory => "shared_memory",
            IpcMechanism::Signal => "signal",
        }
    }

    /// Human label for the distribution panel.
    pub fn label(self) -> &'static str {
        match self {
            IpcMechanism::Pipe => "Pipes",
            IpcMechanism::Socket => "Sockets",
            IpcMechanism::MessageQueue => "Message Queues",
            IpcMechanism::SharedMemory => "Shared Memory",
            IpcMechanism::Signal => "Signals",
        }
    }
}

/// Outcome of a single IPC event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Success,
    Pending,
    Failed,
}

impl EventStatus {
    /// Draw table weighted 4:1:1 toward success.
    pub const WEIGHTED: [EventStatus; 6] = [
        EventStatus::Success,
        EventStatus::Success,
        EventStatus::Success,
        EventStatus::Success,
        EventStatus::Pending,
        EventStatus::Failed,
    ];
}

/// Runtime state of a simulated process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessStatus {
    Running,
    Blocked,
    Waiting,
    Terminated,
}

impl ProcessStatus {
    /// The non-running states a freshly created process may land in.
    pub const DEGRADED: [ProcessStatus; 3] = [
        ProcessStatus::Blocked,
        ProcessStatus::Waiting,
        ProcessStatus::Terminated,
    ];
}

/// Category of a synthetic anomaly record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Deadlock,
    Timeout,
    MissingResponse,
    Delay,
    Error,
}

impl IssueKind {
    pub const ALL: [IssueKind; 5] = [
        IssueKind::Deadlock,
        IssueKind::Timeout,
        IssueKind::MissingResponse,
        IssueKind::Delay,
        IssueKind::Error,
    ];

    /// Fixed description per kind.
    pub fn description(self) -> &'static str {
        match self {
            IssueKind::Deadlock => "Circular wait detected between processes",
            IssueKind::Timeout => "Connection timeout after 30s",
            IssueKind::MissingResponse => "Expected ACK not received within timeout",
            IssueKind::Delay => "Message delivery exceeds threshold (>50ms)",
            IssueKind::Error => "EPIPE: Broken pipe",
        }
    }

    /// Fixed icon per kind.
    pub fn icon(self) -> &'static str {
        match self {
            IssueKind::Deadlock => "🔒",
            IssueKind::Timeout => "⏰",
            IssueKind::MissingResponse => "❓",
            IssueKind::Delay => "⏱",
            IssueKind::Error => "⚠",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IssueKind::Deadlock => "deadlock",
            IssueKind::Timeout => "timeout",
            IssueKind::MissingResponse => "missing_response",
            IssueKind::Delay => "delay",
            IssueKind::Error => "error",
        }
    }
}

/// Issue severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

/// A simulated process. Created in a batch by the registry; immutable
/// afterward and never destroyed during a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Process {
    /// Process id, unique within one registry build.
    pub pid: u32,

    /// Name drawn without replacement from the registry's pool.
    pub name: String,

    /// Status assigned at creation (80% running).
    pub status: ProcessStatus,

    /// CPU usage percentage in [0, 100).
    pub cpu_usage: f64,

    /// Memory usage percentage in [0, 100).
    pub memory_usage: f64,

    /// Start timestamp, backdated up to 24h (unix millis).
    pub started_at_ms: i64,
}

/// A single simulated IPC event between two processes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpcEvent {
    /// Unique id, minted from the generator's RNG.
    pub id: Uuid,

    /// Unix millis, backdated up to 60s to simulate buffering jitter.
    pub timestamp_ms: i64,

    pub mechanism: IpcMechanism,

    /// Member of `mechanism.operations()`.
    pub operation: String,

    pub source_pid: u32,
    pub source_name: String,
    pub target_pid: u32,
    pub target_name: String,

    pub status: EventStatus,

    /// Payload size in bytes, within `mechanism.size_range_bytes()`.
    pub message_size_bytes: u64,

    /// Latency in ms, within `mechanism.latency_range_ms()`, rounded to
    /// 2 decimal places.
    pub latency_ms: f64,
}

/// A synthetic anomaly record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: Uuid,
    pub kind: IssueKind,
    pub severity: Severity,

    /// 1 to 3 distinct affected process names.
    pub affected: Vec<String>,

    /// Unix millis, backdated up to 300s.
    pub timestamp_ms: i64,

    /// Monotonic: set true at creation (25%) or by the sweep, never
    /// flipped back.
    pub resolved: bool,
}

impl Issue {
    pub fn description(&self) -> &'static str {
        self.kind.description()
    }

    pub fn icon(&self) -> &'static str {
        self.kind.icon()
    }
}
