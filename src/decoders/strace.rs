//! Linux `strace -T` / `strace -tt` output: one event per syscall, plus
//! distinct events for signal deliveries and process exit.
//!
//! `function_name` is the syscall name, `category` buckets it into the
//! coarse domains named in the component design (`file`, `network`,
//! `process`, `memory`, `signal`, `ipc`, `time`, or the `syscall` catch-all),
//! the return value maps to `status`, an `errno` symbol (when present)
//! becomes `error_code`, and the trailing `<elapsed>` becomes
//! `execution_time`. `--- SIG... ---` lines become `crash_signal` events;
//! `+++ exited with N +++` becomes a `summary` event.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static CALL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(?P<syscall>[A-Za-z_][A-Za-z0-9_]*)\((?P<args>.*)\)\s*=\s*(?P<ret>-?\d+|0x[0-9a-fA-F]+|\?)(?:\s+(?P<errno>E[A-Z0-9]+)\s*\((?P<errdesc>[^)]*)\))?\s*(?:<(?P<elapsed>[\d.]+)>)?\s*$"#,
    )
    .unwrap()
});
static SIGNAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^---\s+(SIG\w+)\b").unwrap());
static EXIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+\+\+\s+exited with (-?\d+)\s+\+\+\+").unwrap());
static KILLED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+\+\+\s+killed by\s+(SIG\w+)").unwrap());
static FIRST_QUOTED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#""((?:[^"\\]|\\.)*)""#).unwrap());

pub struct Strace;

impl Parser for Strace {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "strace",
            display_name: "strace",
            priority: Priority::HIGH,
            category: ParserCategory::Debugger,
            groups: &["c_cpp"],
            aliases: &[],
            command_patterns: &["strace"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        content.lines().any(|l| CALL_RE.is_match(l) || SIGNAL_RE.is_match(l) || EXIT_RE.is_match(l))
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let line_num = idx as i32 + 1;

            if let Some(caps) = SIGNAL_RE.captures(line) {
                let mut event = ValidationEvent::new("strace", ValidationEventType::CrashSignal);
                event.function_name = caps[1].to_string();
                event.category = "signal".to_string();
                event.message = line.to_string();
                event.log_line_start = line_num;
                event.log_line_end = line_num;
                event.log_content = line.to_string();
                events.push(event);
                continue;
            }

            if let Some(caps) = KILLED_RE.captures(line) {
                let mut event = ValidationEvent::new("strace", ValidationEventType::Summary);
                event.status = Some(ValidationEventStatus::Error);
                event.message = format!("killed by {}", &caps[1]);
                event.log_line_start = line_num;
                event.log_line_end = line_num;
                event.log_content = line.to_string();
                events.push(event);
                continue;
            }

            if let Some(caps) = EXIT_RE.captures(line) {
                let code: i64 = caps[1].parse().unwrap_or(-1);
                let mut event = ValidationEvent::new("strace", ValidationEventType::Summary);
                event.status = Some(if code == 0 { ValidationEventStatus::Pass } else { ValidationEventStatus::Error });
                event.message = format!("exited with {code}");
                event.log_line_start = line_num;
                event.log_line_end = line_num;
                event.log_content = line.to_string();
                events.push(event);
                continue;
            }

            if let Some(caps) = CALL_RE.captures(line) {
                let syscall = caps["syscall"].to_string();
                let args = caps["args"].to_string();
                let ret = &caps["ret"];

                let mut event = ValidationEvent::new("strace", ValidationEventType::DebugEvent);
                event.function_name = syscall.clone();
                event.category = category_for_syscall(&syscall).to_string();
                event.target = FIRST_QUOTED_RE
                    .captures(&args)
                    .map(|c| c[1].to_string())
                    .unwrap_or_default();

                let failed = caps.name("errno").is_some() || ret.starts_with('-');
                event.status = Some(if failed { ValidationEventStatus::Fail } else { ValidationEventStatus::Pass });
                event.error_code = caps.name("errno").map(|m| m.as_str().to_string()).unwrap_or_default();
                event.message = match (caps.name("errno"), caps.name("errdesc")) {
                    (Some(errno), Some(desc)) => format!("{}: {} ({})", syscall, errno.as_str(), desc.as_str()),
                    _ => format!("{syscall}({args}) = {ret}"),
                };
                event.execution_time = caps
                    .name("elapsed")
                    .and_then(|m| m.as_str().parse::<f64>().ok())
                    .map(|secs| secs * 1000.0)
                    .unwrap_or(0.0);
                event.log_line_start = line_num;
                event.log_line_end = line_num;
                event.log_content = line.to_string();
                events.push(event);
            }
        }

        if events.is_empty() {
            events.push(
                ValidationEvent::new("strace", ValidationEventType::Summary)
                    .with_message("no strace-shaped lines found"),
            );
        }
        events
    }
}

fn category_for_syscall(name: &str) -> &'static str {
    const FILE: &[&str] = &[
        "open", "openat", "read", "write", "close", "stat", "fstat", "lstat", "access",
        "unlink", "mkdir", "rmdir", "rename", "chmod", "chown", "readlink", "getdents64",
    ];
    const NETWORK: &[&str] = &[
        "socket", "connect", "bind", "listen", "accept", "accept4", "send", "recv", "sendto",
        "recvfrom", "setsockopt", "getsockopt", "shutdown",
    ];
    const PROCESS: &[&str] = &[
        "fork", "vfork", "clone", "execve", "wait4", "waitpid", "exit", "exit_group", "kill",
        "tgkill", "ptrace",
    ];
    const MEMORY: &[&str] = &["mmap", "munmap", "brk", "mprotect", "madvise"];
    const SIGNAL: &[&str] = &["rt_sigaction", "rt_sigprocmask", "sigaction", "signal", "rt_sigreturn"];
    const IPC: &[&str] = &["shmget", "shmat", "shmdt", "semget", "semop", "msgget", "msgsnd", "msgrcv", "pipe", "pipe2"];
    const TIME: &[&str] = &["gettimeofday", "clock_gettime", "nanosleep", "time", "clock_nanosleep"];

    if FILE.contains(&name) {
        "file"
    } else if NETWORK.contains(&name) {
        "network"
    } else if PROCESS.contains(&name) {
        "process"
    } else if MEMORY.contains(&name) {
        "memory"
    } else if SIGNAL.contains(&name) {
        "signal"
    } else if IPC.contains(&name) {
        "ipc"
    } else if TIME.contains(&name) {
        "time"
    } else {
        "syscall"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enoent_scenario_matches() {
        let line = r#"open("/etc/passwd", O_RDONLY) = -1 ENOENT (No such file or directory) <0.000031>"#;
        let decoder = Strace;
        assert!(decoder.can_parse(line));
        let events = decoder.parse(line);
        assert_eq!(events.len(), 1);
        let e = &events[0];
        assert_eq!(e.function_name, "open");
        assert_eq!(e.category, "file");
        assert_eq!(e.status, Some(ValidationEventStatus::Fail));
        assert_eq!(e.error_code, "ENOENT");
        assert_eq!(e.target, "/etc/passwd");
        assert!((e.execution_time - 0.031).abs() < 1e-9);
    }

    #[test]
    fn successful_call_maps_to_pass() {
        let line = r#"read(3, "data", 4096) = 4 <0.000012>"#;
        let events = Strace.parse(line);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].status, Some(ValidationEventStatus::Pass));
        assert_eq!(events[0].category, "file");
    }

    #[test]
    fn signal_and_exit_lines_become_distinct_events() {
        let content = "--- SIGSEGV {si_signo=SIGSEGV} ---\n+++ exited with 139 +++";
        let events = Strace.parse(content);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type, ValidationEventType::CrashSignal);
        assert_eq!(events[1].event_type, ValidationEventType::Summary);
    }
}
