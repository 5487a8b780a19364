//! GDB/LLDB crash-backtrace transcripts: a `Program received signal
//! SIGNAME` banner followed by `#N  0xADDR in function (args) at file:line`
//! frames. The banner becomes a `crash_signal` event; frame 0 supplies the
//! crash location.

use crate::event::{ValidationEvent, ValidationEventStatus, ValidationEventType};
use crate::parser::{Parser, ParserCategory, ParserMetadata, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

static SIGNAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Program received signal (SIG\w+), (.+)\.$").unwrap());
static FRAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#(\d+)\s+(?:0x[0-9a-fA-F]+\s+in\s+)?(\S+)\s*\([^)]*\)\s+at\s+([^:]+):(\d+)").unwrap());

pub struct GdbLldb;

impl Parser for GdbLldb {
    fn metadata(&self) -> ParserMetadata {
        ParserMetadata {
            format_name: "gdb_lldb",
            display_name: "GDB/LLDB backtrace",
            priority: Priority::HIGH,
            category: ParserCategory::Debugger,
            groups: &["c_cpp"],
            aliases: &["gdb", "lldb"],
            command_patterns: &["gdb", "lldb"],
            requires_context: false,
        }
    }

    fn can_parse(&self, content: &str) -> bool {
        SIGNAL_RE.is_match(content) && FRAME_RE.is_match(content)
    }

    fn parse(&self, content: &str) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        let mut signal: Option<(String, String)> = None;
        let mut frame0: Option<(String, i32, String)> = None;

        for line in content.lines() {
            if let Some(caps) = SIGNAL_RE.captures(line) {
                signal = Some((caps[1].to_string(), caps[2].to_string()));
            } else if let Some(caps) = FRAME_RE.captures(line) {
                if &caps[1] == "0" {
                    frame0 = Some((caps[3].to_string(), caps[4].parse().unwrap_or(-1), caps[2].to_string()));
                }
            }
        }

        if let Some((signal_name, description)) = signal {
            let mut event = ValidationEvent::new("gdb", ValidationEventType::CrashSignal);
            event.error_code = signal_name.clone();
            event.message = format!("{signal_name}: {description}");
            event.status = Some(ValidationEventStatus::Error);
            event.severity = "critical".to_string();
            event.category = "crash".to_string();
            if let Some((file, line_no, func)) = frame0 {
                event.ref_file = file;
                event.ref_line = line_no;
                event.function_name = func;
            }
            events.push(event);
        }

        if events.is_empty() {
            events.push(ValidationEvent::new("gdb", ValidationEventType::Summary).with_message("no crash signal recognized"));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_signal_and_crash_frame() {
        let content = "\
Program received signal SIGSEGV, Segmentation fault.
0x0000000000401136 in compute (x=0) at src/main.c:22
#0  0x0000000000401136 in compute (x=0) at src/main.c:22
#1  0x0000000000401180 in main () at src/main.c:30
";
        let decoder = GdbLldb;
        assert!(decoder.can_parse(content));
        let events = decoder.parse(content);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].error_code, "SIGSEGV");
        assert_eq!(events[0].ref_file, "src/main.c");
        assert_eq!(events[0].ref_line, 22);
        assert_eq!(events[0].function_name, "compute");
    }
}
