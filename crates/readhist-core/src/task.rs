//! Capture of the recording environment
//!
//! Each accepted read event is stamped with a monotonic high-resolution
//! time and the identity of the task that triggered it. The clock is
//! anchored at first use so timestamps are comparable across every buffer
//! in the process.

use std::sync::OnceLock;
use std::thread;
use std::time::Instant;

static CLOCK_ANCHOR: OnceLock<Instant> = OnceLock::new();
static PROCESS_NAME: OnceLock<String> = OnceLock::new();

/// Monotonic nanoseconds since the process clock anchor
pub fn now_ns() -> u64 {
    let anchor = *CLOCK_ANCHOR.get_or_init(Instant::now);
    u64::try_from(anchor.elapsed().as_nanos()).unwrap_or(u64::MAX)
}

/// Process id of the current task
pub fn current_pid() -> u32 {
    std::process::id()
}

/// Name of the current task
///
/// Thread name when one was set, otherwise the process image name.
pub fn current_task_name() -> String {
    let current = thread::current();
    match current.name() {
        Some(name) => name.to_owned(),
        None => process_name().to_owned(),
    }
}

fn process_name() -> &'static str {
    PROCESS_NAME.get_or_init(|| {
        std::env::current_exe()
            .ok()
            .and_then(|path| path.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "unknown".to_owned())
    })
}
