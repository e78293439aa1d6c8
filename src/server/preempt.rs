// Port preemption module
// Best-effort release of a port held by a stale process before binding

use std::process::Stdio;
use tokio::process::Command;

use crate::logger;

/// Outcome of a preemption attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreemptOutcome {
    /// Some process held the port and was signalled
    Freed,
    /// Nothing was listening
    NotHeld,
    /// The helper could not be run; binding proceeds anyway
    Skipped,
}

/// Kill whatever holds `port`/tcp using `fuser -k`
///
/// Never fails: problems are logged and the caller binds regardless.
pub async fn free_port(port: u16) -> PreemptOutcome {
    let target = format!("{port}/tcp");
    let status = Command::new("fuser")
        .arg("-k")
        .arg(&target)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;

    match status {
        Ok(s) if s.success() => {
            logger::log_info(&format!("Freed port {port} held by a previous process"));
            PreemptOutcome::Freed
        }
        // fuser exits non-zero when no process matched
        Ok(_) => PreemptOutcome::NotHeld,
        Err(e) => {
            logger::log_warning(&format!(
                "Could not free port {port} (fuser unavailable: {e}), binding anyway"
            ));
            PreemptOutcome::Skipped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[tokio::test]
    async fn test_free_port_on_unused_port_is_not_fatal() {
        // Reserve an ephemeral port, then release it so nothing holds it
        let port = {
            let reserved = TcpListener::bind("127.0.0.1:0").unwrap();
            reserved.local_addr().unwrap().port()
        };

        let outcome = free_port(port).await;
        assert!(
            matches!(outcome, PreemptOutcome::NotHeld | PreemptOutcome::Skipped),
            "unexpected outcome {outcome:?}"
        );
    }
}
