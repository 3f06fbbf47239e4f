//! Run polling state machine.
//!
//! A single generation call walks `Created → MessagePosted → RunStarted`
//! and then loops `{Queued ⇄ InProgress}` here until a terminal state.
//! The reference behavior polled forever; this implementation bounds the
//! loop with a wall-clock timeout so a stuck upstream run cannot block
//! the caller indefinitely.

use crate::conversation::dto::{RunSnapshot, RunStatus};
use async_trait::async_trait;
use std::time::Duration;
use vasari_error::{
    GenerationError, GenerationErrorKind, ProtocolError, Stage, VasariResult,
};

/// Polling cadence and patience for a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Delay between status checks
    pub interval: Duration,
    /// Overall wall-clock budget before giving up on the run
    pub timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            timeout: Duration::from_secs(120),
        }
    }
}

/// Source of run status observations.
///
/// The production implementation is an HTTP status poll; tests substitute
/// a scripted sequence so terminal states can be exercised without real
/// delays.
#[async_trait]
pub trait RunStatusSource: Send {
    /// Observe the run's current state.
    async fn snapshot(&mut self) -> VasariResult<RunSnapshot>;
}

/// What the poll loop should do after one observation.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PollStep {
    Wait,
    Done,
    RunFailed(String),
    RunCancelled(String),
    Malformed(String),
}

fn classify(snapshot: &RunSnapshot) -> PollStep {
    match snapshot.status {
        RunStatus::Queued | RunStatus::InProgress | RunStatus::Cancelling => PollStep::Wait,
        RunStatus::Completed => PollStep::Done,
        RunStatus::Failed => PollStep::RunFailed(snapshot.error_detail()),
        RunStatus::Expired => PollStep::RunFailed(format!(
            "run {} expired upstream: {}",
            snapshot.id,
            snapshot.error_detail()
        )),
        RunStatus::Cancelled => PollStep::RunCancelled(snapshot.error_detail()),
        RunStatus::RequiresAction | RunStatus::Unrecognized => PollStep::Malformed(format!(
            "run {} reported status {} which this profile never produces",
            snapshot.id, snapshot.status
        )),
    }
}

/// Poll `source` until the run reaches a terminal state.
///
/// Suspends between polls rather than busy-spinning. Returns `Ok(())`
/// only for `completed`; failed and cancelled runs propagate as
/// generation errors carrying the upstream detail, and a run still
/// pending after `config.timeout` fails with a timeout error.
pub async fn await_terminal<S: RunStatusSource>(
    source: &mut S,
    config: &PollConfig,
) -> VasariResult<()> {
    let started = tokio::time::Instant::now();
    loop {
        let snapshot = source.snapshot().await?;
        match classify(&snapshot) {
            PollStep::Done => return Ok(()),
            PollStep::RunFailed(detail) => {
                return Err(GenerationError::new(GenerationErrorKind::Failed(detail)).into());
            }
            PollStep::RunCancelled(detail) => {
                return Err(GenerationError::new(GenerationErrorKind::Cancelled(detail)).into());
            }
            PollStep::Malformed(detail) => {
                return Err(ProtocolError::new(Stage::Status, detail).into());
            }
            PollStep::Wait => {
                let waited = started.elapsed();
                if waited >= config.timeout {
                    return Err(GenerationError::new(GenerationErrorKind::TimedOut {
                        waited_secs: waited.as_secs(),
                    })
                    .into());
                }
                tokio::time::sleep(config.interval).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vasari_error::VasariErrorKind;

    fn snapshot(status: RunStatus) -> RunSnapshot {
        serde_json::from_value(serde_json::json!({
            "id": "run_1",
            "status": serde_json::to_value(status).unwrap(),
        }))
        .unwrap()
    }

    struct Scripted {
        states: Vec<RunStatus>,
        polls: usize,
    }

    #[async_trait]
    impl RunStatusSource for Scripted {
        async fn snapshot(&mut self) -> VasariResult<RunSnapshot> {
            let status = if self.polls < self.states.len() {
                self.states[self.polls]
            } else {
                *self.states.last().unwrap()
            };
            self.polls += 1;
            Ok(snapshot(status))
        }
    }

    #[test]
    fn classify_waits_on_pending_states() {
        for status in [RunStatus::Queued, RunStatus::InProgress, RunStatus::Cancelling] {
            assert_eq!(classify(&snapshot(status)), PollStep::Wait);
        }
    }

    #[test]
    fn classify_flags_unknown_status_as_malformed() {
        assert!(matches!(
            classify(&snapshot(RunStatus::Unrecognized)),
            PollStep::Malformed(_)
        ));
        assert!(matches!(
            classify(&snapshot(RunStatus::RequiresAction)),
            PollStep::Malformed(_)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn completes_after_pending_states() {
        let mut source = Scripted {
            states: vec![
                RunStatus::Queued,
                RunStatus::InProgress,
                RunStatus::InProgress,
                RunStatus::Completed,
            ],
            polls: 0,
        };
        await_terminal(&mut source, &PollConfig::default())
            .await
            .unwrap();
        assert_eq!(source.polls, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_run_propagates_generation_error() {
        let mut source = Scripted {
            states: vec![RunStatus::Queued, RunStatus::Failed],
            polls: 0,
        };
        let err = await_terminal(&mut source, &PollConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err.kind(), VasariErrorKind::Generation(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn stuck_run_times_out() {
        let mut source = Scripted {
            states: vec![RunStatus::InProgress],
            polls: 0,
        };
        let config = PollConfig {
            interval: Duration::from_secs(2),
            timeout: Duration::from_secs(10),
        };
        let err = await_terminal(&mut source, &config).await.unwrap_err();
        match err.kind() {
            VasariErrorKind::Generation(e) => {
                assert!(matches!(e.kind, GenerationErrorKind::TimedOut { .. }));
            }
            other => panic!("expected generation error, got {other}"),
        }
        // 2s interval against a 10s budget: observed at 0,2,4,6,8,10.
        assert_eq!(source.polls, 6);
    }
}
