use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// Why a [`StabilizingPoll`] stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The sample did not grow since the previous iteration.
    Stable,
    /// The sample reached the configured cap.
    CapReached,
    /// The iteration guard ran out before the value settled.
    IterationLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOutcome {
    pub value: usize,
    pub iterations: u32,
    pub stop: StopReason,
}

/// Repeatedly nudge something and sample a count until the count stops growing.
///
/// Each iteration runs `advance`, sleeps `interval`, then runs `sample`. The
/// previous sample starts at zero, so a first sample of zero counts as stable.
#[derive(Debug, Clone, Copy)]
pub struct StabilizingPoll {
    pub interval: Duration,
    pub cap: usize,
    pub max_iterations: u32,
}

impl StabilizingPoll {
    pub async fn run<A, AF, S, SF, E>(&self, mut advance: A, mut sample: S) -> Result<PollOutcome, E>
    where
        A: FnMut() -> AF,
        AF: Future<Output = Result<(), E>>,
        S: FnMut() -> SF,
        SF: Future<Output = Result<usize, E>>,
    {
        let mut last = 0;

        for iteration in 1..=self.max_iterations {
            advance().await?;
            sleep(self.interval).await;
            let value = sample().await?;
            debug!("Poll iteration {}: {} (previous {})", iteration, value, last);

            if value <= last {
                return Ok(PollOutcome { value, iterations: iteration, stop: StopReason::Stable });
            }
            if value >= self.cap {
                return Ok(PollOutcome { value, iterations: iteration, stop: StopReason::CapReached });
            }
            last = value;
        }

        Ok(PollOutcome {
            value: last,
            iterations: self.max_iterations,
            stop: StopReason::IterationLimit,
        })
    }
}
