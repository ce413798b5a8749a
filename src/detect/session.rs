use std::time::Duration;

use anyhow::Result;

use crate::detect::result::InferenceResult;

/// Session-scoped pull on the accelerator's result stream.
///
/// The real accelerator is an effectively infinite producer; the pull
/// blocks until the next frame has been inferred. `Ok(None)` means the
/// source is exhausted and the loop should stop normally — only finite
/// test sources ever return it. A stuck pull blocks the whole loop; that
/// is the accepted backpressure point against the accelerator's latency
/// guarantee.
pub trait InferenceSession {
    /// Pull the next per-frame result.
    fn next_result(&mut self) -> Result<Option<InferenceResult>>;
}

/// Scripted inference source.
///
/// Yields a fixed sequence of results, either once (tests, bounded runs)
/// or cycled forever (running `sentryd` without accelerator hardware).
pub struct ScriptedSession {
    script: Vec<InferenceResult>,
    position: usize,
    cycle: bool,
    interval: Option<Duration>,
}

impl ScriptedSession {
    /// Play the script once, then report exhaustion.
    pub fn once(script: Vec<InferenceResult>) -> Self {
        Self {
            script,
            position: 0,
            cycle: false,
            interval: None,
        }
    }

    /// Cycle the script forever.
    pub fn cycled(script: Vec<InferenceResult>) -> Self {
        Self {
            script,
            position: 0,
            cycle: true,
            interval: None,
        }
    }

    /// Block for `interval` on each pull, mimicking the accelerator's
    /// fixed per-frame latency.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }
}

impl InferenceSession for ScriptedSession {
    fn next_result(&mut self) -> Result<Option<InferenceResult>> {
        if let Some(interval) = self.interval {
            std::thread::sleep(interval);
        }
        if self.position >= self.script.len() {
            if !self.cycle || self.script.is_empty() {
                return Ok(None);
            }
            self.position = 0;
        }
        let result = self.script[self.position].clone();
        self.position += 1;
        Ok(Some(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn once_script_exhausts() {
        let mut source = ScriptedSession::once(vec![InferenceResult::empty(35.0)]);
        assert!(source.next_result().unwrap().is_some());
        assert!(source.next_result().unwrap().is_none());
        assert!(source.next_result().unwrap().is_none());
    }

    #[test]
    fn cycled_script_repeats() {
        let mut source = ScriptedSession::cycled(vec![
            InferenceResult::empty(1.0),
            InferenceResult::empty(2.0),
        ]);
        let latencies: Vec<f64> = (0..5)
            .map(|_| source.next_result().unwrap().unwrap().duration_ms)
            .collect();
        assert_eq!(latencies, vec![1.0, 2.0, 1.0, 2.0, 1.0]);
    }

    #[test]
    fn empty_cycled_script_still_ends() {
        let mut source = ScriptedSession::cycled(vec![]);
        assert!(source.next_result().unwrap().is_none());
    }
}
