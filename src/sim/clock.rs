//! Fixed-timestep accumulator
//!
//! The simulation always advances in whole `SIM_DT` ticks. Frame deltas from
//! the host are accumulated and converted into a tick count, so a 144 Hz
//! display and a 30 Hz one climb at the same speed.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a frame delta (seconds) and return how many ticks to run now
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        // Ignore garbage deltas (tab restore, clock skew)
        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += dt;

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }

        // Drop the backlog we refused to simulate
        if steps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        steps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
