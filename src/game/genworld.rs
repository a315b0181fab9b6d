use strum_macros::{Display, EnumCount, EnumIter};

use crate::log;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, EnumCount, EnumIter)]
pub enum GenWorldStep {
    Objects,
}

// ----------------------------------------------
// GenWorldProgress
// ----------------------------------------------

// Progress reporting during world generation.
pub trait GenWorldProgress {
    // Declares how many units of work the step will report.
    fn set_total(&mut self, step: GenWorldStep, total: u32);

    // One unit of work finished.
    fn step_done(&mut self, step: GenWorldStep);
}

// Discards all progress.
pub struct NullProgress;

impl GenWorldProgress for NullProgress {
    fn set_total(&mut self, _step: GenWorldStep, _total: u32) {
    }

    fn step_done(&mut self, _step: GenWorldStep) {
    }
}

// Counts progress and logs a line every `log_every` units.
#[derive(Default)]
pub struct ProgressCounter {
    pub total: u32,
    pub done: u32,
    pub log_every: u32,
}

impl ProgressCounter {
    pub fn new(log_every: u32) -> Self {
        Self { total: 0, done: 0, log_every }
    }
}

impl GenWorldProgress for ProgressCounter {
    fn set_total(&mut self, step: GenWorldStep, total: u32) {
        self.total = total;
        self.done = 0;
        log::verbose!(log::channel!("genworld"), "{step}: {total} units of work.");
    }

    fn step_done(&mut self, step: GenWorldStep) {
        self.done += 1;
        if self.log_every != 0 && self.done % self.log_every == 0 {
            log::verbose!(log::channel!("genworld"), "{step}: {}/{}", self.done, self.total);
        }
    }
}
