//! Time-sliced sequences driven by the per-frame tick
//!
//! Nothing here runs on its own thread. Each sequence is advanced once per
//! tick and yields between steps, either for a number of frames (spawns) or
//! for a fixed delay (the level timer). Both can be cancelled mid-flight.

use std::collections::VecDeque;

use super::state::FruitType;

/// A single fruit waiting to be spawned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingSpawn {
    pub fruit_type: FruitType,
    /// Position in the level's spawn order (used for stacking height)
    pub order: u32,
}

/// Staggered spawn queue: releases `per_step` spawns, then waits `interval_frames` ticks
#[derive(Debug, Clone, Default)]
pub struct SpawnSequence {
    queue: VecDeque<PendingSpawn>,
    per_step: usize,
    interval_frames: u32,
    wait_frames: u32,
}

impl SpawnSequence {
    pub fn new(per_step: usize, interval_frames: u32) -> Self {
        Self {
            queue: VecDeque::new(),
            per_step: per_step.max(1),
            interval_frames,
            wait_frames: 0,
        }
    }

    /// Replace any in-flight work with a new spawn order. The first step fires on the next tick.
    pub fn start(&mut self, spawns: impl IntoIterator<Item = PendingSpawn>) {
        self.queue.clear();
        self.queue.extend(spawns);
        self.wait_frames = 0;
    }

    /// Drop everything still queued
    pub fn cancel(&mut self) {
        if !self.queue.is_empty() {
            log::debug!("Cancelling spawn sequence with {} pending", self.queue.len());
        }
        self.queue.clear();
        self.wait_frames = 0;
    }

    pub fn is_running(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Advance one frame, returning the spawns released this frame
    pub fn step(&mut self) -> Vec<PendingSpawn> {
        if self.queue.is_empty() {
            return Vec::new();
        }
        if self.wait_frames > 0 {
            self.wait_frames -= 1;
            return Vec::new();
        }

        let n = self.per_step.max(1).min(self.queue.len());
        let released: Vec<_> = self.queue.drain(..n).collect();
        self.wait_frames = self.interval_frames;
        released
    }
}

/// Level countdown. Reports once per whole second elapsed and once on expiry.
#[derive(Debug, Clone, Default)]
pub struct LevelTimer {
    remaining: f32,
    limit: f32,
    next_report: f32,
    running: bool,
}

/// What a timer step produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStep {
    /// Still counting, no label change
    Idle,
    /// A second boundary passed; carries whole seconds left
    Second(u32),
    /// Reached zero this step
    Expired,
}

impl LevelTimer {
    pub fn start(&mut self, limit_secs: f32) {
        self.limit = limit_secs.max(0.0);
        self.remaining = self.limit;
        // Report when the displayed (rounded-up) second changes
        self.next_report = self.limit.ceil() - 1.0;
        self.running = true;
    }

    pub fn cancel(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Seconds spent since `start`
    pub fn elapsed(&self) -> f32 {
        self.limit - self.remaining
    }

    /// Whole seconds for display, rounded up
    pub fn display_secs(&self) -> u32 {
        self.remaining.max(0.0).ceil() as u32
    }

    pub fn step(&mut self, dt: f32) -> TimerStep {
        if !self.running {
            return TimerStep::Idle;
        }

        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            self.running = false;
            return TimerStep::Expired;
        }

        if self.remaining <= self.next_report {
            // Skip any boundaries crossed by a long frame
            while self.next_report >= self.remaining {
                self.next_report -= 1.0;
            }
            return TimerStep::Second(self.display_secs());
        }

        TimerStep::Idle
    }
}

/// Format seconds as `MM:SS`
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
