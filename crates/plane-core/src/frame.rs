//! Explicit run loop shared by the frontends.
//!
//! One iteration applies the newest pending resize, or else a queued
//! element-bounds refresh, then renders. Stopping only flips a flag; the
//! next iteration runs the host's teardown exactly once, so listeners are
//! never detached from inside their own callback.

use crate::viewport::ViewportPixelSize;

/// What the host reports after drawing a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Rendered,
    /// Nothing drawn this time (surface not ready, lost, ...). Keep going.
    Skipped,
    /// Drawn, and the host is done; stop after this frame.
    Exit,
    /// Unrecoverable; stop the loop.
    Fatal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

pub trait FrameHost {
    /// Resize order inside: aspect, then visible extents, then mesh scale.
    fn apply_resize(&mut self, viewport: ViewportPixelSize);
    /// Re-read the tracked element's bounds and rescale. A resize already
    /// re-reads them, so this only runs on frames without one.
    fn refresh_bounds(&mut self);
    fn render_frame(&mut self) -> FrameOutcome;
    /// Detach everything registered against the scene.
    fn teardown(&mut self);
}

#[derive(Debug)]
pub struct FrameLoop {
    running: bool,
    torn_down: bool,
    pending_resize: Option<ViewportPixelSize>,
    bounds_dirty: bool,
    frames: u64,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            running: true,
            torn_down: false,
            pending_resize: None,
            bounds_dirty: false,
            frames: 0,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Latest request wins; resizes between frames are coalesced.
    pub fn request_resize(&mut self, viewport: ViewportPixelSize) {
        if self.running {
            self.pending_resize = Some(viewport);
        }
    }

    pub fn has_pending_resize(&self) -> bool {
        self.pending_resize.is_some()
    }

    /// The tracked element changed size without a viewport resize.
    pub fn request_bounds_refresh(&mut self) {
        if self.running {
            self.bounds_dirty = true;
        }
    }

    pub fn has_pending_bounds_refresh(&self) -> bool {
        self.bounds_dirty
    }

    pub fn stop(&mut self) {
        if self.running {
            log::info!("[frame] stop requested after {} frames", self.frames);
        }
        self.running = false;
        self.pending_resize = None;
        self.bounds_dirty = false;
    }

    pub fn step(&mut self, host: &mut impl FrameHost) -> LoopState {
        if !self.running {
            if !self.torn_down {
                self.torn_down = true;
                host.teardown();
            }
            return LoopState::Stopped;
        }
        let bounds_dirty = std::mem::take(&mut self.bounds_dirty);
        if let Some(viewport) = self.pending_resize.take() {
            host.apply_resize(viewport);
        } else if bounds_dirty {
            host.refresh_bounds();
        }
        match host.render_frame() {
            FrameOutcome::Rendered => self.frames += 1,
            FrameOutcome::Skipped => {}
            FrameOutcome::Exit => {
                self.frames += 1;
                self.stop();
            }
            FrameOutcome::Fatal => {
                log::error!("[frame] fatal render error, stopping");
                self.stop();
            }
        }
        LoopState::Running
    }

    /// Drive `step` until stopped and torn down. For hosts that own their
    /// thread; browser and winit hosts call [`FrameLoop::step`] per callback.
    pub fn run(&mut self, host: &mut impl FrameHost) {
        while self.step(host) == LoopState::Running {}
    }
}
