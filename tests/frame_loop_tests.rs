// Host-side tests for the explicit frame loop.

use plane_core::*;

#[derive(Default)]
struct RecordingHost {
    resizes: Vec<ViewportPixelSize>,
    bounds_refreshes: usize,
    renders: usize,
    teardowns: usize,
    script: Vec<FrameOutcome>,
}

impl FrameHost for RecordingHost {
    fn apply_resize(&mut self, viewport: ViewportPixelSize) {
        self.resizes.push(viewport);
    }

    fn refresh_bounds(&mut self) {
        self.bounds_refreshes += 1;
    }

    fn render_frame(&mut self) -> FrameOutcome {
        self.renders += 1;
        if self.script.is_empty() {
            FrameOutcome::Rendered
        } else {
            self.script.remove(0)
        }
    }

    fn teardown(&mut self) {
        self.teardowns += 1;
    }
}

#[test]
fn resizes_are_coalesced_and_applied_before_render() {
    let mut host = RecordingHost::default();
    let mut fl = FrameLoop::new();
    fl.request_resize(ViewportPixelSize::new(100.0, 100.0));
    fl.request_resize(ViewportPixelSize::new(200.0, 150.0));
    assert!(fl.has_pending_resize());
    assert_eq!(fl.step(&mut host), LoopState::Running);
    assert_eq!(host.resizes, vec![ViewportPixelSize::new(200.0, 150.0)]);
    assert_eq!(host.renders, 1);
    assert!(!fl.has_pending_resize());

    fl.step(&mut host);
    assert_eq!(host.resizes.len(), 1);
    assert_eq!(fl.frames(), 2);
}

#[test]
fn stop_tears_down_exactly_once() {
    let mut host = RecordingHost::default();
    let mut fl = FrameLoop::new();
    fl.step(&mut host);
    fl.stop();
    assert!(!fl.is_running());
    assert!(!fl.is_torn_down());
    assert_eq!(fl.step(&mut host), LoopState::Stopped);
    assert_eq!(fl.step(&mut host), LoopState::Stopped);
    assert_eq!(host.teardowns, 1);
    assert_eq!(host.renders, 1);
    assert!(fl.is_torn_down());
}

#[test]
fn resize_after_stop_is_ignored() {
    let mut host = RecordingHost::default();
    let mut fl = FrameLoop::new();
    fl.request_resize(ViewportPixelSize::new(100.0, 100.0));
    fl.stop();
    fl.request_resize(ViewportPixelSize::new(300.0, 300.0));
    assert!(!fl.has_pending_resize());
    fl.step(&mut host);
    assert!(host.resizes.is_empty());
}

#[test]
fn skipped_frames_are_not_counted() {
    let mut host = RecordingHost {
        script: vec![FrameOutcome::Skipped, FrameOutcome::Rendered],
        ..Default::default()
    };
    let mut fl = FrameLoop::new();
    fl.step(&mut host);
    fl.step(&mut host);
    assert_eq!(host.renders, 2);
    assert_eq!(fl.frames(), 1);
}

#[test]
fn run_ends_on_exit_and_tears_down() {
    let mut host = RecordingHost {
        script: vec![FrameOutcome::Rendered, FrameOutcome::Skipped, FrameOutcome::Exit],
        ..Default::default()
    };
    let mut fl = FrameLoop::new();
    fl.run(&mut host);
    assert_eq!(host.renders, 3);
    assert_eq!(fl.frames(), 2);
    assert_eq!(host.teardowns, 1);
}

#[test]
fn fatal_outcome_stops_the_loop() {
    let mut host = RecordingHost {
        script: vec![FrameOutcome::Fatal],
        ..Default::default()
    };
    let mut fl = FrameLoop::new();
    assert_eq!(fl.step(&mut host), LoopState::Running);
    assert!(!fl.is_running());
    assert_eq!(fl.step(&mut host), LoopState::Stopped);
    assert_eq!(host.teardowns, 1);
    assert_eq!(fl.frames(), 0);
}

#[test]
fn bounds_refresh_runs_once_before_render() {
    let mut host = RecordingHost::default();
    let mut fl = FrameLoop::new();
    fl.request_bounds_refresh();
    fl.request_bounds_refresh();
    assert!(fl.has_pending_bounds_refresh());
    fl.step(&mut host);
    assert_eq!(host.bounds_refreshes, 1);
    assert_eq!(host.renders, 1);
    assert!(!fl.has_pending_bounds_refresh());
    fl.step(&mut host);
    assert_eq!(host.bounds_refreshes, 1);
}

#[test]
fn resize_supersedes_bounds_refresh() {
    let mut host = RecordingHost::default();
    let mut fl = FrameLoop::new();
    fl.request_bounds_refresh();
    fl.request_resize(ViewportPixelSize::new(640.0, 480.0));
    fl.step(&mut host);
    assert_eq!(host.resizes.len(), 1);
    assert_eq!(host.bounds_refreshes, 0);
    assert!(!fl.has_pending_bounds_refresh());
}

#[test]
fn bounds_refresh_after_stop_is_ignored() {
    let mut host = RecordingHost::default();
    let mut fl = FrameLoop::new();
    fl.request_bounds_refresh();
    fl.stop();
    fl.request_bounds_refresh();
    assert!(!fl.has_pending_bounds_refresh());
    fl.step(&mut host);
    assert_eq!(host.bounds_refreshes, 0);
    assert_eq!(host.teardowns, 1);
}
