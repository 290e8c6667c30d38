//! Tests for the detection loop and click resolution

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use image::{GrayImage, Luma};
use tokio::time::Duration;

use crate::capture::{CaptureError, DisplayBounds, Frame, FrameSource};
use crate::catalog::{ClickKind, Template};
use crate::config::RunConfig;
use crate::detection::{
    ClickTarget, ControlFlags, DetectionLoop, LoopEvent, LoopState, create_loop_channels,
    resolve_click,
};
use crate::input::{InputError, InputInjector};

/// Frame source backed by fixed synthetic images, one per display id.
/// Displays listed in `failing` error on capture.
struct StaticFrames {
    displays: Vec<DisplayBounds>,
    frames: HashMap<u32, GrayImage>,
    failing: Vec<u32>,
}

impl StaticFrames {
    fn single(bounds: DisplayBounds, gray: GrayImage) -> Self {
        Self {
            displays: vec![bounds],
            frames: HashMap::from([(bounds.id, gray)]),
            failing: Vec::new(),
        }
    }
}

impl FrameSource for StaticFrames {
    fn displays(&self) -> Result<Vec<DisplayBounds>, CaptureError> {
        Ok(self.displays.clone())
    }

    fn capture(&self, display: &DisplayBounds) -> Result<Frame, CaptureError> {
        if self.failing.contains(&display.id) {
            return Err(CaptureError::DisplayGone { id: display.id });
        }
        Ok(Frame {
            bounds: *display,
            gray: self.frames[&display.id].clone(),
        })
    }
}

/// Injector that records every click into a shared list.
#[derive(Clone, Default)]
struct RecordingInjector {
    clicks: Arc<Mutex<Vec<(i32, i32, ClickKind)>>>,
}

impl RecordingInjector {
    fn clicks(&self) -> Vec<(i32, i32, ClickKind)> {
        self.clicks.lock().unwrap().clone()
    }
}

impl InputInjector for RecordingInjector {
    fn click(&mut self, x: i32, y: i32, kind: ClickKind) -> Result<(), InputError> {
        self.clicks.lock().unwrap().push((x, y, kind));
        Ok(())
    }
}

fn test_pattern(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| Luma([((x * 7 + y * 13) % 251) as u8]))
}

fn frame_with_pattern(pattern: &GrayImage, px: u32, py: u32, width: u32, height: u32) -> GrayImage {
    let mut frame = GrayImage::from_pixel(width, height, Luma([8]));
    image::imageops::replace(&mut frame, pattern, px as i64, py as i64);
    frame
}

fn display(id: u32, x: i32, y: i32) -> DisplayBounds {
    DisplayBounds {
        id,
        x,
        y,
        width: 200,
        height: 120,
    }
}

fn config_with_threshold(percent: u8) -> RunConfig {
    RunConfig {
        enabled: true,
        scan_interval_secs: 1,
        match_threshold_percent: percent,
        debug_logging: false,
    }
}

#[test]
fn resolve_adds_display_origin_and_offsets() {
    let bounds = DisplayBounds {
        id: 1,
        x: 100,
        y: -50,
        width: 1920,
        height: 1080,
    };
    let template = Template::from_gray("Close.RightClick.OX5.OY7..png", GrayImage::new(40, 30));

    let target = resolve_click(&bounds, 10, 20, &template);
    assert_eq!(
        target,
        ClickTarget {
            x: 115,
            y: -23,
            kind: ClickKind::Right,
        }
    );
}

#[test]
fn resolve_defaults_to_template_center() {
    let bounds = display(1, 0, 0);
    let template = Template::from_gray("Button.png", GrayImage::new(40, 30));

    let target = resolve_click(&bounds, 100, 50, &template);
    assert_eq!((target.x, target.y), (120, 65));
    assert_eq!(target.kind, ClickKind::Left);
}

#[tokio::test]
async fn pass_clicks_center_of_plain_template() {
    // "Button.png" with no markers, threshold 70, exact copy at (100, 50):
    // click lands at (100 + w/2, 50 + h/2) with the left button.
    let pattern = test_pattern(40, 30);
    let template = Template::from_gray("Button.png", pattern.clone());
    let frames = StaticFrames::single(display(1, 0, 0), frame_with_pattern(&pattern, 100, 50, 200, 120));
    let injector = RecordingInjector::default();
    let (event_tx, _event_rx) = create_loop_channels();

    let mut looper = DetectionLoop::new(
        config_with_threshold(70),
        Arc::new(ControlFlags::new(true)),
        vec![template],
        frames,
        injector.clone(),
        event_tx,
    );
    looper.run_once().await;

    assert_eq!(injector.clicks(), vec![(120, 65, ClickKind::Left)]);
}

#[tokio::test]
async fn pass_honors_offset_and_right_click_markers() {
    let pattern = test_pattern(40, 30);
    let template = Template::from_gray("Close.RightClick.OX5.OY5..png", pattern.clone());
    let frames = StaticFrames::single(display(1, 0, 0), frame_with_pattern(&pattern, 20, 20, 200, 120));
    let injector = RecordingInjector::default();
    let (event_tx, _event_rx) = create_loop_channels();

    let mut looper = DetectionLoop::new(
        config_with_threshold(70),
        Arc::new(ControlFlags::new(true)),
        vec![template],
        frames,
        injector.clone(),
        event_tx,
    );
    looper.run_once().await;

    assert_eq!(injector.clicks(), vec![(25, 25, ClickKind::Right)]);
}

#[tokio::test]
async fn pass_with_zero_templates_performs_zero_clicks() {
    let frames = StaticFrames::single(display(1, 0, 0), GrayImage::from_pixel(200, 120, Luma([50])));
    let injector = RecordingInjector::default();
    let (event_tx, mut event_rx) = create_loop_channels();

    let mut looper = DetectionLoop::new(
        config_with_threshold(70),
        Arc::new(ControlFlags::new(true)),
        Vec::new(),
        frames,
        injector.clone(),
        event_tx,
    );
    looper.run_once().await;

    assert!(injector.clicks().is_empty());
    match event_rx.recv().await {
        Some(LoopEvent::PassCompleted { clicks, templates, .. }) => {
            assert_eq!(clicks, 0);
            assert_eq!(templates, 0);
        }
        other => panic!("expected PassCompleted, got {other:?}"),
    }
}

#[tokio::test]
async fn below_threshold_match_does_not_click() {
    let pattern = test_pattern(40, 30);
    let template = Template::from_gray("Button.png", pattern);
    // frame with no copy of the pattern at all
    let frames = StaticFrames::single(display(1, 0, 0), GrayImage::from_pixel(200, 120, Luma([8])));
    let injector = RecordingInjector::default();
    let (event_tx, _event_rx) = create_loop_channels();

    let mut looper = DetectionLoop::new(
        config_with_threshold(99),
        Arc::new(ControlFlags::new(true)),
        vec![template],
        frames,
        injector.clone(),
        event_tx,
    );
    looper.run_once().await;

    assert!(injector.clicks().is_empty());
}

#[tokio::test]
async fn failing_display_does_not_stop_the_pass() {
    let pattern = test_pattern(40, 30);
    let template = Template::from_gray("Button.png", pattern.clone());

    let good = display(2, 1000, 0);
    let frames = StaticFrames {
        displays: vec![display(1, 0, 0), good],
        frames: HashMap::from([(2, frame_with_pattern(&pattern, 10, 10, 200, 120))]),
        failing: vec![1],
    };
    let injector = RecordingInjector::default();
    let (event_tx, _event_rx) = create_loop_channels();

    let mut looper = DetectionLoop::new(
        config_with_threshold(70),
        Arc::new(ControlFlags::new(true)),
        vec![template],
        frames,
        injector.clone(),
        event_tx,
    );
    looper.run_once().await;

    // the second display was still scanned and matched (origin 1000, match
    // at (10, 10), center offset (20, 15))
    assert_eq!(injector.clicks(), vec![(1030, 25, ClickKind::Left)]);
}

#[tokio::test]
async fn oversized_template_never_clicks() {
    let template = Template::from_gray("Huge.png", test_pattern(400, 300));
    let frames = StaticFrames::single(display(1, 0, 0), GrayImage::from_pixel(200, 120, Luma([50])));
    let injector = RecordingInjector::default();
    let (event_tx, _event_rx) = create_loop_channels();

    let mut looper = DetectionLoop::new(
        config_with_threshold(0),
        Arc::new(ControlFlags::new(true)),
        vec![template],
        frames,
        injector.clone(),
        event_tx,
    );
    looper.run_once().await;

    assert!(injector.clicks().is_empty());
}

#[tokio::test(start_paused = true)]
async fn enabled_flag_gates_scanning() {
    let pattern = test_pattern(40, 30);
    let template = Template::from_gray("Button.png", pattern.clone());
    let frames = StaticFrames::single(display(1, 0, 0), frame_with_pattern(&pattern, 100, 50, 200, 120));
    let injector = RecordingInjector::default();
    let flags = Arc::new(ControlFlags::new(false));
    let (event_tx, _event_rx) = create_loop_channels();

    let mut looper = DetectionLoop::new(
        config_with_threshold(70),
        Arc::clone(&flags),
        vec![template],
        frames,
        injector.clone(),
        event_tx,
    );
    assert_eq!(looper.state(), LoopState::Idle);

    let handle = tokio::spawn(async move {
        looper.run().await;
        looper
    });

    // disabled: no pass happens no matter how long we wait
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(injector.clicks().is_empty());

    // enabling triggers a first pass on the next tick
    flags.set_enabled(true);
    tokio::time::sleep(Duration::from_millis(500)).await;
    let after_enable = injector.clicks().len();
    assert_eq!(after_enable, 1);

    // disabling during Sleeping prevents the next Scanning transition
    flags.set_enabled(false);
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(injector.clicks().len(), after_enable);

    // re-enabling picks scanning back up
    flags.set_enabled(true);
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(injector.clicks().len() > after_enable);

    flags.request_shutdown();
    let looper = handle.await.unwrap();
    assert_eq!(looper.state(), LoopState::Terminating);
}

#[tokio::test(start_paused = true)]
async fn passes_repeat_on_the_configured_interval() {
    let pattern = test_pattern(40, 30);
    let template = Template::from_gray("Button.png", pattern.clone());
    let frames = StaticFrames::single(display(1, 0, 0), frame_with_pattern(&pattern, 0, 0, 200, 120));
    let injector = RecordingInjector::default();
    let flags = Arc::new(ControlFlags::new(true));
    let (event_tx, _event_rx) = create_loop_channels();

    let mut looper = DetectionLoop::new(
        RunConfig {
            enabled: true,
            scan_interval_secs: 3,
            match_threshold_percent: 70,
            debug_logging: false,
        },
        Arc::clone(&flags),
        vec![template],
        frames,
        injector.clone(),
        event_tx,
    );
    assert_eq!(looper.state(), LoopState::Sleeping);

    let handle = tokio::spawn(async move {
        looper.run().await;
    });

    // first pass fires immediately
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(injector.clicks().len(), 1);

    // next pass only after the interval elapses
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(injector.clicks().len(), 1);
    tokio::time::sleep(Duration::from_secs(3)).await;
    assert!(injector.clicks().len() >= 2);

    flags.request_shutdown();
    handle.await.unwrap();
}
