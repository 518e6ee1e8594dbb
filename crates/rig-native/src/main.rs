//! Desktop harness: drives the rig against the built-in humanoid with the OS
//! cursor and reports joint state in the window title and the log.

use anyhow::Context;
use instant::Instant;
use rig_core::{
    normalize_pointer, Angles, Camera, CameraIntro, ClockTick, DeviceCapability, FrameClock, Model,
    RevealCause, RigConfig, RigController, RigInput, SharedSystem, SystemState, TargetSlot,
    Tracker,
};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowBuilder};

const REPORT_INTERVAL: Duration = Duration::from_secs(2);

/// UTC wall clock; the harness has no time zone database.
fn utc_clock() -> ClockTick {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    ClockTick::from_seconds_of_day(secs)
}

struct Harness {
    tracker: Tracker,
    slot: TargetSlot,
    rig: RigController,
    intro: CameraIntro,
    camera: Camera,
    clock: FrameClock,
    system: SharedSystem,
    size: PhysicalSize<u32>,
    last_report: Instant,
}

impl Harness {
    fn new(size: PhysicalSize<u32>) -> anyhow::Result<Self> {
        let now = Instant::now();
        let system = SystemState::shared(now, DeviceCapability::default());

        let config = RigConfig::default();
        config.validate().context("rig config")?;
        let mut rig = RigController::new(config);
        let joints = rig.attach_model(Model::humanoid()).len();
        log::info!("[native] humanoid attached, {} joints bound", joints);

        let mut intro = CameraIntro::default();
        let sys = system.clone();
        intro.on_complete(move || {
            sys.borrow_mut().gui.signal(RevealCause::IntroComplete);
        });
        let mut camera = Camera::from_pose(&intro.start_pose(), 1.0);
        camera.set_aspect(size.width, size.height);

        let tracker = Tracker::default();
        let slot = tracker.target_slot();
        Ok(Self {
            tracker,
            slot,
            rig,
            intro,
            camera,
            clock: FrameClock::default(),
            system,
            size,
            last_report: now,
        })
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.size = size;
        self.camera.set_aspect(size.width, size.height);
    }

    fn pointer(&mut self, position: PhysicalPosition<f64>) {
        self.slot.set(normalize_pointer(
            position.x as f32,
            position.y as f32,
            self.size.width as f32,
            self.size.height as f32,
        ));
    }

    fn frame(&mut self, window: &Window) {
        let now = Instant::now();
        let dt = self.clock.tick(now);
        {
            let mut system = self.system.borrow_mut();
            system.on_frame(now);
            let _ = system.gui.poll(now);
            system.set_clock(utc_clock());
        }

        let target = self.tracker.tick(dt);
        self.rig.update(RigInput::new(target.nx, target.ny, dt));
        if let Some(pose) = self.intro.advance(dt) {
            self.camera.apply_pose(&pose);
        }

        let head = self.head_angles();
        let (fps, gui, clock) = {
            let system = self.system.borrow();
            (system.fps.average(), system.gui.is_visible(), system.clock)
        };
        window.set_title(&format!(
            "robodash  {}  head {:+.1}/{:+.1}  {:.0} fps{}",
            clock.map(|c| c.to_string()).unwrap_or_default(),
            head.yaw,
            head.pitch,
            fps,
            if gui { "" } else { "  (intro)" }
        ));

        if now.duration_since(self.last_report) >= REPORT_INTERVAL {
            self.last_report = now;
            let breathing = self.rig.idle().breathing_scale;
            log::info!(
                "[native] target=({:+.2},{:+.2}) head=({:+.1},{:+.1}) chest_scale={:.4} eye={:.2} fov={:.1} fps={:.0}",
                target.nx,
                target.ny,
                head.yaw,
                head.pitch,
                breathing,
                self.camera.eye,
                self.camera.fovy_radians.to_degrees(),
                fps
            );
        }
    }

    fn head_angles(&self) -> Angles {
        let Some(model) = self.rig.model() else {
            return Angles::ZERO;
        };
        model
            .find("Head")
            .and_then(|id| model.node(id))
            .map(|n| Angles::from_quat(n.rotation))
            .unwrap_or(Angles::ZERO)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("robodash (native)")
        .with_inner_size(LogicalSize::new(960.0, 640.0))
        .build(&event_loop)?;

    let mut harness = Harness::new(window.inner_size())?;

    event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Poll);
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::KeyboardInput { event, .. }
                    if event.state == ElementState::Pressed
                        && event.logical_key == Key::Named(NamedKey::Escape) =>
                {
                    elwt.exit()
                }
                WindowEvent::Resized(size) => harness.resize(size),
                WindowEvent::CursorMoved { position, .. } => harness.pointer(position),
                WindowEvent::RedrawRequested => harness.frame(&window),
                _ => {}
            },
            Event::AboutToWait => window.request_redraw(),
            _ => {}
        }
    })?;
    Ok(())
}
