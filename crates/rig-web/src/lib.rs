#![cfg(target_arch = "wasm32")]
//! Browser front end. The host page owns the renderer and model loading; it
//! creates a [`Dashboard`], reports the model through it and reads poses and
//! camera state back every frame.

use crate::dom::Timeout;
use crate::events::ListenerSet;
use crate::frame::{AnimationLoop, FrameContext};
use crate::storage::BrowserStore;
use anyhow::anyhow;
use instant::Instant;
use rig_core::constants::GUI_FALLBACK_TIMEOUT_SEC;
use rig_core::{
    AlarmList, AlarmTime, CalendarNotes, Camera, CameraIntro, DeviceClass, FrameClock, IntroConfig,
    Model, NoteDate, RevealCause, RigConfig, RigController, SharedSystem, SystemState,
    TargetSlot, TaskCategory, TaskList, Tracker, TrackerConfig,
};
use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod storage;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("rig-web loaded");
    Ok(())
}

fn to_js(e: impl Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct Dashboard {
    frame_ctx: Rc<RefCell<FrameContext>>,
    system: SharedSystem,
    slot: TargetSlot,
    device: DeviceClass,
    listeners: Option<ListenerSet>,
    animation: Option<AnimationLoop>,
    fallback: Option<Timeout>,

    store: BrowserStore,
    tasks: TaskList,
    notes: CalendarNotes,
    alarms: Rc<RefCell<AlarmList>>,
}

#[wasm_bindgen]
impl Dashboard {
    /// Start tracking input. The camera intro waits for `attach_model`.
    /// `gui_element_id` names the element kept hidden until the intro
    /// finishes.
    #[wasm_bindgen(constructor)]
    pub fn mount(gui_element_id: Option<String>) -> Result<Dashboard, JsValue> {
        let id = gui_element_id.unwrap_or_else(|| overlay::GUI_ELEMENT_ID.to_owned());
        Self::try_mount(id).map_err(to_js)
    }

    /// Bind a freshly loaded model, given as node names plus parent indices
    /// (negative for the root), and start the camera intro. Returns how many
    /// joints were found.
    pub fn attach_model(&mut self, names: js_sys::Array, parents: Vec<i32>) -> Result<usize, JsValue> {
        let names: Vec<String> = names.iter().filter_map(|v| v.as_string()).collect();
        let model = Model::from_parents(&names, &parents).map_err(to_js)?;
        log::info!("[dashboard] model attached ({} nodes)", model.len());
        let mut ctx = self.frame_ctx.borrow_mut();
        let joints = ctx.rig.attach_model(model).len();
        ctx.intro.start();
        Ok(joints)
    }

    /// The model could not be loaded: skip the intro and show the GUI now.
    pub fn model_failed(&mut self) {
        log::warn!("[dashboard] model failed to load, skipping intro");
        self.system.borrow_mut().gui.signal(RevealCause::LoadFailed);
        let mut ctx = self.frame_ctx.borrow_mut();
        if let Some(pose) = ctx.intro.skip() {
            ctx.camera.apply_pose(&pose);
        }
        ctx.sync_gui();
    }

    pub fn detach_model(&mut self) -> bool {
        self.frame_ctx.borrow_mut().rig.detach_model().is_some()
    }

    /// `[qx, qy, qz, qw, scale]` per node, in the order passed to
    /// `attach_model`. Empty without a model.
    pub fn pose_buffer(&self) -> Vec<f32> {
        self.frame_ctx
            .borrow()
            .rig
            .model()
            .map(Model::pose_buffer)
            .unwrap_or_default()
    }

    /// `[x, y, z, fov_deg, roll_rad]`.
    pub fn camera_state(&self) -> Vec<f32> {
        self.frame_ctx.borrow().camera.state_array().to_vec()
    }

    /// Column-major view-projection matrix.
    pub fn view_projection(&self) -> Vec<f32> {
        self.frame_ctx
            .borrow()
            .camera
            .view_proj()
            .to_cols_array()
            .to_vec()
    }

    pub fn intro_complete(&self) -> bool {
        self.frame_ctx.borrow().intro.is_complete()
    }

    pub fn gui_visible(&self) -> bool {
        self.system.borrow().gui.is_visible()
    }

    pub fn fps(&self) -> f32 {
        self.system.borrow().fps.average()
    }

    pub fn target_fps(&self) -> u32 {
        self.system.borrow().capability.target_fps
    }

    pub fn post_processing(&self) -> bool {
        self.system.borrow().capability.post_processing
    }

    /// Call from a user gesture on browsers that prompt for tilt access.
    pub fn enable_tilt(&self) {
        if self.device != DeviceClass::Tilt {
            return;
        }
        if let (Some(window), Some(listeners)) = (web::window(), self.listeners.as_ref()) {
            events::wire_tilt(&window, self.slot.clone(), listeners);
        }
    }

    pub fn tasks_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.tasks.tasks()).map_err(to_js)
    }

    pub fn add_task(&mut self, text: &str, category: &str) -> Option<String> {
        let category = TaskCategory::from_name(category).unwrap_or_default();
        let id = self.tasks.add(text, category, dom::now_ms())?;
        self.persist_tasks();
        Some(id)
    }

    pub fn toggle_task(&mut self, id: &str) -> bool {
        let changed = self.tasks.toggle(id);
        if changed {
            self.persist_tasks();
        }
        changed
    }

    pub fn edit_task(&mut self, id: &str, text: &str) -> bool {
        let changed = self.tasks.edit(id, text);
        if changed {
            self.persist_tasks();
        }
        changed
    }

    pub fn delete_task(&mut self, id: &str) -> bool {
        let changed = self.tasks.delete(id);
        if changed {
            self.persist_tasks();
        }
        changed
    }

    pub fn task_progress(&self) -> f32 {
        self.tasks.stats().progress_pct
    }

    /// Note for a `YYYY-MM-DD` date; empty when there is none.
    pub fn note(&self, date: &str) -> Result<String, JsValue> {
        Ok(self.notes.get(parse_date(date)?).to_owned())
    }

    pub fn set_note(&mut self, date: &str, content: &str) -> Result<(), JsValue> {
        self.notes.set(parse_date(date)?, content);
        self.notes.save(&mut self.store).map_err(to_js)
    }

    pub fn delete_note(&mut self, date: &str) -> Result<bool, JsValue> {
        let removed = self.notes.delete(parse_date(date)?);
        if removed {
            self.notes.save(&mut self.store).map_err(to_js)?;
        }
        Ok(removed)
    }

    pub fn has_note(&self, date: &str) -> bool {
        NoteDate::parse(date).is_some_and(|d| self.notes.has(d))
    }

    /// Local time as `HH:MM:SS`; empty before the first frame.
    pub fn clock(&self) -> String {
        self.system
            .borrow()
            .clock
            .map(|t| t.to_string())
            .unwrap_or_default()
    }

    pub fn alarms_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.alarms.borrow().alarms()).map_err(to_js)
    }

    /// Add an alarm for `HH:MM`. Returns its id.
    pub fn add_alarm(&mut self, time: &str, label: &str) -> Result<String, JsValue> {
        let time = AlarmTime::parse(time)
            .ok_or_else(|| to_js(format!("invalid time {:?}, expected HH:MM", time)))?;
        let id = self.alarms.borrow_mut().add(time, label, dom::now_ms());
        self.persist_alarms();
        Ok(id)
    }

    pub fn toggle_alarm(&mut self, id: &str) -> bool {
        let changed = self.alarms.borrow_mut().toggle(id);
        if changed {
            self.persist_alarms();
        }
        changed
    }

    pub fn delete_alarm(&mut self, id: &str) -> bool {
        let changed = self.alarms.borrow_mut().delete(id);
        if changed {
            self.persist_alarms();
        }
        changed
    }

    /// The next alarm to ring, as `HH:MM`; empty when none is active.
    pub fn next_alarm(&self) -> String {
        let now = match self.system.borrow().clock {
            Some(t) => t.alarm_time(),
            None => return String::new(),
        };
        self.alarms
            .borrow()
            .next_after(now)
            .map(|a| a.time.to_string())
            .unwrap_or_default()
    }

    /// Alarms that rang since the last call, as JSON. The host plays the
    /// sound or shows the notification.
    pub fn take_ringing_alarms(&mut self) -> Result<String, JsValue> {
        let ringing = std::mem::take(&mut self.frame_ctx.borrow_mut().ringing);
        serde_json::to_string(&ringing).map_err(to_js)
    }

    /// Stop the frame loop, drop every listener and the fallback timer, and
    /// release the model. Safe to call more than once.
    pub fn unmount(&mut self) {
        if self.animation.is_none() && self.listeners.is_none() {
            return;
        }
        self.teardown();
        log::info!("[dashboard] unmounted");
    }
}

impl Dashboard {
    fn try_mount(gui_element_id: String) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow!("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| anyhow!("no document"))?;

        let device = input::device_class(&window);
        let capability = input::device_capability(&window, device);
        let system = SystemState::shared(Instant::now(), capability);

        let rig_config = RigConfig {
            micro_motion: capability.micro_motion,
            ..RigConfig::default()
        };
        rig_config.validate()?;
        let tracker_config = TrackerConfig::default();
        tracker_config.validate()?;
        let intro_config = IntroConfig::default();
        intro_config.validate()?;

        let tracker = Tracker::new(tracker_config);
        let slot = tracker.target_slot();

        let mut intro = CameraIntro::waiting(intro_config);
        let sys = system.clone();
        intro.on_complete(move || {
            sys.borrow_mut().gui.signal(RevealCause::IntroComplete);
        });
        let (w, h) = dom::viewport_size(&window);
        let mut camera = Camera::from_pose(&intro.start_pose(), 1.0);
        camera.set_aspect(w as u32, h as u32);

        overlay::hide(&document, &gui_element_id);

        let store = BrowserStore::open(&window);
        let tasks = TaskList::load(&store);
        let notes = CalendarNotes::load(&store);
        let alarms = Rc::new(RefCell::new(AlarmList::load(&store)));

        let frame_ctx = Rc::new(RefCell::new(FrameContext {
            tracker,
            rig: RigController::new(rig_config),
            intro,
            camera,
            clock: FrameClock::default(),
            system: system.clone(),
            alarms: alarms.clone(),
            ringing: Vec::new(),
            window: window.clone(),
            document,
            gui_element_id,
            gui_shown: false,
        }));

        let listeners: ListenerSet = Rc::new(RefCell::new(Vec::new()));
        match device {
            DeviceClass::Pointer => events::wire_pointer(&window, slot.clone(), &listeners),
            DeviceClass::Tilt => events::wire_tilt(&window, slot.clone(), &listeners),
        }

        let fallback = {
            let sys = system.clone();
            let ctx = Rc::downgrade(&frame_ctx);
            Timeout::schedule(&window, (GUI_FALLBACK_TIMEOUT_SEC * 1000.0) as i32, move || {
                sys.borrow_mut().gui.signal(RevealCause::Timeout);
                if let Some(ctx) = ctx.upgrade() {
                    ctx.borrow_mut().sync_gui();
                }
            })
        };
        if fallback.is_none() {
            log::warn!("[dashboard] could not schedule GUI fallback; relying on frame polling");
        }

        let animation = AnimationLoop::start(frame_ctx.clone());

        log::info!(
            "[dashboard] mounted: input={:?} tier={:?} target_fps={} tasks={} notes={} alarms={}",
            device,
            capability.tier,
            capability.target_fps,
            tasks.tasks().len(),
            notes.len(),
            alarms.borrow().alarms().len()
        );

        Ok(Self {
            frame_ctx,
            system,
            slot,
            device,
            listeners: Some(listeners),
            animation: Some(animation),
            fallback,
            store,
            tasks,
            notes,
            alarms,
        })
    }

    fn persist_alarms(&mut self) {
        if let Err(e) = self.alarms.borrow().save(&mut self.store) {
            log::warn!("[dashboard] could not save alarms: {}", e);
        }
    }

    fn persist_tasks(&mut self) {
        if let Err(e) = self.tasks.save(&mut self.store) {
            log::warn!("[dashboard] could not save tasks: {}", e);
        }
    }

    fn teardown(&mut self) {
        if let Some(mut animation) = self.animation.take() {
            animation.stop();
        }
        self.fallback = None;
        if let Some(listeners) = self.listeners.take() {
            listeners.borrow_mut().clear();
        }
        self.frame_ctx.borrow_mut().rig.detach_model();
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn parse_date(date: &str) -> Result<NoteDate, JsValue> {
    NoteDate::parse(date).ok_or_else(|| to_js(format!("invalid date {:?}, expected YYYY-MM-DD", date)))
}
