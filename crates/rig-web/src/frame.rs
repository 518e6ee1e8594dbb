use crate::dom;
use crate::overlay;
use instant::Instant;
use rig_core::{
    Alarm, AlarmList, Camera, CameraIntro, FrameClock, Model, RigController, RigInput,
    SharedSystem, Tracker,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub tracker: Tracker,
    pub rig: RigController<Model>,
    pub intro: CameraIntro,
    pub camera: Camera,
    pub clock: FrameClock,
    pub system: SharedSystem,
    pub alarms: Rc<RefCell<AlarmList>>,
    /// Alarms that rang since the host last collected them.
    pub ringing: Vec<Alarm>,

    pub window: web::Window,
    pub document: web::Document,
    pub gui_element_id: String,
    pub gui_shown: bool,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = self.clock.tick(now);
        let tick = dom::local_clock();
        let new_second = {
            let mut system = self.system.borrow_mut();
            system.on_frame(now);
            // backs up the fallback timer if it never got scheduled
            let _ = system.gui.poll(now);
            system.set_clock(tick)
        };
        if new_second && tick.is_minute_start() {
            self.ring_alarms(tick.hours, tick.minutes);
        }

        let target = self.tracker.tick(dt);
        self.rig.update(RigInput::new(target.nx, target.ny, dt));

        // completion callback borrows `system`, so no borrow may be held here
        if let Some(pose) = self.intro.advance(dt) {
            self.camera.apply_pose(&pose);
        }

        let (w, h) = dom::viewport_size(&self.window);
        self.camera.set_aspect(w as u32, h as u32);

        self.sync_gui();
    }

    fn ring_alarms(&mut self, hour: u8, minute: u8) {
        for alarm in self.alarms.borrow().due(hour, minute) {
            log::info!("[alarm] {} {}", alarm.time, alarm.label);
            self.ringing.push(alarm.clone());
        }
    }

    /// Show the GUI element once the gate has opened.
    pub fn sync_gui(&mut self) {
        if self.gui_shown || !self.system.borrow().gui.is_visible() {
            return;
        }
        overlay::show(&self.document, &self.gui_element_id);
        self.gui_shown = true;
    }
}

/// A `requestAnimationFrame` loop that can be stopped.
pub struct AnimationLoop {
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    pending: Rc<Cell<Option<i32>>>,
}

impl AnimationLoop {
    pub fn start(frame_ctx: Rc<RefCell<FrameContext>>) -> Self {
        let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));
        let tick_clone = tick.clone();
        let pending_clone = pending.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending_clone.set(None);
            frame_ctx.borrow_mut().frame();
            pending_clone.set(request_frame(&tick_clone));
        }) as Box<dyn FnMut()>));
        pending.set(request_frame(&tick));
        Self { tick, pending }
    }

    /// Cancel the pending frame and release the callback.
    pub fn stop(&mut self) {
        if let (Some(id), Some(w)) = (self.pending.take(), web::window()) {
            let _ = w.cancel_animation_frame(id);
        }
        // breaks the closure -> tick -> closure cycle
        self.tick.borrow_mut().take();
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) -> Option<i32> {
    let w = web::window()?;
    let tick = tick.borrow();
    let cb = tick.as_ref()?;
    w.request_animation_frame(cb.as_ref().unchecked_ref()).ok()
}
