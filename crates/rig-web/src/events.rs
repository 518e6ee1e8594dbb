use crate::dom::Listener;
use crate::input;
use rig_core::TargetSlot;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Listeners owned by one mounted dashboard. Dropping (or clearing) the set
/// unregisters every one of them.
pub type ListenerSet = Rc<RefCell<Vec<Listener>>>;

pub fn wire_pointer(window: &web::Window, slot: TargetSlot, listeners: &ListenerSet) {
    let wnd = window.clone();
    let listener = Listener::add(window, "pointermove", move |ev: web::Event| {
        if let Some(ev) = ev.dyn_ref::<web::PointerEvent>() {
            slot.set(input::pointer_sample(ev, &wnd));
        }
    });
    if let Some(l) = listener {
        listeners.borrow_mut().push(l);
    }
}

fn wire_orientation(window: &web::Window, slot: TargetSlot, listeners: &ListenerSet) {
    if listeners
        .borrow()
        .iter()
        .any(|l| l.kind() == "deviceorientation")
    {
        return;
    }
    let listener = Listener::add(window, "deviceorientation", move |ev: web::Event| {
        if let Some(sample) = ev
            .dyn_ref::<web::DeviceOrientationEvent>()
            .and_then(input::tilt_sample)
        {
            slot.set(sample);
        }
    });
    if let Some(l) = listener {
        log::info!("[input] device orientation enabled");
        listeners.borrow_mut().push(l);
    }
}

/// Ask for orientation access where the browser requires it, then listen.
/// A refusal (or an error) leaves the tracker at rest.
pub fn wire_tilt(window: &web::Window, slot: TargetSlot, listeners: &ListenerSet) {
    let Some(request) = input::orientation_permission_request(window) else {
        wire_orientation(window, slot, listeners);
        return;
    };
    let window = window.clone();
    let listeners = Rc::downgrade(listeners);
    spawn_local(async move {
        let granted = match JsFuture::from(request).await {
            Ok(v) => v.as_string().as_deref() == Some("granted"),
            Err(e) => {
                log::warn!("[input] orientation permission failed: {:?}", e);
                false
            }
        };
        if !granted {
            log::info!("[input] orientation permission not granted");
            return;
        }
        // unmounted while the prompt was open
        if let Some(listeners) = listeners.upgrade() {
            wire_orientation(&window, slot, &listeners);
        }
    });
}
