use rig_core::constants::MOBILE_MAX_VIEWPORT_PX;
use rig_core::{normalize_pointer, normalize_tilt, DeviceCapability, DeviceClass, PointerSample};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Pointer position relative to the viewport.
#[inline]
pub fn pointer_sample(ev: &web::PointerEvent, window: &web::Window) -> PointerSample {
    let (w, h) = crate::dom::viewport_size(window);
    normalize_pointer(ev.client_x() as f32, ev.client_y() as f32, w, h)
}

/// `None` until the device reports both tilt axes.
#[inline]
pub fn tilt_sample(ev: &web::DeviceOrientationEvent) -> Option<PointerSample> {
    let gamma = ev.gamma()?;
    let beta = ev.beta()?;
    Some(normalize_tilt(gamma as f32, beta as f32))
}

pub fn user_agent(window: &web::Window) -> String {
    window.navigator().user_agent().unwrap_or_default()
}

fn narrow_viewport(window: &web::Window) -> bool {
    let query = format!("(max-width: {}px)", MOBILE_MAX_VIEWPORT_PX);
    window
        .match_media(&query)
        .ok()
        .flatten()
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

pub fn device_class(window: &web::Window) -> DeviceClass {
    let width = if narrow_viewport(window) {
        Some(MOBILE_MAX_VIEWPORT_PX)
    } else {
        let (w, _) = crate::dom::viewport_size(window);
        (w > 0.0).then_some(w as u32)
    };
    DeviceClass::detect(&user_agent(window), width)
}

pub fn device_capability(window: &web::Window, class: DeviceClass) -> DeviceCapability {
    let navigator = window.navigator();
    let cores = navigator.hardware_concurrency().max(1.0) as u32;
    // Chromium only; other engines hide it
    let memory = js_sys::Reflect::get(&navigator, &JsValue::from_str("deviceMemory"))
        .ok()
        .and_then(|v| v.as_f64())
        .map(|m| m as f32);
    DeviceCapability::detect(cores, memory, class == DeviceClass::Tilt)
}

/// `DeviceOrientationEvent.requestPermission`, where the browser gates tilt
/// behind a prompt. `None` if no prompt is needed.
pub fn orientation_permission_request(window: &web::Window) -> Option<js_sys::Promise> {
    let ctor = js_sys::Reflect::get(window, &JsValue::from_str("DeviceOrientationEvent")).ok()?;
    let request = js_sys::Reflect::get(&ctor, &JsValue::from_str("requestPermission"))
        .ok()?
        .dyn_into::<js_sys::Function>()
        .ok()?;
    request.call0(&ctor).ok()?.dyn_into::<js_sys::Promise>().ok()
}
