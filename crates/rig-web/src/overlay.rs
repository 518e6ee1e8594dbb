use web_sys as web;

pub const GUI_ELEMENT_ID: &str = "dashboard-gui";

#[inline]
pub fn show(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        let _ = el.class_list().remove_1("hidden");
        let _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        let _ = el.class_list().add_1("hidden");
        let _ = el.set_attribute("style", "display:none");
    }
}
