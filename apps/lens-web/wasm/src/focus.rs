//! Auto-scroll and emphasis for the selected highlight
//!
//! When the selected highlight changes to a new id, the matching runs are
//! scrolled into view after a short delay and briefly emphasized. A newer
//! selection cancels a scroll that has not fired yet.

use highlight_engine::HIGHLIGHT_ID_ATTR;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use web_sys::{Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Window};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FocusConfig {
    /// Delay before scrolling, lets the panes re-render first
    pub debounce_ms: u32,
    /// How long the emphasis classes stay on
    pub emphasis_ms: u32,
    pub emphasis_classes: Vec<String>,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 100,
            emphasis_ms: 1500,
            emphasis_classes: vec!["ring-4".to_string(), "ring-indigo-300".to_string()],
        }
    }
}

/// Decides when a selection change warrants a scroll
#[derive(Debug, Default)]
pub struct FocusPlanner {
    last: Option<String>,
}

impl FocusPlanner {
    /// Record the current selection, returning the id to focus if it changed
    /// to a highlight
    pub fn observe(&mut self, selected: Option<&str>) -> Option<String> {
        if self.last.as_deref() == selected {
            return None;
        }
        self.last = selected.map(String::from);
        self.last.clone()
    }
}

/// Schedules DOM focus work for selection changes
pub struct FocusReactor {
    config: FocusConfig,
    planner: FocusPlanner,
    pending: Option<(i32, Closure<dyn FnMut()>)>,
}

impl FocusReactor {
    pub fn new(config: FocusConfig) -> Self {
        Self {
            config,
            planner: FocusPlanner::default(),
            pending: None,
        }
    }

    pub fn config(&self) -> &FocusConfig {
        &self.config
    }

    pub fn observe(&mut self, selected: Option<&str>) -> Result<(), JsValue> {
        match self.planner.observe(selected) {
            Some(id) => self.schedule(id),
            None => Ok(()),
        }
    }

    fn schedule(&mut self, id: String) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window available"))?;
        self.cancel(&window);

        let config = self.config.clone();
        let delay = config.debounce_ms as i32;
        let callback = Closure::<dyn FnMut()>::new(move || {
            if let Err(e) = focus_highlight(&id, &config) {
                web_sys::console::warn_1(&e);
            }
        });
        let handle = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay,
        )?;
        self.pending = Some((handle, callback));
        Ok(())
    }

    fn cancel(&mut self, window: &Window) {
        if let Some((handle, _callback)) = self.pending.take() {
            window.clear_timeout_with_handle(handle);
        }
    }
}

impl Drop for FocusReactor {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            self.cancel(&window);
        }
    }
}

/// Scroll the first run carrying `id` to the center and emphasize every run
/// carrying it. Returns false when no run is in the document.
pub fn focus_highlight(id: &str, config: &FocusConfig) -> Result<bool, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window available"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("No document available"))?;

    // Ids are compared as attribute values, no selector escaping needed
    let nodes = document.query_selector_all(&format!("[{}]", HIGHLIGHT_ID_ATTR))?;
    let mut scrolled = false;

    for i in 0..nodes.length() {
        let Some(element) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        if element.get_attribute(HIGHLIGHT_ID_ATTR).as_deref() != Some(id) {
            continue;
        }

        if !scrolled {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::Center);
            element.scroll_into_view_with_scroll_into_view_options(&options);
            scrolled = true;
        }
        emphasize(&window, &element, config)?;
    }

    if !scrolled {
        web_sys::console::log_1(&format!("Highlight {} is not rendered", id).into());
    }
    Ok(scrolled)
}

fn emphasize(window: &Window, element: &Element, config: &FocusConfig) -> Result<(), JsValue> {
    let classes = element.class_list();
    for class in &config.emphasis_classes {
        classes.add_1(class)?;
    }

    let target = element.clone();
    let added = config.emphasis_classes.clone();
    let remove = Closure::once_into_js(move || {
        let classes = target.class_list();
        for class in &added {
            let _ = classes.remove_1(class);
        }
    });
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        remove.unchecked_ref(),
        config.emphasis_ms as i32,
    )?;
    Ok(())
}
