use wasm_bindgen::JsValue;
use web_sys::{CustomEvent, CustomEventInit, Window};

use crate::error::{describe_js, ThemeError};
use crate::state::theme::Theme;

fn detail_for(theme: Theme) -> Result<JsValue, JsValue> {
    let obj = js_sys::Object::new();
    js_sys::Reflect::set(&obj, &"theme".into(), &JsValue::from_str(theme.as_str()))?;
    Ok(obj.into())
}

/// Dispatches `event_name` on `window` with `detail = { theme }`.
pub fn dispatch_theme_change(
    window: &Window,
    event_name: &str,
    theme: Theme,
) -> Result<(), ThemeError> {
    let failed = |err: JsValue| ThemeError::Dispatch {
        event: event_name.to_string(),
        reason: describe_js(&err),
    };
    let init = CustomEventInit::new();
    init.set_detail(&detail_for(theme).map_err(failed)?);
    let event = CustomEvent::new_with_event_init_dict(event_name, &init).map_err(failed)?;
    window.dispatch_event(&event).map_err(failed)?;
    Ok(())
}
