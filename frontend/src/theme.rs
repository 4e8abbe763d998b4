use crate::state::theme::Theme;

pub const SYSTEM_DARK_QUERY: &str = "(prefers-color-scheme: dark)";

pub fn theme_info_message(theme: Theme) -> String {
    format!("Current theme: {}", theme)
}

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{Event, EventTarget, KeyboardEvent, MediaQueryListEvent, StorageEvent};

    use super::{theme_info_message, SYSTEM_DARK_QUERY};
    use crate::components::theme::{is_activation_key, DocumentSurface};
    use crate::config;
    use crate::error::{describe_js, ThemeError};
    use crate::state::theme::{Theme, ThemeController};
    use crate::utils::{events, storage};
    use crate::utils::storage::LocalStorageStore;

    type WebController = ThemeController<LocalStorageStore, DocumentSurface>;

    thread_local! {
        static CONTROLLER: RefCell<Option<Rc<WebController>>> = const { RefCell::new(None) };
    }

    fn controller() -> Option<Rc<WebController>> {
        CONTROLLER.with(|slot| slot.borrow().clone())
    }

    fn report<T>(action: &str, result: Result<T, ThemeError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                log::error!("{} failed: {}", action, err);
                None
            }
        }
    }

    fn listen(
        target: &EventTarget,
        event: &str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<(), ThemeError> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|err| ThemeError::Dom(describe_js(&err)))?;
        closure.forget();
        Ok(())
    }

    fn attach_toggle(ctrl: &Rc<WebController>) -> Result<(), ThemeError> {
        let Some(control) = ctrl.view().toggle_control().cloned() else {
            return Ok(());
        };

        let on_click = ctrl.clone();
        listen(&control, "click", move |_| {
            report("toggle", on_click.toggle());
        })?;

        let on_key = ctrl.clone();
        listen(&control, "keydown", move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if is_activation_key(&event.key()) {
                event.prevent_default();
                report("toggle", on_key.toggle());
            }
        })
    }

    fn attach_system_preference(
        ctrl: &Rc<WebController>,
        query: &web_sys::MediaQueryList,
    ) -> Result<(), ThemeError> {
        let ctrl = ctrl.clone();
        listen(query, "change", move |event| {
            let Some(event) = event.dyn_ref::<MediaQueryListEvent>() else {
                return;
            };
            report(
                "system color scheme change",
                ctrl.on_system_preference_change(event.matches()),
            );
        })
    }

    fn attach_reconcilers(
        ctrl: &Rc<WebController>,
        window: &web_sys::Window,
        document: &web_sys::Document,
    ) -> Result<(), ThemeError> {
        let on_visible = ctrl.clone();
        let doc = document.clone();
        listen(document, "visibilitychange", move |_| {
            if !doc.hidden() {
                report("visibility reconcile", on_visible.reconcile());
            }
        })?;

        // Another tab wrote the slot.
        let on_storage = ctrl.clone();
        listen(window, "storage", move |event| {
            let Some(event) = event.dyn_ref::<StorageEvent>() else {
                return;
            };
            if event.key().as_deref() == Some(on_storage.store().key()) {
                report("storage reconcile", on_storage.reconcile());
            }
        })
    }

    fn expose(window: &web_sys::Window, name: &str, value: &JsValue) -> Result<(), ThemeError> {
        js_sys::Reflect::set(window, &name.into(), value)
            .map(|_| ())
            .map_err(|err| ThemeError::Dom(describe_js(&err)))
    }

    fn expose_globals(window: &web_sys::Window) -> Result<(), ThemeError> {
        let show = Closure::<dyn Fn()>::new(show_theme_info);
        expose(window, "showThemeInfo", show.as_ref())?;
        show.forget();

        let current = Closure::<dyn Fn() -> String>::new(|| current_theme().as_str().to_string());
        expose(window, "getCurrentTheme", current.as_ref())?;
        current.forget();

        let dark = Closure::<dyn Fn() -> bool>::new(is_dark_mode);
        expose(window, "isDarkMode", dark.as_ref())?;
        dark.forget();

        let flip = Closure::<dyn Fn()>::new(toggle);
        expose(window, "toggleTheme", flip.as_ref())?;
        flip.forget();
        Ok(())
    }

    pub fn init() -> Result<Theme, ThemeError> {
        let cfg = config::current();
        let window = storage::window()?;
        let document = window.document().ok_or(ThemeError::NoDocument)?;

        let surface = DocumentSurface::bind(&document, &cfg)?;
        let ctrl = Rc::new(ThemeController::new(
            LocalStorageStore::new(cfg.storage_key.clone()),
            surface,
        ));

        let target = window.clone();
        let event_name = cfg.event_name.clone();
        ctrl.subscribe(move |theme| {
            report(
                "theme broadcast",
                events::dispatch_theme_change(&target, &event_name, theme),
            );
        });
        CONTROLLER.with(|slot| *slot.borrow_mut() = Some(ctrl.clone()));

        let media_query = window.match_media(SYSTEM_DARK_QUERY).ok().flatten();
        let prefers_dark = media_query.as_ref().map(|m| m.matches()).unwrap_or(false);
        let theme = ctrl.initialize(prefers_dark)?;

        match &media_query {
            Some(query) => attach_system_preference(&ctrl, query)?,
            None => log::debug!("matchMedia unavailable; system preference not tracked"),
        }
        attach_toggle(&ctrl)?;
        attach_reconcilers(&ctrl, &window, &document)?;
        expose_globals(&window)?;

        log::info!("Theme controller ready ({})", theme);
        Ok(theme)
    }

    pub fn current_theme() -> Theme {
        controller().map(|c| c.current_theme()).unwrap_or_default()
    }

    pub fn is_dark_mode() -> bool {
        current_theme() == Theme::Dark
    }

    pub fn toggle() {
        match controller() {
            Some(ctrl) => {
                report("toggle", ctrl.toggle());
            }
            None => log::warn!("toggleTheme called before initialization"),
        }
    }

    pub fn show_theme_info() {
        let message = theme_info_message(current_theme());
        if let Some(window) = web_sys::window() {
            if let Err(err) = window.alert_with_message(&message) {
                log::error!("alert failed: {}", describe_js(&err));
            }
        }
    }

}

#[cfg(target_arch = "wasm32")]
pub use wasm::{current_theme, init as init_theme, is_dark_mode, show_theme_info, toggle};
