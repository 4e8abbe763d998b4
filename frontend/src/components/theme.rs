/// Keys that activate the toggle control while it has focus.
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " " | "Spacebar")
}

pub fn press_transform(scale: f64) -> String {
    format!("scale({})", scale)
}

pub const RESTING_TRANSFORM: &str = "scale(1)";

#[cfg(target_arch = "wasm32")]
mod wasm {
    use super::{press_transform, RESTING_TRANSFORM};
    use std::cell::RefCell;

    use gloo_timers::callback::Timeout;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, Element, HtmlElement};

    use crate::config::ThemeConfig;
    use crate::error::{describe_js, ThemeError};
    use crate::state::theme::{Theme, ThemeView};

    fn find(document: &Document, selector: &str) -> Option<HtmlElement> {
        match document.query_selector(selector) {
            Ok(found) => found.and_then(|el| el.dyn_into::<HtmlElement>().ok()),
            Err(err) => {
                log::warn!("Bad selector `{}`: {}", selector, describe_js(&err));
                None
            }
        }
    }

    fn set_style(el: &HtmlElement, property: &str, value: &str) -> Result<(), ThemeError> {
        el.style()
            .set_property(property, value)
            .map_err(|err| ThemeError::Dom(describe_js(&err)))
    }

    /// Scale-down/scale-up on the toggle. A new press replaces the pending
    /// revert, so the control always settles back to rest.
    struct PressFeedback {
        target: HtmlElement,
        pressed: String,
        duration_ms: u32,
        pending: RefCell<Option<Timeout>>,
    }

    impl PressFeedback {
        fn play(&self) -> Result<(), ThemeError> {
            set_style(&self.target, "transform", &self.pressed)?;
            let target = self.target.clone();
            let timeout = Timeout::new(self.duration_ms, move || {
                if let Err(err) = set_style(&target, "transform", RESTING_TRANSFORM) {
                    log::error!("{}", err);
                }
            });
            // Dropping the previous handle cancels its revert.
            self.pending.borrow_mut().replace(timeout);
            Ok(())
        }
    }

    /// The document root plus the toggle control and its two icons.
    pub struct DocumentSurface {
        root: Element,
        attribute: String,
        toggle: Option<HtmlElement>,
        light_icon: Option<HtmlElement>,
        dark_icon: Option<HtmlElement>,
        dimmed_opacity: f64,
        press: Option<PressFeedback>,
    }

    impl DocumentSurface {
        pub fn bind(document: &Document, cfg: &ThemeConfig) -> Result<Self, ThemeError> {
            let root = document.document_element().ok_or(ThemeError::NoDocument)?;
            let toggle = find(document, &cfg.toggle_selector);
            if toggle.is_none() {
                log::debug!("No toggle control matches `{}`", cfg.toggle_selector);
            }
            let press = toggle.clone().map(|target| PressFeedback {
                target,
                pressed: press_transform(cfg.pressed_scale),
                duration_ms: cfg.press_duration_ms,
                pending: RefCell::new(None),
            });
            Ok(Self {
                root,
                attribute: cfg.attribute.clone(),
                toggle,
                light_icon: find(document, &cfg.light_icon_selector),
                dark_icon: find(document, &cfg.dark_icon_selector),
                dimmed_opacity: cfg.dimmed_opacity,
                press,
            })
        }

        pub fn toggle_control(&self) -> Option<&HtmlElement> {
            self.toggle.as_ref()
        }
    }

    impl ThemeView for DocumentSurface {
        fn applied_theme(&self) -> Option<Theme> {
            self.root
                .get_attribute(&self.attribute)
                .as_deref()
                .and_then(Theme::parse)
        }

        fn set_applied_theme(&self, theme: Theme) -> Result<(), ThemeError> {
            self.root
                .set_attribute(&self.attribute, theme.as_str())
                .map_err(|err| ThemeError::Dom(describe_js(&err)))
        }

        fn show_active_icon(&self, theme: Theme) -> Result<(), ThemeError> {
            let icons = [
                (Theme::Light, &self.light_icon),
                (Theme::Dark, &self.dark_icon),
            ];
            for (icon, el) in icons {
                if let Some(el) = el {
                    let opacity = theme.icon_opacity(icon, self.dimmed_opacity);
                    set_style(el, "opacity", &opacity.to_string())?;
                }
            }
            Ok(())
        }

        fn set_toggle_label(&self, label: &str) -> Result<(), ThemeError> {
            match &self.toggle {
                Some(el) => el
                    .set_attribute("aria-label", label)
                    .map_err(|err| ThemeError::Dom(describe_js(&err))),
                None => Ok(()),
            }
        }

        fn play_press_feedback(&self) -> Result<(), ThemeError> {
            match &self.press {
                Some(press) => press.play(),
                None => Ok(()),
            }
        }
    }

}

#[cfg(target_arch = "wasm32")]
pub use wasm::DocumentSurface;
