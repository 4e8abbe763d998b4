pub mod components;
pub mod config;
pub mod error;
pub mod state;
pub mod theme;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use error::ThemeError;
pub use state::theme::{Theme, ThemeController, ThemeStore, ThemeView};

#[cfg(target_arch = "wasm32")]
mod entry {
    use wasm_bindgen::prelude::wasm_bindgen;

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        let level = if cfg!(debug_assertions) {
            log::Level::Debug
        } else {
            log::Level::Info
        };
        if console_log::init_with_level(level).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        if let Err(err) = crate::theme::init_theme() {
            log::error!("Theme controller failed to start: {}", err);
        }
    }

    #[wasm_bindgen(js_name = getCurrentTheme)]
    pub fn get_current_theme() -> String {
        crate::theme::current_theme().as_str().to_string()
    }

    #[wasm_bindgen(js_name = isDarkMode)]
    pub fn is_dark_mode() -> bool {
        crate::theme::is_dark_mode()
    }

    #[wasm_bindgen(js_name = toggleTheme)]
    pub fn toggle_theme() {
        crate::theme::toggle();
    }

    #[wasm_bindgen(js_name = showThemeInfo)]
    pub fn show_theme_info() {
        crate::theme::show_theme_info();
    }
}
