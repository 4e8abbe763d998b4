use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Exact match on the stored/attribute literal. Anything else is treated as no value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn from_system(prefers_dark: bool) -> Self {
        if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn inverse(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Label for the toggle control, naming the theme it would switch to.
    pub fn toggle_label(&self) -> &'static str {
        match self.inverse() {
            Theme::Light => "Switch to light mode",
            Theme::Dark => "Switch to dark mode",
        }
    }

    /// Opacity of the icon representing `icon` while `self` is active.
    pub fn icon_opacity(&self, icon: Theme, dimmed: f64) -> f64 {
        if *self == icon {
            1.0
        } else {
            dimmed
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Durable slot holding the user's explicit choice.
pub trait ThemeStore {
    fn load_raw(&self) -> Option<String>;

    fn save(&self, theme: Theme) -> Result<(), ThemeError>;

    fn load(&self) -> Option<Theme> {
        self.load_raw().as_deref().and_then(Theme::parse)
    }

    /// Absent and empty both count as "no explicit choice".
    fn is_empty(&self) -> bool {
        self.load_raw().map_or(true, |raw| raw.is_empty())
    }
}

/// Everything the controller writes toward the page.
pub trait ThemeView {
    fn applied_theme(&self) -> Option<Theme>;

    fn set_applied_theme(&self, theme: Theme) -> Result<(), ThemeError>;

    fn show_active_icon(&self, theme: Theme) -> Result<(), ThemeError>;

    fn set_toggle_label(&self, label: &str) -> Result<(), ThemeError>;

    fn play_press_feedback(&self) -> Result<(), ThemeError>;
}

type Listener = Rc<dyn Fn(Theme)>;

pub struct ThemeController<S, V> {
    store: S,
    view: V,
    listeners: RefCell<Vec<Listener>>,
}

impl<S: ThemeStore, V: ThemeView> ThemeController<S, V> {
    pub fn new(store: S, view: V) -> Self {
        Self {
            store,
            view,
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Registers a callback run after every change of the applied theme.
    pub fn subscribe(&self, listener: impl Fn(Theme) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    pub fn resolve_initial_theme(&self, system_prefers_dark: bool) -> Theme {
        match self.store.load() {
            Some(stored) => stored,
            None => Theme::from_system(system_prefers_dark),
        }
    }

    pub fn initialize(&self, system_prefers_dark: bool) -> Result<Theme, ThemeError> {
        let theme = self.resolve_initial_theme(system_prefers_dark);
        self.apply_theme(theme)?;
        Ok(theme)
    }

    /// Writes the attribute, the stored slot and the derived display state.
    ///
    /// Subscribers are notified only when the applied value actually changed.
    /// A failed save is returned after the page has been brought in line with
    /// the new attribute, so listeners never miss a visible change.
    pub fn apply_theme(&self, theme: Theme) -> Result<(), ThemeError> {
        let changed = self.view.applied_theme() != Some(theme);
        self.view.set_applied_theme(theme)?;
        let saved = self.store.save(theme);
        self.view.show_active_icon(theme)?;
        self.view.set_toggle_label(theme.toggle_label())?;
        if changed {
            log::info!("Theme changed to {}", theme);
            self.notify(theme);
        }
        saved
    }

    fn notify(&self, theme: Theme) {
        // Listeners may call back into the controller.
        let listeners = self.listeners.borrow().clone();
        for listener in listeners {
            listener(theme);
        }
    }

    /// Applies the inverse of the applied theme and plays the press animation.
    pub fn toggle(&self) -> Result<Theme, ThemeError> {
        let next = self.current_theme().inverse();
        self.apply_theme(next)?;
        self.view.play_press_feedback()?;
        Ok(next)
    }

    /// Follows the OS color scheme while no explicit choice is stored.
    /// Returns the applied theme when the notification was honoured.
    pub fn on_system_preference_change(
        &self,
        prefers_dark: bool,
    ) -> Result<Option<Theme>, ThemeError> {
        if !self.store.is_empty() {
            log::debug!("Ignoring system color scheme change: explicit choice stored");
            return Ok(None);
        }
        let theme = Theme::from_system(prefers_dark);
        self.apply_theme(theme)?;
        Ok(Some(theme))
    }

    /// Brings the applied theme back in line with the stored one.
    pub fn reconcile(&self) -> Result<Option<Theme>, ThemeError> {
        let stored = match self.store.load() {
            Some(theme) => theme,
            None => return Ok(None),
        };
        if self.view.applied_theme() == Some(stored) {
            return Ok(None);
        }
        log::debug!("Applied theme drifted from stored {}", stored);
        self.apply_theme(stored)?;
        Ok(Some(stored))
    }

    pub fn current_theme(&self) -> Theme {
        self.view.applied_theme().unwrap_or_default()
    }

    pub fn is_dark_mode(&self) -> bool {
        self.current_theme() == Theme::Dark
    }
}
