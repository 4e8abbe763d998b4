#[cfg(test)]
pub mod helpers {
    use crate::error::ThemeError;
    use crate::state::theme::{Theme, ThemeController, ThemeStore, ThemeView};
    use std::cell::{Cell, RefCell};

    const DIMMED: f64 = 0.5;

    #[derive(Default)]
    pub struct MemoryStore {
        value: RefCell<Option<String>>,
        fail_writes: Cell<bool>,
    }

    impl MemoryStore {
        pub fn with_value(value: Option<&str>) -> Self {
            Self {
                value: RefCell::new(value.map(str::to_string)),
                fail_writes: Cell::new(false),
            }
        }

        pub fn fail_writes(&self) {
            self.fail_writes.set(true);
        }
    }

    impl ThemeStore for MemoryStore {
        fn load_raw(&self) -> Option<String> {
            self.value.borrow().clone()
        }

        fn save(&self, theme: Theme) -> Result<(), ThemeError> {
            if self.fail_writes.get() {
                return Err(ThemeError::StorageWrite("QuotaExceededError".into()));
            }
            *self.value.borrow_mut() = Some(theme.as_str().to_string());
            Ok(())
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct ViewSnapshot {
        pub attribute: Option<String>,
        pub light_opacity: f64,
        pub dark_opacity: f64,
        pub label: Option<String>,
    }

    /// Stands in for the document root, the two icons and the toggle control.
    pub struct RecordingView {
        attribute: RefCell<Option<String>>,
        opacities: Cell<(f64, f64)>,
        label: RefCell<Option<String>>,
        label_updates: Cell<usize>,
        presses: Cell<usize>,
    }

    impl RecordingView {
        pub fn with_applied(theme: Option<Theme>) -> Self {
            Self {
                attribute: RefCell::new(theme.map(|t| t.as_str().to_string())),
                opacities: Cell::new((1.0, 1.0)),
                label: RefCell::new(None),
                label_updates: Cell::new(0),
                presses: Cell::new(0),
            }
        }

        /// (light icon, dark icon)
        pub fn icon_opacities(&self) -> (f64, f64) {
            self.opacities.get()
        }

        pub fn label(&self) -> Option<String> {
            self.label.borrow().clone()
        }

        pub fn label_updates(&self) -> usize {
            self.label_updates.get()
        }

        pub fn presses(&self) -> usize {
            self.presses.get()
        }

        pub fn snapshot(&self) -> ViewSnapshot {
            let (light_opacity, dark_opacity) = self.opacities.get();
            ViewSnapshot {
                attribute: self.attribute.borrow().clone(),
                light_opacity,
                dark_opacity,
                label: self.label(),
            }
        }
    }

    impl ThemeView for RecordingView {
        fn applied_theme(&self) -> Option<Theme> {
            self.attribute.borrow().as_deref().and_then(Theme::parse)
        }

        fn set_applied_theme(&self, theme: Theme) -> Result<(), ThemeError> {
            *self.attribute.borrow_mut() = Some(theme.as_str().to_string());
            Ok(())
        }

        fn show_active_icon(&self, theme: Theme) -> Result<(), ThemeError> {
            self.opacities.set((
                theme.icon_opacity(Theme::Light, DIMMED),
                theme.icon_opacity(Theme::Dark, DIMMED),
            ));
            Ok(())
        }

        fn set_toggle_label(&self, label: &str) -> Result<(), ThemeError> {
            *self.label.borrow_mut() = Some(label.to_string());
            self.label_updates.set(self.label_updates.get() + 1);
            Ok(())
        }

        fn play_press_feedback(&self) -> Result<(), ThemeError> {
            self.presses.set(self.presses.get() + 1);
            Ok(())
        }
    }

    pub fn controller(
        stored: Option<&str>,
        applied: Option<Theme>,
    ) -> ThemeController<MemoryStore, RecordingView> {
        ThemeController::new(
            MemoryStore::with_value(stored),
            RecordingView::with_applied(applied),
        )
    }
}
