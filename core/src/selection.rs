use crate::persisted::PersistedSelection;

/// The in-progress font choice and sample text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub family: String,
    pub weight: String,
    pub italic: bool,
    pub text: String,
}

impl Selection {
    pub fn has_family(&self) -> bool {
        !self.family.is_empty()
    }

    pub fn set_family(&mut self, family: impl Into<String>) {
        self.family = family.into();
        self.weight.clear();
        self.italic = false;
    }

    pub fn set_weight(&mut self, weight: impl Into<String>) {
        self.weight = weight.into();
    }

    /// Returns false when no family is chosen; the flag is left unchanged.
    pub fn set_italic(&mut self, italic: bool) -> bool {
        if !self.has_family() {
            return false;
        }
        self.italic = italic;
        true
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Overlays saved fields without the family-change reset.
    pub fn restore(&mut self, saved: PersistedSelection) {
        if let Some(family) = saved.family {
            self.family = family;
        }
        if let Some(weight) = saved.weight {
            self.weight = weight;
        }
        if let Some(italic) = saved.italic {
            self.italic = italic;
        }
        if let Some(text) = saved.text {
            self.text = text;
        }
    }
}
