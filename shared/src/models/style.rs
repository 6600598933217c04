//! Style tags attached to coffee shops

use serde::{Deserialize, Serialize};

/// A descriptive tag. Shops embed a snapshot of it, so renaming a style
/// never touches the shops already carrying it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CoffeeShopStyle {
    pub id: String,
    pub name: String,
}

impl CoffeeShopStyle {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Starter styles offered for selection
pub fn default_styles() -> Vec<CoffeeShopStyle> {
    [
        ("specialty", "Specialty"),
        ("cozy", "Cozy"),
        ("minimalist", "Minimalist"),
        ("industrial", "Industrial"),
        ("vintage", "Vintage"),
        ("work-friendly", "Work-friendly"),
        ("third-wave", "Third Wave"),
    ]
    .into_iter()
    .map(|(id, name)| CoffeeShopStyle::new(id, name))
    .collect()
}

/// The in-memory set of known styles. Not persisted on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleCatalog {
    styles: Vec<CoffeeShopStyle>,
}

impl Default for StyleCatalog {
    fn default() -> Self {
        Self::new(default_styles())
    }
}

impl StyleCatalog {
    pub fn new(styles: Vec<CoffeeShopStyle>) -> Self {
        Self { styles }
    }

    pub fn styles(&self) -> &[CoffeeShopStyle] {
        &self.styles
    }

    pub fn find(&self, id: &str) -> Option<&CoffeeShopStyle> {
        self.styles.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Append a freshly coined style. Names are not checked for collisions.
    pub fn insert(&mut self, style: CoffeeShopStyle) {
        self.styles.push(style);
    }
}
