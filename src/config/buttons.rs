use serde::{Deserialize, Serialize};

/// One launcher button as persisted in `buttons.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonDescriptor {
    pub name: String,
    /// Path to an icon file, or empty.
    pub icon: String,
    pub action: String,
}

impl ButtonDescriptor {
    pub fn new(name: impl Into<String>, icon: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
            action: action.into(),
        }
    }

    /// Rows that were added but never named are not persisted.
    pub fn is_placeholder(&self) -> bool {
        self.name.trim().is_empty()
    }
}

/// On-disk shape of the button document. Array order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonsDocument {
    pub buttons: Vec<ButtonDescriptor>,
}

/// Borrowed form used when writing so the list does not need to be cloned.
#[derive(Serialize)]
pub(crate) struct ButtonsDocumentRef<'a> {
    pub buttons: &'a [ButtonDescriptor],
}
