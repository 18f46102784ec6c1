//! Ordered, editable list of launcher buttons.

use tracing::debug;

use crate::config::{ButtonDescriptor, ConfigStore};
use crate::error::DockError;

/// In-memory button list. Position in the list is display and launch order.
///
/// Placeholders (unnamed rows) live here while being edited but are never
/// written to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonOrderingModel {
    buttons: Vec<ButtonDescriptor>,
}

impl ButtonOrderingModel {
    pub fn new(buttons: Vec<ButtonDescriptor>) -> Self {
        Self { buttons }
    }

    pub fn buttons(&self) -> &[ButtonDescriptor] {
        &self.buttons
    }

    pub fn get(&self, index: usize) -> Option<&ButtonDescriptor> {
        self.buttons.get(index)
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// Entries that are not placeholders, i.e. the ones a dock draws.
    pub fn named_len(&self) -> usize {
        self.buttons.iter().filter(|b| !b.is_placeholder()).count()
    }

    /// Adds an empty row at the end and returns its index.
    pub fn append_placeholder(&mut self) -> usize {
        self.buttons.push(ButtonDescriptor::default());
        self.buttons.len() - 1
    }

    pub fn update(&mut self, index: usize, descriptor: ButtonDescriptor) -> Result<(), DockError> {
        let slot = self.slot_mut(index)?;
        *slot = descriptor;
        Ok(())
    }

    /// Swaps with the predecessor. Returns the item's new index; the first
    /// item stays where it is.
    pub fn move_up(&mut self, index: usize) -> Result<usize, DockError> {
        self.check(index)?;
        if index == 0 {
            return Ok(index);
        }
        self.buttons.swap(index, index - 1);
        Ok(index - 1)
    }

    /// Swaps with the successor. Returns the item's new index; the last item
    /// stays where it is.
    pub fn move_down(&mut self, index: usize) -> Result<usize, DockError> {
        self.check(index)?;
        if index + 1 == self.buttons.len() {
            return Ok(index);
        }
        self.buttons.swap(index, index + 1);
        Ok(index + 1)
    }

    /// Removes an entry. Confirming with the user is the caller's job.
    pub fn remove(&mut self, index: usize) -> Result<ButtonDescriptor, DockError> {
        self.check(index)?;
        Ok(self.buttons.remove(index))
    }

    /// Named entries in order, i.e. what gets persisted.
    pub fn compacted(&self) -> Vec<ButtonDescriptor> {
        self.buttons
            .iter()
            .filter(|b| !b.is_placeholder())
            .cloned()
            .collect()
    }

    /// Writes the named entries to the store. Returns how many were written.
    pub fn compact_and_persist(&self, store: &ConfigStore) -> Result<usize, DockError> {
        let compacted = self.compacted();
        store.save_buttons(&compacted)?;
        debug!(
            written = compacted.len(),
            dropped = self.buttons.len() - compacted.len(),
            "persisted buttons"
        );
        Ok(compacted.len())
    }

    fn check(&self, index: usize) -> Result<(), DockError> {
        if index < self.buttons.len() {
            Ok(())
        } else {
            Err(DockError::IndexOutOfRange {
                index,
                len: self.buttons.len(),
            })
        }
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut ButtonDescriptor, DockError> {
        self.check(index)?;
        Ok(&mut self.buttons[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(names: &[&str]) -> ButtonOrderingModel {
        ButtonOrderingModel::new(
            names
                .iter()
                .map(|n| ButtonDescriptor::new(*n, "", format!("run-{n}")))
                .collect(),
        )
    }

    fn names(model: &ButtonOrderingModel) -> Vec<&str> {
        model.buttons().iter().map(|b| b.name.as_str()).collect()
    }

    #[test]
    fn append_placeholder_returns_tail_index() {
        let mut model = named(&["a", "b"]);
        assert_eq!(model.append_placeholder(), 2);
        assert!(model.get(2).unwrap().is_placeholder());
    }

    #[test]
    fn update_out_of_range_fails() {
        let mut model = named(&["a"]);
        let err = model.update(1, ButtonDescriptor::default()).unwrap_err();
        assert!(matches!(err, DockError::IndexOutOfRange { index: 1, len: 1 }));
    }

    #[test]
    fn update_replaces_fields() {
        let mut model = named(&["a"]);
        model
            .update(0, ButtonDescriptor::new("Files", "/i.png", "~"))
            .unwrap();
        assert_eq!(model.get(0), Some(&ButtonDescriptor::new("Files", "/i.png", "~")));
    }

    #[test]
    fn moves_swap_neighbours_and_report_new_index() {
        let mut model = named(&["a", "b", "c"]);
        assert_eq!(model.move_up(2).unwrap(), 1);
        assert_eq!(names(&model), ["a", "c", "b"]);
        assert_eq!(model.move_down(0).unwrap(), 1);
        assert_eq!(names(&model), ["c", "a", "b"]);
    }

    #[test]
    fn moves_at_boundaries_are_noops() {
        let mut model = named(&["a", "b", "c"]);
        let before = model.clone();
        assert_eq!(model.move_up(0).unwrap(), 0);
        assert_eq!(model.move_down(2).unwrap(), 2);
        assert_eq!(model, before);
    }

    #[test]
    fn moves_out_of_range_fail() {
        let mut model = named(&[]);
        assert!(model.move_up(0).is_err());
        assert!(model.move_down(0).is_err());
        assert!(model.remove(0).is_err());
    }

    #[test]
    fn remove_returns_entry() {
        let mut model = named(&["a", "b"]);
        assert_eq!(model.remove(0).unwrap().name, "a");
        assert_eq!(names(&model), ["b"]);
    }

    #[test]
    fn persist_drops_placeholders_only_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::in_dir(dir.path());
        let mut model = named(&["a", "b"]);
        model.append_placeholder();

        assert_eq!(model.compact_and_persist(&store).unwrap(), 2);
        assert_eq!(model.len(), 3);
        assert_eq!(store.load_buttons().value, named(&["a", "b"]).buttons);
    }

    #[test]
    fn persist_preserves_order_of_named_entries() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::in_dir(dir.path());
        let mut model = named(&["x", "y", "z"]);
        model.move_down(0).unwrap();

        model.compact_and_persist(&store).unwrap();
        assert_eq!(store.load_buttons().value, model.buttons());
    }
}
