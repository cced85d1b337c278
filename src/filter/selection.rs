//! Multi-select state for one filter dimension.

/// Selected values of one dimension, plus the value clicked last.
///
/// The "last" pointer is the anchor for range toggles, which mirror
/// shift-click selection in a list with a fixed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<T> {
    selected: Vec<T>,
    last: Option<T>,
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self {
            selected: Vec::new(),
            last: None,
        }
    }
}

impl<T: Clone + PartialEq> Selection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: impl IntoIterator<Item = T>) -> Self {
        let mut selection = Self::new();
        for value in values {
            selection.select(value);
        }
        selection
    }

    /// No values selected means no restriction on the dimension.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, value: &T) -> bool {
        self.selected.contains(value)
    }

    pub fn values(&self) -> &[T] {
        &self.selected
    }

    pub fn last(&self) -> Option<&T> {
        self.last.as_ref()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.last = None;
    }

    /// Add a value without touching the anchor. Duplicates are ignored.
    pub fn select(&mut self, value: T) {
        if !self.contains(&value) {
            self.selected.push(value);
        }
    }

    pub fn deselect(&mut self, value: &T) {
        self.selected.retain(|v| v != value);
    }

    /// Add or remove one value and make it the new anchor.
    pub fn toggle(&mut self, value: T) {
        if self.contains(&value) {
            self.deselect(&value);
        } else {
            self.selected.push(value.clone());
        }
        self.last = Some(value);
    }

    /// Apply the clicked value's new state to every value between the anchor
    /// and the clicked value, inclusive, in `order`.
    ///
    /// If the clicked value was selected the whole range is deselected,
    /// otherwise the whole range is selected. Without a usable anchor this is
    /// a single toggle.
    pub fn toggle_range(&mut self, value: T, order: &[T]) {
        let anchor = self
            .last
            .as_ref()
            .and_then(|last| order.iter().position(|v| v == last));
        let target = order.iter().position(|v| *v == value);

        let (Some(anchor), Some(target)) = (anchor, target) else {
            self.toggle(value);
            return;
        };

        let (start, end) = if anchor <= target {
            (anchor, target)
        } else {
            (target, anchor)
        };
        let select = !self.contains(&value);
        for item in &order[start..=end] {
            if select {
                self.select(item.clone());
            } else {
                self.deselect(item);
            }
        }
        self.last = Some(value);
    }
}
