/// Tracks the highlighted row of the displayed candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionNavigator {
    current: Option<usize>,
    len: usize,
}

impl SelectionNavigator {
    /// Navigator over `len` rows with the first one selected.
    #[must_use]
    pub fn new(len: usize) -> Self {
        let mut navigator = Self::default();
        navigator.reset(len);
        navigator
    }

    /// Point at the first row of a freshly computed list.
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.current = (len > 0).then_some(0);
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns whether the selection moved.
    pub fn move_up(&mut self) -> bool {
        match self.current {
            Some(index) if index > 0 => {
                self.current = Some(index - 1);
                true
            }
            _ => false,
        }
    }

    /// Returns whether the selection moved.
    pub fn move_down(&mut self) -> bool {
        match self.current {
            Some(index) if index + 1 < self.len => {
                self.current = Some(index + 1);
                true
            }
            _ => false,
        }
    }

    /// Pointer selection. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.len {
            self.current = Some(index);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_first_row() {
        assert_eq!(SelectionNavigator::new(3).current(), Some(0));
        assert_eq!(SelectionNavigator::new(0).current(), None);
    }

    #[test]
    fn stays_within_bounds() {
        let mut nav = SelectionNavigator::new(3);
        assert!(!nav.move_up());
        assert_eq!(nav.current(), Some(0));

        assert!(nav.move_down());
        assert!(nav.move_down());
        assert!(!nav.move_down());
        assert_eq!(nav.current(), Some(2));

        assert!(nav.move_up());
        assert_eq!(nav.current(), Some(1));
    }

    #[test]
    fn empty_list_ignores_movement() {
        let mut nav = SelectionNavigator::new(0);
        assert!(!nav.move_down());
        assert!(!nav.move_up());
        assert!(!nav.select(0));
        assert_eq!(nav.current(), None);
    }

    #[test]
    fn pointer_selection_and_reset() {
        let mut nav = SelectionNavigator::new(4);
        assert!(nav.select(3));
        assert!(!nav.select(4));
        assert_eq!(nav.current(), Some(3));

        nav.reset(2);
        assert_eq!(nav.current(), Some(0));
        assert_eq!(nav.len(), 2);
    }
}
