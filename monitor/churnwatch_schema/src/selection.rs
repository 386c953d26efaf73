/// The state of a categorical input: either nothing chosen yet, or a legal domain value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection<T> {
    Unselected,
    Value(T),
}

impl<T> Selection<T> {
    pub fn is_selected(&self) -> bool {
        matches!(self, Selection::Value(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Selection::Unselected => None,
            Selection::Value(v) => Some(v),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Selection::Unselected => None,
            Selection::Value(v) => Some(v),
        }
    }
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::Unselected
    }
}

impl<T> From<Option<T>> for Selection<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Selection::Unselected, Selection::Value)
    }
}
