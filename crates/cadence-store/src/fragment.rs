//! Tagged fragment and position types.

/// One submitted piece of the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Ordinary text. May be empty.
    Content(String),
    /// End marker: the message ends at the position before this one.
    Terminator,
}

impl Fragment {
    /// Content fragment.
    pub fn content(text: impl Into<String>) -> Self {
        Fragment::Content(text.into())
    }

    /// Decode the wire convention where an empty string is the terminator.
    pub fn from_wire(text: String) -> Self {
        if text.is_empty() {
            Fragment::Terminator
        } else {
            Fragment::Content(text)
        }
    }

    pub fn is_terminator(&self) -> bool {
        matches!(self, Fragment::Terminator)
    }

    /// Text, if this is a content fragment.
    pub fn as_content(&self) -> Option<&str> {
        match self {
            Fragment::Content(text) => Some(text),
            Fragment::Terminator => None,
        }
    }
}

/// What a message position holds during assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot<'a> {
    Present(&'a str),
    Absent,
}

impl<'a> Slot<'a> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Slot::Absent)
    }

    /// Text contributed to the assembled message (empty when absent).
    pub fn text(&self) -> &'a str {
        match self {
            Slot::Present(text) => text,
            Slot::Absent => "",
        }
    }
}
