/// One user-selected prior bot reply, prepended to the next outgoing prompt.
///
/// `origin_index` references the bot message in the transcript the text was
/// pinned from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinnedContext {
    pub text: String,
    pub origin_index: usize,
}

/// Single-slot holder for pinned context.
///
/// The slot is first-wins: while something is pinned, further pin requests
/// are rejected. The session clears the slot automatically after the next
/// successful completion.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContextPinner {
    slot: Option<PinnedContext>,
}

impl ContextPinner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins `text` unless a pin is already held. Returns whether the pin
    /// was taken.
    pub fn pin(&mut self, text: impl Into<String>, origin_index: usize) -> bool {
        if self.slot.is_some() {
            return false;
        }

        self.slot = Some(PinnedContext {
            text: text.into(),
            origin_index,
        });
        true
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }

    pub fn current(&self) -> Option<&PinnedContext> {
        self.slot.as_ref()
    }

    /// Whether `index` is the transcript origin of the held pin. Drives the
    /// renderer's "Saved" vs "Save Context" label.
    pub fn is_pinned_origin(&self, index: usize) -> bool {
        self.slot
            .as_ref()
            .is_some_and(|pinned| pinned.origin_index == index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_pin_wins() {
        let mut pinner = ContextPinner::new();

        assert!(pinner.pin("first", 0));
        assert!(!pinner.pin("second", 2));

        let current = pinner.current().expect("pin held");
        assert_eq!(current.text, "first");
        assert_eq!(current.origin_index, 0);
    }

    #[test]
    fn clear_releases_the_slot_for_a_new_pin() {
        let mut pinner = ContextPinner::new();
        pinner.pin("first", 0);
        pinner.clear();

        assert!(pinner.current().is_none());
        assert!(pinner.pin("second", 2));
        assert_eq!(pinner.current().expect("pin held").text, "second");
    }

    #[test]
    fn pinned_origin_query_matches_only_the_held_index() {
        let mut pinner = ContextPinner::new();
        assert!(!pinner.is_pinned_origin(0));

        pinner.pin("ctx", 3);
        assert!(pinner.is_pinned_origin(3));
        assert!(!pinner.is_pinned_origin(0));
    }
}
