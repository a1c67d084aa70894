use std::fmt;

/// Bot message every session opens with.
pub const GREETING: &str = "Hi, how can I help you today?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// One transcript entry. Immutable once appended; its index in the
/// transcript is its stable identity for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
        }
    }
}

type AppendListener = Box<dyn FnMut(usize) + Send>;

/// Append-only ordered message log.
///
/// Messages are never reordered, mutated in place, or deleted. Every append
/// notifies registered listeners with the new message's index; the renderer
/// uses this to scroll to the latest entry.
#[derive(Default)]
pub struct Transcript {
    messages: Vec<Message>,
    listeners: Vec<AppendListener>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transcript seeded with the session greeting.
    pub fn seeded() -> Self {
        let mut transcript = Self::new();
        transcript.append(Message::bot(GREETING));
        transcript
    }

    /// Appends a message and returns its index.
    pub fn append(&mut self, message: Message) -> usize {
        let index = self.messages.len();
        self.messages.push(message);
        for listener in &mut self.listeners {
            listener(index);
        }
        index
    }

    /// Registers a listener invoked after every append.
    pub fn on_append(&mut self, listener: impl FnMut(usize) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn all(&self) -> &[Message] {
        &self.messages
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl fmt::Debug for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transcript")
            .field("messages", &self.messages)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
