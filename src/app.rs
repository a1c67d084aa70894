use crate::pin::{ContextPinner, PinnedContext};
use crate::prompt::build_prompt;
use crate::transcript::{Message, Sender, Transcript};

pub type RequestId = u64;

/// Session-wide request state. Exactly one value exists; it gates
/// submissions (at most one request in flight) and returns to `Idle` on
/// every request exit path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    InFlight { request_id: RequestId },
}

/// Fixed bot reply appended when a completion request fails.
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't respond to that.";

/// Explicit policy knobs for behavior the session does not hard-code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionPolicy {
    /// Whether a failed request also releases the pinned slot. Off by
    /// default: failures leave the pin for the user's resubmit.
    pub clear_pin_on_failure: bool,
}

/// Host seam the session drives on submit.
pub trait HostOps {
    fn start_request(&mut self, prompt: String) -> Result<RequestId, String>;
    fn request_render(&mut self);
}

/// Conversation state machine: transcript, pinned slot, and request state.
///
/// `Session` is pure; request dispatch and settlement arrive through
/// [`HostOps`] and the `on_request_*` callbacks, which keeps every
/// transition deterministic and directly testable.
#[derive(Debug)]
pub struct Session {
    pub mode: Mode,
    pub input: String,
    transcript: Transcript,
    pin: ContextPinner,
    policy: SessionPolicy,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_policy(SessionPolicy::default())
    }

    pub fn with_policy(policy: SessionPolicy) -> Self {
        Self {
            mode: Mode::Idle,
            input: String::new(),
            transcript: Transcript::seeded(),
            pin: ContextPinner::new(),
            policy,
        }
    }

    pub fn transcript(&self) -> &[Message] {
        self.transcript.all()
    }

    /// Registers a transcript listener notified on every append (drives the
    /// renderer's scroll-to-latest behavior).
    pub fn on_transcript_append(&mut self, listener: impl FnMut(usize) + Send + 'static) {
        self.transcript.on_append(listener);
    }

    pub fn pinned(&self) -> Option<&PinnedContext> {
        self.pin.current()
    }

    pub fn is_pinned_origin(&self, index: usize) -> bool {
        self.pin.is_pinned_origin(index)
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.mode, Mode::InFlight { .. })
    }

    pub fn on_input_replace(&mut self, text: String) {
        self.input = text;
    }

    /// Pins the bot message at `index` into the single context slot.
    ///
    /// First pin wins; user messages and out-of-range indices are rejected.
    /// Returns whether the pin was taken.
    pub fn pin_bot_message(&mut self, index: usize) -> bool {
        let Some(message) = self.transcript.get(index) else {
            return false;
        };
        if message.sender != Sender::Bot {
            return false;
        }

        let text = message.text.clone();
        self.pin.pin(text, index)
    }

    /// Handles a submit from the host.
    ///
    /// Admission control rejects the submit outright while a request is in
    /// flight. Otherwise the trimmed input becomes a user message appended
    /// synchronously (it renders immediately), the outgoing prompt is built
    /// from the pinned slot and the raw input, and the request is
    /// dispatched. A dispatch failure is treated like a settled failure:
    /// the fallback reply is appended and the session stays interactive.
    pub fn on_submit(&mut self, host: &mut dyn HostOps) {
        if self.is_in_flight() {
            return;
        }

        let submitted = std::mem::take(&mut self.input);
        let text = submitted.trim().to_string();
        if text.is_empty() {
            host.request_render();
            return;
        }

        let prompt = build_prompt(self.pin.current(), &text);
        self.transcript.append(Message::user(text));

        match host.start_request(prompt) {
            Ok(request_id) => {
                self.mode = Mode::InFlight { request_id };
            }
            Err(_) => {
                self.append_failure_reply();
            }
        }

        host.request_render();
    }

    /// Applies a successful completion: bot reply appended strictly after
    /// the request settled, pin released, session idle again.
    pub fn on_request_resolved(&mut self, request_id: RequestId, text: &str) {
        if !self.is_active_request(request_id) {
            return;
        }

        self.transcript.append(Message::bot(text));
        self.pin.clear();
        self.mode = Mode::Idle;
    }

    /// Applies a failed completion: fixed fallback reply, pin left in place
    /// unless the policy opts into clearing, session idle again.
    pub fn on_request_failed(&mut self, request_id: RequestId, _error: &str) {
        if !self.is_active_request(request_id) {
            return;
        }

        self.append_failure_reply();
        self.mode = Mode::Idle;
    }

    fn append_failure_reply(&mut self) {
        self.transcript.append(Message::bot(FALLBACK_REPLY));
        if self.policy.clear_pin_on_failure {
            self.pin.clear();
        }
    }

    fn is_active_request(&self, request_id: RequestId) -> bool {
        matches!(self.mode, Mode::InFlight { request_id: active } if active == request_id)
    }
}
