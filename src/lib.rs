//! Session core for a completion-backed chat client.
//!
//! The crate owns the conversation state machine and the behaviors around
//! it:
//!
//! - an append-only [`transcript`](crate::transcript) with change
//!   notifications for scroll-to-latest rendering;
//! - a single-slot [`pin`](crate::pin) holding one prior bot reply that is
//!   silently prepended to the next outgoing [`prompt`](crate::prompt);
//! - [`segment`](crate::segment) parsing of replies into prose and fenced
//!   code blocks, and per-block [`clipboard`](crate::clipboard) export with
//!   transient copy acknowledgments;
//! - a [`Session`](crate::app::Session) state machine with admission
//!   control (one request in flight) driven through a
//!   [`SessionRuntime`](crate::runtime::SessionRuntime) over a
//!   [`CompletionBackend`](crate::backend::CompletionBackend).
//!
//! Transport lives in the `generate_api` crate; rendering, styling, and the
//! embedding event loop are the caller's concern. Failure contract: a
//! settled failure appends a fixed fallback bot reply and the session
//! always returns to an interactive state. Nothing here is fatal and
//! nothing is retried.

pub mod app;
pub mod backend;
pub mod clipboard;
pub mod pin;
pub mod prompt;
pub mod runtime;
pub mod segment;
pub mod transcript;
