use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

use crate::app::{HostOps, RequestId, Session};
use crate::backend::{CompletionBackend, CompletionRequest};

/// Settled outcome of one completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestEvent {
    Resolved { request_id: RequestId, text: String },
    Failed { request_id: RequestId, error: String },
}

impl RequestEvent {
    fn request_id(&self) -> RequestId {
        match self {
            Self::Resolved { request_id, .. } | Self::Failed { request_id, .. } => *request_id,
        }
    }
}

struct ActiveRequest {
    request_id: RequestId,
    join_handle: Option<JoinHandle<()>>,
}

type RenderNotifier = Box<dyn FnMut() + Send>;

/// Dispatches completion requests on worker threads and applies their
/// outcomes back to the shared session in settle order.
///
/// Admission control lives here: at most one request is active, so the
/// session's transcript, pin slot, and mode are only ever touched by one
/// logical flow at a time. The user message is appended synchronously on
/// submit; the bot or fallback message is appended strictly after the
/// request settles.
pub struct SessionRuntime {
    session: Arc<Mutex<Session>>,
    backend: Arc<dyn CompletionBackend>,
    pending_events: Mutex<VecDeque<RequestEvent>>,
    next_request_id: AtomicU64,
    active_request: Mutex<Option<ActiveRequest>>,
    notifier: Mutex<Option<RenderNotifier>>,
    render_requested: AtomicBool,
}

impl SessionRuntime {
    /// Creates a runtime that buffers settle events before applying them to
    /// the session.
    ///
    /// In UI environments the embedder calls
    /// [`SessionRuntime::flush_pending_events`] from its event loop when the
    /// render notifier fires. Headless harnesses call it directly after
    /// enqueuing work.
    pub fn new(session: Arc<Mutex<Session>>, backend: Arc<dyn CompletionBackend>) -> Arc<Self> {
        Arc::new(Self {
            session,
            backend,
            pending_events: Mutex::new(VecDeque::new()),
            next_request_id: AtomicU64::new(1),
            active_request: Mutex::new(None),
            notifier: Mutex::new(None),
            render_requested: AtomicBool::new(false),
        })
    }

    pub fn session(&self) -> Arc<Mutex<Session>> {
        Arc::clone(&self.session)
    }

    /// Registers the render notifier invoked whenever session state may
    /// have changed.
    ///
    /// The notifier always runs with the session mutex released, so it may
    /// lock the session to read state (scroll-to-latest reads the
    /// transcript).
    pub fn set_render_notifier(&self, notifier: impl FnMut() + Send + 'static) {
        *lock_unpoisoned(&self.notifier) = Some(Box::new(notifier));
    }

    /// Replaces the session input and runs the submit path.
    pub fn submit(self: &Arc<Self>, text: impl Into<String>) {
        {
            let mut host = Arc::clone(self);
            let mut session = lock_unpoisoned(&self.session);
            session.on_input_replace(text.into());
            session.on_submit(&mut host);
        }

        // Render requests raised during on_submit are deferred until the
        // session guard above is released.
        self.flush_deferred_render();
    }

    /// Applies queued settle events and returns how many were drained.
    pub fn flush_pending_events(&self) -> usize {
        let mut drained = 0usize;

        loop {
            let event = {
                let mut pending_events = lock_unpoisoned(&self.pending_events);
                pending_events.pop_front()
            };

            match event {
                Some(event) => {
                    self.apply_event(event);
                    drained += 1;
                }
                None => break,
            }
        }

        if drained > 0 {
            self.notify_render();
        }

        drained
    }

    fn start_request_internal(self: &Arc<Self>, prompt: String) -> Result<RequestId, String> {
        let mut active_request = self.lock_active_request();
        if active_request.is_some() {
            return Err("Request already active".to_string());
        }

        let request_id = self.next_request_id.fetch_add(1, Ordering::SeqCst);
        let join_handle = self.spawn_worker(CompletionRequest {
            request_id,
            prompt,
        })?;

        *active_request = Some(ActiveRequest {
            request_id,
            join_handle: Some(join_handle),
        });

        Ok(request_id)
    }

    fn spawn_worker(
        self: &Arc<Self>,
        request: CompletionRequest,
    ) -> Result<JoinHandle<()>, String> {
        let request_id = request.request_id;
        let runtime = Arc::clone(self);
        thread::Builder::new()
            .name(format!("chat-session-request-{request_id}"))
            .spawn(move || runtime.run_worker(request))
            .map_err(|error| format!("Failed to spawn request worker: {error}"))
    }

    fn run_worker(self: Arc<Self>, request: CompletionRequest) {
        let request_id = request.request_id;
        let backend = Arc::clone(&self.backend);

        let outcome = catch_unwind(AssertUnwindSafe(|| backend.complete(request)));
        let event = match outcome {
            Ok(Ok(text)) => RequestEvent::Resolved { request_id, text },
            Ok(Err(error)) => RequestEvent::Failed { request_id, error },
            Err(_) => RequestEvent::Failed {
                request_id,
                error: "Completion backend panicked".to_string(),
            },
        };

        self.enqueue_event(event);
    }

    fn enqueue_event(&self, event: RequestEvent) {
        {
            let mut pending_events = lock_unpoisoned(&self.pending_events);
            pending_events.push_back(event);
        }

        self.notify_render();
    }

    fn apply_event(&self, event: RequestEvent) {
        let request_id = event.request_id();

        {
            let mut session = lock_unpoisoned(&self.session);
            match event {
                RequestEvent::Resolved { request_id, text } => {
                    session.on_request_resolved(request_id, &text);
                }
                RequestEvent::Failed { request_id, error } => {
                    log::error!("completion request {request_id} failed: {error}");
                    session.on_request_failed(request_id, &error);
                }
            }
        }

        self.clear_active_request_if_matching(request_id);
    }

    fn clear_active_request_if_matching(&self, request_id: RequestId) {
        let mut active_request = self.lock_active_request();
        let matches = active_request
            .as_ref()
            .map(|active| active.request_id)
            == Some(request_id);
        if !matches {
            return;
        }

        let mut completed = match active_request.take() {
            Some(completed) => completed,
            None => return,
        };

        if let Some(join_handle) = completed.join_handle.take() {
            let is_current_thread = join_handle.thread().id() == thread::current().id();
            if !is_current_thread && join_handle.is_finished() {
                let _ = join_handle.join();
            }
        }
    }

    fn notify_render(&self) {
        if let Some(notifier) = lock_unpoisoned(&self.notifier).as_mut() {
            notifier();
        }
    }

    fn flush_deferred_render(&self) {
        if self.render_requested.swap(false, Ordering::SeqCst) {
            self.notify_render();
        }
    }

    fn lock_active_request(&self) -> MutexGuard<'_, Option<ActiveRequest>> {
        lock_unpoisoned(&self.active_request)
    }
}

impl HostOps for Arc<SessionRuntime> {
    fn start_request(&mut self, prompt: String) -> Result<RequestId, String> {
        self.start_request_internal(prompt)
    }

    fn request_render(&mut self) {
        // Raised while the caller may hold the session mutex; the runtime
        // notifies once the guard is released.
        self.render_requested.store(true, Ordering::SeqCst);
    }
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
