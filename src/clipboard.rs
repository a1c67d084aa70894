//! Per-block clipboard export for rendered code segments.
//!
//! The renderer registers each parse result's code blocks by id; a copy
//! request looks the content up and writes it through a [`ClipboardSink`].
//! Successful copies show a transient "Copied" acknowledgment that reverts
//! after a fixed delay. Every copy schedules its own revert deadline, keyed
//! by block id, with no shared state between blocks; deadlines from repeated
//! copies of the same block may overlap, and the earliest one reverts the
//! label (preserved as observed behavior).

use std::collections::{BTreeMap, BTreeSet};
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::segment::Segment;

/// How long a successful copy shows its acknowledgment.
pub const COPY_ACK_DURATION: Duration = Duration::from_secs(2);

/// Renderer-facing labels for a block's copy button.
pub const LABEL_COPIED: &str = "Copied";
pub const LABEL_COPY: &str = "Copy Code";

#[derive(Debug, Error)]
pub enum CopyError {
    #[error("no rendered code block with id '{block_id}'")]
    UnknownBlock { block_id: String },

    #[error("clipboard write failed: {message}")]
    Write { message: String },
}

/// Write-only text clipboard seam.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<(), CopyError>;
}

/// System clipboard sink backed by `arboard`.
pub struct SystemClipboard {
    clipboard: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, CopyError> {
        let clipboard = arboard::Clipboard::new().map_err(|error| CopyError::Write {
            message: error.to_string(),
        })?;
        Ok(Self { clipboard })
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), CopyError> {
        self.clipboard
            .set_text(text.to_string())
            .map_err(|error| CopyError::Write {
                message: error.to_string(),
            })
    }
}

#[derive(Debug, Default)]
struct CopyFeedback {
    acknowledged: BTreeSet<String>,
    deadlines: BTreeMap<String, Vec<Instant>>,
}

impl CopyFeedback {
    fn acknowledge(&mut self, block_id: &str, now: Instant) {
        self.acknowledged.insert(block_id.to_string());
        self.deadlines
            .entry(block_id.to_string())
            .or_default()
            .push(now + COPY_ACK_DURATION);
    }

    fn poll(&mut self, now: Instant) -> Vec<String> {
        let mut reverted = Vec::new();
        for (block_id, deadlines) in self.deadlines.iter_mut() {
            let before = deadlines.len();
            deadlines.retain(|deadline| *deadline > now);
            if deadlines.len() < before && self.acknowledged.remove(block_id) {
                reverted.push(block_id.clone());
            }
        }

        self.deadlines.retain(|_, deadlines| !deadlines.is_empty());
        reverted
    }

    fn is_acknowledged(&self, block_id: &str) -> bool {
        self.acknowledged.contains(block_id)
    }
}

/// Registry of rendered code-block content plus per-block copy feedback.
pub struct ClipboardExporter {
    sink: Box<dyn ClipboardSink>,
    blocks: BTreeMap<String, String>,
    feedback: CopyFeedback,
}

impl ClipboardExporter {
    pub fn new(sink: Box<dyn ClipboardSink>) -> Self {
        Self {
            sink,
            blocks: BTreeMap::new(),
            feedback: CopyFeedback::default(),
        }
    }

    /// Registers the code blocks from one parse result, replacing any
    /// previous content held under the same ids.
    pub fn register_segments(&mut self, segments: &[Segment]) {
        for segment in segments {
            if let Segment::CodeBlock { content, block_id } = segment {
                self.blocks.insert(block_id.clone(), content.clone());
            }
        }
    }

    /// Copies the block's content to the clipboard and records a transient
    /// acknowledgment for it.
    ///
    /// Failures are logged and returned; the caller surfaces them as a
    /// blocking alert. A failed copy leaves the acknowledgment state
    /// untouched.
    pub fn copy(&mut self, block_id: &str, now: Instant) -> Result<(), CopyError> {
        let Some(content) = self.blocks.get(block_id) else {
            let error = CopyError::UnknownBlock {
                block_id: block_id.to_string(),
            };
            log::error!("copy request for unregistered block: {error}");
            return Err(error);
        };

        if let Err(error) = self.sink.write_text(content) {
            log::error!("failed to copy block '{block_id}': {error}");
            return Err(error);
        }

        self.feedback.acknowledge(block_id, now);
        Ok(())
    }

    /// Expires acknowledgment deadlines that have passed and returns the
    /// block ids whose labels reverted.
    pub fn poll(&mut self, now: Instant) -> Vec<String> {
        self.feedback.poll(now)
    }

    pub fn is_acknowledged(&self, block_id: &str) -> bool {
        self.feedback.is_acknowledged(block_id)
    }

    pub fn copy_label(&self, block_id: &str) -> &'static str {
        if self.is_acknowledged(block_id) {
            LABEL_COPIED
        } else {
            LABEL_COPY
        }
    }
}
