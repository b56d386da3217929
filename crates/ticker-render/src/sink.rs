//! Render sinks.
//!
//! A sink receives every patch the engine emits. Renderers implement
//! [`RenderSink`]; [`ChannelSink`] hands patches to an async consumer.

use crate::types::RenderPatch;
use tokio::sync::mpsc;
use tracing::debug;

/// Consumer of render patches.
#[cfg_attr(test, mockall::automock)]
pub trait RenderSink: Send {
    /// Apply one patch. Must not block.
    fn apply(&mut self, patch: &RenderPatch);
}

/// Forwards patches into an unbounded channel.
///
/// Unbounded so the engine never drops a patch a renderer relies on; the
/// consumer is expected to keep up with the quote rate.
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<RenderPatch>,
}

impl ChannelSink {
    /// Create a sink and the receiving half.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<RenderPatch>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// True once the receiver has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl RenderSink for ChannelSink {
    fn apply(&mut self, patch: &RenderPatch) {
        if self.tx.send(patch.clone()).is_err() {
            debug!("Render channel closed, patch dropped");
        }
    }
}

/// Fan a patch out to every sink in order.
pub fn dispatch(sinks: &mut [Box<dyn RenderSink>], patch: &RenderPatch) {
    for sink in sinks.iter_mut() {
        sink.apply(patch);
    }
}
