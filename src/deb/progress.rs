//! Progress narration hook.
//!
//! The parser reports free-form status strings at fixed milestones: archive
//! scan start, each ar member, decompression start and end, each examined tar
//! entry, and control parsing start and end. All of it goes through a single
//! [`Reporter`] so parsing code never talks to a sink or logger directly.

use std::panic::{self, AssertUnwindSafe};

use anyhow::Result;

/// Receiver of status strings emitted while a package is parsed.
///
/// A failing sink never aborts the parse; its errors and panics are dropped.
pub trait ProgressSink: Send + Sync {
    fn report(&self, status: &str) -> Result<()>;
}

impl<F> ProgressSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn report(&self, status: &str) -> Result<()> {
        self(status);
        Ok(())
    }
}

/// Sink that writes every milestone to the `log` facade at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ProgressSink for LogSink {
    fn report(&self, status: &str) -> Result<()> {
        log::info!("{status}");
        Ok(())
    }
}

/// Dispatches milestones to the optional sink and to `log::debug!`.
#[derive(Clone, Copy, Default)]
pub struct Reporter<'a> {
    sink: Option<&'a dyn ProgressSink>,
}

impl<'a> Reporter<'a> {
    pub fn new(sink: Option<&'a dyn ProgressSink>) -> Self {
        Self { sink }
    }

    /// A reporter with no sink; milestones only reach the logger.
    pub fn silent() -> Self {
        Self { sink: None }
    }

    pub fn emit(&self, status: &str) {
        log::debug!("{status}");
        let Some(sink) = self.sink else {
            return;
        };
        match panic::catch_unwind(AssertUnwindSafe(|| sink.report(status))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => log::warn!("progress sink failed, ignoring: {e:#}"),
            Err(_) => log::warn!("progress sink panicked, ignoring"),
        }
    }
}
