/// Events emitted by batch workflows while they process a list of items.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    BatchStart { total: u64 },
    ItemStart { id: String },
    ItemFinish { id: String },
    ItemFailed { id: String, reason: String },
    BatchFinish,
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards progress events to an optional callback. Reporting is a no-op
/// without one, so library callers may ignore progress entirely.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}
