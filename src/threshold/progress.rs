//! Coarse progress reporting for long-running binarizations.

use crate::trace::trace_progress;

/// Caller-supplied callback receiving a percentage in `[0, 100]`.
pub type ProgressSink<'a> = &'a mut dyn FnMut(u8);

/// Wraps an optional sink and keeps the reported sequence non-decreasing.
///
/// Values above 100 are clamped; a value lower than the last one reported is
/// dropped. The sink is only borrowed for the duration of one operation.
pub struct Progress<'a> {
    sink: Option<ProgressSink<'a>>,
    last: Option<u8>,
}

impl<'a> Progress<'a> {
    /// Wraps `sink`; `None` turns every report into a no-op.
    pub fn new(sink: Option<ProgressSink<'a>>) -> Self {
        Self { sink, last: None }
    }

    /// A reporter with no sink attached.
    pub fn none() -> Self {
        Self::new(None)
    }

    /// Reports `percent` (clamped to 100).
    pub fn report(&mut self, percent: u32) {
        let percent = percent.min(100) as u8;
        if self.last.is_some_and(|last| percent < last) {
            return;
        }
        self.last = Some(percent);
        trace_progress!(percent);
        if let Some(sink) = self.sink.as_deref_mut() {
            sink(percent);
        }
    }

    /// Last value passed through, if any.
    pub fn last(&self) -> Option<u8> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::Progress;

    #[test]
    fn drops_decreasing_values_and_clamps() {
        let mut seen = Vec::new();
        {
            let mut sink = |p: u8| seen.push(p);
            let mut progress = Progress::new(Some(&mut sink));
            progress.report(30);
            progress.report(10);
            progress.report(30);
            progress.report(250);
            assert_eq!(progress.last(), Some(100));
        }
        assert_eq!(seen, vec![30, 30, 100]);
    }

    #[test]
    fn none_tracks_without_sink() {
        let mut progress = Progress::none();
        progress.report(42);
        assert_eq!(progress.last(), Some(42));
    }
}
