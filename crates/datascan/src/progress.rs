//! Progress notifications for imports and validation runs.

use std::fmt;
use std::sync::{Arc, RwLock};

type Observer = Arc<dyn Fn(f64) + Send + Sync>;

/// Fan-out of progress observers.
///
/// Values are percentages in `0.0..=100.0`. Within a run every observer sees
/// the same increasing sequence, followed by a final `0.0` reset. Reporting
/// is observational only; nothing in the pipeline reads it back.
#[derive(Clone, Default)]
pub struct ProgressReporter {
    observers: Arc<RwLock<Vec<Observer>>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. Clones of this reporter share the registration.
    pub fn subscribe(&self, observer: impl Fn(f64) + Send + Sync + 'static) {
        if let Ok(mut observers) = self.observers.write() {
            observers.push(Arc::new(observer));
        }
    }

    /// Deliver a value to every observer.
    pub fn report(&self, percent: f64) {
        let observers = match self.observers.read() {
            Ok(guard) => guard.clone(),
            Err(_) => return,
        };
        for observer in &observers {
            observer(percent);
        }
    }

    pub fn reset(&self) {
        self.report(0.0);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.read().map(|o| o.len()).unwrap_or(0)
    }
}

impl fmt::Debug for ProgressReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("observers", &self.observer_count())
            .finish()
    }
}

/// Resets the reporter when dropped, so early returns still end at zero.
pub(crate) struct ResetOnDrop<'a>(pub(crate) Option<&'a ProgressReporter>);

impl Drop for ResetOnDrop<'_> {
    fn drop(&mut self) {
        if let Some(progress) = self.0 {
            progress.reset();
        }
    }
}

#[cfg(test)]
pub(crate) fn recording_reporter() -> (ProgressReporter, Arc<std::sync::Mutex<Vec<f64>>>) {
    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
    let reporter = ProgressReporter::new();
    let sink = Arc::clone(&seen);
    reporter.subscribe(move |p| sink.lock().unwrap().push(p));
    (reporter, seen)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_observers_see_same_sequence() {
        let (reporter, first) = recording_reporter();
        let second = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = Arc::clone(&second);
        reporter.subscribe(move |p| sink.lock().unwrap().push(p));

        reporter.report(10.0);
        reporter.report(50.0);
        reporter.reset();

        assert_eq!(*first.lock().unwrap(), vec![10.0, 50.0, 0.0]);
        assert_eq!(*first.lock().unwrap(), *second.lock().unwrap());
    }

    #[test]
    fn test_clones_share_observers() {
        let (reporter, seen) = recording_reporter();
        let clone = reporter.clone();
        clone.report(42.0);

        assert_eq!(reporter.observer_count(), 1);
        assert_eq!(*seen.lock().unwrap(), vec![42.0]);
    }

    #[test]
    fn test_reset_on_drop() {
        let (reporter, seen) = recording_reporter();
        {
            let _guard = ResetOnDrop(Some(&reporter));
            reporter.report(30.0);
        }
        assert_eq!(*seen.lock().unwrap(), vec![30.0, 0.0]);
    }
}
