//! Progress reporting for long-running transfers
//!
//! Progress is delivered through an explicit observer passed into the upload
//! call and invoked synchronously on the calling flow of control, so events
//! strictly precede the upload call's completion. Events are observational
//! only and never affect control flow.

use serde::Serialize;

/// A single progress notification during an upload
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressEvent {
    /// Percentage of the transfer completed, 0.0 to 100.0
    pub percent_done: f64,
}

impl ProgressEvent {
    pub fn new(percent_done: f64) -> Self {
        Self {
            percent_done: percent_done.clamp(0.0, 100.0),
        }
    }

    /// Build an event from transferred/total byte counts
    pub fn from_bytes(transferred: u64, total: u64) -> Self {
        if total == 0 {
            return Self::new(100.0);
        }
        Self::new(transferred as f64 * 100.0 / total as f64)
    }
}

/// Observer invoked with each progress event
///
/// Implementations must be cheap: the uploader calls the observer inline
/// between transfer chunks.
pub type ProgressObserver<'a> = &'a (dyn Fn(ProgressEvent) + Send + Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_is_clamped() {
        assert_eq!(ProgressEvent::new(150.0).percent_done, 100.0);
        assert_eq!(ProgressEvent::new(-5.0).percent_done, 0.0);
        assert_eq!(ProgressEvent::new(42.5).percent_done, 42.5);
    }

    #[test]
    fn test_from_bytes() {
        assert_eq!(ProgressEvent::from_bytes(50, 200).percent_done, 25.0);
        assert_eq!(ProgressEvent::from_bytes(200, 200).percent_done, 100.0);
        // Zero-byte uploads report completion immediately
        assert_eq!(ProgressEvent::from_bytes(0, 0).percent_done, 100.0);
    }

    #[test]
    fn test_serialization() {
        let event = ProgressEvent::new(12.5);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"percent_done\":12.5"));
    }
}
