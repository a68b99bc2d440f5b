//! Continuous location tracking over a pluggable source.
//!
//! The platform geolocation service is an external collaborator behind the
//! [`LocationSource`] trait; the tracker owns a background task that pulls
//! fixes from the source (each attempt bounded by the watch timeout) and
//! forwards every fix exactly once over an unbounded channel. Only the
//! runtime's event loop consumes that channel, so fixes are naturally
//! processed latest-last with no queuing semantics of its own.

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::state::Coordinate;

/// Platform error code: permission denied.
pub const ERR_PERMISSION_DENIED: u8 = 1;
/// Platform error code: position unavailable.
pub const ERR_POSITION_UNAVAILABLE: u8 = 2;
/// Platform error code: fix attempt timed out.
pub const ERR_TIMEOUT: u8 = 3;

/// A geolocation failure as surfaced to the user: `{code, message}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocationError {
    /// Platform error code (see the `ERR_*` constants).
    pub code: u8,
    /// Human-readable message.
    pub message: String,
}

impl LocationError {
    /// Timeout error for a fix attempt that exceeded the watch timeout.
    #[must_use]
    pub fn timeout(after: Duration) -> Self {
        Self {
            code: ERR_TIMEOUT,
            message: format!("no fix within {}s", after.as_secs()),
        }
    }

    /// Position-unavailable error with a cause.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            code: ERR_POSITION_UNAVAILABLE,
            message: message.into(),
        }
    }
}

/// Watch configuration. Fixed by product decision, not user-adjustable:
/// high accuracy, 60 s per fix attempt, no cached fixes.
#[derive(Clone, Copy, Debug)]
pub struct WatchOptions {
    /// Request the most accurate position the source can produce.
    pub high_accuracy: bool,
    /// Upper bound for a single fix attempt.
    pub timeout: Duration,
    /// Maximum acceptable fix age. Fixed at zero and not enforced by the
    /// tracker: [`LocationSource`] implementations are contractually fresh
    /// (every `next_fix` resolution is a new sample), so the field records
    /// the watch contract rather than driving a filter.
    pub maximum_age: Duration,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(60),
            maximum_age: Duration::ZERO,
        }
    }
}

/// A continuous source of position fixes.
///
/// `next_fix` resolves with the next freshly sampled position or a typed
/// error; the tracker calls it in a loop. Sources must not cache: with
/// `maximum_age` fixed at zero, every resolution is a new sample.
pub trait LocationSource: Send + 'static {
    /// Produce the next fix (or error). The tracker bounds each call with
    /// the watch timeout.
    fn next_fix(&mut self) -> impl Future<Output = Result<Coordinate, LocationError>> + Send;
}

/// Handle to the background watch task. Stopping (or dropping) the tracker
/// releases the task so no watch outlives its owning screen.
#[derive(Debug)]
pub struct LocationTracker {
    /// Join handle of the watch task.
    handle: tokio::task::JoinHandle<()>,
}

impl LocationTracker {
    /// Start watching `source`, forwarding every fix or error to `fixes`.
    ///
    /// Each fix is forwarded exactly once, with no debouncing; a timeout is
    /// reported as a `LocationError` and the watch continues (the platform's
    /// continuous-watch semantics own any retry).
    pub fn start<S: LocationSource>(
        mut source: S,
        options: WatchOptions,
        fixes: mpsc::UnboundedSender<Result<Coordinate, LocationError>>,
    ) -> Self {
        let handle = tokio::spawn(async move {
            tracing::info!(
                high_accuracy = options.high_accuracy,
                timeout_s = options.timeout.as_secs(),
                "[Location] watch started"
            );
            loop {
                let outcome = match tokio::time::timeout(options.timeout, source.next_fix()).await {
                    Ok(res) => res,
                    Err(_) => Err(LocationError::timeout(options.timeout)),
                };
                match &outcome {
                    Ok(fix) => tracing::debug!(
                        latitude = fix.latitude,
                        longitude = fix.longitude,
                        "[Location] fix"
                    ),
                    Err(e) => tracing::warn!(code = e.code, message = %e.message, "[Location] error"),
                }
                if fixes.send(outcome).is_err() {
                    // Receiver gone: the app is tearing down.
                    break;
                }
            }
        });
        Self { handle }
    }

    /// Release the watch task.
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for LocationTracker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Source that re-reads a coordinates file on a fixed cadence: a desktop
/// stand-in for a platform watch. The file holds `lat,lon` on one line.
#[derive(Debug)]
pub struct CoordsFileSource {
    /// File to sample.
    path: PathBuf,
    /// Sampling cadence.
    poll: Duration,
}

impl CoordsFileSource {
    /// Source reading `path` every `poll`.
    #[must_use]
    pub fn new(path: PathBuf, poll: Duration) -> Self {
        Self { path, poll }
    }
}

impl LocationSource for CoordsFileSource {
    async fn next_fix(&mut self) -> Result<Coordinate, LocationError> {
        tokio::time::sleep(self.poll).await;
        let body = std::fs::read_to_string(&self.path)
            .map_err(|e| LocationError::unavailable(format!("{}: {e}", self.path.display())))?;
        parse_coords_line(&body)
            .ok_or_else(|| LocationError::unavailable(format!("bad coordinates in {}", self.path.display())))
    }
}

/// Source that reports one fixed coordinate on a cadence. Useful when the
/// machine has no position provider at all.
#[derive(Debug)]
pub struct FixedSource {
    /// The coordinate to report.
    coordinate: Coordinate,
    /// Reporting cadence.
    poll: Duration,
}

impl FixedSource {
    /// Source reporting `coordinate` every `poll`.
    #[must_use]
    pub fn new(coordinate: Coordinate, poll: Duration) -> Self {
        Self { coordinate, poll }
    }
}

impl LocationSource for FixedSource {
    async fn next_fix(&mut self) -> Result<Coordinate, LocationError> {
        tokio::time::sleep(self.poll).await;
        Ok(self.coordinate)
    }
}

/// Parse a `lat,lon` line into a coordinate.
fn parse_coords_line(body: &str) -> Option<Coordinate> {
    let mut it = body.trim().split(',');
    let latitude = it.next()?.trim().parse::<f64>().ok()?;
    let longitude = it.next()?.trim().parse::<f64>().ok()?;
    Some(Coordinate {
        latitude,
        longitude,
    })
}
