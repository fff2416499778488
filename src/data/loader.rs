use crate::data::boundaries::{load_boundaries, BoundarySet};
use crate::data::regions::{load_regions_or_fallback, RegionLoad};
use crate::data::Source;
use crate::error::LoadError;
use log::debug;
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Where both startup datasets come from
#[derive(Debug, Clone)]
pub struct LoadConfig {
    pub regions: Source,
    pub boundaries: Source,
    pub timeout: Duration,
}

/// Completion of one startup load, delivered to the UI thread
#[derive(Debug)]
pub enum LoadEvent {
    Regions(RegionLoad),
    Boundaries(Result<BoundarySet, LoadError>),
}

/// Start both loads in the background. They complete in no particular order.
/// Dropping the receiver turns any late completion into a no-op.
pub fn spawn_loads(config: &LoadConfig) -> Receiver<LoadEvent> {
    let (rx, _workers) = spawn_workers(config);
    rx
}

fn spawn_workers(config: &LoadConfig) -> (Receiver<LoadEvent>, [JoinHandle<()>; 2]) {
    let (tx, rx) = mpsc::channel();

    let regions_tx = tx.clone();
    let regions = config.regions.clone();
    let timeout = config.timeout;
    let regions_worker = thread::spawn(move || {
        let load = load_regions_or_fallback(&regions, timeout);
        if regions_tx.send(LoadEvent::Regions(load)).is_err() {
            debug!("region load finished after shutdown, dropped");
        }
    });

    let boundaries = config.boundaries.clone();
    let boundaries_worker = thread::spawn(move || {
        let result = load_boundaries(&boundaries, timeout);
        if tx.send(LoadEvent::Boundaries(result)).is_err() {
            debug!("boundary load finished after shutdown, dropped");
        }
    });

    (rx, [regions_worker, boundaries_worker])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::regions::DatasetOrigin;

    #[test]
    fn test_both_loads_complete() {
        let rx = spawn_loads(&LoadConfig {
            regions: Source::parse("/nonexistent/survival-map/regions.json"),
            boundaries: Source::parse("/nonexistent/survival-map/china.json"),
            timeout: Duration::from_secs(1),
        });

        let mut saw_regions = false;
        let mut saw_boundaries = false;
        for _ in 0..2 {
            match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
                LoadEvent::Regions(load) => {
                    assert_eq!(load.origin, DatasetOrigin::Fallback);
                    saw_regions = true;
                }
                LoadEvent::Boundaries(result) => {
                    assert!(result.is_err());
                    saw_boundaries = true;
                }
            }
        }
        assert!(saw_regions && saw_boundaries);
    }

    #[test]
    fn test_late_completion_after_receiver_dropped() {
        let (rx, workers) = spawn_workers(&LoadConfig {
            regions: Source::parse("/nonexistent/survival-map/regions.json"),
            boundaries: Source::parse("/nonexistent/survival-map/china.json"),
            timeout: Duration::from_secs(1),
        });
        drop(rx);

        for worker in workers {
            assert!(worker.join().is_ok());
        }
    }
}
