//! Capture device lifetime
//!
//! The camera is a scoped resource: `CaptureGuard` starts it on
//! acquisition and stops it on release or drop, so an abandoned session
//! never leaves the device running.

/// Capture device errors
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("capture device unavailable: {0}")]
    Unavailable(String),

    #[error("capture device I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A video capture device (camera, or a recording standing in for one)
pub trait CaptureDevice {
    fn start(&mut self) -> Result<(), CaptureError>;

    /// Stop capturing; must be idempotent
    fn stop(&mut self);

    fn is_active(&self) -> bool;
}

/// Owns a started device and guarantees it is stopped
#[derive(Debug)]
pub struct CaptureGuard<D: CaptureDevice> {
    device: D,
    active: bool,
}

impl<D: CaptureDevice> CaptureGuard<D> {
    /// Start the device; fails if it cannot be opened
    pub fn acquire(mut device: D) -> Result<Self, CaptureError> {
        device.start()?;
        log::info!("Capture device started");
        Ok(Self {
            device,
            active: true,
        })
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Stop the device synchronously
    pub fn release(mut self) {
        self.stop_now();
    }

    fn stop_now(&mut self) {
        if self.active {
            self.device.stop();
            self.active = false;
            log::info!("Capture device stopped");
        }
    }
}

impl<D: CaptureDevice> Drop for CaptureGuard<D> {
    fn drop(&mut self) {
        self.stop_now();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
    use std::sync::Arc;

    /// Device that records start/stop calls in shared flags
    #[derive(Debug, Clone, Default)]
    pub struct FakeCamera {
        pub active: Arc<AtomicBool>,
        pub stops: Arc<AtomicU32>,
        pub fail: bool,
    }

    impl CaptureDevice for FakeCamera {
        fn start(&mut self) -> Result<(), CaptureError> {
            if self.fail {
                return Err(CaptureError::Unavailable("permission denied".to_string()));
            }
            self.active.store(true, Ordering::SeqCst);
            Ok(())
        }

        fn stop(&mut self) {
            self.active.store(false, Ordering::SeqCst);
            self.stops.fetch_add(1, Ordering::SeqCst);
        }

        fn is_active(&self) -> bool {
            self.active.load(Ordering::SeqCst)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeCamera;
    use super::*;
    use std::sync::atomic::Ordering;

    #[test]
    fn test_release_stops_once() {
        let camera = FakeCamera::default();
        let guard = CaptureGuard::acquire(camera.clone()).unwrap();
        assert!(guard.device().is_active());

        guard.release();
        assert!(!camera.active.load(Ordering::SeqCst));
        assert_eq!(camera.stops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_stops_device() {
        let camera = FakeCamera::default();
        {
            let _guard = CaptureGuard::acquire(camera.clone()).unwrap();
            assert!(camera.active.load(Ordering::SeqCst));
        }
        assert!(!camera.active.load(Ordering::SeqCst));
    }

    #[test]
    fn test_failed_start_is_error() {
        let camera = FakeCamera { fail: true, ..Default::default() };
        let result = CaptureGuard::acquire(camera);
        assert!(matches!(result, Err(CaptureError::Unavailable(_))));
    }
}
