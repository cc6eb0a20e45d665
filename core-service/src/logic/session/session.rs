//! Exercise Session
//!
//! One session = one user doing one exercise in front of one capture
//! device. The session owns the tracker and the capture guard; `finish`
//! consumes it, so the device is stopped before the record exists and no
//! late frame can touch the statistics afterwards.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::logic::exercise::{self, ExerciseKind};
use crate::logic::tracker::{RepetitionTracker, SessionStats, TrackerConfig};
use super::capture::{CaptureDevice, CaptureError, CaptureGuard};
use super::record::ExerciseRecord;
use super::source::{Frame, PoseSource, SourceError};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("a signed-in user is required to start a session")]
    MissingUser,

    #[error("cannot start session: {0}")]
    CaptureUnavailable(#[from] CaptureError),

    #[error("pose source failed: {0}")]
    Source(#[from] SourceError),
}

/// Outcome of handing one frame to the session
#[derive(Debug, Clone, PartialEq)]
pub enum FramePoll {
    Processed(SessionStats),
    /// No pose detected; nothing changed
    Skipped,
    /// Source has no more frames
    Exhausted,
}

pub struct ExerciseSession<D: CaptureDevice> {
    id: Uuid,
    user_id: String,
    tracker: RepetitionTracker,
    capture: CaptureGuard<D>,
    started_at: DateTime<Utc>,
    first_frame_ms: Option<u64>,
    last_frame_ms: Option<u64>,
    accuracy_sum: u64,
    visible_frames: u64,
}

impl<D: CaptureDevice> ExerciseSession<D> {
    /// Acquire the capture device and begin tracking
    pub fn start(
        user_id: impl Into<String>,
        kind: ExerciseKind,
        config: TrackerConfig,
        device: D,
    ) -> Result<Self, SessionError> {
        let user_id = user_id.into();
        if user_id.trim().is_empty() {
            return Err(SessionError::MissingUser);
        }

        let capture = CaptureGuard::acquire(device)?;
        let id = Uuid::new_v4();
        log::info!("Session {} started: {} for user {}", id, kind, user_id);

        Ok(Self {
            id,
            user_id,
            tracker: RepetitionTracker::new(exercise::definition(kind), config),
            capture,
            started_at: Utc::now(),
            first_frame_ms: None,
            last_frame_ms: None,
            accuracy_sum: 0,
            visible_frames: 0,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn exercise(&self) -> ExerciseKind {
        self.tracker.definition().kind
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn stats(&self) -> SessionStats {
        self.tracker.stats()
    }

    pub fn capture(&self) -> &CaptureGuard<D> {
        &self.capture
    }

    /// Feed one frame; frames without a pose are skipped
    pub fn process_frame(&mut self, frame: &Frame) -> FramePoll {
        let Some(pose) = frame.primary_pose() else {
            return FramePoll::Skipped;
        };

        self.first_frame_ms.get_or_insert(frame.timestamp_ms);
        self.last_frame_ms = Some(frame.timestamp_ms);

        let stats = self.tracker.process_frame(pose, frame.timestamp_ms);
        if stats.pose_visible {
            self.accuracy_sum += stats.accuracy as u64;
            self.visible_frames += 1;
        }
        FramePoll::Processed(stats)
    }

    /// Stop the capture device and produce the session record
    pub fn finish(self, ended_at: DateTime<Utc>) -> ExerciseRecord {
        let duration_secs = self.duration_secs(ended_at);
        let accuracy = self.mean_accuracy();
        let stats = self.tracker.stats();
        let kind = self.exercise();
        let Self { id, user_id, capture, .. } = self;

        capture.release();

        let record = ExerciseRecord {
            id,
            user_id,
            exercise_type: kind,
            reps: stats.rep_count,
            accuracy,
            score: stats.score,
            duration_secs,
            recorded_at: ended_at,
        };
        log::info!("Session {} finished: {}", record.id, record.summary());
        record
    }

    /// Frame timestamps when available, wall clock otherwise
    fn duration_secs(&self, ended_at: DateTime<Utc>) -> u64 {
        match (self.first_frame_ms, self.last_frame_ms) {
            (Some(first), Some(last)) => last.saturating_sub(first) / 1000,
            _ => (ended_at - self.started_at).num_seconds().max(0) as u64,
        }
    }

    fn mean_accuracy(&self) -> u8 {
        if self.visible_frames == 0 {
            return 0;
        }
        let mean = self.accuracy_sum as f64 / self.visible_frames as f64;
        mean.round().min(100.0) as u8
    }
}

impl<D: CaptureDevice + PoseSource> ExerciseSession<D> {
    /// Pull the next frame from the device and process it
    pub fn poll(&mut self) -> Result<FramePoll, SessionError> {
        match self.capture.device_mut().next_frame()? {
            Some(frame) => Ok(self.process_frame(&frame)),
            None => Ok(FramePoll::Exhausted),
        }
    }
}

// ============================================================================
// RUNNER
// ============================================================================

/// Shared flag that ends a running session
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Drives a session frame by frame until exhausted or stopped
#[derive(Debug, Clone, Default)]
pub struct SessionRunner {
    stop: StopHandle,
}

impl SessionRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Run to completion; `on_frame` sees every processed snapshot
    pub fn run<D, F>(
        &self,
        mut session: ExerciseSession<D>,
        mut on_frame: F,
    ) -> Result<ExerciseRecord, SessionError>
    where
        D: CaptureDevice + PoseSource,
        F: FnMut(&SessionStats),
    {
        let mut skipped = 0u64;

        while !self.stop.is_stopped() {
            match session.poll()? {
                FramePoll::Processed(stats) => on_frame(&stats),
                FramePoll::Skipped => skipped += 1,
                FramePoll::Exhausted => break,
            }
        }

        if self.stop.is_stopped() {
            log::info!("Session {} stopped by request", session.id());
        }
        if skipped > 0 {
            log::debug!("Skipped {} frames without a pose", skipped);
        }

        Ok(session.finish(Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::geometry::{Keypoint, Landmark, Pose};
    use crate::logic::session::capture::testing::FakeCamera;
    use std::collections::VecDeque;
    use std::sync::atomic::Ordering;

    /// Fake camera that also plays back scripted frames
    struct ScriptedCamera {
        camera: FakeCamera,
        frames: VecDeque<Frame>,
    }

    impl CaptureDevice for ScriptedCamera {
        fn start(&mut self) -> Result<(), CaptureError> {
            self.camera.start()
        }
        fn stop(&mut self) {
            self.camera.stop()
        }
        fn is_active(&self) -> bool {
            self.camera.is_active()
        }
    }

    impl PoseSource for ScriptedCamera {
        fn next_frame(&mut self) -> Result<Option<Frame>, SourceError> {
            Ok(self.frames.pop_front())
        }
    }

    fn arms(elbow_deg: f32) -> Pose {
        let rad = elbow_deg.to_radians();
        let mut kps = Vec::new();
        for (shoulder, elbow, wrist, ox) in [
            (Landmark::LeftShoulder, Landmark::LeftElbow, Landmark::LeftWrist, 200.0),
            (Landmark::RightShoulder, Landmark::RightElbow, Landmark::RightWrist, 400.0),
        ] {
            kps.push(Keypoint::new(shoulder, ox + 100.0, 200.0, 0.9));
            kps.push(Keypoint::new(elbow, ox, 200.0, 0.9));
            kps.push(Keypoint::new(wrist, ox + 100.0 * rad.cos(), 200.0 + 100.0 * rad.sin(), 0.9));
        }
        Pose::new(kps)
    }

    fn frame(timestamp_ms: u64, pose: Option<Pose>) -> Frame {
        Frame {
            timestamp_ms,
            poses: pose.into_iter().collect(),
        }
    }

    fn one_rep() -> VecDeque<Frame> {
        [170.0, 170.0, 80.0, 80.0, 80.0, 170.0, 170.0]
            .iter()
            .enumerate()
            .map(|(i, a)| frame(i as u64 * 400, Some(arms(*a))))
            .collect()
    }

    #[test]
    fn test_start_requires_user() {
        let camera = FakeCamera::default();
        let result = ExerciseSession::start("  ", ExerciseKind::Pushup, TrackerConfig::default(), camera.clone());
        assert!(matches!(result, Err(SessionError::MissingUser)));
        assert!(!camera.active.load(Ordering::SeqCst));
    }

    #[test]
    fn test_capture_failure_prevents_start() {
        let camera = FakeCamera { fail: true, ..Default::default() };
        let result = ExerciseSession::start("user-1", ExerciseKind::Squat, TrackerConfig::default(), camera);
        assert!(matches!(result, Err(SessionError::CaptureUnavailable(_))));
    }

    #[test]
    fn test_frame_without_pose_is_skipped() {
        let mut session =
            ExerciseSession::start("user-1", ExerciseKind::Pushup, TrackerConfig::default(), FakeCamera::default())
                .unwrap();
        let before = session.stats();

        assert_eq!(session.process_frame(&frame(0, None)), FramePoll::Skipped);
        assert_eq!(session.stats(), before);
    }

    #[test]
    fn test_finish_stops_camera_and_builds_record() {
        let camera = FakeCamera::default();
        let mut session =
            ExerciseSession::start("user-1", ExerciseKind::Pushup, TrackerConfig::default(), camera.clone())
                .unwrap();

        for f in one_rep() {
            session.process_frame(&f);
        }
        let record = session.finish(Utc::now());

        assert!(!camera.active.load(Ordering::SeqCst));
        assert_eq!(camera.stops.load(Ordering::SeqCst), 1);
        assert_eq!(record.user_id, "user-1");
        assert_eq!(record.exercise_type, ExerciseKind::Pushup);
        assert_eq!(record.reps, 1);
        assert_eq!(record.accuracy, 100);
        assert_eq!(record.score, 10);
        // 0ms .. 2400ms
        assert_eq!(record.duration_secs, 2);
    }

    #[test]
    fn test_dropped_session_releases_camera() {
        let camera = FakeCamera::default();
        {
            let _session =
                ExerciseSession::start("user-1", ExerciseKind::Plank, TrackerConfig::default(), camera.clone())
                    .unwrap();
            assert!(camera.active.load(Ordering::SeqCst));
        }
        assert!(!camera.active.load(Ordering::SeqCst));
    }

    #[test]
    fn test_runner_plays_source_to_exhaustion() {
        let camera = FakeCamera::default();
        let device = ScriptedCamera {
            camera: camera.clone(),
            frames: one_rep(),
        };
        let session = ExerciseSession::start("user-1", ExerciseKind::Pushup, TrackerConfig::default(), device).unwrap();

        let mut seen = 0;
        let record = SessionRunner::new().run(session, |_| seen += 1).unwrap();

        assert_eq!(seen, 7);
        assert_eq!(record.reps, 1);
        assert!(!camera.active.load(Ordering::SeqCst));
    }

    #[test]
    fn test_runner_honours_stop_handle() {
        let device = ScriptedCamera {
            camera: FakeCamera::default(),
            frames: one_rep(),
        };
        let session = ExerciseSession::start("user-1", ExerciseKind::Pushup, TrackerConfig::default(), device).unwrap();

        let runner = SessionRunner::new();
        let stop = runner.stop_handle();
        let mut seen = 0;
        let record = runner
            .run(session, |stats| {
                seen += 1;
                if stats.state.is_some() {
                    stop.stop();
                }
            })
            .unwrap();

        // Up is accepted on the second frame
        assert_eq!(seen, 2);
        assert_eq!(record.reps, 0);
    }
}
