use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::error::{Error, Result};
use crate::render::{PipelineConfig, PointBackend};

use super::queue::CommandQueue;
use super::{Command, CommandRouter};

#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Dataset commands buffered between host and render thread before
    /// `send` waits.
    pub queue_capacity: usize,
    pub thread_name: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 256,
            thread_name: "stipple-render".to_owned(),
        }
    }
}

/// Dedicated render thread fed through an ordered command queue.
///
/// Errors come back on a separate channel; a fatal one stops the thread.
/// Dropping the worker closes the queue and joins the thread.
pub struct RenderWorker<B> {
    queue: Arc<CommandQueue<B>>,
    errors: Receiver<Error>,
    handle: Option<JoinHandle<()>>,
}

impl<B: PointBackend + Send + 'static> RenderWorker<B> {
    pub fn spawn(pipeline: PipelineConfig, config: WorkerConfig) -> Result<Self> {
        let queue = Arc::new(CommandQueue::new(config.queue_capacity));
        let (error_tx, error_rx) = mpsc::channel();

        let worker_queue = Arc::clone(&queue);
        let handle = thread::Builder::new()
            .name(config.thread_name.clone())
            .spawn(move || serve(&worker_queue, error_tx, CommandRouter::new(pipeline)))
            .map_err(|e| Error::Setup(format!("failed to spawn render thread: {e}")))?;

        log::info!(
            "render worker `{}` started (queue capacity {})",
            config.thread_name,
            config.queue_capacity
        );

        Ok(Self {
            queue,
            errors: error_rx,
            handle: Some(handle),
        })
    }

    /// Queues a command.
    ///
    /// Renders, gestures and resizes return immediately, merged with the
    /// previous queued command where possible. Dataset commands wait while
    /// the queue is full. After a fatal error every send is
    /// [`Error::WorkerStopped`].
    pub fn send(&self, command: Command<B>) -> Result<()> {
        self.queue.push(command)
    }
}

impl<B> RenderWorker<B> {
    /// Errors reported since the last call, oldest first.
    pub fn drain_errors(&self) -> Vec<Error> {
        self.errors.try_iter().collect()
    }

    pub fn is_running(&self) -> bool {
        !self.queue.is_stopped() && self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Closes the queue and waits for queued commands to finish.
    pub fn shutdown(mut self) -> Vec<Error> {
        self.stop();
        self.drain_errors()
    }

    fn stop(&mut self) {
        self.queue.close();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("render thread panicked");
            }
        }
    }
}

impl<B> Drop for RenderWorker<B> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Render loop: strictly sequential, in queue order.
fn serve<B: PointBackend>(
    queue: &CommandQueue<B>,
    errors: Sender<Error>,
    mut router: CommandRouter<B>,
) {
    while let Some(command) = queue.pop() {
        let tag = command.tag();
        if let Err(err) = router.dispatch(command) {
            log::error!("{tag} failed: {err}");
            let fatal = err.is_fatal();
            let _ = errors.send(err);
            if fatal {
                log::error!("render worker stopping after fatal error");
                queue.stop();
                break;
            }
        }
    }

    log::debug!("render worker exited");
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::camera::CameraController;
    use crate::coords::{Vec2, Viewport};
    use crate::render::testing::RecordingBackend;

    fn run_inline(commands: Vec<Command<RecordingBackend>>) -> Vec<Error> {
        let queue = CommandQueue::new(commands.len());
        for c in commands {
            queue.push(c).unwrap();
        }
        queue.close();
        let (etx, erx) = mpsc::channel();
        serve(&queue, etx, CommandRouter::new(PipelineConfig::default()));
        erx.try_iter().collect()
    }

    fn slow_backend(delay_ms: u64) -> RecordingBackend {
        let backend = RecordingBackend::new(100.0, 100.0);
        backend.log().draw_delay = Duration::from_millis(delay_ms);
        backend
    }

    fn small_queue(capacity: usize) -> RenderWorker<RecordingBackend> {
        RenderWorker::spawn(
            PipelineConfig::default(),
            WorkerConfig { queue_capacity: capacity, ..WorkerConfig::default() },
        )
        .unwrap()
    }

    #[test]
    fn consecutive_renders_are_coalesced() {
        let backend = RecordingBackend::new(100.0, 100.0);
        let errors = run_inline(vec![
            Command::Init(backend.clone()),
            Command::SetData { x: vec![0.0, 1.0], y: vec![0.0, 1.0] },
            Command::Render,
            Command::Render,
            Command::Render,
            Command::HandleZoom { clip: Vec2::zero(), delta_y: -10.0 },
            Command::Render,
            Command::Render,
        ]);
        assert!(errors.is_empty());
        // one per render run plus the zoom redraw
        assert_eq!(backend.log().frames.len(), 3);
    }

    #[test]
    fn recoverable_errors_are_reported_and_skipped() {
        let backend = RecordingBackend::new(100.0, 100.0);
        let errors = run_inline(vec![
            Command::Render,
            Command::Init(backend.clone()),
            Command::SetData { x: vec![0.0], y: vec![] },
            Command::Render,
        ]);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0], Error::NotInitialized);
        assert!(matches!(errors[1], Error::DataShape { .. }));
        assert_eq!(backend.log().frames.len(), 1);
    }

    #[test]
    fn fatal_error_stops_the_loop() {
        let backend = RecordingBackend::new(100.0, 100.0);
        backend.log().fail_next_draw = Some(Error::Surface("device lost".into()));
        let errors = run_inline(vec![
            Command::Init(backend.clone()),
            Command::Render,
            Command::Resize { width: 10, height: 10 },
        ]);
        assert_eq!(errors, vec![Error::Surface("device lost".into())]);
        assert!(backend.log().resizes.is_empty());
    }

    #[test]
    fn worker_thread_processes_commands_in_order() {
        let backend = RecordingBackend::new(100.0, 100.0);
        let worker = RenderWorker::spawn(PipelineConfig::default(), WorkerConfig::default())
            .unwrap();

        worker.send(Command::Init(backend.clone())).unwrap();
        worker
            .send(Command::SetData { x: vec![0.0, 10.0], y: vec![0.0, 10.0] })
            .unwrap();
        for _ in 0..5 {
            worker.send(Command::Render).unwrap();
        }
        worker.send(Command::Resize { width: 50, height: 50 }).unwrap();

        let errors = worker.shutdown();
        assert!(errors.is_empty());

        let log = backend.log();
        assert_eq!(log.position_uploads, 1);
        assert!((1..=5).contains(&log.frames.len()));
        assert_eq!(log.resizes, vec![(50, 50)]);
    }

    #[test]
    fn last_render_after_new_data_is_drawn_on_a_full_queue() {
        let backend = slow_backend(50);
        let worker = small_queue(1);

        worker.send(Command::Init(backend.clone())).unwrap();
        worker.send(Command::Render).unwrap();
        worker
            .send(Command::SetData { x: vec![0.0, 1.0, 2.0], y: vec![0.0, 1.0, 2.0] })
            .unwrap();
        worker.send(Command::Render).unwrap();

        assert!(worker.shutdown().is_empty());
        let log = backend.log();
        assert_eq!(log.position_uploads, 1);
        assert_eq!(log.frames.last().map(|f| f.count), Some(3));
    }

    #[test]
    fn gestures_do_not_wait_for_a_busy_renderer() {
        let backend = slow_backend(100);
        let worker = small_queue(2);
        worker.send(Command::Init(backend.clone())).unwrap();
        worker.send(Command::SetData { x: vec![0.0, 1.0], y: vec![0.0, 1.0] }).unwrap();
        worker.send(Command::Render).unwrap();

        let started = Instant::now();
        for _ in 0..20 {
            worker
                .send(Command::HandleZoom { clip: Vec2::zero(), delta_y: -10.0 })
                .unwrap();
            worker.send(Command::Render).unwrap();
        }
        // one draw takes 100ms; twenty sends must not wait for any of them
        assert!(started.elapsed() < Duration::from_millis(80));
        assert!(worker.shutdown().is_empty());

        let mut expected = CameraController::new(Some(Viewport::new(100.0, 100.0)));
        for _ in 0..20 {
            expected.zoom(Vec2::zero(), -10.0);
        }
        let expected = expected.view_projection().to_gpu_columns();
        let log = backend.log();
        let drawn = log.frames.last().map(|f| f.uniforms.view_proj).unwrap();
        for (col, want) in drawn.iter().zip(expected.iter()) {
            for (a, b) in col.iter().zip(want.iter()) {
                assert!((a - b).abs() < 1e-4, "{drawn:?} != {expected:?}");
            }
        }
    }

    #[test]
    fn send_after_fatal_error_reports_stopped_worker() {
        let backend = RecordingBackend::new(100.0, 100.0);
        backend.log().fail_next_draw = Some(Error::Setup("lost".into()));
        let worker = small_queue(1);

        worker.send(Command::Init(backend)).unwrap();
        worker.send(Command::Render).unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while worker.is_running() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        assert!(!worker.is_running());
        assert_eq!(worker.send(Command::EndPan), Err(Error::WorkerStopped));
        assert_eq!(worker.drain_errors(), vec![Error::Setup("lost".into())]);
    }
}
