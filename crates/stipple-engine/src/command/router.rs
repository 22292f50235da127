use crate::error::{Error, Result};
use crate::render::{FrameReport, PipelineConfig, PointBackend, RenderPipeline};

use super::Command;

/// Maps each command onto the pipeline or camera operation it names.
///
/// Holds no state of its own beyond the pipeline created by `Init`.
pub struct CommandRouter<B: PointBackend> {
    config: PipelineConfig,
    pipeline: Option<RenderPipeline<B>>,
}

impl<B: PointBackend> CommandRouter<B> {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config, pipeline: None }
    }

    pub fn pipeline(&self) -> Option<&RenderPipeline<B>> {
        self.pipeline.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.pipeline.is_some()
    }

    /// Runs one command. Returns the frame report when it drew.
    ///
    /// Gestures that arrive before `init` are dropped without error; any
    /// other command before `init` is [`Error::NotInitialized`].
    pub fn dispatch(&mut self, command: Command<B>) -> Result<Option<FrameReport>> {
        log::debug!("dispatch {command:?}");

        let Some(pipeline) = self.pipeline.as_mut() else {
            return match command {
                Command::Init(backend) => {
                    self.pipeline = Some(RenderPipeline::new(backend, self.config.clone()));
                    Ok(None)
                }
                command if command.is_gesture() => {
                    log::debug!("ignoring {} before init", command.tag());
                    Ok(None)
                }
                _ => Err(Error::NotInitialized),
            };
        };

        let redraw = match command {
            Command::Init(backend) => {
                log::warn!("init received twice; replacing the render pipeline");
                *pipeline = RenderPipeline::new(backend, self.config.clone());
                false
            }
            Command::SetData { x, y } => {
                pipeline.set_data(x, y)?;
                false
            }
            Command::SetColors(colors) => {
                pipeline.set_colors(colors)?;
                false
            }
            Command::Render => return pipeline.render().map(Some),
            Command::HandlePan(clip) => pipeline.handle_pan(clip),
            Command::HandleZoom { clip, delta_y } => pipeline.zoom(clip, delta_y),
            Command::MoveCamera(clip) => pipeline.move_camera(clip),
            Command::EndPan => {
                pipeline.end_pan();
                false
            }
            Command::Resize { width, height } => {
                pipeline.resize(width, height);
                false
            }
        };

        if redraw {
            pipeline.redraw_camera_only().map(Some)
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::data::ColorSet;
    use crate::render::testing::RecordingBackend;

    fn router() -> (CommandRouter<RecordingBackend>, RecordingBackend) {
        let backend = RecordingBackend::new(100.0, 100.0);
        let mut router = CommandRouter::new(PipelineConfig::default());
        router.dispatch(Command::Init(backend.clone())).unwrap();
        (router, backend)
    }

    #[test]
    fn commands_before_init_are_rejected() {
        let mut router = CommandRouter::<RecordingBackend>::new(PipelineConfig::default());
        assert_eq!(router.dispatch(Command::Render).unwrap_err(), Error::NotInitialized);
        assert_eq!(
            router
                .dispatch(Command::SetData { x: vec![0.0], y: vec![0.0] })
                .unwrap_err(),
            Error::NotInitialized
        );
    }

    #[test]
    fn gestures_before_init_are_ignored() {
        let mut router = CommandRouter::<RecordingBackend>::new(PipelineConfig::default());
        assert_eq!(router.dispatch(Command::HandlePan(Vec2::zero())).unwrap(), None);
        assert_eq!(
            router
                .dispatch(Command::HandleZoom { clip: Vec2::zero(), delta_y: 10.0 })
                .unwrap(),
            None
        );
        assert!(!router.is_initialized());
    }

    #[test]
    fn data_then_render_draws() {
        let (mut router, backend) = router();
        router
            .dispatch(Command::SetData { x: vec![0.0, 10.0], y: vec![0.0, 10.0] })
            .unwrap();
        router
            .dispatch(Command::SetColors(ColorSet::Packed(vec![0xFF8000, 0x0080FF])))
            .unwrap();
        let report = router.dispatch(Command::Render).unwrap().unwrap();
        assert_eq!(report.drawn, 2);
        assert_eq!(backend.log().frames.len(), 1);
    }

    #[test]
    fn gestures_redraw_camera_only() {
        let (mut router, backend) = router();
        router
            .dispatch(Command::SetData { x: vec![0.0, 1.0], y: vec![0.0, 1.0] })
            .unwrap();
        router.dispatch(Command::Render).unwrap();

        let report = router.dispatch(Command::HandlePan(Vec2::zero())).unwrap().unwrap();
        assert!(!report.uploaded_positions);
        router.dispatch(Command::MoveCamera(Vec2::new(0.2, 0.0))).unwrap();
        assert_eq!(router.dispatch(Command::EndPan).unwrap(), None);
        // stray move after release
        assert_eq!(router.dispatch(Command::MoveCamera(Vec2::new(0.4, 0.0))).unwrap(), None);

        let camera = router.pipeline().unwrap().camera().camera();
        assert!((camera.x + 10.0).abs() < 1e-9);

        let log = backend.log();
        assert_eq!(log.frames.len(), 3);
        assert_eq!(log.position_uploads, 1);
    }

    #[test]
    fn rejected_commands_leave_router_usable() {
        let (mut router, _backend) = router();
        let err = router
            .dispatch(Command::SetData { x: vec![0.0, 1.0], y: vec![0.0] })
            .unwrap_err();
        assert!(!err.is_fatal());
        assert!(router.dispatch(Command::Render).is_ok());
    }

    #[test]
    fn resize_reaches_backend() {
        let (mut router, backend) = router();
        assert_eq!(router.dispatch(Command::Resize { width: 320, height: 240 }).unwrap(), None);
        assert_eq!(backend.log().resizes, vec![(320, 240)]);
    }
}
