use std::sync::Arc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, EventCtx, FrameCtx, WindowCtx};
use crate::input::platform::translate_window_event;
use crate::input::{InputFrame, InputState};

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "stipple".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

/// Requests made by the app during a callback.
///
/// Applied after the callback returns.
#[derive(Debug, Default)]
pub struct RuntimeCtx {
    redraw: bool,
    exit: bool,
}

impl RuntimeCtx {
    /// Schedules `on_frame`. Nothing is drawn otherwise.
    pub fn request_redraw(&mut self) {
        self.redraw = true;
    }

    /// Closes the window and leaves the event loop.
    pub fn exit(&mut self) {
        self.exit = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and runs `app` until it exits or the window closes.
    pub fn run<A>(config: RuntimeConfig, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

struct WindowEntry {
    window: Arc<Window>,
    input_state: InputState,
    input_frame: InputFrame,
    frame_index: u64,
}

struct AppState<A: App> {
    config: RuntimeConfig,
    app: A,
    entry: Option<WindowEntry>,
    failure: Option<anyhow::Error>,
    exit_requested: bool,
}

impl<A: App> AppState<A> {
    fn new(config: RuntimeConfig, app: A) -> Self {
        Self {
            config,
            app,
            entry: None,
            failure: None,
            exit_requested: false,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        self.app
            .on_window_created(Arc::clone(&window))
            .context("window setup failed")?;

        window.request_redraw();
        self.entry = Some(WindowEntry {
            window,
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            frame_index: 0,
        });
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure = Some(err);
        self.exit(event_loop);
    }

    fn exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        self.entry = None;
        event_loop.exit();
    }

    fn apply(&mut self, event_loop: &ActiveEventLoop, ctx: RuntimeCtx, control: AppControl) {
        if ctx.exit || control == AppControl::Exit {
            self.exit(event_loop);
            return;
        }
        if ctx.redraw {
            if let Some(entry) = &self.entry {
                entry.window.request_redraw();
            }
        }
    }
}

impl<A: App> ApplicationHandler for AppState<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.exit_requested {
            return;
        }
        if let Err(err) = self.create_window(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };
        if entry.window.id() != window_id {
            return;
        }

        let mut ctx = RuntimeCtx::default();

        if let Some(ev) = translate_window_event(&entry.window, &entry.input_state, &event) {
            entry.input_state.apply_event(&mut entry.input_frame, ev);
            // input is consumed by the next frame
            ctx.request_redraw();
        }

        let control = {
            let mut event_ctx = EventCtx {
                window: WindowCtx { window: &entry.window },
                input: &entry.input_state,
                runtime: &mut ctx,
            };
            self.app.on_window_event(&mut event_ctx, &event)
        };

        let control = match &event {
            WindowEvent::CloseRequested => AppControl::Exit,

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                ctx.request_redraw();
                control
            }

            WindowEvent::RedrawRequested if control == AppControl::Continue => {
                let frame_control = {
                    let mut frame_ctx = FrameCtx {
                        window: WindowCtx { window: &entry.window },
                        input: &entry.input_state,
                        input_frame: &entry.input_frame,
                        frame_index: entry.frame_index,
                        runtime: &mut ctx,
                    };
                    self.app.on_frame(&mut frame_ctx)
                };
                entry.input_frame.clear();
                entry.frame_index += 1;
                frame_control
            }

            _ => control,
        };

        self.apply(event_loop, ctx, control);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_ctx_starts_idle() {
        let mut ctx = RuntimeCtx::default();
        assert!(!ctx.exit_requested());
        ctx.request_redraw();
        assert!(ctx.redraw);
        ctx.exit();
        assert!(ctx.exit_requested());
    }

    #[test]
    fn default_window_title() {
        assert_eq!(RuntimeConfig::default().title, "stipple");
    }
}
