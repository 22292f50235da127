use std::sync::Arc;

use anyhow::Context;
use winit::event::WindowEvent;
use winit::window::Window;

use stipple_engine::command::Command;
use stipple_engine::core::{App, AppControl, EventCtx, FrameCtx, WindowCtx};
use stipple_engine::coords::Vec2;
use stipple_engine::data::ColorSet;
use stipple_engine::device::GpuInit;
use stipple_engine::input::{InputEvent, Key, MouseButton, MouseButtonState};
use stipple_engine::render::{PipelineConfig, WgpuBackend};
use stipple_engine::window::CursorIcon;

use crate::config::ViewerConfig;
use crate::demo::DemoData;
use crate::host::{first_fatal, Driver};

/// Desktop host: turns window input into clip-space commands.
pub struct ViewerApp {
    config: ViewerConfig,
    driver: Option<Driver<WgpuBackend>>,
    dragging: bool,
}

impl ViewerApp {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            driver: None,
            dragging: false,
        }
    }

    fn send(&mut self, command: Command<WgpuBackend>) -> AppControl {
        let Some(driver) = self.driver.as_mut() else {
            return AppControl::Continue;
        };
        let fatal = match driver.send(command) {
            Ok(errors) => first_fatal(errors),
            Err(err) => Some(err),
        };
        match fatal {
            Some(err) => {
                log::error!("renderer stopped: {err}");
                AppControl::Exit
            }
            None => AppControl::Continue,
        }
    }

    /// Commands for one frame's worth of input, in arrival order.
    ///
    /// Pan moves within a frame collapse to the last one; every move resolves
    /// against the press position, so the intermediate ones add nothing.
    fn gesture_commands(&mut self, ctx: &FrameCtx<'_>) -> Vec<Command<WgpuBackend>> {
        let mut out = Vec::new();
        let mut last_move: Option<Vec2> = None;

        for event in &ctx.input_frame.events {
            match event {
                InputEvent::PointerButton(b) if b.button == MouseButton::Left => match b.state {
                    MouseButtonState::Pressed if !self.dragging => {
                        self.dragging = true;
                        out.push(Command::HandlePan(ctx.window.to_clip(b.x, b.y)));
                    }
                    MouseButtonState::Released if self.dragging => {
                        if let Some(clip) = last_move.take() {
                            out.push(Command::MoveCamera(clip));
                        }
                        self.dragging = false;
                        out.push(Command::EndPan);
                    }
                    _ => {}
                },
                InputEvent::PointerMoved(m) if self.dragging => {
                    last_move = Some(ctx.window.to_clip(m.x, m.y));
                }
                InputEvent::Focused(false) if self.dragging => {
                    self.dragging = false;
                    last_move = None;
                    out.push(Command::EndPan);
                }
                _ => {}
            }
        }

        if let Some(clip) = last_move {
            out.push(Command::MoveCamera(clip));
        }

        let scroll = ctx.input_frame.scroll_y;
        if scroll != 0.0 {
            let anchor = pointer_clip(&ctx.window, ctx.input.pointer_pos);
            out.push(Command::HandleZoom { clip: anchor, delta_y: scroll });
        }

        out
    }
}

fn pointer_clip(window: &WindowCtx<'_>, pos: Option<(f32, f32)>) -> Vec2 {
    match pos {
        Some((x, y)) => window.to_clip(x, y),
        None => Vec2::zero(),
    }
}

impl App for ViewerApp {
    fn on_window_created(&mut self, window: Arc<Window>) -> anyhow::Result<()> {
        let size = window.inner_size();
        let backend = WgpuBackend::for_window(window, GpuInit::default())
            .context("failed to set up the renderer")?;

        let pipeline = PipelineConfig {
            point_size: self.config.point_size,
            ..PipelineConfig::default()
        };
        self.driver = Some(Driver::new(pipeline, self.config.inline)?);

        let demo = DemoData::generate(
            self.config.points,
            size.width as f64,
            size.height as f64,
            self.config.seed,
        );
        log::info!("generated {} demo points", demo.x.len());

        for command in [
            Command::Init(backend),
            Command::SetData { x: demo.x, y: demo.y },
            Command::SetColors(ColorSet::Packed(demo.colors)),
        ] {
            if self.send(command) == AppControl::Exit {
                anyhow::bail!("renderer failed during startup");
            }
        }
        Ok(())
    }

    fn on_window_event(&mut self, ctx: &mut EventCtx<'_>, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::Resized(size) => self.send(Command::Resize {
                width: size.width,
                height: size.height,
            }),
            WindowEvent::KeyboardInput { .. } if ctx.input.key_down(Key::Escape) => {
                ctx.runtime.exit();
                AppControl::Exit
            }
            _ => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        ctx.window.set_cursor(if self.dragging {
            CursorIcon::Grabbing
        } else {
            CursorIcon::Grab
        });

        let gestures = self.gesture_commands(ctx);
        // gestures redraw on their own; anything else needs an explicit render
        let needs_render = !gestures.iter().any(|c| {
            matches!(
                c,
                Command::HandlePan(_) | Command::MoveCamera(_) | Command::HandleZoom { .. }
            )
        });

        for command in gestures {
            if self.send(command) == AppControl::Exit {
                return AppControl::Exit;
            }
        }

        if needs_render {
            return self.send(Command::Render);
        }
        AppControl::Continue
    }
}
