//! The window host: event loop, input dispatch and the redraw loop.
//!
//! [`run_demo`] does all setup up front (window, GL context, capability
//! check, [`Demo::init`]) and only enters the event loop once every step has
//! succeeded. A setup error is returned to the caller and no frame is ever
//! drawn.

use std::time::Instant;

use anyhow::Context as _;
use glium::backend::glutin::SimpleWindowBuilder;
use glium::winit::application::ApplicationHandler;
use glium::winit::event::{ElementState, KeyEvent, WindowEvent};
use glium::winit::event_loop::{ActiveEventLoop, EventLoop};
use glium::winit::keyboard::PhysicalKey;
use glium::winit::window::{Window, WindowId};
use glview_core::{logging, InputEvent, ViewerSettings};
use glview_gl::{GlContext, RawGl};
use tracing::{debug, error, info, trace};

use crate::demo::{Demo, FrameInput};
use crate::keymap;

/// Open a window for `D` and run it until the window is closed.
pub fn run_demo<D: Demo<RawGl>>(settings: ViewerSettings) -> anyhow::Result<()> {
    logging::init();
    info!(
        title = %settings.title,
        width = settings.width,
        height = settings.height,
        assets = %settings.asset_dir.display(),
        "starting"
    );

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let (window, display) = SimpleWindowBuilder::new()
        .with_title(&settings.title)
        .with_inner_size(settings.width, settings.height)
        .build(&event_loop);

    let ctx = GlContext::new(display)
        .inspect_err(|err| error!("{err}"))
        .context("OpenGL context cannot run the demo shaders")?;
    let demo = D::init(ctx.gl(), &settings)
        .inspect_err(|err| error!("{err:#}"))
        .with_context(|| format!("failed to initialize {}", settings.title))?;

    let mut host = Host {
        demo,
        ctx,
        window,
        started: Instant::now(),
        frame: 0,
    };
    event_loop
        .run_app(&mut host)
        .context("event loop terminated with error")?;

    info!(frames = host.frame, "closed");
    Ok(())
}

struct Host<D> {
    // Declared first so GL resources are released while the context lives.
    demo: D,
    ctx: GlContext,
    window: Window,
    started: Instant,
    frame: u64,
}

impl<D: Demo<RawGl>> Host<D> {
    fn dispatch(&mut self, event: InputEvent) {
        debug!(?event, "input");
        self.demo.handle_event(self.ctx.gl(), event);
        self.window.request_redraw();
    }

    fn redraw(&mut self) {
        let input = FrameInput {
            elapsed: self.started.elapsed(),
            viewport: self.ctx.viewport(),
            frame: self.frame,
        };
        trace!(frame = input.frame, viewport = ?input.viewport, "draw");

        self.demo.draw(self.ctx.gl(), &input);
        self.ctx.finish_frame();
        self.frame += 1;

        // Animate continuously.
        self.window.request_redraw();
    }
}

impl<D: Demo<RawGl>> ApplicationHandler for Host<D> {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {
        self.window.request_redraw();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                self.ctx.resize(size.width, size.height);
                self.window.request_redraw();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                if let Some(event) = keymap::map_key(code) {
                    self.dispatch(event);
                }
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button,
                ..
            } => {
                if let Some(event) = keymap::map_mouse(button) {
                    self.dispatch(event);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }
}
