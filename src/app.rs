//! Window and GL-context host.
//!
//! [`run`] opens a window, creates an OpenGL 3.3 context, hands the live
//! [`GlContext`] to a user-supplied constructor to build a [`Stage`], then
//! drives the frame loop: input, update, buffer swap.

use std::ffi::CString;
use std::num::NonZeroU32;
use std::time::{Duration, Instant};

use anyhow::Result;
use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, PossiblyCurrentContext, Version};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use log::{error, info};
use raw_window_handle::HasWindowHandle;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::graphics::gl::GlContext;
use crate::graphics::GraphicsApi;
use crate::input::Input;

/// One running application: built once the GL context exists, then updated
/// every frame.
pub trait Stage {
    /// Advance and draw one frame.
    fn update(&mut self, api: &mut GlContext, input: &Input, dt: Duration);

    /// The drawable size changed; the viewport is already adjusted.
    fn resize(&mut self, _api: &mut GlContext, _width: u32, _height: u32) {}
}

/// Builds the stage once the window and GL context are live.
pub type StageConstructor = Box<dyn FnOnce(&mut GlContext, u32, u32) -> Result<Box<dyn Stage>>>;

/// Opens a window of the given size and runs `build`'s stage until the window
/// closes.
pub fn run(title: &str, width: u32, height: u32, build: StageConstructor) -> Result<()> {
    let event_loop = EventLoop::new()?;
    let mut app = App {
        title: title.to_string(),
        size: (width, height),
        build: Some(build),
        running: None,
    };
    event_loop.run_app(&mut app)?;
    Ok(())
}

struct Running {
    window: Window,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    api: GlContext,
    stage: Box<dyn Stage>,
    input: Input,
    last_frame: Instant,
}

struct App {
    title: String,
    size: (u32, u32),
    build: Option<StageConstructor>,
    running: Option<Running>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        event_loop.set_control_flow(ControlFlow::Poll);
        info!("creating window and GL context");
        let attributes = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(LogicalSize::new(self.size.0, self.size.1));
        let template = ConfigTemplateBuilder::new()
            .with_depth_size(24)
            .with_multisampling(4);
        let (window, config) = DisplayBuilder::new()
            .with_window_attributes(Some(attributes))
            .build(event_loop, template, |mut configs| {
                configs.next().expect("no matching GL config")
            })
            .expect("failed to create the window");
        let window = window.expect("window was not created");

        let window_handle = window.window_handle().expect("no window handle").as_raw();
        let display = config.display();
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(Some(window_handle));
        let not_current = unsafe {
            display
                .create_context(&config, &context_attributes)
                .expect("failed to create a GL context")
        };
        let surface_attributes = window
            .build_surface_attributes(Default::default())
            .expect("failed to build surface attributes");
        let surface = unsafe {
            display
                .create_window_surface(&config, &surface_attributes)
                .expect("failed to create the GL surface")
        };
        let context = not_current
            .make_current(&surface)
            .expect("failed to make the GL context current");
        if let Err(e) =
            surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::new(1).unwrap()))
        {
            error!("vsync unavailable: {e}");
        }

        let gl = unsafe {
            glow::Context::from_loader_function(|symbol| {
                let symbol = CString::new(symbol).unwrap();
                display.get_proc_address(&symbol).cast()
            })
        };
        let mut api = GlContext::new(gl);
        let size = window.inner_size();
        api.set_viewport(size.width, size.height);

        let build = self.build.take().expect("stage constructor consumed twice");
        let stage = build(&mut api, size.width, size.height).expect("stage construction failed");

        self.running = Some(Running {
            window,
            surface,
            context,
            api,
            stage,
            input: Input::new(),
            last_frame: Instant::now(),
        });
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(running) = self.running.as_mut() else {
            return;
        };
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) if size.width != 0 && size.height != 0 => {
                running.surface.resize(
                    &running.context,
                    NonZeroU32::new(size.width).unwrap(),
                    NonZeroU32::new(size.height).unwrap(),
                );
                running.api.set_viewport(size.width, size.height);
                running
                    .stage
                    .resize(&mut running.api, size.width, size.height);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                running.input.record_key_event(&event);
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = now - running.last_frame;
                running.last_frame = now;
                running.stage.update(&mut running.api, &running.input, dt);
                running.input.end_frame();
                if let Err(e) = running.surface.swap_buffers(&running.context) {
                    error!("swap_buffers failed: {e}");
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(running) = self.running.as_ref() {
            running.window.request_redraw();
        }
    }
}
