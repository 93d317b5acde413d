//! Native window hosting a [`UiApp`]: winit event loop, egui input, wgpu presentation.

use std::sync::Arc;
use std::{thread, time::Duration};

use app_api::UiApp;
use egui::{Context as EguiContext, viewport::ViewportId};
use egui_wgpu::{Renderer as EguiWgpuRenderer, ScreenDescriptor, wgpu};
use egui_winit::State as EguiWinitState;
use thiserror::Error;
use winit::{
    application::ApplicationHandler,
    error::{EventLoopError, OsError},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    window::{Window, WindowId},
};

/// Frame pacing for the ticker; host commands are drained once per frame.
const FRAME: Duration = Duration::from_millis(16);

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("event loop: {0}")]
    EventLoop(#[from] EventLoopError),
    #[error("window: {0}")]
    Window(#[from] OsError),
    #[error("surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no texture formats")]
    NoSurfaceFormat,
}

enum UserEvent {
    Tick,
}

/// Open a window and drive `app` until it is closed.
pub fn run(app: Box<dyn UiApp>) -> Result<(), PlatformError> {
    let event_loop = EventLoop::<UserEvent>::with_user_event().build()?;
    let proxy = event_loop.create_proxy();

    let mut platform = PlatformApp {
        app,
        window: None,
        proxy: Some(proxy),
        ticker_started: false,
        egui_ctx: EguiContext::default(),
        egui_state: None,
        gpu: None,
        fatal: None,
    };
    event_loop.run_app(&mut platform)?;
    match platform.fatal.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct Gpu {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: EguiWgpuRenderer,
}

impl Gpu {
    fn new(window: Arc<Window>) -> Result<Self, PlatformError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let size = window.inner_size();
        let surface = instance.create_surface(window)?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            force_fallback_adapter: false,
            compatible_surface: Some(&surface),
        }))?;

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::default(),
        }))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or(PlatformError::NoSurfaceFormat)?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 0,
        };
        surface.configure(&device, &config);

        let renderer = EguiWgpuRenderer::new(&device, format, None, 1, true);
        Ok(Self {
            surface,
            device,
            queue,
            config,
            renderer,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
    }
}

struct PlatformApp {
    app: Box<dyn UiApp>,
    window: Option<Arc<Window>>,
    proxy: Option<EventLoopProxy<UserEvent>>,
    ticker_started: bool,
    egui_ctx: EguiContext,
    egui_state: Option<EguiWinitState>,
    gpu: Option<Gpu>,
    fatal: Option<PlatformError>,
}

impl PlatformApp {
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), PlatformError> {
        let window = match self.window.as_ref() {
            Some(window) => Arc::clone(window),
            None => {
                let attrs = Window::default_attributes().with_title(self.app.window_title());
                let window = Arc::new(event_loop.create_window(attrs)?);
                self.window = Some(Arc::clone(&window));
                window
            }
        };

        if self.egui_state.is_none() {
            self.egui_state = Some(EguiWinitState::new(
                self.egui_ctx.clone(),
                ViewportId::ROOT,
                &*window,
                Some(window.scale_factor() as f32),
                None,
                None,
            ));
        }

        if self.gpu.is_none() {
            self.gpu = Some(Gpu::new(window)?);
        }
        Ok(())
    }

    fn start_ticker(&mut self) {
        if self.ticker_started {
            return;
        }
        self.ticker_started = true;
        if let Some(proxy) = self.proxy.clone() {
            thread::spawn(move || {
                while proxy.send_event(UserEvent::Tick).is_ok() {
                    thread::sleep(FRAME);
                }
            });
        }
    }

    fn redraw(&mut self) {
        let (Some(window), Some(state), Some(gpu)) =
            (self.window.as_ref(), self.egui_state.as_mut(), self.gpu.as_mut())
        else {
            return;
        };

        let frame = match gpu.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(wgpu::SurfaceError::Outdated) => return,
            Err(err) => {
                log::warn!(target: "platform", "surface error: {err:?}");
                return;
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let ctx = &self.egui_ctx;
        let raw_input = state.take_egui_input(window);
        ctx.begin_pass(raw_input);
        self.app.ui(ctx);
        let full_output = ctx.end_pass();
        state.handle_platform_output(window, full_output.platform_output);

        let clipped = ctx.tessellate(full_output.shapes, ctx.pixels_per_point());
        for (id, delta) in &full_output.textures_delta.set {
            gpu.renderer
                .update_texture(&gpu.device, &gpu.queue, *id, delta);
        }

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        let screen = ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: ctx.pixels_per_point(),
        };
        gpu.renderer
            .update_buffers(&gpu.device, &gpu.queue, &mut encoder, &clipped, &screen);

        {
            let rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            gpu.renderer
                .render(&mut rpass.forget_lifetime(), &clipped, &screen);
        }

        for id in full_output.textures_delta.free {
            gpu.renderer.free_texture(&id);
        }

        gpu.queue.submit(Some(encoder.finish()));
        frame.present();
    }
}

impl ApplicationHandler<UserEvent> for PlatformApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let Err(err) = self.init(event_loop) {
            log::error!(target: "platform", "start-up failed: {err}");
            self.fatal = Some(err);
            event_loop.exit();
            return;
        }
        self.start_ticker();
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: UserEvent) {
        match event {
            UserEvent::Tick => {
                if let Some(window) = self.window.as_ref() {
                    window.request_redraw();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let (Some(window), Some(state)) = (self.window.as_ref(), self.egui_state.as_mut()) {
            let _response = state.on_window_event(window, &event);
        }
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }
}
