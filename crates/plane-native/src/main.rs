use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::{Window, WindowBuilder},
};

use glam::Vec2;
use plane_core::{
    ElementBounds, FrameHost, FrameLoop, FrameOutcome, LoopState, Sketch, SketchConfig, TextureData,
    ViewportPixelSize,
};
use plane_gpu::GpuState;

#[derive(Debug, Default, PartialEq)]
struct Args {
    image: Option<PathBuf>,
    cube: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Args {
    let mut out = Args::default();
    for arg in args {
        match arg.as_str() {
            "--cube" => out.cube = true,
            s if s.starts_with("--") => log::warn!("ignoring unknown flag {s}"),
            _ => out.image = Some(PathBuf::from(arg)),
        }
    }
    out
}

fn viewport_of(window: &Window) -> ViewportPixelSize {
    let size = window.inner_size();
    ViewportPixelSize::new(size.width as f32, size.height as f32)
}

/// The window plays the tracked element: the plane fills the frustum.
struct NativeHost {
    window: Arc<Window>,
    sketch: Sketch,
    gpu: GpuState,
    last_frame: Instant,
}

impl FrameHost for NativeHost {
    fn apply_resize(&mut self, viewport: ViewportPixelSize) {
        self.gpu.resize(viewport.width as u32, viewport.height as u32);
        self.sketch.resize(viewport, ElementBounds::from(viewport));
    }

    // bounds are the window itself, which only changes through a resize
    fn refresh_bounds(&mut self) {}

    fn render_frame(&mut self) -> FrameOutcome {
        let now = Instant::now();
        let dt = now - self.last_frame;
        self.last_frame = now;
        self.sketch.advance(dt.as_secs_f32());
        match self.gpu.render(&self.sketch) {
            Ok(()) => FrameOutcome::Rendered,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = self.window.inner_size();
                self.gpu.resize(size.width, size.height);
                self.gpu.reconfigure();
                FrameOutcome::Skipped
            }
            Err(wgpu::SurfaceError::OutOfMemory) => FrameOutcome::Fatal,
            Err(e) => {
                log::warn!("[native] frame skipped: {e}");
                FrameOutcome::Skipped
            }
        }
    }

    fn teardown(&mut self) {
        log::info!("[native] teardown");
    }
}

fn load_image(path: &PathBuf) -> anyhow::Result<TextureData> {
    let bytes = std::fs::read(path)?;
    Ok(TextureData::decode(&bytes)?)
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = parse_args(std::env::args().skip(1));
    let config = SketchConfig {
        with_cube: args.cube,
        ..SketchConfig::default()
    };

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Media Plane (native)")
            .build(&event_loop)?,
    );

    let viewport = viewport_of(&window);
    let mut sketch = Sketch::new(config, viewport, ElementBounds::from(viewport))?;
    sketch.on_scale(|s| log::info!("[native] mesh scale ({:.3}, {:.3})", s.x, s.y));
    sketch.on_uv(|uv| log::debug!("[native] uv ({:.3}, {:.3})", uv.x, uv.y));

    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(window.clone())?;
    let size = window.inner_size();
    let mut gpu = pollster::block_on(GpuState::new(&instance, surface, size.width, size.height, &sketch))?;

    if let Some(path) = &args.image {
        match load_image(path) {
            Ok(tex) => {
                sketch.set_image_resolution(tex.width, tex.height);
                gpu.set_media_texture(&tex);
            }
            Err(e) => log::warn!("[native] could not load {}: {e}", path.display()),
        }
    }

    let mut host = NativeHost {
        window: window.clone(),
        sketch,
        gpu,
        last_frame: Instant::now(),
    };
    let mut frame_loop = FrameLoop::new();
    let mut dragging = false;
    let mut last_cursor: Option<Vec2> = None;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => {
                frame_loop.request_resize(ViewportPixelSize::new(size.width as f32, size.height as f32));
            }
            WindowEvent::CloseRequested => frame_loop.stop(),
            WindowEvent::CursorMoved { position, .. } => {
                let pos = Vec2::new(position.x as f32, position.y as f32);
                if dragging {
                    if let Some(prev) = last_cursor {
                        let d = pos - prev;
                        host.sketch.orbit_drag(d.x, d.y);
                    }
                }
                last_cursor = Some(pos);
                host.sketch.pointer_move(pos);
            }
            WindowEvent::CursorLeft { .. } => last_cursor = None,
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => dragging = state == ElementState::Pressed,
            WindowEvent::MouseWheel { delta, .. } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32,
                };
                // winit reports scroll-up as positive; that zooms in
                host.sketch.dolly(-dy);
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                match event.logical_key {
                    Key::Named(NamedKey::Escape) => frame_loop.stop(),
                    Key::Character(ref c) if c.as_str().eq_ignore_ascii_case("r") => host.sketch.reset_view(),
                    _ => {}
                }
            }
            _ => {}
        },
        Event::AboutToWait => match frame_loop.step(&mut host) {
            LoopState::Running => host.window.request_redraw(),
            LoopState::Stopped => elwt.exit(),
        },
        _ => {}
    })?;
    Ok(())
}
