use vello::wgpu;

use crate::{
  Figure,
  render::{GpuHandle, Render},
};

/// Opens a window showing `figure` and blocks until it is closed with the
/// close button or `q`.
pub(crate) fn show(figure: &Figure) {
  let event_loop = winit::event_loop::EventLoop::new().unwrap();
  event_loop.set_control_flow(winit::event_loop::ControlFlow::Wait);

  let mut viewer = Viewer { figure, render: None, gpu: None };
  event_loop.run_app(&mut viewer).unwrap();

  // FIXME: dropping the surface after the event loop exits segfaults on some
  // drivers; leak it instead.
  std::mem::forget(viewer);
}

struct Viewer<'a> {
  figure: &'a Figure,
  render: Option<Render>,
  gpu:    Option<Gpu>,
}

struct Gpu {
  surface: wgpu::Surface<'static>,
  config:  wgpu::SurfaceConfiguration,
  handle:  GpuHandle,

  blit:  wgpu::util::TextureBlitter,
  vello: vello::Renderer,
}

impl winit::application::ApplicationHandler for Viewer<'_> {
  fn resumed(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
    if self.gpu.is_some() {
      return;
    }

    let config = self.figure.render_config();
    let window = event_loop
      .create_window(
        winit::window::Window::default_attributes()
          .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height))
          .with_min_inner_size(winit::dpi::LogicalSize::new(100, 100)),
      )
      .unwrap();
    let size = window.inner_size();

    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
    let surface = instance.create_surface(window).unwrap();

    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
      compatible_surface: Some(&surface),
      ..Default::default()
    }))
    .expect("Failed to create adapter");

    let surface_caps = surface.get_capabilities(&adapter);
    let surface_format =
      surface_caps.formats.iter().copied().find(|f| f.is_srgb()).unwrap_or(surface_caps.formats[0]);

    let handle = GpuHandle::new(&config, Some(adapter));

    let surface_config = wgpu::SurfaceConfiguration {
      usage:                         wgpu::TextureUsages::RENDER_ATTACHMENT
        | wgpu::TextureUsages::COPY_DST,
      format:                        surface_format,
      width:                         size.width.max(1),
      height:                        size.height.max(1),
      present_mode:                  wgpu::PresentMode::AutoNoVsync,
      alpha_mode:                    surface_caps.alpha_modes[0],
      view_formats:                  vec![],
      desired_maximum_frame_latency: 2,
    };
    surface.configure(&handle.device, &surface_config);

    let vello = vello::Renderer::new(&handle.device, vello::RendererOptions::default())
      .expect("Failed to create renderer");
    let blit = wgpu::util::TextureBlitter::new(&handle.device, surface_config.format);

    self.gpu = Some(Gpu { surface, config: surface_config, handle, blit, vello });
  }

  fn window_event(
    &mut self,
    event_loop: &winit::event_loop::ActiveEventLoop,
    _: winit::window::WindowId,
    event: winit::event::WindowEvent,
  ) {
    match event {
      winit::event::WindowEvent::CloseRequested => {
        event_loop.exit();
      }

      winit::event::WindowEvent::KeyboardInput {
        event: winit::event::KeyEvent { logical_key: winit::keyboard::Key::Character(c), .. },
        ..
      } if c == "q" => {
        event_loop.exit();
      }

      winit::event::WindowEvent::Resized(new_size) => {
        // The scene texture keeps the figure's size; the blit scales it to
        // whatever the surface becomes.
        if let Some(gpu) = &mut self.gpu {
          if new_size.width > 0 && new_size.height > 0 {
            gpu.config.width = new_size.width;
            gpu.config.height = new_size.height;
            gpu.surface.configure(&gpu.handle.device, &gpu.config);
          }
        }
      }

      winit::event::WindowEvent::RedrawRequested => {
        if let Some(gpu) = &mut self.gpu {
          if self.render.is_none() {
            let mut render = Render::new();
            self.figure.draw(&mut render);

            let config = self.figure.render_config();
            gpu
              .vello
              .render_to_texture(
                &gpu.handle.device,
                &gpu.handle.queue,
                &render.scene,
                &gpu.handle.view,
                &vello::RenderParams {
                  base_color:          render.background,
                  width:               config.width,
                  height:              config.height,
                  antialiasing_method: vello::AaConfig::Msaa16,
                },
              )
              .expect("Failed to render to a texture");

            self.render = Some(render);
          }
          gpu.redraw();
        }
      }

      _ => (),
    }
  }
}

impl Gpu {
  fn redraw(&mut self) {
    let frame = match self.surface.get_current_texture() {
      Ok(frame) => frame,
      Err(wgpu::SurfaceError::Lost) => {
        self.surface.configure(&self.handle.device, &self.config);
        return;
      }
      Err(e) => {
        log::warn!("dropped frame: {e:?}");
        return;
      }
    };

    let surface_view = &frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

    let mut encoder = self
      .handle
      .device
      .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("Render Encoder") });

    self.blit.copy(&self.handle.device, &mut encoder, &self.handle.view, surface_view);

    self.handle.queue.submit(std::iter::once(encoder.finish()));

    frame.present();
  }
}
