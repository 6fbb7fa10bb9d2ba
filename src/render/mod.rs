use std::path::Path;

use kurbo::{Affine, Point, Shape, Stroke};
use log::debug;
use parley::{Alignment, FontWeight, PositionedLayoutItem, StyleProperty};
use peniko::{Brush, BrushRef, Color, Fill};
use vello::{
  Renderer, Scene,
  wgpu::{self, TextureDescriptor},
};

use crate::{Figure, error::Result};

pub(crate) mod window;

pub(crate) struct Render {
  pub(crate) scene:      Scene,
  pub(crate) background: Color,
  font:   parley::FontContext,
  layout: parley::LayoutContext<Brush>,
}

#[derive(Clone, Copy)]
pub(crate) struct RenderConfig {
  pub width:  u32,
  pub height: u32,
}

pub(crate) struct GpuHandle {
  pub device:  wgpu::Device,
  pub queue:   wgpu::Queue,
  pub texture: wgpu::Texture,
  pub view:    wgpu::TextureView,
}

#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Align {
  #[default]
  Start,
  Center,
  End,
}

pub(crate) struct DrawText<'a> {
  pub text:             &'a str,
  pub size:             f32,
  pub weight:           FontWeight,
  pub brush:            Brush,
  pub position:         Point,
  pub horizontal_align: Align,
  pub vertical_align:   Align,
}

impl Default for DrawText<'_> {
  fn default() -> Self {
    DrawText {
      text:             "",
      size:             16.0,
      weight:           FontWeight::NORMAL,
      brush:            Brush::Solid(Color::BLACK),
      position:         Point::ZERO,
      horizontal_align: Align::Start,
      vertical_align:   Align::Start,
    }
  }
}

impl Align {
  fn factor(self) -> f64 {
    match self {
      Align::Start => 0.0,
      Align::Center => 0.5,
      Align::End => 1.0,
    }
  }
}

impl Render {
  pub fn new() -> Self {
    Render {
      scene:      Scene::new(),
      background: Color::WHITE,
      font:       parley::FontContext::new(),
      layout:     parley::LayoutContext::new(),
    }
  }

  pub fn fill<'b>(
    &mut self,
    shape: &impl Shape,
    transform: Affine,
    brush: impl Into<BrushRef<'b>>,
  ) {
    self.scene.fill(Fill::NonZero, transform, brush, None, shape);
  }

  pub fn stroke<'b>(
    &mut self,
    shape: &impl Shape,
    transform: Affine,
    brush: impl Into<BrushRef<'b>>,
    stroke: &Stroke,
  ) {
    self.scene.stroke(stroke, transform, brush, None, shape);
  }

  pub fn draw_text(&mut self, text: DrawText<'_>) {
    if text.text.is_empty() {
      return;
    }

    let mut builder = self.layout.ranged_builder(&mut self.font, text.text, 1.0, true);
    builder.push_default(StyleProperty::FontSize(text.size));
    builder.push_default(StyleProperty::FontWeight(text.weight));
    builder.push_default(StyleProperty::Brush(text.brush.clone()));

    let mut layout = builder.build(text.text);
    layout.break_all_lines(None);
    layout.align(None, Alignment::Start, Default::default());

    let origin = Point::new(
      text.position.x - f64::from(layout.width()) * text.horizontal_align.factor(),
      text.position.y - f64::from(layout.height()) * text.vertical_align.factor(),
    );

    for line in layout.lines() {
      for item in line.items() {
        let PositionedLayoutItem::GlyphRun(glyph_run) = item else { continue };

        let run = glyph_run.run();
        let mut x = origin.x as f32 + glyph_run.offset();
        let baseline = origin.y as f32 + glyph_run.baseline();

        self
          .scene
          .draw_glyphs(run.font())
          .brush(&glyph_run.style().brush)
          .hint(true)
          .transform(Affine::IDENTITY)
          .glyph_transform(
            run
              .synthesis()
              .skew()
              .map(|angle| Affine::skew(f64::from(angle.to_radians().tan()), 0.0)),
          )
          .font_size(run.font_size())
          .normalized_coords(run.normalized_coords())
          .draw(
            Fill::NonZero,
            glyph_run.glyphs().map(|glyph| {
              let gx = x + glyph.x;
              let gy = baseline + glyph.y;
              x += glyph.advance;
              vello::Glyph { id: glyph.id.into(), x: gx, y: gy }
            }),
          );
      }
    }
  }
}

impl GpuHandle {
  pub fn new(config: &RenderConfig, adapter: Option<wgpu::Adapter>) -> Self {
    let adapter = adapter.unwrap_or_else(|| {
      let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
      pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions::default()))
        .expect("Failed to create adapter")
    });

    let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
      label:             None,
      required_features: wgpu::Features::empty(),
      required_limits:   wgpu::Limits::defaults(),
      memory_hints:      wgpu::MemoryHints::MemoryUsage,
      trace:             wgpu::Trace::Off,
    }))
    .expect("Failed to create device");

    let texture = device.create_texture(&TextureDescriptor {
      label:           Some("Render Texture"),
      size:            config.extent_3d(),
      mip_level_count: 1,
      sample_count:    1,
      dimension:       wgpu::TextureDimension::D2,
      format:          wgpu::TextureFormat::Rgba8Unorm,
      usage:           wgpu::TextureUsages::STORAGE_BINDING | wgpu::TextureUsages::COPY_SRC,
      view_formats:    &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    GpuHandle { device, queue, texture, view }
  }
}

impl RenderConfig {
  pub fn extent_3d(&self) -> wgpu::Extent3d {
    wgpu::Extent3d {
      width:                 self.width,
      height:                self.height,
      depth_or_array_layers: 1,
    }
  }
}

pub(crate) fn save(figure: &Figure, path: &Path) -> Result<()> {
  let config = figure.render_config();
  debug!("rendering {}x{} figure to {}", config.width, config.height, path.display());

  let handle = GpuHandle::new(&config, None);
  let mut render = Render::new();
  figure.draw(&mut render);

  let mut renderer = Renderer::new(&handle.device, vello::RendererOptions::default())
    .expect("Failed to create renderer");
  renderer
    .render_to_texture(
      &handle.device,
      &handle.queue,
      &render.scene,
      &handle.view,
      &vello::RenderParams {
        base_color:          render.background,
        width:               config.width,
        height:              config.height,
        antialiasing_method: vello::AaConfig::Msaa16,
      },
    )
    .expect("Failed to render to a texture");

  // Copies out of a texture need a 256-byte row pitch; pad, then strip below.
  let row_bytes = 4 * config.width;
  let padded_row_bytes = row_bytes.next_multiple_of(256);

  let buffer = handle.device.create_buffer(&wgpu::BufferDescriptor {
    label:              Some("Output Buffer"),
    size:               u64::from(padded_row_bytes) * u64::from(config.height),
    usage:              wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
    mapped_at_creation: false,
  });

  let mut encoder = handle.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
    label: Some("texture_buffer_copy_encoder"),
  });
  encoder.copy_texture_to_buffer(
    wgpu::TexelCopyTextureInfo {
      texture:   &handle.texture,
      mip_level: 0,
      origin:    wgpu::Origin3d::ZERO,
      aspect:    wgpu::TextureAspect::All,
    },
    wgpu::TexelCopyBufferInfo {
      buffer: &buffer,
      layout: wgpu::TexelCopyBufferLayout {
        offset:         0,
        bytes_per_row:  Some(padded_row_bytes),
        rows_per_image: Some(config.height),
      },
    },
    config.extent_3d(),
  );
  handle.queue.submit(std::iter::once(encoder.finish()));

  let slice = buffer.slice(..);
  slice.map_async(wgpu::MapMode::Read, |result| result.expect("Failed to map output buffer"));
  let _ = handle.device.poll(wgpu::PollType::Wait);

  let data = buffer.slice(..).get_mapped_range();
  let pixels = data
    .chunks(padded_row_bytes as usize)
    .flat_map(|row| &row[..row_bytes as usize])
    .copied()
    .collect::<Vec<u8>>();

  use image::{ImageBuffer, Rgba};
  let image = ImageBuffer::<Rgba<u8>, _>::from_raw(config.width, config.height, pixels)
    .expect("pixel buffer matches texture dimensions");
  image.save(path)?;

  Ok(())
}
