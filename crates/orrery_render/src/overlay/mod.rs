//! 2D overlay drawn on top of the scene: UI rectangles and text
//!
//! The overlay pass loads the scene's color output and has no depth
//! attachment, so it always lands in front.

mod rect_pipeline;
mod text;

pub use rect_pipeline::{RectInstance, RectPipeline, MAX_RECTS};
pub use text::{TextItem, TextOverlay};

/// Rectangles and text for one frame
pub struct Overlay {
    rects: RectPipeline,
    text: TextOverlay,
}

impl Overlay {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, format: wgpu::TextureFormat) -> Self {
        Self {
            rects: RectPipeline::new(device, format),
            text: TextOverlay::new(device, queue, format),
        }
    }

    /// Upload this frame's rectangles and text
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        size: (u32, u32),
        rects: &[RectInstance],
        text: &[TextItem],
    ) {
        let (width, height) = size;
        self.rects.prepare(queue, rects, width as f32, height as f32);
        self.text.prepare(device, queue, width, height, text);
    }

    /// Draw rectangles, then text, over the existing color target
    pub fn render(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Overlay Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        self.rects.render(&mut pass);
        self.text.render(&mut pass);
    }

    /// Release glyph atlas space after presenting
    pub fn end_frame(&mut self) {
        self.text.trim();
    }
}
