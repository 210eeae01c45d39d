//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - Scene objects built from the solar system's mesh nodes
//! - The 2D overlay on top
//! - Frame rendering

use std::sync::Arc;
use winit::window::Window;
use orrery_core::{NodeKey, SolarSystem};
use orrery_render::{
    camera::PerspectiveCamera,
    context::{ContextError, RenderContext},
    mesh::MeshData,
    overlay::{Overlay, RectInstance, TextItem},
    pipeline::{FrameUniforms, ObjectUniforms, SceneObject, ScenePipeline},
    texture::TextureCache,
};
use crate::config::SceneConfig;

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// GPU setup failed
    Init(ContextError),
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Init(e) => write!(f, "Renderer initialization failed: {}", e),
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Init(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ContextError> for RenderError {
    fn from(e: ContextError) -> Self {
        RenderError::Init(e)
    }
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    scene_pipeline: ScenePipeline,
    overlay: Overlay,
    textures: TextureCache,
    /// Graph node each object draws, parallel to `objects`
    object_nodes: Vec<NodeKey>,
    objects: Vec<SceneObject>,
    objects_stale: bool,
    clear_color: wgpu::Color,
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(window: Arc<Window>, scene_config: &SceneConfig, vsync: bool) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::new(window, vsync))?;

        let mut scene_pipeline = ScenePipeline::new(&context.device, context.config.format);
        scene_pipeline.ensure_depth_texture(
            &context.device,
            context.size.width,
            context.size.height,
        );

        let overlay = Overlay::new(&context.device, &context.queue, context.config.format);
        let textures = TextureCache::new(&context.device, &context.queue, &scene_config.texture_dir);

        let bg = scene_config.background_color;
        Ok(Self {
            context,
            scene_pipeline,
            overlay,
            textures,
            object_nodes: Vec::new(),
            objects: Vec::new(),
            objects_stale: true,
            clear_color: wgpu::Color {
                r: bg[0] as f64,
                g: bg[1] as f64,
                b: bg[2] as f64,
                a: bg[3] as f64,
            },
        })
    }

    /// Build one GPU object per mesh node, replacing any previous ones
    pub fn upload_system(&mut self, system: &SolarSystem) {
        self.object_nodes.clear();
        self.objects.clear();

        let mut triangles = 0;
        for (key, node) in system.graph().meshes() {
            let (Some(shape), Some(material)) = (node.mesh(), node.material()) else {
                continue;
            };
            let data = MeshData::from_shape(shape);
            triangles += data.triangle_count();
            let texture = self.textures.get_or_load(
                &self.context.device,
                &self.context.queue,
                material.texture.as_deref(),
            );
            let object = self.scene_pipeline.create_object(
                &self.context.device,
                &data,
                &texture,
                material.side,
                &node.name,
            );
            self.object_nodes.push(key);
            self.objects.push(object);
        }
        self.objects_stale = true;

        log::info!(
            "Uploaded {} objects ({} triangles, {} textures)",
            self.objects.len(),
            triangles,
            self.textures.len()
        );
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        self.scene_pipeline.ensure_depth_texture(&self.context.device, width, height);
    }

    /// Reconfigure the surface at its current size after a loss
    pub fn recover_surface(&mut self) {
        self.context.reconfigure();
    }

    /// Render a single frame: the scene, then the overlay
    pub fn render_frame(
        &mut self,
        system: &SolarSystem,
        camera: &PerspectiveCamera,
        rects: &[RectInstance],
        text: &[TextItem],
    ) -> Result<(), RenderError> {
        let queue = &self.context.queue;

        if self.objects_stale || system.graph().any_dirty() {
            let graph = system.graph();
            for (key, object) in self.object_nodes.iter().zip(&self.objects) {
                let Some(material) = graph.get(*key).and_then(|n| n.material()) else {
                    continue;
                };
                let uniforms = ObjectUniforms::new(graph.world_matrix(*key), material);
                self.scene_pipeline.update_object(queue, object, &uniforms);
            }
            self.objects_stale = false;
        }

        let frame = FrameUniforms::new(camera.view_projection(), camera.eye, system.lighting());
        self.scene_pipeline.update_frame(queue, &frame);

        let size = self.size();
        self.overlay.prepare(&self.context.device, queue, size, rects, text);

        // Get surface texture
        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) => return Err(RenderError::SurfaceLost),
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.scene_pipeline
            .render(&mut encoder, &view, &self.objects, self.clear_color);
        self.overlay.render(&mut encoder, &view);

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        self.overlay.end_frame();

        Ok(())
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_render_error_display() {
        assert_eq!(format!("{}", RenderError::SurfaceLost), "Surface lost");
        assert_eq!(format!("{}", RenderError::OutOfMemory), "Out of memory");
        assert_eq!(
            format!("{}", RenderError::Other("test".to_string())),
            "Render error: test"
        );
    }

    #[test]
    fn test_init_error_keeps_source() {
        let err = RenderError::from(ContextError::AdapterNotFound);
        assert!(err.to_string().starts_with("Renderer initialization failed"));
        assert!(err.source().is_some());
    }
}
