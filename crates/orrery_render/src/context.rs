//! WGPU device, queue, and surface management

use std::sync::Arc;
use winit::dpi::PhysicalSize;
use winit::window::Window;

/// Failure while bringing up the GPU
#[derive(Debug)]
pub enum ContextError {
    /// The window could not back a surface
    Surface(String),
    /// No adapter can present to the surface
    AdapterNotFound,
    /// The adapter refused to create a device
    Device(String),
}

impl std::fmt::Display for ContextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContextError::Surface(msg) => write!(f, "Surface creation failed: {}", msg),
            ContextError::AdapterNotFound => write!(f, "No suitable GPU adapter found"),
            ContextError::Device(msg) => write!(f, "Device request failed: {}", msg),
        }
    }
}

impl std::error::Error for ContextError {}

/// GPU handles plus the configured window surface
pub struct RenderContext {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize<u32>,
}

impl RenderContext {
    /// Create a context, choosing the present mode from `vsync`
    pub async fn new(window: Arc<Window>, vsync: bool) -> Result<Self, ContextError> {
        let inner = window.inner_size();
        let size = PhysicalSize::new(inner.width.max(1), inner.height.max(1));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window)
            .map_err(|e| ContextError::Surface(e.to_string()))?;

        let hardware = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await;
        let adapter = match hardware {
            Some(adapter) => adapter,
            None => {
                log::warn!("No hardware GPU adapter, trying software fallback");
                instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::LowPower,
                        force_fallback_adapter: true,
                        compatible_surface: Some(&surface),
                    })
                    .await
                    .ok_or(ContextError::AdapterNotFound)?
            }
        };

        let info = adapter.get_info();
        log::info!("GPU adapter: {} ({:?}, {:?})", info.name, info.device_type, info.backend);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Orrery Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await
            .map_err(|e| ContextError::Device(e.to_string()))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .unwrap_or(wgpu::TextureFormat::Bgra8UnormSrgb);

        let present_mode = if vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode,
            desired_maximum_frame_latency: 2,
            alpha_mode: caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
        };
        surface.configure(&device, &config);
        log::info!("Surface format: {:?}, present mode: {:?}", format, present_mode);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
        })
    }

    /// Reconfigure the surface for a new window size
    ///
    /// Zero-sized requests (minimized window) are ignored.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Reconfigure with the current size (after a lost surface)
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }
}
