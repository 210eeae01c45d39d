//! Screen-space text via glyphon

use glyphon::{
    Attrs, Buffer, Cache, Color, Family, FontSystem, Metrics, Resolution, Shaping, SwashCache,
    TextArea, TextAtlas, TextBounds, TextRenderer, Viewport,
};

/// One block of text to draw this frame
#[derive(Clone, Debug, PartialEq)]
pub struct TextItem {
    pub text: String,
    /// Top-left corner in window pixels
    pub left: f32,
    pub top: f32,
    /// Wrap width in pixels
    pub width: f32,
    pub font_size: f32,
    pub color: [u8; 4],
}

impl TextItem {
    pub fn new(text: impl Into<String>, left: f32, top: f32, width: f32, font_size: f32) -> Self {
        Self {
            text: text.into(),
            left,
            top,
            width,
            font_size,
            color: [255, 255, 255, 255],
        }
    }

    /// Builder: set the text color
    pub fn with_color(mut self, color: [u8; 4]) -> Self {
        self.color = color;
        self
    }

    /// Whether a buffer shaped for `self` at `shaped_height` must be rebuilt
    /// to display `other` in a viewport `height` pixels tall
    fn needs_reshape(&self, shaped_height: f32, other: &TextItem, height: f32) -> bool {
        self.text != other.text
            || self.width != other.width
            || self.font_size != other.font_size
            || shaped_height != height
    }
}

/// A shaped buffer and what it was shaped for
struct Slot {
    item: TextItem,
    height: f32,
    buffer: Buffer,
}

/// Line height as a multiple of the font size
const LINE_HEIGHT: f32 = 1.3;

/// Glyphon state plus one shaped buffer per text slot
pub struct TextOverlay {
    font_system: FontSystem,
    swash_cache: SwashCache,
    atlas: TextAtlas,
    viewport: Viewport,
    renderer: TextRenderer,
    slots: Vec<Slot>,
}

impl TextOverlay {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, format: wgpu::TextureFormat) -> Self {
        let font_system = FontSystem::new();
        let swash_cache = SwashCache::new();
        let cache = Cache::new(device);
        let mut atlas = TextAtlas::new(device, queue, &cache, format);
        let viewport = Viewport::new(device, &cache);
        let renderer = TextRenderer::new(&mut atlas, device, wgpu::MultisampleState::default(), None);

        Self {
            font_system,
            swash_cache,
            atlas,
            viewport,
            renderer,
            slots: Vec::new(),
        }
    }

    fn shape(font_system: &mut FontSystem, buffer: &mut Buffer, item: &TextItem, height: f32) {
        buffer.set_metrics(font_system, Metrics::new(item.font_size, item.font_size * LINE_HEIGHT));
        buffer.set_size(font_system, Some(item.width.max(1.0)), Some(height));
        buffer.set_text(font_system, &item.text, Attrs::new().family(Family::SansSerif), Shaping::Advanced);
        buffer.shape_until_scroll(font_system, false);
    }

    /// Shape changed items and upload glyphs for this frame
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        width: u32,
        height: u32,
        items: &[TextItem],
    ) {
        self.viewport.update(queue, Resolution { width, height });
        let max_height = height as f32;

        self.slots.truncate(items.len());
        for (i, item) in items.iter().enumerate() {
            match self.slots.get_mut(i) {
                Some(slot) => {
                    if slot.item.needs_reshape(slot.height, item, max_height) {
                        Self::shape(&mut self.font_system, &mut slot.buffer, item, max_height);
                        slot.height = max_height;
                    }
                    slot.item = item.clone();
                }
                None => {
                    let metrics = Metrics::new(item.font_size, item.font_size * LINE_HEIGHT);
                    let mut buffer = Buffer::new(&mut self.font_system, metrics);
                    Self::shape(&mut self.font_system, &mut buffer, item, max_height);
                    self.slots.push(Slot { item: item.clone(), height: max_height, buffer });
                }
            }
        }

        let bounds = TextBounds {
            left: 0,
            top: 0,
            right: width as i32,
            bottom: height as i32,
        };
        let areas = self.slots.iter().map(|slot| {
            let [r, g, b, a] = slot.item.color;
            TextArea {
                buffer: &slot.buffer,
                left: slot.item.left,
                top: slot.item.top,
                scale: 1.0,
                bounds,
                default_color: Color::rgba(r, g, b, a),
                custom_glyphs: &[],
            }
        });

        if let Err(e) = self.renderer.prepare(
            device,
            queue,
            &mut self.font_system,
            &mut self.atlas,
            &self.viewport,
            areas,
            &mut self.swash_cache,
        ) {
            log::warn!("Text prepare failed: {:?}", e);
        }
    }

    /// Draw prepared text into an open pass
    pub fn render(&self, pass: &mut wgpu::RenderPass<'_>) {
        if let Err(e) = self.renderer.render(&self.atlas, &self.viewport, pass) {
            log::warn!("Text render failed: {:?}", e);
        }
    }

    /// Drop unused glyphs from the atlas
    pub fn trim(&mut self) {
        self.atlas.trim();
    }
}
