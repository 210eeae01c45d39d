//! Screen-space layout for the buttons, the info panel, and the body label
//!
//! All positions are window pixels with the origin at the top-left. The
//! layout is recomputed whenever the window is resized.

use orrery_math::{project_to_screen, Mat4, Vec3};
use orrery_render::overlay::{RectInstance, TextItem};

use crate::config::PanelConfig;

const MARGIN: f32 = 16.0;
const GAP: f32 = 8.0;
const BUTTON_WIDTH: f32 = 170.0;
const BUTTON_HEIGHT: f32 = 36.0;
const PANEL_WIDTH: f32 = 320.0;
const PANEL_HEIGHT: f32 = 150.0;
const PADDING: f32 = 10.0;
/// Label offset from the projected point, so it sits beside the body
const LABEL_OFFSET: f32 = 12.0;

const BUTTON_COLOR: [f32; 4] = [0.08, 0.09, 0.14, 0.85];
const BUTTON_HOVER_COLOR: [f32; 4] = [0.16, 0.18, 0.28, 0.9];
const BUTTON_ACTIVE_COLOR: [f32; 4] = [0.55, 0.5, 0.08, 0.9];
const PANEL_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 0.6];
const TEXT_COLOR: [u8; 4] = [235, 235, 235, 255];
const LABEL_FOCUS_COLOR: [u8; 4] = [255, 255, 0, 255];

/// An axis-aligned rectangle in window pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns true if the point is inside the rectangle
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    fn to_instance(self, color: [f32; 4]) -> RectInstance {
        RectInstance::new(self.x, self.y, self.width, self.height, color)
    }
}

/// The clickable controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiButton {
    Highlight,
    Music,
}

/// What the overlay shows this frame
#[derive(Debug, Clone, Copy)]
pub struct UiState<'a> {
    pub panel_text: &'a str,
    pub highlighted: bool,
    pub music_playing: bool,
    pub paused: bool,
    pub hovered: Option<UiButton>,
    /// Window position of the labelled body, if it is on screen
    pub label_at: Option<(f32, f32)>,
}

/// Button and panel rectangles for the current window size
#[derive(Debug, Clone, PartialEq)]
pub struct UiLayout {
    width: f32,
    height: f32,
    highlight_button: Rect,
    music_button: Rect,
    panel: Rect,
}

impl UiLayout {
    pub fn new(width: u32, height: u32) -> Self {
        let mut layout = Self {
            width: 0.0,
            height: 0.0,
            highlight_button: Rect::default(),
            music_button: Rect::default(),
            panel: Rect::default(),
        };
        layout.resize(width, height);
        layout
    }

    /// Recompute rectangles for a new window size
    ///
    /// Buttons sit top-left and the panel top-right; when the window is too
    /// narrow for both on one row, the panel drops below the buttons.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width as f32;
        self.height = height as f32;

        self.highlight_button = Rect::new(MARGIN, MARGIN, BUTTON_WIDTH, BUTTON_HEIGHT);
        self.music_button = Rect::new(
            self.highlight_button.right() + GAP,
            MARGIN,
            BUTTON_WIDTH,
            BUTTON_HEIGHT,
        );

        let panel_width = PANEL_WIDTH.min((self.width - 2.0 * MARGIN).max(0.0));
        let mut panel = Rect::new(
            (self.width - MARGIN - panel_width).max(MARGIN),
            MARGIN,
            panel_width,
            PANEL_HEIGHT,
        );
        if panel.intersects(&self.music_button) {
            panel.x = MARGIN;
            panel.y = self.music_button.bottom() + GAP;
        }
        self.panel = panel;
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn button_rect(&self, button: UiButton) -> Rect {
        match button {
            UiButton::Highlight => self.highlight_button,
            UiButton::Music => self.music_button,
        }
    }

    pub fn panel_rect(&self) -> Rect {
        self.panel
    }

    /// Which button, if any, is under the cursor
    pub fn hit_test(&self, x: f32, y: f32) -> Option<UiButton> {
        [UiButton::Highlight, UiButton::Music]
            .into_iter()
            .find(|b| self.button_rect(*b).contains(x, y))
    }

    /// Whether the point is over any part of the overlay
    pub fn covers(&self, x: f32, y: f32) -> bool {
        self.hit_test(x, y).is_some() || self.panel.contains(x, y)
    }

    /// Where to draw the label for a body at `world`
    ///
    /// Returns `None` when the body is behind the camera or outside the
    /// depth range.
    pub fn earth_label(&self, world: Vec3, view_proj: Mat4) -> Option<(f32, f32)> {
        let p = project_to_screen(world, view_proj, self.width, self.height);
        p.visible.then_some((p.x, p.y))
    }

    /// Rectangles and text for one frame
    pub fn build(&self, panel: &PanelConfig, state: &UiState<'_>) -> (Vec<RectInstance>, Vec<TextItem>) {
        let button_color = |button: UiButton, active: bool| {
            if active {
                BUTTON_ACTIVE_COLOR
            } else if state.hovered == Some(button) {
                BUTTON_HOVER_COLOR
            } else {
                BUTTON_COLOR
            }
        };

        let rects = vec![
            self.highlight_button
                .to_instance(button_color(UiButton::Highlight, state.highlighted)),
            self.music_button
                .to_instance(button_color(UiButton::Music, state.music_playing)),
            self.panel.to_instance(PANEL_COLOR),
        ];

        let music_label = format!(
            "{}: {}",
            panel.music_button,
            if state.music_playing { "on" } else { "off" }
        );
        let mut text = vec![
            self.button_text(self.highlight_button, &panel.highlight_button, panel.font_size),
            self.button_text(self.music_button, &music_label, panel.font_size),
            TextItem::new(
                state.panel_text,
                self.panel.x + PADDING,
                self.panel.y + PADDING,
                self.panel.width - 2.0 * PADDING,
                panel.font_size,
            )
            .with_color(TEXT_COLOR),
        ];

        if state.paused {
            text.push(
                TextItem::new("Paused", MARGIN, self.height - MARGIN - panel.font_size * 1.5, 200.0, panel.font_size)
                    .with_color(TEXT_COLOR),
            );
        }

        if panel.show_label {
            if let Some((x, y)) = state.label_at {
                let color = if state.highlighted { LABEL_FOCUS_COLOR } else { TEXT_COLOR };
                text.push(
                    TextItem::new(&panel.label_text, x + LABEL_OFFSET, y - LABEL_OFFSET, 200.0, panel.label_font_size)
                        .with_color(color),
                );
            }
        }

        (rects, text)
    }

    fn button_text(&self, rect: Rect, label: &str, font_size: f32) -> TextItem {
        let top = rect.y + (rect.height - font_size * 1.3) * 0.5;
        TextItem::new(label, rect.x + PADDING, top, rect.width - 2.0 * PADDING, font_size)
            .with_color(TEXT_COLOR)
    }
}
