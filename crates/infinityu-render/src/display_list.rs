//! Backend-neutral display list.
//!
//! `DisplayListRenderer` records a frame as an ordered list of draw
//! commands. A surface backend replays the list; tests inspect it directly.

use crate::renderer::{RenderContext, RenderResult, Renderer};
use infinityu_core::card::{CardId, CardKind, TextTone};
use infinityu_core::indicator::ZoomIndicator;
use kurbo::{Affine, Point, Rect, RoundedRect};
use peniko::Color;

/// Radius of a background grid dot, in world units.
pub const GRID_DOT_RADIUS: f64 = 1.2;

/// Frames needing more dots than this skip the grid.
pub const MAX_GRID_DOTS: usize = 250_000;

/// Stroke width of selection and focus outlines, in world units.
pub const OUTLINE_WIDTH: f64 = 2.0;

/// One drawing operation.
///
/// World-space commands are drawn through `DisplayList::world_transform`,
/// screen-space ones through `DisplayList::screen_transform`.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    /// Fill the whole surface.
    Clear { color: Color },
    /// Grid dot (world space).
    GridDot { center: Point, radius: f64, color: Color },
    /// Card body and its text (world space).
    Card {
        id: CardId,
        kind: CardKind,
        body: RoundedRect,
        fill: Color,
        text: String,
        text_rect: Rect,
        tone: TextTone,
        text_color: Color,
        /// Accent outline for selected or focused cards.
        outline: Option<Color>,
    },
    /// Marquee rectangle (world space).
    Marquee { rect: Rect, color: Color },
    /// Zoom percentage pill (screen space).
    ZoomIndicator {
        text: String,
        anchor: Point,
        opacity: f64,
        background: Color,
        color: Color,
    },
}

/// An ordered frame of draw commands.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    /// World to device pixels.
    pub world_transform: Affine,
    /// Logical screen to device pixels.
    pub screen_transform: Affine,
    pub commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }

    /// Number of grid dots in the frame.
    pub fn grid_dot_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::GridDot { .. }))
            .count()
    }

    /// Card ids in draw order.
    pub fn card_ids(&self) -> Vec<CardId> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Card { id, .. } => Some(*id),
                _ => None,
            })
            .collect()
    }
}

/// Renderer that records frames into a `DisplayList`.
#[derive(Debug, Default)]
pub struct DisplayListRenderer {
    list: DisplayList,
}

impl DisplayListRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last recorded frame.
    pub fn display_list(&self) -> &DisplayList {
        &self.list
    }

    /// Take the last recorded frame, leaving an empty one behind.
    pub fn take(&mut self) -> DisplayList {
        std::mem::take(&mut self.list)
    }

    /// Build a frame and return it.
    pub fn render(&mut self, ctx: &RenderContext) -> RenderResult<&DisplayList> {
        self.build_scene(ctx)?;
        Ok(&self.list)
    }

    fn render_grid(list: &mut DisplayList, ctx: &RenderContext) {
        let canvas = ctx.canvas;
        let grid_size = canvas.config().grid_size;
        let mut area = canvas.viewport.visible_world_rect(ctx.viewport_size);
        if let Some(bounds) = canvas.config().world_bounds {
            area = area.intersect(bounds);
        }
        if area.width() <= 0.0 || area.height() <= 0.0 {
            return;
        }

        let (i0, i1) = ((area.x0 / grid_size).ceil() as i64, (area.x1 / grid_size).floor() as i64);
        let (j0, j1) = ((area.y0 / grid_size).ceil() as i64, (area.y1 / grid_size).floor() as i64);
        if i1 < i0 || j1 < j0 {
            return;
        }
        let count = (i1 - i0 + 1) as usize * (j1 - j0 + 1) as usize;
        if count > MAX_GRID_DOTS {
            log::debug!("Skipping grid: {count} dots at zoom {}", canvas.viewport.zoom());
            return;
        }

        let color = ctx.theme.grid_dot;
        list.commands.reserve(count);
        for i in i0..=i1 {
            for j in j0..=j1 {
                list.commands.push(DrawCommand::GridDot {
                    center: Point::new(i as f64 * grid_size, j as f64 * grid_size),
                    radius: GRID_DOT_RADIUS,
                    color,
                });
            }
        }
    }

    fn render_cards(list: &mut DisplayList, ctx: &RenderContext) {
        let canvas = ctx.canvas;
        let config = canvas.config();
        let visible = canvas.viewport.visible_world_rect(ctx.viewport_size);
        let focused = canvas.focused_card();

        for card in canvas.cards.iter() {
            if card.bounds().intersect(visible).area() <= 0.0 {
                continue;
            }
            let highlighted = focused == Some(card.id()) || canvas.is_selected(card.id());
            list.commands.push(DrawCommand::Card {
                id: card.id(),
                kind: card.kind(),
                body: card.body(config.card_corner_radius),
                fill: ctx.theme.card,
                text: card.display_text().to_string(),
                text_rect: card.text_rect(config.card_text_inset),
                tone: card.tone(),
                text_color: ctx.theme.text_color(card.tone()),
                outline: highlighted.then_some(ctx.theme.accent),
            });
        }
    }

    fn render_indicator(list: &mut DisplayList, ctx: &RenderContext) {
        let indicator = ctx.canvas.indicator();
        let opacity = indicator.opacity(ctx.now);
        if opacity <= 0.0 {
            return;
        }
        list.commands.push(DrawCommand::ZoomIndicator {
            text: indicator.text().to_string(),
            anchor: ZoomIndicator::anchor(ctx.viewport_size),
            opacity,
            background: ctx.theme.indicator_background,
            color: ctx.theme.indicator_text,
        });
    }
}

impl Renderer for DisplayListRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        ctx.validate()?;

        let screen_transform = Affine::scale(ctx.scale_factor);
        let mut list = DisplayList {
            world_transform: screen_transform * ctx.canvas.viewport.transform(),
            screen_transform,
            commands: Vec::new(),
        };

        list.commands.push(DrawCommand::Clear {
            color: self.background_color(ctx),
        });
        Self::render_grid(&mut list, ctx);
        Self::render_cards(&mut list, ctx);
        if let Some(rect) = ctx.selection_rect {
            list.commands.push(DrawCommand::Marquee {
                rect,
                color: ctx.theme.accent.with_alpha(0.25),
            });
        }
        Self::render_indicator(&mut list, ctx);

        log::trace!("Built frame with {} commands", list.len());
        self.list = list;
        Ok(())
    }
}
