//! Where components go on the canvas.
//!
//! Inputs share a row along the top, outputs a row along the bottom, and the
//! controller sits centred between them. The strip under the bottom row is
//! left for the legend. All measures are fractions of the canvas size.

use crate::components::Component;

/// Title baseline from the top edge.
pub const TITLE_TOP: f64 = 0.03;
/// Gap between the top edge and the top row.
pub const ROW_MARGIN: f64 = 0.06;
/// Height of each component row.
pub const ROW_HEIGHT: f64 = 0.15;
/// Gap between a component row and the controller.
pub const CONTROLLER_GAP: f64 = 0.125;
/// Strip along the bottom edge reserved for the legend.
pub const LEGEND_BAND: f64 = 0.125;
/// Horizontal padding inside each slot, as a fraction of the slot width.
pub const SLOT_PADDING: f64 = 0.1;

/// A rectangle on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.bottom()
    }
}

/// Canvas regions for one diagram.
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
}

impl Layout {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn w(&self) -> f64 {
        self.width as f64
    }

    fn h(&self) -> f64 {
        self.height as f64
    }

    pub fn title_y(&self) -> f64 {
        TITLE_TOP * self.h()
    }

    pub fn top_row(&self) -> Frame {
        Frame {
            x: 0.0,
            y: ROW_MARGIN * self.h(),
            width: self.w(),
            height: ROW_HEIGHT * self.h(),
        }
    }

    pub fn bottom_row(&self) -> Frame {
        let height = ROW_HEIGHT * self.h();
        Frame {
            x: 0.0,
            y: self.legend().y - height,
            width: self.w(),
            height,
        }
    }

    pub fn controller_area(&self) -> Frame {
        let top = self.top_row().bottom() + CONTROLLER_GAP * self.h();
        let bottom = self.bottom_row().y - CONTROLLER_GAP * self.h();
        Frame {
            x: 0.0,
            y: top,
            width: self.w(),
            height: (bottom - top).max(1.0),
        }
    }

    pub fn legend(&self) -> Frame {
        let height = LEGEND_BAND * self.h();
        Frame {
            x: 0.0,
            y: self.h() - height,
            width: self.w(),
            height,
        }
    }

    /// `count` equal slots across `row`, each shrunk by the slot padding.
    pub fn slots(row: Frame, count: usize) -> Vec<Frame> {
        if count == 0 {
            return Vec::new();
        }
        let slot_width = row.width / count as f64;
        let pad = slot_width * SLOT_PADDING;
        (0..count)
            .map(|i| Frame {
                x: row.x + slot_width * i as f64 + pad,
                y: row.y,
                width: slot_width - 2.0 * pad,
                height: row.height,
            })
            .collect()
    }
}

/// Scale `component` to fit inside `frame`, keeping its aspect ratio, and
/// centre it there.
pub fn fit_into(component: &Component, frame: Frame) -> Component {
    let (w, h) = (component.size.0.max(1) as f64, component.size.1.max(1) as f64);
    let scale = (frame.width / w).min(frame.height / h);
    let new_w = ((w * scale).round() as u32).max(1);
    let new_h = ((h * scale).round() as u32).max(1);
    let x = (frame.x + (frame.width - new_w as f64) / 2.0).round();
    let y = (frame.y + (frame.height - new_h as f64) / 2.0).round();
    component.scaled(new_w, new_h).placed(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::catalog;

    #[test]
    fn regions_stack_top_to_bottom() {
        let layout = Layout::new(1920, 1080);
        let top = layout.top_row();
        let ctrl = layout.controller_area();
        let bottom = layout.bottom_row();
        let legend = layout.legend();
        assert!(layout.title_y() < top.y);
        assert!(top.bottom() < ctrl.y);
        assert!(ctrl.bottom() < bottom.y);
        assert!((bottom.bottom() - legend.y).abs() < 1e-9);
        assert!((legend.bottom() - 1080.0).abs() < 1e-9);
    }

    #[test]
    fn slots_split_the_row() {
        let row = Frame {
            x: 0.0,
            y: 10.0,
            width: 1000.0,
            height: 100.0,
        };
        let slots = Layout::slots(row, 4);
        assert_eq!(slots.len(), 4);
        assert!((slots[0].x - 25.0).abs() < 1e-9);
        assert!((slots[0].width - 200.0).abs() < 1e-9);
        assert!((slots[3].x - 775.0).abs() < 1e-9);
        assert!(Layout::slots(row, 0).is_empty());
    }

    #[test]
    fn fit_keeps_aspect_and_centres() {
        let frame = Frame {
            x: 100.0,
            y: 50.0,
            width: 400.0,
            height: 200.0,
        };
        let led = fit_into(&catalog::led("L", 12), frame);
        // 360x440 limited by height: scale 200/440.
        assert_eq!(led.size.1, 200);
        assert!(led.size.0 <= 400);
        assert!(frame.contains(led.origin.x, led.origin.y));
        let anchor = led.anchor(2).unwrap();
        assert!(frame.contains(anchor.x, anchor.y));
    }
}
