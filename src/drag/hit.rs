//! Coordinate hit testing against window chrome

use super::{Edge, HitTarget};
use crate::config::ChromeConfig;
use crate::geometry::{Point, Rect};
use crate::window::Header;

/// Which part of a window at `rect` lies under `point`.
///
/// Handles sit just inside the border; corners take precedence over edges,
/// edges over the header. Header buttons are laid out from the right edge
/// with the last button rightmost. Headerless windows only have a body.
pub fn hit_test(
    rect: Rect,
    header: Option<&Header>,
    chrome: &ChromeConfig,
    point: Point,
) -> Option<HitTarget> {
    if !rect.contains(point) {
        return None;
    }
    let Some(header) = header else {
        return Some(HitTarget::Body);
    };

    let x = point.x - rect.left;
    let y = point.y - rect.top;
    let t = chrome.handle_thickness;
    let c = chrome.corner_size;

    let near_top = y < t;
    let near_bottom = y >= rect.height - t;
    let near_left = x < t;
    let near_right = x >= rect.width - t;

    let corner = match (y < c, y >= rect.height - c, x < c, x >= rect.width - c) {
        (true, _, true, _) => Some(Edge::NW),
        (true, _, _, true) => Some(Edge::NE),
        (_, true, true, _) => Some(Edge::SW),
        (_, true, _, true) => Some(Edge::SE),
        _ => None,
    };
    if let Some(edge) = corner {
        if near_top || near_bottom || near_left || near_right {
            return Some(HitTarget::Handle(edge));
        }
    }

    let edge = if near_top {
        Some(Edge::N)
    } else if near_bottom {
        Some(Edge::S)
    } else if near_left {
        Some(Edge::W)
    } else if near_right {
        Some(Edge::E)
    } else {
        None
    };
    if let Some(edge) = edge {
        return Some(HitTarget::Handle(edge));
    }

    if y < chrome.header_height {
        let from_right = rect.width - x;
        let slot = (from_right / chrome.button_width).floor() as usize;
        let buttons = header.buttons();
        if slot < buttons.len() {
            let button = &buttons[buttons.len() - 1 - slot];
            return Some(HitTarget::Button(button.kind));
        }
        return Some(HitTarget::Header);
    }

    Some(HitTarget::Body)
}
