//! Modal animation effects for the form overlay.

use ratatui::layout::Rect;

use roster_engine::ModalEffect;
use roster_types::ui::ModalEffectKind;

/// Apply a modal effect to transform the base rectangle.
#[must_use]
pub fn apply_modal_effect(effect: &ModalEffect, base: Rect, viewport: Rect) -> Rect {
    match effect.kind() {
        ModalEffectKind::PopScale => {
            let t = ease_out_cubic(effect.progress());
            let scale = 0.6 + 0.4 * t;
            scale_rect(base, scale)
        }
        ModalEffectKind::Shake => {
            let t = effect.progress().clamp(0.0, 1.0);
            let decay = 1.0 - t;
            let oscillations = 4.0;
            let amplitude = 3.0;
            let offset = (f32::sin(t * std::f32::consts::TAU * oscillations) * amplitude * decay)
                .round() as i32;
            let viewport_left = i32::from(viewport.x);
            let viewport_right = i32::from(viewport.x) + i32::from(viewport.width);
            let max_x = (viewport_right - i32::from(base.width)).max(viewport_left);
            let x = (i32::from(base.x) + offset).clamp(viewport_left, max_x) as u16;
            Rect { x, ..base }
        }
    }
}

fn scale_rect(base: Rect, scale: f32) -> Rect {
    let width = (f32::from(base.width) * scale).round() as u16;
    let height = (f32::from(base.height) * scale).round() as u16;
    let width = width.max(1).min(base.width);
    let height = height.max(1).min(base.height);
    Rect {
        x: base.x + (base.width.saturating_sub(width) / 2),
        y: base.y + (base.height.saturating_sub(height) / 2),
        width,
        height,
    }
}

fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ratatui::layout::Rect;
    use roster_engine::ModalEffect;

    use super::apply_modal_effect;

    const VIEWPORT: Rect = Rect::new(0, 0, 100, 40);
    const BASE: Rect = Rect::new(20, 10, 60, 20);

    #[test]
    fn pop_scale_starts_smaller_and_centered() {
        let effect = ModalEffect::pop_scale(Duration::from_millis(180));
        let rect = apply_modal_effect(&effect, BASE, VIEWPORT);
        assert!(rect.width < BASE.width);
        assert!(rect.height < BASE.height);
        assert_eq!(rect.x + rect.width / 2, BASE.x + BASE.width / 2);
    }

    #[test]
    fn finished_pop_scale_is_full_size() {
        let mut effect = ModalEffect::pop_scale(Duration::from_millis(100));
        effect.advance(Duration::from_millis(200));
        assert_eq!(apply_modal_effect(&effect, BASE, VIEWPORT), BASE);
    }

    #[test]
    fn shake_stays_inside_viewport() {
        let wide = Rect::new(0, 5, 100, 10);
        let mut effect = ModalEffect::shake(Duration::from_millis(300));
        for _ in 0..30 {
            effect.advance(Duration::from_millis(10));
            let rect = apply_modal_effect(&effect, wide, VIEWPORT);
            assert_eq!(rect.x, 0);
            assert_eq!(rect.y, wide.y);
        }
    }
}
