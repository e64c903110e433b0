//! # Layout Engine
//!
//! Computes the panel geometry for one viewer from the configured sizes and
//! the number of buttons that viewer may see.
//!
//! The background rectangle is absolute (screen space). Button rectangles are
//! relative to the background, i.e. `[0, 1]` spans the panel, not the screen,
//! which is how the host positions child elements inside a parent.
//!
//! ```text
//!   anchor ┌────────────┐  1
//!          │ ┌────────┐ │
//!          │ │ btn 0  │ │
//!          │ └────────┘ │
//!          │ ┌────────┐ │
//!          │ │ btn 1  │ │
//!          │ └────────┘ │
//!          └────────────┘  0
//! ```

use crate::config::PanelConfig;
use crate::types::Rect;

/// Geometry of a rendered panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelLayout {
    /// Panel background in screen coordinates
    pub background: Rect,
    /// One rectangle per visible button, top to bottom, relative to `background`
    pub buttons: Vec<Rect>,
}

/// Width of the panel background in screen units.
pub fn background_width(config: &PanelConfig) -> f64 {
    2.0 * config.horizontal_margin + config.button_width
}

/// Height of the panel background for `visible_count` buttons in screen units.
pub fn background_height(config: &PanelConfig, visible_count: usize) -> f64 {
    config.vertical_margin
        + visible_count as f64 * (config.button_height + config.vertical_margin)
}

/// Computes the panel layout for `visible_count` buttons.
///
/// Returns `None` when there is nothing to show; the caller must not render a
/// background without buttons.
pub fn compute_layout(config: &PanelConfig, visible_count: usize) -> Option<PanelLayout> {
    if visible_count == 0 {
        return None;
    }

    let width = background_width(config);
    let height = background_height(config, visible_count);

    let left = config.anchor.x;
    let top = config.anchor.y;
    let background = Rect {
        left,
        bottom: top - height,
        right: left + width,
        top,
    };

    let rel_button_width = config.button_width / width;
    let rel_button_height = config.button_height / height;
    let rel_margin_h = config.horizontal_margin / width;
    let rel_margin_v = config.vertical_margin / height;

    let buttons = (0..visible_count)
        .map(|i| {
            let top = 1.0 - rel_margin_v - i as f64 * (rel_button_height + rel_margin_v);
            let left = rel_margin_h;
            Rect {
                left,
                bottom: top - rel_button_height,
                right: left + rel_button_width,
                top,
            }
        })
        .collect();

    Some(PanelLayout {
        background,
        buttons,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Anchor;

    const EPS: f64 = 1e-9;

    fn scenario_config() -> PanelConfig {
        PanelConfig {
            anchor: Anchor::new(0.01, 0.88),
            horizontal_margin: 0.002,
            vertical_margin: 0.004,
            button_width: 0.085,
            button_height: 0.035,
            ..PanelConfig::default()
        }
    }

    #[test]
    fn test_zero_visible_buttons_is_empty() {
        assert!(compute_layout(&scenario_config(), 0).is_none());
    }

    #[test]
    fn test_three_button_scenario() {
        let config = scenario_config();
        let layout = compute_layout(&config, 3).unwrap();

        let height = background_height(&config, 3);
        assert!((background_width(&config) - 0.089).abs() < EPS);
        assert!((height - 0.121).abs() < EPS);

        assert_eq!(layout.background.left, 0.01);
        assert_eq!(layout.background.top, 0.88);
        assert!((layout.background.right - 0.099).abs() < EPS);
        assert!((layout.background.bottom - (0.88 - 0.121)).abs() < EPS);

        assert_eq!(layout.buttons.len(), 3);
        let first = layout.buttons[0];
        assert!((first.top - (1.0 - 0.004 / height)).abs() < EPS);
        assert!((first.left - 0.002 / 0.089).abs() < EPS);
        assert!((first.width() - 0.085 / 0.089).abs() < EPS);
    }

    #[test]
    fn test_background_height_matches_formula_exactly() {
        let config = scenario_config();
        for count in 0..20usize {
            let expected = config.vertical_margin
                + count as f64 * (config.button_height + config.vertical_margin);
            assert_eq!(background_height(&config, count), expected);
        }
    }

    #[test]
    fn test_buttons_ordered_without_overlap() {
        let configs = [
            scenario_config(),
            PanelConfig {
                horizontal_margin: 0.01,
                vertical_margin: 0.02,
                button_width: 0.2,
                button_height: 0.05,
                ..PanelConfig::default()
            },
        ];

        for config in &configs {
            for count in 1..12usize {
                let layout = compute_layout(config, count).unwrap();
                let rel_margin_v = config.vertical_margin / background_height(config, count);

                for pair in layout.buttons.windows(2) {
                    assert!(pair[0].bottom > pair[1].top, "buttons overlap: {pair:?}");
                    // Gap between neighbours is one vertical margin
                    assert!((pair[0].bottom - pair[1].top - rel_margin_v).abs() < EPS);
                    assert!((pair[0].height() - pair[1].height()).abs() < EPS);
                }

                let last = layout.buttons.last().unwrap();
                assert!((last.bottom - rel_margin_v).abs() < EPS);
                assert!(layout.buttons.iter().all(|b| b.bottom >= 0.0 && b.top <= 1.0));
            }
        }
    }

    #[test]
    fn test_single_button_fills_panel_minus_margins() {
        let config = scenario_config();
        let layout = compute_layout(&config, 1).unwrap();
        let button = layout.buttons[0];
        let height = background_height(&config, 1);

        assert!((button.top - (1.0 - 0.004 / height)).abs() < EPS);
        assert!((button.bottom - 0.004 / height).abs() < EPS);
        assert!((button.right - (1.0 - 0.002 / 0.089)).abs() < EPS);
    }
}
