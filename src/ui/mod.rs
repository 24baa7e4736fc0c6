//! DOM text overlay
//!
//! Labels from the draw list become absolutely positioned elements in the
//! `#ui-layer` container, which sits exactly over the canvas. Styles are
//! computed here so they can be checked without a browser.

#[cfg(target_arch = "wasm32")]
pub mod dom;

#[cfg(target_arch = "wasm32")]
pub use dom::{NameInput, TextLayer};

use glam::Vec2;

use crate::css_color;
use crate::platform::Viewport;
use crate::prefs::MAX_NAME_LEN;
use crate::sim::Label;

/// Inline CSS for a label drawn at the viewport's scale
pub fn label_style(label: &Label, viewport: &Viewport) -> String {
    let s = viewport.scale;
    let pos = viewport.to_css(label.pos);
    let mut css = format!(
        "position:absolute;left:{:.1}px;top:{:.1}px;transform:translate({:.0}%,{:.0}%);\
         font-size:{:.1}px;color:{};opacity:{:.3};white-space:pre;pointer-events:none;\
         font-family:Arial,sans-serif;line-height:1.2;",
        pos.x,
        pos.y,
        -label.origin.x * 100.0,
        -label.origin.y * 100.0,
        label.font_px * s,
        css_color(label.color),
        label.alpha.clamp(0.0, 1.0),
    );
    if label.bold {
        css.push_str("font-weight:bold;");
    }
    if let Some(bg) = label.background {
        css.push_str(&format!(
            "background:{};padding:{:.1}px {:.1}px;",
            css_color(bg),
            label.padding.y * s,
            label.padding.x * s
        ));
    }
    if let Some(stroke) = label.stroke {
        let w = (label.font_px * s / 12.0).max(1.0);
        css.push_str(&format!("-webkit-text-stroke:{:.1}px {};paint-order:stroke fill;", w, css_color(stroke)));
    }
    if let Some(size) = label.box_size {
        let size = size * s;
        css.push_str(&format!(
            "box-sizing:border-box;width:{:.1}px;height:{:.1}px;display:flex;\
             align-items:center;justify-content:center;border-radius:{:.1}px;",
            size.x,
            size.y,
            5.0 * s
        ));
    }
    css
}

/// Inline CSS for the player-name text field
pub fn name_input_style(center: Vec2, width: f32, viewport: &Viewport) -> String {
    let s = viewport.scale;
    let pos = viewport.to_css(center);
    format!(
        "position:absolute;left:{:.1}px;top:{:.1}px;width:{:.1}px;transform:translate(-50%,-50%);\
         font-size:{:.1}px;padding:{:.1}px;box-sizing:border-box;border:none;outline:none;\
         background:transparent;color:#ffffff;font-family:Arial,sans-serif;pointer-events:auto;",
        pos.x,
        pos.y,
        width * s,
        18.0 * s,
        4.0 * s,
    )
}

/// `maxlength` attribute for the name field
pub fn name_max_length() -> String {
    MAX_NAME_LEN.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_style_scales_with_viewport() {
        let viewport = Viewport {
            offset: Vec2::new(50.0, 0.0),
            scale: 0.5,
        };
        let label = Label::new("Hi", Vec2::new(200.0, 100.0), 20.0, 0xff0000).with_alpha(0.5);
        let css = label_style(&label, &viewport);
        assert!(css.contains("left:100.0px;top:50.0px;"));
        assert!(css.contains("font-size:10.0px;"));
        assert!(css.contains("color:#ff0000;"));
        assert!(css.contains("opacity:0.500;"));
        assert!(css.contains("translate(-50%,-50%)"));
        assert!(!css.contains("font-weight"));
    }

    #[test]
    fn test_label_style_optional_parts() {
        let viewport = Viewport::default();
        let label = Label::new("Apply", Vec2::ZERO, 20.0, 0xffffff)
            .with_background(0x27ae60, Vec2::new(20.0, 10.0))
            .with_box(Vec2::new(120.0, 44.0))
            .with_origin(Vec2::ZERO)
            .with_stroke(0x000000)
            .bold();
        let css = label_style(&label, &viewport);
        assert!(css.contains("background:#27ae60;padding:10.0px 20.0px;"));
        assert!(css.contains("width:120.0px;height:44.0px;"));
        assert!(css.contains("translate(0%,0%)") || css.contains("translate(-0%,-0%)"));
        assert!(css.contains("-webkit-text-stroke"));
        assert!(css.contains("font-weight:bold;"));
    }

    #[test]
    fn test_name_input_style() {
        let css = name_input_style(Vec2::new(640.0, 300.0), 290.0, &Viewport::default());
        assert!(css.contains("left:640.0px;top:300.0px;width:290.0px;"));
        assert_eq!(name_max_length(), "12");
    }
}
