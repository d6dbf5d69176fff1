//! Terminal barcode drawing

use pertes_catalog::{BarcodeRenderer, RenderOptions};

const BAR: char = '█';
const SPACE: char = ' ';
/// Pixel rows per terminal line
const ROW_PIXELS: u32 = 20;

/// Draws the bit pattern of the text as block characters
///
/// The output is a visual stand-in, not a scannable symbol.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct TextRenderer;

impl BarcodeRenderer for TextRenderer {
    type Visual = String;

    fn render(&self, text: &str, options: &RenderOptions) -> String {
        let mut row = String::new();
        for byte in text.bytes() {
            for bit in (0..8).rev() {
                let module = if (byte >> bit) & 1 == 1 { BAR } else { SPACE };
                for _ in 0..options.width {
                    row.push(module);
                }
            }
        }

        let lines = usize::try_from(options.height / ROW_PIXELS).unwrap_or(1).max(1);
        let mut out = vec![row; lines].join("\n");
        if options.show_text {
            out.push('\n');
            out.push_str(text);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pertes_catalog::RenderConfig;

    #[test]
    fn detail_is_taller_than_list() {
        let config = RenderConfig::default();
        let list = TextRenderer.render("123", &RenderOptions::list(&config));
        let detail = TextRenderer.render("123", &RenderOptions::detail(&config));

        assert_eq!(list.lines().count(), 4);
        assert_eq!(detail.lines().count(), 11);
        assert_eq!(detail.lines().last(), Some("123"));
    }

    #[test]
    fn width_scales_modules() {
        let options = RenderOptions {
            width: 1,
            show_text: false,
            ..RenderOptions::default()
        };
        let drawn = TextRenderer.render("A", &options);
        let first = drawn.lines().next().unwrap();
        assert_eq!(first.chars().count(), 8);
        assert_eq!(first, " █     █");
    }
}
