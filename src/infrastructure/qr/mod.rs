//! Terminal QR rendering for the pairing flow.

use qrcode::{Color, EcLevel, QrCode};

use crate::application::errors::BotError;

/// Render pairing data as a compact QR code for terminal display.
///
/// Packs two rows of modules into one line of text using `▀`, `▄`, `█` and
/// space, which halves the height compared to one character per module.
pub fn render_terminal(qr_data: &str) -> Result<String, BotError> {
    let code = QrCode::with_error_correction_level(qr_data.as_bytes(), EcLevel::L)
        .map_err(|e| BotError::Channel(format!("QR generation failed: {e}")))?;

    let width = code.width();
    let colors: Vec<Color> = code.into_colors();
    let is_dark = |row: usize, col: usize| -> bool {
        if row < width && col < width {
            colors[row * width + col] == Color::Dark
        } else {
            false
        }
    };

    let mut out = String::new();
    let mut row = 0;
    while row < width {
        for col in 0..width {
            let top = is_dark(row, col);
            let bottom = if row + 1 < width {
                is_dark(row + 1, col)
            } else {
                false
            };
            out.push(match (top, bottom) {
                (true, true) => '█',
                (true, false) => '▀',
                (false, true) => '▄',
                (false, false) => ' ',
            });
        }
        out.push('\n');
        row += 2;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_non_empty_output() {
        let qr = render_terminal("2@abcdefghij,klmnopqrst,uvwxyz012345").unwrap();
        assert!(!qr.is_empty());
    }

    #[test]
    fn uses_half_block_characters_only() {
        let qr = render_terminal("test-data").unwrap();
        assert!(qr
            .chars()
            .all(|c| matches!(c, '█' | '▀' | '▄' | ' ' | '\n')));
    }

    #[test]
    fn halves_the_module_height() {
        let qr = render_terminal("test-data").unwrap();
        let lines: Vec<&str> = qr.lines().collect();
        let width = lines[0].chars().count();
        // Two module rows per text line, rounded up.
        assert_eq!(lines.len(), width.div_ceil(2));
    }
}
