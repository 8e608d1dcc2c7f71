//! # Code Generation
//!
//! Converts IR programs to ESC/POS protocol bytes.
//!
//! Codegen is infallible: ops carrying data the protocol builders reject
//! (oversized QR payloads, bad barcode charsets) encode to nothing and log
//! a warning. Validation belongs to the document layer, which refuses to
//! build such ops in the first place.

use log::warn;

use super::chunking::DRAIN_MARKER;
use super::ops::{Op, Program};
use crate::printer::PrinterConfig;
use crate::protocol::{barcode, commands, graphics, text};

impl Program {
    /// Compile the IR program to ESC/POS bytes.
    ///
    /// Uses the default printer configuration (58mm, 384 dots).
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_bytes_with_config(&PrinterConfig::MINI58)
    }

    /// Compile the IR program to ESC/POS bytes for a specific printer.
    pub fn to_bytes_with_config(&self, config: &PrinterConfig) -> Vec<u8> {
        let mut out = Vec::new();

        for op in &self.ops {
            match op {
                // ===== Printer Control =====
                Op::Init => {
                    out.extend(commands::init());
                }
                Op::Cut { partial } => {
                    if *partial {
                        out.extend(commands::cut_partial());
                    } else {
                        out.extend(commands::cut_full());
                    }
                }
                Op::Feed { lines } => {
                    out.extend(commands::feed_lines(*lines));
                }
                Op::FeedDots { dots } => {
                    out.extend(commands::feed_dots(*dots));
                }
                Op::CashDrawer => {
                    out.extend(commands::cash_drawer());
                }

                // ===== Style Changes =====
                Op::SetAlign(align) => {
                    out.extend(text::align(*align));
                }
                Op::SetFont(font) => {
                    out.extend(text::font(*font));
                }
                Op::SetBold(enabled) => {
                    if *enabled {
                        out.extend(text::bold_on());
                    } else {
                        out.extend(text::bold_off());
                    }
                }
                Op::SetUnderline(enabled) => {
                    if *enabled {
                        out.extend(text::underline_on());
                    } else {
                        out.extend(text::underline_off());
                    }
                }
                Op::SetItalic(enabled) => {
                    if *enabled {
                        out.extend(text::italic_on());
                    } else {
                        out.extend(text::italic_off());
                    }
                }
                Op::SetStrikethrough(enabled) => {
                    if *enabled {
                        out.extend(text::strikethrough_on());
                    } else {
                        out.extend(text::strikethrough_off());
                    }
                }
                Op::SetDoubleStrike(enabled) => {
                    if *enabled {
                        out.extend(text::double_strike_on());
                    } else {
                        out.extend(text::double_strike_off());
                    }
                }
                Op::SetInvert(enabled) => {
                    if *enabled {
                        out.extend(text::invert_on());
                    } else {
                        out.extend(text::invert_off());
                    }
                }
                Op::SetSize(code) => {
                    out.extend(code.command());
                }
                Op::SetRotation(rotation) => {
                    out.extend(text::rotation(*rotation));
                }
                Op::SetCharSpacing(dots) => {
                    out.extend(text::char_spacing(*dots));
                }

                // ===== Content =====
                Op::Text(s) => {
                    out.extend(s.as_bytes());
                }
                Op::Newline => {
                    out.push(commands::LF);
                }
                Op::Raw(bytes) => {
                    out.extend(bytes);
                }

                // ===== Graphics =====
                Op::Raster {
                    width,
                    height,
                    data,
                } => {
                    encode_raster(&mut out, *width, *height, data, config);
                }

                // ===== Barcodes =====
                Op::QrCode { data, options } => {
                    match barcode::qr::print_sequence(data.as_bytes(), options) {
                        Ok(cmd) => out.extend(cmd),
                        Err(e) => warn!("skipping unencodable QR op: {e}"),
                    }
                }
                Op::Barcode {
                    symbology,
                    data,
                    options,
                } => match barcode::barcode1d::print(*symbology, data.as_bytes(), options) {
                    Ok(cmd) => out.extend(cmd),
                    Err(e) => warn!("skipping unencodable barcode op: {e}"),
                },

                // ===== Pacing =====
                Op::DrainBuffer => {
                    out.extend(DRAIN_MARKER);
                }
            }
        }

        out
    }
}

/// Encode one raster bitmap as a sequence of GS v 0 bands.
///
/// Wider-than-head bitmaps are truncated to the head width, byte-aligned.
/// Rows are sliced into bands of `config.max_chunk_rows` so no single
/// command overruns the printer's receive buffer.
fn encode_raster(out: &mut Vec<u8>, width: u16, height: u16, data: &[u8], config: &PrinterConfig) {
    if width == 0 || height == 0 {
        return;
    }

    let src_width_bytes = width.div_ceil(8) as usize;
    let (out_width, out_width_bytes) = if width > config.width_dots {
        warn!(
            "raster width {} exceeds head width {}, truncating",
            width, config.width_dots
        );
        (config.width_dots, config.width_bytes as usize)
    } else {
        (width, src_width_bytes)
    };

    let rows_available = data.len() / src_width_bytes;
    let total_rows = (height as usize).min(rows_available);
    if total_rows < height as usize {
        warn!(
            "raster data holds {} rows, declared {}; encoding what is there",
            rows_available, height
        );
    }

    let chunk_rows = config.max_chunk_rows as usize;
    let mut row_offset = 0;
    while row_offset < total_rows {
        let band_rows = (total_rows - row_offset).min(chunk_rows);
        let mut band = Vec::with_capacity(band_rows * out_width_bytes);
        for row in row_offset..row_offset + band_rows {
            let start = row * src_width_bytes;
            band.extend_from_slice(&data[start..start + out_width_bytes]);
        }
        out.extend(graphics::raster(out_width, band_rows as u16, &band));
        row_offset += band_rows;
    }
}
