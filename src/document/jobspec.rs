//! # Job Files
//!
//! Deserialize JSON job descriptions into print jobs.
//!
//! A job file is a device profile plus a list of steps; each step maps onto
//! one [`Job`](super::Job) builder call. This is the declarative face of the
//! builder, for tools that generate receipts instead of linking the crate.
//!
//! ## Example
//!
//! ```
//! use recibo::document::JobSpec;
//!
//! let spec = JobSpec::from_json(r#"{
//!     "profile": {"type": "mini58"},
//!     "steps": [
//!         {"type": "text", "content": "CAFE LUNA", "bold": true, "align": "center"},
//!         {"type": "qr", "data": "https://example.com"},
//!         {"type": "feed", "lines": 2}
//!     ]
//! }"#).unwrap();
//!
//! let bytes = spec.build(spec.config()).unwrap();
//! assert_eq!(&bytes[0..2], &[0x1B, 0x40]);
//! ```
//!
//! Schema errors (unknown alignment, bad tier name, invalid barcode payload)
//! fail the whole file before anything is encoded. Content that merely cannot
//! be honored as requested degrades per the usual styled-text rules.

use serde::Deserialize;

use crate::error::ReciboError;
use crate::fontsize::{FontTier, SizeRequest};
use crate::printer::{DeviceProfile, PrinterConfig};
use crate::protocol::barcode::barcode1d::{self, BarcodeOptions, HriPosition, Symbology};
use crate::protocol::barcode::qr::{EcLevel, QrOptions};
use crate::protocol::text::{Alignment, Font, Rotation};
use crate::render::dither::Dithering;
use crate::render::image::{self, ImageOptions};
use crate::render::PrintStyle;

use super::Job;

fn default_true() -> bool {
    true
}

fn default_feed_lines() -> u8 {
    1
}

// ============================================================================
// SCHEMA
// ============================================================================

/// Top-level JSON job description.
#[derive(Debug, Deserialize)]
pub struct JobSpec {
    /// Output device; omitted means the default 58mm profile.
    #[serde(default)]
    pub profile: Option<DeviceProfile>,
    /// Print steps, in order.
    pub steps: Vec<JobStep>,
    /// Whether to cut paper at the end (default: true).
    #[serde(default = "default_true")]
    pub cut: bool,
}

/// A single step in a job file.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JobStep {
    Text(TextStep),
    Qr(QrStep),
    Barcode(BarcodeStep),
    Image(ImageStep),
    Feed(FeedStep),
    CashDrawer,
}

/// Styled text line.
#[derive(Debug, Deserialize)]
pub struct TextStep {
    pub content: String,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub strikethrough: bool,
    #[serde(default)]
    pub double_strike: bool,
    #[serde(default)]
    pub invert: bool,
    #[serde(default)]
    pub double_width: bool,
    #[serde(default)]
    pub double_height: bool,
    /// "left", "center", "right".
    #[serde(default)]
    pub align: Option<String>,
    /// "A", "B", "C".
    #[serde(default)]
    pub font: Option<String>,
    /// Rotation in degrees: 90, 180 or 270; anything else means none.
    #[serde(default)]
    pub rotation: Option<i32>,
    /// Tracking multiplier, 1.0 = normal.
    #[serde(default)]
    pub letter_spacing: Option<f32>,
    /// Leading multiplier, 1.0 = normal.
    #[serde(default)]
    pub line_spacing: Option<f32>,
    /// Pixel height (number) or tier name (string).
    #[serde(default)]
    pub size: Option<SizeValue>,
}

/// A size request: raw pixels or a named tier.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SizeValue {
    Pixels(i32),
    Tier(String),
}

/// QR code symbol.
#[derive(Debug, Deserialize)]
pub struct QrStep {
    pub data: String,
    /// Module edge length in dots, 1-16.
    #[serde(default)]
    pub module_size: Option<u8>,
    /// "L", "M", "Q", "H".
    #[serde(default)]
    pub error_level: Option<String>,
    /// Alignment for the software-rendered symbol. Omitted = native
    /// firmware rendering at the left edge.
    #[serde(default)]
    pub align: Option<String>,
}

/// 1D barcode.
#[derive(Debug, Deserialize)]
pub struct BarcodeStep {
    /// "code39", "code128", "ean13", "upca", "itf", ...
    pub format: String,
    pub data: String,
    /// Module (narrow bar) width in dots, 2-6.
    #[serde(default)]
    pub width: Option<u8>,
    /// Bar height in dots.
    #[serde(default)]
    pub height: Option<u8>,
    /// "none", "above", "below", "both".
    #[serde(default)]
    pub hri: Option<String>,
}

/// Raster image loaded from the host filesystem.
#[derive(Debug, Deserialize)]
pub struct ImageStep {
    pub path: String,
    /// "threshold" (default) or "bayer".
    #[serde(default)]
    pub dither: Option<String>,
    /// Rotation in degrees before fitting to the head.
    #[serde(default)]
    pub rotation: Option<i32>,
    /// Scale narrow images up to the full printable width.
    #[serde(default)]
    pub scale_to_width: bool,
}

/// Blank paper feed.
#[derive(Debug, Deserialize)]
pub struct FeedStep {
    #[serde(default = "default_feed_lines")]
    pub lines: u8,
}

// ============================================================================
// CONVERSION
// ============================================================================

fn parse_align(name: &str) -> Result<Alignment, ReciboError> {
    match name.to_ascii_lowercase().as_str() {
        "left" => Ok(Alignment::Left),
        "center" => Ok(Alignment::Center),
        "right" => Ok(Alignment::Right),
        other => Err(ReciboError::InvalidParameter(format!(
            "unknown alignment '{other}', expected left, center or right"
        ))),
    }
}

impl JobSpec {
    /// Parse a job description from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ReciboError> {
        serde_json::from_str(json)
            .map_err(|e| ReciboError::InvalidParameter(format!("invalid job file: {e}")))
    }

    /// Hardware specs for the file's profile (or the default profile).
    pub fn config(&self) -> PrinterConfig {
        self.profile
            .as_ref()
            .map(DeviceProfile::config)
            .unwrap_or_default()
    }

    /// Encode the job to protocol bytes for the given printer.
    pub fn build(&self, config: PrinterConfig) -> Result<Vec<u8>, ReciboError> {
        let mut job = Job::new(config);
        for step in &self.steps {
            job = step.apply(job)?;
        }
        if self.cut {
            job = job.cut();
        }
        Ok(job.build())
    }
}

impl JobStep {
    fn apply(&self, job: Job) -> Result<Job, ReciboError> {
        match self {
            JobStep::Text(t) => Ok(job.styled(&t.content, &t.style()?)),
            JobStep::Qr(q) => q.apply(job),
            JobStep::Barcode(b) => b.apply(job),
            JobStep::Image(i) => i.apply(job),
            JobStep::Feed(f) => Ok(job.feed(f.lines)),
            JobStep::CashDrawer => Ok(job.cash_drawer()),
        }
    }
}

impl TextStep {
    fn style(&self) -> Result<PrintStyle, ReciboError> {
        let mut style = PrintStyle {
            bold: self.bold,
            italic: self.italic,
            underline: self.underline,
            strikethrough: self.strikethrough,
            double_strike: self.double_strike,
            invert: self.invert,
            double_width: self.double_width,
            double_height: self.double_height,
            ..PrintStyle::default()
        };

        if let Some(align) = &self.align {
            style.align = parse_align(align)?;
        }
        if let Some(font) = &self.font {
            style.font = match font.to_ascii_uppercase().as_str() {
                "A" => Font::A,
                "B" => Font::B,
                "C" => Font::C,
                other => {
                    return Err(ReciboError::InvalidParameter(format!(
                        "unknown font '{other}', expected A, B or C"
                    )));
                }
            };
        }
        if let Some(deg) = self.rotation {
            style.rotation = Rotation::from_degrees(deg);
        }
        if let Some(spacing) = self.letter_spacing {
            style.letter_spacing = spacing;
        }
        if let Some(spacing) = self.line_spacing {
            style.line_spacing = spacing;
        }
        style.size = match &self.size {
            None => None,
            Some(SizeValue::Pixels(px)) => Some(SizeRequest::Pixels(*px)),
            Some(SizeValue::Tier(name)) => {
                let tier = FontTier::parse(name).ok_or_else(|| {
                    ReciboError::InvalidParameter(format!("unknown size tier '{name}'"))
                })?;
                Some(SizeRequest::Tier(tier))
            }
        };

        Ok(style)
    }
}

impl QrStep {
    fn apply(&self, job: Job) -> Result<Job, ReciboError> {
        let mut options = QrOptions::default();
        if let Some(n) = self.module_size {
            if !(1..=16).contains(&n) {
                return Err(ReciboError::InvalidParameter(format!(
                    "QR module size must be 1-16, got {n}"
                )));
            }
            options.module_size = n;
        }
        if let Some(level) = &self.error_level {
            options.ec_level = EcLevel::parse(level);
        }

        Ok(match &self.align {
            Some(align) => job.qr_bitmap(&self.data, options, parse_align(align)?),
            None => job.qr(&self.data, options),
        })
    }
}

impl BarcodeStep {
    fn apply(&self, job: Job) -> Result<Job, ReciboError> {
        let symbology = Symbology::parse(&self.format)?;
        // Fail the file instead of letting the encoder drop the symbol later.
        barcode1d::validate(symbology, self.data.as_bytes())?;

        let mut options = BarcodeOptions::default();
        if let Some(w) = self.width {
            options.width = w;
        }
        if let Some(h) = self.height {
            options.height = h;
        }
        if let Some(hri) = &self.hri {
            options.hri = match hri.to_ascii_lowercase().as_str() {
                "none" => HriPosition::None,
                "above" => HriPosition::Above,
                "below" => HriPosition::Below,
                "both" => HriPosition::Both,
                other => {
                    return Err(ReciboError::InvalidParameter(format!(
                        "unknown HRI position '{other}', expected none, above, below or both"
                    )));
                }
            };
        }

        Ok(job.barcode(symbology, &self.data, options))
    }
}

impl ImageStep {
    fn apply(&self, job: Job) -> Result<Job, ReciboError> {
        // Options first: a bad field should fail before any file I/O.
        let mut options = ImageOptions {
            scale_to_width: self.scale_to_width,
            ..ImageOptions::default()
        };
        if let Some(dither) = &self.dither {
            options.dither = match dither.to_ascii_lowercase().as_str() {
                "threshold" => Dithering::Threshold,
                "bayer" => Dithering::Bayer,
                other => {
                    return Err(ReciboError::InvalidParameter(format!(
                        "unknown dithering '{other}', expected threshold or bayer"
                    )));
                }
            };
        }
        if let Some(deg) = self.rotation {
            options.rotation = Rotation::from_degrees(deg);
        }

        let img = image::load_path(&self.path)?;
        Ok(job.image(img, &options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(json: &str) -> JobSpec {
        JobSpec::from_json(json).unwrap()
    }

    #[test]
    fn test_minimal_job_builds() {
        let spec = parse(r#"{"steps": [{"type": "text", "content": "hello"}]}"#);
        let bytes = spec.build(spec.config()).unwrap();
        assert_eq!(&bytes[0..2], &[0x1B, 0x40]);
        // default cut at the end
        assert!(bytes.ends_with(&[0x1D, 0x56, 0x00]));
    }

    #[test]
    fn test_cut_false_omits_cut() {
        let spec = parse(r#"{"steps": [{"type": "feed"}], "cut": false}"#);
        let bytes = spec.build(spec.config()).unwrap();
        assert!(!bytes.ends_with(&[0x1D, 0x56, 0x00]));
    }

    #[test]
    fn test_profile_selects_width() {
        let spec = parse(r#"{"profile": {"type": "pos80"}, "steps": []}"#);
        assert_eq!(spec.config().width_dots, 576);

        let spec = parse(r#"{"steps": []}"#);
        assert_eq!(spec.config().width_dots, 384);
    }

    #[test]
    fn test_styled_text_step() {
        let spec = parse(
            r#"{"steps": [
                {"type": "text", "content": "BIG", "bold": true,
                 "align": "center", "size": "large"}
            ]}"#,
        );
        let bytes = spec.build(spec.config()).unwrap();
        // center align and the 2x2 size code from the "large" tier
        assert!(bytes.windows(3).any(|w| w == [0x1B, 0x61, 0x01]));
        assert!(bytes.windows(3).any(|w| w == [0x1D, 0x21, 0x11]));
    }

    #[test]
    fn test_size_as_pixels() {
        let spec = parse(r#"{"steps": [{"type": "text", "content": "x", "size": 30}]}"#);
        let bytes = spec.build(spec.config()).unwrap();
        // 30px buckets to multiplier 2
        assert!(bytes.windows(3).any(|w| w == [0x1D, 0x21, 0x11]));
    }

    #[test]
    fn test_unknown_alignment_fails() {
        let spec = parse(r#"{"steps": [{"type": "text", "content": "x", "align": "middle"}]}"#);
        assert!(matches!(
            spec.build(spec.config()),
            Err(ReciboError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_unknown_tier_fails() {
        let spec = parse(r#"{"steps": [{"type": "text", "content": "x", "size": "enormous"}]}"#);
        assert!(spec.build(spec.config()).is_err());
    }

    #[test]
    fn test_native_qr_step() {
        let spec = parse(r#"{"steps": [{"type": "qr", "data": "https://example.com"}]}"#);
        let bytes = spec.build(spec.config()).unwrap();
        // model selection from the GS ( k sequence
        let select_model = [0x1D, 0x28, 0x6B, 0x04, 0x00, 0x31, 0x41, 0x32, 0x00];
        assert!(bytes.windows(9).any(|w| w == select_model));
    }

    #[test]
    fn test_aligned_qr_step_rasterizes() {
        let spec = parse(
            r#"{"steps": [{"type": "qr", "data": "https://example.com", "align": "center"}]}"#,
        );
        let bytes = spec.build(spec.config()).unwrap();
        let raster_header = [0x1D, 0x76, 0x30, 0x00];
        assert!(bytes.windows(4).any(|w| w == raster_header));
    }

    #[test]
    fn test_qr_module_size_validated() {
        let spec = parse(r#"{"steps": [{"type": "qr", "data": "x", "module_size": 30}]}"#);
        assert!(spec.build(spec.config()).is_err());
    }

    #[test]
    fn test_barcode_step() {
        let spec = parse(
            r#"{"steps": [
                {"type": "barcode", "format": "code39", "data": "R-001", "hri": "none"}
            ]}"#,
        );
        let bytes = spec.build(spec.config()).unwrap();
        // GS k 69 with 5-byte payload
        assert!(bytes.windows(4).any(|w| w == [0x1D, 0x6B, 69, 5]));
        // HRI off
        assert!(bytes.windows(3).any(|w| w == [0x1D, 0x48, 0]));
    }

    #[test]
    fn test_barcode_payload_validated_up_front() {
        // Code39 has no lowercase letters
        let spec = parse(
            r#"{"steps": [{"type": "barcode", "format": "code39", "data": "lower"}]}"#,
        );
        assert!(matches!(
            spec.build(spec.config()),
            Err(ReciboError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_unknown_barcode_format_fails() {
        let spec =
            parse(r#"{"steps": [{"type": "barcode", "format": "aztec", "data": "123"}]}"#);
        assert!(spec.build(spec.config()).is_err());
    }

    #[test]
    fn test_cash_drawer_step() {
        let spec = parse(r#"{"steps": [{"type": "cash_drawer"}], "cut": false}"#);
        let bytes = spec.build(spec.config()).unwrap();
        assert_eq!(bytes, vec![0x1B, 0x40, 0x1B, 0x70, 0x00, 0x19, 0xFA]);
    }

    #[test]
    fn test_image_dither_validated_before_io() {
        let spec = parse(
            r#"{"steps": [{"type": "image", "path": "/nonexistent.png", "dither": "dots"}]}"#,
        );
        // the dither error wins over the missing file
        assert!(matches!(
            spec.build(spec.config()),
            Err(ReciboError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_missing_image_reports_encoding_error() {
        let spec = parse(r#"{"steps": [{"type": "image", "path": "/nonexistent.png"}]}"#);
        assert!(matches!(
            spec.build(spec.config()),
            Err(ReciboError::Encoding(_))
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(JobSpec::from_json("{not json").is_err());
        assert!(JobSpec::from_json(r#"{"steps": [{"type": "warp"}]}"#).is_err());
    }

    #[test]
    fn test_feed_defaults_to_one_line() {
        let spec = parse(r#"{"steps": [{"type": "feed"}], "cut": false}"#);
        let bytes = spec.build(spec.config()).unwrap();
        assert_eq!(bytes, vec![0x1B, 0x40, 0x1B, 0x64, 1]);
    }
}
