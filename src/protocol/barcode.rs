//! # ESC/POS Barcode Commands
//!
//! This module implements barcode generation commands: classic 1D symbologies
//! printed by the firmware (`GS k` family) and 2D QR codes (`GS ( k` function
//! group).
//!
//! ## Supported Barcode Types
//!
//! | Type | Description | Capacity |
//! |------|-------------|----------|
//! | UPC-A/UPC-E, EAN-13/EAN-8 | Retail digits | fixed length |
//! | Code39, Code93, Code128 | Alphanumeric | variable |
//! | ITF, Codabar | Numeric / legacy | variable |
//! | QR Code | 2D matrix | up to ~7KB |
//!
//! ## 1D Barcode Usage
//!
//! ```
//! use recibo::protocol::barcode::barcode1d::{self, BarcodeOptions, Symbology};
//!
//! let opts = BarcodeOptions::default();
//! let cmd = barcode1d::print(Symbology::Code128, b"ORDER-1234", &opts).unwrap();
//! ```
//!
//! ## QR Code Usage
//!
//! QR codes are generated in a multi-step process:
//!
//! 1. Select model, module size, and error correction
//! 2. Store the data in the symbol buffer
//! 3. Print the symbol
//!
//! ```
//! use recibo::protocol::barcode::qr::{self, QrOptions};
//!
//! let cmd = qr::print_sequence(b"https://example.com", &QrOptions::default()).unwrap();
//! ```

use super::commands::{GS, LF, u16_le};

// ============================================================================
// 1D BARCODE COMMANDS (GS k family)
// ============================================================================

/// 1D barcode command builders
///
/// Linear barcodes are rendered by the printer firmware itself; the host
/// only configures geometry and sends the payload.
pub mod barcode1d {
    use super::{GS, LF};
    use crate::error::ReciboError;

    /// Barcode symbology codes for GS k
    ///
    /// These are the "function B" type codes, which pair with an explicit
    /// length byte. They cover the same symbologies as the legacy 0-6 codes
    /// while keeping the command self-delimiting.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[repr(u8)]
    pub enum Symbology {
        /// UPC-A (11-12 digits)
        UpcA = 65,
        /// UPC-E (6-8 digits, compressed UPC-A)
        UpcE = 66,
        /// EAN-13 / JAN-13 (12-13 digits)
        Ean13 = 67,
        /// EAN-8 / JAN-8 (7-8 digits)
        Ean8 = 68,
        /// Code39 (A-Z, 0-9, space, -.$/%+)
        Code39 = 69,
        /// ITF (Interleaved 2 of 5, digit pairs)
        Itf = 70,
        /// Codabar / NW-7
        Codabar = 71,
        /// Code93 (full ASCII, more compact than Code39)
        Code93 = 72,
        /// Code128 (full ASCII, highest density)
        Code128 = 73,
    }

    impl Symbology {
        /// Parse the symbology names used by POS front-ends.
        pub fn parse(name: &str) -> Result<Self, ReciboError> {
            match name.to_ascii_uppercase().as_str() {
                "UPC_A" | "UPCA" => Ok(Symbology::UpcA),
                "UPC_E" | "UPCE" => Ok(Symbology::UpcE),
                "EAN13" => Ok(Symbology::Ean13),
                "EAN8" => Ok(Symbology::Ean8),
                "CODE39" => Ok(Symbology::Code39),
                "ITF" => Ok(Symbology::Itf),
                "CODABAR" => Ok(Symbology::Codabar),
                "CODE93" => Ok(Symbology::Code93),
                "CODE128" => Ok(Symbology::Code128),
                other => Err(ReciboError::InvalidParameter(format!(
                    "unsupported barcode type: {other}"
                ))),
            }
        }
    }

    /// HRI (Human Readable Interpretation) position for GS H
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum HriPosition {
        /// No HRI text printed
        None = 0,
        /// HRI above the bars
        Above = 1,
        /// HRI below the bars (default)
        #[default]
        Below = 2,
        /// HRI both above and below
        Both = 3,
    }

    /// Geometry and label options for a 1D barcode
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BarcodeOptions {
        /// Module (narrow bar) width in dots, 2-6
        pub width: u8,
        /// Bar height in dots, 1-255
        pub height: u8,
        /// Where the human-readable text goes
        pub hri: HriPosition,
    }

    impl Default for BarcodeOptions {
        fn default() -> Self {
            // 162 dots ≈ 20mm of bars, readable by handheld scanners
            Self { width: 2, height: 162, hri: HriPosition::Below }
        }
    }

    /// # Set Barcode Module Width (GS w n)
    ///
    /// | Format  | Bytes |
    /// |---------|-------|
    /// | ASCII   | GS w n |
    /// | Hex     | 1D 77 n |
    /// | Decimal | 29 119 n |
    ///
    /// `n` is the narrow-bar width in dots; out-of-range values are clamped
    /// to 2-6 (below 2 is unscannable at 203 DPI, above 6 rarely fits the
    /// paper).
    #[inline]
    pub fn set_width(n: u8) -> Vec<u8> {
        vec![GS, b'w', n.clamp(2, 6)]
    }

    /// # Set Barcode Height (GS h n)
    ///
    /// | Format  | Bytes |
    /// |---------|-------|
    /// | ASCII   | GS h n |
    /// | Hex     | 1D 68 n |
    /// | Decimal | 29 104 n |
    ///
    /// `n` is the bar height in dots (1-255); 0 is bumped to 1.
    #[inline]
    pub fn set_height(n: u8) -> Vec<u8> {
        vec![GS, b'h', n.max(1)]
    }

    /// # Set HRI Position (GS H n)
    ///
    /// | Format  | Bytes |
    /// |---------|-------|
    /// | ASCII   | GS H n |
    /// | Hex     | 1D 48 n |
    /// | Decimal | 29 72 n |
    #[inline]
    pub fn set_hri_position(pos: HriPosition) -> Vec<u8> {
        vec![GS, b'H', pos as u8]
    }

    /// Check payload length and character set for a symbology.
    ///
    /// The firmware prints nothing (or worse, garbage bars) on invalid
    /// payloads, so bad data is rejected host-side.
    pub fn validate(symbology: Symbology, data: &[u8]) -> Result<(), ReciboError> {
        if data.is_empty() {
            return Err(ReciboError::InvalidParameter(
                "barcode data must not be empty".into(),
            ));
        }
        if data.len() > 255 {
            return Err(ReciboError::InvalidParameter(format!(
                "barcode data too long: {} bytes (max 255)",
                data.len()
            )));
        }

        let digits_only = || data.iter().all(u8::is_ascii_digit);
        match symbology {
            Symbology::UpcA => {
                if !digits_only() || !(11..=12).contains(&data.len()) {
                    return Err(ReciboError::InvalidParameter(
                        "UPC-A requires 11-12 digits".into(),
                    ));
                }
            }
            Symbology::UpcE => {
                if !digits_only() || !(6..=8).contains(&data.len()) {
                    return Err(ReciboError::InvalidParameter(
                        "UPC-E requires 6-8 digits".into(),
                    ));
                }
            }
            Symbology::Ean13 => {
                if !digits_only() || !(12..=13).contains(&data.len()) {
                    return Err(ReciboError::InvalidParameter(
                        "EAN-13 requires 12-13 digits".into(),
                    ));
                }
            }
            Symbology::Ean8 => {
                if !digits_only() || !(7..=8).contains(&data.len()) {
                    return Err(ReciboError::InvalidParameter(
                        "EAN-8 requires 7-8 digits".into(),
                    ));
                }
            }
            Symbology::Code39 => {
                let ok = data.iter().all(|&b| {
                    b.is_ascii_digit()
                        || b.is_ascii_uppercase()
                        || matches!(b, b' ' | b'-' | b'.' | b'$' | b'/' | b'%' | b'+')
                });
                if !ok {
                    return Err(ReciboError::InvalidParameter(
                        "Code39 accepts only 0-9 A-Z space - . $ / % +".into(),
                    ));
                }
            }
            Symbology::Itf => {
                if !digits_only() || data.len() % 2 != 0 {
                    return Err(ReciboError::InvalidParameter(
                        "ITF requires an even number of digits".into(),
                    ));
                }
            }
            Symbology::Codabar => {
                let ok = data.iter().all(|&b| {
                    b.is_ascii_digit()
                        || matches!(b, b'A'..=b'D')
                        || matches!(b, b'-' | b'$' | b':' | b'/' | b'.' | b'+')
                });
                if !ok {
                    return Err(ReciboError::InvalidParameter(
                        "Codabar accepts only 0-9 A-D - $ : / . +".into(),
                    ));
                }
            }
            Symbology::Code93 | Symbology::Code128 => {
                if !data.iter().all(u8::is_ascii) {
                    return Err(ReciboError::InvalidParameter(
                        "Code93/Code128 payload must be ASCII".into(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// # Print Barcode (GS k m n d1...dn)
    ///
    /// The bare symbol command: type code, explicit length byte, payload.
    ///
    /// | Format  | Bytes |
    /// |---------|-------|
    /// | ASCII   | GS k m n d1...dn |
    /// | Hex     | 1D 6B m n d1...dn |
    /// | Decimal | 29 107 m n d1...dn |
    ///
    /// Geometry (width/height/HRI) must be configured beforehand; see
    /// [`print`] for the full sequence.
    pub fn symbol(symbology: Symbology, data: &[u8]) -> Result<Vec<u8>, ReciboError> {
        validate(symbology, data)?;

        let mut cmd = Vec::with_capacity(4 + data.len());
        cmd.push(GS);
        cmd.push(b'k');
        cmd.push(symbology as u8);
        cmd.push(data.len() as u8);
        cmd.extend_from_slice(data);
        Ok(cmd)
    }

    /// Build the complete print sequence for a 1D barcode:
    /// width, height, HRI position, symbol, trailing line feed.
    ///
    /// ## Example
    ///
    /// ```
    /// use recibo::protocol::barcode::barcode1d::{self, BarcodeOptions, Symbology};
    ///
    /// let cmd = barcode1d::print(Symbology::Ean13, b"5901234123457",
    ///     &BarcodeOptions::default()).unwrap();
    ///
    /// // GS w 2, GS h 162, GS H 2, then the symbol itself
    /// assert_eq!(&cmd[0..3], &[0x1D, 0x77, 2]);
    /// assert_eq!(&cmd[3..6], &[0x1D, 0x68, 162]);
    /// assert_eq!(&cmd[6..9], &[0x1D, 0x48, 2]);
    /// assert_eq!(&cmd[9..13], &[0x1D, 0x6B, 67, 13]);
    /// ```
    pub fn print(
        symbology: Symbology,
        data: &[u8],
        options: &BarcodeOptions,
    ) -> Result<Vec<u8>, ReciboError> {
        let symbol = symbol(symbology, data)?;

        let mut cmd = Vec::with_capacity(9 + symbol.len() + 1);
        cmd.extend(set_width(options.width));
        cmd.extend(set_height(options.height));
        cmd.extend(set_hri_position(options.hri));
        cmd.extend(symbol);
        cmd.push(LF);
        Ok(cmd)
    }
}

// ============================================================================
// QR CODE COMMANDS (GS ( k)
// ============================================================================

/// QR code command builders
///
/// QR symbols are configured and printed through the `GS ( k` two-dimensional
/// function group: each step is a small command carrying a function code.
/// Older firmwares without this group get the software-rendered fallback in
/// the render layer instead.
pub mod qr {
    use super::{GS, LF, u16_le};
    use crate::error::ReciboError;

    /// Practical payload ceiling: QR model 2 version 40 binary capacity.
    const MAX_DATA_LEN: usize = 2953;

    /// QR error correction level
    ///
    /// Higher levels survive more damage but shrink capacity.
    ///
    /// | Level | Recovery | Best For |
    /// |-------|----------|----------|
    /// | L | ~7% | Clean receipts |
    /// | M | ~15% | General use (default) |
    /// | Q | ~25% | Small modules |
    /// | H | ~30% | Logos over the symbol |
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    #[repr(u8)]
    pub enum EcLevel {
        L = 48,
        #[default]
        M = 49,
        Q = 50,
        H = 51,
    }

    impl EcLevel {
        /// Parse the single-letter level names used by POS front-ends.
        /// Unknown names fall back to M, matching common firmware defaults.
        pub fn parse(name: &str) -> Self {
            match name {
                "L" | "l" => EcLevel::L,
                "Q" | "q" => EcLevel::Q,
                "H" | "h" => EcLevel::H,
                _ => EcLevel::M,
            }
        }
    }

    /// Configuration for a printed QR symbol
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct QrOptions {
        /// Module (cell) size in dots, 1-16
        pub module_size: u8,
        /// Error correction level
        pub ec_level: EcLevel,
    }

    impl Default for QrOptions {
        fn default() -> Self {
            // 6-dot modules scan reliably from ~10cm on 203 DPI paper
            Self { module_size: 6, ec_level: EcLevel::M }
        }
    }

    /// # Select QR Model (GS ( k fn=65)
    ///
    /// | Format  | Bytes |
    /// |---------|-------|
    /// | Hex     | 1D 28 6B 04 00 31 41 32 00 |
    ///
    /// Always selects model 2 (the only model modern firmwares implement);
    /// the trailing 0 is a reserved parameter.
    #[inline]
    pub fn select_model() -> Vec<u8> {
        vec![GS, b'(', b'k', 4, 0, 0x31, 0x41, 0x32, 0x00]
    }

    /// # Set Module Size (GS ( k fn=67)
    ///
    /// | Format  | Bytes |
    /// |---------|-------|
    /// | Hex     | 1D 28 6B 03 00 31 43 n |
    ///
    /// `n` is the module edge length in dots (1-16).
    pub fn set_module_size(n: u8) -> Result<Vec<u8>, ReciboError> {
        if !(1..=16).contains(&n) {
            return Err(ReciboError::InvalidParameter(format!(
                "QR module size must be 1-16, got {n}"
            )));
        }
        Ok(vec![GS, b'(', b'k', 3, 0, 0x31, 0x43, n])
    }

    /// # Set Error Correction Level (GS ( k fn=69)
    ///
    /// | Format  | Bytes |
    /// |---------|-------|
    /// | Hex     | 1D 28 6B 03 00 31 45 n |
    #[inline]
    pub fn set_error_correction(level: EcLevel) -> Vec<u8> {
        vec![GS, b'(', b'k', 3, 0, 0x31, 0x45, level as u8]
    }

    /// # Store Symbol Data (GS ( k fn=80)
    ///
    /// | Format  | Bytes |
    /// |---------|-------|
    /// | Hex     | 1D 28 6B pL pH 31 50 30 d1...dk |
    ///
    /// `pL pH` is the little-endian byte count of the parameters, i.e.
    /// data length + 3 (for cn, fn, m).
    pub fn store_data(data: &[u8]) -> Result<Vec<u8>, ReciboError> {
        if data.is_empty() {
            return Err(ReciboError::InvalidParameter(
                "QR data must not be empty".into(),
            ));
        }
        if data.len() > MAX_DATA_LEN {
            return Err(ReciboError::InvalidParameter(format!(
                "QR data too long: {} bytes (max {MAX_DATA_LEN})",
                data.len()
            )));
        }

        let [pl, ph] = u16_le((data.len() + 3) as u16);
        let mut cmd = Vec::with_capacity(8 + data.len());
        cmd.push(GS);
        cmd.push(b'(');
        cmd.push(b'k');
        cmd.push(pl);
        cmd.push(ph);
        cmd.push(0x31);
        cmd.push(0x50); // fn = 'P': store
        cmd.push(0x30); // m = '0'
        cmd.extend_from_slice(data);
        Ok(cmd)
    }

    /// # Print Stored Symbol (GS ( k fn=81)
    ///
    /// | Format  | Bytes |
    /// |---------|-------|
    /// | Hex     | 1D 28 6B 03 00 31 51 30 |
    #[inline]
    pub fn print_symbol() -> Vec<u8> {
        vec![GS, b'(', b'k', 3, 0, 0x31, 0x51, 0x30]
    }

    /// Build the complete QR print sequence:
    /// model, module size, error correction, store, print, line feed.
    ///
    /// ## Example
    ///
    /// ```
    /// use recibo::protocol::barcode::qr::{self, QrOptions};
    ///
    /// let cmd = qr::print_sequence(b"HELLO", &QrOptions::default()).unwrap();
    /// assert_eq!(&cmd[0..9], &[0x1D, 0x28, 0x6B, 4, 0, 0x31, 0x41, 0x32, 0x00]);
    /// ```
    pub fn print_sequence(data: &[u8], options: &QrOptions) -> Result<Vec<u8>, ReciboError> {
        let mut cmd = Vec::new();
        cmd.extend(select_model());
        cmd.extend(set_module_size(options.module_size)?);
        cmd.extend(set_error_correction(options.ec_level));
        cmd.extend(store_data(data)?);
        cmd.extend(print_symbol());
        cmd.push(LF);
        Ok(cmd)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::barcode1d::{self, BarcodeOptions, HriPosition, Symbology};
    use super::qr::{self, EcLevel, QrOptions};

    #[test]
    fn test_symbol_header() {
        let cmd = barcode1d::symbol(Symbology::Code128, b"ORDER-1234").unwrap();
        assert_eq!(&cmd[0..4], &[0x1D, 0x6B, 73, 10]);
        assert_eq!(&cmd[4..], b"ORDER-1234");
    }

    #[test]
    fn test_symbol_type_codes() {
        assert_eq!(barcode1d::symbol(Symbology::UpcA, b"01234567890").unwrap()[2], 65);
        assert_eq!(barcode1d::symbol(Symbology::Ean13, b"590123412345").unwrap()[2], 67);
        assert_eq!(barcode1d::symbol(Symbology::Code39, b"HELLO-123").unwrap()[2], 69);
        assert_eq!(barcode1d::symbol(Symbology::Code93, b"HELLO").unwrap()[2], 72);
    }

    #[test]
    fn test_empty_data_rejected() {
        assert!(barcode1d::symbol(Symbology::Code128, b"").is_err());
    }

    #[test]
    fn test_ean13_length_check() {
        assert!(barcode1d::symbol(Symbology::Ean13, b"5901234123457").is_ok());
        assert!(barcode1d::symbol(Symbology::Ean13, b"59012").is_err());
        assert!(barcode1d::symbol(Symbology::Ean13, b"59012341234AB").is_err());
    }

    #[test]
    fn test_itf_requires_even_digits() {
        assert!(barcode1d::symbol(Symbology::Itf, b"12345678").is_ok());
        assert!(barcode1d::symbol(Symbology::Itf, b"1234567").is_err());
    }

    #[test]
    fn test_code39_charset() {
        assert!(barcode1d::symbol(Symbology::Code39, b"ABC-123 $").is_ok());
        assert!(barcode1d::symbol(Symbology::Code39, b"abc").is_err());
    }

    #[test]
    fn test_print_sequence_layout() {
        let opts = BarcodeOptions { width: 3, height: 100, hri: HriPosition::None };
        let cmd = barcode1d::print(Symbology::Code39, b"TEST", &opts).unwrap();

        assert_eq!(&cmd[0..3], &[0x1D, 0x77, 3]); // GS w
        assert_eq!(&cmd[3..6], &[0x1D, 0x68, 100]); // GS h
        assert_eq!(&cmd[6..9], &[0x1D, 0x48, 0]); // GS H
        assert_eq!(&cmd[9..13], &[0x1D, 0x6B, 69, 4]); // GS k
        assert_eq!(&cmd[13..17], b"TEST");
        assert_eq!(cmd[17], 0x0A); // trailing LF
    }

    #[test]
    fn test_width_clamped() {
        assert_eq!(barcode1d::set_width(0), vec![0x1D, 0x77, 2]);
        assert_eq!(barcode1d::set_width(9), vec![0x1D, 0x77, 6]);
    }

    #[test]
    fn test_symbology_parse() {
        assert_eq!(Symbology::parse("ean13").unwrap(), Symbology::Ean13);
        assert_eq!(Symbology::parse("CODE128").unwrap(), Symbology::Code128);
        assert!(Symbology::parse("AZTEC").is_err());
    }

    #[test]
    fn test_qr_select_model() {
        assert_eq!(
            qr::select_model(),
            vec![0x1D, 0x28, 0x6B, 0x04, 0x00, 0x31, 0x41, 0x32, 0x00]
        );
    }

    #[test]
    fn test_qr_module_size() {
        assert_eq!(
            qr::set_module_size(6).unwrap(),
            vec![0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x43, 6]
        );
        assert!(qr::set_module_size(0).is_err());
        assert!(qr::set_module_size(17).is_err());
    }

    #[test]
    fn test_qr_error_correction() {
        assert_eq!(
            qr::set_error_correction(EcLevel::L),
            vec![0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x45, 48]
        );
        assert_eq!(qr::set_error_correction(EcLevel::H)[7], 51);
    }

    #[test]
    fn test_qr_store_data_length() {
        let cmd = qr::store_data(b"HELLO").unwrap();
        // pL pH = data length + 3 = 8, little-endian
        assert_eq!(&cmd[0..8], &[0x1D, 0x28, 0x6B, 8, 0, 0x31, 0x50, 0x30]);
        assert_eq!(&cmd[8..], b"HELLO");
    }

    #[test]
    fn test_qr_store_data_long_payload() {
        let data = vec![b'x'; 300];
        let cmd = qr::store_data(&data).unwrap();
        // 303 = 0x012F -> [0x2F, 0x01]
        assert_eq!(cmd[3], 0x2F);
        assert_eq!(cmd[4], 0x01);
    }

    #[test]
    fn test_qr_empty_rejected() {
        assert!(qr::store_data(b"").is_err());
    }

    #[test]
    fn test_qr_print_sequence_ends_with_print_and_lf() {
        let cmd = qr::print_sequence(b"HELLO", &QrOptions::default()).unwrap();
        let tail = &cmd[cmd.len() - 9..];
        assert_eq!(&tail[0..8], &[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x51, 0x30]);
        assert_eq!(tail[8], 0x0A);
    }

    #[test]
    fn test_ec_level_parse() {
        assert_eq!(EcLevel::parse("L"), EcLevel::L);
        assert_eq!(EcLevel::parse("h"), EcLevel::H);
        assert_eq!(EcLevel::parse("bogus"), EcLevel::M);
    }
}
