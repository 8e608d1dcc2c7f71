//! # Recibo CLI
//!
//! Command-line interface for ESC/POS receipt encoding and printing.
//!
//! ## Usage
//!
//! ```bash
//! # List available receipt templates
//! recibo print --list
//!
//! # Print a demo receipt over /dev/rfcomm0
//! recibo print demo
//!
//! # Print a JSON job file on an 80mm printer
//! recibo print order.json --profile pos80
//!
//! # Encode to a file instead of printing
//! recibo encode demo-full --out receipt.bin
//!
//! # Pipe encoded bytes straight to a device
//! recibo encode demo > /dev/usb/lp0
//!
//! # Render styled text to a PNG without a printer
//! recibo preview "CAFE LUNA" --bold --size 48 --out headline.png
//! ```

use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use recibo::{
    ReciboError,
    document::JobSpec,
    fontsize::SizeRequest,
    printer::DeviceProfile,
    receipt,
    render::{self, Bitmap, PrintStyle},
    transport::{SerialTransport, Transport},
};

/// Recibo - ESC/POS receipt printer utility
#[derive(Parser, Debug)]
#[command(name = "recibo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a receipt template or JSON job file to the printer
    Print {
        /// Template name or job file path (omit to see available templates)
        source: Option<String>,

        /// List available templates
        #[arg(long)]
        list: bool,

        /// Printer device path
        #[arg(long, default_value = "/dev/rfcomm0")]
        device: String,

        /// Printer profile: "mini58", "pos80", "custom:WIDTH[xDPI]" or
        /// inline JSON. Overrides the job file's profile.
        #[arg(long)]
        profile: Option<String>,

        /// Bytes per write before pacing kicks in
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Pause between chunks in milliseconds
        #[arg(long)]
        chunk_delay_ms: Option<u64>,
    },

    /// Encode a receipt to ESC/POS bytes without a printer
    Encode {
        /// Template name or job file path (omit to see available templates)
        source: Option<String>,

        /// List available templates
        #[arg(long)]
        list: bool,

        /// Printer profile: "mini58", "pos80", "custom:WIDTH[xDPI]" or
        /// inline JSON. Overrides the job file's profile.
        #[arg(long)]
        profile: Option<String>,

        /// Output file (stdout if omitted)
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Render styled text to a PNG image
    Preview {
        /// Text to render
        text: String,

        /// Output PNG file
        #[arg(long, value_name = "FILE", default_value = "preview.png")]
        out: PathBuf,

        /// Printer profile the layout is computed for
        #[arg(long)]
        profile: Option<String>,

        /// Bold (1-dot smear)
        #[arg(long)]
        bold: bool,

        /// Italic (sheared)
        #[arg(long)]
        italic: bool,

        /// Underline
        #[arg(long)]
        underline: bool,

        /// White on black
        #[arg(long)]
        invert: bool,

        /// Font height in pixels
        #[arg(long)]
        size: Option<i32>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), ReciboError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Print {
            source,
            list,
            device,
            profile,
            chunk_size,
            chunk_delay_ms,
        } => {
            if list || source.is_none() {
                print_template_list();
                return Ok(());
            }

            let name = source.as_deref().unwrap();
            let profile = parse_profile_flag(profile.as_deref())?;
            let data = resolve_source(name, profile)?;

            println!("Printing {} ({} bytes)...", name, data.len());
            let mut transport = SerialTransport::open(&device)?;
            if let Some(size) = chunk_size {
                transport.set_chunk_size(size);
            }
            if let Some(ms) = chunk_delay_ms {
                transport.set_chunk_delay(Duration::from_millis(ms));
            }
            transport.write_all(&data)?;
            transport.flush()?;
            println!("Printed successfully!");
        }

        Commands::Encode {
            source,
            list,
            profile,
            out,
        } => {
            if list || source.is_none() {
                print_template_list();
                return Ok(());
            }

            let name = source.as_deref().unwrap();
            let profile = parse_profile_flag(profile.as_deref())?;
            let data = resolve_source(name, profile)?;

            match out {
                Some(path) => {
                    std::fs::write(&path, &data)?;
                    println!("Wrote {} bytes to {}", data.len(), path.display());
                }
                None => {
                    // Raw bytes only; keep stdout pipeable to a device.
                    std::io::stdout().write_all(&data)?;
                }
            }
        }

        Commands::Preview {
            text,
            out,
            profile,
            bold,
            italic,
            underline,
            invert,
            size,
        } => {
            let profile = parse_profile_flag(profile.as_deref())?.unwrap_or_default();
            let style = PrintStyle {
                bold,
                italic,
                underline,
                invert,
                size: size.map(SizeRequest::Pixels),
                ..PrintStyle::default()
            };

            let bitmap = render::text::render(&text, &style, &profile.config())?;
            save_png(&out, &bitmap)?;
            println!(
                "Saved {}x{} preview to {}",
                bitmap.width(),
                bitmap.height(),
                out.display()
            );
        }
    }

    Ok(())
}

fn print_template_list() {
    println!("Available receipts:");
    for name in receipt::list_receipts() {
        println!("  {}", name);
    }
    println!("\nOr pass the path of a JSON job file.");
}

/// Parse the --profile flag: shorthand name or inline JSON.
fn parse_profile_flag(flag: Option<&str>) -> Result<Option<DeviceProfile>, ReciboError> {
    match flag {
        None => Ok(None),
        Some(s) if s.trim_start().starts_with('{') => serde_json::from_str(s)
            .map(Some)
            .map_err(|e| ReciboError::InvalidParameter(format!("invalid profile JSON: {e}"))),
        Some(s) => DeviceProfile::parse(s).map(Some),
    }
}

/// Resolve a source argument: template name first, then job file path.
fn resolve_source(name: &str, profile: Option<DeviceProfile>) -> Result<Vec<u8>, ReciboError> {
    let template_config = profile.clone().unwrap_or_default().config();
    if let Some(data) = receipt::by_name(name, template_config) {
        return Ok(data);
    }

    let path = Path::new(name);
    if path.exists() {
        let json = std::fs::read_to_string(path)?;
        let spec = JobSpec::from_json(&json)?;
        // Explicit --profile wins over the profile pinned in the file.
        let config = match profile {
            Some(p) => p.config(),
            None => spec.config(),
        };
        return spec.build(config);
    }

    Err(ReciboError::InvalidParameter(format!(
        "unknown receipt '{}'; run with --list to see templates, or pass a job file path",
        name
    )))
}

/// Save a rendered bitmap as a PNG image
fn save_png(path: &PathBuf, bitmap: &Bitmap) -> Result<(), ReciboError> {
    use image::{GrayImage, Luma};

    let mut img = GrayImage::new(bitmap.width(), bitmap.height());
    for y in 0..bitmap.height() {
        for x in 0..bitmap.width() {
            let color = if bitmap.get(x, y) { 0u8 } else { 255u8 };
            img.put_pixel(x, y, Luma([color]));
        }
    }

    img.save(path)
        .map_err(|e| ReciboError::Encoding(format!("failed to save PNG: {e}")))?;

    Ok(())
}
