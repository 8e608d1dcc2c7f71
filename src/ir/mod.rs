//! # Intermediate Representation (IR)
//!
//! This module provides the IR layer for receipt printing. The IR is a
//! "bytecode" representation that sits between the document layer and raw
//! ESC/POS protocol bytes.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────────┐     ┌──────────┐
//! │ Job builder │ ──► │     IR      │ ──► │ Drain points │ ──► │ Codegen  │
//! │(declarative)│     │  (Vec<Op>)  │     │  (pacing)    │     │ (bytes)  │
//! └─────────────┘     └─────────────┘     └──────────────┘     └──────────┘
//! ```
//!
//! ## Benefits of IR
//!
//! 1. **Inspectable**: Debug and visualize what will be printed
//! 2. **Testable**: Unit test encoding without an actual printer
//! 3. **Paceable**: Drain points slot in between ops, not mid-command
//!
//! ## Example
//!
//! ```
//! use recibo::ir::{Op, Program};
//! use recibo::protocol::text::Alignment;
//!
//! let mut program = Program::with_init();
//! program.push(Op::SetAlign(Alignment::Center));
//! program.push(Op::SetBold(true));
//! program.push(Op::Text("HELLO".into()));
//! program.push(Op::Newline);
//! program.push(Op::SetBold(false));
//! program.push(Op::Cut { partial: false });
//!
//! // Inspect the IR
//! println!("{:#?}", program);
//!
//! // Insert pacing markers and generate bytes
//! let bytes = program.insert_drain_points().to_bytes();
//! assert!(bytes.starts_with(&[0x1B, 0x40]));
//! ```

mod chunking;
mod codegen;
mod ops;

pub use chunking::{DEFAULT_DRAIN_THRESHOLD_BYTES, DRAIN_MARKER};
pub use ops::*;
