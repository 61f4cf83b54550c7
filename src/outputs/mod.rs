//! Output generation for the batch runner.
//!
//! # Submodules
//!
//! - [`text`]: one human-readable line per outcome on stdout
//! - [`json`]: a [`BatchReport`](crate::models::BatchReport) file for later inspection
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     ├── 08-15-02.json
//!     └── 19-40-11.json
//! ```

pub mod json;
pub mod text;
