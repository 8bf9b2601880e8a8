//! Output generation: stdout summaries, SVG charts and the JSON snapshot.
//!
//! # Submodules
//!
//! - [`text`]: one human-readable line per team, candidate or season
//! - [`svg`]: bar, line and pie rendering to SVG markup
//! - [`charts`]: builds chart series from records and writes the SVG files
//! - [`json`]: writes the run's [`Snapshot`](crate::models::Snapshot)
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── standings.svg
//! ├── mvp_stats.svg
//! ├── mvp_probability.svg
//! ├── career_totals.svg
//! ├── career_deltas.svg
//! └── 2024/
//!     └── snapshot.json
//! ```

pub mod charts;
pub mod json;
pub mod svg;
pub mod text;
