//! Extraction run orchestration.
//!
//! This module provides [`ParcelExtractor`], which takes a resolved
//! [`ExtractConfig`] through the whole pipeline:
//!
//! ```text
//! bbox (State-Plane ft) ──► Reprojector ──► bbox (EPSG:3857)
//!                                              │
//!                                              ▼
//!                                       ParcelProvider ──► ParcelCollection
//!                                                               │
//!                                  ┌────────────────────────────┤
//!                                  ▼                            ▼
//!                          build_drawing ──► .dxf      export_metadata ──► .json
//! ```
//!
//! Each stage consumes the previous stage's output; nothing is retried and
//! no output is written unless the query returned parcels.

mod config;
mod error;
mod extractor;

pub use config::{ExtractConfig, DEFAULT_OUTPUT};
pub use error::AppError;
pub use extractor::{ExtractEvent, ExtractSummary, ParcelExtractor};
