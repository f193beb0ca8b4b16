//! Core domain types for the Curbside busyness engine.
//!
//! The engine estimates how busy street candidates will be during a
//! prospective mobile-vendor service slot. This crate holds the shared
//! vocabulary: coordinate references and WKT/EWKT decoding, columnar
//! [`GeometryFrame`]s, zone busyness samples, street and event records,
//! service-window arithmetic, and the read-only source traits the excluded
//! persistence layer implements.
//!
//! Constructors return `Result` to surface invalid input early; every value
//! is a per-request read-only snapshot, so sources only need to be safely
//! shareable for reads.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod crs;
mod event;
mod frame;
mod sample;
mod source;
mod street;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;
mod window;

pub use crs::{Crs, GeometryError, decode_point, project_point};
pub use event::{EventError, EventRecord};
pub use frame::GeometryFrame;
pub use sample::{ZoneScoreSample, ZoneScoreSet};
pub use source::{
    EventRow, EventSource, SourceError, StreetRow, StreetSource, ZoneFilter, ZoneScoreRow,
    ZoneScoreSource,
};
pub use street::{RankedStreet, ScoredStreet, StreetRecord};
pub use window::{ServiceWindow, WindowError, truncate_to_hour};
