//! Buffer-driven adaptive bitrate (ABR) selection.
//!
//! Picks one rendition from a manifest's bitrate ladder per decision cycle.
//! The core is synchronous and performs no I/O: the host supplies bandwidth
//! and buffer measurements and owns eligibility state.
//!
//! ## Strategies
//!
//! - **Elastic** ([`ElasticSelector`]): a proportional-integral controller that
//!   divides a harmonic-mean bandwidth estimate by a buffer-error term, with
//!   dead-zone hold, anti-windup, cold start and hysteresis, then refines the
//!   pick against the player size.
//! - **Min-rebuffer** ([`min_rebuffer_max_bandwidth`]): highest bandwidth that
//!   can be fetched before the buffer runs dry.
//! - **Lowest video** ([`lowest_bitrate_compatible_variant`]): cheapest
//!   rendition that carries video.
//!
//! ## Example
//!
//! ```rust
//! use elastic_abr::{
//!     AttributeInspector, ElasticOptions, ElasticSelector, EligibilityMap, Manifest, Rendition,
//!     SelectionContext,
//! };
//!
//! let manifest = Manifest::new(vec![
//!     Rendition::new("low").with_bandwidth(500_000),
//!     Rendition::new("mid").with_bandwidth(1_500_000),
//!     Rendition::new("high").with_bandwidth(4_000_000),
//! ]);
//!
//! let mut selector = ElasticSelector::new(&ElasticOptions::default())?;
//! let eligibility = EligibilityMap::new();
//!
//! // 2 Mbps measured, nothing buffered yet
//! let ctx = SelectionContext::new(2_000_000.0, 0.0);
//! let selection = selector.select(&manifest, &ctx, &eligibility, &AttributeInspector);
//! assert_eq!(selection.map(|s| s.rendition.id.as_str()), Some("mid"));
//! # Ok::<(), elastic_abr::AbrError>(())
//! ```

#![forbid(unsafe_code)]

mod clock;
mod compare;
mod config;
mod controller;
mod eligibility;
mod error;
mod estimator;
mod filter;
mod inspect;
mod ladder;
mod lowest;
mod measurement;
mod rebuffer;
mod selector;
mod types;
mod viewport;

pub use clock::{Clock, ManualClock, SystemClock};
pub use compare::{compare_bandwidth, compare_resolution_width, stable_sort};
pub use config::{BandwidthSmoothing, ElasticOptions, Watermarks};
pub use controller::{
    BufferZone, ControllerState, ElasticController, ElasticDecision, ElasticReason,
};
pub use eligibility::{Eligibility, EligibilityMap};
pub use error::{AbrError, AbrResult};
pub use estimator::{HarmonicFilter, MovingAverageBandwidth};
pub use filter::Candidates;
pub use inspect::{AttributeInspector, CodecInfo, MediaInspector};
pub use ladder::{BitrateLadder, RateTarget, Saturation};
pub use lowest::lowest_bitrate_compatible_variant;
pub use measurement::{
    Measurements, SelectionContext, TimeRange, buffered_ahead, time_until_rebuffer,
};
pub use rebuffer::{
    ProportionalRequestTime, RebufferEstimate, RebufferSettings, RequestTimeEstimator, SyncPoint,
    SyncPoints, min_rebuffer_max_bandwidth,
};
pub use selector::{ElasticSelector, Selection, SelectionSource};
pub use types::{Manifest, Rendition, RenditionId, Resolution};
pub use viewport::{PlayerSize, refine_for_viewport};
