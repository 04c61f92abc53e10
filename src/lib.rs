//! Message-line candidate selection and text assembly for programmable
//! traffic signs.
//!
//! A sign message is composed line by line from a pool of candidate
//! text fragments supplied by an external cache. This crate keeps the
//! eligible candidates of each output line in a stable display order
//! with minimal-range change notifications for table views, and
//! reconstructs multi-line, multi-page display text from parsed message
//! markup.
//!
//! ## Core Types
//!
//! - [`Candidate`] - A selectable text fragment for one output line
//! - [`candidate_order`] - The (line, rank, content, name) total order
//! - [`OrderedLineSet`] - Sorted per-line container with change
//!   notification and selection state
//! - [`CandidateIndex`] - Eligible candidates partitioned per output line
//! - [`MessageAssembler`] - Rebuilds display strings from a [`Span`] stream
//! - [`parse_markup`] / [`assemble_markup`] - Bracket-tag message markup
//!
//! ## Example
//!
//! ```
//! use sign_message::assemble_markup;
//!
//! let lines = assemble_markup("ROAD WORK[nl]NEXT 5 MILES").unwrap();
//! assert_eq!(lines, vec!["ROAD WORK", "NEXT 5 MILES", ""]);
//! ```

mod assembly;
mod candidate;
mod display;
mod index;
mod line_set;
mod markup;
mod order;

// Candidate model
pub use candidate::{Candidate, GroupId, SignId, RANK_MAX, RANK_MIN};

// Ordering
pub use order::candidate_order;

// Per-line container
pub use line_set::{LineSetObserver, OrderedLineSet, SetChange};

// Eligibility and partitioning
pub use index::{CandidateEvent, CandidateIndex, GroupFilter, GroupMembership};

// Span assembly
pub use assembly::{
    FontId,
    LineJustification,
    MessageAssembler,
    PageJustification,
    Span,
    MIN_LINES_PER_PAGE,
};

// Message markup
pub use markup::{assemble_markup, parse_markup, MarkupError, MarkupResult};

// Display
pub use display::{LineSetDisplay, PageDisplay};
