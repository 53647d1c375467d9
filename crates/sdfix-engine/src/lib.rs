//! sdfix Engine
//!
//! Rewrites legacy sales-document code so that references to the retired
//! status tables (`VBUK`, `VBUP`) and the `VBTYP` document category point at
//! their successors (`VBAK`, `VBAP`, `VBTYPL`). Every rewritten fragment is
//! followed by a provenance comment recording who changed it and when.
//!
//! ## Key Concepts
//!
//! - **Rule**: one entry of the fixed rewrite table (compound or standalone form)
//! - **Provenance tag**: the `"Added By Pwc <date>,` comment appended to each rewrite
//! - **Clock**: the only source of non-determinism, injectable for tests
//!
//! The engine performs no I/O and cannot fail: any string is valid input.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use sdfix_engine::{FixedClock, Remediator, SourceMetadata};
//!
//! let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
//! let remediator = Remediator::new(FixedClock::new(date));
//!
//! let metadata = SourceMetadata::new("ZSD_REPORT", "ZSD_REPORT_TOP", "PROG");
//! let result = remediator.remediate(metadata, "SELECT * FROM vbuk.".to_string());
//!
//! assert_eq!(result.original_code, "SELECT * FROM vbuk.");
//! assert_eq!(
//!     result.remediated_code,
//!     "SELECT * FROM VBAK \"Added By Pwc 2024-05-01,."
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod engine;
pub mod model;
pub mod rule;
pub mod tag;

// Re-exports for convenience
pub use engine::{apply_rules, Remediation, Remediator, RuleOutcome};
pub use model::{RemediationResult, SourceMetadata};
pub use rule::{Rule, RuleForm, RULES};
pub use tag::{Clock, FixedClock, ProvenanceTag, SystemClock, ATTRIBUTOR};
