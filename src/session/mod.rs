//! Insertion engine and session state
//!
//! A `Session` holds the working text and the ordered set of inserted
//! keywords for one analysis. `insert` consults the placement scorer,
//! splices the chosen span and records the keyword; repeated inserts of
//! the same keyword are no-ops.
//!
//! # Lifecycle
//!
//! ```text
//! begin_analysis(text) ──> ticket (pending)
//!        │                      │
//!        │        complete_analysis(ticket, result)
//!        │                      │
//!        │             working text = text, inserted = {}
//!        ▼                      ▼
//!   insert(k) rejected     insert(k) allowed
//! ```
//!
//! Starting another analysis while one is pending supersedes it; the older
//! ticket's result is discarded when it arrives.

mod state;
mod view;

pub use state::{AnalysisTicket, InsertOutcome, Session, SessionError};
pub use view::{KeywordView, SessionView};
