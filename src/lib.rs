//! # questcheck - Quest Flow Validation Engine
//!
//! **questcheck** validates quest documents: directed graphs of typed nodes
//! (entry points, dialogs, decisions, condition branches, action nodes and
//! progress markers) authored for an RPG quest system. It reports every
//! structural defect, every dangling reference into the game's reference
//! catalogs and every rule violation that spans several quests.
//!
//! ## Core Workflow
//!
//! 1.  **Load the catalog**: `load_catalog` reads the NPC, item, faction,
//!     resource and object ID sets, or build a `ReferenceCatalog` in memory.
//! 2.  **Build a validator**: `Validator::builder(catalog)` with optional
//!     toggles such as flow bookkeeping.
//! 3.  **Validate**: `Validator::validate` checks one `Quest`;
//!     `Validator::report` checks a whole `LoadedQuests` repository, including
//!     the cross-document rules.
//! 4.  **Render**: `ReportFormatter` turns issues into the line format the CLI
//!     prints, and every report type serializes with `serde`.
//!
//! Validation never stops at the first problem. Every check runs and the
//! issues of all checks are returned in a fixed order.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use questcheck::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let catalog = load_catalog("data")?;
//!     let validator = Validator::builder(catalog).build();
//!
//!     let loaded = load_quests("quests")?;
//!     let report = validator.report(&loaded);
//!     for line in ReportFormatter::format_report(&report, true) {
//!         println!("{}", line);
//!     }
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod graph;
pub mod loader;
pub mod prelude;
pub mod quest;
pub mod report;
pub mod validator;
