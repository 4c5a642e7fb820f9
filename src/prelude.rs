//! Prelude module for convenient imports
//!
//! Re-exports the types needed to load a quest repository, validate it and
//! render the result.
//!
//! # Example
//!
//! ```rust,no_run
//! use questcheck::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let catalog = ReferenceCatalog::new().with(CatalogKind::Character, ["NPC:Smith"]);
//! let validator = Validator::builder(catalog)
//!     .with_flow_bookkeeping(false)
//!     .build();
//!
//! let quest = load_quest_file(Path::new("quests/TheMissingHammer.yaml"))?;
//! let result = validator.validate(&quest);
//! println!("valid: {}", result.is_valid());
//! # Ok(())
//! # }
//! ```

// Validation
pub use crate::validator::{Validator, ValidatorBuilder, ValidatorOptions, validate_cross_quest};

// Quest model
pub use crate::quest::{
    Action, Condition, DialogMessage, DialogOption, EdgeField, LocalizedText, Locale, NodeId,
    NodeKind, NodeType, Quest, QuestNode, TerminalAction,
};

// Reference data
pub use crate::catalog::{CatalogKind, ReferenceCatalog, ReferenceLookup};

// Loading
pub use crate::loader::{LoadFailure, LoadedQuests, load_catalog, load_quest_file, load_quests};

// Reports
pub use crate::report::{ReportFormatter, ValidationIssue, ValidationReport, ValidationResult};

// Error types
pub use crate::error::{LoadError, QuestParseError};

pub use std::path::Path;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
