//! # facp-io: Tabular Sources and Importers
//!
//! Loads the module catalog, the placement-rule corpus, and the pricing
//! overrides from external documents.
//!
//! The spreadsheet readers themselves are external collaborators; this
//! crate depends only on the tabular contract ([`SheetData`]: a named grid
//! of string cells) and wires CSV up as the concrete source. Importers are
//! tolerant by design: malformed numeric cells and rows without a model
//! number are collected into [`facp_core::Diagnostics`] instead of
//! aborting the load, while a truly unreadable source fails with
//! [`facp_core::ConfigError::UnreadableCatalog`].

pub mod importers;
pub mod pricing;
pub mod sheet;

pub use importers::{load_catalog, load_placement_rules};
pub use pricing::{load_pricing_overrides, PricingOverrides};
pub use sheet::{read_csv_sheet, SheetData, SheetRecord};
