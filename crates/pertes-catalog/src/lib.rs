//! Pertes Catalog
//!
//! The in-memory product catalog and everything the user sees of it:
//! mutating operations that persist on every change, search and ordering,
//! the browse/edit projection and the session state machine that ties them
//! together.
//!
//! # Core Operations
//!
//! - **Mutate**: add, rename or recode, toggle visibility, delete
//! - **Query**: case-insensitive search, accent-insensitive ordering
//! - **Project**: browse vs edit items, routing of item events
//! - **Session**: mode switching, forms, deletion prompt, notices
//!
//! # Example
//!
//! ```rust,ignore
//! use pertes_catalog::{Catalog, CatalogConfig, ItemEvent, Session};
//! use pertes_store::{CatalogStore, FileSlot, JsonFileSeed};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CatalogConfig::load("pertes.toml")?;
//! let store = CatalogStore::new(FileSlot::new(&config.data_dir, &config.slot_name));
//! let catalog = Catalog::open(store, &JsonFileSeed::new("products.json")).await?;
//!
//! let mut session = Session::with_config(catalog, &config);
//! session.toggle_mode();
//! session.open_add();
//! session.submit_form("Lait", "3017620422003")?;
//!
//! for item in session.view() {
//!     println!("{} {}", item.name, item.barcode);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod catalog;
pub mod collation;
pub mod config;
pub mod error;
pub mod form;
pub mod notice;
pub mod query;
pub mod session;
pub mod view;

pub use catalog::Catalog;
pub use collation::base_key;
pub use config::{CatalogConfig, PersistPolicy, RenderConfig};
pub use error::{CatalogError, CatalogResult, ConfigError, Field, ValidationError};
pub use form::{validate_inputs, FormMode, ProductForm, Submission};
pub use notice::{Notice, DEFAULT_NOTICE_TTL};
pub use query::{filter_by_search, sort_by_name};
pub use session::{BarcodeDetail, Overlay, Session};
pub use view::{
    project, render_view, route, BarcodeRenderer, ItemEvent, Mode, ModeChrome, RenderOptions,
    RenderedItem, Route, Symbology, ViewItem, VisibilityToggle,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
