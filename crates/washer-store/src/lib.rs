//! # washer-store: Snapshot Persistence for the Washer Company
//!
//! Saves a [`Company`](washer_core::Company) to disk and brings it back on the
//! next start.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Washer Company Data Flow                         │
//! │                                                                         │
//! │  Startup                                   Save                         │
//! │     │                                        │                          │
//! │     ▼                                        ▼                          │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  washer-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  StoreConfig  │───►│ SnapshotStore │    │  seed (bin)  │  │   │
//! │  │   │ (config.rs)   │    │  (store.rs)   │    │  demo data   │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  └────────────────────────────────┼────────────────────────────────┘   │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     Snapshot file (JSON)                        │   │
//! │  │   ~/.local/share/company/washer_company.json                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Snapshot location, loaded from defaults, TOML and env
//! - [`store`] - Atomic persist and versioned restore
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use washer_store::{SnapshotStore, StoreConfig};
//!
//! let store = SnapshotStore::new(StoreConfig::load_or_default(None));
//! let mut company = store.restore_or_default();
//! company.add_customer("Jane Doe", "555-1212");
//! store.persist(&company)?;
//! ```

use tracing_subscriber::EnvFilter;

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use store::SnapshotStore;

/// Installs the global tracing subscriber for binaries.
///
/// `RUST_LOG` wins when set; otherwise `info` everywhere and `debug` for the
/// washer crates.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,washer=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();
}
