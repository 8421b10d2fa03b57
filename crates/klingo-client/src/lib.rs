//! Client for the Klingo practice-management platform.
//!
//! Klingo exposes virtually every operation through one generic query
//! endpoint (`/aql`): a POST carries a list of named, parameterized queries
//! and the response maps each query's caller-chosen alias to its result.
//! [`client::KlingoClient`] implements that protocol — login, single and
//! batched query execution, file transfer — and the domain modules layer
//! convenience methods for the common entities (patients, schedules,
//! encounters, billing, inventory, records, registry lookups) on top of it.
//!
//! ```no_run
//! use klingo_client::{KlingoClient, KlingoConfig};
//!
//! # async fn run() -> klingo_client::Result<()> {
//! let client = KlingoClient::new(KlingoConfig::new("irb")?)?;
//! client.login("USER", "SECRET").await?;
//!
//! let patients = client.patients().search("Maria", 1).await?;
//! let schedules = client.schedules().list(&Default::default()).await?;
//! # let _ = (patients, schedules);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod client;
pub mod models;

mod admin;
mod clinical;
mod crm;
mod encounters;
mod finance;
mod insurers;
mod inventory;
mod patients;
mod practitioners;
mod registry;
mod scheduling;

pub use admin::{Settings, Tasks, Users};
pub use client::{KlingoClient, KlingoClientBuilder};
pub use clinical::{Authorizations, LabReports, MedicalRecords};
pub use crm::{Crm, Reports};
pub use encounters::Encounters;
pub use finance::{Billing, Finance, Payments};
pub use insurers::Insurers;
pub use inventory::Inventory;
pub use models::{InventoryRequestParams, ScheduleListParams};
pub use patients::Patients;
pub use practitioners::{Practitioners, Specialties};
pub use registry::Registry;
pub use scheduling::{Bookings, Schedules};

pub use klingo_core::aql::{unwrap_alias, QueryDescriptor, RoutingHints};
pub use klingo_core::config::KlingoConfig;
pub use klingo_core::Error;

/// Convenient result alias that reuses the shared Klingo error type.
pub type Result<T> = klingo_core::Result<T>;
