//! Service layer for the sync application.
//!
//! This module contains the remote data access:
//! - OData fetching (`ODataClient`, behind the `DatasetSource` trait)

mod odata;

pub use odata::{DatasetSource, METADATA_RESOURCE, ODataClient, extract_records};
