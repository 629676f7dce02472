// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Flotilla Control Plane
//!
//! Flotilla is a multi-tenant deployment platform for clusters: deployable
//! units (applications) are grouped into projects, and projects scope what
//! each unit may deploy, from where, and to where.  This crate implements
//! common facilities used across the control plane: the API-level data
//! structures and the error taxonomy.  Other top-level crates implement
//! pieces of the control plane (e.g., `flotilla_project_authz`).

pub mod api;
pub mod error;

pub use error::Error;
pub use error::LookupType;
