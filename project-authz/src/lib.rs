// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Project authorization subsystem
//!
//! ## Authorization basics
//!
//! Every deployable unit in Flotilla belongs to a **project**, and the
//! project's configuration scopes what the unit may do: which source
//! repositories it may deploy from, which cluster/namespace destinations it
//! may deploy to, and which API resource kinds it may manage.  Note that
//! this is authorization of *workloads*, not of users; whether a person may
//! create or modify a deployable unit is a separate, RBAC-shaped question
//! answered elsewhere in the control plane.
//!
//! Permission is not just a property of the unit's own project.  A project
//! may name other projects in its `restricted_by` list, and each of those
//! imposes its *own* rules on it -- and each of those may in turn be
//! restricted by further projects.  Concretely, suppose we have:
//!
//! - a project "payments" with `restricted_by: ["dev-only"]`, allowing any
//!   destination
//! - a project "dev-only" allowing only destinations matching
//!   `dev-*`/`dev-*`
//!
//! An application in "payments" may then deploy only to `dev-*` clusters,
//! even though "payments" itself allows everything: the effective permission
//! is the logical AND across the whole restriction closure.  Platform
//! operators use this to layer fleet-wide guardrails (a "no ConfigMaps"
//! project, a "dev clusters only" project) onto many tenant projects
//! without editing each one.
//!
//! Because `restricted_by` is ordinary user-supplied configuration, the
//! graph it describes may contain dangling names, cycles, and diamonds.
//! The engine treats a dangling name as a hard error (never as "no
//! restriction"), evaluates each reachable project exactly once, and never
//! evaluates the root project through its own closure.
//!
//! ## Control flow
//!
//! Callers (admission checks in the CRUD services, the reconciler deciding
//! whether to apply a resource) hold a project and a `get_project` lookup
//! backed by the project store.  They call one of the four decision methods
//! on [`ProjectAuthz`]; the method evaluates the project's own local rule
//! (module [`rules`]), then walks the restriction closure (module
//! [`restrictions`]) applying the same rule to every restricting project.
//! All rules share one glob dialect (module [`glob`]).
//!
//! Decisions are tri-state in practice: `Ok(true)` permit, `Ok(false)`
//! authoritative denial, `Err(_)` undeterminable.  Callers must fail closed
//! on errors and must not collapse them into denials -- an operator fixing
//! a dangling `restricted_by` reference needs to see the lookup failure.

pub mod glob;
pub mod restrictions;
pub mod rules;

mod permissions;
pub use permissions::ProjectAuthz;
