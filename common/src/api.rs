// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Data structures shared across the Flotilla control plane
//!
//! These are the API-level representations of the objects that the platform
//! stores and that the authorization engine evaluates.  They carry serde and
//! schemars derives because the surrounding CRUD services persist them as
//! API objects; the engine itself only ever reads them.

use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FormatResult;

/// Identifies a type of platform resource, mostly for error reporting
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Eq,
    JsonSchema,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub enum ResourceType {
    Project,
    Application,
    ApplicationSet,
}

impl Display for ResourceType {
    fn fmt(&self, f: &mut Formatter) -> FormatResult {
        write!(
            f,
            "{}",
            match self {
                ResourceType::Project => "project",
                ResourceType::Application => "application",
                ResourceType::ApplicationSet => "application set",
            }
        )
    }
}

/// An API resource type identifier: API group plus kind
///
/// Either field may be a glob pattern when the value appears in a project's
/// allow or deny lists.  Kinds in the core API group have an empty `group`.
#[derive(
    Clone, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize,
)]
pub struct GroupKind {
    pub group: String,
    pub kind: String,
}

impl GroupKind {
    pub fn new(group: &str, kind: &str) -> GroupKind {
        GroupKind { group: group.to_string(), kind: kind.to_string() }
    }
}

impl Display for GroupKind {
    fn fmt(&self, f: &mut Formatter) -> FormatResult {
        if self.group.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}/{}", self.group, self.kind)
        }
    }
}

/// A target cluster identity plus the namespace a resource would be placed
/// into
///
/// The same structure describes both a concrete placement being evaluated
/// and an entry in a project's destination list, in which case each field is
/// a glob pattern.  The cluster may be identified by its registered name or
/// by its API server URL; a pattern entry matches the cluster side if a
/// non-empty `name` pattern matches the candidate's name or a non-empty
/// `server` pattern matches the candidate's server URL.
#[derive(
    Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize,
)]
pub struct Destination {
    #[serde(default)]
    pub server: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub namespace: String,
}

impl Display for Destination {
    fn fmt(&self, f: &mut Formatter) -> FormatResult {
        let cluster =
            if self.name.is_empty() { &self.server } else { &self.name };
        write!(f, "{}/{}", cluster, self.namespace)
    }
}

/// A tenancy unit that owns deployable units and constrains what they may do
///
/// A project scopes the source repositories its applications may deploy
/// from, the destinations they may deploy to, and the resource kinds they
/// may manage.  Beyond its own configuration, a project may name other
/// projects in `restricted_by`; those projects (and, transitively, the
/// projects restricting *them*) further constrain it.  The `restricted_by`
/// graph is not required to be acyclic and may name projects that do not
/// exist; the authorization engine in `flotilla-project-authz` is
/// responsible for handling both.
#[derive(Clone, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
pub struct Project {
    pub name: String,

    /// Names of other projects that impose additional restrictions on this
    /// one, combined with this project's own rules by logical AND
    #[serde(default)]
    pub restricted_by: Vec<String>,

    /// Glob patterns for repository URLs that applications in this project
    /// may deploy from
    #[serde(default)]
    pub source_repos: Vec<String>,

    /// Destination patterns that applications in this project may deploy to
    #[serde(default)]
    pub destinations: Vec<Destination>,

    /// Allow list for namespaced resource kinds; when empty, namespaced
    /// kinds are permitted unless denied
    #[serde(default)]
    pub namespaced_resource_allow: Vec<GroupKind>,

    /// Deny list for namespaced resource kinds; takes precedence over the
    /// allow list
    #[serde(default)]
    pub namespaced_resource_deny: Vec<GroupKind>,

    /// Allow list for cluster-scoped resource kinds; when empty, all
    /// cluster-scoped kinds are denied
    #[serde(default)]
    pub cluster_resource_allow: Vec<GroupKind>,

    /// Deny list for cluster-scoped resource kinds; takes precedence over
    /// the allow list
    #[serde(default)]
    pub cluster_resource_deny: Vec<GroupKind>,
}

impl Project {
    /// Returns a `Project` with the given name and no restrictions beyond
    /// the defaults (no sources, no destinations, no cluster-scoped kinds)
    pub fn new(name: &str) -> Project {
        Project {
            name: name.to_string(),
            restricted_by: Vec::new(),
            source_repos: Vec::new(),
            destinations: Vec::new(),
            namespaced_resource_allow: Vec::new(),
            namespaced_resource_deny: Vec::new(),
            cluster_resource_allow: Vec::new(),
            cluster_resource_deny: Vec::new(),
        }
    }
}
