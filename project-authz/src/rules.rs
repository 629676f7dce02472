// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Project-local permission rules
//!
//! Each predicate here evaluates a single project's own configuration,
//! ignoring its `restricted_by` ancestry.  These are the building blocks for
//! the composite decisions in [`crate::permissions`], which apply the same
//! local rule to the project itself and to every project in its restriction
//! closure.
//!
//! All of these are pure functions of the project's configuration: no side
//! effects, no lookups.

use crate::glob;
use flotilla_common::api::Destination;
use flotilla_common::api::GroupKind;
use flotilla_common::api::Project;

/// Returns whether `project`'s own rules permit managing resources of the
/// given group/kind
///
/// Deny entries take precedence: if any deny entry matches, the kind is
/// blocked no matter what the allow list says.  Otherwise a non-empty allow
/// list must contain a matching entry.  An empty allow list falls back to
/// the scope's default: namespaced kinds are permitted, cluster-scoped kinds
/// are denied.  Cluster-scoped objects affect the whole cluster, so they
/// require an explicit grant.
pub fn group_kind_permitted(
    project: &Project,
    group_kind: &GroupKind,
    namespaced: bool,
) -> bool {
    let (allow, deny) = if namespaced {
        (&project.namespaced_resource_allow, &project.namespaced_resource_deny)
    } else {
        (&project.cluster_resource_allow, &project.cluster_resource_deny)
    };

    if group_kind_in_list(deny, group_kind) {
        return false;
    }
    if allow.is_empty() {
        return namespaced;
    }
    group_kind_in_list(allow, group_kind)
}

fn group_kind_in_list(list: &[GroupKind], group_kind: &GroupKind) -> bool {
    list.iter().any(|entry| {
        glob::matches(&entry.group, &group_kind.group)
            && glob::matches(&entry.kind, &group_kind.kind)
    })
}

/// Returns whether `project`'s own rules permit placing resources at
/// `destination`
///
/// A destination is permitted iff at least one entry in the project's
/// destination list matches it on both the cluster side and the namespace.
/// The cluster side matches when the entry's non-empty `name` pattern
/// matches the destination's cluster name or its non-empty `server` pattern
/// matches the destination's server URL.
pub fn destination_permitted(
    project: &Project,
    destination: &Destination,
) -> bool {
    project.destinations.iter().any(|entry| {
        cluster_matches(entry, destination)
            && glob::matches(&entry.namespace, &destination.namespace)
    })
}

fn cluster_matches(entry: &Destination, destination: &Destination) -> bool {
    (!entry.name.is_empty() && glob::matches(&entry.name, &destination.name))
        || (!entry.server.is_empty()
            && glob::matches(&entry.server, &destination.server))
}

/// Returns whether `project`'s own rules permit deploying from the source
/// repository at `repo_url`
pub fn source_permitted(project: &Project, repo_url: &str) -> bool {
    project.source_repos.iter().any(|entry| glob::matches(entry, repo_url))
}
