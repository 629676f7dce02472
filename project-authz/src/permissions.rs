// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Composite authorization decisions
//!
//! These are the decision functions the rest of the control plane calls to
//! gate mutating operations.  Each one evaluates a project's own local rule
//! (see [`crate::rules`]) and then requires unanimous agreement from the
//! project's restriction closure (see [`crate::restrictions`]), applying the
//! same local rule to each restricting project on its own.  The walker
//! handles the recursive expansion by following every visited project's
//! `restricted_by`, so the per-project rule is deliberately non-recursive.
//!
//! All decisions return `Result<bool, Error>`.  `Ok(false)` is an
//! authoritative denial; `Err(_)` means the decision could not be made (a
//! project in the chain failed to resolve, for instance) and callers must
//! fail closed without conflating the two.

use crate::restrictions;
use crate::rules;
use flotilla_common::Error;
use flotilla_common::api::Destination;
use flotilla_common::api::GroupKind;
use flotilla_common::api::Project;
use slog::debug;
use slog::o;
use slog::trace;

/// The project authorization engine
///
/// This is stateless aside from the logger: every decision is a fresh
/// evaluation against the project configurations returned by the
/// caller-supplied `get_project` lookup.  The lookup is typically backed by
/// the platform's project store and must return the current project for a
/// name or [`Error::ObjectNotFound`]; any consistency guarantees are the
/// store's concern, not ours.
pub struct ProjectAuthz {
    log: slog::Logger,
}

impl ProjectAuthz {
    pub fn new(log: &slog::Logger) -> ProjectAuthz {
        ProjectAuthz { log: log.new(o!("component" => "ProjectAuthz")) }
    }

    /// Decides whether `project` (and everything restricting it) permits
    /// managing resources of `group_kind`
    ///
    /// `namespaced` selects which pair of allow/deny lists applies; see
    /// [`rules::group_kind_permitted`] for the precedence rules.
    pub fn is_group_kind_permitted<G>(
        &self,
        project: &Project,
        group_kind: &GroupKind,
        namespaced: bool,
        get_project: G,
    ) -> Result<bool, Error>
    where
        G: FnMut(&str) -> Result<Project, Error>,
    {
        if !rules::group_kind_permitted(project, group_kind, namespaced) {
            debug!(self.log, "group/kind denied by project's own rules";
                "project" => %project.name,
                "group_kind" => %group_kind,
                "namespaced" => namespaced,
            );
            return Ok(false);
        }
        self.permitted_by_closure(project, get_project, "group/kind", |p| {
            rules::group_kind_permitted(p, group_kind, namespaced)
        })
    }

    /// Decides whether `project` (and everything restricting it) permits
    /// placing resources at `destination`
    pub fn is_destination_permitted<G>(
        &self,
        project: &Project,
        destination: &Destination,
        get_project: G,
    ) -> Result<bool, Error>
    where
        G: FnMut(&str) -> Result<Project, Error>,
    {
        if !rules::destination_permitted(project, destination) {
            debug!(self.log, "destination denied by project's own rules";
                "project" => %project.name,
                "destination" => %destination,
            );
            return Ok(false);
        }
        self.permitted_by_closure(project, get_project, "destination", |p| {
            rules::destination_permitted(p, destination)
        })
    }

    /// Decides whether `project` (and everything restricting it) permits
    /// deploying from the source repository at `repo_url`
    pub fn is_source_permitted<G>(
        &self,
        project: &Project,
        repo_url: &str,
        get_project: G,
    ) -> Result<bool, Error>
    where
        G: FnMut(&str) -> Result<Project, Error>,
    {
        if !rules::source_permitted(project, repo_url) {
            debug!(self.log, "source repo denied by project's own rules";
                "project" => %project.name,
                "repo_url" => %repo_url,
            );
            return Ok(false);
        }
        self.permitted_by_closure(project, get_project, "source", |p| {
            rules::source_permitted(p, repo_url)
        })
    }

    /// Decides whether a concrete resource placement is permitted: a
    /// resource of `group_kind`, in `namespace` (or cluster-scoped when
    /// `None`), placed at `destination`
    ///
    /// Cluster-scoped resources are gated on the cluster resource lists
    /// alone.  Destination is not consulted for them here: cluster-level
    /// placement is authorized once, when the owning application is
    /// admitted, not per resource.  For namespaced resources the resource's
    /// actual namespace always wins over whatever namespace the caller left
    /// on `destination`.
    pub fn is_resource_permitted<G>(
        &self,
        project: &Project,
        group_kind: &GroupKind,
        namespace: Option<&str>,
        destination: &Destination,
        mut get_project: G,
    ) -> Result<bool, Error>
    where
        G: FnMut(&str) -> Result<Project, Error>,
    {
        let Some(namespace) = namespace else {
            return self.is_group_kind_permitted(
                project,
                group_kind,
                false,
                get_project,
            );
        };

        if !self.is_group_kind_permitted(
            project,
            group_kind,
            true,
            &mut get_project,
        )? {
            return Ok(false);
        }

        let destination = Destination {
            namespace: namespace.to_string(),
            ..destination.clone()
        };
        self.is_destination_permitted(project, &destination, get_project)
    }

    /// Applies `rule` to every project in `project`'s restriction closure,
    /// requiring unanimous agreement
    fn permitted_by_closure<G>(
        &self,
        project: &Project,
        get_project: G,
        what: &str,
        rule: impl Fn(&Project) -> bool,
    ) -> Result<bool, Error>
    where
        G: FnMut(&str) -> Result<Project, Error>,
    {
        trace!(self.log, "checking restriction closure";
            "project" => %project.name,
            "check" => what,
        );
        restrictions::check_restricted_by(project, get_project, |ancestor| {
            let permitted = rule(ancestor);
            if !permitted {
                debug!(self.log, "denied by restricting project";
                    "project" => %project.name,
                    "restricted_by" => %ancestor.name,
                    "check" => what,
                );
            }
            Ok(permitted)
        })
    }
}
