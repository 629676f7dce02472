// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Traversal of the project restriction graph
//!
//! For important background, see the [`crate`] documentation.  We said there
//! that a project may name other projects in `restricted_by`, and that those
//! projects' rules apply to it in addition to its own.  Since each of those
//! projects may itself be restricted by further projects, a decision about
//! one project is really a decision about the full transitive closure of
//! projects reachable through the `restricted_by` relation.
//!
//! [`check_restricted_by`] walks that closure.  It's deliberately an
//! iterative breadth-first traversal with an explicit visited set rather
//! than recursion: the graph is user-supplied configuration, so it may
//! contain cycles (including a project naming itself), diamonds where two
//! chains converge on the same project, and arbitrary depth.  The explicit
//! queue makes termination easy to see and keeps a malformed hierarchy from
//! growing the call stack.
//!
//! The walker knows nothing about *what* is being checked.  The caller
//! supplies a predicate, and the walker ANDs that predicate across the
//! closure, stopping at the first denial or error.  The four public
//! decisions in [`crate::permissions`] all reduce to this one primitive with
//! different predicates.

use flotilla_common::Error;
use flotilla_common::api::Project;
use std::collections::BTreeSet;
use std::collections::VecDeque;

/// Evaluates `check_project` against every distinct project in `root`'s
/// restriction closure, combining the verdicts with logical AND
///
/// `get_project` resolves a project name to the project's current
/// configuration, failing with [`Error::ObjectNotFound`] when no such
/// project exists.  Lookups are issued strictly sequentially, one per
/// distinct name in the closure.
///
/// Guarantees:
///
/// - `root` itself is never fetched or checked, even if its own name appears
///   somewhere in the closure.  Evaluating the root's own rule is the
///   caller's job.
/// - Every other project in the closure is checked at most once, no matter
///   how many paths reach it.
/// - Evaluation is fail-fast: the first `false` verdict yields `Ok(false)`
///   and the first error is returned verbatim, in both cases without
///   visiting the rest of the closure.  An error is never converted into a
///   denial, so callers can tell "denied" from "undeterminable".
/// - A root with an empty `restricted_by` yields `Ok(true)` without calling
///   either closure.
pub fn check_restricted_by<G, C>(
    root: &Project,
    mut get_project: G,
    mut check_project: C,
) -> Result<bool, Error>
where
    G: FnMut(&str) -> Result<Project, Error>,
    C: FnMut(&Project) -> Result<bool, Error>,
{
    // Seeding the visited set with the root's name is what keeps the root
    // out of the traversal: any edge back to it dequeues as already-visited.
    let mut visited = BTreeSet::new();
    visited.insert(root.name.clone());

    let mut queue: VecDeque<String> =
        root.restricted_by.iter().cloned().collect();

    // Duplicates are filtered at dequeue time, not enqueue time, so the
    // queue may transiently hold a name twice.  The second copy is discarded
    // when it reaches the front.
    while let Some(name) = queue.pop_front() {
        if !visited.insert(name.clone()) {
            continue;
        }
        let project = get_project(&name)?;
        if !check_project(&project)? {
            return Ok(false);
        }
        queue.extend(project.restricted_by.iter().cloned());
    }

    Ok(true)
}

#[cfg(test)]
mod test {
    use super::check_restricted_by;
    use flotilla_common::Error;
    use flotilla_common::api::Project;
    use flotilla_common::api::ResourceType;
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::collections::BTreeSet;

    fn project(name: &str, restricted_by: &[&str]) -> Project {
        let mut project = Project::new(name);
        project.restricted_by =
            restricted_by.iter().map(|name| name.to_string()).collect();
        project
    }

    fn store(projects: &[Project]) -> BTreeMap<String, Project> {
        projects.iter().map(|p| (p.name.clone(), p.clone())).collect()
    }

    fn lookup(
        store: &BTreeMap<String, Project>,
    ) -> impl FnMut(&str) -> Result<Project, Error> + '_ {
        |name| {
            store.get(name).cloned().ok_or_else(|| {
                Error::not_found_by_name(ResourceType::Project, name)
            })
        }
    }

    #[test]
    fn test_no_parents_checks_nothing() {
        let root = project("root", &[]);
        let permitted = check_restricted_by(
            &root,
            |name| panic!("unexpected lookup of project {:?}", name),
            |project: &Project| {
                panic!("unexpected check of project {:?}", project.name)
            },
        )
        .unwrap();
        assert!(permitted);
    }

    #[test]
    fn test_one_parent_verdict_passes_through() {
        for verdict in [true, false] {
            let root = project("root", &["parent"]);
            let permitted = check_restricted_by(
                &root,
                |_| Ok(project("parent", &[])),
                |_| Ok(verdict),
            )
            .unwrap();
            assert_eq!(permitted, verdict);
        }
    }

    #[test]
    fn test_lookup_error_is_returned_verbatim() {
        let root = project("root", &["parent"]);
        let error = check_restricted_by(
            &root,
            |name| Err(Error::not_found_by_name(ResourceType::Project, name)),
            |_| Ok(true),
        )
        .unwrap_err();
        assert_eq!(
            error,
            Error::not_found_by_name(ResourceType::Project, "parent")
        );
    }

    #[test]
    fn test_check_error_is_returned_verbatim() {
        let root = project("root", &["parent"]);
        let error = check_restricted_by(
            &root,
            |_| Ok(project("parent", &[])),
            |_| Err(Error::internal_error("malformed pattern")),
        )
        .unwrap_err();
        assert_eq!(error, Error::internal_error("malformed pattern"));
    }

    #[test]
    fn test_cycle_back_to_root_terminates() {
        // "root" -> "b" -> "root".  The cycle must not loop and must never
        // fetch or check the root itself.
        let root = project("root", &["b"]);
        let permitted = check_restricted_by(
            &root,
            |name| match name {
                "b" => Ok(project("b", &["root"])),
                _ => panic!("unexpected lookup of project {:?}", name),
            },
            |project| {
                assert_ne!(project.name, "root");
                Ok(true)
            },
        )
        .unwrap();
        assert!(permitted);
    }

    #[test]
    fn test_self_reference_is_a_noop() {
        // Behaves exactly like an empty `restricted_by`: zero calls.
        let root = project("root", &["root"]);
        let permitted = check_restricted_by(
            &root,
            |name| panic!("unexpected lookup of project {:?}", name),
            |project: &Project| {
                panic!("unexpected check of project {:?}", project.name)
            },
        )
        .unwrap();
        assert!(permitted);
    }

    /// Walks the graph rooted at "a" and asserts every project other than
    /// the root is fetched and checked exactly once.
    fn assert_visits_each_project_once(projects: &[Project]) {
        let store = store(projects);
        let checked = RefCell::new(BTreeSet::new());
        let permitted = check_restricted_by(
            &store["a"],
            |name| {
                assert!(
                    !checked.borrow().contains(name),
                    "project {:?} fetched after it was already checked",
                    name
                );
                store.get(name).cloned().ok_or_else(|| {
                    Error::not_found_by_name(ResourceType::Project, name)
                })
            },
            |project| {
                assert!(
                    checked.borrow_mut().insert(project.name.clone()),
                    "project {:?} checked twice",
                    project.name
                );
                Ok(true)
            },
        )
        .unwrap();
        assert!(permitted);
        assert_eq!(checked.borrow().len(), projects.len() - 1);
    }

    #[test]
    fn test_every_project_visited_once_in_tree() {
        assert_visits_each_project_once(&[
            project("a", &["b", "e"]),
            project("b", &["c", "d"]),
            project("c", &[]),
            project("d", &[]),
            project("e", &["f", "g"]),
            project("f", &[]),
            project("g", &[]),
        ]);
    }

    #[test]
    fn test_every_project_visited_once_with_back_edge() {
        // Same shape, but "g" points back at "c", forming a diamond.
        assert_visits_each_project_once(&[
            project("a", &["b", "e"]),
            project("b", &["c", "d"]),
            project("c", &[]),
            project("d", &[]),
            project("e", &["f", "g"]),
            project("f", &[]),
            project("g", &["c"]),
        ]);
    }

    #[test]
    fn test_denial_stops_traversal() {
        // "deny" is queued ahead of "never", so "never" must not be fetched
        // once "deny" fails the check.
        let store = store(&[
            project("a", &["deny", "never"]),
            project("deny", &[]),
            project("never", &[]),
        ]);
        let checked = RefCell::new(Vec::new());
        let permitted = check_restricted_by(
            &store["a"],
            |name| {
                assert_ne!(name, "never", "traversal continued past denial");
                lookup(&store)(name)
            },
            |project| {
                checked.borrow_mut().push(project.name.clone());
                Ok(project.name != "deny")
            },
        )
        .unwrap();
        assert!(!permitted);
        assert_eq!(*checked.borrow(), vec!["deny".to_string()]);
    }

    #[test]
    fn test_missing_project_deep_in_chain() {
        let store = store(&[
            project("a", &["b"]),
            project("b", &["does-not-exist"]),
        ]);
        let error =
            check_restricted_by(&store["a"], lookup(&store), |_| Ok(true))
                .unwrap_err();
        assert_eq!(
            error,
            Error::not_found_by_name(ResourceType::Project, "does-not-exist")
        );
    }
}
