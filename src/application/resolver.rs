//! Workspace resolution.
//!
//! Decides, without any I/O, which workspace a freshly authenticated
//! session should be bound to.

use crate::domain::Workspace;

/// Result of resolving a workspace list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The account has no workspaces.
    NoWorkspace,
    /// Bind the session to this workspace without asking.
    Commit(Workspace),
    /// Let the user pick; list is in backend order.
    AskUser(Vec<Workspace>),
}

/// Resolve a backend workspace list against the remembered workspace id.
///
/// A single workspace is always committed. With several, the remembered id
/// wins (first match on duplicate ids); otherwise the user is asked.
#[must_use]
pub fn resolve_workspace(workspaces: &[Workspace], remembered_id: Option<&str>) -> Resolution {
    match workspaces {
        [] => Resolution::NoWorkspace,
        [only] => Resolution::Commit(only.clone()),
        _ => remembered_id
            .and_then(|id| workspaces.iter().find(|ws| ws.id == id))
            .map_or_else(
                || Resolution::AskUser(workspaces.to_vec()),
                |ws| Resolution::Commit(ws.clone()),
            ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AccentColor;

    fn ws(id: &str) -> Workspace {
        Workspace::new(id, format!("Workspace {id}"), AccentColor::default())
    }

    #[test]
    fn test_empty_list_has_no_workspace() {
        assert_eq!(resolve_workspace(&[], None), Resolution::NoWorkspace);
        assert_eq!(resolve_workspace(&[], Some("w1")), Resolution::NoWorkspace);
    }

    #[test]
    fn test_single_workspace_ignores_remembered_id() {
        let list = [ws("w1")];

        for remembered in [None, Some("w1"), Some("other")] {
            assert_eq!(
                resolve_workspace(&list, remembered),
                Resolution::Commit(ws("w1"))
            );
        }
    }

    #[test]
    fn test_remembered_workspace_is_committed() {
        let list = [ws("w1"), ws("w2"), ws("w3")];

        assert_eq!(
            resolve_workspace(&list, Some("w3")),
            Resolution::Commit(ws("w3"))
        );
        assert_eq!(
            resolve_workspace(&list, Some("w1")),
            Resolution::Commit(ws("w1"))
        );
    }

    #[test]
    fn test_no_match_asks_user_in_backend_order() {
        let list = vec![ws("w2"), ws("w1")];

        assert_eq!(
            resolve_workspace(&list, None),
            Resolution::AskUser(list.clone())
        );
        assert_eq!(
            resolve_workspace(&list, Some("w9")),
            Resolution::AskUser(list)
        );
    }

    #[test]
    fn test_duplicate_ids_first_match_wins() {
        let first = Workspace::new("dup", "First", AccentColor::rgb(1, 1, 1));
        let second = Workspace::new("dup", "Second", AccentColor::rgb(2, 2, 2));
        let list = [ws("w1"), first.clone(), second];

        assert_eq!(
            resolve_workspace(&list, Some("dup")),
            Resolution::Commit(first)
        );
    }

    #[test]
    fn test_id_match_is_exact() {
        let list = [ws("w1"), ws("w2")];
        assert!(matches!(
            resolve_workspace(&list, Some("W1")),
            Resolution::AskUser(_)
        ));
        assert!(matches!(
            resolve_workspace(&list, Some("w")),
            Resolution::AskUser(_)
        ));
    }
}
