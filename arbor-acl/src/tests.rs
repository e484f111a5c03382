// SPDX-License-Identifier: MIT OR Apache-2.0

use assert_matches::assert_matches;

use crate::test_utils::{MemoryDirectory, MemoryPrincipal, MemoryRepository, setup_logging};
use crate::traits::Repository;
use crate::{AccessManager, AclError, Config, DisplayClass, Privilege, RightsSet, names};

type TestManager = AccessManager<MemoryRepository, MemoryDirectory>;

fn manager() -> TestManager {
    setup_logging();

    let alice = MemoryPrincipal::user("alice");
    let repository = MemoryRepository::default().with_session(vec![alice.clone()]);
    let directory = MemoryDirectory::new()
        .with_principal(alice)
        .with_principal(MemoryPrincipal::user("bob"))
        .with_principal(MemoryPrincipal::group("editors"));
    AccessManager::new(repository, directory)
}

fn granting(list: &[&str]) -> RightsSet {
    RightsSet::granting(list.iter().map(|name| Privilege::new(*name)))
}

#[test]
fn set_rights_is_idempotent() {
    let mut manager = manager();
    let rights = granting(&[names::READ, names::WRITE])
        .with_denied([Privilege::new(names::LOCK_MANAGEMENT)]);

    manager.set_rights("bob", "/content", &rights).unwrap();
    manager.set_rights("bob", "/content", &rights).unwrap();

    let acl = manager.repository().acl("/content").unwrap();
    let entries = acl.entries_of(&MemoryPrincipal::user("bob"));
    assert_eq!(entries.len(), 2);
    assert!(entries[0].polarity.is_allow());
    assert!(entries[1].polarity.is_deny());

    let declared = manager.resolve_declared_for_principal("bob", "/content").unwrap();
    assert_eq!(declared, rights);
}

#[test]
fn later_rights_supersede_earlier_ones() {
    let mut manager = manager();

    manager.set_rights("bob", "/content", &granting(&[names::READ])).unwrap();
    manager.set_rights("bob", "/content", &granting(&[names::WRITE])).unwrap();

    let declared = manager.acl_for_principal("bob", "/content").unwrap();
    assert_eq!(declared.granted_names(), vec![names::WRITE]);
    assert!(declared.denied().is_empty());
}

#[test]
fn other_principals_are_untouched() {
    let mut manager = manager();
    manager.set_rights("bob", "/content", &granting(&[names::READ])).unwrap();
    manager.set_rights("editors", "/content", &granting(&[names::WRITE])).unwrap();
    manager.set_rights("bob", "/content", &RightsSet::new()).unwrap();

    let declared = manager.resolve_declared("/content").unwrap();
    assert_eq!(declared.len(), 1);
    assert_eq!(
        declared.get_by_name("editors").unwrap().granted_names(),
        vec![names::WRITE]
    );
}

#[test]
fn everyone_is_resolved_without_directory() {
    let mut manager = manager();
    manager.set_rights("Everyone", "/", &granting(&[names::READ])).unwrap();

    let acl = manager.repository().acl("/").unwrap();
    assert_eq!(acl.entries_of(&MemoryPrincipal::everyone()).len(), 1);
    let effective = manager.resolve_effective_for_principal("everyone", "/content").unwrap();
    assert_eq!(effective.granted_names(), vec![names::READ]);
}

#[test]
fn configured_everyone_literal() {
    let alice = MemoryPrincipal::user("alice");
    let mut manager = AccessManager::with_config(
        MemoryRepository::default(),
        MemoryDirectory::new().with_principal(alice),
        Config::new().with_everyone_principal("all-users"),
    );

    manager.set_rights("ALL-USERS", "/", &granting(&[names::READ])).unwrap();
    assert_matches!(
        manager.set_rights("everyone", "/", &granting(&[names::READ])),
        Err(AclError::PrincipalNotFound(_))
    );
}

#[test]
fn missing_principal_is_not_found() {
    let mut manager = manager();
    assert_matches!(
        manager.set_rights("mallory", "/content", &granting(&[names::READ])),
        Err(AclError::PrincipalNotFound(name)) if name == "mallory"
    );
}

#[test]
fn directory_failure_is_internal() {
    let mut manager = AccessManager::new(
        MemoryRepository::default(),
        MemoryDirectory::new().failing(),
    );
    let err = manager
        .set_rights("bob", "/content", &granting(&[names::READ]))
        .unwrap_err();
    assert!(err.is_internal());
}

#[test]
fn abstract_privileges_are_rejected() {
    let mut manager = manager();
    manager
        .repository_mut()
        .register_privilege("ex:everything", true, &[names::READ])
        .unwrap();

    let result = manager.set_rights("bob", "/content", &granting(&["ex:everything"]));
    assert_matches!(result, Err(AclError::Internal { context, .. }) if context.contains("bob"));
}

#[test]
fn conflicting_rights_deny_wins() {
    let mut manager = manager();
    let rights = granting(&[names::READ, names::REMOVE_NODE])
        .with_denied([Privilege::new(names::REMOVE_NODE)]);

    manager.set_rights("alice", "/content", &rights).unwrap();

    let declared = manager.resolve_declared_for_principal("alice", "/content").unwrap();
    assert_eq!(declared.granted_names(), vec![names::READ]);
    assert_eq!(declared.denied_names(), vec![names::REMOVE_NODE]);
    assert!(declared.conflicts().is_empty());
    assert!(!manager.can_delete("/content"));
}

#[test]
fn delete_is_checked_against_parent() {
    let mut manager = manager();
    manager
        .set_rights("alice", "/content/page", &granting(&[names::REMOVE_NODE]))
        .unwrap();
    manager
        .set_rights(
            "alice",
            "/content",
            &RightsSet::new().with_denied([Privilege::new(names::REMOVE_CHILD_NODES)]),
        )
        .unwrap();

    // Removing the node itself is allowed, its parent refuses to lose a child.
    assert!(
        manager
            .repository()
            .has_privileges("/content/page", &[names::REMOVE_NODE])
            .unwrap()
    );
    assert!(!manager.can_delete("/content/page"));

    manager
        .set_rights("alice", "/content", &granting(&[names::REMOVE_CHILD_NODES]))
        .unwrap();
    assert!(manager.can_delete("/content/page"));
}

#[test]
fn capability_queries() {
    let mut manager = manager();
    manager.set_rights("alice", "/content", &granting(&[names::WRITE])).unwrap();
    manager
        .set_rights("alice", "/home", &granting(&[names::MODIFY_PROPERTIES]))
        .unwrap();

    assert!(manager.can_add_children("/content/page"));
    assert!(manager.can_delete_children("/content"));
    assert!(manager.can_modify_properties("/content"));
    assert!(!manager.can_read_access_control("/content"));
    assert!(!manager.can_modify_access_control("/content"));

    assert!(manager.can_update_authorizable("bob"));
    assert!(!manager.can_delete_authorizable("bob"));
    assert!(!manager.can_update_authorizable("mallory"));
}

#[test]
fn repository_failures_are_internal_or_false() {
    let mut manager = manager();
    manager.repository_mut().fail_on("/content");

    assert_matches!(manager.resolve_declared("/content"), Err(AclError::Internal { .. }));
    assert_matches!(
        manager.set_rights("bob", "/content", &granting(&[names::READ])),
        Err(AclError::Internal { .. })
    );
    assert!(!manager.can_modify_properties("/content"));
}

#[test]
fn display_class_follows_config() {
    let manager = AccessManager::with_config(
        MemoryRepository::default(),
        MemoryDirectory::new(),
        Config::new().with_display_privileges("ex:all", "ex:read", "ex:write"),
    );

    assert_eq!(
        manager.display_class(&granting(&["ex:read", "ex:write"])),
        DisplayClass::ReadWrite
    );
    assert_eq!(
        manager.display_class(&granting(&[names::READ])),
        DisplayClass::Custom
    );
}

#[test]
fn supported_privileges_keep_hierarchy() {
    let manager = manager();
    let supported = manager.supported_privileges("/content").unwrap();

    let write = supported.iter().find(|p| p.name() == names::WRITE).unwrap();
    assert!(write.is_aggregate());
    assert_eq!(write.declared_aggregate_privileges().len(), 4);
    assert!(supported.iter().all(|p| p.is_aggregate() == !p.declared_aggregate_privileges().is_empty()));
}
