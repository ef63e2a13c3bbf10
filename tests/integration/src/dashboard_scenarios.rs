//! Store and filter flows over the seeded dashboard data

use pitwatch_domain::{
    seed, DomainError, MachineFilters, MachineRegistry, MachineStatus, MachineType,
    NotificationCenter, NotificationTab, Role, UserDirectory, UserDraft,
};

use crate::test_utils::init_test_logging;

fn ids<'a>(machines: impl IntoIterator<Item = &'a pitwatch_domain::Machine>) -> Vec<&'a str> {
    machines.into_iter().map(|m| m.id.as_str()).collect()
}

#[test]
fn test_filtered_view_is_ordered_subset() {
    init_test_logging();
    let registry = MachineRegistry::with_machines(seed::machines());

    let filters = MachineFilters {
        status: Some(MachineStatus::Online),
        location: Some("Sector A".to_string()),
        ..MachineFilters::default()
    };
    let visible = registry.visible("", &filters);
    assert_eq!(ids(visible.iter().copied()), vec!["1", "5"]);

    // Every visible machine exists in the store, in store order
    let all = ids(registry.all());
    let mut cursor = 0;
    for id in ids(visible) {
        let position = all[cursor..].iter().position(|x| *x == id).expect("in store");
        cursor += position + 1;
    }
}

#[test]
fn test_empty_query_and_filters_show_everything() {
    let registry = MachineRegistry::with_machines(seed::machines());
    let visible = registry.visible("", &MachineFilters::default());
    assert_eq!(ids(visible), ids(registry.all()));

    let users = UserDirectory::with_users(seed::users());
    assert_eq!(users.visible("").len(), users.all().len());
}

#[test]
fn test_search_ignores_case() {
    let registry = MachineRegistry::with_machines(seed::machines());
    let lower = ids(registry.visible("crusher", &MachineFilters::default()));
    let upper = ids(registry.visible("CRUSHER", &MachineFilters::default()));
    assert_eq!(lower, vec!["1"]);
    assert_eq!(lower, upper);

    let by_type = MachineFilters {
        machine_type: Some(MachineType::Crusher),
        ..MachineFilters::default()
    };
    assert_eq!(ids(registry.visible("", &by_type)), vec!["1"]);
}

#[test]
fn test_toggle_twice_restores_machine() {
    let mut registry = MachineRegistry::with_machines(seed::machines());
    let before = registry.get("1").cloned().expect("seeded");

    assert_eq!(registry.toggle_status("1"), Some(MachineStatus::Offline));
    assert_eq!(registry.toggle_status("1"), Some(MachineStatus::Online));
    assert_eq!(registry.get("1"), Some(&before));

    // Maintenance toggles back to online
    assert_eq!(registry.toggle_status("4"), Some(MachineStatus::Online));
    assert_eq!(registry.toggle_status("missing"), None);
}

#[test]
fn test_user_id_reused_after_deleting_max() {
    let mut users = UserDirectory::with_users(seed::users());
    let max = users.all().iter().map(|u| u.id).max().expect("seeded");

    assert!(users.delete(max));
    let remaining_max = users.all().iter().map(|u| u.id).max().unwrap_or(0);
    let added = users
        .add(UserDraft::new("Ana Lopez", "ana@example.com").with_role(Role::Editor))
        .expect("valid draft");
    assert_eq!(added.id, remaining_max + 1);
    assert!(added.id <= max);
    assert_eq!(users.get(added.id).map(|u| u.name.as_str()), Some("Ana Lopez"));
}

#[test]
fn test_mark_all_as_read_is_idempotent() {
    let mut center = NotificationCenter::with_notifications(seed::notifications());
    let unread = center.unread_count();
    assert!(unread > 0);

    assert_eq!(center.mark_all_as_read(), unread);
    let snapshot = center.all().to_vec();

    assert_eq!(center.mark_all_as_read(), 0);
    assert_eq!(center.all(), snapshot.as_slice());
    assert_eq!(center.unread_count(), 0);
    assert!(center.visible("", &NotificationTab::Unread).is_empty());
}

#[test]
fn test_deleted_notification_is_gone() {
    let mut center = NotificationCenter::with_notifications(seed::notifications());
    assert_eq!(center.len(), 8);

    assert!(center.delete(3));
    assert_eq!(center.len(), 7);
    assert!(center.get(3).is_none());
    assert!(matches!(center.open(3), Err(DomainError::NotFound { .. })));
    assert!(!center.delete(3));
}

#[test]
fn test_opening_notification_clears_unread_tab_entry() {
    let mut center = NotificationCenter::with_notifications(seed::notifications());
    let first_unread = center
        .visible("", &NotificationTab::Unread)
        .first()
        .map(|n| n.id)
        .expect("seeded unread");
    let before = center.unread_count();

    let opened = center.open(first_unread).expect("exists");
    assert!(opened.read);
    assert_eq!(center.unread_count(), before - 1);
    assert!(center
        .visible("", &NotificationTab::Unread)
        .iter()
        .all(|n| n.id != first_unread));
}
