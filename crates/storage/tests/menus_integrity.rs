#![forbid(unsafe_code)]

mod common;

use common::Site;
use tm_core::ContentKind;
use tm_core::menu::MenuTreeError;
use tm_storage::{NewContent, NewMenu, StoreError};

fn menu(title: &str, menu_type: &str, parent_id: Option<i64>, order: i64) -> NewMenu {
    NewMenu {
        title: title.to_string(),
        menu_type: menu_type.to_string(),
        parent_id,
        display_order: order,
        active: true,
        ..NewMenu::default()
    }
}

#[test]
fn menu_tree_orders_siblings_and_filters_by_type() {
    let mut site = Site::fresh();
    let trekking = site
        .store
        .insert_menu(menu("Trekking", "header", None, 2))
        .expect("menu");
    let tours = site
        .store
        .insert_menu(menu("Tours", "header", None, 1))
        .expect("menu");
    site.store
        .insert_menu(menu("Everest", "header", Some(trekking), 1))
        .expect("menu");
    site.store
        .insert_menu(menu("Annapurna", "header", Some(trekking), 0))
        .expect("menu");
    site.store
        .insert_menu(menu("Privacy", "footer", None, 0))
        .expect("menu");
    let mut hidden = menu("Hidden", "header", None, 0);
    hidden.active = false;
    site.store.insert_menu(hidden).expect("menu");

    let tree = site.store.menu_tree("header").expect("menu tree");
    let roots: Vec<i64> = tree.iter().map(|root| root.node.id).collect();
    assert_eq!(roots, vec![tours, trekking]);
    let children: Vec<&str> = tree[1]
        .children
        .iter()
        .map(|child| child.node.title.as_str())
        .collect();
    assert_eq!(children, vec!["Annapurna", "Everest"]);

    let json = serde_json::to_value(&tree).expect("serialize");
    assert_eq!(json[0]["type"], "header");
    assert_eq!(json[1]["children"][0]["displayOrder"], 0);
}

#[test]
fn children_of_inactive_parents_become_roots() {
    let mut site = Site::fresh();
    let mut parent = menu("Seasonal", "header", None, 0);
    parent.active = false;
    let parent_id = site.store.insert_menu(parent).expect("menu");
    site.store
        .insert_menu(menu("Winter Treks", "header", Some(parent_id), 0))
        .expect("menu");

    let tree = site.store.menu_tree("header").expect("menu tree");
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].node.title, "Winter Treks");
}

#[test]
fn cyclic_menus_fail_tree_assembly() {
    let mut site = Site::fresh();
    let first = site
        .store
        .insert_menu(menu("Loop A", "header", None, 0))
        .expect("menu");
    let second = site
        .store
        .insert_menu(menu("Loop B", "header", Some(first), 0))
        .expect("menu");
    site.raw()
        .execute("UPDATE menus SET parentId = ?1 WHERE id = ?2", [second, first])
        .expect("close the loop");

    let err = site.store.menu_tree("header").expect_err("cycle");
    assert_eq!(err.code(), "MENU_TREE");
    assert!(matches!(err, StoreError::Menu(MenuTreeError::Cycle { id }) if id == first));
}

#[test]
fn integrity_report_is_clean_on_consistent_data() {
    let mut site = Site::fresh();
    let place_id = site.place("Nepal", None);
    let mut linked = menu("Nepal", "header", None, 0);
    linked.url_segment_type = Some("place".to_string());
    linked.url_segment_id = Some(place_id);
    site.store.insert_menu(linked).expect("menu");

    let report = site.store.integrity_report().expect("report");
    assert!(report.is_clean(), "{report:?}");
}

#[test]
fn integrity_report_lists_every_finding() {
    let mut site = Site::fresh();
    let package_id = site.package("Bali Retreat", 7);
    site.store
        .insert_content(ContentKind::Article, NewContent::titled("Tibet"))
        .expect("article");

    let raw = site.raw();
    raw.execute_batch(&format!(
        "INSERT INTO menus (id, title, type, parentId, status, displayOrder, createdAt, updatedAt) VALUES
           (10, 'Orphan', 'header', 999, 1, 0, 'now', 'now'),
           (11, 'Self', 'header', 11, 1, 0, 'now', 'now'),
           (12, 'Broken', 'header', NULL, 1, 0, 'now', 'now'),
           (13, 'Fine', 'header', NULL, 1, 1, 'now', 'now'),
           (14, 'Fine', 'header', NULL, 1, 2, 'now', 'now');
         UPDATE menus SET urlSegmentType = 'package', urlSegmentId = 4242 WHERE id = 12;
         UPDATE menus SET urlSegmentType = 'package', urlSegmentId = {package_id} WHERE id = 13;
         INSERT INTO places (title, urlTitle, slug, status, createdAt, updatedAt)
           VALUES ('Tibet', 'Tibet', 'tibet', 1, 'now', 'now');"
    ))
    .expect("seed findings");

    let report = site.store.integrity_report().expect("report");
    assert!(!report.is_clean());

    let orphans: Vec<i64> = report.orphaned_menus.iter().map(|menu| menu.id).collect();
    assert_eq!(orphans, vec![10]);
    assert_eq!(report.cyclic_menus, vec![11]);

    assert_eq!(report.broken_menu_links.len(), 1);
    assert_eq!(report.broken_menu_links[0].id, 12);
    assert_eq!(report.broken_menu_links[0].url_segment_type, "package");

    assert_eq!(report.slug_collisions.len(), 1);
    assert_eq!(report.slug_collisions[0].slug, "tibet");
    assert_eq!(
        report.slug_collisions[0].owners,
        vec![ContentKind::Place, ContentKind::Article]
    );

    assert_eq!(report.duplicate_menus.len(), 1);
    assert_eq!(report.duplicate_menus[0].title, "Fine");
    assert_eq!(report.duplicate_menus[0].count, 2);
}

#[test]
fn inactive_or_deleted_menus_are_not_duplicates() {
    let mut site = Site::fresh();
    site.raw()
        .execute_batch(
            "INSERT INTO menus (title, type, parentId, status, displayOrder, deletedAt, createdAt, updatedAt) VALUES
               ('Offers', 'header', NULL, 1, 0, NULL, 'now', 'now'),
               ('Offers', 'header', NULL, 0, 1, NULL, 'now', 'now'),
               ('Offers', 'header', NULL, 1, 2, 'now', 'now', 'now');",
        )
        .expect("seed menus");

    let report = site.store.integrity_report().expect("report");
    assert!(report.duplicate_menus.is_empty(), "{report:?}");
    assert!(report.is_clean(), "{report:?}");
}
