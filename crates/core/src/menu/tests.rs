use super::*;

fn node(id: i64, parent_id: Option<i64>, display_order: i64) -> MenuNode {
    MenuNode {
        id,
        title: format!("menu {id}"),
        menu_type: "header".to_string(),
        parent_id,
        url_segment_type: None,
        url_segment_id: None,
        url: None,
        display_order,
    }
}

fn ids(trees: &[MenuTree]) -> Vec<i64> {
    trees.iter().map(|tree| tree.node.id).collect()
}

#[test]
fn builds_ordered_tree_and_promotes_orphans() {
    let tree = build_menu_tree(vec![
        node(1, None, 2),
        node(2, None, 1),
        node(3, Some(1), 5),
        node(4, Some(1), 0),
        node(5, Some(99), 0),
        node(6, Some(4), 0),
    ])
    .unwrap();

    assert_eq!(ids(&tree), vec![5, 2, 1]);
    let first = tree.iter().find(|t| t.node.id == 1).unwrap();
    assert_eq!(ids(&first.children), vec![4, 3]);
    assert_eq!(ids(&first.children[0].children), vec![6]);
}

#[test]
fn rejects_cycles_and_duplicates() {
    assert_eq!(
        build_menu_tree(vec![node(1, Some(1), 0)]).unwrap_err(),
        MenuTreeError::Cycle { id: 1 }
    );
    assert_eq!(
        build_menu_tree(vec![node(1, Some(2), 0), node(2, Some(1), 0), node(3, Some(2), 0)])
            .unwrap_err(),
        MenuTreeError::Cycle { id: 1 }
    );
    assert_eq!(
        build_menu_tree(vec![node(1, None, 0), node(1, None, 1)]).unwrap_err(),
        MenuTreeError::DuplicateId { id: 1 }
    );
}

#[test]
fn find_cycles_reports_only_cycle_members() {
    let nodes = vec![
        node(1, Some(2), 0),
        node(2, Some(3), 0),
        node(3, Some(1), 0),
        node(4, Some(1), 0),
        node(5, Some(5), 0),
        node(6, None, 0),
    ];
    assert_eq!(find_cycles(&nodes), vec![1, 2, 3, 5]);
}
