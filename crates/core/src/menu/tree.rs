#![forbid(unsafe_code)]

use super::types::{MenuNode, MenuTree, MenuTreeError};
use std::collections::{BTreeMap, BTreeSet};

/// Ids of every node that sits on a parent cycle (self references included),
/// ascending.
pub fn find_cycles(nodes: &[MenuNode]) -> Vec<i64> {
    let parents: BTreeMap<i64, Option<i64>> =
        nodes.iter().map(|node| (node.id, node.parent_id)).collect();

    let mut on_cycle = BTreeSet::new();
    let mut acyclic = BTreeSet::new();

    for node in nodes {
        let mut path: Vec<i64> = Vec::new();
        let mut current = Some(node.id);

        while let Some(id) = current {
            if acyclic.contains(&id) || on_cycle.contains(&id) {
                break;
            }
            if let Some(pos) = path.iter().position(|seen| *seen == id) {
                on_cycle.extend(path[pos..].iter().copied());
                break;
            }
            path.push(id);
            current = parents.get(&id).copied().flatten();
        }

        acyclic.extend(path.into_iter().filter(|id| !on_cycle.contains(id)));
    }

    on_cycle.into_iter().collect()
}

/// Assembles navigation roots and their children ordered by
/// `(display_order, id)`. Rows whose parent is absent become roots.
pub fn build_menu_tree(nodes: Vec<MenuNode>) -> Result<Vec<MenuTree>, MenuTreeError> {
    let mut ids = BTreeSet::new();
    for node in &nodes {
        if !ids.insert(node.id) {
            return Err(MenuTreeError::DuplicateId { id: node.id });
        }
    }
    if let Some(id) = find_cycles(&nodes).first() {
        return Err(MenuTreeError::Cycle { id: *id });
    }

    let mut roots = Vec::new();
    let mut children: BTreeMap<i64, Vec<MenuNode>> = BTreeMap::new();
    for node in nodes {
        match node.parent_id {
            Some(parent) if ids.contains(&parent) => {
                children.entry(parent).or_default().push(node);
            }
            _ => roots.push(node),
        }
    }

    sort_siblings(&mut roots);
    Ok(roots
        .into_iter()
        .map(|node| attach(node, &mut children))
        .collect())
}

fn attach(node: MenuNode, children: &mut BTreeMap<i64, Vec<MenuNode>>) -> MenuTree {
    let mut own = children.remove(&node.id).unwrap_or_default();
    sort_siblings(&mut own);
    let children = own
        .into_iter()
        .map(|child| attach(child, children))
        .collect();
    MenuTree { node, children }
}

fn sort_siblings(nodes: &mut [MenuNode]) {
    nodes.sort_by_key(|node| (node.display_order, node.id));
}
