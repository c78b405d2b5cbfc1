use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use super::Folder;
use crate::features::folders::dtos::{FolderNodeDto, FolderRowDto};

/// Folder forest built from the flat folder list.
///
/// A folder whose parent is missing from the list is shown as a root. Folders
/// caught in a parent cycle are also promoted to roots so that every folder
/// is rendered exactly once.
#[derive(Debug, Default)]
pub struct FolderTree {
    folders: HashMap<Uuid, Folder>,
    roots: Vec<Uuid>,
    children: HashMap<Uuid, Vec<Uuid>>,
}

impl FolderTree {
    /// Siblings keep the order of the input list
    pub fn build(folders: Vec<Folder>) -> Self {
        let order: Vec<Uuid> = folders.iter().map(|f| f.id).collect();
        let folders: HashMap<Uuid, Folder> = folders.into_iter().map(|f| (f.id, f)).collect();

        let mut roots = Vec::new();
        let mut children: HashMap<Uuid, Vec<Uuid>> = HashMap::new();

        for id in &order {
            match folders[id].parent_id {
                Some(parent) if parent != *id && folders.contains_key(&parent) => {
                    children.entry(parent).or_default().push(*id)
                }
                _ => roots.push(*id),
            }
        }

        let mut tree = Self {
            folders,
            roots,
            children,
        };
        tree.promote_unreachable(&order);
        tree
    }

    fn promote_unreachable(&mut self, order: &[Uuid]) {
        let mut seen: HashSet<Uuid> = HashSet::new();
        let mut stack: Vec<Uuid> = self.roots.clone();

        loop {
            while let Some(id) = stack.pop() {
                if seen.insert(id) {
                    stack.extend(self.children_of(id).iter().copied());
                }
            }

            let Some(orphan) = order.iter().copied().find(|id| !seen.contains(id)) else {
                break;
            };

            if let Some(parent) = self.folders[&orphan].parent_id {
                if let Some(siblings) = self.children.get_mut(&parent) {
                    siblings.retain(|c| *c != orphan);
                }
            }
            self.roots.push(orphan);
            stack.push(orphan);
        }
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Folder> {
        self.folders.get(&id)
    }

    pub fn roots(&self) -> &[Uuid] {
        &self.roots
    }

    pub fn children_of(&self, id: Uuid) -> &[Uuid] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True when `candidate` is `ancestor` itself or sits below it.
    ///
    /// Walks stored parent links upwards from `candidate`.
    pub fn is_within(&self, candidate: Uuid, ancestor: Uuid) -> bool {
        let mut visited = HashSet::new();
        let mut current = Some(candidate);

        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            if !visited.insert(id) {
                return false;
            }
            current = self.folders.get(&id).and_then(|f| f.parent_id);
        }
        false
    }

    /// Nested rendering, roots first
    pub fn nested(&self) -> Vec<FolderNodeDto> {
        self.roots.iter().map(|id| self.node(*id)).collect()
    }

    fn node(&self, id: Uuid) -> FolderNodeDto {
        let folder = &self.folders[&id];
        FolderNodeDto {
            id,
            name: folder.name.clone(),
            parent_id: folder.parent_id,
            color: folder.color.clone(),
            children: self
                .children_of(id)
                .iter()
                .map(|child| self.node(*child))
                .collect(),
        }
    }

    /// Rows a client would draw: roots plus the children of every expanded folder
    pub fn visible_rows(&self, expanded: &HashSet<Uuid>) -> Vec<FolderRowDto> {
        let mut rows = Vec::new();
        for root in &self.roots {
            self.push_rows(*root, 0, expanded, &mut rows);
        }
        rows
    }

    fn push_rows(&self, id: Uuid, depth: usize, expanded: &HashSet<Uuid>, rows: &mut Vec<FolderRowDto>) {
        let folder = &self.folders[&id];
        let children = self.children_of(id);
        let is_expanded = expanded.contains(&id) && !children.is_empty();

        rows.push(FolderRowDto {
            id,
            name: folder.name.clone(),
            color: folder.color.clone(),
            depth,
            has_children: !children.is_empty(),
            is_expanded,
        });

        if is_expanded {
            for child in children {
                self.push_rows(*child, depth + 1, expanded, rows);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::sample_folder;
    use fake::{faker::lorem::en::Word, Fake};

    fn collect(nodes: &[FolderNodeDto], parent: Option<Uuid>, out: &mut Vec<(Uuid, Option<Uuid>)>) {
        for node in nodes {
            out.push((node.id, parent));
            collect(&node.children, Some(node.id), out);
        }
    }

    #[test]
    fn test_every_folder_appears_once_under_its_parent() {
        for _ in 0..25 {
            let count: usize = (1..40).fake();
            let mut folders: Vec<Folder> = Vec::with_capacity(count);
            for i in 0..count {
                let parent = if i == 0 || (0..3).fake::<u8>() == 0 {
                    None
                } else {
                    Some(folders[(0..i).fake::<usize>()].id)
                };
                folders.push(sample_folder(&Word().fake::<String>(), parent));
            }

            let tree = FolderTree::build(folders.clone());
            let mut seen = Vec::new();
            collect(&tree.nested(), None, &mut seen);

            assert_eq!(seen.len(), folders.len());
            for folder in &folders {
                let placements: Vec<_> = seen.iter().filter(|(id, _)| *id == folder.id).collect();
                assert_eq!(placements.len(), 1);
                assert_eq!(placements[0].1, folder.parent_id);
            }
        }
    }

    #[test]
    fn test_dangling_parent_becomes_root() {
        let orphan = sample_folder("Orphan", Some(Uuid::new_v4()));
        let tree = FolderTree::build(vec![orphan.clone()]);
        assert_eq!(tree.roots(), &[orphan.id]);
    }

    #[test]
    fn test_stored_cycle_is_still_rendered_once() {
        let mut a = sample_folder("A", None);
        let mut b = sample_folder("B", None);
        a.parent_id = Some(b.id);
        b.parent_id = Some(a.id);

        let tree = FolderTree::build(vec![a.clone(), b.clone()]);
        let mut seen = Vec::new();
        collect(&tree.nested(), None, &mut seen);

        assert_eq!(seen.len(), 2);
        assert_eq!(tree.roots(), &[a.id]);
        assert_eq!(tree.children_of(a.id), &[b.id]);
    }

    #[test]
    fn test_siblings_keep_input_order() {
        let root = sample_folder("Sem 3", None);
        let first = sample_folder("Alpha", Some(root.id));
        let second = sample_folder("Beta", Some(root.id));

        let tree = FolderTree::build(vec![root.clone(), first.clone(), second.clone()]);
        assert_eq!(tree.children_of(root.id), &[first.id, second.id]);
    }

    #[test]
    fn test_is_within() {
        let root = sample_folder("Root", None);
        let child = sample_folder("Child", Some(root.id));
        let grandchild = sample_folder("Grandchild", Some(child.id));
        let other = sample_folder("Other", None);
        let tree = FolderTree::build(vec![
            root.clone(),
            child.clone(),
            grandchild.clone(),
            other.clone(),
        ]);

        assert!(tree.is_within(grandchild.id, root.id));
        assert!(tree.is_within(root.id, root.id));
        assert!(!tree.is_within(root.id, grandchild.id));
        assert!(!tree.is_within(other.id, root.id));
    }

    #[test]
    fn test_visible_rows_follow_expansion() {
        let root = sample_folder("Root", None);
        let child = sample_folder("Child", Some(root.id));
        let leaf = sample_folder("Leaf", Some(child.id));
        let tree = FolderTree::build(vec![root.clone(), child.clone(), leaf.clone()]);

        let collapsed = tree.visible_rows(&HashSet::new());
        assert_eq!(collapsed.len(), 1);
        assert!(collapsed[0].has_children);
        assert!(!collapsed[0].is_expanded);

        // expanding a child under a collapsed parent shows nothing extra
        let hidden = tree.visible_rows(&HashSet::from([child.id]));
        assert_eq!(hidden.len(), 1);

        let open = tree.visible_rows(&HashSet::from([root.id, child.id]));
        let depths: Vec<_> = open.iter().map(|r| (r.id, r.depth)).collect();
        assert_eq!(depths, vec![(root.id, 0), (child.id, 1), (leaf.id, 2)]);
        assert!(!open[2].has_children);
    }
}
