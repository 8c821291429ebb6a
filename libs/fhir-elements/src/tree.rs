//! Arena-based element tree and bottom-up traversal

use crate::error::{Error, Result};
use meridian_models::{ElementDefinition, StructureDefinition};

/// One element in the tree, with parent/child links stored as arena indices
#[derive(Debug)]
pub struct ElementNode<'a> {
    /// Position of this element in the original snapshot list
    pub index: usize,

    /// The element definition itself
    pub element: &'a ElementDefinition,

    /// Arena index of the parent, `None` for the resource root
    pub parent: Option<usize>,

    /// Arena indices of direct children, in snapshot order
    pub children: Vec<usize>,

    /// Number of dotted segments in the path (root is 1)
    pub depth: usize,

    /// Whether the element offers more than one candidate type
    pub is_choice: bool,
}

impl ElementNode<'_> {
    /// Whether this node is the resource root
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Explicit tree over a snapshot's flat element list.
///
/// Construction validates standard FHIR snapshot ordering: every element's
/// ancestors must precede it, and exactly one root element (the resource
/// itself) must come first. Out-of-order input is rejected rather than
/// silently mis-nested.
#[derive(Debug)]
pub struct ElementTree<'a> {
    nodes: Vec<ElementNode<'a>>,
}

impl<'a> ElementTree<'a> {
    /// Build a tree from a path-ordered element list.
    pub fn from_elements(elements: &'a [ElementDefinition]) -> Result<Self> {
        if elements.is_empty() {
            return Err(Error::Empty);
        }

        let root_depth = elements[0].depth();
        if root_depth != 1 {
            return Err(Error::InvalidRoot {
                path: elements[0].path.clone(),
            });
        }

        let mut nodes: Vec<ElementNode<'a>> = Vec::with_capacity(elements.len());
        nodes.push(ElementNode {
            index: 0,
            element: &elements[0],
            parent: None,
            children: Vec::new(),
            depth: root_depth,
            is_choice: elements[0].is_choice_type(),
        });

        // Stack of arena indices forming the current ancestor chain.
        let mut ancestors: Vec<usize> = vec![0];

        for (index, element) in elements.iter().enumerate().skip(1) {
            let depth = element.depth();
            if depth == 1 {
                return Err(Error::MultipleRoots {
                    index,
                    path: element.path.clone(),
                });
            }

            // Unwind to the ancestor one level above this element.
            while ancestors
                .last()
                .map(|&i| nodes[i].depth >= depth)
                .unwrap_or(false)
            {
                ancestors.pop();
            }

            let parent = match ancestors.last().copied() {
                Some(p)
                    if nodes[p].depth == depth - 1
                        && element.is_descendant_of(&nodes[p].element.path) =>
                {
                    p
                }
                _ => {
                    return Err(Error::OutOfOrder {
                        index,
                        path: element.path.clone(),
                    });
                }
            };

            let arena_index = nodes.len();
            nodes.push(ElementNode {
                index,
                element,
                parent: Some(parent),
                children: Vec::new(),
                depth,
                is_choice: element.is_choice_type(),
            });
            nodes[parent].children.push(arena_index);
            ancestors.push(arena_index);
        }

        Ok(Self { nodes })
    }

    /// Build a tree from a StructureDefinition's snapshot.
    pub fn from_structure_definition(sd: &'a StructureDefinition) -> Result<Self> {
        Self::from_elements(sd.elements())
    }

    /// The resource root node
    pub fn root(&self) -> &ElementNode<'a> {
        &self.nodes[0]
    }

    /// All nodes, in snapshot order
    pub fn nodes(&self) -> &[ElementNode<'a>] {
        &self.nodes
    }

    /// Number of elements in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Direct children of a node, in snapshot order
    pub fn children_of<'s>(
        &'s self,
        node: &'s ElementNode<'a>,
    ) -> impl Iterator<Item = &'s ElementNode<'a>> + 's {
        node.children.iter().map(|&i| &self.nodes[i])
    }

    /// Combine every element with its children's results, bottom-up.
    ///
    /// The combiner runs exactly once per element, children before parents,
    /// and receives child results in sibling order. Returns the root's
    /// combined value.
    pub fn fold_bottom_up<R>(&self, mut combine: impl FnMut(&ElementNode<'a>, Vec<R>) -> R) -> R {
        self.fold_node(0, &mut combine)
    }

    fn fold_node<R>(
        &self,
        arena_index: usize,
        combine: &mut impl FnMut(&ElementNode<'a>, Vec<R>) -> R,
    ) -> R {
        let node = &self.nodes[arena_index];
        let children = node
            .children
            .iter()
            .map(|&child| self.fold_node(child, combine))
            .collect();
        combine(node, children)
    }

    /// Fallible variant of [`fold_bottom_up`](Self::fold_bottom_up).
    ///
    /// Stops at the first combiner error and propagates it.
    pub fn try_fold_bottom_up<R, E>(
        &self,
        mut combine: impl FnMut(&ElementNode<'a>, Vec<R>) -> std::result::Result<R, E>,
    ) -> std::result::Result<R, E> {
        self.try_fold_node(0, &mut combine)
    }

    fn try_fold_node<R, E>(
        &self,
        arena_index: usize,
        combine: &mut impl FnMut(&ElementNode<'a>, Vec<R>) -> std::result::Result<R, E>,
    ) -> std::result::Result<R, E> {
        let node = &self.nodes[arena_index];
        let mut children = Vec::with_capacity(node.children.len());
        for &child in &node.children {
            children.push(self.try_fold_node(child, combine)?);
        }
        combine(node, children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elements(paths: &[&str]) -> Vec<ElementDefinition> {
        paths
            .iter()
            .map(|p| ElementDefinition::with_path(*p))
            .collect()
    }

    #[test]
    fn builds_nested_structure() {
        let elems = elements(&[
            "Patient",
            "Patient.identifier",
            "Patient.name",
            "Patient.name.family",
            "Patient.name.given",
            "Patient.gender",
        ]);
        let tree = ElementTree::from_elements(&elems).unwrap();

        assert_eq!(tree.len(), 6);
        assert!(tree.root().is_root());

        let root_children: Vec<&str> = tree
            .children_of(tree.root())
            .map(|n| n.element.path.as_str())
            .collect();
        assert_eq!(
            root_children,
            vec!["Patient.identifier", "Patient.name", "Patient.gender"]
        );

        let name = &tree.nodes()[2];
        let name_children: Vec<&str> = tree
            .children_of(name)
            .map(|n| n.element.path.as_str())
            .collect();
        assert_eq!(name_children, vec!["Patient.name.family", "Patient.name.given"]);
    }

    #[test]
    fn rejects_empty_input() {
        let elems: Vec<ElementDefinition> = Vec::new();
        assert!(matches!(ElementTree::from_elements(&elems), Err(Error::Empty)));
    }

    #[test]
    fn rejects_child_before_parent() {
        let elems = elements(&["Patient", "Patient.name.given", "Patient.name"]);
        match ElementTree::from_elements(&elems) {
            Err(Error::OutOfOrder { index, path }) => {
                assert_eq!(index, 1);
                assert_eq!(path, "Patient.name.given");
            }
            other => panic!("expected OutOfOrder, got {:?}", other.map(|t| t.len())),
        }
    }

    #[test]
    fn rejects_second_root() {
        let elems = elements(&["Patient", "Observation"]);
        match ElementTree::from_elements(&elems) {
            Err(Error::MultipleRoots { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected MultipleRoots, got {:?}", other.map(|t| t.len())),
        }
    }

    #[test]
    fn rejects_non_root_first_element() {
        let elems = elements(&["Patient.name"]);
        match ElementTree::from_elements(&elems) {
            Err(Error::InvalidRoot { path }) => assert_eq!(path, "Patient.name"),
            other => panic!("expected InvalidRoot, got {:?}", other.map(|t| t.len())),
        }
    }

    #[test]
    fn rejects_sibling_under_wrong_parent() {
        // Patient.name.family appears after the ancestor chain has moved on.
        let elems = elements(&["Patient", "Patient.name", "Patient.gender", "Patient.name.family"]);
        assert!(matches!(
            ElementTree::from_elements(&elems),
            Err(Error::OutOfOrder { index: 3, .. })
        ));
    }
}
