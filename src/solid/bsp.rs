//! [BSP](https://en.wikipedia.org/wiki/Binary_space_partitioning) tree node structure and operations

use crate::solid::plane::Plane;
use crate::solid::polygon::Polygon;
use std::fmt::Debug;

/// A BSP tree node, containing polygons plus optional front/back subtrees.
///
/// There is no distinction between internal and leaf nodes: polygons live at
/// whatever level they were inserted, coplanar with that node's plane.
#[derive(Debug, Clone)]
pub struct Node<S: Clone> {
    /// Splitting plane for this node *or* **None** for an empty node.
    pub plane: Option<Plane>,

    /// Subtree on the positive side of `plane`.
    pub front: Option<Box<Node<S>>>,

    /// Subtree on the negative side of `plane`.
    pub back: Option<Box<Node<S>>>,

    /// Polygons lying on `plane` (either orientation).
    pub polygons: Vec<Polygon<S>>,
}

impl<S: Clone + Send + Sync + Debug> Default for Node<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone + Send + Sync + Debug> Node<S> {
    /// Create a new empty BSP node
    pub const fn new() -> Self {
        Self {
            plane: None,
            front: None,
            back: None,
            polygons: Vec::new(),
        }
    }

    /// Creates a new BSP node from polygons
    pub fn from_polygons(polygons: &[Polygon<S>]) -> Self {
        let mut node = Self::new();
        if !polygons.is_empty() {
            node.build(polygons);
        }
        node
    }

    /// Convert solid space to empty space and empty space to solid space.
    pub fn invert(&mut self) {
        // Iterate with an explicit stack; tree depth is O(polygon count)
        // in the worst case.
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            node.polygons.iter_mut().for_each(|p| p.flip());
            if let Some(ref mut plane) = node.plane {
                plane.flip();
            }

            std::mem::swap(&mut node.front, &mut node.back);

            if let Some(ref mut front) = node.front {
                stack.push(&mut **front);
            }
            if let Some(ref mut back) = node.back {
                stack.push(&mut **back);
            }
        }
    }

    /// Recursively remove all fragments of `polygons` that are inside the
    /// solid this BSP tree represents, returning the survivors.
    ///
    /// A fragment that lands behind a plane with no back subtree is inside
    /// the solid and is discarded; with no front subtree, fragments in front
    /// are outside and survive as-is. Does not mutate this node.
    pub fn clip_polygons(&self, polygons: &[Polygon<S>]) -> Vec<Polygon<S>> {
        let mut result = Vec::new();
        let mut stack = vec![(self, polygons.to_vec())];

        while let Some((node, polys)) = stack.pop() {
            let Some(plane) = node.plane.as_ref() else {
                // Empty tree: nothing to clip against.
                result.extend(polys);
                continue;
            };

            let mut front = Vec::with_capacity(polys.len());
            let mut back = Vec::with_capacity(polys.len());
            let mut coplanar_front = Vec::new();
            let mut coplanar_back = Vec::new();

            for polygon in &polys {
                plane.split_polygon(
                    polygon,
                    &mut coplanar_front,
                    &mut coplanar_back,
                    &mut front,
                    &mut back,
                );
                // Coplanar fragments are clipped with their geometric side.
                front.append(&mut coplanar_front);
                back.append(&mut coplanar_back);
            }

            if let Some(front_node) = &node.front {
                if !front.is_empty() {
                    stack.push((front_node, front));
                }
            } else {
                result.extend(front);
            }

            if let Some(back_node) = &node.back {
                if !back.is_empty() {
                    stack.push((back_node, back));
                }
            }
            // No back subtree: the back half-space is solid, drop `back`.
        }
        result
    }

    /// Remove all polygons in this BSP tree that are inside the other BSP
    /// tree `bsp`.
    pub fn clip_to(&mut self, bsp: &Node<S>) {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            node.polygons = bsp.clip_polygons(&node.polygons);
            if let Some(front) = node.front.as_mut() {
                stack.push(&mut **front);
            }
            if let Some(back) = node.back.as_mut() {
                stack.push(&mut **back);
            }
        }
    }

    /// Return all polygons in this BSP tree.
    pub fn all_polygons(&self) -> Vec<Polygon<S>> {
        let mut result = Vec::new();
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            result.extend_from_slice(&node.polygons);
            stack.extend(
                [&node.front, &node.back]
                    .iter()
                    .filter_map(|child| child.as_ref().map(|boxed| boxed.as_ref())),
            );
        }
        result
    }

    /// Build a BSP tree out of `polygons`. When called on an existing tree,
    /// the new polygons are filtered down to the bottom of the tree and
    /// become new nodes there.
    ///
    /// Each set of polygons is partitioned using the first polygon's plane,
    /// adopted verbatim — no split-quality heuristic. Output stays
    /// deterministic at the cost of unbalanced trees on adversarial input.
    pub fn build(&mut self, polygons: &[Polygon<S>]) {
        if polygons.is_empty() {
            return;
        }

        let mut stack: Vec<(&mut Node<S>, Vec<Polygon<S>>)> =
            vec![(self, polygons.to_vec())];

        while let Some((node, polys)) = stack.pop() {
            if polys.is_empty() {
                continue;
            }

            if node.plane.is_none() {
                node.plane = Some(polys[0].plane.clone());
            }
            let plane = node.plane.clone().expect("plane was just set");

            let mut front = Vec::with_capacity(polys.len() / 2);
            let mut back = Vec::with_capacity(polys.len() / 2);
            let mut coplanar_front = Vec::new();
            let mut coplanar_back = Vec::new();

            for polygon in &polys {
                plane.split_polygon(
                    polygon,
                    &mut coplanar_front,
                    &mut coplanar_back,
                    &mut front,
                    &mut back,
                );
                // Both coplanar orientations live at this node.
                node.polygons.append(&mut coplanar_front);
                node.polygons.append(&mut coplanar_back);
            }

            if !front.is_empty() {
                let child = node.front.get_or_insert_with(|| Box::new(Node::new()));
                stack.push((&mut **child, front));
            }
            if !back.is_empty() {
                let child = node.back.get_or_insert_with(|| Box::new(Node::new()));
                stack.push((&mut **child, back));
            }
        }
    }
}
