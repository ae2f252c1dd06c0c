//! Animation scheduler
//!
//! Holds tracks and compositions in an arena and fans each frame's clock
//! time out through the composition tree.
//!
//! Compositions form a tree: a node has at most one parent, and parents are
//! stored as ids, so there are no reference cycles to leak. Children are
//! updated depth-first in insertion order.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use tracing::debug;

use crate::error::{AnimationError, Result};
use crate::track::{Track, TrackPhase};

new_key_type! {
    pub struct NodeId;
}

type Children = SmallVec<[NodeId; 4]>;

enum NodeKind {
    Track(Track),
    Composition(Children),
}

struct Node {
    parent: Option<NodeId>,
    kind: NodeKind,
}

/// Owner of every track and composition
pub struct AnimationScheduler {
    nodes: SlotMap<NodeId, Node>,
    /// Parentless nodes, in insertion order
    roots: Vec<NodeId>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            roots: Vec::new(),
        }
    }

    pub fn add_track(&mut self, track: Track) -> NodeId {
        self.insert(NodeKind::Track(track))
    }

    pub fn add_composition(&mut self) -> NodeId {
        self.insert(NodeKind::Composition(Children::new()))
    }

    fn insert(&mut self, kind: NodeKind) -> NodeId {
        let id = self.nodes.insert(Node { parent: None, kind });
        self.roots.push(id);
        id
    }

    /// Append `child` to composition `parent`.
    ///
    /// A node can only be attached once; [`detach`](Self::detach) it first
    /// to move it elsewhere.
    pub fn add(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let child_node = self.nodes.get(child).ok_or(AnimationError::UnknownNode(child))?;
        if let Some(existing) = child_node.parent {
            return Err(AnimationError::DuplicateAttachment {
                node: child,
                parent: existing,
            });
        }

        match self.nodes.get(parent) {
            None => return Err(AnimationError::UnknownNode(parent)),
            Some(Node {
                kind: NodeKind::Track(_),
                ..
            }) => return Err(AnimationError::NotAComposition(parent)),
            Some(_) => {}
        }

        if self.ancestors_and_self(parent).any(|id| id == child) {
            return Err(AnimationError::CyclicAttachment {
                node: child,
                parent,
            });
        }

        if let Some(Node {
            kind: NodeKind::Composition(children),
            ..
        }) = self.nodes.get_mut(parent)
        {
            children.push(child);
        }
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        self.roots.retain(|&id| id != child);

        debug!(?child, ?parent, "attached animation node");
        Ok(())
    }

    /// Remove `child` from its composition, making it a root again.
    ///
    /// Returns the former parent, or `None` if it was already a root.
    pub fn detach(&mut self, child: NodeId) -> Result<Option<NodeId>> {
        let node = self
            .nodes
            .get_mut(child)
            .ok_or(AnimationError::UnknownNode(child))?;
        let Some(parent) = node.parent.take() else {
            return Ok(None);
        };

        if let Some(Node {
            kind: NodeKind::Composition(children),
            ..
        }) = self.nodes.get_mut(parent)
        {
            children.retain(|id| *id != child);
        }
        self.roots.push(child);

        debug!(?child, ?parent, "detached animation node");
        Ok(Some(parent))
    }

    /// Drop `node` and its whole subtree. Returns how many nodes were
    /// removed (0 for an unknown id).
    pub fn remove(&mut self, node: NodeId) -> usize {
        if self.detach(node).is_err() {
            return 0;
        }
        self.roots.retain(|&id| id != node);

        let mut removed = 0;
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if let Some(Node { kind, .. }) = self.nodes.remove(id) {
                removed += 1;
                if let NodeKind::Composition(children) = kind {
                    stack.extend(children);
                }
            }
        }
        removed
    }

    /// Update `node` and, for a composition, every descendant
    pub fn update(&self, node: NodeId, now: f64) -> Result<()> {
        if !self.nodes.contains_key(node) {
            return Err(AnimationError::UnknownNode(node));
        }
        self.update_node(node, now);
        Ok(())
    }

    /// Update every root node in insertion order
    pub fn tick(&self, now: f64) {
        for &root in &self.roots {
            self.update_node(root, now);
        }
    }

    fn update_node(&self, id: NodeId, now: f64) {
        match self.nodes.get(id).map(|n| &n.kind) {
            Some(NodeKind::Track(track)) => track.update(now),
            Some(NodeKind::Composition(children)) => {
                for &child in children {
                    self.update_node(child, now);
                }
            }
            None => {}
        }
    }

    /// Whether any track is still idle or running at `now`
    pub fn has_active_animations(&self, now: f64) -> bool {
        self.tracks()
            .any(|(_, track)| track.phase(now) != TrackPhase::Finished)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node)?.parent
    }

    /// Children of a composition; empty for tracks and unknown ids
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        match self.nodes.get(node).map(|n| &n.kind) {
            Some(NodeKind::Composition(children)) => children.as_slice(),
            _ => &[],
        }
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn is_composition(&self, node: NodeId) -> bool {
        matches!(
            self.nodes.get(node).map(|n| &n.kind),
            Some(NodeKind::Composition(_))
        )
    }

    pub fn track(&self, node: NodeId) -> Option<&Track> {
        match &self.nodes.get(node)?.kind {
            NodeKind::Track(track) => Some(track),
            NodeKind::Composition(_) => None,
        }
    }

    pub fn track_mut(&mut self, node: NodeId) -> Option<&mut Track> {
        match &mut self.nodes.get_mut(node)?.kind {
            NodeKind::Track(track) => Some(track),
            NodeKind::Composition(_) => None,
        }
    }

    /// Iterate over all tracks, in no particular order
    pub fn tracks(&self) -> impl Iterator<Item = (NodeId, &Track)> {
        self.nodes.iter().filter_map(|(id, node)| match &node.kind {
            NodeKind::Track(track) => Some((id, track)),
            NodeKind::Composition(_) => None,
        })
    }

    pub fn track_count(&self) -> usize {
        self.tracks().count()
    }

    /// Total number of nodes, tracks and compositions
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// `node` followed by each of its ancestors
    fn ancestors_and_self(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(node), move |&id| self.nodes.get(id)?.parent)
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::{shared, PropertyMap};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ramp(target: Rc<RefCell<PropertyMap>>) -> Track {
        Track::builder(target)
            .once()
            .duration(1000.0)
            .property("value", [(0.0, 0.0), (1000.0, 1.0)])
            .build()
            .unwrap()
    }

    #[test]
    fn nested_compositions_forward_updates() {
        let target = shared(PropertyMap::new());
        let mut scheduler = AnimationScheduler::new();
        let root = scheduler.add_composition();
        let inner = scheduler.add_composition();
        let track = scheduler.add_track(ramp(target.clone()));

        scheduler.add(inner, track).unwrap();
        scheduler.add(root, inner).unwrap();
        assert_eq!(scheduler.roots(), &[root]);
        assert_eq!(scheduler.parent(track), Some(inner));

        scheduler.update(root, 250.0).unwrap();
        assert_eq!(target.borrow().get("value"), Some(0.25));
    }

    #[test]
    fn second_attachment_is_rejected() {
        let mut scheduler = AnimationScheduler::new();
        let a = scheduler.add_composition();
        let b = scheduler.add_composition();
        let track = scheduler.add_track(ramp(shared(PropertyMap::new())));

        scheduler.add(a, track).unwrap();
        assert_eq!(
            scheduler.add(b, track),
            Err(AnimationError::DuplicateAttachment {
                node: track,
                parent: a
            })
        );
        assert_eq!(scheduler.children(b), &[] as &[NodeId]);
    }

    #[test]
    fn cycles_are_rejected() {
        let mut scheduler = AnimationScheduler::new();
        let outer = scheduler.add_composition();
        let inner = scheduler.add_composition();
        scheduler.add(outer, inner).unwrap();

        assert!(matches!(
            scheduler.add(inner, outer),
            Err(AnimationError::CyclicAttachment { .. })
        ));
        assert!(matches!(
            scheduler.add(outer, outer),
            Err(AnimationError::CyclicAttachment { .. })
        ));
    }

    #[test]
    fn tracks_cannot_hold_children() {
        let mut scheduler = AnimationScheduler::new();
        let t1 = scheduler.add_track(ramp(shared(PropertyMap::new())));
        let t2 = scheduler.add_track(ramp(shared(PropertyMap::new())));
        assert_eq!(scheduler.add(t1, t2), Err(AnimationError::NotAComposition(t1)));
    }

    #[test]
    fn detach_stops_updates_from_the_parent() {
        let target = shared(PropertyMap::new());
        let mut scheduler = AnimationScheduler::new();
        let root = scheduler.add_composition();
        let track = scheduler.add_track(ramp(target.clone()));
        scheduler.add(root, track).unwrap();

        assert_eq!(scheduler.detach(track), Ok(Some(root)));
        assert_eq!(scheduler.detach(track), Ok(None));
        assert!(scheduler.children(root).is_empty());

        scheduler.update(root, 500.0).unwrap();
        assert_eq!(target.borrow().get("value"), None);

        // Detached nodes become roots and can be re-attached.
        assert_eq!(scheduler.roots(), &[root, track]);
        scheduler.add(root, track).unwrap();
    }

    #[test]
    fn remove_drops_the_subtree() {
        let mut scheduler = AnimationScheduler::new();
        let root = scheduler.add_composition();
        let inner = scheduler.add_composition();
        let t1 = scheduler.add_track(ramp(shared(PropertyMap::new())));
        let t2 = scheduler.add_track(ramp(shared(PropertyMap::new())));
        scheduler.add(inner, t1).unwrap();
        scheduler.add(inner, t2).unwrap();
        scheduler.add(root, inner).unwrap();

        assert_eq!(scheduler.remove(inner), 3);
        assert_eq!(scheduler.len(), 1);
        assert!(scheduler.children(root).is_empty());
        assert_eq!(scheduler.remove(inner), 0);
        assert_eq!(scheduler.update(t1, 0.0), Err(AnimationError::UnknownNode(t1)));
    }

    #[test]
    fn activity_tracks_one_shot_completion() {
        let mut scheduler = AnimationScheduler::new();
        scheduler.add_track(ramp(shared(PropertyMap::new())));

        assert!(scheduler.has_active_animations(999.0));
        assert!(!scheduler.has_active_animations(1000.0));
        assert_eq!(scheduler.track_count(), 1);
    }

    #[test]
    fn track_mut_allows_restarting() {
        let target = shared(PropertyMap::new());
        let mut scheduler = AnimationScheduler::new();
        let id = scheduler.add_track(ramp(target.clone()));

        scheduler.track_mut(id).unwrap().restart_at(5000.0);
        scheduler.tick(5500.0);
        assert_eq!(target.borrow().get("value"), Some(0.5));
        assert!(scheduler.track(id).is_some());
        assert!(!scheduler.is_composition(id));
    }
}
