use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use cgmath::Vector3;
use log::{debug, warn};

use crate::error::{Error, Result};
use crate::gfx::resources::mesh_cache::{MeshCache, MeshHandle};

use super::object::{MeshRef, ObjectId, ObjectType, SceneObject, Transform, MAX_OBJECT_ID};

/// Mutation notifications, delivered after the graph is consistent again
#[derive(Debug, Clone, PartialEq)]
pub enum SceneChange {
    Added(ObjectId),
    Duplicated { source: ObjectId, copy: ObjectId },
    /// The object was removed; its former children are now roots
    Deleted { id: ObjectId, orphans: Vec<ObjectId> },
    Reparented { id: ObjectId, parent: Option<ObjectId> },
    TransformChanged(ObjectId),
    Renamed(ObjectId),
}

/// Observer for [`SceneChange`] events
pub type ChangeCallback = Box<dyn FnMut(&SceneChange)>;

/// Raw object records as read from disk, before hierarchy validation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneSnapshot {
    pub objects: Vec<SceneObject>,
    pub next_id: u32,
}

/// Scene statistics for debugging and UI display
#[derive(Debug, Clone, PartialEq)]
pub struct SceneStatistics {
    pub object_count: usize,
    pub root_count: usize,
    pub imported_mesh_count: usize,
    pub broken_mesh_references: usize,
    /// Triangles of resolved imported meshes; primitives are not counted
    pub imported_triangles: usize,
    pub cached_meshes: usize,
}

/// Arena of scene objects plus hierarchy bookkeeping
///
/// Objects are stored in creation order with an id -> slot map. Parent and
/// child ids are plain relation keys; the arena alone decides lifetimes.
pub struct SceneGraph {
    objects: Vec<SceneObject>,
    index: HashMap<ObjectId, usize>,
    next_id: u32,
    has_unsaved_changes: bool,
    on_change: Option<ChangeCallback>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Creates an empty graph whose first object gets id 1
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            index: HashMap::new(),
            next_id: 1,
            has_unsaved_changes: false,
            on_change: None,
        }
    }

    /// Builds a graph from loaded records, repairing any hierarchy damage
    ///
    /// Dangling ids, duplicate child entries, one-sided links and cycles are
    /// fixed up and logged. The result is not marked as changed.
    pub fn from_snapshot(snapshot: SceneSnapshot) -> Self {
        let mut graph = SceneGraph::new();
        for object in snapshot.objects {
            if graph.index.contains_key(&object.id) {
                warn!("Skipping second object with id {}", object.id);
                continue;
            }
            graph.index.insert(object.id, graph.objects.len());
            graph.objects.push(object);
        }

        graph.repair_hierarchy();

        let past_highest = graph.objects.iter().map(|o| o.id.0.saturating_add(1)).max().unwrap_or(1);
        graph.next_id = snapshot.next_id.max(past_highest);
        graph
    }

    /// Registers the observer notified after every mutation
    pub fn set_change_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&SceneChange) + 'static,
    {
        self.on_change = Some(Box::new(callback));
    }

    pub fn clear_change_callback(&mut self) {
        self.on_change = None;
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.has_unsaved_changes
    }

    pub fn mark_saved(&mut self) {
        self.has_unsaved_changes = false;
    }

    /// Id the next new object will receive
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Every object in creation order
    pub fn all_objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn roots(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter().filter(|o| o.is_root())
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn find(&self, id: ObjectId) -> Result<&SceneObject> {
        let slot = self.slot_of(id)?;
        Ok(&self.objects[slot])
    }

    /// Adds a root object named `"<base_name> <id>"`
    pub fn add_object(&mut self, object_type: ObjectType, base_name: &str) -> ObjectId {
        let id = self.allocate_id();
        self.insert(SceneObject::new(id, format!("{} {}", base_name, id), object_type));
        self.notify(SceneChange::Added(id));
        id
    }

    /// Adds a root imported-mesh object referencing `source_path`
    pub fn add_imported_mesh(
        &mut self,
        base_name: &str,
        source_path: impl Into<PathBuf>,
        handle: Option<MeshHandle>,
    ) -> ObjectId {
        let id = self.allocate_id();
        let mut object = SceneObject::new(id, format!("{} {}", base_name, id), ObjectType::ImportedMesh);
        object.mesh = Some(MeshRef::new(source_path, handle));
        self.insert(object);
        self.notify(SceneChange::Added(id));
        id
    }

    /// Copies an object as a new root, shifted by +1 on X
    pub fn duplicate(&mut self, id: ObjectId) -> Result<ObjectId> {
        self.duplicate_with_offset(id, Vector3::new(1.0, 0.0, 0.0))
    }

    /// Copies type, transform and mesh reference of `id` into a new root
    ///
    /// Hierarchy links are not copied.
    pub fn duplicate_with_offset(&mut self, id: ObjectId, offset: Vector3<f32>) -> Result<ObjectId> {
        let source = self.find(id)?;
        let name = format!("{} (copy)", source.name);
        let object_type = source.object_type;
        let mut transform = source.transform;
        let mesh = source.mesh.clone();
        transform.position += offset;

        let copy = self.allocate_id();
        let mut object = SceneObject::new(copy, name, object_type);
        object.transform = transform;
        object.mesh = mesh;
        self.insert(object);
        self.notify(SceneChange::Duplicated { source: id, copy });
        Ok(copy)
    }

    /// Removes an object and returns it
    ///
    /// Children are not deleted with it; they are detached and become roots.
    pub fn delete(&mut self, id: ObjectId) -> Result<SceneObject> {
        let slot = self.slot_of(id)?;
        self.detach_from_parent(slot);

        let orphans = self.objects[slot].children.clone();
        for child in &orphans {
            if let Some(&child_slot) = self.index.get(child) {
                self.objects[child_slot].parent = None;
            }
        }

        let removed = self.objects.remove(slot);
        self.index.remove(&id);
        for (i, object) in self.objects.iter().enumerate().skip(slot) {
            self.index.insert(object.id, i);
        }

        if !orphans.is_empty() {
            debug!("Deleting {} re-rooted {} children", id, orphans.len());
        }
        self.notify(SceneChange::Deleted { id, orphans });
        Ok(removed)
    }

    /// Moves `child` under `new_parent`, or to the root level for `None`
    ///
    /// Refuses to make an object its own parent or to parent it under one of
    /// its descendants. On error nothing changes.
    pub fn reparent(&mut self, child: ObjectId, new_parent: Option<ObjectId>) -> Result<()> {
        let child_slot = self.slot_of(child)?;

        if let Some(parent) = new_parent {
            if parent == child {
                return Err(Error::InvalidReparent {
                    child,
                    parent,
                    reason: "an object cannot be its own parent",
                });
            }
            self.slot_of(parent)?;
            if self.is_ancestor(child, parent) {
                return Err(Error::InvalidReparent {
                    child,
                    parent,
                    reason: "the new parent is a descendant of the object",
                });
            }
        }

        if self.objects[child_slot].parent == new_parent {
            return Ok(());
        }

        self.detach_from_parent(child_slot);
        if let Some(parent) = new_parent {
            let parent_slot = self.index[&parent];
            self.objects[parent_slot].children.push(child);
            self.objects[child_slot].parent = Some(parent);
        }

        self.notify(SceneChange::Reparented {
            id: child,
            parent: new_parent,
        });
        Ok(())
    }

    /// Whether `ancestor` appears on the parent chain of `id`
    pub fn is_ancestor(&self, ancestor: ObjectId, id: ObjectId) -> bool {
        let mut current = self.index.get(&id).and_then(|&slot| self.objects[slot].parent);
        let mut steps = 0;
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.objects.len() {
                return false;
            }
            current = self.index.get(&parent).and_then(|&slot| self.objects[slot].parent);
        }
        false
    }

    pub fn set_transform(&mut self, id: ObjectId, transform: Transform) -> Result<()> {
        let slot = self.slot_of(id)?;
        if self.objects[slot].transform != transform {
            self.objects[slot].transform = transform;
            self.notify(SceneChange::TransformChanged(id));
        }
        Ok(())
    }

    pub fn rename(&mut self, id: ObjectId, name: &str) -> Result<()> {
        let slot = self.slot_of(id)?;
        if self.objects[slot].name != name {
            self.objects[slot].name = name.to_string();
            self.notify(SceneChange::Renamed(id));
        }
        Ok(())
    }

    /// Retries every unresolved mesh reference through the cache
    ///
    /// Returns how many references were resolved. Failures are logged and
    /// leave the reference broken.
    pub fn resolve_meshes(&mut self, cache: &mut MeshCache) -> usize {
        let mut resolved = 0;
        for object in &mut self.objects {
            let Some(mesh) = object.mesh.as_mut() else {
                continue;
            };
            if mesh.handle.is_some() {
                continue;
            }
            match cache.get_or_import(&mesh.source_path) {
                Ok(handle) => {
                    mesh.handle = Some(handle);
                    resolved += 1;
                }
                Err(e) => warn!("Object {} keeps a broken mesh reference: {}", object.id, e),
            }
        }
        resolved
    }

    /// Gets statistics about the scene
    pub fn statistics(&self, cache: &MeshCache) -> SceneStatistics {
        let imported: Vec<&MeshRef> = self.objects.iter().filter_map(|o| o.mesh()).collect();
        let imported_triangles = imported
            .iter()
            .filter_map(|mesh| mesh.handle)
            .filter_map(|handle| cache.lookup(handle).ok())
            .map(|entry| entry.triangle_count())
            .sum();

        SceneStatistics {
            object_count: self.objects.len(),
            root_count: self.roots().count(),
            imported_mesh_count: imported.len(),
            broken_mesh_references: imported.iter().filter(|m| !m.is_resolved()).count(),
            imported_triangles,
            cached_meshes: cache.len(),
        }
    }

    fn slot_of(&self, id: ObjectId) -> Result<usize> {
        self.index.get(&id).copied().ok_or(Error::ObjectNotFound(id))
    }

    fn allocate_id(&mut self) -> ObjectId {
        if self.next_id > MAX_OBJECT_ID {
            // Id space exhausted; fall back to the lowest free id
            let free = (1..=MAX_OBJECT_ID)
                .find(|&id| !self.index.contains_key(&ObjectId(id)))
                .unwrap_or(MAX_OBJECT_ID);
            warn!("Object ids exhausted, reusing id {}", free);
            return ObjectId(free);
        }
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        id
    }

    fn insert(&mut self, object: SceneObject) {
        self.index.insert(object.id, self.objects.len());
        self.objects.push(object);
    }

    fn notify(&mut self, change: SceneChange) {
        self.has_unsaved_changes = true;
        if let Some(callback) = self.on_change.as_mut() {
            callback(&change);
        }
    }

    /// Clears the parent link of the object in `slot` on both sides
    fn detach_from_parent(&mut self, slot: usize) {
        let id = self.objects[slot].id;
        if let Some(parent) = self.objects[slot].parent.take() {
            if let Some(&parent_slot) = self.index.get(&parent) {
                self.objects[parent_slot].children.retain(|&c| c != id);
            }
        }
    }

    fn repair_hierarchy(&mut self) {
        // Dangling and duplicate references
        for slot in 0..self.objects.len() {
            let id = self.objects[slot].id;
            if let Some(parent) = self.objects[slot].parent {
                if parent == id || !self.index.contains_key(&parent) {
                    warn!("Object {} refers to missing parent {}, making it a root", id, parent);
                    self.objects[slot].parent = None;
                }
            }

            let index = &self.index;
            let mut seen = HashSet::new();
            self.objects[slot].children.retain(|&child| {
                let keep = child != id && index.contains_key(&child) && seen.insert(child);
                if !keep {
                    warn!("Dropping invalid child reference {} from object {}", child, id);
                }
                keep
            });
        }

        // Children lists against parent links
        for slot in 0..self.objects.len() {
            let id = self.objects[slot].id;
            let children = self.objects[slot].children.clone();
            for child in children {
                let child_slot = self.index[&child];
                match self.objects[child_slot].parent {
                    Some(parent) if parent == id => {}
                    None => {
                        warn!("Restoring parent link {} -> {}", child, id);
                        self.objects[child_slot].parent = Some(id);
                    }
                    Some(other) => {
                        warn!("Object {} is listed under {} but belongs to {}", child, id, other);
                        self.objects[slot].children.retain(|&c| c != child);
                    }
                }
            }
        }

        for slot in 0..self.objects.len() {
            let id = self.objects[slot].id;
            if let Some(parent) = self.objects[slot].parent {
                let parent_slot = self.index[&parent];
                if !self.objects[parent_slot].children.contains(&id) {
                    warn!("Restoring child link {} -> {}", parent, id);
                    self.objects[parent_slot].children.push(id);
                }
            }
        }

        // Cycles
        for slot in 0..self.objects.len() {
            let id = self.objects[slot].id;
            if self.is_ancestor(id, id) {
                warn!("Object {} is its own ancestor, making it a root", id);
                self.detach_from_parent(slot);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn assert_hierarchy_consistent(&self) {
        assert_eq!(self.index.len(), self.objects.len());
        for (slot, object) in self.objects.iter().enumerate() {
            assert_eq!(self.index[&object.id], slot);
            assert!(object.id.0 < self.next_id || self.next_id > MAX_OBJECT_ID);

            if let Some(parent) = object.parent {
                let parent = self.find(parent).expect("parent must exist");
                let listed = parent.children.iter().filter(|&&c| c == object.id).count();
                assert_eq!(listed, 1, "{} listed {} times under {}", object.id, listed, parent.id);
            }

            for &child in &object.children {
                let child = self.find(child).expect("child must exist");
                assert_eq!(child.parent, Some(object.id));
            }

            assert!(!self.is_ancestor(object.id, object.id), "cycle through {}", object.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn graph_with(count: usize) -> (SceneGraph, Vec<ObjectId>) {
        let mut graph = SceneGraph::new();
        let ids = (0..count)
            .map(|_| graph.add_object(ObjectType::Cube, "Cube"))
            .collect();
        (graph, ids)
    }

    #[test]
    fn test_add_object_naming_and_ids() {
        let mut graph = SceneGraph::new();
        let a = graph.add_object(ObjectType::Cube, "Cube");
        let b = graph.add_object(ObjectType::Sphere, "Sphere");

        assert_eq!(a, ObjectId(1));
        assert_eq!(b, ObjectId(2));
        assert_eq!(graph.find(a).unwrap().name, "Cube 1");
        assert_eq!(graph.find(b).unwrap().name, "Sphere 2");
        assert!(graph.find(b).unwrap().is_root());
        assert!(graph.has_unsaved_changes());
    }

    #[test]
    fn test_ids_are_never_reused() {
        let (mut graph, ids) = graph_with(3);
        graph.delete(ids[2]).unwrap();
        let next = graph.add_object(ObjectType::Capsule, "Capsule");
        assert_eq!(next, ObjectId(4));
    }

    #[test]
    fn test_reparent_moves_between_parents() {
        let (mut graph, ids) = graph_with(3);
        let (a, b, c) = (ids[0], ids[1], ids[2]);

        graph.reparent(c, Some(a)).unwrap();
        assert_eq!(graph.find(a).unwrap().children(), &[c]);

        graph.reparent(c, Some(b)).unwrap();
        assert!(graph.find(a).unwrap().children().is_empty());
        assert_eq!(graph.find(b).unwrap().children(), &[c]);
        assert_eq!(graph.find(c).unwrap().parent(), Some(b));

        graph.reparent(c, None).unwrap();
        assert!(graph.find(c).unwrap().is_root());
        assert!(graph.find(b).unwrap().children().is_empty());
        graph.assert_hierarchy_consistent();
    }

    #[test]
    fn test_reparent_to_self_is_refused() {
        let (mut graph, ids) = graph_with(2);
        graph.reparent(ids[1], Some(ids[0])).unwrap();
        let before = graph.all_objects().to_vec();

        for &id in &ids {
            let result = graph.reparent(id, Some(id));
            assert!(matches!(result, Err(Error::InvalidReparent { .. })));
        }
        assert_eq!(graph.all_objects(), before.as_slice());
    }

    #[test]
    fn test_reparent_under_descendant_is_refused() {
        let (mut graph, ids) = graph_with(3);
        let (a, b, c) = (ids[0], ids[1], ids[2]);
        graph.reparent(b, Some(a)).unwrap();
        graph.reparent(c, Some(b)).unwrap();
        let before = graph.all_objects().to_vec();

        assert!(graph.reparent(a, Some(c)).is_err());
        assert!(graph.reparent(a, Some(b)).is_err());
        assert_eq!(graph.all_objects(), before.as_slice());
        assert!(graph.is_ancestor(a, c));
        assert!(!graph.is_ancestor(c, a));
    }

    #[test]
    fn test_reparent_unknown_ids() {
        let (mut graph, ids) = graph_with(1);
        assert!(matches!(
            graph.reparent(ObjectId(99), None),
            Err(Error::ObjectNotFound(ObjectId(99)))
        ));
        assert!(matches!(
            graph.reparent(ids[0], Some(ObjectId(42))),
            Err(Error::ObjectNotFound(ObjectId(42)))
        ));
    }

    #[test]
    fn test_delete_reroots_children() {
        let (mut graph, ids) = graph_with(4);
        let (root, middle, leaf_a, leaf_b) = (ids[0], ids[1], ids[2], ids[3]);
        graph.reparent(middle, Some(root)).unwrap();
        graph.reparent(leaf_a, Some(middle)).unwrap();
        graph.reparent(leaf_b, Some(middle)).unwrap();

        let removed = graph.delete(middle).unwrap();
        assert_eq!(removed.id(), middle);
        assert!(!graph.contains(middle));
        assert!(graph.find(root).unwrap().children().is_empty());
        assert!(graph.find(leaf_a).unwrap().is_root());
        assert!(graph.find(leaf_b).unwrap().is_root());
        graph.assert_hierarchy_consistent();

        assert!(matches!(graph.delete(middle), Err(Error::ObjectNotFound(_))));
    }

    #[test]
    fn test_duplicate_copies_as_root_with_offset() {
        let mut graph = SceneGraph::new();
        let parent = graph.add_object(ObjectType::Cube, "Cube");
        let source = graph.add_imported_mesh("Teapot", "models/teapot.obj", None);
        graph.reparent(source, Some(parent)).unwrap();
        let mut transform = Transform::from_position(Vector3::new(2.0, 3.0, 4.0));
        transform.scale = Vector3::new(2.0, 2.0, 2.0);
        graph.set_transform(source, transform).unwrap();

        let copy = graph.duplicate(source).unwrap();
        let copied = graph.find(copy).unwrap();

        assert!(copied.is_root());
        assert!(copied.children().is_empty());
        assert_eq!(copied.object_type(), ObjectType::ImportedMesh);
        assert_eq!(copied.name, "Teapot 2 (copy)");
        assert_eq!(copied.transform.position, Vector3::new(3.0, 3.0, 4.0));
        assert_eq!(copied.transform.scale, Vector3::new(2.0, 2.0, 2.0));
        assert_eq!(copied.mesh(), graph.find(source).unwrap().mesh());
        assert_eq!(graph.find(parent).unwrap().children(), &[source]);
    }

    #[test]
    fn test_duplicate_unknown_id_changes_nothing() {
        let (mut graph, _) = graph_with(2);
        graph.mark_saved();
        let next_id = graph.next_id();

        assert!(matches!(graph.duplicate(ObjectId(77)), Err(Error::ObjectNotFound(_))));
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.next_id(), next_id);
        assert!(!graph.has_unsaved_changes());
    }

    #[test]
    fn test_change_callback_receives_events() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        let mut graph = SceneGraph::new();
        graph.set_change_callback(move |change| sink.borrow_mut().push(change.clone()));

        let a = graph.add_object(ObjectType::Sphere, "Sphere");
        let b = graph.add_object(ObjectType::Sphere, "Sphere");
        graph.reparent(b, Some(a)).unwrap();
        graph.rename(a, "Planet").unwrap();
        graph.rename(a, "Planet").unwrap();
        let _ = graph.reparent(a, Some(a));
        graph.delete(a).unwrap();

        assert_eq!(
            *events.borrow(),
            vec![
                SceneChange::Added(a),
                SceneChange::Added(b),
                SceneChange::Reparented { id: b, parent: Some(a) },
                SceneChange::Renamed(a),
                SceneChange::Deleted { id: a, orphans: vec![b] },
            ]
        );
    }

    #[test]
    fn test_dirty_flag_cleared_by_mark_saved() {
        let (mut graph, ids) = graph_with(1);
        graph.mark_saved();
        assert!(!graph.has_unsaved_changes());

        graph.set_transform(ids[0], Transform::default()).unwrap();
        assert!(!graph.has_unsaved_changes(), "unchanged transform is not a mutation");

        graph
            .set_transform(ids[0], Transform::from_position(Vector3::new(0.0, 1.0, 0.0)))
            .unwrap();
        assert!(graph.has_unsaved_changes());
    }

    #[test]
    fn test_random_mutations_keep_hierarchy_consistent() {
        let mut rng = StdRng::seed_from_u64(0x5CE7E);
        let mut graph = SceneGraph::new();

        for _ in 0..2000 {
            let ids: Vec<ObjectId> = graph.all_objects().iter().map(|o| o.id()).collect();
            let pick = |rng: &mut StdRng| ids[rng.random_range(0..ids.len())];

            match rng.random_range(0..10) {
                0..=2 => {
                    graph.add_object(ObjectType::Cube, "Cube");
                }
                3..=6 if !ids.is_empty() => {
                    let child = pick(&mut rng);
                    let parent = if rng.random_bool(0.2) {
                        None
                    } else {
                        Some(pick(&mut rng))
                    };
                    let _ = graph.reparent(child, parent);
                }
                7 | 8 if !ids.is_empty() => {
                    let id = pick(&mut rng);
                    graph.delete(id).unwrap();
                }
                9 if !ids.is_empty() => {
                    let id = pick(&mut rng);
                    graph.duplicate(id).unwrap();
                }
                _ => {}
            }
            graph.assert_hierarchy_consistent();
        }
    }

    #[test]
    fn test_from_snapshot_repairs_dangling_links() {
        let mut a = SceneObject::new(ObjectId(1), "A".into(), ObjectType::Cube);
        a.children = vec![ObjectId(2), ObjectId(3), ObjectId(7), ObjectId(2)];
        let mut b = SceneObject::new(ObjectId(2), "B".into(), ObjectType::Cube);
        b.parent = Some(ObjectId(1));
        let c = SceneObject::new(ObjectId(3), "C".into(), ObjectType::Cube);
        let mut d = SceneObject::new(ObjectId(5), "D".into(), ObjectType::Cube);
        d.parent = Some(ObjectId(9));

        let graph = SceneGraph::from_snapshot(SceneSnapshot {
            objects: vec![a, b, c, d],
            next_id: 2,
        });

        graph.assert_hierarchy_consistent();
        assert_eq!(graph.find(ObjectId(1)).unwrap().children(), &[ObjectId(2), ObjectId(3)]);
        assert_eq!(graph.find(ObjectId(3)).unwrap().parent(), Some(ObjectId(1)));
        assert!(graph.find(ObjectId(5)).unwrap().is_root());
        assert_eq!(graph.next_id(), 6);
        assert!(!graph.has_unsaved_changes());
    }

    #[test]
    fn test_from_snapshot_breaks_cycles() {
        let mut a = SceneObject::new(ObjectId(1), "A".into(), ObjectType::Cube);
        let mut b = SceneObject::new(ObjectId(2), "B".into(), ObjectType::Cube);
        a.parent = Some(ObjectId(2));
        a.children = vec![ObjectId(2)];
        b.parent = Some(ObjectId(1));
        b.children = vec![ObjectId(1)];

        let graph = SceneGraph::from_snapshot(SceneSnapshot {
            objects: vec![a, b],
            next_id: 3,
        });

        graph.assert_hierarchy_consistent();
        assert_eq!(graph.roots().count(), 1);
    }

    #[test]
    fn test_allocation_past_id_limit_reuses_free_ids() {
        let top = SceneObject::new(ObjectId(u32::MAX), "Top".into(), ObjectType::Cube);
        let mut graph = SceneGraph::from_snapshot(SceneSnapshot {
            objects: vec![top],
            next_id: u32::MAX,
        });
        assert_eq!(graph.next_id(), u32::MAX);

        let first = graph.add_object(ObjectType::Cube, "Cube");
        let second = graph.add_object(ObjectType::Cube, "Cube");
        assert_eq!(first, ObjectId(1));
        assert_eq!(second, ObjectId(2));
        assert_eq!(graph.len(), 3);
        graph.assert_hierarchy_consistent();
    }

    #[test]
    fn test_statistics_counts_broken_references() {
        let mut graph = SceneGraph::new();
        graph.add_object(ObjectType::Cube, "Cube");
        graph.add_imported_mesh("Mesh", "missing/mesh.obj", None);

        let stats = graph.statistics(&MeshCache::new());
        assert_eq!(stats.object_count, 2);
        assert_eq!(stats.root_count, 2);
        assert_eq!(stats.imported_mesh_count, 1);
        assert_eq!(stats.broken_mesh_references, 1);
        assert_eq!(stats.imported_triangles, 0);
    }
}
