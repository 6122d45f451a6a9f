// Copyright 2026 the Mullion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays component storage with allocation, topology, and the
//! per-frame update entry point.

use alloc::vec::Vec;

use crate::attributes::Attributes;
use crate::collaborator::{ResourceDisposer, UpdatePasses, VisualResource};
use crate::defaults::Defaults;
use crate::font::{FontRequest, PendingFonts};
use crate::scheduler::{UpdateBatch, UpdateFlags, UpdateScheduler};
use crate::trace::{self, FlushBeginEvent, FlushSummary, PassEvent, Tracer, UpdatePass};
use crate::transform::Transform3d;

use super::id::{ComponentId, ContainerId, INVALID};
use super::roles::Roles;
use super::state::StateTable;
use super::traverse::{Children, Subtree};

/// Struct-of-arrays storage for all components, plus the update scheduler
/// and font outbox they share.
///
/// Components are addressed by [`ComponentId`] handles. Internally, each
/// component occupies a slot in parallel arrays. Removed components are
/// recycled via a free list, and generation counters prevent stale handle
/// access.
#[derive(Debug)]
pub struct ComponentTree {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Per-component data --
    pub(crate) roles: Vec<Roles>,
    pub(crate) attributes: Vec<Attributes>,
    pub(crate) states: Vec<StateTable>,
    pub(crate) local_transform: Vec<Transform3d>,
    pub(crate) container: Vec<Option<ContainerId>>,
    pub(crate) visuals: Vec<Vec<VisualResource>>,
    pub(crate) pending_fonts: Vec<PendingFonts>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Shared context --
    pub(crate) scheduler: UpdateScheduler,
    pub(crate) font_requests: Vec<FontRequest>,
    pub(crate) next_font_serial: u64,
    pub(crate) defaults: Defaults,
    flush_index: u64,
}

impl Default for ComponentTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentTree {
    /// Creates an empty tree using [`Defaults::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_defaults(Defaults::default())
    }

    /// Creates an empty tree with a custom default table.
    #[must_use]
    pub fn with_defaults(defaults: Defaults) -> Self {
        Self {
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            roles: Vec::new(),
            attributes: Vec::new(),
            states: Vec::new(),
            local_transform: Vec::new(),
            container: Vec::new(),
            visuals: Vec::new(),
            pending_fonts: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            scheduler: UpdateScheduler::new(),
            font_requests: Vec::new(),
            next_font_serial: 1,
            defaults,
            flush_index: 0,
        }
    }

    /// Returns the default table.
    #[must_use]
    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    // -- Allocation API --

    /// Creates a new component and returns its handle.
    ///
    /// The component starts detached, with an identity transform, no
    /// attribute overrides, no states, and no payload. UI components are
    /// registered with the scheduler right away, with nothing pending.
    pub fn create(&mut self, roles: Roles) -> ComponentId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            let i = idx as usize;
            self.generation[i] += 1;
            self.parent[i] = INVALID;
            self.first_child[i] = INVALID;
            self.next_sibling[i] = INVALID;
            self.prev_sibling[i] = INVALID;
            self.roles[i] = roles;
            self.attributes[i] = Attributes::default();
            self.states[i] = StateTable::default();
            self.local_transform[i] = Transform3d::IDENTITY;
            self.container[i] = None;
            self.visuals[i].clear();
            self.pending_fonts[i] = PendingFonts::default();
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.roles.push(roles);
            self.attributes.push(Attributes::default());
            self.states.push(StateTable::default());
            self.local_transform.push(Transform3d::IDENTITY);
            self.container.push(None);
            self.visuals.push(Vec::new());
            self.pending_fonts.push(PendingFonts::default());
            self.generation.push(0);
            idx
        };

        let id = self.id_at(idx);
        if roles.is_ui() {
            self.set(id, core::iter::empty());
        }
        id
    }

    /// Creates a component and applies `attributes` through
    /// [`set`](Self::set).
    pub fn create_with(
        &mut self,
        roles: Roles,
        attributes: impl IntoIterator<Item = crate::attributes::Attribute>,
    ) -> ComponentId {
        let id = self.create(roles);
        self.set(id, attributes);
        id
    }

    /// Removes a component and its whole subtree from the tree, freeing their
    /// slots for reuse.
    ///
    /// Every removed component is unregistered from the scheduler and its
    /// outstanding font tickets are invalidated. Owned visual resources are
    /// dropped without being handed to a disposer; call
    /// [`clear`](Self::clear) first to release them.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn remove(&mut self, id: ComponentId) {
        self.validate(id);
        let doomed: Vec<ComponentId> = self.subtree(id).collect();

        if self.parent[id.idx as usize] != INVALID {
            self.unlink_from_parent(id.idx);
        }

        for victim in doomed {
            let i = victim.idx as usize;
            self.scheduler.dispose(victim);
            self.first_child[i] = INVALID;
            self.parent[i] = INVALID;
            self.next_sibling[i] = INVALID;
            self.prev_sibling[i] = INVALID;
            self.visuals[i].clear();
            self.states[i] = StateTable::default();
            self.pending_fonts[i] = PendingFonts::default();
            // Bump generation so old handles immediately fail validation.
            self.generation[i] += 1;
            self.free_list.push(victim.idx);
        }
    }

    /// Returns whether the given handle refers to a live component.
    #[must_use]
    pub fn is_alive(&self, id: ComponentId) -> bool {
        id.idx < self.len
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    /// Number of live components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    /// Returns whether the tree holds no live component.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // -- Topology API --

    /// Appends `children`, in order, as the last children of `parent`.
    ///
    /// Before any insertion, every inline child requests a layout-only
    /// update on `parent`: inline content reshapes the parent's own layout
    /// as soon as it is attached.
    ///
    /// # Panics
    ///
    /// Panics if any handle is stale, if a child already has a parent, or if
    /// a child is `parent` itself or one of its ancestors.
    pub fn add(&mut self, parent: ComponentId, children: &[ComponentId]) {
        self.validate(parent);
        for &child in children {
            self.validate(child);
            if self.roles[child.idx as usize].contains(Roles::INLINE) {
                self.request_update(parent, UpdateFlags::LAYOUT);
            }
        }

        for &child in children {
            let p = parent.idx;
            let c = child.idx;
            assert!(
                self.parent[c as usize] == INVALID,
                "child already has a parent"
            );
            let mut at = p;
            while at != INVALID {
                assert!(at != c, "cannot add a component to its own subtree");
                at = self.parent[at as usize];
            }

            self.parent[c as usize] = p;
            self.prev_sibling[c as usize] = INVALID;
            self.next_sibling[c as usize] = INVALID;

            if self.first_child[p as usize] == INVALID {
                self.first_child[p as usize] = c;
            } else {
                // Walk to last child.
                let mut last = self.first_child[p as usize];
                while self.next_sibling[last as usize] != INVALID {
                    last = self.next_sibling[last as usize];
                }
                self.next_sibling[last as usize] = c;
                self.prev_sibling[c as usize] = last;
            }
        }
    }

    /// Removes `child` from its current parent, keeping it alive.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the component has no parent.
    pub fn detach(&mut self, child: ComponentId) {
        self.validate(child);
        assert!(
            self.parent[child.idx as usize] != INVALID,
            "component has no parent"
        );
        self.unlink_from_parent(child.idx);
    }

    /// Returns the host-graph parent of a component, if any.
    #[must_use]
    pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        (p != INVALID).then(|| self.id_at(p))
    }

    /// Returns an iterator over the direct children of a component.
    #[must_use]
    pub fn children(&self, id: ComponentId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.first_child[id.idx as usize])
    }

    /// Returns a pre-order iterator over the subtree rooted at `id`, starting
    /// with `id` itself.
    #[must_use]
    pub fn subtree(&self, id: ComponentId) -> Subtree<'_> {
        self.validate(id);
        Subtree::new(self, id.idx)
    }

    /// Returns the roles of a component.
    #[must_use]
    pub fn roles(&self, id: ComponentId) -> Roles {
        self.validate(id);
        self.roles[id.idx as usize]
    }

    // -- UI hierarchy --

    /// Returns the parent if it is a UI component.
    #[must_use]
    pub fn ui_parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.validate(id);
        self.ui_parent_idx(id.idx).map(|p| self.id_at(p))
    }

    /// Returns the children that are UI components, in order.
    pub fn ui_children(&self, id: ComponentId) -> impl Iterator<Item = ComponentId> + '_ {
        self.children(id)
            .filter(move |child| self.roles[child.idx as usize].is_ui())
    }

    /// Returns the UI component reached by following UI parents until none
    /// remain. A component without a UI parent is its own highest parent.
    #[must_use]
    pub fn highest_parent(&self, id: ComponentId) -> ComponentId {
        self.validate(id);
        let mut at = id.idx;
        while let Some(p) = self.ui_parent_idx(at) {
            at = p;
        }
        self.id_at(at)
    }

    /// Returns the number of UI ancestors above `id`.
    #[must_use]
    pub fn parents_number(&self, id: ComponentId) -> u32 {
        self.validate(id);
        let mut depth = 0;
        let mut at = id.idx;
        while let Some(p) = self.ui_parent_idx(at) {
            depth += 1;
            at = p;
        }
        depth
    }

    // -- Transforms --

    /// Sets the local transform of a component.
    pub fn set_transform(&mut self, id: ComponentId, transform: Transform3d) {
        self.validate(id);
        self.local_transform[id.idx as usize] = transform;
    }

    /// Returns the local transform of a component.
    #[must_use]
    pub fn local_transform(&self, id: ComponentId) -> Transform3d {
        self.validate(id);
        self.local_transform[id.idx as usize]
    }

    /// Composes the current world transform of a component from its whole
    /// ancestor chain, UI or not.
    #[must_use]
    pub fn world_transform(&self, id: ComponentId) -> Transform3d {
        self.validate(id);
        self.world_transform_at(id.idx)
    }

    // -- Payloads and visuals --

    /// Sets or clears the renderable payload of a component.
    pub fn set_container(&mut self, id: ComponentId, container: Option<ContainerId>) {
        self.validate(id);
        self.container[id.idx as usize] = container;
    }

    /// Returns the payload of the nearest component, starting with `id`
    /// itself, that carries one; else the default container.
    #[must_use]
    pub fn container(&self, id: ComponentId) -> Option<ContainerId> {
        self.validate(id);
        let mut at = id.idx;
        while at != INVALID {
            if let Some(container) = self.container[at as usize] {
                return Some(container);
            }
            at = self.parent[at as usize];
        }
        self.defaults.container
    }

    /// Records a visual resource owned by `id`, to be released on
    /// [`clear`](Self::clear).
    pub fn attach_visual(&mut self, id: ComponentId, resource: VisualResource) {
        self.validate(id);
        self.visuals[id.idx as usize].push(resource);
    }

    /// Returns the visual resources currently owned by `id`.
    #[must_use]
    pub fn visuals(&self, id: ComponentId) -> &[VisualResource] {
        self.validate(id);
        &self.visuals[id.idx as usize]
    }

    /// Tears down the subtree rooted at `id`, `id` included.
    ///
    /// Visits the subtree depth-first. Every visited component is
    /// unregistered from the scheduler and hands its owned visual resources
    /// to `disposer`. The components stay in the tree; a later
    /// [`set`](Self::set) registers them again.
    pub fn clear(&mut self, id: ComponentId, disposer: &mut impl ResourceDisposer) {
        let visited: Vec<ComponentId> = self.subtree(id).collect();
        for component in visited {
            self.scheduler.dispose(component);
            for resource in self.visuals[component.idx as usize].drain(..) {
                disposer.dispose(component, resource);
            }
        }
    }

    // -- Scheduling --

    /// Returns the update scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &UpdateScheduler {
        &self.scheduler
    }

    /// Marks update classes pending for `id`.
    ///
    /// Returns `false`, and does nothing, if `id` is not registered.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn request_update(&mut self, id: ComponentId, flags: UpdateFlags) -> bool {
        self.validate(id);
        self.scheduler.request_update(id, flags)
    }

    /// Runs one update tick: drains the scheduler, then drives `passes`
    /// through parsing, layout, and inner, each over the whole batch.
    ///
    /// Returns the drained batch.
    pub fn update(&mut self, passes: &mut impl UpdatePasses) -> UpdateBatch {
        self.update_traced(passes, &mut Tracer::none())
    }

    /// Like [`update`](Self::update), emitting flush and pass events.
    pub fn update_traced(
        &mut self,
        passes: &mut impl UpdatePasses,
        tracer: &mut Tracer<'_>,
    ) -> UpdateBatch {
        let flush_index = self.flush_index;
        self.flush_index += 1;

        tracer.flush_begin(&FlushBeginEvent {
            flush_index,
            registered: trace::count(self.scheduler.len()),
        });
        let batch = self.scheduler.flush();
        let tree = &*self;

        run_pass(tracer, flush_index, UpdatePass::Parsing, &batch.parsing, |id| {
            passes.parse(tree, id);
        });
        run_pass(tracer, flush_index, UpdatePass::Layout, &batch.layout, |id| {
            passes.layout(tree, id);
        });
        run_pass(tracer, flush_index, UpdatePass::Inner, &batch.inner, |id| {
            passes.update_inner(tree, id);
        });

        tracer.flush_summary(&FlushSummary {
            flush_index,
            parsed: trace::count(batch.parsing.len()),
            laid_out: trace::count(batch.layout.len()),
            inner: trace::count(batch.inner.len()),
            stale: batch.stale,
        });
        batch
    }

    // -- Internal helpers --

    /// Builds the current handle for a live slot.
    pub(crate) fn id_at(&self, idx: u32) -> ComponentId {
        ComponentId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Panics if the handle is stale.
    pub(crate) fn validate(&self, id: ComponentId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale ComponentId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Slot of the parent if it is a UI component.
    pub(crate) fn ui_parent_idx(&self, idx: u32) -> Option<u32> {
        let p = self.parent[idx as usize];
        (p != INVALID && self.roles[p as usize].is_ui()).then_some(p)
    }

    /// World transform at a live slot.
    pub(crate) fn world_transform_at(&self, idx: u32) -> Transform3d {
        let mut world = self.local_transform[idx as usize];
        let mut at = self.parent[idx as usize];
        while at != INVALID {
            world = self.local_transform[at as usize] * world;
            at = self.parent[at as usize];
        }
        world
    }

    /// Removes `idx` from its parent's child list.
    fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            // Was first child.
            self.first_child[p as usize] = next;
        }

        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
    }
}

/// Runs one pass over `ids`, bracketed by begin/end events.
fn run_pass(
    tracer: &mut Tracer<'_>,
    flush_index: u64,
    pass: UpdatePass,
    ids: &[ComponentId],
    mut step: impl FnMut(ComponentId),
) {
    let event = PassEvent {
        flush_index,
        pass,
        components: trace::count(ids.len()),
    };
    tracer.pass_begin(&event);
    for &id in ids {
        step(id);
    }
    tracer.pass_end(&event);
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::attributes::Attribute;
    use crate::collaborator::ResourceKey;

    /// Records every pass invocation in call order.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<(UpdatePass, ComponentId)>,
    }

    impl UpdatePasses for Recorder {
        fn parse(&mut self, _: &ComponentTree, id: ComponentId) {
            self.calls.push((UpdatePass::Parsing, id));
        }

        fn layout(&mut self, _: &ComponentTree, id: ComponentId) {
            self.calls.push((UpdatePass::Layout, id));
        }

        fn update_inner(&mut self, _: &ComponentTree, id: ComponentId) {
            self.calls.push((UpdatePass::Inner, id));
        }
    }

    #[test]
    fn create_and_remove() {
        let mut tree = ComponentTree::new();
        let id = tree.create(Roles::block());
        assert!(tree.is_alive(id));
        assert!(tree.scheduler().is_registered(id));
        tree.remove(id);
        assert!(!tree.is_alive(id));
        assert!(!tree.scheduler().is_registered(id));
        assert!(tree.is_empty());
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut tree = ComponentTree::new();
        let id1 = tree.create(Roles::block());
        tree.remove(id1);
        let id2 = tree.create(Roles::block());
        assert!(!tree.is_alive(id1));
        assert!(tree.is_alive(id2));
        assert_eq!(id1.index(), id2.index());
        assert_ne!(id1.generation(), id2.generation());
    }

    #[test]
    fn plain_objects_are_not_registered() {
        let mut tree = ComponentTree::new();
        let scene = tree.create(Roles::NONE);
        assert!(!tree.scheduler().is_registered(scene));
        assert!(!tree.request_update(scene, UpdateFlags::ALL));
    }

    #[test]
    fn remove_frees_whole_subtree() {
        let mut tree = ComponentTree::new();
        let root = tree.create(Roles::block());
        let a = tree.create(Roles::block());
        let b = tree.create(Roles::text());
        tree.add(root, &[a]);
        tree.add(a, &[b]);

        tree.remove(a);
        assert!(tree.is_alive(root));
        assert!(!tree.is_alive(a));
        assert!(!tree.is_alive(b));
        assert!(tree.children(root).next().is_none());
        assert_eq!(tree.scheduler().len(), 1);
    }

    #[test]
    fn add_appends_in_order() {
        let mut tree = ComponentTree::new();
        let parent = tree.create(Roles::block());
        let a = tree.create(Roles::block());
        let b = tree.create(Roles::block());
        let c = tree.create(Roles::block());
        tree.add(parent, &[a, b]);
        tree.add(parent, &[c]);

        let kids: Vec<_> = tree.children(parent).collect();
        assert_eq!(kids, vec![a, b, c]);
        assert_eq!(tree.parent(b), Some(parent));
    }

    #[test]
    fn adding_inline_child_requests_parent_layout() {
        let mut tree = ComponentTree::new();
        let parent = tree.create(Roles::block());
        let span = tree.create(Roles::text());

        tree.add(parent, &[span]);
        let batch = tree.scheduler.flush();
        assert_eq!(batch.layout, [parent]);
        assert!(batch.parsing.is_empty());
        assert!(batch.inner.is_empty());
    }

    #[test]
    fn adding_block_child_requests_nothing() {
        let mut tree = ComponentTree::new();
        let parent = tree.create(Roles::block());
        let child = tree.create(Roles::block());

        tree.add(parent, &[child]);
        assert!(tree.scheduler.flush().is_empty());
    }

    #[test]
    #[should_panic(expected = "child already has a parent")]
    fn adding_attached_child_panics() {
        let mut tree = ComponentTree::new();
        let p1 = tree.create(Roles::block());
        let p2 = tree.create(Roles::block());
        let child = tree.create(Roles::block());
        tree.add(p1, &[child]);
        tree.add(p2, &[child]);
    }

    #[test]
    #[should_panic(expected = "cannot add a component to its own subtree")]
    fn adding_ancestor_panics() {
        let mut tree = ComponentTree::new();
        let root = tree.create(Roles::block());
        let child = tree.create(Roles::block());
        tree.add(root, &[child]);
        tree.add(child, &[root]);
    }

    #[test]
    fn detach_keeps_component_alive() {
        let mut tree = ComponentTree::new();
        let parent = tree.create(Roles::block());
        let a = tree.create(Roles::block());
        let b = tree.create(Roles::block());
        tree.add(parent, &[a, b]);

        tree.detach(a);
        assert!(tree.is_alive(a));
        assert_eq!(tree.parent(a), None);
        let kids: Vec<_> = tree.children(parent).collect();
        assert_eq!(kids, vec![b]);
    }

    #[test]
    fn ui_hierarchy_stops_at_plain_objects() {
        let mut tree = ComponentTree::new();
        let scene = tree.create(Roles::NONE);
        let root = tree.create(Roles::block());
        let mid = tree.create(Roles::block());
        let leaf = tree.create(Roles::text());
        tree.add(scene, &[root]);
        tree.add(root, &[mid]);
        tree.add(mid, &[leaf]);

        assert_eq!(tree.ui_parent(root), None);
        assert_eq!(tree.ui_parent(leaf), Some(mid));
        assert_eq!(tree.highest_parent(leaf), root);
        assert_eq!(tree.highest_parent(root), root);
        assert_eq!(tree.parents_number(leaf), 2);
        assert_eq!(tree.parents_number(root), 0);
    }

    #[test]
    fn ui_children_skip_plain_objects() {
        let mut tree = ComponentTree::new();
        let root = tree.create(Roles::block());
        let helper = tree.create(Roles::NONE);
        let text = tree.create(Roles::text());
        tree.add(root, &[helper, text]);

        let kids: Vec<_> = tree.ui_children(root).collect();
        assert_eq!(kids, vec![text]);
    }

    #[test]
    fn world_transform_composes_every_ancestor() {
        let mut tree = ComponentTree::new();
        let scene = tree.create(Roles::NONE);
        let root = tree.create(Roles::block());
        let child = tree.create(Roles::block());
        tree.add(scene, &[root]);
        tree.add(root, &[child]);
        tree.set_transform(scene, Transform3d::from_translation(1.0, 0.0, 0.0));
        tree.set_transform(root, Transform3d::from_scale(2.0, 2.0, 2.0));
        tree.set_transform(child, Transform3d::from_translation(0.0, 1.0, 0.0));

        let world = tree.world_transform(child);
        assert_eq!(world.transform_point([0.0, 0.0, 0.0]), [1.0, 2.0, 0.0]);

        // Live: a later ancestor change is seen on the next query.
        tree.set_transform(scene, Transform3d::IDENTITY);
        let world = tree.world_transform(child);
        assert_eq!(world.transform_point([0.0, 0.0, 0.0]), [0.0, 2.0, 0.0]);
    }

    #[test]
    fn container_falls_back_through_ancestors() {
        let mut tree = ComponentTree::with_defaults(Defaults {
            container: Some(ContainerId(99)),
            ..Defaults::default()
        });
        let root = tree.create(Roles::block());
        let child = tree.create(Roles::text());
        tree.add(root, &[child]);

        assert_eq!(tree.container(child), Some(ContainerId(99)));
        tree.set_container(root, Some(ContainerId(7)));
        assert_eq!(tree.container(child), Some(ContainerId(7)));
        tree.set_container(child, Some(ContainerId(8)));
        assert_eq!(tree.container(child), Some(ContainerId(8)));
    }

    #[test]
    fn clear_unregisters_and_disposes_subtree() {
        let mut tree = ComponentTree::new();
        let root = tree.create(Roles::block());
        let child = tree.create(Roles::block());
        let text = tree.create(Roles::text());
        tree.add(root, &[child]);
        tree.add(child, &[text]);
        tree.attach_visual(child, VisualResource::Geometry(ResourceKey(1)));
        tree.attach_visual(text, VisualResource::Material(ResourceKey(2)));
        tree.set(text, [Attribute::Content("hi".into())]);

        let mut released = Vec::new();
        tree.clear(child, &mut |id: ComponentId, res: VisualResource| {
            released.push((id, res));
        });

        assert_eq!(
            released,
            vec![
                (child, VisualResource::Geometry(ResourceKey(1))),
                (text, VisualResource::Material(ResourceKey(2))),
            ]
        );
        assert!(tree.scheduler().is_registered(root));
        assert!(!tree.scheduler().is_registered(child));
        assert!(!tree.scheduler().is_registered(text));
        assert!(!tree.request_update(text, UpdateFlags::ALL));
        assert!(tree.visuals(child).is_empty());

        let batch = tree.update(&mut Recorder::default());
        assert!(!batch.parsing.contains(&text));
        assert!(!batch.layout.contains(&text));
    }

    #[test]
    fn flush_runs_passes_breadth_first() {
        let mut tree = ComponentTree::new();
        let parent = tree.create(Roles::block());
        let child = tree.create(Roles::block());
        tree.add(parent, &[child]);
        tree.request_update(child, UpdateFlags::ALL);
        tree.request_update(parent, UpdateFlags::ALL);

        let mut recorder = Recorder::default();
        tree.update(&mut recorder);

        let passes: Vec<_> = recorder.calls.iter().map(|(pass, _)| *pass).collect();
        assert_eq!(
            passes,
            vec![
                UpdatePass::Parsing,
                UpdatePass::Parsing,
                UpdatePass::Layout,
                UpdatePass::Layout,
                UpdatePass::Inner,
                UpdatePass::Inner,
            ]
        );
    }

    #[test]
    fn coalesced_requests_run_once() {
        let mut tree = ComponentTree::new();
        let a = tree.create(Roles::block());
        tree.request_update(a, UpdateFlags::PARSING);
        tree.request_update(a, UpdateFlags::PARSING);

        let mut recorder = Recorder::default();
        tree.update(&mut recorder);
        assert_eq!(recorder.calls, vec![(UpdatePass::Parsing, a)]);

        let mut recorder = Recorder::default();
        tree.update(&mut recorder);
        assert!(recorder.calls.is_empty());
    }

    #[test]
    #[should_panic(expected = "stale ComponentId")]
    fn removed_handle_panics_on_set_transform() {
        let mut tree = ComponentTree::new();
        let id = tree.create(Roles::block());
        tree.remove(id);
        tree.set_transform(id, Transform3d::IDENTITY);
    }

    #[test]
    #[should_panic(expected = "stale ComponentId")]
    fn removed_handle_panics_on_parent() {
        let mut tree = ComponentTree::new();
        let id = tree.create(Roles::block());
        tree.remove(id);
        let _ = tree.parent(id);
    }
}
