// Copyright 2026 the Mullion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute assignment and update classification.

use crate::attributes::{Attribute, AttributeKey};
use crate::font::FontKind;
use crate::scheduler::UpdateFlags;
use crate::trace::Tracer;

use super::id::ComponentId;
use super::roles::Roles;
use super::tree::ComponentTree;

impl AttributeKey {
    /// The update classes assigning this key requests on a component with
    /// `roles`.
    ///
    /// Font sources request nothing here; their layout update is issued
    /// once the resource resolves.
    #[must_use]
    pub const fn update_class(self, roles: Roles) -> UpdateFlags {
        match self {
            Self::Content | Self::BreakOn => {
                UpdateFlags::new(roles.contains(Roles::TEXT), true, false)
            }
            Self::Width | Self::Height | Self::Padding => {
                UpdateFlags::new(roles.contains(Roles::INLINE_BLOCK), true, false)
            }
            Self::FontSize
            | Self::InterLine
            | Self::Margin
            | Self::ContentDirection
            | Self::JustifyContent
            | Self::AlignContent
            | Self::TextType
            | Self::BorderRadius
            | Self::BackgroundSize
            | Self::Src => UpdateFlags::LAYOUT,
            Self::FontColor
            | Self::FontOpacity
            | Self::FontSupersampling
            | Self::Offset
            | Self::BackgroundColor
            | Self::BackgroundOpacity
            | Self::BackgroundTexture => UpdateFlags::INNER,
            Self::HiddenOverflow | Self::FontFamily | Self::FontTexture => UpdateFlags::NONE,
        }
    }
}

impl ComponentTree {
    /// Assigns attributes to a UI component and schedules the updates they
    /// call for.
    ///
    /// Registers the component with the scheduler first, even when
    /// `attributes` is empty. Every value is stored, including those that
    /// schedule nothing. The requested classes of all keys are merged into
    /// one request. If layout is among them, the highest parent is also
    /// asked to re-lay out, since a local size change can move everything
    /// around it.
    ///
    /// Font sources are queued as [`FontRequest`](crate::font::FontRequest)s
    /// instead of stored, and suppress the layout request of the whole call
    /// until they resolve.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the component is not a UI component.
    pub fn set(&mut self, id: ComponentId, attributes: impl IntoIterator<Item = Attribute>) {
        self.set_traced(id, attributes, &mut Tracer::none());
    }

    /// Like [`set`](Self::set), emitting font request events.
    pub fn set_traced(
        &mut self,
        id: ComponentId,
        attributes: impl IntoIterator<Item = Attribute>,
        tracer: &mut Tracer<'_>,
    ) {
        self.validate(id);
        let roles = self.roles[id.idx as usize];
        assert!(roles.is_ui(), "{id:?} is not a UI component");
        self.scheduler.register(id);

        let mut flags = UpdateFlags::NONE;
        let mut awaits_font = false;
        for attribute in attributes {
            flags |= attribute.key().update_class(roles);
            match attribute {
                Attribute::FontFamily(source) => {
                    self.request_font(id, FontKind::Family, source, tracer);
                    awaits_font = true;
                }
                Attribute::FontTexture(source) => {
                    self.request_font(id, FontKind::Texture, source, tracer);
                    awaits_font = true;
                }
                other => {
                    self.attributes[id.idx as usize].apply(other);
                }
            }
        }

        if awaits_font {
            flags.layout = false;
        }
        if flags.is_empty() {
            return;
        }
        self.scheduler.request_update(id, flags);
        if flags.layout {
            let top = self.highest_parent(id);
            self.scheduler.request_update(top, UpdateFlags::LAYOUT);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;

    use crate::attributes::{Attribute, AttributeKey, Color};
    use crate::component::{ComponentTree, Roles};
    use crate::defaults::Defaults;
    use crate::scheduler::UpdateFlags;

    #[test]
    fn classification_table() {
        let block = Roles::block();
        let text = Roles::text();
        let inline_block = Roles::inline_block();

        assert_eq!(
            AttributeKey::Content.update_class(text),
            UpdateFlags::PARSING | UpdateFlags::LAYOUT
        );
        assert_eq!(AttributeKey::Content.update_class(block), UpdateFlags::LAYOUT);
        assert_eq!(
            AttributeKey::Width.update_class(inline_block),
            UpdateFlags::PARSING | UpdateFlags::LAYOUT
        );
        assert_eq!(AttributeKey::Padding.update_class(block), UpdateFlags::LAYOUT);
        assert_eq!(AttributeKey::Src.update_class(inline_block), UpdateFlags::LAYOUT);
        assert_eq!(AttributeKey::Offset.update_class(block), UpdateFlags::INNER);
        assert_eq!(
            AttributeKey::FontSupersampling.update_class(text),
            UpdateFlags::INNER
        );
        assert!(AttributeKey::HiddenOverflow.update_class(block).is_empty());
    }

    #[test]
    fn empty_set_registers_but_requests_nothing() {
        let mut tree = ComponentTree::new();
        let a = tree.create(Roles::block());
        tree.scheduler.dispose(a);

        tree.set(a, []);
        assert!(tree.scheduler().is_registered(a));
        assert!(tree.scheduler.flush().is_empty());
    }

    #[test]
    fn layout_change_also_lays_out_highest_parent() {
        // set(A, fontSize) then set(B, {}): A pending layout, B nothing.
        let mut tree = ComponentTree::new();
        let a = tree.create(Roles::block());
        let b = tree.create(Roles::block());
        tree.add(a, &[b]);

        tree.set(a, [Attribute::FontSize(12.0)]);
        tree.set(b, []);
        assert_eq!(tree.font_size(b), 12.0);

        let batch = tree.scheduler.flush();
        assert_eq!(batch.layout, vec![a]);
        assert!(batch.parsing.is_empty());
        assert!(batch.inner.is_empty());
    }

    #[test]
    fn nested_layout_change_reaches_root() {
        let mut tree = ComponentTree::new();
        let root = tree.create(Roles::block());
        let mid = tree.create(Roles::block());
        let text = tree.create(Roles::text());
        tree.add(root, &[mid]);
        tree.add(mid, &[text]);
        let _ = tree.scheduler.flush();

        tree.set(text, [Attribute::Content(String::from("Hello"))]);
        let batch = tree.scheduler.flush();
        assert_eq!(batch.parsing, vec![text]);
        assert_eq!(batch.layout, vec![root, text]);
        assert!(!batch.layout.contains(&mid));
    }

    #[test]
    fn inner_only_change_leaves_layout_alone() {
        let mut tree = ComponentTree::new();
        let root = tree.create(Roles::block());
        let child = tree.create(Roles::block());
        tree.add(root, &[child]);

        tree.set(
            child,
            [
                Attribute::BackgroundColor(Color::from_hex(0x336699)),
                Attribute::FontOpacity(0.5),
            ],
        );
        let batch = tree.scheduler.flush();
        assert_eq!(batch.inner, vec![child]);
        assert!(batch.layout.is_empty());
    }

    #[test]
    fn hidden_overflow_is_stored_without_scheduling() {
        let mut tree = ComponentTree::new();
        let a = tree.create(Roles::block());
        tree.set(a, [Attribute::HiddenOverflow(true)]);
        assert!(tree.hidden_overflow(a));
        assert!(tree.scheduler.flush().is_empty());
    }

    #[test]
    fn font_source_suppresses_layout_of_the_whole_call() {
        let mut tree = ComponentTree::new();
        let a = tree.create(Roles::text());
        tree.set(
            a,
            [
                Attribute::Content(String::from("Hi")),
                Attribute::FontColor(Color::from_hex(0xff0000)),
                Attribute::FontTexture(String::from("atlas.png")),
            ],
        );
        assert_eq!(tree.content(a), Some("Hi"));

        let batch = tree.scheduler.flush();
        assert_eq!(batch.parsing, vec![a]);
        assert!(batch.layout.is_empty());
        assert_eq!(batch.inner, vec![a]);
        assert_eq!(tree.font_texture(a), Defaults::default().font_texture);
    }

    #[test]
    #[should_panic(expected = "is not a UI component")]
    fn set_on_plain_object_panics() {
        let mut tree = ComponentTree::new();
        let scene = tree.create(Roles::NONE);
        tree.set(scene, [Attribute::FontSize(1.0)]);
    }
}
