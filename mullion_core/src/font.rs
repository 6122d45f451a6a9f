// Copyright 2026 the Mullion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Asynchronous font resolution.
//!
//! Setting [`Attribute::FontFamily`] or [`Attribute::FontTexture`] does not
//! store anything on the component. It queues a [`FontRequest`] on the
//! tree's outbox and holds back the layout update the attribute would
//! otherwise trigger. The host drains the outbox with
//! [`ComponentTree::take_font_requests`], loads the resources however it
//! likes, and reports each completion through
//! [`ComponentTree::resolve_font`]. Only then is the resource installed and
//! layout requested.
//!
//! Each request carries a [`FontTicket`]. A newer request of the same kind
//! on the same component supersedes the older ticket, and tickets of removed
//! components are refused, so late completions can never clobber newer
//! state.
//!
//! [`FontLibrary`] is a ready-made cache in front of a [`FontLoader`]: every
//! source is loaded once and shared by all components asking for it.
//!
//! [`Attribute::FontFamily`]: crate::attributes::Attribute::FontFamily
//! [`Attribute::FontTexture`]: crate::attributes::Attribute::FontTexture

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::attributes::FontSource;
use crate::component::{ComponentId, ComponentTree, FontFamilyId, TextureId};
use crate::scheduler::UpdateFlags;
use crate::trace::{FontRequestEvent, FontResolvedEvent, Tracer};

/// Which font resource a request is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontKind {
    /// Glyph metrics and atlas layout.
    Family,
    /// Atlas texture.
    Texture,
}

/// Identifies one outstanding font request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FontTicket {
    /// The component that asked.
    pub component: ComponentId,
    /// What it asked for.
    pub kind: FontKind,
    /// Tree-wide request serial; newer requests supersede older ones.
    pub serial: u64,
}

impl FontTicket {
    /// Pairs this ticket with the loaded resource.
    #[must_use]
    pub const fn resolve(self, resource: FontResource) -> FontResolution {
        FontResolution {
            ticket: self,
            resource,
        }
    }
}

/// A request for the font system, drained from the tree's outbox.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontRequest {
    /// Ticket to hand back on completion.
    pub ticket: FontTicket,
    /// Where to load the resource from.
    pub source: FontSource,
}

/// A loaded font resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontResource {
    /// A loaded family.
    Family(FontFamilyId),
    /// A loaded atlas texture.
    Texture(TextureId),
}

impl FontResource {
    /// The kind of request this resource satisfies.
    #[must_use]
    pub const fn kind(self) -> FontKind {
        match self {
            Self::Family(_) => FontKind::Family,
            Self::Texture(_) => FontKind::Texture,
        }
    }
}

/// A completed request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FontResolution {
    /// The ticket of the request.
    pub ticket: FontTicket,
    /// What was loaded.
    pub resource: FontResource,
}

/// Starts loading font resources.
///
/// Implementations are fire-and-forget: `load` returns immediately and the
/// completion is reported later, through [`FontLibrary::loaded`] or
/// [`ComponentTree::resolve_font`].
pub trait FontLoader {
    /// Begins loading the resource `request` names.
    fn load(&mut self, request: &FontRequest);
}

impl<F: FnMut(&FontRequest)> FontLoader for F {
    fn load(&mut self, request: &FontRequest) {
        self(request);
    }
}

/// Serials of the outstanding requests of one component; `0` means none.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct PendingFonts {
    family: u64,
    texture: u64,
}

impl PendingFonts {
    fn slot(&mut self, kind: FontKind) -> &mut u64 {
        match kind {
            FontKind::Family => &mut self.family,
            FontKind::Texture => &mut self.texture,
        }
    }

    fn get(self, kind: FontKind) -> u64 {
        match kind {
            FontKind::Family => self.family,
            FontKind::Texture => self.texture,
        }
    }
}

impl ComponentTree {
    /// Queues a font request for `id`, superseding any earlier one of the
    /// same kind.
    pub(crate) fn request_font(
        &mut self,
        id: ComponentId,
        kind: FontKind,
        source: FontSource,
        tracer: &mut Tracer<'_>,
    ) {
        let serial = self.next_font_serial;
        self.next_font_serial += 1;
        *self.pending_fonts[id.idx as usize].slot(kind) = serial;
        tracer.font_request(&FontRequestEvent {
            component_index: id.idx,
            kind,
            serial,
        });
        self.font_requests.push(FontRequest {
            ticket: FontTicket {
                component: id,
                kind,
                serial,
            },
            source,
        });
    }

    /// Drains the font request outbox.
    pub fn take_font_requests(&mut self) -> Vec<FontRequest> {
        core::mem::take(&mut self.font_requests)
    }

    /// Returns the font requests queued since the last drain.
    #[must_use]
    pub fn pending_font_requests(&self) -> &[FontRequest] {
        &self.font_requests
    }

    /// Returns whether `id` is waiting for a font resource of `kind`.
    #[must_use]
    pub fn is_font_pending(&self, id: ComponentId, kind: FontKind) -> bool {
        self.validate(id);
        self.pending_fonts[id.idx as usize].get(kind) != 0
    }

    /// Installs a loaded font resource and re-requests the updates that
    /// were held back while it loaded.
    ///
    /// A family reaches every UI component of the subtree (parsing and
    /// layout, since their text metrics change), then the highest parent
    /// (layout). A texture only re-lays out the highest parent.
    ///
    /// Returns `false`, and changes nothing, if the component was removed,
    /// if a newer request of the same kind superseded the ticket, or if the
    /// resource does not match the ticket's kind. Safe to call at any time
    /// between updates.
    pub fn resolve_font(&mut self, resolution: FontResolution) -> bool {
        self.resolve_font_traced(resolution, &mut Tracer::none())
    }

    /// Like [`resolve_font`](Self::resolve_font), emitting a
    /// [`FontResolvedEvent`].
    pub fn resolve_font_traced(
        &mut self,
        resolution: FontResolution,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        let ticket = resolution.ticket;
        let installed = self.install_font(resolution);
        tracer.font_resolved(&FontResolvedEvent {
            component_index: ticket.component.idx,
            kind: ticket.kind,
            serial: ticket.serial,
            installed,
        });
        installed
    }

    fn install_font(&mut self, resolution: FontResolution) -> bool {
        let FontResolution { ticket, resource } = resolution;
        let id = ticket.component;
        if !self.is_alive(id) || resource.kind() != ticket.kind {
            return false;
        }
        let pending = &mut self.pending_fonts[id.idx as usize];
        if pending.get(ticket.kind) != ticket.serial {
            return false;
        }
        *pending.slot(ticket.kind) = 0;

        let attributes = &mut self.attributes[id.idx as usize];
        match resource {
            FontResource::Family(family) => {
                attributes.install_font_family(family);
                let ui: Vec<ComponentId> = self
                    .subtree(id)
                    .filter(|&c| self.roles[c.idx as usize].is_ui())
                    .collect();
                for component in ui {
                    self.scheduler
                        .request_update(component, UpdateFlags::PARSING | UpdateFlags::LAYOUT);
                }
            }
            FontResource::Texture(texture) => attributes.install_font_texture(texture),
        }

        let top = self.highest_parent(id);
        self.scheduler.request_update(top, UpdateFlags::LAYOUT);
        true
    }
}

/// A caching front for a [`FontLoader`].
///
/// Each source is loaded at most once per kind. Requests for a source that
/// is still loading are parked and all resolved together when it lands;
/// requests for a loaded source resolve on the next
/// [`service`](Self::service) without reaching the loader.
#[derive(Debug)]
pub struct FontLibrary<L> {
    loader: L,
    families: HashMap<String, FontFamilyId>,
    textures: HashMap<String, TextureId>,
    waiting_families: HashMap<String, Vec<FontTicket>>,
    waiting_textures: HashMap<String, Vec<FontTicket>>,
    ready: Vec<FontResolution>,
}

impl<L: FontLoader> FontLibrary<L> {
    /// Creates an empty library in front of `loader`.
    #[must_use]
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            families: HashMap::new(),
            textures: HashMap::new(),
            waiting_families: HashMap::new(),
            waiting_textures: HashMap::new(),
            ready: Vec::new(),
        }
    }

    /// Returns the wrapped loader.
    #[must_use]
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Returns the wrapped loader mutably.
    pub fn loader_mut(&mut self) -> &mut L {
        &mut self.loader
    }

    /// Returns whether `source` has finished loading as `kind`.
    #[must_use]
    pub fn is_loaded(&self, kind: FontKind, source: &str) -> bool {
        match kind {
            FontKind::Family => self.families.contains_key(source),
            FontKind::Texture => self.textures.contains_key(source),
        }
    }

    /// Moves new requests out of the tree and installs everything that has
    /// finished loading.
    ///
    /// Returns the number of resources installed.
    pub fn service(&mut self, tree: &mut ComponentTree) -> usize {
        for request in tree.take_font_requests() {
            let ticket = request.ticket;
            let cached = match ticket.kind {
                FontKind::Family => self
                    .families
                    .get(&request.source)
                    .map(|&f| FontResource::Family(f)),
                FontKind::Texture => self
                    .textures
                    .get(&request.source)
                    .map(|&t| FontResource::Texture(t)),
            };
            if let Some(resource) = cached {
                self.ready.push(ticket.resolve(resource));
                continue;
            }
            let waiting = match ticket.kind {
                FontKind::Family => &mut self.waiting_families,
                FontKind::Texture => &mut self.waiting_textures,
            };
            let parked = waiting.entry(request.source.clone()).or_default();
            if parked.is_empty() {
                self.loader.load(&request);
            }
            parked.push(ticket);
        }

        let mut installed = 0;
        for resolution in self.ready.drain(..) {
            if tree.resolve_font(resolution) {
                installed += 1;
            }
        }
        installed
    }

    /// Records that `source` finished loading.
    ///
    /// Every request parked on it is resolved on the next
    /// [`service`](Self::service).
    pub fn loaded(&mut self, source: &str, resource: FontResource) {
        let parked = match resource {
            FontResource::Family(family) => {
                self.families.insert(String::from(source), family);
                self.waiting_families.remove(source)
            }
            FontResource::Texture(texture) => {
                self.textures.insert(String::from(source), texture);
                self.waiting_textures.remove(source)
            }
        };
        for ticket in parked.into_iter().flatten() {
            self.ready.push(ticket.resolve(resource));
        }
    }
}
