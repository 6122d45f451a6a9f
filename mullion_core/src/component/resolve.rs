// Copyright 2026 the Mullion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute getters.
//!
//! Three resolution classes:
//!
//! - **Cascading** (font, text type, border radius): the component's own
//!   value, else the nearest UI ancestor's, else the default. The walk stops
//!   at the first ancestor that is not a UI component.
//! - **Non-cascading** (background, spacing between lines, z offset,
//!   overflow, child distribution): the component's own value, else the
//!   default. Ancestors are never consulted.
//! - **Local** (box metrics, content, image source): the component's own
//!   value only.
//!
//! Nothing is cached. Every call walks the live tree, so results depend only
//! on tree shape and attribute state at call time.

use kurbo::RoundedRectRadii;

use crate::attributes::{
    AlignContent, Attributes, BackgroundSize, Color, ContentDirection, JustifyContent, TextType,
};

use super::id::{ComponentId, FontFamilyId, TextureId};
use super::tree::ComponentTree;

impl ComponentTree {
    /// Returns the local overrides of a component.
    #[must_use]
    pub fn attributes(&self, id: ComponentId) -> &Attributes {
        self.validate(id);
        &self.attributes[id.idx as usize]
    }

    /// First value `get` finds on `id` or its UI ancestors.
    fn cascade<'a, T>(
        &'a self,
        id: ComponentId,
        get: impl Fn(&'a Attributes) -> Option<T>,
    ) -> Option<T> {
        self.validate(id);
        let mut at = id.idx;
        loop {
            if let Some(value) = get(&self.attributes[at as usize]) {
                return Some(value);
            }
            at = self.ui_parent_idx(at)?;
        }
    }

    fn local(&self, id: ComponentId) -> &Attributes {
        self.attributes(id)
    }

    // -- Cascading --

    /// Resolved font family, `None` while no family is loaded anywhere up the
    /// chain.
    #[must_use]
    pub fn font_family(&self, id: ComponentId) -> Option<FontFamilyId> {
        self.cascade(id, |a| a.font_family)
            .or(self.defaults.font_family)
    }

    /// Resolved font atlas texture.
    #[must_use]
    pub fn font_texture(&self, id: ComponentId) -> Option<TextureId> {
        self.cascade(id, |a| a.font_texture)
            .or(self.defaults.font_texture)
    }

    /// Resolved glyph size.
    #[must_use]
    pub fn font_size(&self, id: ComponentId) -> f64 {
        self.cascade(id, |a| a.font_size)
            .unwrap_or(self.defaults.font_size)
    }

    /// Resolved glyph color.
    #[must_use]
    pub fn font_color(&self, id: ComponentId) -> Color {
        self.cascade(id, |a| a.font_color)
            .unwrap_or(self.defaults.font_color)
    }

    /// Resolved glyph opacity.
    #[must_use]
    pub fn font_opacity(&self, id: ComponentId) -> f32 {
        self.cascade(id, |a| a.font_opacity)
            .unwrap_or(self.defaults.font_opacity)
    }

    /// Resolved supersampling switch.
    #[must_use]
    pub fn font_supersampling(&self, id: ComponentId) -> bool {
        self.cascade(id, |a| a.font_supersampling)
            .unwrap_or(self.defaults.font_supersampling)
    }

    /// Resolved line-break characters.
    #[must_use]
    pub fn break_on(&self, id: ComponentId) -> &str {
        self.cascade(id, |a| a.break_on.as_deref())
            .unwrap_or(&self.defaults.break_on)
    }

    /// Resolved glyph rendering technique.
    #[must_use]
    pub fn text_type(&self, id: ComponentId) -> TextType {
        self.cascade(id, |a| a.text_type)
            .unwrap_or(self.defaults.text_type)
    }

    /// Resolved background corner radii.
    #[must_use]
    pub fn border_radius(&self, id: ComponentId) -> RoundedRectRadii {
        self.cascade(id, |a| a.border_radius)
            .unwrap_or(self.defaults.border_radius)
    }

    // -- Non-cascading --

    /// Extra space between text lines.
    #[must_use]
    pub fn inter_line(&self, id: ComponentId) -> f64 {
        self.local(id).inter_line.unwrap_or(self.defaults.inter_line)
    }

    /// Z distance between the box and its content.
    #[must_use]
    pub fn offset(&self, id: ComponentId) -> f64 {
        self.local(id).offset.unwrap_or(self.defaults.offset)
    }

    /// Background color.
    #[must_use]
    pub fn background_color(&self, id: ComponentId) -> Color {
        self.local(id)
            .background_color
            .unwrap_or(self.defaults.background_color)
    }

    /// Background opacity. An explicit `0.0` is kept.
    #[must_use]
    pub fn background_opacity(&self, id: ComponentId) -> f32 {
        self.local(id)
            .background_opacity
            .unwrap_or(self.defaults.background_opacity)
    }

    /// Background texture.
    #[must_use]
    pub fn background_texture(&self, id: ComponentId) -> Option<TextureId> {
        self.local(id)
            .background_texture
            .unwrap_or(self.defaults.background_texture)
    }

    /// Background texture fit.
    #[must_use]
    pub fn background_size(&self, id: ComponentId) -> BackgroundSize {
        self.local(id)
            .background_size
            .unwrap_or(self.defaults.background_size)
    }

    /// Whether block children are clipped to this component's box.
    #[must_use]
    pub fn hidden_overflow(&self, id: ComponentId) -> bool {
        self.local(id)
            .hidden_overflow
            .unwrap_or(self.defaults.hidden_overflow)
    }

    /// Main axis of the children.
    #[must_use]
    pub fn content_direction(&self, id: ComponentId) -> ContentDirection {
        self.local(id)
            .content_direction
            .unwrap_or(self.defaults.content_direction)
    }

    /// Main-axis distribution of the children.
    #[must_use]
    pub fn justify_content(&self, id: ComponentId) -> JustifyContent {
        self.local(id)
            .justify_content
            .unwrap_or(self.defaults.justify_content)
    }

    /// Cross-axis alignment of the children.
    #[must_use]
    pub fn align_content(&self, id: ComponentId) -> AlignContent {
        self.local(id)
            .align_content
            .unwrap_or(self.defaults.align_content)
    }

    // -- Local --

    /// Inner spacing, `0.0` when unset.
    #[must_use]
    pub fn padding(&self, id: ComponentId) -> f64 {
        self.local(id).padding.unwrap_or(0.0)
    }

    /// Outer spacing, `0.0` when unset.
    #[must_use]
    pub fn margin(&self, id: ComponentId) -> f64 {
        self.local(id).margin.unwrap_or(0.0)
    }

    /// Box width, if set.
    #[must_use]
    pub fn width(&self, id: ComponentId) -> Option<f64> {
        self.local(id).width
    }

    /// Box height, if set.
    #[must_use]
    pub fn height(&self, id: ComponentId) -> Option<f64> {
        self.local(id).height
    }

    /// Text content, if set.
    #[must_use]
    pub fn content(&self, id: ComponentId) -> Option<&str> {
        self.local(id).content.as_deref()
    }

    /// Image source, if set.
    #[must_use]
    pub fn src(&self, id: ComponentId) -> Option<&str> {
        self.local(id).src.as_deref()
    }
}
