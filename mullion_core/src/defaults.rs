// Copyright 2026 the Mullion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Process-wide default attribute values.

use alloc::string::String;

use kurbo::RoundedRectRadii;

use crate::attributes::{
    AlignContent, BackgroundSize, Color, ContentDirection, JustifyContent, TextType,
};
use crate::component::{ContainerId, FontFamilyId, TextureId};

/// The value every resolver falls back to when neither a component nor its
/// ancestors override an attribute.
///
/// Every resolvable attribute has a non-optional field here, so a lookup can
/// never come back empty. Attributes whose *value* is optional (no font
/// loaded yet, no background texture) default to `None`.
#[derive(Clone, Debug, PartialEq)]
pub struct Defaults {
    /// Renderable payload used when no ancestor carries one.
    pub container: Option<ContainerId>,
    /// Font family used until one is loaded.
    pub font_family: Option<FontFamilyId>,
    /// Font atlas texture used until one is loaded.
    pub font_texture: Option<TextureId>,
    /// Glyph size in world units.
    pub font_size: f64,
    /// Glyph color.
    pub font_color: Color,
    /// Glyph opacity.
    pub font_opacity: f32,
    /// Whether glyph sampling uses supersampling.
    pub font_supersampling: bool,
    /// Characters after which a line may break.
    pub break_on: String,
    /// Glyph rendering technique.
    pub text_type: TextType,
    /// Background corner radii.
    pub border_radius: RoundedRectRadii,
    /// Extra space between text lines.
    pub inter_line: f64,
    /// Z distance between a box and its content.
    pub offset: f64,
    /// Background color.
    pub background_color: Color,
    /// Background opacity.
    pub background_opacity: f32,
    /// Background texture.
    pub background_texture: Option<TextureId>,
    /// Background texture fit.
    pub background_size: BackgroundSize,
    /// Whether block children are clipped.
    pub hidden_overflow: bool,
    /// Main axis of the children.
    pub content_direction: ContentDirection,
    /// Main-axis distribution of the children.
    pub justify_content: JustifyContent,
    /// Cross-axis alignment of the children.
    pub align_content: AlignContent,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            container: None,
            font_family: None,
            font_texture: None,
            font_size: 0.05,
            font_color: Color::from_hex(0xffffff),
            font_opacity: 1.0,
            font_supersampling: true,
            break_on: String::from("- ,.:?!\n"),
            text_type: TextType::Msdf,
            border_radius: RoundedRectRadii::from_single_radius(0.01),
            inter_line: 0.01,
            offset: 0.01,
            background_color: Color::from_hex(0x222222),
            background_opacity: 0.8,
            background_texture: None,
            background_size: BackgroundSize::Cover,
            hidden_overflow: false,
            content_direction: ContentDirection::Column,
            justify_content: JustifyContent::Start,
            align_content: AlignContent::Center,
        }
    }
}
