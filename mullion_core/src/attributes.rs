// Copyright 2026 the Mullion Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute vocabulary, value types, and per-component storage.
//!
//! [`Attribute`] is one key/value pair as passed to
//! [`ComponentTree::set`](crate::component::ComponentTree::set).
//! [`Attributes`] is the per-component override store: every field is an
//! `Option`, and `None` means "inherit or use the default". Zero, `false`,
//! and empty strings are ordinary explicit values.

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use kurbo::RoundedRectRadii;

use crate::component::{FontFamilyId, TextureId};

/// An sRGB color with 8 bits per channel.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Creates a color from its channels.
    #[must_use]
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Creates a color from a `0xRRGGBB` literal.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "each channel is masked to 8 bits before the cast"
    )]
    pub const fn from_hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
        }
    }

    /// Returns the color as a `0xRRGGBB` value.
    #[must_use]
    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Error returned when a color string is not `#rgb` or `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseColorError;

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected a color of the form #rgb or #rrggbb")
    }
}

impl core::error::Error for ParseColorError {}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').ok_or(ParseColorError)?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseColorError);
        }
        let value = u32::from_str_radix(digits, 16).map_err(|_| ParseColorError)?;
        match digits.len() {
            3 => {
                let r = (value >> 8) & 0xf;
                let g = (value >> 4) & 0xf;
                let b = value & 0xf;
                Ok(Self::from_hex((r * 0x11) << 16 | (g * 0x11) << 8 | b * 0x11))
            }
            6 => Ok(Self::from_hex(value)),
            _ => Err(ParseColorError),
        }
    }
}

/// Glyph rendering technique.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextType {
    /// Multi-channel signed distance field glyphs.
    #[default]
    Msdf,
    /// Plain bitmap glyphs.
    Bitmap,
}

/// How a background texture fills its box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BackgroundSize {
    /// Scale to cover the whole box, cropping overflow.
    #[default]
    Cover,
    /// Scale to fit inside the box, letterboxing.
    Contain,
    /// Stretch to the box, ignoring aspect ratio.
    Stretch,
}

/// Main axis of a block's children.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ContentDirection {
    /// Left to right.
    Row,
    /// Right to left.
    RowReverse,
    /// Top to bottom.
    #[default]
    Column,
    /// Bottom to top.
    ColumnReverse,
}

/// Distribution of children along the main axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum JustifyContent {
    /// Packed at the start.
    #[default]
    Start,
    /// Packed at the end.
    End,
    /// Packed around the center.
    Center,
    /// Equal space around each child.
    SpaceAround,
    /// Equal space between children, none at the edges.
    SpaceBetween,
    /// Equal space between children and at the edges.
    SpaceEvenly,
}

/// Alignment of children (or text lines) on the cross axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AlignContent {
    /// Centered.
    #[default]
    Center,
    /// Flush left.
    Left,
    /// Flush right.
    Right,
    /// Flush top.
    Top,
    /// Flush bottom.
    Bottom,
}

/// Where a font resource comes from (URL, file name, or registry key).
pub type FontSource = String;

/// Every attribute key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[expect(missing_docs, reason = "variant names mirror the attribute keys")]
pub enum AttributeKey {
    FontFamily,
    FontTexture,
    FontSize,
    FontColor,
    FontOpacity,
    FontSupersampling,
    BreakOn,
    TextType,
    BorderRadius,
    InterLine,
    Offset,
    BackgroundColor,
    BackgroundOpacity,
    BackgroundTexture,
    BackgroundSize,
    HiddenOverflow,
    ContentDirection,
    JustifyContent,
    AlignContent,
    Padding,
    Margin,
    Width,
    Height,
    Content,
    Src,
}

/// One attribute assignment.
///
/// `FontFamily` and `FontTexture` carry a *source* to be resolved by the font
/// system; the resolved handle is installed once loading completes.
#[derive(Clone, Debug, PartialEq)]
pub enum Attribute {
    /// Font family to load.
    FontFamily(FontSource),
    /// Font atlas texture to load.
    FontTexture(FontSource),
    /// Glyph size in world units.
    FontSize(f64),
    /// Glyph color.
    FontColor(Color),
    /// Glyph opacity in `0.0..=1.0`.
    FontOpacity(f32),
    /// Whether glyph sampling uses supersampling.
    FontSupersampling(bool),
    /// Characters after which a line may break.
    BreakOn(String),
    /// Glyph rendering technique.
    TextType(TextType),
    /// Background corner radii.
    BorderRadius(RoundedRectRadii),
    /// Extra space between text lines.
    InterLine(f64),
    /// Z distance between a box and its content.
    Offset(f64),
    /// Background color.
    BackgroundColor(Color),
    /// Background opacity in `0.0..=1.0`.
    BackgroundOpacity(f32),
    /// Background texture; `None` clears it.
    BackgroundTexture(Option<TextureId>),
    /// Background texture fit.
    BackgroundSize(BackgroundSize),
    /// Whether block children are clipped to this node's box.
    HiddenOverflow(bool),
    /// Main axis of the children.
    ContentDirection(ContentDirection),
    /// Main-axis distribution of the children.
    JustifyContent(JustifyContent),
    /// Cross-axis alignment of the children.
    AlignContent(AlignContent),
    /// Inner spacing on every side.
    Padding(f64),
    /// Outer spacing on every side.
    Margin(f64),
    /// Box width.
    Width(f64),
    /// Box height.
    Height(f64),
    /// Text content.
    Content(String),
    /// Image source.
    Src(String),
}

impl Attribute {
    /// Returns the key this attribute assigns.
    #[must_use]
    pub const fn key(&self) -> AttributeKey {
        match self {
            Self::FontFamily(_) => AttributeKey::FontFamily,
            Self::FontTexture(_) => AttributeKey::FontTexture,
            Self::FontSize(_) => AttributeKey::FontSize,
            Self::FontColor(_) => AttributeKey::FontColor,
            Self::FontOpacity(_) => AttributeKey::FontOpacity,
            Self::FontSupersampling(_) => AttributeKey::FontSupersampling,
            Self::BreakOn(_) => AttributeKey::BreakOn,
            Self::TextType(_) => AttributeKey::TextType,
            Self::BorderRadius(_) => AttributeKey::BorderRadius,
            Self::InterLine(_) => AttributeKey::InterLine,
            Self::Offset(_) => AttributeKey::Offset,
            Self::BackgroundColor(_) => AttributeKey::BackgroundColor,
            Self::BackgroundOpacity(_) => AttributeKey::BackgroundOpacity,
            Self::BackgroundTexture(_) => AttributeKey::BackgroundTexture,
            Self::BackgroundSize(_) => AttributeKey::BackgroundSize,
            Self::HiddenOverflow(_) => AttributeKey::HiddenOverflow,
            Self::ContentDirection(_) => AttributeKey::ContentDirection,
            Self::JustifyContent(_) => AttributeKey::JustifyContent,
            Self::AlignContent(_) => AttributeKey::AlignContent,
            Self::Padding(_) => AttributeKey::Padding,
            Self::Margin(_) => AttributeKey::Margin,
            Self::Width(_) => AttributeKey::Width,
            Self::Height(_) => AttributeKey::Height,
            Self::Content(_) => AttributeKey::Content,
            Self::Src(_) => AttributeKey::Src,
        }
    }
}

/// Local attribute overrides of one component.
#[derive(Clone, Debug, Default, PartialEq)]
#[expect(missing_docs, reason = "fields mirror the Attribute variants")]
pub struct Attributes {
    pub font_family: Option<FontFamilyId>,
    pub font_texture: Option<TextureId>,
    pub font_size: Option<f64>,
    pub font_color: Option<Color>,
    pub font_opacity: Option<f32>,
    pub font_supersampling: Option<bool>,
    pub break_on: Option<String>,
    pub text_type: Option<TextType>,
    pub border_radius: Option<RoundedRectRadii>,
    pub inter_line: Option<f64>,
    pub offset: Option<f64>,
    pub background_color: Option<Color>,
    pub background_opacity: Option<f32>,
    pub background_texture: Option<Option<TextureId>>,
    pub background_size: Option<BackgroundSize>,
    pub hidden_overflow: Option<bool>,
    pub content_direction: Option<ContentDirection>,
    pub justify_content: Option<JustifyContent>,
    pub align_content: Option<AlignContent>,
    pub padding: Option<f64>,
    pub margin: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub content: Option<String>,
    pub src: Option<String>,
}

impl Attributes {
    /// Writes one attribute.
    ///
    /// Font sources are not stored here; they are resolved asynchronously and
    /// installed through [`install_font_family`](Self::install_font_family) /
    /// [`install_font_texture`](Self::install_font_texture). Returns `false`
    /// for those two keys.
    pub fn apply(&mut self, attribute: Attribute) -> bool {
        match attribute {
            Attribute::FontFamily(_) | Attribute::FontTexture(_) => return false,
            Attribute::FontSize(v) => self.font_size = Some(v),
            Attribute::FontColor(v) => self.font_color = Some(v),
            Attribute::FontOpacity(v) => self.font_opacity = Some(v),
            Attribute::FontSupersampling(v) => self.font_supersampling = Some(v),
            Attribute::BreakOn(v) => self.break_on = Some(v),
            Attribute::TextType(v) => self.text_type = Some(v),
            Attribute::BorderRadius(v) => self.border_radius = Some(v),
            Attribute::InterLine(v) => self.inter_line = Some(v),
            Attribute::Offset(v) => self.offset = Some(v),
            Attribute::BackgroundColor(v) => self.background_color = Some(v),
            Attribute::BackgroundOpacity(v) => self.background_opacity = Some(v),
            Attribute::BackgroundTexture(v) => self.background_texture = Some(v),
            Attribute::BackgroundSize(v) => self.background_size = Some(v),
            Attribute::HiddenOverflow(v) => self.hidden_overflow = Some(v),
            Attribute::ContentDirection(v) => self.content_direction = Some(v),
            Attribute::JustifyContent(v) => self.justify_content = Some(v),
            Attribute::AlignContent(v) => self.align_content = Some(v),
            Attribute::Padding(v) => self.padding = Some(v),
            Attribute::Margin(v) => self.margin = Some(v),
            Attribute::Width(v) => self.width = Some(v),
            Attribute::Height(v) => self.height = Some(v),
            Attribute::Content(v) => self.content = Some(v),
            Attribute::Src(v) => self.src = Some(v),
        }
        true
    }

    /// Installs a resolved font family.
    pub fn install_font_family(&mut self, family: FontFamilyId) {
        self.font_family = Some(family);
    }

    /// Installs a resolved font atlas texture.
    pub fn install_font_texture(&mut self, texture: TextureId) {
        self.font_texture = Some(texture);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_short_and_long_colors() {
        assert_eq!("#f00".parse::<Color>(), Ok(Color::from_hex(0xff0000)));
        assert_eq!("#12ab9C".parse::<Color>(), Ok(Color::from_rgb8(0x12, 0xab, 0x9c)));
    }

    #[test]
    fn reject_malformed_colors() {
        assert_eq!("f00".parse::<Color>(), Err(ParseColorError));
        assert_eq!("#ff00".parse::<Color>(), Err(ParseColorError));
        assert_eq!("#+ff".parse::<Color>(), Err(ParseColorError));
        assert_eq!("#ggg".parse::<Color>(), Err(ParseColorError));
    }

    #[test]
    fn hex_round_trip() {
        assert_eq!(Color::from_hex(0x222222).to_hex(), 0x222222);
    }

    #[test]
    fn zero_is_an_explicit_value() {
        let mut attrs = Attributes::default();
        assert!(attrs.apply(Attribute::BackgroundOpacity(0.0)));
        assert!(attrs.apply(Attribute::HiddenOverflow(false)));
        assert!(attrs.apply(Attribute::Content(String::new())));
        assert_eq!(attrs.background_opacity, Some(0.0));
        assert_eq!(attrs.hidden_overflow, Some(false));
        assert_eq!(attrs.content.as_deref(), Some(""));
    }

    #[test]
    fn font_sources_are_not_stored() {
        let mut attrs = Attributes::default();
        assert!(!attrs.apply(Attribute::FontFamily("Roboto.json".into())));
        assert_eq!(attrs.font_family, None);
        attrs.install_font_family(FontFamilyId(3));
        assert_eq!(attrs.font_family, Some(FontFamilyId(3)));
    }
}
