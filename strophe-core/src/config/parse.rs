//! TOML-subset keymap parser
//!
//! This is a minimal TOML parser that handles only the subset needed
//! for Strophe configuration. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, float, integer triple)
//! - [layer.<name>] headers, in order of appearance
//! - [layer.<name>.encoder] and [layer.<name>.stick] sub-sections
//! - Comments (# ...)
//!
//! NOT supported:
//! - Multi-line strings
//! - Datetime values
//! - Inline tables
//! - Dotted keys outside section headers

use heapless::String as HString;

use super::types::{DpadActions, KnobConfig, LayerConfig, StickMode, MAX_NAME_LEN};
use crate::color::{ColorError, Rgb};
use crate::keymap::{KeyAction, KeymapError};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid or unknown section header
    InvalidSection,
    /// Invalid value type for a key
    InvalidValue,
    /// Color is not a 6-hex-digit string or 3-element triple
    InvalidColor,
    /// Action name not found in the keyboard or consumer tables
    UnknownKeyName,
    /// More layers than the config can hold
    TooManyLayers,
}

impl From<ColorError> for ParseError {
    fn from(_: ColorError) -> Self {
        ParseError::InvalidColor
    }
}

impl From<KeymapError> for ParseError {
    fn from(_: KeymapError) -> Self {
        ParseError::UnknownKeyName
    }
}

/// Current parsing context
#[derive(Debug, Clone)]
enum Section {
    Root,
    Layer,
    LayerEncoder,
    LayerStick,
}

/// Stick keys accumulated for the layer being built
///
/// The `mode` key may arrive after the directional keys, so directions
/// are collected unconditionally and folded in when the layer closes.
#[derive(Default)]
struct StickSection {
    dpad: bool,
    actions: DpadActions,
}

/// Parse TOML configuration into a [`KnobConfig`]
pub fn parse_config(input: &str) -> Result<KnobConfig, ParseError> {
    let mut config = KnobConfig::new();
    let mut section = Section::Root;

    // Layer currently being built
    let mut current_layer: Option<LayerConfig> = None;
    let mut current_stick = StickSection::default();

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Check for section header
        if line.starts_with('[') && line.ends_with(']') {
            let header = line[1..line.len() - 1].trim();
            let (new_section, layer_name) = parse_section_header(header)?;

            if let Some(name) = layer_name {
                // New layer: close out the previous one first
                save_layer(&mut config, &mut current_layer, &mut current_stick)?;
                let mut layer = LayerConfig::default();
                layer.name = name;
                current_layer = Some(layer);
            } else if current_layer.is_none() {
                // encoder/stick sub-sections only make sense inside a layer
                return Err(ParseError::InvalidSection);
            }

            section = new_section;
            continue;
        }

        // Parse key = value
        if let Some((key, value)) = parse_key_value(line) {
            apply_value(
                &section,
                key,
                value,
                &mut config,
                &mut current_layer,
                &mut current_stick,
            )?;
        }
    }

    // Save final layer
    save_layer(&mut config, &mut current_layer, &mut current_stick)?;

    Ok(config)
}

/// Parse a section header like "layer.media" or "layer.media.stick"
///
/// Returns the section context plus the layer name when the header
/// opens a new layer.
fn parse_section_header(
    header: &str,
) -> Result<(Section, Option<HString<MAX_NAME_LEN>>), ParseError> {
    let mut parts = header.split('.');

    if parts.next() != Some("layer") {
        return Err(ParseError::InvalidSection);
    }
    let name = parts.next().ok_or(ParseError::InvalidSection)?;

    match parts.next() {
        None => {
            let name = HString::try_from(name).map_err(|_| ParseError::InvalidSection)?;
            Ok((Section::Layer, Some(name)))
        }
        Some("encoder") if parts.next().is_none() => Ok((Section::LayerEncoder, None)),
        Some("stick") if parts.next().is_none() => Ok((Section::LayerStick, None)),
        Some(_) => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = if let Some(hash_pos) = value.find('#') {
        // Make sure # is not inside a string
        let quote_count = value[..hash_pos].matches('"').count();
        if quote_count % 2 == 0 {
            value[..hash_pos].trim()
        } else {
            value
        }
    } else {
        value
    };

    Some((key, value))
}

/// Apply a key = value pair to the section being built
fn apply_value(
    section: &Section,
    key: &str,
    value: &str,
    config: &mut KnobConfig,
    current_layer: &mut Option<LayerConfig>,
    current_stick: &mut StickSection,
) -> Result<(), ParseError> {
    match section {
        Section::Root => {
            if key == "brightness" {
                config.brightness = value.parse().map_err(|_| ParseError::InvalidValue)?;
            }
        }
        Section::Layer => {
            let layer = current_layer.as_mut().ok_or(ParseError::InvalidSection)?;
            if key == "color" {
                layer.color = parse_color(value)?;
            }
        }
        Section::LayerEncoder => {
            let layer = current_layer.as_mut().ok_or(ParseError::InvalidSection)?;
            match key {
                "cw" => layer.encoder_cw = parse_action(value)?,
                "ccw" => layer.encoder_ccw = parse_action(value)?,
                _ => {}
            }
        }
        Section::LayerStick => {
            match key {
                "mode" => {
                    current_stick.dpad = match parse_string(value)? {
                        "mouse" => false,
                        "dpad" => true,
                        _ => return Err(ParseError::InvalidValue),
                    };
                }
                "up" => current_stick.actions.up = parse_action(value)?,
                "down" => current_stick.actions.down = parse_action(value)?,
                "left" => current_stick.actions.left = parse_action(value)?,
                "right" => current_stick.actions.right = parse_action(value)?,
                _ => {}
            }
        }
    }
    Ok(())
}

/// Close out the layer being built and append it to the config
fn save_layer(
    config: &mut KnobConfig,
    current_layer: &mut Option<LayerConfig>,
    current_stick: &mut StickSection,
) -> Result<(), ParseError> {
    let Some(mut layer) = current_layer.take() else {
        return Ok(());
    };

    let stick = core::mem::take(current_stick);
    if stick.dpad {
        layer.stick = StickMode::Dpad(stick.actions);
    }

    config
        .layers
        .push(layer)
        .map_err(|_| ParseError::TooManyLayers)
}

/// Strip the quotes from a string value
fn parse_string(value: &str) -> Result<&str, ParseError> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ParseError::InvalidValue)
}

/// Resolve a quoted action name into a [`KeyAction`]
fn parse_action(value: &str) -> Result<KeyAction, ParseError> {
    Ok(KeyAction::from_name(Some(parse_string(value)?))?)
}

/// Parse a color value: hex string or `[r, g, b]` triple
fn parse_color(value: &str) -> Result<Rgb, ParseError> {
    if let Some(triple) = value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
        let mut channels = triple.split(',');
        let mut next = || -> Result<u8, ParseError> {
            let field = channels.next().ok_or(ParseError::InvalidColor)?;
            field.trim().parse().map_err(|_| ParseError::InvalidColor)
        };
        let (r, g, b) = (next()?, next()?, next()?);
        if channels.next().is_some() {
            return Err(ParseError::InvalidColor);
        }
        return Ok(Rgb::new(r, g, b));
    }

    Ok(Rgb::parse_hex(parse_string(value)?)?)
}
