// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Startup settings read from JSON.
//!
//! Reading is tolerant field by field: a value of the wrong shape is skipped
//! (with a `debug!` line) and the previous value is kept, so one bad entry
//! never discards the rest of the document. Only a document that is not a JSON
//! object at all is an error.

use arbor_tree::{CloseOperation, Color, Panel, PanelStyle, Window};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ConfigError;

/// Defaults for new windows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// Body fill.
    pub background: Color,
    /// Title bar fill.
    pub title_bar_color: Color,
    /// Title bar height in pixels.
    pub title_bar_height: i32,
    /// What closing does.
    pub close_operation: CloseOperation,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            background: Window::DEFAULT_BACKGROUND,
            title_bar_color: Window::DEFAULT_TITLE_BAR_COLOR,
            title_bar_height: Window::DEFAULT_TITLE_BAR_HEIGHT,
            close_operation: CloseOperation::default(),
        }
    }
}

/// Defaults for new panels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelSettings {
    /// Viewport inset.
    pub padding: i32,
    /// Wheel/key step in pixels.
    pub sensitivity: i32,
    /// Fill; `None` makes panels transparent.
    pub background: Option<Color>,
    /// Outline, only used with a background.
    pub outline: Option<Color>,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            padding: 0,
            sensitivity: Panel::DEFAULT_SENSITIVITY,
            background: None,
            outline: None,
        }
    }
}

/// All settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Window defaults.
    pub window: WindowSettings,
    /// Panel defaults.
    pub panel: PanelSettings,
}

impl Settings {
    /// Defaults overlaid with whatever `json` provides.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let mut settings = Self::default();
        settings.apply_json(json)?;
        Ok(settings)
    }

    /// Overlay the values in `json`. Returns how many values were applied.
    pub fn apply_json(&mut self, json: &str) -> Result<usize, ConfigError> {
        match serde_json::from_str::<Value>(json)? {
            Value::Object(root) => Ok(self.apply_object(&root)),
            other => Err(ConfigError::NotAnObject(kind_of(&other))),
        }
    }

    /// Serialize to pretty JSON. Colors are written as numbers.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn apply_object(&mut self, root: &Map<String, Value>) -> usize {
        let mut applied = 0;
        if let Some(window) = section(root, "window") {
            let w = &mut self.window;
            applied += apply(
                window,
                "window",
                "background",
                read_color,
                &mut w.background,
            );
            applied += apply(
                window,
                "window",
                "title_bar_color",
                read_color,
                &mut w.title_bar_color,
            );
            applied += apply(
                window,
                "window",
                "title_bar_height",
                read_size,
                &mut w.title_bar_height,
            );
            applied += apply(
                window,
                "window",
                "close_operation",
                read_close,
                &mut w.close_operation,
            );
        }
        if let Some(panel) = section(root, "panel") {
            let p = &mut self.panel;
            applied += apply(panel, "panel", "padding", read_size, &mut p.padding);
            applied += apply(
                panel,
                "panel",
                "sensitivity",
                read_positive,
                &mut p.sensitivity,
            );
            applied += apply(
                panel,
                "panel",
                "background",
                read_optional_color,
                &mut p.background,
            );
            applied += apply(
                panel,
                "panel",
                "outline",
                read_optional_color,
                &mut p.outline,
            );
        }
        applied
    }

    /// A window titled `title` using these defaults.
    pub fn build_window(&self, title: impl Into<String>) -> Window {
        let w = &self.window;
        Window::new(title)
            .with_background(w.background)
            .with_title_bar(w.title_bar_height, w.title_bar_color)
            .with_close_operation(w.close_operation)
    }

    /// A panel using these defaults.
    pub fn build_panel(&self) -> Panel {
        let p = &self.panel;
        let style = match p.background {
            Some(background) => PanelStyle::Paintable {
                background,
                outline: p.outline,
            },
            None => PanelStyle::Transparent,
        };
        Panel::new(style)
            .with_padding(p.padding)
            .with_sensitivity(p.sensitivity)
    }
}

fn section<'a>(root: &'a Map<String, Value>, name: &str) -> Option<&'a Map<String, Value>> {
    match root.get(name)? {
        Value::Object(map) => Some(map),
        other => {
            log::debug!(
                "skipping `{name}`: expected an object, found {}",
                kind_of(other)
            );
            None
        }
    }
}

fn apply<T>(
    map: &Map<String, Value>,
    section: &str,
    key: &str,
    read: fn(&Value) -> Option<T>,
    slot: &mut T,
) -> usize {
    let Some(value) = map.get(key) else {
        return 0;
    };
    match read(value) {
        Some(v) => {
            *slot = v;
            1
        }
        None => {
            log::debug!(
                "skipping `{section}.{key}`: unexpected {} value",
                kind_of(value)
            );
            0
        }
    }
}

/// A packed `0xAARRGGBB` number or a `#RRGGBB` / `#AARRGGBB` string.
fn read_color(v: &Value) -> Option<Color> {
    match v {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()).map(Color),
        Value::String(s) => Color::from_hex(s),
        _ => None,
    }
}

fn read_optional_color(v: &Value) -> Option<Option<Color>> {
    match v {
        Value::Null => Some(None),
        other => read_color(other).map(Some),
    }
}

fn read_size(v: &Value) -> Option<i32> {
    v.as_i64()
        .and_then(|n| i32::try_from(n).ok())
        .filter(|n| *n >= 0)
}

fn read_positive(v: &Value) -> Option<i32> {
    read_size(v).filter(|n| *n > 0)
}

fn read_close(v: &Value) -> Option<CloseOperation> {
    CloseOperation::deserialize(v).ok()
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
