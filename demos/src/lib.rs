// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared pieces for the demo programs.

use arbor_tree::render::{FontId, Surface};
use arbor_tree::{Bounds, Color};

/// A surface that logs every draw call at `info` level.
///
/// Text is measured as a fixed six pixels per character.
#[derive(Debug, Default)]
pub struct LogSurface {
    /// Draw calls issued since the last [`LogSurface::take_calls`].
    pub calls: usize,
}

impl LogSurface {
    const GLYPH: i32 = 6;

    /// Number of calls since the previous take, resetting the count.
    pub fn take_calls(&mut self) -> usize {
        std::mem::take(&mut self.calls)
    }
}

impl Surface for LogSurface {
    fn fill_rect(&mut self, bounds: Bounds, color: Color) {
        self.calls += 1;
        log::info!("fill    {bounds:?} #{:08x}", color.argb());
    }

    fn draw_outline(&mut self, bounds: Bounds, color: Color) {
        self.calls += 1;
        log::info!("outline {bounds:?} #{:08x}", color.argb());
    }

    fn draw_shadow(&mut self, bounds: Bounds) {
        self.calls += 1;
        log::info!("shadow  {bounds:?}");
    }

    fn draw_text(&mut self, text: &str, _font: FontId, x: i32, y: i32, _color: Color) {
        self.calls += 1;
        log::info!("text    {text:?} @ {x},{y}");
    }

    fn measure_text(&self, text: &str, _font: FontId) -> i32 {
        i32::try_from(text.chars().count()).unwrap_or(i32::MAX / Self::GLYPH) * Self::GLYPH
    }

    fn wrap_text(&self, text: &str, font: FontId, max_width: i32) -> Vec<String> {
        let mut lines = Vec::new();
        let mut line = String::new();
        for word in text.split_whitespace() {
            let candidate = if line.is_empty() {
                word.to_owned()
            } else {
                format!("{line} {word}")
            };
            if self.measure_text(&candidate, font) > max_width && !line.is_empty() {
                lines.push(std::mem::replace(&mut line, word.to_owned()));
            } else {
                line = candidate;
            }
        }
        if !line.is_empty() {
            lines.push(line);
        }
        lines
    }
}

/// Initialize `env_logger`, defaulting to `info` when `RUST_LOG` is unset.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
