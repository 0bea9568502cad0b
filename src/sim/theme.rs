//! Visual theme registry
//!
//! Themes are immutable data records; the registry holds a fixed ordered list
//! and a selection index. Consumers read colors through the current reference,
//! so "theme changed" is observable without any re-subscription. The core
//! never touches render objects — presentation resolves colors per entity
//! role through [`role_color`].

use serde::Serialize;

/// Immutable visual configuration for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    /// Stable identifier used for selection.
    pub id: &'static str,
    /// Human-facing name for the HUD.
    pub display_name: &'static str,
    /// Base surface color (RGB).
    pub surface_color: u32,
    pub emissive_color: u32,
    pub fog_color: u32,
    pub light_color: u32,
    pub wireframe: bool,
}

/// The fixed theme cycle, in lap order.
pub const THEMES: [Theme; 4] = [
    Theme {
        id: "PURPLE_NEON",
        display_name: "Bold Minimal",
        surface_color: 0x000510,
        emissive_color: 0x00aaff,
        fog_color: 0x00020a,
        light_color: 0x00ffff,
        wireframe: true,
    },
    Theme {
        id: "WIRE_TUNNEL",
        display_name: "Classic Wire",
        surface_color: 0x000000,
        emissive_color: 0x888888,
        fog_color: 0x000000,
        light_color: 0xffffff,
        wireframe: true,
    },
    Theme {
        id: "GOLD_RUN",
        display_name: "Gold Run",
        surface_color: 0x221100,
        emissive_color: 0xffaa00,
        fog_color: 0x110500,
        light_color: 0xffd700,
        wireframe: true,
    },
    Theme {
        id: "BLOODSTREAM",
        display_name: "Bloodstream",
        surface_color: 0x220000,
        emissive_color: 0xff3333,
        fog_color: 0x0a0000,
        light_color: 0xff6666,
        wireframe: true,
    },
];

/// Closed set of colorable entity roles. Presentation maps each mesh part to
/// a role once; colors then resolve purely from role x theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    Body,
    Accent,
    Wire,
}

/// Resolve a role's color under a theme. Pure; no scene-graph traversal.
pub fn role_color(role: Role, theme: &Theme) -> u32 {
    match role {
        Role::Body => theme.surface_color,
        Role::Accent => theme.emissive_color,
        Role::Wire => theme.light_color,
    }
}

/// Selection pointer into the fixed theme list.
#[derive(Debug, Clone, Default)]
pub struct ThemeRegistry {
    current: usize,
}

impl ThemeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn themes(&self) -> &'static [Theme] {
        &THEMES
    }

    /// The currently selected theme (a reference into the fixed list).
    pub fn current(&self) -> &'static Theme {
        &THEMES[self.current]
    }

    /// Select by identifier. An unknown id leaves the selection unchanged;
    /// that silence has always masked misconfiguration, so it is at least
    /// logged.
    pub fn select(&mut self, id: &str) {
        match THEMES.iter().position(|t| t.id == id) {
            Some(index) => self.current = index,
            None => log::warn!("unknown theme id {id:?}, keeping {}", self.current().id),
        }
    }

    /// Cycle to the theme for the given lap count.
    pub fn select_for_lap(&mut self, lap: u32) {
        self.current = lap as usize % THEMES.len();
    }
}
