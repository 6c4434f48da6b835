// src/transpile/imports.rs
//! Import statement to namespace reference mapping
//!
//! The host has no module loader. Every `import` statement is replaced by a
//! single declaration that reads the same symbol out of the global
//! `imports.*` (shell and GI libraries) or `Me.imports.*` (files of the
//! extension itself) namespace.
//!
//! Resolution is an ordered table: the first mapping whose matcher accepts
//! the accumulated statement wins, so more specific entries must come before
//! entries they overlap with (`import PangoCairo` before `import Pango`).

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Extracts the quoted module specifier following `from`
static SPECIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bfrom\s*['"]([^'"]*)['"]"#).unwrap());

/// How a mapping recognizes the statement it replaces
#[derive(Debug, Clone)]
pub enum ImportMatcher {
    /// Accumulated statement text contains this fragment
    Fragment(String),
    /// Module specifier after `from` is exactly this path
    Specifier(String),
    /// Accumulated statement text matches this regular expression
    Pattern(Regex),
}

impl ImportMatcher {
    /// Test the matcher against a whitespace-trimmed, concatenated statement
    pub fn matches(&self, statement: &str) -> bool {
        match self {
            Self::Fragment(fragment) => statement.contains(fragment.as_str()),
            Self::Specifier(path) => module_specifier(statement) == Some(path.as_str()),
            Self::Pattern(re) => re.is_match(statement),
        }
    }
}

impl fmt::Display for ImportMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fragment(fragment) => write!(f, "contains {:?}", fragment),
            Self::Specifier(path) => write!(f, "from {:?}", path),
            Self::Pattern(re) => write!(f, "matches /{}/", re.as_str()),
        }
    }
}

/// Return the module specifier of an import statement, if it has one
pub fn module_specifier(statement: &str) -> Option<&str> {
    SPECIFIER
        .captures(statement)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
}

/// A single (matcher, replacement line) pair
#[derive(Debug, Clone)]
pub struct ImportMapping {
    pub matcher: ImportMatcher,
    /// Line written in place of the whole import statement
    pub emit: String,
}

impl ImportMapping {
    pub fn fragment(fragment: impl Into<String>, emit: impl Into<String>) -> Self {
        Self {
            matcher: ImportMatcher::Fragment(fragment.into()),
            emit: emit.into(),
        }
    }

    pub fn specifier(path: impl Into<String>, emit: impl Into<String>) -> Self {
        Self {
            matcher: ImportMatcher::Specifier(path.into()),
            emit: emit.into(),
        }
    }

    pub fn pattern(re: Regex, emit: impl Into<String>) -> Self {
        Self {
            matcher: ImportMatcher::Pattern(re),
            emit: emit.into(),
        }
    }
}

enum Key {
    Fragment(&'static str),
    Specifier(&'static str),
}

use Key::{Fragment, Specifier};

// Order is load-bearing: earlier entries shadow later overlapping ones.
const BUILTIN: &[(Key, &str)] = &[
    (Fragment("import * as Main"), "const Main = imports.ui.main;"),
    (Fragment("import * as Fav"), "const Fav = imports.ui.appFavorites;"),
    (Fragment("import * as PopupMenu"), "const PopupMenu = imports.ui.popupMenu;"),
    (Fragment("import * as BoxPointer"), "const BoxPointer = imports.ui.boxpointer;"),
    (Fragment("import { BaseIcon } from"), "const BaseIcon = imports.ui.iconGrid;"),
    (Fragment("import { Dash } from"), "const Dash = imports.ui.dash.Dash;"),
    (Fragment("import { ShowAppsIcon }"), "const ShowAppsIcon = imports.ui.dash.ShowAppsIcon;"),
    (Fragment("import GLib"), "const GLib = imports.gi.GLib;"),
    (Fragment("import Gio"), "const Gio = imports.gi.Gio;"),
    (Fragment("import GObject"), "const GObject = imports.gi.GObject;"),
    (Fragment("import Clutter"), "const Clutter = imports.gi.Clutter;"),
    (Fragment("import Graphene"), "const Graphene = imports.gi.Graphene;"),
    (Fragment("import St"), "const St = imports.gi.St;"),
    (Fragment("import PangoCairo"), "const PangoCairo = imports.gi.PangoCairo;"),
    (Fragment("import Pango"), "const Pango = imports.gi.Pango;"),
    (Fragment("import Meta"), "const Meta = imports.gi.Meta;"),
    (Fragment("import Shell"), "const Shell = imports.gi.Shell;"),
    (Fragment("import Gtk"), "const Gtk = imports.gi.Gtk;"),
    (Fragment("import Gdk"), "const Gdk = imports.gi.Gdk;"),
    (Fragment("import Adw"), "const Adw = imports.gi.Adw;"),
    (Fragment("import Cairo"), "const Cairo = imports.cairo;"),
    (Specifier("./animator.js"), "const Animator = Me.imports.animator.Animator;"),
    (Specifier("./autohide.js"), "const AutoHide = Me.imports.autohide.AutoHide;"),
    (Fragment("import { MonitorsConfig }"), "const MonitorsConfig = Me.imports.monitors.MonitorsConfig;"),
    (Fragment("import { Timer }"), "const Timer = Me.imports.timer.Timer;"),
    (Fragment("import { Style }"), "const Style = Me.imports.style.Style;"),
    (Fragment("import { Dock }"), "const Dock = Me.imports.dock.Dock;"),
    (
        Fragment("import { DockPosition }"),
        "const DockPosition = {BOTTOM: 'bottom',LEFT: 'left',RIGHT: 'right',TOP: 'top'};",
    ),
    (Fragment("import { Services }"), "const Services = Me.imports.services.Services;"),
    (Fragment("import { runTests }"), "const runTests = Me.imports.diagnostics.runTests;"),
    (
        Fragment("import { schemaId, SettingsKeys }"),
        "const { schemaId, settingsKeys, SettingsKeys } = Me.imports.preferences.keys;",
    ),
    (Fragment("import { Bounce, Linear }"), "const { Bounce, Linear } = Me.imports.effects.easing;"),
    (
        Fragment("import { MonochromeEffect }"),
        "const MonochromeEffect = Me.imports.effects.monochrome_effect.MonochromeEffect;",
    ),
    (Fragment("import { TintEffect }"), "const TintEffect = Me.imports.effects.tint_effect.TintEffect;"),
    (Fragment("import { Clock }"), "const Clock = Me.imports.apps.clock.Clock;"),
    (Fragment("import { Calendar }"), "const Calendar = Me.imports.apps.calendar.Calendar;"),
    (Fragment("import { Dot }"), "const Dot = Me.imports.apps.dot.Dot;"),
    (Fragment("import { PrefKeys }"), "let { PrefKeys } = Me.imports.preferences.prefKeys;"),
    (
        Fragment("import { getPointer, warpPointer }"),
        "const { getPointer, warpPointer } = Me.imports.utils;",
    ),
    (Specifier("../drawing.js"), "const Drawing = Me.imports.drawing.Drawing;"),
    (
        Specifier("./dockItems.js"),
        "const { DockItemDotsOverlay, DockItemList, DockItemBadgeOverlay, DockItemContainer, DockBackground } = Me.imports.dockItems;",
    ),
    (Fragment("import {ExtensionPreferences"), "class ExtensionPreferences {}"),
    (Fragment("import {Extension"), "class Extension {}"),
    (
        Fragment("import { trySpawnCommandLine }"),
        "const { trySpawnCommandLine } = imports.misc.util;",
    ),
];

/// Ordered import rewrite table
#[derive(Debug, Clone, Default)]
pub struct ImportTable {
    mappings: Vec<ImportMapping>,
}

impl ImportTable {
    /// Create a table from mappings, evaluated in the given order
    pub fn new(mappings: Vec<ImportMapping>) -> Self {
        Self { mappings }
    }

    /// The table shipped with the tool
    pub fn builtin() -> Self {
        let mappings = BUILTIN
            .iter()
            .map(|(key, emit)| match key {
                Fragment(text) => ImportMapping::fragment(*text, *emit),
                Specifier(path) => ImportMapping::specifier(*path, *emit),
            })
            .collect();
        Self { mappings }
    }

    /// Place `overrides` ahead of the existing mappings
    pub fn with_overrides(mut self, overrides: Vec<ImportMapping>) -> Self {
        if !overrides.is_empty() {
            let mut mappings = overrides;
            mappings.append(&mut self.mappings);
            self.mappings = mappings;
        }
        self
    }

    /// Find the first mapping accepting the statement
    pub fn resolve(&self, statement: &str) -> Option<&ImportMapping> {
        self.mappings.iter().find(|m| m.matcher.matches(statement))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImportMapping> {
        self.mappings.iter()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}
