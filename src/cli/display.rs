// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal output for the petal CLI.
//!
//! One box per section, one row per record. Colors come from OneDark or One
//! Light depending on the terminal; `PETAL_THEME` (`dark`/`light`) overrides
//! the guess and `NO_COLOR` or a non-TTY stdout turns color off entirely.

use std::sync::OnceLock;

use petal::results::BreadCrumb;
use petal::{Direction, SearchKind};

/// Width between the two `│` borders.
pub const BOX_WIDTH: usize = 80;

// ═══════════════════════════════════════════════════════════════════════════
// THEME
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("PETAL_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg", bg 7 and up (except 8) is a light background
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(Ok(bg)) = colorfgbg.split(';').next_back().map(str::parse::<u8>) {
            if bg >= 7 && bg != 8 {
                return Theme::Light;
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

fn rgb((r, g, b): (u8, u8, u8)) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117);
    pub const GREEN: (u8, u8, u8) = (152, 195, 121);
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123);
    pub const BLUE: (u8, u8, u8) = (97, 175, 239);
    pub const MAGENTA: (u8, u8, u8) = (198, 120, 221);
    pub const CYAN: (u8, u8, u8) = (86, 182, 194);
    pub const GRAY: (u8, u8, u8) = (92, 99, 112);
    pub const BRIGHT_GREEN: (u8, u8, u8) = (166, 226, 46);
}

mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73);
    pub const GREEN: (u8, u8, u8) = (80, 161, 79);
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1);
    pub const BLUE: (u8, u8, u8) = (64, 120, 242);
    pub const MAGENTA: (u8, u8, u8) = (166, 38, 164);
    pub const CYAN: (u8, u8, u8) = (1, 132, 188);
    pub const GRAY: (u8, u8, u8) = (160, 161, 167);
    pub const BRIGHT_GREEN: (u8, u8, u8) = (68, 140, 39);
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            rgb(match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            })
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(MAGENTA);
theme_color!(CYAN);
theme_color!(GRAY);
theme_color!(BRIGHT_GREEN);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Theme color plus modifiers, or the bare text without a TTY.
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Length in chars, ignoring ANSI escapes.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

/// Cut plain text to `max` chars, marking the cut with `…`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// BOXES
// ═══════════════════════════════════════════════════════════════════════════

/// │ content          │
pub fn row(content: &str) {
    let border = GRAY();
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!("{}│{}{}{}{}│{}", border, RESET, content, " ".repeat(pad), border, RESET);
}

/// ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let border = GRAY();
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}┌{}{}{}{}┐{}",
        border,
        RESET,
        label_part,
        border,
        "─".repeat(remaining),
        RESET
    );
}

/// ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    let border = GRAY();
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}├{}{}{}{}┤{}",
        border,
        RESET,
        label_part,
        border,
        "─".repeat(remaining),
        RESET
    );
}

/// └──────────────────┘
pub fn section_bot() {
    println!("{}└{}┘{}", GRAY(), "─".repeat(BOX_WIDTH), RESET);
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Score with two decimals; brighter the better it matched.
pub fn score_value(score: f64) -> String {
    let text = format!("{:>6.2}", score);
    if !use_colors() {
        return text;
    }
    let color = if score >= 5.0 {
        BRIGHT_GREEN()
    } else if score >= 2.0 {
        GREEN()
    } else if score >= 1.0 {
        YELLOW()
    } else {
        GRAY()
    };
    format!("{}{}{}", color, text, RESET)
}

pub fn kind_badge(kind: SearchKind) -> String {
    let text = format!("[{}]", kind.name());
    if !use_colors() {
        return text;
    }
    let color = match kind {
        SearchKind::All => BLUE(),
        SearchKind::Cultivar => GREEN(),
        SearchKind::Originator => MAGENTA(),
        SearchKind::Group => YELLOW(),
        SearchKind::Country => CYAN(),
        SearchKind::Date => RED(),
    };
    format!("{}{}{}", color, text, RESET)
}

pub fn direction_arrow(direction: Direction) -> &'static str {
    if direction.is_ascending() {
        "↑"
    } else {
        "↓"
    }
}

/// `« 1 2 [3] 4 5 … 9 »` with the current page highlighted.
pub fn breadcrumb_line(pages: &[BreadCrumb]) -> String {
    pages
        .iter()
        .map(|crumb| {
            if crumb.selected {
                themed(CYAN, &[BOLD], &format!("[{}]", crumb.label))
            } else if crumb.active {
                crumb.label.clone()
            } else {
                themed(GRAY, &[DIM], &crumb.label)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
