//! Footprint derivation from catalog size descriptions.
//!
//! Size descriptions in the source catalog are free text ("2 blocks",
//! "Block A-B", "slot 4", "1.5 slots"). This module reduces them to a
//! deterministic `(internal_blocks, door_slots)` pair so enclosure planning
//! has something stable to sum. A small override table carries ground truth
//! for the microphone and audio-operator assemblies whose descriptions do
//! not mention their real footprint at all.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use crate::catalog::MountKind;

/// Blocks A-H on the internal mounting rail of one bay.
pub const INTERNAL_BLOCKS_PER_BAY: f64 = 8.0;
/// Front door slots 1-8 of one bay.
pub const DOOR_SLOTS_PER_BAY: f64 = 8.0;

/// Known footprints that the catalog text does not describe.
static SPACE_OVERRIDES: Lazy<HashMap<&'static str, (f64, f64)>> = Lazy::new(|| {
    HashMap::from([
        // Audio/telephone modules with microphones occupy both internal
        // blocks and door space.
        ("4100-1243", (2.0, 1.0)), // Master microphone assembly
        ("4100-1252", (1.0, 1.0)), // Audio/telephone operator interface
        ("4100-1253", (2.0, 1.0)), // Combined audio + microphone interface
        ("4100-1254", (2.0, 1.0)), // Two-channel audio operator interface
        ("4100-1270", (2.0, 1.0)), // Fire fighters telephone control
        ("4100-9620", (8.0, 1.0)), // Basic analog audio w/ microphone reserves a bay
    ])
});

static NUMERIC_SLOT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*slots?").expect("valid slot pattern"));
static NUMERIC_BLOCK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*blocks?").expect("valid block pattern"));
static SLOT_INLINE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"slot([0-9]+)").expect("valid inline slot pattern"));
static BLOCK_INLINE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"block([a-h]+)").expect("valid inline block pattern"));

/// Count of distinct slot digits named right after the word "slot".
fn inline_slot_usage(text: &str) -> f64 {
    let collapsed: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    SLOT_INLINE_PATTERN
        .captures_iter(&collapsed)
        .map(|cap| {
            let digits = &cap[1];
            let distinct: std::collections::HashSet<char> = digits.chars().collect();
            distinct.len().max(1) as f64
        })
        .fold(0.0, f64::max)
}

/// Count of distinct block letters A-H named right after the word "block".
fn inline_block_usage(text: &str) -> f64 {
    let collapsed: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    BLOCK_INLINE_PATTERN
        .captures_iter(&collapsed)
        .map(|cap| {
            let distinct: std::collections::HashSet<char> = cap[1]
                .chars()
                .filter(|c| ('a'..='h').contains(c))
                .collect();
            distinct.len().max(1) as f64
        })
        .fold(0.0, f64::max)
}

/// Largest plausible "N slots" / "N blocks" quantity in the text.
fn numeric_keyword_usage(pattern: &Regex, text: &str) -> f64 {
    pattern
        .captures_iter(text)
        .filter_map(|cap| cap[1].parse::<f64>().ok())
        .filter(|q| *q > 0.0 && *q <= 32.0)
        .fold(0.0, f64::max)
}

/// Derive `(internal_blocks, door_slots)` for a module.
///
/// Override table first, then the four textual patterns, then the mount
/// kind decides which side is active. An active side never reports zero.
pub fn derive_space(model_number: &str, physical_size: &str, mount: MountKind) -> (f64, f64) {
    if let Some(&pair) = SPACE_OVERRIDES.get(model_number) {
        return pair;
    }

    let text = physical_size.trim();
    if text.is_empty() && mount == MountKind::None {
        return (0.0, 0.0);
    }

    let numeric_slots = numeric_keyword_usage(&NUMERIC_SLOT_PATTERN, text);
    let numeric_blocks = numeric_keyword_usage(&NUMERIC_BLOCK_PATTERN, text);
    let inline_slots = inline_slot_usage(text);
    let inline_blocks = inline_block_usage(text);

    let base_internal = numeric_blocks
        .max(inline_blocks)
        .max(numeric_slots)
        .max(inline_slots);
    // Block hints only count toward the door when no slot hint of the same
    // style is present.
    let base_door = numeric_slots
        .max(inline_slots)
        .max(if numeric_slots == 0.0 { numeric_blocks } else { 0.0 })
        .max(if inline_slots == 0.0 { inline_blocks } else { 0.0 });

    let mut internal = 0.0;
    let mut door = 0.0;

    if matches!(mount, MountKind::Internal | MountKind::Both) {
        internal = base_internal;
        if internal <= 0.0 {
            internal = 1.0;
        }
    }
    if matches!(mount, MountKind::Door | MountKind::Both) {
        door = base_door;
        if door <= 0.0 {
            door = 1.0;
        }
    }

    if mount == MountKind::Both {
        internal = internal.max(1.0);
        door = door.max(1.0);
    }

    (internal, door)
}
