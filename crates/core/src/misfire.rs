// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Misfire instruction codes and their symbolic names.
//!
//! Names are scoped to the trigger kind: `FIRE_NOW` is a simple-trigger
//! instruction and does not resolve for a cron trigger.

use crate::trigger::TriggerKind;

/// Optional prefix accepted in front of every symbolic name
pub const PREFIX: &str = "MISFIRE_INSTRUCTION_";

pub const SMART_POLICY: i32 = 0;
pub const IGNORE_MISFIRE_POLICY: i32 = -1;

pub mod simple {
    pub const FIRE_NOW: i32 = 1;
    pub const RESCHEDULE_NOW_WITH_EXISTING_REPEAT_COUNT: i32 = 2;
    pub const RESCHEDULE_NOW_WITH_REMAINING_REPEAT_COUNT: i32 = 3;
    pub const RESCHEDULE_NEXT_WITH_REMAINING_COUNT: i32 = 4;
    pub const RESCHEDULE_NEXT_WITH_EXISTING_COUNT: i32 = 5;
}

pub mod cron {
    pub const FIRE_ONCE_NOW: i32 = 1;
    pub const DO_NOTHING: i32 = 2;
}

const COMMON: &[(&str, i32)] = &[
    ("SMART_POLICY", SMART_POLICY),
    ("IGNORE_MISFIRE_POLICY", IGNORE_MISFIRE_POLICY),
];

const SIMPLE: &[(&str, i32)] = &[
    ("FIRE_NOW", simple::FIRE_NOW),
    (
        "RESCHEDULE_NOW_WITH_EXISTING_REPEAT_COUNT",
        simple::RESCHEDULE_NOW_WITH_EXISTING_REPEAT_COUNT,
    ),
    (
        "RESCHEDULE_NOW_WITH_REMAINING_REPEAT_COUNT",
        simple::RESCHEDULE_NOW_WITH_REMAINING_REPEAT_COUNT,
    ),
    (
        "RESCHEDULE_NEXT_WITH_REMAINING_COUNT",
        simple::RESCHEDULE_NEXT_WITH_REMAINING_COUNT,
    ),
    (
        "RESCHEDULE_NEXT_WITH_EXISTING_COUNT",
        simple::RESCHEDULE_NEXT_WITH_EXISTING_COUNT,
    ),
];

const CRON: &[(&str, i32)] = &[
    ("FIRE_ONCE_NOW", cron::FIRE_ONCE_NOW),
    ("DO_NOTHING", cron::DO_NOTHING),
];

/// Resolve a symbolic misfire name for the given trigger kind
pub fn resolve(kind: TriggerKind, name: &str) -> Option<i32> {
    let name = name.trim();
    let name = name.strip_prefix(PREFIX).unwrap_or(name);
    let scoped = match kind {
        TriggerKind::Simple => SIMPLE,
        TriggerKind::Cron => CRON,
    };
    COMMON
        .iter()
        .chain(scoped)
        .find(|(n, _)| *n == name)
        .map(|(_, code)| *code)
}

/// Symbolic names valid for a trigger kind, without the prefix
pub fn names(kind: TriggerKind) -> impl Iterator<Item = &'static str> {
    let scoped = match kind {
        TriggerKind::Simple => SIMPLE,
        TriggerKind::Cron => CRON,
    };
    COMMON.iter().chain(scoped).map(|(n, _)| *n)
}

#[cfg(test)]
#[path = "misfire_tests.rs"]
mod tests;
