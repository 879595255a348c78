// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Element layout of a scheduling document.
//!
//! Each element lists the keys it may carry and what kind of value each key
//! holds. The validator walks a parsed tree against [`DOCUMENT`].

use toml::value::Table;

/// Kind of value a key holds
#[derive(Clone, Copy)]
pub(crate) enum Kind {
    /// String
    Text,
    /// Boolean, or the strings "true"/"false"
    Bool,
    /// Integer, or a string holding one
    Integer,
    /// Like `Integer`, but also accepts "indefinite"
    RepeatCount,
    /// TOML datetime, or an RFC 3339 string
    Timestamp,
    /// A string or a list of strings
    TextList,
    /// A single table
    One(&'static Element),
    /// A table, or an array of tables
    Many(&'static Element),
}

pub(crate) struct Field {
    pub name: &'static str,
    pub kind: Kind,
    pub required: bool,
}

/// Extra checks that span several keys of one element
pub(crate) type ElementCheck = fn(&Table, &str, &mut Vec<crate::Violation>);

pub(crate) struct Element {
    pub fields: &'static [Field],
    pub check: Option<ElementCheck>,
}

impl Element {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

const fn required(name: &'static str, kind: Kind) -> Field {
    Field {
        name,
        kind,
        required: true,
    }
}

const fn optional(name: &'static str, kind: Kind) -> Field {
    Field {
        name,
        kind,
        required: false,
    }
}

const ENTRY: Element = Element {
    fields: &[required("key", Kind::Text), optional("value", Kind::Text)],
    check: None,
};

const DATA_MAP: Element = Element {
    fields: &[optional("entry", Kind::Many(&ENTRY))],
    check: None,
};

const KEY_REF: Element = Element {
    fields: &[required("name", Kind::Text), optional("group", Kind::Text)],
    check: None,
};

const DIRECTIVES: Element = Element {
    fields: &[
        optional("overwrite-existing-data", Kind::Bool),
        optional("ignore-duplicates", Kind::Bool),
    ],
    check: None,
};

const COMMANDS: Element = Element {
    fields: &[
        optional("delete-jobs-in-group", Kind::TextList),
        optional("delete-triggers-in-group", Kind::TextList),
        optional("delete-job", Kind::Many(&KEY_REF)),
        optional("delete-trigger", Kind::Many(&KEY_REF)),
    ],
    check: None,
};

const JOB: Element = Element {
    fields: &[
        required("name", Kind::Text),
        optional("group", Kind::Text),
        optional("description", Kind::Text),
        required("job-type", Kind::Text),
        optional("volatility", Kind::Bool),
        optional("durability", Kind::Bool),
        optional("recover", Kind::Bool),
        optional("job-data-map", Kind::One(&DATA_MAP)),
    ],
    check: None,
};

const SIMPLE: Element = Element {
    fields: &[
        optional("repeat-count", Kind::RepeatCount),
        optional("repeat-interval", Kind::Integer),
    ],
    check: None,
};

const CRON: Element = Element {
    fields: &[
        required("cron-expression", Kind::Text),
        optional("time-zone", Kind::Text),
    ],
    check: None,
};

const TRIGGER: Element = Element {
    fields: &[
        required("name", Kind::Text),
        optional("group", Kind::Text),
        optional("description", Kind::Text),
        required("job-name", Kind::Text),
        optional("job-group", Kind::Text),
        optional("volatility", Kind::Bool),
        optional("start-time", Kind::Timestamp),
        optional("start-time-seconds-in-future", Kind::Integer),
        optional("end-time", Kind::Timestamp),
        optional("calendar-name", Kind::Text),
        optional("misfire-instruction", Kind::Text),
        optional("job-data-map", Kind::One(&DATA_MAP)),
        optional("simple", Kind::One(&SIMPLE)),
        optional("cron", Kind::One(&CRON)),
    ],
    check: Some(crate::validator::check_trigger),
};

const SCHEDULE: Element = Element {
    fields: &[
        optional("job", Kind::Many(&JOB)),
        optional("trigger", Kind::Many(&TRIGGER)),
    ],
    check: None,
};

/// Root of a scheduling document
pub(crate) const DOCUMENT: Element = Element {
    fields: &[
        optional("processing-directives", Kind::Many(&DIRECTIVES)),
        optional("pre-processing-commands", Kind::Many(&COMMANDS)),
        optional("schedule", Kind::Many(&SCHEDULE)),
    ],
    check: None,
};
