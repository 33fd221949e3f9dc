// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Sorters: which comparator is active and which way it points.
//!
//! There is one `SortMethod` per `SortField`, and exactly one of them is
//! current. Picking a different sorter resets the one being left and starts
//! the new one in its natural direction; picking the current one again flips
//! it. Text fields start ascending. Score starts descending, best match first.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::scoring::compare_records;
use crate::types::ScoredRecord;

/// The fixed set of sorters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Score,
    Cultivar,
    Originator,
    Group,
    Country,
    Date,
}

impl SortField {
    pub const ALL: [SortField; 6] = [
        SortField::Score,
        SortField::Cultivar,
        SortField::Originator,
        SortField::Group,
        SortField::Country,
        SortField::Date,
    ];

    /// Sorter used when nothing else has been chosen.
    pub const DEFAULT: SortField = SortField::Cultivar;

    pub fn name(self) -> &'static str {
        match self {
            SortField::Score => "score",
            SortField::Cultivar => "cultivar",
            SortField::Originator => "originator",
            SortField::Group => "group",
            SortField::Country => "country",
            SortField::Date => "date",
        }
    }

    /// Direction the sorter starts in.
    pub fn default_ascending(self) -> bool {
        self != SortField::Score
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| Error::UnknownSorter(s.to_string()))
    }
}

/// Sort direction as persisted: `"ASC"` or `"DESC"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "ASC")]
    Ascending,
    #[serde(rename = "DESC")]
    Descending,
}

impl Direction {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            Direction::Ascending
        } else {
            Direction::Descending
        }
    }

    pub fn is_ascending(self) -> bool {
        self == Direction::Ascending
    }
}

/// A comparator with a direction and a selection flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortMethod {
    pub field: SortField,
    pub ascending: bool,
    pub selected: bool,
}

impl SortMethod {
    pub fn new(field: SortField) -> Self {
        Self {
            field,
            ascending: field.default_ascending(),
            selected: false,
        }
    }

    pub fn select(&mut self) {
        self.selected = true;
    }

    pub fn deselect(&mut self) {
        self.selected = false;
    }

    pub fn toggle(&mut self) {
        self.ascending = !self.ascending;
    }

    /// Back to the field's natural direction.
    pub fn reset(&mut self) {
        self.ascending = self.field.default_ascending();
    }

    pub fn direction(&self) -> Direction {
        Direction::from_ascending(self.ascending)
    }

    /// Stable sort in this method's direction.
    pub fn sort(&self, results: &mut [ScoredRecord], normalized: bool) {
        let field = self.field;
        if self.ascending {
            results.sort_by(|x, y| compare_records(field, normalized, x, y));
        } else {
            results.sort_by(|x, y| compare_records(field, normalized, y, x));
        }
    }
}

/// All sorters plus the one that is current.
#[derive(Debug, Clone)]
pub struct SorterTable {
    methods: [SortMethod; 6],
    current: SortField,
    normalized: bool,
}

impl SorterTable {
    /// `normalized` picks token comparison over raw string comparison.
    /// Starts on the default sorter, selected.
    pub fn new(normalized: bool) -> Self {
        let mut table = Self {
            methods: SortField::ALL.map(SortMethod::new),
            current: SortField::DEFAULT,
            normalized,
        };
        table.method_mut(SortField::DEFAULT).select();
        table
    }

    pub fn current(&self) -> SortField {
        self.current
    }

    pub fn method(&self, field: SortField) -> &SortMethod {
        &self.methods[field.index()]
    }

    pub fn method_mut(&mut self, field: SortField) -> &mut SortMethod {
        &mut self.methods[field.index()]
    }

    pub fn direction(&self) -> Direction {
        self.method(self.current).direction()
    }

    /// Make `field` current.
    ///
    /// With `adjust_direction` (a user click): a different sorter resets the
    /// old one and starts fresh, the same sorter toggles. Without it the
    /// directions are left alone.
    pub fn assign(&mut self, field: SortField, adjust_direction: bool) {
        if self.current != field {
            let old = self.current;
            if adjust_direction {
                self.method_mut(old).reset();
                self.method_mut(field).reset();
            }
            self.method_mut(old).deselect();
            self.current = field;
            self.method_mut(field).select();
        } else if adjust_direction {
            let method = self.method_mut(field);
            method.select();
            method.toggle();
        } else {
            self.method_mut(field).select();
        }
    }

    /// Put back a persisted sorter and direction.
    pub fn restore(&mut self, field: SortField, direction: Direction) {
        self.assign(field, false);
        self.method_mut(field).ascending = direction.is_ascending();
    }

    /// Sort with the current sorter.
    pub fn sort(&self, results: &mut [ScoredRecord]) {
        self.method(self.current).sort(results, self.normalized);
    }
}
