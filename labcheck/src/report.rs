// Labcheck: Validating Network-Wide Device Configurations
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Module for reporting the progress of the checks

/// Width of a rendered rule in characters
const RULE_WIDTH: usize = 80;

/// # Check Reporter
///
/// Validators announce every check through this trait before performing it. Tests pass in a
/// recording reporter instead of printing to the console.
pub trait Reporter {
    /// Announce a check with the given title
    fn rule(&mut self, title: &str);
}

/// Reporter printing a centered rule to the standard output for every check
#[derive(Debug, Default, Clone)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for ConsoleReporter {
    fn rule(&mut self, title: &str) {
        println!("{}", rule_line(title, RULE_WIDTH));
    }
}

/// Center the title in a rule of the given width
fn rule_line(title: &str, width: usize) -> String {
    let fill = width.saturating_sub(title.chars().count() + 2);
    let left = fill / 2;
    format!(
        "{} {} {}",
        "─".repeat(left),
        title,
        "─".repeat(fill - left)
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rule_is_centered() {
        let line = rule_line("Checking SNMP configuration", 80);
        assert_eq!(line.chars().count(), 80);
        assert!(line.starts_with("─────"));
        assert!(line.ends_with("─────"));
        assert!(line.contains(" Checking SNMP configuration "));
    }

    #[test]
    fn long_titles_are_not_truncated() {
        let title = "a".repeat(100);
        let line = rule_line(&title, 80);
        assert!(line.contains(&title));
    }
}
