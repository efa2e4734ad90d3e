// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Composition of `testFailed` messages.

use std::fmt::Write as _;

use crate::{Step, StepResult, Table};

/// Prefix of every composed failure message.
pub const FAILURE_PREFIX: &str = "Step failed: ";

/// Composes the failure message of the given [`StepResult`], describing the
/// [`Table`] and the free text of the `step` it comes from, if any.
#[must_use]
pub fn compose_message(result: &StepResult, step: Option<&Step>) -> String {
    let mut msg = format!("{FAILURE_PREFIX}{}", result.name);
    if let Some(table) = step.and_then(|s| s.table.as_ref()) {
        _ = write!(msg, "\nTable:\n{}", describe_table(table));
    }
    if let Some(text) = step.and_then(|s| s.text.as_deref()) {
        _ = write!(msg, "\nText:\n{}", describe_text(text));
    }
    msg
}

/// Renders the given [`Table`] as a grid, one `| a | b |` line per row with
/// cells padded to the width of their column.
#[must_use]
pub fn describe_table(table: &Table) -> String {
    let rows = table
        .rows
        .iter()
        .map(|row| row.iter().map(|c| escape_cell(c)).collect::<Vec<_>>())
        .collect::<Vec<_>>();

    let mut widths = Vec::<usize>::new();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(len),
                None => widths.push(len),
            }
        }
    }

    rows.iter().fold(String::new(), |mut out, row| {
        out.push('|');
        for (cell, width) in row.iter().zip(&widths) {
            let pad = width - cell.chars().count();
            _ = write!(out, " {cell}{} |", " ".repeat(pad));
        }
        out.push('\n');
        out
    })
}

/// Renders the given free `text` as a `"""`-delimited block.
#[must_use]
pub fn describe_text(text: &str) -> String {
    format!("\"\"\"\n{}\n\"\"\"\n", text.replace(r#"""""#, r#"\"\"\""#))
}

fn escape_cell(cell: &str) -> String {
    cell.replace('\\', "\\\\")
        .replace('|', "\\|")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use crate::Status;

    use super::*;

    fn result() -> StepResult {
        StepResult::new(&Step::new("When", "I ship it"), Status::Failed)
    }

    #[test]
    fn plain_step() {
        assert_eq!(
            compose_message(&result(), Some(&Step::new("When", "I ship it"))),
            "Step failed: I ship it",
        );
        assert_eq!(compose_message(&result(), None), "Step failed: I ship it");
    }

    #[test]
    fn table_is_padded_grid() {
        let table = Table::new([["id", "weight"], ["100", "1"]]);

        assert_eq!(
            describe_table(&table),
            "| id  | weight |\n\
             | 100 | 1      |\n",
        );
    }

    #[test]
    fn table_cells_escape_pipes() {
        let table = Table::new([["a|b"], ["c"]]);

        assert_eq!(describe_table(&table), "| a\\|b |\n| c    |\n");
    }

    #[test]
    fn table_cells_escape_newlines_and_backslashes() {
        let table = Table::new([["a\nb", "c\\d"], ["e", "f"]]);

        assert_eq!(
            describe_table(&table),
            "| a\\nb | c\\\\d |\n| e    | f    |\n",
        );
    }

    #[test]
    fn ragged_rows_do_not_panic() {
        let table = Table::new(vec![vec!["a"], vec!["bb", "c"]]);

        assert_eq!(describe_table(&table), "| a  |\n| bb | c |\n");
    }

    #[test]
    fn text_block_escapes_triple_quotes() {
        assert_eq!(
            describe_text("say \"\"\"hi\"\"\""),
            "\"\"\"\nsay \\\"\\\"\\\"hi\\\"\\\"\\\"\n\"\"\"\n",
        );
    }

    #[test]
    fn message_with_table_and_text() {
        let step = Step::new("Given", "the parcels:")
            .with_table(Table::new([["id"], ["1"]]))
            .with_text("FRAGILE");
        let result = StepResult::failed(&step, "boom");

        assert_eq!(
            compose_message(&result, Some(&step)),
            "Step failed: the parcels:\n\
             Table:\n| id |\n| 1  |\n\n\
             Text:\n\"\"\"\nFRAGILE\n\"\"\"\n",
        );
    }
}
