//! Permissive CSV tokenizer

use std::iter::Peekable;
use std::str::Chars;

use tracing::{debug, warn};

use crate::config::ParseOptions;
use crate::model::{Cell, Row, Table};

const QUOTE: char = '"';

/// Tokenizer position relative to quoted spans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Unquoted,
    Quoted,
}

/// Single-pass state machine that accumulates cells and rows.
///
/// It never rejects input: stray quotes toggle the quoted span, and an
/// unterminated span simply runs to end of input.
pub(crate) struct Tokenizer<'a> {
    options: &'a ParseOptions,
    state: State,
    cell: String,
    row: Vec<Cell>,
    rows: Vec<Row>,
    dropped: usize,
}

impl<'a> Tokenizer<'a> {
    pub(crate) fn new(options: &'a ParseOptions) -> Self {
        Self {
            options,
            state: State::Unquoted,
            cell: String::new(),
            row: Vec::new(),
            rows: Vec::new(),
            dropped: 0,
        }
    }

    pub(crate) fn tokenize(mut self, text: &str) -> Table {
        let mut chars = text.chars().peekable();

        while let Some(ch) = chars.next() {
            match self.state {
                State::Quoted => self.quoted(ch, &mut chars),
                State::Unquoted => self.unquoted(ch, &mut chars),
            }
        }

        if self.state == State::Quoted {
            warn!("input ended inside a quoted field; keeping its contents");
        }

        // Flush the last line through the same blank-row rule as every other line
        self.end_row();

        debug!(
            rows = self.rows.len(),
            blank_lines = self.dropped,
            "tokenized input"
        );
        Table::from_rows(self.rows)
    }

    fn quoted(&mut self, ch: char, chars: &mut Peekable<Chars<'_>>) {
        if ch != QUOTE {
            self.cell.push(ch);
        } else if chars.next_if_eq(&QUOTE).is_some() {
            self.cell.push(QUOTE);
        } else {
            self.state = State::Unquoted;
        }
    }

    fn unquoted(&mut self, ch: char, chars: &mut Peekable<Chars<'_>>) {
        match ch {
            QUOTE => self.state = State::Quoted,
            '\r' => {
                chars.next_if_eq(&'\n');
                self.end_row();
            }
            '\n' => self.end_row(),
            c if c == self.options.delimiter => self.end_cell(),
            c => self.cell.push(c),
        }
    }

    fn end_cell(&mut self) {
        let raw = std::mem::take(&mut self.cell);
        let cell = if self.options.trim {
            let trimmed = raw.trim();
            if trimmed.len() == raw.len() {
                raw
            } else {
                trimmed.to_string()
            }
        } else {
            raw
        };
        self.row.push(cell);
    }

    fn end_row(&mut self) {
        self.end_cell();
        let row = Row::new(std::mem::take(&mut self.row));
        if row.is_blank() {
            self.dropped += 1;
        } else {
            self.rows.push(row);
        }
    }
}
