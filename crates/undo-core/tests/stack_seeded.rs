//! Seeded randomized runs of stack operations checked against a simple
//! vector-arithmetic oracle.
//!
//! Commands append a unique character each, so buffer content uniquely
//! identifies a point in history: the oracle can track expected content
//! and saved content directly and never needs to mirror cursor logic.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use undo_core::{Command, Stack};

struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Lcg(seed.max(1))
    }

    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }
}

struct AppendChar {
    buf: Rc<RefCell<String>>,
    ch: char,
}

impl Command for AppendChar {
    fn execute(&mut self) {
        self.buf.borrow_mut().push(self.ch);
    }

    fn undo(&mut self) {
        self.buf.borrow_mut().pop();
    }

    fn redo(&mut self) {
        self.buf.borrow_mut().push(self.ch);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Concatenation of the oracle history up to and including the cursor.
fn oracle_content(history: &[char], position: Option<usize>) -> String {
    match position {
        None => String::new(),
        Some(p) => history[..=p].iter().collect(),
    }
}

#[test]
fn seeded_operation_sequences_match_oracle() {
    let seeds = [
        0x5eed_c0de_u64,
        0x0000_0000_0000_0001_u64,
        0x0000_0000_00c0_ffee_u64,
        0x0123_4567_89ab_cdef_u64,
        0xdead_beef_dead_beef_u64,
    ];

    for seed in seeds {
        let mut rng = Lcg::new(seed);

        let buf = Rc::new(RefCell::new(String::new()));
        let mut stack = Stack::new();

        // Oracle state. `base` is whatever the buffer held at the last
        // reset (reset clears history, it does not revert state);
        // `saved_content` is the post-base buffer content at the save
        // point. Unique characters per command guarantee a truncated-away
        // save point can never be reproduced.
        let mut base = String::new();
        let mut history: Vec<char> = Vec::new();
        let mut position: Option<usize> = None;
        let mut saved_content = String::new();
        let mut next_char = 0u32;

        for step in 0..400 {
            match rng.below(100) {
                0..=39 => {
                    let ch = char::from_u32(0x4E00 + next_char).unwrap();
                    next_char += 1;
                    stack.execute(Box::new(AppendChar {
                        buf: buf.clone(),
                        ch,
                    }));
                    let keep = position.map_or(0, |p| p + 1);
                    history.truncate(keep);
                    history.push(ch);
                    position = Some(history.len() - 1);
                }
                40..=64 => {
                    stack.undo();
                    if let Some(p) = position {
                        position = p.checked_sub(1);
                    }
                }
                65..=89 => {
                    stack.redo();
                    let next = position.map_or(0, |p| p + 1);
                    if next < history.len() {
                        position = Some(next);
                    }
                }
                90..=95 => {
                    stack.mark_saved();
                    saved_content = oracle_content(&history, position);
                }
                _ => {
                    stack.reset();
                    base.push_str(&oracle_content(&history, position));
                    history.clear();
                    position = None;
                    saved_content.clear();
                }
            }

            let expected = oracle_content(&history, position);
            assert_eq!(
                *buf.borrow(),
                format!("{base}{expected}"),
                "content diverged (seed={seed}, step={step})"
            );
            assert_eq!(
                stack.position(),
                position,
                "cursor diverged (seed={seed}, step={step})"
            );
            assert_eq!(
                stack.can_undo(),
                position.is_some(),
                "can_undo diverged (seed={seed}, step={step})"
            );
            assert_eq!(
                stack.can_redo(),
                position.map_or(0, |p| p + 1) < history.len(),
                "can_redo diverged (seed={seed}, step={step})"
            );
            assert_eq!(
                stack.is_dirty(),
                saved_content != expected,
                "dirtiness diverged (seed={seed}, step={step})"
            );
        }
    }
}
