//! Staged reveal of a computed draw.
//!
//! The result is already final when a reveal starts. Each step looks up the
//! next queued team's group in the final assignment and adds it to a
//! progress snapshot. Pacing belongs to the caller; a cancellation flag is
//! checked before every step.

use super::draw::DrawResult;
use crate::models::{Assignment, Team};
use std::sync::atomic::{AtomicBool, Ordering};

/// One revealed team.
#[derive(Debug, Clone)]
pub struct RevealStep<'a> {
    /// 0-based position in the reveal order
    pub index: usize,
    pub team: &'a Team,
    pub group: usize,
    /// Base state plus every team revealed so far
    pub progress: Assignment,
}

pub struct Reveal<'a> {
    result: &'a DrawResult,
    next: usize,
    progress: Assignment,
    cancel: Option<&'a AtomicBool>,
}

impl<'a> Reveal<'a> {
    pub fn new(result: &'a DrawResult) -> Self {
        Self { result, next: 0, progress: result.base.clone(), cancel: None }
    }

    /// Stops the reveal as soon as `flag` is set.
    pub fn with_cancel(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    pub fn remaining(&self) -> usize {
        self.result.reveal_order.len().saturating_sub(self.next)
    }
}

impl<'a> Iterator for Reveal<'a> {
    type Item = RevealStep<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_cancelled() {
            return None;
        }
        let result: &'a DrawResult = self.result;
        let team = result.reveal_order.get(self.next)?;
        let group = result.assignment.group_of(&team.code)?;

        self.progress.push(group, team.clone());
        let step = RevealStep { index: self.next, team, group, progress: self.progress.clone() };
        self.next += 1;
        Some(step)
    }
}

impl DrawResult {
    pub fn reveal(&self) -> Reveal<'_> {
        Reveal::new(self)
    }
}
