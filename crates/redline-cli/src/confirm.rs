//! Confirmation gate in front of every destructive write.
//!
//! A proposal starts out `Proposed`. Typing the exact token moves it to
//! `Confirmed`; anything else, including an empty line or end of input,
//! moves it to `Cancelled`. Only a confirmed gate lets the caller write.

use std::io::{self, BufRead, Write};

use redline_docx::DocxError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateState {
    Proposed,
    Confirmed,
    Cancelled,
}

#[derive(Debug)]
pub struct ConfirmationGate {
    token: &'static str,
    state: GateState,
}

impl ConfirmationGate {
    /// Open a gate for a non-empty change set. `skip` (from `--yes`)
    /// confirms it immediately.
    #[must_use]
    pub const fn propose(token: &'static str, skip: bool) -> Self {
        Self {
            token,
            state: if skip {
                GateState::Confirmed
            } else {
                GateState::Proposed
            },
        }
    }

    /// Show `summary`, then the token prompt, and read one line of input. A gate that already left
    /// `Proposed` is returned unchanged without prompting.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from writing the prompt or reading the answer.
    pub fn ask<R: BufRead, W: Write>(
        &mut self,
        summary: &str,
        input: &mut R,
        out: &mut W,
    ) -> io::Result<GateState> {
        if self.state != GateState::Proposed {
            return Ok(self.state);
        }
        writeln!(out, "{summary}")?;
        writeln!(out)?;
        write!(out, "Type '{}' to confirm: ", self.token)?;
        out.flush()?;

        let mut answer = String::new();
        input.read_line(&mut answer)?;
        let answer = answer.trim_end_matches(['\r', '\n']);

        self.state = if answer == self.token {
            GateState::Confirmed
        } else {
            GateState::Cancelled
        };
        tracing::debug!(token = self.token, state = ?self.state, "confirmation answered");
        Ok(self.state)
    }

    /// # Errors
    ///
    /// [`DocxError::UserCancelled`] unless the gate is confirmed.
    pub fn require_confirmed(&self) -> Result<(), DocxError> {
        if self.state == GateState::Confirmed {
            Ok(())
        } else {
            Err(DocxError::UserCancelled)
        }
    }
}
