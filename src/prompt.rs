// ABOUTME: Typed console input with bounds, menus, times, confirmations and dates
// ABOUTME: Invalid input is re-prompted locally; only end of input propagates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Prompt boundary
//!
//! [`Prompter`] wraps any `BufRead`/`Write` pair so the interactive workflow
//! can be driven by stdin/stdout or by a scripted buffer in tests.

use crate::constants::limits::{HOURS_PER_DAY, MINUTES_PER_HOUR};
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use std::fmt::{self, Display};
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Numeric types the prompt can parse, with the name shown on a type error
pub trait Scalar: FromStr + PartialOrd + Display + Copy {
    /// Human-readable type name
    const KIND: &'static str;

    /// Whether a parsed value is an acceptable reading
    fn is_valid(self) -> bool {
        true
    }
}

impl Scalar for i32 {
    const KIND: &'static str = "int";
}

impl Scalar for u32 {
    const KIND: &'static str = "int";
}

impl Scalar for usize {
    const KIND: &'static str = "int";
}

impl Scalar for f64 {
    const KIND: &'static str = "float";

    // `parse` accepts NaN and infinities, which no bound can reject
    fn is_valid(self) -> bool {
        self.is_finite()
    }
}

/// Constraints applied to a parsed value
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds<T> {
    /// Inclusive lower bound
    pub min: Option<T>,
    /// Inclusive upper bound
    pub max: Option<T>,
    /// Permitted values
    pub allowed: Option<Vec<T>>,
}

impl<T> Default for Bounds<T> {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            allowed: None,
        }
    }
}

impl<T> Bounds<T> {
    /// Any value of the type
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Values greater than or equal to `min`
    #[must_use]
    pub fn at_least(min: T) -> Self {
        Self {
            min: Some(min),
            ..Self::default()
        }
    }

    /// Values within `min..=max`
    #[must_use]
    pub fn between(min: T, max: T) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            allowed: None,
        }
    }

    /// Values from a fixed set
    #[must_use]
    pub fn one_of(allowed: Vec<T>) -> Self {
        Self {
            allowed: Some(allowed),
            ..Self::default()
        }
    }
}

/// Position in the calendar-date retry policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateAttempt {
    /// First entry of the date
    FirstAttempt,
    /// Second and last entry after an invalid date
    Retry,
    /// Both attempts failed
    Fatal,
}

impl DateAttempt {
    /// State after an invalid date
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::FirstAttempt => Self::Retry,
            Self::Retry | Self::Fatal => Self::Fatal,
        }
    }
}

/// Prompt texts for one calendar date
#[derive(Debug, Clone, Copy)]
pub struct DateLabels {
    /// Year prompt on the first attempt
    pub year: &'static str,
    /// Month prompt on the first attempt
    pub month: &'static str,
    /// Day prompt on the first attempt
    pub day: &'static str,
    /// Message shown before the retry
    pub invalid: &'static str,
}

/// Labels for the observation date
pub const ENTRY_DATE: DateLabels = DateLabels {
    year: "Enter the year: ",
    month: "Enter the (numeric) month: ",
    day: "Enter the day: ",
    invalid: "Invalid date. Try again.",
};

/// Labels for the subject's date of birth
pub const DATE_OF_BIRTH: DateLabels = DateLabels {
    year: "Enter the year of birth: ",
    month: "Enter the (numeric) month of birth: ",
    day: "Enter the day of birth: ",
    invalid: "Invalid date of birth. Try again.",
};

const RETRY_LABELS: (&str, &str, &str) = ("Enter the year: ", "Enter a month: ", "Enter a day: ");

const YES: [&str; 4] = ["yes", "y", "ye", ""];
const NO: [&str; 2] = ["no", "n"];

/// Console prompter over an input and an output stream
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Wrap an input and an output stream
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the output stream
    pub fn into_output(self) -> W {
        self.output
    }

    /// Print one line
    ///
    /// # Errors
    ///
    /// Returns a storage error if the output cannot be written
    pub fn say(&mut self, line: impl Display) -> AppResult<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Print an empty line
    ///
    /// # Errors
    ///
    /// Returns a storage error if the output cannot be written
    pub fn blank(&mut self) -> AppResult<()> {
        writeln!(self.output)?;
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> AppResult<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(AppError::input_closed());
        }
        Ok(line.trim().to_owned())
    }

    /// Read a value of type `T` satisfying `bounds`, re-prompting until it does
    ///
    /// # Errors
    ///
    /// Returns `InputClosed` at end of input and `InvalidInput` when the
    /// bounds are contradictory
    pub fn ask<T: Scalar>(&mut self, prompt: &str, bounds: &Bounds<T>) -> AppResult<T> {
        if let (Some(min), Some(max)) = (bounds.min, bounds.max) {
            if max < min {
                return Err(AppError::invalid_input(
                    "min must be less than or equal to max",
                ));
            }
        }

        loop {
            let raw = self.read_line(prompt)?;
            let Some(value) = raw.parse::<T>().ok().filter(|value| value.is_valid()) else {
                self.say(format_args!("Input type must be {}.", T::KIND))?;
                continue;
            };

            if let Some(max) = bounds.max.filter(|max| value > *max) {
                self.say(format_args!("Input must be less than or equal to {max}."))?;
            } else if let Some(min) = bounds.min.filter(|min| value < *min) {
                self.say(format_args!(
                    "Input must be greater than or equal to {min}."
                ))?;
            } else if let Some(allowed) = bounds
                .allowed
                .as_ref()
                .filter(|allowed| !allowed.contains(&value))
            {
                self.say(format_args!("Input must be {}.", OneOf(allowed)))?;
            } else {
                return Ok(value);
            }
        }
    }

    /// Read a non-empty line of text, trimmed
    ///
    /// # Errors
    ///
    /// Returns `InputClosed` at end of input
    pub fn ask_text(&mut self, prompt: &str) -> AppResult<String> {
        loop {
            let text = self.read_line(prompt)?;
            if !text.is_empty() {
                return Ok(text);
            }
            self.say("Input must not be empty.")?;
        }
    }

    /// Print a numbered menu and return the chosen item
    ///
    /// # Errors
    ///
    /// Returns `InputClosed` at end of input
    pub fn select<T: Copy + Display>(&mut self, choices: &[T]) -> AppResult<T> {
        for (index, choice) in choices.iter().enumerate() {
            self.say(format_args!("[{index}] {choice}"))?;
        }
        loop {
            let index = self.ask("Enter selection index: ", &Bounds::at_least(0usize))?;
            if let Some(choice) = choices.get(index) {
                return Ok(*choice);
            }
            self.say("Please make a valid selection.")?;
        }
    }

    /// Read an `HH:MM` 24-hour time as fractional hours
    ///
    /// # Errors
    ///
    /// Returns `InputClosed` at end of input
    pub fn ask_time(&mut self) -> AppResult<f64> {
        loop {
            let raw = self.read_line("Enter time measured (HH:MM, 24H): ")?;
            if let Some(hours) = parse_clock_time(&raw) {
                return Ok(hours);
            }
            self.say("Invalid format.")?;
        }
    }

    /// Ask a yes/no question; an empty answer means yes
    ///
    /// # Errors
    ///
    /// Returns `InputClosed` at end of input
    pub fn confirm(&mut self, prompt: &str) -> AppResult<bool> {
        loop {
            let answer = self.read_line(prompt)?.to_lowercase();
            if YES.contains(&answer.as_str()) {
                return Ok(true);
            }
            if NO.contains(&answer.as_str()) {
                return Ok(false);
            }
            self.say("Please respond with 'yes' or 'no'.")?;
        }
    }

    /// Read a calendar date, allowing one retry after an invalid date
    ///
    /// # Errors
    ///
    /// Returns `InvalidDate` when the retry is also not a calendar date, and
    /// `InputClosed` at end of input
    pub fn ask_date(&mut self, labels: &DateLabels) -> AppResult<NaiveDate> {
        let mut attempt = DateAttempt::FirstAttempt;
        loop {
            let (year_prompt, month_prompt, day_prompt) = match attempt {
                DateAttempt::FirstAttempt => (labels.year, labels.month, labels.day),
                DateAttempt::Retry | DateAttempt::Fatal => RETRY_LABELS,
            };

            let year: i32 = self.ask(year_prompt, &Bounds::any())?;
            let month: u32 = self.ask(month_prompt, &Bounds::any())?;
            let day: u32 = self.ask(day_prompt, &Bounds::any())?;

            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                return Ok(date);
            }

            attempt = attempt.next();
            match attempt {
                DateAttempt::Retry => self.say(labels.invalid)?,
                DateAttempt::FirstAttempt | DateAttempt::Fatal => {
                    return Err(AppError::invalid_date(format!(
                        "{year}-{month}-{day} is not a calendar date"
                    )));
                }
            }
        }
    }
}

/// Parse `HH:MM` into fractional hours
#[must_use]
pub fn parse_clock_time(raw: &str) -> Option<f64> {
    let (hours, minutes) = raw.trim().split_once(':')?;
    let hours: u32 = hours.trim().parse().ok()?;
    let minutes: u32 = minutes.trim().parse().ok()?;
    (hours < HOURS_PER_DAY && minutes < MINUTES_PER_HOUR)
        .then(|| f64::from(hours) + f64::from(minutes) / f64::from(MINUTES_PER_HOUR))
}

/// Renders `[a, b, c]` as `a, b or c`
struct OneOf<'a, T>(&'a [T]);

impl<T: Display> Display for OneOf<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((last, rest)) = self.0.split_last() else {
            return Ok(());
        };
        for (position, item) in rest.iter().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        if rest.is_empty() {
            write!(f, "{last}")
        } else {
            write!(f, " or {last}")
        }
    }
}
