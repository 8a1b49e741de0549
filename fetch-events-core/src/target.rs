//! Fetch targets and how extra calendar specifiers resolve to them.

use std::fmt;

use crate::error::{FetchError, FetchResult};

/// One account/calendar to query over a time range.
///
/// `from` and `to` are passed to the tool untouched, so either a date
/// (`2026-02-20`) or a full RFC3339 timestamp works.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTarget {
    pub account: String,
    pub from: String,
    pub to: String,
    /// `None` means the primary calendar of the account.
    pub calendar_id: Option<String>,
}

impl FetchTarget {
    pub fn primary(account: &str, from: &str, to: &str) -> Self {
        FetchTarget {
            account: account.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            calendar_id: None,
        }
    }

    pub fn calendar(account: &str, from: &str, to: &str, calendar_id: &str) -> Self {
        FetchTarget {
            calendar_id: (!calendar_id.is_empty()).then(|| calendar_id.to_string()),
            ..Self::primary(account, from, to)
        }
    }
}

/// Label printed in the `===<label>===` marker above each output section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionLabel {
    Personal,
    Work,
    Extra(String),
}

impl fmt::Display for SectionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionLabel::Personal => write!(f, "PERSONAL"),
            SectionLabel::Work => write!(f, "WORK"),
            SectionLabel::Extra(calendar_id) => write!(f, "EXTRA:{calendar_id}"),
        }
    }
}

impl SectionLabel {
    pub fn marker(&self) -> String {
        format!("==={self}===")
    }
}

/// Resolves the `personal` and `work` aliases to the accounts given on the
/// command line. Anything else is taken as a literal account identifier.
#[derive(Debug, Clone)]
pub struct AccountAliases {
    personal: String,
    work: String,
}

impl AccountAliases {
    pub fn new(personal: &str, work: &str) -> Self {
        AccountAliases {
            personal: personal.to_string(),
            work: work.to_string(),
        }
    }

    pub fn resolve<'a>(&'a self, alias_or_account: &'a str) -> &'a str {
        match alias_or_account {
            "personal" => &self.personal,
            "work" => &self.work,
            other => other,
        }
    }
}

/// An `alias_or_account:calendarId` specifier, split on its first colon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraCalendar {
    pub alias_or_account: String,
    pub calendar_id: String,
}

impl ExtraCalendar {
    pub fn parse(spec: &str) -> FetchResult<Self> {
        let (alias_or_account, calendar_id) = spec
            .split_once(':')
            .ok_or_else(|| FetchError::InvalidExtraCalendar(spec.to_string()))?;

        Ok(ExtraCalendar {
            alias_or_account: alias_or_account.to_string(),
            calendar_id: calendar_id.to_string(),
        })
    }

    pub fn to_target(&self, aliases: &AccountAliases, from: &str, to: &str) -> FetchTarget {
        let account = aliases.resolve(&self.alias_or_account);
        FetchTarget::calendar(account, from, to, &self.calendar_id)
    }

    pub fn label(&self) -> SectionLabel {
        SectionLabel::Extra(self.calendar_id.clone())
    }
}
