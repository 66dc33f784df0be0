//! Filtering and sorting of the todo list for display.

use crate::model::Todo;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Open,
    Done,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Sort {
    #[default]
    Newest,
    Oldest,
    OpenFirst,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown option: {0}")]
pub struct UnknownOption(pub String);

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Open, Filter::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Open => "open",
            Filter::Done => "done",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Open => "Open",
            Filter::Done => "Done",
        }
    }

    pub fn matches(&self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Open => !todo.ticked_off,
            Filter::Done => todo.ticked_off,
        }
    }
}

impl Sort {
    pub const ALL: [Sort; 3] = [Sort::Newest, Sort::Oldest, Sort::OpenFirst];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sort::Newest => "newest",
            Sort::Oldest => "oldest",
            Sort::OpenFirst => "openFirst",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sort::Newest => "Newest first",
            Sort::Oldest => "Oldest first",
            Sort::OpenFirst => "Open first",
        }
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for Sort {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Filter {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Filter::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownOption(s.to_string()))
    }
}

impl FromStr for Sort {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sort::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| UnknownOption(s.to_string()))
    }
}

/// Returns the entries of `todos` matching `filter`, ordered by `sort`.
///
/// The input is left untouched.
pub fn visible(todos: &[Todo], filter: Filter, sort: Sort) -> Vec<Todo> {
    let mut list: Vec<Todo> = todos.iter().filter(|t| filter.matches(t)).cloned().collect();
    match sort {
        Sort::Newest => list.sort_by(|a, b| b.id.cmp(&a.id)),
        Sort::Oldest => list.sort_by(|a, b| a.id.cmp(&b.id)),
        Sort::OpenFirst => list.sort_by(|a, b| {
            a.ticked_off
                .cmp(&b.ticked_off)
                .then_with(|| b.id.cmp(&a.id))
        }),
    }
    list
}
