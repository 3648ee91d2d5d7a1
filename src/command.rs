//! Line-oriented commands for the interactive front end.
//!
//! ```text
//! t positive I love sunny days
//! c today is a sunny day
//! ```

use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command `{0}`")]
    Unknown(String),

    #[error("`train` needs a category, e.g. `t positive I love sunny days`")]
    MissingCategory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Train {
        category: String,
        features: Vec<String>,
    },
    Classify {
        features: Vec<String>,
    },
    Reset,
    Stats,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let verb = tokens.next().ok_or(CommandError::Empty)?;

        match verb {
            "t" | "train" => {
                let category = tokens.next().ok_or(CommandError::MissingCategory)?;
                Ok(Command::Train {
                    category: category.to_string(),
                    features: tokens.map(str::to_string).collect(),
                })
            }
            "c" | "classify" => Ok(Command::Classify {
                features: tokens.map(str::to_string).collect(),
            }),
            "r" | "reset" => Ok(Command::Reset),
            "s" | "stats" => Ok(Command::Stats),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}
