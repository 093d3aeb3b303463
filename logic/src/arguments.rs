use crate::types::SourcePaths;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

#[derive(Debug, PartialEq, Eq)]
pub enum CliCommand {
    Help,
    Version,
    Instructions,
    Create(CreateArguments),
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CreateArguments {
    pub sources: SourcePaths,
    pub output: Option<PathBuf>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ArgumentError {
    UnknownOption(String),
    MissingValue(String),
    DuplicateOption(String),
    UnexpectedArgument(String),
}

impl Display for ArgumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgumentError::UnknownOption(option) => write!(f, "Unknown argument: '{option}'"),
            ArgumentError::MissingValue(option) => {
                write!(f, "Missing value for argument '{option}'")
            }
            ArgumentError::DuplicateOption(option) => {
                write!(f, "Argument '{option}' given more than once")
            }
            ArgumentError::UnexpectedArgument(argument) => {
                write!(f, "Unexpected argument: '{argument}', only one original file is supported")
            }
        }
    }
}

impl std::error::Error for ArgumentError {}

/// Parses the arguments following the binary name.
///
/// Options taking a value accept both `--file <PATH>` and `--file=<PATH>`.
/// `--help`, `--version` and `--instructions` win over everything else.
pub fn parse_arguments(args: &[String]) -> Result<CliCommand, ArgumentError> {
    let mut original: Option<PathBuf> = None;
    let mut arguments = CreateArguments::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let (option, inline_value) = match arg.split_once('=') {
            Some((option, value)) if option.starts_with("--") => (option, Some(value)),
            _ => (arg.as_str(), None),
        };
        match option {
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--version" => return Ok(CliCommand::Version),
            "--instructions" => return Ok(CliCommand::Instructions),
            "--file" | "--folder" | "--output" => {
                let value = match inline_value {
                    Some(value) => value.to_string(),
                    None => iter
                        .next()
                        .ok_or_else(|| ArgumentError::MissingValue(option.to_string()))?
                        .clone(),
                };
                let slot = match option {
                    "--file" => &mut arguments.sources.attachment,
                    "--folder" => &mut arguments.sources.attachment_folder,
                    _ => &mut arguments.output,
                };
                if slot.is_some() {
                    return Err(ArgumentError::DuplicateOption(option.to_string()));
                }
                *slot = Some(PathBuf::from(value));
            }
            other if other.starts_with('-') && other.len() > 1 => {
                return Err(ArgumentError::UnknownOption(arg.clone()));
            }
            _ => {
                if original.is_some() {
                    return Err(ArgumentError::UnexpectedArgument(arg.clone()));
                }
                original = Some(PathBuf::from(arg));
            }
        }
    }
    arguments.sources.original = original.unwrap_or_default();
    Ok(CliCommand::Create(arguments))
}
