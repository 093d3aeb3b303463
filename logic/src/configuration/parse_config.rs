use crate::configuration::ChimeraConfiguration;
use chimera_base::logging::info;
use chimera_base::result::{
    ChimeraError, ChimeraResult, Context, HelpError, MietteReportError, bail, err,
};
use kdl::{KdlDocument, KdlNode};

const VALID_NODES_HELP: &str =
    "Valid configuration nodes are: 'extensions', 'output-prefix', 'temp-archive-name'";

pub fn parse_configuration_from_kdl(
    filename: &str,
    kdl: &str,
) -> ChimeraResult<ChimeraConfiguration> {
    info!("Parsing configuration file '{filename}'");
    (|| -> ChimeraResult<ChimeraConfiguration> {
        let document = kdl.parse::<KdlDocument>().map_err(|error| {
            ChimeraError::new(MietteReportError::from(miette::Report::new(error)))
        })?;
        let mut configuration = ChimeraConfiguration::default();
        for node in document.nodes() {
            let name = node.name().value();
            if node.children().is_some() {
                bail!("Configuration node '{name}' does not take children");
            }
            match name {
                "extensions" => {
                    let extensions = string_arguments(node)?;
                    if extensions.is_empty() {
                        bail!("Expected at least one extension in 'extensions'");
                    }
                    for extension in &extensions {
                        if !extension.starts_with('.') || extension.len() < 2 {
                            return Err(HelpError::new(
                                format!("Invalid extension '{extension}'"),
                                "Extensions must start with a dot, e.g. \".png\"",
                            )
                            .into());
                        }
                    }
                    configuration.extensions = extensions;
                }
                "output-prefix" => {
                    let prefix = single_string_argument(node)?;
                    if prefix.is_empty() {
                        bail!("'output-prefix' must not be empty, the output would replace the original");
                    }
                    check_file_name_part(name, &prefix)?;
                    configuration.output_prefix = prefix;
                }
                "temp-archive-name" => {
                    let temp_archive_name = single_string_argument(node)?;
                    if temp_archive_name.is_empty() {
                        bail!("'temp-archive-name' must not be empty");
                    }
                    check_file_name_part(name, &temp_archive_name)?;
                    configuration.temp_archive_name = temp_archive_name;
                }
                other => {
                    return Err(HelpError::new(
                        format!("Unknown configuration node '{other}'"),
                        VALID_NODES_HELP,
                    )
                    .into());
                }
            }
        }
        Ok(configuration)
    })()
    .with_context(|| format!("Failed to parse chimera configuration file '{filename}'"))
}

fn string_arguments(node: &KdlNode) -> ChimeraResult<Vec<String>> {
    let name = node.name().value();
    node.entries()
        .iter()
        .map(|entry| {
            if let Some(property) = entry.name() {
                bail!(
                    "Unexpected property '{}' in '{name}'",
                    property.value()
                );
            }
            entry
                .value()
                .as_string()
                .map(str::to_string)
                .ok_or_else(|| err!("Expected string values in '{name}'"))
        })
        .collect()
}

fn single_string_argument(node: &KdlNode) -> ChimeraResult<String> {
    let mut arguments = string_arguments(node)?;
    if arguments.len() != 1 {
        bail!(
            "Expected exactly one value for '{}', found {}",
            node.name().value(),
            arguments.len()
        );
    }
    Ok(arguments.remove(0))
}

fn check_file_name_part(name: &str, value: &str) -> ChimeraResult<()> {
    if value.contains(['/', '\\']) {
        bail!("'{name}' must not contain path separators: '{value}'");
    }
    Ok(())
}
