use crate::adapter::{Adapter, AdapterBox};
use crate::arguments::{CliCommand, CreateArguments, parse_arguments};
use crate::chimera::{create_chimera, success_message};
use crate::configuration::parse_config::parse_configuration_from_kdl;
use crate::configuration::{CONFIGURATION_FILE_NAME, ChimeraConfiguration};
use crate::help::{print_help, print_instructions};
use crate::version::get_version;
use chimera_base::logging::{debug, info};
use chimera_base::result::{ChimeraError, ChimeraResult, HelpError, MietteReportError};
use miette::{GraphicalReportHandler, GraphicalTheme};
use std::fmt::Write;
use std::path::Path;
use std::rc::Rc;

pub struct ChimeraRunner {
    adapter: AdapterBox,
    report_handler: GraphicalReportHandler,
}

impl ChimeraRunner {
    pub fn new(adapter: impl Adapter) -> Self {
        let want_color = want_color(adapter.env());
        let theme = if want_color {
            GraphicalTheme::unicode()
        } else {
            GraphicalTheme::unicode_nocolor()
        };
        let report_handler = GraphicalReportHandler::new_themed(theme);
        Self {
            adapter: Rc::new(adapter),
            report_handler,
        }
    }

    pub fn run(&self) {
        info!("Running chimera ({})", get_version());
        match self.run_inner() {
            Ok(()) => {}
            Err(err) => {
                if let Err(print_err) = self.print_error(err) {
                    self.adapter
                        .print(&format!("ERROR: Failed to print error: {print_err}\n"));
                }
                self.adapter.exit(1);
            }
        }
    }

    pub fn run_inner(&self) -> ChimeraResult<()> {
        let args = self.adapter.args();
        if args.len() <= 1 {
            print_help(self.adapter.as_ref());
            return Ok(());
        }
        let command = match parse_arguments(&args[1..]) {
            Ok(command) => command,
            Err(err) => {
                self.adapter.print(&format!(
                    "ERROR: {err}\n\nTry --help for more information about supported arguments"
                ));
                self.adapter.exit(1);
                return Ok(());
            }
        };
        match command {
            CliCommand::Help => print_help(self.adapter.as_ref()),
            CliCommand::Version => self.print_version(),
            CliCommand::Instructions => print_instructions(self.adapter.as_ref()),
            CliCommand::Create(arguments) => self.create(arguments)?,
        }
        Ok(())
    }

    fn create(&self, arguments: CreateArguments) -> ChimeraResult<()> {
        let configuration = load_configuration(self.adapter.as_ref())?;
        match create_chimera(
            self.adapter.as_ref(),
            &configuration,
            &arguments.sources,
            arguments.output.as_deref(),
        ) {
            Ok(output_path) => {
                self.adapter.print(&success_message(&output_path));
            }
            Err(failure) => {
                self.adapter.print(&failure.to_string());
                self.adapter.exit(1);
            }
        }
        Ok(())
    }

    fn print_error(&self, err: ChimeraError) -> ChimeraResult<()> {
        let mut message = format!("ERROR running chimera ({}): {err}\n", get_version());
        let mut help_text = String::new();
        if err.source().is_some() {
            message.push_str("  Chain of causes:\n");
            err.chain().skip(1).enumerate().for_each(|(index, err)| {
                message.push_str(&format!("   {index}: {err}\n"));
            });
            message.push('\n');
            for err in err.chain() {
                if let Some(err) = err.downcast_ref::<MietteReportError>() {
                    self.report_handler
                        .render_report(&mut message, err.report().as_ref())?;
                } else if let Some(err) = err.downcast_ref::<HelpError>() {
                    writeln!(help_text, "Help: {}", err.help_message)?;
                }
            }
        }
        // omit backtrace in tests to prevent noise in test output
        #[cfg(not(test))]
        {
            let backtrace = err.backtrace();
            if let std::backtrace::BacktraceStatus::Captured = backtrace.status() {
                message.push_str("\n  Backtrace:\n");
                message.push_str(&backtrace.to_string());
            }
        }
        // put help text last
        message.push_str(&help_text);
        self.adapter.print(&message);
        Ok(())
    }

    fn print_version(&self) {
        self.adapter.print(&format!("{}\n", get_version()))
    }
}

/// Loads `.chimera.kdl` from the base path, falling back to defaults when absent.
pub fn load_configuration(adapter: &dyn Adapter) -> ChimeraResult<ChimeraConfiguration> {
    let config_path = Path::new(CONFIGURATION_FILE_NAME);
    if !adapter.file_exists(config_path)? {
        debug!("No '{CONFIGURATION_FILE_NAME}' found, using default configuration");
        return Ok(ChimeraConfiguration::default());
    }
    let config_string = std::io::read_to_string(adapter.read_file(config_path)?)?;
    parse_configuration_from_kdl(CONFIGURATION_FILE_NAME, &config_string)
}

fn want_color(env: Vec<(String, String)>) -> bool {
    let mut want_color = true;
    for (key, value) in env {
        if key == "NO_COLOR" && !value.is_empty() {
            want_color = false;
        }
    }
    want_color
}
