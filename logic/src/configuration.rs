pub mod parse_config;

pub const CONFIGURATION_FILE_NAME: &str = ".chimera.kdl";

pub const DEFAULT_EXTENSIONS: [&str; 3] = [".png", ".gif", ".mp4"];
pub const DEFAULT_OUTPUT_PREFIX: &str = "chimera_";
pub const DEFAULT_TEMP_ARCHIVE_NAME: &str = "temp_chimera.zip";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChimeraConfiguration {
    /// Allowed extensions of the original file, including the leading dot.
    pub extensions: Vec<String>,
    pub output_prefix: String,
    pub temp_archive_name: String,
}

impl Default for ChimeraConfiguration {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
            temp_archive_name: DEFAULT_TEMP_ARCHIVE_NAME.to_string(),
        }
    }
}

impl ChimeraConfiguration {
    pub fn is_allowed_extension(&self, extension: &str) -> bool {
        self.extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(extension))
    }
}
