pub const CHIMERA_VERSION: &str = env!("CARGO_PKG_VERSION");
const GIT_SUFFIX: Option<&str> = option_env!("CHIMERA_REVISION");

pub fn get_version() -> String {
    let suffix = GIT_SUFFIX.unwrap_or("dev");
    format!("{CHIMERA_VERSION}-{suffix}")
}
