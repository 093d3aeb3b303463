use chimera_base::result::{ChimeraResult, Context};
use chimera_logic::runner::ChimeraRunner;
use std::env::current_dir;
use tracing::info;
use tracing_subscriber::Layer;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;

pub fn run_cli() -> ChimeraResult<()> {
    if let Err(err) = enable_ansi_support::enable_ansi_support() {
        eprintln!("Failed to enable ANSI support: {err}");
    }

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::ENTER)
        .with_filter(tracing_subscriber::filter::LevelFilter::INFO);

    let registry = tracing_subscriber::registry().with(fmt_layer);

    tracing::subscriber::set_global_default(registry)
        .with_context(|| "Failed to set default logging subscriber")?;
    let base_path = current_dir().with_context(|| "Failed to get working directory")?;
    info!("Using base path: '{:?}'", base_path);
    let adapter = chimera_real_adapter::RealAdapter::new(base_path);
    let runner = ChimeraRunner::new(adapter);
    runner.run();
    Ok(())
}
