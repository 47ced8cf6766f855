use anyhow::{bail, Result};
use clap::Parser;
use prepost::{
    chart,
    cli::{Cli, OutputFormat},
    compare,
    csv_output::CsvOutput,
    ingest,
    json_output::JsonOutput,
    text_output,
};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    // The pipeline checks this too, but surfacing it before touching the
    // file gives a clearer message for the common selection mistake.
    if cli.pre.len() != cli.post.len() {
        bail!(
            "--pre and --post must select the same number of columns \
             (got {} and {})",
            cli.pre.len(),
            cli.post.len()
        );
    }

    let ingested = ingest::load_dataset(&cli.input)?;
    tracing::debug!(
        columns = ingested.dataset.n_columns(),
        rows = ingested.rows_used,
        "dataset ready"
    );

    let report = compare::compare(&ingested.dataset, &cli.pre, &cli.post)?;

    match cli.format {
        OutputFormat::Text => {
            print!("{}", text_output::render_ingest_summary(&ingested));
            println!();
            print!("{}", text_output::render_report(&report));
        }
        OutputFormat::Json => {
            let mut output = JsonOutput::new(&ingested, report);
            if cli.charts {
                output = output.with_charts(chart::build_all(
                    &ingested.dataset,
                    &cli.pre,
                    &cli.post,
                )?);
            }
            println!("{}", output.to_json()?);
        }
        OutputFormat::Csv => {
            print!("{}", CsvOutput::new(&report).to_csv());
        }
    }

    Ok(())
}
