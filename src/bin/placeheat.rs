use std::{path::PathBuf, time::Duration};

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "placeheat", version, about = "Render a CSV of point placements as a heatmap PNG")]
struct Cli {
    /// CSV URL to fetch. Used when `--file` is not given.
    #[arg(long, conflicts_with = "file")]
    url: Option<String>,

    /// Local CSV file to read instead of fetching.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Output PNG path (overwritten).
    #[arg(long, default_value = "out.png")]
    out: PathBuf,

    /// Colour ramp for the density.
    #[arg(long, value_enum, default_value_t = SchemeChoice::AlphaFire)]
    scheme: SchemeChoice,

    /// Whole-request timeout in seconds; 0 waits forever.
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,

    /// Use the response body even when the HTTP status is not 2xx.
    #[arg(long)]
    ignore_status: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SchemeChoice {
    AlphaFire,
    Classic,
}

impl From<SchemeChoice> for placeheat::Scheme {
    fn from(choice: SchemeChoice) -> Self {
        match choice {
            SchemeChoice::AlphaFire => Self::AlphaFire,
            SchemeChoice::Classic => Self::Classic,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = make_config(cli);

    let report = placeheat::convert(&cfg, &placeheat::SplatRenderer).map_err(|err| {
        let stage = err.stage();
        anyhow::Error::new(err).context(format!(
            "{stage} stage failed: convert {} into '{}'",
            cfg.source,
            cfg.out_path.display()
        ))
    })?;

    eprintln!(
        "wrote {} ({} points, {}x{})",
        report.out_path.display(),
        report.points,
        report.canvas.width,
        report.canvas.height
    );
    Ok(())
}

fn make_config(cli: Cli) -> placeheat::ConvertConfig {
    let source = match (cli.file, cli.url) {
        (Some(path), _) => placeheat::Source::File(path),
        (None, Some(url)) => placeheat::Source::Url(url),
        (None, None) => placeheat::Source::default(),
    };

    let defaults = placeheat::ConvertConfig::default();
    placeheat::ConvertConfig {
        source,
        out_path: cli.out,
        fetch: placeheat::FetchOptions {
            timeout: (cli.timeout_secs > 0).then(|| Duration::from_secs(cli.timeout_secs)),
            check_status: !cli.ignore_status,
            ..defaults.fetch
        },
        density: placeheat::DensityParams {
            scheme: cli.scheme.into(),
            ..defaults.density
        },
        ..defaults
    }
}
