//! chartpack CLI - package generated Kubernetes and OpenShift manifests as Helm charts

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod exit_codes;
mod util;

#[derive(Parser)]
#[command(name = "chartpack")]
#[command(author = "chartpack Contributors")]
#[command(version)]
#[command(
    about = "Package generated Kubernetes and OpenShift manifests as Helm charts",
    long_about = None
)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble, archive and register a Helm chart per variant
    Helm {
        /// Project descriptor
        #[arg(short, long, default_value = chartpack_core::project::DESCRIPTOR_FILE)]
        project: PathBuf,

        /// Set a build property (e.g. -D fabric8.helm.type=kubernetes,openshift)
        #[arg(short = 'D', long = "define", value_name = "KEY=VALUE")]
        define: Vec<String>,

        /// Do not write the artifacts.json ledger
        #[arg(long)]
        no_ledger: bool,
    },

    /// List the files inside a chart archive
    Inspect {
        /// Path to a .tar.gz chart archive
        archive: PathBuf,
    },

    /// List the chart variants that can be built
    Variants,
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("chartpack=debug,chartpack_core=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("chartpack=info,chartpack_core=info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_tracing(cli.debug);

    let result = match cli.command {
        Commands::Helm {
            project,
            define,
            no_ledger,
        } => commands::helm::run(&project, &define, !no_ledger),

        Commands::Inspect { archive } => commands::inspect::run(&archive),

        Commands::Variants => {
            commands::variants::run();
            Ok(())
        }
    };

    if let Err(err) = result {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}
