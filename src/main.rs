use anyhow::Result;
use clap::Parser;
use nexlib::archive::ArchiveExtractorImpl;
use nexlib::process::RealProcessRunner;
use nexlib::report::ConsoleReporter;
use nexlib::retrieve::{RetrievalRequest, Retriever};
use nexlib::runtime::RealRuntime;
use std::path::PathBuf;

/// nexlib - Nexus shared-library retriever
///
/// Download a versioned shared-library archive from a Maven/Nexus
/// repository via `mvn dependency:copy` and unpack it into a target
/// directory.
///
/// The artifact coordinate may carry a `${library.<name>.version}`
/// placeholder, which is replaced with the requested version.
///
/// Examples:
///   nexlib retrieve acme-lib 2.3.0 \
///       --artifact 'com.x:acme-lib:${library.acme-lib.version}:zip' \
///       --target ./libs/acme-lib
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Retrieve a shared library into a target directory
    Retrieve(RetrieveArgs),
}

#[derive(clap::Args, Debug)]
pub struct RetrieveArgs {
    /// Logical name of the library
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Version of the library
    #[arg(value_name = "VERSION")]
    pub version: String,

    /// Artifact coordinate 'groupId:artifactId:version[:packaging[:classifier]]',
    /// optionally with a ${library.<name>.version} placeholder
    #[arg(long = "artifact", short = 'a', value_name = "COORDINATE")]
    pub artifact: String,

    /// Directory to unpack the library into
    #[arg(long = "target", short = 't', value_name = "DIR")]
    pub target: PathBuf,

    /// Maven installation to prefer over the system mvn (also via MAVEN_HOME)
    #[arg(long = "maven-home", env = "MAVEN_HOME", value_name = "PATH")]
    pub maven_home: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Retrieve(args) => {
            let retriever = Retriever::new(args.artifact, args.maven_home);
            let request = RetrievalRequest {
                name: args.name,
                version: args.version,
                target: args.target,
            };
            retriever.retrieve(
                &RealRuntime,
                &RealProcessRunner,
                &ArchiveExtractorImpl::new(),
                &ConsoleReporter,
                &request,
            )?
        }
    }
    Ok(())
}
