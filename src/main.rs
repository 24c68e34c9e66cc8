use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use m2local::areas::repository::Repository;
use m2local::artifacts::fetch::FetchArtifactTool;
use m2local::config::SdkConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "m2local",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Register packages with the Android SDK's local Maven repository",
    long_about = "Copies prebuilt archives into a local Maven-layout repository, \
    generates their POM descriptors and checksum files, \
    and records the version in the package's maven-metadata.xml.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(
        long,
        env = "ANDROID_HOME",
        global = true,
        hide_env_values = true,
        help = "Android SDK root used to locate the default repository"
    )]
    android_home: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "deploy",
        about = "Register an archive with the local repository",
        long_about = "This command copies an archive into the repository under the given package and version, \
        generates its POM and checksum files, and adds the version to the package metadata."
    )]
    Deploy {
        #[arg(
            short = 'r',
            long = "repository-path",
            help = "Path to the local repository (defaults to $ANDROID_HOME/extras/google/m2repository)"
        )]
        repository_path: Option<PathBuf>,
        #[arg(short = 'f', long = "archive-file", help = "Archive file to register")]
        archive_file: PathBuf,
        #[arg(short = 'p', long = "package", help = "Fully qualified package name to register")]
        package: String,
        #[arg(short = 'v', long = "version", help = "Package version number")]
        version: String,
    },
    #[command(
        name = "install-dogfood",
        about = "Fetch an internal Play Services build and register it",
        long_about = "This command fetches the latest GmsCore build from the Android build server \
        with the fetch_artifact tool and registers it as com.google.android.gms.play-services."
    )]
    InstallDogfood {
        #[arg(
            short = 'b',
            long = "branch",
            help = "Branch to fetch the binaries from (e.g. ub-gcore-manchego-release)"
        )]
        branch: String,
        #[arg(
            short = 'v',
            long = "install-as-version",
            help = "Version to assign to the installed libraries (e.g. 6.0.0)"
        )]
        version: String,
        #[arg(
            short = 'k',
            long = "keyfile",
            help = "OAuth keyfile used to authenticate to the build server"
        )]
        keyfile: PathBuf,
        #[arg(
            long = "fetch-tool",
            help = "Path to the fetch_artifact executable (defaults to the one next to this program)"
        )]
        fetch_tool: Option<PathBuf>,
    },
    #[command(
        name = "versions",
        about = "List the versions registered for a package"
    )]
    Versions {
        #[arg(short = 'r', long = "repository-path", help = "Path to the local repository")]
        repository_path: Option<PathBuf>,
        #[arg(short = 'p', long = "package", help = "Fully qualified package name")]
        package: String,
    },
    #[command(
        name = "verify",
        about = "Check a registered artifact against its checksum files"
    )]
    Verify {
        #[arg(short = 'r', long = "repository-path", help = "Path to the local repository")]
        repository_path: Option<PathBuf>,
        #[arg(short = 'p', long = "package", help = "Fully qualified package name")]
        package: String,
        #[arg(short = 'v', long = "version", help = "Package version number")]
        version: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let sdk = SdkConfig::new(cli.android_home);

    match cli.command {
        Commands::Deploy {
            repository_path,
            archive_file,
            package,
            version,
        } => {
            let path = sdk.resolve_repository(repository_path.as_deref())?;
            let mut repository = Repository::new(&path, Box::new(std::io::stdout()));

            repository.deploy(&archive_file, &package, &version)?;
        }
        Commands::InstallDogfood {
            branch,
            version,
            keyfile,
            fetch_tool,
        } => {
            let path = sdk.existing_m2_repository()?;
            let fetcher = match fetch_tool {
                Some(executable) => FetchArtifactTool::new(executable)?,
                None => FetchArtifactTool::beside_current_exe()?,
            };
            let mut repository = Repository::new(&path, Box::new(std::io::stdout()));

            repository.install_dogfood(
                &fetcher,
                &branch,
                &version,
                &keyfile,
                &std::env::temp_dir(),
            )?;
        }
        Commands::Versions {
            repository_path,
            package,
        } => {
            let path = sdk.resolve_repository(repository_path.as_deref())?;
            let mut repository = Repository::new(&path, Box::new(std::io::stdout()));

            repository.versions(&package)?;
        }
        Commands::Verify {
            repository_path,
            package,
            version,
        } => {
            let path = sdk.resolve_repository(repository_path.as_deref())?;
            let mut repository = Repository::new(&path, Box::new(std::io::stdout()));

            repository.verify(&package, &version)?;
        }
    }

    Ok(())
}
