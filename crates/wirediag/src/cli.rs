use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "wirediag")]
#[command(author, version, about)]
#[command(long_about = "Wiring diagrams for beginner GPIO electronics projects.\n\n\
    Describe the parts in a YAML project file and get a PNG with every wire routed.\n\n\
    Examples:\n  \
    wirediag doorbell.yaml                 Render doorbell.png\n  \
    wirediag doorbell.yaml -o out/bell.png Render to a chosen path\n  \
    wirediag route doorbell.yaml --grid    Print wire paths and grid usage")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Project file to render
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output PNG path (defaults to the project file with a .png extension)
    #[arg(short, long, global = false)]
    pub output: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long, global = false)]
    pub width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long, global = false)]
    pub height: Option<u32>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Route every wire and print it in the textual wire format
    Route {
        /// Project file to route
        file: PathBuf,

        /// Also print grid occupancy and overlap details
        #[arg(long)]
        grid: bool,
    },

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.theme, defaults.overlap, defaults.rails)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Route { file, grid }) => {
                if !file.exists() {
                    anyhow::bail!("File not found: {}", file.display());
                }
                crate::commands::route::run(&file, grid)
            }
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                crate::commands::version::run();
                Ok(())
            }
            None => {
                if let Some(file) = self.file {
                    if !file.exists() {
                        anyhow::bail!("File not found: {}", file.display());
                    }
                    crate::commands::render::run(
                        &file,
                        self.output,
                        self.width,
                        self.height,
                        self.quiet,
                    )
                } else {
                    use clap::CommandFactory;
                    let mut cmd = Self::command();
                    cmd.print_help()?;
                    println!();
                    Ok(())
                }
            }
        }
    }
}
