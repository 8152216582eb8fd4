use casetrack::cli::{Cli, Commands};
use clap::Parser;
use miette::Result;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Init(args) => casetrack::cli::commands::init::run(args),
        Commands::Project(cmd) => casetrack::cli::commands::project::run(cmd),
        Commands::Version(cmd) => casetrack::cli::commands::version::run(cmd),
        Commands::Case(cmd) => casetrack::cli::commands::case::run(cmd),
        Commands::Import(args) => casetrack::cli::commands::import::run(args),
        Commands::Export(cmd) => casetrack::cli::commands::export::run(cmd),
        Commands::Completions(args) => casetrack::cli::commands::completions::run(args),
    }
}
