use build_advisor::cli::{
    catalog, handle_completions, handle_config_init, pipeline, Cli, Commands, ConfigCommands,
};
use clap::Parser;

type CommandResult<T> = Result<T, Box<dyn std::error::Error>>;

fn print_output(result: CommandResult<String>) -> CommandResult<()> {
    let output = result?;
    println!("{}", output);
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => build_advisor::cli::serve::run_serve(args).await,
        Commands::Extract(args) => print_output(pipeline::handle_extract(&args).await),
        Commands::Recommend(args) => print_output(pipeline::handle_recommend(&args).await),
        Commands::Catalog(args) => print_output(catalog::handle_catalog(&args)),
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => handle_config_init(&args),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
