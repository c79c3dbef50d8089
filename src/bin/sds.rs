use anyhow::Result;
use clap::{Parser, Subcommand};
use sds_tree::{display, storage, tree};

#[derive(Parser)]
#[command(name = "sds")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a tree and print it level by level
    Show {
        file: String,
        #[arg(long)]
        json: bool,
    },
    /// Write the built-in sample tree
    Sample {
        file: String,
    },
    /// Load a tree from one file and save it to another
    Copy {
        input: String,
        output: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Show { file, json } => {
            let tree = storage::load(&file)?;
            if json {
                let rows: Vec<_> = tree.rows().collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print!("{}", display::render(&tree));
            }
        }
        Commands::Sample { file } => {
            if storage::exists(&file) {
                println!("File already exists: {}", file);
                return Ok(());
            }
            let tree = tree::sample_tree()?;
            storage::save(&file, &tree)?;
            println!("Wrote sample tree ({} nodes) to {}", tree.len(), file);
        }
        Commands::Copy { input, output } => {
            let tree = storage::load(&input)?;
            storage::save(&output, &tree)?;
            println!("Copied {} nodes from {} to {}", tree.len(), input, output);
        }
    }

    Ok(())
}
