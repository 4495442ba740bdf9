use clap::{Parser, Subcommand};
use coursegen::{config, generate, links, output, render};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "coursegen")]
#[command(about = "Manifest-driven page generator for static course sites")]
#[command(long_about = "\
Manifest-driven page generator for static course sites

Pages are described as JSON and rendered into Quarto-flavored markdown.
The link table is the manifest: entries with generate = true are produced
by this tool, everything else is hand-authored and only participates in
link lookups and {{{key}}} placeholder substitution.

Content structure:

  site/
  ├── config.toml                  # Site config (optional)
  ├── _data/
  │   ├── links.json               # Link table + page manifest
  │   ├── icons.json               # Branded-text labels (merged over links)
  │   ├── groups.json              # Named ordered groups of link ids
  │   └── tables.json              # Named row sets for cheat-sheet tables
  └── pages/
      ├── _json/
      │   ├── intro.json           # Source for /pages/intro.qmd
      │   └── faq-items.json       # External fragment / item list
      └── handmade.qmd             # Hand-authored page (generate absent)

Source resolution: a manifest link /pages/intro.qmd reads its JSON body
from pages/_json/intro.json. Entries with no JSON source are skipped, so
partial manifests are fine during authoring.

Run 'coursegen gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content root (contains config.toml and the data directory)
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Output directory (overrides output_root from config.toml)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load link data and generate all manifest pages
    Build,
    /// Load link data and expand pages without writing output
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let site = config::load_config(&cli.root)?;
            let table = links::LinkTable::load(&cli.root.join(&site.data_dir))?;
            output::print_link_summary(&table);

            let registry = render::Registry::builtin();
            let output_root = cli
                .output
                .unwrap_or_else(|| cli.root.join(&site.output_root));
            println!("==> Generating pages → {}", output_root.display());
            let summary = generate::generate(
                &cli.root,
                &output_root,
                &table,
                &registry,
                site.front_matter,
            )?;
            output::print_generate_output(&summary);
        }
        Command::Check => {
            let site = config::load_config(&cli.root)?;
            let table = links::LinkTable::load(&cli.root.join(&site.data_dir))?;
            output::print_link_summary(&table);

            let registry = render::Registry::builtin();
            println!("==> Checking {}", cli.root.display());
            let summary = generate::check(&cli.root, &table, &registry)?;
            output::print_generate_output(&summary);
            println!("==> Content is valid (nothing written)");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
