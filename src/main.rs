//! docmark - Fast DOCX to Markdown converter

use std::process::ExitCode;

use clap::Parser;

use docmark::{ConvertOptions, MediaMode, convert_file, write_assets};

#[derive(Parser)]
#[command(name = "docmark")]
#[command(version, about = "Fast DOCX to Markdown converter", long_about = None)]
#[command(after_help = "EXAMPLES:
    docmark report.docx            Convert to Markdown on stdout
    docmark --embed report.docx    Inline images as data URIs")]
struct Cli {
    /// Input files (.docx)
    #[arg(value_name = "FILES")]
    files: Vec<String>,

    /// Embed media as data URIs instead of writing them to disk
    #[arg(long)]
    embed: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let options = ConvertOptions {
        media: if cli.embed {
            MediaMode::Embed
        } else {
            MediaMode::Extract
        },
    };

    for path in &cli.files {
        if let Err(e) = convert(path, &options) {
            eprintln!("error: {path}: {e}");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

fn convert(path: &str, options: &ConvertOptions) -> docmark::Result<()> {
    let rendering = convert_file(path, options)?;
    print!("{}", rendering.markdown);
    write_assets(&rendering.assets)?;
    Ok(())
}
