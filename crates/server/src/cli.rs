use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Bilingual terminology extraction service.
#[derive(Parser, Debug)]
#[command(name = "glossa", version, about = "Extract bilingual term lists from documents")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server (default)
    Serve {
        /// Bind address override
        #[arg(long)]
        host: Option<String>,

        /// Port override
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run the pipeline on local files and print the terms as JSON
    Extract {
        /// Documents to read (pdf, docx, xlsx, csv, xliff, sdlxliff, txt)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Source language code (default: DEFAULT_SOURCE_LANG)
        #[arg(long)]
        source: Option<String>,

        /// Target language code (default: DEFAULT_TARGET_LANG)
        #[arg(long)]
        target: Option<String>,

        /// LLM provider: openai or deepseek (default: DEFAULT_PROVIDER)
        #[arg(long)]
        provider: Option<String>,

        /// Also write the glossary artifacts under EXPORT_DIR
        #[arg(long)]
        export: bool,
    },
}
