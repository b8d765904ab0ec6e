use clap::{Parser, Subcommand};
use std::path::PathBuf;

use wpmoly_common::ImageKind;

#[derive(Parser)]
#[command(name = "wpmoly")]
#[command(author, version, about = "Movie library metadata formatting and TMDb media import")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a movie's metadata fields as display HTML
    Format {
        /// Movie record JSON file (one record or an array)
        #[arg(required = true)]
        movie: PathBuf,

        /// Only render this field (repeatable)
        #[arg(short, long)]
        field: Vec<String>,

        /// Formatting option as key=value (repeatable)
        #[arg(short, long = "option", value_name = "KEY=VALUE")]
        options: Vec<String>,

        /// Taxonomy terms JSON file used for term links
        #[arg(long)]
        terms: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the fields that have a formatter
    Fields,

    /// List a movie's remote images on TMDb
    Images {
        /// TMDb movie id
        tmdb_id: u64,

        /// Image kind: image (backdrops) or poster
        #[arg(short, long, default_value = "image")]
        kind: ImageKind,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Import remote images into a movie
    ImportImages {
        /// Host post id of the movie
        #[arg(long)]
        post_id: u64,

        /// TMDb movie id
        #[arg(long)]
        tmdb_id: u64,

        /// Movie title, used for attachment titles
        #[arg(long)]
        title: String,

        /// Image paths to import; every TMDb backdrop when omitted
        paths: Vec<String>,
    },

    /// Upload a poster and make it the movie's featured image
    SetPoster {
        /// Host post id of the movie
        #[arg(long)]
        post_id: u64,

        /// TMDb movie id
        #[arg(long)]
        tmdb_id: u64,

        /// Movie title
        #[arg(long)]
        title: String,

        /// Attachment id of the movie's current featured image
        #[arg(long)]
        featured: Option<u64>,

        /// Poster path; the best voted TMDb poster when omitted
        file_path: Option<String>,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
