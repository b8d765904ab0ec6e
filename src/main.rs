mod cli;

use wpmovielibrary::{
    config::{self, Config},
    library,
    media::{
        AjaxUploader, ImageImporter, ImageQuery, PosterPicker, PosterSelection, Progress, Session,
    },
    metadata::{RemoteImage, TmdbProvider},
};
use wpmoly_common::{AttachmentId, ImageKind, MovieId};
use wpmoly_format::{Field, FormatOptions};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::watch;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "wpmovielibrary=trace,wpmoly_format=debug,wpmoly_common=debug,reqwest=debug".to_string()
        } else {
            "wpmovielibrary=info,wpmoly_format=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Format {
            movie,
            field,
            options,
            terms,
            json,
        } => format_movie(
            &movie,
            &field,
            &options,
            terms.as_deref(),
            json,
            cli.config.as_deref(),
        ),
        Commands::Fields => list_fields(),
        Commands::Images {
            tmdb_id,
            kind,
            json,
        } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(list_images(&config, tmdb_id, kind, json))
        }
        Commands::ImportImages {
            post_id,
            tmdb_id,
            title,
            paths,
        } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(import_images(&config, post_id, tmdb_id, title, paths))
        }
        Commands::SetPoster {
            post_id,
            tmdb_id,
            title,
            featured,
            file_path,
        } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(set_poster(&config, post_id, tmdb_id, title, featured, file_path))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("wpmoly {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn format_movie(
    movie: &Path,
    fields: &[String],
    option_pairs: &[String],
    terms: Option<&Path>,
    json: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    let mut options = FormatOptions::new();
    for pair in option_pairs {
        options.set(pair)?;
    }

    let selected = fields
        .iter()
        .map(|name| name.parse::<Field>())
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let terms = terms.map(library::load_terms).transpose()?;
    let formatter = library::build_formatter(&config, terms);
    let movies = library::load_movies(movie)?;

    let mut rendered = Vec::with_capacity(movies.len());
    for record in &movies {
        let output = if selected.is_empty() {
            formatter.format_record(record, &options)
        } else {
            selected
                .iter()
                .map(|&field| {
                    let value = record.get(field.as_str());
                    (field, formatter.format_field(field, value, &options))
                })
                .collect()
        };
        tracing::debug!("Rendered {} field(s) for movie {}", output.len(), record.id);
        rendered.push((record, output));
    }

    if json {
        let value: Vec<serde_json::Value> = rendered
            .iter()
            .map(|(record, output)| {
                let fields: serde_json::Map<String, serde_json::Value> = output
                    .iter()
                    .map(|(field, html)| (field.to_string(), serde_json::Value::from(html.as_str())))
                    .collect();
                serde_json::json!({
                    "id": record.id,
                    "title": record.title,
                    "fields": fields,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        for (i, (record, output)) in rendered.iter().enumerate() {
            if i > 0 {
                println!();
            }
            match &record.title {
                Some(title) => println!("Movie {}: {}", record.id, title),
                None => println!("Movie {}", record.id),
            }
            for (field, html) in output {
                println!("  {}: {}", field, html);
            }
        }
    }

    Ok(())
}

fn list_fields() -> Result<()> {
    for field in Field::ALL {
        let aliases = field.aliases();
        if aliases.is_empty() {
            println!("{}", field);
        } else {
            println!("{} ({})", field, aliases.join(", "));
        }
    }
    Ok(())
}

async fn list_images(config: &Config, tmdb_id: u64, kind: ImageKind, json: bool) -> Result<()> {
    let provider = TmdbProvider::new(&config.tmdb)?;
    let query = ImageQuery::new(tmdb_id, kind);
    tracing::info!("Fetching {}", query);

    let images = query.fetch(&provider).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&images)?);
    } else {
        println!("{} {}(s) for TMDb movie {}", images.len(), kind, tmdb_id);
        for image in &images {
            print!("  {} {}x{}", image.file_path, image.width, image.height);
            if let Some(ref lang) = image.language {
                print!(" ({})", lang);
            }
            println!(" [{:.1}]", image.vote_average);
        }
    }

    Ok(())
}

async fn import_images(
    config: &Config,
    post_id: u64,
    tmdb_id: u64,
    title: String,
    paths: Vec<String>,
) -> Result<()> {
    let endpoint = config::require_ajax_url(config)?;
    let uploader = Arc::new(AjaxUploader::new(endpoint, config.import.nonce.clone())?);

    let selection: Vec<RemoteImage> = if paths.is_empty() {
        let provider = TmdbProvider::new(&config.tmdb)?;
        ImageQuery::new(tmdb_id, ImageKind::Image)
            .fetch(&provider)
            .await?
    } else {
        paths
            .iter()
            .map(|path| RemoteImage::from_path(path, &config.tmdb.image_base_url))
            .collect()
    };

    let session = Session::new(
        MovieId::new(post_id),
        tmdb_id,
        title,
        config.import.close_delay(),
    );
    let watcher = tokio::spawn(log_progress(session.subscribe()));

    let importer = ImageImporter::new(uploader, session);
    let report = importer.import(selection).await;
    drop(importer);
    let _ = watcher.await;

    for id in &report.attachments {
        println!("{}", id);
    }

    if !report.is_complete() {
        for image in &report.failed {
            eprintln!("Failed: {}", image.file_path);
        }
        anyhow::bail!(
            "{} of {} image(s) failed to upload",
            report.failed.len(),
            report.failed.len() + report.attachments.len()
        );
    }

    Ok(())
}

async fn set_poster(
    config: &Config,
    post_id: u64,
    tmdb_id: u64,
    title: String,
    featured: Option<u64>,
    file_path: Option<String>,
) -> Result<()> {
    let endpoint = config::require_ajax_url(config)?;
    let uploader = Arc::new(AjaxUploader::new(endpoint, config.import.nonce.clone())?);
    let current = featured.map(AttachmentId::new);

    let selection = match (file_path, current) {
        (Some(path), _) => {
            PosterSelection::Remote(RemoteImage::from_path(&path, &config.tmdb.image_base_url))
        }
        (None, Some(_)) => PosterSelection::Path(String::new()),
        (None, None) => {
            let provider = TmdbProvider::new(&config.tmdb)?;
            let best = ImageQuery::new(tmdb_id, ImageKind::Poster)
                .fetch(&provider)
                .await?
                .into_iter()
                .next();
            match best {
                Some(image) => PosterSelection::Remote(image),
                None => anyhow::bail!("TMDb has no poster for movie {}", tmdb_id),
            }
        }
    };

    let session = Session::new(
        MovieId::new(post_id),
        tmdb_id,
        title,
        config.import.close_delay(),
    );
    let watcher = tokio::spawn(log_progress(session.subscribe()));

    let picker = PosterPicker::new(uploader, session, config.tmdb.image_base_url.clone());
    let result = picker.select(selection, current).await;
    drop(picker);
    let _ = watcher.await;

    match result? {
        Some(id) => println!("{}", id),
        None => println!("No featured image set"),
    }

    Ok(())
}

/// Log every progress update until the picker closes or its session is dropped.
async fn log_progress(mut rx: watch::Receiver<Progress>) {
    while rx.changed().await.is_ok() {
        let progress = rx.borrow_and_update().clone();
        tracing::info!("[{:>3}%] {}", progress.percent, progress.status);
        if progress.closed {
            break;
        }
    }
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            Config::default()
        }
    };

    println!("  Rating base: {}", config.format.rating_base);
    println!(
        "  Taxonomies: {}",
        config
            .format
            .taxonomies
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("  Translations: {}", config.translations.len());
    println!("  TMDb enabled: {}", config.tmdb.enabled);
    println!(
        "  Import endpoint: {}",
        config.import.ajax_url.as_deref().unwrap_or("(none)")
    );

    Ok(())
}
