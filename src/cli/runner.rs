//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::PaginatorConfig;
use crate::error::{Error, Result, ResultExt};
use crate::options::{PaginateOptions, PopulateItem};
use crate::pagination::Paginator;
use crate::store::{Filter, MemoryCollection};
use crate::types::Visibility;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command and print its output
    pub async fn run(&self) -> Result<()> {
        let output = self.execute().await?;
        println!("{output}");
        Ok(())
    }

    /// Run the CLI command and return its output
    pub async fn execute(&self) -> Result<String> {
        let config = self.load_config()?;

        match &self.cli.command {
            Commands::Query {
                data,
                visibility,
                filter,
                options,
                offset,
                page,
                limit,
                sort,
                select,
                populate,
                lean,
                no_lean_id,
            } => {
                let collection = load_collection("data", data)?;

                let mut opts = match options {
                    Some(json) => serde_json::from_str::<PaginateOptions>(json)
                        .context("Invalid --options JSON")?,
                    None => PaginateOptions::new(),
                };
                opts.offset = offset.or(opts.offset);
                opts.page = page.or(opts.page);
                opts.limit = limit.or(opts.limit);
                if let Some(sort) = sort {
                    opts = opts.with_sort(sort.as_str());
                }
                if let Some(select) = select {
                    opts = opts.with_select(select.as_str());
                }
                if *lean {
                    opts = opts.with_lean(true);
                }
                if *no_lean_id {
                    opts = opts.with_lean_with_id(false);
                }

                if !populate.is_empty() {
                    let mut items = Vec::with_capacity(populate.len());
                    for arg in populate {
                        let (path, file) = arg.split_once('=').ok_or_else(|| {
                            Error::invalid_option(
                                "populate",
                                format!("expected PATH=FILE, got '{arg}'"),
                            )
                        })?;
                        let related = load_collection(path, Path::new(file))?;
                        collection.relate(path, &related).await;
                        items.push(PopulateItem::from(path));
                    }
                    opts = opts.with_populate(items);
                }

                let filter = match filter {
                    Some(json) => Some(Filter::from_value(
                        serde_json::from_str(json).context("Invalid --filter JSON")?,
                    )?),
                    None => None,
                };

                tracing::info!(
                    collection = collection.name(),
                    visibility = %visibility,
                    "running query"
                );

                let paginator = Paginator::new(config);
                let page = match visibility {
                    Visibility::Default => paginator.paginate(&collection, filter, opts).await?,
                    Visibility::Deleted => {
                        paginator.paginate_deleted(&collection, filter, opts).await?
                    }
                    Visibility::WithDeleted => {
                        paginator
                            .paginate_with_deleted(&collection, filter, opts)
                            .await?
                    }
                };
                self.render(&page)
            }
            Commands::Config => self.render(&config),
        }
    }

    /// Load the paginator configuration, or the default one
    fn load_config(&self) -> Result<PaginatorConfig> {
        match &self.cli.config {
            Some(path) => PaginatorConfig::from_file(path),
            None => Ok(PaginatorConfig::default()),
        }
    }

    fn render<T: Serialize>(&self, value: &T) -> Result<String> {
        let output = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        Ok(output)
    }
}

/// Load a JSON array of documents into a named collection
fn load_collection(name: &str, path: &Path) -> Result<MemoryCollection> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::Io(e)
        }
    })?;
    MemoryCollection::from_json(name, &content)
        .with_context(|| format!("Invalid documents in '{}'", path.display()))
}
