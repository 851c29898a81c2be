use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use recipe_core::matcher;
use recipe_core::normalize::filename_slug;
use recipe_core::persist::{load_stats, save_corpus_index, IndexHandle, IndexPaths};
use recipe_core::{FsRecordResolver, IndexBuilder, RecipeRecord};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "recipe-indexer")]
#[command(about = "Build and query the recipe inverted index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index from a directory of recipe JSON files
    Build {
        /// Directory containing one JSON file per recipe
        #[arg(long)]
        recipes: String,
        /// Output index directory
        #[arg(long)]
        output: String,
    },
    /// Run a weighted query against a built index
    Search {
        /// Index directory
        #[arg(long)]
        index: String,
        /// Primary term: the dish name
        #[arg(long)]
        name: String,
        /// Secondary terms: visible ingredients (repeatable)
        #[arg(long = "ingredient")]
        ingredients: Vec<String>,
        /// Recipes directory; when given, candidates are expanded to full
        /// records
        #[arg(long)]
        recipes: Option<String>,
    },
    /// Print the statistics of a built index
    Stats {
        /// Index directory
        #[arg(long)]
        index: String,
    },
    /// Split a monolithic recipes JSON into the one-file-per-recipe corpus
    /// layout that `build` consumes
    Split {
        /// JSON file with a top-level "recipes" array
        #[arg(long)]
        input: String,
        /// Output corpus directory
        #[arg(long)]
        output: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { recipes, output } => build_index(&recipes, &output),
        Commands::Search { index, name, ingredients, recipes } => {
            run_search(&index, &name, &ingredients, recipes.as_deref())
        }
        Commands::Stats { index } => print_stats(&index),
        Commands::Split { input, output } => split_corpus(&input, &output),
    }
}

fn build_index(recipes: &str, output: &str) -> Result<()> {
    let mut files = recipe_files(Path::new(recipes));
    // Fixed processing order keeps frequency-rank ties reproducible.
    files.sort();

    let mut builder = IndexBuilder::new();
    for path in &files {
        let id = match path.file_name().and_then(|n| n.to_str()) {
            Some(id) => id.to_string(),
            None => {
                let lossy = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                tracing::warn!(id = %lossy, "skipping file with a non-UTF-8 name");
                builder.add_malformed(&lossy);
                continue;
            }
        };
        match fs::read_to_string(path) {
            Ok(raw) => builder.add_json(&id, &raw),
            Err(err) => {
                tracing::warn!(%id, %err, "skipping unreadable document");
                builder.add_malformed(&id);
            }
        }
    }

    let corpus = builder.finish();
    save_corpus_index(&IndexPaths::new(output), &corpus)?;
    tracing::info!(output, files = files.len(), "build finished");
    Ok(())
}

fn recipe_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|s| s.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        })
        .map(|e| e.into_path())
        .collect()
}

fn run_search(
    index_dir: &str,
    name: &str,
    ingredients: &[String],
    recipes: Option<&str>,
) -> Result<()> {
    let handle = IndexHandle::load(&IndexPaths::new(index_dir))?;
    let snapshot = handle.snapshot();

    let output = match recipes {
        Some(recipes_dir) => {
            let resolver = FsRecordResolver::new(recipes_dir);
            let hits = matcher::search_and_resolve(name, ingredients, &snapshot.index, &resolver);
            serde_json::to_string_pretty(&hits)?
        }
        None => {
            let hits = matcher::search(name, ingredients, &snapshot.index);
            serde_json::to_string_pretty(&hits)?
        }
    };
    println!("{output}");
    Ok(())
}

fn print_stats(index_dir: &str) -> Result<()> {
    let stats = load_stats(&IndexPaths::new(index_dir))?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

/// Write each entry of the input's "recipes" array to its own file, named
/// `<position>_<slugged title>.json` so the corpus sorts in source order.
fn split_corpus(input: &str, output: &str) -> Result<()> {
    let raw = fs::read_to_string(input).with_context(|| format!("reading {input}"))?;
    let data: serde_json::Value = serde_json::from_str(&raw)?;
    let recipes = data
        .get("recipes")
        .and_then(serde_json::Value::as_array)
        .with_context(|| format!("{input} has no top-level \"recipes\" array"))?;

    fs::create_dir_all(output)?;
    for (idx, value) in recipes.iter().enumerate() {
        let record: RecipeRecord = serde_json::from_value(value.clone())
            .with_context(|| format!("recipe {} does not parse", idx + 1))?;
        let filename = format!("{}_{}.json", idx + 1, filename_slug(record.title()));
        let path = Path::new(output).join(&filename);
        fs::write(&path, serde_json::to_string_pretty(value)?)?;
        tracing::debug!(file = %path.display(), "wrote recipe");
    }
    tracing::info!(output, recipes = recipes.len(), "split finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipe_core::persist::load_index;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn build_indexes_a_corpus_directory() {
        let corpus = tempdir().unwrap();
        let out = tempdir().unwrap();
        fs::write(
            corpus.path().join("1_tagine.json"),
            r#"{"name": "Chicken Tagine", "ingredients": ["chicken", "olives"]}"#,
        )
        .unwrap();
        fs::write(corpus.path().join("2_broken.json"), "{ not json").unwrap();

        build_index(corpus.path().to_str().unwrap(), out.path().to_str().unwrap()).unwrap();

        let paths = IndexPaths::new(out.path());
        let index = load_index(&paths).unwrap();
        assert_eq!(index.get("tagin"), Some(&["1_tagine.json".to_string()][..]));
        let stats = load_stats(&paths).unwrap();
        assert_eq!(stats.malformed_files, vec!["2_broken.json".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn build_survives_a_non_utf8_file_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let corpus = tempdir().unwrap();
        let out = tempdir().unwrap();
        fs::write(
            corpus.path().join("1_harira.json"),
            r#"{"name": "Harira", "ingredients": ["lentils"]}"#,
        )
        .unwrap();
        let bad_name = OsStr::from_bytes(b"2_caf\xe9.json");
        fs::write(corpus.path().join(bad_name), r#"{"name": "Cafe"}"#).unwrap();

        build_index(corpus.path().to_str().unwrap(), out.path().to_str().unwrap()).unwrap();

        let paths = IndexPaths::new(out.path());
        let index = load_index(&paths).unwrap();
        assert_eq!(index.get("harira"), Some(&["1_harira.json".to_string()][..]));
        let stats = load_stats(&paths).unwrap();
        assert_eq!(stats.malformed_files.len(), 1);
        assert!(stats.malformed_files[0].contains("caf"));
    }

    #[test]
    fn split_writes_numbered_slugged_files() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("recipes.json");
        let out = dir.path().join("corpus");
        fs::write(
            &input,
            r#"{"recipes": [
                {"name": "Crème Brûlée", "ingredients": ["cream"]},
                {"name": "Chicken & Olive Tagine", "ingredients": ["chicken"]}
            ]}"#,
        )
        .unwrap();

        split_corpus(input.to_str().unwrap(), out.to_str().unwrap()).unwrap();

        let first = fs::read_to_string(out.join("1_creme_brulee.json")).unwrap();
        let record: RecipeRecord = serde_json::from_str(&first).unwrap();
        assert_eq!(record.title(), "Crème Brûlée");
        assert!(out.join("2_chicken__olive_tagine.json").exists());
    }

    #[test]
    fn split_rejects_input_without_a_recipes_array() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("recipes.json");
        fs::write(&input, r#"{"dishes": []}"#).unwrap();
        let out = dir.path().join("corpus");
        assert!(split_corpus(input.to_str().unwrap(), out.to_str().unwrap()).is_err());
    }
}
