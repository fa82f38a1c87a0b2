//! Mockboard command-line front end.
//!
//! Creates projects from templates, inspects project files and exports their
//! field tables without opening the editor.

use anyhow::Context;
use clap::{Parser, Subcommand};
use mockboard_core::{
    CanvasStore, Command, Editor, FileStorage, KindCategory, KindRegistry, ProjectData, ShortcutRegistry, Storage,
    field_table_csv, field_table_tsv,
};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "mockboard")]
#[command(about = "Screen mockup and process diagram projects")]
#[command(version)]
struct Cli {
    /// Directory for settings, custom templates and the default project
    #[arg(long, env = "MOCKBOARD_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Create a project file, optionally from a template
    New {
        /// Template id (see `templates`)
        #[arg(long)]
        template: Option<String>,
        /// Output project file
        #[arg(long)]
        out: PathBuf,
    },
    /// Summarize a project file
    Info { file: PathBuf },
    /// Export a project's field table
    ExportCsv {
        file: PathBuf,
        /// Write here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        /// Tab-separated instead of CSV
        #[arg(long)]
        tsv: bool,
    },
    /// List built-in and custom templates
    Templates,
    /// List element kinds
    Kinds,
    /// List keyboard shortcuts
    Shortcuts,
}

fn open_storage(data_dir: Option<PathBuf>) -> anyhow::Result<FileStorage> {
    let storage = match data_dir {
        Some(dir) => FileStorage::new(dir)?,
        None => FileStorage::default_location()?,
    };
    log::debug!("Using data directory {}", storage.base_path().display());
    Ok(storage)
}

fn read_project(path: &Path) -> anyhow::Result<CanvasStore> {
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let data = ProjectData::from_json(&json).with_context(|| format!("Invalid project {}", path.display()))?;
    let mut store = CanvasStore::default();
    store.load_project(data)?;
    Ok(store)
}

fn create_project<S: Storage>(mut editor: Editor<S>, template: Option<&str>, out: &Path) -> anyhow::Result<usize> {
    if let Some(id) = template {
        editor.load_template(id)?;
    }
    editor.execute(Command::SaveAs(out.to_path_buf()))?;
    Ok(editor.store().len())
}

fn describe_project(store: &CanvasStore) -> String {
    let settings = store.settings();
    let mut kinds: BTreeMap<&str, usize> = BTreeMap::new();
    for element in store.ordered_elements() {
        *kinds.entry(element.kind.tag()).or_default() += 1;
    }

    let mut lines = vec![
        format!("Canvas:   {} x {}", settings.width, settings.height),
        format!("Grid:     {} (snap {})", settings.grid_size, if settings.snap_to_grid { "on" } else { "off" }),
        format!("Elements: {}", store.len()),
    ];
    lines.extend(kinds.into_iter().map(|(kind, count)| format!("  {kind:16} {count}")));
    lines.join("\n")
}

fn describe_kinds(registry: &KindRegistry) -> String {
    [KindCategory::Basic, KindCategory::Input, KindCategory::Layout, KindCategory::Flow]
        .into_iter()
        .flat_map(|category| {
            let header = format!("{category:?}");
            let rows = registry.by_category(category).into_iter().map(|descriptor| {
                format!(
                    "  {:16} {:20} {}x{}",
                    descriptor.kind.tag(),
                    descriptor.display_name,
                    descriptor.default_size.width,
                    descriptor.default_size.height
                )
            });
            std::iter::once(header).chain(rows)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        CliCommand::New { template, out } => {
            let editor = Editor::with_storage(open_storage(cli.data_dir)?);
            let count = create_project(editor, template.as_deref(), &out)?;
            println!("Created {} with {} elements", out.display(), count);
        }
        CliCommand::Info { file } => {
            let store = read_project(&file)?;
            println!("{}", describe_project(&store));
        }
        CliCommand::ExportCsv { file, out, tsv } => {
            let store = read_project(&file)?;
            let table = if tsv {
                field_table_tsv(&store)
            } else {
                field_table_csv(&store)?
            };
            match out {
                Some(path) => {
                    fs::write(&path, table).with_context(|| format!("Failed to write {}", path.display()))?;
                    log::info!("Exported field table to {}", path.display());
                }
                None => print!("{table}"),
            }
        }
        CliCommand::Templates => {
            let editor = Editor::with_storage(open_storage(cli.data_dir)?);
            for template in editor.templates().all() {
                let marker = if template.is_custom { " (custom)" } else { "" };
                println!(
                    "{:20} {}{} - {} elements",
                    template.id,
                    template.name,
                    marker,
                    template.elements.len()
                );
            }
        }
        CliCommand::Kinds => println!("{}", describe_kinds(&KindRegistry::builtin())),
        CliCommand::Shortcuts => {
            println!("=== Keyboard Shortcuts ===");
            println!("{}", ShortcutRegistry::new().describe());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use mockboard_core::{EditorConfig, MemoryStorage};

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_new_then_info() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("report.mbd");
        let storage = FileStorage::new(dir.path().join("data")).unwrap();
        let editor = Editor::new(storage, EditorConfig::default());
        let count = create_project(editor, Some("report-list"), &out).unwrap();

        let store = read_project(&out).unwrap();
        assert_eq!(store.len(), count);
        let info = describe_project(&store);
        assert!(info.contains("Canvas:   1440 x 620"));
        assert!(info.contains("table"));
    }

    #[test]
    fn test_unknown_template_fails() {
        let dir = tempfile::tempdir().unwrap();
        let editor = Editor::new(MemoryStorage::new(), EditorConfig::default());
        assert!(create_project(editor, Some("nope"), &dir.path().join("x.mbd")).is_err());
    }

    #[test]
    fn test_read_invalid_project() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.mbd");
        fs::write(&path, "[]").unwrap();
        assert!(read_project(&path).is_err());
    }

    #[test]
    fn test_describe_kinds_lists_every_kind() {
        let registry = KindRegistry::builtin();
        let text = describe_kinds(&registry);
        assert!(text.starts_with("Basic"));
        assert!(text.contains("polyline-arrow"));
        assert_eq!(text.lines().count(), registry.len() + 4);
    }
}
