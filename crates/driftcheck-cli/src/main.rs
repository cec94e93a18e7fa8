//! Driftcheck Command-Line Tool
//!
//! Compares a declared model with a discovered database schema, both given
//! as JSON files, and reports every difference.

mod formatter;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use driftcheck_core::{
    CompareConfig, DatabaseModel, DeclaredModel, ModelComparer, NameComparison, ProviderKind,
};
use formatter::OutputFormat;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Driftcheck Command-Line Tool
#[derive(Parser, Debug)]
#[command(name = "driftcheck")]
#[command(version, about = "Check a declared model against a database schema")]
pub struct Args {
    /// Declared model (JSON)
    #[arg(short = 'm', long)]
    pub model: PathBuf,

    /// Discovered database schema (JSON)
    #[arg(short = 'd', long)]
    pub database: PathBuf,

    /// Database provider
    #[arg(short = 'p', long, default_value = "sql-server", value_enum)]
    pub provider: ProviderArg,

    /// Output format
    #[arg(long, default_value = "text", value_enum)]
    pub format: OutputFormat,

    /// Match table, column and constraint names ignoring case
    #[arg(long)]
    pub ignore_case: bool,

    /// Tables never reported as extra (`schema.table` or `table`)
    #[arg(long, value_delimiter = ',')]
    pub ignore_tables: Vec<String>,

    /// Report tables no entity maps to
    #[arg(long)]
    pub report_extra_tables: bool,

    /// Report columns no property maps to
    #[arg(long)]
    pub report_extra_columns: bool,

    /// Do not compare indexes
    #[arg(long)]
    pub skip_indexes: bool,

    /// Do not compare foreign keys
    #[arg(long)]
    pub skip_foreign_keys: bool,
}

/// Database provider selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderArg {
    /// Microsoft SQL Server
    SqlServer,
    /// PostgreSQL
    Postgres,
    /// SQLite
    Sqlite,
}

impl From<ProviderArg> for ProviderKind {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::SqlServer => ProviderKind::SqlServer,
            ProviderArg::Postgres => ProviderKind::Postgres,
            ProviderArg::Sqlite => ProviderKind::Sqlite,
        }
    }
}

impl Args {
    /// Build the comparison configuration from the flags.
    pub fn to_config(&self) -> CompareConfig {
        let mut config = CompareConfig::new();
        if self.ignore_case {
            config = config.with_name_comparison(NameComparison::IgnoreCase);
        }
        for table in &self.ignore_tables {
            config = config.ignore_table(table.trim());
        }
        if self.report_extra_tables {
            config = config.with_extra_tables();
        }
        if self.report_extra_columns {
            config = config.with_extra_columns();
        }
        if self.skip_indexes {
            config = config.without_indexes();
        }
        if self.skip_foreign_keys {
            config = config.without_foreign_keys();
        }
        config
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("driftcheck=info")),
        )
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(report) => {
            println!("{}", report.output);
            if report.has_errors {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Result of one invocation.
#[derive(Debug)]
struct Report {
    /// Whether the comparison found differences.
    has_errors: bool,
    /// The formatted report.
    output: String,
}

fn run(args: &Args) -> anyhow::Result<Report> {
    let model = load_model(&args.model)?;
    let database = load_database(&args.database)?;
    let provider = ProviderKind::from(args.provider).provider();

    tracing::info!(
        model = %model.name,
        provider = provider.name(),
        "comparing {} against {}",
        args.model.display(),
        args.database.display()
    );

    let mut comparer = ModelComparer::new(&model, provider.as_ref()).with_config(args.to_config());
    let has_errors = comparer
        .compare_model_to_database(&database)
        .context("comparison failed")?;

    let formatter = formatter::create_formatter(args.format);
    Ok(Report {
        has_errors,
        output: formatter.format_report(comparer.logs())?,
    })
}

fn load_model(path: &Path) -> anyhow::Result<DeclaredModel> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read model file {}", path.display()))?;
    DeclaredModel::from_json(&json)
        .with_context(|| format!("failed to parse model file {}", path.display()))
}

fn load_database(path: &Path) -> anyhow::Result<DatabaseModel> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read database file {}", path.display()))?;
    DatabaseModel::from_json(&json)
        .with_context(|| format!("failed to parse database file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use driftcheck_core::{
        ColumnDef, EntityDef, KeyDef, PrimaryKeyConstraint, PropertyDef, ScalarType, TableDef,
        TableName, ValueGenerated,
    };
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    struct TestFiles {
        dir: TempDir,
    }

    impl TestFiles {
        fn new() -> Self {
            Self {
                dir: tempfile::tempdir().unwrap(),
            }
        }

        fn write(&self, name: &str, contents: &str) -> PathBuf {
            let path = self.dir.path().join(name);
            std::fs::write(&path, contents).unwrap();
            path
        }
    }

    fn model(nullable_string: bool) -> DeclaredModel {
        DeclaredModel::new("MyEntityDbContext").with_entity(
            EntityDef::new("MyEntity", TableName::new("MyEntities"))
                .with_property(
                    PropertyDef::new("MyEntityId", ScalarType::Int32)
                        .with_value_generated(ValueGenerated::OnAdd),
                )
                .with_property(
                    PropertyDef::new("MyString", ScalarType::String).with_nullable(nullable_string),
                )
                .with_primary_key(KeyDef::new(["MyEntityId"])),
        )
    }

    fn database() -> DatabaseModel {
        DatabaseModel::new().with_table(
            TableDef::new("MyEntities")
                .in_schema("dbo")
                .with_column(ColumnDef::new("MyEntityId", "int").identity())
                .with_column(ColumnDef::new("MyString", "nvarchar(max)").nullable())
                .with_column(ColumnDef::new("Legacy", "int").nullable())
                .with_primary_key(PrimaryKeyConstraint::new("PK_MyEntities", ["MyEntityId"])),
        )
    }

    fn args(files: &TestFiles, model: &DeclaredModel, extra: &[&str]) -> Args {
        let model_path = files.write("model.json", &model.to_json().unwrap());
        let database_path = files.write("database.json", &database().to_json().unwrap());
        let mut argv = vec![
            "driftcheck".to_string(),
            "--model".to_string(),
            model_path.display().to_string(),
            "--database".to_string(),
            database_path.display().to_string(),
        ];
        argv.extend(extra.iter().map(|s| s.to_string()));
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_clean_comparison() {
        let files = TestFiles::new();
        let report = run(&args(&files, &model(true), &[])).unwrap();

        assert!(!report.has_errors);
        assert_eq!(report.output, "No differences found");
    }

    #[test]
    fn test_differences_are_reported() {
        let files = TestFiles::new();
        let report = run(&args(&files, &model(false), &[])).unwrap();

        assert!(report.has_errors);
        assert_eq!(
            report.output,
            "DIFFERENT: MyEntity->Property 'MyString', nullability. Expected = NOT NULL, found = NULL\n1 difference found"
        );
    }

    #[test]
    fn test_flags_reach_config() {
        let files = TestFiles::new();
        let args = args(
            &files,
            &model(true),
            &[
                "--provider",
                "postgres",
                "--format",
                "json",
                "--ignore-case",
                "--ignore-tables",
                "__EFMigrationsHistory, audit.Log",
                "--report-extra-tables",
                "--report-extra-columns",
                "--skip-indexes",
                "--skip-foreign-keys",
            ],
        );

        assert_eq!(args.provider, ProviderArg::Postgres);
        assert_eq!(args.format, OutputFormat::Json);
        let config = args.to_config();
        assert_eq!(config.name_comparison, NameComparison::IgnoreCase);
        assert_eq!(
            config.tables_to_ignore,
            vec!["__EFMigrationsHistory".to_string(), "audit.Log".to_string()]
        );
        assert!(config.report_extra_tables);
        assert!(config.report_extra_columns);
        assert!(!config.check_indexes);
        assert!(!config.check_foreign_keys);
    }

    #[test]
    fn test_extra_columns_flag() {
        let files = TestFiles::new();
        let report = run(&args(&files, &model(true), &["--report-extra-columns"])).unwrap();

        assert!(report.has_errors);
        assert!(report
            .output
            .starts_with("EXTRA IN DATABASE: MyEntity->Column 'Legacy', column name."));
    }

    #[test]
    fn test_missing_file() {
        let files = TestFiles::new();
        let mut args = args(&files, &model(true), &[]);
        args.model = files.dir.path().join("missing.json");

        let err = run(&args).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to read model file"));
    }

    #[test]
    fn test_invalid_json() {
        let files = TestFiles::new();
        let mut args = args(&files, &model(true), &[]);
        args.database = files.write("broken.json", "{ not json");

        let err = run(&args).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to parse database file"));
    }

    #[test]
    fn test_invalid_model() {
        let files = TestFiles::new();
        let mut broken = model(true);
        broken.entities[0].primary_key = Some(KeyDef::new(["Missing"]));

        let err = run(&args(&files, &broken, &[])).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("comparison failed"));
        assert!(message.contains("unknown property 'Missing'"));
    }

    #[test]
    fn test_provider_mapping() {
        assert_eq!(ProviderKind::from(ProviderArg::SqlServer), ProviderKind::SqlServer);
        assert_eq!(ProviderKind::from(ProviderArg::Sqlite), ProviderKind::Sqlite);
    }
}
