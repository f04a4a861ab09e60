//! Askama template structs for the two notebook artifacts.

use askama::Template;

use super::{
    LookupView, SectionView, StorageView, DELTA_HELPER_FN, FACTORY_FN, MODULE_NAME, README_TITLE,
};
use crate::error::{GeneratorError, GeneratorResult};
use crate::session::{SessionProfile, StorageBackend};

/// Whitespace-only line inside a function body of the generated module.
const PY_BLANK: &str = "    ";
/// Whitespace-only line inside a README list-item code block.
const MD_BLANK: &str = "   ";

#[derive(Template, Debug)]
#[template(path = "spark_init.py", escape = "none")]
struct SparkInitTemplate<'a> {
    factory: &'a str,
    delta_helper: &'a str,
    app_name: String,
    lookups: Vec<LookupView>,
    sections: Vec<SectionView>,
    log_level: &'a str,
    blank: &'a str,
}

#[derive(Template, Debug)]
#[template(path = "notebook_readme.md", escape = "none")]
struct ReadmeTemplate<'a> {
    title: &'a str,
    module_name: &'a str,
    factory: &'a str,
    storage: Vec<StorageView>,
    blank: &'a str,
}

/// Askama drops the final newline of a template file; restore exactly one,
/// plus the optional leading blank line.
fn finish(rendered: &str, leading_blank_line: bool) -> String {
    let body = rendered.trim_end_matches('\n');
    if leading_blank_line {
        format!("\n{body}\n")
    } else {
        format!("{body}\n")
    }
}

/// Render the importable `spark_init.py` module for `profile`.
///
/// The default profile renders the exact text notebooks have always
/// received, down to the leading blank line and indented blank lines.
pub fn render_spark_init(profile: &SessionProfile) -> GeneratorResult<String> {
    let template = SparkInitTemplate {
        factory: FACTORY_FN,
        delta_helper: DELTA_HELPER_FN,
        app_name: super::py_str(&profile.default_app_name, '"'),
        lookups: profile.lookups.iter().map(LookupView::from_lookup).collect(),
        sections: profile
            .sections
            .iter()
            .filter_map(SectionView::from_section)
            .collect(),
        log_level: &profile.log_level,
        blank: PY_BLANK,
    };

    template
        .render()
        .map(|rendered| finish(&rendered, true))
        .map_err(|e| GeneratorError::Render {
            artifact: "spark_init.py",
            message: e.to_string(),
        })
}

/// Render the usage README that accompanies the initialization module.
pub fn render_readme() -> GeneratorResult<String> {
    let template = ReadmeTemplate {
        title: README_TITLE,
        module_name: MODULE_NAME,
        factory: FACTORY_FN,
        storage: StorageBackend::ALL.into_iter().map(StorageView::from).collect(),
        blank: MD_BLANK,
    };

    template
        .render()
        .map(|rendered| finish(&rendered, false))
        .map_err(|e| GeneratorError::Render {
            artifact: "README.md",
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{AzureCredentials, ProfileSettings};

    // ── spark_init.py ───────────────────────────────────────────────

    #[test]
    fn test_spark_init_matches_fixture() {
        let output = render_spark_init(&SessionProfile::default()).unwrap();
        assert_eq!(output, include_str!("../../tests/fixtures/spark_init.py"));
    }

    #[test]
    fn test_spark_init_framing() {
        let output = render_spark_init(&SessionProfile::default()).unwrap();

        assert!(output.starts_with("\nfrom pyspark.sql import SparkSession\nimport os\nimport socket\n"));
        assert!(output.ends_with("    return DeltaTable.forPath(spark, path)\n"));
        assert!(!output.ends_with("\n\n"));
        assert!(output.contains(
            "def get_spark_session(app_name=\"JupyterHub Spark\", enable_hive=True, enable_delta=True):\n\n"
        ));
    }

    #[test]
    fn test_spark_init_blank_lines_keep_body_indent() {
        let output = render_spark_init(&SessionProfile::default()).unwrap();

        assert!(output.contains(
            "    k8s_namespace = os.environ.get('NAMESPACE', 'default')\n    \n    # Start building the Spark session\n"
        ));
        assert!(output.contains(
            "    builder = SparkSession.builder.appName(app_name)\n    \n    # Configure Kubernetes\n"
        ));
        assert!(output.contains("    from delta.tables import DeltaTable\n    \n    if spark is None:\n"));
        // the only unindented blank lines are the module-level ones
        assert_eq!(output.matches("\n\n").count(), 3);
    }

    #[test]
    fn test_spark_init_env_lookups() {
        let output = render_spark_init(&SessionProfile::default()).unwrap();

        assert!(output.contains(
            "    # Get environment variables\n    driver_host = os.environ.get('SPARK_DRIVER_HOST', socket.gethostbyname(socket.gethostname()))\n"
        ));
        assert!(output.contains(
            "    hive_metastore_uri = os.environ.get('HIVE_METASTORE_URI', 'thrift://openlake-hive-metastore:9083')\n"
        ));
    }

    #[test]
    fn test_spark_init_guarded_sections() {
        let output = render_spark_init(&SessionProfile::default()).unwrap();

        assert!(output.contains(
            "    # Configure Delta Lake if enabled\n    if enable_delta:\n        builder = builder.config(\"spark.sql.extensions\", \"io.delta.sql.DeltaSparkSessionExtension\") \\\n            .config(\"spark.sql.catalog.spark_catalog\", \"org.apache.spark.sql.delta.catalog.DeltaCatalog\")\n"
        ));
        assert!(output.contains(
            "    if enable_hive:\n        builder = builder.config(\"spark.sql.catalogImplementation\", \"hive\") \\\n            .config(\"hive.metastore.uris\", hive_metastore_uri) \\\n            .enableHiveSupport()\n"
        ));
        let delta = output.find("if enable_delta:").unwrap();
        let hive = output.find("if enable_hive:").unwrap();
        assert!(delta < hive);
    }

    #[test]
    fn test_spark_init_has_no_unresolved_template_syntax() {
        let output = render_spark_init(&SessionProfile::default()).unwrap();
        assert!(!output.contains("{{"));
        assert!(!output.contains("{%"));
    }

    #[test]
    fn test_spark_init_with_configured_azure_account() {
        let settings = ProfileSettings {
            azure: AzureCredentials {
                account_name: "lakeacct".to_string(),
                tenant_id: "0000-tenant".to_string(),
                ..AzureCredentials::default()
            },
            ..ProfileSettings::default()
        };
        let output = render_spark_init(&SessionProfile::from_settings(&settings)).unwrap();

        assert!(output.contains("account.key.lakeacct.blob.core.windows.net\", \"{account_key}\")"));
        assert!(output.contains("https://login.microsoftonline.com/0000-tenant/oauth2/token"));
        assert!(!output.contains("{account_name}"));
        assert!(output.ends_with("forPath(spark, path)\n"));
    }

    // ── README.md ───────────────────────────────────────────────────

    #[test]
    fn test_readme_matches_fixture() {
        let output = render_readme().unwrap();
        assert_eq!(output, include_str!("../../tests/fixtures/README.md"));
    }

    #[test]
    fn test_readme_storage_schemes() {
        let output = render_readme().unwrap();

        assert!(output.contains(
            "5. Access cloud storage:\n   ```python\n   # AWS S3\n   df = spark.read.csv(\"s3a://bucket-name/path/to/file.csv\")\n   \n   # Azure Blob Storage\n"
        ));
        assert!(output.ends_with(
            "   # Azure Data Lake Storage Gen2\n   df = spark.read.csv(\"abfss://container@account.dfs.core.windows.net/path/to/file.csv\")\n   ```\n"
        ));
    }

    #[test]
    fn test_finish_restores_single_trailing_newline() {
        assert_eq!(finish("body", false), "body\n");
        assert_eq!(finish("body\n", false), "body\n");
        assert_eq!(finish("body", true), "\nbody\n");
    }
}
