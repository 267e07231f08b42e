// quackrun-core/src/domain/preset.rs

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

pub const DEFAULT_QUERY: &str = "SELECT * FROM main_staging.stg_sales_fact LIMIT 5";
pub const DEFAULT_EXPORT_PATH: &str = "qoqtrend.csv";

/// Default export: quarter-over-quarter growth per category, header row, comma delimited.
pub fn export_sql(output_path: &str) -> String {
    format!(
        "COPY (SELECT order_month_date, category_name, qoq_growth_rate \
         FROM main_marts.mart_seasonal_patterns \
         WHERE qoq_growth_rate IS NOT NULL) TO '{}' (HEADER, DELIMITER ',')",
        output_path.replace('\'', "''")
    )
}

/// How a step's result is printed.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StepDisplay {
    /// Full row/column table.
    #[default]
    Table,
    /// First cell only, printed as `label value`.
    Scalar,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct QueryStep {
    /// Blank lines printed before the heading.
    #[serde(default)]
    pub gap: usize,
    /// Line printed before the step's output.
    #[serde(default)]
    pub heading: Option<String>,
    /// Prefix for scalar output.
    #[serde(default)]
    pub label: Option<String>,
    pub sql: String,
    #[serde(default)]
    pub display: StepDisplay,
}

impl QueryStep {
    pub fn table(sql: impl Into<String>) -> Self {
        Self {
            gap: 0,
            heading: None,
            label: None,
            sql: sql.into(),
            display: StepDisplay::Table,
        }
    }

    pub fn scalar(label: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            gap: 0,
            heading: None,
            label: Some(label.into()),
            sql: sql.into(),
            display: StepDisplay::Scalar,
        }
    }

    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    pub fn with_gap(mut self, blank_lines: usize) -> Self {
        self.gap = blank_lines;
        self
    }
}

/// A named sequence of steps, run in order over one connection.
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub name: String,
    pub description: String,
    pub steps: Vec<QueryStep>,
    pub builtin: bool,
}

impl Preset {
    fn builtin(name: &str, description: &str, steps: Vec<QueryStep>) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            steps,
            builtin: true,
        }
    }
}

fn count_sql(relation: &str) -> String {
    format!("SELECT COUNT(*) FROM {}", relation)
}

/// The built-in presets, one per helper script of the dbt project.
pub fn builtin_presets(output_path: &str) -> Vec<Preset> {
    vec![
        Preset::builtin(
            "query",
            "Sample of the staging sales fact table",
            vec![QueryStep::table(DEFAULT_QUERY)],
        ),
        Preset::builtin(
            "export",
            "Export quarter-over-quarter growth rates to CSV",
            vec![QueryStep::table(export_sql(output_path))],
        ),
        Preset::builtin(
            "list-contents",
            "List every table and schema in the database",
            vec![
                QueryStep::table("SHOW ALL TABLES"),
                QueryStep::table("SELECT * FROM information_schema.schemata")
                    .with_heading("Printing the SQL schemas:"),
            ],
        ),
        Preset::builtin(
            "top-customers",
            "Top customers by spend and the order-count distribution",
            vec![
                QueryStep::table(
                    "SELECT customer_name, total_orders, lifetime_net_amount, avg_order_value \
                     FROM main_intermediate.int_customer_aggregates \
                     ORDER BY lifetime_net_amount DESC \
                     LIMIT 5",
                )
                .with_heading("Top 5 customers by total spend:"),
                QueryStep::table(
                    "SELECT total_orders, COUNT(*) AS customer_count \
                     FROM main_intermediate.int_customer_aggregates \
                     GROUP BY total_orders \
                     ORDER BY total_orders",
                )
                .with_heading("Orders distribution:")
                .with_gap(2),
            ],
        ),
        Preset::builtin(
            "counts",
            "Row counts of the intermediate and staging models",
            vec![
                QueryStep::scalar(
                    "int_customer_aggregates count:",
                    count_sql("main_intermediate.int_customer_aggregates"),
                )
                .with_heading("Intermediate Data Counts:"),
                QueryStep::scalar(
                    "int_sales_enriched count:",
                    count_sql("main_intermediate.int_sales_enriched"),
                ),
                QueryStep::scalar("stg_sales_fact:", count_sql("main_staging.stg_sales_fact"))
                    .with_heading("Source Data Counts:"),
                QueryStep::scalar("stg_customer:", count_sql("main_staging.stg_customer")),
                QueryStep::scalar("stg_product:", count_sql("main_staging.stg_product")),
                QueryStep::scalar(
                    "stg_product_category:",
                    count_sql("main_staging.stg_product_category"),
                ),
            ],
        ),
    ]
}

/// Built-in presets plus the ones declared in the configuration file.
#[derive(Debug, Clone, Default)]
pub struct PresetCatalog {
    presets: Vec<Preset>,
}

impl PresetCatalog {
    pub fn builtin(output_path: &str) -> Self {
        Self {
            presets: builtin_presets(output_path),
        }
    }

    /// Adds a user preset. Built-in names cannot be shadowed.
    pub fn add_user(
        &mut self,
        name: &str,
        description: &str,
        steps: Vec<QueryStep>,
    ) -> Result<(), DomainError> {
        if self.presets.iter().any(|p| p.name == name) {
            return Err(DomainError::DuplicatePreset(name.to_string()));
        }
        self.presets.push(Preset {
            name: name.to_string(),
            description: description.to_string(),
            steps,
            builtin: false,
        });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&Preset, DomainError> {
        let preset = self
            .presets
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| DomainError::UnknownPreset(name.to_string()))?;
        if preset.steps.is_empty() {
            return Err(DomainError::EmptyPreset(name.to_string()));
        }
        Ok(preset)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_export_sql_embeds_escaped_target() {
        let sql = export_sql("it's.csv");
        assert!(sql.contains("TO 'it''s.csv'"));
        assert!(sql.contains("HEADER, DELIMITER ','"));
    }

    #[test]
    fn test_builtin_lookup() -> Result<()> {
        let catalog = PresetCatalog::builtin(DEFAULT_EXPORT_PATH);
        let counts = catalog.get("counts")?;
        assert_eq!(counts.steps.len(), 6);
        assert!(counts.steps.iter().all(|s| s.display == StepDisplay::Scalar));

        let export = catalog.get("export")?;
        assert!(export.steps[0].sql.contains("'qoqtrend.csv'"));
        Ok(())
    }

    #[test]
    fn test_unknown_preset() {
        let catalog = PresetCatalog::builtin(DEFAULT_EXPORT_PATH);
        assert!(matches!(
            catalog.get("nope"),
            Err(DomainError::UnknownPreset(name)) if name == "nope"
        ));
    }

    #[test]
    fn test_user_preset_cannot_shadow_builtin() {
        let mut catalog = PresetCatalog::builtin(DEFAULT_EXPORT_PATH);
        assert!(matches!(
            catalog.add_user("counts", "", vec![]),
            Err(DomainError::DuplicatePreset(name)) if name == "counts"
        ));
        catalog
            .add_user("mine", "custom", vec![QueryStep::table("SELECT 1")])
            .unwrap();
        assert!(!catalog.get("mine").unwrap().builtin);
    }

    #[test]
    fn test_empty_user_preset_is_rejected_on_lookup() {
        let mut catalog = PresetCatalog::default();
        catalog.add_user("empty", "", vec![]).unwrap();
        assert!(matches!(
            catalog.get("empty"),
            Err(DomainError::EmptyPreset(_))
        ));
    }

    #[test]
    fn test_step_deserialization_defaults_to_table() -> Result<()> {
        let step: QueryStep = serde_yaml::from_str("sql: SELECT 1")?;
        assert_eq!(step.display, StepDisplay::Table);
        assert!(step.heading.is_none());
        assert_eq!(step.gap, 0);

        let scalar: QueryStep =
            serde_yaml::from_str("sql: SELECT 1\ndisplay: scalar\nlabel: 'one:'")?;
        assert_eq!(scalar.display, StepDisplay::Scalar);
        assert_eq!(scalar.label.as_deref(), Some("one:"));
        Ok(())
    }
}
