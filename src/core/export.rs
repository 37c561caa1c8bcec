use crate::domain::model::{BatchReport, Layer};
use crate::domain::ports::Storage;
use crate::utils::error::{ResolverError, Result};

pub const JSON_REPORT_FILE: &str = "resolution_report.json";
pub const CSV_REPORT_FILE: &str = "resolution_report.csv";

const CSV_HEADER: [&str; 6] = [
    "email",
    "profile_url",
    "succeeded_layers",
    "failed_layers",
    "confidence",
    "error",
];

fn join_layers(layers: &[Layer]) -> String {
    layers
        .iter()
        .map(|layer| layer.label())
        .collect::<Vec<_>>()
        .join(";")
}

pub fn report_to_csv(report: &BatchReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for record in &report.results {
        let succeeded = join_layers(&record.succeeded_layers);
        let failed = join_layers(&record.failed_layers);
        let confidence = record.confidence.to_string();
        writer.write_record([
            record.email.as_str(),
            record.profile_url.as_deref().unwrap_or(""),
            succeeded.as_str(),
            failed.as_str(),
            confidence.as_str(),
            record.error.as_deref().unwrap_or(""),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ResolverError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| ResolverError::ParseError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}

/// 依指定格式寫出報告，回傳寫入的檔名
pub async fn write_report<S: Storage>(
    storage: &S,
    report: &BatchReport,
    formats: &[String],
) -> Result<Vec<String>> {
    let mut written = Vec::new();

    for format in formats {
        match format.as_str() {
            "json" => {
                let json = serde_json::to_string_pretty(report)?;
                storage.write_file(JSON_REPORT_FILE, json.as_bytes()).await?;
                written.push(JSON_REPORT_FILE.to_string());
            }
            "csv" => {
                let csv = report_to_csv(report)?;
                storage.write_file(CSV_REPORT_FILE, csv.as_bytes()).await?;
                written.push(CSV_REPORT_FILE.to_string());
            }
            other => {
                return Err(ResolverError::InvalidConfigValueError {
                    field: "formats".to_string(),
                    value: other.to_string(),
                    reason: "Unsupported format. Valid formats: json, csv".to_string(),
                });
            }
        }
    }

    tracing::debug!("Report written as {:?}", written);
    Ok(written)
}
