use crate::utils::error::{ResolverError, Result};
use std::ops::RangeInclusive;
use std::path::Path;
use url::Url;

pub const REPORT_FORMATS: [&str; 2] = ["json", "csv"];

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> ResolverError {
    ResolverError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// 解析 http(s) 端點；回傳的 `Url` 可直接當作 base 再接 path
pub fn parse_endpoint(field: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| invalid(field, raw, format!("Invalid URL format: {}", e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(field, raw, format!("Unsupported URL scheme: {}", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid(field, raw, "URL has no host"));
    }
    Ok(url)
}

pub fn validate_url(field: &str, raw: &str) -> Result<()> {
    parse_endpoint(field, raw).map(|_| ())
}

/// 報告輸出目錄：可以尚未存在，但不能是既有的檔案
pub fn validate_output_dir(field: &str, dir: &str) -> Result<()> {
    if dir.trim().is_empty() || dir.contains('\0') {
        return Err(invalid(field, dir, "Output directory must be a non-empty path"));
    }
    if Path::new(dir).is_file() {
        return Err(invalid(field, dir, "Output directory points to an existing file"));
    }
    Ok(())
}

pub fn validate_non_empty_string(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, value, "Value cannot be empty or whitespace-only"));
    }
    Ok(())
}

pub fn validate_range<T>(field: &str, value: T, bounds: RangeInclusive<T>) -> Result<()>
where
    T: PartialOrd + std::fmt::Display,
{
    if !bounds.contains(&value) {
        let reason = format!("Value must be between {} and {}", bounds.start(), bounds.end());
        return Err(invalid(field, value, reason));
    }
    Ok(())
}

pub fn validate_formats(field: &str, formats: &[String]) -> Result<()> {
    if formats.is_empty() {
        return Err(invalid(field, "", "At least one report format is required"));
    }
    match formats.iter().find(|f| !REPORT_FORMATS.contains(&f.as_str())) {
        Some(unknown) => Err(invalid(
            field,
            unknown,
            format!("Unsupported format. Valid formats: {}", REPORT_FORMATS.join(", ")),
        )),
        None => Ok(()),
    }
}
