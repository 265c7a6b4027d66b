use facematch_application::BatchUploadReport;

pub fn present_stats(total_faces: Option<u64>, total_searches: Option<u64>) -> String {
    format!(
        "faces={} searches={}",
        count_or_dash(total_faces),
        count_or_dash(total_searches)
    )
}

pub fn present_upload_report(report: &BatchUploadReport) -> String {
    let mut lines = vec![format!(
        "uploaded {}/{} image(s) ({} file(s) scanned, {} failed)",
        report.succeeded,
        report.total,
        report.scanned_files,
        report.failed()
    )];
    lines.extend(
        report
            .failures
            .iter()
            .map(|(file_name, error)| format!("  {file_name}\t{error}")),
    );
    lines.join("\n")
}

pub fn present_written(path: &str, container: Option<&str>) -> String {
    match container {
        Some(container) => format!("wrote {path} (#{container})"),
        None => format!("wrote {path}"),
    }
}

fn count_or_dash(value: Option<u64>) -> String {
    value
        .map(|value| value.to_string())
        .unwrap_or_else(|| "-".to_string())
}
