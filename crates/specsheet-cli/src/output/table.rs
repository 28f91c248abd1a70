use specsheet_core::batch::{BatchReport, FileStatus};
use specsheet_core::schema::CanonicalRecord;

pub fn print_report(report: &BatchReport) {
    let max_name = report
        .files
        .iter()
        .map(|f| f.file.len())
        .max()
        .unwrap_or(10);

    for file in &report.files {
        let status = match &file.status {
            FileStatus::Extracted { records } => format!("ok      {records} record(s)"),
            FileStatus::Skipped { reason } => format!("skipped {reason}"),
            FileStatus::Failed { reason } => format!("FAILED  {reason}"),
        };
        println!("  {:<width$}  {}", file.file, status, width = max_name);
    }
    println!();

    println!(
        "  {} extracted, {} skipped, {} failed; {} record(s) appended",
        report.extracted(),
        report.skipped(),
        report.failed(),
        report.records_written
    );
    for path in &report.outputs {
        println!("  wrote {}", path.display());
    }
}

pub fn print_records(records: &[CanonicalRecord]) {
    let max_key = records
        .first()
        .map(|r| r.keys().iter().map(|k| k.len()).max().unwrap_or(10))
        .unwrap_or(10);

    for (i, record) in records.iter().enumerate() {
        if records.len() > 1 {
            if i > 0 {
                println!();
            }
            println!("--- Record {} of {} ---\n", i + 1, records.len());
        }
        for (field, value) in record.iter() {
            println!("  {:<width$}  {}", field.name(), value, width = max_key);
        }
    }
}
