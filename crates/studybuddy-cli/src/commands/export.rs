use std::path::PathBuf;

use studybuddy_core::{export, Database, SessionHistory};

pub fn run(output: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let records = SessionHistory::new(&db).records()?;
    if records.is_empty() {
        eprintln!("No session data to export.");
        std::process::exit(1);
    }

    let csv = export::to_csv(&records);
    match output {
        Some(path) => {
            std::fs::write(&path, csv)?;
            println!("exported {} sessions to {}", records.len(), path.display());
        }
        None => print!("{csv}"),
    }
    Ok(())
}
