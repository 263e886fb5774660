pub mod csv;
pub mod json;
pub mod markdown;
pub mod terminal;

pub use csv::CsvWriter;
pub use json::JsonWriter;
pub use markdown::MarkdownWriter;
pub use terminal::TerminalWriter;

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::core::RawDetection;
    use crate::io::output::StatsExport;
    use crate::session::RefactoringSession;
    use chrono::{DateTime, Utc};

    pub fn at(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_700_000_000_000 + ms).unwrap()
    }

    /// Three renames, one extract method and one decompose conditional
    pub fn sample_export() -> StatsExport {
        let session = RefactoringSession::new(&Default::default(), at(0)).unwrap();
        let ids = [
            ("Rename", "A.kt"),
            ("Rename", "B.kt"),
            ("Rename", "C.kt"),
            ("ExtractMethod", "A.kt"),
            ("DecomposeConditional", "B.kt"),
        ];
        for (i, (id, file)) in ids.iter().enumerate() {
            session.handle(&RawDetection::new(*id).in_file(*file), at(i as i64 * 1_000));
        }
        StatsExport::from_session(&session, at(10_000))
    }
}
