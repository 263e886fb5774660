use crate::io::output::{OutputWriter, StatsExport};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct JsonExport<'a> {
    export_date: String,
    player: PlayerInfo,
    category_stats: Vec<CategoryInfo>,
    active_quests: usize,
    completed_quests: usize,
    top_kinds: Vec<KindCount<'a>>,
}

#[derive(Debug, Serialize)]
struct PlayerInfo {
    level: u32,
    total_xp: u64,
    title: &'static str,
    tier: &'static str,
    total_actions: usize,
    xp_to_next_level: u64,
}

#[derive(Debug, Serialize)]
struct CategoryInfo {
    category: &'static str,
    action_count: usize,
    total_xp: u64,
    average_xp: f64,
    most_used_action: &'static str,
}

#[derive(Debug, Serialize)]
struct KindCount<'a> {
    kind: &'a str,
    count: usize,
}

impl<'a> JsonExport<'a> {
    fn from_stats(stats: &'a StatsExport) -> Self {
        let progress = &stats.progress;
        Self {
            export_date: stats.export_date.to_rfc3339(),
            player: PlayerInfo {
                level: progress.level,
                total_xp: progress.total_xp,
                title: progress.title,
                tier: progress.tier.name(),
                total_actions: progress.action_count,
                xp_to_next_level: progress.xp_to_next_level(),
            },
            category_stats: progress
                .category_stats
                .values()
                .map(|cat| CategoryInfo {
                    category: cat.category.display_name(),
                    action_count: cat.action_count,
                    total_xp: cat.total_xp,
                    average_xp: cat.average_xp(),
                    most_used_action: cat
                        .most_frequent_kind
                        .map(|kind| kind.display_name())
                        .unwrap_or("N/A"),
                })
                .collect(),
            active_quests: stats.active_quests.len(),
            completed_quests: stats.completed_quests.len(),
            top_kinds: stats
                .top_kinds
                .iter()
                .map(|(kind, count)| KindCount {
                    kind: kind.id(),
                    count: *count,
                })
                .collect(),
        }
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_stats(&mut self, stats: &StatsExport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&JsonExport::from_stats(stats))?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::writers::fixtures::sample_export;

    #[test]
    fn test_json_export_shape() {
        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer)
            .write_stats(&sample_export())
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

        // 37 from actions plus 100 for "First Steps"
        assert_eq!(value["player"]["total_xp"], 137);
        assert_eq!(value["completed_quests"], 1);
        assert_eq!(value["player"]["level"], 1);
        assert_eq!(value["player"]["total_actions"], 5);
        assert_eq!(value["category_stats"].as_array().unwrap().len(), 4);
        assert_eq!(value["category_stats"][0]["category"], "Code Structure");
        assert_eq!(value["category_stats"][0]["most_used_action"], "Rename");
        assert_eq!(value["top_kinds"][0]["kind"], "RENAME");
        assert_eq!(value["top_kinds"][0]["count"], 3);
    }
}
