use crate::classifier::{classify_detailed, MatchTier};
use anyhow::Result;
use colored::*;
use std::io::Write;

/// Print the kind each identifier maps to, and which tier matched it
pub fn classify_ids(ids: &[String], out: &mut dyn Write) -> Result<()> {
    for id in ids {
        match classify_detailed(id) {
            Some(found) => {
                let tier = match found.tier {
                    MatchTier::Exact => "exact",
                    MatchTier::Keyword => "keyword",
                };
                writeln!(
                    out,
                    "{} -> {} ({}, {} XP, {} match: {})",
                    id,
                    found.kind.display_name().green(),
                    found.kind.category().display_name(),
                    found.kind.base_xp(),
                    tier,
                    found.matched_by
                )?;
            }
            None => writeln!(out, "{} -> {}", id, "unrecognized".red())?,
        }
    }
    Ok(())
}
