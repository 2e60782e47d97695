//! Plain-text rendering of views for the terminal

use crate::index::SessionIndex;
use crate::view::render::{ChamberView, LevelView, OpponentCard, SessionView};
use std::fmt;

const UNKNOWN_OPPONENT: &str = "Unknown opponent";
const NO_DESCRIPTION: &str = "No description.";

/// Format a number without a trailing `.0` when it is whole
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

impl fmt::Display for OpponentCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "      {} (Lv {}) x{}",
            self.name.as_deref().unwrap_or(UNKNOWN_OPPONENT),
            format_number(self.level),
            format_number(self.qty)
        )?;
        writeln!(
            f,
            "        HP: {}  ATK: {}  DEF: {}",
            self.computed_hp, self.computed_atk, self.computed_def
        )?;
        writeln!(
            f,
            "        {}",
            self.description.as_deref().unwrap_or(NO_DESCRIPTION)
        )
    }
}

impl fmt::Display for ChamberView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Chamber {}  |  Total HP: {}  |  Cycles: {}",
            self.index,
            self.total_hp,
            format_number(self.total_cycles)
        )?;
        for sector in &self.sectors {
            writeln!(f, "  Sector {}", sector.index)?;
            for wave in &sector.waves {
                writeln!(f, "    {}", wave.label)?;
                for card in &wave.opponents {
                    write!(f, "{}", card)?;
                }
            }
        }
        if let Some(challenges) = &self.challenges {
            writeln!(f, "  Objectives")?;
            for line in challenges {
                writeln!(f, "    * {}", line)?;
            }
        }
        if let Some(rewards) = &self.rewards {
            writeln!(f, "  Rewards")?;
            for reward in rewards {
                writeln!(f, "    {} x{}", reward.name, reward.qty)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for LevelView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Level {} [{}]", self.number, self.type_label.to_uppercase())?;
        if self.seasonal {
            write!(f, " (seasonal)")?;
        }
        writeln!(f)?;
        if let Some(buff) = &self.level_buff {
            writeln!(f, "Level buff: {}", buff)?;
        }
        for chamber in &self.chambers {
            writeln!(f)?;
            write!(f, "{}", chamber)?;
        }
        Ok(())
    }
}

impl fmt::Display for SessionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.buffs.name {
            Some(name) => writeln!(f, "{}: {}", name, self.buffs.text)?,
            None => writeln!(f, "{}", self.buffs.text)?,
        }
        let buttons: Vec<String> = self
            .levels
            .iter()
            .map(|b| {
                let marker = if b.active { "*" } else { "" };
                format!("{}{}{}", marker, b.key, if b.seasonal { "s" } else { "" })
            })
            .collect();
        writeln!(f, "Levels: {}", buttons.join(" "))?;
        writeln!(f)?;
        write!(f, "{}", self.selected)
    }
}

/// Session list as shown in the session picker
pub fn index_to_text(index: &SessionIndex) -> String {
    if index.is_empty() {
        return "No sessions".to_string();
    }
    index
        .descriptors
        .iter()
        .map(|d| format!("{} ({})", d, d.file_ref))
        .collect::<Vec<_>>()
        .join("\n")
}
