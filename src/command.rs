//! Chat command parsing and reply formatting.

use crate::lookup::LookupCache;
use crate::resolve::NameDistance;
use crate::types::Record;

pub const POKE_PREFIX: &str = "!poke ";
pub const FLEECEBOT: &str = "!fleecebot";
pub const FLEECEBOT_REPLY: &str = "Looking for @themetalfleece 👀";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Poke { name: String },
    Fleecebot,
}

/// Parse one chat line. `!fleecebot` must be the whole line; `!poke` needs a
/// non-empty argument. Anything else yields `None`.
pub fn parse(text: &str) -> Option<Command> {
    if text == FLEECEBOT {
        return Some(Command::Fleecebot);
    }

    let rest = text.strip_prefix(POKE_PREFIX)?;
    let name = rest.trim();
    if name.is_empty() {
        return None;
    }
    Some(Command::Poke { name: name.to_owned() })
}

pub fn format_reply(record: &Record) -> String {
    let stats: Vec<String> = record.base_stats.iter().map(u32::to_string).collect();
    format!(
        "#{} {} - {} - Base stats: {} - Abilities: {}",
        record.national_dex_number,
        record.name,
        record.types.join("/"),
        stats.join("/"),
        record.abilities.join("/"),
    )
}

/// Reply text for a chat line, if any is due.
pub fn respond<D>(cache: &LookupCache<D>, text: &str) -> Option<String>
where
    D: NameDistance + Send + Sync + 'static,
{
    match parse(text)? {
        Command::Poke { name } => {
            if !cache.is_ready() {
                tracing::debug!(%name, "lookup before first load, ignoring");
                return None;
            }
            cache.get_by_name(&name).map(|record| format_reply(&record))
        }
        Command::Fleecebot => Some(FLEECEBOT_REPLY.to_owned()),
    }
}
