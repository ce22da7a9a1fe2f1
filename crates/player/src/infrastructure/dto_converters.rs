//! Wire DTO → domain conversions
//!
//! The server's ids are integers and its timestamps are naive UTC strings;
//! both are interpreted here so nothing above the gateway sees raw wire data.

use chrono::{DateTime, Utc};
use talekeeper_domain::common::{parse_timestamp, parse_timestamp_or, some_if_not_blank};
use talekeeper_domain::{DomainError, JournalEntry, JournalKind, Role, SessionInfo, SessionRef, Turn};
use talekeeper_shared::{JournalEntryData, SessionData, TurnData};

pub fn turn_from_data(data: TurnData) -> Result<Turn, DomainError> {
    let id = data
        .id
        .ok_or_else(|| DomainError::parse("history turn without id"))?;
    let role: Role = data.role.parse()?;
    let timestamp = parse_timestamp(&data.timestamp)?;

    Ok(Turn::confirmed(id, role, data.content, timestamp))
}

pub fn session_from_data(data: SessionData) -> Result<SessionInfo, DomainError> {
    let id = data
        .id
        .ok_or_else(|| DomainError::parse("session without id"))?;
    let created_at = data
        .created_at
        .as_deref()
        .map(|s| parse_timestamp_or(s, DateTime::<Utc>::UNIX_EPOCH))
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

    Ok(SessionInfo {
        id: SessionRef::from(id),
        name: data.name,
        start_prompt: data.start_prompt,
        summary: some_if_not_blank(data.summary),
        created_at,
    })
}

pub fn journal_entry_from_data(data: JournalEntryData) -> Result<JournalEntry, DomainError> {
    let id = data
        .id
        .ok_or_else(|| DomainError::parse("journal entry without id"))?;
    let kind: JournalKind = data.entry_type.parse()?;
    let created_at = data
        .created_at
        .as_deref()
        .map(|s| parse_timestamp_or(s, DateTime::<Utc>::UNIX_EPOCH))
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

    Ok(JournalEntry {
        id,
        kind,
        title: data.title,
        content: data.content,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn turn_data(id: Option<i64>, role: &str) -> TurnData {
        TurnData {
            id,
            session_id: Some(1),
            role: role.to_string(),
            content: "The door creaks open.".to_string(),
            timestamp: "2025-05-01T12:30:15.250000".to_string(),
        }
    }

    #[test]
    fn assistant_turn_becomes_narrator() {
        let turn = turn_from_data(turn_data(Some(7), "assistant")).unwrap();
        assert_eq!(turn.id.confirmed(), Some(7));
        assert_eq!(turn.role, Role::Narrator);
        assert_eq!(turn.timestamp.minute(), 30);
    }

    #[test]
    fn turn_without_id_is_rejected() {
        assert!(matches!(
            turn_from_data(turn_data(None, "user")),
            Err(DomainError::Parse(_))
        ));
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(turn_from_data(turn_data(Some(1), "wizard")).is_err());
    }

    #[test]
    fn session_with_missing_timestamp_uses_epoch() {
        let info = session_from_data(SessionData {
            id: Some(3),
            name: "The Sunken Crypt".to_string(),
            start_prompt: "You wake in the dark.".to_string(),
            summary: Some("  ".to_string()),
            created_at: None,
        })
        .unwrap();

        assert_eq!(info.id, SessionRef::from(3));
        assert_eq!(info.summary, None);
        assert_eq!(info.created_at, Utc.timestamp_opt(0, 0).unwrap());
    }

    #[test]
    fn journal_entry_kind_is_parsed() {
        let entry = journal_entry_from_data(JournalEntryData {
            id: Some(2),
            session_id: Some(3),
            title: "Find the lantern".to_string(),
            content: "The innkeeper lost it.".to_string(),
            entry_type: "quest".to_string(),
            created_at: Some("2025-05-01 12:00:00".to_string()),
        })
        .unwrap();

        assert_eq!(entry.kind, JournalKind::Quest);
    }
}
