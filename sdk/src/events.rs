//! Decoding registry notifications from transaction logs
//!
//! `emit!` writes each event as a `Program data: <base64>` log line holding
//! the event discriminator followed by its borsh encoding.

use crate::error::{GreetingSdkError, Result};
use anchor_lang::{AnchorDeserialize, Discriminator};
use base64::{engine::general_purpose::STANDARD, Engine};
use greeting_registry::{NewGreeting, OwnershipTransferred};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

const PROGRAM_DATA_PREFIX: &str = "Program data: ";

/// Any notification the registry emits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    NewGreeting(NewGreeting),
    OwnershipTransferred(OwnershipTransferred),
}

impl RegistryEvent {
    pub fn name(&self) -> &'static str {
        match self {
            RegistryEvent::NewGreeting(_) => "NewGreeting",
            RegistryEvent::OwnershipTransferred(_) => "OwnershipTransferred",
        }
    }
}

impl std::fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryEvent::NewGreeting(e) => write!(
                f,
                "NewGreeting {{ sender: {}, message: {:?}, timestamp: {} }}",
                e.sender, e.message, e.timestamp
            ),
            RegistryEvent::OwnershipTransferred(e) => write!(
                f,
                "OwnershipTransferred {{ previous_owner: {}, new_owner: {} }}",
                e.previous_owner, e.new_owner
            ),
        }
    }
}

/// Decode one raw event payload (discriminator + body)
///
/// Returns `Ok(None)` for events that belong to some other program.
pub fn decode_event(data: &[u8]) -> Result<Option<RegistryEvent>> {
    if let Some(body) = data.strip_prefix(NewGreeting::DISCRIMINATOR) {
        let event = NewGreeting::try_from_slice(body)
            .map_err(|e| GreetingSdkError::EventDecode(format!("NewGreeting: {}", e)))?;
        return Ok(Some(RegistryEvent::NewGreeting(event)));
    }

    if let Some(body) = data.strip_prefix(OwnershipTransferred::DISCRIMINATOR) {
        let event = OwnershipTransferred::try_from_slice(body)
            .map_err(|e| GreetingSdkError::EventDecode(format!("OwnershipTransferred: {}", e)))?;
        return Ok(Some(RegistryEvent::OwnershipTransferred(event)));
    }

    Ok(None)
}

/// Decode a single `Program data:` line
///
/// Says nothing about which program wrote the line; use [`parse_logs`] for
/// whole transactions.
pub fn parse_log_line(line: &str) -> Result<Option<RegistryEvent>> {
    let Some(encoded) = line.strip_prefix(PROGRAM_DATA_PREFIX) else {
        return Ok(None);
    };

    let data = STANDARD
        .decode(encoded.trim())
        .map_err(|e| GreetingSdkError::EventDecode(format!("invalid base64: {}", e)))?;

    decode_event(&data)
}

/// Invocation frame boundaries in runtime logs
#[derive(Debug, PartialEq, Eq)]
enum Frame {
    /// `Program <id> invoke [n]`
    Invoke(Pubkey),
    /// `Program <id> success`
    Success,
    /// `Program <id> failed: <reason>`
    Failed,
}

fn parse_frame(line: &str) -> Option<Frame> {
    let mut words = line.strip_prefix("Program ")?.split_whitespace();
    let program = Pubkey::from_str(words.next()?).ok()?;

    match words.next()? {
        "invoke" => Some(Frame::Invoke(program)),
        "success" => Some(Frame::Success),
        "failed:" => Some(Frame::Failed),
        _ => None,
    }
}

/// Extract the notifications `program_id` emitted in a transaction, in order
///
/// Only data lines written while `program_id` is the innermost executing
/// program count, so other programs cannot forge registry notifications. A
/// failed invocation aborts the whole transaction, so its logs yield nothing.
/// A registry data line that does not decode is an error.
pub fn parse_logs<S: AsRef<str>>(program_id: &Pubkey, logs: &[S]) -> Result<Vec<RegistryEvent>> {
    let mut stack: Vec<Pubkey> = Vec::new();
    let mut events = Vec::new();

    for line in logs {
        let line = line.as_ref();

        match parse_frame(line) {
            Some(Frame::Invoke(program)) => stack.push(program),
            Some(Frame::Success) => {
                stack.pop();
            }
            Some(Frame::Failed) => return Ok(Vec::new()),
            None if stack.last() == Some(program_id) => {
                if let Some(event) = parse_log_line(line)? {
                    events.push(event);
                }
            }
            None => {}
        }
    }

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::Event;
    use greeting_registry::ID as REGISTRY;

    fn data_line(payload: &[u8]) -> String {
        format!("{}{}", PROGRAM_DATA_PREFIX, STANDARD.encode(payload))
    }

    fn greeting_event(message: &str) -> NewGreeting {
        NewGreeting {
            sender: Pubkey::new_unique(),
            message: message.to_string(),
            timestamp: 1_700_000_000,
        }
    }

    /// Logs of one successful top-level registry instruction
    fn registry_frame(name: &str, data: &[Vec<u8>]) -> Vec<String> {
        let mut logs = vec![
            format!("Program {} invoke [1]", REGISTRY),
            format!("Program log: Instruction: {}", name),
        ];
        logs.extend(data.iter().map(|payload| data_line(payload)));
        logs.push(format!("Program {} consumed 4321 of 200000 compute units", REGISTRY));
        logs.push(format!("Program {} success", REGISTRY));
        logs
    }

    #[test]
    fn test_parse_transaction_logs() {
        let owner = Pubkey::new_unique();
        let new_owner = Pubkey::new_unique();
        let greeting = NewGreeting {
            sender: owner,
            message: "Event Greeting".to_string(),
            timestamp: 1_700_000_000,
        };
        let transfer = OwnershipTransferred {
            previous_owner: owner,
            new_owner,
        };

        let mut logs = registry_frame("SetGreeting", &[greeting.data()]);
        logs.extend(registry_frame("TransferOwnership", &[transfer.data()]));

        let events = parse_logs(&REGISTRY, &logs).unwrap();

        assert_eq!(
            events,
            vec![
                RegistryEvent::NewGreeting(greeting),
                RegistryEvent::OwnershipTransferred(transfer),
            ]
        );
        assert_eq!(events[0].name(), "NewGreeting");
        assert_eq!(events[1].name(), "OwnershipTransferred");
    }

    #[test]
    fn test_foreign_program_data_is_skipped() {
        let logs = registry_frame("SetGreeting", &[vec![9u8; 24]]);
        assert!(parse_logs(&REGISTRY, &logs).unwrap().is_empty());
    }

    #[test]
    fn test_data_outside_any_frame_is_skipped() {
        let logs = [data_line(&greeting_event("stray").data())];
        assert!(parse_logs(&REGISTRY, &logs).unwrap().is_empty());
    }

    #[test]
    fn test_other_program_cannot_emit_registry_notifications() {
        let other = Pubkey::new_unique();
        let mut logs = registry_frame("GetGreeting", &[]);
        logs.extend([
            format!("Program {} invoke [1]", other),
            data_line(&greeting_event("forged").data()),
            format!("Program {} success", other),
        ]);

        assert!(parse_logs(&REGISTRY, &logs).unwrap().is_empty());
    }

    #[test]
    fn test_same_named_event_elsewhere_keeps_registry_events() {
        let other = Pubkey::new_unique();
        let real = greeting_event("real");

        // Same discriminator, different layout
        let mut foreign = NewGreeting::DISCRIMINATOR.to_vec();
        foreign.extend_from_slice(&[1, 2, 3]);

        let mut logs = registry_frame("SetGreeting", &[real.data()]);
        logs.extend([
            format!("Program {} invoke [1]", other),
            data_line(&foreign),
            format!("Program {} success", other),
        ]);

        assert_eq!(
            parse_logs(&REGISTRY, &logs).unwrap(),
            vec![RegistryEvent::NewGreeting(real)]
        );
    }

    #[test]
    fn test_registry_called_from_another_program() {
        let caller = Pubkey::new_unique();
        let real = greeting_event("via cpi");

        let logs = vec![
            format!("Program {} invoke [1]", caller),
            format!("Program {} invoke [2]", REGISTRY),
            "Program log: Instruction: SetGreeting".to_string(),
            data_line(&real.data()),
            format!("Program {} success", REGISTRY),
            data_line(&greeting_event("after return").data()),
            format!("Program {} success", caller),
        ];

        assert_eq!(
            parse_logs(&REGISTRY, &logs).unwrap(),
            vec![RegistryEvent::NewGreeting(real)]
        );
    }

    #[test]
    fn test_no_events_in_failed_transaction() {
        let logs = [
            format!("Program {} invoke [1]", REGISTRY),
            "Program log: Instruction: SetGreeting".to_string(),
            "Program log: AnchorError occurred. Error Code: Unauthorized. Error Number: 6000. \
             Error Message: Only the owner can perform this action."
                .to_string(),
            format!("Program {} failed: custom program error: 0x1770", REGISTRY),
        ];
        assert!(parse_logs(&REGISTRY, &logs).unwrap().is_empty());
    }

    #[test]
    fn test_events_before_a_failure_are_dropped() {
        let mut logs = registry_frame("SetGreeting", &[greeting_event("rolled back").data()]);
        logs.extend([
            format!("Program {} invoke [1]", REGISTRY),
            format!("Program {} failed: custom program error: 0x1771", REGISTRY),
        ]);

        assert!(parse_logs(&REGISTRY, &logs).unwrap().is_empty());
    }

    #[test]
    fn test_truncated_event_is_an_error() {
        let data = greeting_event("cut short").data();
        let truncated = data[..data.len() - 4].to_vec();

        assert!(matches!(
            parse_logs(&REGISTRY, &registry_frame("SetGreeting", &[truncated])),
            Err(GreetingSdkError::EventDecode(_))
        ));
    }

    #[test]
    fn test_invalid_base64_is_an_error() {
        assert!(parse_log_line("Program data: !!!not base64!!!").is_err());
    }

    #[test]
    fn test_parse_frame() {
        assert_eq!(
            parse_frame(&format!("Program {} invoke [3]", REGISTRY)),
            Some(Frame::Invoke(REGISTRY))
        );
        assert_eq!(parse_frame(&format!("Program {} success", REGISTRY)), Some(Frame::Success));
        assert_eq!(
            parse_frame(&format!("Program {} failed: insufficient funds", REGISTRY)),
            Some(Frame::Failed)
        );
        assert_eq!(parse_frame("Program log: Instruction: SetGreeting"), None);
        assert_eq!(parse_frame("Program data: AAAA"), None);
        assert_eq!(
            parse_frame(&format!("Program {} consumed 10 of 200000 compute units", REGISTRY)),
            None
        );
    }

    #[test]
    fn test_display() {
        let sender = Pubkey::new_unique();
        let event = RegistryEvent::NewGreeting(NewGreeting {
            sender,
            message: "hi".to_string(),
            timestamp: 5,
        });
        assert_eq!(
            event.to_string(),
            format!("NewGreeting {{ sender: {}, message: \"hi\", timestamp: 5 }}", sender)
        );
    }
}
