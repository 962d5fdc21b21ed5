use crate::domain::message::MessageRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadMessagesOutput {
    pub messages: Vec<MessageRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistorySourceError {
    Unauthenticated,
    Unavailable,
    InvalidData,
}

/// Source of the account's full message history. The gateway serves the
/// whole list in one call, newest first; there is no pagination.
pub trait MessageHistorySource {
    fn list_messages(&self) -> Result<Vec<MessageRecord>, HistorySourceError>;
}

impl<T> MessageHistorySource for &T
where
    T: MessageHistorySource + ?Sized,
{
    fn list_messages(&self) -> Result<Vec<MessageRecord>, HistorySourceError> {
        (*self).list_messages()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadMessagesError {
    Unauthenticated,
    TemporarilyUnavailable,
    DataContractViolation,
}

pub fn load_messages(
    source: &dyn MessageHistorySource,
) -> Result<LoadMessagesOutput, LoadMessagesError> {
    let messages = source.list_messages().map_err(map_source_error)?;

    Ok(LoadMessagesOutput { messages })
}

fn map_source_error(error: HistorySourceError) -> LoadMessagesError {
    match error {
        HistorySourceError::Unauthenticated => LoadMessagesError::Unauthenticated,
        HistorySourceError::Unavailable => LoadMessagesError::TemporarilyUnavailable,
        HistorySourceError::InvalidData => LoadMessagesError::DataContractViolation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubSource {
        result: Result<Vec<MessageRecord>, HistorySourceError>,
        calls: std::sync::Mutex<usize>,
    }

    impl StubSource {
        fn with_result(result: Result<Vec<MessageRecord>, HistorySourceError>) -> Self {
            Self {
                result,
                calls: std::sync::Mutex::new(0),
            }
        }
    }

    impl MessageHistorySource for StubSource {
        fn list_messages(&self) -> Result<Vec<MessageRecord>, HistorySourceError> {
            *self.calls.lock().expect("calls lock") += 1;
            self.result.clone()
        }
    }

    fn sample_record() -> MessageRecord {
        MessageRecord {
            id: 1,
            uuid: "u-1".to_owned(),
            sender_id: "5".to_owned(),
            recipients: "0101234567".to_owned(),
            message: "hi".to_owned(),
            message_length: 2,
            schedule_time: None,
            status: "Delivered".to_owned(),
            api_response: None,
            sent_at: None,
            created_at: "2025-08-01T09:59:58Z".to_owned(),
            user: 7,
        }
    }

    #[test]
    fn keeps_source_payload_without_mutation() {
        let messages = vec![sample_record()];
        let source = StubSource::with_result(Ok(messages.clone()));

        let output = load_messages(&source).expect("load should succeed");

        assert_eq!(output.messages, messages);
        assert_eq!(*source.calls.lock().expect("calls lock"), 1);
    }

    #[test]
    fn maps_unauthenticated_error() {
        let source = StubSource::with_result(Err(HistorySourceError::Unauthenticated));

        let err = load_messages(&source).expect_err("must fail");

        assert_eq!(err, LoadMessagesError::Unauthenticated);
    }

    #[test]
    fn maps_unavailable_error_to_temporarily_unavailable() {
        let source = StubSource::with_result(Err(HistorySourceError::Unavailable));

        let err = load_messages(&source).expect_err("must fail");

        assert_eq!(err, LoadMessagesError::TemporarilyUnavailable);
    }

    #[test]
    fn maps_invalid_data_error_to_contract_violation() {
        let source = StubSource::with_result(Err(HistorySourceError::InvalidData));

        let err = load_messages(&source).expect_err("must fail");

        assert_eq!(err, LoadMessagesError::DataContractViolation);
    }
}
