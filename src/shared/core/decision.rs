use crate::shared::core::errors::DomainError;

/// Outcome of a pure decide function: the events to append and the intents to
/// enqueue once the append succeeded, or the reason the command was refused.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision<E, I> {
    Accepted { events: Vec<E>, intents: Vec<I> },
    Rejected { reason: DomainError },
}

impl<E, I> Decision<E, I> {
    pub fn accept(events: Vec<E>, intents: Vec<I>) -> Self {
        Decision::Accepted { events, intents }
    }

    pub fn reject(reason: DomainError) -> Self {
        Decision::Rejected { reason }
    }

    pub fn from_result(result: Result<(Vec<E>, Vec<I>), DomainError>) -> Self {
        match result {
            Ok((events, intents)) => Decision::accept(events, intents),
            Err(reason) => Decision::reject(reason),
        }
    }

    pub fn rejection(&self) -> Option<&DomainError> {
        match self {
            Decision::Rejected { reason } => Some(reason),
            Decision::Accepted { .. } => None,
        }
    }
}
