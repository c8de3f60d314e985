use entity::proposal::Status;

use crate::error::{LifecycleError, LifecycleResult};

/// Operations that move a proposal between statuses.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Event {
    Promote,
    Conclude,
    Cancel,
    CreateContract,
}

/// Status reached when `event` is applied to a proposal in `current`.
///
/// Approved is terminal. Conclude and cancel are both accepted from any
/// numbered, non-approved status, so a cancelled quote can be priced again and
/// a priced one can be voided.
pub fn next_status(current: Status, event: Event) -> LifecycleResult<Status> {
    use Status::*;

    match (current, event) {
        (NotStarted, Event::Promote) => Ok(Draft),
        (Draft | Concluded | Cancelled, Event::Promote) => Err(LifecycleError::AlreadyPromoted),
        (Approved, Event::Promote | Event::Conclude | Event::Cancel) => {
            Err(LifecycleError::AlreadyApproved)
        }
        (NotStarted, Event::Conclude | Event::Cancel) => Err(LifecycleError::NotPromoted),
        (Draft | Concluded | Cancelled, Event::Conclude) => Ok(Concluded),
        (Draft | Concluded | Cancelled, Event::Cancel) => Ok(Cancelled),
        (Concluded, Event::CreateContract) => Ok(Approved),
        (NotStarted | Draft | Cancelled | Approved, Event::CreateContract) => {
            Err(LifecycleError::NotConcluded(current))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(current: Status, event: Event) -> LifecycleError {
        next_status(current, event).unwrap_err()
    }

    #[test]
    fn happy_path_reaches_approved() {
        let draft = next_status(Status::NotStarted, Event::Promote).unwrap();
        assert_eq!(draft, Status::Draft);
        let concluded = next_status(draft, Event::Conclude).unwrap();
        assert_eq!(concluded, Status::Concluded);
        let approved = next_status(concluded, Event::CreateContract).unwrap();
        assert_eq!(approved, Status::Approved);
    }

    #[test]
    fn approved_is_terminal() {
        for event in [Event::Promote, Event::Conclude, Event::Cancel] {
            assert!(matches!(
                rejected(Status::Approved, event),
                LifecycleError::AlreadyApproved
            ));
        }
        assert!(matches!(
            rejected(Status::Approved, Event::CreateContract),
            LifecycleError::NotConcluded(Status::Approved)
        ));
    }

    #[test]
    fn cancel_and_conclude_are_symmetric() {
        assert_eq!(
            next_status(Status::Concluded, Event::Cancel).unwrap(),
            Status::Cancelled
        );
        assert_eq!(
            next_status(Status::Cancelled, Event::Conclude).unwrap(),
            Status::Concluded
        );
        assert_eq!(
            next_status(Status::Cancelled, Event::Cancel).unwrap(),
            Status::Cancelled
        );
    }

    #[test]
    fn numbered_records_cannot_be_promoted_again() {
        for status in [Status::Draft, Status::Concluded, Status::Cancelled] {
            assert!(matches!(
                rejected(status, Event::Promote),
                LifecycleError::AlreadyPromoted
            ));
        }
    }

    #[test]
    fn entries_must_be_promoted_first() {
        assert!(matches!(
            rejected(Status::NotStarted, Event::Conclude),
            LifecycleError::NotPromoted
        ));
        assert!(matches!(
            rejected(Status::NotStarted, Event::Cancel),
            LifecycleError::NotPromoted
        ));
    }

    #[test]
    fn contract_requires_concluded() {
        for status in [Status::NotStarted, Status::Draft, Status::Cancelled] {
            assert!(matches!(
                rejected(status, Event::CreateContract),
                LifecycleError::NotConcluded(s) if s == status
            ));
        }
    }
}
