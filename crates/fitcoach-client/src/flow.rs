/// Explicit state of an async orchestration flow.
///
/// Replaces the loose `isLoading`/`error` flag pair with a tagged union:
/// a flow is exactly one of idle, in flight, succeeded, or failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState<T> {
    Idle,
    Pending,
    Fulfilled(T),
    Rejected(String),
}

impl<T> FlowState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, FlowState::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, FlowState::Pending)
    }

    pub fn is_fulfilled(&self) -> bool {
        matches!(self, FlowState::Fulfilled(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, FlowState::Rejected(_))
    }

    /// The rejection message, if the flow failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            FlowState::Rejected(message) => Some(message),
            _ => None,
        }
    }

    /// The fulfilled value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            FlowState::Fulfilled(value) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flow_state_accessors() {
        let idle: FlowState<i32> = FlowState::Idle;
        assert!(idle.is_idle());
        assert_eq!(idle.value(), None);

        let fulfilled = FlowState::Fulfilled(7);
        assert!(fulfilled.is_fulfilled());
        assert_eq!(fulfilled.value(), Some(&7));

        let rejected: FlowState<i32> = FlowState::Rejected("nope".into());
        assert!(rejected.is_rejected());
        assert_eq!(rejected.error(), Some("nope"));
    }
}
